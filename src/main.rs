use std::fmt::{Debug, Display};
use tokio::task::JoinError;
use trustbridge::configuration::get_configuration;
use trustbridge::request_sweeper::run_sweeper_until_stopped;
use trustbridge::startup::Application;
use trustbridge::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("trustbridge".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration.clone()).await?;
    let sweeper = run_sweeper_until_stopped(application.request_store(), configuration.store);

    let application_task = tokio::spawn(application.run_until_stopped());
    let sweeper_task = tokio::spawn(sweeper);

    tokio::select! {
        o = application_task => report_exit("API", o),
        o = sweeper_task => report_exit("Expired request sweeper", o),
    };

    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
