use crate::helpers::{TRACING, configure_database};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::LazyLock;
use uuid::Uuid;
use trustbridge::configuration::{StoreBackend, get_configuration};
use trustbridge::startup::Application;

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store_path: PathBuf,
    pub db_connection_pool: Option<PgPool>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_verify<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(format!("{}/api/verify", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_verify_raw(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/verify", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_verify<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .put(format!("{}/api/verify", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn poll_by_code(&self, code: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/verify/poll", &self.address))
            .query(&[("code", code)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn poll_by_request_id(&self, request_id: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/verify/poll", &self.address))
            .query(&[("requestId", request_id)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn poll_without_parameters(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/verify/poll", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_verified_profile(&self, request_id: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/verify/{}/profile", &self.address, request_id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_registry_profile(&self, my_kad: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}/api/registry/{}", &self.address, my_kad))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_codes(&self) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/codes", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a pending request for `code` and returns its JSON body.
    pub async fn create_request(&self, code: &str) -> serde_json::Value {
        let response = self
            .post_verify(&serde_json::json!({ "code": code }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        response
            .json()
            .await
            .expect("Failed to parse created request")
    }

    /// Approves or rejects a request on behalf of `owner_id`.
    pub async fn decide(&self, request_id: &str, status: &str, owner_id: &str) -> reqwest::Response {
        self.put_verify(&serde_json::json!({
            "id": request_id,
            "status": status,
            "ownerId": owner_id
        }))
        .await
    }
}

#[tracing::instrument(name = "Spawning test application", skip_all)]
pub async fn spawn_app() -> TestApp {
    spawn(StoreBackend::JsonFile).await
}

#[tracing::instrument(name = "Spawning test application backed by Postgres", skip_all)]
pub async fn spawn_app_with_postgres() -> TestApp {
    spawn(StoreBackend::Postgres).await
}

async fn spawn(backend: StoreBackend) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    LazyLock::force(&TRACING);

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // Use a random OS port
        c.application.port = 0;
        c.store.backend = backend;
        // Use a different store for each test case
        c.store.json_path = std::env::temp_dir()
            .join("trustbridge-api-tests")
            .join(format!("{}.json", Uuid::new_v4()));
        c.database.database_name = format!("test-{}", Uuid::new_v4());
        c
    };

    let db_connection_pool = match backend {
        StoreBackend::Postgres => Some(configure_database(&configuration.database).await),
        StoreBackend::JsonFile => None,
    };

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application.");
    let port = application.port();
    let address = format!("http://127.0.0.1:{}", port);

    #[allow(clippy::let_underscore_future)]
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        port,
        store_path: configuration.store.json_path,
        db_connection_pool,
        api_client: reqwest::Client::new(),
    }
}
