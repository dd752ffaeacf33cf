use axum::Router;
use axum::routing::{get, post};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::configuration::{DatabaseSettings, Settings, StoreBackend};
use crate::registry::MockRegistry;
use crate::routes::{
    create_verification_request, decide_verification_request, generate_code,
    get_registry_profile, get_verified_profile, health_check, poll_verification_request,
};
use crate::store::{JsonFileStore, PostgresStore, RequestStore};

pub fn get_connection_pool(db_configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(db_configuration.connect_options())
}

/// Picks the persistence backend named in the configuration.
pub fn build_request_store(configuration: &Settings) -> Arc<dyn RequestStore> {
    let request_ttl = configuration.store.request_ttl();
    match configuration.store.backend {
        StoreBackend::JsonFile => Arc::new(JsonFileStore::new(
            configuration.store.json_path.clone(),
            request_ttl,
        )),
        StoreBackend::Postgres => Arc::new(PostgresStore::new(
            get_connection_pool(&configuration.database),
            request_ttl,
        )),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RequestStore>,
    pub registry: Arc<MockRegistry>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/api/codes", post(generate_code))
        .route("/api/registry/{my_kad}", get(get_registry_profile))
        .route(
            "/api/verify",
            post(create_verification_request).put(decide_verification_request),
        )
        .route("/api/verify/poll", get(poll_verification_request))
        .route("/api/verify/{id}/profile", get(get_verified_profile))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        // Both parties poll from a browser app served on its own origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    app_state: AppState,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let app_state = AppState {
            store: build_request_store(&configuration),
            registry: Arc::new(MockRegistry::seeded()),
        };
        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            port,
            backend = ?configuration.store.backend,
            "Application built"
        );

        Ok(Self {
            port,
            listener,
            app_state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The store the server writes to, for background tasks that must share it.
    pub fn request_store(&self) -> Arc<dyn RequestStore> {
        Arc::clone(&self.app_state.store)
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let app = router(self.app_state);
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
