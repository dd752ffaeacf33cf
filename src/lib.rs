pub mod api_doc;
pub mod configuration;
pub mod domain;
pub mod registry;
pub mod request_sweeper;
pub mod routes;
pub mod startup;
pub mod store;
pub mod telemetry;
