mod health_check;
mod poll;
mod postgres_store;
mod profile;
mod test_app;
