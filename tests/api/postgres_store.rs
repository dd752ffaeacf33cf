//! These tests need a Postgres instance matching `configuration/base.yaml`.
//! Run them with `cargo test -- --ignored`.
use crate::test_app::spawn_app_with_postgres;
use crate::test_data::ALI_USER_ID;

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn create_persists_the_request_in_the_database() {
    // Arrange
    let app = spawn_app_with_postgres().await;

    // Act
    let created = app.create_request("482913").await;

    // Assert
    let pool = app.db_connection_pool.as_ref().unwrap();
    let (code, status): (String, String) =
        sqlx::query_as("SELECT code, status FROM verification_requests")
            .fetch_one(pool)
            .await
            .expect("Failed to fetch saved request.");
    assert_eq!(code, "482913");
    assert_eq!(status, "pending");
    assert_eq!(created["status"], "pending");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn a_request_is_decided_only_once_in_the_database() {
    // Arrange
    let app = spawn_app_with_postgres().await;
    let created = app.create_request("482913").await;
    let request_id = created["id"].as_str().unwrap();

    // Act
    let first = app.decide(request_id, "approved", ALI_USER_ID).await;
    let second = app.decide(request_id, "rejected", ALI_USER_ID).await;

    // Assert
    assert_eq!(first.status().as_u16(), 200);
    assert_eq!(second.status().as_u16(), 409);
    let polled: serde_json::Value = app
        .poll_by_request_id(request_id)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(polled["request"]["status"], "approved");
    assert_eq!(polled["request"], {
        let mut expected = created.clone();
        expected["status"] = "approved".into();
        expected["ownerId"] = ALI_USER_ID.into();
        expected
    });
}

#[tokio::test]
#[ignore = "requires a running Postgres instance"]
async fn expired_requests_are_pruned_on_create() {
    // Arrange
    let app = spawn_app_with_postgres().await;
    let stale = app.create_request("111111").await;
    let pool = app.db_connection_pool.as_ref().unwrap();
    sqlx::query("UPDATE verification_requests SET created_at = now() - interval '2 hours'")
        .execute(pool)
        .await
        .unwrap();

    // Act
    app.create_request("222222").await;

    // Assert
    let response = app.poll_by_request_id(stale["id"].as_str().unwrap()).await;
    assert_eq!(response.status().as_u16(), 404);
}
