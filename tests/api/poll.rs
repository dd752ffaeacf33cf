use crate::helpers::assert_json_error;
use crate::test_app::spawn_app;
use crate::test_data::{ALI_USER_ID, NONEXISTENT_REQUEST_ID};

#[tokio::test]
async fn owner_poll_returns_null_when_nothing_is_pending() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.poll_by_code("482913").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["request"].is_null());
}

#[tokio::test]
async fn owner_poll_returns_the_most_recent_pending_request_for_the_code() {
    // Arrange
    let app = spawn_app().await;
    app.create_request("482913").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newest = app.create_request("482913").await;
    app.create_request("999111").await;

    // Act
    let response = app.poll_by_code("482913").await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["request"], newest);
}

#[tokio::test]
async fn owner_poll_stops_returning_a_request_once_it_is_decided() {
    // Arrange
    let app = spawn_app().await;
    let created = app.create_request("482913").await;
    app.decide(created["id"].as_str().unwrap(), "approved", ALI_USER_ID)
        .await;

    // Act
    let response = app.poll_by_code("482913").await;

    // Assert
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["request"].is_null());
}

#[tokio::test]
async fn requester_poll_sees_the_owner_decision() {
    // Arrange
    let app = spawn_app().await;
    let created = app.create_request("482913").await;
    let request_id = created["id"].as_str().unwrap();

    // Act
    let before: serde_json::Value = app.poll_by_request_id(request_id).await.json().await.unwrap();
    app.decide(request_id, "approved", ALI_USER_ID).await;
    let after: serde_json::Value = app.poll_by_request_id(request_id).await.json().await.unwrap();

    // Assert
    assert_eq!(before["request"]["status"], "pending");
    assert_eq!(after["request"]["status"], "approved");
    assert_eq!(after["request"]["ownerId"], ALI_USER_ID);
}

#[tokio::test]
async fn requester_poll_returns_a_404_for_an_unknown_request() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.poll_by_request_id(NONEXISTENT_REQUEST_ID).await;

    // Assert
    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_json_error(status, &body, 404, "Request not found");
}

#[tokio::test]
async fn poll_without_parameters_returns_a_400() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.poll_without_parameters().await;

    // Assert
    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_json_error(status, &body, 400, "Missing parameters");
}
