use crate::helpers::assert_json_error;
use crate::test_app::spawn_app;
use crate::test_data::{ALI_LEGAL_NAME, ALI_MY_KAD, ALI_USER_ID, NONEXISTENT_REQUEST_ID};

#[tokio::test]
async fn approved_request_reveals_the_owner_profile() {
    // Arrange
    let app = spawn_app().await;
    let created = app.create_request("482913").await;
    let request_id = created["id"].as_str().unwrap();
    app.decide(request_id, "approved", ALI_USER_ID).await;

    // Act
    let response = app.get_verified_profile(request_id).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let profile: serde_json::Value = response.json().await.unwrap();
    assert_eq!(profile["legalName"], ALI_LEGAL_NAME);
    assert_eq!(profile["isFlaggedScammer"], false);
}

#[tokio::test]
async fn owner_may_be_identified_by_my_kad() {
    // Arrange
    let app = spawn_app().await;
    let created = app.create_request("482913").await;
    let request_id = created["id"].as_str().unwrap();
    app.decide(request_id, "approved", ALI_MY_KAD).await;

    // Act
    let response = app.get_verified_profile(request_id).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let profile: serde_json::Value = response.json().await.unwrap();
    assert_eq!(profile["id"], ALI_USER_ID);
}

#[tokio::test]
async fn pending_and_rejected_requests_do_not_reveal_the_profile() {
    // Arrange
    let app = spawn_app().await;
    let pending = app.create_request("482913").await;
    let rejected = app.create_request("482913").await;
    let rejected_id = rejected["id"].as_str().unwrap();
    app.decide(rejected_id, "rejected", ALI_USER_ID).await;

    for request_id in [pending["id"].as_str().unwrap(), rejected_id] {
        // Act
        let response = app.get_verified_profile(request_id).await;

        // Assert
        assert_eq!(response.status().as_u16(), 403);
    }
}

#[tokio::test]
async fn approval_without_a_known_owner_has_no_profile() {
    // Arrange
    let app = spawn_app().await;
    let created = app.create_request("482913").await;
    let request_id = created["id"].as_str().unwrap();
    app.decide(request_id, "approved", "user_nobody").await;

    // Act
    let response = app.get_verified_profile(request_id).await;

    // Assert
    let status = response.status().as_u16();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_json_error(status, &body, 404, "Owner profile not found");
}

#[tokio::test]
async fn unknown_request_has_no_profile() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get_verified_profile(NONEXISTENT_REQUEST_ID).await;

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}
