//! Integration tests for the photo endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{create_user, create_wedding, send, share, test_app};

    /// Tests adding and removing photos needs managePhotos
    #[tokio::test]
    async fn it_requires_manage_photos() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let photographer = create_user(&app, "photographer@example.com").await;
        let viewer = create_user(&app, "viewer@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let wedding_id = wedding["id"].as_i64().unwrap();
        share(&app, owner, wedding_id, photographer, "guest_manager", json!({"canManagePhotos": true})).await;
        share(&app, owner, wedding_id, viewer, "viewer", json!({})).await;
        let photos_uri = format!("/api/weddings/{}/photos", wedding_id);

        let (status, _) = send(
            &app,
            "POST",
            &photos_uri,
            Some(viewer),
            Some(json!({"url": "https://cdn.example.com/a.jpg"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, memory) = send(
            &app,
            "POST",
            &photos_uri,
            Some(photographer),
            Some(json!({"url": "https://cdn.example.com/a.jpg", "caption": "First dance"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(memory["photo_type"], "memory");

        let (status, hero) = send(
            &app,
            "POST",
            &photos_uri,
            Some(owner),
            Some(json!({"url": "https://cdn.example.com/hero.jpg", "photo_type": "hero"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, "POST", &photos_uri, Some(owner), Some(json!({"url": ""}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Anyone with a grant can look, the hero photo comes first
        let (status, photos) = send(&app, "GET", &photos_uri, Some(viewer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photos[0]["id"], hero["id"]);
        assert_eq!(photos[1]["id"], memory["id"]);

        let photo_uri = format!("{}/{}", photos_uri, memory["id"]);
        let (status, _) = send(&app, "DELETE", &photo_uri, Some(viewer), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, "DELETE", &photo_uri, Some(photographer), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let invite_uri = format!("/api/invite/{}/photos", wedding["unique_url"].as_str().unwrap());
        let (status, photos) = send(&app, "GET", &invite_uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(photos.as_array().unwrap().len(), 1);
    }

    /// Tests strangers can't list photos by wedding id
    #[tokio::test]
    async fn it_hides_photos_from_strangers() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let stranger = create_user(&app, "stranger@example.com").await;
        let wedding = create_wedding(&app, owner).await;

        let uri = format!("/api/weddings/{}/photos", wedding["id"]);
        let (status, _) = send(&app, "GET", &uri, Some(stranger), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
