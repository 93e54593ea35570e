//! Integration tests for the sharing and permission check endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};

    use crate::test_utils::{
        create_admin, create_user, create_wedding, send, test_app, test_app_with_db,
    };

    async fn check(app: &Router, wedding_id: &Value, user_id: i64, capability: &str) -> (StatusCode, Value) {
        let uri = format!("/api/weddings/{}/access/check", wedding_id);
        send(
            app,
            "POST",
            &uri,
            Some(user_id),
            Some(json!({"capability": capability})),
        )
        .await
    }

    /// Tests the creator of a wedding may do everything
    #[tokio::test]
    async fn it_allows_the_owner_everything() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let wedding = create_wedding(&app, owner).await;

        for capability in [
            "editDetails",
            "manageGuests",
            "viewAnalytics",
            "managePhotos",
            "editGuestBook",
        ] {
            let (status, body) = check(&app, &wedding["id"], owner, capability).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["allowed"], true);
        }
    }

    /// Tests a user without a grant is denied
    #[tokio::test]
    async fn it_denies_without_a_grant() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let stranger = create_user(&app, "stranger@example.com").await;
        let wedding = create_wedding(&app, owner).await;

        let (status, body) = check(&app, &wedding["id"], stranger, "viewAnalytics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], false);
    }

    /// Tests an unknown capability is a bad request, not a denial
    #[tokio::test]
    async fn it_returns_400_for_unknown_capability() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let wedding = create_wedding(&app, owner).await;

        let (status, _) = check(&app, &wedding["id"], owner, "deleteEverything").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    /// Tests a viewer's flags apply to one wedding only
    #[tokio::test]
    async fn it_scopes_grants_to_the_wedding() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let viewer = create_user(&app, "viewer@example.com").await;
        let first = create_wedding(&app, owner).await;
        let second = create_wedding(&app, owner).await;

        let uri = format!("/api/weddings/{}/access", first["id"]);
        let (status, body) = send(
            &app,
            "POST",
            &uri,
            Some(owner),
            Some(json!({
                "user_id": viewer,
                "role": "viewer",
                "permissions": {"canViewAnalytics": true, "canManageGuests": false},
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "viewer");
        assert_eq!(body["permissions"]["canViewAnalytics"], true);

        let uri = format!("/api/weddings/{}/access", second["id"]);
        let (status, _) = send(
            &app,
            "POST",
            &uri,
            Some(owner),
            Some(json!({
                "user_id": viewer,
                "role": "viewer",
                "permissions": {"canManageGuests": true},
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = check(&app, &first["id"], viewer, "manageGuests").await;
        assert_eq!(body["allowed"], false);
        let (_, body) = check(&app, &first["id"], viewer, "viewAnalytics").await;
        assert_eq!(body["allowed"], true);
        let (_, body) = check(&app, &second["id"], viewer, "manageGuests").await;
        assert_eq!(body["allowed"], true);
    }

    /// Tests updating and revoking a grant
    #[tokio::test]
    async fn it_updates_and_revokes_grants() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let manager = create_user(&app, "manager@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let access_uri = format!("/api/weddings/{}/access", wedding["id"]);
        let grant_uri = format!("{}/{}", access_uri, manager);

        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({"user_id": manager, "role": "guest_manager"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Grants default to no capabilities
        let (_, body) = check(&app, &wedding["id"], manager, "manageGuests").await;
        assert_eq!(body["allowed"], false);

        let (status, body) = send(
            &app,
            "PUT",
            &grant_uri,
            Some(owner),
            Some(json!({
                "role": "guest_manager",
                "permissions": {"canManageGuests": true},
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["permissions"]["canManageGuests"], true);

        let (_, body) = check(&app, &wedding["id"], manager, "manageGuests").await;
        assert_eq!(body["allowed"], true);

        let (status, body) = send(&app, "GET", &access_uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::OK);
        let grants = body.as_array().unwrap();
        assert_eq!(grants.len(), 2);
        assert_eq!(grants[0]["role"], "owner");
        assert_eq!(grants[0]["user_id"], owner);
        assert_eq!(grants[1]["user_id"], manager);

        let (status, _) = send(&app, "DELETE", &grant_uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = check(&app, &wedding["id"], manager, "manageGuests").await;
        assert_eq!(body["allowed"], false);

        let (status, _) = send(&app, "DELETE", &grant_uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Tests only owners and admins can change sharing
    #[tokio::test]
    async fn it_restricts_sharing_to_owners_and_admins() {
        let (app, db) = test_app_with_db().await;
        let owner = create_user(&app, "owner@example.com").await;
        let manager = create_user(&app, "manager@example.com").await;
        let admin = create_admin(&db, "admin@example.com").await;
        let guest = create_user(&app, "guest@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let access_uri = format!("/api/weddings/{}/access", wedding["id"]);

        // A manager with every flag still can't share
        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({
                "user_id": manager,
                "role": "guest_manager",
                "permissions": {
                    "canEditDetails": true,
                    "canManageGuests": true,
                    "canViewAnalytics": true,
                    "canManagePhotos": true,
                    "canEditGuestBook": true,
                },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(manager),
            Some(json!({"user_id": guest, "role": "viewer"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, "GET", &access_uri, Some(manager), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(admin),
            Some(json!({"user_id": guest, "role": "viewer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Sharing twice with the same user conflicts
        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({"user_id": guest, "role": "viewer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    /// Tests sharing validates the role and the target user
    #[tokio::test]
    async fn it_validates_share_requests() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let access_uri = format!("/api/weddings/{}/access", wedding["id"]);

        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({"user_id": 999, "role": "viewer"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({"user_id": owner, "role": "superuser"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests a co-owner grant gives full access even without flags
    #[tokio::test]
    async fn it_treats_owner_grants_as_full_access() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let partner = create_user(&app, "partner@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let access_uri = format!("/api/weddings/{}/access", wedding["id"]);

        let (status, body) = send(
            &app,
            "POST",
            &access_uri,
            Some(owner),
            Some(json!({"user_id": partner, "role": "owner"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["permissions"]["canEditDetails"], false);

        let (_, body) = check(&app, &wedding["id"], partner, "editGuestBook").await;
        assert_eq!(body["allowed"], true);
    }
}
