//! Integration tests for the guest list, RSVP and analytics endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_utils::{create_user, create_wedding, send, share, test_app};

    /// Tests the guest list needs manageGuests
    #[tokio::test]
    async fn it_requires_manage_guests() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let manager = create_user(&app, "manager@example.com").await;
        let viewer = create_user(&app, "viewer@example.com").await;
        let stranger = create_user(&app, "stranger@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let wedding_id = wedding["id"].as_i64().unwrap();
        share(&app, owner, wedding_id, manager, "guest_manager", json!({"canManageGuests": true})).await;
        share(&app, owner, wedding_id, viewer, "viewer", json!({"canViewAnalytics": true})).await;
        let guests_uri = format!("/api/weddings/{}/guests", wedding_id);

        for user in [viewer, stranger] {
            let (status, _) = send(&app, "GET", &guests_uri, Some(user), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            let (status, _) = send(&app, "POST", &guests_uri, Some(user), Some(json!({"name": "Aziza"}))).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
        }
        let (status, _) = send(&app, "GET", &guests_uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, guest) = send(
            &app,
            "POST",
            &guests_uri,
            Some(manager),
            Some(json!({"name": " Aziza ", "side": "bride", "plus_one": true})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(guest["name"], "Aziza");
        assert_eq!(guest["rsvp_status"], "pending");
        assert_eq!(guest["side"], "bride");
        assert_eq!(guest["category"], "family");
        assert_eq!(guest["responded_at"], serde_json::Value::Null);

        let guest_uri = format!("{}/{}", guests_uri, guest["id"]);
        let (status, _) = send(&app, "PUT", &guest_uri, Some(viewer), Some(json!({"side": "groom"}))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, updated) = send(
            &app,
            "PUT",
            &guest_uri,
            Some(owner),
            Some(json!({"rsvp_status": "confirmed", "additional_guests": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["rsvp_status"], "confirmed");
        assert_eq!(updated["additional_guests"], 2);
        assert_eq!(updated["side"], "bride");
        assert!(updated["responded_at"].is_string());

        let (status, _) = send(&app, "PUT", &guest_uri, Some(owner), Some(json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, list) = send(&app, "GET", &guests_uri, Some(manager), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = send(&app, "DELETE", &guest_uri, Some(stranger), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = send(&app, "DELETE", &guest_uri, Some(manager), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &guest_uri, Some(manager), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Tests a guest id from another wedding can't be edited through this one
    #[tokio::test]
    async fn it_scopes_guests_to_their_wedding() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let other = create_user(&app, "other@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let other_wedding = create_wedding(&app, other).await;

        let (_, guest) = send(
            &app,
            "POST",
            &format!("/api/weddings/{}/guests", other_wedding["id"]),
            Some(other),
            Some(json!({"name": "Aziza"})),
        )
        .await;

        let uri = format!("/api/weddings/{}/guests/{}", wedding["id"], guest["id"]);
        let (status, _) = send(&app, "PUT", &uri, Some(owner), Some(json!({"name": "Hijacked"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &uri, Some(owner), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Tests guests answer through the invitation url only
    #[tokio::test]
    async fn it_records_rsvps_by_invite_url() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let guests_uri = format!("/api/weddings/{}/guests", wedding["id"]);
        let rsvp_uri = format!("/api/invite/{}/rsvp", wedding["unique_url"].as_str().unwrap());

        send(
            &app,
            "POST",
            &guests_uri,
            Some(owner),
            Some(json!({"name": "Aziza", "phone": "+998 90 000 00 00"})),
        )
        .await;

        // Listed guests are matched on name regardless of case
        let (status, body) = send(
            &app,
            "POST",
            &rsvp_uri,
            None,
            Some(json!({"name": "aziza", "rsvp_status": "confirmed", "plus_one": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rsvp_status"], "confirmed");
        assert!(body["responded_at"].is_string());
        assert!(body.get("phone").is_none());

        // Anyone else with the link is added to the list
        let (status, _) = send(
            &app,
            "POST",
            &rsvp_uri,
            None,
            Some(json!({"name": "Bekzod", "email": "B@Example.com", "rsvp_status": "maybe"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, guests) = send(&app, "GET", &guests_uri, Some(owner), None).await;
        let guests = guests.as_array().unwrap();
        assert_eq!(guests.len(), 2);
        assert_eq!(guests[0]["rsvp_status"], "confirmed");
        assert_eq!(guests[0]["plus_one"], true);
        assert_eq!(guests[0]["phone"], "+998 90 000 00 00");
        assert_eq!(guests[1]["email"], "b@example.com");

        // Pending isn't an answer
        let (status, _) = send(
            &app,
            "POST",
            &rsvp_uri,
            None,
            Some(json!({"name": "Aziza", "rsvp_status": "pending"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            "POST",
            "/api/invite/nope/rsvp",
            None,
            Some(json!({"name": "Aziza", "rsvp_status": "confirmed"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Tests a private wedding takes no RSVPs
    #[tokio::test]
    async fn it_rejects_rsvps_for_private_weddings() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        send(
            &app,
            "PUT",
            &format!("/api/weddings/{}", wedding["id"]),
            Some(owner),
            Some(json!({"is_public": false})),
        )
        .await;

        let rsvp_uri = format!("/api/invite/{}/rsvp", wedding["unique_url"].as_str().unwrap());
        let (status, _) = send(
            &app,
            "POST",
            &rsvp_uri,
            None,
            Some(json!({"name": "Aziza", "rsvp_status": "confirmed"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    /// Tests analytics need viewAnalytics and count the expected head count
    #[tokio::test]
    async fn it_requires_view_analytics() {
        let app = test_app().await;
        let owner = create_user(&app, "owner@example.com").await;
        let analyst = create_user(&app, "analyst@example.com").await;
        let manager = create_user(&app, "manager@example.com").await;
        let wedding = create_wedding(&app, owner).await;
        let wedding_id = wedding["id"].as_i64().unwrap();
        share(&app, owner, wedding_id, analyst, "viewer", json!({"canViewAnalytics": true})).await;
        share(&app, owner, wedding_id, manager, "guest_manager", json!({"canManageGuests": true})).await;

        let guests_uri = format!("/api/weddings/{}/guests", wedding_id);
        for guest in [
            json!({"name": "A", "rsvp_status": "confirmed", "plus_one": true, "additional_guests": 2}),
            json!({"name": "B", "rsvp_status": "confirmed"}),
            json!({"name": "C", "rsvp_status": "declined", "plus_one": true}),
            json!({"name": "D", "rsvp_status": "maybe"}),
            json!({"name": "E"}),
        ] {
            let (status, _) = send(&app, "POST", &guests_uri, Some(manager), Some(guest)).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        let invite = wedding["unique_url"].as_str().unwrap();
        send(
            &app,
            "POST",
            &format!("/api/invite/{}/guestbook", invite),
            None,
            Some(json!({"guest_name": "A", "message": "Congratulations!"})),
        )
        .await;

        let uri = format!("/api/weddings/{}/analytics", wedding_id);
        let (status, _) = send(&app, "GET", &uri, Some(manager), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, "GET", &uri, Some(analyst), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "total_guests": 5,
                "confirmed": 2,
                "declined": 1,
                "maybe": 1,
                "pending": 1,
                "expected_attendance": 5,
                "guest_book_entries": 1,
                "photos": 0,
            })
        );
    }
}
