//! HTTP gateway tests against a wiremock server.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use moyeo_client::api::{Api, StoreQuery};
use moyeo_types::store::StoreCategory;
use moyeo_types::user::LoginRequest;

fn ok(data: serde_json::Value) -> serde_json::Value {
    json!({ "success": true, "data": data })
}

fn store_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "owner_id": 9,
        "name": name,
        "description": null,
        "category": "chicken",
        "phone": null,
        "address": "대구 북구 대학로 80",
        "open_time": "11:00",
        "close_time": "23:00",
        "closed_days": null,
        "delivery_fee": 3000,
        "min_order_amount": 15000,
        "thumbnail": null,
        "is_active": true,
        "created_at": "2025-03-01T09:00:00Z"
    })
}

#[tokio::test]
async fn test_login_returns_token_and_identity() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "kim@knu.ac.kr", "password": "pw1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!({
            "token": "jwt-abc",
            "user": {
                "id": 3,
                "email": "kim@knu.ac.kr",
                "name": "김철수",
                "nickname": "cheolsu",
                "role": "user",
                "campus": "daegu"
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let api = Api::new(server.uri());
    let auth = api
        .login(&LoginRequest {
            email: "kim@knu.ac.kr".to_string(),
            password: "pw1234".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(auth.token, "jwt-abc");
    assert_eq!(auth.user.nickname, "cheolsu");
}

#[tokio::test]
async fn test_store_list_passes_filters_and_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stores"))
        .and(query_param("category", "chicken"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok(json!([store_json(1, "처갓집"), store_json(2, "굽네")]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = Api::new(server.uri());
    let stores = api
        .list_stores(&StoreQuery {
            category: Some(StoreCategory::Chicken),
            page: Some(2),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].name, "처갓집");
    assert_eq!(stores[1].delivery_fee, 3000);
}

/// The bearer credential is attached to authenticated requests.
#[tokio::test]
async fn test_bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/notifications/read-all"))
        .and(header("authorization", "Bearer jwt-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = Api::new(server.uri()).with_bearer("jwt-abc");
    api.mark_all_notifications_read().await.unwrap();
}

/// A failure envelope surfaces the server's message verbatim.
#[tokio::test]
async fn test_failure_message_is_shown_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings/7/join"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "이미 참여한 모임입니다."
        })))
        .mount(&server)
        .await;

    let api = Api::new(server.uri()).with_bearer("jwt-abc");
    let request = moyeo_types::meeting::JoinMeetingRequest {
        menu_items: vec![],
        points_used: None,
    };
    let err = api.join_meeting(7, &request).await.unwrap_err();
    assert_eq!(err.to_string(), "이미 참여한 모임입니다.");
}

/// A failure envelope without a message falls back to the HTTP status.
#[tokio::test]
async fn test_failure_without_message_mentions_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/inquiries/3"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let api = Api::new(server.uri());
    let err = api.inquiry(3).await.unwrap_err();
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_complete_meeting_returns_refund() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/meetings/7/complete"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ok(json!({"refundPerPerson": 750}))),
        )
        .mount(&server)
        .await;

    let api = Api::new(server.uri()).with_bearer("jwt-abc");
    let summary = api.complete_meeting(7).await.unwrap();
    assert_eq!(summary.refund_per_person, 750);
}

/// Cancelling a menu line hits the order-items endpoint with DELETE.
#[tokio::test]
async fn test_cancel_order_item_uses_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/meetings/order-items/31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let api = Api::new(server.uri()).with_bearer("jwt-abc");
    api.cancel_order_item(31).await.unwrap();
}

#[tokio::test]
async fn test_chat_backfill_parses_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/chat/room/42/messages"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(json!([
            {
                "id": 1,
                "room_id": 42,
                "sender_id": 3,
                "nickname": "cheolsu",
                "message": "치킨 시키실 분",
                "created_at": "2025-03-01T12:00:00Z"
            },
            {
                "id": 2,
                "room_id": 42,
                "sender_id": 5,
                "nickname": "younghee",
                "message": "저요",
                "created_at": "2025-03-01T12:01:00Z"
            }
        ]))))
        .mount(&server)
        .await;

    let api = Api::new(server.uri()).with_bearer("jwt-abc");
    let messages = api.chat_messages(42, None, Some(100)).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message, "치킨 시키실 분");
    assert_eq!(messages[1].sender_id, 5);
}
