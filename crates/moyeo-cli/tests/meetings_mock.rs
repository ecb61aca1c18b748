//! Integration tests for meeting commands against a mocked HTTP API.

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes an authenticated session into a fresh MOYEO_HOME.
fn logged_in_home() -> TempDir {
    let temp = tempdir().unwrap();
    fs::write(
        temp.path().join("session.json"),
        json!({
            "token": "jwt-abc",
            "user": {
                "id": 3,
                "email": "kim@knu.ac.kr",
                "name": "김철수",
                "nickname": "cheolsu",
                "role": "user",
                "campus": "daegu"
            }
        })
        .to_string(),
    )
    .unwrap();
    temp
}

fn meeting_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "leader_id": 7,
        "store_id": 1,
        "title": "황금반점 같이 시켜요",
        "dining_type": "individual",
        "order_type": "instant",
        "pickup_location": "공대 2호관 앞",
        "meeting_location": null,
        "min_members": 4,
        "max_members": 8,
        "delivery_fee": 6000,
        "allow_early_order": false,
        "deadline": "2026-09-01T09:00:00Z",
        "description": null,
        "status": "recruiting",
        "campus": "daegu",
        "created_at": "2026-08-30T08:00:00Z",
        "store_name": "황금반점",
        "store_category": "chinese",
        "store_thumbnail": null,
        "current_members": 2,
        "leader_nickname": "younghee"
    })
}

fn store_detail_json() -> serde_json::Value {
    json!({
        "id": 1,
        "owner_id": 9,
        "name": "황금반점",
        "description": null,
        "category": "chinese",
        "phone": null,
        "address": "대구 북구",
        "open_time": "10:00",
        "close_time": "21:00",
        "closed_days": null,
        "delivery_fee": 6000,
        "min_order_amount": 15000,
        "thumbnail": null,
        "is_active": true,
        "created_at": "2025-03-01T09:00:00Z",
        "menus": [
            {"id": 11, "store_id": 1, "name": "짜장면", "price": 8000,
             "description": null, "image": null, "is_available": true},
            {"id": 12, "store_id": 1, "name": "탕수육", "price": 15000,
             "description": null, "image": null, "is_available": false}
        ]
    })
}

/// Mounts the meeting-detail and store-detail lookups the join flow makes.
async fn mount_meeting_and_store(server: &MockServer, meeting_id: i64) {
    let mut detail = meeting_json(meeting_id);
    detail["min_order_amount"] = json!(15000);
    detail["members"] = json!([]);
    detail["orderItems"] = json!([]);

    Mock::given(method("GET"))
        .and(path(format!("/api/meetings/{meeting_id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": detail})),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stores/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": store_detail_json()
        })))
        .mount(server)
        .await;
}

/// meetings list renders the per-person delivery share (6000원 / 4 → 1500원).
#[tokio::test]
async fn test_meetings_list_shows_delivery_share() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/meetings"))
        .and(query_param("campus", "daegu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [meeting_json(5)]
        })))
        .mount(&server)
        .await;

    let temp = logged_in_home();
    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "list", "--campus", "daegu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("황금반점 같이 시켜요"))
        .stdout(predicate::str::contains("1500원/인"));
}

/// join merges duplicate --item lines by menu id before submitting.
#[tokio::test]
async fn test_join_merges_items_and_submits_cart() {
    let server = MockServer::start().await;
    mount_meeting_and_store(&server, 5).await;
    Mock::given(method("POST"))
        .and(path("/api/meetings/5/join"))
        .and(body_json(json!({
            "menuItems": [{"menuId": 11, "quantity": 3, "isShared": false}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "모임에 참여했습니다."
        })))
        .mount(&server)
        .await;

    let temp = logged_in_home();
    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "join", "5", "--item", "11:1", "--item", "11:2"])
        .assert()
        .success()
        // 8000원 × 3, one merged line
        .stdout(predicate::str::contains("짜장면 ×3 = 24000원"))
        .stdout(predicate::str::contains("menu total:     24000원"))
        .stdout(predicate::str::contains("delivery share: 1500원"))
        .stdout(predicate::str::contains("joined meeting #5"));
}

/// Joining twice surfaces the server's message verbatim.
#[tokio::test]
async fn test_join_duplicate_shows_server_message() {
    let server = MockServer::start().await;
    mount_meeting_and_store(&server, 5).await;
    Mock::given(method("POST"))
        .and(path("/api/meetings/5/join"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "message": "이미 참여한 모임입니다."
        })))
        .mount(&server)
        .await;

    let temp = logged_in_home();
    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "join", "5", "--item", "11:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("이미 참여한 모임입니다."));
}

/// Unavailable menus are rejected locally, before any join request.
#[tokio::test]
async fn test_join_rejects_unavailable_menu() {
    let server = MockServer::start().await;
    mount_meeting_and_store(&server, 5).await;

    let temp = logged_in_home();
    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "join", "5", "--item", "12:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("탕수육"))
        .stderr(predicate::str::contains("unavailable"));
}

/// complete prints the per-person refund from the response.
#[tokio::test]
async fn test_complete_shows_refund() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/meetings/5/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"refundPerPerson": 750}
        })))
        .mount(&server)
        .await;

    let temp = logged_in_home();
    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "complete", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("refund per person: 750원"));
}

/// Authenticated commands refuse to run without a session.
#[tokio::test]
async fn test_join_requires_login() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();

    Command::cargo_bin("moyeo")
        .unwrap()
        .env("MOYEO_HOME", temp.path())
        .env("MOYEO_BASE_URL", server.uri())
        .args(["meetings", "join", "5", "--item", "11:1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}
