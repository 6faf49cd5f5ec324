//! Explicit `/api` proxy routes against mock upstream services.

use serde_json::{json, Value};

mod common;
use common::Reply;

#[tokio::test]
async fn test_success_body_is_relayed() {
    let (backend, requests) = common::start_mock_backend(Reply::json(200, r#"{"a":1}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client().get(common::url(&gateway, "/api/users")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "a": 1 }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].target, "/users");
    assert_eq!(seen[0].header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_rejection_is_wrapped_with_upstream_status() {
    let (backend, _) = common::start_mock_backend(Reply::text(404, "not found")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .get(common::url(&gateway, "/api/users/u1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "error": "User Service Error: not found" })
    );

    let res = common::client()
        .get(common::url(&gateway, "/api/locations/loc1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "error": "Location Service Error: not found" })
    );
}

#[tokio::test]
async fn test_path_parameters_are_encoded() {
    let (backend, requests) = common::start_mock_backend(Reply::json(200, "{}")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .get(common::url(&gateway, "/api/users/a%20b%2Fc"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].target, "/users/a%20b%2Fc");
}

#[tokio::test]
async fn test_post_forwards_json_body() {
    let (backend, requests) =
        common::start_mock_backend(Reply::json(201, r#"{"userId":"u1"}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .post(common::url(&gateway, "/api/users"))
        .json(&json!({ "email": "a@kt.com", "nickname": "커피" }))
        .send()
        .await
        .unwrap();
    // Wrap policy answers 200 on any upstream success.
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "userId": "u1" }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].target, "/users");
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({ "email": "a@kt.com", "nickname": "커피" }));
}

#[tokio::test]
async fn test_logout_requires_user_id() {
    let (backend, requests) = common::start_mock_backend(Reply::json(200, "{}")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;
    let client = common::client();

    for path in ["/api/users/logout", "/api/users/logout?userId="] {
        let res = client.post(common::url(&gateway, path)).send().await.unwrap();
        assert_eq!(res.status(), 400);
        assert_eq!(
            res.json::<Value>().await.unwrap(),
            json!({ "error": "userId가 필요합니다" })
        );
    }
    assert!(requests.lock().unwrap().is_empty());

    let res = client
        .post(common::url(&gateway, "/api/users/logout?userId=a%40kt.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].target, "/users/logout?userId=a%40kt.com");
}

#[tokio::test]
async fn test_location_delete_acknowledges() {
    let (backend, requests) = common::start_mock_backend(Reply::text(204, "")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .delete(common::url(&gateway, "/api/locations/loc101"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "success": true }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "DELETE");
    assert_eq!(seen[0].target, "/locations/loc101");
}

#[tokio::test]
async fn test_notification_rejection_passes_through() {
    let (backend, _) =
        common::start_mock_backend(Reply::json(404, r#"{"message":"no such notification"}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .get(common::url(&gateway, "/api/notifications/n1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "message": "no such notification" })
    );
}

#[tokio::test]
async fn test_notification_routes_map_paths() {
    let (backend, requests) = common::start_mock_backend(Reply::json(200, "[]")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;
    let client = common::client();

    client.get(common::url(&gateway, "/api/notifications")).send().await.unwrap();
    client
        .get(common::url(&gateway, "/api/notifications?userId=u%201"))
        .send()
        .await
        .unwrap();
    let res = client
        .patch(common::url(&gateway, "/api/notifications/n1/guests/g1/guest_status"))
        .json(&json!({ "status": "ACCEPTED" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let seen = requests.lock().unwrap().clone();
    let targets: Vec<&str> = seen.iter().map(|c| c.target.as_str()).collect();
    assert_eq!(
        targets,
        vec![
            "/notifications",
            "/notifications/user/u%201",
            "/notifications/n1/guests/g1/guest_status"
        ]
    );
    assert_eq!(seen[2].method, "PATCH");
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (backend, requests) = common::start_mock_backend(Reply::json(200, "[]")).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .get(common::url(&gateway, "/api/locations"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "req-123");

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].header("x-request-id"), Some("req-123"));
}

#[tokio::test]
async fn test_user_login_forwards_credentials() {
    let (backend, requests) =
        common::start_mock_backend(Reply::json(200, r#"{"userId":"u1","nickname":"커피"}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .post(common::url(&gateway, "/api/users/login"))
        .json(&json!({ "email": "a@kt.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "userId": "u1", "nickname": "커피" })
    );

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].target, "/users/login");
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({ "email": "a@kt.com" }));
}

#[tokio::test]
async fn test_nickname_generate() {
    let (backend, requests) =
        common::start_mock_backend(Reply::json(200, r#"{"nickname":"졸린 라떼"}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .post(common::url(&gateway, "/api/users/nickname/generate"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "nickname": "졸린 라떼" }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].target, "/users/nickname/generate");
    assert_eq!(seen[0].body, "");
}

#[tokio::test]
async fn test_user_delete_relays_upstream_body() {
    let (backend, requests) =
        common::start_mock_backend(Reply::json(200, r#"{"deleted":"u1"}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .delete(common::url(&gateway, "/api/users/u1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "deleted": "u1" }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "DELETE");
    assert_eq!(seen[0].target, "/users/u1");
}

#[tokio::test]
async fn test_location_get_success() {
    let (backend, requests) = common::start_mock_backend(Reply::json(
        200,
        r#"{"locationId":"loc101","building":"판교","floor":"1"}"#,
    ))
    .await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .get(common::url(&gateway, "/api/locations/loc101"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "locationId": "loc101", "building": "판교", "floor": "1" })
    );

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].target, "/locations/loc101");
}

#[tokio::test]
async fn test_notification_create_keeps_upstream_status() {
    let (backend, requests) =
        common::start_mock_backend(Reply::json(201, r#"{"id":"n1","guests":[]}"#)).await;
    let gateway = common::start_gateway(common::single_backend_config(backend)).await;

    let res = common::client()
        .post(common::url(&gateway, "/api/notifications"))
        .json(&json!({ "hostId": "u1", "title": "커피챗" }))
        .send()
        .await
        .unwrap();
    // Passthrough keeps the upstream's 201.
    assert_eq!(res.status(), 201);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "id": "n1", "guests": [] }));

    let seen = requests.lock().unwrap().clone();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].target, "/notifications");
    let body: Value = serde_json::from_str(&seen[0].body).unwrap();
    assert_eq!(body, json!({ "hostId": "u1", "title": "커피챗" }));
}
