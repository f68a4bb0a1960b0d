use std::net::SocketAddr;

use axum::Router;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};

struct TestApp {
    base_url: String,
}

/// Spin up a fresh app on an ephemeral port. Every test gets its own stores,
/// so ids always start from 1.
async fn start_server() -> anyhow::Result<TestApp> {
    let state = AppState::new();
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn permission_crud_roundtrip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Create; any client-supplied id is ignored.
    let res = c
        .post(format!("{}/permissions", app.base_url))
        .json(&json!({"id": 99, "name": "read", "url": "/a"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await?;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "read");

    let res = c.get(format!("{}/permissions/1", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Full update by id.
    let res = c
        .put(format!("{}/permissions/1", app.base_url))
        .json(&json!({"name": "write", "url": "/b"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["name"], "write");
    assert_eq!(updated["url"], "/b");

    // Delete returns the removed record.
    let res = c.delete(format!("{}/permissions/1", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let removed: Value = res.json().await?;
    assert_eq!(removed["name"], "write");

    let res = c.get(format!("{}/permissions/1", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The deleted id is never reissued.
    let res = c
        .post(format!("{}/permissions", app.base_url))
        .json(&json!({"name": "exec", "url": "/c"}))
        .send()
        .await?;
    let next: Value = res.json().await?;
    assert_eq!(next["id"], 2);
    Ok(())
}

#[tokio::test]
async fn delete_keeps_survivor_order() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for (name, url) in [("a", "/a"), ("b", "/b"), ("c", "/c")] {
        c.post(format!("{}/permissions", app.base_url))
            .json(&json!({"name": name, "url": url}))
            .send()
            .await?;
    }
    c.delete(format!("{}/permissions/2", app.base_url)).send().await?;

    let list: Value = c
        .get(format!("{}/permissions", app.base_url))
        .send()
        .await?
        .json()
        .await?;
    let ids: Vec<u64> = list
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["id"].as_u64().expect("id"))
        .collect();
    assert_eq!(ids, vec![1, 3]);
    Ok(())
}

#[tokio::test]
async fn signal_classes_are_distinguishable() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // Missing resource -> 404.
    let res = c.get(format!("{}/roles/1", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Unresolved reference -> 400, and nothing is created.
    let res = c
        .post(format!("{}/roles", app.base_url))
        .json(&json!({"name": "broken", "permission_id": [1, 999]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Invalid Reference");
    let list: Value = c.get(format!("{}/roles", app.base_url)).send().await?.json().await?;
    assert_eq!(list.as_array().expect("array").len(), 0);

    // Structurally unparseable body -> 400 before any mutation.
    let res = c
        .post(format!("{}/roles", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["error"], "Malformed Input");
    Ok(())
}

#[tokio::test]
async fn role_views_follow_permission_updates() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.post(format!("{}/permissions", app.base_url))
        .json(&json!({"name": "read", "url": "/a"}))
        .send()
        .await?;
    c.post(format!("{}/roles", app.base_url))
        .json(&json!({"name": "viewer", "permission_id": [1]}))
        .send()
        .await?;

    c.put(format!("{}/permissions/1", app.base_url))
        .json(&json!({"name": "write", "url": "/a"}))
        .send()
        .await?;

    let role: Value = c.get(format!("{}/roles/1", app.base_url)).send().await?.json().await?;
    assert_eq!(role["permissions"][0]["name"], "write");
    Ok(())
}

#[tokio::test]
async fn user_chain_and_role_delete_without_cascade() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    c.post(format!("{}/permissions", app.base_url))
        .json(&json!({"name": "view", "url": "/x"}))
        .send()
        .await?;
    c.post(format!("{}/roles", app.base_url))
        .json(&json!({"name": "viewer", "permission_id": [1]}))
        .send()
        .await?;

    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"name": "a", "username": "a", "password": "p", "role_id": [1]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await?;
    assert_eq!(user["id"], 1);
    assert_eq!(user["roles"][0]["permissions"][0]["name"], "view");

    // Deleting the role succeeds even with a user still referencing it.
    let res = c.delete(format!("{}/roles/1", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let fetched: Value = c.get(format!("{}/users/1", app.base_url)).send().await?.json().await?;
    assert_eq!(fetched["roles"].as_array().expect("array").len(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_reference_sequences_are_valid() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c
        .post(format!("{}/roles", app.base_url))
        .json(&json!({"name": "bare", "permission_id": []}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let role: Value = res.json().await?;
    assert_eq!(role["permissions"].as_array().expect("array").len(), 0);

    let res = c
        .post(format!("{}/users", app.base_url))
        .json(&json!({"name": "b", "username": "b", "password": "p", "role_id": []}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
