use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, CatalogConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::ProductStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn serve(app: Router) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

/// Fresh seeded store per test so tests never observe each other's writes.
async fn start_server() -> anyhow::Result<TestApp> {
    let state = ServerState::new(ProductStore::seeded());
    serve(routes::build_router(state, cors())).await
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_list_returns_seeded_products() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/products")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Vec<Value>>().await?;
    assert!(!body.is_empty());
    for p in &body {
        assert!(p["id"].is_u64());
        assert!(p["name"].is_string());
        assert!(p["price"].is_number());
        assert!(p["stock"].is_u64());
    }
    assert_eq!(body[0]["name"], "Laptop");
    Ok(())
}

#[tokio::test]
async fn e2e_get_by_id_and_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/products/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Laptop");
    assert_eq!(body["price"].as_f64(), Some(1000.0));
    assert_eq!(body["stock"], 5);

    let res = c.get(app.url("/products/999")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"message": "Product not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_create_assigns_fresh_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let existing: Vec<Value> = c.get(app.url("/products")).send().await?.json().await?;
    let max_id = existing.iter().filter_map(|p| p["id"].as_u64()).max().unwrap_or(0);

    let res = c.post(app.url("/products"))
        .json(&json!({"name": "Tablet", "price": 300, "stock": 15}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"].as_u64(), Some(max_id + 1));
    assert_eq!(body["name"], "Tablet");
    assert_eq!(body["price"].as_f64(), Some(300.0));
    assert_eq!(body["stock"], 15);

    let res = c.get(app.url(&format!("/products/{}", max_id + 1))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_create_ignores_client_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().post(app.url("/products"))
        .json(&json!({"id": 1, "name": "Clone", "price": 1, "stock": 1}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_ne!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_put_merges_partial_updates() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.url("/products/1")).json(&json!({"price": 1200})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["price"].as_f64(), Some(1200.0));
    assert_eq!(body["name"], "Laptop");
    assert_eq!(body["stock"], 5);

    let res = c.put(app.url("/products/1")).json(&json!({"name": "Updated Laptop"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Updated Laptop");
    assert_eq!(body["price"].as_f64(), Some(1200.0));
    assert_eq!(body["stock"], 5);
    Ok(())
}

#[tokio::test]
async fn e2e_put_never_changes_id() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.put(app.url("/products/1")).json(&json!({"id": 77, "stock": 3})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    assert_eq!(body["stock"], 3);

    let res = c.get(app.url("/products/77")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_put_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().put(app.url("/products/999")).json(&json!({"price": 500})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Product not found");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_then_everything_404s() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.delete(app.url("/products/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({"message": "Product deleted"}));

    let res = c.get(app.url("/products/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.put(app.url("/products/1")).json(&json!({"stock": 1})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.delete(app.url("/products/1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Product not found");

    let res = c.post(app.url("/products"))
        .json(&json!({"name": "Tablet", "price": 300, "stock": 15}))
        .send().await?;
    let body = res.json::<Value>().await?;
    assert_ne!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_empty_catalog_when_seeding_disabled() -> anyhow::Result<()> {
    let cfg = AppConfig { catalog: CatalogConfig { seed: false }, ..AppConfig::default() };
    let app = serve(server::startup::build_app(&cfg).await).await?;
    let c = client();

    let body: Vec<Value> = c.get(app.url("/products")).send().await?.json().await?;
    assert!(body.is_empty());

    let res = c.post(app.url("/products"))
        .json(&json!({"name": "First", "price": 1.5, "stock": 0}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["id"], 1);
    Ok(())
}

#[tokio::test]
async fn e2e_negative_id_is_not_found_everywhere() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let not_found = json!({"message": "Product not found"});

    let res = c.get(app.url("/products/-1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    let res = c.put(app.url("/products/-1")).json(&json!({"price": 500})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    let res = c.patch(app.url("/products/-1")).json(&json!({"stock": 2})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(app.url("/products/-1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, not_found);

    // 目录内容保持不变
    let body: Vec<Value> = c.get(app.url("/products")).send().await?.json().await?;
    assert_eq!(body.len(), 3);
    Ok(())
}
