//! End-to-end HTTP test: run the router on an ephemeral port backed by a scratch JSON file and
//! exercise every endpoint and status code.

use patient_records::{transport, JsonFileStore, PatientStore};
use serde_json::{json, Value};
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    _dir: tempfile::TempDir,
    file: std::path::PathBuf,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> TestServer {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("patients.json");
        let store: Arc<dyn PatientStore> = Arc::new(JsonFileStore::new(&file));
        let router = transport::http::create_router(transport::http::AppState::new(store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            _dir: dir,
            file,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn create(&self, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url("/create"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn edit(&self, id: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .put(self.url(&format!("/edit/{}", id)))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn delete(&self, id: &str) -> (u16, Value) {
        let resp = self
            .client
            .delete(self.url(&format!("/delete/{}", id)))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn p001() -> Value {
    json!({
        "id": "P001",
        "name": "A",
        "city": "X",
        "age": 30,
        "gender": "Male",
        "height": 1.75,
        "weight": 80
    })
}

#[tokio::test]
async fn info_endpoints_respond() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/").await;
    assert_eq!(status, 200);
    assert_eq!(body["Message"], "Patient Management System API");

    let (status, body) = server.get("/about").await;
    assert_eq!(status, 200);
    assert!(body["Message"].as_str().unwrap().contains("patient records"));
}

#[tokio::test]
async fn create_view_and_fetch() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/view").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));

    let (status, body) = server.create(p001()).await;
    assert_eq!(status, 201);
    assert_eq!(body["message"], "Patient created successfully");

    let (status, body) = server.get("/patient/P001").await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], "P001");
    assert_eq!(body["bmi"], json!(26.12));
    assert_eq!(body["verdict"], "Overweight");

    // Stored form: keyed by id, no derived fields.
    let (_, view) = server.get("/view").await;
    let stored = view["P001"].as_object().unwrap();
    assert_eq!(stored.len(), 6);
    assert!(!stored.contains_key("bmi"));
    assert!(!stored.contains_key("id"));

    let on_disk: Value = serde_json::from_slice(&std::fs::read(&server.file).unwrap()).unwrap();
    assert_eq!(on_disk, view);
}

#[tokio::test]
async fn duplicate_create_is_400_and_bad_schema_is_422() {
    let server = TestServer::start().await;
    assert_eq!(server.create(p001()).await.0, 201);

    let (status, body) = server.create(p001()).await;
    assert_eq!(status, 400);
    assert!(body["detail"].as_str().unwrap().contains("already exists"));

    let mut bad = p001();
    bad["id"] = json!("P002");
    bad["age"] = json!(0);
    let (status, body) = server.create(bad).await;
    assert_eq!(status, 422);
    assert_eq!(body["errors"][0]["field"], "age");

    let mut missing = p001();
    missing["id"] = json!("P003");
    missing.as_object_mut().unwrap().remove("height");
    assert_eq!(server.create(missing).await.0, 422);

    let mut gender = p001();
    gender["id"] = json!("P004");
    gender["gender"] = json!("Robot");
    assert_eq!(server.create(gender).await.0, 422);

    let (_, view) = server.get("/view").await;
    assert_eq!(view.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_patient_is_404() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/patient/P404").await;
    assert_eq!(status, 404);
    assert!(body["detail"].as_str().unwrap().contains("P404"));

    assert_eq!(server.edit("P404", json!({ "age": 40 })).await.0, 404);
    assert_eq!(server.delete("P404").await.0, 404);
}

#[tokio::test]
async fn partial_edit_recomputes_derived_fields() {
    let server = TestServer::start().await;
    server.create(p001()).await;

    let (status, body) = server.edit("P001", json!({ "weight": 60 })).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Patient updated successfully");

    let (_, body) = server.get("/patient/P001").await;
    assert_eq!(body["bmi"], json!(19.59));
    assert_eq!(body["verdict"], "Normal");
    assert_eq!(body["name"], "A");
    assert_eq!(body["city"], "X");
    assert_eq!(body["age"], 30);
    assert_eq!(body["gender"], "Male");
    assert_eq!(body["height"], json!(1.75));
}

#[tokio::test]
async fn empty_edit_leaves_file_unchanged() {
    let server = TestServer::start().await;
    server.create(p001()).await;
    let before = std::fs::read(&server.file).unwrap();

    assert_eq!(server.edit("P001", json!({})).await.0, 200);
    assert_eq!(std::fs::read(&server.file).unwrap(), before);
}

#[tokio::test]
async fn invalid_edit_is_422_and_rolled_back() {
    let server = TestServer::start().await;
    server.create(p001()).await;
    let before = std::fs::read(&server.file).unwrap();

    let (status, _) = server.edit("P001", json!({ "name": "B", "height": -1.0 })).await;
    assert_eq!(status, 422);
    assert_eq!(std::fs::read(&server.file).unwrap(), before);

    // Wrong JSON type never reaches the service.
    assert_eq!(server.edit("P001", json!({ "age": "old" })).await.0, 422);
}

#[tokio::test]
async fn delete_then_fetch_is_404() {
    let server = TestServer::start().await;
    server.create(p001()).await;

    let (status, body) = server.delete("P001").await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Patient deleted successfully");
    assert_eq!(server.get("/patient/P001").await.0, 404);
    assert_eq!(server.delete("P001").await.0, 404);
}

#[tokio::test]
async fn sort_orders_and_rejects() {
    let server = TestServer::start().await;
    for (id, height, weight) in [("P001", 1.80, 70.0), ("P002", 1.55, 90.0), ("P003", 1.70, 55.0)] {
        let mut r = p001();
        r["id"] = json!(id);
        r["height"] = json!(height);
        r["weight"] = json!(weight);
        assert_eq!(server.create(r).await.0, 201);
    }

    let (status, body) = server.get("/sort?sort_by=height").await;
    assert_eq!(status, 200);
    let heights: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["height"].as_f64().unwrap())
        .collect();
    assert!(heights.windows(2).all(|w| w[0] <= w[1]));

    let (status, body) = server.get("/sort?sort_by=weight&order=desc").await;
    assert_eq!(status, 200);
    let weights: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["weight"].as_f64().unwrap())
        .collect();
    assert_eq!(weights, vec![90.0, 70.0, 55.0]);
    assert!(body[0]["verdict"].is_string());

    assert_eq!(server.get("/sort?sort_by=age&order=asc").await.0, 400);
    assert_eq!(server.get("/sort?sort_by=height&order=up").await.0, 400);
    assert_eq!(server.get("/sort").await.0, 400);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_all_persist() {
    let server = Arc::new(TestServer::start().await);
    let mut handles = Vec::new();
    for i in 0..12 {
        let server = server.clone();
        handles.push(tokio::spawn(async move {
            let mut r = p001();
            r["id"] = json!(format!("C{:02}", i));
            server.create(r).await.0
        }));
    }
    for h in handles {
        assert_eq!(h.await.unwrap(), 201);
    }
    let (_, view) = server.get("/view").await;
    assert_eq!(view.as_object().unwrap().len(), 12);
}
