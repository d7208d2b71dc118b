use kappa_icons::Config;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub server: ServerGuard,
    pub output_dir: PathBuf,
}

impl TestEnv {
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let output_dir = tmp.path().join("kappa_items");
        let server = mockito::Server::new_async().await;

        Self {
            _tmp: tmp,
            server,
            output_dir,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            graphql_url: format!("{}/graphql", self.server.url()),
            output_dir: self.output_dir.clone(),
            ..Config::default()
        }
    }

    pub fn icon_url(&self, file: &str) -> String {
        format!("{}/icons/{}", self.server.url(), file)
    }

    /// Answers the task query with `body`, expecting exactly one call.
    pub async fn mock_query(&mut self, body: Value) -> Mock {
        self.server
            .mock("POST", "/graphql")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::Regex("5c51aac186f77432ea65c552".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    pub async fn mock_icon(&mut self, file: &str, bytes: &[u8], hits: usize) -> Mock {
        self.server
            .mock("GET", format!("/icons/{}", file).as_str())
            .with_status(200)
            .with_header("content-type", "image/webp")
            .with_body(bytes)
            .expect(hits)
            .create_async()
            .await
    }
}

pub fn item(id: &str, name: &str, link: Option<&str>) -> Value {
    json!({ "id": id, "name": name, "gridImageLink": link })
}

pub fn task_body(objectives: Vec<Value>) -> Value {
    json!({
        "data": {
            "task": {
                "name": "Collector",
                "objectives": objectives,
            }
        }
    })
}

pub fn objective(id: &str, items: Vec<Value>) -> Value {
    json!({ "id": id, "items": items })
}
