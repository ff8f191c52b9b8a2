#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use tourbook_api::assets::AssetStore;
use tourbook_api::config::{LogFormat, ServerConfig};
use tourbook_api::router::build_app_router;
use tourbook_api::state::AppState;
use tourbook_api::templates::Templates;

const BOUNDARY: &str = "tourbook-test-boundary";

/// Application under test plus the temporary directory backing its static
/// files and image assets. Dropping it removes the directory.
pub struct TestApp {
    pub router: Router,
    pub static_dir: TempDir,
}

impl TestApp {
    /// A fresh handle to the router (each `oneshot` consumes one).
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn asset_dir(&self) -> PathBuf {
        test_config(self.static_dir.path()).asset_dir()
    }

    /// Names of all files currently in the asset directory.
    pub fn stored_assets(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.asset_dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn asset_exists(&self, name: &str) -> bool {
        self.asset_dir().join(name).is_file()
    }
}

/// Build a test `ServerConfig` rooted at `static_dir`.
pub fn test_config(static_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        static_dir: static_dir.to_path_buf(),
        template_dir: None,
        log_format: LogFormat::Pretty,
        log_file: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a temporary asset directory.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let static_dir = tempfile::tempdir().unwrap();
    let config = test_config(static_dir.path());
    std::fs::create_dir_all(config.asset_dir()).unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        assets: Arc::new(AssetStore::new(config.asset_dir())),
        templates: Arc::new(Templates::embedded().unwrap()),
    };

    TestApp {
        router: build_app_router(state, &config),
        static_dir,
    }
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// One part of a `multipart/form-data` request body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Text parts for the Paris example tour, with every name prefixed by
/// `prefix` (`""` for create, `"new_"` for update).
pub fn paris_parts(prefix: &str) -> Vec<(String, String)> {
    [
        ("title", "Paris Trip"),
        ("description", "Louvre, Orsay and an evening on the Seine."),
        ("place", "Paris"),
        ("start_date_tour", "2024-06-01"),
        ("duration", "5"),
        ("max_people", "10"),
        ("available_places", "10"),
        ("occupied_places", "0"),
        ("price_per_person", "500"),
    ]
    .into_iter()
    .map(|(k, v)| (format!("{prefix}{k}"), v.to_string()))
    .collect()
}

/// Override one field in a list built by [`paris_parts`].
pub fn with_field(mut fields: Vec<(String, String)>, name: &str, value: &str) -> Vec<(String, String)> {
    match fields.iter_mut().find(|(k, _)| k == name) {
        Some(entry) => entry.1 = value.to_string(),
        None => fields.push((name.to_string(), value.to_string())),
    }
    fields
}

/// Text parts plus an optional file part, as a multipart body.
pub fn tour_form(fields: &[(String, String)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut parts: Vec<Part<'_>> = fields
        .iter()
        .map(|(k, v)| Part::Text(k.as_str(), v.as_str()))
        .collect();
    if let Some((name, filename, bytes)) = image {
        parts.push(Part::File {
            name,
            filename,
            bytes,
        });
    }
    multipart_body(&parts)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    send_multipart(app, "POST", uri, body).await
}

pub async fn put_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    send_multipart(app, "PUT", uri, body).await
}

async fn send_multipart(app: Router, method: &str, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
