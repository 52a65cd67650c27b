/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use tunebox_core::UserId;
use tunebox_library::LibraryService;
use tunebox_server::{
    config::UploadSettings, create_router, services::AuthService, state::AppState, FileStorage,
};

pub const BOUNDARY: &str = "tunebox-test-boundary";

/// Router over a fresh database and upload directory
pub struct TestApp {
    pub router: Router,
    pub auth: Arc<AuthService>,
    pub upload_dir: PathBuf,
    _temp_dir: TempDir,
}

/// Create a test app with migrations applied
pub async fn create_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let store = tunebox_storage::connect(&db_url).await.unwrap();

    let upload_dir = temp_dir.path().join("uploads");
    let file_storage = FileStorage::new(upload_dir.clone(), "uploads");
    file_storage.initialize().await.unwrap();

    let library = LibraryService::new(Arc::new(store), Arc::new(file_storage));
    let auth = Arc::new(AuthService::new("test-secret-key".to_string(), 1));

    let uploads = UploadSettings {
        directory: upload_dir.clone(),
        url_prefix: "uploads".to_string(),
        max_upload_bytes: 1024 * 1024,
    };
    let router = create_router(AppState::new(library, Arc::clone(&auth)), &uploads);

    TestApp {
        router,
        auth,
        upload_dir,
        _temp_dir: temp_dir,
    }
}

impl TestApp {
    pub fn token(&self, user: &str) -> String {
        self.auth.create_access_token(&UserId::new(user)).unwrap()
    }

    /// Send a request and decode the JSON body (Null when empty or not JSON)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// Authenticated request with an optional JSON body
    pub async fn call(
        &self,
        user: &str,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Upload `bytes` as `file_name` with extra text fields; returns the song id
    pub async fn upload(
        &self,
        user: &str,
        file_name: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/songs/upload")
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(Some((file_name, b"ID3fake-audio")), fields)))
            .unwrap();

        self.send(request).await
    }

    /// Upload and return the new song's id, asserting success
    pub async fn upload_song(&self, user: &str, title: &str) -> String {
        let (status, body) = self
            .upload(user, &format!("{}.mp3", title), &[("title", title)])
            .await;
        assert_eq!(status, StatusCode::CREATED, "upload failed: {}", body);
        body["song"]["id"].as_str().unwrap().to_string()
    }
}

/// Build a multipart/form-data body with an optional `song` file part
pub fn multipart_body(file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"song\"; filename=\"{}\"\r\nContent-Type: audio/mpeg\r\n\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
