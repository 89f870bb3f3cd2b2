use resource_booking::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::sqlite_state,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

pub struct CsrfHeaders {
    pub cookie: String,
    pub token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_timezone("UTC").await
    }

    pub async fn with_timezone(tz: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            timezone: tz.parse().expect("Unknown test time zone"),
            log_dir: "./logs".to_string(),
            secure_cookies: false,
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Fetches an anti-forgery token the way a browser would.
    pub async fn csrf(&self) -> CsrfHeaders {
        let response = self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/csrf")
                .body(Body::empty())
                .unwrap()
        ).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .find(|c| c.starts_with("csrf_token="))
            .expect("No csrf_token cookie returned");

        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let body = parse_body(response).await;
        let token = body["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        CsrfHeaders { cookie, token }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    /// Sends a JSON request carrying a valid anti-forgery cookie and header.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let csrf = self.csrf().await;
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, &csrf.cookie)
            .header("X-CSRF-Token", &csrf.token);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };

        self.router.clone().oneshot(request.unwrap()).await.unwrap()
    }

    pub async fn create_resource(&self, name: &str, location: Option<&str>, description: Option<&str>) -> Value {
        let res = self.send("POST", "/api/v1/resources", Some(json!({
            "name": name,
            "location": location,
            "description": description,
            "capacity": 4,
            "is_available": true
        }))).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        parse_body(res).await
    }

    pub async fn book(&self, resource_id: &str, start: &str, end: &str, booked_by: &str) -> Response {
        self.send("POST", "/api/v1/bookings", Some(json!({
            "resource_id": resource_id,
            "start_time": start,
            "end_time": end,
            "booked_by": booked_by,
            "purpose": "Team meeting"
        }))).await
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
