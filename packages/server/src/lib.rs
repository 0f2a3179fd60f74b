#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the temple map application.
//!
//! Serves the temple directory (read from the configured source on every
//! request), server-side search, the visit counter, and the "submit a
//! missing temple" form. Optionally serves the built frontend at `/`.

pub mod config;
pub mod feedback;
mod handlers;
pub mod interactive;
pub mod visits;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use temple_map_source::TempleSource;

use crate::config::ServerConfig;
use crate::feedback::FeedbackRelay;
use crate::visits::VisitCounter;

/// Shared application state.
pub struct AppState {
    /// Where temples are loaded from.
    pub source: Arc<dyn TempleSource>,
    /// Persistent visit counter.
    pub visits: VisitCounter,
    /// Feedback logger and relay.
    pub feedback: FeedbackRelay,
}

impl AppState {
    /// Builds the state described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured source is unknown or an HTTP
    /// client cannot be built.
    pub fn from_config(config: &ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let source = config.ingest.source()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("temple-map/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            source: Arc::new(source),
            visits: VisitCounter::new(config.visits_path()),
            feedback: FeedbackRelay::new(
                client,
                config.feedback_relay_url.clone(),
                config.feedback_access_key.clone(),
            ),
        })
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/temples", web::get().to(handlers::temples))
            .route("/temples/search", web::get().to(handlers::search))
            .route("/states", web::get().to(handlers::states))
            .route("/visits", web::get().to(handlers::get_visits))
            .route("/visits", web::post().to(handlers::post_visits))
            .route("/send-feedback", web::post().to(handlers::send_feedback)),
    );
}

/// Starts the temple map API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the state cannot be built, the
/// server fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config)
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    log::info!(
        "Serving temples from {} ({})",
        state.source.name(),
        config.ingest.data_dir.display()
    );
    if config.feedback_relay_url.is_none() {
        log::info!("No feedback relay configured; submissions will only be logged");
    }

    let state = web::Data::new(state);
    let static_dir = config.static_dir.clone();

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};
    use temple_map_source::StaticSource;
    use temple_map_source_models::SourceKind;

    fn temp_visits() -> VisitCounter {
        VisitCounter::new(
            std::env::temp_dir()
                .join(format!("temple-map-server-{}", uuid::Uuid::new_v4()))
                .join("visits.json"),
        )
    }

    fn state_with(payload: Value) -> web::Data<AppState> {
        web::Data::new(AppState {
            source: Arc::new(StaticSource::new("test", SourceKind::FlatJson, payload)),
            visits: temp_visits(),
            feedback: FeedbackRelay::new(reqwest::Client::new(), None, None),
        })
    }

    fn directory() -> Value {
        json!([
            { "id": "1", "name": "BAPS Shri Swaminarayan Mandir", "state": "Georgia",
              "address": "460 Rockbridge Rd NW, Lilburn, GA 30047",
              "latitude": 33.8896, "longitude": -84.143 },
            { "id": "2", "name": "Sri Meenakshi Temple", "state": "Texas",
              "address": "17130 McLean Rd, Pearland, TX 77584" }
        ])
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!(state_with(directory()));
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn temples_returns_normalized_directory() {
        let app = app!(state_with(directory()));
        let req = test::TestRequest::get().uri("/api/temples").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let temples = body["temples"].as_array().unwrap();
        assert_eq!(temples.len(), 2);
        assert_eq!(temples[0]["name"], "BAPS Shri Swaminarayan Mandir");
        assert_eq!(
            temples[0]["googleMapsLink"],
            "https://maps.google.com/?q=33.8896,-84.143"
        );
        assert!(temples[1].get("coordinates").is_none());
    }

    #[actix_web::test]
    async fn temples_reports_source_failure() {
        let app = app!(state_with(json!({ "unexpected": true })));
        let req = test::TestRequest::get().uri("/api/temples").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to fetch temple data");
        assert!(body["details"].is_string());
    }

    #[actix_web::test]
    async fn search_filters_by_query_and_state() {
        let app = app!(state_with(directory()));

        let req = test::TestRequest::get()
            .uri("/api/temples/search?q=shri")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["temples"].as_array().unwrap().len(), 1);
        assert_eq!(body["temples"][0]["id"], "1");
        assert_eq!(body["located"], 1);
        assert_eq!(body["total"], 2);

        let req = test::TestRequest::get()
            .uri("/api/temples/search?state=Texas")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["temples"][0]["id"], "2");
        assert_eq!(body["located"], 0);
    }

    #[actix_web::test]
    async fn states_are_listed() {
        let app = app!(state_with(directory()));
        let req = test::TestRequest::get().uri("/api/states").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "states": ["Georgia", "Texas"] }));
    }

    #[actix_web::test]
    async fn visits_start_at_zero_and_increment() {
        let app = app!(state_with(directory()));

        let req = test::TestRequest::get().uri("/api/visits").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "visits": 0 }));

        let req = test::TestRequest::post().uri("/api/visits").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "visits": 1 }));
    }

    #[actix_web::test]
    async fn feedback_requires_name_address_and_state() {
        let app = app!(state_with(directory()));
        let req = test::TestRequest::post()
            .uri("/api/send-feedback")
            .set_json(json!({ "templeName": "Durga Temple", "state": "Virginia" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing required field: address");
    }

    #[actix_web::test]
    async fn feedback_is_accepted_without_relay() {
        let app = app!(state_with(directory()));
        let req = test::TestRequest::post()
            .uri("/api/send-feedback")
            .set_json(json!({
                "templeName": "Durga Temple",
                "address": "8400 Durga Pl, Fairfax Station, VA 22039",
                "state": "Virginia",
                "latitude": "38.74",
                "submitterName": "A. Visitor"
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "success": true, "message": "Feedback received" }));
    }
}
