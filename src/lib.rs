//! LinkBio Backend
//!
//! Layered architecture:
//! - domain: Core entities, ordering rules and validation
//! - repository: SQLite data access; every structural change to an ordered
//!   collection (append, delete, reorder, move) is one transaction
//! - commands: HTTP handlers (axum)
//!
//! The caller is identified by the `x-user-id` header, set by the
//! authenticating proxy in front of this service.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
mod domain;
mod repository;
mod commands;

use commands::*;
use config::Config;
use repository::{
    init_db, AnalyticsRepository, DbState, FormRepository, LinkRepository, ProfileRepository,
    SectionRepository, SocialLinkRepository, TestimonialRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_state: DbState,
    pub config: Config,
}

impl AppState {
    pub fn new(db_state: DbState, config: Config) -> Self {
        Self { db_state, config }
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.db_state.handle())
    }

    pub fn sections(&self) -> SectionRepository {
        SectionRepository::new(self.db_state.handle())
    }

    pub fn links(&self) -> LinkRepository {
        LinkRepository::new(self.db_state.handle())
    }

    pub fn social_links(&self) -> SocialLinkRepository {
        SocialLinkRepository::new(self.db_state.handle())
    }

    pub fn testimonials(&self) -> TestimonialRepository {
        TestimonialRepository::new(self.db_state.handle())
    }

    pub fn forms(&self) -> FormRepository {
        FormRepository::new(self.db_state.handle())
    }

    pub fn analytics(&self) -> AnalyticsRepository {
        AnalyticsRepository::new(self.db_state.handle())
    }
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> Json<Value> {
    let db = if state.db_state.is_ready().await { "ready" } else { "down" };
    Json(json!({ "status": "ok", "database": db }))
}

fn cors(config: &Config) -> CorsLayer {
    let origin = match config
        .allowed_origin
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(USER_HEADER)])
        .max_age(Duration::from_secs(60 * 60))
}

/// Build the router with every route of the service
pub fn app(state: AppState) -> Router {
    let cors = cors(&state.config);

    Router::new()
        .route("/health", get(health))
        // Profile
        .route("/api/profile", post(create_profile).get(get_my_profile).patch(update_profile))
        .route("/api/profile/settings", put(update_settings))
        .route("/api/pages/:username", get(get_public_profile))
        .route("/api/pages/:username/submissions", post(submit))
        // Sections
        .route("/api/sections", get(list_sections).post(add_section))
        .route("/api/sections/reorder", post(reorder_sections))
        .route("/api/sections/:id", axum::routing::patch(rename_section).delete(delete_section))
        .route("/api/sections/:id/move", post(move_section))
        // Links
        .route("/api/links", post(add_link))
        .route("/api/links/reorder", post(reorder_links))
        .route("/api/links/:id", axum::routing::patch(edit_link).delete(delete_link))
        .route("/api/links/:id/move", post(move_link))
        .route("/api/links/:id/thumbnail", put(set_thumbnail).delete(remove_thumbnail))
        // Social links
        .route("/api/social-links", get(list_social_links).post(add_social_link))
        .route("/api/social-links/reorder", post(reorder_social_links))
        .route("/api/social-links/:id", axum::routing::patch(edit_social_link).delete(delete_social_link))
        .route("/api/social-links/:id/move", post(move_social_link))
        // Contact form
        .route("/api/form", get(get_form).put(update_form))
        .route("/api/form/toggle", post(toggle_form))
        .route("/api/form/acceptance", post(toggle_acceptance))
        .route("/api/form/submissions", get(list_submissions))
        .route("/api/form/submissions/:id", axum::routing::delete(delete_submission))
        // Testimonials
        .route("/api/pages/:username/testimonials", post(submit_testimonial))
        .route("/api/testimonials", get(list_testimonials))
        .route("/api/testimonials/:id", axum::routing::delete(delete_testimonial))
        .route("/api/testimonials/:id/visibility", post(toggle_testimonial))
        // Analytics
        .route("/api/analytics/clicks", post(capture_click))
        .route("/api/analytics/links", get(link_summary))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the server with the given configuration and serve until shutdown
pub async fn run(config: Config) -> Result<(), String> {
    let _log_guard = rolling_logger::init_logger(&config.log_dir, "LinkBio")?;

    log::info!("Opening database at {:?}", config.db_path);
    let db_state = init_db(&config.db_path).await?;
    log::info!("Database ready");

    let bind = config.bind;
    let app = app(AppState::new(db_state, config));

    let listener = TcpListener::bind(bind)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", bind, e))?;
    log::info!("Server running on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    rolling_logger::info("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        log::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
