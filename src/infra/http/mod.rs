//! Public JSON API.

mod handlers;

pub use handlers::ApiResponse;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::application::content::ContentService;
use crate::application::events::EventService;

#[derive(Clone)]
pub struct ApiState {
    pub content: Arc<ContentService>,
    pub events: Arc<EventService>,
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/v1/home", get(handlers::home))
        .route("/api/v1/posts", get(handlers::list_blog))
        .route("/api/v1/posts/{locale}/{slug}", get(handlers::blog_detail))
        .route("/api/v1/events", get(handlers::list_events))
        .route("/api/v1/events/upcoming", get(handlers::upcoming_events))
        .route("/api/v1/events/past", get(handlers::past_events))
        .route("/api/v1/events/undated", get(handlers::undated_events))
        .route("/api/v1/events/{locale}/{slug}", get(handlers::event_detail))
        .route("/api/v1/videos", get(handlers::list_videos))
        .route("/api/v1/videos/{locale}/{slug}", get(handlers::video_detail))
        .route("/api/v1/podcasts", get(handlers::list_podcasts))
        .route(
            "/api/v1/podcasts/{locale}/{slug}",
            get(handlers::podcast_detail),
        )
        .route("/api/v1/services", get(handlers::list_services))
        .route(
            "/api/v1/services/{locale}/{slug}",
            get(handlers::service_detail),
        )
        .route("/api/v1/categories", get(handlers::categories))
        .route("/api/v1/faqs", get(handlers::faqs))
        .route("/api/v1/heroes", get(handlers::heroes))
        .route("/api/v1/settings", get(handlers::settings))
        .route("/api/v1/search", get(handlers::search))
        .route("/api/v1/pages", get(handlers::pages))
        .route("/api/v1/pages/{slug}", get(handlers::page_detail))
        .with_state(state)
}
