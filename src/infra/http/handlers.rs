//! Route handlers for the public JSON API.
//!
//! Every response is wrapped in the `ApiResponse` envelope. An expected
//! absence is a 404 with `success: false`; a repository failure is a 500 with
//! the detail kept in the server log.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::application::content::{
    CategoryView, ContentPageView, FaqView, HeroView, PostDetailView, PostView, SettingsView,
};
use crate::application::error::ContentError;
use crate::application::pagination::{PageRequest, PagedResult};
use crate::application::repos::{EventWindow, SortDirection};
use crate::domain::locale::Locale;
use crate::domain::types::PostType;

use super::ApiState;

const HOME_SECTION_LIMIT: u32 = 6;
const HOME_EVENTS_LIMIT: u32 = 4;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

pub struct ApiError(ContentError);

impl From<ContentError> for ApiError {
    fn from(error: ContentError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ContentError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::failure("Not found")),
            )
                .into_response(),
            ContentError::Repo(err) => {
                error!(error = %err, "content read failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::<()>::failure("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    locale: Option<String>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    locale: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    direction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    locale: Option<String>,
    #[serde(rename = "type")]
    post_type: Option<String>,
}

/// Aggregated payload backing the landing page.
#[derive(Debug, Serialize)]
pub struct HomeData {
    pub heroes: Vec<HeroView>,
    pub blog_posts: Vec<PostView>,
    pub services: Vec<PostView>,
    pub events: Vec<PostView>,
    pub videos: Vec<PostView>,
    pub podcasts: Vec<PostView>,
    pub faqs: Vec<FaqView>,
    pub categories: Vec<CategoryView>,
    pub settings: SettingsView,
}

fn locale_of(raw: &Option<String>) -> Locale {
    Locale::normalize(raw.as_deref())
}

fn direction_of(raw: &Option<String>) -> Option<SortDirection> {
    match raw.as_deref() {
        Some("asc") => Some(SortDirection::Asc),
        Some("desc") => Some(SortDirection::Desc),
        _ => None,
    }
}

pub async fn healthz() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::ok("ok"))
}

pub async fn home(State(state): State<ApiState>, Query(query): Query<ListQuery>) -> ApiResult<HomeData> {
    let locale = locale_of(&query.locale);

    let (blog_posts, services, videos, podcasts, events) = tokio::try_join!(
        state
            .content
            .posts_by_type(PostType::Blog, locale, Some(HOME_SECTION_LIMIT)),
        state
            .content
            .posts_by_type(PostType::Service, locale, Some(HOME_SECTION_LIMIT)),
        state
            .content
            .posts_by_type(PostType::Video, locale, Some(HOME_SECTION_LIMIT)),
        state
            .content
            .posts_by_type(PostType::Podcast, locale, Some(HOME_SECTION_LIMIT)),
        state.events.upcoming_preview(locale, HOME_EVENTS_LIMIT),
    )?;

    let (heroes, faqs, categories, settings) = tokio::join!(
        state.content.heroes(locale),
        state.content.faqs(locale),
        state.content.categories(None, locale),
        state.content.settings(locale),
    );

    Ok(Json(ApiResponse::ok(HomeData {
        heroes,
        blog_posts,
        services,
        events,
        videos,
        podcasts,
        faqs,
        categories,
        settings,
    })))
}

async fn list_posts(
    state: &ApiState,
    post_type: PostType,
    query: ListQuery,
) -> ApiResult<Vec<PostView>> {
    let locale = locale_of(&query.locale);
    let posts = state
        .content
        .posts_by_type(post_type, locale, query.limit)
        .await?;
    Ok(Json(ApiResponse::ok(posts)))
}

async fn post_detail(
    state: &ApiState,
    post_type: PostType,
    locale: String,
    slug: String,
) -> ApiResult<PostDetailView> {
    let locale = Locale::normalize(Some(&locale));
    let detail = state.content.post_detail(post_type, &slug, locale).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

pub async fn list_blog(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PostView>> {
    list_posts(&state, PostType::Blog, query).await
}

pub async fn blog_detail(
    State(state): State<ApiState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ApiResult<PostDetailView> {
    post_detail(&state, PostType::Blog, locale, slug).await
}

/// The generic events listing serves the upcoming window, soonest first.
pub async fn list_events(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PostView>> {
    let locale = locale_of(&query.locale);
    let limit = query.limit.unwrap_or(state.events.public_page_size());
    let events = state.events.upcoming_preview(locale, limit).await?;
    Ok(Json(ApiResponse::ok(events)))
}

pub async fn event_detail(
    State(state): State<ApiState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ApiResult<PostDetailView> {
    post_detail(&state, PostType::Event, locale, slug).await
}

async fn event_window(
    state: &ApiState,
    query: WindowQuery,
    window: EventWindow,
) -> ApiResult<PagedResult<PostView>> {
    let locale = locale_of(&query.locale);
    let per_page = query.per_page.unwrap_or(state.events.public_page_size());
    let page = PageRequest::new(query.page.unwrap_or(1), per_page);
    let direction = direction_of(&query.direction);
    let result = state.events.window(locale, window, direction, page).await?;
    Ok(Json(ApiResponse::ok(result)))
}

pub async fn upcoming_events(
    State(state): State<ApiState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<PagedResult<PostView>> {
    event_window(&state, query, EventWindow::Upcoming).await
}

pub async fn past_events(
    State(state): State<ApiState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<PagedResult<PostView>> {
    event_window(&state, query, EventWindow::Past).await
}

pub async fn undated_events(
    State(state): State<ApiState>,
    Query(query): Query<WindowQuery>,
) -> ApiResult<PagedResult<PostView>> {
    event_window(&state, query, EventWindow::Undated).await
}

pub async fn list_videos(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PostView>> {
    list_posts(&state, PostType::Video, query).await
}

pub async fn video_detail(
    State(state): State<ApiState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ApiResult<PostDetailView> {
    post_detail(&state, PostType::Video, locale, slug).await
}

pub async fn list_podcasts(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PostView>> {
    list_posts(&state, PostType::Podcast, query).await
}

pub async fn podcast_detail(
    State(state): State<ApiState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ApiResult<PostDetailView> {
    post_detail(&state, PostType::Podcast, locale, slug).await
}

pub async fn list_services(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<PostView>> {
    list_posts(&state, PostType::Service, query).await
}

pub async fn service_detail(
    State(state): State<ApiState>,
    Path((locale, slug)): Path<(String, String)>,
) -> ApiResult<PostDetailView> {
    post_detail(&state, PostType::Service, locale, slug).await
}

pub async fn categories(
    State(state): State<ApiState>,
    Query(query): Query<CategoriesQuery>,
) -> Json<ApiResponse<Vec<CategoryView>>> {
    let locale = locale_of(&query.locale);
    let post_type = query
        .post_type
        .as_deref()
        .and_then(|value| PostType::try_from(value).ok());
    let categories = state.content.categories(post_type, locale).await;
    Json(ApiResponse::ok(categories))
}

pub async fn faqs(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<FaqView>>> {
    let locale = locale_of(&query.locale);
    Json(ApiResponse::ok(state.content.faqs(locale).await))
}

pub async fn heroes(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<Vec<HeroView>>> {
    let locale = locale_of(&query.locale);
    Json(ApiResponse::ok(state.content.heroes(locale).await))
}

pub async fn settings(
    State(state): State<ApiState>,
    Query(query): Query<ListQuery>,
) -> Json<ApiResponse<SettingsView>> {
    let locale = locale_of(&query.locale);
    Json(ApiResponse::ok(state.content.settings(locale).await))
}

pub async fn search(
    State(state): State<ApiState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<PostView>> {
    let locale = locale_of(&query.locale);
    let hits = state.content.search(&query.q, locale).await?;
    Ok(Json(ApiResponse::ok(hits)))
}

pub async fn pages(State(state): State<ApiState>) -> ApiResult<Vec<ContentPageView>> {
    let pages = state.content.pages().await?;
    Ok(Json(ApiResponse::ok(pages)))
}

pub async fn page_detail(
    State(state): State<ApiState>,
    Path(slug): Path<String>,
) -> ApiResult<ContentPageView> {
    let page = state.content.page_detail(&slug).await?;
    Ok(Json(ApiResponse::ok(page)))
}
