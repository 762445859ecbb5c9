// 🌐 Web Server - HTML form pages + a small JSON API over one Student
//
// One process serves one student session. The Student sits behind a
// mutex and each request runs its handler to completion while holding it.

use crate::config::AppConfig;
use crate::page::{Element, Page};
use crate::routes::{dispatch, FormFields, Route};
use crate::student::Student;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Form, Router,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub student: Arc<Mutex<Student>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            student: Arc::new(Mutex::new(Student::default())),
            config: Arc::new(config),
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// Page Handlers
// ============================================================================

/// GET / - Home page (setup form until a student is set up)
async fn serve_index(State(state): State<AppState>) -> Response {
    render_route(&state, Route::Index.as_str(), &FormFields::new())
}

/// GET /:route - Navigation buttons and query-string submissions
async fn get_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(form): Query<FormFields>,
) -> Response {
    render_route(&state, &name, &form)
}

/// POST /:route - Form submissions
async fn post_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Form(form): Form<FormFields>,
) -> Response {
    render_route(&state, &name, &form)
}

fn render_route(state: &AppState, name: &str, form: &FormFields) -> Response {
    let title = state.config.site_title.as_str();

    let Some(route) = Route::from_name(name) else {
        tracing::warn!(route = name, "unknown route");
        let page = Page::new(vec![
            Element::text(format!("No page named \"{}\".", name)),
            Element::button("Go to Home", Route::Index.url()),
        ]);
        return (StatusCode::NOT_FOUND, Html(page.render_html(title))).into_response();
    };

    let mut student = match state.student.lock() {
        Ok(guard) => guard,
        Err(e) => {
            tracing::error!("student state lock poisoned: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "session state unavailable").into_response();
        }
    };

    let page = dispatch(route, &mut student, form);
    Html(page.render_html(title)).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/state - Snapshot of the session
async fn get_state(State(state): State<AppState>) -> Response {
    match state.student.lock() {
        Ok(student) => (StatusCode::OK, Json(ApiResponse::ok(student.clone()))).into_response(),
        Err(e) => {
            tracing::error!("student state lock poisoned: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Student>::fail("session state unavailable")),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/state", get(get_state))
        .with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .route("/:route", get(get_page).post(post_page))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
