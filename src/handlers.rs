use crate::board::TaskBoard;
use crate::client::{load_calendar, BackendClient};
use crate::errors::{AppError, LoadError};
use crate::heatmap::{build_grid, clamp_days, HeatmapGrid};
use crate::models::{TaskSort, TaskStatus};
use crate::state::AppState;
use crate::surface::HeatmapContainer;
use crate::ui::{render_dashboard, render_login, render_register};
use crate::validation::{
    validate_login, validate_registration, validate_task, LoginForm, RegistrationForm,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub sort: Option<String>,
    pub edit: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct HeatmapQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, AppError> {
    let client = session_client(&state, &headers);
    let sort = query.sort.as_deref().map(TaskSort::parse).unwrap_or_default();

    let mut heatmap = HeatmapContainer::default();
    let (tasks, _) = tokio::join!(
        client.fetch_tasks(sort),
        load_calendar(&client, state.config.heatmap_days, &mut heatmap),
    );

    let tasks = match tasks {
        Ok(tasks) => tasks,
        Err(LoadError::Unauthenticated) => {
            return Ok(Redirect::to(&state.config.login_url).into_response());
        }
        Err(err) => {
            warn!("failed to load tasks: {err}");
            return Err(err.into());
        }
    };

    let mut board = TaskBoard::new(sort);
    board.replace_tasks(tasks);
    if let Some(id) = query.edit {
        if board.begin_edit(id).is_none() {
            warn!(task_id = id, "cannot edit unknown task");
        }
    }

    Ok(Html(render_dashboard(&board, &heatmap).into_string()).into_response())
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<HeatmapGrid>, AppError> {
    let days = clamp_days(query.days.unwrap_or(state.config.heatmap_days));
    let counts = session_client(&state, &headers)
        .fetch_calendar(days)
        .await
        .inspect_err(|err| warn!("calendar fetch failed: {err}"))?;
    Ok(Json(build_grid(&counts, days)))
}

pub async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    let draft = validate_task(&form.title, &form.description)?;
    let task = session_client(&state, &headers).create_task(&draft).await?;
    info!(task_id = task.id, "task created");
    Ok(Redirect::to("/"))
}

pub async fn update_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    let draft = validate_task(&form.title, &form.description)?;
    let status = form.status.as_deref().map(TaskStatus::parse).unwrap_or_default();
    session_client(&state, &headers)
        .update_task(id, &draft, status)
        .await?;
    info!(task_id = id, "task updated");
    Ok(Redirect::to("/"))
}

pub async fn toggle_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    let task = session_client(&state, &headers).toggle_status(id).await?;
    info!(task_id = id, status = task.status.as_str(), "task status toggled");
    Ok(Redirect::to("/"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    session_client(&state, &headers).delete_task(id).await?;
    info!(task_id = id, "task deleted");
    Ok(Redirect::to("/"))
}

pub async fn login_page() -> Html<String> {
    Html(render_login().into_string())
}

pub async fn register_page() -> Html<String> {
    Html(render_register().into_string())
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = validate_login(&form)?;
    let session = state
        .client
        .login(&credentials)
        .await
        .inspect_err(|err| warn!(username = %credentials.username, "login failed: {err}"))?;
    info!(username = %session.username, "signed in");
    Ok(redirect_with_cookies("/", &session.cookies))
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    let registration = validate_registration(&form)?;
    let session = state
        .client
        .register(&registration)
        .await
        .inspect_err(|err| warn!(username = %registration.username, "registration failed: {err}"))?;
    info!(username = %session.username, "registered");
    Ok(redirect_with_cookies("/", &session.cookies))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let cookies = session_client(&state, &headers).logout().await?;
    info!("signed out");
    Ok(redirect_with_cookies(&state.config.login_url, &cookies))
}

pub async fn healthz() -> &'static str {
    "ok"
}

/// Backend client carrying the caller's session cookie.
fn session_client(state: &AppState, headers: &HeaderMap) -> BackendClient {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.client.with_cookie(cookie)
}

/// Redirect that hands the backend's session cookies on to the browser.
fn redirect_with_cookies(to: &str, cookies: &[String]) -> Response {
    let mut response = Redirect::to(to).into_response();
    for cookie in cookies {
        match HeaderValue::from_str(cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(_) => warn!("dropping unrepresentable Set-Cookie value"),
        }
    }
    response
}
