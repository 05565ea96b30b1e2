use crate::errors::LoadError;
use crate::heatmap::{build_grid, clamp_days, HeatmapGrid};
use crate::models::{
    ApiErrorBody, AuthResponse, AuthSession, CalendarResponse, DailyCount, Task, TaskDraft,
    TaskPayload, TaskSort, TaskStatus,
};
use crate::surface::{render_heatmap, DisplaySurface};
use crate::validation::{Credentials, Registration};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// JSON client for the task backend. Cheap to clone; each clone may carry the
/// session cookie of the request it serves.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    cookie: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LoadError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LoadError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: None,
        })
    }

    pub fn with_cookie(&self, cookie: Option<String>) -> Self {
        Self {
            cookie,
            ..self.clone()
        }
    }

    pub async fn fetch_calendar(&self, days: i64) -> Result<DailyCount, LoadError> {
        let request = self
            .request(Method::GET, "/api/stats/calendar")
            .query(&[("days", days)]);
        let body: CalendarResponse = json(request).await?;
        Ok(body.counts)
    }

    pub async fn fetch_tasks(&self, sort: TaskSort) -> Result<Vec<Task>, LoadError> {
        let request = self
            .request(Method::GET, "/api/tasks")
            .query(&[("sort", sort.field_param()), ("order", sort.order_param())]);
        json(request).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, LoadError> {
        let payload = TaskPayload {
            title: &draft.title,
            description: &draft.description,
            status: None,
        };
        json(self.request(Method::POST, "/api/tasks").json(&payload)).await
    }

    pub async fn update_task(
        &self,
        id: i64,
        draft: &TaskDraft,
        status: TaskStatus,
    ) -> Result<Task, LoadError> {
        let payload = TaskPayload {
            title: &draft.title,
            description: &draft.description,
            status: Some(status),
        };
        let path = format!("/api/tasks/{id}");
        json(self.request(Method::PUT, &path).json(&payload)).await
    }

    pub async fn toggle_status(&self, id: i64) -> Result<Task, LoadError> {
        let path = format!("/api/tasks/{id}/status");
        json(self.request(Method::PATCH, &path)).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), LoadError> {
        let path = format!("/api/tasks/{id}");
        send(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    /// Signs in. A 401 here means bad credentials, so it surfaces as
    /// `LoadError::Status` carrying the backend's message, not `Unauthenticated`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, LoadError> {
        let request = self.request(Method::POST, "/api/login").json(credentials);
        auth_session(request).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, LoadError> {
        let request = self.request(Method::POST, "/api/register").json(registration);
        auth_session(request).await
    }

    /// Ends the backend session and returns the cookies that clear it.
    pub async fn logout(&self) -> Result<Vec<String>, LoadError> {
        let response = send(self.request(Method::POST, "/api/logout")).await?;
        Ok(set_cookies(&response))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .header(header::ACCEPT, "application/json");
        match &self.cookie {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }
}

/// Fetches completion counts and renders them into `surface`.
///
/// Every failure is logged and swallowed here; on failure the surface is not touched.
pub async fn load_calendar<S: DisplaySurface + ?Sized>(
    client: &BackendClient,
    days: i64,
    surface: &mut S,
) -> Option<HeatmapGrid> {
    let days = clamp_days(days);
    match client.fetch_calendar(days).await {
        Ok(counts) => {
            let grid = build_grid(&counts, days);
            render_heatmap(&grid, surface);
            debug!(days, max_count = grid.max_count, "calendar rendered");
            Some(grid)
        }
        Err(LoadError::Unauthenticated) => {
            debug!("calendar skipped: not authenticated");
            None
        }
        Err(err) => {
            error!("failed to load calendar: {err}");
            None
        }
    }
}

async fn send(request: RequestBuilder) -> Result<Response, LoadError> {
    let response = request.send().await.map_err(LoadError::Transport)?;
    if response.status() == StatusCode::UNAUTHORIZED {
        return Err(LoadError::Unauthenticated);
    }
    check_status(response).await
}

async fn check_status(response: Response) -> Result<Response, LoadError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.json::<ApiErrorBody>().await.ok().map(|body| body.error);
        return Err(LoadError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

async fn auth_session(request: RequestBuilder) -> Result<AuthSession, LoadError> {
    let response = request.send().await.map_err(LoadError::Transport)?;
    let response = check_status(response).await?;
    let cookies = set_cookies(&response);
    let body: AuthResponse = response.json().await.map_err(LoadError::Decode)?;
    Ok(AuthSession {
        username: body.username,
        cookies,
    })
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

async fn json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, LoadError> {
    send(request).await?.json().await.map_err(LoadError::Decode)
}
