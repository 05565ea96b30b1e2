use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/register", get(handlers::register_page).post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/tasks", post(handlers::create_task))
        .route("/tasks/:id", post(handlers::update_task))
        .route("/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/tasks/:id/delete", post(handlers::delete_task))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
