pub mod app;
pub mod board;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod heatmap;
pub mod models;
pub mod state;
pub mod surface;
pub mod ui;
pub mod validation;

pub use app::router;
pub use client::{load_calendar, BackendClient};
pub use config::Config;
pub use heatmap::{build_grid, build_grid_at, HeatmapGrid};
pub use state::AppState;
