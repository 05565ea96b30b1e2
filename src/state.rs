use crate::client::BackendClient;
use crate::config::Config;
use crate::errors::LoadError;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: BackendClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, LoadError> {
        let client = BackendClient::new(&config.backend_url, config.backend_timeout)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}
