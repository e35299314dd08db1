use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use crate::connector::http;

use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn serve(&self, port: u16, public: bool) -> Result<String> {
        let state = self.container.app_state()?;
        let params = self.container.model_parameters();
        info!(
            "Serving answers with {} model {} (temperature {}, max tokens {})",
            self.container.provider().as_str(),
            params.model_id,
            params.temperature,
            params.max_tokens
        );

        let host = if public { "0.0.0.0" } else { "127.0.0.1" };
        let listener = TcpListener::bind((host, port)).await?;
        http::serve(listener, state).await?;

        Ok("Server stopped.".to_string())
    }
}
