use async_trait::async_trait;

use crate::error::Result;

/// Source of raw page markup for the extract stage
#[async_trait]
pub trait PageSourcePort: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
