use crate::domain::model::GenerationRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

/// The external generative model. Returns the raw response text, which is
/// expected (but not guaranteed) to be JSON matching the request schema.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}
