use async_trait::async_trait;

use crate::errors::ModelQueryError;

/// Issues a prompt to a generative model and returns its textual output.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn query(&self, model_id: &str, prompt: &str) -> Result<String, ModelQueryError>;
}
