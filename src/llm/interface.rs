use async_trait::async_trait;

/// Interface for a stateless language model
/// Stateless means the LLM doesn't store memory, system prompts, or previous prompts
#[async_trait]
pub trait StatelessLLMInterface: Send + Sync {
    /// Send a single prompt and return the model's free-form text reply
    async fn generate(&self, prompt: &str) -> Result<String, anyhow::Error>;
}
