pub mod interface;
pub mod gemini_llm;
pub mod openai_compatible_llm;
pub mod factory;

pub use interface::StatelessLLMInterface;
pub use gemini_llm::GeminiLLM;
pub use openai_compatible_llm::OpenAICompatibleLLM;
pub use factory::StatelessLLMFactory;
