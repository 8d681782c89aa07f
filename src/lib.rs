pub mod config;
pub mod error;
pub mod handlers;
pub mod language;
pub mod llm;
pub mod routes;
pub mod state;
pub mod storage;
pub mod translate;
pub mod tts;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
