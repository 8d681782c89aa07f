pub mod interface;
pub mod parser;
pub mod prompt;
pub mod service;

pub use interface::{TranslateRequest, TranslateResponse};
pub use parser::{parse_response, ParsedResponse};
pub use prompt::build_prompt;
pub use service::TranslateService;
