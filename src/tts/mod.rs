pub mod interface;
pub mod client;
pub mod factory;

pub use interface::TTSInterface;
pub use client::GoogleTranslateTTS;
pub use factory::TTSFactory;
