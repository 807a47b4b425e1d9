pub mod chat_client;
pub mod service;

pub use chat_client::ChatClient;
pub use service::ChatSummarizerPlugin;
