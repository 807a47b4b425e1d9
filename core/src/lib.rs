pub mod api;
pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod task;
