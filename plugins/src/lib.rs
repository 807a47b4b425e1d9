pub mod factory;
pub mod llm;
pub mod services;

pub use services::PluginServicesFactory;
