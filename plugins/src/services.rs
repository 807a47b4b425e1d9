//! ServicesFactory implementation: builds the services the HTTP layer needs from config.
use tasksift_core::api::{AppConfig, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

impl ServicesFactory for PluginServicesFactory {
    fn build_services(&self, cfg: &AppConfig) -> anyhow::Result<Services> {
        let summarizer = factory::build_summarizer(cfg)?;
        Ok(Services { summarizer })
    }
}
