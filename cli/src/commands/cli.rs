use clap::Parser;
use tasksift_core::api::AppConfig;

/// Summarize, tag and prioritize free-text tasks with an LLM.
#[derive(Parser, Debug, Default)]
#[command(name = "tasksift", version)]
pub struct Args {
    /// Config file to load instead of ~/.tasksift/config.toml or ./config.toml.
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Base page template; must contain the `{{ results }}` slot.
    ///
    /// The page is rendered as a minijinja template, so any other `{{` or `{%`
    /// in it (inline JS or CSS included) must be escaped, e.g. wrapped in
    /// `{% raw %}...{% endraw %}`.
    #[arg(long)]
    pub template: Option<String>,
}

impl Args {
    /// CLI flags win over config file and environment.
    pub fn apply_to(&self, cfg: &mut AppConfig) {
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(template) = &self.template {
            cfg.server.template_path = template.clone();
        }
    }
}
