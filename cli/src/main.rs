use clap::Parser;
use tasksift_cli::commands::cli;
use tasksift_cli::http;
use tasksift_cli::logging::init_tracing;
use tasksift_core::api::{CliError, ServicesFactory};
use tasksift_core::config;
use tasksift_plugins::PluginServicesFactory;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let env_file_errors = config::load_env_files();

    let mut cfg = match args.config.as_deref() {
        Some(path) => config::load_from_path(std::path::Path::new(path)),
        None => config::load_default(),
    }
    .map_err(|e| CliError::Config(e.to_string()))?;
    args.apply_to(&mut cfg);

    init_tracing(&cfg.logging).map_err(CliError::Config)?;
    for (path, err) in env_file_errors {
        tracing::warn!("failed to load {}: {}", path.display(), err);
    }

    let services = PluginServicesFactory
        .build_services(&cfg)
        .map_err(|e| CliError::Config(e.to_string()))?;

    http::handle_serve(&cfg, services).await?;
    Ok(0)
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: server start / IO error
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Server(_) => 20,
        CliError::Io(_) => 20,
        CliError::Anyhow(_) => 50,
    }
}
