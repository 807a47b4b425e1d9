use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default tasksift data directory: ~/.tasksift
pub fn get_tasksift_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".tasksift"))
}

pub fn get_tasksift_env_file_path() -> anyhow::Result<PathBuf> {
    let data_dir = get_tasksift_data_dir()?;
    Ok(data_dir.join(".env"))
}

fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

/// Loads `~/.tasksift/.env` then `./.env` into the process environment.
/// Existing variables win; missing files are skipped.
///
/// Runs before logging is set up, so failures are handed back for the
/// caller to report.
pub fn load_env_files() -> Vec<(PathBuf, dotenvy::Error)> {
    let mut candidates = Vec::with_capacity(2);
    if let Ok(path) = get_tasksift_env_file_path() {
        candidates.push(path);
    }
    candidates.push(PathBuf::from(".env"));

    candidates
        .into_iter()
        .filter_map(|path| load_env_file(&path).err().map(|e| (path, e)))
        .collect()
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.tasksift/config.toml (highest)
    let data_dir = get_tasksift_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Some(v) = non_blank_env("TASKSIFT_HOST") {
        cfg.server.host = v;
    }
    if let Some(v) = non_blank_env("TASKSIFT_PORT") {
        match v.parse::<u16>() {
            Ok(port) => cfg.server.port = port,
            Err(_) => tracing::warn!("ignoring invalid TASKSIFT_PORT={}", v),
        }
    }
    if let Some(v) = non_blank_env("TASKSIFT_LLM_BASE_URL") {
        cfg.llm.base_url = v;
    }
    if let Some(v) = non_blank_env("TASKSIFT_LLM_MODEL") {
        cfg.llm.model = v;
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_path_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_env_file_sets_missing_vars() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "TASKSIFT_TEST_ENV_FILE_KEY=loaded").unwrap();
        load_env_file(file.path()).unwrap();
        assert_eq!(
            std::env::var("TASKSIFT_TEST_ENV_FILE_KEY").as_deref(),
            Ok("loaded")
        );
        std::env::remove_var("TASKSIFT_TEST_ENV_FILE_KEY");
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_file(&dir.path().join(".env")).is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GROQ_API_KEY=\"unterminated").unwrap();
        assert!(load_env_file(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_apply() {
        std::env::set_var("TASKSIFT_LLM_MODEL", "mixtral-8x7b-32768");
        let mut cfg = AppConfig::default();
        apply_env_overrides(&mut cfg);
        assert_eq!(cfg.llm.model, "mixtral-8x7b-32768");
        std::env::remove_var("TASKSIFT_LLM_MODEL");
    }
}
