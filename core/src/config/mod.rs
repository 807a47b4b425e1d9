mod load;
mod types;

pub use load::{
    get_tasksift_data_dir, get_tasksift_env_file_path, load_default, load_env_files,
    load_from_path,
};
pub use types::{AppConfig, LlmConfig, LoggingConfig, ServerConfig};
