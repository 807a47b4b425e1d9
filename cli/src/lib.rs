//! tasksift-cli library - exposes modules for tests

pub mod commands;
pub mod http;
pub mod logging;
