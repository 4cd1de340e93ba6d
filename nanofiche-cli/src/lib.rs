use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod manifest;
pub mod project_log;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);
