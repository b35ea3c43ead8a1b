use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Default log location: next to the executable.
pub fn default_log_path() -> PathBuf {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            return dir.join("tennis.log");
        }
    }
    PathBuf::from("tennis.log")
}

/// Route `log` output into a file. stderr belongs to the terminal UI.
pub fn init(path: &Path, default_filter: &str) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;
    Ok(())
}
