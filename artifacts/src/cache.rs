//! Command-backed tool cache refresh.

use crate::command::{CommandExecutor, run_checked};
use crate::error::Result;
use crate::version::CacheManager;
use log::debug;

/// [`CacheManager`] that runs a configured refresh command.
///
/// An empty command means there is nothing to refresh.
#[derive(Debug)]
pub struct CommandCacheManager<E> {
    executor: E,
    command: Vec<String>,
}

impl<E: CommandExecutor> CommandCacheManager<E> {
    /// Create a manager running `command` through `executor`.
    pub fn new(executor: E, command: Vec<String>) -> Self {
        Self { executor, command }
    }
}

impl<E: CommandExecutor> CacheManager for CommandCacheManager<E> {
    fn update_all(&self) -> Result<()> {
        if self.command.is_empty() {
            debug!("no cache refresh command configured");
            return Ok(());
        }
        run_checked(&self.executor, "cache refresh", &self.command, &[])?;
        Ok(())
    }
}
