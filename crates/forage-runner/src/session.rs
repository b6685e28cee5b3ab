//! Line-oriented command session.
//!
//! Reads one chat line at a time, ignores anything that is not a command,
//! and writes each reply followed by a newline. The catalog is checked for
//! staleness before every command.

use chrono::Utc;
use forage_core::{Command, EngineConfig, execute};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::catalog_handle::CatalogHandle;
use crate::error::RunnerError;

/// A command session bound to one catalog handle and engine config.
#[derive(Debug)]
pub struct Session<'a> {
    handle: &'a CatalogHandle,
    engine: &'a EngineConfig,
}

impl<'a> Session<'a> {
    /// Create a session.
    pub const fn new(handle: &'a CatalogHandle, engine: &'a EngineConfig) -> Self {
        Self { handle, engine }
    }

    /// Serve commands from `input` until it is exhausted. Returns the number
    /// of commands handled.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Io`] if reading or writing fails.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<u64, RunnerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut handled: u64 = 0;

        while let Some(line) = lines.next_line().await? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };
            debug!(?command, "command received");

            self.handle.refresh_if_stale(Utc::now().timestamp()).await;
            let catalog = self.handle.snapshot().await;

            for reply in execute(&command, &catalog, self.engine) {
                output.write_all(reply.as_bytes()).await?;
                if !reply.ends_with('\n') {
                    output.write_all(b"\n").await?;
                }
            }
            output.flush().await?;
            handled = handled.saturating_add(1);
        }

        Ok(handled)
    }
}
