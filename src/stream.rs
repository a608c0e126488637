//! Live command stream: tail a text file and execute appended lines
//!
//! The watcher tracks a byte offset into the file and reads only newly
//! appended bytes each tick, so the file can be written by any tool that
//! appends lines (including plain `echo >>`). One kinematic state spans the
//! whole watch session; state set by an earlier line is visible to every
//! later one.

use crate::cancel::CancelToken;
use crate::cli;
use crate::command::handlers::ExecContext;
use crate::command::executor;
use crate::config::MotionConfig;
use crate::device::Device;
use crate::state::KinematicState;
use anyhow::Result;
use std::io::SeekFrom;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::time::sleep;
use tracing::{error, info, warn};

const FILE_HEADER: &str =
    "# droid command stream\n# one command per line; write 'exit' to end the session\n";

enum LineOutcome {
    Continue,
    Exit,
}

pub struct StreamWatcher<'d> {
    path: PathBuf,
    poll_interval: Duration,
    device: &'d dyn Device,
    config: MotionConfig,
    cancel: CancelToken,
    state: KinematicState,
    offset: u64,
    /// Bytes after the last newline; a partially appended line stays here
    /// until its newline arrives.
    pending: Vec<u8>,
}

impl<'d> StreamWatcher<'d> {
    pub fn new(
        path: PathBuf,
        device: &'d dyn Device,
        config: MotionConfig,
        cancel: CancelToken,
    ) -> Self {
        Self {
            path,
            poll_interval: Duration::from_millis(500),
            device,
            config,
            cancel,
            state: KinematicState::new(),
            offset: 0,
            pending: Vec::new(),
        }
    }

    /// Override the polling cadence; tests shorten it.
    #[cfg(test)]
    fn poll_every(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run the watch session. Returns when an `exit` line is read or the
    /// token is cancelled; there is no other termination condition.
    pub async fn run(&mut self) -> Result<()> {
        if !tokio::fs::try_exists(&self.path).await? {
            info!("Creating command stream file {}", self.path.display());
            tokio::fs::write(&self.path, FILE_HEADER).await?;
        }
        info!(
            "Watching {} for commands ('exit' ends the session)",
            self.path.display()
        );

        loop {
            tokio::select! {
                _ = sleep(self.poll_interval) => {}
                _ = self.cancel.cancelled() => {
                    info!("Stream session cancelled");
                    return Ok(());
                }
            }

            for line in self.read_new_lines().await? {
                match self.process_line(&line).await {
                    LineOutcome::Continue => {}
                    LineOutcome::Exit => {
                        info!("Exit command received, ending stream session");
                        return Ok(());
                    }
                }
            }
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Read everything appended since the last tick and split it into
    /// complete lines.
    async fn read_new_lines(&mut self) -> Result<Vec<String>> {
        let mut file = match File::open(&self.path).await {
            Ok(file) => file,
            // The file may be swapped out or briefly missing; keep polling.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut appended = Vec::new();
        file.read_to_end(&mut appended).await?;
        if appended.is_empty() {
            return Ok(Vec::new());
        }
        self.offset += appended.len() as u64;
        self.pending.extend_from_slice(&appended);

        let mut lines = Vec::new();
        while let Some(newline) = self.pending.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=newline).collect();
            lines.push(String::from_utf8_lossy(&raw).trim().to_string());
        }
        Ok(lines)
    }

    async fn process_line(&mut self, line: &str) -> LineOutcome {
        if line.is_empty() || line.starts_with('#') {
            return LineOutcome::Continue;
        }
        if line.eq_ignore_ascii_case("exit") {
            return LineOutcome::Exit;
        }

        let commands = match cli::parse_line(line) {
            Ok(commands) => commands,
            Err(e) => {
                error!("Invalid command line '{line}': {e}");
                return LineOutcome::Continue;
            }
        };
        if commands.is_empty() {
            warn!("No commands in line '{line}'");
            return LineOutcome::Continue;
        }

        info!("Executing: {line}");
        for command in &commands {
            if self.cancel.is_cancelled() {
                return LineOutcome::Continue;
            }
            let mut ctx = ExecContext {
                state: &mut self.state,
                device: self.device,
                config: &self.config,
                cancel: &self.cancel,
            };
            let result = executor::execute(command, &mut ctx).await;
            executor::report(command, &result);
        }
        LineOutcome::Continue
    }
}
