//! Batch execution of an ordered command list
//!
//! One session, one kinematic state, strictly sequential: command N+1 never
//! starts before command N's device calls and settle delays complete.

use crate::cancel::CancelToken;
use crate::command::{executor, Command};
use crate::command::handlers::ExecContext;
use crate::config::MotionConfig;
use crate::device::Device;
use crate::state::KinematicState;
use tracing::{info, warn};

pub struct Sequencer<'d> {
    device: &'d dyn Device,
    config: MotionConfig,
    cancel: CancelToken,
    state: KinematicState,
}

impl<'d> Sequencer<'d> {
    pub fn new(device: &'d dyn Device, config: MotionConfig, cancel: CancelToken) -> Self {
        Self {
            device,
            config,
            cancel,
            state: KinematicState::new(),
        }
    }

    /// Execute every command in order. A failed or rejected command is
    /// reported and the run continues; only cancellation ends it early.
    pub async fn run(&mut self, commands: &[Command]) {
        for (position, command) in commands.iter().enumerate() {
            if self.cancel.is_cancelled() {
                warn!(
                    "Sequence cancelled, {} command(s) not executed",
                    commands.len() - position
                );
                break;
            }
            info!("[{}/{}] {}", position + 1, commands.len(), command.name());
            let mut ctx = ExecContext {
                state: &mut self.state,
                device: self.device,
                config: &self.config,
                cancel: &self.cancel,
            };
            let result = executor::execute(command, &mut ctx).await;
            executor::report(command, &result);
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }
}
