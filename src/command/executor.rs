//! Command executor - dispatches commands to their handlers
//!
//! Pure with respect to the state transition; impure only through device
//! calls. A device error inside a handler surfaces as `Failed` here and the
//! remaining effects of that one command are skipped; the sequence continues.

use super::handlers::{dome, feedback, motion, ExecContext};
use super::{Command, CommandResult};
use anyhow::Result;
use tracing::{debug, error, info, warn};

/// Execute a single command against the session state and device.
pub async fn execute(command: &Command, ctx: &mut ExecContext<'_>) -> CommandResult {
    debug!("Executing command: {}", command.name());

    match dispatch(command, ctx).await {
        Ok(result) => result,
        Err(e) => CommandResult::Failed {
            message: e.to_string(),
        },
    }
}

async fn dispatch(command: &Command, ctx: &mut ExecContext<'_>) -> Result<CommandResult> {
    match command {
        Command::SetVolume(level) => feedback::set_volume(ctx, *level).await,
        Command::FrontLed(color) => feedback::front_led(ctx, *color).await,
        Command::BackLed(color) => feedback::back_led(ctx, *color).await,
        Command::HoloProjectorLed(v) => feedback::holo_projector_led(ctx, *v).await,
        Command::LogicDisplayLed(v) => feedback::logic_display_led(ctx, *v).await,
        Command::Stance(stance) => feedback::stance(ctx, *stance).await,
        Command::Sound(name) => feedback::sound(ctx, name).await,
        Command::Animation(name) => feedback::animation(ctx, name).await,
        Command::Speed(value) => feedback::speed(ctx, *value).await,
        Command::ShakeHead => dome::shake_head(ctx).await,
        Command::TurnDome(degrees) => dome::turn_dome(ctx, *degrees).await,
        Command::LockDome(degrees) => dome::lock_dome(ctx, *degrees).await,
        Command::Move(cm) => motion::drive(ctx, *cm, false).await,
        Command::MoveBack(cm) => motion::drive(ctx, *cm, true).await,
        Command::Square(side) => motion::square(ctx, *side, true).await,
        Command::SquareLeft(side) => motion::square(ctx, *side, false).await,
        Command::Circle(diameter) => motion::circle(ctx, *diameter).await,
        Command::Turn(degrees) => motion::turn(ctx, *degrees).await,
    }
}

/// Report one execution outcome to the operator. Shared by both execution
/// surfaces so batch and stream sessions log identically.
pub fn report(command: &Command, result: &CommandResult) {
    match result {
        CommandResult::Completed { message } => info!("  {message}"),
        CommandResult::Rejected { message } => warn!("  skipped: {message}"),
        CommandResult::Failed { message } => error!("  {} failed: {message}", command.name()),
    }
}
