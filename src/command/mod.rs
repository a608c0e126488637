//! Command model and execution results

pub mod executor;
pub mod handlers;

use crate::device::{Color, Stance};

/// A single sequenced action, exactly one payload per variant.
///
/// Sound and animation names stay as strings here; they are resolved against
/// the device vocabulary at execution time so an unknown name skips one
/// command instead of failing the whole parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetVolume(i32),
    FrontLed(Color),
    BackLed(Color),
    HoloProjectorLed(i32),
    LogicDisplayLed(i32),
    Stance(Stance),
    Sound(String),
    Animation(String),
    ShakeHead,
    /// Forward along the current heading, in centimeters.
    Move(f32),
    /// Backward along the current heading, in centimeters.
    MoveBack(f32),
    /// Square with the given side, turning right.
    Square(f32),
    /// Square with the given side, turning left.
    SquareLeft(f32),
    /// Circle with the given diameter, in centimeters.
    Circle(f32),
    /// Signed body turn, degrees.
    Turn(f32),
    /// Signed dome turn relative to the current dome position, degrees.
    TurnDome(f32),
    /// Lock the dome to an absolute world-frame direction, degrees.
    LockDome(f32),
    /// Set the speed used by subsequent movement commands (0-255).
    Speed(i32),
}

impl Command {
    /// Flag-style name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetVolume(_) => "set-volume",
            Command::FrontLed(_) => "front-led",
            Command::BackLed(_) => "back-led",
            Command::HoloProjectorLed(_) => "holo-projector-led",
            Command::LogicDisplayLed(_) => "logic-display-led",
            Command::Stance(_) => "stance",
            Command::Sound(_) => "sound",
            Command::Animation(_) => "animation",
            Command::ShakeHead => "shake-head",
            Command::Move(_) => "move",
            Command::MoveBack(_) => "move-back",
            Command::Square(_) => "square",
            Command::SquareLeft(_) => "square-left",
            Command::Circle(_) => "circle",
            Command::Turn(_) => "turn",
            Command::TurnDome(_) => "turn-dome",
            Command::LockDome(_) => "lock-dome",
            Command::Speed(_) => "speed",
        }
    }
}

/// Result of executing a single command.
///
/// No variant aborts the sequence; the session loop reports the outcome and
/// moves on to the next command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command ran to completion.
    Completed { message: String },
    /// Command was skipped before touching the device (unknown name).
    Rejected { message: String },
    /// A device call failed mid-command; remaining effects were skipped.
    Failed { message: String },
}
