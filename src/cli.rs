//! Ordered command-line surface
//!
//! Every action flag is repeatable and may appear interleaved with others;
//! the invocation order is the execution order. Clap collects values per
//! flag, so the matches are flattened back into a single ordered command
//! list using argument indices. Stream lines go through the same parser.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;

use crate::command::Command;
use crate::device::{Animation, Color, ParseColorError, ParseStanceError, Sound, Stance};

/// A parsed program invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Actions in command-line order.
    pub commands: Vec<Command>,
    /// Watch this file for streamed commands instead of running a batch.
    pub stream: Option<PathBuf>,
    /// Use the simulated droid instead of discovering hardware.
    pub sim: bool,
}

/// Parse the process arguments.
pub fn parse() -> Result<Invocation, clap::Error> {
    let matches = command().try_get_matches()?;
    Ok(Invocation {
        commands: ordered_commands(&matches),
        stream: matches.get_one::<PathBuf>("stream").cloned(),
        sim: matches.get_flag("sim"),
    })
}

/// Parse one stream-file line with the same grammar as the command line.
pub fn parse_line(line: &str) -> Result<Vec<Command>, clap::Error> {
    let matches = command()
        .no_binary_name(true)
        .try_get_matches_from(line.split_whitespace())?;
    Ok(ordered_commands(&matches))
}

fn parse_color(s: &str) -> Result<Color, ParseColorError> {
    s.parse()
}

fn parse_stance(s: &str) -> Result<Stance, ParseStanceError> {
    s.parse()
}

fn sound_help() -> String {
    let names: Vec<&str> = Sound::ALL.iter().map(|(name, _)| *name).collect();
    format!("Name of the sound to play. Available: {}", names.join(", "))
}

fn animation_help() -> String {
    let names: Vec<&str> = Animation::ALL.iter().map(|(name, _)| *name).collect();
    format!("Name of the animation to play. Available: {}", names.join(", "))
}

fn command() -> ClapCommand {
    ClapCommand::new("droidctl")
        .about("Sequence motion and feedback actions on an astromech droid")
        .arg(
            Arg::new("sound")
                .long("sound")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help(sound_help()),
        )
        .arg(
            Arg::new("animation")
                .long("animation")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help(animation_help()),
        )
        .arg(
            Arg::new("shake-head")
                .long("shake-head")
                .num_args(0..=1)
                .default_missing_value("1")
                .action(ArgAction::Append)
                .help("Shake the dome right and left"),
        )
        .arg(
            Arg::new("stance")
                .long("stance")
                .value_name("bipod|tripod")
                .value_parser(parse_stance)
                .action(ArgAction::Append)
                .help("Set stance (bipod or tripod)"),
        )
        .arg(
            Arg::new("front-led")
                .long("front-led")
                .value_name("R,G,B")
                .value_parser(parse_color)
                .action(ArgAction::Append)
                .help("Front LED color, e.g. 255,0,0"),
        )
        .arg(
            Arg::new("back-led")
                .long("back-led")
                .value_name("R,G,B")
                .value_parser(parse_color)
                .action(ArgAction::Append)
                .help("Back LED color, e.g. 0,255,0"),
        )
        .arg(
            Arg::new("holo-projector-led")
                .long("holo-projector-led")
                .value_name("0-255")
                .value_parser(value_parser!(i32))
                .action(ArgAction::Append)
                .help("Holo projector LED intensity"),
        )
        .arg(
            Arg::new("logic-display-led")
                .long("logic-display-led")
                .value_name("0-255")
                .value_parser(value_parser!(i32))
                .action(ArgAction::Append)
                .help("Logic display LED intensity"),
        )
        .arg(
            Arg::new("set-volume")
                .long("set-volume")
                .value_name("0-255")
                .value_parser(value_parser!(i32))
                .action(ArgAction::Append)
                .help("Set audio volume"),
        )
        .arg(
            Arg::new("move")
                .long("move")
                .value_name("CM")
                .value_parser(value_parser!(f32))
                .action(ArgAction::Append)
                .help("Move forward along the current heading"),
        )
        .arg(
            Arg::new("move-back")
                .long("move-back")
                .value_name("CM")
                .value_parser(value_parser!(f32))
                .action(ArgAction::Append)
                .help("Move backward along the current heading"),
        )
        .arg(
            Arg::new("square")
                .long("square")
                .value_name("CM")
                .value_parser(value_parser!(f32))
                .action(ArgAction::Append)
                .help("Drive a square with the given side, turning right"),
        )
        .arg(
            Arg::new("square-left")
                .long("square-left")
                .value_name("CM")
                .value_parser(value_parser!(f32))
                .action(ArgAction::Append)
                .help("Drive a square with the given side, turning left"),
        )
        .arg(
            Arg::new("circle")
                .long("circle")
                .value_name("CM")
                .value_parser(value_parser!(f32))
                .action(ArgAction::Append)
                .help("Drive a circle with the given diameter"),
        )
        .arg(
            Arg::new("turn")
                .long("turn")
                .value_name("DEG")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true)
                .action(ArgAction::Append)
                .help("Turn the body by signed degrees"),
        )
        .arg(
            Arg::new("turn-dome")
                .long("turn-dome")
                .value_name("DEG")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true)
                .action(ArgAction::Append)
                .help("Turn the dome by signed degrees, relative to its position"),
        )
        .arg(
            Arg::new("lock-dome")
                .long("lock-dome")
                .value_name("DEG")
                .value_parser(value_parser!(f32))
                .allow_negative_numbers(true)
                .action(ArgAction::Append)
                .help("Lock the dome to an absolute world direction (0-360); it holds that direction while the body turns"),
        )
        .arg(
            Arg::new("speed")
                .long("speed")
                .value_name("0-255")
                .value_parser(value_parser!(i32))
                .allow_negative_numbers(true)
                .action(ArgAction::Append)
                .help("Set movement speed for subsequent movement commands"),
        )
        .arg(
            Arg::new("stream")
                .long("stream")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Watch a text file and execute commands as lines are appended"),
        )
        .arg(
            Arg::new("sim")
                .long("sim")
                .action(ArgAction::SetTrue)
                .help("Drive the built-in simulated droid instead of hardware"),
        )
}

/// Flatten per-flag matches back into one list ordered by argument index.
fn ordered_commands(matches: &ArgMatches) -> Vec<Command> {
    fn collect<T, F>(matches: &ArgMatches, id: &str, out: &mut Vec<(usize, Command)>, make: F)
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&T) -> Command,
    {
        let Some(indices) = matches.indices_of(id) else {
            return;
        };
        let Some(values) = matches.get_many::<T>(id) else {
            return;
        };
        for (index, value) in indices.zip(values) {
            out.push((index, make(value)));
        }
    }

    let mut ordered: Vec<(usize, Command)> = Vec::new();
    collect::<i32, _>(matches, "set-volume", &mut ordered, |v| Command::SetVolume(*v));
    collect::<Color, _>(matches, "front-led", &mut ordered, |c| Command::FrontLed(*c));
    collect::<Color, _>(matches, "back-led", &mut ordered, |c| Command::BackLed(*c));
    collect::<i32, _>(matches, "holo-projector-led", &mut ordered, |v| {
        Command::HoloProjectorLed(*v)
    });
    collect::<i32, _>(matches, "logic-display-led", &mut ordered, |v| {
        Command::LogicDisplayLed(*v)
    });
    collect::<Stance, _>(matches, "stance", &mut ordered, |s| Command::Stance(*s));
    collect::<String, _>(matches, "sound", &mut ordered, |s| Command::Sound(s.clone()));
    collect::<String, _>(matches, "animation", &mut ordered, |s| {
        Command::Animation(s.clone())
    });
    collect::<String, _>(matches, "shake-head", &mut ordered, |_| Command::ShakeHead);
    collect::<f32, _>(matches, "move", &mut ordered, |v| Command::Move(*v));
    collect::<f32, _>(matches, "move-back", &mut ordered, |v| Command::MoveBack(*v));
    collect::<f32, _>(matches, "square", &mut ordered, |v| Command::Square(*v));
    collect::<f32, _>(matches, "square-left", &mut ordered, |v| Command::SquareLeft(*v));
    collect::<f32, _>(matches, "circle", &mut ordered, |v| Command::Circle(*v));
    collect::<f32, _>(matches, "turn", &mut ordered, |v| Command::Turn(*v));
    collect::<f32, _>(matches, "turn-dome", &mut ordered, |v| Command::TurnDome(*v));
    collect::<f32, _>(matches, "lock-dome", &mut ordered, |v| Command::LockDome(*v));
    collect::<i32, _>(matches, "speed", &mut ordered, |v| Command::Speed(*v));

    ordered.sort_by_key(|(index, _)| *index);
    ordered.into_iter().map(|(_, command)| command).collect()
}
