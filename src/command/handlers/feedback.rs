//! Feedback handlers: LEDs, audio, animations, stance, speed bookkeeping
//!
//! All intensity-style values are clamped to 0-255 silently; clamping is not
//! an error.

use super::ExecContext;
use crate::command::CommandResult;
use crate::device::{Animation, Color, Led, Sound, Stance};
use anyhow::Result;
use tokio::time::sleep;

fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

pub async fn set_volume(ctx: &mut ExecContext<'_>, level: i32) -> Result<CommandResult> {
    let level = clamp_u8(level);
    ctx.device.set_audio_volume(level).await?;
    Ok(CommandResult::Completed {
        message: format!("volume set to {level}"),
    })
}

pub async fn front_led(ctx: &mut ExecContext<'_>, color: Color) -> Result<CommandResult> {
    ctx.device.set_led(Led::Front(color)).await?;
    Ok(CommandResult::Completed {
        message: format!("front LED set to {color}"),
    })
}

pub async fn back_led(ctx: &mut ExecContext<'_>, color: Color) -> Result<CommandResult> {
    ctx.device.set_led(Led::Back(color)).await?;
    Ok(CommandResult::Completed {
        message: format!("back LED set to {color}"),
    })
}

pub async fn holo_projector_led(ctx: &mut ExecContext<'_>, intensity: i32) -> Result<CommandResult> {
    let intensity = clamp_u8(intensity);
    ctx.device.set_led(Led::HoloProjector(intensity)).await?;
    Ok(CommandResult::Completed {
        message: format!("holo projector LED set to {intensity}"),
    })
}

pub async fn logic_display_led(ctx: &mut ExecContext<'_>, intensity: i32) -> Result<CommandResult> {
    let intensity = clamp_u8(intensity);
    ctx.device.set_led(Led::LogicDisplays(intensity)).await?;
    Ok(CommandResult::Completed {
        message: format!("logic display LED set to {intensity}"),
    })
}

/// Resolve a sound name against the device vocabulary and play it.
/// An unknown name skips the command without touching the device.
pub async fn sound(ctx: &mut ExecContext<'_>, name: &str) -> Result<CommandResult> {
    match name.parse::<Sound>() {
        Ok(sound) => {
            ctx.device.play_sound(sound).await?;
            Ok(CommandResult::Completed {
                message: format!("played sound {name}"),
            })
        }
        Err(e) => Ok(CommandResult::Rejected {
            message: e.to_string(),
        }),
    }
}

/// Resolve an animation name and play it, then give the animatronics time to
/// run before the next command lands.
pub async fn animation(ctx: &mut ExecContext<'_>, name: &str) -> Result<CommandResult> {
    match name.parse::<Animation>() {
        Ok(animation) => {
            ctx.device.play_animation(animation).await?;
            sleep(ctx.config.animation_settle).await;
            Ok(CommandResult::Completed {
                message: format!("played animation {name}"),
            })
        }
        Err(e) => Ok(CommandResult::Rejected {
            message: e.to_string(),
        }),
    }
}

/// Switch leg configuration. The settle is long: legs physically deploy.
pub async fn stance(ctx: &mut ExecContext<'_>, stance: Stance) -> Result<CommandResult> {
    ctx.device.set_stance(stance).await?;
    sleep(ctx.config.stance_settle).await;
    Ok(CommandResult::Completed {
        message: format!("stance set to {stance}"),
    })
}

/// Update the session speed. No device call: the value is consumed by
/// subsequent movement commands.
pub async fn speed(ctx: &mut ExecContext<'_>, value: i32) -> Result<CommandResult> {
    ctx.state.current_speed = clamp_u8(value);
    Ok(CommandResult::Completed {
        message: format!("speed set to {}", ctx.state.current_speed),
    })
}
