//! Dome positioning handlers: lock, relative turn, head shake

use super::ExecContext;
use crate::command::CommandResult;
use crate::state::relative_dome;
use anyhow::Result;
use tokio::time::sleep;
use tracing::{info, warn};

/// Re-apply the standing dome lock against the current heading.
///
/// Called after every heading change for as long as a lock is active; a
/// heading change without this re-assertion would silently break the lock.
pub async fn reassert_lock(ctx: &mut ExecContext<'_>) -> Result<()> {
    if let Some(world) = ctx.state.locked_dome_direction {
        let rel = relative_dome(world, ctx.state.heading);
        ctx.device.set_dome_position(rel).await?;
        info!("  dome adjusted to {rel:.1} to hold lock at {world:.0}");
    }
    Ok(())
}

/// Lock the dome to an absolute world-frame direction and apply it
/// immediately against the current heading. The body heading is untouched.
pub async fn lock_dome(ctx: &mut ExecContext<'_>, degrees: f32) -> Result<CommandResult> {
    let world = degrees.rem_euclid(360.0);
    ctx.state.locked_dome_direction = Some(world);
    let rel = relative_dome(world, ctx.state.heading);
    ctx.device.set_dome_position(rel).await?;
    Ok(CommandResult::Completed {
        message: format!("dome locked to {world:.0} (relative position {rel:.1})"),
    })
}

/// Turn the dome by a signed delta relative to its current position.
///
/// Toys without dome feedback fail the position read; in that case the delta
/// is applied as an absolute target instead. Neither path touches the lock.
pub async fn turn_dome(ctx: &mut ExecContext<'_>, degrees: f32) -> Result<CommandResult> {
    match ctx.device.get_dome_position().await {
        Ok(current) => {
            let target = current + degrees;
            ctx.device.set_dome_position(target).await?;
            Ok(CommandResult::Completed {
                message: format!("dome turned {degrees:.0} to {target:.1}"),
            })
        }
        Err(e) => {
            warn!("dome position unavailable ({e}); applying {degrees:.0} as absolute");
            ctx.device.set_dome_position(degrees).await?;
            Ok(CommandResult::Completed {
                message: format!("dome set to {degrees:.0} (no position feedback)"),
            })
        }
    }
}

/// Fixed three-step dome oscillation. Ignores and preserves any dome lock.
pub async fn shake_head(ctx: &mut ExecContext<'_>) -> Result<CommandResult> {
    ctx.device.set_dome_position(45.0).await?;
    sleep(ctx.config.dome_settle).await;
    ctx.device.set_dome_position(-45.0).await?;
    sleep(ctx.config.dome_settle).await;
    ctx.device.set_dome_position(0.0).await?;
    Ok(CommandResult::Completed {
        message: "head shake complete".into(),
    })
}
