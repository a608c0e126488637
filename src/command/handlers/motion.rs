//! Body-motion handlers: turn, move, square, circle
//!
//! Every heading change goes through the session state first, then to the
//! device, and finishes by re-asserting the dome lock when one is active.

use super::dome::reassert_lock;
use super::ExecContext;
use crate::command::CommandResult;
use crate::drive;
use anyhow::Result;
use std::f32::consts::PI;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Signed body turn. The new heading is pushed to the device, given time to
/// settle, and the dome lock (if any) is re-asserted against it.
pub async fn turn(ctx: &mut ExecContext<'_>, degrees: f32) -> Result<CommandResult> {
    let heading = ctx.state.apply_turn(degrees);
    ctx.device.set_heading(heading as u16).await?;
    sleep(ctx.config.turn_settle).await;
    reassert_lock(ctx).await?;
    Ok(CommandResult::Completed {
        message: format!("turned {degrees:.0}, heading now {heading:.0}"),
    })
}

/// Straight-line move along the current heading (or its reverse).
/// The heading itself is left untouched either way.
pub async fn drive(ctx: &mut ExecContext<'_>, distance_cm: f32, reverse: bool) -> Result<CommandResult> {
    let heading = if reverse {
        (ctx.state.heading + 180.0).rem_euclid(360.0)
    } else {
        ctx.state.heading
    };
    let travelled = drive::drive_to(
        ctx.device,
        heading,
        distance_cm,
        ctx.state.current_speed,
        ctx.cancel,
        ctx.config,
    )
    .await?;
    Ok(CommandResult::Completed {
        message: format!("covered {travelled:.2}cm"),
    })
}

/// Drive four sides of a square and return to the starting orientation.
///
/// Four turns in total: one before each non-first leg plus a closing turn
/// after the last leg. Each turn settles before the dome lock is re-asserted.
pub async fn square(ctx: &mut ExecContext<'_>, side_cm: f32, clockwise: bool) -> Result<CommandResult> {
    let step = if clockwise { 90.0 } else { -90.0 };
    info!("Driving square with side {side_cm:.1}cm (turning {})", if clockwise { "right" } else { "left" });

    for leg in 0..4 {
        if leg > 0 {
            apply_heading_step(ctx, step).await?;
        }
        drive::drive_to(
            ctx.device,
            ctx.state.heading,
            side_cm,
            ctx.state.current_speed,
            ctx.cancel,
            ctx.config,
        )
        .await?;
        sleep(ctx.config.leg_settle).await;
    }

    // Closing turn back to the starting orientation.
    apply_heading_step(ctx, step).await?;
    Ok(CommandResult::Completed {
        message: format!("square complete, heading back at {:.0}", ctx.state.heading),
    })
}

async fn apply_heading_step(ctx: &mut ExecContext<'_>, step: f32) -> Result<()> {
    let heading = ctx.state.apply_turn(step);
    ctx.device.set_heading(heading as u16).await?;
    sleep(ctx.config.heading_settle).await;
    reassert_lock(ctx).await?;
    Ok(())
}

/// Spin a full rotation sized to trace a circle of the given diameter.
///
/// Duration comes from the calibration constant, not the commanded speed.
/// The dome is positioned once before and once after the spin; it is not
/// tracked during the rotation (known limitation of the toy's spin command).
pub async fn circle(ctx: &mut ExecContext<'_>, diameter_cm: f32) -> Result<CommandResult> {
    let duration = circle_duration(diameter_cm, ctx.config.circle_speed_cm_s);
    info!("Driving circle of diameter {diameter_cm:.1}cm ({duration:.2?} spin)");

    if ctx.state.locked_dome_direction.is_some() {
        info!("  dome lock active; the dome is not adjusted during the spin");
        reassert_lock(ctx).await?;
    }

    ctx.device.set_speed(ctx.state.current_speed).await?;
    ctx.device.spin(360, duration).await?;
    ctx.device.set_speed(0).await?;

    reassert_lock(ctx).await?;
    Ok(CommandResult::Completed {
        message: format!("circle complete ({diameter_cm:.1}cm diameter)"),
    })
}

/// Spin time for a full circle of `diameter_cm` at the assumed linear speed.
pub fn circle_duration(diameter_cm: f32, speed_cm_s: f32) -> Duration {
    let circumference = PI * diameter_cm;
    Duration::from_secs_f32(circumference / speed_cm_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::config::MotionConfig;
    use crate::device::mock::{Call, MockDevice};
    use crate::state::KinematicState;

    fn ctx_parts() -> (KinematicState, MotionConfig, CancelToken) {
        (KinematicState::new(), MotionConfig::default(), CancelToken::new())
    }

    #[tokio::test(start_paused = true)]
    async fn turn_normalizes_and_pushes_heading() {
        let device = MockDevice::new();
        let (mut state, config, cancel) = ctx_parts();
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        turn(&mut ctx, -90.0).await.unwrap();

        assert_eq!(state.heading, 270.0);
        assert_eq!(device.calls(), vec![Call::SetHeading(270)]);
    }

    #[tokio::test(start_paused = true)]
    async fn turn_reasserts_an_active_dome_lock() {
        let device = MockDevice::new();
        let (mut state, config, cancel) = ctx_parts();
        state.locked_dome_direction = Some(0.0);
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        turn(&mut ctx, 90.0).await.unwrap();

        // Lock at 0, heading 90: dome goes to -90 relative.
        assert_eq!(
            device.calls(),
            vec![Call::SetHeading(90), Call::SetDome(-90.0)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn move_back_drives_the_reverse_heading_without_turning() {
        let device = MockDevice::with_locations([(0.0, 0.0), (5.0, 0.0)]);
        let (mut state, config, cancel) = ctx_parts();
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        drive(&mut ctx, 5.0, true).await.unwrap();

        assert_eq!(state.heading, 0.0);
        assert_eq!(device.calls()[0], Call::SetHeading(180));
    }

    #[tokio::test(start_paused = true)]
    async fn move_uses_the_session_speed() {
        let device = MockDevice::with_locations([(0.0, 0.0), (5.0, 0.0)]);
        let (mut state, config, cancel) = ctx_parts();
        state.current_speed = 42;
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        drive(&mut ctx, 5.0, false).await.unwrap();

        assert!(device.calls().contains(&Call::SetSpeed(42)));
    }

    #[tokio::test(start_paused = true)]
    async fn square_returns_to_the_starting_heading() {
        // Two locator readings per leg: start, then one past the side length.
        let device = MockDevice::with_locations([
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
        ]);
        let (mut state, config, cancel) = ctx_parts();
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        square(&mut ctx, 10.0, true).await.unwrap();

        assert_eq!(state.heading, 0.0);
        // 4 legs = 4 stop calls; 4 turns + 4 per-leg heading sets.
        let calls = device.calls();
        assert_eq!(calls.iter().filter(|c| **c == Call::StopRolling).count(), 4);
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, Call::SetHeading(_)))
                .count(),
            8
        );
    }

    #[tokio::test(start_paused = true)]
    async fn square_left_turns_counterclockwise() {
        let device = MockDevice::with_locations([
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
        ]);
        let (mut state, config, cancel) = ctx_parts();
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        square(&mut ctx, 10.0, false).await.unwrap();

        assert_eq!(state.heading, 0.0);
        // First turn goes to 270 (i.e. -90).
        assert!(device.calls().contains(&Call::SetHeading(270)));
    }

    #[tokio::test(start_paused = true)]
    async fn square_reasserts_dome_lock_after_every_turn() {
        let device = MockDevice::with_locations([
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
            (0.0, 0.0), (10.0, 0.0),
        ]);
        let (mut state, config, cancel) = ctx_parts();
        state.locked_dome_direction = Some(0.0);
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        square(&mut ctx, 10.0, true).await.unwrap();

        let domes: Vec<f32> = device
            .calls()
            .iter()
            .filter_map(|c| match c {
                Call::SetDome(d) => Some(*d),
                _ => None,
            })
            .collect();
        // Headings 90, 180, 270, 0 against a lock at 0.
        assert_eq!(domes, vec![-90.0, 180.0, 90.0, 0.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn circle_duration_ignores_the_commanded_speed() {
        // Calibration gap preserved on purpose: duration depends only on the
        // fixed constant, so --speed has no effect on circle timing.
        let device = MockDevice::new();
        let (mut state, config, cancel) = ctx_parts();
        state.current_speed = 200;
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        circle(&mut ctx, 20.0).await.unwrap();

        let expected = PI * 20.0 / 30.0;
        let spin = device
            .calls()
            .iter()
            .find_map(|c| match c {
                Call::Spin { degrees, duration } => Some((*degrees, *duration)),
                _ => None,
            })
            .expect("no spin call");
        assert_eq!(spin.0, 360);
        assert!((spin.1.as_secs_f32() - expected).abs() < 1e-3);
        // Spin runs at the session speed and the droid is stopped after.
        assert!(device.calls().contains(&Call::SetSpeed(200)));
        assert_eq!(*device.calls().last().unwrap(), Call::SetSpeed(0));
    }

    #[tokio::test(start_paused = true)]
    async fn circle_repositions_a_locked_dome_before_and_after() {
        let device = MockDevice::new();
        let (mut state, config, cancel) = ctx_parts();
        state.locked_dome_direction = Some(45.0);
        let mut ctx = ExecContext { state: &mut state, device: &device, config: &config, cancel: &cancel };

        circle(&mut ctx, 10.0).await.unwrap();

        let domes = device
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::SetDome(_)))
            .count();
        assert_eq!(domes, 2);
    }
}
