//! Closed-loop distance driver
//!
//! Commands the droid to roll at a heading and speed, then polls the locator
//! until the straight-line distance from the start covers the target. The
//! droid is stopped on every exit path, including cancellation and device
//! errors, so an aborted wait never leaves it rolling.

use crate::cancel::CancelToken;
use crate::config::MotionConfig;
use crate::device::{Device, Position};
use anyhow::{bail, Result};
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

/// Drive until `target_cm` of ground is covered; returns the actual distance.
///
/// May overshoot the target by up to one polling interval of travel; it never
/// undershoots once the stop condition fires. With no deadline configured the
/// poll loop waits indefinitely for locator progress.
pub async fn drive_to(
    device: &dyn Device,
    heading_deg: f32,
    target_cm: f32,
    speed: u8,
    cancel: &CancelToken,
    config: &MotionConfig,
) -> Result<f32> {
    info!("Driving {target_cm:.1}cm at heading {heading_deg:.0}");
    device.set_heading(heading_deg as u16).await?;
    let start = device.get_location().await?;
    device.set_speed(speed).await?;

    let outcome = poll_until_covered(device, start, target_cm, cancel, config).await;

    device.stop_rolling().await?;

    let travelled = outcome?;
    info!("Reached distance: {travelled:.2}cm");
    Ok(travelled)
}

async fn poll_until_covered(
    device: &dyn Device,
    start: Position,
    target_cm: f32,
    cancel: &CancelToken,
    config: &MotionConfig,
) -> Result<f32> {
    let deadline = config.drive_deadline.map(|limit| Instant::now() + limit);
    loop {
        let here = device.get_location().await?;
        let covered = start.distance_to(&here);
        if covered >= target_cm {
            return Ok(covered);
        }
        if cancel.is_cancelled() {
            bail!("drive cancelled at {covered:.2}cm of {target_cm:.1}cm");
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                bail!("drive deadline exceeded at {covered:.2}cm of {target_cm:.1}cm");
            }
        }
        debug!("  covered {covered:.2}/{target_cm:.1}cm");
        tokio::select! {
            _ = sleep(config.poll_interval) => {}
            _ = cancel.cancelled() => {}
        }
    }
}
