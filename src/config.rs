//! Fixed timing and calibration parameters for motion execution

use std::time::Duration;

/// Timing and calibration knobs for the execution engine.
///
/// The delays are physical settling times: the toy needs real time to reach a
/// commanded position before the next command lands. Defaults match what the
/// hardware tolerates in practice.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Pause after a standalone body turn.
    pub turn_settle: Duration,
    /// Pause after each heading change inside a square.
    pub heading_settle: Duration,
    /// Pause between square legs.
    pub leg_settle: Duration,
    /// Pause between dome steps of a head shake.
    pub dome_settle: Duration,
    /// Pause after a stance change (legs must deploy).
    pub stance_settle: Duration,
    /// Pause after triggering an animation.
    pub animation_settle: Duration,
    /// Locator polling interval for distance-based moves.
    pub poll_interval: Duration,
    /// Assumed linear speed for circle timing, cm/s. Deliberately not derived
    /// from the commanded speed, so circle duration does not scale with it.
    pub circle_speed_cm_s: f32,
    /// Optional hard deadline on a single distance-based move. `None` means
    /// the locator poll loop waits indefinitely.
    pub drive_deadline: Option<Duration>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            turn_settle: Duration::from_secs(1),
            heading_settle: Duration::from_millis(500),
            leg_settle: Duration::from_millis(300),
            dome_settle: Duration::from_millis(500),
            stance_settle: Duration::from_secs(2),
            animation_settle: Duration::from_secs(3),
            poll_interval: Duration::from_millis(50),
            circle_speed_cm_s: 30.0,
            drive_deadline: None,
        }
    }
}
