//! Kinematic session state
//!
//! One instance lives for the duration of a session (batch run or stream
//! watch) and is passed by exclusive mutable reference into every command
//! execution. It is the only state carried between otherwise-independent
//! commands.

/// Mutable kinematic state threaded through every command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Body heading in degrees, world frame, always within [0, 360).
    pub heading: f32,
    /// Standing request that the dome hold a fixed world-frame direction.
    /// While set, every heading change must be followed by a dome reposition.
    pub locked_dome_direction: Option<f32>,
    /// Speed consumed by subsequent movement commands (0-255).
    pub current_speed: u8,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self {
            heading: 0.0,
            locked_dome_direction: None,
            current_speed: 100,
        }
    }
}

impl KinematicState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a signed heading delta and return the new normalized heading.
    pub fn apply_turn(&mut self, delta_deg: f32) -> f32 {
        self.heading = (self.heading + delta_deg).rem_euclid(360.0);
        self.heading
    }
}

/// Dome angle relative to the body required to realize a world-frame lock,
/// wrapped into (-180, 180] so the dome takes the short way around.
pub fn relative_dome(lock_deg: f32, heading_deg: f32) -> f32 {
    let mut rel = (lock_deg - heading_deg).rem_euclid(360.0);
    if rel > 180.0 {
        rel -= 360.0;
    }
    rel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_normalizes_into_range() {
        let mut state = KinematicState::new();
        assert_eq!(state.apply_turn(90.0), 90.0);
        assert_eq!(state.apply_turn(-180.0), 270.0);
        assert_eq!(state.apply_turn(540.0), 90.0);
        assert_eq!(state.apply_turn(-90.0), 0.0);
    }

    #[test]
    fn heading_stays_in_range_for_any_delta() {
        let mut state = KinematicState::new();
        for delta in [-720.0, -359.5, -90.0, -0.5, 0.0, 0.5, 45.0, 359.5, 1080.0] {
            let heading = state.apply_turn(delta);
            assert!((0.0..360.0).contains(&heading), "heading {heading} out of range");
        }
    }

    #[test]
    fn relative_dome_wraps_to_half_open_interval() {
        assert_eq!(relative_dome(0.0, 270.0), 90.0);
        assert_eq!(relative_dome(0.0, 90.0), -90.0);
        assert_eq!(relative_dome(90.0, 90.0), 0.0);
        // 180 is inside the interval; -180 is not.
        assert_eq!(relative_dome(180.0, 0.0), 180.0);
        assert_eq!(relative_dome(359.0, 0.0), -1.0);
    }

    #[test]
    fn defaults_match_session_start() {
        let state = KinematicState::new();
        assert_eq!(state.heading, 0.0);
        assert_eq!(state.locked_dome_direction, None);
        assert_eq!(state.current_speed, 100);
    }
}
