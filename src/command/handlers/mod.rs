//! Per-action execution policy
//!
//! Split by concern: motion (body movement), dome (head positioning), and
//! feedback (lights, audio, stance, speed bookkeeping).

pub mod dome;
pub mod feedback;
pub mod motion;

use crate::cancel::CancelToken;
use crate::config::MotionConfig;
use crate::device::Device;
use crate::state::KinematicState;

/// Everything a handler needs: the session state, the device, the timing
/// parameters, and the cancellation token for long-running waits.
pub struct ExecContext<'a> {
    pub state: &'a mut KinematicState,
    pub device: &'a dyn Device,
    pub config: &'a MotionConfig,
    pub cancel: &'a CancelToken,
}
