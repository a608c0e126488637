//! Simulated droid with a first-order kinematic model
//!
//! Integrates planar position from the commanded heading and speed so the
//! closed-loop distance driver behaves as it does against real hardware.
//! Used for `--sim` sessions; hardware drivers implement the same trait.

use super::{Animation, Color, Device, Led, Position, Sound, Stance};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Ground speed at full throttle, cm/s.
const FULL_SPEED_CM_S: f32 = 60.0;

pub struct SimDevice {
    inner: Mutex<SimState>,
}

struct SimState {
    position: Position,
    heading_deg: f32,
    speed: u8,
    dome_deg: f32,
    last_update: Instant,
}

impl SimDevice {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SimState {
                position: Position::default(),
                heading_deg: 0.0,
                speed: 0,
                dome_deg: 0.0,
                last_update: Instant::now(),
            }),
        }
    }

    /// Integrate motion since the last update at the current heading/speed.
    fn advance(state: &mut SimState) {
        let now = Instant::now();
        let dt = now.duration_since(state.last_update).as_secs_f32();
        state.last_update = now;
        if state.speed == 0 || dt <= 0.0 {
            return;
        }
        let velocity = state.speed as f32 / 255.0 * FULL_SPEED_CM_S;
        // Compass frame: 0 degrees is +y, angles grow clockwise.
        let radians = state.heading_deg.to_radians();
        state.position.x += velocity * dt * radians.sin();
        state.position.y += velocity * dt * radians.cos();
    }
}

impl Default for SimDevice {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Device for SimDevice {
    async fn set_heading(&self, degrees: u16) -> Result<()> {
        let mut state = self.inner.lock().await;
        Self::advance(&mut state);
        state.heading_deg = f32::from(degrees).rem_euclid(360.0);
        debug!("[sim] heading -> {degrees}");
        Ok(())
    }

    async fn set_speed(&self, speed: u8) -> Result<()> {
        let mut state = self.inner.lock().await;
        Self::advance(&mut state);
        state.speed = speed;
        debug!("[sim] speed -> {speed}");
        Ok(())
    }

    async fn stop_rolling(&self) -> Result<()> {
        let mut state = self.inner.lock().await;
        Self::advance(&mut state);
        state.speed = 0;
        debug!("[sim] stop rolling at ({:.1}, {:.1})", state.position.x, state.position.y);
        Ok(())
    }

    async fn get_location(&self) -> Result<Position> {
        let mut state = self.inner.lock().await;
        Self::advance(&mut state);
        Ok(state.position)
    }

    async fn set_dome_position(&self, degrees: f32) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.dome_deg = degrees;
        debug!("[sim] dome -> {degrees:.1}");
        Ok(())
    }

    async fn get_dome_position(&self) -> Result<f32> {
        Ok(self.inner.lock().await.dome_deg)
    }

    async fn set_led(&self, led: Led) -> Result<()> {
        match led {
            Led::Front(Color { r, g, b }) => debug!("[sim] front led -> {r},{g},{b}"),
            Led::Back(Color { r, g, b }) => debug!("[sim] back led -> {r},{g},{b}"),
            Led::HoloProjector(v) => debug!("[sim] holo projector -> {v}"),
            Led::LogicDisplays(v) => debug!("[sim] logic displays -> {v}"),
        }
        Ok(())
    }

    async fn set_audio_volume(&self, volume: u8) -> Result<()> {
        debug!("[sim] volume -> {volume}");
        Ok(())
    }

    async fn play_sound(&self, sound: Sound) -> Result<()> {
        debug!("[sim] sound {sound:?}");
        Ok(())
    }

    async fn play_animation(&self, animation: Animation) -> Result<()> {
        debug!("[sim] animation {animation:?}");
        Ok(())
    }

    async fn set_stance(&self, stance: Stance) -> Result<()> {
        debug!("[sim] stance -> {stance}");
        Ok(())
    }

    async fn spin(&self, degrees: i32, duration: Duration) -> Result<()> {
        debug!("[sim] spin {degrees} over {duration:?}");
        // Coarse rotation model: step the heading across the duration so the
        // traced path curves instead of shooting off in a straight line.
        let steps: u32 = 36;
        let step_delta = degrees as f32 / steps as f32;
        for _ in 0..steps {
            sleep(duration / steps).await;
            let mut state = self.inner.lock().await;
            Self::advance(&mut state);
            state.heading_deg = (state.heading_deg + step_delta).rem_euclid(360.0);
        }
        Ok(())
    }
}
