//! Scripted droid double for executor and driver tests

use super::{Animation, Device, Led, Position, Sound, Stance};
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetHeading(u16),
    SetSpeed(u8),
    StopRolling,
    SetDome(f32),
    GetDome,
    Led(Led),
    Volume(u8),
    Sound(Sound),
    Animation(Animation),
    Stance(Stance),
    Spin { degrees: i32, duration: Duration },
}

/// Records every call and replays a scripted sequence of locator readings.
/// When the script runs dry the last reading repeats.
pub struct MockDevice {
    calls: Mutex<Vec<Call>>,
    locations: Mutex<VecDeque<Position>>,
    last_location: Mutex<Position>,
    dome_feedback: Mutex<Option<f32>>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            locations: Mutex::new(VecDeque::new()),
            last_location: Mutex::new(Position::default()),
            dome_feedback: Mutex::new(Some(0.0)),
        }
    }

    pub fn with_locations<I>(locations: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let device = Self::new();
        *device.locations.lock().unwrap() = locations
            .into_iter()
            .map(|(x, y)| Position { x, y })
            .collect();
        device
    }

    /// Make `get_dome_position` fail, like toys without dome feedback.
    pub fn without_dome_feedback(self) -> Self {
        *self.dome_feedback.lock().unwrap() = None;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remaining_locations(&self) -> usize {
        self.locations.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Device for MockDevice {
    async fn set_heading(&self, degrees: u16) -> Result<()> {
        self.record(Call::SetHeading(degrees));
        Ok(())
    }

    async fn set_speed(&self, speed: u8) -> Result<()> {
        self.record(Call::SetSpeed(speed));
        Ok(())
    }

    async fn stop_rolling(&self) -> Result<()> {
        self.record(Call::StopRolling);
        Ok(())
    }

    async fn get_location(&self) -> Result<Position> {
        let mut locations = self.locations.lock().unwrap();
        let mut last = self.last_location.lock().unwrap();
        if let Some(next) = locations.pop_front() {
            *last = next;
        }
        Ok(*last)
    }

    async fn set_dome_position(&self, degrees: f32) -> Result<()> {
        self.record(Call::SetDome(degrees));
        if let Some(dome) = self.dome_feedback.lock().unwrap().as_mut() {
            *dome = degrees;
        }
        Ok(())
    }

    async fn get_dome_position(&self) -> Result<f32> {
        self.record(Call::GetDome);
        match *self.dome_feedback.lock().unwrap() {
            Some(degrees) => Ok(degrees),
            None => bail!("dome position not supported"),
        }
    }

    async fn set_led(&self, led: Led) -> Result<()> {
        self.record(Call::Led(led));
        Ok(())
    }

    async fn set_audio_volume(&self, volume: u8) -> Result<()> {
        self.record(Call::Volume(volume));
        Ok(())
    }

    async fn play_sound(&self, sound: Sound) -> Result<()> {
        self.record(Call::Sound(sound));
        Ok(())
    }

    async fn play_animation(&self, animation: Animation) -> Result<()> {
        self.record(Call::Animation(animation));
        Ok(())
    }

    async fn set_stance(&self, stance: Stance) -> Result<()> {
        self.record(Call::Stance(stance));
        Ok(())
    }

    async fn spin(&self, degrees: i32, duration: Duration) -> Result<()> {
        self.record(Call::Spin { degrees, duration });
        Ok(())
    }
}
