//! Device capability surface and typed device vocabulary
//!
//! The execution engine only ever talks to the droid through the [`Device`]
//! trait; transport/protocol drivers implement it. The crate ships a
//! kinematic simulator (`sim`) behind the same seam.

pub mod sim;

#[cfg(test)]
pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Planar position reported by the droid's locator, in centimeters.
///
/// The coordinate frame is arbitrary but consistent across calls within one
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Straight-line distance to another position.
    pub fn distance_to(&self, other: &Position) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// An RGB LED color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Error)]
#[error("invalid color '{0}': expected r,g,b with each component 0-255")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            return Err(ParseColorError(s.into()));
        }
        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| ParseColorError(s.into()))?;
        }
        Ok(Color {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// Addressable LED channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Led {
    Front(Color),
    Back(Color),
    /// Holo projector brightness (single white channel).
    HoloProjector(u8),
    /// Logic display brightness (single white channel).
    LogicDisplays(u8),
}

/// Leg configuration of the droid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Bipod,
    Tripod,
}

#[derive(Debug, Error)]
#[error("unknown stance '{0}': expected 'bipod' or 'tripod'")]
pub struct ParseStanceError(String);

impl FromStr for Stance {
    type Err = ParseStanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bipod" => Ok(Stance::Bipod),
            "tripod" => Ok(Stance::Tripod),
            _ => Err(ParseStanceError(s.into())),
        }
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Bipod => write!(f, "bipod"),
            Stance::Tripod => write!(f, "tripod"),
        }
    }
}

/// Built-in droid vocalizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Alarm,
    Angry,
    Annoyed,
    Chatty,
    Confident,
    Content,
    Engine,
    Excited,
    Happy,
    Laugh,
    No,
    Sad,
    Scared,
    Scream,
    Surprised,
    Whistle,
    Yes,
}

impl Sound {
    /// Every playable sound and the name it is addressed by.
    pub const ALL: &'static [(&'static str, Sound)] = &[
        ("ALARM", Sound::Alarm),
        ("ANGRY", Sound::Angry),
        ("ANNOYED", Sound::Annoyed),
        ("CHATTY", Sound::Chatty),
        ("CONFIDENT", Sound::Confident),
        ("CONTENT", Sound::Content),
        ("ENGINE", Sound::Engine),
        ("EXCITED", Sound::Excited),
        ("HAPPY", Sound::Happy),
        ("LAUGH", Sound::Laugh),
        ("NO", Sound::No),
        ("SAD", Sound::Sad),
        ("SCARED", Sound::Scared),
        ("SCREAM", Sound::Scream),
        ("SURPRISED", Sound::Surprised),
        ("WHISTLE", Sound::Whistle),
        ("YES", Sound::Yes),
    ];
}

#[derive(Debug, Error)]
#[error("sound '{0}' not found")]
pub struct UnknownSound(String);

impl FromStr for Sound {
    type Err = UnknownSound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sound::ALL
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, sound)| *sound)
            .ok_or_else(|| UnknownSound(s.into()))
    }
}

/// Built-in animatronic sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    Charger,
    EmoteAlarm,
    EmoteAngry,
    EmoteAttention,
    EmoteDrive,
    EmoteExcited,
    EmoteNo,
    EmoteSad,
    EmoteScared,
    EmoteYes,
    Idle1,
    Idle2,
    Idle3,
    PatrolAlarm,
    PatrolHit,
    Spin,
    Surprised,
}

impl Animation {
    /// Every playable animation and the name it is addressed by.
    pub const ALL: &'static [(&'static str, Animation)] = &[
        ("CHARGER", Animation::Charger),
        ("EMOTE_ALARM", Animation::EmoteAlarm),
        ("EMOTE_ANGRY", Animation::EmoteAngry),
        ("EMOTE_ATTENTION", Animation::EmoteAttention),
        ("EMOTE_DRIVE", Animation::EmoteDrive),
        ("EMOTE_EXCITED", Animation::EmoteExcited),
        ("EMOTE_NO", Animation::EmoteNo),
        ("EMOTE_SAD", Animation::EmoteSad),
        ("EMOTE_SCARED", Animation::EmoteScared),
        ("EMOTE_YES", Animation::EmoteYes),
        ("IDLE_1", Animation::Idle1),
        ("IDLE_2", Animation::Idle2),
        ("IDLE_3", Animation::Idle3),
        ("PATROL_ALARM", Animation::PatrolAlarm),
        ("PATROL_HIT", Animation::PatrolHit),
        ("SPIN", Animation::Spin),
        ("SURPRISED", Animation::Surprised),
    ];
}

#[derive(Debug, Error)]
#[error("animation '{0}' not found")]
pub struct UnknownAnimation(String);

impl FromStr for Animation {
    type Err = UnknownAnimation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Animation::ALL
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, animation)| *animation)
            .ok_or_else(|| UnknownAnimation(s.into()))
    }
}

/// Capability surface of a connected droid.
///
/// Implemented by transport/protocol drivers; the execution engine holds a
/// `&dyn Device` and never sees the wire format.
#[async_trait]
pub trait Device: Send + Sync {
    /// Point the body at an absolute heading, 0-359 degrees, world frame.
    async fn set_heading(&self, degrees: u16) -> Result<()>;

    /// Start (or keep) rolling at the given speed along the current heading.
    async fn set_speed(&self, speed: u8) -> Result<()>;

    /// Stop rolling immediately.
    async fn stop_rolling(&self) -> Result<()>;

    /// Read the locator position.
    async fn get_location(&self) -> Result<Position>;

    /// Position the dome relative to the body. Negative turns left.
    async fn set_dome_position(&self, degrees: f32) -> Result<()>;

    /// Read the dome position. May fail on toys without dome feedback.
    async fn get_dome_position(&self) -> Result<f32>;

    async fn set_led(&self, led: Led) -> Result<()>;

    async fn set_audio_volume(&self, volume: u8) -> Result<()>;

    async fn play_sound(&self, sound: Sound) -> Result<()>;

    async fn play_animation(&self, animation: Animation) -> Result<()>;

    async fn set_stance(&self, stance: Stance) -> Result<()>;

    /// Spin in place by `degrees` over `duration`.
    async fn spin(&self, degrees: i32, duration: Duration) -> Result<()>;
}
