use std::fmt;

use serde::{Deserialize, Serialize};

use crate::homes::errors::HomeError;

/// A point in some region of the world plus the facing direction.
///
/// Locations carry no identity of their own; two locations with equal fields are the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }

    /// Same position, facing north and level.
    pub fn at(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self::new(world, x, y, z, 0.0, 0.0)
    }

    /// JSON has no NaN or infinity, so only finite locations can be stored.
    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.z].iter().all(|v| v.is_finite())
            && self.yaw.is_finite()
            && self.pitch.is_finite()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}, {:.1}, {:.1}) yaw {:.1} pitch {:.1}",
            self.world, self.x, self.y, self.z, self.yaw, self.pitch
        )
    }
}

/// Lowercase home name. "Base" and "base" build the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HomeName(String);

impl HomeName {
    pub fn new(raw: &str) -> Result<Self, HomeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(HomeError::InvalidName(raw.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HomeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HomeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-account personal home limit. Negative configured values mean unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCapacity {
    Unlimited,
    Limited(usize),
}

impl HomeCapacity {
    pub fn from_setting(max_homes: i64) -> Self {
        if max_homes < 0 {
            HomeCapacity::Unlimited
        } else {
            HomeCapacity::Limited(max_homes as usize)
        }
    }

    /// True when an account that already holds `current` homes may not add another.
    pub fn is_full(&self, current: usize) -> bool {
        match self {
            HomeCapacity::Unlimited => false,
            HomeCapacity::Limited(max) => current >= *max,
        }
    }
}
