//! Avatar color, picked once when the profile is created.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// CSS color descriptor used as the avatar background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarColor(String);

impl AvatarColor {
    pub fn new(color: impl Into<String>) -> Result<Self, ValidationError> {
        let color = color.into();
        if color.trim().is_empty() {
            return Err(ValidationError::empty_field("avatar_color"));
        }
        Ok(Self(color))
    }

    /// Pastel color with a random hue: `hsl(<0-359>, 70%, 80%)`.
    pub fn random() -> Self {
        Self::from_hue(rand::thread_rng().gen_range(0..360))
    }

    pub fn from_hue(hue: u16) -> Self {
        Self(format!("hsl({}, 70%, 80%)", hue % 360))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AvatarColor {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AvatarColor> for String {
    fn from(color: AvatarColor) -> Self {
        color.0
    }
}

impl fmt::Display for AvatarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
