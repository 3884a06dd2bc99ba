//! Story palette - the themes, locations, and characters events are drawn from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the three palette lists a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaletteField {
    Themes,
    Locations,
    Characters,
}

impl PaletteField {
    /// Name of the field as it appears in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteField::Themes => "themes",
            PaletteField::Locations => "locations",
            PaletteField::Characters => "characters",
        }
    }
}

impl std::fmt::Display for PaletteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error raised when a palette cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette field '{0}' must contain at least one entry")]
    Empty(PaletteField),
}

/// The immutable set of ingredients a narrative session draws from.
///
/// Every list is guaranteed to be non-empty, so picking a uniform index
/// into any of them is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryPalette {
    themes: Vec<String>,
    locations: Vec<String>,
    characters: Vec<String>,
}

impl StoryPalette {
    /// Build a palette, rejecting any empty list.
    ///
    /// Fields are checked in the order themes, locations, characters and the
    /// first empty one is reported.
    pub fn new<T, L, C>(themes: T, locations: L, characters: C) -> Result<Self, PaletteError>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let themes: Vec<String> = themes.into_iter().map(Into::into).collect();
        let locations: Vec<String> = locations.into_iter().map(Into::into).collect();
        let characters: Vec<String> = characters.into_iter().map(Into::into).collect();

        if themes.is_empty() {
            return Err(PaletteError::Empty(PaletteField::Themes));
        }
        if locations.is_empty() {
            return Err(PaletteError::Empty(PaletteField::Locations));
        }
        if characters.is_empty() {
            return Err(PaletteError::Empty(PaletteField::Characters));
        }

        Ok(Self {
            themes,
            locations,
            characters,
        })
    }

    pub fn themes(&self) -> &[String] {
        &self.themes
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }

    /// Get the list for a given field.
    pub fn field(&self, field: PaletteField) -> &[String] {
        match field {
            PaletteField::Themes => &self.themes,
            PaletteField::Locations => &self.locations,
            PaletteField::Characters => &self.characters,
        }
    }
}

impl<'de> Deserialize<'de> for StoryPalette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            themes: Vec<String>,
            #[serde(default)]
            locations: Vec<String>,
            #[serde(default)]
            characters: Vec<String>,
        }

        let raw = Raw::deserialize(deserializer)?;
        StoryPalette::new(raw.themes, raw.locations, raw.characters)
            .map_err(serde::de::Error::custom)
    }
}
