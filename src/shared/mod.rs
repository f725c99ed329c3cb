//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the provider sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for provider asset identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── Granularity ─────────────────────────────────────────────────────────────

/// Requested history window. The wire value is passed verbatim as the
/// provider's `days` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "1")]
    Hour1,
    #[serde(rename = "24")]
    Hours24,
    #[default]
    #[serde(rename = "7")]
    Days7,
    #[serde(rename = "30")]
    Days30,
    #[serde(rename = "90")]
    Days90,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour1 => "1",
            Self::Hours24 => "24",
            Self::Days7 => "7",
            Self::Days30 => "30",
            Self::Days90 => "90",
        }
    }

    /// Human-readable option label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hour1 => "1 Hour",
            Self::Hours24 => "24 Hours",
            Self::Days7 => "7 Days",
            Self::Days30 => "30 Days",
            Self::Days90 => "90 Days",
        }
    }

    /// Short windows label their axis with the time of day, longer ones with
    /// the calendar date.
    pub fn shows_time_of_day(&self) -> bool {
        matches!(self, Self::Hour1 | Self::Hours24)
    }

    /// All selectable windows, in menu order.
    pub fn all() -> &'static [Granularity] {
        &[
            Self::Hour1,
            Self::Hours24,
            Self::Days7,
            Self::Days30,
            Self::Days90,
        ]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| format!("unknown granularity: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_serde() {
        let id = AssetId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_granularity_serde() {
        let g: Granularity = serde_json::from_str("\"24\"").unwrap();
        assert_eq!(g, Granularity::Hours24);
        assert_eq!(serde_json::to_string(&Granularity::Days90).unwrap(), "\"90\"");
    }

    #[test]
    fn test_granularity_from_str() {
        for g in Granularity::all() {
            assert_eq!(g.as_str().parse::<Granularity>().unwrap(), *g);
        }
        assert!("14".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_granularity_default_and_labels() {
        assert_eq!(Granularity::default(), Granularity::Days7);
        assert_eq!(Granularity::Hour1.label(), "1 Hour");
        assert!(Granularity::Hours24.shows_time_of_day());
        assert!(!Granularity::Days30.shows_time_of_day());
    }
}
