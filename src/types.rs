//! Shared types used across PIXELENHANCE.
//! Holds the closed set of resolution tiers offered to the user.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Target resolution tier. The label parameterizes the enhancement
/// instruction only; the service makes no pixel-dimension promise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug, Serialize, Deserialize)]
pub enum Resolution {
    #[value(name = "144p")]
    #[serde(rename = "144p")]
    P144,
    #[value(name = "220p")]
    #[serde(rename = "220p")]
    P220,
    #[value(name = "360p")]
    #[serde(rename = "360p")]
    P360,
    #[value(name = "480p")]
    #[serde(rename = "480p")]
    P480,
    #[value(name = "720p")]
    #[serde(rename = "720p")]
    P720,
    #[value(name = "1080p")]
    #[serde(rename = "1080p")]
    P1080,
    #[value(name = "2160p")]
    #[serde(rename = "2160p")]
    P2160,
}

impl Resolution {
    /// All tiers in presentation order.
    pub const ALL: [Resolution; 7] = [
        Resolution::P144,
        Resolution::P220,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P2160,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Resolution::P144 => "144p",
            Resolution::P220 => "220p",
            Resolution::P360 => "360p",
            Resolution::P480 => "480p",
            Resolution::P720 => "720p",
            Resolution::P1080 => "1080p",
            Resolution::P2160 => "2160p",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Resolution::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidResolution(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered_low_to_high() {
        let labels: Vec<&str> = Resolution::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            ["144p", "220p", "360p", "480p", "720p", "1080p", "2160p"]
        );
        assert!(Resolution::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn parses_labels_verbatim() {
        for tier in Resolution::ALL {
            assert_eq!(tier.label().parse::<Resolution>().unwrap(), tier);
        }
        assert_eq!("1080P".parse::<Resolution>().unwrap(), Resolution::P1080);
        assert!(matches!(
            "4k".parse::<Resolution>(),
            Err(Error::InvalidResolution(ref s)) if s == "4k"
        ));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&Resolution::P720).unwrap();
        assert_eq!(json, "\"720p\"");
        let back: Resolution = serde_json::from_str("\"2160p\"").unwrap();
        assert_eq!(back, Resolution::P2160);
    }
}
