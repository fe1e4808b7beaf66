//! # Render Configuration
//!
//! The host hands parameters over as a loose JSON bag (`pparams`). Exactly two
//! keys are recognized, `background_color` and `dots_color`, each an RGB
//! triple. They are validated here, once, and everything downstream works
//! with the typed [`PolkaConfig`].
//!
//! ## Usage
//!
//! ```
//! use polkadots::config::{PolkaConfig, Rgb};
//! use serde_json::json;
//!
//! let config = PolkaConfig::from_params(&json!({
//!     "background_color": [255, 255, 255],
//!     "dots_color": [200, 0, 40],
//! }))?;
//!
//! assert_eq!(config.dots_color, Rgb([200, 0, 40]));
//! # Ok::<(), polkadots::PolkaError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolkaError;

/// An RGB color triple, 0-255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "[u8; 3]")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Build a color from an arbitrary list of channel values.
    ///
    /// Fails unless there are exactly three values, each in `0..=255`.
    pub fn from_channels(channels: &[i64]) -> Result<Self, PolkaError> {
        check_channels(channels).map_err(PolkaError::InvalidColor)
    }
}

fn check_channels(channels: &[i64]) -> Result<Rgb, String> {
    let [r, g, b] = channels else {
        return Err(format!("expected 3 channels, got {}", channels.len()));
    };

    let channel =
        |v: i64| u8::try_from(v).map_err(|_| format!("channel value {} outside 0..=255", v));

    Ok(Rgb([channel(*r)?, channel(*g)?, channel(*b)?]))
}

impl TryFrom<Vec<i64>> for Rgb {
    type Error = String;

    fn try_from(channels: Vec<i64>) -> Result<Self, Self::Error> {
        check_channels(&channels)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.0
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb(color.0)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Parses either `r,g,b` (decimal) or `#rrggbb` (hex).
impl FromStr for Rgb {
    type Err = PolkaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(PolkaError::InvalidColor(format!(
                    "'{}' is not a #rrggbb color",
                    s
                )));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|e| PolkaError::InvalidColor(format!("'{}': {}", s, e)))
            };
            return Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]));
        }

        let channels = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i64>()
                    .map_err(|e| PolkaError::InvalidColor(format!("'{}': {}", part.trim(), e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_channels(&channels)
    }
}

/// Validated render options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolkaConfig {
    /// Canvas fill, visible wherever no dot lands.
    pub background_color: Rgb,
    /// Fill color of every dot.
    pub dots_color: Rgb,
}

impl PolkaConfig {
    pub fn new(background_color: Rgb, dots_color: Rgb) -> Self {
        Self {
            background_color,
            dots_color,
        }
    }

    /// Validate the host's parameter bag.
    ///
    /// Unknown keys are ignored. A missing key, a non-integer channel, a
    /// triple of the wrong length, or a channel outside `0..=255` is an
    /// [`PolkaError::InvalidColor`].
    pub fn from_params(params: &serde_json::Value) -> Result<Self, PolkaError> {
        Self::deserialize(params).map_err(|e| PolkaError::InvalidColor(e.to_string()))
    }
}

impl Default for PolkaConfig {
    fn default() -> Self {
        Self::new(Rgb::WHITE, Rgb::BLACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_params_valid() {
        let config = PolkaConfig::from_params(&json!({
            "background_color": [10, 20, 30],
            "dots_color": [0, 0, 255],
            "unrelated": true,
        }))
        .unwrap();
        assert_eq!(config.background_color, Rgb([10, 20, 30]));
        assert_eq!(config.dots_color, Rgb([0, 0, 255]));
    }

    #[test]
    fn test_from_params_wrong_arity() {
        for bad in [json!([1, 2]), json!([1, 2, 3, 4]), json!([])] {
            let err = PolkaConfig::from_params(&json!({
                "background_color": bad,
                "dots_color": [0, 0, 0],
            }))
            .unwrap_err();
            assert!(matches!(err, PolkaError::InvalidColor(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_from_params_out_of_range() {
        for bad in [json!([0, 256, 0]), json!([-1, 0, 0]), json!([0.5, 0, 0])] {
            let err = PolkaConfig::from_params(&json!({
                "background_color": [255, 255, 255],
                "dots_color": bad,
            }))
            .unwrap_err();
            assert!(matches!(err, PolkaError::InvalidColor(_)), "{:?}", err);
        }
    }

    #[test]
    fn test_from_params_missing_key() {
        let err = PolkaConfig::from_params(&json!({ "background_color": [1, 2, 3] })).unwrap_err();
        assert!(err.to_string().contains("dots_color"), "{}", err);
    }

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!("255, 128,0".parse::<Rgb>().unwrap(), Rgb([255, 128, 0]));
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb([255, 128, 0]));
        assert!("#ff80".parse::<Rgb>().is_err());
        assert!("#+f+f+f".parse::<Rgb>().is_err());
        assert!("#-1ff00".parse::<Rgb>().is_err());
        assert!("1,2".parse::<Rgb>().is_err());
        assert!("1,2,300".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_roundtrips_hex() {
        let color = Rgb([1, 171, 255]);
        assert_eq!(color.to_string(), "#01abff");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }
}
