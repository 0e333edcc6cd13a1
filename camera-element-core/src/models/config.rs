use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ElementError;

/// Which physical camera the element binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSelector {
    Front,
    #[default]
    Back,
}

impl DeviceSelector {
    /// The opposite lens, used by `switchCamera`.
    pub fn toggled(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl FromStr for DeviceSelector {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            other => Err(ElementError::InvalidProp(format!("unknown device: {}", other))),
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared flash behaviour.
///
/// `Torch` keeps the light on continuously and disables flash-on-capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashMode {
    #[default]
    Auto,
    On,
    Off,
    Torch,
}

impl FlashMode {
    /// Lenient parse used for host props: anything unrecognised is `Auto`.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "on" => Self::On,
            "off" => Self::Off,
            "torch" => Self::Torch,
            "auto" => Self::Auto,
            other => {
                log::warn!("Unknown flash mode {:?}, falling back to auto", other);
                Self::Auto
            }
        }
    }
}

/// Declared focus behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusMode {
    Auto,
    /// Arms the touch listener: a touch-down focuses and meters at that point.
    Tap,
    #[default]
    Continuous,
}

impl FocusMode {
    /// Lenient parse used for host props: anything unrecognised is `Continuous`.
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "auto" => Self::Auto,
            "tap" => Self::Tap,
            "continuous" => Self::Continuous,
            other => {
                log::warn!("Unknown focus mode {:?}, falling back to continuous", other);
                Self::Continuous
            }
        }
    }
}

/// Declarative prop state of one camera element.
///
/// Mutated only through the element's prop setters; the control applier
/// re-applies it verbatim after every bind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementConfig {
    pub device: DeviceSelector,
    pub flash_mode: FlashMode,
    pub focus_mode: FocusMode,
    /// Requested zoom ratio. Clamped to the hardware range only when applied.
    pub zoom: f32,
    pub enable_torch: bool,
}

impl ElementConfig {
    /// Whether continuous illumination should be on.
    pub fn torch_on(&self) -> bool {
        self.flash_mode == FlashMode::Torch || self.enable_torch
    }
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            device: DeviceSelector::Back,
            flash_mode: FlashMode::Auto,
            focus_mode: FocusMode::Continuous,
            zoom: 1.0,
            enable_torch: false,
        }
    }
}

/// Options fixed at element construction.
#[derive(Debug, Clone)]
pub struct ElementOptions {
    /// Directory where captured stills are written.
    pub output_directory: PathBuf,

    /// File name prefix for captured stills (default: "camera").
    pub file_prefix: String,

    /// How long the tap-focus ring stays visible (default: 900 ms).
    pub focus_ring_duration: Duration,

    /// Start provider acquisition at construction when permission is
    /// already granted (default: true).
    pub prewarm_provider: bool,
}

impl ElementOptions {
    pub fn validate(&self) -> Result<(), String> {
        if self.file_prefix.trim().is_empty() {
            return Err("file prefix must not be empty".into());
        }
        if self.focus_ring_duration.is_zero() {
            return Err("focus ring duration must be positive".into());
        }
        Ok(())
    }
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            output_directory: std::env::temp_dir(),
            file_prefix: "camera".into(),
            focus_ring_duration: Duration::from_millis(900),
            prewarm_provider: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_element_defaults() {
        let config = ElementConfig::default();
        assert_eq!(config.device, DeviceSelector::Back);
        assert_eq!(config.flash_mode, FlashMode::Auto);
        assert_eq!(config.focus_mode, FocusMode::Continuous);
        assert_eq!(config.zoom, 1.0);
        assert!(!config.enable_torch);
    }

    #[test]
    fn device_parse_rejects_unknown() {
        assert_eq!("front".parse::<DeviceSelector>().unwrap(), DeviceSelector::Front);
        assert!(matches!(
            "side".parse::<DeviceSelector>(),
            Err(ElementError::InvalidProp(_))
        ));
    }

    #[test]
    fn lenient_parses_fall_back() {
        assert_eq!(FlashMode::parse_lenient("torch"), FlashMode::Torch);
        assert_eq!(FlashMode::parse_lenient("strobe"), FlashMode::Auto);
        assert_eq!(FocusMode::parse_lenient("tap"), FocusMode::Tap);
        assert_eq!(FocusMode::parse_lenient("manual"), FocusMode::Continuous);
    }

    #[test]
    fn torch_is_or_of_mode_and_flag() {
        let mut config = ElementConfig::default();
        assert!(!config.torch_on());
        config.enable_torch = true;
        assert!(config.torch_on());
        config.enable_torch = false;
        config.flash_mode = FlashMode::Torch;
        assert!(config.torch_on());
    }

    #[test]
    fn config_serializes_lowercase() {
        let json = serde_json::to_value(ElementConfig::default()).unwrap();
        assert_eq!(json["device"], "back");
        assert_eq!(json["flashMode"], "auto");
        assert_eq!(json["focusMode"], "continuous");
    }

    #[test]
    fn options_validate() {
        assert!(ElementOptions::default().validate().is_ok());
        let bad = ElementOptions {
            file_prefix: " ".into(),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = ElementOptions {
            focus_ring_duration: Duration::ZERO,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
