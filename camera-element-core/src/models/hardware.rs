use super::config::FlashMode;

/// Hardware-reported zoom ratio bounds for the bound device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl ZoomRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a requested ratio into `[min, max]`.
    ///
    /// Never panics on an inverted range reported by a misbehaving driver:
    /// the lower bound wins.
    pub fn clamp(&self, requested: f32) -> f32 {
        requested.min(self.max).max(self.min)
    }
}

/// Flash mode of the still-capture pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureFlash {
    Auto,
    On,
    Off,
}

impl From<FlashMode> for CaptureFlash {
    fn from(mode: FlashMode) -> Self {
        match mode {
            FlashMode::On => Self::On,
            // torch and flash-on-capture are mutually exclusive
            FlashMode::Off | FlashMode::Torch => Self::Off,
            FlashMode::Auto => Self::Auto,
        }
    }
}

/// Capture pipeline tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    MinimizeLatency,
    MaximizeQuality,
}

/// The render target the preview use-case draws into.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSurface {
    pub id: String,
    pub width: f32,
    pub height: f32,
}

impl PreviewSurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Preview + still-capture use-cases bound together in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseSet {
    pub preview: PreviewSurface,
    pub capture_mode: CaptureMode,
}

/// Normalized focus/metering coordinate in `[0, 1]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteringPoint {
    pub x: f32,
    pub y: f32,
}

impl MeteringPoint {
    /// Map view-local pixel coordinates onto the preview surface.
    ///
    /// A surface that has not been laid out yet maps to the centre.
    pub fn from_view(x: f32, y: f32, surface: &PreviewSurface) -> Self {
        if surface.width <= 0.0 || surface.height <= 0.0 {
            return Self { x: 0.5, y: 0.5 };
        }
        Self {
            x: (x / surface.width).clamp(0.0, 1.0),
            y: (y / surface.height).clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn zoom_clamps_into_range() {
        let range = ZoomRange::new(1.0, 8.0);
        assert_relative_eq!(range.clamp(50.0), 8.0);
        assert_relative_eq!(range.clamp(0.2), 1.0);
        assert_relative_eq!(range.clamp(2.5), 2.5);
    }

    #[test]
    fn inverted_range_does_not_panic() {
        let range = ZoomRange::new(2.0, 1.0);
        assert_relative_eq!(range.clamp(5.0), 2.0);
    }

    #[test]
    fn torch_disables_capture_flash() {
        assert_eq!(CaptureFlash::from(FlashMode::Torch), CaptureFlash::Off);
        assert_eq!(CaptureFlash::from(FlashMode::On), CaptureFlash::On);
        assert_eq!(CaptureFlash::from(FlashMode::Auto), CaptureFlash::Auto);
    }

    #[test]
    fn metering_point_normalizes() {
        let surface = PreviewSurface {
            id: "preview".into(),
            width: 400.0,
            height: 800.0,
        };
        let point = MeteringPoint::from_view(100.0, 600.0, &surface);
        assert_relative_eq!(point.x, 0.25);
        assert_relative_eq!(point.y, 0.75);

        let outside = MeteringPoint::from_view(-10.0, 900.0, &surface);
        assert_relative_eq!(outside.x, 0.0);
        assert_relative_eq!(outside.y, 1.0);
    }

    #[test]
    fn unsized_surface_meters_centre() {
        let point = MeteringPoint::from_view(10.0, 10.0, &PreviewSurface::new("p"));
        assert_relative_eq!(point.x, 0.5);
        assert_relative_eq!(point.y, 0.5);
    }
}
