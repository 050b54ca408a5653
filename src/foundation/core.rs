use crate::foundation::error::{ChartError, ChartResult};

pub use kurbo::Point;

/// Absolute 0-based frame index in the output sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::validation("canvas width/height must be non-zero"));
        }
        Ok(Self { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 100).is_err());
        assert!(Canvas::new(100, 0).is_err());
        assert!(Canvas::new(100, 100).is_ok());
    }

    #[test]
    fn frame_index_orders_numerically() {
        assert!(FrameIndex(1) < FrameIndex(2));
        assert_eq!(FrameIndex(7), FrameIndex(7));
    }
}
