use crate::foundation::error::{ChartError, ChartResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    /// Resolve a run-option identifier to a curve.
    pub fn from_name(name: &str) -> ChartResult<Self> {
        match name {
            "linear" => Ok(Self::Linear),
            "in-quad" => Ok(Self::InQuad),
            "out-quad" => Ok(Self::OutQuad),
            "in-out-quad" => Ok(Self::InOutQuad),
            "in-cubic" => Ok(Self::InCubic),
            "out-cubic" => Ok(Self::OutCubic),
            "in-out-cubic" => Ok(Self::InOutCubic),
            other => Err(ChartError::config(format!("easing not found: {other}"))),
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}
