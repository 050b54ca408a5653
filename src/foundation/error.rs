pub type ChartResult<T> = Result<T, ChartError>;

#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("data error: {0}")]
    Data(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChartError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ChartError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ChartError::config("x")
                .to_string()
                .contains("configuration error:")
        );
        assert!(ChartError::data("x").to_string().contains("data error:"));
        assert!(
            ChartError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            ChartError::render("x")
                .to_string()
                .contains("render error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ChartError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
