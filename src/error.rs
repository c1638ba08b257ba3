pub type SpriteResult<T> = Result<T, SpriteError>;

#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    #[error("decode error: {0}")]
    Decode(String),

    #[error("invalid orientation code {code} (line {line}, part {part})")]
    InvalidOrientation {
        line: usize,
        part: usize,
        code: i32,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty animation: no step produced visible content")]
    EmptyAnimation,

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            SpriteError::decode("x")
                .to_string()
                .contains("decode error:")
        );
        assert!(
            SpriteError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            SpriteError::encode("x")
                .to_string()
                .contains("encode error:")
        );
    }

    #[test]
    fn invalid_orientation_names_source_location() {
        let err = SpriteError::InvalidOrientation {
            line: 3,
            part: 1,
            code: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains("code 7"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("part 1"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = SpriteError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
