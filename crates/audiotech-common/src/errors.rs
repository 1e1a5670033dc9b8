use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image is empty: {0}")]
    Empty(PathBuf),

    #[error("not an image: {0}")]
    NotAnImage(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AudioTechError {
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("assistant.temperature = 3 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: assistant.temperature = 3 is out of range"
        );
    }

    #[test]
    fn attachment_error_display() {
        let err = AttachmentError::Empty(PathBuf::from("/tmp/shot.png"));
        assert_eq!(err.to_string(), "image is empty: /tmp/shot.png");

        let err = AttachmentError::NotAnImage("notes.txt".into());
        assert_eq!(err.to_string(), "not an image: notes.txt");

        let err = AttachmentError::Read {
            path: PathBuf::from("/tmp/gone.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("could not read image /tmp/gone.jpg"));
    }

    #[test]
    fn audiotech_error_from_attachment() {
        let attach_err = AttachmentError::InvalidDataUrl("data:,".into());
        let err: AudioTechError = attach_err.into();
        assert!(matches!(err, AudioTechError::Attachment(_)));
        assert!(err.to_string().contains("data:,"));
    }

    #[test]
    fn audiotech_error_other_variants() {
        let err = AudioTechError::Ai("model unavailable".into());
        assert_eq!(err.to_string(), "ai error: model unavailable");

        let err = AudioTechError::Terminal("raw mode refused".into());
        assert_eq!(err.to_string(), "terminal error: raw mode refused");

        let err = AudioTechError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
