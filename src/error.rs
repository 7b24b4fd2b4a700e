pub type ScrollcueResult<T> = Result<T, ScrollcueError>;

#[derive(thiserror::Error, Debug)]
pub enum ScrollcueError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("observer error: {0}")]
    Observer(String),

    #[error("timeline error: {0}")]
    Timeline(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollcueError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn observer(msg: impl Into<String>) -> Self {
        Self::Observer(msg.into())
    }

    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
