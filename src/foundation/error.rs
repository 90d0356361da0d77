pub type CanvasResult<T> = Result<T, CanvasError>;

#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    #[error("template error: {0}")]
    Template(String),

    #[error("asset error: {0}")]
    Asset(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn snapshot(msg: impl Into<String>) -> Self {
        Self::Snapshot(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
