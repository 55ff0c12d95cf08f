use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackAlignError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid axis: {0}")]
    InvalidAxis(String),

    #[error("Unknown values within images: {0} unknowns")]
    NanInsideHypercube(usize),

    #[error("Wrong reference: {0}")]
    WrongReference(String),

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Empty image stack")]
    EmptyStack,
}

pub type Result<T> = std::result::Result<T, StackAlignError>;
