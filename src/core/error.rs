use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovementError {
    #[error("Invalid coordinate label: {0:?}")]
    InvalidCoordinate(String),

    #[error("Invalid footprint size: {0:?}")]
    InvalidSize(String),

    #[error("Unknown unit type: {0}")]
    UnknownUnitType(String),

    #[error("Unknown figure: {0}")]
    UnknownFigure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MovementError>;
