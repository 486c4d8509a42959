use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatinaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required layer: {id}")]
    MissingLayer { id: String },

    #[error("Layer manifest has no decay layers")]
    NoDecayLayers,

    #[error("Decay layer count ({layers}) does not match threshold count ({thresholds})")]
    LayerCountMismatch { thresholds: usize, layers: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, PatinaError>;
