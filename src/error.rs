use thiserror::Error;

#[derive(Debug, Error)]
pub enum NNError {
    // Configuration errors, fatal to construction
    #[error("Invalid activation function: {0}")]
    InvalidActivation(String),
    #[error("Invalid layer configuration: {0}")]
    InvalidLayerConfiguration(String),

    // Shape errors, raised before any state is touched
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),
    #[error("Invalid output shape: {0}")]
    InvalidOutputShape(String),
    #[error("Invalid weight shape: {0}")]
    InvalidWeightShape(String),
    #[error("No cached forward pass. Call forward() before backward()")]
    MissingForwardPass,

    // File operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NNError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            NNError::InvalidActivation(_) | NNError::InvalidLayerConfiguration(_)
        )
    }

    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            NNError::InvalidInputShape(_)
                | NNError::InvalidOutputShape(_)
                | NNError::InvalidWeightShape(_)
                | NNError::MissingForwardPass
        )
    }
}

pub type Result<T> = std::result::Result<T, NNError>;
