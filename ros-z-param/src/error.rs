//! Error types for parameter stores and their JSON codec

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A value or requested element type lacks the `ParameterLike` capability set.
    #[error("parameter(s) must implement ParameterLike: {0}")]
    InvalidElementType(String),

    /// Decode was handed a payload that is neither an object nor an array.
    #[error("ParameterStore expects an object/array of parameters: {0}")]
    InvalidInputShape(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_element_type(detail: impl Into<String>) -> Self {
        Self::InvalidElementType(detail.into())
    }

    pub fn invalid_input_shape(detail: impl Into<String>) -> Self {
        Self::InvalidInputShape(detail.into())
    }
}
