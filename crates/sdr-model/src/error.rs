use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown format: {token}")]
    UnknownFormat { token: String },

    #[error("field {name}: {message}")]
    InvalidField { name: String, message: String },

    #[error("duplicate field name: {name}")]
    DuplicateField { name: String },

    #[error("line length must be positive")]
    InvalidLineLength,
}

pub type Result<T> = std::result::Result<T, ModelError>;
