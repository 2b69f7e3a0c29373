use thiserror::Error;

#[derive(Error, Debug)]
pub enum SocialMatrixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Matrix dimension mismatch: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Person name must not be empty")]
    EmptyName,

    #[error("Person already exists: {0}")]
    DuplicatePerson(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("A person cannot befriend themselves: {0}")]
    SelfLoop(String),

    #[error("Friendship already exists: {from} - {to}")]
    DuplicateFriendship { from: String, to: String },

    #[error("Friendship not found: {from} - {to}")]
    FriendshipNotFound { from: String, to: String },

    #[error("No random names left for network {0}")]
    NamePoolExhausted(String),
}

pub type Result<T> = std::result::Result<T, SocialMatrixError>;
