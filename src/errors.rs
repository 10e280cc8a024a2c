use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, validation, missing records) or downstream layers (DB, disk).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Carries the methods the route does accept, for the `Allow` header.
    #[error("Method Not Allowed")]
    MethodNotAllowed(&'static str),

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound(_) => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::MethodNotAllowed(_) => 405,
            ServerError::DbError(_) | ServerError::Io(_) | ServerError::InternalError => 500,
        }
    }

    /// Message safe to show a client. Server-side faults are never detailed.
    pub fn public_message(&self) -> String {
        match self {
            ServerError::NotFound(msg) | ServerError::BadRequest(msg) => msg.clone(),
            ServerError::MethodNotAllowed(_) => "Method not allowed".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
