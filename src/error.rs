use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unable to parse recommendations from the response")]
    UnparsableResponse { raw: String },
}

impl ParseError {
    pub fn raw(&self) -> &str {
        match self {
            ParseError::UnparsableResponse { raw } => raw,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("location coordinates are required for recommendations")]
    MissingLocation,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("recommendation webhook failed: {0}")]
    Webhook(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::MissingLocation => {
                "Please enable location access for accurate recommendations".to_string()
            }
            ServiceError::Parse(_) => {
                "Unable to parse recommendations from the response. Please try again.".to_string()
            }
            ServiceError::Webhook(_) => "Failed to fetch recommendations".to_string(),
            other => other.to_string(),
        }
    }
}
