use derive_more::Display;

/// Every way a chart load can fail. The dashboard treats them all as one
/// "fetch failed" outcome; the variant only feeds the diagnostic log.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "HTTP Error: {} {}", status, status_text)]
    HttpStatus { status: u16, status_text: String },
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
}

impl std::error::Error for AppError {}

impl AppError {
    /// True for the failures that come out of the data loader
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::HttpStatus { .. } | AppError::Decode(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Decode(error.to_string())
    }
}

pub type NetworkResult<T> = Result<T, AppError>;
pub type RenderingResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display() {
        let err = AppError::HttpStatus { status: 500, status_text: "Internal Server Error".into() };
        assert_eq!(err.to_string(), "HTTP Error: 500 Internal Server Error");
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn json_errors_become_decode_failures() {
        let err: AppError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, AppError::Decode(_)));
        assert!(!AppError::Rendering("no canvas".into()).is_fetch_failure());
    }
}
