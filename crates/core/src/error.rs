use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("URL must not be empty")]
    EmptyUrl,

    #[error("Contract violation: {0}")]
    Contract(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = CoreError::Contract("confidence 1.4 outside [0, 1]".to_string());
        assert!(error.to_string().contains("confidence 1.4"));
        assert_eq!(CoreError::EmptyUrl.to_string(), "URL must not be empty");
    }
}
