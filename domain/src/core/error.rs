//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid rating: {0}")]
    InvalidRating(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rating_display() {
        let error = DomainError::InvalidRating("stars must be 1-5, got 0".to_string());
        assert_eq!(error.to_string(), "Invalid rating: stars must be 1-5, got 0");
    }

    #[test]
    fn test_invalid_transition_display() {
        let error = DomainError::InvalidTransition("done -> running".to_string());
        assert_eq!(error.to_string(), "Invalid status transition: done -> running");
    }
}
