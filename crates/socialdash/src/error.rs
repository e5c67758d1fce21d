//! Application-wide error types using thiserror.

use socialdash_common::DashError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Loading, integration or rendering failed.
    #[error(transparent)]
    Dashboard(#[from] DashError),

    /// I/O error while writing the page.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the sources could be read but not joined.
    pub const fn is_data_shape(&self) -> bool {
        matches!(self, Self::Dashboard(err) if err.is_data_shape())
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_shape_detection() {
        let err = AppError::from(DashError::data_shape("no posts"));
        assert!(err.is_data_shape());
        assert!(err.to_string().contains("no posts"));

        let err = AppError::from(std::io::Error::other("disk full"));
        assert!(!err.is_data_shape());
    }
}
