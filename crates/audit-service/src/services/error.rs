//! Service layer error types

use audit_common::AppError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// A required port was not supplied to the context builder
    MissingDependency(&'static str),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDependency(name) => write!(f, "{name} is required"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Get the error code for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDependency(_) => "MISSING_DEPENDENCY",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingDependency(name) => {
                AppError::Client(format!("{name} is required"))
            }
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
