//! Error types.
//!
//! - `DemandError` is what the calculation engine returns. It only ever
//!   describes a rejected input; the engine has no other failure mode.
//! - `AppError` is what the binary reports: a message plus a process exit code.

/// Rejection reasons for a demand calculation or table lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemandError {
    /// A count was non-positive, the service temperature was at or below the
    /// cold-water baseline, or a field required by the selected variant was missing.
    InvalidInput(String),
    /// The tertiary-use category is not in the reference table.
    UnknownCategory(String),
}

impl DemandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        DemandError::InvalidInput(message.into())
    }
}

impl std::fmt::Display for DemandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemandError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            DemandError::UnknownCategory(name) => write!(f, "Unknown tertiary-use category '{name}'."),
        }
    }
}

impl std::error::Error for DemandError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DemandError> for AppError {
    fn from(value: DemandError) -> Self {
        AppError::new(2, value.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demand_errors_map_to_input_exit_code() {
        let err: AppError = DemandError::UnknownCategory("Spa".to_string()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'Spa'"));

        let err: AppError = DemandError::invalid("bedroom count must be >= 1").into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid input: bedroom count must be >= 1");
    }
}
