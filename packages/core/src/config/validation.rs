//! Configuration validation utilities

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidLimit` - if a budget is zero or exceeds its ceiling
    /// - `InvalidParameter` - if a parameter is outside its valid range
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a byte budget
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidLimit` if:
    /// - The budget is zero
    /// - The budget exceeds 1GB (1024³ bytes)
    pub fn validate_byte_limit(bytes: usize, name: &str) -> ConfigResult<()> {
        if bytes == 0 {
            return Err(ConfigurationError::InvalidLimit(format!(
                "{name} cannot be zero"
            )));
        }

        if bytes > 1024 * 1024 * 1024 {
            return Err(ConfigurationError::InvalidLimit(format!(
                "{name} cannot exceed 1GB"
            )));
        }

        Ok(())
    }

    /// Validate numeric range
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is outside
    /// the specified range [min, max] (inclusive).
    pub fn validate_range<T>(value: T, min: T, max: T, name: &str) -> ConfigResult<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} must be between {min} and {max}, got {value}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_limits() {
        assert!(ConfigValidator::validate_byte_limit(1, "limit").is_ok());
        assert_eq!(
            ConfigValidator::validate_byte_limit(0, "backtrack_limit"),
            Err(ConfigurationError::InvalidLimit(
                "backtrack_limit cannot be zero".to_string()
            ))
        );
        assert!(ConfigValidator::validate_byte_limit(usize::MAX, "limit").is_err());
    }

    #[test]
    fn ranges_are_inclusive() {
        assert!(ConfigValidator::validate_range(1u32, 1, 10, "depth").is_ok());
        assert!(ConfigValidator::validate_range(10u32, 1, 10, "depth").is_ok());
        let err = ConfigValidator::validate_range(11u32, 1, 10, "depth").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration parameter: depth must be between 1 and 10, got 11"
        );
    }
}
