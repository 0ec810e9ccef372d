//! Result type alias for the marker factory

use super::errors::FactoryError;

/// Result type alias for factory operations
///
/// # Examples
///
/// ```
/// use obfuscation_markers::domain::result::Result;
/// use obfuscation_markers::domain::errors::FactoryError;
///
/// fn failing_function() -> Result<()> {
///     Err(FactoryError::InvalidMarker("fixed total length too small".to_string()))
/// }
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, FactoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FactoryError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(FactoryError::NullReference("value"));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
