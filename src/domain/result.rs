//! Result type alias for the SDK

use super::errors::AthenaError;

/// Result type alias for SDK operations
///
/// # Examples
///
/// ```
/// use athena_sdk::domain::result::Result;
/// use athena_sdk::domain::errors::AthenaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AthenaError::Decode("unexpected payload".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AthenaError>;

#[cfg(test)]
mod tests {
    use super::*;

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
