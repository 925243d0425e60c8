use thiserror::Error;

/// Contract violations caught before a record reaches the scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("`errorHandling.errorStateCount` must be between 0 and {max}, got {0}", max = u32::MAX)]
    ErrorStateCountOutOfRange(i64),

    #[error("component name must not be blank")]
    BlankName,

    #[error("unknown template `{0}`")]
    UnknownTemplate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = ValidationError::MissingField("confidenceHandling.hasAmbiguityStates");
        assert_eq!(
            err.to_string(),
            "missing field `confidenceHandling.hasAmbiguityStates`"
        );

        let err = ValidationError::ErrorStateCountOutOfRange(-2);
        assert_eq!(
            err.to_string(),
            "`errorHandling.errorStateCount` must be between 0 and 4294967295, got -2"
        );

        let err = ValidationError::ErrorStateCountOutOfRange(i64::from(u32::MAX) + 1);
        assert!(err.to_string().ends_with("got 4294967296"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = ValidationError::BlankName.into();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }
}
