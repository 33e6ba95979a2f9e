use thiserror::Error;

/// Errors raised while scoring comparables against a base property
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// Tolerance and max-diff percentages coincide, leaving no interval to interpolate over
    #[error(
        "degenerate tolerance for {feature}: tolerance and max diff are both {tolerance_percentage} (base value {base})"
    )]
    DegenerateTolerance {
        feature: &'static str,
        base: f64,
        tolerance_percentage: f64,
    },

    #[error("invalid scoring configuration: {0}")]
    InvalidConfig(String),
}

/// Errors produced while turning a loosely-typed listing record into a `Property`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field `{field}` must not be negative: {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("condition must be between 1 and 4, got {0}")]
    ConditionOutOfRange(f64),

    #[error("unknown property type {0:?}")]
    UnknownPropertyType(String),
}
