use crate::error::WebhookError;

/// Parses a threshold string: optional sign followed by decimal digits.
/// Whitespace is not trimmed.
pub fn parse_threshold(field: &'static str, value: &str) -> Result<i64, WebhookError> {
    value
        .parse::<i64>()
        .map_err(|source| WebhookError::InvalidThreshold {
            field,
            value: value.to_string(),
            source,
        })
}

/// Parses an optional threshold, keeping `None` as "no bound".
pub fn parse_optional_threshold(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<i64>, WebhookError> {
    value.map(|v| parse_threshold(field, v)).transpose()
}
