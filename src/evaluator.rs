use tracing::debug;

use crate::error::WebhookError;
use crate::parsing::parse_optional_threshold;
use crate::types::{CheckRequest, CheckResponse, Severity};

/// Classifies a pod count against optional bounds. Critical wins over warning.
pub fn evaluate(count: usize, warning: Option<i64>, critical: Option<i64>) -> CheckResponse {
    if let Some(limit) = critical {
        if exceeds(count, limit) {
            return CheckResponse::exceeded(Severity::Critical, limit);
        }
    }
    if let Some(limit) = warning {
        if exceeds(count, limit) {
            return CheckResponse::exceeded(Severity::Warning, limit);
        }
    }
    CheckResponse::ok()
}

/// Evaluates a raw request against `count`.
///
/// The critical bound is parsed and compared before the warning bound is
/// looked at, so a malformed warning is never reported once critical fires.
pub fn check(count: usize, req: &CheckRequest) -> Result<CheckResponse, WebhookError> {
    let critical = parse_optional_threshold("critical", req.critical.as_deref())?;
    let verdict = evaluate(count, None, critical);
    if verdict.code == Severity::Critical {
        debug!(count, ?critical, "critical threshold reached");
        return Ok(verdict);
    }

    let warning = parse_optional_threshold("warning", req.warning.as_deref())?;
    Ok(evaluate(count, warning, critical))
}

fn exceeds(count: usize, limit: i64) -> bool {
    // Negative limits are always met; counts beyond i64 are always over.
    match i64::try_from(count) {
        Ok(c) => c >= limit,
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_examples() {
        assert_eq!(
            evaluate(5, Some(3), Some(5)),
            CheckResponse {
                code: Severity::Critical,
                message: "More than \"5\" pod exists".to_string(),
            }
        );
        assert_eq!(
            evaluate(4, Some(3), Some(5)),
            CheckResponse {
                code: Severity::Warning,
                message: "More than \"3\" pod exists".to_string(),
            }
        );
        assert_eq!(evaluate(2, Some(3), Some(5)), CheckResponse::ok());
    }

    #[test]
    fn test_critical_takes_precedence() {
        // Warning is irrelevant once critical is met, even if it is higher
        for warning in [None, Some(0), Some(3), Some(100)] {
            assert_eq!(evaluate(10, warning, Some(10)).code, Severity::Critical);
        }
    }

    #[test]
    fn test_warning_only() {
        assert_eq!(evaluate(3, Some(3), None).code, Severity::Warning);
        assert_eq!(evaluate(7, Some(3), None).code, Severity::Warning);
        assert_eq!(evaluate(2, Some(3), None).code, Severity::Ok);
    }

    #[test]
    fn test_no_thresholds_is_ok() {
        for count in [0, 1, 1_000, usize::MAX] {
            assert_eq!(evaluate(count, None, None), CheckResponse::ok());
        }
    }

    #[test]
    fn test_zero_and_negative_limits() {
        assert_eq!(evaluate(0, None, Some(0)).code, Severity::Critical);
        assert_eq!(evaluate(0, Some(-1), None).code, Severity::Warning);
        assert_eq!(
            evaluate(0, None, Some(-4)).message,
            "More than \"-4\" pod exists"
        );
    }

    #[test]
    fn test_check_parses_and_evaluates() {
        let req = CheckRequest::new(Some("3"), Some("5"));
        assert_eq!(check(5, &req).unwrap().code, Severity::Critical);
        assert_eq!(check(4, &req).unwrap().code, Severity::Warning);
        assert_eq!(check(2, &req).unwrap(), CheckResponse::ok());
    }

    #[test]
    fn test_check_message_uses_parsed_value() {
        let req = CheckRequest::new(None, Some("007"));
        assert_eq!(
            check(9, &req).unwrap().message,
            "More than \"7\" pod exists"
        );
    }

    #[test]
    fn test_check_rejects_malformed_critical() {
        let req = CheckRequest::new(Some("3"), Some("abc"));
        let err = check(10, &req).unwrap_err();
        assert!(matches!(
            err,
            WebhookError::InvalidThreshold { field: "critical", .. }
        ));
    }

    #[test]
    fn test_check_rejects_malformed_warning_when_reached() {
        let req = CheckRequest::new(Some("abc"), Some("50"));
        let err = check(10, &req).unwrap_err();
        assert!(matches!(
            err,
            WebhookError::InvalidThreshold { field: "warning", .. }
        ));
    }

    #[test]
    fn test_check_skips_warning_once_critical_fires() {
        let req = CheckRequest::new(Some("abc"), Some("5"));
        assert_eq!(check(5, &req).unwrap().code, Severity::Critical);
    }
}
