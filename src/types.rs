use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub check_path: String,
    /// `None` counts pods across all namespaces.
    pub namespace: Option<String>,
    pub label_selector: Option<String>,
    pub request_timeout: Duration,
    pub fail_if_pods_unlistable: bool,
}

/// Body of a check request. Both bounds are decimal integer strings.
///
/// Keys match case-insensitively and a repeated key keeps its last value.
/// Unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub warning: Option<String>,
    pub critical: Option<String>,
}

impl<'de> Deserialize<'de> for CheckRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CheckRequestVisitor)
    }
}

struct CheckRequestVisitor;

impl<'de> Visitor<'de> for CheckRequestVisitor {
    type Value = CheckRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with optional \"warning\" and \"critical\" strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<CheckRequest, A::Error> {
        let mut req = CheckRequest::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("warning") {
                req.warning = map.next_value()?;
            } else if key.eq_ignore_ascii_case("critical") {
                req.critical = map.next_value()?;
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(req)
    }
}

impl CheckRequest {
    pub fn new(warning: Option<&str>, critical: Option<&str>) -> Self {
        Self {
            warning: warning.map(str::to_string),
            critical: critical.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    // Reserved, never produced by the evaluator
    Unknown = 3,
}

impl Severity {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

// Serialized as the bare integer code
impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResponse {
    pub code: Severity,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl CheckResponse {
    pub fn ok() -> Self {
        Self {
            code: Severity::Ok,
            message: String::new(),
        }
    }

    pub fn exceeded(code: Severity, threshold: i64) -> Self {
        Self {
            code,
            message: format!("More than \"{}\" pod exists", threshold),
        }
    }
}
