//! Result of running a filter plugin against one node.
//!
//! A [`Status`] is a plain value: filters return it, the framework inspects
//! it, nothing signals rejection through `Err` or panics. Equality is
//! structural over the code and the ordered reasons.

use serde::Serialize;
use std::fmt;

/// Outcome class of a filter invocation, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Code {
    /// The node is admissible for this filter
    Success,
    /// The node is rejected now but may become admissible on a later attempt
    Unschedulable,
    /// The node is rejected and will stay rejected for the rest of this cycle;
    /// no further filters or later stages should consider it
    UnschedulableAndUnresolvable,
    /// The filter could not evaluate its rule
    Error,
}

impl Code {
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Success => "Success",
            Code::Unschedulable => "Unschedulable",
            Code::UnschedulableAndUnresolvable => "UnschedulableAndUnresolvable",
            Code::Error => "Error",
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity plus the reasons behind it.
///
/// Invariant: a `Success` status has no reasons, every other status has at
/// least one. All constructors enforce it and there are no mutators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Status {
    code: Code,
    reasons: Vec<String>,
}

impl Status {
    /// Build a status, normalizing reasons to uphold the invariant.
    ///
    /// Reasons passed with `Code::Success` are discarded; a non-success code
    /// with no reasons gets the code name as its single reason.
    pub fn new<I, S>(code: Code, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if code == Code::Success {
            return Self::success();
        }

        let mut reasons: Vec<String> = reasons.into_iter().map(Into::into).collect();
        if reasons.is_empty() {
            reasons.push(code.as_str().to_string());
        }

        Self { code, reasons }
    }

    pub fn success() -> Self {
        Self {
            code: Code::Success,
            reasons: Vec::new(),
        }
    }

    pub fn unschedulable(reason: impl Into<String>) -> Self {
        Self::new(Code::Unschedulable, [reason])
    }

    pub fn unresolvable(reason: impl Into<String>) -> Self {
        Self::new(Code::UnschedulableAndUnresolvable, [reason])
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self::new(Code::Error, [reason])
    }

    /// Wrap an evaluation failure as an `Error` status
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::error(err.to_string())
    }

    pub fn code(&self) -> Code {
        self.code
    }

    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Reasons joined with `", "`; empty for success
    pub fn message(&self) -> String {
        self.reasons.join(", ")
    }

    pub fn is_success(&self) -> bool {
        self.code == Code::Success
    }

    /// Deliberate rejection, either retryable or unresolvable
    pub fn is_rejected(&self) -> bool {
        matches!(
            self.code,
            Code::Unschedulable | Code::UnschedulableAndUnresolvable
        )
    }

    pub fn is_unresolvable(&self) -> bool {
        self.code == Code::UnschedulableAndUnresolvable
    }

    pub fn is_error(&self) -> bool {
        self.code == Code::Error
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reasons.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_never_carries_reasons() {
        let status = Status::new(Code::Success, ["ignored"]);
        assert!(status.reasons().is_empty());
        assert_eq!(status, Status::success());
        assert_eq!(Status::default(), Status::success());
        assert_eq!(status.to_string(), "Success");
    }

    #[test]
    fn test_non_success_always_has_a_reason() {
        let status = Status::new(Code::Unschedulable, Vec::<String>::new());
        assert_eq!(status.reasons(), ["Unschedulable"]);

        let status = Status::unresolvable("node is unschedulable");
        assert_eq!(status.code(), Code::UnschedulableAndUnresolvable);
        assert_eq!(status.reasons(), ["node is unschedulable"]);
    }

    #[test]
    fn test_equality_is_structural_and_order_sensitive() {
        let a = Status::new(Code::Unschedulable, ["Insufficient cpu", "Insufficient memory"]);
        let b = Status::new(Code::Unschedulable, ["Insufficient cpu", "Insufficient memory"]);
        let reordered = Status::new(Code::Unschedulable, ["Insufficient memory", "Insufficient cpu"]);
        let other_code = Status::new(
            Code::UnschedulableAndUnresolvable,
            ["Insufficient cpu", "Insufficient memory"],
        );

        assert_eq!(a, b);
        assert_ne!(a, reordered);
        assert_ne!(a, other_code);
    }

    #[test]
    fn test_predicates() {
        assert!(Status::success().is_success());
        assert!(Status::unschedulable("x").is_rejected());
        assert!(!Status::unschedulable("x").is_unresolvable());
        assert!(Status::unresolvable("x").is_rejected());
        assert!(Status::unresolvable("x").is_unresolvable());
        assert!(Status::error("x").is_error());
        assert!(!Status::error("x").is_rejected());
    }

    #[test]
    fn test_from_error_and_display() {
        let err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad quantity");
        let status = Status::from_error(&err);
        assert_eq!(status.code(), Code::Error);
        assert_eq!(status.to_string(), "Error: bad quantity");

        let status = Status::new(Code::Unschedulable, ["a", "b"]);
        assert_eq!(status.message(), "a, b");
    }

    #[test]
    fn test_code_severity_order() {
        assert!(Code::Success < Code::Unschedulable);
        assert!(Code::Unschedulable < Code::UnschedulableAndUnresolvable);
        assert!(Code::UnschedulableAndUnresolvable < Code::Error);
    }
}
