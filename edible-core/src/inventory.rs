use serde::{Deserialize, Serialize};

/// Status text returned by the stock decrement procedure.
///
/// The procedure reports its outcome as free text. A status counts as
/// applied only when it carries a success marker and no failure marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecrementStatus(pub String);

const FAILURE_MARKERS: [&str; 5] = ["error", "fail", "unsuccessful", "insufficient", "not found"];

impl DecrementStatus {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn is_success(&self) -> bool {
        let text = self.0.to_ascii_lowercase();
        text.contains("success") && !FAILURE_MARKERS.iter().any(|m| text.contains(m))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_markers() {
        assert!(DecrementStatus::new("SUCCESS: stock updated").is_success());
        assert!(!DecrementStatus::new("ERROR: insufficient stock").is_success());
        assert!(!DecrementStatus::new("unsuccessful").is_success());
        assert!(!DecrementStatus::new("success=false: product not found").is_success());
        assert!(!DecrementStatus::new("").is_success());
    }
}
