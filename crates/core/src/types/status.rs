//! Order status enum.

use serde::{Deserialize, Serialize};

/// Outcome state of a checkout attempt.
///
/// `Pending` until the payment collaborator reports otherwise; `Succeeded`
/// after a verified payment; `Failed` when the shopper lands on the failure
/// page and the order is marked failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl OrderStatus {
    /// The wire token for this status (e.g. `"failed"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "succeeded" => Ok(Self::Succeeded),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_token() {
        assert_eq!(OrderStatus::Failed.as_str(), "failed");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn test_from_str_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Succeeded,
            OrderStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
