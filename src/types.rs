use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a client
pub type ClientId = Uuid;

/// unique identifier for a product
pub type ProductId = Uuid;

/// unique identifier for a collector
pub type CollectorId = Uuid;

/// unique identifier for a credit
pub type CreditId = Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// credit status
///
/// Write paths only ever store `Active`, `Paid`, or `Cancelled`; `Overdue`
/// exists for rows written by earlier systems and for the read-time
/// projection in [`crate::credit::Credit::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditStatus {
    /// open and collectable
    Active,
    /// past its due date and still open
    Overdue,
    /// remaining amount reached zero
    Paid,
    /// closed without full collection
    Cancelled,
}

impl CreditStatus {
    /// check if new payments may be recorded against this status
    pub fn accepts_payments(&self) -> bool {
        matches!(self, CreditStatus::Active | CreditStatus::Overdue)
    }

    /// check if the credit has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, CreditStatus::Paid | CreditStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_statuses_accept_payments() {
        assert!(CreditStatus::Active.accepts_payments());
        assert!(CreditStatus::Overdue.accepts_payments());
        assert!(!CreditStatus::Paid.accepts_payments());
        assert!(!CreditStatus::Cancelled.accepts_payments());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CreditStatus::Active).unwrap(), "\"active\"");
        assert_eq!(serde_json::to_string(&CreditStatus::Paid).unwrap(), "\"paid\"");
    }
}
