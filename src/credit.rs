use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::decimal::Money;
use crate::types::{ClientId, CollectorId, CreditId, CreditStatus, PaymentId, ProductId};

/// an installment credit
///
/// Invariants: `remaining_amount >= 0`; a remaining amount of zero always
/// carries status `Paid`; `due_date` is derived from the purchase date and
/// never edited independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credit {
    pub id: CreditId,
    pub client_id: ClientId,
    pub product_id: ProductId,
    pub collector_id: CollectorId,
    pub purchase_date: NaiveDate,
    pub due_date: NaiveDate,
    pub total_amount: Money,
    pub remaining_amount: Money,
    pub status: CreditStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credit {
    /// open a new credit for the full product price
    pub fn open(
        client_id: ClientId,
        product_id: ProductId,
        collector_id: CollectorId,
        purchase_date: NaiveDate,
        total_amount: Money,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            product_id,
            collector_id,
            purchase_date,
            due_date: dates::due_date(purchase_date),
            total_amount,
            remaining_amount: total_amount,
            status: CreditStatus::Active,
            created_at: opened_at,
            updated_at: opened_at,
        }
    }

    /// check if the credit is past due as of the given day
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.status.accepts_payments() && self.due_date < today
    }

    /// status as reporting should display it.
    ///
    /// `Overdue` is a projection over the due date, not a stored
    /// transition: an open credit past its due date reads as overdue while
    /// the stored status stays whatever the write path last set.
    pub fn effective_status(&self, today: NaiveDate) -> CreditStatus {
        if self.is_past_due(today) {
            CreditStatus::Overdue
        } else {
            self.status
        }
    }
}

/// a recorded payment
///
/// Payments are append-only: once written they are never mutated or
/// deleted, forming the audit trail for the credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub credit_id: CreditId,
    pub payment_date: NaiveDate,
    pub amount: Money,
    pub penalty: Money,
    pub interest: Money,
    pub total_paid: Money,
    pub notes: Option<String>,
    pub request_token: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
