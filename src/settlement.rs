use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::CollectorIdentity;
use crate::decimal::Money;
use crate::errors::{CreditError, Result};
use crate::fees;
use crate::ledger::{CreditLedger, NewPayment};
use crate::types::{CreditId, CreditStatus, PaymentId};

/// a collector's intent to record one payment against a credit
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub credit_id: CreditId,
    pub payment_date: NaiveDate,
    pub amount: Money,
    pub note: Option<String>,
    /// caller-generated token; resubmitting the same token is rejected
    /// instead of producing a second payment row
    pub request_token: Option<Uuid>,
}

/// outcome of a settled payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentResult {
    pub payment_id: PaymentId,
    pub penalty: Money,
    pub interest: Money,
    pub total_paid: Money,
    pub new_remaining: Money,
    pub new_status: CreditStatus,
}

/// settlement engine
///
/// Orchestrates a single payment event: validates the intent, assesses
/// penalty and interest, and applies the payment-insert plus credit-update
/// pair atomically through the ledger.
pub struct SettlementEngine<L: CreditLedger> {
    ledger: L,
}

impl<L: CreditLedger> SettlementEngine<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// record a payment against a credit owned by the calling collector.
    ///
    /// Validation and fee assessment happen before the transaction opens;
    /// the fee inputs (due date, total amount) are immutable on the credit
    /// row, so only the remaining balance has to be re-read under the
    /// transaction. A failed call leaves the ledger untouched.
    pub fn record_payment(
        &self,
        collector: &CollectorIdentity,
        intent: PaymentIntent,
        time_provider: &SafeTimeProvider,
    ) -> Result<PaymentResult> {
        if !intent.amount.is_positive() {
            return Err(CreditError::InvalidAmount { amount: intent.amount });
        }

        let today = time_provider.now().date_naive();
        if intent.payment_date > today {
            return Err(CreditError::InvalidDate {
                message: format!("payment date {} is in the future", intent.payment_date),
            });
        }

        let credit = self
            .ledger
            .find_credit(intent.credit_id)?
            .ok_or(CreditError::NotFoundOrUnauthorized)?;
        if credit.collector_id != collector.collector_id {
            return Err(CreditError::NotFoundOrUnauthorized);
        }
        if !credit.status.accepts_payments() {
            return Err(CreditError::CreditClosed { status: credit.status });
        }

        // interest always runs against the original total, not the balance
        let fees = fees::assess(credit.due_date, intent.payment_date, credit.total_amount);
        let total_paid = intent.amount + fees.total();
        let now = time_provider.now();

        let result = self.ledger.in_transaction(|tx| {
            let current = tx.credit_for_update(intent.credit_id)?;
            if current.collector_id != collector.collector_id {
                return Err(CreditError::NotFoundOrUnauthorized);
            }
            if !current.status.accepts_payments() {
                return Err(CreditError::CreditClosed { status: current.status });
            }

            let payment_id = tx.insert_payment(&NewPayment {
                credit_id: intent.credit_id,
                payment_date: intent.payment_date,
                amount: intent.amount,
                penalty: fees.penalty.amount,
                interest: fees.interest.amount,
                total_paid,
                notes: intent.note.clone(),
                request_token: intent.request_token,
                created_at: now,
            })?;

            let new_remaining = (current.remaining_amount - total_paid).max(Money::ZERO);
            let new_status = if new_remaining.is_zero() {
                CreditStatus::Paid
            } else {
                current.status
            };
            tx.update_credit_balance(intent.credit_id, new_remaining, new_status)?;

            Ok(PaymentResult {
                payment_id,
                penalty: fees.penalty.amount,
                interest: fees.interest.amount,
                total_paid,
                new_remaining,
                new_status,
            })
        });

        match &result {
            Ok(settled) => {
                debug!(
                    credit_id = %intent.credit_id,
                    total_paid = %settled.total_paid,
                    new_remaining = %settled.new_remaining,
                    "payment settled"
                );
            }
            Err(CreditError::Storage { message }) => {
                error!(credit_id = %intent.credit_id, %message, "settlement transaction failed");
            }
            Err(_) => {}
        }

        result
    }
}
