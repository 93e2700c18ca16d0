pub mod memory;

pub use memory::{FailurePoint, MemoryLedger};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::credit::Credit;
use crate::decimal::Money;
use crate::errors::Result;
use crate::parties::{Client, Collector, Product};
use crate::types::{ClientId, CollectorId, CreditId, CreditStatus, PaymentId, ProductId};

/// payment row to be inserted by a settlement transaction
#[derive(Debug, Clone)]
pub struct NewPayment {
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

/// operations available inside a ledger transaction.
///
/// Every write in here either commits with the whole transaction or is
/// rolled back with it; no partial state is ever observable.
pub trait LedgerTx {
    /// load a credit for update; the row stays serialized against other
    /// transactions until this transaction finishes
    fn credit_for_update(&mut self, credit_id: CreditId) -> Result<Credit>;

    /// append a payment row; rejects a reused request token
    fn insert_payment(&mut self, payment: &NewPayment) -> Result<PaymentId>;

    /// update a credit's remaining amount and status
    fn update_credit_balance(
        &mut self,
        credit_id: CreditId,
        new_remaining: Money,
        new_status: CreditStatus,
    ) -> Result<()>;

    fn insert_client(&mut self, client: Client) -> Result<ClientId>;
    fn insert_product(&mut self, product: Product) -> Result<ProductId>;
    fn insert_collector(&mut self, collector: Collector) -> Result<CollectorId>;
    fn insert_credit(&mut self, credit: Credit) -> Result<CreditId>;

    fn find_client(&self, client_id: ClientId) -> Result<Option<Client>>;
    fn find_product(&self, product_id: ProductId) -> Result<Option<Product>>;
    fn find_collector(&self, collector_id: CollectorId) -> Result<Option<Collector>>;

    fn client_by_national_id(&self, national_id: &str) -> Result<Option<Client>>;
    fn product_by_name(&self, name: &str) -> Result<Option<Product>>;
    fn collector_by_email(&self, email: &str) -> Result<Option<Collector>>;
    fn collector_by_national_id(&self, national_id: &str) -> Result<Option<Collector>>;
}

/// durable store of credits and payment records.
///
/// Transactions serialize against each other per credit: a settlement that
/// re-reads a credit inside `in_transaction` always observes the previous
/// transaction's committed write, never a stale balance.
pub trait CreditLedger {
    /// read a credit outside any transaction
    fn find_credit(&self, credit_id: CreditId) -> Result<Option<Credit>>;

    /// read a collector by email outside any transaction
    fn find_collector_by_email(&self, email: &str) -> Result<Option<Collector>>;

    /// run `f` inside a transaction; an `Err` return rolls every write back
    fn in_transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T>;
}

impl<L: CreditLedger> CreditLedger for &L {
    fn find_credit(&self, credit_id: CreditId) -> Result<Option<Credit>> {
        (**self).find_credit(credit_id)
    }

    fn find_collector_by_email(&self, email: &str) -> Result<Option<Collector>> {
        (**self).find_collector_by_email(email)
    }

    fn in_transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        (**self).in_transaction(f)
    }
}

impl<L: CreditLedger> CreditLedger for std::sync::Arc<L> {
    fn find_credit(&self, credit_id: CreditId) -> Result<Option<Credit>> {
        (**self).find_credit(credit_id)
    }

    fn find_collector_by_email(&self, email: &str) -> Result<Option<Collector>> {
        (**self).find_collector_by_email(email)
    }

    fn in_transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        (**self).in_transaction(f)
    }
}
