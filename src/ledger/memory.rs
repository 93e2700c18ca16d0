use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::credit::{Credit, Payment};
use crate::decimal::Money;
use crate::errors::{CreditError, Result};
use crate::ledger::{CreditLedger, LedgerTx, NewPayment};
use crate::parties::{Client, Collector, Product};
use crate::types::{ClientId, CollectorId, CreditId, CreditStatus, PaymentId, ProductId};

/// point at which an injected storage failure fires.
///
/// Used by tests to prove that a failure inside a transaction leaves no
/// partial state behind. The injection is one-shot: it is consumed by the
/// transaction that trips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    BeforePaymentInsert,
    BeforeBalanceUpdate,
}

#[derive(Debug, Clone, Default)]
struct LedgerState {
    clients: HashMap<ClientId, Client>,
    products: HashMap<ProductId, Product>,
    collectors: HashMap<CollectorId, Collector>,
    credits: HashMap<CreditId, Credit>,
    payments: Vec<Payment>,
    used_tokens: HashSet<Uuid>,
}

/// in-process ledger.
///
/// Transactions run on a staging copy of the state under an exclusive
/// lock; the copy replaces the live state only when the transaction body
/// returns `Ok`. The lock also serializes concurrent settlements against
/// the same credit, so a second transaction always sees the first one's
/// committed balance.
pub struct MemoryLedger {
    inner: Mutex<LedgerState>,
    failure: Mutex<Option<FailurePoint>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LedgerState::default()),
            failure: Mutex::new(None),
        }
    }

    /// arrange for the next transaction touching the given point to fail
    pub fn inject_failure(&self, point: FailurePoint) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(point);
        }
    }

    /// payments recorded against a credit, in insertion order
    pub fn payments_for_credit(&self, credit_id: CreditId) -> Result<Vec<Payment>> {
        let inner = self.lock_state()?;
        Ok(inner
            .payments
            .iter()
            .filter(|p| p.credit_id == credit_id)
            .cloned()
            .collect())
    }

    /// number of payments recorded against a credit
    pub fn payment_count(&self, credit_id: CreditId) -> Result<usize> {
        let inner = self.lock_state()?;
        Ok(inner.payments.iter().filter(|p| p.credit_id == credit_id).count())
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, LedgerState>> {
        self.inner.lock().map_err(|_| CreditError::Storage {
            message: "ledger lock poisoned".to_string(),
        })
    }

    fn take_failure(&self) -> Option<FailurePoint> {
        self.failure.lock().ok().and_then(|mut f| f.take())
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CreditLedger for MemoryLedger {
    fn find_credit(&self, credit_id: CreditId) -> Result<Option<Credit>> {
        let inner = self.lock_state()?;
        Ok(inner.credits.get(&credit_id).cloned())
    }

    fn find_collector_by_email(&self, email: &str) -> Result<Option<Collector>> {
        let inner = self.lock_state()?;
        Ok(inner.collectors.values().find(|c| c.email == email).cloned())
    }

    fn in_transaction<T>(&self, f: impl FnOnce(&mut dyn LedgerTx) -> Result<T>) -> Result<T> {
        let mut inner = self.lock_state()?;
        let mut staging = (*inner).clone();
        let mut tx = MemoryTx {
            state: &mut staging,
            failure: self.take_failure(),
        };

        match f(&mut tx) {
            Ok(value) => {
                *inner = staging;
                Ok(value)
            }
            // staging is dropped untouched: full rollback
            Err(e) => Err(e),
        }
    }
}

struct MemoryTx<'a> {
    state: &'a mut LedgerState,
    failure: Option<FailurePoint>,
}

impl MemoryTx<'_> {
    fn trip_failure(&mut self, point: FailurePoint) -> Result<()> {
        if self.failure == Some(point) {
            self.failure = None;
            return Err(CreditError::Storage {
                message: format!("injected failure at {point:?}"),
            });
        }
        Ok(())
    }
}

impl LedgerTx for MemoryTx<'_> {
    fn credit_for_update(&mut self, credit_id: CreditId) -> Result<Credit> {
        self.state
            .credits
            .get(&credit_id)
            .cloned()
            .ok_or(CreditError::NotFoundOrUnauthorized)
    }

    fn insert_payment(&mut self, payment: &NewPayment) -> Result<PaymentId> {
        self.trip_failure(FailurePoint::BeforePaymentInsert)?;

        if let Some(token) = payment.request_token {
            if !self.state.used_tokens.insert(token) {
                return Err(CreditError::DuplicateSubmission);
            }
        }

        let id = Uuid::new_v4();
        self.state.payments.push(Payment {
            id,
            credit_id: payment.credit_id,
            payment_date: payment.payment_date,
            amount: payment.amount,
            penalty: payment.penalty,
            interest: payment.interest,
            total_paid: payment.total_paid,
            notes: payment.notes.clone(),
            request_token: payment.request_token,
            created_at: payment.created_at,
        });
        Ok(id)
    }

    fn update_credit_balance(
        &mut self,
        credit_id: CreditId,
        new_remaining: Money,
        new_status: CreditStatus,
    ) -> Result<()> {
        self.trip_failure(FailurePoint::BeforeBalanceUpdate)?;

        let credit = self
            .state
            .credits
            .get_mut(&credit_id)
            .ok_or(CreditError::NotFoundOrUnauthorized)?;
        credit.remaining_amount = new_remaining;
        credit.status = new_status;
        credit.updated_at = Utc::now();
        Ok(())
    }

    fn insert_client(&mut self, client: Client) -> Result<ClientId> {
        let id = client.id;
        self.state.clients.insert(id, client);
        Ok(id)
    }

    fn insert_product(&mut self, product: Product) -> Result<ProductId> {
        let id = product.id;
        self.state.products.insert(id, product);
        Ok(id)
    }

    fn insert_collector(&mut self, collector: Collector) -> Result<CollectorId> {
        let id = collector.id;
        self.state.collectors.insert(id, collector);
        Ok(id)
    }

    fn insert_credit(&mut self, credit: Credit) -> Result<CreditId> {
        let id = credit.id;
        self.state.credits.insert(id, credit);
        Ok(id)
    }

    fn find_client(&self, client_id: ClientId) -> Result<Option<Client>> {
        Ok(self.state.clients.get(&client_id).cloned())
    }

    fn find_product(&self, product_id: ProductId) -> Result<Option<Product>> {
        Ok(self.state.products.get(&product_id).cloned())
    }

    fn find_collector(&self, collector_id: CollectorId) -> Result<Option<Collector>> {
        Ok(self.state.collectors.get(&collector_id).cloned())
    }

    fn client_by_national_id(&self, national_id: &str) -> Result<Option<Client>> {
        Ok(self
            .state
            .clients
            .values()
            .find(|c| c.national_id == national_id)
            .cloned())
    }

    fn product_by_name(&self, name: &str) -> Result<Option<Product>> {
        Ok(self.state.products.values().find(|p| p.name == name).cloned())
    }

    fn collector_by_email(&self, email: &str) -> Result<Option<Collector>> {
        Ok(self.state.collectors.values().find(|c| c.email == email).cloned())
    }

    fn collector_by_national_id(&self, national_id: &str) -> Result<Option<Collector>> {
        Ok(self
            .state
            .collectors
            .values()
            .find(|c| c.national_id == national_id)
            .cloned())
    }
}
