use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use uuid::Uuid;

use crate::auth;
use crate::credit::Credit;
use crate::errors::{CreditError, Result};
use crate::ledger::CreditLedger;
use crate::parties::{Client, Collector, NewClient, NewCollector, NewProduct, Product};
use crate::types::{ClientId, CollectorId, ProductId};

/// administrative registration operations.
///
/// Uniqueness checks and inserts run inside one ledger transaction, so two
/// racing registrations with the same identity cannot both commit.
pub struct Registry<L: CreditLedger> {
    ledger: L,
}

impl<L: CreditLedger> Registry<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    /// register a client; the national id must be unused
    pub fn register_client(
        &self,
        new: NewClient,
        time_provider: &SafeTimeProvider,
    ) -> Result<Client> {
        new.validate()?;
        let now = time_provider.now();

        self.ledger.in_transaction(|tx| {
            if tx.client_by_national_id(&new.national_id)?.is_some() {
                return Err(CreditError::AlreadyRegistered { field: "national id" });
            }

            let client = Client {
                id: Uuid::new_v4(),
                name: new.name.clone(),
                address: new.address.clone(),
                phone: new.phone.clone(),
                email: new.email.clone(),
                national_id: new.national_id.clone(),
                created_at: now,
            };
            tx.insert_client(client.clone())?;
            Ok(client)
        })
    }

    /// register a product; the name must be unused
    pub fn register_product(
        &self,
        new: NewProduct,
        time_provider: &SafeTimeProvider,
    ) -> Result<Product> {
        new.validate()?;
        let now = time_provider.now();

        self.ledger.in_transaction(|tx| {
            if tx.product_by_name(&new.name)?.is_some() {
                return Err(CreditError::AlreadyRegistered { field: "product name" });
            }

            let product = Product {
                id: Uuid::new_v4(),
                name: new.name.clone(),
                description: new.description.clone(),
                price: new.price,
                created_at: now,
            };
            tx.insert_product(product.clone())?;
            Ok(product)
        })
    }

    /// register a collector; email and national id must both be unused.
    ///
    /// The national id doubles as the login credential and is stored only
    /// as a salted hash.
    pub fn register_collector(
        &self,
        new: NewCollector,
        time_provider: &SafeTimeProvider,
    ) -> Result<Collector> {
        new.validate()?;
        let password_hash = auth::hash_credential(&new.national_id)?;
        let now = time_provider.now();

        self.ledger.in_transaction(|tx| {
            if tx.collector_by_email(&new.email)?.is_some() {
                return Err(CreditError::AlreadyRegistered { field: "email" });
            }
            if tx.collector_by_national_id(&new.national_id)?.is_some() {
                return Err(CreditError::AlreadyRegistered { field: "national id" });
            }

            let collector = Collector {
                id: Uuid::new_v4(),
                name: new.name.clone(),
                email: new.email.clone(),
                national_id: new.national_id.clone(),
                password_hash: password_hash.clone(),
                created_at: now,
            };
            tx.insert_collector(collector.clone())?;
            Ok(collector)
        })
    }

    /// open a credit for a client on a product, assigned to a collector.
    ///
    /// The credit captures the product's current price as its fixed total;
    /// the due date is derived from the purchase date and never edited.
    pub fn open_credit(
        &self,
        client_id: ClientId,
        product_id: ProductId,
        collector_id: CollectorId,
        purchase_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<Credit> {
        let now = time_provider.now();

        self.ledger.in_transaction(|tx| {
            if tx.find_client(client_id)?.is_none() {
                return Err(CreditError::InvalidInput {
                    message: "unknown client".to_string(),
                });
            }
            if tx.find_collector(collector_id)?.is_none() {
                return Err(CreditError::InvalidInput {
                    message: "unknown collector".to_string(),
                });
            }
            let product = tx.find_product(product_id)?.ok_or(CreditError::InvalidInput {
                message: "unknown product".to_string(),
            })?;

            let credit = Credit::open(
                client_id,
                product_id,
                collector_id,
                purchase_date,
                product.price,
                now,
            );
            tx.insert_credit(credit.clone())?;
            Ok(credit)
        })
    }
}
