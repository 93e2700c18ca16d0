pub mod auth;
pub mod credit;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod fees;
pub mod ledger;
pub mod parties;
pub mod registry;
pub mod settlement;
pub mod types;

// re-export key types
pub use auth::{authenticate_collector, CollectorIdentity};
pub use credit::{Credit, Payment};
pub use decimal::Money;
pub use errors::{CreditError, Result};
pub use fees::{FeeAssessment, InterestAssessment, PenaltyAssessment, MONTHLY_INTEREST_RATE};
pub use ledger::{CreditLedger, FailurePoint, LedgerTx, MemoryLedger, NewPayment};
pub use parties::{Client, Collector, NewClient, NewCollector, NewProduct, Product};
pub use registry::Registry;
pub use settlement::{PaymentIntent, PaymentResult, SettlementEngine};
pub use types::{ClientId, CollectorId, CreditId, CreditStatus, PaymentId, ProductId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
