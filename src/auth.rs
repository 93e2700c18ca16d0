use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CreditError, Result};
use crate::ledger::CreditLedger;
use crate::types::CollectorId;

/// authenticated collector, passed explicitly into settlement calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectorIdentity {
    pub collector_id: CollectorId,
    pub name: String,
}

/// hash a raw credential into a salted PHC string
pub fn hash_credential(raw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| CreditError::Storage {
            message: format!("credential hashing failed: {e}"),
        })?;
    Ok(hash.to_string())
}

/// verify a raw credential against a stored PHC string.
///
/// The comparison runs in constant time inside the hash verifier; a
/// malformed stored hash verifies as false rather than erroring.
pub fn verify_credential(raw: &str, stored: &str) -> bool {
    PasswordHash::new(stored)
        .map(|parsed| Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

/// authenticate a collector by email and national id.
///
/// Every failure mode collapses into the same `InvalidCredentials` error so
/// callers cannot distinguish an unknown email from a wrong credential.
pub fn authenticate_collector<L: CreditLedger>(
    ledger: &L,
    email: &str,
    national_id: &str,
) -> Result<CollectorIdentity> {
    let collector = match ledger.find_collector_by_email(email)? {
        Some(collector) => collector,
        None => {
            warn!(%email, "login attempt for unknown email");
            return Err(CreditError::InvalidCredentials);
        }
    };

    if collector.national_id != national_id || !verify_credential(national_id, &collector.password_hash)
    {
        warn!(%email, "login attempt with wrong credential");
        return Err(CreditError::InvalidCredentials);
    }

    Ok(CollectorIdentity {
        collector_id: collector.id,
        name: collector.name,
    })
}
