use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CreditError, Result};
use crate::types::{ClientId, CollectorId, ProductId};

/// registered client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: String,
    pub created_at: DateTime<Utc>,
}

/// registered product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub created_at: DateTime<Utc>,
}

/// registered collector
///
/// The credential is the collector's national id, stored only as a salted
/// hash; the raw value never reaches the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collector {
    pub id: CollectorId,
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// client registration input
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub national_id: String,
}

/// product registration input
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
}

/// collector registration input
#[derive(Debug, Clone)]
pub struct NewCollector {
    pub name: String,
    pub email: String,
    pub national_id: String,
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

/// validate an email address shape
pub fn validate_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CreditError::InvalidInput {
            message: format!("invalid email address: {email}"),
        })
    }
}

/// validate a phone number: at least 10 digits
pub fn validate_phone(phone: &str) -> Result<()> {
    if digit_count(phone) >= 10 {
        Ok(())
    } else {
        Err(CreditError::InvalidInput {
            message: "phone number must contain at least 10 digits".to_string(),
        })
    }
}

/// validate a national id: at least 8 digits
pub fn validate_national_id(national_id: &str) -> Result<()> {
    if digit_count(national_id) >= 8 {
        Ok(())
    } else {
        Err(CreditError::InvalidInput {
            message: "national id must contain at least 8 digits".to_string(),
        })
    }
}

/// validate a required free-text field
pub fn validate_required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(CreditError::InvalidInput {
            message: format!("{field} is required"),
        })
    } else {
        Ok(())
    }
}

impl NewClient {
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("address", &self.address)?;
        validate_phone(&self.phone)?;
        validate_national_id(&self.national_id)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

impl NewProduct {
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        if !self.price.is_positive() {
            return Err(CreditError::InvalidInput {
                message: format!("price must be positive, got {}", self.price),
            });
        }
        Ok(())
    }
}

impl NewCollector {
    pub fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_email(&self.email)?;
        validate_national_id(&self.national_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("maria@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("maria@nodot").is_err());
    }

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("809-555-0147").is_ok());
        assert!(validate_phone("(809) 555 0147").is_ok());
        assert!(validate_phone("555-0147").is_err());
    }

    #[test]
    fn test_national_id_validation() {
        assert!(validate_national_id("00112345678").is_ok());
        assert!(validate_national_id("001-1234567-8").is_ok());
        assert!(validate_national_id("1234567").is_err());
    }

    #[test]
    fn test_new_product_rejects_non_positive_price() {
        let product = NewProduct {
            name: "Stove".to_string(),
            description: None,
            price: Money::ZERO,
        };
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_new_client_validates_optional_email() {
        let mut client = NewClient {
            name: "Maria Perez".to_string(),
            address: "Calle 5 #12".to_string(),
            phone: "809-555-0147".to_string(),
            email: None,
            national_id: "00112345678".to_string(),
        };
        assert!(client.validate().is_ok());

        client.email = Some("broken".to_string());
        assert!(client.validate().is_err());
    }
}
