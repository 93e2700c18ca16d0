use thiserror::Error;

use crate::decimal::Money;
use crate::types::CreditStatus;

#[derive(Error, Debug)]
pub enum CreditError {
    #[error("invalid payment amount: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("credit not found or not assigned to this collector")]
    NotFoundOrUnauthorized,

    #[error("credit is closed: current status is {status:?}")]
    CreditClosed {
        status: CreditStatus,
    },

    #[error("payment already submitted with this request token")]
    DuplicateSubmission,

    #[error("already registered: {field}")]
    AlreadyRegistered {
        field: &'static str,
    },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("storage failure: {message}")]
    Storage {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, CreditError>;
