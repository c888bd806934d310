use std::fmt;

use thiserror::Error;

use crate::validation::FieldErrors;

/// Opaque failure from the order store or another remote backend.
#[derive(Debug)]
pub struct GatewayError(Box<dyn std::error::Error + Send + Sync>);

impl GatewayError {
    pub fn new(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(err.into())
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("sign in to place an order")]
    AuthRequired,

    #[error("shipping details failed validation")]
    Validation(FieldErrors),

    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    #[error("order submission failed: {0}")]
    Submission(#[source] GatewayError),
}

impl CheckoutError {
    /// Field-level messages when the failure was a validation one.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            CheckoutError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("this email is already registered")]
    AlreadyRegistered,

    #[error("account details failed validation")]
    Validation(FieldErrors),

    #[error("auth provider error: {0}")]
    Provider(#[source] GatewayError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;
