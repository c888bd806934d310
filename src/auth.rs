use async_trait::async_trait;

use crate::error::AuthError;
use crate::models::{AuthUser, SignInForm, SignUpForm};
use crate::validation::{SignInCredentials, SignUpCredentials, validate_sign_in, validate_sign_up};

/// Session backend: whoever actually holds the accounts. Credentials reach
/// it already validated.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn current_user(&self) -> Option<AuthUser>;

    async fn sign_in(&mut self, credentials: &SignInCredentials) -> Result<AuthUser, AuthError>;

    async fn sign_up(&mut self, credentials: &SignUpCredentials) -> Result<AuthUser, AuthError>;

    async fn sign_out(&mut self) -> Result<(), AuthError>;
}

/// Validates the form, then signs in against the provider.
pub async fn sign_in<P: AuthProvider>(
    provider: &mut P,
    form: &SignInForm,
) -> Result<AuthUser, AuthError> {
    let credentials = validate_sign_in(form).map_err(AuthError::Validation)?;
    let user = provider.sign_in(&credentials).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(user)
}

/// Validates the form, then creates the account.
pub async fn sign_up<P: AuthProvider>(
    provider: &mut P,
    form: &SignUpForm,
) -> Result<AuthUser, AuthError> {
    let credentials = validate_sign_up(form).map_err(AuthError::Validation)?;
    let user = provider.sign_up(&credentials).await?;
    tracing::info!(user_id = %user.id, "account created");
    Ok(user)
}
