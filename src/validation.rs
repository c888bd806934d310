use std::collections::BTreeMap;

use crate::models::{ShippingAddress, ShippingForm, SignInForm, SignUpForm};

/// Field-level validation failures, keyed by the form field name as the UI
/// knows it ("fullName", "pincode", ...).
pub type FieldErrors = BTreeMap<&'static str, String>;

const MIN_PASSWORD_LENGTH: usize = 6;

/// Credentials for an existing account that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

/// A new account request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpCredentials {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Checks a shipping form and returns the trimmed address on success.
/// All failing fields are reported at once, not just the first.
pub fn validate_shipping(form: &ShippingForm) -> Result<ShippingAddress, FieldErrors> {
    let full_name = form.full_name.trim();
    let phone = form.phone.trim();
    let address = form.address.trim();
    let city = form.city.trim();
    let pincode = form.pincode.trim();

    let mut errors = FieldErrors::new();
    check_text(&mut errors, "fullName", full_name, 2, 100, "Name is required");
    check_text(&mut errors, "phone", phone, 10, 15, "Valid phone number required");
    check_text(&mut errors, "address", address, 10, 500, "Complete address required");
    check_text(&mut errors, "city", city, 2, 100, "City is required");
    check_text(&mut errors, "pincode", pincode, 6, 10, "Valid pincode required");

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ShippingAddress {
        full_name: full_name.to_owned(),
        phone: phone.to_owned(),
        address: address.to_owned(),
        city: city.to_owned(),
        pincode: pincode.to_owned(),
    })
}

/// Checks sign-in credentials. The email is trimmed, the password is taken
/// verbatim.
pub fn validate_sign_in(form: &SignInForm) -> Result<SignInCredentials, FieldErrors> {
    let email = form.email.trim();

    let mut errors = FieldErrors::new();
    check_email(&mut errors, email);
    check_password(&mut errors, &form.password);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(SignInCredentials {
        email: email.to_owned(),
        password: form.password.clone(),
    })
}

/// Checks a sign-up form. Same email and password rules as sign-in, plus
/// the display name.
pub fn validate_sign_up(form: &SignUpForm) -> Result<SignUpCredentials, FieldErrors> {
    let full_name = form.full_name.trim();
    let email = form.email.trim();

    let mut errors = FieldErrors::new();
    check_text(
        &mut errors,
        "fullName",
        full_name,
        2,
        100,
        "Name must be at least 2 characters",
    );
    check_email(&mut errors, email);
    check_password(&mut errors, &form.password);

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(SignUpCredentials {
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
    })
}

fn check_text(
    errors: &mut FieldErrors,
    key: &'static str,
    value: &str,
    min: usize,
    max: usize,
    required_msg: &str,
) {
    let len = value.chars().count();
    if len < min {
        errors.insert(key, required_msg.to_owned());
    } else if len > max {
        errors.insert(key, format!("Must be at most {max} characters"));
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !is_valid_email(email) {
        errors.insert("email", "Invalid email address".to_owned());
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
}

/// Shallow address check: one `@`, a non-empty local part and a dotted
/// domain with no empty labels. Deliverability is the mail server's
/// problem.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}
