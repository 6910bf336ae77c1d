// src/forms/credentials.rs
//! Login and registration forms.
//!
//! Both are local stubs: nothing is sent anywhere and no session is created.
//! A valid form only fires the callback handed to `submit`.

use std::fmt;
use tracing::info;

use super::{required, SubmitOutcome};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const REGISTERED_NOTICE: &str = "Registration successful! Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn get(&self, field: LoginField) -> Option<&str> {
        match field {
            LoginField::Email => self.email.as_deref(),
            LoginField::Password => self.password.as_deref(),
        }
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct LoginForm {
    email: String,
    password: String,
    errors: LoginErrors,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: LoginField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    pub fn errors(&self) -> &LoginErrors {
        &self.errors
    }

    /// Recompute every field error; true when the form may be submitted
    pub fn validate(&mut self) -> bool {
        self.errors = LoginErrors {
            email: required(&self.email, "Email is required"),
            password: required(&self.password, "Password is required"),
        };
        self.errors.is_empty()
    }

    /// Any non-empty email/password pair is accepted.
    pub fn submit(&mut self, on_success: impl FnOnce()) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        info!("Login accepted for {}", self.email);
        *self = Self::default();
        on_success();
        SubmitOutcome::Accepted
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("errors", &self.errors)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }

    pub fn get(&self, field: RegisterField) -> Option<&str> {
        match field {
            RegisterField::Name => self.name.as_deref(),
            RegisterField::Email => self.email.as_deref(),
            RegisterField::Password => self.password.as_deref(),
            RegisterField::ConfirmPassword => self.confirm_password.as_deref(),
        }
    }
}

#[derive(Clone, Default, PartialEq)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    errors: RegisterErrors,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: RegisterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RegisterField::Name => self.name = value,
            RegisterField::Email => self.email = value,
            RegisterField::Password => self.password = value,
            RegisterField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Name => &self.name,
            RegisterField::Email => &self.email,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
        }
    }

    pub fn errors(&self) -> &RegisterErrors {
        &self.errors
    }

    pub fn validate(&mut self) -> bool {
        // Length is counted in UTF-16 code units, so "🦀🦀🦀" is long enough
        let password = if self.password.is_empty() {
            Some("Password is required".to_string())
        } else if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            Some(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ))
        } else {
            None
        };

        // Checked on its own: an empty pair still "matches"
        let confirm_password = if self.password != self.confirm_password {
            Some("Passwords do not match".to_string())
        } else {
            None
        };

        self.errors = RegisterErrors {
            name: required(&self.name, "Name is required"),
            email: required(&self.email, "Email is required"),
            password,
            confirm_password,
        };
        self.errors.is_empty()
    }

    /// Acknowledge the registration and hand control back to the login form.
    pub fn submit(&mut self, switch_to_login: impl FnOnce()) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        info!("Registration accepted for {}", self.email);
        *self = Self::default();
        switch_to_login();
        SubmitOutcome::Accepted
    }
}

impl fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("errors", &self.errors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let mut form = LoginForm::new();
        let mut called = false;

        assert_eq!(form.submit(|| called = true), SubmitOutcome::Invalid);
        assert!(!called);
        assert_eq!(form.errors().get(LoginField::Email), Some("Email is required"));
        assert_eq!(
            form.errors().get(LoginField::Password),
            Some("Password is required")
        );
    }

    #[test]
    fn test_login_success_fires_callback_and_clears() {
        let mut form = LoginForm::new();
        form.set(LoginField::Email, "dev@example.com");
        form.set(LoginField::Password, "x");
        let mut called = false;

        assert_eq!(form.submit(|| called = true), SubmitOutcome::Accepted);
        assert!(called);
        assert_eq!(form, LoginForm::default());
    }

    #[test]
    fn test_login_errors_recomputed_each_pass() {
        let mut form = LoginForm::new();
        assert!(!form.validate());
        form.set(LoginField::Email, "dev@example.com");
        assert!(!form.validate());
        assert!(form.errors().email.is_none());
        assert!(form.errors().password.is_some());
    }

    #[test]
    fn test_register_required_fields() {
        let mut form = RegisterForm::new();
        let mut switched = false;

        assert_eq!(form.submit(|| switched = true), SubmitOutcome::Invalid);
        assert!(!switched);
        let errors = form.errors();
        assert_eq!(errors.name.as_deref(), Some("Name is required"));
        assert_eq!(errors.email.as_deref(), Some("Email is required"));
        assert_eq!(errors.password.as_deref(), Some("Password is required"));
        assert!(errors.confirm_password.is_none());
    }

    #[test]
    fn test_register_password_rules() {
        let mut form = RegisterForm::new();
        form.set(RegisterField::Name, "Ada");
        form.set(RegisterField::Email, "ada@example.com");
        form.set(RegisterField::Password, "abc");
        form.set(RegisterField::ConfirmPassword, "abd");

        assert!(!form.validate());
        assert_eq!(
            form.errors().get(RegisterField::Password),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(
            form.errors().get(RegisterField::ConfirmPassword),
            Some("Passwords do not match")
        );
        assert!(form.errors().name.is_none());
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        let mut form = RegisterForm::new();
        form.set(RegisterField::Password, "🦀🦀🦀");
        form.set(RegisterField::ConfirmPassword, "🦀🦀🦀");
        form.validate();
        assert_eq!(form.errors().password, None);

        form.set(RegisterField::Password, "ééééé");
        form.set(RegisterField::ConfirmPassword, "ééééé");
        form.validate();
        assert_eq!(
            form.errors().password.as_deref(),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_register_success_switches_to_login() {
        let mut form = RegisterForm::new();
        form.set(RegisterField::Name, "Ada");
        form.set(RegisterField::Email, "ada@example.com");
        form.set(RegisterField::Password, "secret1");
        form.set(RegisterField::ConfirmPassword, "secret1");
        let mut switched = false;

        assert_eq!(form.submit(|| switched = true), SubmitOutcome::Accepted);
        assert!(switched);
        assert_eq!(form.value(RegisterField::Password), "");
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let mut form = RegisterForm::new();
        form.set(RegisterField::Password, "hunter22");
        assert!(!format!("{:?}", form).contains("hunter22"));

        let mut login = LoginForm::new();
        login.set(LoginField::Password, "hunter22");
        assert!(!format!("{:?}", login).contains("hunter22"));
    }
}
