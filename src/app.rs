// src/app.rs
//! Top-level composition: which screen is showing, driven by one flag

use tracing::info;

use crate::forms::credentials::REGISTERED_NOTICE;
use crate::forms::{ApplicationForm, LoginForm, RegisterForm, SubmitOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScreen {
    #[default]
    Login,
    Register,
}

impl AuthScreen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Sign in to your account",
            Self::Register => "Create your account",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Credentials(AuthScreen),
    Application,
}

#[derive(Debug, Default)]
pub struct Portal {
    logged_in: bool,
    screen: AuthScreen,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub application: ApplicationForm,
}

impl Portal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn view(&self) -> View {
        if self.logged_in {
            View::Application
        } else {
            View::Credentials(self.screen)
        }
    }

    pub fn toggle_form(&mut self) {
        self.screen = match self.screen {
            AuthScreen::Login => AuthScreen::Register,
            AuthScreen::Register => AuthScreen::Login,
        };
    }

    pub fn submit_login(&mut self) -> SubmitOutcome {
        let logged_in = &mut self.logged_in;
        let outcome = self.login.submit(|| *logged_in = true);
        if outcome == SubmitOutcome::Accepted {
            info!("Switched to application view");
        }
        outcome
    }

    /// On success returns the acknowledgement to show before the login form
    pub fn submit_register(&mut self) -> Result<&'static str, SubmitOutcome> {
        let screen = &mut self.screen;
        match self.register.submit(|| *screen = AuthScreen::Login) {
            SubmitOutcome::Accepted => Ok(REGISTERED_NOTICE),
            invalid => Err(invalid),
        }
    }
}
