// File: src/app/login.rs
use crate::app::Route;
use crate::app::effects::Effect;
use crate::app::events::LoginEvent;
use crate::app::form::{Field, Form};
use crate::model::Credentials;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Password,
}

impl Field for LoginField {
    const ALL: &'static [Self] = &[LoginField::Name, LoginField::Password];

    fn label(self) -> &'static str {
        match self {
            LoginField::Name => "Username",
            LoginField::Password => "Password",
        }
    }

    fn is_secret(self) -> bool {
        self == LoginField::Password
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub form: Form<LoginField>,
    pub submitting: bool,
    pub status: Option<String>,
}

impl LoginState {
    pub fn with_username(name: &str) -> Self {
        let mut state = Self::default();
        state.form.set(LoginField::Name, name);
        if !name.is_empty() {
            state.form.focus(LoginField::Password);
        }
        state
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            name: self.form.get(LoginField::Name).to_string(),
            password: self.form.get(LoginField::Password).to_string(),
        }
    }
}

pub fn update(state: &mut LoginState, event: LoginEvent) -> Vec<Effect> {
    match event {
        LoginEvent::Input(input) => {
            state.form.apply(input);
            vec![]
        }
        LoginEvent::Submit => {
            if state.submitting {
                return vec![];
            }
            if let Some(field) = state.form.first_missing() {
                state.status = Some(format!("{} is required", field.label()));
                return vec![];
            }
            state.submitting = true;
            state.status = Some("Logging in...".to_string());
            vec![Effect::Login(state.credentials())]
        }
        LoginEvent::Finished(result) => {
            // A reply for a form that was reset by navigation.
            if !state.submitting {
                return vec![];
            }
            state.submitting = false;
            match result {
                Ok(_) => {
                    let name = state.form.get(LoginField::Name).to_string();
                    info!("Login successful for {}", name);
                    state.status = None;
                    vec![Effect::RememberUsername(name), Effect::Navigate(Route::Home)]
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    state.status = Some(if e.is_unauthorized() {
                        "Login failed: wrong username or password".to_string()
                    } else {
                        format!("Login failed: {}", e)
                    });
                    vec![]
                }
            }
        }
    }
}
