// File: src/app/register.rs
use crate::app::Route;
use crate::app::effects::Effect;
use crate::app::events::RegisterEvent;
use crate::app::form::{Field, Form};
use crate::model::Credentials;
use log::{info, warn};

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Password,
    ConfirmPassword,
}

impl Field for RegisterField {
    const ALL: &'static [Self] = &[
        RegisterField::Username,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
    ];

    fn label(self) -> &'static str {
        match self {
            RegisterField::Username => "Username",
            RegisterField::Password => "Password",
            RegisterField::ConfirmPassword => "Confirm Password",
        }
    }

    fn is_secret(self) -> bool {
        self != RegisterField::Username
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterState {
    pub form: Form<RegisterField>,
    pub submitting: bool,
    /// Blocking message; all input is ignored until it is dismissed.
    pub alert: Option<String>,
    pub status: Option<String>,
}

pub fn update(state: &mut RegisterState, event: RegisterEvent) -> Vec<Effect> {
    if state.alert.is_some() {
        if event == RegisterEvent::DismissAlert {
            state.alert = None;
        }
        return vec![];
    }

    match event {
        RegisterEvent::Input(input) => {
            state.form.apply(input);
            vec![]
        }
        RegisterEvent::DismissAlert => vec![],
        RegisterEvent::Submit => {
            if state.submitting {
                return vec![];
            }
            if let Some(field) = state.form.first_missing() {
                state.status = Some(format!("{} is required", field.label()));
                return vec![];
            }
            let password = state.form.get(RegisterField::Password);
            if password != state.form.get(RegisterField::ConfirmPassword) {
                state.alert = Some(PASSWORD_MISMATCH.to_string());
                return vec![];
            }
            state.submitting = true;
            state.status = Some("Registering...".to_string());
            vec![Effect::Register(Credentials {
                name: state.form.get(RegisterField::Username).to_string(),
                password: password.to_string(),
            })]
        }
        RegisterEvent::Finished(result) => {
            if !state.submitting {
                return vec![];
            }
            state.submitting = false;
            match result {
                Ok(_) => {
                    info!(
                        "Registration successful for {}",
                        state.form.get(RegisterField::Username)
                    );
                    state.status = None;
                    vec![Effect::Navigate(Route::Login)]
                }
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    state.status = Some(format!("Registration failed: {}", e));
                    vec![]
                }
            }
        }
    }
}
