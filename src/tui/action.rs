// File: src/tui/action.rs
// Translates key presses into app events, depending on what is on screen.
use crate::app::events::{AppEvent, HomeEvent, LoginEvent, RegisterEvent};
use crate::app::form::{Field, FormInput};
use crate::app::{App, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn map_key(app: &App, key: KeyEvent) -> Option<AppEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppEvent::Quit);
    }

    match app.route {
        Route::Login => match key.code {
            KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Enter => Some(LoginEvent::Submit.into()),
            KeyCode::Char('r') if ctrl => Some(AppEvent::Navigate(Route::Register)),
            _ => form_input(key).map(|i| LoginEvent::Input(i).into()),
        },
        Route::Register => {
            if app.register.alert.is_some() {
                return matches!(key.code, KeyCode::Enter | KeyCode::Esc)
                    .then(|| RegisterEvent::DismissAlert.into());
            }
            match key.code {
                KeyCode::Esc => Some(AppEvent::Navigate(Route::Login)),
                KeyCode::Char('l') if ctrl => Some(AppEvent::Navigate(Route::Login)),
                KeyCode::Enter => Some(RegisterEvent::Submit.into()),
                _ => form_input(key).map(|i| RegisterEvent::Input(i).into()),
            }
        }
        Route::Home => {
            let event = if app.home.modal_open {
                match key.code {
                    KeyCode::Esc => HomeEvent::CloseModal,
                    KeyCode::Enter => HomeEvent::SubmitEvent,
                    _ => HomeEvent::ModalInput(form_input(key)?),
                }
            } else {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Some(AppEvent::Quit),
                    KeyCode::Char('j') | KeyCode::Down => HomeEvent::SelectNext,
                    KeyCode::Char('k') | KeyCode::Up => HomeEvent::SelectPrev,
                    KeyCode::Enter | KeyCode::Char(' ') => HomeEvent::ToggleSelected,
                    KeyCode::Char('n') => HomeEvent::ToggleModal,
                    KeyCode::Char('r') => HomeEvent::Mount,
                    KeyCode::Char('L') => HomeEvent::Logout,
                    _ => return None,
                }
            };
            Some(event.into())
        }
    }
}

fn form_input<F: Field>(key: KeyEvent) -> Option<FormInput<F>> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => Some(FormInput::Next),
        KeyCode::BackTab | KeyCode::Up => Some(FormInput::Prev),
        KeyCode::Backspace => Some(FormInput::Backspace),
        KeyCode::Char(c) => Some(FormInput::Char(c)),
        _ => None,
    }
}
