// File: src/cli.rs
// Headless commands. They drive the same reducers as the terminal UI.
use crate::app::events::{AppEvent, HomeEvent, LoginEvent, RegisterEvent};
use crate::app::form::FormInput;
use crate::app::home::EventField;
use crate::app::login::LoginField;
use crate::app::register::RegisterField;
use crate::app::{App, Route};
use crate::model::adapter::find_event;
use crate::runtime::Runtime;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(name = "eventdesk", version, about = "Browse, create and join events")]
pub struct Cli {
    /// Base URL of the events server.
    #[arg(long, env = "EVENTDESK_URL", global = true)]
    pub url: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, global = true)]
    pub insecure: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Log in and keep the session for later commands.
    Login {
        name: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account.
    Register {
        name: String,
        #[arg(long)]
        password: Option<String>,
        /// Defaults to the password.
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Show the logged-in user.
    Whoami,
    /// List all events.
    Events,
    /// Create an event.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },
    /// Flip your interest in an event.
    Toggle { event_id: String },
    /// Forget the stored session.
    Logout,
}

pub async fn run(runtime: &Runtime, app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Login { name, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            app.navigate(Route::Login);
            dispatch(runtime, app, LoginEvent::Input(FormInput::Set(LoginField::Name, name))).await;
            dispatch(
                runtime,
                app,
                LoginEvent::Input(FormInput::Set(LoginField::Password, password)),
            )
            .await;
            dispatch(runtime, app, LoginEvent::Submit).await;
            if app.route != Route::Home {
                bail!(failure(app, "Login failed"));
            }
            require_session(app)?;
            println!("Logged in as {}", app.remembered_username);
        }
        Command::Register {
            name,
            password,
            confirm,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let confirm = match confirm {
                Some(c) => c,
                None => password.clone(),
            };
            app.navigate(Route::Register);
            for (field, value) in [
                (RegisterField::Username, name.clone()),
                (RegisterField::Password, password),
                (RegisterField::ConfirmPassword, confirm),
            ] {
                dispatch(runtime, app, RegisterEvent::Input(FormInput::Set(field, value))).await;
            }
            dispatch(runtime, app, RegisterEvent::Submit).await;
            if let Some(alert) = &app.register.alert {
                bail!("{}", alert);
            }
            if app.route != Route::Login {
                bail!(failure(app, "Registration failed"));
            }
            println!("Registered {}. You can log in now.", name);
        }
        Command::Whoami => {
            mount(runtime, app).await?;
            if let Some(user) = &app.home.user {
                println!("{}", user.name);
            }
        }
        Command::Events => {
            mount(runtime, app).await?;
            print_events(app);
        }
        Command::Create {
            name,
            description,
            location,
            date,
        } => {
            mount(runtime, app).await?;
            dispatch(runtime, app, HomeEvent::ToggleModal).await;
            for (field, value) in [
                (EventField::Name, name),
                (EventField::Description, description),
                (EventField::Location, location),
                (EventField::Date, date),
            ] {
                dispatch(runtime, app, HomeEvent::ModalInput(FormInput::Set(field, value))).await;
            }
            dispatch(runtime, app, HomeEvent::SubmitEvent).await;
            if app.route != Route::Home || app.home.status.is_some() {
                bail!(failure(app, "Could not create event"));
            }
            println!("Event created.");
            print_events(app);
        }
        Command::Toggle { event_id } => {
            mount(runtime, app).await?;
            let id = find_event(&app.home.events, &event_id)
                .map(|e| e.id.clone())
                .with_context(|| format!("No event with id {}", event_id))?;
            let was_interested = app.home.is_interested(&id);
            dispatch(runtime, app, HomeEvent::Toggle(id.clone())).await;
            if app.home.is_interested(&id) == was_interested {
                bail!(failure(app, "Could not update participation"));
            }
            if was_interested {
                println!("Dropped event {}", id);
            } else {
                println!("Participating in event {}", id);
            }
        }
        Command::Logout => {
            runtime.client().logout();
            println!("Logged out.");
        }
    }
    Ok(())
}

/// Mounts the main screen and fails if that bounced to Login.
async fn mount(runtime: &Runtime, app: &mut App) -> Result<()> {
    let effects = app.navigate(Route::Home);
    runtime.settle(app, effects).await;
    require_session(app)
}

fn require_session(app: &App) -> Result<()> {
    if app.route != Route::Home || app.home.user.is_none() {
        bail!("Not logged in. Run `eventdesk login <name>` first.");
    }
    Ok(())
}

async fn dispatch(runtime: &Runtime, app: &mut App, event: impl Into<AppEvent>) {
    let effects = app.update(event.into());
    runtime.settle(app, effects).await;
}

fn failure(app: &App, fallback: &str) -> String {
    app.status().unwrap_or(fallback).to_string()
}

fn print_events(app: &App) {
    if app.home.events.is_empty() {
        println!("No events found.");
        return;
    }
    for event in &app.home.events {
        let mark = if app.home.is_interested(&event.id) {
            "[x]"
        } else {
            "[ ]"
        };
        println!(
            "{} {:>6}  {}  {}  @ {}",
            mark, event.id, event.date, event.name, event.location
        );
        if !event.description.is_empty() {
            println!("            {}", event.description);
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", label)?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["eventdesk"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn create_takes_all_four_fields() {
        let cli = Cli::try_parse_from([
            "eventdesk",
            "--url",
            "http://events.local:8080",
            "create",
            "--name",
            "Jam",
            "--description",
            "Music",
            "--location",
            "Park",
            "--date",
            "2024-06-01",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://events.local:8080"));
        assert!(matches!(cli.command, Some(Command::Create { ref date, .. }) if date == "2024-06-01"));
        assert!(Cli::try_parse_from(["eventdesk", "create", "--name", "Jam"]).is_err());
    }
}
