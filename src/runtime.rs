// File: src/runtime.rs
// Carries out the effects the reducers ask for and reports back as events.
use crate::app::App;
use crate::app::effects::Effect;
use crate::app::events::{AppEvent, HomeEvent, LoginEvent, RegisterEvent};
use crate::client::EventsClient;
use crate::config::Config;
use log::warn;
use std::collections::VecDeque;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Clone, Debug)]
pub struct Runtime {
    client: EventsClient,
    /// Where `RememberUsername` writes. `None` keeps the config untouched.
    config_path: Option<PathBuf>,
}

impl Runtime {
    pub fn new(client: EventsClient) -> Self {
        Self {
            client,
            config_path: None,
        }
    }

    pub fn with_config_path(self, path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            ..self
        }
    }

    pub fn client(&self) -> &EventsClient {
        &self.client
    }

    /// Runs one effect. Network effects always produce the event carrying
    /// their outcome; local ones produce nothing.
    pub async fn execute(&self, effect: Effect) -> Option<AppEvent> {
        match effect {
            Effect::Navigate(route) => Some(AppEvent::Navigate(route)),
            Effect::Login(credentials) => {
                Some(LoginEvent::Finished(self.client.login(&credentials).await).into())
            }
            Effect::Register(credentials) => {
                Some(RegisterEvent::Finished(self.client.register(&credentials).await).into())
            }
            Effect::LoadSession { generation } => Some(
                HomeEvent::SessionLoaded {
                    generation,
                    result: self.client.current_user().await,
                }
                .into(),
            ),
            Effect::LoadEvents { generation } => Some(
                HomeEvent::EventsLoaded {
                    generation,
                    result: self.client.all_events().await,
                }
                .into(),
            ),
            Effect::CreateEvent(new_event) => Some(
                HomeEvent::EventCreated(self.client.create_event(&new_event).await).into(),
            ),
            Effect::SetParticipation {
                event_id,
                user_name,
                direction,
            } => {
                let result = self
                    .client
                    .set_participation(direction, &event_id, &user_name)
                    .await;
                Some(
                    HomeEvent::ParticipationChanged {
                        event_id,
                        direction,
                        result,
                    }
                    .into(),
                )
            }
            Effect::ClearSession => {
                self.client.logout();
                None
            }
            Effect::RememberUsername(name) => {
                self.remember_username(name);
                None
            }
        }
    }

    /// Feeds effects and the events they produce through `app` until nothing
    /// is left to do. Effects run one at a time, in order.
    pub async fn settle(&self, app: &mut App, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            if let Some(event) = self.execute(effect).await {
                queue.extend(app.update(event));
            }
        }
    }

    /// Runs each effect on its own task; outcomes arrive on `tx`.
    pub fn spawn_all(&self, effects: Vec<Effect>, tx: &UnboundedSender<AppEvent>) {
        for effect in effects {
            let runtime = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(event) = runtime.execute(effect).await {
                    // The receiver only disappears on shutdown.
                    let _ = tx.send(event);
                }
            });
        }
    }

    fn remember_username(&self, name: String) {
        let Some(path) = &self.config_path else {
            return;
        };
        let result = Config::load_from(path).and_then(|mut config| {
            if config.username == name {
                return Ok(());
            }
            config.username = name;
            config.save_to(path)
        });
        if let Err(e) = result {
            warn!("Failed to remember username: {:#}", e);
        }
    }
}
