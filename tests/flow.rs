// Screen flows driven through the reducers and the runtime against a mock server.
use eventdesk::app::effects::Effect;
use eventdesk::app::events::{HomeEvent, LoginEvent, RegisterEvent};
use eventdesk::app::form::FormInput;
use eventdesk::app::home::{EventField, Phase};
use eventdesk::app::login::LoginField;
use eventdesk::app::register::{PASSWORD_MISMATCH, RegisterField};
use eventdesk::app::{App, Route};
use eventdesk::client::EventsClient;
use eventdesk::config::Config;
use eventdesk::model::EventId;
use eventdesk::runtime::Runtime;
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

const EVENTS: &str = r#"[
    {"id": 1, "name": "Jam", "description": "Music", "location": "Park", "date": "2024-06-01", "photoUrl": ""},
    {"id": 2, "name": "Talk", "description": "Rust", "location": "Hall", "date": "2024-06-02", "photoUrl": ""}
]"#;

fn runtime_for(server: &mockito::ServerGuard) -> Runtime {
    Runtime::new(EventsClient::new(&server.url(), false, Duration::from_secs(5)).unwrap())
}

async fn mock_user(server: &mut mockito::ServerGuard, interested: &str) -> mockito::Mock {
    server
        .mock("GET", "/api/user")
        .with_status(200)
        .with_body(format!(
            r#"{{"name": "ana", "interestedInEvents": {}}}"#,
            interested
        ))
        .create_async()
        .await
}

async fn mounted(runtime: &Runtime) -> App {
    let mut app = App::new("");
    let effects = app.start();
    runtime.settle(&mut app, effects).await;
    app
}

#[tokio::test]
async fn no_session_redirects_to_login_without_fetching_events() {
    let mut server = mockito::Server::new_async().await;
    let user = server
        .mock("GET", "/api/user")
        .with_status(401)
        .create_async()
        .await;
    let events = server
        .mock("GET", "/api/allEvents")
        .expect(0)
        .create_async()
        .await;

    let app = mounted(&runtime_for(&server)).await;

    assert_eq!(app.route, Route::Login);
    user.assert_async().await;
    events.assert_async().await;
}

#[tokio::test]
async fn login_lands_on_a_loaded_main_screen() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/login")
        .match_body(Matcher::Json(json!({"name": "ana", "password": "pw"})))
        .with_status(200)
        .with_header("set-cookie", "JSESSIONID=abc")
        .with_body(r#"{"name": "ana"}"#)
        .create_async()
        .await;
    let user = server
        .mock("GET", "/api/user")
        .match_header("cookie", "JSESSIONID=abc")
        .with_status(200)
        .with_body(r#"{"name": "ana", "interestedInEvents": [2]}"#)
        .create_async()
        .await;
    let _mock = server
        .mock("GET", "/api/allEvents")
        .with_status(200)
        .with_body(EVENTS)
        .create_async()
        .await;

    let runtime = runtime_for(&server).with_config_path(config_path.clone());
    let mut app = App::new("");
    app.navigate(Route::Login);
    for (field, value) in [(LoginField::Name, "ana"), (LoginField::Password, "pw")] {
        app.update(LoginEvent::Input(FormInput::Set(field, value.to_string())).into());
    }
    let effects = app.update(LoginEvent::Submit.into());
    runtime.settle(&mut app, effects).await;

    assert_eq!(app.route, Route::Home);
    assert_eq!(app.home.phase, Phase::Authenticated);
    assert_eq!(app.home.events.len(), 2);
    assert!(app.home.is_interested(&EventId::Number(2)));
    user.assert_async().await;
    assert_eq!(Config::load_from(&config_path).unwrap().username, "ana");
}

#[tokio::test]
async fn failed_login_stays_on_the_form() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/login")
        .with_status(500)
        .create_async()
        .await;
    let user = server
        .mock("GET", "/api/user")
        .expect(0)
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = App::new("ana");
    app.navigate(Route::Login);
    app.update(LoginEvent::Input(FormInput::Set(LoginField::Password, "pw".into())).into());
    let effects = app.update(LoginEvent::Submit.into());
    runtime.settle(&mut app, effects).await;

    assert_eq!(app.route, Route::Login);
    assert!(app.status().unwrap().contains("500"));
    user.assert_async().await;
}

#[tokio::test]
async fn password_mismatch_never_reaches_the_server() {
    let mut server = mockito::Server::new_async().await;
    let register = server
        .mock("POST", "/api/register")
        .expect(0)
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = App::new("");
    app.navigate(Route::Register);
    for (field, value) in [
        (RegisterField::Username, "ana"),
        (RegisterField::Password, "one"),
        (RegisterField::ConfirmPassword, "two"),
    ] {
        app.update(RegisterEvent::Input(FormInput::Set(field, value.to_string())).into());
    }
    let effects = app.update(RegisterEvent::Submit.into());
    runtime.settle(&mut app, effects).await;

    assert_eq!(app.register.alert.as_deref(), Some(PASSWORD_MISMATCH));
    assert_eq!(app.route, Route::Register);
    register.assert_async().await;
}

#[tokio::test]
async fn registration_leads_to_login() {
    let mut server = mockito::Server::new_async().await;
    let register = server
        .mock("POST", "/api/register")
        .match_body(Matcher::Json(json!({"name": "bo", "password": "pw"})))
        .with_status(200)
        .with_body(r#"{"name": "bo"}"#)
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = App::new("");
    app.navigate(Route::Register);
    for (field, value) in [
        (RegisterField::Username, "bo"),
        (RegisterField::Password, "pw"),
        (RegisterField::ConfirmPassword, "pw"),
    ] {
        app.update(RegisterEvent::Input(FormInput::Set(field, value.to_string())).into());
    }
    let effects = app.update(RegisterEvent::Submit.into());
    runtime.settle(&mut app, effects).await;

    assert_eq!(app.route, Route::Login);
    register.assert_async().await;
}

#[tokio::test]
async fn toggling_twice_adds_then_removes() {
    let mut server = mockito::Server::new_async().await;
    let _user = mock_user(&mut server, "[]").await;
    let _mock = server
        .mock("GET", "/api/allEvents")
        .with_status(200)
        .with_body(EVENTS)
        .create_async()
        .await;
    let add = server
        .mock("POST", "/api/addEvent")
        .match_body(Matcher::Json(json!({"eventId": 1, "name": "ana"})))
        .with_status(200)
        .create_async()
        .await;
    let remove = server
        .mock("POST", "/api/removeEvent")
        .match_body(Matcher::Json(json!({"eventId": 1, "name": "ana"})))
        .with_status(200)
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = mounted(&runtime).await;

    let effects = app.update(HomeEvent::Toggle(EventId::Number(1)).into());
    runtime.settle(&mut app, effects).await;
    assert_eq!(
        app.home.user.as_ref().unwrap().interested_in_events,
        vec![EventId::Number(1)]
    );

    let effects = app.update(HomeEvent::Toggle(EventId::Number(1)).into());
    runtime.settle(&mut app, effects).await;
    assert!(
        app.home
            .user
            .as_ref()
            .unwrap()
            .interested_in_events
            .is_empty()
    );

    add.assert_async().await;
    remove.assert_async().await;
}

#[tokio::test]
async fn rapid_toggles_issue_one_request() {
    let mut server = mockito::Server::new_async().await;
    let _user = mock_user(&mut server, "[]").await;
    let _mock = server
        .mock("GET", "/api/allEvents")
        .with_status(200)
        .with_body(EVENTS)
        .create_async()
        .await;
    let add = server
        .mock("POST", "/api/addEvent")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = mounted(&runtime).await;

    // Three clicks land before the first reply is processed.
    let mut effects = Vec::new();
    for _ in 0..3 {
        effects.extend(app.update(HomeEvent::Toggle(EventId::Number(2)).into()));
    }
    assert_eq!(effects.len(), 1);
    runtime.settle(&mut app, effects).await;

    assert_eq!(
        app.home.user.as_ref().unwrap().interested_in_events,
        vec![EventId::Number(2)]
    );
    add.assert_async().await;
}

#[tokio::test]
async fn created_event_is_appended_and_triggers_refresh() {
    let mut server = mockito::Server::new_async().await;
    let _user = mock_user(&mut server, "[]").await;
    let _mock = server
        .mock("GET", "/api/allEvents")
        .with_status(200)
        .with_body(EVENTS)
        .create_async()
        .await;
    let create = server
        .mock("POST", "/api/event")
        .match_body(Matcher::Json(json!({
            "name": "Picnic",
            "description": "Bring food",
            "location": "Lake",
            "date": "2024-08-10"
        })))
        .with_status(200)
        .with_body(
            r#"{"id": 3, "name": "Picnic", "description": "Bring food",
                "location": "Lake", "date": "2024-08-10", "photoUrl": ""}"#,
        )
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = mounted(&runtime).await;

    app.update(HomeEvent::ToggleModal.into());
    for (field, value) in [
        (EventField::Name, "Picnic"),
        (EventField::Description, "Bring food"),
        (EventField::Location, "Lake"),
        (EventField::Date, "2024-08-10"),
    ] {
        app.update(HomeEvent::ModalInput(FormInput::Set(field, value.to_string())).into());
    }

    let effects = app.update(HomeEvent::SubmitEvent.into());
    assert!(!app.home.modal_open);
    let [create_effect] = <[Effect; 1]>::try_from(effects).unwrap();
    let created = runtime.execute(create_effect).await.unwrap();
    let refresh = app.update(created);

    assert_eq!(app.home.events.len(), 3);
    assert_eq!(app.home.events[2].name, "Picnic");
    assert!(matches!(refresh.as_slice(), [Effect::LoadSession { .. }]));
    create.assert_async().await;
}

#[tokio::test]
async fn logout_forgets_the_cookie() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_header("set-cookie", "sid=1")
        .with_body("{}")
        .create_async()
        .await;
    let _user = mock_user(&mut server, "[]").await;
    let _mock = server
        .mock("GET", "/api/allEvents")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let runtime = runtime_for(&server);
    let mut app = App::new("ana");
    app.navigate(Route::Login);
    app.update(LoginEvent::Input(FormInput::Set(LoginField::Password, "pw".into())).into());
    let effects = app.update(LoginEvent::Submit.into());
    runtime.settle(&mut app, effects).await;
    assert!(runtime.client().has_session());

    let effects = app.update(HomeEvent::Logout.into());
    runtime.settle(&mut app, effects).await;
    assert_eq!(app.route, Route::Login);
    assert!(!runtime.client().has_session());
    assert_eq!(app.login.form.get(LoginField::Name), "ana");
}
