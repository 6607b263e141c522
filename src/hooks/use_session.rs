use std::rc::Rc;
use yew::prelude::*;

use crate::models::session::{Credentials, Session};
use crate::services::api::{self, ApiConfig};
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, PartialEq, Debug)]
pub enum SessionState {
    LoggedOut,
    LoggingIn,
    Active(Rc<Session>),
    Error(String),
}

impl SessionState {
    /// Returns the session if logged in
    pub fn session(&self) -> Option<&Rc<Session>> {
        match self {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Returns the bearer token if logged in
    pub fn token(&self) -> Option<String> {
        self.session().map(|s| s.token.clone())
    }

    pub fn is_logging_in(&self) -> bool {
        matches!(self, SessionState::LoggingIn)
    }
}

/// Handle returned by `use_session` hook
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    pub state: SessionState,
    /// Takes (account, password)
    pub login: Callback<(String, String)>,
    pub logout: Callback<()>,
}

#[hook]
pub fn use_session(config: ApiConfig) -> SessionHandle {
    let state = use_state(|| SessionState::LoggedOut);

    let login = {
        let state = state.clone();
        Callback::from(move |(account, password): (String, String)| {
            let credentials = match Credentials::new(account, password) {
                Ok(credentials) => credentials,
                Err(e) => {
                    state.set(SessionState::Error(e.to_string()));
                    return;
                }
            };

            let state = state.clone();
            let config = config.clone();
            state.set(SessionState::LoggingIn);

            spawn_local(async move {
                let account = credentials.account().to_string();
                match api::login(config, credentials).await {
                    Ok(session) => {
                        gloo::console::log!(&format!(
                            "Logged in as {}",
                            session.display_name()
                        ));
                        state.set(SessionState::Active(Rc::new(session)));
                    }
                    Err(e) => {
                        gloo::console::warn!(&format!("Login failed for {account}: {e}"));
                        state.set(SessionState::Error(e.to_string()));
                    }
                }
            });
        })
    };

    let logout = {
        let state = state.clone();
        Callback::from(move |_| state.set(SessionState::LoggedOut))
    };

    SessionHandle {
        state: (*state).clone(),
        login,
        logout,
    }
}
