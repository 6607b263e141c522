use std::rc::Rc;
use yew::prelude::*;

use crate::models::generation::MonthlySeries;
use crate::services::api::{ApiConfig, HistoryQuery, fetch_monthly_generation};
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, PartialEq, Debug)]
pub enum DataState {
    Idle,
    Loading,
    Loaded(Rc<MonthlySeries>),
    Error(String),
}

impl DataState {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<MonthlySeries>> {
        match self {
            DataState::Loaded(series) => Some(series),
            _ => None,
        }
    }
}

/// Tracks which fetch is the latest one. Starting a fetch or clearing the
/// data makes every earlier request stale.
#[derive(Debug, Default)]
pub struct RequestGuard {
    current: u64,
}

impl RequestGuard {
    /// Starts a new request and returns its id
    pub fn begin(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    /// Marks every outstanding request as stale
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, id: u64) -> bool {
        self.current == id
    }
}

/// Handle returned by `use_generation` hook
#[derive(Clone, PartialEq)]
pub struct GenerationHandle {
    pub state: DataState,
    /// Query behind the current state, used for export file names
    pub query: Option<HistoryQuery>,
    pub fetch: Callback<HistoryQuery>,
    pub clear: Callback<()>,
}

#[hook]
pub fn use_generation(config: ApiConfig, token: Option<String>) -> GenerationHandle {
    let state = use_state(|| DataState::Idle);
    let query = use_state(|| None::<HistoryQuery>);
    let guard = use_mut_ref(RequestGuard::default);

    let fetch = {
        let state = state.clone();
        let query_state = query.clone();
        let guard = guard.clone();
        Callback::from(move |query: HistoryQuery| {
            let state = state.clone();
            let config = config.clone();
            let token = token.clone();
            let guard = guard.clone();
            let request_id = guard.borrow_mut().begin();

            state.set(DataState::Loading);
            query_state.set(Some(query.clone()));

            spawn_local(async move {
                gloo::console::log!(&format!(
                    "Fetching {} from {} to {}",
                    query.ps_key(),
                    query.start(),
                    query.end()
                ));

                let result = fetch_monthly_generation(config, token, query).await;

                // Logged out or superseded while the request was in flight
                if !guard.borrow().is_current(request_id) {
                    gloo::console::log!("Discarding stale generation response");
                    return;
                }

                match result {
                    Ok(series) => {
                        let clamped = series.clamped_count();
                        if clamped > 0 {
                            gloo::console::warn!(&format!(
                                "{clamped} month(s) had a lower cumulative value than the month before; reported as 0"
                            ));
                        }
                        gloo::console::log!(&format!("Loaded {} month(s)", series.len()));
                        state.set(DataState::Loaded(Rc::new(series)));
                    }
                    Err(e) => {
                        gloo::console::error!(&format!("Fetch failed: {e}"));
                        state.set(DataState::Error(e.to_string()));
                    }
                }
            });
        })
    };

    let clear = {
        let state = state.clone();
        let query = query.clone();
        let guard = guard.clone();
        Callback::from(move |_| {
            guard.borrow_mut().invalidate();
            state.set(DataState::Idle);
            query.set(None);
        })
    };

    GenerationHandle {
        state: (*state).clone(),
        query: (*query).clone(),
        fetch,
        clear,
    }
}
