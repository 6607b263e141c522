use crate::hooks::use_generation::DataState;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub state: DataState,
}

#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.state {
        DataState::Idle => html! {
            <div class="status idle">
                <p>{"Log in and choose a device to load generation data"}</p>
            </div>
        },
        DataState::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading data..."}</p>
            </div>
        },
        DataState::Loaded(series) if series.is_empty() => html! {
            <div class="status warning">
                <p>{"⚠️ No readings found for the selected period"}</p>
            </div>
        },
        DataState::Loaded(series) => html! {
            <div class="status success">
                <p>{format!("✅ Loaded {} month(s)", series.len())}</p>
            </div>
        },
        DataState::Error(msg) => html! {
            <div class="status error">
                <p>{"❌ Error: "}{msg}</p>
            </div>
        },
    }
}
