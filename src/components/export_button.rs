use crate::models::generation::MonthlySeries;
use crate::services::{api::HistoryQuery, export::export_series};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExportButtonProps {
    pub series: Rc<MonthlySeries>,
    pub query: HistoryQuery,
}

/// Downloads the loaded series as CSV
#[function_component(ExportButton)]
pub fn export_button(props: &ExportButtonProps) -> Html {
    let error = use_state(|| None::<String>);

    let onclick = {
        let series = props.series.clone();
        let query = props.query.clone();
        let error = error.clone();
        Callback::from(move |_| match export_series(&series, &query) {
            Ok(()) => error.set(None),
            Err(e) => {
                web_sys::console::error_1(&format!("CSV export failed: {e}").into());
                error.set(Some(e.to_string()));
            }
        })
    };

    html! {
        <div class="export">
            <button class="secondary" {onclick} disabled={props.series.is_empty()}>
                {"⬇ Export CSV"}
            </button>
            if let Some(msg) = &*error {
                <span class="form-error">{msg}</span>
            }
        </div>
    }
}
