use chrono::NaiveDate;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::{error::AppError, period::YearMonth};
use crate::services::api::HistoryQuery;

/// Raw contents of the query form
#[derive(Clone, Debug, PartialEq)]
pub struct QueryFormValues {
    pub ps_key: String,
    pub data_point: String,
    /// `YYYY-MM`, as produced by `<input type="month">`
    pub start: String,
    pub end: String,
}

impl QueryFormValues {
    /// Year-to-date range ending in the month of `today`
    pub fn year_to_date(today: NaiveDate) -> Self {
        let end = YearMonth::from_date(today);
        Self {
            ps_key: String::new(),
            data_point: Config::DEFAULT_DATA_POINT.to_string(),
            start: end.january().to_input_value(),
            end: end.to_input_value(),
        }
    }

    pub fn to_query(&self) -> Result<HistoryQuery, AppError> {
        let start: YearMonth = self.start.parse()?;
        let end: YearMonth = self.end.parse()?;
        HistoryQuery::new(self.ps_key.as_str(), self.data_point.as_str(), start, end)
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Field {
    PsKey,
    DataPoint,
    Start,
    End,
}

#[derive(Properties, PartialEq)]
pub struct QueryFormProps {
    pub values: QueryFormValues,
    pub on_change: Callback<QueryFormValues>,
    pub on_submit: Callback<HistoryQuery>,
    #[prop_or(false)]
    pub disabled: bool,
}

#[function_component(QueryForm)]
pub fn query_form(props: &QueryFormProps) -> Html {
    let error = use_state(|| None::<String>);

    let on_input = |field: Field| {
        let values = props.values.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut values = values.clone();
            match field {
                Field::PsKey => values.ps_key = input.value(),
                Field::DataPoint => values.data_point = input.value(),
                Field::Start => values.start = input.value(),
                Field::End => values.end = input.value(),
            }
            on_change.emit(values);
        })
    };

    let on_submit = {
        let values = props.values.clone();
        let callback = props.on_submit.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            match values.to_query() {
                Ok(query) => {
                    error.set(None);
                    callback.emit(query);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        })
    };

    html! {
        <form class="query-form" onsubmit={on_submit}>
            <label>
                {"PS key"}
                <input
                    type="text"
                    placeholder="e.g. 1234567_1_1_1"
                    value={props.values.ps_key.clone()}
                    oninput={on_input(Field::PsKey)}
                />
            </label>
            <label>
                {"Data point"}
                <input
                    type="text"
                    value={props.values.data_point.clone()}
                    oninput={on_input(Field::DataPoint)}
                />
            </label>
            <label>
                {"From"}
                <input
                    type="month"
                    value={props.values.start.clone()}
                    oninput={on_input(Field::Start)}
                />
            </label>
            <label>
                {"To"}
                <input
                    type="month"
                    value={props.values.end.clone()}
                    oninput={on_input(Field::End)}
                />
            </label>
            <button type="submit" disabled={props.disabled}>{"Load data"}</button>
            if let Some(msg) = &*error {
                <p class="form-error">{"❌ "}{msg}</p>
            }
        </form>
    }
}
