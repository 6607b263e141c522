use chrono::Utc;
use yew::prelude::*;

use solar_dashboard::components::{
    QueryFormValues, ViewMode, chart::Chart, export_button::ExportButton,
    generation_table::GenerationTable, login_form::LoginForm, query_form::QueryForm,
    status::Status, summary::Summary, view_toggle::ViewToggle,
};
use solar_dashboard::hooks::{use_generation::use_generation, use_session::use_session};
use solar_dashboard::services::api::ApiConfig;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| ApiConfig::from_build_env());
    let session = use_session((*config).clone());
    let token = session.state.token();
    let generation = use_generation((*config).clone(), token.clone());

    let form = use_state(|| QueryFormValues::year_to_date(Utc::now().date_naive()));
    let view = use_state(ViewMode::default);
    let show_details = use_state(|| false);

    // Load once per login when the form is already filled in
    {
        let fetch = generation.fetch.clone();
        let clear = generation.clear.clone();
        let form = (*form).clone();
        use_effect_with(token.clone(), move |token| {
            match (token, form.to_query()) {
                (Some(_), Ok(query)) => fetch.emit(query),
                (None, _) => clear.emit(()),
                _ => {}
            }
            || ()
        });
    }

    let on_form_change = {
        let form = form.clone();
        Callback::from(move |values| form.set(values))
    };

    let on_view_change = {
        let view = view.clone();
        Callback::from(move |mode| view.set(mode))
    };

    let on_toggle_details = {
        let show_details = show_details.clone();
        Callback::from(move |_| show_details.set(!*show_details))
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Solar Generation Dashboard"}</h1>
            </header>

            <main class="app-main">
                <section class="login-section">
                    <h2>{"Account"}</h2>
                    <LoginForm
                        state={session.state.clone()}
                        on_login={session.login.clone()}
                        on_logout={session.logout.clone()}
                    />
                </section>

                if token.is_some() {
                    <section class="query-section">
                        <h2>{"Device"}</h2>
                        <QueryForm
                            values={(*form).clone()}
                            on_change={on_form_change}
                            on_submit={generation.fetch.clone()}
                            disabled={generation.state.is_loading()}
                        />
                    </section>
                }

                <section class="status-section">
                    <h2>{"Status"}</h2>
                    <Status state={generation.state.clone()} />
                </section>

                if let Some(series) = generation.state.data().filter(|s| !s.is_empty()) {
                    <section class="data-section">
                        <h2>{"Summary"}</h2>
                        <Summary series={series.clone()} />
                    </section>

                    <section class="view-section">
                        <div class="view-controls">
                            <ViewToggle
                                mode={*view}
                                on_change={on_view_change}
                                show_details={*show_details}
                                on_toggle_details={on_toggle_details}
                            />
                            if let Some(query) = generation.query.clone() {
                                <ExportButton series={series.clone()} {query} />
                            }
                        </div>

                        if *view == ViewMode::Chart {
                            <Chart series={series.clone()} />
                        } else {
                            <GenerationTable series={series.clone()} show_details={*show_details} />
                        }
                    </section>
                }
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
