use yew::prelude::*;

/// How the loaded series is presented
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Chart,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Table => "Table",
            ViewMode::Chart => "Chart",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ViewToggleProps {
    pub mode: ViewMode,
    pub on_change: Callback<ViewMode>,
    pub show_details: bool,
    pub on_toggle_details: Callback<()>,
}

/// Table/chart switch plus the calculation-details toggle
#[function_component(ViewToggle)]
pub fn view_toggle(props: &ViewToggleProps) -> Html {
    let buttons = [ViewMode::Table, ViewMode::Chart]
        .into_iter()
        .map(|mode| {
            let on_change = props.on_change.clone();
            let class = if mode == props.mode {
                "view-button active"
            } else {
                "view-button"
            };
            html! {
                <button
                    {class}
                    aria-pressed={(mode == props.mode).to_string()}
                    onclick={Callback::from(move |_| on_change.emit(mode))}
                >
                    {mode.label()}
                </button>
            }
        })
        .collect::<Html>();

    let on_details = {
        let toggle = props.on_toggle_details.clone();
        Callback::from(move |_| toggle.emit(()))
    };

    html! {
        <div class="view-toggle">
            {buttons}
            if props.mode == ViewMode::Table {
                <button class="secondary" onclick={on_details}>
                    { if props.show_details { "Hide calculation" } else { "Show calculation" } }
                </button>
            }
        </div>
    }
}
