use crate::models::generation::MonthlySeries;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub series: Rc<MonthlySeries>,
}

#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    let stats_result = use_memo(props.series.clone(), |series| series.stats());

    match &*stats_result {
        Ok(stats) => {
            let growth_class = if stats.growth_pct >= 0.0 {
                "summary-value growth-up"
            } else {
                "summary-value growth-down"
            };

            html! {
                <div class="data-summary">
                    <div class="summary-grid">
                        <div class="summary-item">
                            <h3>{"Total Generation"}</h3>
                            <p class="summary-value">{format!("{:.2} kWh", stats.total_kwh)}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Monthly Average"}</h3>
                            <p class="summary-value">{format!("{:.2} kWh", stats.mean_kwh)}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Best Month"}</h3>
                            <p class="summary-value">
                                {format!("{:.2} kWh", stats.max_kwh)}
                            </p>
                            <p class="summary-note">{stats.best_month.label()}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Lowest Month"}</h3>
                            <p class="summary-value">
                                {format!("{:.2} kWh", stats.min_kwh)}
                            </p>
                            <p class="summary-note">{stats.worst_month.label()}</p>
                        </div>
                        <div class="summary-item">
                            <h3>{"Cumulative Growth"}</h3>
                            <p class={growth_class}>{format!("{:+.2}%", stats.growth_pct)}</p>
                            <p class="summary-note">{format!("over {} month(s)", stats.months)}</p>
                        </div>
                    </div>
                </div>
            }
        }
        Err(e) => html! {
            <div class="data-summary error">
                <p>{"Error calculating summary: "}{e.to_string()}</p>
            </div>
        },
    }
}
