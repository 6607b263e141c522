use crate::models::generation::MonthlySeries;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GenerationTableProps {
    pub series: Rc<MonthlySeries>,
    /// Adds a column explaining each monthly value
    #[prop_or(false)]
    pub show_details: bool,
}

#[function_component(GenerationTable)]
pub fn generation_table(props: &GenerationTableProps) -> Html {
    let total: f64 = props.series.readings().iter().map(|r| r.monthly_kwh).sum();

    html! {
        <div class="table-container">
            <table class="generation-table">
                <thead>
                    <tr>
                        <th>{"Month"}</th>
                        <th class="numeric">{"Cumulative (kWh)"}</th>
                        <th class="numeric">{"Monthly (kWh)"}</th>
                        if props.show_details {
                            <th>{"Calculation"}</th>
                        }
                    </tr>
                </thead>
                <tbody>
                    {
                        props.series.readings().iter().map(|r| {
                            let row_class = if r.is_clamped() { "clamped" } else { "" };
                            html! {
                                <tr key={r.timestamp.to_compact()} class={row_class}>
                                    <td>{r.timestamp.label()}</td>
                                    <td class="numeric">{format!("{:.2}", r.cumulative_kwh)}</td>
                                    <td class="numeric">{format!("{:.2}", r.monthly_kwh)}</td>
                                    if props.show_details {
                                        <td class="calculation">{r.describe()}</td>
                                    }
                                </tr>
                            }
                        }).collect::<Html>()
                    }
                </tbody>
                <tfoot>
                    <tr>
                        <th>{"Total"}</th>
                        <th></th>
                        <th class="numeric">{format!("{:.2}", total)}</th>
                        if props.show_details {
                            <th></th>
                        }
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}
