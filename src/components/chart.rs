use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, LineStyleType,
        SplitLine, TextStyle, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::{Bar, Line},
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::Config;
use crate::models::generation::MonthlySeries;

const AXIS_COLOR: &str = "#6b7280";
const GRID_COLOR: &str = "#e5e7eb";
const BAR_COLOR: &str = "#ffb000";
const LINE_COLOR: &str = "#648fff";

type SeriesData = (Vec<String>, Vec<f64>, Vec<f64>);

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub series: Rc<MonthlySeries>,
}

#[function_component(Chart)]
pub fn chart(props: &ChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(props.series.clone(), |series| series.series_data());

    {
        let container_ref = container_ref.clone();

        use_effect_with((series_data, container_ref), |(series_data, container_ref)| {
            let listener = container_ref.cast::<HtmlElement>().and_then(|container| {
                render_chart(&container, series_data);

                let series_data = series_data.clone();
                web_sys::window().map(|window| {
                    EventListener::new(&window, "resize", move |_| {
                        render_chart(&container, &series_data);
                    })
                })
            });

            move || drop(listener)
        });
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={Config::CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, series_data: &SeriesData) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(series_data);
    if let Err(e) = WasmRenderer::new(width, height).render(Config::CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(series_data: &SeriesData) -> CharmingChart {
    let (labels, monthly, cumulative) = series_data;

    let value_axis = |name: &str| {
        Axis::new()
            .type_(AxisType::Value)
            .name(name)
            .axis_label(AxisLabel::new().color(AXIS_COLOR))
            .split_line(
                SplitLine::new().line_style(
                    LineStyle::new()
                        .color(GRID_COLOR)
                        .type_(LineStyleType::Dashed),
                ),
            )
    };

    CharmingChart::new()
        .title(
            Title::new()
                .text("Monthly Generation")
                .left("center")
                .text_style(TextStyle::new().font_size(16).color("#1f2937")),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().bottom("0"))
        .grid(
            Grid::new()
                .left("8%")
                .right("8%")
                .bottom("15%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(labels.clone())
                .axis_label(AxisLabel::new().rotate(45).color(AXIS_COLOR)),
        )
        .y_axis(value_axis("Monthly kWh"))
        .y_axis(value_axis("Cumulative kWh"))
        .series(
            Bar::new()
                .name("Monthly (kWh)")
                .data(monthly.clone())
                .bar_width("60%")
                .item_style(ItemStyle::new().color(BAR_COLOR)),
        )
        .series(
            Line::new()
                .name("Cumulative (kWh)")
                .data(cumulative.clone())
                .y_axis_index(1)
                .item_style(ItemStyle::new().color(LINE_COLOR)),
        )
}
