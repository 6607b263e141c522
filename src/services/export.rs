use crate::models::{error::AppError, generation::MonthlySeries};
use crate::services::api::HistoryQuery;
use gloo::file::{Blob, ObjectUrl};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

/// How long the object URL outlives the click that starts the download.
const REVOKE_DELAY_MS: u32 = 1_000;

pub const CSV_HEADER: [&str; 6] = [
    "Year",
    "Month",
    "Cumulative(Wh)",
    "Cumulative(kWh)",
    "Monthly(kWh)",
    "Calculation-description",
];

/// Renders the series as CSV, one row per month.
pub fn to_csv(series: &MonthlySeries) -> Result<String, AppError> {
    let export_err = |e: csv::Error| AppError::ExportError(format!("Failed to write CSV: {e}"));

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(export_err)?;

    for reading in series.readings() {
        writer
            .write_record([
                reading.timestamp.year().to_string(),
                reading.timestamp.month().to_string(),
                reading.cumulative_wh.to_string(),
                format!("{:.2}", reading.cumulative_kwh),
                format!("{:.2}", reading.monthly_kwh),
                reading.describe(),
            ])
            .map_err(export_err)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::ExportError(format!("Failed to flush CSV: {e}")))?;

    String::from_utf8(bytes).map_err(|e| AppError::ExportError(e.to_string()))
}

/// File name for an export of `query`, e.g. `generation_123_202401_202406.csv`.
pub fn file_name(query: &HistoryQuery) -> String {
    let ps_key: String = query
        .ps_key()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();

    format!(
        "generation_{ps_key}_{}_{}.csv",
        query.start().to_compact(),
        query.end().to_compact()
    )
}

/// Offers `contents` to the browser as a file download.
pub fn download_csv(file_name: &str, contents: &str) -> Result<(), AppError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::ExportError("No document available".to_string()))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(|| AppError::ExportError("Failed to create download link".to_string()))?;

    let body = document
        .body()
        .ok_or_else(|| AppError::ExportError("No document body available".to_string()))?;

    let url = ObjectUrl::from(Blob::new_with_options(contents, Some("text/csv;charset=utf-8")));
    anchor.set_href(&url);
    anchor.set_download(file_name);

    body.append_child(&anchor)
        .map_err(|e| AppError::ExportError(format!("Failed to attach download link: {e:?}")))?;
    anchor.click();
    anchor.remove();

    // Dropping the ObjectUrl revokes it; the download starts asynchronously
    Timeout::new(REVOKE_DELAY_MS, move || drop(url)).forget();

    Ok(())
}

/// Renders the series and downloads it.
pub fn export_series(series: &MonthlySeries, query: &HistoryQuery) -> Result<(), AppError> {
    let contents = to_csv(series)?;
    download_csv(&file_name(query), &contents)
}
