/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Gateway of the monitoring API (European cluster)
    pub const DEFAULT_BASE_URL: &'static str = "https://gateway.isolarcloud.eu";

    /// Measuring point holding the year-to-date yield, in Wh
    pub const DEFAULT_DATA_POINT: &'static str = "p2";

    /// `data_type` code for cumulative values
    pub const DATA_TYPE: &'static str = "2";

    /// `query_type` code for monthly granularity
    pub const QUERY_TYPE: &'static str = "2";

    /// `order` code for ascending timestamps
    pub const ORDER: &'static str = "0";

    /// DOM id of the chart container
    pub const CHART_ID: &'static str = "generation-chart";
}

