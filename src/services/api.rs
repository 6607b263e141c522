use crate::config::Config;
use crate::models::{
    error::AppError,
    generation::{CumulativeReading, MonthlySeries},
    period::YearMonth,
    session::{Credentials, Session},
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::collections::HashMap;

// CONSTANTS
const LOGIN_PATH: &str = "/openapi/login";
const HISTORY_PATH: &str = "/openapi/getDevicePointsDayMonthYearDataList";
const SUCCESS_CODE: &str = "1";

// API CONFIGURATION
/// Configuration for the monitoring API client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    app_key: Option<String>,
    access_key: Option<String>,
}

impl ApiConfig {
    /// Creates a builder for constructing an `ApiConfig`.
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    /// Configuration baked in at build time through `SOLAR_API_BASE_URL`,
    /// `SOLAR_APP_KEY` and `SOLAR_ACCESS_KEY`.
    pub fn from_build_env() -> Self {
        let mut builder = Self::builder();
        if let Some(url) = option_env!("SOLAR_API_BASE_URL") {
            builder = builder.base_url(url);
        }
        if let Some(key) = option_env!("SOLAR_APP_KEY") {
            builder = builder.app_key(key);
        }
        if let Some(key) = option_env!("SOLAR_ACCESS_KEY") {
            builder = builder.access_key(key);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the authentication endpoint.
    pub fn login_url(&self) -> String {
        format!("{}{LOGIN_PATH}", self.base_url)
    }

    /// URL of the historical-data endpoint.
    pub fn history_url(&self) -> String {
        format!("{}{HISTORY_PATH}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
/// Builder for constructing an `ApiConfig` with custom settings.
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
    app_key: Option<String>,
    access_key: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom gateway URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the application key sent in every request body.
    pub fn app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Sets the access key sent as the `x-access-key` header.
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Builds the `ApiConfig`.
    pub fn build(self) -> ApiConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| Config::DEFAULT_BASE_URL.to_string());

        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            app_key: self.app_key.filter(|k| !k.is_empty()),
            access_key: self.access_key.filter(|k| !k.is_empty()),
        }
    }
}

// HISTORY QUERY
/// Parameters of one historical-data request.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryQuery {
    ps_key: String,
    data_point: String,
    start: YearMonth,
    end: YearMonth,
}

impl HistoryQuery {
    pub fn new(
        ps_key: impl Into<String>,
        data_point: impl Into<String>,
        start: YearMonth,
        end: YearMonth,
    ) -> Result<Self, AppError> {
        let ps_key = ps_key.into().trim().to_string();
        let data_point = data_point.into().trim().to_string();

        if ps_key.is_empty() {
            return Err(AppError::ConfigError("PS key is required".to_string()));
        }
        if data_point.is_empty() {
            return Err(AppError::ConfigError("Data point is required".to_string()));
        }
        if start > end {
            return Err(AppError::ConfigError(format!(
                "Start month {} is after end month {}",
                start.label(),
                end.label()
            )));
        }

        Ok(Self {
            ps_key,
            data_point,
            start,
            end,
        })
    }

    pub fn ps_key(&self) -> &str {
        &self.ps_key
    }

    pub fn data_point(&self) -> &str {
        &self.data_point
    }

    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn end(&self) -> YearMonth {
        self.end
    }
}

// API REQUEST TYPES
#[derive(Serialize, Debug)]
struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    appkey: Option<&'a str>,
    user_account: &'a str,
    user_password: &'a str,
}

#[derive(Serialize, Debug)]
struct HistoryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    appkey: Option<&'a str>,
    token: &'a str,
    ps_key_list: Vec<&'a str>,
    data_point: &'a str,
    start_time: String,
    end_time: String,
    data_type: &'static str,
    query_type: &'static str,
    order: &'static str,
}

impl<'a> HistoryRequest<'a> {
    fn new(config: &'a ApiConfig, token: &'a str, query: &'a HistoryQuery) -> Self {
        Self {
            appkey: config.app_key.as_deref(),
            token,
            ps_key_list: vec![query.ps_key()],
            data_point: query.data_point(),
            start_time: query.start().to_compact(),
            end_time: query.end().to_compact(),
            data_type: Config::DATA_TYPE,
            query_type: Config::QUERY_TYPE,
            order: Config::ORDER,
        }
    }
}

// API RESPONSE TYPES
#[derive(Deserialize, Debug)]
struct ApiResponse<T> {
    #[serde(deserialize_with = "deserialize_code")]
    result_code: String,
    result_msg: Option<String>,
    result_data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the payload of a successful response.
    fn into_data(self) -> Result<T, AppError> {
        if self.result_code != SUCCESS_CODE {
            return Err(AppError::ApiError {
                code: self.result_code,
                message: self
                    .result_msg
                    .unwrap_or_else(|| "no message returned".to_string()),
            });
        }

        self.result_data
            .ok_or_else(|| AppError::DataError("Response is missing result_data".to_string()))
    }
}

/// Result codes arrive as strings on most endpoints but as numbers on some.
fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected result_code '{other}'"
        ))),
    }
}

/// One entry of a point series. Field names vary between gateways, so the
/// raw map is kept and read through the accessors below.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
struct ApiPoint {
    fields: HashMap<String, Value>,
}

type HistoryData = HashMap<String, HashMap<String, Vec<ApiPoint>>>;

impl ApiPoint {
    fn timestamp(&self) -> Result<YearMonth, AppError> {
        let raw = self
            .fields
            .get("time_stamp")
            .or_else(|| self.fields.get("timestamp"))
            .unwrap_or(&Value::Null);

        let text = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };

        text.parse()
            .map_err(|_| AppError::DataError(format!("Invalid timestamp {raw}")))
    }

    /// Reads the energy value, either from `value` or from the key named
    /// after the data point. Returns `Ok(None)` for months without data.
    fn energy_wh(&self, data_point: &str) -> Result<Option<f64>, AppError> {
        let raw = self
            .fields
            .get("value")
            .filter(|v| !v.is_null())
            .or_else(|| self.fields.get(data_point))
            .unwrap_or(&Value::Null);

        let value = match raw {
            Value::Null => return Ok(None),
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s.trim().is_empty() || s.trim() == "--" => return Ok(None),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match value {
            Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
            _ => Err(AppError::DataError(format!("Invalid energy value {raw}"))),
        }
    }
}

// RESPONSE PARSING
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiResponse<T>, AppError> {
    serde_json::from_str(body)
        .map_err(|e| AppError::DataError(format!("Failed to parse response: {e}")))
}

/// Parses the body returned by the authentication endpoint.
pub fn parse_login_response(body: &str) -> Result<Session, AppError> {
    let session: Session = parse_envelope(body)?.into_data()?;

    if session.token.trim().is_empty() {
        return Err(AppError::MissingToken);
    }

    Ok(session)
}

/// Parses the body returned by the historical-data endpoint into
/// cumulative readings, in the order the API listed them.
pub fn parse_history_response(
    body: &str,
    query: &HistoryQuery,
) -> Result<Vec<CumulativeReading>, AppError> {
    let mut devices: HistoryData = parse_envelope(body)?.into_data()?;

    let mut points = match devices.remove(query.ps_key()) {
        Some(points) => points,
        // A single entry is the requested device under a differently formatted key
        None if devices.len() == 1 => devices.into_values().next().unwrap_or_default(),
        None => {
            return Err(AppError::DataError(format!(
                "No data returned for device {}",
                query.ps_key()
            )));
        }
    };

    let series = match points.remove(query.data_point()) {
        Some(series) => series,
        None if points.len() == 1 => points.into_values().next().unwrap_or_default(),
        None => {
            return Err(AppError::DataError(format!(
                "No data returned for point {}",
                query.data_point()
            )));
        }
    };

    let mut readings = Vec::with_capacity(series.len());
    for point in series {
        let timestamp = point.timestamp()?;
        if let Some(wh) = point.energy_wh(query.data_point())? {
            readings.push(CumulativeReading::new(timestamp, wh));
        }
    }

    Ok(readings)
}

// SOLAR CLOUD CLIENT
/// HTTP client for the monitoring API.
pub struct SolarCloudClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl SolarCloudClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    /// Creates a new client with the specified configuration.
    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Exchanges credentials for a session token.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let request = LoginRequest {
            appkey: self.config.app_key.as_deref(),
            user_account: credentials.account(),
            user_password: credentials.password(),
        };

        let body = self.post(&self.config.login_url(), &request).await?;
        parse_login_response(&body)
    }

    /// Fetches the cumulative readings described by `query`.
    pub async fn fetch_cumulative(
        &self,
        token: Option<&str>,
        query: &HistoryQuery,
    ) -> Result<Vec<CumulativeReading>, AppError> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AppError::MissingToken)?;

        let request = HistoryRequest::new(&self.config, token, query);
        let body = self.post(&self.config.history_url(), &request).await?;
        parse_history_response(&body, query)
    }

    /// Fetches cumulative readings and converts them into monthly generation.
    pub async fn fetch_monthly(
        &self,
        token: Option<&str>,
        query: &HistoryQuery,
    ) -> Result<MonthlySeries, AppError> {
        let readings = self.fetch_cumulative(token, query).await?;
        Ok(MonthlySeries::from_cumulative(&readings))
    }

    /// Executes a single POST and returns the response body.
    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<String, AppError> {
        let mut request = self.http.post(url).json(body);
        if let Some(access_key) = &self.config.access_key {
            request = request.header("x-access-key", access_key);
        }

        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read response: {e}")))
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::NetworkError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::NetworkError(format!("Request error: {error}"))
        } else {
            AppError::NetworkError(format!("Connection failed: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            400..=499 => AppError::NetworkError(format!("Client error {status}: {body}")),
            500..=599 => AppError::NetworkError(format!("Server error {status}: {body}")),
            _ => AppError::NetworkError(format!("Unexpected status {status}: {body}")),
        }
    }
}

// CONVENIENCE FUNCTIONS
/// Logs in using the given configuration.
pub async fn login(config: ApiConfig, credentials: Credentials) -> Result<Session, AppError> {
    SolarCloudClient::with_config(config)?
        .login(&credentials)
        .await
}

/// Fetches and converts monthly generation using the given configuration.
pub async fn fetch_monthly_generation(
    config: ApiConfig,
    token: Option<String>,
    query: HistoryQuery,
) -> Result<MonthlySeries, AppError> {
    SolarCloudClient::with_config(config)?
        .fetch_monthly(token.as_deref(), &query)
        .await
}
