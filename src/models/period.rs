use super::error::AppError;
use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A calendar month, ordered by (year, month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        // Rejects month 0 and 13+ along with years chrono can't represent
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| Self { year, month })
            .ok_or_else(|| AppError::ConfigError(format!("Invalid month: {year}-{month:02}")))
    }

    /// Month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u32 {
        self.month
    }

    /// First month of the same year.
    pub const fn january(&self) -> Self {
        Self {
            year: self.year,
            month: 1,
        }
    }

    /// Wire format used by the monitoring API, e.g. `202403`.
    pub fn to_compact(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// Value format of an HTML `<input type="month">`, e.g. `2024-03`.
    pub fn to_input_value(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Three-letter English month name.
    pub fn month_name(&self) -> &'static str {
        Month::try_from(u8::try_from(self.month).unwrap_or(1))
            .map(|m| &m.name()[..3])
            .unwrap_or("???")
    }

    /// Display label, e.g. `Mar 2024`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_compact())
    }
}

impl std::str::FromStr for YearMonth {
    type Err = AppError;

    /// Accepts `YYYYMM` and `YYYY-MM`. API timestamps sometimes carry a day
    /// or time suffix (`20240301`, `202403010000`), which is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || AppError::ConfigError(format!("Invalid month '{s}', expected YYYYMM"));

        let (year, month) = match s.split_once('-') {
            Some((year, rest)) => (year, rest.get(..2).ok_or_else(invalid)?),
            None => (s.get(..4).ok_or_else(invalid)?, s.get(4..6).ok_or_else(invalid)?),
        };

        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_compact())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s: String = Deserialize::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compact_and_dashed() {
        let compact: YearMonth = "202403".parse().unwrap();
        let dashed: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(compact, dashed);
        assert_eq!(compact.year(), 2024);
        assert_eq!(compact.month(), 3);
    }

    #[test]
    fn test_parse_ignores_day_suffix() {
        let ym: YearMonth = "20240315".parse().unwrap();
        assert_eq!(ym, YearMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2024".parse::<YearMonth>().is_err());
        assert!("202413".parse::<YearMonth>().is_err());
        assert!("202400".parse::<YearMonth>().is_err());
        assert!("abcd12".parse::<YearMonth>().is_err());
        assert!("".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let dec = YearMonth::new(2023, 12).unwrap();
        let jan = YearMonth::new(2024, 1).unwrap();
        let feb = YearMonth::new(2024, 2).unwrap();
        assert!(dec < jan);
        assert!(jan < feb);
    }

    #[test]
    fn test_formatting() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(ym.to_compact(), "202403");
        assert_eq!(ym.to_input_value(), "2024-03");
        assert_eq!(ym.label(), "Mar 2024");
        assert_eq!(ym.january().to_compact(), "202401");
    }

    #[test]
    fn test_serde_uses_compact_form() {
        let ym = YearMonth::new(2024, 9).unwrap();
        assert_eq!(serde_json::to_string(&ym).unwrap(), "\"202409\"");
        let back: YearMonth = serde_json::from_str("\"202409\"").unwrap();
        assert_eq!(back, ym);
    }
}
