use super::{error::AppError, period::YearMonth};

const WH_PER_KWH: f64 = 1000.0;

/// Year-to-date running total reported by the monitoring API.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeReading {
    pub timestamp: YearMonth,
    pub cumulative_wh: f64,
}

impl CumulativeReading {
    pub fn new(timestamp: YearMonth, cumulative_wh: f64) -> Self {
        Self {
            timestamp,
            cumulative_wh,
        }
    }

    pub fn cumulative_kwh(&self) -> f64 {
        self.cumulative_wh / WH_PER_KWH
    }
}

/// How a monthly value was derived from the cumulative series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Calculation {
    /// No predecessor, the cumulative value is the month's generation.
    First,
    /// Difference to the previous month's cumulative value.
    Delta { previous_kwh: f64 },
    /// Previous cumulative value was higher (meter reset or correction).
    Clamped { previous_kwh: f64 },
}

/// Energy generated within a single month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyReading {
    pub timestamp: YearMonth,
    pub monthly_kwh: f64,
    pub cumulative_kwh: f64,
    pub cumulative_wh: f64,
    pub calculation: Calculation,
}

impl MonthlyReading {
    pub fn is_clamped(&self) -> bool {
        matches!(self.calculation, Calculation::Clamped { .. })
    }

    /// Human-readable account of how `monthly_kwh` was computed.
    pub fn describe(&self) -> String {
        match self.calculation {
            Calculation::First => {
                format!("First month: {:.2} kWh cumulative", self.cumulative_kwh)
            }
            Calculation::Delta { previous_kwh } => format!(
                "{:.2} - {:.2} = {:.2} kWh",
                self.cumulative_kwh, previous_kwh, self.monthly_kwh
            ),
            Calculation::Clamped { previous_kwh } => format!(
                "{:.2} - {:.2} = {:.2} kWh, clamped to 0",
                self.cumulative_kwh,
                previous_kwh,
                self.cumulative_kwh - previous_kwh
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub total_kwh: f64,
    pub mean_kwh: f64,
    pub max_kwh: f64,
    pub min_kwh: f64,
    pub best_month: YearMonth,
    pub worst_month: YearMonth,
    pub growth_pct: f64,
    pub months: usize,
}

/// Monthly generation derived from cumulative readings, sorted ascending.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MonthlySeries {
    data: Vec<MonthlyReading>,
}

impl MonthlySeries {
    /// Converts cumulative readings into per-month deltas.
    ///
    /// The input is left untouched. Readings are ordered by month first;
    /// when a month appears more than once the reading that comes last in
    /// the input is used. Negative deltas are reported as zero.
    pub fn from_cumulative(readings: &[CumulativeReading]) -> Self {
        let mut sorted = readings.to_vec();
        sorted.sort_by_key(|r| r.timestamp);

        // Stable sort keeps input order within a month, so keep the last one
        let mut deduped: Vec<CumulativeReading> = Vec::with_capacity(sorted.len());
        for reading in sorted {
            match deduped.last_mut() {
                Some(last) if last.timestamp == reading.timestamp => *last = reading,
                _ => deduped.push(reading),
            }
        }

        let mut previous: Option<f64> = None;
        let data = deduped
            .into_iter()
            .map(|reading| {
                let cumulative_kwh = reading.cumulative_kwh();
                let (monthly_kwh, calculation) = match previous {
                    None => (cumulative_kwh, Calculation::First),
                    Some(previous_kwh) if cumulative_kwh < previous_kwh => {
                        (0.0, Calculation::Clamped { previous_kwh })
                    }
                    Some(previous_kwh) => (
                        cumulative_kwh - previous_kwh,
                        Calculation::Delta { previous_kwh },
                    ),
                };
                previous = Some(cumulative_kwh);

                MonthlyReading {
                    timestamp: reading.timestamp,
                    monthly_kwh,
                    cumulative_kwh,
                    cumulative_wh: reading.cumulative_wh,
                    calculation,
                }
            })
            .collect();

        Self { data }
    }

    pub fn readings(&self) -> &[MonthlyReading] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clamped_count(&self) -> usize {
        self.data.iter().filter(|r| r.is_clamped()).count()
    }

    pub fn stats(&self) -> Result<GenerationStats, AppError> {
        let (first, last) = match (self.data.first(), self.data.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(AppError::DataError("No data available".to_string())),
        };

        let total_kwh: f64 = self.data.iter().map(|r| r.monthly_kwh).sum();
        let mean_kwh = total_kwh / self.data.len() as f64;

        // Earliest month wins ties on both ends
        let best = self.data.iter().fold(first, |best, r| {
            if r.monthly_kwh > best.monthly_kwh { r } else { best }
        });
        let worst = self.data.iter().fold(first, |worst, r| {
            if r.monthly_kwh < worst.monthly_kwh { r } else { worst }
        });

        let growth_pct = if first.cumulative_kwh == 0.0 {
            0.0
        } else {
            (last.cumulative_kwh - first.cumulative_kwh) / first.cumulative_kwh * 100.0
        };

        Ok(GenerationStats {
            total_kwh,
            mean_kwh,
            max_kwh: best.monthly_kwh,
            min_kwh: worst.monthly_kwh,
            best_month: best.timestamp,
            worst_month: worst.timestamp,
            growth_pct,
            months: self.data.len(),
        })
    }

    /// Chart series: month labels, monthly kWh and cumulative kWh.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>, Vec<f64>) {
        let labels = self.data.iter().map(|r| r.timestamp.label()).collect();
        let monthly = self.data.iter().map(|r| round2(r.monthly_kwh)).collect();
        let cumulative = self.data.iter().map(|r| round2(r.cumulative_kwh)).collect();
        (labels, monthly, cumulative)
    }
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
