#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use solar_dashboard::components::QueryFormValues;
    use solar_dashboard::hooks::use_generation::{DataState, RequestGuard};
    use solar_dashboard::hooks::use_session::SessionState;
    use solar_dashboard::models::{
        error::AppError,
        generation::{Calculation, CumulativeReading, MonthlySeries},
        period::YearMonth,
        session::Session,
    };
    use std::rc::Rc;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    // Jan-Apr with a dip in March
    fn create_test_readings() -> Vec<CumulativeReading> {
        vec![
            CumulativeReading::new(ym("202401"), 1_000_000.0),
            CumulativeReading::new(ym("202402"), 1_500_000.0),
            CumulativeReading::new(ym("202403"), 1_400_000.0),
            CumulativeReading::new(ym("202404"), 2_000_000.0),
        ]
    }

    fn monthly_values(series: &MonthlySeries) -> Vec<f64> {
        series.readings().iter().map(|r| r.monthly_kwh).collect()
    }

    // ===== Error Type Tests =====

    #[test]
    fn test_app_error_display() {
        let error = AppError::NetworkError("Connection refused".to_string());
        assert_eq!(error.to_string(), "Network error: Connection refused");

        let error = AppError::ApiError {
            code: "E900".to_string(),
            message: "invalid password".to_string(),
        };
        assert_eq!(error.to_string(), "API error E900: invalid password");

        assert_eq!(
            AppError::MissingToken.to_string(),
            "Not logged in: no session token available"
        );
    }

    // ===== Transform Tests =====

    #[test]
    fn test_monthly_values_with_clamping() {
        let series = MonthlySeries::from_cumulative(&create_test_readings());

        assert_eq!(monthly_values(&series), vec![1000.0, 500.0, 0.0, 600.0]);
        assert!(series.readings()[2].is_clamped());
        assert_eq!(series.clamped_count(), 1);
    }

    #[test]
    fn test_unsorted_input_matches_sorted() {
        let sorted = create_test_readings();
        let unsorted = vec![
            sorted[2].clone(),
            sorted[0].clone(),
            sorted[3].clone(),
            sorted[1].clone(),
        ];

        assert_eq!(
            MonthlySeries::from_cumulative(&unsorted),
            MonthlySeries::from_cumulative(&sorted)
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let readings = vec![
            CumulativeReading::new(ym("202403"), 3000.0),
            CumulativeReading::new(ym("202401"), 1000.0),
        ];
        let before = readings.clone();
        let _ = MonthlySeries::from_cumulative(&readings);
        assert_eq!(readings, before);
    }

    #[test]
    fn test_empty_input() {
        let series = MonthlySeries::from_cumulative(&[]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
    }

    #[test]
    fn test_length_and_timestamps_preserved() {
        let readings = create_test_readings();
        let series = MonthlySeries::from_cumulative(&readings);

        assert_eq!(series.len(), readings.len());
        for (reading, monthly) in readings.iter().zip(series.readings()) {
            assert_eq!(reading.timestamp, monthly.timestamp);
            assert_eq!(reading.cumulative_kwh(), monthly.cumulative_kwh);
        }
    }

    #[test]
    fn test_first_value_and_calculation_kinds() {
        let series = MonthlySeries::from_cumulative(&create_test_readings());
        let readings = series.readings();

        assert_eq!(readings[0].monthly_kwh, readings[0].cumulative_kwh);
        assert_eq!(readings[0].calculation, Calculation::First);
        assert_eq!(
            readings[1].calculation,
            Calculation::Delta {
                previous_kwh: 1000.0
            }
        );
        assert_eq!(
            readings[2].calculation,
            Calculation::Clamped {
                previous_kwh: 1500.0
            }
        );
        // Next delta is against the dipped value, not the earlier peak
        assert_eq!(
            readings[3].calculation,
            Calculation::Delta {
                previous_kwh: 1400.0
            }
        );
    }

    #[test]
    fn test_sum_without_clamping_telescopes() {
        let readings = vec![
            CumulativeReading::new(ym("202405"), 2_345_678.0),
            CumulativeReading::new(ym("202406"), 2_900_001.5),
            CumulativeReading::new(ym("202407"), 3_500_000.0),
            CumulativeReading::new(ym("202408"), 4_012_345.25),
        ];
        let series = MonthlySeries::from_cumulative(&readings);
        let total: f64 = monthly_values(&series).iter().sum();

        let first = series.readings()[0].cumulative_kwh;
        let last = series.readings()[3].cumulative_kwh;
        let expected = last - first + series.readings()[0].monthly_kwh;

        assert!((total - expected).abs() < 1e-9);
        assert!(monthly_values(&series).iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn test_readings_across_year_boundary_are_ordered() {
        let series = MonthlySeries::from_cumulative(&[
            CumulativeReading::new(ym("202401"), 500.0),
            CumulativeReading::new(ym("202312"), 9000.0),
        ]);

        assert_eq!(series.readings()[0].timestamp, ym("202312"));
        assert_eq!(series.readings()[1].timestamp, ym("202401"));
        // Year-to-date counter restarts in January
        assert!(series.readings()[1].is_clamped());
    }

    // ===== Stats Tests =====

    #[test]
    fn test_stats() {
        let series = MonthlySeries::from_cumulative(&create_test_readings());
        let stats = series.stats().unwrap();

        assert_eq!(stats.total_kwh, 2100.0);
        assert_eq!(stats.mean_kwh, 525.0);
        assert_eq!(stats.max_kwh, 1000.0);
        assert_eq!(stats.min_kwh, 0.0);
        assert_eq!(stats.best_month, ym("202401"));
        assert_eq!(stats.worst_month, ym("202403"));
        assert_eq!(stats.growth_pct, 100.0);
        assert_eq!(stats.months, 4);
    }

    #[test]
    fn test_stats_growth_zero_when_first_is_zero() {
        let series = MonthlySeries::from_cumulative(&[
            CumulativeReading::new(ym("202401"), 0.0),
            CumulativeReading::new(ym("202402"), 5000.0),
        ]);
        assert_eq!(series.stats().unwrap().growth_pct, 0.0);
    }

    #[test]
    fn test_stats_empty_series() {
        let series = MonthlySeries::default();
        assert!(matches!(series.stats(), Err(AppError::DataError(_))));
    }

    #[test]
    fn test_series_data_rounds_for_display() {
        let series = MonthlySeries::from_cumulative(&[
            CumulativeReading::new(ym("202401"), 1234.567),
            CumulativeReading::new(ym("202402"), 2469.134),
        ]);
        let (labels, monthly, cumulative) = series.series_data();

        assert_eq!(labels, vec!["Jan 2024", "Feb 2024"]);
        assert_eq!(monthly, vec![1.23, 1.23]);
        assert_eq!(cumulative, vec![1.23, 2.47]);
    }

    // ===== State Tests =====

    #[test]
    fn test_data_state_data_extraction() {
        let series = Rc::new(MonthlySeries::from_cumulative(&create_test_readings()));
        let loaded = DataState::Loaded(series.clone());

        assert_eq!(loaded.data(), Some(&series));
        assert!(!loaded.is_loading());
        assert!(DataState::Loading.is_loading());
        assert!(DataState::Idle.data().is_none());
        assert!(DataState::Error("Test error".to_string()).data().is_none());
    }

    #[test]
    fn test_request_guard_latest_fetch_wins() {
        let mut guard = RequestGuard::default();
        let older = guard.begin();
        let newer = guard.begin();

        assert!(!guard.is_current(older));
        assert!(guard.is_current(newer));
    }

    #[test]
    fn test_request_guard_clear_drops_in_flight_result() {
        let mut guard = RequestGuard::default();
        let in_flight = guard.begin();
        assert!(guard.is_current(in_flight));

        // Logout clears the data while the request is still pending
        guard.invalidate();
        assert!(!guard.is_current(in_flight));

        let next = guard.begin();
        assert!(guard.is_current(next));
        assert_ne!(next, in_flight);
    }

    #[test]
    fn test_session_state_token() {
        let session = Session {
            token: "tok-123".to_string(),
            user_name: None,
            email: Some("owner@example.com".to_string()),
        };
        let active = SessionState::Active(Rc::new(session));

        assert_eq!(active.token().as_deref(), Some("tok-123"));
        assert_eq!(active.session().unwrap().display_name(), "owner@example.com");
        assert!(SessionState::LoggedOut.token().is_none());
        assert!(SessionState::LoggingIn.is_logging_in());
    }

    // ===== Query Form Tests =====

    #[test]
    fn test_query_form_defaults_to_year_to_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let values = QueryFormValues::year_to_date(today);

        assert_eq!(values.start, "2024-01");
        assert_eq!(values.end, "2024-06");
        // No device selected yet
        assert!(values.to_query().is_err());
    }

    #[test]
    fn test_query_form_to_query() {
        let values = QueryFormValues {
            ps_key: " 1234567_1_1_1 ".to_string(),
            data_point: "p2".to_string(),
            start: "2024-01".to_string(),
            end: "2024-04".to_string(),
        };
        let query = values.to_query().unwrap();

        assert_eq!(query.ps_key(), "1234567_1_1_1");
        assert_eq!(query.start(), ym("202401"));
        assert_eq!(query.end(), ym("202404"));
    }

    #[test]
    fn test_query_form_rejects_reversed_range() {
        let values = QueryFormValues {
            ps_key: "ps".to_string(),
            data_point: "p2".to_string(),
            start: "2024-05".to_string(),
            end: "2024-04".to_string(),
        };
        assert!(matches!(values.to_query(), Err(AppError::ConfigError(_))));
    }
}
