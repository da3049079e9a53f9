use chrono::{NaiveDate, NaiveDateTime};
use loan_calc_core::amortization::{compute, LoanRequest};
use loan_calc_core::api;
use loan_calc_core::reporting::{calculation_stats, summarize, CalculationRecord, StatsInput};
use loan_calc_core::settings::CalculatorSettings;
use rust_decimal_macros::dec;

// ===========================================================================
// Calculation log: request -> record -> dashboard statistics
// ===========================================================================

fn timestamp(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, day)
        .unwrap()
        .and_hms_opt(hour, 15, 0)
        .unwrap()
}

fn logged(id: u64, request: &LoanRequest, at: NaiveDateTime) -> CalculationRecord {
    let result = compute(
        request.principal,
        request.annual_rate_percent,
        request.term_months,
    )
    .unwrap();
    CalculationRecord::from_result(id, request, &result, at, Some("192.0.2.10".into())).unwrap()
}

fn sample_log() -> Vec<CalculationRecord> {
    let settings = CalculatorSettings::default();
    vec![
        logged(1, &settings.default_request(dec!(100000)), timestamp(16, 9)),
        logged(2, &settings.request(dec!(25000), Some(dec!(11)), Some(60)), timestamp(17, 14)),
        logged(3, &settings.request(dec!(5000), Some(dec!(0)), None), timestamp(18, 8)),
        logged(4, &settings.request(dec!(70000), None, Some(36)), timestamp(18, 17)),
    ]
}

#[test]
fn test_default_request_record() {
    let log = sample_log();
    assert_eq!(log[0].interest_rate, dec!(7.50));
    assert_eq!(log[0].loan_term, 12);
    assert_eq!(log[0].monthly_payment, dec!(8675.74));
    assert_eq!(log[2].total_interest, dec!(0.00));
}

#[test]
fn test_dashboard_statistics() {
    let log = sample_log();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let stats = summarize(&log, today, 20);

    assert_eq!(stats.total_calculations, 4);
    assert_eq!(stats.total_loan_amount, Some(dec!(200000.00)));
    assert_eq!(stats.avg_loan_amount, Some(dec!(50000.00)));
    assert_eq!(stats.calculations_today, 2);

    let ids: Vec<u64> = stats.recent_calculations.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);
}

#[test]
fn test_stats_envelope_from_json() {
    let log = sample_log();
    let raw = serde_json::json!({
        "records": log,
        "as_of": "2026-10-17",
        "recent_limit": 1,
    });
    let input: StatsInput = serde_json::from_value(raw).unwrap();
    let out = calculation_stats(&input).unwrap();

    assert_eq!(out.result.calculations_today, 1);
    assert_eq!(out.result.recent_calculations.len(), 1);
    assert_eq!(out.result.recent_calculations[0].id, 4);
    // Rows from the 18th post-date the as-of day.
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_stats_handler_reply() {
    let log = sample_log();
    let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    let resp = api::handle_stats(&log, today, 10);
    let json: serde_json::Value = serde_json::from_str(&resp.to_json().unwrap()).unwrap();

    assert_eq!(resp.status, api::STATUS_OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["total_calculations"], 4);
    assert_eq!(json["data"]["avg_loan_amount"], "50000.00");
}
