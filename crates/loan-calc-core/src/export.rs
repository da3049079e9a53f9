use chrono::NaiveDate;

use crate::amortization::AmortizationEntry;
use crate::error::LoanCalcError;
use crate::reporting::CalculationRecord;
use crate::types::Money;
use crate::LoanCalcResult;

pub const SCHEDULE_HEADERS: [&str; 5] = ["Month", "Payment", "Principal", "Interest", "Balance"];

pub const RECORD_HEADERS: [&str; 9] = [
    "ID",
    "Loan Amount",
    "Interest Rate",
    "Loan Term",
    "Monthly Payment",
    "Total Payment",
    "Total Interest",
    "Calculation Date",
    "User IP",
];

/// Download name for a full log export taken on `date`.
pub fn records_file_name(date: NaiveDate) -> String {
    format!("loan-calculator-data-{}.csv", date.format("%Y-%m-%d"))
}

/// Schedule as CSV, money columns prefixed with `currency_symbol`.
pub fn schedule_csv(schedule: &[AmortizationEntry], currency_symbol: &str) -> LoanCalcResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(SCHEDULE_HEADERS).map_err(csv_error)?;

    let money = |v: &Money| format!("{currency_symbol} {v}");
    for entry in schedule {
        wtr.write_record([
            entry.month.to_string(),
            money(&entry.payment),
            money(&entry.principal_portion),
            money(&entry.interest_portion),
            money(&entry.remaining_balance),
        ])
        .map_err(csv_error)?;
    }

    into_string(wtr)
}

/// Calculation log as CSV, one row per record in the order given.
pub fn records_csv(records: &[CalculationRecord]) -> LoanCalcResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(RECORD_HEADERS).map_err(csv_error)?;

    for rec in records {
        wtr.write_record([
            rec.id.to_string(),
            rec.loan_amount.to_string(),
            rec.interest_rate.to_string(),
            rec.loan_term.to_string(),
            rec.monthly_payment.to_string(),
            rec.total_payment.to_string(),
            rec.total_interest.to_string(),
            rec.calculation_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            rec.user_ip.clone().unwrap_or_default(),
        ])
        .map_err(csv_error)?;
    }

    into_string(wtr)
}

fn into_string(wtr: csv::Writer<Vec<u8>>) -> LoanCalcResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| LoanCalcError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LoanCalcError::SerializationError(e.to_string()))
}

fn csv_error(e: csv::Error) -> LoanCalcError {
    LoanCalcError::SerializationError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute;
    use rust_decimal_macros::dec;

    #[test]
    fn test_records_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 8).unwrap();
        assert_eq!(records_file_name(date), "loan-calculator-data-2026-10-08.csv");
    }

    #[test]
    fn test_schedule_csv() {
        let result = compute(dec!(12000), dec!(0), 12).unwrap();
        let csv = schedule_csv(&result.schedule, "R").unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "Month,Payment,Principal,Interest,Balance");
        assert_eq!(lines[1], "1,R 1000.00,R 1000.00,R 0.00,R 11000.00");
        assert_eq!(lines[12], "12,R 1000.00,R 1000.00,R 0.00,R 0.00");
    }

    #[test]
    fn test_records_csv_quotes_fields() {
        let rec = CalculationRecord {
            id: 1,
            loan_amount: dec!(2500.00),
            interest_rate: dec!(9.50),
            loan_term: 24,
            monthly_payment: dec!(114.79),
            total_payment: dec!(2754.96),
            total_interest: dec!(254.96),
            calculation_date: NaiveDate::from_ymd_opt(2026, 3, 14)
                .unwrap()
                .and_hms_opt(9, 5, 0)
                .unwrap(),
            user_ip: Some("unknown, proxied".into()),
        };
        let csv = records_csv(&[rec]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Loan Amount,Interest Rate"));
        assert_eq!(
            lines[1],
            "1,2500.00,9.50,24,114.79,2754.96,254.96,2026-03-14 09:05:00,\"unknown, proxied\""
        );
    }

    #[test]
    fn test_records_csv_empty() {
        let csv = records_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
