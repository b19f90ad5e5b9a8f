use chrono::Datelike;
use core_types::{Month, ReportRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::warn;

/// Sums a metric per calendar month across all records.
///
/// The metric accessor selects which field is aggregated; records where the
/// field is absent contribute zero through the accessor's default. The month
/// key ignores the year, so the same month from different years lands in one
/// bucket. Because the key is a `Month` and the map is a `BTreeMap`, the
/// result iterates in canonical chronological order no matter what order the
/// records arrived in, and only months that actually appeared are present.
pub fn monthly_totals<F>(records: &[ReportRecord], metric: F) -> BTreeMap<Month, Decimal>
where
    F: Fn(&ReportRecord) -> Decimal,
{
    let mut totals = BTreeMap::new();

    for record in records {
        let month = match Month::try_from(record.created_at.month()) {
            Ok(month) => month,
            Err(e) => {
                // A record with an unusable period is skipped, never fatal.
                warn!(error = %e, "skipping report record with invalid period");
                continue;
            }
        };
        *totals.entry(month).or_insert(Decimal::ZERO) += metric(record);
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record(year: i32, month: u32, revenue: Option<Decimal>) -> ReportRecord {
        let mut record =
            ReportRecord::new(Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap());
        record.revenue = revenue;
        record
    }

    #[test]
    fn sums_records_within_a_month() {
        let records = vec![
            record(2024, 3, Some(dec!(100))),
            record(2024, 3, Some(dec!(50))),
        ];

        let totals = monthly_totals(&records, ReportRecord::revenue);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&Month::Mar], dec!(150));
    }

    #[test]
    fn same_month_across_years_shares_a_bucket() {
        let records = vec![
            record(2023, 1, Some(dec!(100))),
            record(2024, 1, Some(dec!(50))),
        ];

        let totals = monthly_totals(&records, ReportRecord::revenue);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&Month::Jan], dec!(150));
    }

    #[test]
    fn output_is_independent_of_input_order() {
        let mut records = vec![
            record(2024, 11, Some(dec!(10))),
            record(2024, 2, Some(dec!(20))),
            record(2024, 7, Some(dec!(30))),
            record(2024, 2, Some(dec!(5))),
        ];

        let forward = monthly_totals(&records, ReportRecord::revenue);
        records.reverse();
        let reversed = monthly_totals(&records, ReportRecord::revenue);

        assert_eq!(forward, reversed);
        let months: Vec<Month> = forward.keys().copied().collect();
        assert_eq!(months, vec![Month::Feb, Month::Jul, Month::Nov]);
    }

    #[test]
    fn missing_metric_contributes_zero() {
        let records = vec![record(2024, 5, None), record(2024, 5, Some(dec!(40)))];

        let totals = monthly_totals(&records, ReportRecord::revenue);

        assert_eq!(totals[&Month::May], dec!(40));
    }

    #[test]
    fn absent_months_are_not_zero_filled() {
        let records = vec![
            record(2024, 1, Some(dec!(1))),
            record(2024, 12, Some(dec!(2))),
        ];

        let totals = monthly_totals(&records, ReportRecord::revenue);

        let months: Vec<Month> = totals.keys().copied().collect();
        assert_eq!(months, vec![Month::Jan, Month::Dec]);
    }
}
