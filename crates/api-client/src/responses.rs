use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_types::ReportRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;
use tracing::warn;

/// A financial report as it appears on the wire.
///
/// The source API is permissive: fields may be absent, null, or occasionally
/// the wrong shape. Every field therefore deserializes leniently. A
/// malformed metric becomes `None` (treated as zero downstream) and a
/// malformed `createdAt` drops only that record, never the whole batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReport {
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub revenue: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gross_burn: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub net_burn: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub margin: Option<Decimal>,
    #[serde(default)]
    pub cash_flow: Option<RawCashFlow>,
}

/// The nested cash-flow object carrying the period-end balance.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCashFlow {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub final_cash_balance: Option<Decimal>,
}

/// Converts raw wire reports into core records.
///
/// Records without a usable `createdAt` are logged and skipped; processing
/// of the remaining records always continues.
pub fn into_records(raw: Vec<RawReport>) -> Vec<ReportRecord> {
    raw.into_iter()
        .filter_map(|report| {
            let Some(created_at) = report.created_at else {
                warn!("skipping report with missing or unparsable createdAt");
                return None;
            };
            Some(ReportRecord {
                created_at,
                revenue: report.revenue,
                gross_burn: report.gross_burn,
                net_burn: report.net_burn,
                margin: report.margin,
                final_cash_balance: report
                    .cash_flow
                    .and_then(|cash_flow| cash_flow.final_cash_balance),
            })
        })
        .collect()
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_decimal))
}

fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => parse_datetime(&text),
        _ => None,
    })
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }
    // Some exports carry bare dates; take midnight UTC.
    text.parse::<NaiveDate>()
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_a_complete_report() {
        let json = r#"{
            "createdAt": "2024-01-15T08:30:00.000Z",
            "revenue": 100.5,
            "grossBurn": 80,
            "netBurn": -50,
            "margin": 90,
            "cashFlow": { "finalCashBalance": 500 }
        }"#;

        let raw: RawReport = serde_json::from_str(json).unwrap();
        let records = into_records(vec![raw]);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.created_at.month(), 1);
        assert_eq!(record.revenue, Some(dec!(100.5)));
        assert_eq!(record.gross_burn, Some(dec!(80)));
        assert_eq!(record.net_burn, Some(dec!(-50)));
        assert_eq!(record.margin, Some(dec!(90)));
        assert_eq!(record.final_cash_balance, Some(dec!(500)));
    }

    #[test]
    fn missing_fields_become_none() {
        let json = r#"{ "createdAt": "2024-03-01T00:00:00Z" }"#;

        let raw: RawReport = serde_json::from_str(json).unwrap();
        let records = into_records(vec![raw]);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, None);
        assert_eq!(records[0].final_cash_balance, None);
    }

    #[test]
    fn malformed_metric_does_not_fail_the_record() {
        let json = r#"{
            "createdAt": "2024-03-01T00:00:00Z",
            "revenue": "not a number",
            "margin": "42.5"
        }"#;

        let raw: RawReport = serde_json::from_str(json).unwrap();
        let records = into_records(vec![raw]);

        assert_eq!(records[0].revenue, None);
        // Numeric strings are still accepted.
        assert_eq!(records[0].margin, Some(dec!(42.5)));
    }

    #[test]
    fn unparsable_created_at_drops_only_that_record() {
        let json = r#"[
            { "createdAt": "garbage", "revenue": 10 },
            { "revenue": 20 },
            { "createdAt": "2024-06-01", "revenue": 30 }
        ]"#;

        let raw: Vec<RawReport> = serde_json::from_str(json).unwrap();
        let records = into_records(raw);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, Some(dec!(30)));
        assert_eq!(records[0].created_at.month(), 6);
    }
}
