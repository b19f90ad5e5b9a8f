use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month in the canonical Jan..Dec ordering.
///
/// The derived `Ord` follows calendar order, so a `BTreeMap<Month, _>`
/// iterates chronologically. Month identity deliberately ignores the year:
/// the dashboard collapses the same month from different years into a single
/// bucket, matching the behavior of the report source it mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in canonical chronological order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// The 3-letter abbreviation used as a chart label.
    pub fn abbrev(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl TryFrom<u32> for Month {
    type Error = CoreError;

    /// Converts a 1-based calendar month number, as returned by
    /// `chrono::Datelike::month`, into a `Month`.
    fn try_from(number: u32) -> Result<Self, Self::Error> {
        number
            .checked_sub(1)
            .and_then(|index| Month::ALL.get(index as usize))
            .copied()
            .ok_or(CoreError::InvalidMonth(number))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_calendar_month_numbers() {
        assert_eq!(Month::try_from(1).unwrap(), Month::Jan);
        assert_eq!(Month::try_from(12).unwrap(), Month::Dec);
        assert!(Month::try_from(0).is_err());
        assert!(Month::try_from(13).is_err());
    }

    #[test]
    fn orders_chronologically() {
        assert!(Month::Jan < Month::Feb);
        assert!(Month::Nov < Month::Dec);

        let mut shuffled = [Month::Dec, Month::Jan, Month::Jun];
        shuffled.sort();
        assert_eq!(shuffled, [Month::Jan, Month::Jun, Month::Dec]);
    }

    #[test]
    fn abbreviations_match_labels() {
        assert_eq!(Month::Jan.abbrev(), "Jan");
        assert_eq!(Month::Sep.abbrev(), "Sep");
        assert_eq!(Month::Dec.to_string(), "Dec");
    }
}
