//! Season table and day classifier.
//!
//! A season table is an ordered list of inclusive date ranges. Lookup is a
//! first-match-wins linear scan, so earlier ranges take precedence if two
//! ever overlap.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::CalendarError;

/// Rate tier of a night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonKind {
    #[serde(alias = "alta")]
    High,
    #[serde(alias = "media")]
    Mid,
    #[serde(alias = "baja")]
    Low,
}

impl SeasonKind {
    /// Fixed precedence used to break ties between kinds.
    pub const ALL: [SeasonKind; 3] = [SeasonKind::High, SeasonKind::Mid, SeasonKind::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonKind::High => "high",
            SeasonKind::Mid => "mid",
            SeasonKind::Low => "low",
        }
    }
}

impl std::fmt::Display for SeasonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeasonKind {
    type Err = String;

    /// Accepts the English names and the Spanish ones used by the booking form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "alta" => Ok(SeasonKind::High),
            "mid" | "media" => Ok(SeasonKind::Mid),
            "low" | "baja" => Ok(SeasonKind::Low),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}

/// A tagged, inclusive date range of the season table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub kind: SeasonKind,
    pub description: String,
}

impl SeasonRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which branch of the classifier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationSource {
    Range,
    WeekendUpgrade,
    Fallback,
}

/// Season resolved for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayClassification {
    pub date: NaiveDate,
    pub kind: SeasonKind,
    pub description: String,
    pub source: ClassificationSource,
}

/// Ordered season ranges.
#[derive(Debug, Clone, Default)]
pub struct SeasonTable {
    ranges: Vec<SeasonRange>,
}

impl SeasonTable {
    /// Build a table, rejecting ranges whose end precedes their start.
    pub fn new(ranges: Vec<SeasonRange>) -> Result<Self, CalendarError> {
        if let Some(bad) = ranges.iter().find(|r| r.end < r.start) {
            return Err(CalendarError::InvertedRange {
                start: bad.start,
                end: bad.end,
            });
        }
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[SeasonRange] {
        &self.ranges
    }

    /// Last day covered by any range.
    pub fn coverage_end(&self) -> Option<NaiveDate> {
        self.ranges.iter().map(|r| r.end).max()
    }

    /// Resolve a day to its season.
    ///
    /// A low range on Friday, Saturday or Sunday is upgraded to mid. Days
    /// outside every range fall back to mid on weekends and low otherwise.
    pub fn classify_day(&self, date: NaiveDate) -> DayClassification {
        let weekend = is_weekend(date);

        if let Some(range) = self.ranges.iter().find(|r| r.contains(date)) {
            if range.kind == SeasonKind::Low && weekend {
                return DayClassification {
                    date,
                    kind: SeasonKind::Mid,
                    description: format!("{} (weekend)", range.description),
                    source: ClassificationSource::WeekendUpgrade,
                };
            }
            return DayClassification {
                date,
                kind: range.kind,
                description: range.description.clone(),
                source: ClassificationSource::Range,
            };
        }

        let (kind, description) = if weekend {
            (SeasonKind::Mid, "Mid season - weekend")
        } else {
            (SeasonKind::Low, "Low season - default")
        };
        DayClassification {
            date,
            kind,
            description: description.to_string(),
            source: ClassificationSource::Fallback,
        }
    }
}

/// Friday, Saturday and Sunday count as weekend nights.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}
