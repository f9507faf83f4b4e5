//! Holiday calendar keyed by year.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A public holiday. Bridge holidays are moved to a Monday to form a long
/// weekend; the flag is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEntry {
    pub date: NaiveDate,
    pub name: String,
    pub is_bridge: bool,
}

/// Holidays bucketed by year.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    by_year: BTreeMap<i32, Vec<HolidayEntry>>,
}

impl HolidayCalendar {
    /// Build from a flat list; entries are bucketed under their date's year.
    pub fn new(entries: Vec<HolidayEntry>) -> Self {
        let mut by_year: BTreeMap<i32, Vec<HolidayEntry>> = BTreeMap::new();
        for entry in entries {
            by_year.entry(entry.date.year()).or_default().push(entry);
        }
        Self { by_year }
    }

    /// Build from explicit year buckets, as the static tables are kept.
    pub fn from_buckets(by_year: BTreeMap<i32, Vec<HolidayEntry>>) -> Self {
        Self { by_year }
    }

    /// Holidays listed for `year`, empty when the year is not covered
    pub fn holidays_for_year(&self, year: i32) -> &[HolidayEntry] {
        self.by_year.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Every holiday with `check_in <= date < check_out`.
    ///
    /// All year buckets from the check-in year through the check-out year are
    /// consulted. A date listed in more than one bucket is reported once.
    pub fn holidays_overlapping(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Vec<HolidayEntry> {
        if check_out <= check_in {
            return Vec::new();
        }

        let mut seen = BTreeSet::new();
        let mut found = Vec::new();
        for (_, bucket) in self.by_year.range(check_in.year()..=check_out.year()) {
            for holiday in bucket {
                let inside = holiday.date >= check_in && holiday.date < check_out;
                if inside && seen.insert(holiday.date) {
                    found.push(holiday.clone());
                }
            }
        }
        found.sort_by_key(|h| h.date);
        found
    }
}
