//! Colombian holidays and tourist seasons, December 2025 through February 2027.
//!
//! Season boundaries follow the tourism sector's usual classification:
//! high around Christmas, Holy Week, mid-year school holidays and the October
//! long weekend; mid in early year, early December and August; low in the
//! post-Easter months, September and late October-November.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::holidays::{HolidayCalendar, HolidayEntry};
use super::seasons::{SeasonKind, SeasonRange, SeasonTable};
use super::CalendarError;

type HolidayRow = ((i32, u32, u32), &'static str, bool);
type SeasonRow = ((i32, u32, u32), (i32, u32, u32), SeasonKind, &'static str);

const HOLIDAYS_2025: &[HolidayRow] = &[
    ((2025, 12, 8), "Día de la Inmaculada Concepción", false),
    ((2025, 12, 25), "Navidad", false),
    ((2025, 12, 31), "Fin de Año", false),
];

const HOLIDAYS_2026: &[HolidayRow] = &[
    ((2026, 1, 1), "Año Nuevo", false),
    ((2026, 1, 12), "Día de los Reyes Magos", true),
    ((2026, 3, 23), "Día de San José", true),
    ((2026, 4, 2), "Jueves Santo", false),
    ((2026, 4, 3), "Viernes Santo", false),
    ((2026, 5, 1), "Día del Trabajo", false),
    ((2026, 5, 18), "Ascensión del Señor", true),
    ((2026, 6, 8), "Corpus Christi", true),
    ((2026, 6, 15), "Sagrado Corazón de Jesús", true),
    ((2026, 6, 29), "San Pedro y San Pablo", true),
    ((2026, 7, 20), "Día de la Independencia", false),
    ((2026, 8, 7), "Batalla de Boyacá", false),
    ((2026, 8, 17), "Asunción de la Virgen", true),
    ((2026, 10, 12), "Día de la Raza", true),
    ((2026, 11, 2), "Día de Todos los Santos", true),
    ((2026, 11, 16), "Independencia de Cartagena", true),
    ((2026, 12, 8), "Día de la Inmaculada Concepción", false),
    ((2026, 12, 25), "Navidad", false),
    ((2026, 12, 31), "Fin de Año", false),
];

const HOLIDAYS_2027: &[HolidayRow] = &[
    ((2027, 1, 1), "Año Nuevo", false),
    ((2027, 1, 11), "Día de los Reyes Magos", true),
    ((2027, 2, 14), "San Valentín (comercial)", false),
];

const SEASONS: &[SeasonRow] = &[
    ((2025, 12, 1), (2025, 12, 14), SeasonKind::Mid, "Mid season - early December"),
    ((2025, 12, 15), (2026, 1, 15), SeasonKind::High, "High season - Christmas and New Year"),
    ((2026, 1, 16), (2026, 3, 31), SeasonKind::Mid, "Mid season - start of the year"),
    ((2026, 4, 1), (2026, 4, 6), SeasonKind::High, "High season - Holy Week"),
    ((2026, 4, 7), (2026, 5, 31), SeasonKind::Low, "Low season - after Holy Week"),
    ((2026, 6, 1), (2026, 6, 19), SeasonKind::Mid, "Mid season - June"),
    ((2026, 6, 20), (2026, 7, 15), SeasonKind::High, "High season - mid-year holidays"),
    ((2026, 7, 16), (2026, 8, 31), SeasonKind::Mid, "Mid season - July and August"),
    ((2026, 9, 1), (2026, 9, 30), SeasonKind::Low, "Low season - September"),
    ((2026, 10, 1), (2026, 10, 13), SeasonKind::High, "High season - October long weekend"),
    ((2026, 10, 14), (2026, 11, 30), SeasonKind::Low, "Low season - October and November weekdays"),
    ((2026, 12, 1), (2026, 12, 14), SeasonKind::Mid, "Mid season - early December"),
    ((2026, 12, 15), (2027, 1, 15), SeasonKind::High, "High season - Christmas and New Year"),
    ((2027, 1, 16), (2027, 2, 28), SeasonKind::Mid, "Mid season - start of the year"),
];

fn ymd((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidDate { year, month, day })
}

pub(super) fn holidays() -> Result<HolidayCalendar, CalendarError> {
    let mut buckets = BTreeMap::new();
    for (year, rows) in [(2025, HOLIDAYS_2025), (2026, HOLIDAYS_2026), (2027, HOLIDAYS_2027)] {
        let entries = rows
            .iter()
            .map(|&(date, name, is_bridge)| {
                Ok::<_, CalendarError>(HolidayEntry {
                    date: ymd(date)?,
                    name: name.to_string(),
                    is_bridge,
                })
            })
            .collect::<Result<Vec<_>, CalendarError>>()?;
        buckets.insert(year, entries);
    }
    Ok(HolidayCalendar::from_buckets(buckets))
}

pub(super) fn seasons() -> Result<SeasonTable, CalendarError> {
    let ranges = SEASONS
        .iter()
        .map(|&(start, end, kind, description)| {
            Ok::<_, CalendarError>(SeasonRange {
                start: ymd(start)?,
                end: ymd(end)?,
                kind,
                description: description.to_string(),
            })
        })
        .collect::<Result<Vec<_>, CalendarError>>()?;
    SeasonTable::new(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tables_load() {
        assert_eq!(holidays().unwrap().holidays_for_year(2026).len(), 19);
        assert_eq!(seasons().unwrap().ranges().len(), SEASONS.len());
    }

    #[test]
    fn test_ranges_are_chronological_and_disjoint() {
        let table = seasons().unwrap();
        for pair in table.ranges().windows(2) {
            assert!(pair[0].end < pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_holiday_buckets_are_sorted() {
        let cal = holidays().unwrap();
        for year in cal.years() {
            let bucket = cal.holidays_for_year(year);
            assert!(bucket.windows(2).all(|w| w[0].date < w[1].date));
        }
    }
}
