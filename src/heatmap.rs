use crate::models::DailyCount;
use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

pub const DEFAULT_DAYS: i64 = 365;
/// Upper bound on the window so a hostile `days` cannot allocate without limit.
pub const MAX_DAYS: i64 = 3660;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `days`-long window ending on `end`, inclusive.
    pub fn ending_at(end: NaiveDate, days: i64) -> Self {
        let days = clamp_days(days);
        Self {
            start: end - Duration::days(days - 1),
            end,
        }
    }

    /// The Sunday on or before `start`.
    pub fn aligned_start(&self) -> NaiveDate {
        week_start(self.start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub count: u64,
    pub bucket: u8,
    pub visible: bool,
}

impl DayCell {
    pub fn tooltip(&self) -> String {
        format!("{}: {} completed", self.date.format("%d.%m.%Y"), self.count)
    }
}

/// Sunday-first days of one calendar week. Only the last week of a grid can be short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapGrid {
    pub range: DateRange,
    pub max_count: u64,
    pub weeks: Vec<Week>,
}

impl HeatmapGrid {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn cell_count(&self) -> usize {
        self.weeks.iter().map(|week| week.days.len()).sum()
    }
}

pub fn clamp_days(days: i64) -> i64 {
    days.clamp(1, MAX_DAYS)
}

pub fn build_grid(counts: &DailyCount, days: i64) -> HeatmapGrid {
    build_grid_at(Local::now().date_naive(), counts, days)
}

pub fn build_grid_at(today: NaiveDate, counts: &DailyCount, days: i64) -> HeatmapGrid {
    let range = DateRange::ending_at(today, days);
    let max_count = max_count(counts);
    let aligned_start = range.aligned_start();

    let total = (range.end - aligned_start).num_days() + 1;
    let mut cells = Vec::with_capacity(total as usize);
    for offset in 0..total {
        let date = aligned_start + Duration::days(offset);
        let visible = date >= range.start;
        let count = if visible {
            counts.get(&date_key(date)).copied().unwrap_or(0)
        } else {
            0
        };
        cells.push(DayCell {
            date,
            count,
            bucket: intensity_bucket(count, max_count),
            visible,
        });
    }

    let weeks = cells
        .chunks(7)
        .map(|days| Week {
            days: days.to_vec(),
        })
        .collect();

    HeatmapGrid {
        range,
        max_count,
        weeks,
    }
}

/// Largest count in the map, never below 1.
pub fn max_count(counts: &DailyCount) -> u64 {
    counts.values().copied().max().unwrap_or(0).max(1)
}

/// Maps `count / max_count` onto quartile buckets 1..=4; zero stays 0.
pub fn intensity_bucket(count: u64, max_count: u64) -> u8 {
    if count == 0 {
        return 0;
    }
    let ratio = count as f64 / max_count.max(1) as f64;
    if ratio <= 0.25 {
        1
    } else if ratio <= 0.5 {
        2
    } else if ratio <= 0.75 {
        3
    } else {
        4
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}
