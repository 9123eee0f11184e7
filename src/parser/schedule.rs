use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use crate::record::IpoSchedule;

static OG_URL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property='og:url']").unwrap());
static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".kobetudate03").unwrap());
static TR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static MONTH_DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{1,2})\s*月\s*([0-9]{1,2})\s*日").unwrap());

const YEAR_MARKER: &str = "company/";
const YEAR_DIGITS: usize = 4;
const RANGE_SEPARATORS: [char; 2] = ['～', '〜'];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no listing year in og:url")]
    NoYear,
    #[error("no schedule table")]
    NoTable,
    #[error("schedule table has {0} data rows, need 2")]
    TooFewRows(usize),
    #[error("no range separator in {0:?}")]
    NoRange(String),
    #[error("no month/day in {0:?}")]
    NoMonthDay(String),
    #[error("{year}-{month}-{day} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

impl ScheduleError {
    /// Missing structure is normal for pages without a schedule yet.
    fn is_structural(&self) -> bool {
        matches!(self, Self::NoYear | Self::NoTable | Self::TooFewRows(_))
    }
}

/// Schedule from the `kobetudate03` table. Never fails: anything malformed
/// yields the unset schedule.
pub fn extract(doc: &Html) -> IpoSchedule {
    match parse(doc) {
        Ok(schedule) => schedule,
        Err(e) if e.is_structural() => {
            debug!(reason = %e, "Schedule unavailable");
            IpoSchedule::default()
        }
        Err(e) => {
            warn!(reason = %e, "Malformed schedule, using unset dates");
            IpoSchedule::default()
        }
    }
}

pub fn parse(doc: &Html) -> Result<IpoSchedule, ScheduleError> {
    let year = listing_year(doc).ok_or(ScheduleError::NoYear)?;
    let table = doc.select(&TABLE_SEL).next().ok_or(ScheduleError::NoTable)?;

    let cells: Vec<String> = table
        .select(&TR_SEL)
        .filter_map(|tr| tr.select(&TD_SEL).next())
        .map(|td| td.text().collect())
        .collect();
    if cells.len() < 2 {
        return Err(ScheduleError::TooFewRows(cells.len()));
    }

    let (start, end) = cells[0]
        .split_once(RANGE_SEPARATORS)
        .ok_or_else(|| ScheduleError::NoRange(cells[0].trim().to_string()))?;

    Ok(IpoSchedule {
        apply_start: date_in_year(year, start)?,
        apply_end: date_in_year(year, end)?,
        winning_announce: date_in_year(year, &cells[1])?,
    })
}

/// Year embedded in og:url, e.g. `https://www.ipokiso.com/company/2024/x.html`.
pub fn listing_year(doc: &Html) -> Option<i32> {
    let og_url = doc.select(&OG_URL_SEL).next()?.value().attr("content")?;
    year_from_url(og_url)
}

fn year_from_url(url: &str) -> Option<i32> {
    let start = url.find(YEAR_MARKER)? + YEAR_MARKER.len();
    let digits = url.get(start..start + YEAR_DIGITS)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok().filter(|&y| y != 0)
}

/// Parse `N月M日` (trailing weekday etc. ignored) into (month, day).
pub fn month_day(text: &str) -> Result<(u32, u32), ScheduleError> {
    let no_match = || ScheduleError::NoMonthDay(text.trim().to_string());
    let caps = MONTH_DAY_RE.captures(text).ok_or_else(no_match)?;
    let month = caps[1].parse().map_err(|_| no_match())?;
    let day = caps[2].parse().map_err(|_| no_match())?;
    Ok((month, day))
}

fn date_in_year(year: i32, text: &str) -> Result<NaiveDate, ScheduleError> {
    let (month, day) = month_day(text)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ScheduleError::InvalidDate { year, month, day })
}

// ── Tests ──
