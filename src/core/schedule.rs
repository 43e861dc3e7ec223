use crate::core::{ListPosition, RunContext, StartDay};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;
use chrono::{Datelike, Duration, NaiveDate};

pub const MIN_WEEK: u32 = 1;
pub const MAX_WEEK: u32 = 53;

/// Turns an optional explicit week number plus the current date into the
/// run context: week number, list title, week start date.
pub struct ScheduleResolver {
    week: Option<u32>,
    start_day: StartDay,
}

impl ScheduleResolver {
    pub fn new(week: Option<u32>, start_day: StartDay) -> Self {
        Self { week, start_day }
    }

    pub fn resolve(
        &self,
        today: NaiveDate,
        position: ListPosition,
        dry_run: bool,
    ) -> Result<RunContext> {
        let week_number = match self.week {
            Some(week) => {
                validate_range("week", week, MIN_WEEK, MAX_WEEK)?;
                week
            }
            None => self.current_week_number(today),
        };

        Ok(RunContext {
            week_number,
            list_name: list_name(week_number),
            week_start: self.week_start(today, week_number),
            start_day: self.start_day,
            position,
            dry_run,
        })
    }

    /// 非週一起始時，把日期往後平移再取 ISO 週數，讓週數在起始日當天換週
    pub fn current_week_number(&self, today: NaiveDate) -> u32 {
        (today + Duration::days(self.start_day.shift_days()))
            .iso_week()
            .week()
    }

    /// 指定週的起始日。ISO 第一週是包含 1 月 4 日的那一週
    pub fn week_start(&self, today: NaiveDate, week: u32) -> NaiveDate {
        let iso_year = today.iso_week().year();
        let jan4 = NaiveDate::from_ymd_opt(iso_year, 1, 4).unwrap();
        let week1_monday =
            jan4 - Duration::days(i64::from(jan4.weekday().num_days_from_monday()));

        week1_monday + Duration::weeks(i64::from(week) - 1)
            - Duration::days(self.start_day.shift_days())
    }
}

pub fn list_name(week: u32) -> String {
    format!("Todo w{:02}", week)
}
