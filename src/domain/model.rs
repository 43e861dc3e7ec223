use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// 卡片範本裡的星期欄位，monday 為一週的第 0 天 (ISO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn iso_index(self) -> u8 {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }
}

/// 一週從哪一天開始，影響週數計算與到期日偏移
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartDay {
    Monday,
    Saturday,
    Sunday,
}

impl StartDay {
    /// Days between this start day and the ISO Monday of the same week.
    pub fn shift_days(self) -> i64 {
        match self {
            StartDay::Monday => 0,
            StartDay::Sunday => 1,
            StartDay::Saturday => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListPosition {
    Top,
    Bottom,
}

impl ListPosition {
    /// Trello 的 pos 參數值
    pub fn api_value(self) -> &'static str {
        match self {
            ListPosition::Top => "top",
            ListPosition::Bottom => "bottom",
        }
    }
}

/// Resolved context for one run. Built fresh per invocation, never persisted.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub week_number: u32,
    pub list_name: String,
    pub week_start: NaiveDate,
    pub start_day: StartDay,
    pub position: ListPosition,
    pub dry_run: bool,
}

impl RunContext {
    /// 以週起始日為基準計算卡片到期時間
    pub fn due_for(&self, day: DayOfWeek, hour: u8, minute: u8) -> NaiveDateTime {
        let offset = (i64::from(day.iso_index()) + self.start_day.shift_days()) % 7;
        let time =
            NaiveTime::from_hms_opt(u32::from(hour), u32::from(minute), 0).unwrap_or(NaiveTime::MIN);
        (self.week_start + Duration::days(offset)).and_time(time)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrelloLabel {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: String,
}
