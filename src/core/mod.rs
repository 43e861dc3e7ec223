pub mod provisioner;
pub mod schedule;

pub use crate::domain::model::{DayOfWeek, ListPosition, RunContext, StartDay};
pub use crate::domain::ports::TrelloApi;
pub use crate::utils::error::Result;
