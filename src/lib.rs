pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::trello::TrelloClient;
pub use config::cards::CardsConfig;
pub use config::{CliConfig, TrelloCredentials};
pub use core::provisioner::{CardProvisioner, ProvisionSummary};
pub use core::schedule::ScheduleResolver;
pub use utils::error::{Result, TrelloError};
