use crate::domain::model::{TrelloLabel, TrelloList};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Board mutation surface used by the provisioner. The reqwest adapter
/// implements it for the real API; tests substitute a recording mock.
#[async_trait]
pub trait TrelloApi: Send + Sync {
    async fn board_lists(&self) -> Result<Vec<TrelloList>>;

    async fn create_list(&self, name: &str, position: &str) -> Result<String>;

    async fn board_labels(&self) -> Result<Vec<TrelloLabel>>;

    async fn create_label(&self, name: &str) -> Result<String>;

    async fn create_card(
        &self,
        list_id: &str,
        name: &str,
        due: NaiveDateTime,
        description: Option<&str>,
    ) -> Result<String>;

    async fn attach_label(&self, card_id: &str, label_id: &str) -> Result<()>;

    async fn create_checklist(&self, card_id: &str, name: &str) -> Result<String>;

    async fn add_checklist_item(&self, checklist_id: &str, name: &str) -> Result<String>;
}
