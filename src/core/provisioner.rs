use crate::config::cards::CardTemplate;
use crate::core::{RunContext, TrelloApi};
use crate::utils::error::Result;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ProvisionSummary {
    pub list_name: String,
    pub cards_created: usize,
    pub skipped_existing: bool,
}

/// Creates the weekly list and its cards through a [`TrelloApi`], one call at
/// a time, in configuration order. In dry-run mode nothing touches the API.
pub struct CardProvisioner<A: TrelloApi> {
    api: A,
    ctx: RunContext,
}

impl<A: TrelloApi> CardProvisioner<A> {
    pub fn new(api: A, ctx: RunContext) -> Self {
        Self { api, ctx }
    }

    pub async fn run(&self, cards: &[CardTemplate]) -> Result<ProvisionSummary> {
        tracing::info!("Starting weekly list creation: {}", self.ctx.list_name);

        if self.ctx.dry_run {
            for line in self.preview_lines(cards) {
                println!("{}", line);
            }
            return Ok(ProvisionSummary {
                list_name: self.ctx.list_name.clone(),
                cards_created: 0,
                skipped_existing: false,
            });
        }

        // 同名列表已存在時跳過整個建立流程
        let lists = self.api.board_lists().await?;
        if lists.iter().any(|list| list.name == self.ctx.list_name) {
            tracing::warn!(
                "List '{}' already exists, skipping creation",
                self.ctx.list_name
            );
            return Ok(ProvisionSummary {
                list_name: self.ctx.list_name.clone(),
                cards_created: 0,
                skipped_existing: true,
            });
        }

        tracing::info!("Creating list: {}", self.ctx.list_name);
        let list_id = self
            .api
            .create_list(&self.ctx.list_name, self.ctx.position.api_value())
            .await?;
        tracing::debug!("List created with ID: {}", list_id);

        tracing::info!("Fetching board labels");
        let mut board_labels: HashMap<String, String> = self
            .api
            .board_labels()
            .await?
            .into_iter()
            .map(|label| (label.name, label.id))
            .collect();

        for card in cards {
            let due = self.ctx.due_for(card.day_of_week, card.hour, card.minute);
            tracing::info!("Creating card: {}", card.title);
            let card_id = self
                .api
                .create_card(&list_id, &card.title, due, card.description.as_deref())
                .await?;

            for label_name in &card.labels {
                let label_id = match board_labels.get(label_name) {
                    Some(id) => id.clone(),
                    None => {
                        // 看板上沒有這個標籤，先建立再掛上
                        tracing::info!("Creating label: {}", label_name);
                        let id = self.api.create_label(label_name).await?;
                        board_labels.insert(label_name.clone(), id.clone());
                        id
                    }
                };
                self.api.attach_label(&card_id, &label_id).await?;
            }

            for checklist in &card.checklists {
                let checklist_id = self.api.create_checklist(&card_id, &checklist.name).await?;
                for item in &checklist.items {
                    self.api.add_checklist_item(&checklist_id, item).await?;
                }
            }
        }

        tracing::info!(
            "Successfully created {} cards in list {}",
            cards.len(),
            self.ctx.list_name
        );

        Ok(ProvisionSummary {
            list_name: self.ctx.list_name.clone(),
            cards_created: cards.len(),
            skipped_existing: false,
        })
    }

    /// 預覽行的順序與實際 API 呼叫順序一致：先列表，再逐張卡片
    pub fn preview_lines(&self, cards: &[CardTemplate]) -> Vec<String> {
        let mut lines = Vec::with_capacity(cards.len() + 2);
        lines.push(format!(
            "[DRY-RUN] Would create list: {} (position: {})",
            self.ctx.list_name,
            self.ctx.position.api_value()
        ));

        for card in cards {
            let due = self.ctx.due_for(card.day_of_week, card.hour, card.minute);
            lines.push(format!(
                "[DRY-RUN] Would create card: {} (due: {})",
                card.title,
                due.format("%Y-%m-%d %H:%M")
            ));
        }

        lines.push(format!("[DRY-RUN] Would create {} cards total", cards.len()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cards::ChecklistTemplate;
    use crate::core::{DayOfWeek, ListPosition, StartDay};
    use crate::domain::model::{TrelloLabel, TrelloList};
    use crate::utils::error::TrelloError;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingApi {
        calls: Arc<Mutex<Vec<String>>>,
        existing_lists: Vec<TrelloList>,
        board_labels: Vec<TrelloLabel>,
        fail_create_list: bool,
    }

    impl RecordingApi {
        async fn record(&self, call: String) {
            self.calls.lock().await.push(call);
        }

        async fn calls(&self) -> Vec<String> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl TrelloApi for RecordingApi {
        async fn board_lists(&self) -> Result<Vec<TrelloList>> {
            self.record("board_lists".to_string()).await;
            Ok(self.existing_lists.clone())
        }

        async fn create_list(&self, name: &str, position: &str) -> Result<String> {
            self.record(format!("create_list:{}:{}", name, position)).await;
            if self.fail_create_list {
                return Err(TrelloError::ApiStatusError {
                    status: 401,
                    endpoint: "lists".to_string(),
                    body: "invalid token".to_string(),
                });
            }
            Ok("list123".to_string())
        }

        async fn board_labels(&self) -> Result<Vec<TrelloLabel>> {
            self.record("board_labels".to_string()).await;
            Ok(self.board_labels.clone())
        }

        async fn create_label(&self, name: &str) -> Result<String> {
            self.record(format!("create_label:{}", name)).await;
            Ok(format!("label-{}", name))
        }

        async fn create_card(
            &self,
            list_id: &str,
            name: &str,
            due: NaiveDateTime,
            description: Option<&str>,
        ) -> Result<String> {
            self.record(format!(
                "create_card:{}:{}:{}:{}",
                list_id,
                name,
                due.format("%Y-%m-%dT%H:%M:%S"),
                description.unwrap_or("-")
            ))
            .await;
            Ok("card123".to_string())
        }

        async fn attach_label(&self, card_id: &str, label_id: &str) -> Result<()> {
            self.record(format!("attach_label:{}:{}", card_id, label_id)).await;
            Ok(())
        }

        async fn create_checklist(&self, card_id: &str, name: &str) -> Result<String> {
            self.record(format!("create_checklist:{}:{}", card_id, name)).await;
            Ok("check123".to_string())
        }

        async fn add_checklist_item(&self, checklist_id: &str, name: &str) -> Result<String> {
            self.record(format!("add_item:{}:{}", checklist_id, name)).await;
            Ok("item123".to_string())
        }
    }

    fn ctx(dry_run: bool) -> RunContext {
        RunContext {
            week_number: 5,
            list_name: "Todo w05".to_string(),
            week_start: NaiveDate::from_ymd_opt(2025, 1, 27).unwrap(),
            start_day: StartDay::Monday,
            position: ListPosition::Top,
            dry_run,
        }
    }

    fn card(title: &str) -> CardTemplate {
        CardTemplate {
            title: title.to_string(),
            day_of_week: DayOfWeek::Monday,
            hour: 9,
            minute: 0,
            labels: vec![],
            description: None,
            checklists: vec![],
        }
    }

    #[tokio::test]
    async fn test_live_run_call_order() {
        let api = RecordingApi {
            board_labels: vec![TrelloLabel {
                id: "label-work-id".to_string(),
                name: "Work".to_string(),
            }],
            ..RecordingApi::default()
        };

        let mut template = card("Plan week");
        template.labels = vec!["Work".to_string(), "Focus".to_string()];
        template.checklists = vec![ChecklistTemplate {
            name: "Steps".to_string(),
            items: vec!["One".to_string(), "Two".to_string(), "Three".to_string()],
        }];

        let provisioner = CardProvisioner::new(api.clone(), ctx(false));
        let summary = provisioner.run(&[template]).await.unwrap();

        assert_eq!(summary.cards_created, 1);
        assert!(!summary.skipped_existing);

        let calls = api.calls().await;
        assert_eq!(
            calls,
            vec![
                "board_lists".to_string(),
                "create_list:Todo w05:top".to_string(),
                "board_labels".to_string(),
                "create_card:list123:Plan week:2025-01-27T09:00:00:-".to_string(),
                "attach_label:card123:label-work-id".to_string(),
                "create_label:Focus".to_string(),
                "attach_label:card123:label-Focus".to_string(),
                "create_checklist:card123:Steps".to_string(),
                "add_item:check123:One".to_string(),
                "add_item:check123:Two".to_string(),
                "add_item:check123:Three".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_card_without_extras() {
        let api = RecordingApi::default();
        let provisioner = CardProvisioner::new(api.clone(), ctx(false));

        provisioner.run(&[card("Review inbox")]).await.unwrap();

        let calls = api.calls().await;
        assert_eq!(calls.len(), 4);
        assert!(calls[3].starts_with("create_card:list123:Review inbox:"));
    }

    #[tokio::test]
    async fn test_duplicate_list_skips_creation() {
        let api = RecordingApi {
            existing_lists: vec![TrelloList {
                id: "old".to_string(),
                name: "Todo w05".to_string(),
            }],
            ..RecordingApi::default()
        };

        let provisioner = CardProvisioner::new(api.clone(), ctx(false));
        let summary = provisioner.run(&[card("Plan week")]).await.unwrap();

        assert!(summary.skipped_existing);
        assert_eq!(summary.cards_created, 0);
        assert_eq!(api.calls().await, vec!["board_lists".to_string()]);
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_calls() {
        let api = RecordingApi::default();
        let provisioner = CardProvisioner::new(api.clone(), ctx(true));

        let summary = provisioner
            .run(&[card("Plan week"), card("Review inbox")])
            .await
            .unwrap();

        assert_eq!(summary.cards_created, 0);
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_preview_lines_follow_config_order() {
        let api = RecordingApi::default();
        let provisioner = CardProvisioner::new(api, ctx(true));

        let lines = provisioner.preview_lines(&[card("Plan week"), card("Review inbox")]);

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "[DRY-RUN] Would create list: Todo w05 (position: top)"
        );
        assert!(lines[1].starts_with("[DRY-RUN] Would create card: Plan week"));
        assert!(lines[1].contains("due: 2025-01-27 09:00"));
        assert!(lines[2].starts_with("[DRY-RUN] Would create card: Review inbox"));
        assert_eq!(lines[3], "[DRY-RUN] Would create 2 cards total");
    }

    #[tokio::test]
    async fn test_create_list_failure_stops_run() {
        let api = RecordingApi {
            fail_create_list: true,
            ..RecordingApi::default()
        };

        let provisioner = CardProvisioner::new(api.clone(), ctx(false));
        let result = provisioner.run(&[card("Plan week")]).await;

        assert!(result.is_err());
        let calls = api.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], "create_list:Todo w05:top");
    }

    #[tokio::test]
    async fn test_missing_label_created_once() {
        let api = RecordingApi::default();

        let mut first = card("Plan week");
        first.labels = vec!["Focus".to_string()];
        let mut second = card("Review inbox");
        second.labels = vec!["Focus".to_string()];

        let provisioner = CardProvisioner::new(api.clone(), ctx(false));
        provisioner.run(&[first, second]).await.unwrap();

        let calls = api.calls().await;
        let label_creates = calls
            .iter()
            .filter(|call| call.starts_with("create_label:"))
            .count();
        let attaches = calls
            .iter()
            .filter(|call| call.starts_with("attach_label:"))
            .count();

        assert_eq!(label_creates, 1);
        assert_eq!(attaches, 2);
    }
}
