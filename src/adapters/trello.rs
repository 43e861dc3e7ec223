use crate::config::TrelloCredentials;
use crate::domain::model::{Created, TrelloLabel, TrelloList};
use crate::domain::ports::TrelloApi;
use crate::utils::error::{Result, TrelloError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed implementation of [`TrelloApi`]. Authentication rides on
/// every request as `key`/`token` query parameters.
pub struct TrelloClient {
    http: Client,
    credentials: TrelloCredentials,
}

impl TrelloClient {
    pub fn new(credentials: TrelloCredentials) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, credentials })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!(
            "{}/{}",
            self.credentials.base_url.trim_end_matches('/'),
            path
        );
        tracing::debug!("{} {}", method, url);

        let response = self
            .http
            .request(method, url.as_str())
            .query(&[
                ("key", self.credentials.api_key.as_str()),
                ("token", self.credentials.api_token.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API request failed: {} returned {}", path, status);
            return Err(TrelloError::ApiStatusError {
                status: status.as_u16(),
                endpoint: path.to_string(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TrelloError::UnexpectedResponse {
            message: format!("failed to decode response from {}: {}", path, e),
        })
    }
}

fn format_due(due: NaiveDateTime) -> String {
    due.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[async_trait]
impl TrelloApi for TrelloClient {
    async fn board_lists(&self) -> Result<Vec<TrelloList>> {
        self.request(
            Method::GET,
            &format!("boards/{}/lists", self.credentials.board_id),
            &[],
        )
        .await
    }

    async fn create_list(&self, name: &str, position: &str) -> Result<String> {
        let created: Created = self
            .request(
                Method::POST,
                "lists",
                &[
                    ("name", name.to_string()),
                    ("idBoard", self.credentials.board_id.clone()),
                    ("pos", position.to_string()),
                ],
            )
            .await?;
        Ok(created.id)
    }

    async fn board_labels(&self) -> Result<Vec<TrelloLabel>> {
        self.request(
            Method::GET,
            &format!("boards/{}/labels", self.credentials.board_id),
            &[],
        )
        .await
    }

    async fn create_label(&self, name: &str) -> Result<String> {
        let created: Created = self
            .request(
                Method::POST,
                "labels",
                &[
                    ("idBoard", self.credentials.board_id.clone()),
                    ("name", name.to_string()),
                ],
            )
            .await?;
        Ok(created.id)
    }

    async fn create_card(
        &self,
        list_id: &str,
        name: &str,
        due: NaiveDateTime,
        description: Option<&str>,
    ) -> Result<String> {
        let mut params = vec![
            ("idList", list_id.to_string()),
            ("name", name.to_string()),
            ("due", format_due(due)),
            // 卡片依設定檔順序排在列表底部
            ("pos", "bottom".to_string()),
        ];
        if let Some(desc) = description {
            params.push(("desc", desc.to_string()));
        }

        let created: Created = self.request(Method::POST, "cards", &params).await?;
        Ok(created.id)
    }

    async fn attach_label(&self, card_id: &str, label_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .request(
                Method::POST,
                &format!("cards/{}/idLabels", card_id),
                &[("value", label_id.to_string())],
            )
            .await?;
        Ok(())
    }

    async fn create_checklist(&self, card_id: &str, name: &str) -> Result<String> {
        let created: Created = self
            .request(
                Method::POST,
                "checklists",
                &[("idCard", card_id.to_string()), ("name", name.to_string())],
            )
            .await?;
        Ok(created.id)
    }

    async fn add_checklist_item(&self, checklist_id: &str, name: &str) -> Result<String> {
        let created: Created = self
            .request(
                Method::POST,
                &format!("checklists/{}/checkItems", checklist_id),
                &[("name", name.to_string())],
            )
            .await?;
        Ok(created.id)
    }
}
