// ============================================================================
// Console Infrastructure - HTTP Menu Source
// File: crates/console-infrastructure/src/http/menu_api.rs
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use console_core::domain::MenuEntry;
use console_core::error::DomainError;
use console_core::repositories::MenuSource;

use super::client::ApiClient;

pub struct HttpMenuSource {
    client: ApiClient,
}

impl HttpMenuSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn fetch(&self, path: &str) -> Result<Vec<MenuEntry>, DomainError> {
        let body = self.client.get_json(path).await?;
        let menus = extract_menus(body)?;
        info!("Fetched {} menus from {}", menus.len(), path);
        Ok(menus)
    }
}

#[async_trait]
impl MenuSource for HttpMenuSource {
    async fn all_menus(&self) -> Result<Vec<MenuEntry>, DomainError> {
        self.fetch("/menu/list").await
    }

    async fn current_menus(&self) -> Result<Vec<MenuEntry>, DomainError> {
        self.fetch("/menu/current").await
    }

    async fn user_menus(&self, user_id: u64) -> Result<Vec<MenuEntry>, DomainError> {
        self.fetch(&format!("/menu/user/{}", user_id)).await
    }

    async fn permission_menus(&self, user_id: u64) -> Result<Vec<MenuEntry>, DomainError> {
        self.fetch(&format!("/permissions/user/{}/permissions", user_id)).await
    }
}

/// Accepts every response shape the backend uses for menu lists: a bare
/// array, `{ "menus": [...] }`, or either of those wrapped in `{ "data": ... }`.
/// A null list is treated as empty.
pub fn extract_menus(body: Value) -> Result<Vec<MenuEntry>, DomainError> {
    let list = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Array(_) => body,
        Value::Object(mut map) => {
            if let Some(menus) = map.remove("menus") {
                return extract_menus(menus);
            }
            match map.remove("data") {
                Some(data) => return extract_menus(data),
                None => {
                    return Err(DomainError::MalformedPayload(
                        "response has neither `menus` nor `data`".to_string(),
                    ))
                }
            }
        }
        other => {
            return Err(DomainError::MalformedPayload(format!(
                "expected menu list, got {}",
                other
            )))
        }
    };

    serde_json::from_value(list).map_err(|e| DomainError::MalformedPayload(e.to_string()))
}
