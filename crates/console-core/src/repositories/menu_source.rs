//! Menu source trait (port)

use async_trait::async_trait;

use crate::domain::MenuEntry;
use crate::error::DomainError;

/// Where the authorised menu list comes from. All variants yield the same
/// flat list of entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Every menu (`GET /menu/list`).
    async fn all_menus(&self) -> Result<Vec<MenuEntry>, DomainError>;
    /// The signed-in user's menus (`GET /menu/current`).
    async fn current_menus(&self) -> Result<Vec<MenuEntry>, DomainError>;
    /// A given user's menus (`GET /menu/user/{id}`).
    async fn user_menus(&self, user_id: u64) -> Result<Vec<MenuEntry>, DomainError>;
    /// Menus granted through the user's roles (`GET /permissions/user/{id}/permissions`).
    async fn permission_menus(&self, user_id: u64) -> Result<Vec<MenuEntry>, DomainError>;
}
