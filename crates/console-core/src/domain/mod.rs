//! # Console Core - Domain Module
//! 
//! Domain entities for the admin console session.

pub mod menu;
pub mod tab;
pub mod theme;
pub mod watermark;

pub use menu::{MenuEntry, MenuId, MenuNode, MenuType};
pub use tab::Tab;
pub use theme::ThemeName;
pub use watermark::{WatermarkSettings, WatermarkUser, DEFAULT_WATERMARK_TEXT};
