//! Block Builder - core of the dealership Brochure Builder and Website Builder
//!
//! This crate provides the block vocabulary (registry, typed content and
//! views), the block editor and inspector, editing sessions, publishing and
//! public resolution, and the pluggable storage they persist through.

pub mod categories;
pub mod config;
pub mod core;
pub mod runtime;
pub mod service;
pub mod storage;
pub mod workspace;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use crate::categories::BlockCategory;
pub use crate::config::{BuilderConfig, ConfigError};
pub use crate::core::{Block, BlockContent, BlockId, BlockRegistry, BlockType};
pub use crate::runtime::{BlockEditor, CancelToken, Renderer, SiteSession, TaskOutcome, TemplateSession};
pub use crate::service::{LocalWebsiteService, ServiceError, WebsiteService};
pub use crate::storage::{KeyValueStore, StoreError};
pub use crate::workspace::Workspace;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
