//! Builder runtime
//!
//! Everything that operates on blocks and documents: rendering, the block
//! editor and inspector, editing sessions, publishing, public resolution,
//! sharing and brochure generation.

pub mod brochure;
pub mod document;
pub mod domain;
pub mod editor;
pub mod inspector;
pub mod publish;
pub mod renderer;
pub mod resolve;
pub mod session;
pub mod share;
pub mod task;

pub use brochure::BrochureGenerator;
pub use document::{render_brochure, render_site_page};
pub use domain::{validate_domain, DomainResult};
pub use editor::{BlockEditor, Direction, EditorError};
pub use inspector::{controls_for, infer_control, set_field, FieldUpdate};
pub use publish::{PublishReceipt, PublishedSnapshot, Publisher};
pub use renderer::{render, RenderedBlock, RenderedBlockHtml, Renderer};
pub use resolve::{Resolution, ResolutionSource, Resolver};
pub use session::{Notification, NotificationLevel, SiteSession, TemplateSession};
pub use share::{ShareContent, SharePlatform};
pub use task::{run_cancellable, CancelToken, TaskOutcome};
