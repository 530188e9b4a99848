//! WASM API: `#[wasm_bindgen]` exports for the browser editor.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_runtime` / `destroy_runtime`: lifecycle
//! - `list_block_types`: the block palette
//! - `load_blocks` / `add_block` / `update_field` / `move_block` /
//!   `delete_block` / `duplicate_block` / `select_block`: block editing
//! - `get_controls` / `render_preview`: inspector and canvas
//! - `resolve_site` / `render_public_page`: public site lookup
//!
//! Every export returns a JSON string; failures are `{"error": "..."}`.

use std::cell::RefCell;
use std::future::Future;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::core::block::{Block, BlockType};
use crate::core::registry::list_block_types as registry_block_types;
use crate::core::theme::{Branding, Theme};
use crate::core::BlockId;
use crate::runtime::document::render_site_page;
use crate::runtime::editor::{BlockEditor, Direction};
use crate::runtime::inspector::controls_for;
use crate::runtime::renderer::{RenderedBlockHtml, Renderer};
use crate::workspace::Workspace;

// ── Trivial async executor for WASM ─────────────────────────────────────────
//
// The in-memory store never suspends, so every future completes on its
// first poll.

fn block_on<F: Future>(fut: F) -> Option<F::Output> {
    let mut fut = std::pin::pin!(fut);
    let waker = noop_waker();
    let mut cx = std::task::Context::from_waker(&waker);
    match fut.as_mut().poll(&mut cx) {
        std::task::Poll::Ready(result) => Some(result),
        std::task::Poll::Pending => None,
    }
}

fn noop_waker() -> std::task::Waker {
    use std::task::{RawWaker, RawWakerVTable};

    fn no_op(_: *const ()) {}
    fn clone(p: *const ()) -> RawWaker {
        RawWaker::new(p, &VTABLE)
    }

    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);

    unsafe { std::task::Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) }
}

// ── Global state ────────────────────────────────────────────────────────────

struct WasmRuntime {
    workspace: Workspace,
    editor: BlockEditor,
    theme: Theme,
    branding: Branding,
}

thread_local! {
    static RUNTIME: RefCell<Option<WasmRuntime>> = RefCell::new(None);
}

fn with_runtime<R>(f: impl FnOnce(&mut WasmRuntime) -> R) -> Result<R, String> {
    RUNTIME.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(rt) => Ok(f(rt)),
            None => Err("Runtime not initialized. Call init_runtime() first.".into()),
        }
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct IdResponse {
    id: String,
}

#[derive(Serialize)]
struct ChangedResponse {
    changed: bool,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| json_err(e.to_string()))
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    match result {
        Ok(value) => json(&value),
        Err(e) => json_err(e),
    }
}

fn changed(result: Result<bool, String>) -> String {
    respond(result.map(|changed| ChangedResponse { changed }))
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_runtime() {
    console_error_panic_hook::set_once();

    RUNTIME.with(|cell| {
        *cell.borrow_mut() = Some(WasmRuntime {
            workspace: Workspace::in_memory(),
            editor: BlockEditor::new(),
            theme: Theme::default(),
            branding: Branding::default(),
        });
    });
}

#[wasm_bindgen]
pub fn destroy_runtime() {
    RUNTIME.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn list_block_types() -> String {
    json(&registry_block_types())
}

/// Replace the editor contents with a JSON array of blocks.
#[wasm_bindgen]
pub fn load_blocks(blocks_json: &str) -> String {
    let blocks: Vec<Block> = match serde_json::from_str(blocks_json) {
        Ok(b) => b,
        Err(e) => return json_err(format!("Invalid blocks JSON: {}", e)),
    };
    respond(with_runtime(|rt| {
        rt.editor = BlockEditor::from_blocks(blocks);
        rt.editor.blocks().to_vec()
    }))
}

#[wasm_bindgen]
pub fn get_blocks() -> String {
    respond(with_runtime(|rt| rt.editor.blocks().to_vec()))
}

#[wasm_bindgen]
pub fn add_block(type_tag: &str) -> String {
    let block_type = match type_tag.parse::<BlockType>() {
        Ok(t) => t,
        Err(e) => return json_err(e.to_string()),
    };
    respond(with_runtime(|rt| IdResponse {
        id: rt.editor.add_block(block_type).to_string(),
    }))
}

#[wasm_bindgen]
pub fn update_field(block_id: &str, field: &str, value_json: &str) -> String {
    let value: serde_json::Value = match serde_json::from_str(value_json) {
        Ok(v) => v,
        Err(e) => return json_err(format!("Invalid value JSON: {}", e)),
    };
    let id = BlockId::from(block_id);
    respond(
        with_runtime(|rt| rt.editor.update_field(&id, field, value))
            .and_then(|update| update.map_err(|e| e.to_string())),
    )
}

#[wasm_bindgen]
pub fn move_block(block_id: &str, direction: &str) -> String {
    let direction = match direction.to_ascii_lowercase().as_str() {
        "up" => Direction::Up,
        "down" => Direction::Down,
        other => return json_err(format!("Unknown direction: '{}'", other)),
    };
    let id = BlockId::from(block_id);
    changed(with_runtime(|rt| rt.editor.move_block(&id, direction)))
}

#[wasm_bindgen]
pub fn delete_block(block_id: &str) -> String {
    let id = BlockId::from(block_id);
    changed(with_runtime(|rt| rt.editor.delete_block(&id)))
}

#[wasm_bindgen]
pub fn duplicate_block(block_id: &str) -> String {
    let id = BlockId::from(block_id);
    match with_runtime(|rt| rt.editor.duplicate_block(&id)) {
        Ok(Some(copy)) => json(&IdResponse { id: copy.to_string() }),
        Ok(None) => json_err(format!("Block not found: {}", block_id)),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn select_block(block_id: &str) -> String {
    let id = BlockId::from(block_id);
    changed(with_runtime(|rt| rt.editor.select(&id)))
}

/// Inspector controls for one block.
#[wasm_bindgen]
pub fn get_controls(block_id: &str) -> String {
    let id = BlockId::from(block_id);
    match with_runtime(|rt| rt.editor.get(&id).map(|b| controls_for(&b.content))) {
        Ok(Some(controls)) => json(&controls),
        Ok(None) => json_err(format!("Block not found: {}", block_id)),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn set_theme(theme_json: &str) -> String {
    let theme: Theme = match serde_json::from_str(theme_json) {
        Ok(t) => t,
        Err(e) => return json_err(format!("Invalid theme JSON: {}", e)),
    };
    changed(with_runtime(|rt| {
        rt.theme = theme;
        true
    }))
}

#[wasm_bindgen]
pub fn set_branding(branding_json: &str) -> String {
    let branding: Branding = match serde_json::from_str(branding_json) {
        Ok(b) => b,
        Err(e) => return json_err(format!("Invalid branding JSON: {}", e)),
    };
    changed(with_runtime(|rt| {
        rt.branding = branding;
        true
    }))
}

/// Render the editor's blocks to HTML fragments.
#[wasm_bindgen]
pub fn render_preview() -> String {
    respond(with_runtime(|rt| {
        Renderer::new(&rt.theme, &rt.branding)
            .render(rt.editor.blocks())
            .iter()
            .map(RenderedBlockHtml::from)
            .collect::<Vec<_>>()
    }))
}

/// Resolve a public site slug. `query` is the page's query string.
#[wasm_bindgen]
pub fn resolve_site(slug: &str, query: &str) -> String {
    let query = (!query.is_empty()).then_some(query);
    match with_runtime(|rt| rt.workspace.resolver.resolve_site(slug, query).into_value()) {
        Ok(Some(site)) => json(&site),
        Ok(None) => json_err(format!("Site not found: {}", slug)),
        Err(e) => json_err(e),
    }
}

/// Full HTML for one page of a public site.
#[wasm_bindgen]
pub fn render_public_page(slug: &str, path: &str, query: &str) -> String {
    let query = (!query.is_empty()).then_some(query);
    let rendered = with_runtime(|rt| {
        let site = rt.workspace.resolver.resolve_site(slug, query).into_value()?;
        let page = site.page_by_path(path)?;
        Some(render_site_page(&site, page))
    });
    match rendered {
        Ok(Some(html)) => html,
        Ok(None) => json_err(format!("Page not found: /s/{}{}", slug, path)),
        Err(e) => json_err(e),
    }
}

/// Create a site in the in-memory workspace and return it.
#[wasm_bindgen]
pub fn create_site(name: &str, slug: &str) -> String {
    let created = with_runtime(|rt| {
        let service = rt.workspace.service.clone();
        block_on(async move {
            use crate::service::WebsiteService;
            service.create_site(name, slug).await
        })
    });
    match created {
        Ok(Some(Ok(site))) => json(&site),
        Ok(Some(Err(e))) => json_err(e.to_string()),
        Ok(None) => json_err("Operation did not complete"),
        Err(e) => json_err(e),
    }
}

/// Publish a site from the in-memory workspace.
#[wasm_bindgen]
pub fn publish_site(site_id: &str) -> String {
    let published = with_runtime(|rt| {
        let service = rt.workspace.service.clone();
        block_on(async move {
            use crate::service::WebsiteService;
            service.publish_site(site_id).await
        })
    });
    match published {
        Ok(Some(Ok(receipt))) => json(&receipt),
        Ok(Some(Err(e))) => json_err(e.to_string()),
        Ok(None) => json_err("Operation did not complete"),
        Err(e) => json_err(e),
    }
}
