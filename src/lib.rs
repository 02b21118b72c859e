//! Attack Tree Generator - WASM Module
//!
//! Browser client for the attack tree generator backend. It turns the
//! backend's flat node list into a hierarchy, lays it out as a tidy tree,
//! draws it as SVG (or asks the backend to) and exports SVG, PNG or JSON.
//!
//! # Architecture
//!
//! - `tree`: wire model, label wrapping and hierarchy adaptation
//! - `layout`: node box geometry and the Buchheim tidy tree
//! - `spatial`: R-tree over the laid out boxes for hit testing
//! - `render`: SVG writer, PNG rasteriser and JSON export
//! - `api`: backend client over a pluggable `Transport`
//! - `view`: page state machine and its async driver
//! - `web`: DOM bindings, `fetch` transport and event wiring
//! - `config`, `logging`: ambient setup

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub mod api;
pub mod config;
pub mod layout;
pub mod logging;
pub mod render;
pub mod spatial;
pub mod tree;
pub mod view;
pub mod web;

use api::ApiClient;
use config::AppConfig;
use layout::{GeometryConfig, LayoutOrientation, TidyTreeConfig};
use render::{ExportFormat, SvgOptions, layout_tree, render_svg};
use tree::{AttackTree, build_hierarchy};
use view::ViewController;
use view::driver::{run_check_auth, run_generate, run_switch_format};
use web::{DomBindings, FetchTransport, SharedClient, SharedController};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn parse_tree(tree_json: &str) -> Result<AttackTree, JsValue> {
    serde_json::from_str(tree_json).map_err(js_err)
}

// =============================================================================
// Pipeline Functions
// =============================================================================

/// Greedily wrap `text` into lines, using the estimated glyph width.
///
/// # Arguments
///
/// * `text` - Text to wrap; runs of whitespace collapse to one space
/// * `max_width_px` - Line budget in pixels (130 for nodes, 150 for the root)
#[wasm_bindgen(js_name = wrapText)]
pub fn wrap_text(text: &str, max_width_px: f32) -> Vec<String> {
    tree::wrap_text(text, max_width_px)
}

/// Adapt a backend tree into the nested `{id, label, children}` hierarchy.
///
/// # Arguments
///
/// * `tree_json` - `AttackTree` JSON as returned by `/generate`
#[wasm_bindgen(js_name = buildHierarchy)]
pub fn build_hierarchy_js(tree_json: &str) -> Result<JsValue, JsValue> {
    let tree = parse_tree(tree_json)?;
    let hierarchy = build_hierarchy(&tree).to_tree();
    serde_wasm_bindgen::to_value(&hierarchy).map_err(js_err)
}

/// Box `{width, height, offsetX, offsetY}` for a label with the default
/// geometry.
///
/// # Arguments
///
/// * `label` - Label text, lines separated by `\n`
/// * `is_root` - Whether the box belongs to the synthetic root
#[wasm_bindgen(js_name = boxFor)]
pub fn box_for(label: &str, is_root: bool) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&layout::box_for(label, is_root)).map_err(js_err)
}

/// Lay out and draw a backend tree with default settings.
///
/// # Arguments
///
/// * `tree_json` - `AttackTree` JSON as returned by `/generate`
/// * `horizontal` - If true, root at the left; if false, root at the top
#[wasm_bindgen(js_name = renderSvg)]
pub fn render_svg_js(tree_json: &str, horizontal: bool) -> Result<String, JsValue> {
    let tree = parse_tree(tree_json)?;
    let geometry = GeometryConfig::default();
    let config = TidyTreeConfig {
        orientation: if horizontal {
            LayoutOrientation::Horizontal
        } else {
            LayoutOrientation::Vertical
        },
        ..Default::default()
    };
    let diagram = layout_tree(&tree, &geometry, &config);
    Ok(render_svg(&diagram, &geometry, &SvgOptions::default()))
}

/// The generator page.
///
/// Owns the view controller and the backend client. Async methods return
/// promises that resolve once the page has been updated; failures are shown
/// in the page rather than rejected.
#[wasm_bindgen]
pub struct AttackTreeApp {
    controller: SharedController,
    api: SharedClient,
}

#[wasm_bindgen]
impl AttackTreeApp {
    /// Create the app and install logging.
    ///
    /// # Arguments
    ///
    /// * `config` - Optional `AppConfig` object (`baseUrl`, `renderMode`,
    ///   `logLevel`, ...); `undefined` or `null` means all defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AttackTreeApp, JsValue> {
        let config: AppConfig = if config.is_undefined() || config.is_null() {
            AppConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_err)?
        };
        logging::init(&config.log_level);

        let bindings = DomBindings::new().map_err(js_err)?;
        let api = ApiClient::new(FetchTransport, config.base_url.clone());
        let controller = ViewController::new(bindings, config);

        Ok(Self {
            controller: Rc::new(RefCell::new(controller)),
            api: Rc::new(api),
        })
    }

    /// Install the page's event listeners.
    ///
    /// Fails if a listener cannot be registered; optional buttons that are
    /// missing from the page are skipped.
    pub fn attach(&self) -> Result<(), JsValue> {
        web::attach(&self.controller, &self.api).map_err(js_err)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Ask `/auth/user` and show either the app or the login screen.
    #[wasm_bindgen(js_name = checkAuth)]
    pub fn check_auth(&self) -> Promise {
        let (controller, api) = (self.controller.clone(), self.api.clone());
        future_to_promise(async move {
            run_check_auth(&controller, &api).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    pub fn login(&self) {
        self.controller.borrow_mut().login();
    }

    pub fn logout(&self) {
        self.controller.borrow_mut().logout();
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Submit the scenario form.
    ///
    /// Does nothing while a request is already in flight.
    pub fn generate(&self) -> Promise {
        let (controller, api) = (self.controller.clone(), self.api.clone());
        future_to_promise(async move {
            run_generate(&controller, &api).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Reset the form and offer a new example scenario.
    pub fn clear(&self) {
        self.controller.borrow_mut().clear();
    }

    /// Drop the current tree and start over.
    #[wasm_bindgen(js_name = generateNew)]
    pub fn generate_new(&self) {
        self.controller.borrow_mut().generate_new();
    }

    #[wasm_bindgen(js_name = fillSampleData)]
    pub fn fill_sample_data(&self) {
        self.controller.borrow_mut().fill_sample_data();
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Select the image format, re-rendering on the server if configured.
    ///
    /// # Arguments
    ///
    /// * `format` - `"svg"` or `"png"` (case-insensitive)
    #[wasm_bindgen(js_name = switchFormat)]
    pub fn switch_format(&self, format: &str) -> Result<Promise, JsValue> {
        let format: ExportFormat = format.parse().map_err(|e: String| JsValue::from_str(&e))?;
        let (controller, api) = (self.controller.clone(), self.api.clone());
        Ok(future_to_promise(async move {
            run_switch_format(&controller, &api, format).await;
            Ok(JsValue::UNDEFINED)
        }))
    }

    #[wasm_bindgen(js_name = downloadImage)]
    pub fn download_image(&self) {
        self.controller.borrow_mut().download_image();
    }

    #[wasm_bindgen(js_name = downloadJson)]
    pub fn download_json(&self) {
        self.controller.borrow_mut().download_json();
    }

    /// Add a font used when rasterising PNG exports.
    ///
    /// # Arguments
    ///
    /// * `data` - TrueType or OpenType font file bytes
    #[wasm_bindgen(js_name = registerFont)]
    pub fn register_font(&self, data: Vec<u8>) {
        self.controller.borrow_mut().register_font(data);
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    /// Find the node under a point of the client-rendered diagram.
    ///
    /// Returns the node id, or None if the point hits no box or the diagram
    /// was rendered by the server.
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate in SVG document space
    /// * `y` - Y coordinate in SVG document space
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f32, y: f32) -> Option<String> {
        self.controller.borrow().node_at(x, y).map(str::to_owned)
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::spatial::SpatialIndex;
    use crate::tree::{AttackNode, MAX_DEPTH};
    use pretty_assertions::assert_eq;

    fn draw(tree: &AttackTree) -> (layout::DiagramLayout, String) {
        let geometry = GeometryConfig::default();
        let diagram = layout_tree(tree, &geometry, &TidyTreeConfig::default());
        let svg = render_svg(&diagram, &geometry, &SvgOptions::default());
        (diagram, svg)
    }

    #[test]
    fn test_flat_list_to_svg() {
        let tree = AttackTree {
            goal: "Exfiltrate the customer database".into(),
            nodes: vec![
                AttackNode::new("n1", "Gain database credentials", &["n2", "n3"]),
                AttackNode::new("n2", "Phish a DBA", &[]).with_metrics(Some(0.4), Some(500.0)),
                AttackNode::new("n3", "Read credentials from a leaked backup", &[]),
                AttackNode::new("n4", "Exploit SQL injection in search", &[]),
            ],
        };

        let (diagram, svg) = draw(&tree);
        let ids: Vec<&str> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "n1", "n2", "n3", "n4"]);
        assert_eq!(diagram.links.len(), 4);
        assert!(SpatialIndex::from_layout(&diagram).overlapping_pairs().is_empty());

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 5);
        assert_eq!(svg.matches("<path").count(), 4);
        assert!(svg.contains(">Exfiltrate the<"));
    }

    #[test]
    fn test_shared_subtree_is_drawn_under_each_parent() {
        let tree = AttackTree {
            goal: "Take over an admin account".into(),
            nodes: vec![
                AttackNode::new("a", "Phish the admin", &["b"]),
                AttackNode::new("c", "Bribe support staff", &["b"]),
                AttackNode::new("b", "Reset the password", &["d"]),
                AttackNode::new("d", "Intercept the reset email", &[]),
            ],
        };

        let (diagram, svg) = draw(&tree);
        let ids: Vec<&str> = diagram.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "b", "d", "c", "b", "d"]);
        assert!(SpatialIndex::from_layout(&diagram).overlapping_pairs().is_empty());
        assert_eq!(svg.matches("Reset the password").count(), 2);
    }

    #[test]
    fn test_reference_cycle_still_renders() {
        let tree = AttackTree {
            goal: "Persist on the build server".into(),
            nodes: vec![
                AttackNode::new("a", "Compromise CI", &["b"]),
                AttackNode::new("b", "Plant a malicious step", &["c"]),
                AttackNode::new("c", "Re-trigger the pipeline", &["b"]),
            ],
        };

        let (diagram, svg) = draw(&tree);
        assert_eq!(diagram.nodes.len(), 4);
        assert_eq!(diagram.links.len(), 3);
        assert_eq!(svg.matches("<rect").count(), 4);
    }

    #[test]
    fn test_very_deep_chain_renders() {
        let len = 10_000;
        let nodes = (0..len)
            .map(|i| {
                let next = format!("n{}", i + 1);
                let children: Vec<&str> = if i + 1 < len { vec![next.as_str()] } else { vec![] };
                AttackNode::new(format!("n{i}"), format!("step {i}"), &children)
            })
            .collect();
        let tree = AttackTree {
            goal: "Reach the bottom".into(),
            nodes,
        };

        let (diagram, svg) = draw(&tree);
        assert_eq!(diagram.nodes.len(), MAX_DEPTH + 1);
        assert_eq!(diagram.links.len(), MAX_DEPTH);
        assert!(diagram.nodes.iter().all(|n| n.x == 0.0));
        assert!(SpatialIndex::from_layout(&diagram).overlapping_pairs().is_empty());
        assert_eq!(svg.matches("<rect").count(), MAX_DEPTH + 1);
    }

    #[test]
    fn test_render_svg_entry_point() {
        let json = r#"{"goal": "Steal secrets", "nodes": [{"id": "n1", "text": "Read env vars"}]}"#;
        let vertical = render_svg_js(json, false).unwrap();
        let horizontal = render_svg_js(json, true).unwrap();
        assert!(vertical.contains("Read env vars"));
        assert_ne!(vertical, horizontal);
    }
}
