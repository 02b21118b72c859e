use tracing::{debug, info, warn};

use crate::api::{AuthStatus, ClientError, GenerateRequest};
use crate::config::{AppConfig, RenderMode};
use crate::layout::DiagramLayout;
use crate::render::{
    self, Download, ExportFormat, RasterOptions, RenderError, json_download, layout_tree,
    render_svg, svg_to_png,
};
use crate::spatial::SpatialIndex;
use crate::tree::AttackTree;

use super::bindings::{BindingError, Diagram, ViewBindings};
use super::scenarios::{SAMPLE, SCENARIOS, Scenario};

/// User-visible failure. `Display` is the message shown in the page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please fill in both title and description")]
    Validation,
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Failed to download image: {0}")]
    Render(#[from] RenderError),
    #[error("No visualization found to download")]
    NoVisualization,
    #[error("Download failed: {0}")]
    Binding(#[from] BindingError),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// The diagram currently on screen.
#[derive(Debug)]
pub enum RenderedDiagram {
    Local {
        layout: DiagramLayout,
        svg: String,
        index: SpatialIndex,
    },
    Remote {
        format: ExportFormat,
        bytes: Vec<u8>,
    },
}

/// Session data. Replaced as a whole at each step of a cycle.
#[derive(Debug, Default)]
pub struct SessionState {
    pub tree: Option<AttackTree>,
    pub format: ExportFormat,
    pub scenario: Option<Scenario>,
    pub diagram: Option<RenderedDiagram>,
}

/// Server-side render the driver must perform.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub tree: AttackTree,
    pub format: ExportFormat,
}

type ScenarioPicker = Box<dyn FnMut(usize) -> usize>;

/// Page state machine: `Idle -> Loading -> {Success, Error}`.
///
/// Network calls are not made here. `begin_*` methods return the request
/// to perform and `finish_*` methods take its outcome, so the caller can
/// await between them without holding a borrow.
pub struct ViewController<B> {
    bindings: B,
    config: AppConfig,
    state: ViewState,
    session: SessionState,
    pick_scenario: ScenarioPicker,
    fonts: Vec<Vec<u8>>,
}

impl<B: ViewBindings> ViewController<B> {
    pub fn new(bindings: B, config: AppConfig) -> Self {
        Self {
            bindings,
            config,
            state: ViewState::Idle,
            session: SessionState::default(),
            pick_scenario: default_picker(),
            fonts: Vec::new(),
        }
    }

    /// Replace the random scenario choice. The closure gets the number of
    /// scenarios and returns an index.
    pub fn with_scenario_picker(mut self, picker: impl FnMut(usize) -> usize + 'static) -> Self {
        self.pick_scenario = Box::new(picker);
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut B {
        &mut self.bindings
    }

    /// Font used when rasterising PNG exports.
    pub fn register_font(&mut self, data: Vec<u8>) {
        self.fonts.push(data);
    }

    /// Validate the form and enter `Loading`.
    ///
    /// Returns `None` without side effects while a request is in flight.
    /// Empty title and description fall back to the scenario shown as
    /// placeholder.
    pub fn begin_generate(&mut self) -> Option<GenerateRequest> {
        if self.state == ViewState::Loading {
            debug!("generation already in flight");
            return None;
        }

        let title = self.bindings.title().trim().to_owned();
        let description = self.bindings.description().trim().to_owned();

        let request = match (title.is_empty(), description.is_empty(), self.session.scenario) {
            (true, true, Some(scenario)) => GenerateRequest {
                title: scenario.title.to_owned(),
                description: scenario.description.to_owned(),
            },
            (false, false, _) => GenerateRequest { title, description },
            _ => {
                self.fail(AppError::Validation);
                return None;
            }
        };

        self.bindings.hide_error();
        self.bindings.hide_results();
        self.transition(ViewState::Loading);
        Some(request)
    }

    /// Apply the generation outcome.
    ///
    /// In server render mode a successful tree stays in `Loading` and the
    /// returned request must be performed and passed to `finish_render`.
    pub fn finish_generate(
        &mut self,
        result: Result<AttackTree, ClientError>,
    ) -> Option<RenderRequest> {
        let tree = match result {
            Ok(tree) => tree,
            Err(err) => {
                self.client_failure(err);
                return None;
            }
        };

        let json = match render::export_json(&tree) {
            Ok(json) => json,
            Err(err) => {
                self.fail(err.into());
                return None;
            }
        };
        info!(nodes = tree.nodes.len(), "attack tree generated");

        // a new tree always starts out as SVG
        let previous = std::mem::take(&mut self.session);
        self.session = SessionState {
            tree: Some(tree),
            format: ExportFormat::Svg,
            scenario: previous.scenario,
            diagram: None,
        };
        self.bindings.show_results(&json);
        self.bindings.set_format(self.session.format);

        match self.config.render_mode {
            RenderMode::ClientSide => {
                self.render_local();
                self.transition(ViewState::Success);
                None
            }
            RenderMode::ServerSide => self.render_request(),
        }
    }

    /// Select an export format.
    ///
    /// Client-side rendering only changes what gets downloaded; server-side
    /// rendering needs a fresh image, returned as a request.
    pub fn begin_switch_format(&mut self, format: ExportFormat) -> Option<RenderRequest> {
        if self.state == ViewState::Loading
            || self.session.tree.is_none()
            || format == self.session.format
        {
            return None;
        }

        let previous = std::mem::take(&mut self.session);
        let diagram = match previous.diagram {
            Some(RenderedDiagram::Remote { .. }) => None,
            other => other,
        };
        self.session = SessionState {
            format,
            diagram,
            ..previous
        };
        self.bindings.set_format(format);
        debug!(%format, "export format selected");

        match self.config.render_mode {
            RenderMode::ClientSide => None,
            RenderMode::ServerSide => {
                self.bindings.hide_error();
                self.transition(ViewState::Loading);
                self.render_request()
            }
        }
    }

    /// Apply a server rendering outcome.
    pub fn finish_render(&mut self, format: ExportFormat, result: Result<Vec<u8>, ClientError>) {
        match result {
            Ok(bytes) => {
                self.bindings.show_diagram(&Diagram::Image {
                    format,
                    bytes: &bytes,
                });
                let previous = std::mem::take(&mut self.session);
                self.session = SessionState {
                    diagram: Some(RenderedDiagram::Remote { format, bytes }),
                    ..previous
                };
                self.transition(ViewState::Success);
            }
            Err(err) => self.client_failure(err),
        }
    }

    /// Save the diagram in the selected format.
    pub fn download_image(&mut self) {
        if self.session.tree.is_none() {
            return;
        }
        if let Err(err) = self.try_download_image() {
            self.report(err);
        }
    }

    /// Save the raw tree as `attack-tree.json`.
    pub fn download_json(&mut self) {
        let Some(tree) = &self.session.tree else {
            return;
        };
        let result = json_download(tree)
            .map_err(AppError::from)
            .and_then(|download| Ok(self.bindings.download(&download)?));
        if let Err(err) = result {
            self.report(err);
        }
    }

    /// Reset the form and offer a new example. Results stay on screen.
    pub fn clear(&mut self) {
        self.bindings.reset_form();
        self.load_random_scenario();
        self.bindings.focus_title();
        if matches!(self.state, ViewState::Error(_)) {
            self.bindings.hide_error();
            self.transition(ViewState::Idle);
        }
    }

    /// Drop the current tree and start over.
    pub fn generate_new(&mut self) {
        self.bindings.hide_results();
        self.bindings.hide_error();
        self.session = SessionState::default();
        self.bindings.set_format(self.session.format);
        self.bindings.reset_form();
        self.load_random_scenario();
        self.bindings.focus_title();
        if self.state != ViewState::Loading {
            self.transition(ViewState::Idle);
        }
    }

    pub fn fill_sample_data(&mut self) {
        self.bindings.set_form_values(SAMPLE.title, SAMPLE.description);
    }

    /// Pick an example scenario and show it as the form placeholder.
    pub fn load_random_scenario(&mut self) {
        let index = (self.pick_scenario)(SCENARIOS.len()).min(SCENARIOS.len() - 1);
        let scenario = SCENARIOS[index];
        self.bindings.set_placeholders(&scenario);
        let previous = std::mem::take(&mut self.session);
        self.session = SessionState {
            scenario: Some(scenario),
            ..previous
        };
    }

    /// Show either the app or the login screen. Failures count as logged out.
    pub fn finish_check_auth(&mut self, result: Result<AuthStatus, ClientError>) {
        match result {
            Ok(status) if status.authenticated => {
                info!(user = status.display_name(), "signed in");
                self.bindings.show_main_app(status.display_name());
                self.load_random_scenario();
            }
            Ok(_) => self.bindings.show_login_screen(),
            Err(err) => {
                warn!(error = %err, "auth status check failed");
                self.bindings.show_login_screen();
            }
        }
    }

    pub fn login(&mut self) {
        let url = self.config.endpoint("/auth/login");
        self.bindings.navigate(&url);
    }

    pub fn logout(&mut self) {
        let url = self.config.endpoint("/auth/logout");
        self.bindings.navigate(&url);
    }

    /// Id of the node under a point given in SVG document coordinates.
    pub fn node_at(&self, x: f32, y: f32) -> Option<&str> {
        let Some(RenderedDiagram::Local { layout, index, .. }) = &self.session.diagram else {
            return None;
        };
        let margin = self.config.svg.margin;
        let layout_x = x - (margin.left - layout.bounds.min_x);
        let layout_y = y - (margin.top - layout.bounds.min_y);
        index
            .node_at(layout_x, layout_y)
            .and_then(|i| layout.nodes.get(i))
            .map(|node| node.id.as_str())
    }

    fn render_local(&mut self) {
        let Some(tree) = &self.session.tree else {
            return;
        };
        let layout = layout_tree(tree, &self.config.geometry, &self.config.layout);
        let svg = render_svg(&layout, &self.config.geometry, &self.config.svg);
        let index = SpatialIndex::from_layout(&layout);

        self.bindings.show_diagram(&Diagram::Svg(&svg));
        self.session.diagram = Some(RenderedDiagram::Local { layout, svg, index });
    }

    fn render_request(&mut self) -> Option<RenderRequest> {
        let tree = self.session.tree.clone()?;
        Some(RenderRequest {
            tree,
            format: self.session.format,
        })
    }

    fn try_download_image(&mut self) -> Result<(), AppError> {
        let format = self.session.format;
        let download = match &self.session.diagram {
            Some(RenderedDiagram::Local { svg, .. }) => match format {
                ExportFormat::Svg => Download::image(format, svg.as_bytes().to_vec()),
                ExportFormat::Png => {
                    let options = RasterOptions {
                        scale: self.config.raster_scale,
                        fonts: self.fonts.clone(),
                        ..Default::default()
                    };
                    Download::image(format, svg_to_png(svg, &options)?)
                }
            },
            Some(RenderedDiagram::Remote { format: shown, bytes }) if *shown == format => {
                Download::image(format, bytes.clone())
            }
            _ => return Err(AppError::NoVisualization),
        };
        self.bindings.download(&download)?;
        debug!(file = download.file_name, bytes = download.bytes.len(), "image downloaded");
        Ok(())
    }

    fn client_failure(&mut self, err: ClientError) {
        let auth_required = matches!(err, ClientError::AuthRequired);
        self.fail(err.into());
        if auth_required {
            let url = self.config.endpoint("/auth/login");
            let delay_ms = self.config.login_redirect_delay_ms;
            self.bindings.schedule_redirect(&url, delay_ms);
        }
    }

    /// Show the error and end the cycle in `Error`.
    fn fail(&mut self, err: AppError) {
        let message = err.to_string();
        warn!(error = %message, "request failed");
        self.bindings.show_error(&message);
        self.transition(ViewState::Error(message));
    }

    /// Show the error without leaving the current state.
    fn report(&mut self, err: AppError) {
        let message = err.to_string();
        warn!(error = %message, "action failed");
        self.bindings.show_error(&message);
    }

    fn transition(&mut self, next: ViewState) {
        let was_loading = self.state == ViewState::Loading;
        let loading = next == ViewState::Loading;
        if was_loading != loading {
            self.bindings.set_loading(loading);
        }
        debug!(from = ?self.state, to = ?next, "view state changed");
        self.state = next;
    }
}

fn default_picker() -> ScenarioPicker {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(|len| (js_sys::Math::random() * len as f64) as usize)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let mut next = 0usize;
        Box::new(move |len| {
            let pick = next % len.max(1);
            next += 1;
            pick
        })
    }
}
