//! Page state machine and its seams to the DOM and the network.

mod bindings;
mod controller;
pub mod driver;
pub mod scenarios;

#[cfg(test)]
pub(crate) mod testing;

pub use bindings::{BindingError, Diagram, ViewBindings};
pub use controller::{
    AppError, RenderRequest, RenderedDiagram, SessionState, ViewController, ViewState,
};
pub use scenarios::{SAMPLE, SCENARIOS, Scenario};
