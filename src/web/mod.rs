//! Browser side of the seams: DOM bindings, `fetch` transport and event
//! wiring.

mod dom;
mod events;
mod fetch;

pub use dom::DomBindings;
pub use events::attach;
pub use fetch::FetchTransport;

pub(crate) use events::{SharedClient, SharedController};
