//! `text/event-stream` bodies from the streaming `/generate` endpoint.
//!
//! Each event carries one JSON object in its `data:` lines, tagged by
//! `type`: `start`, `token`, `done` (with the finished tree) or `error`.

use serde::Deserialize;
use tracing::debug;

use super::{ClientError, Result};
use crate::tree::AttackTree;

pub const EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    Start {
        #[serde(default)]
        message: String,
    },
    Token {
        #[serde(default)]
        content: String,
    },
    Done {
        tree: AttackTree,
    },
    Error {
        #[serde(default)]
        message: String,
    },
    #[serde(other)]
    Unknown,
}

/// Data payloads of every event in `body`, in order.
///
/// Multiple `data:` lines of one event are joined with `\n`; comments and
/// other fields are ignored.
pub fn event_payloads(body: &str) -> Vec<String> {
    let normalized = body.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .filter_map(|block| {
            let lines: Vec<&str> = block
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .map(|data| data.strip_prefix(' ').unwrap_or(data))
                .collect();
            (!lines.is_empty()).then(|| lines.join("\n"))
        })
        .collect()
}

pub fn parse_events(body: &str) -> Result<Vec<StreamEvent>> {
    event_payloads(body)
        .iter()
        .filter(|payload| !payload.trim().is_empty())
        .map(|payload| serde_json::from_str(payload).map_err(ClientError::from))
        .collect()
}

/// The tree carried by the first `done` event.
///
/// An `error` event before it fails the generation with the backend's
/// message, as does a stream that ends without `done`.
pub fn read_tree(body: &str) -> Result<AttackTree> {
    let mut tokens = 0usize;
    for event in parse_events(body)? {
        match event {
            StreamEvent::Start { message } => debug!(%message, "generation started"),
            StreamEvent::Token { .. } => tokens += 1,
            StreamEvent::Done { tree } => {
                debug!(tokens, nodes = tree.nodes.len(), "generation finished");
                return Ok(tree);
            }
            StreamEvent::Error { message } => return Err(ClientError::GenerationFailed(message)),
            StreamEvent::Unknown => {}
        }
    }
    Err(ClientError::GenerationFailed(
        "Generation stream ended without a result".to_string(),
    ))
}
