//! Wire format returned by the generation endpoint.

use serde::{Deserialize, Serialize};

/// A complete attack tree: the adversary goal plus a flat node list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackTree {
    /// Root objective text.
    pub goal: String,
    /// Nodes in backend order. Order is significant for the hierarchy.
    pub nodes: Vec<AttackNode>,
}

/// A single step in the attack tree.
///
/// Absent optional fields are written back as `null`, the way the backend
/// sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackNode {
    /// Unique within a tree.
    pub id: String,
    /// Node description.
    pub text: String,
    /// Gate type (`"or"` / `"and"`). Carried through untouched.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Ids of child nodes. May reference nodes later in the list or
    /// ids that do not exist at all.
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
    /// Suggested mitigation. Carried through untouched.
    #[serde(default)]
    pub defense: Option<String>,
}

impl AttackNode {
    /// Create a node with text and children only.
    pub fn new(id: impl Into<String>, text: impl Into<String>, children: &[&str]) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind: None,
            children: children.iter().map(|c| (*c).to_owned()).collect(),
            probability: None,
            cost: None,
            defense: None,
        }
    }

    /// Attach probability and cost estimates.
    pub fn with_metrics(mut self, probability: Option<f64>, cost: Option<f64>) -> Self {
        self.probability = probability;
        self.cost = cost;
        self
    }
}

/// Format a metric the way a browser prints a number (`200.0` -> `200`,
/// `0.6` -> `0.6`).
pub fn format_metric(value: f64) -> String {
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(value).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_backend_payload() {
        let json = r#"{
            "goal": "steal funds",
            "nodes": [
                {"id": "n0", "text": "compromise payment server", "type": "or", "children": ["n1"], "probability": null, "cost": null, "defense": null},
                {"id": "n1", "text": "exploit CVE", "probability": 0.6, "cost": 200}
            ]
        }"#;
        let tree: AttackTree = serde_json::from_str(json).unwrap();

        assert_eq!(tree.goal, "steal funds");
        assert_eq!(tree.nodes.len(), 2);
        assert_eq!(tree.nodes[0].kind.as_deref(), Some("or"));
        assert_eq!(tree.nodes[0].probability, None);
        assert!(tree.nodes[1].children.is_empty(), "children default to empty");
        assert_eq!(tree.nodes[1].probability, Some(0.6));
        assert_eq!(tree.nodes[1].cost, Some(200.0));
    }

    #[test]
    fn test_json_export_round_trip() {
        let tree = AttackTree {
            goal: "Access customer data".into(),
            nodes: vec![
                AttackNode::new("a", "Phish an administrator", &["b"]),
                AttackNode::new("b", "Reuse stolen session", &[]).with_metrics(Some(0.3), Some(50.0)),
            ],
        };

        let exported = serde_json::to_string_pretty(&tree).unwrap();
        let parsed: AttackTree = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed, tree);
        assert!(exported.contains(r#""defense": null"#));
    }

    #[test]
    fn test_null_fields_are_written_back() {
        let json = r#"{"goal":"g","nodes":[{"id":"n0","text":"t","type":"or","children":[],"probability":null,"cost":null,"defense":null}]}"#;
        let tree: AttackTree = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&tree).unwrap(), json);
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(0.6), "0.6");
        assert_eq!(format_metric(200.0), "200");
        assert_eq!(format_metric(1.5), "1.5");
        assert_eq!(format_metric(0.0), "0");
    }
}
