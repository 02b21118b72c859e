//! Text wrapping and label synthesis.
//!
//! Widths are estimated, not measured: every character is assumed to be
//! `CHAR_WIDTH_PX` wide, which approximates a 12px sans-serif font.

use super::model::{AttackNode, format_metric};

/// Estimated advance of one character at 12px.
pub const CHAR_WIDTH_PX: f32 = 7.0;

/// Wrap budget for root-like labels.
pub const ROOT_WRAP_WIDTH: f32 = 150.0;

/// Wrap budget for ordinary node labels.
pub const NODE_WRAP_WIDTH: f32 = 130.0;

/// Separator between label lines.
pub const LINE_BREAK: char = '\n';

/// Estimated pixel width of a line.
#[inline]
pub fn estimated_width(line: &str) -> f32 {
    line.chars().count() as f32 * CHAR_WIDTH_PX
}

/// Greedily wrap `text` into lines no wider than `max_width_px`.
///
/// Words are never split; a word wider than the budget is emitted on a
/// line of its own.
pub fn wrap_text(text: &str, max_width_px: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        // +1 for the joining space
        let candidate_chars = current.chars().count() + 1 + word.chars().count();
        if candidate_chars as f32 * CHAR_WIDTH_PX > max_width_px {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Build the multi-line label for a backend node.
///
/// The wrapped text comes first, followed by one `(P=.., C=..)` line when
/// either metric is present.
pub fn build_label(node: &AttackNode, is_root: bool) -> String {
    let max_width = if is_root { ROOT_WRAP_WIDTH } else { NODE_WRAP_WIDTH };
    let mut lines = wrap_text(&node.text, max_width);

    let mut extras = Vec::with_capacity(2);
    if let Some(probability) = node.probability {
        extras.push(format!("P={}", format_metric(probability)));
    }
    if let Some(cost) = node.cost {
        extras.push(format!("C={}", format_metric(cost)));
    }
    if !extras.is_empty() {
        lines.push(format!("({})", extras.join(", ")));
    }

    join_lines(&lines)
}

/// Label for the synthetic root carrying the tree goal.
pub fn root_label(goal: &str) -> String {
    join_lines(&wrap_text(goal, ROOT_WRAP_WIDTH))
}

fn join_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push(LINE_BREAK);
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_single_line() {
        assert_eq!(wrap_text("  Phish admin  ", NODE_WRAP_WIDTH), vec!["Phish admin"]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(wrap_text("", 100.0).is_empty());
        assert!(wrap_text(" \t\n ", 100.0).is_empty());
    }

    #[test]
    fn test_lines_respect_budget() {
        let text = "An attacker wants to gain unauthorized access to a company web \
                    application to steal customer data from the backing database";
        let lines = wrap_text(text, NODE_WRAP_WIDTH);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                estimated_width(line) <= NODE_WRAP_WIDTH,
                "line {line:?} exceeds the budget"
            );
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_long_word_is_not_split() {
        let lines = wrap_text("use supercalifragilisticexpialidocious now", 70.0);
        assert_eq!(lines, vec!["use", "supercalifragilisticexpialidocious", "now"]);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // 10 chars * 7 = 70px fits a 70px budget exactly
        assert_eq!(wrap_text("abcd efghi", 70.0), vec!["abcd efghi"]);
        assert_eq!(wrap_text("abcd efghij", 70.0), vec!["abcd", "efghij"]);
    }

    #[test]
    fn test_label_with_metrics() {
        let node = AttackNode::new("n1", "Exploit SQL injection in login form", &[])
            .with_metrics(Some(0.6), Some(200.0));
        let label = build_label(&node, false);
        let lines: Vec<&str> = label.split('\n').collect();

        assert_eq!(lines, vec!["Exploit SQL", "injection in login", "form", "(P=0.6, C=200)"]);
    }

    #[test]
    fn test_label_with_single_metric() {
        let node = AttackNode::new("n1", "Bribe insider", &[]).with_metrics(None, Some(5000.0));
        assert_eq!(build_label(&node, false), "Bribe insider\n(C=5000)");

        let node = AttackNode::new("n2", "Guess password", &[]).with_metrics(Some(0.05), None);
        assert_eq!(build_label(&node, false), "Guess password\n(P=0.05)");
    }

    #[test]
    fn test_label_without_metrics() {
        let node = AttackNode::new("n1", "Bribe insider", &[]);
        assert_eq!(build_label(&node, false), "Bribe insider");
    }

    #[test]
    fn test_root_budget_is_wider() {
        // 20 chars = 140px: too wide for a node, fits the root budget
        let text = "Steal customer cards";
        let node = AttackNode::new("n", text, &[]);
        assert_eq!(build_label(&node, false), "Steal customer\ncards");
        assert_eq!(build_label(&node, true), text);
        assert_eq!(root_label(text), text);
    }
}
