//! Query rule engine
//!
//! A small condition→action styling language. Text parses into an ordered
//! rule list; application walks every node and invokes each matching rule's
//! action in parse order. Actions overwrite fields, so rule order is
//! precedence order: the last matching rule wins per field, while different
//! fields set by different rules combine.

mod action;
mod condition;
mod parse;

pub use action::{apply_action, Action, MAX_SIZE, MIN_SIZE};
pub use condition::Condition;
pub use parse::RuleDiagnostic;

use crate::graph::{Edge, Node};
use crate::vault::MetadataIndex;
use condition::EdgeIndex;

/// One `(condition, action)` pair. Rules have no identity beyond their
/// position in the list.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub condition: Condition,
    pub action: Action,
}

/// An ordered rule list parsed from rule text.
///
/// Parsing fully replaces any previous rule set; re-parsing the same text is
/// idempotent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse rule text, silently skipping malformed lines. This is the core
    /// contract; use [`RuleSet::parse_with_diagnostics`] to also report what
    /// was skipped.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_diagnostics(text).0
    }

    /// Parse rule text, collecting a diagnostic per malformed line.
    /// Diagnostics never suppress the rules that did parse.
    pub fn parse_with_diagnostics(text: &str) -> (Self, Vec<RuleDiagnostic>) {
        let mut rules = Vec::new();
        let mut diagnostics = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            match parse::parse_line(line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {}
                Err(message) => diagnostics.push(RuleDiagnostic {
                    line: idx + 1,
                    text: line.trim().to_string(),
                    message,
                }),
            }
        }

        (Self { rules }, diagnostics)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the rules to every node, returning styled copies in the same
    /// order. Nodes are iterated in the order given; rules in parse order.
    pub fn apply(&self, nodes: &[Node], edges: &[Edge], metadata: &MetadataIndex) -> Vec<Node> {
        let index = EdgeIndex::build(edges);

        nodes
            .iter()
            .map(|node| {
                let mut styled = node.clone();
                for rule in &self.rules {
                    if rule.condition.matches(node, &index, metadata) {
                        styled = apply_action(&styled, &rule.action);
                    }
                }
                styled
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::NoteMetadata;

    fn tagged(id: &str, tags: &[&str]) -> (String, NoteMetadata) {
        (
            id.to_string(),
            NoteMetadata {
                frontmatter_tags: tags.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_rule_order_is_precedence_order() {
        let rules = RuleSet::parse("default => color(\"red\")\ntag(\"x\") => color(\"blue\")\n");
        let nodes = vec![Node::new("a.md", "a"), Node::new("b.md", "b")];
        let metadata: MetadataIndex = [tagged("a.md", &["x"])].into();

        let styled = rules.apply(&nodes, &[], &metadata);

        assert_eq!(styled[0].color.as_deref(), Some("blue"));
        assert_eq!(styled[1].color.as_deref(), Some("red"));
    }

    #[test]
    fn test_different_fields_combine() {
        let rules = RuleSet::parse(
            "default => color(\"gray\")\ndefault => shape(\"cube\")\ndefault => size(3)\n",
        );
        let nodes = vec![Node::new("a.md", "a")];

        let styled = rules.apply(&nodes, &[], &MetadataIndex::new());

        assert_eq!(styled[0].color.as_deref(), Some("gray"));
        assert_eq!(styled[0].shape.map(|s| s.as_str()), Some("cube"));
        assert_eq!(styled[0].size, Some(3.0));
    }

    #[test]
    fn test_invalid_action_value_does_not_clear_earlier_match() {
        let rules =
            RuleSet::parse("default => shape(\"cube\")\ndefault => shape(\"bogus\")\n");
        let nodes = vec![Node::new("a.md", "a")];

        let styled = rules.apply(&nodes, &[], &MetadataIndex::new());
        assert_eq!(styled[0].shape.map(|s| s.as_str()), Some("cube"));
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let rules = RuleSet::parse("default => color(\"red\")\n");
        let nodes = vec![Node::new("a.md", "a")];

        let styled = rules.apply(&nodes, &[], &MetadataIndex::new());

        assert_eq!(styled[0].color.as_deref(), Some("red"));
        assert!(nodes[0].color.is_none(), "input nodes stay unstyled");
    }

    #[test]
    fn test_link_to_styles_sources_only() {
        let rules = RuleSet::parse("link_to(\"ghost\") => color(\"red\")\n");
        let nodes = vec![
            Node::new("A.md", "A"),
            Node::new("B.md", "B"),
            Node::phantom("Ghost"),
        ];
        let edges = vec![
            Edge::new(0, "A.md", "B.md"),
            Edge::new(1, "A.md", "Ghost"),
            Edge::new(2, "B.md", "A.md"),
        ];

        let styled = rules.apply(&nodes, &edges, &MetadataIndex::new());

        assert_eq!(styled[0].color.as_deref(), Some("red"));
        assert!(styled[1].color.is_none());
        assert!(styled[2].color.is_none());
    }

    #[test]
    fn test_reparse_replaces_rule_set() {
        let first = RuleSet::parse("default => color(\"red\")\n");
        let second = RuleSet::parse("default => shape(\"torus\")\n");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_ne!(first, second);

        let styled = second.apply(&[Node::new("a", "a")], &[], &MetadataIndex::new());
        assert!(styled[0].color.is_none());
    }

    #[test]
    fn test_empty_rule_set_is_identity() {
        let rules = RuleSet::parse("\n\n");
        assert!(rules.is_empty());

        let nodes = vec![Node::new("a.md", "a")];
        let styled = rules.apply(&nodes, &[], &MetadataIndex::new());
        assert_eq!(styled, nodes);
    }
}
