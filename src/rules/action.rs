//! Styling actions
//!
//! Actions carry their argument as raw text and validate at application
//! time: an invalid argument makes the action a no-op for that field, never
//! an error.

use crate::graph::{Node, NodeMaterial, NodeShape};

/// Lower clamp bound for `size(..)`
pub const MIN_SIZE: f64 = 0.1;
/// Upper clamp bound for `size(..)`
pub const MAX_SIZE: f64 = 10.0;

/// One styling action from a parsed rule
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Set the node color verbatim; any string is accepted
    Color(String),
    /// Set the node shape; must name one of the nine shapes
    Shape(String),
    /// Set the node material; must name one of the four materials
    Material(String),
    /// Set the node size; must parse as a finite number > 0, clamped into
    /// [`MIN_SIZE`, `MAX_SIZE`]
    Size(String),
}

/// Apply one action to a node, returning the styled copy.
///
/// Pure copy-on-write: the input node is never mutated, so the same node can
/// safely feed concurrent rule passes.
pub fn apply_action(node: &Node, action: &Action) -> Node {
    let mut styled = node.clone();
    match action {
        Action::Color(value) => styled.color = Some(value.clone()),
        Action::Shape(value) => {
            if let Some(shape) = NodeShape::parse(value) {
                styled.shape = Some(shape);
            }
        }
        Action::Material(value) => {
            if let Some(material) = NodeMaterial::parse(value) {
                styled.material = Some(material);
            }
        }
        Action::Size(value) => {
            if let Ok(size) = value.trim().parse::<f64>() {
                if size.is_finite() && size > 0.0 {
                    styled.size = Some(size.clamp(MIN_SIZE, MAX_SIZE));
                }
            }
        }
    }
    styled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> Node {
        Node::new("a.md", "a")
    }

    #[test]
    fn test_color_accepts_any_string() {
        let styled = apply_action(&node(), &Action::Color("#ff00aa".into()));
        assert_eq!(styled.color.as_deref(), Some("#ff00aa"));

        let styled = apply_action(&node(), &Action::Color("not a color".into()));
        assert_eq!(styled.color.as_deref(), Some("not a color"));
    }

    #[test]
    fn test_shape_validates() {
        let styled = apply_action(&node(), &Action::Shape("cube".into()));
        assert_eq!(styled.shape, Some(NodeShape::Cube));

        let styled = apply_action(&node(), &Action::Shape("not-a-shape".into()));
        assert_eq!(styled.shape, None);
    }

    #[test]
    fn test_material_validates() {
        let styled = apply_action(&node(), &Action::Material("Glass".into()));
        assert_eq!(styled.material, Some(NodeMaterial::Glass));

        let styled = apply_action(&node(), &Action::Material("wood".into()));
        assert_eq!(styled.material, None);
    }

    #[test]
    fn test_size_clamps() {
        let styled = apply_action(&node(), &Action::Size("0.01".into()));
        assert_eq!(styled.size, Some(0.1));

        let styled = apply_action(&node(), &Action::Size("999".into()));
        assert_eq!(styled.size, Some(10.0));

        let styled = apply_action(&node(), &Action::Size("2.5".into()));
        assert_eq!(styled.size, Some(2.5));
    }

    #[test]
    fn test_size_rejects_non_positive_and_non_numeric() {
        for bad in ["abc", "", "0", "-3", "NaN", "inf"] {
            let styled = apply_action(&node(), &Action::Size(bad.into()));
            assert_eq!(styled.size, None, "size({:?}) should be a no-op", bad);
        }
    }

    #[test]
    fn test_invalid_action_leaves_other_fields_alone() {
        let mut base = node();
        base.color = Some("red".into());
        let styled = apply_action(&base, &Action::Shape("bogus".into()));
        assert_eq!(styled.color.as_deref(), Some("red"));
        assert_eq!(styled.shape, None);
    }
}
