//! Node representation handed to the rendering layer

use serde::{Deserialize, Serialize};

/// Mesh shape a styling rule can assign to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Sphere,
    Cube,
    Cylinder,
    Cone,
    Torus,
    Tetrahedron,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl NodeShape {
    /// Parse a shape name, case-insensitive. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sphere" => Some(Self::Sphere),
            "cube" => Some(Self::Cube),
            "cylinder" => Some(Self::Cylinder),
            "cone" => Some(Self::Cone),
            "torus" => Some(Self::Torus),
            "tetrahedron" => Some(Self::Tetrahedron),
            "octahedron" => Some(Self::Octahedron),
            "dodecahedron" => Some(Self::Dodecahedron),
            "icosahedron" => Some(Self::Icosahedron),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Cube => "cube",
            Self::Cylinder => "cylinder",
            Self::Cone => "cone",
            Self::Torus => "torus",
            Self::Tetrahedron => "tetrahedron",
            Self::Octahedron => "octahedron",
            Self::Dodecahedron => "dodecahedron",
            Self::Icosahedron => "icosahedron",
        }
    }
}

/// Surface material a styling rule can assign to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeMaterial {
    Default,
    Glass,
    Metal,
    Plastic,
}

impl NodeMaterial {
    /// Parse a material name, case-insensitive. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "glass" => Some(Self::Glass),
            "metal" => Some(Self::Metal),
            "plastic" => Some(Self::Plastic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Glass => "glass",
            Self::Metal => "metal",
            Self::Plastic => "plastic",
        }
    }
}

/// A node in the vault graph: one document, or one unresolved link target
/// (a "phantom" node whose id and label are both the raw link text).
///
/// Styling fields stay `None` until a rule sets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Stable string key: document path, or raw link text for phantoms
    pub id: String,
    /// Display name: document basename, or raw link text for phantoms
    pub label: String,
    /// Color assigned by a rule, verbatim (hex, css name, anything)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<NodeShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<NodeMaterial>,
    /// Render size in [0.1, 10]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

impl Node {
    /// Create an unstyled node
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
            shape: None,
            material: None,
            size: None,
        }
    }

    /// Create a phantom node for an unresolved link target
    pub fn phantom(raw_link: impl Into<String>) -> Self {
        let raw = raw_link.into();
        Self::new(raw.clone(), raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_parse_case_insensitive() {
        assert_eq!(NodeShape::parse("CUBE"), Some(NodeShape::Cube));
        assert_eq!(NodeShape::parse("Icosahedron"), Some(NodeShape::Icosahedron));
        assert_eq!(NodeShape::parse("pyramid"), None);
        assert_eq!(NodeShape::parse(""), None);
    }

    #[test]
    fn test_material_parse() {
        assert_eq!(NodeMaterial::parse("glass"), Some(NodeMaterial::Glass));
        assert_eq!(NodeMaterial::parse("Metal"), Some(NodeMaterial::Metal));
        assert_eq!(NodeMaterial::parse("wood"), None);
    }

    #[test]
    fn test_phantom_uses_raw_text_for_id_and_label() {
        let node = Node::phantom("Not Yet Written");
        assert_eq!(node.id, "Not Yet Written");
        assert_eq!(node.label, "Not Yet Written");
        assert!(node.color.is_none());
    }

    #[test]
    fn test_node_serializes_without_unset_styling() {
        let node = Node::new("notes/a.md", "a");
        let json = serde_json::to_value(&node).unwrap();
        assert!(json.get("color").is_none());
        assert!(json.get("shape").is_none());

        let mut styled = node;
        styled.shape = Some(NodeShape::Torus);
        let json = serde_json::to_value(&styled).unwrap();
        assert_eq!(json["shape"], "torus");
    }
}
