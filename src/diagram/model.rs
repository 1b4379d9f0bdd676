//! Diagram node model

use super::style::Style;

/// Node identifier
pub type NodeId = u32;

/// Absolute root sentinel
pub const ROOT_ID: NodeId = 0;

/// Canvas root sentinel, parent of every top-level node
pub const CANVAS_ID: NodeId = 1;

/// First identifier handed out to a real node
pub const FIRST_NODE_ID: NodeId = 2;

/// Rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A positioned, styled vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramNode {
    pub id: NodeId,
    pub parent: NodeId,
    /// Display text; lines are separated by `\n`
    pub value: String,
    pub style: Style,
    pub geometry: Geometry,
}

/// Nodes in creation order. The two sentinels are implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    next_id: NodeId,
}

impl Diagram {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            next_id: FIRST_NODE_ID,
        }
    }

    /// Append a node under `parent` and return its identifier
    pub fn push(
        &mut self,
        parent: NodeId,
        value: String,
        style: Style,
        geometry: Geometry,
    ) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.push(DiagramNode {
            id,
            parent,
            value,
            style,
            geometry,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_contiguous_ids() {
        let mut diagram = Diagram::new();
        let a = diagram.push(CANVAS_ID, "a".into(), Style::Title, Geometry::new(0, 0, 1, 1));
        let b = diagram.push(a, "b".into(), Style::Title, Geometry::new(0, 0, 1, 1));

        assert_eq!((a, b), (2, 3));
        assert_eq!(diagram.get(b).unwrap().parent, a);
        assert_eq!(diagram.get(a).unwrap().parent, CANVAS_ID);
    }
}
