//! Diagram construction and draw.io output
//!
//! - [`model`] - Nodes, geometry and the identifier counter
//! - [`style`] - Shape and colour of each node kind
//! - [`builder`] - Fixed-grid layout of a [`Collection`](crate::inventory::Collection)
//! - [`drawio`] - XML serialization and file output

pub mod builder;
pub mod drawio;
pub mod model;
pub mod style;

pub use builder::{build, DiagramOptions};
pub use drawio::{output_path, to_xml, write_diagram};
pub use model::{Diagram, DiagramNode, Geometry, NodeId, CANVAS_ID, ROOT_ID};
pub use style::Style;
