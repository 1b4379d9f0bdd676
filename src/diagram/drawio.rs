//! draw.io (`mxfile`) serialization
//!
//! Layout of the document:
//!
//! ```text
//! mxfile
//! └── diagram
//!     └── mxGraphModel
//!         └── root
//!             ├── mxCell id=0
//!             ├── mxCell id=1 parent=0
//!             └── mxCell ... (one per node, with an mxGeometry child)
//! ```

use super::model::{Diagram, DiagramNode, CANVAS_ID, ROOT_ID};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Writer;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// File name written inside the output directory
pub const OUTPUT_FILE_NAME: &str = "gcp-infrastructure.drawio";

const HOST: &str = "app.diagrams.net";
const AGENT: &str = "GCP Infrastructure Generator";
const FORMAT_VERSION: &str = "1.0";
const DIAGRAM_ID: &str = "gcp-infrastructure";
const DIAGRAM_NAME: &str = "GCP Infrastructure";

const GRAPH_MODEL_ATTRS: &[(&str, &str)] = &[
    ("dx", "1422"),
    ("dy", "794"),
    ("grid", "1"),
    ("gridSize", "10"),
    ("guides", "1"),
    ("tooltips", "1"),
    ("connect", "1"),
    ("arrows", "1"),
    ("fold", "1"),
    ("page", "1"),
    ("pageScale", "1"),
    ("pageWidth", "1600"),
    ("pageHeight", "900"),
    ("math", "0"),
    ("shadow", "0"),
];

/// Format the `modified` header attribute
pub fn format_timestamp(modified: DateTime<Utc>) -> String {
    modified.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Serialize a diagram as an indented draw.io document
pub fn to_xml(diagram: &Diagram, modified: DateTime<Utc>) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let modified = format_timestamp(modified);
    let mut mxfile = BytesStart::new("mxfile");
    mxfile.push_attribute(attr("host", HOST));
    mxfile.push_attribute(attr("modified", &modified));
    mxfile.push_attribute(attr("agent", AGENT));
    mxfile.push_attribute(attr("version", FORMAT_VERSION));
    mxfile.push_attribute(attr("type", "device"));
    writer.write_event(Event::Start(mxfile))?;

    let mut diagram_elem = BytesStart::new("diagram");
    diagram_elem.push_attribute(attr("id", DIAGRAM_ID));
    diagram_elem.push_attribute(attr("name", DIAGRAM_NAME));
    writer.write_event(Event::Start(diagram_elem))?;

    let mut graph_model = BytesStart::new("mxGraphModel");
    for (key, value) in GRAPH_MODEL_ATTRS {
        graph_model.push_attribute(attr(key, value));
    }
    writer.write_event(Event::Start(graph_model))?;
    writer.write_event(Event::Start(BytesStart::new("root")))?;

    let mut root_cell = BytesStart::new("mxCell");
    root_cell.push_attribute(attr("id", &ROOT_ID.to_string()));
    writer.write_event(Event::Empty(root_cell))?;

    let mut canvas_cell = BytesStart::new("mxCell");
    canvas_cell.push_attribute(attr("id", &CANVAS_ID.to_string()));
    canvas_cell.push_attribute(attr("parent", &ROOT_ID.to_string()));
    writer.write_event(Event::Empty(canvas_cell))?;

    for node in &diagram.nodes {
        write_node(&mut writer, node)?;
    }

    writer.write_event(Event::End(BytesEnd::new("root")))?;
    writer.write_event(Event::End(BytesEnd::new("mxGraphModel")))?;
    writer.write_event(Event::End(BytesEnd::new("diagram")))?;
    writer.write_event(Event::End(BytesEnd::new("mxfile")))?;

    let mut xml =
        String::from_utf8(writer.into_inner()).context("Diagram XML is not valid UTF-8")?;
    xml.push('\n');
    Ok(xml)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &DiagramNode) -> Result<()> {
    let style = node.style.to_string();

    let mut cell = BytesStart::new("mxCell");
    cell.push_attribute(attr("id", &node.id.to_string()));
    cell.push_attribute(attr("value", &node.value));
    cell.push_attribute(attr("style", &style));
    cell.push_attribute(attr("vertex", "1"));
    cell.push_attribute(attr("parent", &node.parent.to_string()));
    writer.write_event(Event::Start(cell))?;

    let g = node.geometry;
    let mut geometry = BytesStart::new("mxGeometry");
    geometry.push_attribute(attr("x", &g.x.to_string()));
    geometry.push_attribute(attr("y", &g.y.to_string()));
    geometry.push_attribute(attr("width", &g.width.to_string()));
    geometry.push_attribute(attr("height", &g.height.to_string()));
    geometry.push_attribute(attr("as", "geometry"));
    writer.write_event(Event::Empty(geometry))?;

    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}

/// Build an attribute with an escaped value. Line breaks become `&#xa;`
/// so draw.io keeps them instead of normalising them to spaces.
fn attr<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let escaped = escape_attr(value);
    Attribute {
        key: QName(key.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    }
}

fn escape_attr(value: &str) -> String {
    quick_xml::escape::escape(value)
        .replace('\r', "&#xd;")
        .replace('\n', "&#xa;")
        .replace('\t', "&#x9;")
}

/// Path of the diagram file inside `output_dir`
pub fn output_path(output_dir: &Path) -> PathBuf {
    output_dir.join(OUTPUT_FILE_NAME)
}

/// Write (overwrite) the diagram file, creating the directory if needed
pub fn write_diagram(path: &Path, xml: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    std::fs::write(path, xml)
        .with_context(|| format!("Failed to write diagram to {}", path.display()))?;

    tracing::info!("Wrote {} bytes to {}", xml.len(), path.display());
    Ok(())
}
