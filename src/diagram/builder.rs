//! Diagram Builder
//!
//! Turns a [`Collection`] into positioned nodes using fixed grid rules.
//! The transform is pure: the same collection and options always produce
//! the same diagram.

use super::model::{Diagram, Geometry, NodeId, CANVAS_ID};
use super::style::Style;
use crate::inventory::record::NAME_TAG;
use crate::inventory::{Bucket, Collection, Instance, Network, Role};

pub const MAX_INSTANCES: usize = 8;
pub const MAX_BUCKETS: usize = 5;
pub const MAX_ROLES: usize = 6;

const REGION_GEOMETRY: Geometry = Geometry::new(50, 50, 1500, 800);
const TITLE_GEOMETRY: Geometry = Geometry::new(600, 10, 400, 30);

const INSTANCE_COLUMNS: usize = 4;
const INSTANCE_ORIGIN: (i32, i32) = (150, 200);
const INSTANCE_STEP: (i32, i32) = (250, 150);
const INSTANCE_SIZE: (i32, i32) = (200, 100);

const BUCKET_ORIGIN: (i32, i32) = (1200, 100);
const BUCKET_STEP_Y: i32 = 120;
const BUCKET_SIZE: (i32, i32) = (150, 80);

const ROLE_COLUMNS: usize = 3;
const ROLE_ORIGIN: (i32, i32) = (150, 550);
const ROLE_STEP: (i32, i32) = (280, 100);
const ROLE_SIZE: (i32, i32) = (200, 70);

/// Shown for instances without a `Name` tag
pub const GENERIC_INSTANCE_LABEL: &str = "VM Instance";

pub const DEFAULT_TITLE: &str = "GCP Infrastructure Diagram";

/// Text settings of the diagram
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    pub title: String,
    /// Account shown under the title (the GCP project)
    pub account: String,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            account: String::new(),
        }
    }
}

/// Build the diagram for a collection
pub fn build(collection: &Collection, options: &DiagramOptions) -> Diagram {
    let mut diagram = Diagram::new();

    let region_parent = match collection.networks.first() {
        Some(network) => add_region(&mut diagram, network),
        None => CANVAS_ID,
    };

    for (idx, instance) in collection.instances.iter().take(MAX_INSTANCES).enumerate() {
        add_instance(&mut diagram, region_parent, idx, instance);
    }

    for (idx, bucket) in collection.buckets.iter().take(MAX_BUCKETS).enumerate() {
        add_bucket(&mut diagram, idx, bucket);
    }

    for (idx, role) in collection.roles.iter().take(MAX_ROLES).enumerate() {
        add_role(&mut diagram, region_parent, idx, role);
    }

    diagram.push(
        CANVAS_ID,
        format!("{}\nProject: {}", options.title, options.account),
        Style::Title,
        TITLE_GEOMETRY,
    );

    tracing::debug!("Built diagram with {} nodes", diagram.nodes.len());
    diagram
}

fn add_region(diagram: &mut Diagram, network: &Network) -> NodeId {
    diagram.push(
        CANVAS_ID,
        format!("VPC\n{}\n{}", network.id, network.cidr),
        Style::Region,
        REGION_GEOMETRY,
    )
}

fn add_instance(diagram: &mut Diagram, parent: NodeId, idx: usize, instance: &Instance) {
    let name = instance
        .tags
        .get(NAME_TAG)
        .map(String::as_str)
        .unwrap_or(GENERIC_INSTANCE_LABEL);

    diagram.push(
        parent,
        format!(
            "{}\n{}\n{}\n({})",
            name, instance.id, instance.machine_type, instance.status
        ),
        Style::Instance {
            stopped: instance.is_stopped(),
        },
        instance_geometry(idx),
    );
}

fn add_bucket(diagram: &mut Diagram, idx: usize, bucket: &Bucket) {
    diagram.push(
        CANVAS_ID,
        format!("GCS\n{}", bucket.id),
        Style::Bucket,
        bucket_geometry(idx),
    );
}

fn add_role(diagram: &mut Diagram, parent: NodeId, idx: usize, role: &Role) {
    diagram.push(
        parent,
        format!("IAM Role\n{}", role.label),
        Style::Role,
        role_geometry(idx),
    );
}

/// Grid cell of the `idx`-th instance
pub fn instance_geometry(idx: usize) -> Geometry {
    grid_geometry(idx, INSTANCE_COLUMNS, INSTANCE_ORIGIN, INSTANCE_STEP, INSTANCE_SIZE)
}

/// Slot of the `idx`-th bucket in the column outside the region
pub fn bucket_geometry(idx: usize) -> Geometry {
    Geometry::new(
        BUCKET_ORIGIN.0,
        BUCKET_ORIGIN.1 + idx as i32 * BUCKET_STEP_Y,
        BUCKET_SIZE.0,
        BUCKET_SIZE.1,
    )
}

/// Grid cell of the `idx`-th role
pub fn role_geometry(idx: usize) -> Geometry {
    grid_geometry(idx, ROLE_COLUMNS, ROLE_ORIGIN, ROLE_STEP, ROLE_SIZE)
}

fn grid_geometry(
    idx: usize,
    columns: usize,
    origin: (i32, i32),
    step: (i32, i32),
    size: (i32, i32),
) -> Geometry {
    let column = (idx % columns) as i32;
    let row = (idx / columns) as i32;
    Geometry::new(
        origin.0 + column * step.0,
        origin.1 + row * step.1,
        size.0,
        size.1,
    )
}
