//! Visual encoding of each node kind as a draw.io style string.

use std::fmt;

/// Hex colour as used by draw.io
pub type Color = &'static str;

pub const REGION_FILL: Color = "#E8F5E9";
pub const REGION_STROKE: Color = "#4CAF50";
pub const INSTANCE_RUNNING_FILL: Color = "#4CAF50";
pub const INSTANCE_STOPPED_FILL: Color = "#FF6B6B";
pub const INSTANCE_STROKE: Color = "#333333";
pub const INSTANCE_FONT: Color = "#FFFFFF";
pub const BUCKET_FILL: Color = "#FFE5B4";
pub const BUCKET_STROKE: Color = "#FF8C00";
pub const ROLE_FILL: Color = "#B3E5FC";
pub const ROLE_STROKE: Color = "#0277BD";

/// Node shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Swimlane,
    RoundedRect,
    Cylinder,
    Hexagon,
    Text,
}

/// Style of a diagram node, derived from its resource kind and status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Region,
    Instance { stopped: bool },
    Bucket,
    Role,
    Title,
}

impl Style {
    pub fn shape(&self) -> Shape {
        match self {
            Self::Region => Shape::Swimlane,
            Self::Instance { .. } => Shape::RoundedRect,
            Self::Bucket => Shape::Cylinder,
            Self::Role => Shape::Hexagon,
            Self::Title => Shape::Text,
        }
    }

    pub fn fill_color(&self) -> Option<Color> {
        match self {
            Self::Region => Some(REGION_FILL),
            Self::Instance { stopped: true } => Some(INSTANCE_STOPPED_FILL),
            Self::Instance { stopped: false } => Some(INSTANCE_RUNNING_FILL),
            Self::Bucket => Some(BUCKET_FILL),
            Self::Role => Some(ROLE_FILL),
            Self::Title => None,
        }
    }

    pub fn stroke_color(&self) -> Option<Color> {
        match self {
            Self::Region => Some(REGION_STROKE),
            Self::Instance { .. } => Some(INSTANCE_STROKE),
            Self::Bucket => Some(BUCKET_STROKE),
            Self::Role => Some(ROLE_STROKE),
            Self::Title => None,
        }
    }

    pub fn font_color(&self) -> Option<Color> {
        match self {
            Self::Instance { .. } => Some(INSTANCE_FONT),
            _ => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fill = self.fill_color().unwrap_or("none");
        let stroke = self.stroke_color().unwrap_or("none");

        match self.shape() {
            Shape::Swimlane => write!(
                f,
                "swimlane;fillColor={};strokeColor={};fontStyle=1",
                fill, stroke
            ),
            Shape::RoundedRect => {
                write!(
                    f,
                    "rounded=1;whiteSpace=wrap;html=1;fillColor={};strokeColor={}",
                    fill, stroke
                )?;
                if let Some(font) = self.font_color() {
                    write!(f, ";fontColor={}", font)?;
                }
                Ok(())
            }
            Shape::Cylinder => write!(
                f,
                "shape=cylinder3;whiteSpace=wrap;html=1;boundedLbl=1;backgroundOutline=1;size=15;fillColor={};strokeColor={}",
                fill, stroke
            ),
            Shape::Hexagon => write!(
                f,
                "shape=hexagon;perimeter=hexagonPerimeter2;whiteSpace=wrap;html=1;fixedSize=1;fillColor={};strokeColor={}",
                fill, stroke
            ),
            Shape::Text => write!(
                f,
                "text;html=1;strokeColor={};fillColor={};align=center;verticalAlign=middle;whiteSpace=wrap;rounded=0;fontSize=20;fontStyle=1",
                stroke, fill
            ),
        }
    }
}
