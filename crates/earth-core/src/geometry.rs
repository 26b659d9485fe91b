//! Edge geometry for drawing a connection as a rotated line.

use crate::catalog::Catalog;
use crate::graph::Connection;
use crate::model::Position;
use serde::{Deserialize, Serialize};

/// Offset from a node's top-left position to its centre, in pixels.
pub const NODE_CENTER_OFFSET: f64 = 60.0;

/// Placement of a connection line: anchored at `(left, top)`, `length`
/// pixels long, rotated by `angle_deg` around its anchor.
///
/// The default value is the neutral style used when an endpoint has no
/// position; a renderer should draw nothing for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStyle {
    pub left: f64,
    pub top: f64,
    pub length: f64,
    pub angle_deg: f64,
    /// False for the neutral style.
    pub visible: bool,
}

impl ConnectionStyle {
    /// Style for a line between two positions.
    ///
    /// Coincident endpoints give a zero-length line at angle 0. Any
    /// non-finite input yields the neutral style.
    pub fn between(from: Option<Position>, to: Option<Position>) -> Self {
        let (Some(from), Some(to)) = (from, to) else {
            return ConnectionStyle::default();
        };
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if !(dx.is_finite() && dy.is_finite()) {
            return ConnectionStyle::default();
        }
        let length = dx.hypot(dy);
        let angle_deg = if length == 0.0 {
            0.0
        } else {
            dy.atan2(dx).to_degrees()
        };
        ConnectionStyle {
            left: from.x + NODE_CENTER_OFFSET,
            top: from.y + NODE_CENTER_OFFSET,
            length,
            angle_deg,
            visible: true,
        }
    }
}

/// Resolve both endpoints of `connection` and compute its style.
pub fn connection_style(catalog: &Catalog, connection: &Connection) -> ConnectionStyle {
    let from = catalog.get(&connection.from).and_then(|s| s.position);
    let to = catalog.get(&connection.to).and_then(|s| s.position);
    ConnectionStyle::between(from, to)
}
