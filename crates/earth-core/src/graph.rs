//! Selection, active connections and highlighting over a [`Catalog`].

use crate::catalog::{Catalog, EarthSystem};
use crate::geometry::{connection_style, ConnectionStyle};
use crate::model::SystemId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A directed edge from the selected system to one of its resolved targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: SystemId,
    pub to: SystemId,
}

/// A connection together with its drawing style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionView {
    pub from: SystemId,
    pub to: SystemId,
    pub style: ConnectionStyle,
}

/// Read-only view of the graph state handed to renderers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub selected: Option<SystemId>,
    pub connections: Vec<ConnectionView>,
    /// Highlighted systems in catalog order.
    pub highlighted: Vec<SystemId>,
}

/// Index that follows `current` in a cyclic catalog of `len` entries.
///
/// Returns `None` for an empty catalog.
pub fn next_rotation_index(current: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some((current + 1) % len)
    }
}

/// Owns the catalog and every piece of state derived from the selection.
///
/// This is the only place the `highlighted` flag of an [`EarthSystem`] is
/// written.
#[derive(Clone, Debug, Default)]
pub struct InteractionGraph {
    catalog: Catalog,
    selected: Option<usize>,
    active: Vec<Connection>,
}

impl InteractionGraph {
    pub fn new(catalog: Catalog) -> Self {
        let mut graph = InteractionGraph {
            catalog,
            selected: None,
            active: Vec::new(),
        };
        graph.recompute();
        graph
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&EarthSystem> {
        self.selected.and_then(|i| self.catalog.get_index(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Active connections in the selected system's declaration order.
    pub fn active_connections(&self) -> &[Connection] {
        &self.active
    }

    /// Select `id`, or clear the selection with `None`.
    ///
    /// An id that is not in the catalog clears the selection as well.
    pub fn select(&mut self, id: Option<&SystemId>) -> GraphSnapshot {
        let index = match id {
            Some(id) => {
                let found = self.catalog.index_of(id);
                if found.is_none() {
                    debug!(%id, "selected id not in catalog, clearing selection");
                }
                found
            }
            None => None,
        };
        self.select_index(index)
    }

    /// Select by catalog position. Out-of-range indices clear the selection.
    pub fn select_index(&mut self, index: Option<usize>) -> GraphSnapshot {
        self.selected = index.filter(|&i| i < self.catalog.len());
        self.recompute();
        debug!(
            selected = ?self.selected().map(|s| s.id.as_str()),
            connections = self.active.len(),
            "system selected"
        );
        self.snapshot()
    }

    /// Advance the selection to the next system in catalog order.
    ///
    /// Returns `None` without touching state when nothing is selected or the
    /// catalog is empty.
    pub fn rotate(&mut self) -> Option<GraphSnapshot> {
        let current = self.selected?;
        let next = next_rotation_index(current, self.catalog.len())?;
        Some(self.select_index(Some(next)))
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            selected: self.selected().map(|s| s.id.clone()),
            connections: self
                .active
                .iter()
                .map(|c| ConnectionView {
                    from: c.from.clone(),
                    to: c.to.clone(),
                    style: connection_style(&self.catalog, c),
                })
                .collect(),
            highlighted: self.catalog.highlighted().map(|s| s.id.clone()).collect(),
        }
    }

    fn recompute(&mut self) {
        self.active.clear();
        let mut targets: Vec<usize> = Vec::new();
        if let Some(from) = self.selected.and_then(|i| self.catalog.get_index(i)) {
            for target in &from.connections {
                if let Some(ti) = self.catalog.index_of(target) {
                    self.active.push(Connection {
                        from: from.id.clone(),
                        to: target.clone(),
                    });
                    targets.push(ti);
                }
            }
        }
        let systems = self.catalog.systems_mut();
        for s in systems.iter_mut() {
            s.highlighted = false;
        }
        for ti in targets {
            systems[ti].highlighted = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;
    use crate::model::Position;
    use proptest::prelude::*;

    fn ids(v: &[&str]) -> Vec<SystemId> {
        v.iter().map(|s| SystemId::from(*s)).collect()
    }

    fn sys(id: &str, connections: &[&str]) -> EarthSystem {
        EarthSystem {
            id: SystemId::from(id),
            name: id.to_uppercase(),
            icon: String::new(),
            position: Some(Position::new(0.0, 0.0)),
            description: String::new(),
            impacts: vec![],
            connections: ids(connections),
            mission: None,
            highlighted: false,
        }
    }

    #[test]
    fn select_builds_connections_in_declaration_order() {
        let mut g = InteractionGraph::new(default_catalog());
        let snap = g.select(Some(&SystemId::from("wildfire")));
        assert_eq!(snap.selected, Some(SystemId::from("wildfire")));
        let to: Vec<_> = snap.connections.iter().map(|c| c.to.clone()).collect();
        assert_eq!(to, ids(&["atmosphere", "biodiversity", "health"]));
        assert!(snap.connections.iter().all(|c| c.from.as_str() == "wildfire"));
        // highlighted is reported in catalog order
        assert_eq!(snap.highlighted, ids(&["atmosphere", "biodiversity", "health"]));
        assert!(!g.selected().unwrap().is_highlighted());
    }

    #[test]
    fn asymmetric_connections_are_not_mirrored() {
        // energy -> water, but water does not list energy
        let mut g = InteractionGraph::new(default_catalog());
        let snap = g.select(Some(&SystemId::from("water")));
        assert!(!snap.highlighted.contains(&SystemId::from("energy")));
    }

    #[test]
    fn dangling_ids_are_skipped() {
        let catalog = Catalog::new(vec![sys("a", &["ghost", "b"]), sys("b", &[])]).unwrap();
        let mut g = InteractionGraph::new(catalog);
        let snap = g.select(Some(&SystemId::from("a")));
        assert_eq!(snap.connections.len(), 1);
        assert_eq!(snap.connections[0].to.as_str(), "b");
        assert_eq!(snap.highlighted, ids(&["b"]));
    }

    #[test]
    fn self_connection_highlights_selected() {
        let catalog = Catalog::new(vec![sys("a", &["a"])]).unwrap();
        let mut g = InteractionGraph::new(catalog);
        let snap = g.select(Some(&SystemId::from("a")));
        assert_eq!(snap.highlighted, ids(&["a"]));
        assert_eq!(snap.connections[0].style.length, 0.0);
    }

    #[test]
    fn clearing_selection_resets_everything() {
        let mut g = InteractionGraph::new(default_catalog());
        g.select(Some(&SystemId::from("atmosphere")));
        let snap = g.select(None);
        assert_eq!(snap, GraphSnapshot::default());
        assert!(g.active_connections().is_empty());
        assert!(g.catalog().iter().all(|s| !s.is_highlighted()));
    }

    #[test]
    fn unknown_id_clears_selection() {
        let mut g = InteractionGraph::new(default_catalog());
        g.select(Some(&SystemId::from("health")));
        let snap = g.select(Some(&SystemId::from("ocean")));
        assert!(snap.selected.is_none());
        assert!(snap.highlighted.is_empty());
    }

    #[test]
    fn selecting_twice_is_idempotent() {
        let mut g = InteractionGraph::new(default_catalog());
        let id = SystemId::from("energy");
        let a = g.select(Some(&id));
        let b = g.select(Some(&id));
        assert_eq!(a, b);
    }

    #[test]
    fn rotation_wraps_from_last_to_first() {
        let mut g = InteractionGraph::new(default_catalog());
        g.select(Some(&SystemId::from("health")));
        let snap = g.rotate().unwrap();
        assert_eq!(snap.selected, Some(SystemId::from("atmosphere")));
        assert_eq!(g.selected_index(), Some(0));
        assert_eq!(next_rotation_index(6, 7), Some(0));
        assert_eq!(next_rotation_index(2, 7), Some(3));
    }

    #[test]
    fn rotation_without_selection_or_catalog_is_noop() {
        let mut g = InteractionGraph::new(default_catalog());
        assert!(g.rotate().is_none());
        assert!(g.selected().is_none());

        let mut empty = InteractionGraph::new(Catalog::empty());
        assert!(empty.select(Some(&SystemId::from("atmosphere"))).selected.is_none());
        assert!(empty.select_index(Some(0)).selected.is_none());
        assert!(empty.rotate().is_none());
        assert_eq!(next_rotation_index(0, 0), None);
    }

    #[test]
    fn full_rotation_returns_to_start() {
        let mut g = InteractionGraph::new(default_catalog());
        g.select_index(Some(3));
        for _ in 0..g.catalog().len() {
            g.rotate();
        }
        assert_eq!(g.selected_index(), Some(3));
    }

    proptest! {
        #[test]
        fn highlight_matches_resolved_targets(start in 0usize..7, steps in 0usize..20) {
            let mut g = InteractionGraph::new(default_catalog());
            g.select_index(Some(start));
            for _ in 0..steps {
                g.rotate();
            }
            let selected = g.selected().unwrap().clone();
            for s in g.catalog().iter() {
                let expected = selected.connections.contains(&s.id);
                prop_assert_eq!(s.is_highlighted(), expected);
            }
            prop_assert_eq!(g.selected_index(), Some((start + steps) % 7));
        }
    }
}
