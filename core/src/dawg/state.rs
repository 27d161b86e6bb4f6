use {
    crate::dawg::{Edge, EdgeKind},
    std::{
        collections::{btree_map::Entry, BTreeMap},
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    },
};

/// Handle of a state in a [Dawg](crate::dawg::Dawg). Handles are assigned in creation order and are only
/// meaningful for the automaton that created them.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// The source (root) state. It is the first state of every automaton.
    pub const SOURCE: StateId = StateId(0);

    /// Returns the numeric identifier of this state.
    #[inline]
    pub fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn usize(self) -> usize {
        self.0 as usize
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "StateId({})", self.0)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A node of the word graph: its outgoing edges, keyed by label, and its suffix link.
#[derive(Clone, Debug, Default)]
pub struct State {
    edges: BTreeMap<char, Edge>,
    suffix_link: Option<StateId>,
}

impl State {
    /// Returns the outgoing edge labeled `label`, if any.
    #[inline]
    pub fn edge(&self, label: char) -> Option<&Edge> {
        self.edges.get(&label)
    }

    /// Returns the outgoing edges of this state in label order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the suffix link of this state. Only the source state has none.
    #[inline]
    pub fn suffix_link(&self) -> Option<StateId> {
        self.suffix_link
    }

    #[inline]
    pub(crate) fn set_suffix_link(&mut self, target: StateId) {
        self.suffix_link = Some(target);
    }

    /// Adds an edge to this state.
    ///
    /// # Panics
    /// Panics if the state already has an edge with the same label.
    pub(crate) fn insert_edge(&mut self, edge: Edge) {
        match self.edges.entry(edge.label()) {
            Entry::Vacant(entry) => {
                entry.insert(edge);
            }
            Entry::Occupied(existing) => {
                panic!("State already has an edge labeled {:?}: {:?}", edge.label(), existing.get())
            }
        }
    }

    /// Returns the edge leading to `target`, if any.
    pub(crate) fn edge_to_mut(&mut self, target: StateId) -> Option<&mut Edge> {
        self.edges.values_mut().find(|edge| edge.target() == target)
    }

    /// Returns the secondary edge leading to `target`, if any.
    pub(crate) fn secondary_edge_to_mut(&mut self, target: StateId) -> Option<&mut Edge> {
        self.edges.values_mut().find(|edge| edge.is_secondary() && edge.target() == target)
    }

    /// Returns a secondary copy of every outgoing edge of this state.
    pub(crate) fn secondary_copies(&self) -> BTreeMap<char, Edge> {
        self.edges
            .iter()
            .map(|(label, edge)| (*label, Edge::new(*label, edge.target(), EdgeKind::Secondary)))
            .collect()
    }

    /// Replaces the outgoing edges of a freshly created state.
    pub(crate) fn set_edges(&mut self, edges: BTreeMap<char, Edge>) {
        debug_assert!(self.edges.is_empty(), "edges of a populated state replaced");
        self.edges = edges;
    }
}
