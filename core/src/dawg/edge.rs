use {
    crate::dawg::StateId,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Classification of an edge in the word graph.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EdgeKind {
    /// The canonical continuation of the source state for this label.
    Primary,

    /// A continuation currently shared with another suffix class. The target may later be split off into a state
    /// of its own.
    Secondary,
}

impl Display for EdgeKind {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
        }
    }
}

/// A labeled transition out of a state. The edge is owned by its source state; the target is a plain index into
/// the automaton's state arena.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    label: char,
    target: StateId,
    kind: EdgeKind,
}

impl Edge {
    pub(crate) const fn new(label: char, target: StateId, kind: EdgeKind) -> Self {
        Self {
            label,
            target,
            kind,
        }
    }

    /// Returns the symbol this edge consumes.
    #[inline]
    pub fn label(&self) -> char {
        self.label
    }

    /// Returns the state this edge leads to.
    #[inline]
    pub fn target(&self) -> StateId {
        self.target
    }

    /// Returns whether this edge is primary or secondary.
    #[inline]
    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Indicates whether this edge is primary.
    #[inline]
    pub fn is_primary(&self) -> bool {
        self.kind == EdgeKind::Primary
    }

    /// Indicates whether this edge is secondary.
    #[inline]
    pub fn is_secondary(&self) -> bool {
        self.kind == EdgeKind::Secondary
    }

    /// Points this edge at a different state, keeping its label and kind.
    #[inline]
    pub(crate) fn retarget(&mut self, target: StateId) {
        self.target = target;
    }

    /// Makes this a primary edge leading to `target`.
    pub(crate) fn promote(&mut self, target: StateId) {
        self.kind = EdgeKind::Primary;
        self.target = target;
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{Edge, EdgeKind},
        crate::dawg::StateId,
        pretty_assertions::assert_eq,
        test_log::test,
    };

    #[test]
    fn test_kind_display() {
        assert_eq!(EdgeKind::Primary.to_string(), "primary");
        assert_eq!(EdgeKind::Secondary.to_string(), "secondary");
    }

    #[test]
    fn test_promote() {
        let mut edge = Edge::new('x', StateId(3), EdgeKind::Secondary);
        assert!(edge.is_secondary());

        edge.retarget(StateId(4));
        assert_eq!(edge.target(), StateId(4));
        assert_eq!(edge.kind(), EdgeKind::Secondary);

        edge.promote(StateId(7));
        assert!(edge.is_primary());
        assert_eq!(edge.target(), StateId(7));
        assert_eq!(edge.label(), 'x');
    }
}
