use {
    crate::dawg::{Dawg, EdgeKind, StateId},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        io::{Result as IoResult, Write},
    },
};

/// One primary or secondary edge of a [Dawg], detached from the state that owns it.
///
/// The [Display] implementation renders the edge in the line format of the edge dump, without a line
/// terminator:
///
/// ```text
/// 0	--"a"-[primary]-->	1
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeRecord {
    /// The state the edge leaves.
    pub source: StateId,

    /// The symbol consumed by the edge.
    pub label: char,

    /// Whether the edge is primary or secondary.
    pub kind: EdgeKind,

    /// The state the edge leads to.
    pub target: StateId,
}

impl Display for EdgeRecord {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        // Control labels (such as a '\n' line separator) are escaped to keep one edge per line.
        if self.label.is_control() {
            write!(f, "{}\t--\"{}\"-[{}]-->\t{}", self.source, self.label.escape_default(), self.kind, self.target)
        } else {
            write!(f, "{}\t--\"{}\"-[{}]-->\t{}", self.source, self.label, self.kind, self.target)
        }
    }
}

impl Dawg {
    /// Returns every primary and secondary edge of the automaton. Suffix links are not included.
    ///
    /// Edges are grouped by source state; no particular order should be relied upon.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRecord> + '_ {
        self.states().flat_map(|(source, state)| {
            state.edges().map(move |edge| EdgeRecord {
                source,
                label: edge.label(),
                kind: edge.kind(),
                target: edge.target(),
            })
        })
    }

    /// Writes the edge dump, one line per edge.
    ///
    /// # Errors
    /// This method will return an error if writing to `w` fails.
    pub fn write_edges<W: Write + ?Sized>(&self, w: &mut W) -> IoResult<()> {
        for edge in self.edges() {
            writeln!(w, "{edge}")?;
        }
        Ok(())
    }
}
