//! Online construction of directed acyclic word graphs (DAWGs) for infix queries.
//!
//! A [Dawg] is the smallest automaton that accepts exactly the infixes (contiguous substrings) of a text. It is
//! built one symbol at a time with the algorithm of Blumer et al. (1985) and can be queried at any point between
//! symbols:
//!
//! ```
//! use infix_dawg::Dawg;
//!
//! let dawg = Dawg::from_text("abcabd");
//! assert!(dawg.contains_infix("bc"));
//! assert!(!dawg.contains_infix("cb"));
//! ```
//!
//! [DawgIndex] drives construction from lines of text read through a [TextSource], with the options of an
//! [IndexConfig]: line separators, line limits, progress reports, and a low-memory guard.

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod config;
mod error;

/// Word graph states, edges, and the online construction algorithm.
pub mod dawg;

/// Building word graphs from lines of text.
pub mod indexer;

/// Reading text and writing edge dumps.
pub mod io;

pub use {
    config::*,
    dawg::{Dawg, EdgeKind, EdgeRecord, StateId},
    error::*,
    indexer::{DawgIndex, IndexOutcome},
    io::{FileTextSource, MemoryTextSource, TextSource},
};
