mod automaton;
mod dump;
mod edge;
mod state;

pub use {automaton::*, dump::*, edge::*, state::*};
