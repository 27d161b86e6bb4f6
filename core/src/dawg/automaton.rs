use {
    crate::{
        dawg::{Edge, EdgeKind, State, StateId},
        DawgError,
    },
    bitvec::prelude::*,
    log::trace,
};

/// A directed acyclic word graph: the smallest automaton recognizing every infix of the text consumed so far.
///
/// The graph is built online, one symbol at a time, following Blumer et al., "The smallest automaton
/// recognizing the subwords of a text" (1985). States live in an append-only arena and refer to each other by
/// [StateId]; state 0 is the source. Every state is accepting.
#[derive(Clone, Debug)]
pub struct Dawg {
    states: Vec<State>,

    /// The state reached by reading the entire text consumed so far along primary edges.
    sink: StateId,

    num_symbols: u64,
}

impl Default for Dawg {
    fn default() -> Self {
        Self::new()
    }
}

impl Dawg {
    /// Creates an automaton for the empty text, consisting of the source state only.
    pub fn new() -> Self {
        Self {
            states: vec![State::default()],
            sink: StateId::SOURCE,
            num_symbols: 0,
        }
    }

    /// Creates an empty automaton with room for the states of a text of `num_symbols` symbols.
    ///
    /// A text of n symbols never needs more than 2n + 1 states.
    pub fn with_capacity(num_symbols: usize) -> Self {
        let mut states = Vec::with_capacity(num_symbols.saturating_mul(2).saturating_add(1));
        states.push(State::default());
        Self {
            states,
            sink: StateId::SOURCE,
            num_symbols: 0,
        }
    }

    /// Builds the automaton for `text`.
    pub fn from_text(text: &str) -> Self {
        let mut dawg = Self::with_capacity(text.len());
        dawg.extend(text.chars());
        dawg
    }

    /// Appends one symbol to the indexed text.
    pub fn push(&mut self, symbol: char) {
        self.sink = self.update(self.sink, symbol);
        self.num_symbols += 1;
    }

    /// Returns the source (root) state.
    #[inline]
    pub fn source(&self) -> StateId {
        StateId::SOURCE
    }

    /// Returns the state representing the whole text consumed so far.
    #[inline]
    pub fn sink(&self) -> StateId {
        self.sink
    }

    /// Returns the number of symbols consumed so far.
    #[inline]
    pub fn num_symbols(&self) -> u64 {
        self.num_symbols
    }

    /// Returns the number of states created so far.
    #[inline]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the total number of primary and secondary edges.
    pub fn num_edges(&self) -> usize {
        self.states.iter().map(State::num_edges).sum()
    }

    /// Returns the state with the given handle.
    ///
    /// # Panics
    /// Panics if `id` was not created by this automaton.
    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.usize()]
    }

    /// Returns every state along with its handle, in creation order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states.iter().enumerate().map(|(i, state)| (StateId(i as u32), state))
    }

    /// Returns the suffix link of the given state.
    #[inline]
    pub fn suffix_link(&self, id: StateId) -> Option<StateId> {
        self.state(id).suffix_link()
    }

    /// Follows the edges labeled by `text` from the source and returns the state reached, or `None` if some
    /// symbol has no edge.
    pub fn walk(&self, text: &str) -> Option<StateId> {
        text.chars().try_fold(StateId::SOURCE, |id, symbol| self.state(id).edge(symbol).map(Edge::target))
    }

    /// Indicates whether `text` occurs contiguously in the indexed text. The empty string is an infix of every
    /// text.
    #[inline]
    pub fn contains_infix(&self, text: &str) -> bool {
        self.walk(text).is_some()
    }

    fn state_mut(&mut self, id: StateId) -> &mut State {
        &mut self.states[id.usize()]
    }

    fn create_state(&mut self) -> StateId {
        let id: u32 = self.states.len().try_into().expect("DAWG state count exceeds u32::MAX");
        self.states.push(State::default());
        StateId(id)
    }

    /// Returns the suffix link of a non-source state.
    ///
    /// # Panics
    /// Panics if the state has no suffix link. Every state except the source has one once [Dawg::update] returns.
    fn suffix_target(&self, id: StateId) -> StateId {
        match self.suffix_link(id) {
            Some(target) => target,
            None => panic!("State {id} has no suffix link"),
        }
    }

    /// Extends the automaton by `symbol`, given the sink for the text consumed so far. Returns the new sink.
    fn update(&mut self, current_sink: StateId, symbol: char) -> StateId {
        let new_sink = self.create_state();
        self.state_mut(current_sink).insert_edge(Edge::new(symbol, new_sink, EdgeKind::Primary));

        let mut current = current_sink;
        let mut suffix_state = None;

        while current != StateId::SOURCE && suffix_state.is_none() {
            current = self.suffix_target(current);

            match self.state(current).edge(symbol).copied() {
                None => self.state_mut(current).insert_edge(Edge::new(symbol, new_sink, EdgeKind::Secondary)),
                Some(edge) if edge.is_primary() => suffix_state = Some(edge.target()),
                Some(edge) => suffix_state = Some(self.split(current, edge.target())),
            }
        }

        let suffix_state = suffix_state.unwrap_or(StateId::SOURCE);
        self.state_mut(new_sink).set_suffix_link(suffix_state);
        new_sink
    }

    /// Clones `child` so that `parent` can own it through a primary edge, redirecting the secondary edges along
    /// `parent`'s suffix chain that still lead to `child`. Returns the clone.
    fn split(&mut self, parent: StateId, child: StateId) -> StateId {
        let new_child = self.create_state();
        trace!("Splitting state {child} (parent {parent}) into {new_child}");

        match self.state_mut(parent).edge_to_mut(child) {
            Some(edge) => edge.promote(new_child),
            None => panic!("State {parent} has no edge to {child}"),
        }

        let edges = self.state(child).secondary_copies();
        self.state_mut(new_child).set_edges(edges);

        let child_link = self.suffix_target(child);
        self.state_mut(new_child).set_suffix_link(child_link);
        self.state_mut(child).set_suffix_link(new_child);

        let mut current = parent;
        while current != StateId::SOURCE {
            current = self.suffix_target(current);

            match self.state_mut(current).secondary_edge_to_mut(child) {
                Some(edge) => edge.retarget(new_child),
                None => break,
            }
        }

        new_child
    }

    /// Verifies the structural invariants of the automaton:
    ///
    /// * the source has no suffix link and every other state has one;
    /// * every suffix-link chain reaches the source without revisiting a state;
    /// * every state is reachable from the source through primary edges;
    /// * every edge leads to an existing state.
    ///
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), DawgError> {
        let num_states = self.num_states();

        if let Some(link) = self.suffix_link(StateId::SOURCE) {
            return Err(DawgError::InvariantViolation(format!("source has suffix link to {link}")));
        }

        for (id, state) in self.states() {
            for edge in state.edges() {
                if edge.target().usize() >= num_states {
                    return Err(DawgError::InvariantViolation(format!(
                        "edge {id} --{:?}--> {} leads to a nonexistent state",
                        edge.label(),
                        edge.target()
                    )));
                }
            }

            if id == StateId::SOURCE {
                continue;
            }

            let mut seen = bitvec![0; num_states];
            let mut current = id;
            while current != StateId::SOURCE {
                if seen.replace(current.usize(), true) {
                    return Err(DawgError::InvariantViolation(format!("suffix chain of {id} revisits {current}")));
                }

                current = match self.suffix_link(current) {
                    Some(link) if link.usize() < num_states => link,
                    Some(link) => {
                        return Err(DawgError::InvariantViolation(format!(
                            "state {current} has suffix link to nonexistent state {link}"
                        )))
                    }
                    None => return Err(DawgError::InvariantViolation(format!("state {current} has no suffix link"))),
                };
            }
        }

        let mut reachable = bitvec![0; num_states];
        reachable.set(StateId::SOURCE.usize(), true);
        let mut pending = vec![StateId::SOURCE];
        while let Some(id) = pending.pop() {
            for edge in self.state(id).edges().filter(|edge| edge.is_primary()) {
                if !reachable.replace(edge.target().usize(), true) {
                    pending.push(edge.target());
                }
            }
        }

        if let Some(unreachable) = reachable.first_zero() {
            return Err(DawgError::InvariantViolation(format!(
                "state {unreachable} is not reachable from the source through primary edges"
            )));
        }

        Ok(())
    }
}

impl Extend<char> for Dawg {
    fn extend<I: IntoIterator<Item = char>>(&mut self, symbols: I) {
        for symbol in symbols {
            self.push(symbol);
        }
    }
}

impl FromIterator<char> for Dawg {
    fn from_iter<I: IntoIterator<Item = char>>(symbols: I) -> Self {
        let mut dawg = Self::new();
        dawg.extend(symbols);
        dawg
    }
}

impl From<&str> for Dawg {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::Dawg,
        crate::dawg::{EdgeKind, EdgeRecord, StateId},
        pretty_assertions::assert_eq,
        rand::{rngs::StdRng, Rng, SeedableRng},
        test_log::test,
    };

    /// Returns every non-empty substring of `text`.
    fn infixes(text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut result = Vec::new();
        for start in 0..chars.len() {
            for end in start + 1..=chars.len() {
                result.push(chars[start..end].iter().collect());
            }
        }
        result
    }

    /// Returns every string over `alphabet` with at most `max_len` symbols.
    fn all_strings(alphabet: &[char], max_len: usize) -> Vec<String> {
        let mut result = vec![String::new()];
        let mut frontier = vec![String::new()];
        for _ in 0..max_len {
            let mut next = Vec::with_capacity(frontier.len() * alphabet.len());
            for prefix in &frontier {
                for c in alphabet {
                    let mut s = prefix.clone();
                    s.push(*c);
                    next.push(s);
                }
            }
            result.extend(next.iter().cloned());
            frontier = next;
        }
        result
    }

    /// Asserts that `text` spells a path of primary edges from the source to the current sink.
    fn assert_primary_path(dawg: &Dawg, text: &str) {
        let mut id = dawg.source();
        for (i, c) in text.chars().enumerate() {
            let edge = dawg.state(id).edge(c).unwrap_or_else(|| panic!("no edge for {c:?} at {i} in {text:?}"));
            assert!(edge.is_primary(), "edge for {c:?} at {i} in {text:?} is {}", edge.kind());
            id = edge.target();
        }
        assert_eq!(id, dawg.sink(), "primary path for {text:?}");
    }

    fn record(source: u32, label: char, kind: EdgeKind, target: u32) -> EdgeRecord {
        EdgeRecord {
            source: StateId(source),
            label,
            kind,
            target: StateId(target),
        }
    }

    #[test]
    fn test_empty_text() {
        let dawg = Dawg::new();
        assert_eq!(dawg.num_states(), 1);
        assert_eq!(dawg.num_edges(), 0);
        assert_eq!(dawg.sink(), dawg.source());
        assert!(dawg.contains_infix(""));
        assert!(!dawg.contains_infix("a"));
        dawg.check_invariants().unwrap();
    }

    #[test]
    fn test_all_infixes_found() {
        let dawg = Dawg::from_text("abcbc");
        for infix in infixes("abcbc") {
            assert!(dawg.contains_infix(&infix), "{infix:?} should be an infix");
        }
        assert!(dawg.contains_infix(""));
        assert!(!dawg.contains_infix("abx"));
        assert!(!dawg.contains_infix("cc"));
        assert!(!dawg.contains_infix("abcbca"));
        assert!(!dawg.contains_infix("ca"));
    }

    #[test]
    fn test_order_sensitivity() {
        let dawg = Dawg::from_text("abcabd");
        assert!(dawg.contains_infix("bc"));
        assert!(!dawg.contains_infix("cb"));
        assert!(dawg.contains_infix("cabd"));
        assert!(!dawg.contains_infix("abda"));
    }

    #[test]
    fn test_distinct_symbols_never_split() {
        let dawg = Dawg::from_text("abcdef");
        assert_eq!(dawg.num_states(), 7);
        assert_eq!(dawg.num_symbols(), 6);
        dawg.check_invariants().unwrap();
    }

    #[test]
    fn test_single_symbol_edges() {
        let dawg = Dawg::from_text("ab");
        let edges: Vec<EdgeRecord> = dawg.edges().collect();
        assert_eq!(
            edges,
            vec![
                record(0, 'a', EdgeKind::Primary, 1),
                record(0, 'b', EdgeKind::Secondary, 2),
                record(1, 'b', EdgeKind::Primary, 2),
            ]
        );
        assert_eq!(dawg.suffix_link(StateId(1)), Some(StateId::SOURCE));
        assert_eq!(dawg.suffix_link(StateId(2)), Some(StateId::SOURCE));
    }

    #[test]
    fn test_split_clones_child() {
        // After "ab", the source reaches state 2 through a secondary "b" edge. Reading another "b" makes "b" a
        // suffix class of its own, so state 2 is split into state 4.
        let dawg = Dawg::from_text("abb");
        let edges: Vec<EdgeRecord> = dawg.edges().collect();
        assert_eq!(
            edges,
            vec![
                record(0, 'a', EdgeKind::Primary, 1),
                record(0, 'b', EdgeKind::Primary, 4),
                record(1, 'b', EdgeKind::Primary, 2),
                record(2, 'b', EdgeKind::Primary, 3),
                record(4, 'b', EdgeKind::Secondary, 3),
            ]
        );
        assert_eq!(dawg.sink(), StateId(3));
        assert_eq!(dawg.suffix_link(StateId(2)), Some(StateId(4)));
        assert_eq!(dawg.suffix_link(StateId(3)), Some(StateId(4)));
        assert_eq!(dawg.suffix_link(StateId(4)), Some(StateId::SOURCE));
        assert!(dawg.contains_infix("bb"));
        assert!(!dawg.contains_infix("ba"));
        dawg.check_invariants().unwrap();
    }

    #[test]
    fn test_split_keeps_earlier_infixes() {
        let text = "aabaabb";
        let mut dawg = Dawg::new();
        let mut expected = Vec::new();

        for (i, symbol) in text.chars().enumerate() {
            dawg.push(symbol);
            expected.extend(infixes(&text[..=i]));
            for infix in &expected {
                assert!(dawg.contains_infix(infix), "{infix:?} lost after {} symbols", i + 1);
            }
            dawg.check_invariants().unwrap();
            assert_primary_path(&dawg, &text[..=i]);
        }

        assert!(dawg.num_states() > text.len() + 1, "expected at least one split");
        assert!(dawg.num_states() <= 2 * text.len() + 1);
        assert!(!dawg.contains_infix("bab"));
        assert!(!dawg.contains_infix("aaa"));
    }

    #[test]
    fn test_queries_do_not_mutate() {
        let dawg = Dawg::from_text("mississippi");
        let before: Vec<EdgeRecord> = dawg.edges().collect();
        let num_states = dawg.num_states();

        for _ in 0..3 {
            assert!(dawg.contains_infix("ssi"));
            assert!(!dawg.contains_infix("sss"));
        }

        let after: Vec<EdgeRecord> = dawg.edges().collect();
        assert_eq!(before, after);
        assert_eq!(num_states, dawg.num_states());
    }

    #[test]
    fn test_incremental_equivalence() {
        let mut incremental = Dawg::from_text("abcab");
        assert!(!incremental.contains_infix("bcc"));
        incremental.extend("ccabx".chars());

        let direct = Dawg::from_text("abcabccabx");
        assert_eq!(incremental.num_states(), direct.num_states());
        assert_eq!(incremental.sink(), direct.sink());
        assert_eq!(incremental.edges().collect::<Vec<_>>(), direct.edges().collect::<Vec<_>>());

        let from_iter: Dawg = "abcabccabx".chars().collect();
        assert_eq!(from_iter.edges().collect::<Vec<_>>(), direct.edges().collect::<Vec<_>>());
    }

    #[test]
    fn test_unicode_symbols() {
        let dawg = Dawg::from("größe");
        assert!(dawg.contains_infix("öß"));
        assert!(!dawg.contains_infix("ss"));
        assert_eq!(dawg.num_symbols(), 5);
    }

    #[test]
    fn test_random_texts_match_naive_search() {
        let alphabet = ['a', 'b', 'c'];
        let queries = all_strings(&alphabet, 4);
        let mut rng = StdRng::seed_from_u64(0x0dab_1985);

        for _ in 0..50 {
            let len = rng.gen_range(0..40);
            let text: String = (0..len).map(|_| alphabet[rng.gen_range(0..alphabet.len())]).collect();
            let dawg = Dawg::from_text(&text);

            dawg.check_invariants().unwrap();
            assert_primary_path(&dawg, &text);
            assert!(dawg.num_states() >= len + 1 && dawg.num_states() <= 2 * len + 1, "state count for {text:?}");
            for query in &queries {
                assert_eq!(dawg.contains_infix(query), text.contains(query.as_str()), "query {query:?} in {text:?}");
            }
        }
    }
}
