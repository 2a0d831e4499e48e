use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::OnceLock;

use hashbrown::HashMap;

use crate::error::*;

/// Reserved label for the pre-sequence pseudo-state. It is the source of the
/// initial transitions only: it never occupies a position in a state sequence
/// and never has a row in the emission table.
pub const START_STATE: &str = "#";

/// The probability tables of a discrete hidden Markov model.
///
/// Both tables are sparse maps of maps. A missing entry inside a known row
/// means probability zero; a missing row is an unknown state. Rows are
/// expected to sum to 1.0 but this is not checked — a malformed model skews
/// inference output rather than failing at load time.
#[derive(Debug, Default, Clone)]
pub struct Model {
    transitions: HashMap<String, HashMap<String, f64>>,
    emissions: HashMap<String, HashMap<String, f64>>,
    // hidden states in first-insertion order, so enumeration is stable
    state_order: Vec<String>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Model {
        Model::default()
    }

    /// Load a model from `<basename>.trans` and `<basename>.emit`.
    pub fn from_path<P: AsRef<Path>>(basename: P) -> Result<Model> {
        let base = basename.as_ref().as_os_str();
        let mut trans = base.to_os_string();
        trans.push(".trans");
        let mut emit = base.to_os_string();
        emit.push(".emit");
        Model::from_readers(File::open(trans)?, File::open(emit)?)
    }

    /// Load a model from a pair of table readers: one `(from, to, probability)`
    /// triple per line for transitions, one `(state, symbol, probability)`
    /// triple per line for emissions, fields whitespace-separated.
    pub fn from_readers<T: Read, E: Read>(trans: T, emit: E) -> Result<Model> {
        let mut model = Model::new();
        for (from, to, prob) in read_table(trans)? {
            model.insert_transition(&from, &to, prob);
        }
        for (state, symbol, prob) in read_table(emit)? {
            model.insert_emission(&state, &symbol, prob);
        }
        Ok(model)
    }

    /// Record a transition probability. A later entry for an already-seen
    /// `(from, to)` pair overwrites the earlier one.
    pub fn insert_transition(&mut self, from: &str, to: &str, prob: f64) {
        if from != START_STATE && !self.transitions.contains_key(from) {
            self.state_order.push(from.to_string());
        }
        self.transitions
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), prob);
    }

    /// Record an emission probability, last-write-wins like `insert_transition`.
    pub fn insert_emission(&mut self, state: &str, symbol: &str, prob: f64) {
        self.emissions
            .entry(state.to_string())
            .or_default()
            .insert(symbol.to_string(), prob);
    }

    /// The outgoing transition row of `state`. A state with no row recorded is
    /// unknown to the model and an error.
    pub fn transitions_from(&self, state: &str) -> Result<&HashMap<String, f64>> {
        self.transitions
            .get(state)
            .ok_or_else(|| HmmError::UnknownState(state.to_string()))
    }

    /// The emission row of `state`. A state with no emissions recorded yields
    /// an empty row, not an error — "known state, no entry for this symbol"
    /// is probability zero, distinct from an unknown state.
    pub fn emissions_from(&self, state: &str) -> &HashMap<String, f64> {
        static EMPTY: OnceLock<HashMap<String, f64>> = OnceLock::new();
        self.emissions
            .get(state)
            .unwrap_or_else(|| EMPTY.get_or_init(HashMap::new))
    }

    /// The emission probability of `symbol` from `state`, or `None` when the
    /// state has no entry for that symbol.
    pub fn emission(&self, state: &str, symbol: &str) -> Option<f64> {
        self.emissions
            .get(state)
            .and_then(|row| row.get(symbol))
            .copied()
    }

    /// All hidden-state labels — every transition source except the start
    /// pseudo-state — in first-insertion order.
    pub fn states(&self) -> &[String] {
        &self.state_order
    }
}

// Parses one whitespace-separated triple per line. Whitespace-only lines are
// skipped; a line with fewer than three fields, or a probability field that
// does not parse, is a format error. Fields past the third are ignored.
fn read_table<R: Read>(reader: R) -> Result<Vec<(String, String, f64)>> {
    let buf_reader = BufReader::new(reader);
    let mut triples = vec![];
    for line in buf_reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (first, second, third) = match (fields.next(), fields.next(), fields.next()) {
            (Some(first), Some(second), Some(third)) => (first, second, third),
            _ => return Err(HmmError::Format(line.clone())),
        };
        let prob: f64 = third
            .parse()
            .map_err(|_| HmmError::Format(line.clone()))?;
        triples.push((first.to_string(), second.to_string(), prob));
    }
    Ok(triples)
}
