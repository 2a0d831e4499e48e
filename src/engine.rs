use std::fs::File;
use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use rand::Rng;

use crate::batch::ObservationLines;
use crate::error::*;
use crate::model::{Model, START_STATE};
use crate::observation::Observation;

/// Per-position decode of one batch input, tagged with the 1-based position
/// of that input in the batch. A `None` at a position means no state carried
/// a score above zero there.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub index: usize,
    pub states: Vec<Option<String>>,
}

// how trellis cells combine the scores flowing in from the previous column
#[derive(Debug, Clone, Copy)]
enum Reduce {
    Sum,
    Max,
}

/// The inference engine: sampling and dynamic-programming passes over a
/// borrowed `Model`. Holds no mutable state, so one model can serve any
/// number of engines and calls.
pub struct Engine<'a> {
    model: &'a Model,
}

impl<'a> Engine<'a> {
    pub fn new(model: &'a Model) -> Engine<'a> {
        Engine { model }
    }

    /// Sample an `n`-length observation. Starting from the start pseudo-state,
    /// each next state is a categorical draw from the current state's
    /// transition row; once the state sequence is complete, each state draws
    /// one output from its emission row. Weights are used exactly as given.
    ///
    /// Fails with `UnknownState` when a sampled state has no transition row
    /// before `n` draws complete, and with `EmptyDistribution` when a sampled
    /// state has no emission entries at all.
    pub fn generate<R: Rng>(&self, n: usize, rng: &mut R) -> Result<Observation> {
        let mut stateseq: Vec<String> = Vec::with_capacity(n);
        let mut current = START_STATE;
        for _ in 0..n {
            let row = self.model.transitions_from(current)?;
            let next =
                draw(row, rng).ok_or_else(|| HmmError::UnknownState(current.to_string()))?;
            stateseq.push(next.to_string());
            current = next;
        }

        let mut outputseq: Vec<String> = Vec::with_capacity(n);
        for state in &stateseq {
            let symbol = draw(self.model.emissions_from(state), rng)
                .ok_or_else(|| HmmError::EmptyDistribution(state.clone()))?;
            outputseq.push(symbol.to_string());
        }

        Ok(Observation::new(stateseq, outputseq))
    }

    /// The most likely final hidden state of `observation` under the forward
    /// recurrence, or `None` when no state ends with a score above zero.
    pub fn forward(&self, observation: &Observation) -> Result<Option<String>> {
        self.best_final(observation.outputs())
    }

    /// Run `forward` over every observation line of `reader`, one result per
    /// input in input order.
    pub fn forward_reader<R: Read>(&self, reader: R) -> Result<Vec<Option<String>>> {
        let mut results = vec![];
        for line in ObservationLines::new(reader) {
            let outputs = line?;
            results.push(self.best_final(&outputs)?);
        }
        Ok(results)
    }

    /// Run `forward` over every observation line of the file at `path`.
    pub fn forward_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Option<String>>> {
        self.forward_reader(File::open(path)?)
    }

    /// The most likely hidden state at each position of `observation`: the
    /// per-position arg-max of the Viterbi-style score, not a backtracked
    /// path. A position where every score is zero decodes to `None`.
    pub fn viterbi(&self, observation: &Observation) -> Result<Vec<Option<String>>> {
        self.decode(observation.outputs())
    }

    /// Run `viterbi` over every observation line of `reader`; each decode is
    /// tagged with the 1-based position of its input line.
    pub fn viterbi_reader<R: Read>(&self, reader: R) -> Result<Vec<Decoded>> {
        let mut results = vec![];
        for (i, line) in ObservationLines::new(reader).enumerate() {
            let outputs = line?;
            results.push(Decoded {
                index: i + 1,
                states: self.decode(&outputs)?,
            });
        }
        Ok(results)
    }

    /// Run `viterbi` over every observation line of the file at `path`.
    pub fn viterbi_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Decoded>> {
        self.viterbi_reader(File::open(path)?)
    }

    fn best_final(&self, outputs: &[String]) -> Result<Option<String>> {
        if outputs.is_empty() {
            return Ok(None);
        }
        let table = self.trellis(outputs, Reduce::Sum)?;
        Ok(argmax_column(self.model.states(), &table, outputs.len() - 1))
    }

    fn decode(&self, outputs: &[String]) -> Result<Vec<Option<String>>> {
        let table = self.trellis(outputs, Reduce::Max)?;
        Ok((0..outputs.len())
            .map(|t| argmax_column(self.model.states(), &table, t))
            .collect())
    }

    // Fills a (state x time) score table, allocated once per call. The base
    // column weighs each state by its transition from the start pseudo-state;
    // later columns combine the previous column's scores with Sum (forward)
    // or Max (Viterbi). A state with no entry for the step's output keeps a
    // zero cell.
    //
    // Note the step weight is the transition from the current candidate state
    // to each previous-step state, not the textbook incoming direction. Both
    // passes share this orientation; callers comparing against a textbook
    // forward/Viterbi implementation will see transposed scores.
    fn trellis(&self, outputs: &[String], reduce: Reduce) -> Result<Vec<Vec<f64>>> {
        let states = self.model.states();
        let mut table = vec![vec![0.0; outputs.len()]; states.len()];
        for (t, output) in outputs.iter().enumerate() {
            for (i, state) in states.iter().enumerate() {
                let emit = match self.model.emission(state, output) {
                    Some(emit) => emit,
                    None => continue,
                };
                let score = if t == 0 {
                    self.model
                        .transitions_from(START_STATE)?
                        .get(state)
                        .copied()
                        .unwrap_or(0.0)
                        * emit
                } else {
                    let row = self.model.transitions_from(state)?;
                    states.iter().enumerate().fold(0.0, |acc, (j, prev)| {
                        let term =
                            table[j][t - 1] * row.get(prev).copied().unwrap_or(0.0) * emit;
                        match reduce {
                            Reduce::Sum => acc + term,
                            Reduce::Max => acc.max(term),
                        }
                    })
                };
                table[i][t] = score;
            }
        }
        Ok(table)
    }
}

// Strict greater-than against a zero floor: equal scores keep the
// earlier-enumerated state, and an all-zero column has no winner.
fn argmax_column(states: &[String], table: &[Vec<f64>], t: usize) -> Option<String> {
    let mut best_val = 0.0;
    let mut best: Option<&String> = None;
    for (i, state) in states.iter().enumerate() {
        if table[i][t] > best_val {
            best_val = table[i][t];
            best = Some(state);
        }
    }
    best.cloned()
}

// One categorical draw over a weight row, scanning the cumulative weights
// against a single uniform draw. Weights are not renormalized: a row that
// sums short of 1.0 leaves the tail mass on the last key scanned. `None`
// only for an empty row.
fn draw<'m, R: Rng>(weights: &'m HashMap<String, f64>, rng: &mut R) -> Option<&'m str> {
    let u: f64 = rng.gen();
    let mut cum = 0.0;
    let mut chosen = None;
    for (key, &weight) in weights {
        cum += weight;
        chosen = Some(key.as_str());
        if u < cum {
            break;
        }
    }
    chosen
}
