use std::fmt;

/// A pair of equal-length sequences: the hidden states a model moved through
/// and the output symbols those states emitted. The state sequence is empty
/// for an observation that is awaiting decoding; the length of an observation
/// is the length of its output sequence. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    states: Vec<String>,
    outputs: Vec<String>,
}

impl Observation {
    /// An observation with a known state sequence, e.g. one just generated.
    pub fn new(states: Vec<String>, outputs: Vec<String>) -> Observation {
        Observation { states, outputs }
    }

    /// An observation whose state sequence is unknown, e.g. one to be decoded.
    pub fn from_outputs(outputs: Vec<String>) -> Observation {
        Observation {
            states: vec![],
            outputs,
        }
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.states.join(" "))?;
        write!(f, "{}", self.outputs.join(" "))
    }
}
