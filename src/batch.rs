use std::io::{BufRead, BufReader, Read};

use crate::error::*;

/// Iterator over the observations of a batch input: one observation per line,
/// output symbols whitespace-separated, blank lines skipped.
pub struct ObservationLines<R: Read> {
    reader: BufReader<R>,
    is_done: bool,
}

impl<R: Read> ObservationLines<R> {
    pub fn new(reader: R) -> ObservationLines<R> {
        ObservationLines {
            reader: BufReader::new(reader),
            is_done: false,
        }
    }
}

impl<R: Read> Iterator for ObservationLines<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Result<Vec<String>>> {
        if self.is_done {
            return None;
        }

        loop {
            let mut line = String::new();
            let n_bytes_read = match self.reader.read_line(&mut line) {
                Ok(n_bytes_read) => n_bytes_read,
                Err(e) => {
                    return Some(Err(e.into()));
                }
            };
            if n_bytes_read == 0 {
                self.is_done = true;
                return None;
            }
            let outputs: Vec<String> = line.split_whitespace().map(String::from).collect();
            if outputs.is_empty() {
                // blank line
                continue;
            }
            return Some(Ok(outputs));
        }
    }
}
