pub mod error;
pub use error::{HmmError, Result};

pub mod model;
pub use model::{Model, START_STATE};

pub mod observation;
pub use observation::Observation;

pub mod batch;
pub use batch::ObservationLines;

mod engine;
pub use engine::{Decoded, Engine};
