//! Accumulates scaled areas and volumes over batches of shapes.
//!
//! Construction records append shapes to a [`Session`]; an `area` or
//! `volume` directive measures every stored shape in order, emits the
//! running total after each one and empties the session.

pub mod config;
pub mod error;
pub mod record;
pub mod run;
pub mod session;

pub use config::{TallyConfig, UnknownKindPolicy};
pub use error::{ErrorCategory, RecordError, StreamError, TallyError};
pub use record::{Directive, Record, ShapeSpec};
pub use run::run;
pub use session::{Session, Step, Tally};
