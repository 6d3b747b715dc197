use serde::Serialize;
use shape_core::{Measure, Measurement, Shape, ShapeError, ShapeKind, measure_each};
use tracing::{debug, info};

use crate::config::{TallyConfig, UnknownKindPolicy};
use crate::error::TallyError;
use crate::record::{Directive, Record, ShapeSpec};

/// Result of one directive: the running total after each shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tally {
    pub measurement: Measurement,
    pub multiplier: f64,
    pub totals: Vec<f64>,
}

impl Tally {
    /// Final total, or zero for an empty batch.
    pub fn total(&self) -> f64 {
        self.totals.last().copied().unwrap_or(0.0)
    }
}

/// What a single record did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Stored(ShapeKind),
    Tallied(Tally),
    Ignored(String),
}

/// Ordered batch of shapes waiting for the next directive.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: TallyConfig,
    shapes: Vec<Shape>,
}

impl Session {
    pub fn new(config: TallyConfig) -> Self {
        Self {
            config,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Parses `fields` and applies the resulting record.
    pub fn feed<S>(&mut self, fields: &[S]) -> Result<Step, TallyError>
    where
        S: AsRef<str>,
    {
        let record = Record::from_fields(fields)?;
        self.apply(record)
    }

    pub fn apply(&mut self, record: Record) -> Result<Step, TallyError> {
        match record {
            Record::Construct(spec) => Ok(Step::Stored(self.construct(spec)?)),
            Record::Directive(directive) => Ok(Step::Tallied(self.tally(directive)?)),
            Record::Unknown(kind) => match self.config.unknown_kinds {
                UnknownKindPolicy::Ignore => {
                    debug!(kind = %kind, "ignoring record with unrecognised kind");
                    Ok(Step::Ignored(kind))
                }
                UnknownKindPolicy::Reject => Err(TallyError::UnknownKind(kind)),
            },
        }
    }

    /// Builds a shape and appends it to the batch.
    pub fn construct(&mut self, spec: ShapeSpec) -> Result<ShapeKind, ShapeError> {
        let shape = spec.build(&self.config)?;
        let kind = shape.kind();
        self.shapes.push(shape);
        debug!(%kind, pending = self.shapes.len(), "stored shape");
        Ok(kind)
    }

    /// Measures the batch and empties it.
    ///
    /// If any shape lacks the measurement, nothing is emitted and the batch
    /// is kept.
    pub fn tally(&mut self, directive: Directive) -> Result<Tally, ShapeError> {
        let Directive {
            measurement,
            multiplier,
        } = directive;

        let values = measure_each(self.shapes.as_slice(), measurement)?;
        let totals = values
            .iter()
            .scan(0.0, |total, value| {
                *total += value * multiplier;
                Some(*total)
            })
            .collect::<Vec<_>>();
        self.shapes.clear();

        let tally = Tally {
            measurement,
            multiplier,
            totals,
        };
        info!(
            %measurement,
            multiplier,
            shapes = tally.totals.len(),
            total = tally.total(),
            "tallied batch"
        );
        Ok(tally)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    use shape_core::{Measurement, ShapeError, ShapeKind};

    use super::{Session, Step, Tally};
    use crate::config::{TallyConfig, UnknownKindPolicy};
    use crate::error::{ErrorCategory, TallyError};
    use crate::record::Directive;

    fn assert_close(actual: f64, expected: f64, eps: f64) {
        assert!(
            (actual - expected).abs() <= eps,
            "expected {expected}, got {actual}, eps={eps}"
        );
    }

    fn tallied(step: Step) -> Tally {
        match step {
            Step::Tallied(tally) => tally,
            other => panic!("expected a tally, got {other:?}"),
        }
    }

    #[test]
    fn right_triangle_area_directive() {
        let mut session = Session::default();
        assert_eq!(
            session.feed(&["triangle", "3", "4", "5"]),
            Ok(Step::Stored(ShapeKind::Triangle))
        );

        let tally = tallied(session.feed(&["area", "1"]).expect("area directive"));
        assert_eq!(tally.totals.len(), 1);
        assert_close(tally.totals[0], 6.0, 1e-12);
        assert!(session.is_empty());
    }

    #[test]
    fn directive_emits_cumulative_scaled_totals_in_order() {
        let mut session = Session::default();
        session.feed(&["cube", "1"]).expect("cube");
        session.feed(&["cube", "2"]).expect("cube");
        session.feed(&["cuboid", "1", "1", "1"]).expect("cuboid");
        assert_eq!(session.len(), 3);

        let tally = tallied(session.feed(&["area", "2"]).expect("area directive"));
        assert_eq!(tally.totals, vec![12.0, 60.0, 72.0]);
        assert_eq!(tally.total(), 72.0);
    }

    #[test]
    fn volume_directive_sums_solids() {
        let mut session = Session::default();
        session.feed(&["cylinder", "1", "1"]).expect("cylinder");
        session.feed(&["sphere", "1"]).expect("sphere");

        let tally = tallied(session.feed(&["volume", "1"]).expect("volume directive"));
        assert_close(tally.totals[0], PI, 1e-12);
        assert_close(tally.totals[1], PI + 4.0 / 3.0 * PI, 1e-12);
    }

    #[test]
    fn empty_batch_emits_nothing() {
        let mut session = Session::default();
        let tally = session
            .tally(Directive {
                measurement: Measurement::Volume,
                multiplier: 3.0,
            })
            .expect("empty batch is fine");
        assert!(tally.totals.is_empty());
        assert_eq!(tally.total(), 0.0);
    }

    #[test]
    fn second_directive_without_new_shapes_emits_nothing() {
        let mut session = Session::default();
        session.feed(&["cube", "2"]).expect("cube");
        let first = tallied(session.feed(&["area", "1"]).expect("first directive"));
        assert_eq!(first.totals, vec![24.0]);

        let second = tallied(session.feed(&["area", "1"]).expect("second directive"));
        assert!(second.totals.is_empty());
    }

    #[test]
    fn totals_restart_for_each_directive() {
        let mut session = Session::default();
        session.feed(&["cube", "1"]).expect("cube");
        session.feed(&["area", "1"]).expect("first directive");
        session.feed(&["cube", "1"]).expect("cube");

        let tally = tallied(session.feed(&["area", "1"]).expect("second directive"));
        assert_eq!(tally.totals, vec![6.0]);
    }

    #[test]
    fn unsupported_measurement_keeps_the_batch() {
        let mut session = Session::default();
        session.feed(&["sphere", "1"]).expect("sphere");
        session.feed(&["triangle", "3", "4", "5"]).expect("triangle");

        let err = session.feed(&["volume", "1"]).expect_err("triangle has no volume");
        assert_eq!(
            err,
            TallyError::Shape(ShapeError::unsupported(
                ShapeKind::Triangle,
                Measurement::Volume
            ))
        );
        assert_eq!(session.len(), 2);

        let tally = tallied(session.feed(&["area", "1"]).expect("area is defined"));
        assert_eq!(tally.totals.len(), 2);
        assert!(session.is_empty());
    }

    #[test]
    fn invalid_dimension_does_not_store_a_shape() {
        let mut session = Session::default();
        let err = session.feed(&["cube", "0"]).expect_err("zero length");
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);

        let err = session.feed(&["polygon", "1", "2"]).expect_err("two faces");
        assert_eq!(err.category(), ErrorCategory::InvalidDimension);
        assert!(session.is_empty());
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn ignored_kinds_are_silent_at_warn_level() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut session = Session::default();
            let step = session.feed(&["# header", "kind"]).expect("ignored");
            assert_eq!(step, Step::Ignored("# header".to_string()));
        });

        assert!(capture.0.lock().expect("capture lock").is_empty());
    }

    #[test]
    fn unknown_kinds_follow_policy() {
        let mut lenient = Session::default();
        assert_eq!(
            lenient.feed(&["hexagon", "1"]),
            Ok(Step::Ignored("hexagon".to_string()))
        );

        let mut strict = Session::new(TallyConfig {
            unknown_kinds: UnknownKindPolicy::Reject,
            ..TallyConfig::default()
        });
        let err = strict.feed(&["hexagon", "1"]).expect_err("rejected");
        assert_eq!(err, TallyError::UnknownKind("hexagon".to_string()));
    }
}
