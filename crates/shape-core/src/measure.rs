use crate::error::ShapeError;
use crate::primitives::Measure;
use crate::shape::Measurement;

/// Measures a batch of shapes, failing on the first one that does not
/// define `measurement`.
pub fn measure_each<S>(shapes: &[S], measurement: Measurement) -> Result<Vec<f64>, ShapeError>
where
    S: Measure,
{
    shapes.iter().map(|shape| shape.measure(measurement)).collect()
}
