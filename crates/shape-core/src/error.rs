use thiserror::Error;

use crate::shape::{Measurement, ShapeKind};

/// Failures raised while building or measuring a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A constructor argument is outside the shape's domain.
    #[error("{shape} {dimension} {reason}, received `{value}`")]
    InvalidDimension {
        shape: ShapeKind,
        dimension: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The shape's geometry does not define the requested measurement.
    #[error("{shape} does not define a {measurement}")]
    UnsupportedOperation {
        shape: ShapeKind,
        measurement: Measurement,
    },
}

impl ShapeError {
    pub fn invalid(
        shape: ShapeKind,
        dimension: &'static str,
        value: f64,
        reason: &'static str,
    ) -> Self {
        Self::InvalidDimension {
            shape,
            dimension,
            value,
            reason,
        }
    }

    pub fn unsupported(shape: ShapeKind, measurement: Measurement) -> Self {
        Self::UnsupportedOperation { shape, measurement }
    }

    /// Face count below the minimum of a regular polygon.
    pub fn face_count(shape: ShapeKind, value: f64) -> Self {
        Self::invalid(shape, "face count", value, "must be at least 3")
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeError;
    use crate::shape::{Measurement, ShapeKind};

    #[test]
    fn invalid_dimension_message_names_shape_and_value() {
        let err = ShapeError::invalid(ShapeKind::Cube, "length", -2.0, "must be positive");
        assert_eq!(err.to_string(), "cube length must be positive, received `-2`");
    }

    #[test]
    fn unsupported_message_names_measurement() {
        let err = ShapeError::unsupported(ShapeKind::Sphere, Measurement::Perimeter);
        assert_eq!(err.to_string(), "sphere does not define a perimeter");
    }
}
