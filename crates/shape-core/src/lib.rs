pub mod error;
pub mod measure;
pub mod primitives;
pub mod shape;

pub use error::ShapeError;
pub use measure::measure_each;
pub use primitives::{
    Cube, Cuboid, Cylinder, Measure, Polygon, Prism, Sphere, SphereVolumeRule, Triangle,
};
pub use shape::{Measurement, Shape, ShapeKind};
