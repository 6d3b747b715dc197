use std::fmt;

use serde::Serialize;

use crate::error::ShapeError;
use crate::primitives::{Cube, Cuboid, Cylinder, Measure, Polygon, Prism, Sphere, Triangle};

/// Name of a shape variant, as written in input records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Triangle,
    Polygon,
    Cube,
    Cuboid,
    Sphere,
    Cylinder,
    Prism,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Triangle,
        ShapeKind::Polygon,
        ShapeKind::Cube,
        ShapeKind::Cuboid,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Prism,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Triangle => "triangle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Cube => "cube",
            ShapeKind::Cuboid => "cuboid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Prism => "prism",
        }
    }

    /// Case-sensitive lookup by record name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quantity a shape may be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    Area,
    Perimeter,
    Volume,
}

impl Measurement {
    pub fn as_str(self) -> &'static str {
        match self {
            Measurement::Area => "area",
            Measurement::Perimeter => "perimeter",
            Measurement::Volume => "volume",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of supported shapes with exhaustive dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Triangle(Triangle),
    Polygon(Polygon),
    Cube(Cube),
    Cuboid(Cuboid),
    Sphere(Sphere),
    Cylinder(Cylinder),
    Prism(Prism),
}

macro_rules! dispatch {
    ($shape:expr, $inner:ident => $body:expr) => {
        match $shape {
            Shape::Triangle($inner) => $body,
            Shape::Polygon($inner) => $body,
            Shape::Cube($inner) => $body,
            Shape::Cuboid($inner) => $body,
            Shape::Sphere($inner) => $body,
            Shape::Cylinder($inner) => $body,
            Shape::Prism($inner) => $body,
        }
    };
}

impl Measure for Shape {
    fn kind(&self) -> ShapeKind {
        dispatch!(self, shape => shape.kind())
    }

    fn area(&self) -> Result<f64, ShapeError> {
        dispatch!(self, shape => shape.area())
    }

    fn perimeter(&self) -> Result<f64, ShapeError> {
        dispatch!(self, shape => shape.perimeter())
    }

    fn volume(&self) -> Result<f64, ShapeError> {
        dispatch!(self, shape => shape.volume())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_variant!(Triangle, Polygon, Cube, Cuboid, Sphere, Cylinder, Prism);
