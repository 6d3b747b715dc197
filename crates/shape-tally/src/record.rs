use shape_core::{
    Cube, Cuboid, Cylinder, Measurement, Polygon, Prism, Shape, ShapeError, ShapeKind, Sphere,
    Triangle,
};

use crate::config::TallyConfig;
use crate::error::RecordError;

/// Raw dimensions of a shape to be built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeSpec {
    Triangle { a: f64, b: f64, c: f64 },
    Polygon { face_length: f64, faces: i64 },
    Cube { length: f64 },
    Cuboid { width: f64, height: f64, depth: f64 },
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Prism { face_length: f64, faces: i64, height: f64 },
}

impl ShapeSpec {
    /// Reads the numeric fields that follow a shape kind.
    pub fn from_values<S>(shape: ShapeKind, values: &[S]) -> Result<Self, RecordError>
    where
        S: AsRef<str>,
    {
        let kind = shape.as_str();
        let spec = match shape {
            ShapeKind::Triangle => {
                let [a, b, c] = numbers(kind, values, ["side a", "side b", "side c"])?;
                ShapeSpec::Triangle { a, b, c }
            }
            ShapeKind::Polygon => {
                let [face_length, faces] = numbers(kind, values, ["face length", "face count"])?;
                ShapeSpec::Polygon {
                    face_length,
                    faces: whole(kind, faces, values[1].as_ref())?,
                }
            }
            ShapeKind::Cube => {
                let [length] = numbers(kind, values, ["length"])?;
                ShapeSpec::Cube { length }
            }
            ShapeKind::Cuboid => {
                let [width, height, depth] = numbers(kind, values, ["width", "height", "depth"])?;
                ShapeSpec::Cuboid {
                    width,
                    height,
                    depth,
                }
            }
            ShapeKind::Sphere => {
                let [radius] = numbers(kind, values, ["radius"])?;
                ShapeSpec::Sphere { radius }
            }
            ShapeKind::Cylinder => {
                let [radius, height] = numbers(kind, values, ["radius", "height"])?;
                ShapeSpec::Cylinder { radius, height }
            }
            ShapeKind::Prism => {
                let [face_length, faces, height] =
                    numbers(kind, values, ["face length", "face count", "height"])?;
                ShapeSpec::Prism {
                    face_length,
                    faces: whole(kind, faces, values[1].as_ref())?,
                    height,
                }
            }
        };
        Ok(spec)
    }

    /// Validates the dimensions and builds the shape.
    pub fn build(&self, config: &TallyConfig) -> Result<Shape, ShapeError> {
        let shape: Shape = match *self {
            ShapeSpec::Triangle { a, b, c } => Triangle::new(a, b, c)?.into(),
            ShapeSpec::Polygon { face_length, faces } => {
                Polygon::new(face_length, face_count(ShapeKind::Polygon, faces)?)?.into()
            }
            ShapeSpec::Cube { length } => Cube::new(length)?.into(),
            ShapeSpec::Cuboid {
                width,
                height,
                depth,
            } => Cuboid::new(width, height, depth)?.into(),
            ShapeSpec::Sphere { radius } => Sphere::with_rule(radius, config.sphere_volume)?.into(),
            ShapeSpec::Cylinder { radius, height } => Cylinder::new(radius, height)?.into(),
            ShapeSpec::Prism {
                face_length,
                faces,
                height,
            } => Prism::new(face_length, face_count(ShapeKind::Prism, faces)?, height)?.into(),
        };
        Ok(shape)
    }
}

fn face_count(shape: ShapeKind, faces: i64) -> Result<u32, ShapeError> {
    u32::try_from(faces).map_err(|_| ShapeError::face_count(shape, faces as f64))
}

/// Accumulate `measurement` over the session, scaled by `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Directive {
    pub measurement: Measurement,
    pub multiplier: f64,
}

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Construct(ShapeSpec),
    Directive(Directive),
    Unknown(String),
}

impl Record {
    /// Interprets already-split fields: a kind followed by its numbers.
    ///
    /// Kinds are case-sensitive. Any kind that is neither a shape nor a
    /// directive becomes [`Record::Unknown`] without inspecting its fields.
    pub fn from_fields<S>(fields: &[S]) -> Result<Self, RecordError>
    where
        S: AsRef<str>,
    {
        let Some((kind, values)) = fields.split_first() else {
            return Err(RecordError::Empty);
        };
        let kind = kind.as_ref().trim();
        if kind.is_empty() {
            return Err(RecordError::Empty);
        }

        if let Some(shape) = ShapeKind::from_name(kind) {
            return Ok(Record::Construct(ShapeSpec::from_values(shape, values)?));
        }

        let record = match kind {
            "area" | "volume" => {
                let [multiplier] = numbers(kind, values, ["multiplier"])?;
                let measurement = if kind == "area" {
                    Measurement::Area
                } else {
                    Measurement::Volume
                };
                Record::Directive(Directive {
                    measurement,
                    multiplier,
                })
            }
            _ => Record::Unknown(kind.to_string()),
        };

        Ok(record)
    }
}

fn numbers<S, const N: usize>(
    kind: &str,
    values: &[S],
    names: [&'static str; N],
) -> Result<[f64; N], RecordError>
where
    S: AsRef<str>,
{
    if values.len() != N {
        return Err(RecordError::FieldCount {
            kind: kind.to_string(),
            expected: N,
            found: values.len(),
        });
    }

    let mut parsed = [0.0; N];
    for ((slot, text), field) in parsed.iter_mut().zip(values).zip(names) {
        let text = text.as_ref().trim();
        *slot = text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| RecordError::InvalidNumber {
                kind: kind.to_string(),
                field,
                text: text.to_string(),
            })?;
    }
    Ok(parsed)
}

fn whole(kind: &str, value: f64, text: &str) -> Result<i64, RecordError> {
    if value.fract() == 0.0 && value.abs() <= f64::from(u32::MAX) {
        Ok(value as i64)
    } else {
        Err(RecordError::FaceCount {
            kind: kind.to_string(),
            text: text.trim().to_string(),
        })
    }
}
