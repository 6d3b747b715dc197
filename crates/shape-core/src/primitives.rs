use std::f64::consts::PI;

use crate::error::ShapeError;
use crate::shape::{Measurement, ShapeKind};

/// Geometric quantities a shape can report.
///
/// Measurements a shape does not define keep the default implementation,
/// which fails with [`ShapeError::UnsupportedOperation`].
pub trait Measure {
    fn kind(&self) -> ShapeKind;

    fn area(&self) -> Result<f64, ShapeError> {
        Err(ShapeError::unsupported(self.kind(), Measurement::Area))
    }

    fn perimeter(&self) -> Result<f64, ShapeError> {
        Err(ShapeError::unsupported(self.kind(), Measurement::Perimeter))
    }

    fn volume(&self) -> Result<f64, ShapeError> {
        Err(ShapeError::unsupported(self.kind(), Measurement::Volume))
    }

    fn measure(&self, measurement: Measurement) -> Result<f64, ShapeError> {
        match measurement {
            Measurement::Area => self.area(),
            Measurement::Perimeter => self.perimeter(),
            Measurement::Volume => self.volume(),
        }
    }
}

fn require_positive(shape: ShapeKind, dimension: &'static str, value: f64) -> Result<f64, ShapeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ShapeError::invalid(
            shape,
            dimension,
            value,
            "must be a positive, finite number",
        ))
    }
}

/// Rejects dimensions whose derived measurements overflow.
fn require_finite_measurements(
    shape: ShapeKind,
    largest: f64,
    measurements: &[f64],
) -> Result<(), ShapeError> {
    if measurements.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ShapeError::invalid(
            shape,
            "largest dimension",
            largest,
            "is too large for a finite measurement",
        ))
    }
}

fn require_faces(shape: ShapeKind, faces: u32) -> Result<u32, ShapeError> {
    if faces >= 3 {
        Ok(faces)
    } else {
        Err(ShapeError::face_count(shape, f64::from(faces)))
    }
}

/// cot(pi / n) written as cos/sin.
#[inline]
fn cot_pi_over(faces: u32) -> f64 {
    let angle = PI / f64::from(faces);
    angle.cos() / angle.sin()
}

/// Heron's formula.
#[inline]
fn heron_area([a, b, c]: [f64; 3]) -> f64 {
    let s = (a + b + c) / 2.0;
    // Degenerate triangles can round the product slightly below zero.
    (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt()
}

/// Area of a regular polygon with `faces` sides of length `face_length`.
#[inline]
fn regular_polygon_area(face_length: f64, faces: u32) -> f64 {
    f64::from(faces) / 4.0 * face_length * face_length * cot_pi_over(faces)
}

/// Triangle given by its three side lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    sides: [f64; 3],
}

impl Triangle {
    /// Rejects non-positive sides and side triples that cannot close.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Triangle;
        let sides = [
            require_positive(kind, "side a", a)?,
            require_positive(kind, "side b", b)?,
            require_positive(kind, "side c", c)?,
        ];

        let longest = a.max(b).max(c);
        if longest > a + b + c - longest {
            return Err(ShapeError::invalid(
                kind,
                "longest side",
                longest,
                "must not exceed the sum of the other two sides",
            ));
        }
        require_finite_measurements(kind, longest, &[a + b + c, heron_area(sides)])?;

        Ok(Self { sides })
    }

    pub fn sides(&self) -> [f64; 3] {
        self.sides
    }
}

impl Measure for Triangle {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(heron_area(self.sides))
    }

    fn perimeter(&self) -> Result<f64, ShapeError> {
        let [a, b, c] = self.sides;
        Ok(a + b + c)
    }
}

/// Regular polygon measured by face length and face count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    face_length: f64,
    faces: u32,
}

impl Polygon {
    pub fn new(face_length: f64, faces: u32) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Polygon;
        let face_length = require_positive(kind, "face length", face_length)?;
        let faces = require_faces(kind, faces)?;
        require_finite_measurements(
            kind,
            face_length,
            &[
                regular_polygon_area(face_length, faces),
                f64::from(faces) * face_length,
            ],
        )?;
        Ok(Self { face_length, faces })
    }

    pub fn face_length(&self) -> f64 {
        self.face_length
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }
}

impl Measure for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(regular_polygon_area(self.face_length, self.faces))
    }

    fn perimeter(&self) -> Result<f64, ShapeError> {
        Ok(f64::from(self.faces) * self.face_length)
    }
}

/// Cube; only its surface area is defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    length: f64,
}

impl Cube {
    pub fn new(length: f64) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Cube;
        let length = require_positive(kind, "length", length)?;
        let cube = Self { length };
        require_finite_measurements(kind, length, &[cube.surface_area()])?;
        Ok(cube)
    }

    fn surface_area(&self) -> f64 {
        6.0 * self.length * self.length
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl Measure for Cube {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cube
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(self.surface_area())
    }
}

/// Rectangular box; only its surface area is defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    width: f64,
    height: f64,
    depth: f64,
}

impl Cuboid {
    pub fn new(width: f64, height: f64, depth: f64) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Cuboid;
        let cuboid = Self {
            width: require_positive(kind, "width", width)?,
            height: require_positive(kind, "height", height)?,
            depth: require_positive(kind, "depth", depth)?,
        };
        let largest = width.max(height).max(depth);
        require_finite_measurements(kind, largest, &[cuboid.surface_area()])?;
        Ok(cuboid)
    }

    fn surface_area(&self) -> f64 {
        2.0 * (self.depth * self.width + self.width * self.height + self.height * self.depth)
    }

    pub fn dimensions(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }
}

impl Measure for Cuboid {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cuboid
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(self.surface_area())
    }
}

/// Coefficient used for sphere volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SphereVolumeRule {
    /// `4/3 * pi * r^3`.
    #[default]
    Exact,
    /// Integer `4 / 3`, i.e. `pi * r^3`, as produced by older tooling.
    LegacyTruncated,
}

impl SphereVolumeRule {
    const LEGACY_COEFFICIENT: i32 = 4 / 3;

    fn coefficient(self) -> f64 {
        match self {
            SphereVolumeRule::Exact => 4.0 / 3.0,
            SphereVolumeRule::LegacyTruncated => f64::from(Self::LEGACY_COEFFICIENT),
        }
    }
}

/// Sphere with area and volume computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    radius: f64,
    area: f64,
    volume: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Result<Self, ShapeError> {
        Self::with_rule(radius, SphereVolumeRule::Exact)
    }

    pub fn with_rule(radius: f64, rule: SphereVolumeRule) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Sphere;
        let radius = require_positive(kind, "radius", radius)?;
        let area = 4.0 * PI * radius.powi(2);
        let volume = rule.coefficient() * PI * radius.powi(3);
        require_finite_measurements(kind, radius, &[area, volume])?;
        Ok(Self {
            radius,
            area,
            volume,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Measure for Sphere {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Sphere
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(self.area)
    }

    fn volume(&self) -> Result<f64, ShapeError> {
        Ok(self.volume)
    }
}

/// Closed right circular cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    radius: f64,
    height: f64,
    area: f64,
    volume: f64,
}

impl Cylinder {
    pub fn new(radius: f64, height: f64) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Cylinder;
        let radius = require_positive(kind, "radius", radius)?;
        let height = require_positive(kind, "height", height)?;
        let area = 2.0 * PI * radius * height + 2.0 * PI * radius.powi(2);
        let volume = PI * radius.powi(2) * height;
        require_finite_measurements(kind, radius.max(height), &[area, volume])?;
        Ok(Self {
            radius,
            height,
            area,
            volume,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Measure for Cylinder {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(self.area)
    }

    fn volume(&self) -> Result<f64, ShapeError> {
        Ok(self.volume)
    }
}

/// Right prism over a regular polygon cross-section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prism {
    face_length: f64,
    faces: u32,
    height: f64,
    area: f64,
    volume: f64,
}

impl Prism {
    pub fn new(face_length: f64, faces: u32, height: f64) -> Result<Self, ShapeError> {
        let kind = ShapeKind::Prism;
        let face_length = require_positive(kind, "face length", face_length)?;
        let faces = require_faces(kind, faces)?;
        let height = require_positive(kind, "height", height)?;

        let base = regular_polygon_area(face_length, faces);
        let area = 2.0 * base + f64::from(faces) * face_length * height;
        let volume = base * height;
        require_finite_measurements(kind, face_length.max(height), &[area, volume])?;
        Ok(Self {
            face_length,
            faces,
            height,
            area,
            volume,
        })
    }

    pub fn face_length(&self) -> f64 {
        self.face_length
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

impl Measure for Prism {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Prism
    }

    fn area(&self) -> Result<f64, ShapeError> {
        Ok(self.area)
    }

    fn volume(&self) -> Result<f64, ShapeError> {
        Ok(self.volume)
    }
}
