//! Geometry descriptors produced by the profile codec.
//!
//! Descriptors are immutable: a descriptor parsed from text keeps that text
//! (whitespace stripped) as its canonical profile, a descriptor built from values
//! formats its profile from them.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::profile::{format_number, format_triple, FIELD_SEPARATOR};

/// Point or extent along x, y, z
pub type Vec3d = [f64; 3];

/// Color token, passed to the renderer untouched
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Box size as authored: single-value cube shorthand or width/height/depth.
///
/// Values are always stored as magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoxSize {
    Cube { edge: f64 },
    Cuboid { width: f64, height: f64, depth: f64 },
}

impl BoxSize {
    pub fn cube(edge: f64) -> Self {
        BoxSize::Cube { edge: edge.abs() }
    }

    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        BoxSize::Cuboid {
            width: width.abs(),
            height: height.abs(),
            depth: depth.abs(),
        }
    }

    /// Width, height, depth
    pub fn dimensions(&self) -> Vec3d {
        match *self {
            BoxSize::Cube { edge } => [edge, edge, edge],
            BoxSize::Cuboid {
                width,
                height,
                depth,
            } => [width, height, depth],
        }
    }

    /// Same shorthand form with every dimension halved
    pub fn halved(&self) -> Self {
        match *self {
            BoxSize::Cube { edge } => BoxSize::Cube { edge: edge / 2.0 },
            BoxSize::Cuboid {
                width,
                height,
                depth,
            } => BoxSize::Cuboid {
                width: width / 2.0,
                height: height / 2.0,
                depth: depth / 2.0,
            },
        }
    }

    fn to_field(self) -> String {
        match self {
            BoxSize::Cube { edge } => format_number(edge),
            BoxSize::Cuboid { .. } => format_triple(self.dimensions()),
        }
    }
}

/// Axis-aligned box authored by its minimum corner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxDescriptor {
    size: BoxSize,
    origin: Vec3d,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    profile: String,
}

impl BoxDescriptor {
    /// Build a descriptor from values; the canonical profile is formatted from them.
    pub fn new(size: BoxSize, origin: Vec3d, color: Option<Color>) -> Self {
        let mut profile = format!("{}{}{}", size.to_field(), FIELD_SEPARATOR, format_triple(origin));
        if let Some(color) = &color {
            profile.push(FIELD_SEPARATOR);
            profile.push_str(color.as_str());
        }
        Self {
            size,
            origin,
            color,
            profile,
        }
    }

    pub(crate) fn from_parts(
        size: BoxSize,
        origin: Vec3d,
        color: Option<Color>,
        profile: String,
    ) -> Self {
        Self {
            size,
            origin,
            color,
            profile,
        }
    }

    pub fn size(&self) -> BoxSize {
        self.size
    }

    /// Non-negative width, height, depth
    pub fn dimensions(&self) -> Vec3d {
        self.size.dimensions()
    }

    /// Minimum corner
    pub fn origin(&self) -> Vec3d {
        self.origin
    }

    pub fn max_corner(&self) -> Vec3d {
        let d = self.dimensions();
        [
            self.origin[0] + d[0],
            self.origin[1] + d[1],
            self.origin[2] + d[2],
        ]
    }

    /// Geometric center, where a renderer that centers boxes must place it
    pub fn center(&self) -> Vec3d {
        let d = self.dimensions();
        [
            self.origin[0] + d[0] / 2.0,
            self.origin[1] + d[1] / 2.0,
            self.origin[2] + d[2] / 2.0,
        ]
    }

    /// Whether the size was authored with the single-value shorthand
    pub fn is_cube(&self) -> bool {
        matches!(self.size, BoxSize::Cube { .. })
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Canonical profile string
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

/// Polyline through two or more points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDescriptor {
    points: Vec<Vec3d>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<Color>,
    profile: String,
}

impl LineDescriptor {
    /// Build a descriptor from values. Fails with `InsufficientPoints` below two points.
    pub fn new(points: Vec<Vec3d>, color: Option<Color>) -> Result<Self, ProfileError> {
        if points.len() < 2 {
            return Err(ProfileError::InsufficientPoints(points.len()));
        }
        let mut profile = points
            .iter()
            .map(|p| format_triple(*p))
            .collect::<Vec<_>>()
            .join(&FIELD_SEPARATOR.to_string());
        if let Some(color) = &color {
            profile.push(FIELD_SEPARATOR);
            profile.push_str(color.as_str());
        }
        Ok(Self {
            points,
            color,
            profile,
        })
    }

    pub(crate) fn from_parts(points: Vec<Vec3d>, color: Option<Color>, profile: String) -> Self {
        Self {
            points,
            color,
            profile,
        }
    }

    pub fn points(&self) -> &[Vec3d] {
        &self.points
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Canonical profile string
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_size_takes_magnitude() {
        assert_eq!(BoxSize::cube(-2.0).dimensions(), [2.0, 2.0, 2.0]);
        assert_eq!(BoxSize::cuboid(-1.0, 2.0, -3.0).dimensions(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_halved_keeps_shorthand() {
        assert_eq!(BoxSize::cube(1.0).halved(), BoxSize::Cube { edge: 0.5 });
        assert_eq!(
            BoxSize::cuboid(1.0, 2.0, 4.0).halved().dimensions(),
            [0.5, 1.0, 2.0]
        );
    }

    #[test]
    fn test_box_new_formats_profile() {
        let b = BoxDescriptor::new(BoxSize::cube(3.0), [0.0, 1.0, 2.0], None);
        assert_eq!(b.profile(), "3|0,1,2");

        let b = BoxDescriptor::new(
            BoxSize::cuboid(1.0, 0.5, 0.25),
            [-1.0, 0.0, 0.5],
            Some(Color::new("gray")),
        );
        assert_eq!(b.profile(), "1,0.5,0.25|-1,0,0.5|gray");
    }

    #[test]
    fn test_box_center_and_max_corner() {
        let b = BoxDescriptor::new(BoxSize::cube(3.0), [0.0, 1.0, 2.0], None);
        assert_eq!(b.center(), [1.5, 2.5, 3.5]);
        assert_eq!(b.max_corner(), [3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_line_new_requires_two_points() {
        assert_eq!(
            LineDescriptor::new(vec![[0.0; 3]], None),
            Err(ProfileError::InsufficientPoints(1))
        );

        let line = LineDescriptor::new(
            vec![[0.0, 0.0, 0.0], [1.0, 1.5, -2.0]],
            Some(Color::new("red")),
        )
        .unwrap();
        assert_eq!(line.profile(), "0,0,0|1,1.5,-2|red");
        assert_eq!(line.points().len(), 2);
    }

    #[test]
    fn test_descriptor_serializes_without_absent_color() {
        let b = BoxDescriptor::new(BoxSize::cube(1.0), [0.0; 3], None);
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["size"]["type"], "cube");
        assert!(json.get("color").is_none());
        assert_eq!(json["profile"], "1|0,0,0");
    }
}
