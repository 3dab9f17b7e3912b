//! Profile text format.
//!
//! Boxes: `size|position[|color]`, where `size` is `s` or `w,h,d` and `position`
//! is the minimum corner `x,y,z`. Lines: `p0|p1|...|pn[|color]`. Clauses are joined
//! with `;`. Whitespace is insignificant; the canonical form has none.

use crate::descriptor::{BoxDescriptor, BoxSize, Color, LineDescriptor, Vec3d};
use crate::error::{ClauseError, ProfileError};

pub const CLAUSE_SEPARATOR: char = ';';
pub const FIELD_SEPARATOR: char = '|';
pub const COMPONENT_SEPARATOR: char = ',';

/// A descriptor kind that has a single-clause textual form
pub trait ProfileItem: Sized {
    /// Human-readable kind name used in logs ("box", "line")
    const KIND: &'static str;

    /// Parse one clause
    fn parse_clause(clause: &str) -> Result<Self, ProfileError>;

    /// Canonical profile string
    fn profile(&self) -> &str;
}

impl ProfileItem for BoxDescriptor {
    const KIND: &'static str = "box";

    fn parse_clause(clause: &str) -> Result<Self, ProfileError> {
        parse_box(clause)
    }

    fn profile(&self) -> &str {
        BoxDescriptor::profile(self)
    }
}

impl ProfileItem for LineDescriptor {
    const KIND: &'static str = "line";

    fn parse_clause(clause: &str) -> Result<Self, ProfileError> {
        parse_line(clause)
    }

    fn profile(&self) -> &str {
        LineDescriptor::profile(self)
    }
}

/// Result of parsing a `;`-separated batch: successes and skipped clauses, both in
/// input order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchParse<T> {
    pub items: Vec<T>,
    pub failures: Vec<ClauseError>,
}

impl<T> BatchParse<T> {
    /// No clause was skipped
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Remove every whitespace character
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Shortest round-trip decimal form. Negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

pub(crate) fn format_triple(v: Vec3d) -> String {
    format!(
        "{}{sep}{}{sep}{}",
        format_number(v[0]),
        format_number(v[1]),
        format_number(v[2]),
        sep = COMPONENT_SEPARATOR
    )
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_components(field: &str) -> Option<Vec<f64>> {
    field.split(COMPONENT_SEPARATOR).map(parse_number).collect()
}

fn parse_triple(field: &str) -> Option<Vec3d> {
    match parse_components(field)?.as_slice() {
        [x, y, z] => Some([*x, *y, *z]),
        _ => None,
    }
}

/// Parse a single box clause.
///
/// Fields after the color are ignored. An empty color field means no color.
pub fn parse_box(clause: &str) -> Result<BoxDescriptor, ProfileError> {
    let profile = strip_whitespace(clause);
    let mut fields = profile.split(FIELD_SEPARATOR);

    let size_field = fields.next().unwrap_or_default();
    let size = match parse_components(size_field).as_deref() {
        Some([edge]) => BoxSize::cube(*edge),
        Some([width, height, depth]) => BoxSize::cuboid(*width, *height, *depth),
        _ => return Err(ProfileError::InvalidSizeFormat(size_field.to_string())),
    };

    let position_field = fields.next().unwrap_or_default();
    let origin = parse_triple(position_field)
        .ok_or_else(|| ProfileError::InvalidPositionFormat(position_field.to_string()))?;

    let color = fields
        .next()
        .filter(|token| !token.is_empty())
        .map(Color::new);

    Ok(BoxDescriptor::from_parts(size, origin, color, profile))
}

/// Parse a single line clause.
///
/// The last segment is a color if and only if it contains no comma. A segment like
/// `1,2` in last position is therefore read as a (malformed) point, while `1` is read
/// as a color token.
pub fn parse_line(clause: &str) -> Result<LineDescriptor, ProfileError> {
    let profile = strip_whitespace(clause);
    let segments: Vec<&str> = profile.split(FIELD_SEPARATOR).collect();

    let (point_segments, color) = match segments.split_last() {
        Some((last, rest)) if !last.contains(COMPONENT_SEPARATOR) => (rest, Some(*last)),
        _ => (segments.as_slice(), None),
    };
    let found = point_segments.iter().filter(|s| !s.is_empty()).count();
    if found < 2 {
        return Err(ProfileError::InsufficientPoints(found));
    }

    let points = point_segments
        .iter()
        .map(|segment| {
            parse_triple(segment).ok_or_else(|| ProfileError::InvalidPointFormat(segment.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let color = color.filter(|token| !token.is_empty()).map(Color::new);

    Ok(LineDescriptor::from_parts(points, color, profile))
}

/// Parse a `;`-separated batch. Blank clauses are skipped silently; malformed
/// clauses are collected as failures without affecting their siblings.
pub fn parse_batch<T: ProfileItem>(text: &str) -> BatchParse<T> {
    let mut batch = BatchParse {
        items: Vec::new(),
        failures: Vec::new(),
    };

    for (index, clause) in text.split(CLAUSE_SEPARATOR).enumerate() {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }
        match T::parse_clause(clause) {
            Ok(item) => batch.items.push(item),
            Err(error) => batch.failures.push(ClauseError {
                index,
                clause: clause.to_string(),
                error,
            }),
        }
    }

    batch
}

pub fn parse_boxes(text: &str) -> BatchParse<BoxDescriptor> {
    parse_batch(text)
}

pub fn parse_lines(text: &str) -> BatchParse<LineDescriptor> {
    parse_batch(text)
}

/// Join canonical profiles with `;`
pub fn join_profiles<S: AsRef<str>>(profiles: &[S]) -> String {
    profiles
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(&CLAUSE_SEPARATOR.to_string())
}

/// Canonical batch string for a sequence of descriptors, in order
pub fn serialize<T: ProfileItem>(items: &[T]) -> String {
    let profiles: Vec<&str> = items.iter().map(ProfileItem::profile).collect();
    join_profiles(&profiles)
}
