//! Profile codec for box and polyline scenes.
//!
//! Parses the semicolon-separated profile text format into descriptors, keeps the
//! canonical (whitespace-stripped) form of every clause, and derives refined box
//! batches by octant subdivision.

pub mod descriptor;
pub mod error;
pub mod profile;
pub mod subdivide;

pub use descriptor::{BoxDescriptor, BoxSize, Color, LineDescriptor, Vec3d};
pub use error::{ClauseError, ProfileError};
pub use profile::{
    join_profiles, parse_batch, parse_box, parse_boxes, parse_line, parse_lines, serialize,
    strip_whitespace, BatchParse, ProfileItem,
};
pub use subdivide::{subdivide, subdivide_box, SECONDARY_COLOR};
