//! Octant subdivision of boxes.
//!
//! Works on canonical profile strings only, never on rendered objects.

use crate::descriptor::{BoxDescriptor, Color};
use crate::error::ProfileError;
use crate::profile::{join_profiles, parse_box};

/// Color tag given to octants whose index sum is even
pub const SECONDARY_COLOR: &str = "gray";

/// Split a box into its 8 octants.
///
/// Octants are enumerated x-major (`i`), then y (`j`), then z (`k`). The size keeps
/// its shorthand form. The parent's color is dropped; octants with an even `i+j+k`
/// are tagged with [`SECONDARY_COLOR`].
///
/// Fails if a derived corner leaves the finite `f64` range, since such an octant could
/// not be parsed back.
pub fn subdivide_box(parent: &BoxDescriptor) -> Result<Vec<BoxDescriptor>, ProfileError> {
    let size = parent.size().halved();
    let [w, h, d] = size.dimensions();
    let [x, y, z] = parent.origin();

    let mut octants = Vec::with_capacity(8);
    for i in 0..2u32 {
        for j in 0..2u32 {
            for k in 0..2u32 {
                let origin = [
                    x + w * f64::from(i),
                    y + h * f64::from(j),
                    z + d * f64::from(k),
                ];
                if origin.iter().any(|c| !c.is_finite()) {
                    return Err(ProfileError::InvalidPositionFormat(parent.profile().to_string()));
                }
                let color = ((i + j + k) % 2 == 0).then(|| Color::new(SECONDARY_COLOR));
                octants.push(BoxDescriptor::new(size, origin, color));
            }
        }
    }
    Ok(octants)
}

/// Replace every box profile with its 8 octant profiles, returning a new batch.
///
/// The input is expected to come from earlier successful parses; a malformed entry,
/// or one whose octants overflow, is returned as an error and nothing is produced.
pub fn subdivide<S: AsRef<str>>(profiles: &[S]) -> Result<String, ProfileError> {
    let mut refined = Vec::with_capacity(profiles.len() * 8);
    for profile in profiles {
        let parent = parse_box(profile.as_ref())?;
        refined.extend(
            subdivide_box(&parent)?
                .into_iter()
                .map(|octant| octant.profile().to_string()),
        );
    }
    Ok(join_profiles(&refined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::parse_boxes;

    #[test]
    fn test_unit_cube_fans_out_to_eight() {
        let batch = subdivide(&["1|0,0,0"]).unwrap();
        let parsed = parse_boxes(&batch);
        assert!(parsed.is_clean());
        assert_eq!(parsed.items.len(), 8);

        for octant in &parsed.items {
            assert_eq!(octant.dimensions(), [0.5, 0.5, 0.5]);
            assert!(octant.is_cube());
        }

        let mut corners: Vec<[f64; 3]> = parsed.items.iter().map(|b| b.origin()).collect();
        corners.dedup();
        assert_eq!(corners.len(), 8);
        for corner in &corners {
            for c in corner {
                assert!(*c == 0.0 || *c == 0.5);
            }
        }

        let gray = parsed
            .items
            .iter()
            .filter(|b| b.color().map(Color::as_str) == Some(SECONDARY_COLOR))
            .count();
        assert_eq!(gray, 4);
    }

    #[test]
    fn test_checkerboard_order() {
        let batch = subdivide(&["1|0,0,0"]).unwrap();
        let profiles: Vec<&str> = batch.split(';').collect();
        assert_eq!(
            profiles,
            vec![
                "0.5|0,0,0|gray",
                "0.5|0,0,0.5",
                "0.5|0,0.5,0",
                "0.5|0,0.5,0.5|gray",
                "0.5|0.5,0,0",
                "0.5|0.5,0,0.5|gray",
                "0.5|0.5,0.5,0|gray",
                "0.5|0.5,0.5,0.5",
            ]
        );
    }

    #[test]
    fn test_cuboid_keeps_three_value_form_and_drops_color() {
        let batch = subdivide(&["2,4,-8|1,1,1|red"]).unwrap();
        let first = batch.split(';').next().unwrap();
        assert_eq!(first, "1,2,4|1,1,1|gray");
        assert!(!batch.contains("red"));
    }

    #[test]
    fn test_multiple_boxes_keep_order() {
        let batch = subdivide(&["1|0,0,0", "2|10,0,0"]).unwrap();
        let parsed = parse_boxes(&batch);
        assert_eq!(parsed.items.len(), 16);
        assert_eq!(parsed.items[0].origin(), [0.0, 0.0, 0.0]);
        assert_eq!(parsed.items[8].origin(), [10.0, 0.0, 0.0]);
        assert_eq!(parsed.items[8].dimensions(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_empty_and_malformed_input() {
        assert_eq!(subdivide::<&str>(&[]).unwrap(), "");
        assert!(matches!(
            subdivide(&["1|0,0"]),
            Err(ProfileError::InvalidPositionFormat(_))
        ));
    }

    #[test]
    fn test_overflowing_octant_is_rejected() {
        let parent = crate::profile::parse_box("1e308|1.7e308,0,0").unwrap();
        assert!(matches!(
            subdivide_box(&parent),
            Err(ProfileError::InvalidPositionFormat(ref field)) if field == "1e308|1.7e308,0,0"
        ));
        assert!(subdivide(&["1|0,0,0", "1e308|1.7e308,0,0"]).is_err());
    }
}
