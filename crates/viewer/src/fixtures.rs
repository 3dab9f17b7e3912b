//! Reusable profile strings and viewer constructors for tests and demos.

use crate::state::{ViewerSettings, ViewerState};

/// Unit cube at the origin
pub const UNIT_CUBE: &str = "1|0,0,0";

/// Two good boxes around a malformed clause
pub const BOXES_WITH_BAD_CLAUSE: &str = "0.5|0,0,0;bad;0.5|1,1,1";

/// Box batch exercising shorthand, three-value size, negative size and colors
pub const MIXED_BOXES: &str = "0.5|0,0,0|gray; 1,2,3|1,0,0; -2|0,1,0|#ff0000";

/// Line batch: with and without trailing color
pub const MIXED_LINES: &str = "0,0,0|1,1,1|red; 0,0,0|1,1,1|2,2,2";

/// Row of `n` unit cubes along +X, one unit apart
pub fn cube_row(n: usize) -> String {
    (0..n)
        .map(|i| format!("1|{},0,0", i * 2))
        .collect::<Vec<_>>()
        .join(";")
}

/// Polyline zig-zag with `n` points in the XY plane
pub fn zigzag(n: usize) -> String {
    (0..n)
        .map(|i| format!("{},{},0", i, i % 2))
        .collect::<Vec<_>>()
        .join("|")
}

/// Empty viewer with default settings
pub fn empty_viewer() -> ViewerState {
    ViewerState::new(ViewerSettings::default())
}

/// Viewer with the default startup boxes and lines loaded
pub fn demo_viewer() -> ViewerState {
    let mut state = empty_viewer();
    state.load_initial_profile();
    state
}
