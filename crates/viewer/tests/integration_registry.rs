//! Integration tests for the box and line registries.
//!
//! Drives the viewer through its public API and checks the registries stay in
//! lock-step with the scene graph.

use boxview_lib::fixtures;
use boxview_lib::scene::{ObjectId, Renderable, SceneGraph};
use boxview_lib::state::ViewerState;
use shared::{parse_box, parse_line, BoxDescriptor, LineDescriptor};

/// Scene graph that records every call, for checking the registry contract
/// independently of the draw set.
#[derive(Default)]
struct RecordingScene {
    next: usize,
    live: Vec<ObjectId>,
    log: Vec<String>,
}

impl SceneGraph for RecordingScene {
    fn add_box(&mut self, descriptor: &BoxDescriptor) -> ObjectId {
        self.next += 1;
        let id = format!("box-{}", self.next);
        self.log.push(format!("add {id} {}", descriptor.profile()));
        self.live.push(id.clone());
        id
    }

    fn add_line(&mut self, descriptor: &LineDescriptor) -> ObjectId {
        self.next += 1;
        let id = format!("line-{}", self.next);
        self.log.push(format!("add {id} {}", descriptor.profile()));
        self.live.push(id.clone());
        id
    }

    fn remove(&mut self, id: &ObjectId) -> bool {
        self.log.push(format!("remove {id}"));
        let before = self.live.len();
        self.live.retain(|live| live != id);
        self.live.len() != before
    }

    fn contains(&self, id: &ObjectId) -> bool {
        self.live.contains(id)
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}

fn assert_in_sync<S: SceneGraph>(state: &ViewerState<S>) {
    assert_eq!(state.boxes.objects().len(), state.boxes.profiles().len());
    assert_eq!(state.lines.objects().len(), state.lines.profiles().len());
    for (id, _) in state.boxes.entries().chain(state.lines.entries()) {
        assert!(state.scene.contains(id), "{id} missing from scene");
    }
    assert_eq!(state.scene.len(), state.boxes.len() + state.lines.len());
}

#[test]
fn test_profiles_match_originating_descriptors() {
    let mut state = ViewerState::with_scene(RecordingScene::default(), Default::default());
    state.add_boxes(fixtures::MIXED_BOXES);
    state.add_lines(fixtures::MIXED_LINES);

    for (i, (id, profile)) in state.boxes.entries().enumerate() {
        assert_eq!(state.scene.log[i], format!("add {id} {profile}"));
    }
    assert_eq!(
        state.boxes.profiles(),
        &["0.5|0,0,0|gray", "1,2,3|1,0,0", "-2|0,1,0|#ff0000"]
    );
    assert_in_sync(&state);
}

#[test]
fn test_parallel_invariant_over_mixed_operations() {
    let mut state = ViewerState::with_scene(RecordingScene::default(), Default::default());

    state.add_boxes(&fixtures::cube_row(4));
    assert_in_sync(&state);
    state.delete_last_box();
    assert_in_sync(&state);
    state.add_lines(&format!("{};{}", fixtures::zigzag(3), fixtures::zigzag(5)));
    assert_in_sync(&state);
    state.add_boxes("bad;1|9,9,9");
    assert_in_sync(&state);
    state.delete_last_line();
    assert_in_sync(&state);
    state.refine_boxes().unwrap();
    assert_in_sync(&state);
    assert_eq!(state.boxes.len(), 32);
    state.delete_all_boxes();
    state.delete_all_lines();
    assert_in_sync(&state);
    assert!(state.scene.is_empty());
}

#[test]
fn test_remove_all_unregisters_every_handle() {
    let mut state = ViewerState::with_scene(RecordingScene::default(), Default::default());
    let report = state.add_boxes(&fixtures::cube_row(3));

    assert_eq!(state.delete_all_boxes(), 3);
    for id in &report.added {
        assert!(!state.scene.contains(id));
    }
    // Removed last-first
    let removals: Vec<&String> = state
        .scene
        .log
        .iter()
        .filter(|entry| entry.starts_with("remove"))
        .collect();
    assert_eq!(removals[0], &format!("remove {}", report.added[2]));
    assert_eq!(removals[2], &format!("remove {}", report.added[0]));
}

#[test]
fn test_remove_last_on_empty_is_noop() {
    let mut state = fixtures::empty_viewer();
    assert_eq!(state.delete_last_box(), None);
    assert_eq!(state.delete_last_line(), None);
    assert_eq!(state.delete_all_boxes(), 0);
    assert!(state.boxes.is_empty());
    assert!(state.lines.is_empty());
}

#[test]
fn test_refine_matches_manual_octants() {
    let mut state = fixtures::empty_viewer();
    state.add_boxes(fixtures::UNIT_CUBE);
    state.refine_boxes().unwrap();

    let mut corners: Vec<[f64; 3]> = state
        .boxes
        .profiles()
        .iter()
        .map(|p| parse_box(p).unwrap().origin())
        .collect();
    corners.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let mut expected = Vec::new();
    for x in [0.0, 0.5] {
        for y in [0.0, 0.5] {
            for z in [0.0, 0.5] {
                expected.push([x, y, z]);
            }
        }
    }
    assert_eq!(corners, expected);

    let gray = state
        .boxes
        .profiles()
        .iter()
        .filter(|p| p.ends_with("|gray"))
        .count();
    assert_eq!(gray, 4);
}

#[test]
fn test_refine_twice_yields_64() {
    let mut state = fixtures::empty_viewer();
    state.add_boxes("2,2,2|0,0,0|red");
    state.refine_boxes().unwrap();
    state.refine_boxes().unwrap();
    assert_eq!(state.boxes.len(), 64);
    assert_eq!(state.scene.len(), 64);
    assert!(state.export_boxes().starts_with("0.5,0.5,0.5|0,0,0|gray"));
}

#[test]
fn test_draw_set_places_boxes_by_center() {
    let mut state = fixtures::empty_viewer();
    let report = state.add_boxes("3|0,1,2;1,2,4|-1,-1,-1|gray");

    match state.scene.get(&report.added[0]).unwrap() {
        Renderable::Box { position, .. } => assert_eq!(position.to_array(), [1.5, 2.5, 3.5]),
        other => panic!("Expected box, got {other:?}"),
    }
    match state.scene.get(&report.added[1]).unwrap() {
        Renderable::Box { position, material, .. } => {
            assert_eq!(position.to_array(), [-0.5, 0.0, 1.0]);
            assert_eq!(material.opacity, 0.5);
        }
        other => panic!("Expected box, got {other:?}"),
    }
}

#[test]
fn test_round_trip_through_export() {
    let mut first = fixtures::demo_viewer();
    first.add_lines(&parse_line("0 ,0, 0 | 1,1,1 | blue").unwrap().profile().to_string());

    let boxes = first.export_boxes();
    let lines = first.export_lines();

    let mut second = fixtures::empty_viewer();
    second.add_boxes(&boxes);
    second.add_lines(&lines);
    assert_eq!(second.export_boxes(), boxes);
    assert_eq!(second.export_lines(), lines);
    assert_eq!(second.scene.len(), first.scene.len());
}
