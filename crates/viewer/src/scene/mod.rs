//! Scene graph seam.
//!
//! Registries create renderable objects through [`SceneGraph`] and only keep the
//! returned handles. [`DrawSet`] is the bundled in-memory implementation.

mod draw_set;
pub mod mesh;
pub mod palette;

pub use draw_set::{DrawSet, Material, Renderable, SceneHelpers};

use shared::{BoxDescriptor, LineDescriptor, ProfileItem};

/// Handle of a renderable object in a scene graph
pub type ObjectId = String;

/// Draw set of a renderer: creates objects from descriptors and removes them by handle
pub trait SceneGraph {
    fn add_box(&mut self, descriptor: &BoxDescriptor) -> ObjectId;

    fn add_line(&mut self, descriptor: &LineDescriptor) -> ObjectId;

    /// Remove an object, returning whether it was present
    fn remove(&mut self, id: &ObjectId) -> bool;

    fn contains(&self, id: &ObjectId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Descriptor kinds a scene graph knows how to render
pub trait Placeable: ProfileItem {
    fn place<S: SceneGraph + ?Sized>(&self, scene: &mut S) -> ObjectId;
}

impl Placeable for BoxDescriptor {
    fn place<S: SceneGraph + ?Sized>(&self, scene: &mut S) -> ObjectId {
        scene.add_box(self)
    }
}

impl Placeable for LineDescriptor {
    fn place<S: SceneGraph + ?Sized>(&self, scene: &mut S) -> ObjectId {
        scene.add_line(self)
    }
}
