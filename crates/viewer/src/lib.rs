// Library crate: the registries, scene graph and command protocol, shared by the
// command-line shell and the integration tests.

pub mod command;
pub mod fixtures;
pub mod scene;
pub mod state;
