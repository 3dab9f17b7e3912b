//! JSON command protocol.
//!
//! One command per user-facing operation; the CLI and tests drive the viewer
//! through it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::scene::SceneGraph;
use crate::state::ViewerState;

fn default_frames() -> u32 {
    1
}

/// A command the viewer can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Parse a box batch and add the well-formed clauses
    AddBoxes {
        profile: String,
    },
    /// Parse a line batch and add the well-formed clauses
    AddLines {
        profile: String,
    },
    ExportBoxes,
    ExportLines,
    DeleteLastBox,
    DeleteLastLine,
    DeleteAllBoxes,
    DeleteAllLines,
    /// Replace every box with its 8 octants
    RefineBoxes,
    /// Inspect the scene: registries and camera
    Inspect,
    CameraReset,
    CameraAxisAlign,
    ChangeCameraMode,
    SetAutoRotate {
        active: bool,
    },
    ChangeRotateDirection,
    SetRotateRadius {
        radius: f32,
    },
    SetRotateSpeed {
        speed: f32,
    },
    /// Write the current settings to `path`, or to the user config dir
    SaveSettings {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Advance the camera by a number of frames
    Tick {
        #[serde(default = "default_frames")]
        frames: u32,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Execute a single command on the viewer.
pub fn execute_command<S: SceneGraph>(state: &mut ViewerState<S>, cmd: ViewerCommand) -> CommandResponse {
    match cmd {
        ViewerCommand::AddBoxes { profile } => {
            CommandResponse::ok_with_data(state.add_boxes(&profile).to_json())
        }

        ViewerCommand::AddLines { profile } => {
            CommandResponse::ok_with_data(state.add_lines(&profile).to_json())
        }

        ViewerCommand::ExportBoxes => {
            CommandResponse::ok_with_data(serde_json::json!({ "profile": state.export_boxes() }))
        }

        ViewerCommand::ExportLines => {
            CommandResponse::ok_with_data(serde_json::json!({ "profile": state.export_lines() }))
        }

        ViewerCommand::DeleteLastBox => {
            let removed = state.delete_last_box();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        ViewerCommand::DeleteLastLine => {
            let removed = state.delete_last_line();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        ViewerCommand::DeleteAllBoxes => {
            let removed = state.delete_all_boxes();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        ViewerCommand::DeleteAllLines => {
            let removed = state.delete_all_lines();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        ViewerCommand::RefineBoxes => match state.refine_boxes() {
            Ok(report) => CommandResponse::ok_with_data(report.to_json()),
            Err(e) => {
                tracing::error!("Refine failed: {e}");
                CommandResponse::err(format!("Refine failed: {e}"))
            }
        },

        ViewerCommand::Inspect => {
            let camera = &state.camera;
            CommandResponse::ok_with_data(serde_json::json!({
                "box_count": state.boxes.len(),
                "line_count": state.lines.len(),
                "scene_objects": state.scene.len(),
                "boxes": state.boxes.profiles(),
                "lines": state.lines.profiles(),
                "camera": {
                    "mode": camera.mode,
                    "position": camera.position.to_array(),
                    "target": camera.target.to_array(),
                    "up": camera.up.to_array(),
                    "auto_rotate": camera.auto_rotate,
                },
            }))
        }

        ViewerCommand::CameraReset => {
            state.camera.reset();
            CommandResponse::ok()
        }

        ViewerCommand::CameraAxisAlign => {
            state.camera.axis_align();
            CommandResponse::ok()
        }

        ViewerCommand::ChangeCameraMode => {
            let mode = state.camera.toggle_mode();
            tracing::info!("Camera mode: {}", mode.display_name());
            CommandResponse::ok_with_data(serde_json::json!({ "mode": mode }))
        }

        ViewerCommand::SetAutoRotate { active } => {
            state.camera.set_auto_rotate(active);
            CommandResponse::ok_with_data(serde_json::json!({ "active": active }))
        }

        ViewerCommand::ChangeRotateDirection => {
            state.camera.change_rotate_direction();
            CommandResponse::ok_with_data(
                serde_json::json!({ "direction": state.camera.auto_rotate.direction }),
            )
        }

        ViewerCommand::SetRotateRadius { radius } => {
            let radius = state.camera.set_rotate_radius(radius);
            CommandResponse::ok_with_data(serde_json::json!({ "radius": radius }))
        }

        ViewerCommand::SetRotateSpeed { speed } => {
            let speed = state.camera.set_rotate_speed(speed);
            CommandResponse::ok_with_data(serde_json::json!({ "speed": speed }))
        }

        ViewerCommand::SaveSettings { path } => {
            let saved = match path {
                Some(path) => state.settings.save_to(&path).map(|()| path),
                None => state.settings.save(),
            };
            match saved {
                Ok(path) => {
                    tracing::info!("Saved settings to {}", path.display());
                    CommandResponse::ok_with_data(serde_json::json!({ "path": path }))
                }
                Err(e) => CommandResponse::err(e),
            }
        }

        ViewerCommand::Tick { frames } => {
            for _ in 0..frames {
                state.tick();
            }
            CommandResponse::ok_with_data(serde_json::json!({
                "position": state.camera.position.to_array(),
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json<S: SceneGraph>(state: &mut ViewerState<S>, json: &str) -> Result<CommandResponse, String> {
    let cmd: ViewerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(state, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch<S: SceneGraph>(
    state: &mut ViewerState<S>,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ViewerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(state, cmd))
        .collect())
}
