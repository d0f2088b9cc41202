use std::default::Default;

use stacker_shared::{SyncConfig, Vec3};

/// Tuning for the discrete move/push/drop gestures
#[derive(Clone, Debug)]
pub struct InteractionConfig {
    /// Distance a non-hovering block travels per move or push
    pub move_distance: f32,
    /// Lateral distance between the hover slots
    pub slot_distance: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            move_distance: 0.2,
            slot_distance: 1.0,
        }
    }
}

/// Geometry of the tower the boundary trigger and controller work against
#[derive(Clone, Debug)]
pub struct TowerConfig {
    /// Fixed point above the tower where hovering blocks are centred. Only its
    /// horizontal coordinates are used.
    pub hover_anchor: Vec3,
    /// How far above the tallest block top a block hovers
    pub hover_offset: f32,
    /// Height of the surface the tower stands on; used when there is no other
    /// block to rest on
    pub ground_level: f32,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            hover_anchor: Vec3::ZERO,
            hover_offset: 2.0,
            ground_level: 0.0,
        }
    }
}

/// Contains Config properties for the view-following camera rig
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Where the camera looks at when the session starts
    pub initial_target: Vec3,
    /// Seconds each smooth target move takes
    pub transition_time: f32,
    /// How far above the tallest block the camera frames a hovering block
    pub tower_top_offset: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_target: Vec3::ZERO,
            transition_time: 1.0,
            tower_top_offset: 2.0,
        }
    }
}

/// Contains Config properties which will be used by a Participant
#[derive(Clone, Debug, Default)]
pub struct ParticipantConfig {
    /// Used to configure how block copies converge
    pub sync: SyncConfig,
    pub interaction: InteractionConfig,
    pub tower: TowerConfig,
    pub camera: CameraConfig,
}
