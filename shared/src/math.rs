//! Transform helpers matching the engine's conventions: Euler angles are in
//! degrees and compose as Z, then X, then Y.

use glam::{EulerRot, Quat, Vec3};

pub fn quat_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Projects a direction onto the ground plane and normalizes it. A vertical
/// direction yields `Vec3::ZERO`.
pub fn flatten_direction(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero()
}

/// Top surface height of a block centred at `center_y`.
pub fn top_surface(center_y: f32, half_height: f32) -> f32 {
    center_y + half_height
}
