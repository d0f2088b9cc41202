//! Stack height bookkeeping. Three blocks make a floor, and the placement yaw
//! alternates from one floor to the next like the bricks of a real tower.

use glam::Vec3;

pub const BLOCKS_PER_FLOOR: u32 = 3;

/// Orientation for blocks on even floors
pub const EVEN_FLOOR_EULER: Vec3 = Vec3::new(-90.0, 0.0, 0.0);
/// Orientation for blocks on odd floors, turned a quarter around
pub const ODD_FLOOR_EULER: Vec3 = Vec3::new(-90.0, 0.0, 90.0);

pub fn floor_number(dropped_count: u32) -> u32 {
    dropped_count / BLOCKS_PER_FLOOR
}

/// Euler angles (degrees) for the next block placed after `dropped_count` drops
pub fn placement_euler(dropped_count: u32) -> Vec3 {
    if floor_number(dropped_count) % 2 == 0 {
        EVEN_FLOOR_EULER
    } else {
        ODD_FLOOR_EULER
    }
}

/// Whether reaching `dropped_count` just completed a floor
pub fn completes_floor(dropped_count: u32) -> bool {
    dropped_count > 0 && dropped_count % BLOCKS_PER_FLOOR == 0
}
