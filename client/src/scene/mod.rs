pub mod height_index;
pub mod tower_scene;
