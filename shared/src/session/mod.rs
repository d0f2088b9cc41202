pub mod floor;
pub mod session_state;
