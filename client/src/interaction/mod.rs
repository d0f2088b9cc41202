pub mod boundary;
pub mod controller;
pub mod hover_slot;
