/// Replication lifecycle of a block: `Idle → Hovering → Dropped`.
/// `Hovering → Idle` happens when a hover is cancelled; `Dropped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockLifecycle {
    Idle,
    Hovering,
    Dropped,
}

impl BlockLifecycle {
    pub fn name(&self) -> &'static str {
        match self {
            BlockLifecycle::Idle => "Idle",
            BlockLifecycle::Hovering => "Hovering",
            BlockLifecycle::Dropped => "Dropped",
        }
    }
}

/// How the engine's rigid-body integrator treats the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyMode {
    /// No gravity, moved only by code (while hovering)
    Kinematic,
    /// Driven by the physics simulation
    Simulated,
}

/// Result of applying a `SetHoveringState` update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Entered,
    Left,
    Unchanged,
    /// Re-hovering a dropped block is refused
    Refused,
}
