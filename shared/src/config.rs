use std::default::Default;

/// How a non-owning copy blends its rendered transform toward the last
/// authoritative target each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendMode {
    /// Constant blend factor per tick, whatever the tick duration. This is how
    /// the game has always behaved; it converges faster at higher frame rates.
    FixedPerTick(f32),
    /// Blend factor `1 - exp(-rate * dt)`, independent of the tick rate.
    FrameRateIndependent { rate: f32 },
}

impl BlendMode {
    /// Blend factor for a tick of `dt` seconds, clamped to `[0, 1]`.
    pub fn factor(&self, dt: f32) -> f32 {
        let factor = match self {
            BlendMode::FixedPerTick(factor) => *factor,
            BlendMode::FrameRateIndependent { rate } => 1.0 - (-rate * dt.max(0.0)).exp(),
        };
        factor.clamp(0.0, 1.0)
    }
}

/// Contains Config properties which govern how every copy of a block converges
#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Blend applied to non-owning copies each tick
    pub remote_blend: BlendMode,
    /// Speed at which the owner eases a hovering block toward its hover height
    pub hover_adjust_speed: f32,
    /// Distance (and angle, in radians) under which a converging copy snaps
    /// onto its target
    pub snap_epsilon: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_blend: BlendMode::FixedPerTick(0.1),
            hover_adjust_speed: 10.0,
            snap_epsilon: 1e-4,
        }
    }
}
