/// Probabilities applied to every block call on its way to each recipient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkConditionerConfig {
    /// Chance that a recipient never gets the call
    pub loss: f32,
    /// Chance that a recipient gets the call twice in a row
    pub duplicate: f32,
}

impl LinkConditionerConfig {
    pub fn new(loss: f32, duplicate: f32) -> Self {
        Self { loss, duplicate }
    }

    /// A link that loses about one call in ten
    pub fn lossy() -> Self {
        Self::new(0.1, 0.0)
    }

    /// A link that loses some calls and repeats others
    pub fn poor() -> Self {
        Self::new(0.2, 0.1)
    }

    /// How many copies of a call a recipient should receive: 0, 1 or 2
    pub(crate) fn copies(&self, rng: &mut fastrand::Rng) -> usize {
        if rng.f32() < self.loss {
            return 0;
        }
        if rng.f32() < self.duplicate {
            return 2;
        }
        1
    }
}
