use stacker_shared::Vec3;

/// One of the three lateral positions a hovering block may occupy:
/// `-1` (left), `0` (centre), `1` (right). Moves clamp at the ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverSlot(i8);

impl HoverSlot {
    pub const MIN: i8 = -1;
    pub const MAX: i8 = 1;

    pub fn center() -> Self {
        Self(0)
    }

    pub fn index(&self) -> i8 {
        self.0
    }

    pub fn shift_left(&mut self) {
        self.0 = (self.0 - 1).clamp(Self::MIN, Self::MAX);
    }

    pub fn shift_right(&mut self) {
        self.0 = (self.0 + 1).clamp(Self::MIN, Self::MAX);
    }

    /// Horizontal offset from the hover anchor along `flat_right`
    pub fn offset(&self, flat_right: Vec3, slot_distance: f32) -> Vec3 {
        flat_right * (f32::from(self.0) * slot_distance)
    }
}
