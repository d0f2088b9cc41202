use glam::Vec3;

/// Values a `TimedTransition` can blend between
pub trait Interpolate: Copy {
    fn interpolate(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolate for Vec3 {
    fn interpolate(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

/// A linear move from one value to another over a fixed duration, advanced
/// by an external clock. Starting a new move cancels the one in progress and
/// departs from wherever the value currently is.
#[derive(Debug, Clone)]
pub struct TimedTransition<T: Interpolate> {
    start: T,
    end: T,
    current: T,
    duration: f32,
    progress: f32,
}

impl<T: Interpolate> TimedTransition<T> {
    /// A transition at rest on `value`
    pub fn at_rest(value: T) -> Self {
        Self {
            start: value,
            end: value,
            current: value,
            duration: 0.0,
            progress: 1.0,
        }
    }

    /// Head for `end` over `duration` seconds, starting from the current value
    pub fn retarget(&mut self, end: T, duration: f32) {
        self.start = self.current;
        self.end = end;
        self.duration = duration;
        self.progress = 0.0;
        if duration <= 0.0 {
            self.finish();
        }
    }

    /// Jump straight to `value`, cancelling any move in progress
    pub fn snap(&mut self, value: T) {
        *self = Self::at_rest(value);
    }

    /// Advance by `dt` seconds and return the new value
    pub fn tick(&mut self, dt: f32) -> T {
        if self.is_active() {
            self.progress += dt.max(0.0) / self.duration;
            if self.progress >= 1.0 {
                self.finish();
            } else {
                self.current = T::interpolate(self.start, self.end, self.progress);
            }
        }
        self.current
    }

    pub fn value(&self) -> T {
        self.current
    }

    /// Where the transition is heading (or resting)
    pub fn target(&self) -> T {
        self.end
    }

    pub fn is_active(&self) -> bool {
        self.progress < 1.0
    }

    fn finish(&mut self) {
        self.progress = 1.0;
        self.current = self.end;
    }
}
