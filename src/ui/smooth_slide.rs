//! Column-level slide animation with exponential ease-out.
//!
//! When the cursor changes, the whole strip is displaced by
//! `delta × panel width` columns so the panels first appear where they
//! were, then the displacement decays toward zero each tick and the strip
//! glides into its new resting place.

/// Horizontal slide animator for the panel strip.
#[derive(Debug, Clone)]
pub struct SmoothSlide {
    /// Current column displacement.  Positive = strip shifted right of its
    /// resting place (we moved forward); negative = shifted left.
    col_offset: f64,
    /// Cursor seen on the previous `set_target` call.
    prev_target: usize,
    /// Damping: `offset *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothSlide {
    pub fn new(speed: f64, start: usize) -> Self {
        Self {
            col_offset: 0.0,
            prev_target: start,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Feed the new cursor and the panel width in columns.
    pub fn set_target(&mut self, target: usize, panel_width: u16) {
        if target != self.prev_target {
            let delta = target as f64 - self.prev_target as f64;
            self.col_offset += delta * f64::from(panel_width);
            self.prev_target = target;
        }
    }

    /// Jump to `target` without animating.
    pub fn snap(&mut self, target: usize) {
        self.prev_target = target;
        self.col_offset = 0.0;
    }

    /// Decay the offset toward zero.  Call once per frame.
    pub fn tick(&mut self) {
        self.col_offset *= 1.0 - self.speed;
        if self.col_offset.abs() < 0.4 {
            self.col_offset = 0.0;
        }
    }

    /// Current displacement in whole columns.
    pub fn col_offset(&self) -> i32 {
        self.col_offset.round() as i32
    }

    pub fn is_animating(&self) -> bool {
        self.col_offset != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_move_starts_displaced_right_and_settles() {
        let mut s = SmoothSlide::new(0.5, 0);
        s.set_target(1, 40);
        assert_eq!(s.col_offset(), 40);
        s.tick();
        assert_eq!(s.col_offset(), 20);
        for _ in 0..20 {
            s.tick();
        }
        assert_eq!(s.col_offset(), 0);
        assert!(!s.is_animating());
    }

    #[test]
    fn wrap_slides_back_across_the_strip() {
        let mut s = SmoothSlide::new(0.3, 2);
        s.set_target(0, 10);
        assert_eq!(s.col_offset(), -20);
    }

    #[test]
    fn snap_cancels_motion() {
        let mut s = SmoothSlide::new(0.3, 0);
        s.set_target(3, 10);
        s.snap(3);
        assert!(!s.is_animating());
        s.set_target(3, 10);
        assert_eq!(s.col_offset(), 0);
    }
}
