//! Motion records and the slide animation clock
//!
//! A move produces one [`Motion`] per tile that changes cell. The records live
//! for exactly one animation cycle: the renderer draws each one at
//! `from + (to - from) * progress`, and when the [`Animation`] runs out the
//! engine commits the resolved grid and drops the records.

use crate::types::Position;

/// One tile's slide for the current animation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Motion {
    pub from: Position,
    pub to: Position,
    /// Exponent of the moving tile before any merge
    pub value: u8,
}

impl Motion {
    /// Cell-space position at animation fraction `t` (clamped to [0, 1])
    pub fn lerp(&self, t: f32) -> (f32, f32) {
        let t = t.clamp(0.0, 1.0);
        let fx = self.from.x as f32;
        let fy = self.from.y as f32;
        (
            fx + (self.to.x as f32 - fx) * t,
            fy + (self.to.y as f32 - fy) * t,
        )
    }

    /// Number of cells travelled
    pub fn distance(&self) -> u8 {
        self.from.x.abs_diff(self.to.x) + self.from.y.abs_diff(self.to.y)
    }
}

/// A motion paired with the animation fraction it should be drawn at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionView {
    pub from: Position,
    pub to: Position,
    pub value: u8,
    pub progress: f32,
}

impl MotionView {
    pub fn new(motion: Motion, progress: f32) -> Self {
        Self {
            from: motion.from,
            to: motion.to,
            value: motion.value,
            progress,
        }
    }

    /// Interpolated cell-space position
    pub fn position(&self) -> (f32, f32) {
        Motion {
            from: self.from,
            to: self.to,
            value: self.value,
        }
        .lerp(self.progress)
    }
}

/// Fixed-duration animation clock driven by elapsed milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    duration_ms: u32,
    elapsed_ms: u32,
    active: bool,
}

impl Animation {
    pub fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            elapsed_ms: 0,
            active: false,
        }
    }

    /// Begin a new cycle from zero
    pub fn start(&mut self) {
        self.active = true;
        self.elapsed_ms = 0;
    }

    pub fn stop(&mut self) {
        self.active = false;
        self.elapsed_ms = 0;
    }

    /// Advance the clock. Returns true exactly when this call completes the cycle.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        self.elapsed_ms >= self.duration_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Fraction complete in [0, 1]; 0 when idle
    pub fn progress(&self) -> f32 {
        if !self.active {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(fx: u8, fy: u8, tx: u8, ty: u8) -> Motion {
        Motion {
            from: Position::new(fx, fy),
            to: Position::new(tx, ty),
            value: 1,
        }
    }

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        let m = slide(3, 1, 0, 1);
        assert_eq!(m.lerp(0.0), (3.0, 1.0));
        assert_eq!(m.lerp(1.0), (0.0, 1.0));
        assert_eq!(m.lerp(0.5), (1.5, 1.0));
        assert_eq!(m.lerp(7.0), (0.0, 1.0));
        assert_eq!(m.distance(), 3);
    }

    #[test]
    fn test_motion_view_position_uses_progress() {
        let view = MotionView::new(slide(0, 0, 0, 2), 0.25);
        assert_eq!(view.position(), (0.0, 0.5));
    }

    #[test]
    fn test_animation_cycle() {
        let mut anim = Animation::new(100);
        assert!(!anim.advance(500), "idle clock never completes");
        assert_eq!(anim.progress(), 0.0);

        anim.start();
        assert!(!anim.advance(40));
        assert!((anim.progress() - 0.4).abs() < 1e-6);
        assert!(!anim.advance(59));
        assert!(anim.advance(1));
        assert_eq!(anim.progress(), 1.0);

        anim.stop();
        assert!(!anim.is_active());
        assert_eq!(anim.elapsed_ms(), 0);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut anim = Animation::new(0);
        anim.start();
        assert_eq!(anim.progress(), 1.0);
        assert!(anim.advance(0));
    }
}
