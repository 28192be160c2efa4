/// Skips redundant frames while the board is at rest.
///
/// A slide animation changes the picture every tick, so frames are drawn
/// unconditionally while `animating`. At rest the picture only changes when the
/// snapshot fingerprint does; otherwise a refresh is forced at most once per
/// `idle_interval_ms`.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(idle_interval_ms: u64) -> Self {
        Self {
            idle_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Force the next call to render (terminal resize).
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.idle_interval_ms;

        if !self.has_rendered || animating || changed || stale {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
            return true;
        }
        false
    }
}

/// Frame fingerprint: everything that changes the picture at rest.
pub fn frame_fingerprint(board_hash: u64, score: u32, episode_id: u32, finished: bool) -> u64 {
    let mut h = board_hash;
    for word in [score as u64, episode_id as u64, finished as u64] {
        h ^= word;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
