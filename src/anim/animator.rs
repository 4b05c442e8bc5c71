//! Anim domain: timed sprite-frame playback.

use bevy::prelude::*;

/// Frame-indexed sprite playback with per-instance fps.
///
/// The timer must *strictly* exceed the frame interval before a frame
/// advances, and the excess is dropped rather than carried over. Non-looping
/// animators latch `exhausted` once the frame index passes `max_frame`;
/// looping animators wrap and never exhaust.
#[derive(Component, Debug, Clone)]
pub struct SpriteAnimator {
    pub frame: u32,
    pub max_frame: u32,
    pub fps: f32,
    pub frame_timer_ms: f32,
    pub looping: bool,
    pub exhausted: bool,
    /// Sheet row this animator plays from.
    pub row: u32,
    /// Columns in the bound sheet, for atlas index math.
    pub columns: u32,
}

impl SpriteAnimator {
    pub fn new(max_frame: u32, fps: f32, looping: bool) -> Self {
        assert!(fps > 0.0, "animator fps must be positive, got {fps}");
        Self {
            frame: 0,
            max_frame,
            fps,
            frame_timer_ms: 0.0,
            looping,
            exhausted: false,
            row: 0,
            columns: max_frame + 1,
        }
    }

    pub fn with_sheet(mut self, row: u32, columns: u32) -> Self {
        self.row = row;
        self.columns = columns;
        self
    }

    pub fn frame_interval_ms(&self) -> f32 {
        1000.0 / self.fps
    }

    pub fn advance(&mut self, delta_ms: f32) {
        if self.exhausted {
            return;
        }
        self.frame_timer_ms += delta_ms;
        if self.frame_timer_ms > self.frame_interval_ms() {
            self.frame += 1;
            self.frame_timer_ms = 0.0;
            if self.frame > self.max_frame {
                if self.looping {
                    self.frame = 0;
                } else {
                    self.exhausted = true;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.frame_timer_ms = 0.0;
        self.exhausted = false;
    }

    /// Rebind to another row of the same sheet, restarting playback.
    pub fn rebind(&mut self, row: u32, max_frame: u32, fps: f32, looping: bool) {
        assert!(fps > 0.0, "animator fps must be positive, got {fps}");
        self.row = row;
        self.max_frame = max_frame;
        self.fps = fps;
        self.looping = looping;
        self.reset();
    }

    pub fn on_last_frame(&self) -> bool {
        self.frame >= self.max_frame
    }

    pub fn atlas_index(&self) -> usize {
        (self.row * self.columns + self.frame.min(self.max_frame)) as usize
    }
}

/// Tag for transient entities that delete themselves once playback ends.
#[derive(Component, Debug)]
pub struct DespawnOnExhaust;

pub(crate) fn advance_animators(
    time: Res<Time>,
    mut query: Query<(&mut SpriteAnimator, &mut Sprite)>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    for (mut animator, mut sprite) in &mut query {
        animator.advance(delta_ms);
        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            atlas.index = animator.atlas_index();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_requires_strictly_exceeding_interval() {
        // fps=10 -> interval=100ms
        let mut anim = SpriteAnimator::new(5, 10.0, false);
        anim.advance(100.0);
        assert_eq!(anim.frame, 0, "timer equal to interval must not advance");
        anim.advance(0.001);
        assert_eq!(anim.frame, 1);
        assert_eq!(anim.frame_timer_ms, 0.0, "excess time is dropped");
    }

    #[test]
    fn exhaust_latches_and_frame_stays_bounded() {
        let mut anim = SpriteAnimator::new(2, 10.0, false);
        for _ in 0..20 {
            anim.advance(101.0);
            assert!(anim.frame <= anim.max_frame + 1);
        }
        assert!(anim.exhausted);
        assert_eq!(anim.frame, anim.max_frame + 1);
        // Sticky: further advances change nothing.
        anim.advance(1000.0);
        assert!(anim.exhausted);
        assert_eq!(anim.frame, anim.max_frame + 1);
    }

    #[test]
    fn exhausted_iff_frame_exceeds_max() {
        let mut anim = SpriteAnimator::new(1, 10.0, false);
        anim.advance(101.0);
        assert_eq!(anim.frame, 1);
        assert!(!anim.exhausted, "reaching max_frame is not exhaustion");
        anim.advance(101.0);
        assert!(anim.exhausted);
    }

    #[test]
    fn looping_wraps_without_exhausting() {
        let mut anim = SpriteAnimator::new(1, 10.0, true);
        for _ in 0..10 {
            anim.advance(101.0);
        }
        assert!(!anim.exhausted);
        assert!(anim.frame <= anim.max_frame);
    }

    #[test]
    fn atlas_index_clamps_past_the_end() {
        let mut anim = SpriteAnimator::new(3, 10.0, false).with_sheet(2, 8);
        for _ in 0..6 {
            anim.advance(101.0);
        }
        assert_eq!(anim.atlas_index(), 2 * 8 + 3);
    }

    #[test]
    fn rebind_restarts_playback() {
        let mut anim = SpriteAnimator::new(4, 10.0, false);
        anim.advance(101.0);
        anim.rebind(3, 7, 20.0, true);
        assert_eq!(anim.frame, 0);
        assert_eq!(anim.row, 3);
        assert!(!anim.exhausted);
    }
}
