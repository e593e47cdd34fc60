use crate::compile::plan::PaintPlan;

/// Scroll-to-translation rate for band `index`.
///
/// Even bands move with the scroll, odd bands against it; magnitude grows by 0.15 per band.
pub fn band_rate(index: usize) -> f64 {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    sign * (0.3 + index as f64 * 0.15)
}

/// Horizontal translation of band `index` at vertical scroll `scroll_y`.
pub fn band_translation(resting_offset_px: f64, scroll_y: f64, index: usize) -> f64 {
    resting_offset_px + scroll_y * band_rate(index)
}

/// Frame scheduling state of a mounted collage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameState {
    /// No frame pending; the next scroll event requests one.
    #[default]
    Idle,
    /// A frame was requested and has not run yet; scroll events are coalesced.
    FrameScheduled,
}

/// Single-flight gate: at most one frame is outstanding at a time.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FrameGate {
    state: FrameState,
}

impl FrameGate {
    pub(crate) fn state(&self) -> FrameState {
        self.state
    }

    /// Returns `true` when the caller must request a frame.
    pub(crate) fn request(&mut self) -> bool {
        match self.state {
            FrameState::Idle => {
                self.state = FrameState::FrameScheduled;
                true
            }
            FrameState::FrameScheduled => false,
        }
    }

    /// Returns `true` when a scheduled frame should be processed.
    pub(crate) fn fire(&mut self) -> bool {
        match self.state {
            FrameState::Idle => false,
            FrameState::FrameScheduled => {
                self.state = FrameState::Idle;
                true
            }
        }
    }
}

/// Resting and last-applied translations for every band of a plan.
#[derive(Clone, Debug, Default)]
pub struct ParallaxBands {
    resting: Vec<f64>,
    applied: Vec<f64>,
}

impl ParallaxBands {
    /// Bands of `plan`, indexed by band index.
    pub fn from_plan(plan: &PaintPlan) -> Self {
        let mut resting = vec![0.0; plan.bands().count()];
        for b in plan.bands() {
            if let Some(slot) = resting.get_mut(b.band_index) {
                *slot = b.resting_offset_px;
            }
        }
        let applied = resting.clone();
        Self { resting, applied }
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.resting.len()
    }

    /// `true` when the plan has no bands.
    pub fn is_empty(&self) -> bool {
        self.resting.is_empty()
    }

    /// Resting offsets, by band index.
    pub fn resting(&self) -> &[f64] {
        &self.resting
    }

    /// Translations as of the last [`ParallaxBands::recompute`], or the resting offsets.
    pub fn applied(&self) -> &[f64] {
        &self.applied
    }

    /// Recompute every band's translation for `scroll_y`.
    pub fn recompute(&mut self, scroll_y: f64) -> &[f64] {
        for (i, (applied, rest)) in self.applied.iter_mut().zip(&self.resting).enumerate() {
            *applied = band_translation(*rest, scroll_y, i);
        }
        &self.applied
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/parallax.rs"]
mod tests;
