use crate::{
    catalog::texture::TextureCatalog,
    compile::plan::{PaintOptions, PaintPlan, compile_layout},
    foundation::error::CollageResult,
    layout::model::CollageLayout,
    render::{
        backend::{PaintBackend, execute_plan},
        parallax::{FrameGate, FrameState, ParallaxBands},
    },
};

/// Environment a mounted collage runs in: a frame scheduler, a scroll source and the
/// band elements.
pub trait FrameHost {
    /// Start delivering scroll notifications to the presenter.
    fn add_scroll_listener(&mut self);

    /// Stop delivering scroll notifications.
    fn remove_scroll_listener(&mut self);

    /// Ask for one [`Presenter::on_animation_frame`] call before the next repaint.
    fn request_animation_frame(&mut self);

    /// Current vertical scroll offset in pixels.
    fn scroll_y(&self) -> f64;

    /// Set band `band_index`'s horizontal translation.
    fn set_band_translation(&mut self, band_index: usize, translate_x_px: f64);
}

/// Outcome of a scroll notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDisposition {
    /// A frame was requested.
    FrameRequested,
    /// A frame was already pending; nothing was requested.
    Coalesced,
}

/// Translations applied by one animation frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameUpdate {
    /// Scroll offset read when the frame ran.
    pub scroll_y: f64,
    /// Translation per band, by band index.
    pub offsets: Vec<f64>,
}

/// A mounted collage: owns its plan, its host and the scroll-to-parallax state.
///
/// Scroll events never touch the bands directly. The first event after an idle period
/// requests a frame; later events coalesce into it. The frame reads the scroll offset
/// from the host and updates every band once.
#[derive(Debug)]
pub struct Presenter<H: FrameHost> {
    plan: PaintPlan,
    bands: ParallaxBands,
    gate: FrameGate,
    host: H,
    frames_applied: u64,
}

impl<H: FrameHost> Presenter<H> {
    /// Mount a compiled plan and start listening for scroll.
    pub fn mount(plan: PaintPlan, mut host: H) -> Self {
        let bands = ParallaxBands::from_plan(&plan);
        host.add_scroll_listener();
        tracing::debug!(bands = bands.len(), ops = plan.ops.len(), "collage mounted");
        Self {
            plan,
            bands,
            gate: FrameGate::default(),
            host,
            frames_applied: 0,
        }
    }

    /// Compile `layout` and mount the result.
    pub fn mount_layout(
        layout: &CollageLayout,
        catalog: &TextureCatalog,
        opts: &PaintOptions,
        host: H,
    ) -> CollageResult<Self> {
        let plan = compile_layout(layout, catalog, opts)?;
        Ok(Self::mount(plan, host))
    }

    /// The mounted plan.
    pub fn plan(&self) -> &PaintPlan {
        &self.plan
    }

    /// Paint the static plan through `backend`.
    pub fn paint<B: PaintBackend + ?Sized>(&self, backend: &mut B) -> CollageResult<()> {
        execute_plan(backend, &self.plan)
    }

    /// Whether a frame is pending.
    pub fn frame_state(&self) -> FrameState {
        self.gate.state()
    }

    /// Band translations currently on screen.
    pub fn applied_offsets(&self) -> &[f64] {
        self.bands.applied()
    }

    /// Number of frames that updated the bands.
    pub fn frames_applied(&self) -> u64 {
        self.frames_applied
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle a scroll notification.
    pub fn on_scroll(&mut self) -> ScrollDisposition {
        if self.gate.request() {
            self.host.request_animation_frame();
            tracing::trace!("frame requested");
            ScrollDisposition::FrameRequested
        } else {
            ScrollDisposition::Coalesced
        }
    }

    /// Run a requested frame. Returns `None` if no frame was pending.
    pub fn on_animation_frame(&mut self) -> Option<FrameUpdate> {
        if !self.gate.fire() {
            return None;
        }
        let scroll_y = self.host.scroll_y();
        let offsets = self.bands.recompute(scroll_y).to_vec();
        for (i, &x) in offsets.iter().enumerate() {
            self.host.set_band_translation(i, x);
        }
        self.frames_applied += 1;
        tracing::trace!(scroll_y, bands = offsets.len(), "bands translated");
        Some(FrameUpdate { scroll_y, offsets })
    }

    /// Stop listening for scroll and hand the host back.
    ///
    /// A frame still pending in the host is dropped with the presenter.
    pub fn unmount(self) -> H {
        let Presenter {
            mut host,
            frames_applied,
            ..
        } = self;
        host.remove_scroll_listener();
        tracing::debug!(frames_applied, "collage unmounted");
        host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/presenter.rs"]
mod tests;
