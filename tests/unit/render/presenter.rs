use super::*;
use crate::{
    layout::{density::Density, generator::generate},
    render::{html::HtmlBackend, parallax::band_translation},
};

#[derive(Debug, Default)]
struct RecordingHost {
    listening: bool,
    listener_removals: usize,
    frame_requests: usize,
    scroll_y: f64,
    translations: Vec<(usize, f64)>,
}

impl FrameHost for RecordingHost {
    fn add_scroll_listener(&mut self) {
        self.listening = true;
    }

    fn remove_scroll_listener(&mut self) {
        self.listening = false;
        self.listener_removals += 1;
    }

    fn request_animation_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn set_band_translation(&mut self, band_index: usize, translate_x_px: f64) {
        self.translations.push((band_index, translate_x_px));
    }
}

fn mounted(seed: &str) -> Presenter<RecordingHost> {
    let layout = generate(seed, Density::Full);
    Presenter::mount_layout(
        &layout,
        TextureCatalog::builtin(),
        &PaintOptions::default(),
        RecordingHost::default(),
    )
    .unwrap()
}

#[test]
fn mount_listens_without_touching_bands() {
    let p = mounted("home");
    assert!(p.host().listening);
    assert_eq!(p.host().frame_requests, 0);
    assert!(p.host().translations.is_empty());
    assert_eq!(p.frame_state(), FrameState::Idle);
    let rest: Vec<f64> = p.plan().bands().map(|b| b.resting_offset_px).collect();
    assert_eq!(p.applied_offsets(), rest.as_slice());
}

#[test]
fn scroll_burst_coalesces_into_one_frame() {
    let mut p = mounted("home");
    let bands = p.plan().bands().count();

    assert_eq!(p.on_scroll(), ScrollDisposition::FrameRequested);
    for i in 1..100 {
        p.host_mut().scroll_y = f64::from(i);
        assert_eq!(p.on_scroll(), ScrollDisposition::Coalesced);
    }
    assert_eq!(p.host().frame_requests, 1);
    assert!(p.host().translations.is_empty());
    assert_eq!(p.frame_state(), FrameState::FrameScheduled);

    p.host_mut().scroll_y = 480.0;
    let update = p.on_animation_frame().unwrap();
    assert_eq!(update.scroll_y, 480.0);
    assert_eq!(update.offsets.len(), bands);
    assert_eq!(p.host().translations.len(), bands);
    assert_eq!(p.frames_applied(), 1);
    assert_eq!(p.frame_state(), FrameState::Idle);

    let rest: Vec<f64> = p.plan().bands().map(|b| b.resting_offset_px).collect();
    for (i, &(band, x)) in p.host().translations.iter().enumerate() {
        assert_eq!(band, i);
        assert_eq!(x, band_translation(rest[i], 480.0, i));
    }
    assert_eq!(p.applied_offsets(), update.offsets.as_slice());
}

#[test]
fn frame_without_request_is_a_no_op() {
    let mut p = mounted("home");
    assert!(p.on_animation_frame().is_none());
    assert!(p.host().translations.is_empty());
    assert_eq!(p.frames_applied(), 0);

    p.on_scroll();
    assert!(p.on_animation_frame().is_some());
    assert!(p.on_animation_frame().is_none());
}

#[test]
fn scroll_after_frame_requests_again() {
    let mut p = mounted("about");
    for round in 1..=3 {
        assert_eq!(p.on_scroll(), ScrollDisposition::FrameRequested);
        assert_eq!(p.on_scroll(), ScrollDisposition::Coalesced);
        p.on_animation_frame().unwrap();
        assert_eq!(p.host().frame_requests, round);
    }
    assert_eq!(p.frames_applied(), 3);
}

#[test]
fn unmount_detaches_listener_and_returns_host() {
    let mut p = mounted("home");
    p.on_scroll();
    let host = p.unmount();
    assert!(!host.listening);
    assert_eq!(host.listener_removals, 1);
    assert_eq!(host.frame_requests, 1);
    assert!(host.translations.is_empty());
}

#[test]
fn paint_goes_through_backend() {
    let p = mounted("home");
    let mut backend = HtmlBackend::default();
    p.paint(&mut backend).unwrap();
    assert_eq!(
        backend.html().matches("collage-glitch-band").count(),
        p.plan().bands().count()
    );
}
