use super::*;
use crate::layout::gpt::build_layout;
use crate::layout::model::ModelShape;
use crate::render::state::{DrawCmd, TextOpts};
use crate::foundation::core::Vec3;
use crate::walkthrough::phase::Phase;

fn parts() -> (Layout, RenderState, WalkthroughState) {
    (
        build_layout(ModelShape::default(), None),
        RenderState::default(),
        WalkthroughState::new(Phase::IntroOverview, 0.0),
    )
}

#[test]
fn identical_frames_share_a_fingerprint() {
    let (l, r, w) = parts();
    assert_eq!(fingerprint_frame(&l, &r, &w), fingerprint_frame(&l, &r, &w));
}

#[test]
fn block_mutations_change_the_fingerprint() {
    let (mut l, r, w) = parts();
    let before = fingerprint_frame(&l, &r, &w);
    let resid = l.residual0;
    l.get_mut(resid).unwrap().highlight = 0.2;
    assert_ne!(fingerprint_frame(&l, &r, &w), before);
}

#[test]
fn draw_list_and_markers_change_the_fingerprint() {
    let (l, mut r, mut w) = parts();
    let base = fingerprint_frame(&l, &r, &w);
    r.draw.push(DrawCmd::Text {
        text: "hi".to_owned(),
        pos: Vec3::ZERO,
        opts: TextOpts::default(),
    });
    let with_text = fingerprint_frame(&l, &r, &w);
    assert_ne!(with_text, base);
    w.times.push(crate::timeline::commentary::TimeInfo {
        name: "t".to_owned(),
        time: 1.0,
    });
    assert_ne!(fingerprint_frame(&l, &r, &w), with_text);
}

#[test]
fn display_is_32_hex_digits() {
    let fp = FrameFingerprint { hi: 1, lo: 255 };
    assert_eq!(fp.to_string(), "000000000000000100000000000000ff");
}
