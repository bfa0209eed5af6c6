//! Frame-by-frame behavior of the engine through its public API.

use approx::assert_abs_diff_eq;
use blueprint_arm::engine::{Engine, EngineConfig, Mode};
use blueprint_arm::input::{Mailbox, Pointer, Snapshot};
use blueprint_arm::renderer::{Renderer, Rgb};
use blueprint_arm::types::{DrawCommand, Frame, Surface};
use glam::DVec2;

/// 1000 x 1000 px at one pixel per cell, anchored at (500, 500).
fn surface() -> Surface {
    Surface {
        columns: 1000,
        rows: 1000,
        cell_width: 1.0,
        cell_height: 1.0,
    }
}

fn pointer_at(x: f64, y: f64) -> Snapshot {
    Snapshot {
        pointer: Pointer::Present(DVec2::new(x, y)),
        resize: None,
    }
}

#[test]
fn arm_settles_on_a_held_pointer() {
    let target = DVec2::new(500.0, 800.0);
    let mut engine = Engine::new(EngineConfig::default(), surface(), false);
    assert_eq!(engine.anchor(), DVec2::new(500.0, 500.0));

    for _ in 0..400 {
        engine.update(pointer_at(target.x, target.y));
    }

    assert_eq!(engine.mode(), Mode::Tracking);
    assert_eq!(engine.chain().base(), Some(engine.anchor()));
    assert!(engine.chain().end_effector().unwrap().distance(target) < 2.0);
    for pair in engine.chain().joints().windows(2) {
        assert_abs_diff_eq!(pair[0].distance(pair[1]), 210.0, epsilon = 0.01);
    }
}

#[test]
fn idle_arm_never_loses_its_base() {
    let mut engine = Engine::new(EngineConfig::default(), surface(), false);
    for _ in 0..600 {
        engine.update(Snapshot::default());
        assert_eq!(engine.chain().base(), Some(DVec2::new(500.0, 500.0)));
        assert!(engine.chain().joints().iter().all(|j| j.is_finite()));
    }
    assert_eq!(engine.mode(), Mode::Idle);
    assert_abs_diff_eq!(engine.time(), 600.0 * 0.016, epsilon = 1e-9);
}

#[test]
fn mailbox_feeds_the_engine() {
    let mailbox = Mailbox::new();
    let mut engine = Engine::new(EngineConfig::default(), surface(), false);

    mailbox.post_pointer(DVec2::new(300.0, 200.0));
    for _ in 0..300 {
        engine.update(mailbox.take());
    }
    assert_eq!(engine.pointer(), Pointer::Present(DVec2::new(300.0, 200.0)));
    assert!(engine.smoothed().distance(DVec2::new(300.0, 200.0)) < 0.01);

    mailbox.post_leave();
    engine.update(mailbox.take());
    assert_eq!(engine.pointer(), Pointer::Absent);
    assert_eq!(engine.mode(), Mode::Tracking);
}

#[test]
fn resize_moves_the_anchor() {
    let mailbox = Mailbox::new();
    let mut engine = Engine::new(EngineConfig::default(), surface(), false);
    let wide = Surface {
        columns: 1600,
        rows: 900,
        cell_width: 1.0,
        cell_height: 1.0,
    };
    mailbox.post_resize(wide);
    engine.update(mailbox.take());
    assert_eq!(engine.anchor(), DVec2::new(800.0, 450.0));
    assert_eq!(engine.chain().base(), Some(DVec2::new(800.0, 450.0)));

    // The resize is consumed; the next snapshot carries none.
    assert_eq!(mailbox.take().resize, None);
}

#[test]
fn frames_render_full_then_diff() {
    let small = Surface {
        columns: 80,
        rows: 24,
        cell_width: 8.0,
        cell_height: 16.0,
    };
    let mut engine = Engine::new(EngineConfig::default(), small, false);
    let mut renderer = Renderer::new(Rgb::BLACK);

    // The smoothed cursor is still gliding in from off-surface, so the
    // back layer is the arm rather than the ambient glow.
    let ops = engine.step(pointer_at(400.0, 200.0));
    assert_eq!(engine.mode(), Mode::Idle);
    assert!(matches!(ops.first(), Some(DrawCommand::Stroke(_))));
    match renderer.render(&ops, small) {
        Frame::Full { cells } => assert_eq!(cells.len(), 24),
        Frame::Diff { .. } => panic!("first frame must be full"),
    }

    let mut ops = engine.step(pointer_at(400.0, 200.0));
    assert!(matches!(renderer.render(&ops, small), Frame::Diff { .. }));

    while engine.mode() != Mode::Tracking {
        ops = engine.step(pointer_at(400.0, 200.0));
    }
    assert!(matches!(ops.first(), Some(DrawCommand::RadialGlow(_))));
}
