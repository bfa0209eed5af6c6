use glam::DVec2;

/// Simulated time added per frame, independent of wall-clock frame timing.
pub const FRAME_DT: f64 = 0.016;

/// Where the smoothed cursor rests before a pointer has ever been seen.
pub const OFF_SURFACE: DVec2 = DVec2::new(-1000.0, -1000.0);

/// The sentinel sits left of the surface, so anything at `x <= 0` is
/// treated as "no cursor".
pub fn on_surface(p: DVec2) -> bool {
    p.x > 0.0
}

/// One exponential smoothing step of `current` toward `raw`.
pub fn smooth(current: DVec2, raw: DVec2, lerp: f64) -> DVec2 {
    current + (raw - current) * lerp
}

/// Lissajous sway above the anchor used while no cursor is around.
pub fn idle_target(anchor: DVec2, t: f64) -> DVec2 {
    DVec2::new(
        anchor.x + (t * 0.3).sin() * 120.0,
        anchor.y - 180.0 + (t * 0.22).cos() * 60.0,
    )
}
