use glam::DVec2;

use crate::types::{Cell, Circle, RadialGlow, Rgb, Rgba, Stroke, Style, Surface, Text};

type Linear = [f64; 3];

fn linear(c: Rgb) -> Linear {
    [c.r as f64, c.g as f64, c.b as f64]
}

fn to_color(c: Linear) -> Rgb {
    let ch = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: ch(c[0]),
        g: ch(c[1]),
        b: ch(c[2]),
    }
}

/// `src` over `dst` with straight alpha.
fn over(dst: Linear, src: Rgba, alpha: f64) -> Linear {
    let a = alpha.clamp(0.0, 1.0);
    [
        src.r as f64 * a + dst[0] * (1.0 - a),
        src.g as f64 * a + dst[1] * (1.0 - a),
        src.b as f64 * a + dst[2] * (1.0 - a),
    ]
}

/// Glyphs only light a thin part of the cell; lift their alpha so faint
/// strokes stay legible.
fn glyph_alpha(alpha: f64) -> f64 {
    alpha.clamp(0.0, 1.0).sqrt()
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Box-drawing character closest to the direction of `d` (y grows down).
fn direction_glyph(d: DVec2) -> char {
    let mut deg = d.y.atan2(d.x).to_degrees();
    if deg < 0.0 {
        deg += 180.0;
    }
    match deg {
        a if !(22.5..157.5).contains(&a) => '─',
        a if a < 67.5 => '╲',
        a if a < 112.5 => '│',
        _ => '╱',
    }
}

struct Glyph {
    ch: char,
    fg: Linear,
}

/// Working grid: one composited background color per cell plus an optional
/// glyph on top.
pub(super) struct Canvas {
    surface: Surface,
    background: Vec<Linear>,
    glyphs: Vec<Option<Glyph>>,
}

impl Canvas {
    pub fn new(surface: Surface, backdrop: Rgb) -> Self {
        let len = surface.columns as usize * surface.rows as usize;
        Canvas {
            surface,
            background: vec![linear(backdrop); len],
            glyphs: (0..len).map(|_| None).collect(),
        }
    }

    fn index(&self, column: u16, row: u16) -> usize {
        row as usize * self.surface.columns as usize + column as usize
    }

    /// Half the cell's extent along unit direction `u` (support of the cell
    /// rectangle). Inflating distances by this tests "does the shape touch
    /// the cell" rather than "does it touch the cell center".
    fn half_extent(&self, u: DVec2) -> f64 {
        0.5 * (u.x.abs() * self.surface.cell_width + u.y.abs() * self.surface.cell_height)
    }

    /// Cells whose centers lie in the pixel box `[min, max]`, clipped to the
    /// surface.
    fn cells_in(&self, min: DVec2, max: DVec2) -> impl Iterator<Item = (u16, u16)> + use<> {
        let s = self.surface;
        let col = |x: f64| (x / s.cell_width - 0.5).ceil().clamp(0.0, s.columns as f64) as u16;
        let row = |y: f64| (y / s.cell_height - 0.5).ceil().clamp(0.0, s.rows as f64) as u16;
        let (c0, c1) = (col(min.x), col(max.x + s.cell_width));
        let (r0, r1) = (row(min.y), row(max.y + s.cell_height));
        (r0..r1.min(s.rows)).flat_map(move |r| (c0..c1.min(s.columns)).map(move |c| (c, r)))
    }

    fn blend(&mut self, column: u16, row: u16, color: Rgba, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let i = self.index(column, row);
        self.background[i] = over(self.background[i], color, alpha);
    }

    fn put_glyph(&mut self, column: u16, row: u16, ch: char, color: Rgba) {
        let i = self.index(column, row);
        let fg = over(self.background[i], color, glyph_alpha(color.a));
        self.glyphs[i] = Some(Glyph { ch, fg });
    }

    pub fn radial_glow(&mut self, glow: &RadialGlow) {
        if glow.radius <= 0.0 || glow.stops.is_empty() {
            return;
        }
        let reach = DVec2::splat(glow.radius);
        let cells: Vec<_> = self.cells_in(glow.center - reach, glow.center + reach).collect();
        for (c, r) in cells {
            let t = self.surface.cell_center(c, r).distance(glow.center) / glow.radius;
            if t > 1.0 {
                continue;
            }
            let color = sample_stops(&glow.stops, t);
            self.blend(c, r, color, color.a);
        }
    }

    pub fn stroke(&mut self, stroke: &Stroke) {
        let min_cell = self.surface.cell_width.min(self.surface.cell_height);
        let half_width = stroke.width / 2.0;
        let blur = stroke.glow.map_or(0.0, |g| g.blur);

        for pair in stroke.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let along = b - a;
            let normal = along.perp().normalize_or_zero();
            let extent = if normal == DVec2::ZERO {
                self.half_extent(DVec2::X)
            } else {
                self.half_extent(normal)
            };
            let core = half_width + extent;
            let pad = DVec2::splat(core + blur + min_cell);
            let cells: Vec<_> = self.cells_in(a.min(b) - pad, a.max(b) + pad).collect();

            for (c, r) in cells {
                let d = segment_distance(self.surface.cell_center(c, r), a, b);
                if let Some(glow) = stroke.glow {
                    if d <= core + glow.blur {
                        let falloff = if d <= core || glow.blur <= 0.0 {
                            1.0
                        } else {
                            1.0 - (d - core) / glow.blur
                        };
                        // Halved: neighbouring segments overlap at joints.
                        self.blend(c, r, glow.color, glow.color.a * falloff * 0.5);
                    }
                }
                if d <= core {
                    self.blend(c, r, stroke.color, stroke.color.a);
                    if stroke.glow.is_none() && d <= extent {
                        self.put_glyph(c, r, direction_glyph(along), stroke.color);
                    }
                }
            }
        }
    }

    pub fn circle(&mut self, circle: &Circle) {
        let pad = DVec2::splat(circle.radius + self.surface.cell_height);
        let cells: Vec<_> = self
            .cells_in(circle.center - pad, circle.center + pad)
            .collect();
        for (c, r) in cells {
            let offset = self.surface.cell_center(c, r) - circle.center;
            let d = offset.length();
            let direction = offset.normalize_or_zero();
            let extent = if direction == DVec2::ZERO {
                self.half_extent(DVec2::X)
            } else {
                self.half_extent(direction)
            };

            if let Some(fill) = circle.fill {
                if d <= extent {
                    // Joint dots are smaller than a cell: mark the cell
                    // holding the center.
                    self.put_glyph(c, r, '●', fill);
                } else if d - extent <= circle.radius {
                    self.blend(c, r, fill, fill.a * 0.5);
                }
            }
            if let Some(outline) = circle.outline {
                if d - extent <= circle.radius && d + extent >= circle.radius {
                    self.blend(c, r, outline, outline.a);
                }
            }
        }
    }

    pub fn text(&mut self, text: &Text) {
        let Some((column, row)) = self.surface.cell_at(text.position) else {
            return;
        };
        for (i, ch) in text.text.chars().enumerate() {
            let c = column as usize + i;
            if c >= self.surface.columns as usize {
                break;
            }
            self.put_glyph(c as u16, row, ch, text.color);
        }
    }

    pub fn into_cells(self) -> Vec<Vec<Cell>> {
        let columns = self.surface.columns as usize;
        let mut glyphs = self.glyphs.into_iter();
        self.background
            .chunks(columns)
            .map(|row| {
                row.iter()
                    .map(|&bg| {
                        let glyph = glyphs.next().flatten();
                        Cell {
                            ch: glyph.as_ref().map_or(' ', |g| g.ch),
                            style: Style {
                                fg: glyph.map(|g| to_color(g.fg)),
                                bg: Some(to_color(bg)),
                            },
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Interpolated gradient color at offset `t`.
fn sample_stops(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let ((t0, c0), (t1, c1)) = (pair[0], pair[1]);
        if t <= t1 {
            let span = t1 - t0;
            let local = if span > 0.0 { (t - t0) / span } else { 1.0 };
            return c0.mix(c1, local);
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Glow, rgba};

    fn surface() -> Surface {
        Surface {
            columns: 20,
            rows: 10,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }

    fn glyph_at(cells: &[Vec<Cell>], column: usize, row: usize) -> char {
        cells[row][column].ch
    }

    #[test]
    fn horizontal_stroke_is_one_row_of_dashes() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.stroke(&Stroke {
            points: vec![DVec2::new(4.0, 40.0), DVec2::new(76.0, 40.0)],
            width: 1.0,
            color: rgba(160, 185, 255, 1.0),
            glow: None,
        });
        let cells = canvas.into_cells();
        for c in 0..10 {
            assert_eq!(glyph_at(&cells, c, 2), '─', "column {c}");
            assert_eq!(glyph_at(&cells, c, 1), ' ');
            assert_eq!(glyph_at(&cells, c, 3), ' ');
        }
        assert_eq!(glyph_at(&cells, 11, 2), ' ');
    }

    #[test]
    fn vertical_stroke_is_one_column_of_bars() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.stroke(&Stroke {
            points: vec![DVec2::new(36.0, 8.0), DVec2::new(36.0, 120.0)],
            width: 1.0,
            color: rgba(255, 255, 255, 1.0),
            glow: None,
        });
        let cells = canvas.into_cells();
        for r in 0..8 {
            assert_eq!(glyph_at(&cells, 4, r), '│', "row {r}");
            assert_eq!(glyph_at(&cells, 3, r), ' ');
            assert_eq!(glyph_at(&cells, 5, r), ' ');
        }
    }

    #[test]
    fn glow_strokes_tint_without_glyphs() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.stroke(&Stroke {
            points: vec![DVec2::new(4.0, 40.0), DVec2::new(76.0, 40.0)],
            width: 6.0,
            color: rgba(44, 77, 228, 0.5),
            glow: Some(Glow {
                color: rgba(44, 77, 228, 0.5),
                blur: 20.0,
            }),
        });
        let cells = canvas.into_cells();
        assert_eq!(glyph_at(&cells, 3, 2), ' ');
        let Some(Rgb { b: on_line, .. }) = cells[2][3].style.bg else {
            panic!("missing background");
        };
        let Some(Rgb { b: halo, .. }) = cells[3][3].style.bg else {
            panic!("missing background");
        };
        let Some(Rgb { b: far, .. }) = cells[8][3].style.bg else {
            panic!("missing background");
        };
        assert!(on_line > halo, "{on_line} <= {halo}");
        assert!(halo > far, "{halo} <= {far}");
        assert_eq!(far, 0);
    }

    #[test]
    fn diagonal_glyphs_follow_screen_direction() {
        assert_eq!(direction_glyph(DVec2::new(1.0, 1.0)), '╲');
        assert_eq!(direction_glyph(DVec2::new(-1.0, -1.0)), '╲');
        assert_eq!(direction_glyph(DVec2::new(1.0, -1.0)), '╱');
        assert_eq!(direction_glyph(DVec2::new(0.0, -3.0)), '│');
        assert_eq!(direction_glyph(DVec2::new(-3.0, 0.0)), '─');
    }

    #[test]
    fn filled_dot_marks_center_cell() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.circle(&Circle {
            center: DVec2::new(44.0, 72.0),
            radius: 2.5,
            fill: Some(rgba(160, 185, 255, 0.6)),
            outline: None,
        });
        let cells = canvas.into_cells();
        assert_eq!(glyph_at(&cells, 5, 4), '●');
        assert_eq!(glyph_at(&cells, 4, 4), ' ');
        assert_eq!(glyph_at(&cells, 5, 3), ' ');
    }

    #[test]
    fn ring_touches_horizontal_neighbours() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.circle(&Circle {
            center: DVec2::new(44.0, 72.0),
            radius: 5.0,
            fill: None,
            outline: Some(rgba(255, 255, 255, 1.0)),
        });
        let cells = canvas.into_cells();
        let white = Some(Rgb { r: 255, g: 255, b: 255 });
        let black = Some(Rgb::BLACK);
        assert_eq!(cells[4][4].style.bg, white);
        assert_eq!(cells[4][6].style.bg, white);
        assert_eq!(cells[4][5].style.bg, black);
        assert_eq!(cells[2][5].style.bg, black);
    }

    #[test]
    fn text_clips_at_right_edge() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.text(&Text {
            position: DVec2::new(150.0, 20.0),
            text: "SINGULARITY".into(),
            color: rgba(180, 40, 40, 0.7),
        });
        canvas.text(&Text {
            position: DVec2::new(-5.0, 20.0),
            text: "gone".into(),
            color: rgba(255, 255, 255, 1.0),
        });
        let cells = canvas.into_cells();
        let row: String = cells[1].iter().map(|c| c.ch).collect();
        assert_eq!(row.trim_end(), format!("{}SI", " ".repeat(18)));
    }

    #[test]
    fn radial_glow_fades_outward() {
        let mut canvas = Canvas::new(surface(), Rgb::BLACK);
        canvas.radial_glow(&RadialGlow {
            center: DVec2::new(84.0, 88.0),
            radius: 40.0,
            stops: vec![(0.0, rgba(0, 0, 200, 1.0)), (1.0, rgba(0, 0, 200, 0.0))],
        });
        let cells = canvas.into_cells();
        let blue = |c: usize, r: usize| match cells[r][c].style.bg {
            Some(Rgb { b, .. }) => b,
            _ => panic!("missing background"),
        };
        assert_eq!(blue(10, 5), 200);
        assert!(blue(12, 5) < 200);
        assert!(blue(12, 5) > blue(14, 5));
        assert_eq!(blue(19, 5), 0);
    }

    #[test]
    fn stop_sampling_interpolates() {
        let stops = [
            (0.0, rgba(0, 0, 0, 0.0)),
            (0.5, rgba(100, 100, 100, 1.0)),
            (1.0, rgba(0, 0, 0, 0.0)),
        ];
        let c = sample_stops(&stops, 0.25);
        assert_eq!((c.r, c.g, c.b), (50, 50, 50));
        assert!((c.a - 0.5).abs() < 1e-12);
        assert_eq!(sample_stops(&stops, 2.0).a, 0.0);
    }
}
