//! Player: the terminal host.
//!
//! Turns the terminal into the engine's drawing surface: pumps mouse, focus
//! and resize events into the mailbox, drives the frame loop, and writes
//! each rasterized frame back out. The player makes no animation decisions
//! of its own.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use crossterm::{cursor, execute, queue, style, terminal};
use glam::DVec2;

use crate::config::{Config, KeyBindings, matches_binding};
use crate::engine::{Engine, Mode};
use crate::input::Mailbox;
use crate::menubar::render_menubar;
use crate::renderer::Renderer;
use crate::scheduler::FrameLoop;
use crate::types::{Cell, Frame, Rgb, Style, Surface};

/// Rows reserved above the canvas for the menu bar.
const CANVAS_OFFSET: u16 = 1;
/// Rows reserved below the canvas for the status bar.
const STATUS_ROWS: u16 = 1;
/// Status text color while the arm is singular.
const WARNING: Rgb = Rgb { r: 180, g: 40, b: 40 };

pub struct Player {
    config: Config,
    reduced_motion: bool,
}

impl Player {
    pub fn new(config: Config, reduced_motion: bool) -> Self {
        Player {
            config,
            reduced_motion,
        }
    }

    /// Run the backdrop until the user quits.
    ///
    /// If the terminal cannot be measured, or leaves no room for a canvas,
    /// nothing is started and `Ok` is returned.
    pub fn play(&mut self) -> Result<()> {
        let (columns, rows) = match terminal::size() {
            Ok(size) => size,
            Err(e) => {
                log::warn!("No terminal to draw on ({e}), not starting");
                return Ok(());
            }
        };
        let surface = measure(columns, rows, &self.config);
        if surface.is_empty() {
            log::warn!("Terminal {columns}x{rows} leaves no canvas, not starting");
            return Ok(());
        }

        let mut stdout = io::stdout();
        let session = Session::acquire(&mut stdout)?;
        let result = self.run_loop(&mut stdout, surface);
        drop(session);
        log::info!("Terminal released");
        result
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout, surface: Surface) -> Result<()> {
        let mailbox = Mailbox::new();
        let mut engine = Engine::new(self.config.engine.clone(), surface, self.reduced_motion);
        let mut renderer = Renderer::new(self.config.backdrop());
        let mut controls = Controls::new(self.config.key_bindings.clone());
        let mut frame_loop = FrameLoop::new(self.config.fps);
        let config = &self.config;

        log::info!(
            "Starting at {} fps, reduced motion {}",
            config.fps,
            self.reduced_motion
        );

        render_menubar(stdout, &config.key_bindings)?;

        frame_loop.run(|_| {
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                if controls.handle(event, &mailbox, engine.surface(), config) == Action::Quit {
                    return Ok(ControlFlow::Break(()));
                }
            }

            if controls.paused {
                return Ok(ControlFlow::Continue(()));
            }

            let snapshot = mailbox.take();
            if snapshot.resize.is_some() {
                renderer.invalidate();
                execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                render_menubar(stdout, &config.key_bindings)?;
            }

            let ops = engine.step(snapshot);
            let frame = renderer.render(&ops, engine.surface());
            write_frame(stdout, &frame)?;
            render_status(stdout, &engine, controls.show_status)?;
            stdout.flush()?;
            Ok(ControlFlow::Continue(()))
        })
    }
}

// ---------------------------------------------------------------------------
// Terminal session
// ---------------------------------------------------------------------------

/// Everything acquired from the terminal. Released on drop, so teardown
/// happens on normal return, on error and while unwinding from a panic.
struct Session;

impl Session {
    fn acquire(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, a failure still restores through Drop.
        let session = Session;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            event::EnableFocusChange,
            terminal::Clear(terminal::ClearType::All),
        )?;
        Ok(session)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            event::DisableFocusChange,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
        );
        let _ = terminal::disable_raw_mode();
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Continue,
    Quit,
}

struct Controls {
    bindings: KeyBindings,
    paused: bool,
    show_status: bool,
}

impl Controls {
    fn new(bindings: KeyBindings) -> Self {
        Controls {
            bindings,
            paused: false,
            show_status: true,
        }
    }

    fn handle(&mut self, event: Event, mailbox: &Mailbox, surface: Surface, config: &Config) -> Action {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => return self.handle_key(&key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    mailbox.post_pointer(pointer_position(surface, mouse.column, mouse.row));
                }
                _ => {}
            },
            Event::FocusLost => mailbox.post_leave(),
            Event::Resize(columns, rows) => mailbox.post_resize(measure(columns, rows, config)),
            _ => {}
        }
        Action::Continue
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Action {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || key.code == KeyCode::Esc || matches_binding(&self.bindings.quit, key) {
            return Action::Quit;
        }
        if matches_binding(&self.bindings.pause, key) {
            self.paused = !self.paused;
            log::debug!("Paused: {}", self.paused);
        } else if matches_binding(&self.bindings.toggle_status, key) {
            self.show_status = !self.show_status;
        }
        Action::Continue
    }
}

/// Surface-pixel position of a terminal cell, relative to the canvas.
/// Rows above the canvas map to negative `y`.
fn pointer_position(surface: Surface, column: u16, row: u16) -> DVec2 {
    DVec2::new(
        (column as f64 + 0.5) * surface.cell_width,
        (row as f64 - CANVAS_OFFSET as f64 + 0.5) * surface.cell_height,
    )
}

/// Canvas surface for a terminal of `columns × rows`. Pixel size per cell
/// comes from the terminal when it reports one, else from config.
fn measure(columns: u16, rows: u16, config: &Config) -> Surface {
    let canvas_rows = rows.saturating_sub(CANVAS_OFFSET + STATUS_ROWS);
    let (cell_width, cell_height) = match terminal::window_size() {
        Ok(ws) if ws.width > 0 && ws.height > 0 && ws.columns > 0 && ws.rows > 0 => (
            ws.width as f64 / ws.columns as f64,
            ws.height as f64 / ws.rows as f64,
        ),
        _ => (config.cell_width, config.cell_height),
    };
    Surface {
        columns,
        rows: canvas_rows,
        cell_width,
        cell_height,
    }
}

// ---------------------------------------------------------------------------
// Terminal output
// ---------------------------------------------------------------------------

fn write_frame<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    match frame {
        Frame::Full { cells } => {
            for (y, row) in cells.iter().enumerate() {
                queue!(out, cursor::MoveTo(0, y as u16 + CANVAS_OFFSET))?;
                for cell in row {
                    print_cell(out, cell)?;
                }
            }
        }
        Frame::Diff { changes } => {
            for change in changes {
                queue!(out, cursor::MoveTo(change.x, change.y + CANVAS_OFFSET))?;
                print_cell(out, &change.cell)?;
            }
        }
    }
    Ok(())
}

fn print_cell<W: Write>(out: &mut W, cell: &Cell) -> Result<()> {
    let cs = to_content_style(&cell.style);
    queue!(
        out,
        style::PrintStyledContent(style::StyledContent::new(cs, cell.ch))
    )?;
    Ok(())
}

/// One-line summary of the engine state for the status bar.
pub fn status_line(engine: &Engine) -> String {
    let mode = match engine.mode() {
        Mode::Tracking => "tracking",
        Mode::Idle => "idle",
        Mode::Reduced => "reduced motion",
    };
    let d = engine.diagnostics();
    let angles = d
        .joint_angles
        .iter()
        .enumerate()
        .map(|(i, a)| format!("θ{} {:.0}°", i + 1, a))
        .collect::<Vec<_>>()
        .join(" ");
    let mut status = format!(
        " {mode} | reach {:.2} | {angles}",
        d.reach_ratio,
    );
    if d.singularity() {
        status.push_str(" | SINGULARITY");
    }
    status.push(' ');
    status
}

fn render_status<W: Write>(out: &mut W, engine: &Engine, visible: bool) -> Result<()> {
    let status_y = engine.surface().rows + CANVAS_OFFSET;
    queue!(
        out,
        cursor::MoveTo(0, status_y),
        terminal::Clear(terminal::ClearType::CurrentLine),
    )?;
    if !visible {
        return Ok(());
    }

    let mut line = status_line(engine);
    let width = engine.surface().columns as usize;
    if line.chars().count() > width {
        line = line.chars().take(width).collect();
    }

    let mut cs = style::ContentStyle::default();
    cs.attributes.set(style::Attribute::Dim);
    if engine.diagnostics().singularity() && engine.mode() != Mode::Reduced {
        cs.foreground_color = Some(to_ct_color(WARNING));
    }
    queue!(
        out,
        style::PrintStyledContent(style::StyledContent::new(cs, line)),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    cs.foreground_color = s.fg.map(to_ct_color);
    cs.background_color = s.bg.map(to_ct_color);
    cs
}

pub fn to_ct_color(c: Rgb) -> style::Color {
    style::Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
