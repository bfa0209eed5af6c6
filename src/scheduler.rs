//! Fixed-rate frame loop with an owned cancellation token.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

/// Shared stop flag. Cloning hands out another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct FrameLoop {
    interval: Duration,
    token: CancelToken,
    frames: u64,
}

impl FrameLoop {
    /// Loop ticking `fps` times per second. `fps` of zero is treated as one.
    pub fn new(fps: u32) -> Self {
        let interval = Duration::from_secs_f64(1.0 / fps.max(1) as f64);
        FrameLoop {
            interval,
            token: CancelToken::new(),
            frames: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Handle that stops the loop before its next frame.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Number of frames run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Call `tick` once per interval until the token is cancelled, `tick`
    /// breaks, or `tick` fails.
    ///
    /// The token is checked before every frame. A frame that overruns the
    /// interval is followed immediately by the next one; missed frames are
    /// not replayed.
    pub fn run<F>(&mut self, mut tick: F) -> Result<()>
    where
        F: FnMut(&CancelToken) -> Result<ControlFlow<()>>,
    {
        let mut next = Instant::now();
        while !self.token.is_cancelled() {
            let flow = tick(&self.token)?;
            self.frames += 1;
            if flow.is_break() {
                self.token.cancel();
                break;
            }

            next += self.interval;
            let now = Instant::now();
            if next > now {
                thread::sleep(next - now);
            } else {
                next = now;
            }
        }
        log::debug!("Frame loop stopped after {} frames", self.frames);
        Ok(())
    }
}
