//! Dedicated simulation thread and the host-side handle that feeds it

use crate::message::{BoxedSurface, Message};
use crate::state::SimulationState;
use mote_core::{HoverFlags, SimConfig};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Host-side handle to a running worker. Messages are delivered in order;
/// sends after the worker stopped are dropped silently. Dropping the handle
/// closes the channel and joins the thread.
pub struct Host {
    sender: Option<Sender<Message>>,
    thread: Option<JoinHandle<()>>,
}

impl Host {
    /// Spawn the worker thread. It idles until [`Host::init`].
    pub fn spawn() -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("mote-worker".to_string())
            .spawn(move || run(receiver))?;
        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
        })
    }

    pub fn send(&self, message: Message) {
        let Some(sender) = &self.sender else {
            return;
        };
        if let Err(mpsc::SendError(message)) = sender.send(message) {
            log::debug!("Worker gone, dropping {message:?}");
        }
    }

    pub fn init(&self, surface: BoxedSurface, config: SimConfig) {
        self.send(Message::Init { surface, config });
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.send(Message::Resize { width, height });
    }

    pub fn hover(&self, flags: HoverFlags) {
        self.send(Message::Hover(flags));
    }

    pub fn dispose(&self) {
        self.send(Message::Dispose);
    }

    /// Whether the worker thread has exited
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, |t| t.is_finished())
    }

    /// Close the channel and wait for the worker to exit
    pub fn join(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.sender = None;
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Worker thread panicked");
            }
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Worker loop: wait for `Init`, then alternate between handling messages
/// and producing frames at the configured rate until `Dispose` or until the
/// host hangs up.
fn run(receiver: Receiver<Message>) {
    let Some(mut state) = wait_for_init(&receiver) else {
        return;
    };

    let frame_interval = Duration::from_secs_f64(1.0 / state.config().frame_rate as f64);
    let mut deadline = Instant::now();
    if let Err(e) = state.frame_realtime() {
        log::warn!("Frame failed: {e}");
    }

    loop {
        deadline += frame_interval;
        let now = Instant::now();
        if deadline < now {
            deadline = now;
        }
        // Drain messages until the next frame is due
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            match receiver.recv_timeout(timeout) {
                Ok(message) => {
                    if !state.handle(message) {
                        return;
                    }
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    state.dispose();
                    return;
                }
            }
        }
        if let Err(e) = state.frame_realtime() {
            log::warn!("Frame failed: {e}");
        }
    }
}

/// Block until an `Init` with a usable surface arrives. Messages before it
/// are ignored.
fn wait_for_init(receiver: &Receiver<Message>) -> Option<SimulationState> {
    loop {
        match receiver.recv().ok()? {
            Message::Init { surface, config } => {
                let mut state = SimulationState::new(config);
                match state.attach_surface(surface) {
                    Ok(()) => return Some(state),
                    Err(e) => {
                        log::warn!("Surface unavailable, animation not started: {e}");
                        state.dispose();
                    }
                }
            }
            Message::Dispose => return None,
            other => log::debug!("Ignoring {other:?} before init"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mote_core::ShapeKey;
    use mote_render::{DotSprite, Framebuffer, RenderError, Surface};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    struct Counting {
        inner: Framebuffer,
        frames: Arc<AtomicU64>,
        refuse: bool,
    }

    impl Counting {
        fn boxed(frames: &Arc<AtomicU64>, refuse: bool) -> BoxedSurface {
            Box::new(Self {
                inner: Framebuffer::new(),
                frames: frames.clone(),
                refuse,
            })
        }
    }

    impl Surface for Counting {
        fn configure(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
            if self.refuse {
                return Err(RenderError::UnsupportedSurface { width, height });
            }
            self.inner.configure(width, height)
        }
        fn size(&self) -> (u32, u32) {
            self.inner.size()
        }
        fn clear(&mut self) {
            self.inner.clear()
        }
        fn stamp(&mut self, sprite: &DotSprite, x: f32, y: f32, opacity: f32) {
            self.inner.stamp(sprite, x, y, opacity)
        }
        fn present(&mut self) -> Result<(), RenderError> {
            self.frames.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn small_config() -> SimConfig {
        SimConfig {
            width: 200.0,
            height: 120.0,
            particle_count: 100,
            frame_rate: 200.0,
            seed: Some(5),
            ..Default::default()
        }
    }

    fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < Duration::from_secs(5) {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_produces_frames_until_dispose() {
        let frames = Arc::new(AtomicU64::new(0));
        let host = Host::spawn().unwrap();
        host.init(Counting::boxed(&frames, false), small_config());
        host.hover(HoverFlags::only(ShapeKey::Gear));
        host.resize(180.0, 100.0);
        assert!(wait_until(|| frames.load(Ordering::SeqCst) >= 5));

        host.dispose();
        assert!(wait_until(|| host.is_finished()));
        let after = frames.load(Ordering::SeqCst);

        // Messages after dispose are dropped
        host.hover(HoverFlags::none());
        host.resize(10.0, 10.0);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(frames.load(Ordering::SeqCst), after);
        host.join();
    }

    #[test]
    fn test_refused_surface_never_starts_the_loop() {
        let frames = Arc::new(AtomicU64::new(0));
        let host = Host::spawn().unwrap();
        host.hover(HoverFlags::only(ShapeKey::Letter));
        host.init(Counting::boxed(&frames, true), small_config());
        thread::sleep(Duration::from_millis(30));
        assert_eq!(frames.load(Ordering::SeqCst), 0);
        assert!(!host.is_finished());
        host.dispose();
        assert!(wait_until(|| host.is_finished()));
    }

    #[test]
    fn test_dropping_the_host_stops_the_worker() {
        let frames = Arc::new(AtomicU64::new(0));
        let host = Host::spawn().unwrap();
        host.init(Counting::boxed(&frames, false), small_config());
        assert!(wait_until(|| frames.load(Ordering::SeqCst) >= 1));
        drop(host);
        let after = frames.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(frames.load(Ordering::SeqCst), after);
    }
}
