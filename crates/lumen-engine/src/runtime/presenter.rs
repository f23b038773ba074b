use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};

use crate::scene::Scene;
use crate::time::{FrameClock, FrameTime};

use super::EngineError;

/// Outcome of one presented frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum PresentStep {
    Continue,
    Stop,
}

/// A paced presentation loop on its own thread.
///
/// The loop only holds a `Weak` reference to its scene: once the owner
/// releases the scene, no further frame is drawn and the thread exits.
pub(crate) struct Presenter {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Presenter {
    pub(crate) fn spawn<F>(
        label: &str,
        scene: Weak<Scene>,
        fps: u32,
        mut draw: F,
    ) -> Result<Self, EngineError>
    where
        F: FnMut(&Scene, FrameTime) -> PresentStep + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name(format!("lumen-present-{label}"))
            .spawn(move || {
                let mut clock = FrameClock::with_rate(fps);

                while !stop_flag.load(Ordering::Acquire) {
                    let Some(scene) = scene.upgrade() else {
                        log::debug!("scene released; presenter exits");
                        break;
                    };

                    let ft = clock.tick();
                    let step = draw(&scene, ft);
                    drop(scene);

                    if step == PresentStep::Stop {
                        break;
                    }

                    // `stop()` unparks, so shutdown does not wait out the frame interval.
                    thread::park_timeout(clock.time_until_next());
                }
            })
            .map_err(EngineError::Spawn)?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Signals the loop and joins the thread.
    pub(crate) fn stop(mut self) -> Result<(), EngineError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        self.stop.store(true, Ordering::Release);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.thread().unpark();
        handle.join().map_err(|_| EngineError::PresenterPanicked)
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("presenter shutdown failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;
    use std::time::{Duration, Instant};

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        false
    }

    fn counting(
        frames: &Arc<AtomicU64>,
    ) -> impl FnMut(&Scene, FrameTime) -> PresentStep + Send + 'static {
        let frames = Arc::clone(frames);
        move |_, _| {
            frames.fetch_add(1, Ordering::SeqCst);
            PresentStep::Continue
        }
    }

    #[test]
    fn presents_until_stopped() {
        let scene = Arc::new(Scene::empty("s"));
        let frames = Arc::new(AtomicU64::new(0));
        let p = Presenter::spawn("t", Arc::downgrade(&scene), 240, counting(&frames)).unwrap();

        assert!(wait_until(|| frames.load(Ordering::SeqCst) >= 3));
        p.stop().unwrap();

        let after = frames.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(frames.load(Ordering::SeqCst), after);
    }

    #[test]
    fn exits_when_scene_is_released() {
        let scene = Arc::new(Scene::empty("s"));
        let frames = Arc::new(AtomicU64::new(0));
        let p = Presenter::spawn("t", Arc::downgrade(&scene), 240, counting(&frames)).unwrap();

        assert!(wait_until(|| frames.load(Ordering::SeqCst) >= 1));
        drop(scene);

        assert!(wait_until(|| p.is_finished()));
        p.stop().unwrap();
    }

    #[test]
    fn stop_step_ends_the_loop() {
        let scene = Arc::new(Scene::empty("s"));
        let p =
            Presenter::spawn("t", Arc::downgrade(&scene), 240, |_, _| PresentStep::Stop).unwrap();
        assert!(wait_until(|| p.is_finished()));
        p.stop().unwrap();
    }

    #[test]
    fn panicking_draw_is_reported() {
        let scene = Arc::new(Scene::empty("s"));
        let p = Presenter::spawn("t", Arc::downgrade(&scene), 240, |_, _| panic!("boom")).unwrap();
        assert!(wait_until(|| p.is_finished()));
        assert!(matches!(p.stop(), Err(EngineError::PresenterPanicked)));
    }
}
