//! winit host.
//!
//! Owns the event loop and maps its callbacks onto the bootstrap controller.

mod platform;
mod translate;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId as WinitWindowId;

use lumen_engine::runtime::EngineRuntime;

use crate::bootstrap::{Bootstrap, BootstrapConfig};
use crate::platform::{DirtyRect, WindowEvent, WindowId};

use platform::{WindowTable, WinitPlatform};

/// Entry point for the host.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the exit policy (or the platform) ends it.
    pub fn run<E>(config: BootstrapConfig, engine: E) -> Result<()>
    where
        E: EngineRuntime + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(Bootstrap::new(engine, config));

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct HostState<E: EngineRuntime> {
    bootstrap: Bootstrap<E>,
    table: WindowTable,
    ready: bool,
    exit_requested: bool,
}

impl<E: EngineRuntime> HostState<E> {
    fn new(bootstrap: Bootstrap<E>) -> Self {
        Self {
            bootstrap,
            table: WindowTable::default(),
            ready: false,
            exit_requested: false,
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop, window: WindowId) {
        let mut host = WinitPlatform::new(event_loop, &mut self.table, &mut self.exit_requested);
        if let Some(closed) = self.bootstrap.on_window_closing(&mut host, window) {
            log::debug!("{window}: released after {:?}", closed.visited);
        }
        if self.table.is_empty() {
            let mut host =
                WinitPlatform::new(event_loop, &mut self.table, &mut self.exit_requested);
            self.bootstrap.on_all_windows_closed(&mut host);
        }
    }

    fn resize(&mut self, window: WindowId, width: u32, height: u32) {
        // Minimized windows report a zero extent; surfaces keep their last size.
        if width == 0 || height == 0 {
            log::debug!("{window}: ignoring {width}x{height} resize");
            return;
        }
        self.bootstrap.on_window_resized(window, width, height);
    }

    fn paint(&mut self, window: WindowId) {
        let Some(entry) = self.table.get(window) else {
            return;
        };
        if !entry.integration.forward_paint {
            return;
        }
        let size = entry.window.inner_size();
        self.bootstrap.dispatch(
            window,
            &WindowEvent::Paint {
                dirty: DirtyRect::full(size.width, size.height),
                image: None,
            },
        );
    }

    fn input(&mut self, window: WindowId, event: &WinitWindowEvent) {
        let Some(entry) = self.table.get_mut(window) else {
            return;
        };
        if !entry.integration.forward_input {
            return;
        }
        let input = translate::translate_input_event(&entry.window, &mut entry.pointer, event);
        if let Some(input) = input {
            self.bootstrap.dispatch(window, &WindowEvent::Input(input));
        }
    }
}

impl<E: EngineRuntime> ApplicationHandler for HostState<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let mut host = WinitPlatform::new(event_loop, &mut self.table, &mut self.exit_requested);

        let created = if self.ready {
            self.bootstrap.on_activate_with_no_windows(&mut host)
        } else {
            self.ready = true;
            self.bootstrap.on_platform_ready(&mut host).map(Some)
        };

        match created {
            Ok(Some(window)) => {
                if let Some(entry) = self.table.get(window) {
                    entry.window.request_redraw();
                }
            }
            Ok(None) => {}
            Err(e) => {
                log::error!("{e:#}");
                if self.table.is_empty() {
                    self.exit_requested = true;
                    event_loop.exit();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Presentation runs on engine threads; the host only reacts to events.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WinitWindowId,
        event: WinitWindowEvent,
    ) {
        let Some(window) = self.table.lookup(window_id) else {
            return;
        };

        match &event {
            WinitWindowEvent::CloseRequested => self.close(event_loop, window),

            WinitWindowEvent::Resized(size) => self.resize(window, size.width, size.height),

            WinitWindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.table.get(window) {
                    let size = entry.window.inner_size();
                    self.resize(window, size.width, size.height);
                }
            }

            WinitWindowEvent::RedrawRequested => self.paint(window),

            _ => self.input(window, &event),
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
