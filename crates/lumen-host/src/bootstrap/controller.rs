use std::collections::HashMap;

use lumen_engine::runtime::{EngineError, EngineRuntime, SurfaceGeometry, SurfaceTarget};

use crate::platform::{EventKind, HostPlatform, WindowEvent, WindowId};

use super::session::{EventHandler, Session, SessionState, SubscriptionId};
use super::{BootstrapConfig, BootstrapError, ExitPolicy, SurfaceBinding};

/// Report produced when a session has been torn down.
#[derive(Debug)]
pub struct ClosedSession {
    pub window: WindowId,
    /// Every lifecycle state the session visited, in order.
    pub visited: Vec<SessionState>,
    /// Release failures. Teardown continues past them; they are not retried.
    pub errors: Vec<BootstrapError>,
}

/// Sequences host windows against an engine runtime.
///
/// All methods run on the host's event thread. Each window is independent;
/// nothing is shared between sessions except the engine handle itself.
pub struct Bootstrap<E: EngineRuntime> {
    config: BootstrapConfig,
    engine: E,
    sessions: HashMap<WindowId, Session<E>>,
    next_subscription: u64,
}

impl<E: EngineRuntime> Bootstrap<E> {
    pub fn new(engine: E, config: BootstrapConfig) -> Self {
        Self {
            config,
            engine,
            sessions: HashMap::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn session(&self, window: WindowId) -> Option<&Session<E>> {
        self.sessions.get(&window)
    }

    pub fn session_state(&self, window: WindowId) -> Option<SessionState> {
        self.sessions.get(&window).map(Session::state)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Creates one window and attaches the engine to it.
    ///
    /// Engine failures leave the window open but inert and are only logged;
    /// the returned error is reserved for the host failing to create the window.
    pub fn on_platform_ready<H: HostPlatform>(
        &mut self,
        host: &mut H,
    ) -> Result<WindowId, BootstrapError> {
        let handle = host
            .create_window(&self.config.window)
            .map_err(BootstrapError::WindowCreation)?;
        let window = handle.id;
        log::info!("{window}: created ({}x{})", handle.width, handle.height);

        if let Some(content) = &self.config.window.content {
            if let Err(e) = host.load_content(window, content) {
                log::warn!("{window}: failed to load {}: {e:#}", content.display());
            }
        }

        self.sessions.insert(window, Session::new(handle));
        if self.config.log_events {
            self.install_logging_subscribers(window);
        }

        if let Err(e) = self.initialize_engine(&*host, window) {
            log::error!("{window}: engine session failed, window left inert: {}", error_chain(&e));
        }

        Ok(window)
    }

    /// Same as [`on_platform_ready`](Self::on_platform_ready), but only when no
    /// window is alive.
    pub fn on_activate_with_no_windows<H: HostPlatform>(
        &mut self,
        host: &mut H,
    ) -> Result<Option<WindowId>, BootstrapError> {
        if host.window_count() > 0 {
            return Ok(None);
        }
        self.on_platform_ready(host).map(Some)
    }

    /// Selects a renderer, builds the surface and scene, and starts the scene.
    ///
    /// Steps run in strict order and stop at the first failure. Anything built
    /// before the failure stays with the session and is released at close.
    pub fn initialize_engine<H: HostPlatform>(
        &mut self,
        host: &H,
        window: WindowId,
    ) -> Result<(), BootstrapError> {
        let session = self
            .sessions
            .get_mut(&window)
            .ok_or(BootstrapError::UnknownWindow(window))?;

        if session.state() != SessionState::Created {
            return Err(BootstrapError::InvalidState {
                window,
                state: session.state(),
                expected: SessionState::Created,
            });
        }

        // A previous attempt may have left its surface behind; a session holds one at most.
        if let Some(stale) = session.surface.take() {
            log::debug!("{window}: releasing surface from failed initialization");
            self.engine
                .release_surface(stale)
                .map_err(|source| BootstrapError::TeardownFailed {
                    window,
                    resource: "surface",
                    source,
                })?;
        }

        let names = self.engine.renderer_names();
        log::info!("available renderers: {names:?}");
        let name = choose_renderer(&names, self.config.preferred_renderer.as_deref())?;

        self.engine
            .select_renderer(&name)
            .map_err(|source| BootstrapError::RendererSelectionFailed {
                name: name.clone(),
                source,
            })?;

        let target = match self.config.surface_binding {
            SurfaceBinding::Geometry => SurfaceTarget::Geometry(SurfaceGeometry {
                fullscreen: self.config.fullscreen,
                ..SurfaceGeometry::windowed(session.handle.width, session.handle.height)
            }),
            SurfaceBinding::Native => match host.native_window(window) {
                Some(native) => SurfaceTarget::Native {
                    window: native,
                    width: session.handle.width,
                    height: session.handle.height,
                },
                None => {
                    return Err(BootstrapError::SurfaceConstructionFailed {
                        window,
                        source: EngineError::UnsupportedTarget(
                            "host exposes no native window handle".to_string(),
                        ),
                    });
                }
            },
        };

        let mut surface = self
            .engine
            .create_surface(target)
            .map_err(|source| BootstrapError::SurfaceConstructionFailed { window, source })?;

        let path = &self.config.scene_path;
        let scene = match self.engine.load_scene(path) {
            Ok(scene) => scene,
            Err(source) => {
                session.surface = Some(surface);
                return Err(BootstrapError::SceneLoadFailed {
                    path: path.clone(),
                    source,
                });
            }
        };
        session.advance(SessionState::EngineAttached);

        let started = self.engine.run(&mut surface, &scene);
        session.surface = Some(surface);
        session.scene = Some(scene);
        started.map_err(|source| BootstrapError::SceneStartFailed { window, source })?;
        session.advance(SessionState::Running);

        log::info!("{window}: running with renderer `{name}`");
        Ok(())
    }

    /// Tears a session down: scene, then surface, then a reclamation pass,
    /// then the host window. Returns `None` for windows without a session.
    pub fn on_window_closing<H: HostPlatform>(
        &mut self,
        host: &mut H,
        window: WindowId,
    ) -> Option<ClosedSession> {
        let Some(mut session) = self.sessions.remove(&window) else {
            log::warn!("{window}: close for unknown window");
            return None;
        };

        log::info!("{window}: closing");
        session.begin_closing();

        let mut errors = Vec::new();

        if let Some(scene) = session.scene.take() {
            if let Err(source) = self.engine.release_scene(scene) {
                errors.push(BootstrapError::TeardownFailed {
                    window,
                    resource: "scene",
                    source,
                });
            }
        }

        if let Some(surface) = session.surface.take() {
            if let Err(source) = self.engine.release_surface(surface) {
                errors.push(BootstrapError::TeardownFailed {
                    window,
                    resource: "surface",
                    source,
                });
            }
        }

        if !host.reclaim_resources() {
            log::debug!("{window}: host offers no resource reclamation");
        }

        session.advance(SessionState::Released);
        host.finalize_window(window);

        for e in &errors {
            log::error!("{window}: {}", error_chain(e));
        }

        Some(ClosedSession {
            window,
            visited: session.into_history(),
            errors,
        })
    }

    /// Applies the exit policy once no window is left. With windows still
    /// alive, or under [`ExitPolicy::KeepAlive`], nothing happens.
    pub fn on_all_windows_closed<H: HostPlatform>(&mut self, host: &mut H) {
        if host.window_count() > 0 {
            log::debug!("{} windows still open; not applying exit policy", host.window_count());
            return;
        }

        match self.config.exit_policy {
            ExitPolicy::QuitWhenAllClosed => {
                log::info!("all windows closed; quitting");
                host.quit();
            }
            ExitPolicy::KeepAlive => log::info!("all windows closed; staying alive"),
        }
    }

    /// Forwards a host resize to the session's surface and subscribers.
    pub fn on_window_resized(&mut self, window: WindowId, width: u32, height: u32) {
        let Some(session) = self.sessions.get_mut(&window) else {
            return;
        };

        session.handle.width = width;
        session.handle.height = height;

        if session.state() == SessionState::Running {
            if let Some(surface) = session.surface.as_mut() {
                if let Err(e) = self.engine.resize_surface(surface, width, height) {
                    log::warn!("{window}: surface resize to {width}x{height} failed: {e}");
                }
            }
        }

        session.deliver(&WindowEvent::Resized { width, height });
    }

    /// Delivers a paint/input event to the window's subscribers. Events for
    /// sessions that are not `Running` are dropped.
    pub fn dispatch(&mut self, window: WindowId, event: &WindowEvent) -> usize {
        self.sessions
            .get_mut(&window)
            .map_or(0, |session| session.deliver(event))
    }

    pub fn subscribe(
        &mut self,
        window: WindowId,
        kind: EventKind,
        handler: EventHandler,
    ) -> Option<SubscriptionId> {
        let session = self.sessions.get_mut(&window)?;
        if session.state() >= SessionState::Closing {
            return None;
        }

        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        session.subscribe(id, kind, handler);
        Some(id)
    }

    pub fn unsubscribe(&mut self, window: WindowId, id: SubscriptionId) -> bool {
        self.sessions
            .get_mut(&window)
            .is_some_and(|session| session.unsubscribe(id))
    }

    fn install_logging_subscribers(&mut self, window: WindowId) {
        self.subscribe(
            window,
            EventKind::Paint,
            Box::new(|window: WindowId, event: &WindowEvent| {
                if let WindowEvent::Paint { dirty, image } = event {
                    log::trace!(
                        "{window}: paint {dirty:?}{}",
                        if image.is_some() { " with image" } else { "" }
                    );
                }
            }),
        );
        self.subscribe(
            window,
            EventKind::Input,
            Box::new(|window: WindowId, event: &WindowEvent| log::debug!("{window}: {event:?}")),
        );
    }
}

/// Picks the preferred renderer when given, otherwise the first reported one.
///
/// Engine order is taken as-is; it carries no documented preference.
fn choose_renderer(names: &[String], preferred: Option<&str>) -> Result<String, BootstrapError> {
    let first = names.first().ok_or(BootstrapError::EnumerationEmpty)?;

    match preferred {
        None => Ok(first.clone()),
        Some(p) if names.iter().any(|n| n == p) => Ok(p.to_string()),
        Some(p) => Err(BootstrapError::RendererSelectionFailed {
            name: p.to_string(),
            source: EngineError::UnknownRenderer(p.to_string()),
        }),
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        out.push_str(": ");
        out.push_str(&s.to_string());
        source = s.source();
    }
    out
}
