use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId as WinitWindowId};

use lumen_engine::device::NativeWindow;

use crate::platform::{HostPlatform, IntegrationFlags, WindowHandle, WindowId, WindowSpec};

pub(super) struct HostWindow {
    pub window: Arc<Window>,
    pub integration: IntegrationFlags,
    /// Last known pointer position in logical pixels.
    pub pointer: Option<(f32, f32)>,
}

/// Live winit windows keyed by host window id.
#[derive(Default)]
pub(super) struct WindowTable {
    windows: HashMap<WindowId, HostWindow>,
    by_winit: HashMap<WinitWindowId, WindowId>,
    next: u64,
}

impl WindowTable {
    pub fn lookup(&self, id: WinitWindowId) -> Option<WindowId> {
        self.by_winit.get(&id).copied()
    }

    pub fn get(&self, window: WindowId) -> Option<&HostWindow> {
        self.windows.get(&window)
    }

    pub fn get_mut(&mut self, window: WindowId) -> Option<&mut HostWindow> {
        self.windows.get_mut(&window)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn insert(&mut self, window: Window, integration: IntegrationFlags) -> WindowId {
        self.next += 1;
        let id = WindowId(self.next);
        self.by_winit.insert(window.id(), id);
        self.windows.insert(
            id,
            HostWindow {
                window: Arc::new(window),
                integration,
                pointer: None,
            },
        );
        id
    }

    fn remove(&mut self, window: WindowId) -> Option<HostWindow> {
        let entry = self.windows.remove(&window)?;
        self.by_winit.remove(&entry.window.id());
        Some(entry)
    }
}

/// [`HostPlatform`] view over the active event loop, valid for one callback.
pub(super) struct WinitPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
    table: &'a mut WindowTable,
    exit: &'a mut bool,
}

impl<'a> WinitPlatform<'a> {
    pub fn new(
        event_loop: &'a ActiveEventLoop,
        table: &'a mut WindowTable,
        exit: &'a mut bool,
    ) -> Self {
        Self {
            event_loop,
            table,
            exit,
        }
    }
}

impl HostPlatform for WinitPlatform<'_> {
    fn create_window(&mut self, spec: &WindowSpec) -> Result<WindowHandle> {
        let attrs = Window::default_attributes()
            .with_title(spec.title.clone())
            .with_inner_size(LogicalSize::new(spec.width, spec.height))
            .with_visible(spec.visible)
            .with_decorations(spec.framed);

        let window = self
            .event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let size = window.inner_size();
        let id = self.table.insert(window, spec.integration);

        Ok(WindowHandle {
            id,
            width: size.width,
            height: size.height,
            visible: spec.visible,
            framed: spec.framed,
            integration: spec.integration,
        })
    }

    /// winit windows have no document view; the file is checked for
    /// readability and its name shown in the title bar.
    fn load_content(&mut self, window: WindowId, path: &Path) -> Result<()> {
        let entry = self
            .table
            .get(window)
            .with_context(|| format!("{window} does not exist"))?;

        let bytes = std::fs::metadata(path)
            .with_context(|| format!("cannot read {}", path.display()))?
            .len();

        if let Some(name) = path.file_name() {
            let title = entry.window.title();
            entry
                .window
                .set_title(&format!("{title} - {}", name.to_string_lossy()));
        }
        log::debug!("{window}: content {} ({bytes} bytes)", path.display());
        Ok(())
    }

    fn native_window(&self, window: WindowId) -> Option<Arc<dyn NativeWindow>> {
        self.table
            .get(window)
            .map(|entry| Arc::clone(&entry.window) as Arc<dyn NativeWindow>)
    }

    fn window_count(&self) -> usize {
        self.table.len()
    }

    fn finalize_window(&mut self, window: WindowId) {
        if self.table.remove(window).is_none() {
            log::warn!("{window}: finalize for unknown window");
        }
    }

    fn quit(&mut self) {
        *self.exit = true;
        self.event_loop.exit();
    }
}
