use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use lumen_engine::device::NativeWindow;
use lumen_engine::runtime::{EngineError, EngineRuntime, SurfaceGeometry, SurfaceTarget};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle as RawWindowHandle,
};

use crate::platform::{HostPlatform, WindowHandle, WindowId, WindowSpec};

/// Everything the fakes observe, in one shared, ordered log.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RendererNames,
    SelectRenderer(String),
    CreateSurface(SurfaceGeometry),
    CreateNativeSurface { width: u32, height: u32 },
    LoadScene(PathBuf),
    Run { surface: u32, scene: u32 },
    Resize { surface: u32, width: u32, height: u32 },
    ReleaseScene(u32),
    ReleaseSurface(u32),
    CreateWindow,
    LoadContent(PathBuf),
    Reclaim,
    Finalize(WindowId),
    Quit,
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

#[derive(Debug)]
pub struct FakeSurface(pub u32);

#[derive(Debug)]
pub struct FakeScene(pub u32);

pub struct FakeEngine {
    log: CallLog,
    pub renderers: Vec<String>,
    pub reject_renderer: bool,
    pub fail_surface: bool,
    pub fail_scene: bool,
    pub fail_run: bool,
    pub fail_release_scene: bool,
    next: u32,
}

impl FakeEngine {
    pub fn new(log: &CallLog, renderers: &[&str]) -> Self {
        Self {
            log: Rc::clone(log),
            renderers: renderers.iter().map(|s| s.to_string()).collect(),
            reject_renderer: false,
            fail_surface: false,
            fail_scene: false,
            fail_run: false,
            fail_release_scene: false,
            next: 0,
        }
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    fn next_id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

impl EngineRuntime for FakeEngine {
    type Surface = FakeSurface;
    type Scene = FakeScene;

    fn renderer_names(&self) -> Vec<String> {
        self.record(Call::RendererNames);
        self.renderers.clone()
    }

    fn select_renderer(&mut self, name: &str) -> Result<(), EngineError> {
        self.record(Call::SelectRenderer(name.to_string()));
        if self.reject_renderer || !self.renderers.iter().any(|r| r == name) {
            return Err(EngineError::UnknownRenderer(name.to_string()));
        }
        Ok(())
    }

    fn create_surface(&mut self, target: SurfaceTarget) -> Result<FakeSurface, EngineError> {
        match target {
            SurfaceTarget::Geometry(g) => self.record(Call::CreateSurface(g)),
            SurfaceTarget::Native { width, height, .. } => {
                self.record(Call::CreateNativeSurface { width, height })
            }
        }
        if self.fail_surface {
            return Err(EngineError::InvalidDimensions { width: 0, height: 0 });
        }
        Ok(FakeSurface(self.next_id()))
    }

    fn load_scene(&mut self, path: &Path) -> Result<FakeScene, EngineError> {
        self.record(Call::LoadScene(path.to_path_buf()));
        if self.fail_scene {
            return Err(EngineError::UnsupportedTarget("scene".to_string()));
        }
        Ok(FakeScene(self.next_id()))
    }

    fn run(&mut self, surface: &mut FakeSurface, scene: &FakeScene) -> Result<(), EngineError> {
        self.record(Call::Run {
            surface: surface.0,
            scene: scene.0,
        });
        if self.fail_run {
            return Err(EngineError::PresenterPanicked);
        }
        Ok(())
    }

    fn resize_surface(
        &mut self,
        surface: &mut FakeSurface,
        width: u32,
        height: u32,
    ) -> Result<(), EngineError> {
        self.record(Call::Resize {
            surface: surface.0,
            width,
            height,
        });
        Ok(())
    }

    fn release_scene(&mut self, scene: FakeScene) -> Result<(), EngineError> {
        self.record(Call::ReleaseScene(scene.0));
        if self.fail_release_scene {
            return Err(EngineError::PresenterPanicked);
        }
        Ok(())
    }

    fn release_surface(&mut self, surface: FakeSurface) -> Result<(), EngineError> {
        self.record(Call::ReleaseSurface(surface.0));
        Ok(())
    }
}

/// A window handle that exists but can never be resolved; enough for the
/// controller, which only forwards it.
struct OpaqueWindow;

impl HasWindowHandle for OpaqueWindow {
    fn window_handle(&self) -> Result<RawWindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for OpaqueWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

pub struct FakeHost {
    log: CallLog,
    windows: BTreeSet<WindowId>,
    next: u64,
    pub size: (u32, u32),
    pub reclaim_available: bool,
    pub native_available: bool,
    pub fail_create: bool,
    pub fail_content: bool,
}

impl FakeHost {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Rc::clone(log),
            windows: BTreeSet::new(),
            next: 0,
            size: (800, 600),
            reclaim_available: true,
            native_available: false,
            fail_create: false,
            fail_content: false,
        }
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    pub fn is_open(&self, window: WindowId) -> bool {
        self.windows.contains(&window)
    }
}

impl HostPlatform for FakeHost {
    fn create_window(&mut self, spec: &WindowSpec) -> anyhow::Result<WindowHandle> {
        self.record(Call::CreateWindow);
        anyhow::ensure!(!self.fail_create, "display unavailable");

        self.next += 1;
        let id = WindowId(self.next);
        self.windows.insert(id);
        Ok(WindowHandle {
            id,
            width: self.size.0,
            height: self.size.1,
            visible: spec.visible,
            framed: spec.framed,
            integration: spec.integration,
        })
    }

    fn load_content(&mut self, _window: WindowId, path: &Path) -> anyhow::Result<()> {
        self.record(Call::LoadContent(path.to_path_buf()));
        anyhow::ensure!(!self.fail_content, "no such file");
        Ok(())
    }

    fn native_window(&self, window: WindowId) -> Option<Arc<dyn NativeWindow>> {
        if self.native_available && self.windows.contains(&window) {
            Some(Arc::new(OpaqueWindow))
        } else {
            None
        }
    }

    fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn finalize_window(&mut self, window: WindowId) {
        self.record(Call::Finalize(window));
        self.windows.remove(&window);
    }

    fn reclaim_resources(&mut self) -> bool {
        if self.reclaim_available {
            self.record(Call::Reclaim);
        }
        self.reclaim_available
    }

    fn quit(&mut self) {
        self.record(Call::Quit);
    }
}
