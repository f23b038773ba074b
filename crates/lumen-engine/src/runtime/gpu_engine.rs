use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::device::{FrameTarget, Gpu, GpuInit, SurfaceErrorAction};
use crate::scene::Scene;

use super::presenter::{PresentStep, Presenter};
use super::{EngineError, EngineRuntime, SurfaceTarget};

/// Renderer names and the wgpu backend each one maps to, in enumeration order.
pub const RENDERER_BACKENDS: [(&str, wgpu::Backends); 4] = [
    ("Vulkan", wgpu::Backends::VULKAN),
    ("Metal", wgpu::Backends::METAL),
    ("Dx12", wgpu::Backends::DX12),
    ("OpenGL", wgpu::Backends::GL),
];

fn backend_for(name: &str) -> Option<wgpu::Backends> {
    RENDERER_BACKENDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, b)| *b)
}

/// Resolves `name` against an enumeration snapshot. Names outside the
/// snapshot are unknown even when wgpu has a backend for them.
fn resolve_renderer(available: &[String], name: &str) -> Result<wgpu::Backends, EngineError> {
    backend_for(name)
        .filter(|_| available.iter().any(|n| n == name))
        .ok_or_else(|| EngineError::UnknownRenderer(name.to_string()))
}

struct ActiveRenderer {
    name: String,
    gpu: Arc<Gpu>,
}

/// Decrements the engine's live-surface count when a surface goes away,
/// whether it was released explicitly or simply dropped.
struct LiveSurface(Arc<AtomicUsize>);

impl LiveSurface {
    fn new(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(count))
    }
}

impl Drop for LiveSurface {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// A render target plus the presenter currently driving it.
pub struct GpuSurface {
    label: String,
    target: Arc<Mutex<FrameTarget>>,
    presenter: Option<Presenter>,
    _live: LiveSurface,
}

impl GpuSurface {
    /// Current target extent in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.target.lock().size()
    }

    pub fn is_presenting(&self) -> bool {
        self.presenter.as_ref().is_some_and(|p| !p.is_finished())
    }
}

/// A loaded scene. Presenters observe it weakly; releasing it ends them.
pub struct GpuScene {
    scene: Arc<Scene>,
}

impl GpuScene {
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

/// wgpu-backed engine runtime.
pub struct GpuEngine {
    init: GpuInit,
    active: Option<ActiveRenderer>,
    live_surfaces: Arc<AtomicUsize>,
    next_surface: u64,
}

impl GpuEngine {
    pub fn new(init: GpuInit) -> Self {
        Self {
            init,
            active: None,
            live_surfaces: Arc::new(AtomicUsize::new(0)),
            next_surface: 0,
        }
    }

    /// Name of the active renderer, if one has been selected.
    pub fn active_renderer(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.name.as_str())
    }

    fn gpu(&self) -> Result<&Arc<Gpu>, EngineError> {
        self.active
            .as_ref()
            .map(|a| &a.gpu)
            .ok_or(EngineError::NoRenderer)
    }
}

impl Default for GpuEngine {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl EngineRuntime for GpuEngine {
    type Surface = GpuSurface;
    type Scene = GpuScene;

    fn renderer_names(&self) -> Vec<String> {
        RENDERER_BACKENDS
            .iter()
            .filter(|(name, backends)| {
                let found = Gpu::probe(*backends, self.init.power_preference);
                if let Some(info) = &found {
                    log::debug!("renderer {name}: adapter `{}`", info.name);
                }
                found.is_some()
            })
            .map(|(name, _)| name.to_string())
            .collect()
    }

    fn select_renderer(&mut self, name: &str) -> Result<(), EngineError> {
        if backend_for(name).is_none() {
            return Err(EngineError::UnknownRenderer(name.to_string()));
        }

        if let Some(active) = &self.active {
            if active.name == name {
                log::debug!("renderer `{name}` already active");
                return Ok(());
            }
            if self.live_surfaces.load(Ordering::Acquire) > 0 {
                return Err(EngineError::RendererBusy {
                    active: active.name.clone(),
                    requested: name.to_string(),
                });
            }
        }

        let backends = resolve_renderer(&self.renderer_names(), name)?;
        let gpu = pollster::block_on(Gpu::new(backends, self.init.clone()))
            .map_err(EngineError::Gpu)?;

        log::info!("renderer `{name}` selected on `{}`", gpu.adapter_info().name);
        self.active = Some(ActiveRenderer {
            name: name.to_string(),
            gpu: Arc::new(gpu),
        });
        Ok(())
    }

    fn create_surface(&mut self, target: SurfaceTarget) -> Result<GpuSurface, EngineError> {
        let gpu = Arc::clone(self.gpu()?);

        let (width, height) = target.size();
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }

        let frame_target = match target {
            SurfaceTarget::Geometry(geometry) => {
                if geometry.fullscreen {
                    log::warn!("offscreen surfaces have no fullscreen mode; flag ignored");
                }
                gpu.create_offscreen_target(width, height)
            }
            SurfaceTarget::Native { window, .. } => gpu.create_window_target(window, width, height),
        }
        .map_err(EngineError::Gpu)?;

        self.next_surface += 1;
        let label = format!("surface-{}", self.next_surface);
        log::debug!("{label}: created {frame_target:?}");

        Ok(GpuSurface {
            label,
            target: Arc::new(Mutex::new(frame_target)),
            presenter: None,
            _live: LiveSurface::new(&self.live_surfaces),
        })
    }

    fn load_scene(&mut self, path: &Path) -> Result<GpuScene, EngineError> {
        let scene = Scene::load(path)?;
        log::info!(
            "scene `{}` loaded from {} ({} nodes)",
            scene.name(),
            path.display(),
            scene.nodes().len()
        );
        Ok(GpuScene {
            scene: Arc::new(scene),
        })
    }

    fn run(&mut self, surface: &mut GpuSurface, scene: &GpuScene) -> Result<(), EngineError> {
        let gpu = Arc::clone(self.gpu()?);

        if let Some(previous) = surface.presenter.take() {
            log::debug!("{}: rebinding presenter", surface.label);
            previous.stop()?;
        }

        let target = Arc::clone(&surface.target);
        let label = surface.label.clone();
        let presenter = Presenter::spawn(
            &surface.label,
            Arc::downgrade(&scene.scene),
            self.init.target_fps,
            move |scene, ft| {
                let mut target = target.lock();
                match gpu.clear(&mut target, scene.clear_color().to_wgpu()) {
                    Ok(()) => PresentStep::Continue,
                    Err(SurfaceErrorAction::Fatal) => {
                        log::error!("{label}: fatal surface error at frame {}", ft.frame_index);
                        PresentStep::Stop
                    }
                    Err(action) => {
                        log::debug!("{label}: frame {} skipped ({action:?})", ft.frame_index);
                        PresentStep::Continue
                    }
                }
            },
        )?;

        surface.presenter = Some(presenter);
        log::info!("{}: presenting scene `{}`", surface.label, scene.scene.name());
        Ok(())
    }

    fn resize_surface(
        &mut self,
        surface: &mut GpuSurface,
        width: u32,
        height: u32,
    ) -> Result<(), EngineError> {
        let gpu = self.gpu()?;
        gpu.resize_target(&mut surface.target.lock(), width, height)
            .map_err(EngineError::Gpu)
    }

    fn release_scene(&mut self, scene: GpuScene) -> Result<(), EngineError> {
        log::debug!("releasing scene `{}`", scene.scene.name());
        drop(scene);
        Ok(())
    }

    fn release_surface(&mut self, mut surface: GpuSurface) -> Result<(), EngineError> {
        let (width, height) = surface.size();
        log::debug!(
            "releasing {} ({width}x{height}, presenting: {})",
            surface.label,
            surface.is_presenting()
        );
        if let Some(presenter) = surface.presenter.take() {
            presenter.stop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_resolve() {
        assert_eq!(backend_for("Vulkan"), Some(wgpu::Backends::VULKAN));
        assert_eq!(backend_for("OpenGL"), Some(wgpu::Backends::GL));
        assert_eq!(backend_for("vulkan"), None);
    }

    #[test]
    fn selection_is_limited_to_the_enumeration() {
        let available = vec!["OpenGL".to_string()];
        assert!(matches!(
            resolve_renderer(&available, "Vulkan"),
            Err(EngineError::UnknownRenderer(name)) if name == "Vulkan"
        ));
        assert!(matches!(
            resolve_renderer(&[], "OpenGL"),
            Err(EngineError::UnknownRenderer(_))
        ));
        assert_eq!(resolve_renderer(&available, "OpenGL").ok(), Some(wgpu::Backends::GL));
    }

    #[test]
    fn unknown_renderer_is_rejected_without_touching_the_gpu() {
        let mut engine = GpuEngine::default();
        let err = engine.select_renderer("Glide").unwrap_err();
        assert!(matches!(err, EngineError::UnknownRenderer(name) if name == "Glide"));
        assert!(engine.active_renderer().is_none());
    }

    #[test]
    fn surface_before_renderer_fails() {
        let mut engine = GpuEngine::default();
        let target = SurfaceTarget::Geometry(crate::runtime::SurfaceGeometry::windowed(800, 600));
        assert!(matches!(engine.create_surface(target), Err(EngineError::NoRenderer)));
    }

    #[test]
    fn scene_load_errors_surface_as_engine_errors() {
        let mut engine = GpuEngine::default();
        let err = engine.load_scene(Path::new("no/such/scene.txt")).err().unwrap();
        assert!(matches!(err, EngineError::SceneLoad(_)));
    }

    #[test]
    fn live_surface_guard_tracks_count() {
        let count = Arc::new(AtomicUsize::new(0));
        let a = LiveSurface::new(&count);
        let b = LiveSurface::new(&count);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        drop(a);
        drop(b);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
