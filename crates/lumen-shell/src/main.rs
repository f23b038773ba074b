use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use lumen_engine::device::GpuInit;
use lumen_engine::logging::{LoggingConfig, init_logging};
use lumen_engine::runtime::GpuEngine;
use lumen_host::bootstrap::{BootstrapConfig, SurfaceBinding};
use lumen_host::platform::WindowSpec;
use lumen_host::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
#[command(about = "Opens a window and presents a scene on it", long_about = None)]
struct Args {
    /// Scene file loaded into every window
    #[arg(short, long, env = "LUMEN_SCENE", default_value = "scenes/main.txt")]
    scene: PathBuf,

    /// Renderer to select (Vulkan, Metal, Dx12, OpenGL); defaults to the first available
    #[arg(short, long, env = "LUMEN_RENDERER")]
    renderer: Option<String>,

    /// Request a fullscreen surface
    #[arg(short, long)]
    fullscreen: bool,

    /// Bind the swapchain to the window instead of an engine-owned surface
    #[arg(long)]
    native_surface: bool,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Presentation rate per surface
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,

    /// UI content file opened in the window
    #[arg(long, env = "LUMEN_CONTENT")]
    content: Option<PathBuf>,

    /// Log filter, env_logger syntax (falls back to RUST_LOG)
    #[arg(long, env = "LUMEN_LOG")]
    log: Option<String>,
}

impl Args {
    fn gpu_init(&self) -> GpuInit {
        GpuInit {
            target_fps: self.fps,
            ..GpuInit::default()
        }
    }

    fn bootstrap_config(&self) -> BootstrapConfig {
        BootstrapConfig {
            window: WindowSpec {
                width: self.width,
                height: self.height,
                content: self.content.clone(),
                ..WindowSpec::default()
            },
            scene_path: self.scene.clone(),
            preferred_renderer: self.renderer.clone(),
            surface_binding: if self.native_surface {
                SurfaceBinding::Native
            } else {
                SurfaceBinding::Geometry
            },
            fullscreen: self.fullscreen,
            ..BootstrapConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        ..LoggingConfig::default()
    });
    log::info!("lumen {} starting with scene {}", env!("CARGO_PKG_VERSION"), args.scene.display());

    let engine = GpuEngine::new(args.gpu_init());
    Runtime::run(args.bootstrap_config(), engine)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_shipped_scene() {
        let args = Args::try_parse_from(["lumen"]).unwrap();
        let config = args.bootstrap_config();

        assert_eq!(config.scene_path, PathBuf::from("scenes/main.txt"));
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.surface_binding, SurfaceBinding::Geometry);
        assert!(config.preferred_renderer.is_none());
        assert!(!config.fullscreen);
        assert_eq!(args.gpu_init().target_fps, 60);
    }

    #[test]
    fn flags_reach_the_configuration() {
        let args = Args::try_parse_from([
            "lumen",
            "-r",
            "OpenGL",
            "-s",
            "scenes/other.txt",
            "-f",
            "--native-surface",
            "--width",
            "1024",
            "--fps",
            "30",
        ])
        .unwrap();
        let config = args.bootstrap_config();

        assert_eq!(config.preferred_renderer.as_deref(), Some("OpenGL"));
        assert_eq!(config.scene_path, PathBuf::from("scenes/other.txt"));
        assert!(config.fullscreen);
        assert_eq!(config.surface_binding, SurfaceBinding::Native);
        assert_eq!(config.window.width, 1024);
        assert_eq!(args.gpu_init().target_fps, 30);
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(Args::try_parse_from(["lumen", "--fps", "0"]).is_err());
    }
}
