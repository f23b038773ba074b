use anyhow::{Context, Result};

use super::surface;
use super::target::SharedWindow;
use super::{FrameTarget, GpuInit, SurfaceErrorAction};

const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Owns the wgpu core objects for the selected backend.
///
/// One `Gpu` is shared (behind an `Arc`) by every target created while its
/// backend is the active renderer; presenter threads only borrow it.
pub struct Gpu {
    /// Instance restricted to the selected backend.
    instance: wgpu::Instance,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    init: GpuInit,
}

impl Gpu {
    fn instance(backends: wgpu::Backends) -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        })
    }

    /// Returns adapter info when `backends` can produce an adapter on this machine.
    ///
    /// Blocks on adapter acquisition.
    pub fn probe(
        backends: wgpu::Backends,
        power_preference: wgpu::PowerPreference,
    ) -> Option<wgpu::AdapterInfo> {
        let instance = Self::instance(backends);
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok()
        .map(|adapter| adapter.get_info())
    }

    /// Creates a device on the first adapter `backends` yields.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(backends: wgpu::Backends, init: GpuInit) -> Result<Self> {
        let instance = Self::instance(backends);

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lumen-engine device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let info = adapter.get_info();
        log::info!("gpu ready: {} ({:?})", info.name, info.backend);

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
            init,
        })
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Creates and configures a swapchain on `window`.
    pub fn create_window_target(
        &self,
        window: SharedWindow,
        width: u32,
        height: u32,
    ) -> Result<FrameTarget> {
        anyhow::ensure!(width > 0 && height > 0, "window has zero size");

        let surface = self
            .instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let caps = surface.get_capabilities(&self.adapter);
        let format = surface::choose_surface_format(&caps.formats, self.init.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, self.init.alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: self.init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.init.desired_maximum_frame_latency,
        };

        surface.configure(&self.device, &config);

        Ok(FrameTarget::Window { surface, config })
    }

    /// Creates an offscreen color target of the given size.
    pub fn create_offscreen_target(&self, width: u32, height: u32) -> Result<FrameTarget> {
        anyhow::ensure!(width > 0 && height > 0, "offscreen target has zero size");

        let max = self.device.limits().max_texture_dimension_2d;
        anyhow::ensure!(
            width <= max && height <= max,
            "offscreen target {width}x{height} exceeds device limit {max}"
        );

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(FrameTarget::Offscreen { texture, view })
    }

    /// Follows a host resize. Offscreen targets are recreated at the new size.
    pub fn resize_target(&self, target: &mut FrameTarget, width: u32, height: u32) -> Result<()> {
        match target {
            FrameTarget::Window { surface, config } => {
                surface::apply_resize(surface, &self.device, config, width, height);
                Ok(())
            }
            FrameTarget::Offscreen { .. } => {
                if width == 0 || height == 0 || target.size() == (width, height) {
                    return Ok(());
                }
                *target = self.create_offscreen_target(width, height)?;
                Ok(())
            }
        }
    }

    /// Records and submits one frame that clears `target` to `color`.
    ///
    /// Window targets are presented; offscreen targets keep the result in their texture.
    pub fn clear(
        &self,
        target: &mut FrameTarget,
        color: wgpu::Color,
    ) -> std::result::Result<(), SurfaceErrorAction> {
        match target {
            FrameTarget::Window { surface, config } => {
                let surface_texture = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(err) => {
                        return Err(surface::map_surface_error(surface, &self.device, config, err));
                    }
                };
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                self.submit_clear(&view, color);
                surface_texture.present();
                Ok(())
            }
            FrameTarget::Offscreen { view, .. } => {
                self.submit_clear(view, color);
                Ok(())
            }
        }
    }

    fn submit_clear(&self, view: &wgpu::TextureView, color: wgpu::Color) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lumen frame encoder"),
            });

        // Pass must be dropped before the encoder is finished.
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}
