/// Engine-wide GPU settings, fixed at construction and applied to every
/// renderer selection and target.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format if the window offers one.
    pub prefer_srgb: bool,

    /// Swapchain present mode. `Fifo` is always available.
    pub present_mode: wgpu::PresentMode,

    /// Requested swapchain alpha mode; unsupported requests fall back to the
    /// first mode the window reports.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Swapchain latency hint.
    pub desired_maximum_frame_latency: u32,

    /// Used both when probing renderers and when selecting one.
    pub power_preference: wgpu::PowerPreference,

    /// Presentation rate of each surface's presenter thread.
    pub target_fps: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            power_preference: wgpu::PowerPreference::HighPerformance,
            target_fps: 60,
        }
    }
}
