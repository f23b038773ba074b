/// Region of a window that needs repainting, in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl DirtyRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Captured window contents accompanying a paint event (RGBA8, row-major).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FrameImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Platform-agnostic input. Coordinates are logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerButton {
        button: PointerButton,
        pressed: bool,
        x: f32,
        y: f32,
    },
    Key { code: u32, pressed: bool, repeat: bool },
    Text(String),
}

/// Per-window event delivered to session subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Paint {
        dirty: DirtyRect,
        image: Option<FrameImage>,
    },
    Input(InputEvent),
    Resized { width: u32, height: u32 },
}

/// Subscription key for [`WindowEvent`]s.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Paint,
    Input,
    Resize,
}

impl WindowEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Paint { .. } => EventKind::Paint,
            Self::Input(_) => EventKind::Input,
            Self::Resized { .. } => EventKind::Resize,
        }
    }
}
