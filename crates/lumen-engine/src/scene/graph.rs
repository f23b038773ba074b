use std::path::Path;

use super::SceneError;
use super::loader;

/// Linear RGBA clear color, components in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ClearColor {
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Perspective camera parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

/// A scene graph node. `parent` indexes into the owning scene's node list and
/// always refers to an earlier node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub parent: Option<usize>,
}

/// A loaded scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub(super) name: String,
    pub(super) clear_color: ClearColor,
    pub(super) camera: Camera,
    pub(super) nodes: Vec<Node>,
}

impl Scene {
    /// An empty scene with default camera and a black clear color.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clear_color: ClearColor::default(),
            camera: Camera::default(),
            nodes: Vec::new(),
        }
    }

    /// Reads and parses a scene file.
    ///
    /// The scene name defaults to the file stem when the file has no `name` directive.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let source = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let default_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());

        Self::parse(&source, &default_name)
    }

    /// Parses scene text.
    pub fn parse(source: &str, default_name: &str) -> Result<Self, SceneError> {
        loader::parse(source, default_name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn clear_color(&self) -> ClearColor {
        self.clear_color
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// Visits every node pre-order, depth first. Roots are visited in
    /// declaration order, as are siblings. `depth` is 0 for roots.
    pub fn traverse_depth_first<F>(&self, mut visit: F)
    where
        F: FnMut(&Node, usize),
    {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        let mut roots = Vec::new();
        for (i, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Some(p) => children[p].push(i),
                None => roots.push(i),
            }
        }

        let mut stack: Vec<(usize, usize)> = roots.iter().rev().map(|&i| (i, 0)).collect();
        while let Some((i, depth)) = stack.pop() {
            visit(&self.nodes[i], depth);
            stack.extend(children[i].iter().rev().map(|&c| (c, depth + 1)));
        }
    }
}
