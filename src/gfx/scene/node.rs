use cgmath::{
    InnerSpace, Matrix3, Matrix4, One, Quaternion, SquareMatrix, Vector3, Zero,
};

use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::AABB;

/// Stable handle to a node in a [`SceneGraph`](super::SceneGraph)
///
/// The generation changes every time a slot is freed, so a handle kept after
/// its node was destroyed never resolves to whatever reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl NodeId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Emissive tint applied to a mesh to show interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Held by a controller
    Selected,
    /// Under a controller ray this frame
    Intersected,
    /// Held, but pushed back by a room wall
    Blocked,
}

impl Highlight {
    /// Emissive colour as `0xRRGGBB`
    pub fn emissive_hex(&self) -> u32 {
        match self {
            Highlight::None => 0x000000,
            Highlight::Selected => 0x0000ff,
            Highlight::Intersected | Highlight::Blocked => 0xff0000,
        }
    }

    /// Emissive colour as linear RGB in `0.0..=1.0`
    pub fn emissive_rgb(&self) -> [f32; 3] {
        let hex = self.emissive_hex();
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn with_rotation(mut self, rotation: Quaternion<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Composes translation * rotation * scale
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Splits an affine matrix back into translation, rotation and scale
    ///
    /// Shear is discarded. A mirrored basis is folded into a negative X scale.
    pub fn from_matrix(matrix: &Matrix4<f32>) -> Self {
        let position = matrix.w.truncate();

        let x_axis = matrix.x.truncate();
        let y_axis = matrix.y.truncate();
        let z_axis = matrix.z.truncate();

        let mut scale = Vector3::new(x_axis.magnitude(), y_axis.magnitude(), z_axis.magnitude());
        if Matrix3::from_cols(x_axis, y_axis, z_axis).determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let rotation = if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
            Quaternion::one()
        } else {
            Quaternion::from(Matrix3::from_cols(
                x_axis / scale.x,
                y_axis / scale.y,
                z_axis / scale.z,
            ))
            .normalize()
        };

        Self {
            position,
            rotation,
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Triangle geometry attached to a node, in the node's local space
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    indices: Vec<u32>,
    local_bounds: AABB,
}

impl Mesh {
    /// Create a mesh from positions and an optional index list
    ///
    /// An empty `indices` means the positions are consumed three at a time.
    pub fn new(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        let local_bounds = AABB::from_vertices(&positions);
        Self {
            positions,
            indices,
            local_bounds,
        }
    }

    /// Build from flat `x, y, z` position data as produced by OBJ loaders
    pub fn from_flat(positions: &[f32], indices: Vec<u32>) -> Self {
        let positions = positions
            .chunks_exact(3)
            .map(|p| [p[0], p[1], p[2]])
            .collect();
        Self::new(positions, indices)
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        Self::new(geometry.vertices.clone(), geometry.indices.clone())
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    pub fn local_bounds(&self) -> AABB {
        self.local_bounds
    }

    /// Triangle count as reported to the UI
    ///
    /// Fractional for malformed meshes; callers sum over a subtree and floor.
    pub fn polygon_count(&self) -> f64 {
        if self.is_indexed() {
            self.indices.len() as f64 / 3.0
        } else {
            self.positions.len() as f64 / 3.0
        }
    }

    /// Iterate triangles as vertex triples in local space
    ///
    /// Out-of-range indices are skipped.
    pub fn triangles(&self) -> Box<dyn Iterator<Item = [[f32; 3]; 3]> + '_> {
        if self.is_indexed() {
            Box::new(self.indices.chunks_exact(3).filter_map(|tri| {
                let a = self.positions.get(tri[0] as usize)?;
                let b = self.positions.get(tri[1] as usize)?;
                let c = self.positions.get(tri[2] as usize)?;
                Some([*a, *b, *c])
            }))
        } else {
            Box::new(
                self.positions
                    .chunks_exact(3)
                    .map(|tri| [tri[0], tri[1], tri[2]]),
            )
        }
    }
}

/// A node in the scene graph
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub highlight: Highlight,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// Create an empty grouping node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            mesh: None,
            highlight: Highlight::None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_mesh(mut self, mesh: Mesh) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Name shown to the user; unnamed nodes display as `"Object"`
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Object"
        } else {
            &self.name
        }
    }
}
