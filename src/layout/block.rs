use crate::foundation::core::{Dim, Vec3};

/// Stable handle into a [`Layout`](crate::Layout) arena.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct BlockId(pub(crate) u32);

impl BlockId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BlockKind {
    Weights,
    Intermediate,
    Aggregate,
}

/// Which model tensor a block reads its cell values from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TensorRef {
    TokenIndices,
    TokenEmbedding,
    PositionEmbedding,
    /// Output of the token + position embedding step.
    EmbedOutput,
    LayerNormResidual { layer: usize },
    HeadWeight { layer: usize, head: usize, qkv: Qkv },
    HeadBias { layer: usize, head: usize, qkv: Qkv },
    HeadOutput { layer: usize, head: usize, qkv: Qkv },
    AttentionMatrix { layer: usize, head: usize },
    HeadValueOutput { layer: usize, head: usize },
    AttentionResidual { layer: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Qkv {
    Q,
    K,
    V,
}

impl Qkv {
    pub const ALL: [Qkv; 3] = [Qkv::Q, Qkv::K, Qkv::V];
}

/// Data access for a block: where its values come from and whether they are shown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BlockAccess {
    pub src: TensorRef,
    pub disable: bool,
}

/// Where one coordinate of a dot-product source index comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum IdxSource {
    X,
    Y,
    Dot,
}

/// Maps a destination cell `(x, y)` plus a dot-product position to a source cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct IndexMap {
    pub x: IdxSource,
    pub y: IdxSource,
}

impl IndexMap {
    pub fn map(&self, x: usize, y: usize, dot: usize) -> (usize, usize) {
        let pick = |s: IdxSource| match s {
            IdxSource::X => x,
            IdxSource::Y => y,
            IdxSource::Dot => dot,
        };
        (pick(self.x), pick(self.y))
    }

    /// The source axis that walks along the dot product, if any.
    pub fn dot_dim(&self) -> Option<Dim> {
        if self.x == IdxSource::Dot {
            Some(Dim::X)
        } else if self.y == IdxSource::Dot {
            Some(Dim::Y)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DotDep {
    pub src: BlockId,
    pub src_idx: IndexMap,
}

/// How a block's cells are computed from other blocks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BlockDeps {
    pub dot: Option<[DotDep; 2]>,
    pub dot_len: usize,
}

/// Subdivision of a block along one axis around a single highlighted cell.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SubGrid {
    pub dim: Dim,
    pub cell: usize,
    pub gap: f64,
    pub children: Vec<BlockId>,
}

/// A node of the 3D layout: a tensor or a region of one.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Block {
    pub id: BlockId,
    pub name: String,
    pub kind: BlockKind,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
    pub cx: usize,
    pub cy: usize,
    pub cz: usize,
    pub highlight: f64,
    pub opacity: f64,
    pub access: Option<BlockAccess>,
    pub deps: Option<BlockDeps>,
    pub grid: Option<SubGrid>,
    pub parent: Option<BlockId>,
    /// Cell range `[lo, hi)` along the parent's split axis, in parent cell coordinates.
    pub range_in_parent: Option<(usize, usize)>,
}

impl Block {
    pub fn cells(&self, dim: Dim) -> usize {
        match dim {
            Dim::X => self.cx,
            Dim::Y => self.cy,
            Dim::Z => self.cz,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.dx, self.dy, self.dz)
    }

    pub fn mid(&self) -> Vec3 {
        self.pos() + self.extent() * 0.5
    }

    pub(crate) fn set_pos(&mut self, dim: Dim, v: f64) {
        match dim {
            Dim::X => self.x = v,
            Dim::Y => self.y = v,
            Dim::Z => self.z = v,
        }
    }

    pub(crate) fn set_extent(&mut self, dim: Dim, v: f64) {
        match dim {
            Dim::X => self.dx = v,
            Dim::Y => self.dy = v,
            Dim::Z => self.dz = v,
        }
    }

    pub(crate) fn set_cells(&mut self, dim: Dim, n: usize) {
        match dim {
            Dim::X => self.cx = n,
            Dim::Y => self.cy = n,
            Dim::Z => self.cz = n,
        }
    }

    /// World-space position of the center of cell `(x, y, z)`.
    pub fn cell_center(&self, cell: Vec3) -> Vec3 {
        let size = |extent: f64, n: usize| if n == 0 { 0.0 } else { extent / n as f64 };
        Vec3::new(
            self.x + (cell.x + 0.5) * size(self.dx, self.cx),
            self.y + (cell.y + 0.5) * size(self.dy, self.cy),
            self.z + (cell.z + 0.5) * size(self.dz, self.cz),
        )
    }
}
