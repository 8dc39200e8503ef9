use crate::foundation::error::{WalkthroughError, WalkthroughResult};
use crate::layout::block::{Block, BlockId};

/// Dimensions of the visualized GPT model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelShape {
    /// Context length.
    #[serde(rename = "T")]
    pub t: usize,
    /// Embedding channels.
    #[serde(rename = "C")]
    pub c: usize,
    pub n_heads: usize,
    pub n_blocks: usize,
    pub vocab_size: usize,
}

impl Default for ModelShape {
    fn default() -> Self {
        Self {
            t: 11,
            c: 48,
            n_heads: 3,
            n_blocks: 3,
            vocab_size: 3,
        }
    }
}

impl ModelShape {
    /// Channels per attention head.
    pub fn head_dim(&self) -> usize {
        self.c / self.n_heads.max(1)
    }

    pub fn validate(&self) -> WalkthroughResult<()> {
        if self.t == 0 || self.c == 0 || self.vocab_size == 0 {
            return Err(WalkthroughError::layout(
                "model shape T, C and vocab_size must be > 0",
            ));
        }
        if self.n_heads == 0 || self.c % self.n_heads != 0 {
            return Err(WalkthroughError::layout(format!(
                "C ({}) must be a positive multiple of n_heads ({})",
                self.c, self.n_heads
            )));
        }
        Ok(())
    }
}

/// Data made available once the model has been computed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ModelData {
    /// Input token ids, one per time step.
    pub input_buf: Vec<usize>,
}

impl ModelData {
    pub fn new(shape: &ModelShape, input_buf: Vec<usize>) -> WalkthroughResult<Self> {
        if input_buf.len() != shape.t {
            return Err(WalkthroughError::layout(format!(
                "input buffer has {} tokens, expected T = {}",
                input_buf.len(),
                shape.t
            )));
        }
        if let Some(&bad) = input_buf.iter().find(|&&tok| tok >= shape.vocab_size) {
            return Err(WalkthroughError::layout(format!(
                "token id {bad} is outside the vocabulary (size {})",
                shape.vocab_size
            )));
        }
        Ok(Self { input_buf })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerNormLayout {
    pub ln_agg1: BlockId,
    pub ln_agg2: BlockId,
    pub ln_resid: BlockId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadLayout {
    pub q_weight: BlockId,
    pub k_weight: BlockId,
    pub v_weight: BlockId,
    pub q_bias: BlockId,
    pub k_bias: BlockId,
    pub v_bias: BlockId,
    pub q: BlockId,
    pub k: BlockId,
    pub v: BlockId,
    pub attn_mtx: BlockId,
    pub v_out: BlockId,
    /// Every block of the head, in model order.
    pub cubes: Vec<BlockId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformerLayout {
    pub ln1: LayerNormLayout,
    pub heads: Vec<HeadLayout>,
    pub attn_resid: BlockId,
}

/// Arena of layout blocks plus named handles into it.
///
/// The layout is regenerated from `(shape, model)` at the start of every frame, then mutated by
/// the phase script. Sub-blocks created by subdivision live in the same arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub(crate) blocks: Vec<Block>,
    /// Top-level blocks in model order.
    pub cubes: Vec<BlockId>,
    pub cell: f64,
    pub margin: f64,
    pub shape: ModelShape,
    pub idx_obj: BlockId,
    pub tok_embed: BlockId,
    pub pos_embed: BlockId,
    pub residual0: BlockId,
    pub transformer: Vec<TransformerLayout>,
    pub model: Option<ModelData>,
}

impl Layout {
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    pub fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(id.index())
    }

    /// Number of arena entries, including detached sub-blocks.
    pub fn arena_len(&self) -> usize {
        self.blocks.len()
    }

    pub(crate) fn push(&mut self, mut block: Block) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        block.id = id;
        self.blocks.push(block);
        id
    }

    /// Depth-first walk over every block reachable from `cubes`, parents before children.
    pub fn reachable(&self) -> Vec<BlockId> {
        let mut out = Vec::with_capacity(self.blocks.len());
        let mut stack: Vec<BlockId> = self.cubes.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(b) = self.get(id) else {
                continue;
            };
            out.push(id);
            if let Some(grid) = &b.grid {
                stack.extend(grid.children.iter().rev().copied());
            }
        }
        out
    }

    /// Position of a top-level block in model order.
    pub fn cube_index(&self, id: BlockId) -> Option<usize> {
        self.cubes.iter().position(|&c| c == id)
    }

    pub fn input_token(&self, t: usize) -> Option<usize> {
        self.model.as_ref()?.input_buf.get(t).copied()
    }
}
