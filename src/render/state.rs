use crate::foundation::core::{Dim, Vec3, Vec4};
use crate::layout::block::BlockId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextAlignHoriz {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum TextAlignVert {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TextOpts {
    pub align: TextAlignHoriz,
    pub valign: TextAlignVert,
    pub color: Vec4,
    pub size: f64,
}

impl Default for TextOpts {
    fn default() -> Self {
        Self {
            align: TextAlignHoriz::Left,
            valign: TextAlignVert::Top,
            color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            size: 1.0,
        }
    }
}

/// Named tensor dimensions, each drawn in its own color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DimStyle {
    /// Context length.
    T,
    /// Embedding channels.
    C,
    /// A single time step.
    #[serde(rename = "t")]
    SmallT,
    #[serde(rename = "n_vocab")]
    NVocab,
    /// Channels per head.
    A,
    Token,
}

impl DimStyle {
    pub fn label(self) -> &'static str {
        match self {
            DimStyle::T => "T",
            DimStyle::C => "C",
            DimStyle::SmallT => "t",
            DimStyle::NVocab => "n_vocab",
            DimStyle::A => "A",
            DimStyle::Token => "token",
        }
    }
}

pub fn dim_style_color(style: DimStyle) -> Vec4 {
    match style {
        DimStyle::T | DimStyle::SmallT => Vec4::rgb(0.17, 0.52, 0.32),
        DimStyle::C => Vec4::rgb(0.85, 0.37, 0.01),
        DimStyle::NVocab | DimStyle::Token => Vec4::rgb(0.46, 0.44, 0.70),
        DimStyle::A => Vec4::rgb(0.91, 0.16, 0.54),
    }
}

/// Per-token color overlay applied to the input token strip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TokenColors {
    pub color2: Vec4,
    /// Blend factor toward `color2`, one per time step.
    pub mixes: Vec<f64>,
}

/// One retained draw call. Positions are world-space, resolved against the layout when the
/// command was recorded.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub enum DrawCmd {
    Text {
        text: String,
        pos: Vec3,
        opts: TextOpts,
    },
    /// Curved connector from a source cell to a destination cell.
    Curve {
        src: BlockId,
        dest: BlockId,
        src_cell: Vec3,
        dest_cell: Vec3,
        from: Vec3,
        to: Vec3,
        color: Vec4,
    },
    /// Highlighted run of cells along `dim`, at `cell` on the other axis.
    Thread {
        block: BlockId,
        dim: Dim,
        cell: usize,
        /// Cell range `[start, end)` along `dim`.
        start: usize,
        end: usize,
        color: Vec4,
    },
    BlockDimension {
        block: BlockId,
        dim: Dim,
        style: DimStyle,
        cells: usize,
        from: Vec3,
        to: Vec3,
        opacity: f64,
    },
    BlockIndex {
        block: BlockId,
        dim: Dim,
        style: DimStyle,
        index: f64,
        pos: Vec3,
        opacity: f64,
    },
    IndexMapping {
        src: BlockId,
        dest: BlockId,
        src_idx: usize,
        dest_idx: usize,
        from: Vec3,
        to: Vec3,
        color: Vec4,
    },
    Indexes {
        block: BlockId,
        color: Vec4,
        opacity: f64,
        /// Example time step the indexes are read from.
        t_idx: usize,
        labels: Vec<String>,
        overlay: Option<TokenColors>,
    },
}

/// Render-side state written by phase scripts and consumed by a renderer after the frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderState {
    pub draw: Vec<DrawCmd>,
    pub token_colors: Option<TokenColors>,
}

impl RenderState {
    pub fn reset(&mut self) {
        self.draw.clear();
        self.token_colors = None;
    }

    pub(crate) fn push(&mut self, cmd: DrawCmd) {
        self.draw.push(cmd);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/state.rs"]
mod tests;
