use serde::{Deserialize, Serialize};

/// What a presentation layer should draw for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    /// Uncovered safe cell with its neighbor mine count.
    Open(u8),
    /// Mine shown after the game was lost.
    Mine,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Neighbor mine count for open cells, 0 otherwise.
    pub const fn display_value(self) -> u8 {
        match self {
            Self::Open(count) => count,
            Self::Hidden | Self::Mine => 0,
        }
    }

    /// Number to print on the cell, `None` where it renders blank.
    pub const fn label(self) -> Option<u8> {
        match self {
            Self::Open(count) if count > 0 => Some(count),
            _ => None,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
