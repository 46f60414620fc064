use serde::{Deserialize, Serialize};

/// Player-visible state of one grid cell, doubling as the render surface.
///
/// Exactly twelve visuals exist: `Unknown`, `Flagged`, `Open(0)` through
/// `Open(8)`, and `Exploded`. A front-end maps each directly to a sprite or
/// glyph; no further inspection of the cell is needed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    /// Covered and unmarked.
    Unknown,
    /// Covered and flagged by the player.
    Flagged,
    /// Uncovered safe cell carrying its adjacent-mine count (0..=8).
    Open(u8),
    /// Uncovered mine. Appears only once the game is lost.
    Exploded,
}

impl CellView {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_) | Self::Exploded)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Unknown
    }
}
