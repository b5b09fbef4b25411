use std::fmt;

/// Stable identity of a tile for the lifetime of that tile.
///
/// Identities are handed out by [`TileIds`] and never reused within a game,
/// so presentation layers can key sprites or animations on them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic [`TileId`] allocator owned by the game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileIds {
    next: u32,
}

impl TileIds {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Allocates a new unique id.
    ///
    /// Wraps only after `u32::MAX` tiles, which no game of this size reaches.
    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}

/// Discrete grid position expressed in cell coordinates.
///
/// `x` is the column (0 = left edge) and `y` the row (0 = top edge).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_ids_are_never_reused() {
        let mut ids = TileIds::new();
        let first = ids.allocate();
        let second = ids.allocate();
        assert_ne!(first, second);
        assert_eq!(ids.issued(), 2);
        assert_eq!(second.to_string(), "#1");
    }
}
