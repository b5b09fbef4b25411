use std::fmt;

use super::{Position, Tile, TileError, TileId, TileIds, TileView};
use crate::error::{ErrorSeverity, GameError};

/// Fixed-size grid where each cell holds at most one tile.
///
/// Cells are stored row-major. The board owns every tile on it; tiles move
/// between cells only through [`Board::take`] and [`Board::place`], which keeps
/// two tiles from ever sharing a position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Creates an empty board.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Builds a board from a grid of values where `0` marks an empty cell.
    ///
    /// Tiles receive ids from `ids` in row-major order. Mostly useful for
    /// setting up scenarios and tests.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RaggedRows`] if rows differ in length and
    /// [`BoardError::InvalidTile`] for values that are not powers of two.
    pub fn from_rows<R>(rows: &[R], ids: &mut TileIds) -> Result<Self, BoardError>
    where
        R: AsRef<[u32]>,
    {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut board = Self::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(BoardError::RaggedRows {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                let tile = Tile::new(ids.allocate(), value)?;
                board.place(Position::new(x, y), tile)?;
            }
        }

        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y * self.width + position.x)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    /// Returns the tile at `position`, if any.
    pub fn get(&self, position: Position) -> Option<&Tile> {
        self.index(position)
            .and_then(|index| self.cells[index].as_ref())
    }

    /// Puts `tile` into an empty cell.
    ///
    /// # Errors
    ///
    /// Fails if the position is off the board or the cell is already taken.
    pub fn place(&mut self, position: Position, tile: Tile) -> Result<(), BoardError> {
        let index = self
            .index(position)
            .ok_or(BoardError::OutOfBounds { position })?;
        let cell = &mut self.cells[index];
        if cell.is_some() {
            return Err(BoardError::Occupied { position });
        }
        *cell = Some(tile);
        Ok(())
    }

    /// Writes `tile` into a cell the caller knows to be free.
    ///
    /// Used by the move engine, which fills a fresh board line by line.
    pub(crate) fn put(&mut self, position: Position, tile: Tile) {
        if let Some(index) = self.index(position) {
            debug_assert!(self.cells[index].is_none(), "cell {position} written twice");
            self.cells[index] = Some(tile);
        }
    }

    /// Removes and returns the tile at `position`.
    pub fn take(&mut self, position: Position) -> Option<Tile> {
        let index = self.index(position)?;
        self.cells[index].take()
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| self.position_of(index))
            .collect()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileView> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.as_ref()
                .map(|tile| tile.view(self.position_of(index)))
        })
    }

    /// Looks up a tile by identity.
    pub fn find(&self, id: TileId) -> Option<TileView> {
        self.tiles().find(|view| view.id == id)
    }

    /// Highest tile value, or 0 on an empty board.
    pub fn max_value(&self) -> u32 {
        self.tiles().map(|view| view.value).max().unwrap_or(0)
    }

    /// Sum of all tile values. Sliding and merging never change it.
    pub fn value_sum(&self) -> u64 {
        self.tiles().map(|view| u64::from(view.value)).sum()
    }

    /// Returns true if some direction would change the board.
    ///
    /// That is the case whenever a cell is empty or two orthogonal neighbours
    /// hold equal values.
    pub fn has_legal_move(&self) -> bool {
        if !self.is_full() {
            return true;
        }

        // full board: some pair of neighbours has to be mergeable
        let value_at = |x: usize, y: usize| self.get(Position::new(x, y)).map(Tile::value);
        let mergeable = |a: Option<u32>, b: Option<u32>| a == b && a < Some(Tile::MAX_VALUE);
        for y in 0..self.height {
            for x in 0..self.width {
                let value = value_at(x, y);
                if x + 1 < self.width && mergeable(value, value_at(x + 1, y)) {
                    return true;
                }
                if y + 1 < self.height && mergeable(value, value_at(x, y + 1)) {
                    return true;
                }
            }
        }
        false
    }

    /// Drops every tile's merge flag ahead of a new move.
    pub fn clear_merge_flags(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.clear_merge_flag();
        }
    }

    /// Value grid with `0` for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().map(Tile::value).unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    /// Read-only copy for renderers.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width,
            height: self.height,
            tiles: self.tiles().collect(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = self.max_value().max(1).to_string().len();
        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|&value| match value {
                    0 => format!("{:>cell_width$}", "."),
                    value => format!("{value:>cell_width$}"),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Immutable `(position, value)` view of a board at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Occupied cells in row-major order.
    pub tiles: Vec<TileView>,
}

impl BoardSnapshot {
    pub fn value_at(&self, position: Position) -> Option<u32> {
        self.tiles
            .iter()
            .find(|view| view.position == position)
            .map(|view| view.value)
    }

    /// Value grid with `0` for empty cells.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        let mut rows = vec![vec![0; self.width]; self.height];
        for view in &self.tiles {
            rows[view.position.y][view.position.x] = view.value;
        }
        rows
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    #[error("position {position} is outside the board")]
    OutOfBounds { position: Position },

    #[error("cell {position} is already occupied")]
    Occupied { position: Position },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    InvalidTile(#[from] TileError),
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Occupied { .. } => ErrorSeverity::Internal,
            Self::OutOfBounds { .. } | Self::RaggedRows { .. } | Self::InvalidTile(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "BOARD_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "BOARD_OCCUPIED",
            Self::RaggedRows { .. } => "BOARD_RAGGED_ROWS",
            Self::InvalidTile(_) => "BOARD_INVALID_TILE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u32; 4]]) -> Board {
        Board::from_rows(rows, &mut TileIds::new()).unwrap()
    }

    #[test]
    fn place_rejects_occupied_and_out_of_bounds_cells() {
        let mut ids = TileIds::new();
        let mut board = Board::new(2, 2);
        let origin = Position::ORIGIN;

        board
            .place(origin, Tile::new(ids.allocate(), 2).unwrap())
            .unwrap();
        assert_eq!(
            board.place(origin, Tile::new(ids.allocate(), 2).unwrap()),
            Err(BoardError::Occupied { position: origin })
        );

        let outside = Position::new(2, 0);
        assert_eq!(
            board.place(outside, Tile::new(ids.allocate(), 2).unwrap()),
            Err(BoardError::OutOfBounds { position: outside })
        );
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn take_empties_the_cell() {
        let mut board = board(&[[2, 0, 0, 0]]);
        let tile = board.take(Position::ORIGIN).unwrap();
        assert_eq!(tile.value(), 2);
        assert!(board.get(Position::ORIGIN).is_none());
        assert!(board.take(Position::ORIGIN).is_none());
    }

    #[test]
    fn from_rows_rejects_ragged_input_and_bad_values() {
        let rows: [&[u32]; 2] = [&[2, 2], &[2]];
        assert_eq!(
            Board::from_rows(&rows, &mut TileIds::new()),
            Err(BoardError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            Board::from_rows(&[[3u32]], &mut TileIds::new()),
            Err(BoardError::InvalidTile(TileError::InvalidValue(3)))
        );
    }

    #[test]
    fn empty_cells_are_row_major() {
        let board = board(&[[2, 0, 4, 0], [8, 8, 8, 8]]);
        assert_eq!(
            board.empty_cells(),
            vec![Position::new(1, 0), Position::new(3, 0)]
        );
        assert!(!board.is_full());
    }

    #[test]
    fn full_board_without_pairs_has_no_legal_move() {
        let board = board(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(board.is_full());
        assert!(!board.has_legal_move());
    }

    #[test]
    fn full_board_with_vertical_pair_has_legal_move() {
        let board = board(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [2, 8, 16, 32],
        ]);
        assert!(board.has_legal_move());
    }

    #[test]
    fn pair_of_largest_tiles_is_not_a_legal_move() {
        let top = Tile::MAX_VALUE;
        let board = Board::from_rows(&[[top, top], [2, 4]], &mut TileIds::new()).unwrap();
        assert!(!board.has_legal_move());
    }

    #[test]
    fn aggregates_and_lookup() {
        let board = board(&[[2, 0, 0, 0], [0, 0, 64, 0]]);
        assert_eq!(board.max_value(), 64);
        assert_eq!(board.value_sum(), 66);

        let view = board.find(TileId(1)).unwrap();
        assert_eq!(view.position, Position::new(2, 1));
        assert_eq!(view.value, 64);
        assert!(board.find(TileId(7)).is_none());
    }

    #[test]
    fn snapshot_round_trips_rows() {
        let board = board(&[[2, 0, 0, 4], [0, 8, 0, 0]]);
        let snapshot = board.snapshot();
        assert_eq!(snapshot.rows(), board.rows());
        assert_eq!(snapshot.value_at(Position::new(3, 0)), Some(4));
        assert_eq!(snapshot.value_at(Position::new(2, 0)), None);
    }

    #[test]
    fn display_aligns_columns() {
        let board = board(&[[2, 0, 16, 0]]);
        assert_eq!(board.to_string(), " 2  . 16  .\n");
    }
}
