//! Slide-and-merge resolution for a single move.

use arrayvec::ArrayVec;

use super::Direction;
use crate::state::{Board, Position, Tile, TileChange, TileId, TileIds};

/// Result of sliding a board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Board after sliding and merging. No tile has been spawned yet.
    pub board: Board,
    /// Sum of the values created by merges.
    pub score_delta: u64,
    /// False when no tile changed cell or value.
    pub moved: bool,
    /// Per-tile effects in line order.
    pub changes: Vec<TileChange>,
}

/// Tile waiting to be written back to its line, with where it came from.
enum Slot {
    Kept {
        tile: Tile,
        from: Position,
    },
    Merged {
        tile: Tile,
        sources: [TileId; 2],
        origins: [Position; 2],
    },
}

impl Slot {
    fn tile(&self) -> &Tile {
        match self {
            Slot::Kept { tile, .. } | Slot::Merged { tile, .. } => tile,
        }
    }
}

/// Stateless slide-and-merge rules.
///
/// Every line is walked from the edge the tiles move toward. A tile joins the
/// previously kept tile when both hold the same value and neither carries the
/// merge flag; the tile produced by a merge carries the flag, so it cannot
/// take part in a second merge during the same move.
pub struct MoveEngine;

impl MoveEngine {
    /// Slides `board` toward `direction`, merging equal neighbours.
    ///
    /// The input board is left untouched. Merge results receive fresh ids
    /// from `ids`; the two source tiles cease to exist.
    pub fn apply(board: &Board, direction: Direction, ids: &mut TileIds) -> SlideOutcome {
        let mut next = Board::new(board.width(), board.height());
        let mut score_delta = 0;
        let mut changes = Vec::new();

        for line in direction.lines(board.width(), board.height()) {
            let slots = Self::resolve_line(board, &line, ids);

            for (slot, &target) in slots.into_iter().zip(line.iter()) {
                match slot {
                    Slot::Kept { tile, from } => {
                        if from != target {
                            changes.push(TileChange::Moved {
                                id: tile.id(),
                                from,
                                to: target,
                                value: tile.value(),
                            });
                        }
                        next.put(target, tile);
                    }
                    Slot::Merged {
                        tile,
                        sources,
                        origins,
                    } => {
                        score_delta += u64::from(tile.value());
                        changes.push(TileChange::Merged {
                            id: tile.id(),
                            position: target,
                            value: tile.value(),
                            sources,
                            origins,
                        });
                        next.put(target, tile);
                    }
                }
            }
        }

        SlideOutcome {
            board: next,
            score_delta,
            moved: !changes.is_empty(),
            changes,
        }
    }

    /// Compacts one line toward its leading edge, merging as it goes.
    fn resolve_line(board: &Board, line: &[Position], ids: &mut TileIds) -> Vec<Slot> {
        let mut slots: Vec<Slot> = Vec::with_capacity(line.len());

        for &from in line {
            let Some(&tile) = board.get(from) else {
                continue;
            };

            let merge_with = slots
                .last()
                .filter(|last| last.tile().can_merge_with(&tile))
                .map(|last| (last.tile().id(), previous_origin(last)));

            match merge_with {
                Some((leading_id, leading_from)) => {
                    let merged = Tile::merged(ids.allocate(), tile.value());
                    tracing::trace!(
                        value = merged.value(),
                        at = %leading_from,
                        "merged {} and {} into {}",
                        leading_id,
                        tile.id(),
                        merged.id()
                    );
                    slots.pop();
                    slots.push(Slot::Merged {
                        tile: merged,
                        sources: [leading_id, tile.id()],
                        origins: [leading_from, from],
                    });
                }
                None => slots.push(Slot::Kept { tile, from }),
            }
        }

        slots
    }

    /// Returns true if moving in `direction` would change the board.
    ///
    /// Merge flags are honoured as-is; clear them first to probe the next move.
    pub fn can_move(board: &Board, direction: Direction) -> bool {
        Self::apply(board, direction, &mut TileIds::new()).moved
    }

    /// Directions that would change the board, in [`Direction::ALL`] order.
    pub fn legal_moves(board: &Board) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&direction| Self::can_move(board, direction))
            .collect()
    }
}

fn previous_origin(slot: &Slot) -> Position {
    match slot {
        Slot::Kept { from, .. } => *from,
        Slot::Merged { origins, .. } => origins[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(rows: &[&[u32]], direction: Direction) -> (SlideOutcome, TileIds) {
        let mut ids = TileIds::new();
        let board = Board::from_rows(rows, &mut ids).unwrap();
        let outcome = MoveEngine::apply(&board, direction, &mut ids);
        (outcome, ids)
    }

    #[test]
    fn pair_merges_toward_left_edge() {
        let (outcome, _) = slide(&[&[2, 2, 0, 0]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![4, 0, 0, 0]]);
        assert_eq!(outcome.score_delta, 4);
        assert!(outcome.moved);
    }

    #[test]
    fn separated_equal_tiles_do_not_merge() {
        let (outcome, _) = slide(&[&[2, 4, 2, 0]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![2, 4, 2, 0]]);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.moved);
        assert!(outcome.changes.is_empty());
    }

    #[test]
    fn merged_tile_does_not_merge_again() {
        let (outcome, _) = slide(&[&[2, 2, 4, 0]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![4, 4, 0, 0]]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn four_equal_tiles_make_two_pairs() {
        let (outcome, _) = slide(&[&[2, 2, 2, 2]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![4, 4, 0, 0]]);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn pairing_starts_at_the_leading_edge() {
        let (outcome, _) = slide(&[&[2, 2, 2, 0]], Direction::Right);
        assert_eq!(outcome.board.rows(), vec![vec![0, 0, 2, 4]]);

        let (outcome, _) = slide(&[&[2, 2, 2, 0]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![4, 2, 0, 0]]);
    }

    #[test]
    fn columns_slide_up_and_down() {
        let rows: &[&[u32]] = &[&[2, 0], &[0, 4], &[2, 4], &[8, 0]];

        let (up, _) = slide(rows, Direction::Up);
        assert_eq!(up.board.rows(), vec![vec![4, 8], vec![8, 0], vec![0, 0], vec![0, 0]]);
        assert_eq!(up.score_delta, 12);

        let (down, _) = slide(rows, Direction::Down);
        assert_eq!(down.board.rows(), vec![vec![0, 0], vec![0, 0], vec![4, 0], vec![8, 8]]);
    }

    #[test]
    fn merge_creates_new_identity_and_reports_sources() {
        let (outcome, ids) = slide(&[&[0, 8, 0, 8]], Direction::Left);
        let [change] = outcome.changes.as_slice() else {
            panic!("expected a single change, got {:?}", outcome.changes);
        };
        match *change {
            TileChange::Merged {
                id,
                position,
                value,
                sources,
                origins,
            } => {
                assert_eq!(id, TileId(2));
                assert_eq!(position, Position::new(0, 0));
                assert_eq!(value, 16);
                assert_eq!(sources, [TileId(0), TileId(1)]);
                assert_eq!(origins, [Position::new(1, 0), Position::new(3, 0)]);
            }
            other => panic!("unexpected change {other:?}"),
        }
        assert_eq!(ids.issued(), 3);

        let merged = outcome.board.get(Position::ORIGIN).unwrap();
        assert!(merged.merged_this_round());
        assert_eq!(merged.id(), TileId(2));
    }

    #[test]
    fn slides_report_moved_tiles() {
        let (outcome, _) = slide(&[&[0, 0, 4, 0]], Direction::Left);
        assert_eq!(
            outcome.changes,
            vec![TileChange::Moved {
                id: TileId(0),
                from: Position::new(2, 0),
                to: Position::new(0, 0),
                value: 4,
            }]
        );
    }

    #[test]
    fn flagged_tile_from_input_refuses_merge() {
        let mut ids = TileIds::new();
        let mut board = Board::new(2, 1);
        board
            .place(Position::new(0, 0), Tile::merged(ids.allocate(), 1))
            .unwrap();
        board
            .place(Position::new(1, 0), Tile::new(ids.allocate(), 2).unwrap())
            .unwrap();

        let outcome = MoveEngine::apply(&board, Direction::Left, &mut ids);
        assert_eq!(outcome.board.rows(), vec![vec![2, 2]]);
        assert!(!outcome.moved);
    }

    #[test]
    fn largest_tiles_slide_without_merging() {
        let top = Tile::MAX_VALUE;
        let (outcome, _) = slide(&[&[0, top, top]], Direction::Left);
        assert_eq!(outcome.board.rows(), vec![vec![top, top, 0]]);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.moved);

        let (outcome, _) = slide(&[&[top, top]], Direction::Left);
        assert!(!outcome.moved);
        assert_eq!(outcome.board.rows(), vec![vec![top, top]]);
    }

    #[test]
    fn input_board_is_not_modified() {
        let mut ids = TileIds::new();
        let board = Board::from_rows(&[[2u32, 2]], &mut ids).unwrap();
        let before = board.clone();
        let _ = MoveEngine::apply(&board, Direction::Right, &mut ids);
        assert_eq!(board, before);
    }

    #[test]
    fn legal_moves_lists_changing_directions() {
        let board = Board::from_rows(&[[2u32, 0], [0, 0]], &mut TileIds::new()).unwrap();
        let legal = MoveEngine::legal_moves(&board);
        assert_eq!(legal.as_slice(), &[Direction::Down, Direction::Right]);
    }
}
