//! Network input encoding.
//!
//! A position is encoded as `INPUT_PLANES` planes of `N * N` floats:
//! for each of the last `PAST_MOVES` positions (most recent first) a plane of
//! the side to move's stones followed by a plane of the opponent's stones,
//! then a plane of ones if Black is to move and a plane of ones if White is.
//! Positions older than the start of the game are left as zero planes.

use crate::board::{Board, Color};
use crate::constants::{INPUT_PLANES, PAST_MOVES};

/// Encoded input planes for one position.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub board_size: usize,
    /// Row-major planes, `INPUT_PLANES * board_size * board_size` values.
    pub data: Vec<f32>,
}

impl Features {
    /// One plane as a slice of `N * N` values.
    pub fn plane(&self, idx: usize) -> &[f32] {
        let area = self.board_size * self.board_size;
        &self.data[idx * area..(idx + 1) * area]
    }
}

/// Encode `board` from the perspective of its side to move.
pub fn encode(board: &Board) -> Features {
    let size = board.board_size();
    let area = board.num_intersections();
    let mut data = vec![0.0; INPUT_PLANES * area];
    let own = board.to_move;
    let opp = own.opponent();

    for (past, state) in board.past_states().take(PAST_MOVES).enumerate() {
        let own_plane = 2 * past * area;
        let opp_plane = own_plane + area;
        for idx in 0..area {
            let vtx = board.index_to_vertex(idx);
            match state[vtx].color() {
                Some(c) if c == own => data[own_plane + idx] = 1.0,
                Some(c) if c == opp => data[opp_plane + idx] = 1.0,
                _ => {}
            }
        }
    }

    let side_plane = match own {
        Color::Black => 2 * PAST_MOVES,
        Color::White => 2 * PAST_MOVES + 1,
    };
    data[side_plane * area..(side_plane + 1) * area].fill(1.0);

    Features {
        board_size: size,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_only_side_plane() {
        let board = Board::new(9, 7.5);
        let features = encode(&board);
        assert_eq!(features.data.len(), INPUT_PLANES * 81);
        for p in 0..2 * PAST_MOVES {
            assert!(features.plane(p).iter().all(|&v| v == 0.0));
        }
        assert!(features.plane(2 * PAST_MOVES).iter().all(|&v| v == 1.0));
        assert!(features.plane(2 * PAST_MOVES + 1).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_planes_follow_side_to_move() {
        let mut board = Board::new(9, 7.5);
        let e5 = board.text_to_vertex("E5");
        board.play(e5);
        let idx = board.vertex_to_index(e5).unwrap();

        // White to move: Black's stone is on the opponent plane.
        let features = encode(&board);
        assert_eq!(features.plane(0)[idx], 0.0);
        assert_eq!(features.plane(1)[idx], 1.0);
        // The position before E5 was empty.
        assert_eq!(features.plane(3)[idx], 0.0);
        assert!(features.plane(2 * PAST_MOVES + 1).iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut board = Board::new(9, 7.5);
        for mv in ["A1", "B1", "C1", "D1", "E1", "F1"] {
            let vtx = board.text_to_vertex(mv);
            board.play(vtx);
        }
        assert_eq!(board.past_states().count(), PAST_MOVES);
    }
}
