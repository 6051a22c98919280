//! Zobrist keys for positional hashing.
//!
//! The keys cover every cell of the largest padded board, so one table serves
//! all board sizes. Only stones enter the hash; side to move does not, which
//! makes repetition checks positional.

use crate::board::Color;
use crate::constants::MAX_BOARD_SIZE;

/// Number of cells in the largest padded board.
pub const MAX_VERTICES: usize = (MAX_BOARD_SIZE + 2) * (MAX_BOARD_SIZE + 2);

const SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Stone keys indexed by `[Color::index()][vertex]`.
static STONE_KEYS: [[u64; MAX_VERTICES]; 2] = {
    let mut table = [[0u64; MAX_VERTICES]; 2];
    let mut state = SEED;
    let mut color = 0;
    while color < 2 {
        let mut vtx = 0;
        while vtx < MAX_VERTICES {
            let (val, next) = xorshift64(state);
            table[color][vtx] = val;
            state = next;
            vtx += 1;
        }
        color += 1;
    }
    table
};

const fn xorshift64(mut x: u64) -> (u64, u64) {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    (x, x)
}

/// Key toggled when a stone of `color` appears on or leaves `vertex`.
#[inline]
pub fn stone_key(color: Color, vertex: usize) -> u64 {
    STONE_KEYS[color.index()][vertex]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_nonzero_and_distinct_per_color() {
        for vtx in 0..MAX_VERTICES {
            let black = stone_key(Color::Black, vtx);
            let white = stone_key(Color::White, vtx);
            assert_ne!(black, 0);
            assert_ne!(black, white);
        }
    }

    #[test]
    fn neighbouring_keys_differ() {
        assert_ne!(stone_key(Color::Black, 12), stone_key(Color::Black, 13));
    }
}
