//! Go board state and rules.
//!
//! This module provides the authoritative game state:
//! - Board storage as a 1D array with an off-board ring of padding
//! - String (group) bookkeeping with incremental liberty counts
//! - Captures, suicide and simple-ko legality
//! - Positional superko detection through a Zobrist hash history
//! - Area scoring and coordinate conversion
//!
//! Vertices are indices into the padded array: `(y + 1) * (N + 2) + (x + 1)`,
//! where `y = 0` is row 1. PASS, RESIGN and INVALID are sentinels far above any
//! real index.

use std::collections::VecDeque;
use std::fmt;

use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, HISTORY_LIMIT, INVALID_MOVE, PASS_MOVE, PAST_MOVES,
    RESIGN_MOVE,
};
use crate::zobrist::stone_key;

/// A vertex: a padded board index or one of the sentinel moves.
pub type Vertex = usize;

/// Player color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Return the other player.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Return the index (0 for Black, 1 for White).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Decode a GTP color token (`b`, `black`, `w`, `white`, any case).
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Color::Black),
            "w" | "white" => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stone {
    Empty,
    Black,
    White,
    /// Padding outside the playable area.
    Out,
}

impl Stone {
    /// The color of the stone, if the cell holds one.
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
            _ => None,
        }
    }
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

/// A Go position together with the history needed for ko, superko and
/// feature encoding.
///
/// Cloning yields a fully independent board; search relies on this to play
/// out simulations without touching the game record.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    board_size: usize,
    /// Row width including padding (N + 2).
    stride: usize,
    num_intersections: usize,
    state: Vec<Stone>,
    /// String root of every stone, `INVALID_MOVE` elsewhere.
    parent: Vec<Vertex>,
    /// Next stone in the circular list of each string.
    next: Vec<Vertex>,
    /// Stone count, valid at string roots.
    stones: Vec<usize>,
    /// Distinct liberty count, valid at string roots.
    liberties: Vec<usize>,
    /// Side to move.
    pub to_move: Color,
    /// Komi (compensation points for White).
    pub komi: f32,
    move_num: usize,
    num_passes: usize,
    ko: Vertex,
    hash: u64,
    hash_history: VecDeque<u64>,
    /// Recent stone configurations, most recent first.
    past_states: VecDeque<Vec<Stone>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE, DEFAULT_KOMI)
    }
}

impl Board {
    /// Create an empty board of the given size.
    pub fn new(board_size: usize, komi: f32) -> Self {
        let mut board = Board {
            board_size: 0,
            stride: 0,
            num_intersections: 0,
            state: Vec::new(),
            parent: Vec::new(),
            next: Vec::new(),
            stones: Vec::new(),
            liberties: Vec::new(),
            to_move: Color::Black,
            komi,
            move_num: 0,
            num_passes: 0,
            ko: INVALID_MOVE,
            hash: 0,
            hash_history: VecDeque::new(),
            past_states: VecDeque::new(),
        };
        board.reset(board_size, komi);
        board
    }

    /// Clear the board and start a new game with the given size and komi.
    pub fn reset(&mut self, board_size: usize, komi: f32) {
        let stride = board_size + 2;
        let num_vertices = stride * stride;

        self.board_size = board_size;
        self.stride = stride;
        self.num_intersections = board_size * board_size;
        self.state = vec![Stone::Out; num_vertices];
        for y in 0..board_size {
            for x in 0..board_size {
                let vtx = self.get_vertex(x, y);
                self.state[vtx] = Stone::Empty;
            }
        }
        self.parent = vec![INVALID_MOVE; num_vertices];
        self.next = (0..num_vertices).collect();
        self.stones = vec![0; num_vertices];
        self.liberties = vec![0; num_vertices];
        self.to_move = Color::Black;
        self.komi = komi;
        self.move_num = 0;
        self.num_passes = 0;
        self.ko = INVALID_MOVE;
        self.hash = 0;
        self.hash_history = VecDeque::from([self.hash]);
        self.past_states = VecDeque::from([self.state.clone()]);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn num_intersections(&self) -> usize {
        self.num_intersections
    }

    pub fn move_num(&self) -> usize {
        self.move_num
    }

    /// Consecutive passes ending at the current position.
    pub fn num_passes(&self) -> usize {
        self.num_passes
    }

    /// The point an immediate recapture would retake, or `INVALID_MOVE`.
    pub fn ko_vertex(&self) -> Vertex {
        self.ko
    }

    /// Positional hash of the current stone configuration.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Cell contents at `vertex`; anything outside the array reads as `Out`.
    pub fn stone_at(&self, vertex: Vertex) -> Stone {
        self.state.get(vertex).copied().unwrap_or(Stone::Out)
    }

    /// Liberties of the string containing `vertex` (0 for non-stones).
    pub fn string_liberties(&self, vertex: Vertex) -> usize {
        match self.stone_at(vertex).color() {
            Some(_) => self.liberties[self.parent[vertex]],
            None => 0,
        }
    }

    /// Size of the string containing `vertex` (0 for non-stones).
    pub fn string_size(&self, vertex: Vertex) -> usize {
        match self.stone_at(vertex).color() {
            Some(_) => self.stones[self.parent[vertex]],
            None => 0,
        }
    }

    /// Recent stone configurations, most recent (the current one) first.
    pub fn past_states(&self) -> impl Iterator<Item = &[Stone]> {
        self.past_states.iter().map(Vec::as_slice)
    }

    // -------------------------------------------------------------------------
    // Coordinates
    // -------------------------------------------------------------------------

    /// Vertex for zero-based column `x` and row `y`, or `INVALID_MOVE`.
    pub fn get_vertex(&self, x: usize, y: usize) -> Vertex {
        if x >= self.board_size || y >= self.board_size {
            return INVALID_MOVE;
        }
        (y + 1) * self.stride + (x + 1)
    }

    /// Vertex for a linear intersection index (row-major from A1).
    pub fn index_to_vertex(&self, idx: usize) -> Vertex {
        if idx >= self.num_intersections {
            return INVALID_MOVE;
        }
        self.get_vertex(idx % self.board_size, idx / self.board_size)
    }

    /// Linear intersection index of an on-board vertex.
    pub fn vertex_to_index(&self, vertex: Vertex) -> Option<usize> {
        let (x, y) = self.vertex_to_xy(vertex)?;
        Some(y * self.board_size + x)
    }

    fn vertex_to_xy(&self, vertex: Vertex) -> Option<(usize, usize)> {
        if !self.is_on_board(vertex) {
            return None;
        }
        Some((vertex % self.stride - 1, vertex / self.stride - 1))
    }

    /// True for vertices that name a playable intersection.
    #[inline]
    pub fn is_on_board(&self, vertex: Vertex) -> bool {
        vertex < self.state.len() && self.state[vertex] != Stone::Out
    }

    /// Convert a vertex to GTP text (e.g. "D4", "pass").
    ///
    /// Column letters skip 'I'.
    pub fn vertex_to_text(&self, vertex: Vertex) -> String {
        match vertex {
            PASS_MOVE => return "pass".into(),
            RESIGN_MOVE => return "resign".into(),
            _ => {}
        }
        match self.vertex_to_xy(vertex) {
            Some((x, y)) => {
                let mut col = b'A' + x as u8;
                if col >= b'I' {
                    col += 1;
                }
                format!("{}{}", col as char, y + 1)
            }
            None => "invalid".into(),
        }
    }

    /// Parse GTP vertex text into a vertex.
    ///
    /// Accepts `pass`, `resign` and coordinates like `D4` in any case.
    /// Returns `INVALID_MOVE` for malformed or off-board text.
    pub fn text_to_vertex(&self, text: &str) -> Vertex {
        let lower = text.to_ascii_lowercase();
        match lower.as_str() {
            "pass" => return PASS_MOVE,
            "resign" => return RESIGN_MOVE,
            _ => {}
        }

        let bytes = lower.as_bytes();
        if bytes.len() < 2 || !bytes[0].is_ascii_lowercase() || bytes[0] == b'i' {
            return INVALID_MOVE;
        }
        let mut x = (bytes[0] - b'a') as usize;
        if bytes[0] > b'i' {
            x -= 1;
        }

        let row_text = &lower[1..];
        if !row_text.bytes().all(|b| b.is_ascii_digit()) {
            return INVALID_MOVE;
        }
        match row_text.parse::<usize>() {
            Ok(row) if row >= 1 => self.get_vertex(x, row - 1),
            _ => INVALID_MOVE,
        }
    }

    // -------------------------------------------------------------------------
    // Legality
    // -------------------------------------------------------------------------

    #[inline]
    fn neighbors(&self, vertex: Vertex) -> [Vertex; 4] {
        [
            vertex - self.stride, // North
            vertex + 1,           // East
            vertex + self.stride, // South
            vertex - 1,           // West
        ]
    }

    #[inline]
    fn diagonal_neighbors(&self, vertex: Vertex) -> [Vertex; 4] {
        [
            vertex - self.stride + 1,
            vertex + self.stride + 1,
            vertex + self.stride - 1,
            vertex - self.stride - 1,
        ]
    }

    /// Check whether the side to move may play `vertex`.
    ///
    /// PASS and RESIGN are always legal. A stone move must land on an empty
    /// intersection, must not retake a simple ko and must not be suicide.
    pub fn legal(&self, vertex: Vertex) -> bool {
        match vertex {
            PASS_MOVE | RESIGN_MOVE => true,
            v if !self.is_on_board(v) => false,
            v => self.state[v] == Stone::Empty && v != self.ko && !self.is_suicide(v, self.to_move),
        }
    }

    /// True if a stone of `color` at the empty `vertex` would be left without
    /// liberties.
    fn is_suicide(&self, vertex: Vertex, color: Color) -> bool {
        for n in self.neighbors(vertex) {
            match self.state[n] {
                Stone::Empty => return false,
                Stone::Out => {}
                stone => {
                    let libs = self.liberties[self.parent[n]];
                    if stone.color() == Some(color) {
                        // The friendly string keeps a liberty besides this one.
                        if libs > 1 {
                            return false;
                        }
                    } else if libs == 1 {
                        // Captures, which frees a liberty.
                        return false;
                    }
                }
            }
        }
        true
    }

    /// True if `vertex` is a true eye of `color`.
    ///
    /// All orthogonal neighbors must be `color` stones or padding. Of the
    /// diagonals, a center point tolerates one opponent stone and an edge
    /// point none.
    pub fn is_eye(&self, vertex: Vertex, color: Color) -> bool {
        if !self.is_on_board(vertex) || self.state[vertex] != Stone::Empty {
            return false;
        }
        let own = Stone::from(color);
        for n in self.neighbors(vertex) {
            if self.state[n] != own && self.state[n] != Stone::Out {
                return false;
            }
        }

        let opponent = Stone::from(color.opponent());
        let mut at_edge = false;
        let mut false_count = 0;
        for d in self.diagonal_neighbors(vertex) {
            match self.state[d] {
                Stone::Out => at_edge = true,
                s if s == opponent => false_count += 1,
                _ => {}
            }
        }
        let tolerance = if at_edge { 0 } else { 1 };
        false_count <= tolerance
    }

    /// True if the current position already occurred earlier in the game.
    pub fn superko(&self) -> bool {
        let Some(&current) = self.hash_history.back() else {
            return false;
        };
        self.hash_history.iter().rev().skip(1).any(|&h| h == current)
    }

    // -------------------------------------------------------------------------
    // Move execution
    // -------------------------------------------------------------------------

    /// Play `vertex` for the side to move.
    ///
    /// Returns `false` and leaves the board untouched if the move is illegal.
    pub fn play(&mut self, vertex: Vertex) -> bool {
        if !self.legal(vertex) {
            return false;
        }
        match vertex {
            PASS_MOVE => {
                self.num_passes += 1;
                self.ko = INVALID_MOVE;
            }
            RESIGN_MOVE => {
                self.num_passes = 0;
            }
            _ => {
                self.place_stone(vertex, self.to_move);
                self.num_passes = 0;
            }
        }
        self.move_num += 1;
        self.to_move = self.to_move.opponent();
        self.record_position();
        true
    }

    fn record_position(&mut self) {
        self.hash_history.push_back(self.hash);
        if self.hash_history.len() > HISTORY_LIMIT {
            self.hash_history.pop_front();
        }
        self.past_states.push_front(self.state.clone());
        self.past_states.truncate(PAST_MOVES);
    }

    fn place_stone(&mut self, vertex: Vertex, color: Color) {
        let neighbors = self.neighbors(vertex);

        self.state[vertex] = color.into();
        self.hash ^= stone_key(color, vertex);
        self.parent[vertex] = vertex;
        self.next[vertex] = vertex;
        self.stones[vertex] = 1;
        self.liberties[vertex] = neighbors
            .iter()
            .filter(|&&n| self.state[n] == Stone::Empty)
            .count();

        // Every adjacent string loses this point as a liberty, once.
        let mut seen = [INVALID_MOVE; 4];
        for (i, &n) in neighbors.iter().enumerate() {
            if self.state[n].color().is_some() {
                let root = self.parent[n];
                if !seen[..i].contains(&root) {
                    self.liberties[root] -= 1;
                }
                seen[i] = root;
            }
        }

        let opponent = Stone::from(color.opponent());
        let mut captured = 0;
        let mut capture_vertex = INVALID_MOVE;
        for n in neighbors {
            if self.state[n] == opponent && self.liberties[self.parent[n]] == 0 {
                captured += self.remove_string(n);
                capture_vertex = n;
            }
        }

        let own = Stone::from(color);
        for n in neighbors {
            if self.state[n] == own && self.parent[n] != self.parent[vertex] {
                self.merge_strings(self.parent[vertex], self.parent[n]);
            }
        }

        let root = self.parent[vertex];
        self.ko = if captured == 1 && self.stones[root] == 1 && self.liberties[root] == 1 {
            capture_vertex
        } else {
            INVALID_MOVE
        };
    }

    /// Remove the string containing `vertex`, returning its size.
    fn remove_string(&mut self, vertex: Vertex) -> usize {
        let root = self.parent[vertex];
        let Some(color) = self.state[vertex].color() else {
            return 0;
        };
        let mut removed = 0;
        let mut pos = vertex;
        loop {
            self.state[pos] = Stone::Empty;
            self.hash ^= stone_key(color, pos);
            self.parent[pos] = INVALID_MOVE;

            // The emptied point becomes a liberty of each distinct neighbor string.
            let neighbors = self.neighbors(pos);
            let mut seen = [INVALID_MOVE; 4];
            for (i, &n) in neighbors.iter().enumerate() {
                if self.state[n].color().is_some() {
                    let nroot = self.parent[n];
                    if nroot != root && !seen[..i].contains(&nroot) {
                        self.liberties[nroot] += 1;
                    }
                    seen[i] = nroot;
                }
            }

            removed += 1;
            pos = self.next[pos];
            if pos == vertex {
                break;
            }
        }
        self.stones[root] = 0;
        self.liberties[root] = 0;
        removed
    }

    /// Merge two distinct strings of the same color, keeping the larger root.
    fn merge_strings(&mut self, a: Vertex, b: Vertex) {
        let (keep, absorb) = if self.stones[a] >= self.stones[b] { (a, b) } else { (b, a) };

        // Relabel stones one at a time so a liberty shared by several absorbed
        // stones is found next to an already relabeled stone and counted once.
        let mut pos = absorb;
        loop {
            for n in self.neighbors(pos) {
                if self.state[n] == Stone::Empty {
                    let shared = self.neighbors(n).iter().any(|&nn| self.parent[nn] == keep);
                    if !shared {
                        self.liberties[keep] += 1;
                    }
                }
            }
            self.parent[pos] = keep;
            pos = self.next[pos];
            if pos == absorb {
                break;
            }
        }

        self.stones[keep] += self.stones[absorb];
        self.next.swap(keep, absorb);
    }

    // -------------------------------------------------------------------------
    // Scoring
    // -------------------------------------------------------------------------

    /// Area score (stones plus surrounded empty regions) for each color.
    ///
    /// An empty region counts for a color only if every stone it touches has
    /// that color.
    pub fn area(&self) -> (usize, usize) {
        let mut black = 0;
        let mut white = 0;
        let mut visited = vec![false; self.state.len()];
        let mut stack = Vec::new();

        for vtx in 0..self.state.len() {
            match self.state[vtx] {
                Stone::Black => black += 1,
                Stone::White => white += 1,
                Stone::Empty if !visited[vtx] => {
                    let mut region = 0;
                    let mut reaches_black = false;
                    let mut reaches_white = false;
                    visited[vtx] = true;
                    stack.push(vtx);
                    while let Some(pt) = stack.pop() {
                        region += 1;
                        for n in self.neighbors(pt) {
                            match self.state[n] {
                                Stone::Empty if !visited[n] => {
                                    visited[n] = true;
                                    stack.push(n);
                                }
                                Stone::Black => reaches_black = true,
                                Stone::White => reaches_white = true,
                                _ => {}
                            }
                        }
                    }
                    match (reaches_black, reaches_white) {
                        (true, false) => black += region,
                        (false, true) => white += region,
                        _ => {}
                    }
                }
                _ => {}
            }
        }
        (black, white)
    }

    /// Final score under area rules: Black minus White minus komi.
    ///
    /// Positive favors Black. Meaningful once both players have passed.
    pub fn final_score(&self) -> f32 {
        let (black, white) = self.area();
        black as f32 - white as f32 - self.komi
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: String = (0..self.board_size)
            .map(|x| {
                let c = b'A' + x as u8;
                let c = if c >= b'I' { c + 1 } else { c };
                format!("{} ", c as char)
            })
            .collect();

        writeln!(f, "   {columns}")?;
        for y in (0..self.board_size).rev() {
            write!(f, "{:>2} ", y + 1)?;
            for x in 0..self.board_size {
                let vtx = self.get_vertex(x, y);
                let ch = match self.state[vtx] {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    _ => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f, "{}", y + 1)?;
        }
        writeln!(f, "   {columns}")?;
        writeln!(
            f,
            "to move: {}, komi: {}, move: {}",
            self.to_move, self.komi, self.move_num
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(board: &mut Board, moves: &[&str]) {
        for mv in moves {
            let vtx = board.text_to_vertex(mv);
            assert!(board.play(vtx), "move {mv} should be legal");
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::new(9, 7.5);
        assert_eq!(board.num_intersections(), 81);
        assert_eq!(board.move_num(), 0);
        assert_eq!(board.to_move, Color::Black);
        for idx in 0..81 {
            assert_eq!(board.stone_at(board.index_to_vertex(idx)), Stone::Empty);
        }
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut board = Board::new(9, 7.5);
        play_all(&mut board, &["E5"]);
        let e5 = board.text_to_vertex("E5");
        assert_eq!(board.string_liberties(e5), 4);

        let a1 = board.text_to_vertex("A1");
        board.play(PASS_MOVE);
        board.play(a1);
        assert_eq!(board.string_liberties(a1), 2);
    }

    #[test]
    fn test_merge_counts_shared_liberties_once() {
        let mut board = Board::new(9, 7.5);
        // Black C3, D3 then D4 closes an L; the shared point C4 counts once.
        play_all(&mut board, &["C3", "pass", "D4", "pass", "D3"]);
        let c3 = board.text_to_vertex("C3");
        assert_eq!(board.string_size(c3), 3);
        // Liberties: B3 C2 C4 D2 E3 E4 D5 = 7
        assert_eq!(board.string_liberties(c3), 7);
    }

    #[test]
    fn test_capture_restores_liberties() {
        let mut board = Board::new(9, 7.5);
        // White D4 surrounded by black C4, E4, D5, D3.
        play_all(&mut board, &["C4", "D4", "E4", "pass", "D5", "pass", "D3"]);
        let d4 = board.text_to_vertex("D4");
        assert_eq!(board.stone_at(d4), Stone::Empty);
        let c4 = board.text_to_vertex("C4");
        assert_eq!(board.string_liberties(c4), 4);
    }

    #[test]
    fn test_ko_point_and_recapture() {
        let mut board = Board::new(9, 7.5);
        // Classic ko shape around D4/E4.
        play_all(
            &mut board,
            &["D5", "E5", "C4", "F4", "D3", "E3", "E4", "D4"],
        );
        // White D4 captured black E4.
        let e4 = board.text_to_vertex("E4");
        assert_eq!(board.stone_at(e4), Stone::Empty);
        assert_eq!(board.ko_vertex(), e4);
        assert!(!board.legal(e4), "immediate recapture is ko");

        // After a ko threat exchange the recapture is allowed.
        play_all(&mut board, &["J9", "J8"]);
        assert!(board.legal(e4));
    }

    #[test]
    fn test_suicide_is_illegal() {
        let mut board = Board::new(9, 7.5);
        play_all(&mut board, &["A2", "pass", "B1"]);
        let a1 = board.text_to_vertex("A1");
        assert_eq!(board.to_move, Color::White);
        assert!(!board.legal(a1));
        let before = board.clone();
        assert!(!board.play(a1));
        assert_eq!(board, before);
    }

    #[test]
    fn test_capture_is_not_suicide() {
        let mut board = Board::new(9, 7.5);
        // Black A2 and B1 sit in atari inside white B2, A3, C1. White A1 has
        // no liberty of its own but captures both stones.
        play_all(&mut board, &["A2", "B2", "B1", "A3", "pass", "C1", "pass"]);
        let a1 = board.text_to_vertex("A1");
        assert!(board.legal(a1));
        assert!(board.play(a1));
        assert_eq!(board.stone_at(board.text_to_vertex("A2")), Stone::Empty);
        assert_eq!(board.stone_at(board.text_to_vertex("B1")), Stone::Empty);
    }

    #[test]
    fn test_pass_counting() {
        let mut board = Board::new(9, 7.5);
        board.play(PASS_MOVE);
        assert_eq!(board.num_passes(), 1);
        play_all(&mut board, &["E5"]);
        assert_eq!(board.num_passes(), 0);
        board.play(PASS_MOVE);
        board.play(PASS_MOVE);
        assert_eq!(board.num_passes(), 2);
    }

    #[test]
    fn test_text_roundtrip() {
        for size in [9, 13, 19, 25] {
            let board = Board::new(size, 7.5);
            for y in 0..size {
                for x in 0..size {
                    let vtx = board.get_vertex(x, y);
                    let text = board.vertex_to_text(vtx);
                    assert_eq!(board.text_to_vertex(&text), vtx, "roundtrip {text}");
                }
            }
        }
    }

    #[test]
    fn test_text_skips_i() {
        let board = Board::new(19, 7.5);
        assert_eq!(board.vertex_to_text(board.get_vertex(7, 0)), "H1");
        assert_eq!(board.vertex_to_text(board.get_vertex(8, 0)), "J1");
        assert_eq!(board.text_to_vertex("I5"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("j1"), board.get_vertex(8, 0));
    }

    #[test]
    fn test_text_rejects_off_board() {
        let board = Board::new(9, 7.5);
        assert_eq!(board.text_to_vertex("K1"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("A10"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("A0"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("Z"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("PASS"), PASS_MOVE);
        assert_eq!(board.text_to_vertex("Resign"), RESIGN_MOVE);
    }

    #[test]
    fn test_text_rejects_signed_rows() {
        let board = Board::new(9, 7.5);
        assert_eq!(board.text_to_vertex("A+5"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("A-5"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("A 5"), INVALID_MOVE);
        assert_eq!(board.text_to_vertex("A5"), board.get_vertex(0, 4));
    }

    #[test]
    fn test_area_score_empty_board() {
        let board = Board::new(9, 7.5);
        assert_eq!(board.area(), (0, 0));
        assert!((board.final_score() + 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_area_score_single_stone_owns_board() {
        let mut board = Board::new(9, 0.5);
        play_all(&mut board, &["E5"]);
        assert_eq!(board.area(), (81, 0));
        assert!(board.final_score() > 0.0);
    }

    #[test]
    fn test_is_eye() {
        let mut board = Board::new(9, 7.5);
        play_all(&mut board, &["A2", "pass", "B1"]);
        let a1 = board.text_to_vertex("A1");
        assert!(board.is_eye(a1, Color::Black));
        assert!(!board.is_eye(a1, Color::White));
        assert!(!board.is_eye(board.text_to_vertex("E5"), Color::Black));
    }

    #[test]
    fn test_hash_tracks_stones() {
        let mut board = Board::new(9, 7.5);
        assert_eq!(board.hash(), 0);
        play_all(&mut board, &["E5"]);
        assert_ne!(board.hash(), 0);
        assert!(!board.superko());
    }

    #[test]
    fn test_superko_after_cleared_ko() {
        let mut board = Board::new(9, 7.5);
        // Passes clear the ko point, so Black may retake, which recreates the
        // position from before White's capture.
        play_all(
            &mut board,
            &["D5", "E5", "C4", "F4", "D3", "E3", "E4", "D4", "pass", "pass", "E4"],
        );
        assert!(board.superko());
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("B"), Some(Color::Black));
        assert_eq!(Color::parse("white"), Some(Color::White));
        assert_eq!(Color::parse("red"), None);
    }
}
