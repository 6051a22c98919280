//! Constants for board geometry, search parameters, and time management.
//!
//! The board size is chosen at runtime (`boardsize` over GTP), so only the
//! limits and defaults live here. Everything that depends on the actual size
//! is computed by [`Board`](crate::board::Board).

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Smallest accepted board size.
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest accepted board size. Column letters A-Z without 'I' give 25 columns.
pub const MAX_BOARD_SIZE: usize = 25;

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

/// Number of past stone configurations kept for feature encoding.
pub const PAST_MOVES: usize = 4;

/// Number of input planes produced by the feature encoder.
pub const INPUT_PLANES: usize = 2 * PAST_MOVES + 2;

/// Upper bound on the number of position hashes kept for superko detection.
pub const HISTORY_LIMIT: usize = 3 * MAX_BOARD_SIZE * MAX_BOARD_SIZE;

// =============================================================================
// Special Move Values
// =============================================================================

/// Pass move marker. Sentinels sit far above any padded board index.
pub const PASS_MOVE: usize = usize::MAX - 1;

/// Resign move marker.
pub const RESIGN_MOVE: usize = usize::MAX;

/// Marker for text or coordinates that do not name a vertex.
pub const INVALID_MOVE: usize = usize::MAX - 2;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of playouts per move.
pub const DEFAULT_PLAYOUTS: usize = 400;

/// PUCT exploration constant.
pub const C_PUCT: f32 = 0.5;

/// Win rate below which the engine resigns.
pub const RESIGN_THRESHOLD: f32 = 0.1;

/// Scores closer to zero than this count as a draw.
pub const SCORE_EPSILON: f32 = 1e-4;

/// Rollouts stop after this many moves per intersection.
pub const ROLLOUT_LENGTH_FACTOR: usize = 3;

// =============================================================================
// Time Control
// =============================================================================

/// Default byo-yomi period: one week per move, i.e. effectively unbounded.
pub const DEFAULT_BYO_TIME: f64 = 7.0 * 24.0 * 60.0 * 60.0;

/// Seconds held back from every budget to absorb protocol latency.
pub const LAG_BUFFER: f64 = 1.0;

/// Share of the remaining main time spent on the first move of a 9x9 game.
pub const BASE_SHARE: f64 = 0.05;

/// Upper bound on the share of remaining main time spent on a single move.
pub const MAX_SHARE: f64 = 0.25;
