//! Time management: GTP clock bookkeeping and per-move thinking budgets.
//!
//! Each color has a main-time pool followed by Canadian byo-yomi: a period of
//! `byo_time` seconds in which `byo_stones` moves must be played. When a
//! period is completed it starts over.
//!
//! The thinking budget for a move is the larger of
//! - a share of the remaining main time, `BASE_SHARE * (N / 9)` on the first
//!   move, halving every `N * N` moves and capped at `MAX_SHARE`, and
//! - the byo-yomi allotment per stone,
//!
//! with `LAG_BUFFER` seconds held back from both.

use std::fmt;
use std::time::Instant;

use crate::board::Color;
use crate::constants::{BASE_SHARE, DEFAULT_BYO_TIME, LAG_BUFFER, MAX_SHARE};

/// Per-color clocks for a game.
#[derive(Debug, Clone)]
pub struct TimeControl {
    main_time: f64,
    byo_time: f64,
    byo_stones: u32,
    maintime_left: [f64; 2],
    byotime_left: [f64; 2],
    stones_left: [u32; 2],
    in_byo: [bool; 2],
    clock_time: Instant,
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeControl {
    /// No main time and one week of byo-yomi per move.
    pub fn new() -> Self {
        let mut tc = Self {
            main_time: 0.0,
            byo_time: DEFAULT_BYO_TIME,
            byo_stones: 1,
            maintime_left: [0.0; 2],
            byotime_left: [0.0; 2],
            stones_left: [0; 2],
            in_byo: [false; 2],
            clock_time: Instant::now(),
        };
        tc.reset();
        tc
    }

    /// Restart both clocks from the current settings.
    pub fn reset(&mut self) {
        for c in 0..2 {
            self.maintime_left[c] = self.main_time;
            self.byotime_left[c] = self.byo_time;
            self.stones_left[c] = self.byo_stones;
            self.in_byo[c] = self.main_time <= 0.0;
        }
    }

    /// Apply GTP `time_settings` (seconds, seconds, stones).
    ///
    /// Zero main time with a byo-yomi period but no stones means "no time
    /// limit", which maps to the defaults.
    pub fn time_settings(&mut self, main_time: u64, byo_time: u64, byo_stones: u32) {
        if main_time == 0 && byo_time > 0 && byo_stones == 0 {
            *self = Self::new();
            return;
        }
        self.main_time = main_time as f64;
        self.byo_time = byo_time as f64;
        self.byo_stones = byo_stones;
        self.reset();
    }

    /// Apply GTP `time_left`: `stones == 0` reports main time, otherwise the
    /// time and stones remaining in the current byo-yomi period.
    pub fn time_left(&mut self, color: Color, time: u64, stones: u32) {
        let c = color.index();
        if stones == 0 {
            self.maintime_left[c] = time as f64;
            self.in_byo[c] = false;
        } else {
            self.maintime_left[c] = 0.0;
            self.byotime_left[c] = time as f64;
            self.stones_left[c] = stones;
            self.in_byo[c] = true;
        }
    }

    /// Start timing a thinking episode.
    pub fn clock(&mut self) {
        self.clock_time = Instant::now();
    }

    /// Seconds since the last [`clock`](Self::clock).
    pub fn elapsed(&self) -> f64 {
        self.clock_time.elapsed().as_secs_f64()
    }

    /// Charge the current episode to `color`'s clock.
    pub fn took_time(&mut self, color: Color) {
        let c = color.index();
        let mut taken = self.elapsed();

        if !self.in_byo[c] {
            if self.maintime_left[c] >= taken {
                self.maintime_left[c] -= taken;
                return;
            }
            taken -= self.maintime_left[c];
            self.maintime_left[c] = 0.0;
            if self.byo_stones == 0 {
                return;
            }
            self.in_byo[c] = true;
            self.byotime_left[c] = self.byo_time;
            self.stones_left[c] = self.byo_stones;
        }

        self.byotime_left[c] = (self.byotime_left[c] - taken).max(0.0);
        self.stones_left[c] = self.stones_left[c].saturating_sub(1);
        if self.stones_left[c] == 0 {
            self.stones_left[c] = self.byo_stones;
            self.byotime_left[c] = self.byo_time;
        }
    }

    /// Maximum seconds `color` should think about move `move_num`.
    pub fn get_thinking_time(&self, color: Color, board_size: usize, move_num: usize) -> f64 {
        let c = color.index();
        let size = board_size.max(1) as f64;

        let main_budget = if self.in_byo[c] {
            0.0
        } else {
            let decay = 0.5f64.powf(move_num as f64 / (size * size));
            let share = (BASE_SHARE * size / 9.0 * decay).min(MAX_SHARE);
            share * (self.maintime_left[c] - LAG_BUFFER).max(0.0)
        };

        let byo_budget = if self.in_byo[c] {
            (self.byotime_left[c] - LAG_BUFFER).max(0.0) / self.stones_left[c].max(1) as f64
        } else if self.byo_stones > 0 {
            (self.byo_time - LAG_BUFFER).max(0.0) / self.byo_stones as f64
        } else {
            0.0
        };

        main_budget.max(byo_budget).max(0.0)
    }

    /// True once the current episode has used `max_time` seconds.
    pub fn should_stop(&self, max_time: f64) -> bool {
        self.elapsed() >= max_time
    }

    /// Whether `color` has entered byo-yomi.
    pub fn in_byo_yomi(&self, color: Color) -> bool {
        self.in_byo[color.index()]
    }

    /// Remaining main time for `color`, in seconds.
    pub fn main_time_left(&self, color: Color) -> f64 {
        self.maintime_left[color.index()]
    }

    /// Remaining period time and stones for `color`.
    pub fn byo_yomi_left(&self, color: Color) -> (f64, u32) {
        let c = color.index();
        (self.byotime_left[c], self.stones_left[c])
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in [Color::Black, Color::White] {
            let c = color.index();
            if self.in_byo[c] {
                write!(
                    f,
                    "{color}: byo-yomi {:.1}s for {} stones",
                    self.byotime_left[c], self.stones_left[c]
                )?;
            } else {
                write!(f, "{color}: main {:.1}s", self.maintime_left[c])?;
            }
            if color == Color::Black {
                write!(f, " | ")?;
            }
        }
        Ok(())
    }
}
