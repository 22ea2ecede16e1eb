use rand::Rng;
use std::fmt;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All directions, in the order the search considers them.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Checked conversion from an external integer encoding.
    ///
    /// Returns `None` for anything outside `0..=3`; invalid input is rejected,
    /// never coerced to a direction.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Move::Up),
            1 => Some(Move::Down),
            2 => Some(Move::Left),
            3 => Some(Move::Right),
            _ => None,
        }
    }

    // Signed row-major index offset a tile travels by, per step.
    #[inline]
    fn offset(self) -> isize {
        match self {
            Move::Up => -4,
            Move::Down => 4,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    /// The four lines perpendicular to this direction, each ordered from the
    /// destination edge outward.
    pub(crate) fn lines(self) -> [[usize; 4]; 4] {
        let step = -self.offset();
        let starts: [usize; 4] = match self {
            Move::Up => [0, 1, 2, 3],
            Move::Down => [12, 13, 14, 15],
            Move::Left => [0, 4, 8, 12],
            Move::Right => [3, 7, 11, 15],
        };
        let mut lines = [[0usize; 4]; 4];
        for (line, &start) in lines.iter_mut().zip(starts.iter()) {
            for (k, cell) in line.iter_mut().enumerate() {
                *cell = (start as isize + step * k as isize) as usize;
            }
        }
        lines
    }
}

/// A 4x4 2048 board: 16 cells row-major, each 0 (empty) or a power of two >= 2.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board([u32; 16]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([0; 16]);

    /// Construct a `Board` from its 16 row-major cell values.
    #[inline]
    pub fn from_cells(cells: [u32; 16]) -> Self {
        Board(cells)
    }

    /// Borrow the 16 row-major cell values.
    #[inline]
    pub fn cells(&self) -> &[u32; 16] {
        &self.0
    }

    /// Value of the cell at `idx` (row-major, `0..16`).
    #[inline]
    pub fn tile(&self, idx: usize) -> u32 {
        self.0[idx]
    }

    /// Count the empty cells.
    #[inline]
    pub fn count_empty(&self) -> usize {
        self.0.iter().filter(|&&v| v == 0).count()
    }

    /// Indices of the empty cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
    }

    /// Highest tile value present (0 on an empty board).
    #[inline]
    pub fn highest_tile(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    /// Copy of this board with `value` placed into the empty cell at `idx`.
    #[inline]
    pub fn with_tile(mut self, idx: usize, value: u32) -> Self {
        debug_assert_eq!(self.0[idx], 0, "with_tile target cell must be empty");
        self.0[idx] = value;
        self
    }

    /// Return the board resulting from sliding/merging tiles in `dir`.
    ///
    /// No tile is spawned; compare with the input to learn whether anything
    /// moved.
    ///
    /// ```
    /// use anti_2048::engine::{Board, Move};
    /// let b = Board::from_cells([2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// let shifted = b.shift(Move::Left);
    /// assert_eq!(shifted.cells()[0], 4);
    /// assert_ne!(shifted, b);
    /// ```
    pub fn shift(self, dir: Move) -> Self {
        let mut out = self;
        for line in dir.lines() {
            let mut cells = [
                self.0[line[0]],
                self.0[line[1]],
                self.0[line[2]],
                self.0[line[3]],
            ];
            collapse_line(&mut cells);
            for (k, &idx) in line.iter().enumerate() {
                out.0[idx] = cells[k];
            }
        }
        out
    }

    /// True if sliding in `dir` would move or merge at least one tile.
    pub fn can_move(&self, dir: Move) -> bool {
        dir.lines().iter().any(|line| {
            line.windows(2).any(|pair| {
                let ahead = self.0[pair[0]];
                let behind = self.0[pair[1]];
                behind != 0 && (ahead == 0 || ahead == behind)
            })
        })
    }

    /// The directions in which at least one tile can slide or merge.
    ///
    /// Empty exactly when the board is terminal (see [`Board::is_lost`]).
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|&dir| self.can_move(dir))
            .collect()
    }

    /// True iff the board has no empty cell and no orthogonally adjacent pair
    /// of equal tiles. A full board can still have a legal merge, so both
    /// checks are required. Recomputed on every call.
    pub fn is_lost(&self) -> bool {
        if self.0.iter().any(|&v| v == 0) {
            return false;
        }
        for i in 0..16 {
            let v = self.0[i];
            if i % 4 < 3 && self.0[i + 1] == v {
                return false;
            }
            if i < 12 && self.0[i + 4] == v {
                return false;
            }
        }
        true
    }
}

// Compact one line toward index 0, merging equal neighbors at most once per
// resulting cell. The line arrives ordered destination-edge first, so tiles
// nearest the edge resolve first and a chain of equal tiles collapses into
// one merged pair plus a leftover.
fn collapse_line(line: &mut [u32; 4]) {
    let mut write = 0;
    let mut last_merged = false;
    for read in 0..4 {
        let val = line[read];
        if val == 0 {
            continue;
        }
        line[read] = 0;
        if write > 0 && !last_merged && line[write - 1] == val {
            line[write - 1] = val * 2;
            last_merged = true;
        } else {
            line[write] = val;
            write += 1;
            last_merged = false;
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(")?;
        for row in 0..4 {
            if row > 0 {
                write!(f, " | ")?;
            }
            let r = &self.0[row * 4..row * 4 + 4];
            write!(f, "{} {} {} {}", r[0], r[1], r[2], r[3])?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            if row > 0 {
                writeln!(f, "--------------------------------")?;
            }
            let cells: Vec<String> = (0..4)
                .map(|col| {
                    let v = self.0[row * 4 + col];
                    if v == 0 {
                        " ".repeat(7)
                    } else {
                        format!("{:^7}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// A board plus gameplay metadata: the most recently spawned cell and the
/// count of successfully applied moves.
///
/// Transitions are value-semantic; every method returns a fresh state and
/// leaves the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    last_spawn: Option<usize>,
    moves_made: u32,
}

impl GameState {
    /// Start a game: an empty board seeded with exactly two random tiles.
    ///
    /// Deterministic with a seeded RNG:
    /// ```
    /// use anti_2048::engine::GameState;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(42);
    /// let state = GameState::new(&mut rng);
    /// assert_eq!(state.board().count_empty(), 14);
    /// assert_eq!(state.moves_made(), 0);
    /// ```
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let state = GameState {
            board: Board::EMPTY,
            last_spawn: None,
            moves_made: 0,
        };
        state.spawn_tile(rng).spawn_tile(rng)
    }

    /// Adopt an existing board position with fresh metadata (no spawn
    /// recorded, move counter at zero).
    pub fn from_board(board: Board) -> Self {
        GameState {
            board,
            last_spawn: None,
            moves_made: 0,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Index of the most recently spawned tile, if any.
    #[inline]
    pub fn last_spawn(&self) -> Option<usize> {
        self.last_spawn
    }

    /// Number of direction applications that moved or merged at least one
    /// tile. Never decreases.
    #[inline]
    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    #[inline]
    pub fn is_lost(&self) -> bool {
        self.board.is_lost()
    }

    /// Slide/merge in `dir` without spawning. Returns the next state and
    /// whether anything moved; when nothing moved the state comes back
    /// unchanged, counter included.
    pub fn apply_move(&self, dir: Move) -> (GameState, bool) {
        let shifted = self.board.shift(dir);
        if shifted == self.board {
            return (*self, false);
        }
        let next = GameState {
            board: shifted,
            last_spawn: None,
            moves_made: self.moves_made + 1,
        };
        (next, true)
    }

    /// Place a 2 (90%) or a 4 (10%) into a uniformly random empty cell and
    /// record its index.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell. Callers must check
    /// [`GameState::is_lost`] or emptiness first; spawning on a full board is
    /// a precondition violation, not a recoverable condition.
    pub fn spawn_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        let empties: Vec<usize> = self.board.empty_cells().collect();
        assert!(
            !empties.is_empty(),
            "spawn_tile called on a board with no empty cell"
        );
        let idx = empties[rng.gen_range(0..empties.len())];
        let value = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
        GameState {
            board: self.board.with_tile(idx, value),
            last_spawn: Some(idx),
            moves_made: self.moves_made,
        }
    }

    /// The externally visible gameplay transition: apply `dir`, then spawn a
    /// tile only if the move changed the board and the result is not
    /// terminal. The move counter increments only when the move changed the
    /// board.
    pub fn apply_move_and_spawn<R: Rng + ?Sized>(&self, dir: Move, rng: &mut R) -> GameState {
        let (next, moved) = self.apply_move(dir);
        if moved && !next.board.is_lost() {
            next.spawn_tile(rng)
        } else {
            next
        }
    }
}
