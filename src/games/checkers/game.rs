//! Checkers rules: simple moves, mandatory multi-jump captures, crowning.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::GameId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::rng::Seed;
use crate::games::square::{Square, BOARD_SIZE};
use crate::rules::{GameResult, RulesEngine};

/// Squares jumped in one move, in jump order.
pub type Captures = SmallVec<[Square; 4]>;

const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const UP_DIAGONALS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const DOWN_DIAGONALS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

/// A man or king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checker {
    pub owner: PlayerId,
    pub king: bool,
}

impl Checker {
    #[must_use]
    pub const fn man(owner: PlayerId) -> Self {
        Self { owner, king: false }
    }

    #[must_use]
    pub const fn king(owner: PlayerId) -> Self {
        Self { owner, king: true }
    }

    /// Diagonals this piece may move and jump along.
    fn directions(self) -> &'static [(i8, i8)] {
        match (self.king, self.owner.0) {
            (true, _) => &ALL_DIAGONALS,
            (false, 0) => &UP_DIAGONALS,
            (false, _) => &DOWN_DIAGONALS,
        }
    }

    /// Row on which a man is crowned.
    const fn crown_row(self) -> u8 {
        if self.owner.0 == 0 {
            BOARD_SIZE - 1
        } else {
            0
        }
    }

    /// This piece after landing on `sq`.
    fn landed_on(self, sq: Square) -> Self {
        Self {
            king: self.king || sq.y == self.crown_row(),
            ..self
        }
    }
}

/// Checker placement, indexed `[y][x]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckersBoard {
    squares: [[Option<Checker>; 8]; 8],
}

impl CheckersBoard {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Twelve men per side on the dark squares, seat 0 on rows 0..=2.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for sq in Square::all().filter(|sq| Self::is_dark(*sq)) {
            match sq.y {
                0..=2 => board.set(sq, Some(Checker::man(PlayerId::new(0)))),
                5..=7 => board.set(sq, Some(Checker::man(PlayerId::new(1)))),
                _ => {}
            }
        }
        board
    }

    /// Playable squares.
    #[must_use]
    pub const fn is_dark(sq: Square) -> bool {
        (sq.x + sq.y) % 2 == 1
    }

    #[must_use]
    pub fn get(&self, sq: Square) -> Option<Checker> {
        self.squares
            .get(usize::from(sq.y))
            .and_then(|row| row.get(usize::from(sq.x)))
            .copied()
            .flatten()
    }

    pub fn set(&mut self, sq: Square, piece: Option<Checker>) {
        if let Some(cell) = self
            .squares
            .get_mut(usize::from(sq.y))
            .and_then(|row| row.get_mut(usize::from(sq.x)))
        {
            *cell = piece;
        }
    }

    /// A seat's pieces, row by row.
    pub fn pieces(&self, owner: PlayerId) -> impl Iterator<Item = (Square, Checker)> + '_ {
        Square::all().filter_map(move |sq| {
            self.get(sq)
                .filter(|piece| piece.owner == owner)
                .map(|piece| (sq, piece))
        })
    }
}

/// A checkers move. `captures` is empty for a simple move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckersMove {
    pub from: Square,
    pub to: Square,
    pub captures: Captures,
}

impl CheckersMove {
    #[must_use]
    pub fn step(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captures: Captures::new(),
        }
    }

    #[must_use]
    pub fn jump(from: Square, to: Square, captures: &[Square]) -> Self {
        Self {
            from,
            to,
            captures: Captures::from_slice(captures),
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckersState {
    pub board: CheckersBoard,
    pub turn: PlayerId,
    /// Piece that must keep capturing before the turn can pass.
    pub forced_piece: Option<Square>,
}

impl CheckersState {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            board: CheckersBoard::standard(),
            turn: PlayerId::new(0),
            forced_piece: None,
        }
    }
}

/// One frame of the jump search. Each frame owns its board snapshot.
struct JumpFrame {
    board: CheckersBoard,
    at: Square,
    piece: Checker,
    captures: Captures,
}

/// Checkers rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checkers;

impl Checkers {
    /// Every maximal jump chain for the piece on `from`.
    ///
    /// Runs depth-first over an explicit stack. Captured pieces are removed
    /// from the frame's own board copy, so no branch sees another's jumps.
    fn capture_chains(board: &CheckersBoard, from: Square) -> Vec<CheckersMove> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };

        let mut lifted = *board;
        lifted.set(from, None);

        let mut chains = Vec::new();
        let mut stack = vec![JumpFrame {
            board: lifted,
            at: from,
            piece,
            captures: Captures::new(),
        }];

        while let Some(frame) = stack.pop() {
            let mut extended = false;

            // Reverse push so frames pop in direction order.
            for &(dx, dy) in frame.piece.directions().iter().rev() {
                let (Some(over), Some(land)) = (frame.at.offset(dx, dy), frame.at.offset(2 * dx, 2 * dy)) else {
                    continue;
                };
                let jumpable = frame.board.get(over).is_some_and(|p| p.owner != piece.owner);
                if !jumpable || frame.board.get(land).is_some() {
                    continue;
                }

                extended = true;
                let mut board = frame.board;
                board.set(over, None);
                let mut captures = frame.captures.clone();
                captures.push(over);
                stack.push(JumpFrame {
                    board,
                    at: land,
                    piece: frame.piece.landed_on(land),
                    captures,
                });
            }

            if !extended && !frame.captures.is_empty() {
                chains.push(CheckersMove {
                    from,
                    to: frame.at,
                    captures: frame.captures,
                });
            }
        }

        chains
    }

    /// The piece after travelling `mv`, crowned if any landing reached its crown row.
    fn moved_piece(piece: Checker, mv: &CheckersMove) -> Checker {
        let mut at = mv.from;
        let mut piece = piece;
        for over in &mv.captures {
            let dx = over.x as i8 - at.x as i8;
            let dy = over.y as i8 - at.y as i8;
            let Some(land) = over.offset(dx, dy) else {
                break;
            };
            piece = piece.landed_on(land);
            at = land;
        }
        piece.landed_on(mv.to)
    }

    fn simple_moves(board: &CheckersBoard, from: Square, piece: Checker, out: &mut Vec<CheckersMove>) {
        for &(dx, dy) in piece.directions() {
            if let Some(to) = from.offset(dx, dy).filter(|to| board.get(*to).is_none()) {
                out.push(CheckersMove::step(from, to));
            }
        }
    }
}

impl RulesEngine for Checkers {
    type State = CheckersState;
    type Move = CheckersMove;

    fn game(&self) -> GameId {
        GameId::Checkers
    }

    fn init(&self, player_count: usize, _seed: Option<Seed>) -> Result<CheckersState> {
        GameId::Checkers.check_player_count(player_count)?;
        Ok(CheckersState::standard())
    }

    fn current_player(&self, state: &CheckersState) -> PlayerId {
        state.turn
    }

    fn legal_moves(&self, state: &CheckersState) -> Vec<CheckersMove> {
        if let Some(forced) = state.forced_piece {
            let owned = state.board.get(forced).is_some_and(|p| p.owner == state.turn);
            return if owned {
                Self::capture_chains(&state.board, forced)
            } else {
                Vec::new()
            };
        }

        let captures: Vec<_> = state
            .board
            .pieces(state.turn)
            .flat_map(|(sq, _)| Self::capture_chains(&state.board, sq))
            .collect();
        if !captures.is_empty() {
            return captures;
        }

        let mut moves = Vec::new();
        for (sq, piece) in state.board.pieces(state.turn) {
            Self::simple_moves(&state.board, sq, piece, &mut moves);
        }
        moves
    }

    fn apply_move(&self, state: &CheckersState, mv: &CheckersMove) -> CheckersState {
        let Some(piece) = state.board.get(mv.from) else {
            return state.clone();
        };

        let mut board = state.board;
        board.set(mv.from, None);
        for captured in &mv.captures {
            board.set(*captured, None);
        }
        board.set(mv.to, Some(Self::moved_piece(piece, mv)));

        let keeps_capturing = mv.is_capture() && !Self::capture_chains(&board, mv.to).is_empty();
        if keeps_capturing {
            CheckersState {
                board,
                turn: state.turn,
                forced_piece: Some(mv.to),
            }
        } else {
            CheckersState {
                board,
                turn: state.turn.next(2),
                forced_piece: None,
            }
        }
    }

    fn is_terminal(&self, state: &CheckersState) -> GameResult {
        let has_pieces = state.board.pieces(state.turn).next().is_some();
        if !has_pieces || self.legal_moves(state).is_empty() {
            GameResult::Winner(state.turn.next(2))
        } else {
            GameResult::InProgress
        }
    }
}
