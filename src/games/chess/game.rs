//! Chess rules: move generation, application, termination.

use serde::{Deserialize, Serialize};

use super::board::{
    Board, Color, Piece, PieceKind, BISHOP_DIRECTIONS, KING_STEPS, KNIGHT_STEPS, ROOK_DIRECTIONS,
};
use crate::core::config::GameId;
use crate::core::error::Result;
use crate::core::player::PlayerId;
use crate::core::rng::Seed;
use crate::games::square::Square;
use crate::rules::{GameResult, RulesEngine};

/// Half-moves without a pawn move or capture that end the game in a draw.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Promotion choice, `'q' | 'r' | 'b' | 'n'` on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Promotion {
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "n")]
    Knight,
}

impl Promotion {
    /// Generation order.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

/// A chess move. Castling is the king moving two files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<Promotion>,
}

impl ChessMove {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[must_use]
    pub const fn promoting(from: Square, to: Square, promotion: Promotion) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Remaining castling rights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    #[must_use]
    pub const fn allows(self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_kingside,
            (Color::White, false) => self.white_queenside,
            (Color::Black, true) => self.black_kingside,
            (Color::Black, false) => self.black_queenside,
        }
    }

    /// Drop every right tied to a square a move leaves from or lands on.
    fn touch(&mut self, sq: Square) {
        match (sq.x, sq.y) {
            (4, 0) => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            (4, 7) => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
            (7, 0) => self.white_kingside = false,
            (0, 0) => self.white_queenside = false,
            (7, 7) => self.black_kingside = false,
            (0, 7) => self.black_queenside = false,
            _ => {}
        }
    }
}

/// Full chess position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChessState {
    pub board: Board,
    pub turn: PlayerId,
    pub castling: CastlingRights,
    /// Square a pawn skipped on the previous ply, capturable for one ply only.
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl ChessState {
    /// Standard starting position, White to move.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            board: Board::standard(),
            turn: PlayerId::new(0),
            castling: CastlingRights::all(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Side to move.
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        Color::of_seat(self.turn)
    }
}

/// Files involved in one castling direction.
struct CastlePath {
    kingside: bool,
    rook_x: u8,
    empty: &'static [u8],
    crossed_x: u8,
    king_to_x: u8,
}

impl CastlePath {
    const KINGSIDE: CastlePath = CastlePath {
        kingside: true,
        rook_x: 7,
        empty: &[5, 6],
        crossed_x: 5,
        king_to_x: 6,
    };

    const QUEENSIDE: CastlePath = CastlePath {
        kingside: false,
        rook_x: 0,
        empty: &[1, 2, 3],
        crossed_x: 3,
        king_to_x: 2,
    };
}

/// Chess rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Chess;

impl Chess {
    /// Moves that follow piece movement rules, before the king-safety filter.
    fn pseudo_moves(state: &ChessState) -> Vec<ChessMove> {
        let side = state.side_to_move();
        let mut moves = Vec::new();

        for (from, piece) in state.board.pieces(side) {
            match piece.kind {
                PieceKind::Pawn => Self::pawn_moves(state, from, side, &mut moves),
                PieceKind::Knight => Self::step_moves(&state.board, from, side, &KNIGHT_STEPS, &mut moves),
                PieceKind::Bishop => Self::slide_moves(&state.board, from, side, &BISHOP_DIRECTIONS, &mut moves),
                PieceKind::Rook => Self::slide_moves(&state.board, from, side, &ROOK_DIRECTIONS, &mut moves),
                PieceKind::Queen => {
                    Self::slide_moves(&state.board, from, side, &ROOK_DIRECTIONS, &mut moves);
                    Self::slide_moves(&state.board, from, side, &BISHOP_DIRECTIONS, &mut moves);
                }
                PieceKind::King => {
                    Self::step_moves(&state.board, from, side, &KING_STEPS, &mut moves);
                    Self::castling_moves(state, from, side, &mut moves);
                }
            }
        }

        moves
    }

    fn pawn_moves(state: &ChessState, from: Square, side: Color, out: &mut Vec<ChessMove>) {
        let board = &state.board;
        let forward = side.forward();
        let last_rank = side.opponent().back_rank();

        let push = |to: Square, out: &mut Vec<ChessMove>| {
            if to.y == last_rank {
                out.extend(Promotion::ALL.map(|p| ChessMove::promoting(from, to, p)));
            } else {
                out.push(ChessMove::new(from, to));
            }
        };

        if let Some(one) = from.offset(0, forward).filter(|sq| board.get(*sq).is_none()) {
            push(one, out);
            if from.y == side.pawn_rank() {
                if let Some(two) = one.offset(0, forward).filter(|sq| board.get(*sq).is_none()) {
                    push(two, out);
                }
            }
        }

        for dx in [-1, 1] {
            let Some(to) = from.offset(dx, forward) else {
                continue;
            };
            let captures = board.get(to).is_some_and(|p| p.color != side);
            if captures || state.en_passant == Some(to) {
                push(to, out);
            }
        }
    }

    fn step_moves(board: &Board, from: Square, side: Color, steps: &[(i8, i8)], out: &mut Vec<ChessMove>) {
        for &(dx, dy) in steps {
            if let Some(to) = from.offset(dx, dy) {
                if board.get(to).map_or(true, |p| p.color != side) {
                    out.push(ChessMove::new(from, to));
                }
            }
        }
    }

    fn slide_moves(board: &Board, from: Square, side: Color, directions: &[(i8, i8)], out: &mut Vec<ChessMove>) {
        for &(dx, dy) in directions {
            let mut cursor = from.offset(dx, dy);
            while let Some(to) = cursor {
                match board.get(to) {
                    None => out.push(ChessMove::new(from, to)),
                    Some(p) => {
                        if p.color != side {
                            out.push(ChessMove::new(from, to));
                        }
                        break;
                    }
                }
                cursor = to.offset(dx, dy);
            }
        }
    }

    /// Castling needs the right, the rook in its corner, an empty path, and a
    /// king that is not in check and does not cross an attacked square.
    /// The landing square is covered by the king-safety filter.
    fn castling_moves(state: &ChessState, from: Square, side: Color, out: &mut Vec<ChessMove>) {
        let rank = side.back_rank();
        if from != Square::new(4, rank) || state.board.is_attacked(from, side.opponent()) {
            return;
        }

        for path in [CastlePath::KINGSIDE, CastlePath::QUEENSIDE] {
            if !state.castling.allows(side, path.kingside) {
                continue;
            }
            let rook_home = state.board.get(Square::new(path.rook_x, rank));
            if rook_home != Some(Piece::new(side, PieceKind::Rook)) {
                continue;
            }
            if path.empty.iter().any(|&x| state.board.get(Square::new(x, rank)).is_some()) {
                continue;
            }
            if state.board.is_attacked(Square::new(path.crossed_x, rank), side.opponent()) {
                continue;
            }
            out.push(ChessMove::new(from, Square::new(path.king_to_x, rank)));
        }
    }

    /// Board after a move, including en-passant removal, rook hop on
    /// castling, and promotion.
    fn play(board: &Board, mv: &ChessMove, en_passant: Option<Square>) -> Board {
        let mut next = *board;
        let Some(piece) = board.get(mv.from) else {
            return next;
        };

        next.set(mv.from, None);

        match piece.kind {
            PieceKind::Pawn => {
                if Some(mv.to) == en_passant && mv.from.x != mv.to.x && board.get(mv.to).is_none() {
                    next.set(Square::new(mv.to.x, mv.from.y), None);
                }
                let kind = mv.promotion.map_or(PieceKind::Pawn, Promotion::kind);
                next.set(mv.to, Some(Piece::new(piece.color, kind)));
            }
            PieceKind::King if mv.from.x.abs_diff(mv.to.x) == 2 => {
                let rank = mv.from.y;
                let (rook_from, rook_to) = if mv.to.x > mv.from.x { (7, 5) } else { (0, 3) };
                let rook = next.get(Square::new(rook_from, rank));
                next.set(Square::new(rook_from, rank), None);
                next.set(Square::new(rook_to, rank), rook);
                next.set(mv.to, Some(piece));
            }
            _ => next.set(mv.to, Some(piece)),
        }

        next
    }
}

impl RulesEngine for Chess {
    type State = ChessState;
    type Move = ChessMove;

    fn game(&self) -> GameId {
        GameId::Chess
    }

    fn init(&self, player_count: usize, _seed: Option<Seed>) -> Result<ChessState> {
        GameId::Chess.check_player_count(player_count)?;
        Ok(ChessState::standard())
    }

    fn current_player(&self, state: &ChessState) -> PlayerId {
        state.turn
    }

    fn legal_moves(&self, state: &ChessState) -> Vec<ChessMove> {
        let side = state.side_to_move();
        Self::pseudo_moves(state)
            .into_iter()
            .filter(|mv| !Self::play(&state.board, mv, state.en_passant).in_check(side))
            .collect()
    }

    fn apply_move(&self, state: &ChessState, mv: &ChessMove) -> ChessState {
        let side = state.side_to_move();
        let Some(piece) = state.board.get(mv.from) else {
            return state.clone();
        };

        let is_pawn = piece.kind == PieceKind::Pawn;
        let captures = state.board.get(mv.to).is_some()
            || (is_pawn && Some(mv.to) == state.en_passant && mv.from.x != mv.to.x);

        let mut castling = state.castling;
        castling.touch(mv.from);
        castling.touch(mv.to);

        let en_passant = if is_pawn && mv.from.y.abs_diff(mv.to.y) == 2 {
            Some(Square::new(mv.from.x, (mv.from.y + mv.to.y) / 2))
        } else {
            None
        };

        ChessState {
            board: Self::play(&state.board, mv, state.en_passant),
            turn: side.opponent().seat(),
            castling,
            en_passant,
            halfmove_clock: if is_pawn || captures {
                0
            } else {
                state.halfmove_clock.saturating_add(1)
            },
            fullmove_number: if side == Color::Black {
                state.fullmove_number.saturating_add(1)
            } else {
                state.fullmove_number
            },
        }
    }

    fn is_terminal(&self, state: &ChessState) -> GameResult {
        let side = state.side_to_move();
        if self.legal_moves(state).is_empty() {
            if state.board.in_check(side) {
                GameResult::Winner(side.opponent().seat())
            } else {
                GameResult::Draw
            }
        } else if state.halfmove_clock >= FIFTY_MOVE_LIMIT {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}
