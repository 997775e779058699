//! Chess.
//!
//! Standard rules with castling, en passant and promotion. Terminal on
//! checkmate, stalemate, or the fifty-move rule. Threefold repetition and
//! insufficient material are not detected.
//!
//! Coordinates are `[x, y]` with x = file (a..h) and y = rank, White on y = 0.

mod board;
mod game;

pub use board::{Board, Color, Piece, PieceKind};
pub use game::{CastlingRights, Chess, ChessMove, ChessState, Promotion, FIFTY_MOVE_LIMIT};
