//! Chess pieces, board, and attack detection.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::games::square::Square;

pub(crate) const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Side color. White is seat 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Seat playing this color.
    #[must_use]
    pub const fn seat(self) -> PlayerId {
        match self {
            Color::White => PlayerId::new(0),
            Color::Black => PlayerId::new(1),
        }
    }

    /// Color played by a seat.
    #[must_use]
    pub const fn of_seat(player: PlayerId) -> Self {
        if player.0 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Pawn direction along y.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row of the back rank.
    #[must_use]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row pawns start on.
    #[must_use]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Piece placement, indexed `[y][x]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (x, kind) in (0u8..).zip(BACK_RANK) {
                board.set(Square::new(x, color.back_rank()), Some(Piece::new(color, kind)));
                board.set(
                    Square::new(x, color.pawn_rank()),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Piece on a square. Off-board squares are empty.
    #[must_use]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares
            .get(usize::from(sq.y))
            .and_then(|row| row.get(usize::from(sq.x)))
            .copied()
            .flatten()
    }

    /// Place or clear a square on this board value.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if let Some(cell) = self
            .squares
            .get_mut(usize::from(sq.y))
            .and_then(|row| row.get_mut(usize::from(sq.x)))
        {
            *cell = piece;
        }
    }

    /// Occupied squares of one color, row by row.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| {
            self.get(sq)
                .filter(|piece| piece.color == color)
                .map(|piece| (sq, piece))
        })
    }

    /// Square of a side's king.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Whether a side's king is attacked.
    #[must_use]
    pub fn in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opponent()))
    }

    /// Whether `by` attacks `target`.
    #[must_use]
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        // A pawn of `by` attacks diagonally forward, so look one row back.
        let pawn_row = -by.forward();
        if [-1, 1]
            .into_iter()
            .any(|dx| self.holds(target.offset(dx, pawn_row), by, &[PieceKind::Pawn]))
        {
            return true;
        }

        if KNIGHT_STEPS
            .iter()
            .any(|&(dx, dy)| self.holds(target.offset(dx, dy), by, &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_STEPS
            .iter()
            .any(|&(dx, dy)| self.holds(target.offset(dx, dy), by, &[PieceKind::King]))
        {
            return true;
        }

        let straight = [PieceKind::Rook, PieceKind::Queen];
        let diagonal = [PieceKind::Bishop, PieceKind::Queen];
        ROOK_DIRECTIONS
            .iter()
            .any(|&dir| self.holds(self.first_piece_along(target, dir), by, &straight))
            || BISHOP_DIRECTIONS
                .iter()
                .any(|&dir| self.holds(self.first_piece_along(target, dir), by, &diagonal))
    }

    /// Whether `sq` holds a piece of `color` with one of `kinds`.
    fn holds(&self, sq: Option<Square>, color: Color, kinds: &[PieceKind]) -> bool {
        sq.and_then(|sq| self.get(sq))
            .is_some_and(|p| p.color == color && kinds.contains(&p.kind))
    }

    /// First occupied square along a ray, excluding the origin.
    fn first_piece_along(&self, from: Square, (dx, dy): (i8, i8)) -> Option<Square> {
        let mut cursor = from.offset(dx, dy);
        while let Some(sq) = cursor {
            if self.get(sq).is_some() {
                return Some(sq);
            }
            cursor = sq.offset(dx, dy);
        }
        None
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
