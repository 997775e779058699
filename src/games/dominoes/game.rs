//! Block/draw dominoes with a double-six set.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::GameId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{self, Seed};
use crate::rules::{GameResult, RulesEngine};

/// Highest pip value in the set.
pub const MAX_PIPS: u8 = 6;

/// Tile index meaning "draw from the boneyard".
pub const DRAW_INDEX: i8 = -1;

/// Tile index meaning "pass".
pub const PASS_INDEX: i8 = -2;

/// A domino tile. On the line, `.0` faces left and `.1` faces right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile(pub u8, pub u8);

impl Tile {
    #[must_use]
    pub const fn is_double(self) -> bool {
        self.0 == self.1
    }

    #[must_use]
    pub const fn pips(self) -> u32 {
        self.0 as u32 + self.1 as u32
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        Tile(self.1, self.0)
    }

    /// The full set in canonical order: `[0,0], [0,1] .. [6,6]`.
    #[must_use]
    pub fn double_six_set() -> Vec<Tile> {
        (0..=MAX_PIPS)
            .flat_map(|a| (a..=MAX_PIPS).map(move |b| Tile(a, b)))
            .collect()
    }
}

/// End of the line a tile is played on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Left,
    Right,
}

/// A dominoes move.
///
/// On the wire every move is `{tileIndex, end, flip}`, with `tileIndex`
/// `-1` for a draw and `-2` for a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireMove", into = "WireMove")]
pub enum DominoesMove {
    Play { tile_index: u8, end: End, flip: bool },
    Draw,
    Pass,
}

impl DominoesMove {
    /// Whether this move places a tile.
    #[must_use]
    pub const fn is_play(&self) -> bool {
        matches!(self, DominoesMove::Play { .. })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMove {
    tile_index: i8,
    end: End,
    flip: bool,
}

impl TryFrom<WireMove> for DominoesMove {
    type Error = EngineError;

    fn try_from(wire: WireMove) -> Result<Self> {
        match wire.tile_index {
            DRAW_INDEX => Ok(DominoesMove::Draw),
            PASS_INDEX => Ok(DominoesMove::Pass),
            index => u8::try_from(index)
                .map(|tile_index| DominoesMove::Play {
                    tile_index,
                    end: wire.end,
                    flip: wire.flip,
                })
                .map_err(|_| EngineError::MalformedMove(format!("tile index {index}"))),
        }
    }
}

impl From<DominoesMove> for WireMove {
    fn from(mv: DominoesMove) -> Self {
        let sentinel = |tile_index| WireMove {
            tile_index,
            end: End::Left,
            flip: false,
        };
        match mv {
            // hand sizes stay far below i8::MAX
            DominoesMove::Play {
                tile_index,
                end,
                flip,
            } => WireMove {
                tile_index: tile_index as i8,
                end,
                flip,
            },
            DominoesMove::Draw => sentinel(DRAW_INDEX),
            DominoesMove::Pass => sentinel(PASS_INDEX),
        }
    }
}

/// Dominoes position.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DominoesState {
    pub hands: PlayerMap<Vector<Tile>>,
    /// Undealt tiles. Draws take from the front.
    pub boneyard: Vector<Tile>,
    /// Played tiles, oriented left to right.
    pub line: Vector<Tile>,
    pub turn: PlayerId,
    pub seed: Seed,
}

impl DominoesState {
    /// Exposed `(left, right)` pips, `None` before the first play.
    #[must_use]
    pub fn ends(&self) -> Option<(u8, u8)> {
        Some((self.line.front()?.0, self.line.back()?.1))
    }

    /// Pips left in a seat's hand.
    #[must_use]
    pub fn hand_pips(&self, seat: PlayerId) -> u32 {
        self.hands[seat].iter().map(|t| t.pips()).sum()
    }
}

/// Tiles dealt to each seat.
#[must_use]
pub const fn hand_size(player_count: usize) -> usize {
    if player_count == 2 {
        7
    } else {
        5
    }
}

/// Dominoes rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dominoes;

impl Dominoes {
    /// Orientation of `tile` when played on `end`, if it matches.
    fn placed(ends: Option<(u8, u8)>, tile: Tile, end: End, flip: bool) -> Option<Tile> {
        let oriented = if flip { tile.flipped() } else { tile };
        match (ends, end) {
            (None, _) => Some(oriented),
            (Some((left, _)), End::Left) => (oriented.1 == left).then_some(oriented),
            (Some((_, right)), End::Right) => (oriented.0 == right).then_some(oriented),
        }
    }

    /// Every tile placement open to `seat`, hand order, left before right.
    fn plays(state: &DominoesState, seat: PlayerId) -> Vec<DominoesMove> {
        let ends = state.ends();
        let mut plays = Vec::new();
        for (index, tile) in state.hands[seat].iter().enumerate() {
            for end in [End::Left, End::Right] {
                for flip in [false, true] {
                    if flip && tile.is_double() {
                        continue;
                    }
                    if Self::placed(ends, *tile, end, flip).is_some() {
                        plays.push(DominoesMove::Play {
                            tile_index: index as u8,
                            end,
                            flip,
                        });
                    }
                }
            }
        }
        plays
    }

    fn is_blocked(state: &DominoesState) -> bool {
        state.boneyard.is_empty()
            && PlayerId::all(state.hands.player_count()).all(|seat| Self::plays(state, seat).is_empty())
    }
}

impl RulesEngine for Dominoes {
    type State = DominoesState;
    type Move = DominoesMove;

    fn game(&self) -> GameId {
        GameId::Dominoes
    }

    /// Shuffle the set with the seed and deal contiguous hands, seat 0 first.
    fn init(&self, player_count: usize, seed: Option<Seed>) -> Result<DominoesState> {
        GameId::Dominoes.check_player_count(player_count)?;
        let seed = GameId::Dominoes.require_seed(seed)?;

        let (tiles, seed) = rng::shuffle(seed, Tile::double_six_set());
        let size = hand_size(player_count);
        let block = |range: std::ops::Range<usize>| -> Vector<Tile> {
            tiles.get(range).map(|t| t.iter().copied().collect()).unwrap_or_default()
        };
        let hands = PlayerMap::new(player_count, |seat| {
            let start = seat.index() * size;
            block(start..start + size)
        });
        let boneyard = block(player_count * size..tiles.len());

        Ok(DominoesState {
            hands,
            boneyard,
            line: Vector::new(),
            turn: PlayerId::new(0),
            seed,
        })
    }

    fn current_player(&self, state: &DominoesState) -> PlayerId {
        state.turn
    }

    fn legal_moves(&self, state: &DominoesState) -> Vec<DominoesMove> {
        let plays = Self::plays(state, state.turn);
        if !plays.is_empty() {
            plays
        } else if !state.boneyard.is_empty() {
            vec![DominoesMove::Draw]
        } else {
            vec![DominoesMove::Pass]
        }
    }

    fn apply_move(&self, state: &DominoesState, mv: &DominoesMove) -> DominoesState {
        let seat = state.turn;
        let mut next = state.clone();
        match *mv {
            DominoesMove::Play {
                tile_index,
                end,
                flip,
            } => {
                let index = usize::from(tile_index);
                let Some(tile) = next.hands[seat].get(index).copied() else {
                    return next;
                };
                let Some(oriented) = Self::placed(state.ends(), tile, end, flip) else {
                    return next;
                };
                next.hands[seat].remove(index);
                match end {
                    End::Left => next.line.push_front(oriented),
                    End::Right => next.line.push_back(oriented),
                }
                next.turn = seat.next(state.hands.player_count());
            }
            DominoesMove::Draw => {
                if let Some(tile) = next.boneyard.pop_front() {
                    next.hands[seat].push_back(tile);
                }
            }
            DominoesMove::Pass => {
                next.turn = seat.next(state.hands.player_count());
            }
        }
        next
    }

    fn is_terminal(&self, state: &DominoesState) -> GameResult {
        let seats = state.hands.player_count();
        if let Some(seat) = PlayerId::all(seats).find(|seat| state.hands[*seat].is_empty()) {
            return GameResult::Winner(seat);
        }
        if !Self::is_blocked(state) {
            return GameResult::InProgress;
        }

        let lowest = PlayerId::all(seats).map(|seat| state.hand_pips(seat)).min();
        let mut leaders = PlayerId::all(seats).filter(|seat| Some(state.hand_pips(*seat)) == lowest);
        match (leaders.next(), leaders.next()) {
            (Some(seat), None) => GameResult::Winner(seat),
            _ => GameResult::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn play(tile_index: u8, end: End, flip: bool) -> DominoesMove {
        DominoesMove::Play {
            tile_index,
            end,
            flip,
        }
    }

    fn position(hands: &[&[Tile]], boneyard: &[Tile], line: &[Tile]) -> DominoesState {
        DominoesState {
            hands: PlayerMap::new(hands.len(), |seat| hands[seat.index()].iter().copied().collect()),
            boneyard: boneyard.iter().copied().collect(),
            line: line.iter().copied().collect(),
            turn: P0,
            seed: Seed::new(3),
        }
    }

    #[test]
    fn test_full_set() {
        let set = Tile::double_six_set();
        assert_eq!(set.len(), 28);
        assert_eq!(set[0], Tile(0, 0));
        assert_eq!(set[27], Tile(6, 6));
        assert_eq!(set.iter().map(|t| t.pips()).sum::<u32>(), 168);
    }

    #[test]
    fn test_deal_sizes() {
        let two = Dominoes.init(2, Some(Seed::new(42))).unwrap();
        assert_eq!(two.hands[P0].len(), 7);
        assert_eq!(two.hands[P1].len(), 7);
        assert_eq!(two.boneyard.len(), 14);

        let four = Dominoes.init(4, Some(Seed::new(42))).unwrap();
        assert!(four.hands.iter().all(|(_, hand)| hand.len() == 5));
        assert_eq!(four.boneyard.len(), 8);

        let mut all: Vec<Tile> = four.hands.iter().flat_map(|(_, h)| h.iter().copied()).collect();
        all.extend(four.boneyard.iter().copied());
        all.sort_by_key(|t| (t.0, t.1));
        assert_eq!(all, Tile::double_six_set());
    }

    #[test]
    fn test_deal_is_seeded() {
        let state = Dominoes.init(2, Some(Seed::new(42))).unwrap();
        let expected = [
            Tile(4, 4),
            Tile(5, 5),
            Tile(0, 0),
            Tile(4, 6),
            Tile(0, 2),
            Tile(0, 6),
            Tile(1, 4),
        ];
        assert_eq!(state.hands[P0].iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(Dominoes.init(2, Some(Seed::new(42))).unwrap(), state);
        assert_ne!(Dominoes.init(2, Some(Seed::new(43))).unwrap().hands, state.hands);
        assert_eq!(
            Dominoes.init(2, None),
            Err(EngineError::MissingSeed {
                game: GameId::Dominoes
            })
        );
    }

    #[test]
    fn test_first_move_is_open() {
        let state = Dominoes.init(2, Some(Seed::new(42))).unwrap();
        // Three doubles at one orientation, four tiles at two, both ends
        assert_eq!(Dominoes.legal_moves(&state).len(), 22);
    }

    #[test]
    fn test_plays_must_match_an_end() {
        let state = position(
            &[&[Tile(5, 6), Tile(1, 2), Tile(3, 3)], &[Tile(0, 0)]],
            &[Tile(4, 4)],
            &[Tile(3, 5)],
        );
        assert_eq!(
            Dominoes.legal_moves(&state),
            vec![play(0, End::Right, false), play(2, End::Left, false)]
        );

        let next = Dominoes.apply_move(&state, &play(2, End::Left, false));
        assert_eq!(next.line.iter().copied().collect::<Vec<_>>(), [Tile(3, 3), Tile(3, 5)]);
        assert_eq!(next.hands[P0].len(), 2);
        assert_eq!(next.turn, P1);
        assert_eq!(state.hands[P0].len(), 3);
    }

    #[test]
    fn test_flip_orients_tile() {
        let state = position(&[&[Tile(2, 5)], &[Tile(0, 0)]], &[], &[Tile(3, 5)]);
        assert_eq!(Dominoes.legal_moves(&state), vec![play(0, End::Right, true)]);
        let next = Dominoes.apply_move(&state, &play(0, End::Right, true));
        assert_eq!(next.ends(), Some((3, 2)));
    }

    #[test]
    fn test_draw_keeps_turn() {
        let state = position(&[&[Tile(1, 2)], &[Tile(0, 0)]], &[Tile(6, 6), Tile(4, 5)], &[Tile(3, 5)]);
        assert_eq!(Dominoes.legal_moves(&state), vec![DominoesMove::Draw]);

        let next = Dominoes.apply_move(&state, &DominoesMove::Draw);
        assert_eq!(next.turn, P0);
        assert_eq!(next.hands[P0].back(), Some(&Tile(6, 6)));
        assert_eq!(next.boneyard.len(), 1);
    }

    #[test]
    fn test_pass_when_boneyard_empty() {
        let state = position(&[&[Tile(1, 2)], &[Tile(0, 5)]], &[], &[Tile(3, 5)]);
        assert_eq!(Dominoes.legal_moves(&state), vec![DominoesMove::Pass]);
        assert_eq!(Dominoes.is_terminal(&state), GameResult::InProgress);

        let next = Dominoes.apply_move(&state, &DominoesMove::Pass);
        assert_eq!(next.turn, P1);
    }

    #[test]
    fn test_empty_hand_wins() {
        let state = position(&[&[Tile(5, 1)], &[Tile(0, 0)]], &[Tile(2, 2)], &[Tile(3, 5)]);
        let next = Dominoes.apply_move(&state, &play(0, End::Right, false));
        assert_eq!(Dominoes.is_terminal(&next), GameResult::Winner(P0));
    }

    #[test]
    fn test_blocked_lowest_pips_wins() {
        let state = position(&[&[Tile(1, 2)], &[Tile(0, 4)]], &[], &[Tile(3, 5)]);
        assert_eq!(Dominoes.is_terminal(&state), GameResult::Winner(P0));

        let tied = position(&[&[Tile(1, 2)], &[Tile(0, 2), Tile(0, 1)]], &[], &[Tile(6, 6)]);
        assert_eq!(Dominoes.is_terminal(&tied), GameResult::Draw);
    }

    #[test]
    fn test_wire_sentinels() {
        assert_eq!(
            serde_json::to_string(&play(3, End::Right, true)).unwrap(),
            r#"{"tileIndex":3,"end":"right","flip":true}"#
        );
        assert_eq!(
            serde_json::to_string(&DominoesMove::Draw).unwrap(),
            r#"{"tileIndex":-1,"end":"left","flip":false}"#
        );
        assert_eq!(
            serde_json::from_str::<DominoesMove>(r#"{"tileIndex":-2,"end":"right","flip":true}"#)
                .unwrap(),
            DominoesMove::Pass
        );
        assert!(serde_json::from_str::<DominoesMove>(r#"{"tileIndex":-3,"end":"left","flip":false}"#).is_err());
    }
}
