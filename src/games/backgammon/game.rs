//! Backgammon rules: entering from the bar, hitting, bearing off.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::config::GameId;
use crate::core::error::{EngineError, Result};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::{self, Dice, Seed};
use crate::rules::{GameResult, RulesEngine};

/// Number of points on the board.
pub const POINTS: usize = 24;

/// Checkers per side.
pub const CHECKERS: u8 = 15;

const SEAT_0: PlayerId = PlayerId::new(0);
const SEAT_1: PlayerId = PlayerId::new(1);

/// Where a checker moves from. `'bar'` or a point index on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WirePosition", into = "WirePosition")]
pub enum Source {
    Bar,
    Point(u8),
}

/// Where a checker lands. `'off'` or a point index on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WirePosition", into = "WirePosition")]
pub enum Dest {
    Point(u8),
    Off,
}

/// Either an integer point or a string label.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WirePosition {
    Point(u8),
    Label(String),
}

fn point_index(p: u8) -> Result<u8> {
    if usize::from(p) < POINTS {
        Ok(p)
    } else {
        Err(EngineError::MalformedMove(format!("point {p} out of range")))
    }
}

impl TryFrom<WirePosition> for Source {
    type Error = EngineError;

    fn try_from(wire: WirePosition) -> Result<Self> {
        match wire {
            WirePosition::Point(p) => point_index(p).map(Source::Point),
            WirePosition::Label(label) if label == "bar" => Ok(Source::Bar),
            WirePosition::Label(label) => {
                Err(EngineError::MalformedMove(format!("unknown source '{label}'")))
            }
        }
    }
}

impl From<Source> for WirePosition {
    fn from(source: Source) -> Self {
        match source {
            Source::Bar => WirePosition::Label("bar".to_string()),
            Source::Point(p) => WirePosition::Point(p),
        }
    }
}

impl TryFrom<WirePosition> for Dest {
    type Error = EngineError;

    fn try_from(wire: WirePosition) -> Result<Self> {
        match wire {
            WirePosition::Point(p) => point_index(p).map(Dest::Point),
            WirePosition::Label(label) if label == "off" => Ok(Dest::Off),
            WirePosition::Label(label) => {
                Err(EngineError::MalformedMove(format!("unknown destination '{label}'")))
            }
        }
    }
}

impl From<Dest> for WirePosition {
    fn from(dest: Dest) -> Self {
        match dest {
            Dest::Point(p) => WirePosition::Point(p),
            Dest::Off => WirePosition::Label("off".to_string()),
        }
    }
}

/// Move one checker by one die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BackgammonMove {
    pub from: Source,
    pub to: Dest,
    pub die: u8,
}

/// Backgammon position.
///
/// `points[i] > 0` counts seat 0 checkers on point `i`, `points[i] < 0`
/// counts seat 1 checkers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgammonState {
    pub points: [i8; POINTS],
    pub bar: PlayerMap<u8>,
    pub off: PlayerMap<u8>,
    pub turn: PlayerId,
    /// Dice left to play this turn. Empty until rolled.
    pub dice: Dice,
    pub seed: Seed,
}

impl BackgammonState {
    /// The standard opening position, seat 0 to roll.
    #[must_use]
    pub fn standard(seed: Seed) -> Self {
        let mut points = [0i8; POINTS];
        for (point, count) in [(23, 2), (12, 5), (7, 3), (5, 5)] {
            points[point] = count;
        }
        for (point, count) in [(0, 2), (11, 5), (16, 3), (18, 5)] {
            points[point] = -count;
        }
        Self {
            points,
            bar: PlayerMap::with_value(2, 0),
            off: PlayerMap::with_value(2, 0),
            turn: SEAT_0,
            dice: Dice::new(),
            seed,
        }
    }

    /// Checkers `seat` has on a point.
    #[must_use]
    pub fn owned(&self, point: usize, seat: PlayerId) -> u8 {
        let count = self.points.get(point).copied().unwrap_or(0);
        match seat {
            SEAT_0 if count > 0 => count.unsigned_abs(),
            SEAT_1 if count < 0 => count.unsigned_abs(),
            _ => 0,
        }
    }

    /// Checkers `seat`'s opponent has on a point.
    #[must_use]
    pub fn opposing(&self, point: usize, seat: PlayerId) -> u8 {
        self.owned(point, seat.next(2))
    }

    /// Whether every checker of `seat` is home or borne off.
    #[must_use]
    pub fn all_home(&self, seat: PlayerId) -> bool {
        let home: u8 = home_points(seat).map(|p| self.owned(p, seat)).sum();
        self.bar[seat] == 0 && home + self.off[seat] == CHECKERS
    }

    fn add(&mut self, point: usize, seat: PlayerId, delta: i8) {
        let signed = if seat == SEAT_0 { delta } else { -delta };
        if let Some(slot) = self.points.get_mut(point) {
            *slot += signed;
        }
    }
}

/// Points of a seat's home board.
fn home_points(seat: PlayerId) -> std::ops::Range<usize> {
    if seat == SEAT_0 {
        0..6
    } else {
        18..24
    }
}

/// Pips from `point` to borne off.
fn distance_off(point: usize, seat: PlayerId) -> usize {
    if seat == SEAT_0 {
        point + 1
    } else {
        POINTS - point
    }
}

/// Landing point of a move by `die` from `point`, or `None` past the edge.
fn target(point: usize, die: u8, seat: PlayerId) -> Option<usize> {
    let die = usize::from(die);
    if seat == SEAT_0 {
        point.checked_sub(die)
    } else {
        Some(point + die).filter(|p| *p < POINTS)
    }
}

/// Entry point from the bar.
fn entry_point(die: u8, seat: PlayerId) -> usize {
    if seat == SEAT_0 {
        POINTS - usize::from(die)
    } else {
        usize::from(die) - 1
    }
}

/// Dice to play for a roll. Doubles play four times.
fn expand(rolled: &[u8]) -> Dice {
    match rolled {
        [a, b] if a == b => Dice::from_slice(&[*a; 4]),
        _ => Dice::from_slice(rolled),
    }
}

/// Backgammon rules engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Backgammon;

impl Backgammon {
    /// Roll two dice from the state's seed.
    ///
    /// Returns the two rolled values and the state with the advanced seed.
    /// If the roll leaves no legal move the turn passes.
    pub fn roll(&self, state: &BackgammonState) -> Result<(Dice, BackgammonState)> {
        if !state.dice.is_empty() {
            return Err(EngineError::DiceAlreadyRolled {
                game: GameId::Backgammon,
            });
        }
        let (rolled, seed) = rng::roll_dice(state.seed, 2);
        let next = BackgammonState {
            seed,
            ..state.clone()
        };
        Ok((rolled.clone(), self.start_turn(next, &rolled)))
    }

    /// Install externally chosen dice without touching the seed.
    pub fn set_dice(&self, state: &BackgammonState, dice: &[u8]) -> Result<BackgammonState> {
        if !state.dice.is_empty() {
            return Err(EngineError::DiceAlreadyRolled {
                game: GameId::Backgammon,
            });
        }
        if dice.len() != 2 || dice.iter().any(|d| !(1..=6).contains(d)) {
            return Err(EngineError::InvalidDice {
                game: GameId::Backgammon,
                dice: dice.to_vec(),
            });
        }
        Ok(self.start_turn(state.clone(), dice))
    }

    fn start_turn(&self, state: BackgammonState, rolled: &[u8]) -> BackgammonState {
        let state = BackgammonState {
            dice: expand(rolled),
            ..state
        };
        if self.legal_moves(&state).is_empty() {
            Self::pass(state)
        } else {
            state
        }
    }

    fn pass(state: BackgammonState) -> BackgammonState {
        BackgammonState {
            turn: state.turn.next(2),
            dice: Dice::new(),
            ..state
        }
    }

    fn is_open(state: &BackgammonState, point: usize, seat: PlayerId) -> bool {
        state.opposing(point, seat) <= 1
    }

    fn moves_for_die(state: &BackgammonState, die: u8, out: &mut Vec<BackgammonMove>) {
        let seat = state.turn;

        if state.bar[seat] > 0 {
            let entry = entry_point(die, seat);
            if Self::is_open(state, entry, seat) {
                out.push(BackgammonMove {
                    from: Source::Bar,
                    to: Dest::Point(entry as u8),
                    die,
                });
            }
            return;
        }

        let bearing_off = state.all_home(seat);
        for point in (0..POINTS).filter(|p| state.owned(*p, seat) > 0) {
            match target(point, die, seat) {
                Some(to) => {
                    if Self::is_open(state, to, seat) {
                        out.push(BackgammonMove {
                            from: Source::Point(point as u8),
                            to: Dest::Point(to as u8),
                            die,
                        });
                    }
                }
                None if bearing_off && Self::may_bear_off(state, point, die, seat) => {
                    out.push(BackgammonMove {
                        from: Source::Point(point as u8),
                        to: Dest::Off,
                        die,
                    });
                }
                None => {}
            }
        }
    }

    /// Exact dice bear off; a larger die only from the farthest occupied point.
    fn may_bear_off(state: &BackgammonState, point: usize, die: u8, seat: PlayerId) -> bool {
        let distance = distance_off(point, seat);
        let die = usize::from(die);
        if die == distance {
            return true;
        }
        die > distance
            && home_points(seat)
                .filter(|p| distance_off(*p, seat) > distance)
                .all(|p| state.owned(p, seat) == 0)
    }
}

impl RulesEngine for Backgammon {
    type State = BackgammonState;
    type Move = BackgammonMove;

    fn game(&self) -> GameId {
        GameId::Backgammon
    }

    fn init(&self, player_count: usize, seed: Option<Seed>) -> Result<BackgammonState> {
        GameId::Backgammon.check_player_count(player_count)?;
        let seed = GameId::Backgammon.require_seed(seed)?;
        Ok(BackgammonState::standard(seed))
    }

    fn current_player(&self, state: &BackgammonState) -> PlayerId {
        state.turn
    }

    fn legal_moves(&self, state: &BackgammonState) -> Vec<BackgammonMove> {
        let mut seen = FxHashSet::default();
        let mut moves = Vec::new();
        for &die in state.dice.iter().filter(|d| (1..=6).contains(*d)) {
            if seen.insert(die) {
                Self::moves_for_die(state, die, &mut moves);
            }
        }
        moves
    }

    fn apply_move(&self, state: &BackgammonState, mv: &BackgammonMove) -> BackgammonState {
        let seat = state.turn;
        let opponent = seat.next(2);
        let mut next = state.clone();

        match mv.from {
            Source::Bar => next.bar[seat] = next.bar[seat].saturating_sub(1),
            Source::Point(p) => next.add(usize::from(p), seat, -1),
        }

        match mv.to {
            Dest::Off => next.off[seat] += 1,
            Dest::Point(p) => {
                let p = usize::from(p);
                if next.opposing(p, seat) == 1 {
                    next.add(p, opponent, -1);
                    next.bar[opponent] += 1;
                }
                next.add(p, seat, 1);
            }
        }

        if let Some(used) = next.dice.iter().position(|d| *d == mv.die) {
            next.dice.remove(used);
        }

        if next.dice.is_empty() || self.legal_moves(&next).is_empty() {
            Self::pass(next)
        } else {
            next
        }
    }

    fn is_terminal(&self, state: &BackgammonState) -> GameResult {
        PlayerId::all(2)
            .find(|seat| state.off[*seat] >= CHECKERS)
            .map_or(GameResult::InProgress, GameResult::Winner)
    }
}
