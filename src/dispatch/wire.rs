//! Canonical JSON wire format for moves.
//!
//! | Game       | Shape                                               |
//! |------------|-----------------------------------------------------|
//! | Chess      | `{"from":[x,y],"to":[x,y],"promotion":"q"}`         |
//! | Checkers   | `{"from":[x,y],"to":[x,y],"captures":[[x,y],...]}`  |
//! | Backgammon | `{"from":int\|"bar","to":int\|"off","die":int}`       |
//! | Ludo       | `{"tokenIndex":int,"steps":int}`                    |
//! | Dominoes   | `{"tileIndex":int,"end":"left"\|"right","flip":bool}` |
//!
//! Fields are written in the order shown. Dominoes uses `tileIndex` `-1`
//! for a draw and `-2` for a pass.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::MatchMove;
use crate::core::config::GameId;
use crate::core::error::{EngineError, Result};

/// Encode a move as compact JSON without the game tag.
pub fn encode_move(mv: &MatchMove) -> Result<String> {
    match mv {
        MatchMove::Chess(m) => to_wire(m),
        MatchMove::Checkers(m) => to_wire(m),
        MatchMove::Backgammon(m) => to_wire(m),
        MatchMove::Ludo(m) => to_wire(m),
        MatchMove::Dominoes(m) => to_wire(m),
    }
}

/// Decode a wire move for `game`.
///
/// Anything that does not parse as that game's move shape is `MalformedMove`.
pub fn decode_move(game: GameId, raw: &str) -> Result<MatchMove> {
    match game {
        GameId::Chess => from_wire(game, raw).map(MatchMove::Chess),
        GameId::Checkers => from_wire(game, raw).map(MatchMove::Checkers),
        GameId::Backgammon => from_wire(game, raw).map(MatchMove::Backgammon),
        GameId::Ludo => from_wire(game, raw).map(MatchMove::Ludo),
        GameId::Dominoes => from_wire(game, raw).map(MatchMove::Dominoes),
    }
}

fn to_wire<T: Serialize>(mv: &T) -> Result<String> {
    Ok(serde_json::to_string(mv)?)
}

fn from_wire<T: DeserializeOwned>(game: GameId, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        warn!(game = %game, raw, error = %e, "malformed wire move");
        EngineError::MalformedMove(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;
    use crate::core::rng::Seed;
    use crate::dispatch::{init, legal_moves, set_dice, validate_move};
    use crate::games::dominoes::DominoesMove;

    #[test]
    fn test_encoded_moves_still_validate() {
        let seeded = Some(Seed::new(42));
        let mut states = vec![
            init(GameId::Chess, 2, None).unwrap(),
            init(GameId::Checkers, 2, None).unwrap(),
            init(GameId::Dominoes, 3, seeded).unwrap(),
        ];
        states.push(set_dice(&init(GameId::Backgammon, 2, seeded).unwrap(), &[4, 1]).unwrap());
        states.push(set_dice(&init(GameId::Ludo, 4, seeded).unwrap(), &[6]).unwrap());

        for state in states {
            let moves = legal_moves(&state);
            assert!(!moves.is_empty());
            for mv in moves {
                let raw = encode_move(&mv).unwrap();
                let decoded = decode_move(state.game(), &raw).unwrap();
                assert_eq!(decoded, mv);
                assert!(validate_move(&state, &decoded, PlayerId::new(0)));
            }
        }
    }

    #[test]
    fn test_chess_promotion_field_is_optional() {
        let plain = decode_move(GameId::Chess, r#"{"from":[4,1],"to":[4,3]}"#).unwrap();
        assert_eq!(encode_move(&plain).unwrap(), r#"{"from":[4,1],"to":[4,3]}"#);

        let promo = decode_move(GameId::Chess, r#"{"from":[0,6],"to":[0,7],"promotion":"n"}"#).unwrap();
        assert_eq!(
            encode_move(&promo).unwrap(),
            r#"{"from":[0,6],"to":[0,7],"promotion":"n"}"#
        );
    }

    #[test]
    fn test_dominoes_sentinels() {
        let draw = decode_move(GameId::Dominoes, r#"{"tileIndex":-1,"end":"left","flip":false}"#).unwrap();
        assert_eq!(draw, MatchMove::Dominoes(DominoesMove::Draw));
        assert_eq!(
            encode_move(&MatchMove::Dominoes(DominoesMove::Pass)).unwrap(),
            r#"{"tileIndex":-2,"end":"left","flip":false}"#
        );
    }

    #[test]
    fn test_malformed_moves() {
        for (game, raw) in [
            (GameId::Chess, "not json"),
            (GameId::Ludo, r#"{"tokenIndex":0}"#),
            (GameId::Backgammon, r#"{"from":"roof","to":3,"die":2}"#),
            (GameId::Dominoes, r#"{"tileIndex":-9,"end":"left","flip":false}"#),
            (GameId::Dominoes, r#"{"tileIndex":0,"end":"middle","flip":false}"#),
        ] {
            assert!(matches!(
                decode_move(game, raw),
                Err(EngineError::MalformedMove(_))
            ));
        }
    }
}
