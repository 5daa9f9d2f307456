// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_state, movegen, rules};
use rand::prelude::*;

// Something that chooses moves for one seat.
pub trait Strategy {
    fn name(&self) -> String;

    // The state is a snapshot; strategies try moves on their own copies.
    fn get_move(&mut self, state: &game_state::GameState) -> rules::Move;

    fn notify_new_state(&mut self, _state: &game_state::GameState) {}
}

pub type BoxedStrategy = Box<dyn Strategy + Send>;

// Scores candidates by performing them on a scratch copy of the state.
struct Evaluator {
    rng: rand_chacha::ChaCha20Rng,
    scratch: Option<game_state::GameState>,
}

impl Evaluator {
    fn new() -> Self {
        Self {
            rng: rand_chacha::ChaCha20Rng::seed_from_u64(0),
            scratch: None,
        }
    }

    // How much the mover's score changes, including any play-out bonus.
    fn gain(&mut self, state: &game_state::GameState, place: &rules::PlaceTiles) -> Option<i32> {
        let scratch = self.scratch.get_or_insert_with(|| state.clone());
        scratch.clone_from(state);
        place.perform(scratch, &mut self.rng).ok()?;
        Some(scratch.players[state.turn as usize].score - state.current_player().score)
    }

    // The candidate with the highest value, earliest first on ties.
    fn best_by<F: FnMut(&rules::PlaceTiles, i32) -> f64>(
        &mut self,
        state: &game_state::GameState,
        mut value: F,
    ) -> rules::Move {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for place in movegen::generate_all(state) {
            if let Some(gain) = self.gain(state, &place) {
                let v = value(&place, gain);
                if v > best_value {
                    best_value = v;
                    best = Some(place);
                }
            }
        }
        best.map_or(rules::Move::Pass, rules::Move::PlaceTiles)
    }
}

pub struct AlwaysPass;

impl Strategy for AlwaysPass {
    fn name(&self) -> String {
        "AlwaysPass".into()
    }

    fn get_move(&mut self, _state: &game_state::GameState) -> rules::Move {
        rules::Move::Pass
    }
}

pub struct RandomWord {
    rng: Box<dyn RngCore + Send>,
}

impl RandomWord {
    pub fn new(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }
}

impl Strategy for RandomWord {
    fn name(&self) -> String {
        "RandomWord".into()
    }

    fn get_move(&mut self, state: &game_state::GameState) -> rules::Move {
        movegen::generate_all(state)
            .into_iter()
            .choose(self.rng.as_mut())
            .map_or(rules::Move::Pass, rules::Move::PlaceTiles)
    }
}

pub struct HighestScoringWord {
    evaluator: Evaluator,
}

impl HighestScoringWord {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
        }
    }
}

impl Default for HighestScoringWord {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for HighestScoringWord {
    fn name(&self) -> String {
        "HighestScoringWord".into()
    }

    fn get_move(&mut self, state: &game_state::GameState) -> rules::Move {
        self.evaluator.best_by(state, |_, gain| gain as f64)
    }
}

// Plays as many tiles as possible, then as many points as possible.
pub struct MostTilesPlayed {
    evaluator: Evaluator,
}

impl MostTilesPlayed {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
        }
    }
}

impl Default for MostTilesPlayed {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for MostTilesPlayed {
    fn name(&self) -> String {
        "MostTilesPlayed".into()
    }

    fn get_move(&mut self, state: &game_state::GameState) -> rules::Move {
        // gains are far below 1e6
        self.evaluator
            .best_by(state, |place, gain| place.len() as f64 * 1e6 + gain as f64)
    }
}

pub const DEFAULT_VALUE_PER_TILE: f64 = 100.0;

pub struct ScoreAndTiles {
    evaluator: Evaluator,
    value_per_tile: f64,
}

impl ScoreAndTiles {
    pub fn new(value_per_tile: f64) -> Self {
        Self {
            evaluator: Evaluator::new(),
            value_per_tile,
        }
    }
}

impl Strategy for ScoreAndTiles {
    fn name(&self) -> String {
        format!("ScoreAndTiles(value_per_tile={})", self.value_per_tile)
    }

    fn get_move(&mut self, state: &game_state::GameState) -> rules::Move {
        let value_per_tile = self.value_per_tile;
        self.evaluator.best_by(state, |place, gain| {
            gain as f64 + place.len() as f64 * value_per_tile
        })
    }
}

// pass, random, highest, most-tiles, score-and-tiles or score-and-tiles:VALUE
pub fn make_strategy(
    name: &str,
    rng: Box<dyn RngCore + Send>,
) -> error::Returns<BoxedStrategy> {
    let (kind, arg) = match name.split_once(':') {
        Some((kind, arg)) => (kind, Some(arg)),
        None => (name, None),
    };
    Ok(match (kind, arg) {
        ("pass", None) => Box::new(AlwaysPass),
        ("random", None) => Box::new(RandomWord::new(rng)),
        ("highest", None) => Box::new(HighestScoringWord::new()),
        ("most-tiles", None) => Box::new(MostTilesPlayed::new()),
        ("score-and-tiles", None) => Box::new(ScoreAndTiles::new(DEFAULT_VALUE_PER_TILE)),
        ("score-and-tiles", Some(v)) => match v.parse::<f64>() {
            Ok(v) => Box::new(ScoreAndTiles::new(v)),
            Err(_) => {
                return_error!(format!("invalid value per tile {:?}", v));
            }
        },
        _ => {
            return_error!(format!("unknown strategy {:?}", name));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, bag, board, game_config, lexicon, tile};
    use game_state::{GameState, Player};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn values() -> HashMap<u8, i16> {
        alphabet::ENGLISH_ALPHABET.letter_values()
    }

    // B in the middle; AB/BA score 4, ABA scores 5.
    fn state(rack: &str) -> GameState {
        let lexicon = lexicon::Lexicon::new(["AB", "BA", "ABA", "ZA"]).unwrap();
        let config = Arc::new(game_config::make_scrabble_game_config(Arc::new(lexicon)));
        let board =
            board::Board::from_strings(None, Some("     \n     \n  B  \n     \n     "), &values())
                .unwrap();
        let mut state = GameState::new(
            config,
            board,
            bag::Bag::new(tile::tiles_from_str("EEEE", &values()).unwrap()),
            vec![Player::new(0), Player::new(1)],
        )
        .unwrap();
        state.players[0].rack = tile::tiles_from_str(rack, &values()).unwrap();
        state
    }

    fn placed(m: &rules::Move) -> usize {
        match m {
            rules::Move::PlaceTiles(place) => place.len(),
            _ => 0,
        }
    }

    fn rng() -> Box<dyn RngCore + Send> {
        Box::new(rand_chacha::ChaCha20Rng::seed_from_u64(9))
    }

    #[test]
    fn always_pass() {
        assert_eq!(AlwaysPass.get_move(&state("AA")), rules::Move::Pass);
    }

    #[test]
    fn random_word_is_valid_or_pass() {
        let s = state("AA");
        let mut strategy = RandomWord::new(rng());
        for _ in 0..5 {
            let m = strategy.get_move(&s);
            assert!(m.is_valid(&s));
            assert_ne!(m, rules::Move::Pass);
        }
        assert_eq!(strategy.get_move(&state("QQ")), rules::Move::Pass);
    }

    #[test]
    fn highest_scoring_word() {
        let s = state("AAZ");
        let m = HighestScoringWord::new().get_move(&s);
        assert!(m.is_valid(&s));
        let mut after = s.clone();
        m.perform(&mut after, &mut rand_chacha::ChaCha20Rng::seed_from_u64(1))
            .unwrap();
        let best = movegen::generate_all(&s)
            .iter()
            .map(|p| p.score(&s))
            .max()
            .unwrap();
        assert_eq!(after.players[0].score, best);
    }

    #[test]
    fn most_tiles_played() {
        let s = state("AA");
        let m = MostTilesPlayed::new().get_move(&s);
        assert_eq!(placed(&m), 2);
        assert!(m.is_valid(&s));
    }

    #[test]
    fn score_and_tiles_weighs_tiles() {
        let s = state("AA");
        let mut strategy = ScoreAndTiles::new(100.0);
        assert_eq!(placed(&strategy.get_move(&s)), 2);
        assert_eq!(strategy.name(), "ScoreAndTiles(value_per_tile=100)");
    }

    #[test]
    fn strategies_by_name() {
        assert_eq!(make_strategy("pass", rng()).unwrap().name(), "AlwaysPass");
        assert_eq!(
            make_strategy("score-and-tiles:2.5", rng()).unwrap().name(),
            "ScoreAndTiles(value_per_tile=2.5)"
        );
        assert!(make_strategy("score-and-tiles:x", rng()).is_err());
        assert!(make_strategy("greedy", rng()).is_err());
    }
}
