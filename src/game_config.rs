// Copyright (C) 2020-2023 Andy Kurnia.

use super::{error, lexicon};
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct StaticGameConfig {
    name: String,
    lexicon: Arc<lexicon::Lexicon>,
    min_tiles_for_turn_in: u8,
    max_tiles_in_hand: u8,
    min_tiles_for_bingo: u8,
    bingo_points: i32,
    scoreless_turns_to_end_game: u8,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GameConfig {
    Static(StaticGameConfig),
}

impl GameConfig {
    pub fn new(
        name: &str,
        lexicon: Arc<lexicon::Lexicon>,
        min_tiles_for_turn_in: u8,
        max_tiles_in_hand: u8,
        min_tiles_for_bingo: u8,
        bingo_points: i32,
        scoreless_turns_to_end_game: u8,
    ) -> error::Returns<Self> {
        if max_tiles_in_hand == 0 {
            return_error!("max_tiles_in_hand must be at least 1".into());
        }
        if scoreless_turns_to_end_game == 0 {
            return_error!("scoreless_turns_to_end_game must be at least 1".into());
        }
        Ok(GameConfig::Static(StaticGameConfig {
            name: name.into(),
            lexicon,
            min_tiles_for_turn_in,
            max_tiles_in_hand,
            min_tiles_for_bingo,
            bingo_points,
            scoreless_turns_to_end_game,
        }))
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        match self {
            GameConfig::Static(x) => &x.name,
        }
    }

    // The playable words, with the affix tables move generation needs.
    #[inline(always)]
    pub fn lexicon(&self) -> &Arc<lexicon::Lexicon> {
        match self {
            GameConfig::Static(x) => &x.lexicon,
        }
    }

    // An exchange needs at least this many tiles left in the bag.
    #[inline(always)]
    pub fn min_tiles_for_turn_in(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.min_tiles_for_turn_in,
        }
    }

    #[inline(always)]
    pub fn max_tiles_in_hand(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.max_tiles_in_hand,
        }
    }

    #[inline(always)]
    pub fn min_tiles_for_bingo(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.min_tiles_for_bingo,
        }
    }

    #[inline(always)]
    pub fn bingo_points(&self) -> i32 {
        match self {
            GameConfig::Static(x) => x.bingo_points,
        }
    }

    #[inline(always)]
    pub fn scoreless_turns_to_end_game(&self) -> u8 {
        match self {
            GameConfig::Static(x) => x.scoreless_turns_to_end_game,
        }
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: usize) -> i32 {
        if num_played >= self.min_tiles_for_bingo() as usize {
            self.bingo_points()
        } else {
            0
        }
    }
}

pub const SCRABBLE_RACK_SIZE: u8 = 7;

pub fn make_scrabble_game_config(lexicon: Arc<lexicon::Lexicon>) -> GameConfig {
    GameConfig::Static(StaticGameConfig {
        name: "Scrabble".into(),
        lexicon,
        min_tiles_for_turn_in: SCRABBLE_RACK_SIZE,
        max_tiles_in_hand: SCRABBLE_RACK_SIZE,
        min_tiles_for_bingo: SCRABBLE_RACK_SIZE,
        bingo_points: 50,
        scoreless_turns_to_end_game: 6,
    })
}
