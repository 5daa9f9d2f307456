// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_state, move_picker, rules};
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Turn {
    pub seat: u8,
    pub played: rules::Move,
    pub scores: Vec<i32>,
}

// Plays until the game finishes. Invalid moves become passes.
pub fn run_game(
    state: &mut game_state::GameState,
    strategies: &mut [move_picker::BoxedStrategy],
    random_init: bool,
    rng: &mut dyn RngCore,
) -> error::Returns<Vec<Turn>> {
    if strategies.len() != state.players.len() {
        return_error!(format!(
            "{} strategies for {} players",
            strategies.len(),
            state.players.len()
        ));
    }
    if random_init {
        state.random_init(rng);
    }
    for strategy in strategies.iter_mut() {
        strategy.notify_new_state(state);
    }

    let mut turns = Vec::new();
    while !state.finished {
        let seat = state.turn;
        let strategy = &mut strategies[seat as usize];
        let mut played = strategy.get_move(state);
        if !played.is_valid(state) {
            log::warn!(
                "{} chose invalid move {}, passing instead",
                strategy.name(),
                played
            );
            played = rules::Move::Pass;
            if !played.is_valid(state) {
                log::warn!("cannot pass either, stopping");
                break;
            }
        }
        played.perform(state, rng)?;
        log::trace!(
            "{} ({}): {}",
            state.players[seat as usize].player.name_or_number(),
            strategies[seat as usize].name(),
            played
        );
        for strategy in strategies.iter_mut() {
            strategy.notify_new_state(state);
        }
        turns.push(Turn {
            seat,
            played,
            scores: state.scores(),
        });
    }
    log::debug!("game over after {} turns: {:?}", turns.len(), state.scores());
    Ok(turns)
}
