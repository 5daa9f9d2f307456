// Copyright (C) 2020-2024 Andy Kurnia.

use super::{bag, board, error, game_config, tile};
use rand::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Player {
    pub seat: u8,
    pub name: String,
}

impl Player {
    pub fn new(seat: u8) -> Self {
        Self {
            seat,
            name: String::new(),
        }
    }

    pub fn named(seat: u8, name: &str) -> Self {
        Self {
            seat,
            name: name.into(),
        }
    }

    pub fn name_or_number(&self) -> String {
        if self.name.is_empty() {
            format!("Player {}", self.seat)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlayerState {
    pub player: Player,
    pub score: i32,
    pub rack: Vec<tile::Tile>,
}

impl PlayerState {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            score: 0,
            rack: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn rack_points(&self) -> i32 {
        tile::points_of(&self.rack)
    }
}

// Rack order is irrelevant.
impl PartialEq for PlayerState {
    fn eq(&self, other: &Self) -> bool {
        self.player == other.player
            && self.score == other.score
            && self.rack.len() == other.rack.len()
            && tile::RackTally::from_tiles(&self.rack) == tile::RackTally::from_tiles(&other.rack)
    }
}

impl Eq for PlayerState {}

// Cloning copies the tiles but shares the config and the multiplier overlay,
// so speculative moves can be tried on a copy.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: Arc<game_config::GameConfig>,
    // Indexes players, which is in seat order.
    pub turn: u8,
    pub players: Box<[PlayerState]>,
    pub bag: bag::Bag,
    pub board: board::Board,
    pub num_scoreless_turns: u8,
    pub finished: bool,
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.config, &other.config) || self.config == other.config)
            && self.turn == other.turn
            && self.players == other.players
            && self.bag == other.bag
            && self.board == other.board
            && self.num_scoreless_turns == other.num_scoreless_turns
            && self.finished == other.finished
    }
}

impl Eq for GameState {}

impl GameState {
    pub fn new(
        config: Arc<game_config::GameConfig>,
        board: board::Board,
        bag: bag::Bag,
        players: Vec<Player>,
    ) -> error::Returns<Self> {
        if players.is_empty() || players.len() > u8::MAX as usize {
            return_error!(format!("cannot play with {} players", players.len()));
        }
        Ok(Self {
            config,
            turn: 0,
            players: players.into_iter().map(PlayerState::new).collect(),
            bag,
            board,
            num_scoreless_turns: 0,
            finished: false,
        })
    }

    #[inline(always)]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.turn as usize]
    }

    #[inline(always)]
    pub fn current_player_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.turn as usize]
    }

    pub fn next_turn(&mut self) {
        let num_players = self.players.len() as u8;
        self.turn += 1;
        if self.turn >= num_players {
            self.turn = 0;
        }
    }

    // Picks a starting seat, then fills every rack.
    pub fn random_init(&mut self, rng: &mut dyn RngCore) {
        self.turn = rng.random_range(0..self.players.len()) as u8;
        let rack_size = self.config.max_tiles_in_hand() as usize;
        for player in self.players.iter_mut() {
            self.bag.replenish(rng, &mut player.rack, rack_size);
        }
    }

    // Draws up to amount tiles for the current player. Returns how many were drawn.
    pub fn draw_for_current(&mut self, rng: &mut dyn RngCore, amount: usize) -> usize {
        let turn = self.turn as usize;
        self.bag.draw_into(rng, &mut self.players[turn].rack, amount)
    }

    pub fn end_game_for_scoreless_turns(&mut self) {
        if !self.finished && self.num_scoreless_turns >= self.config.scoreless_turns_to_end_game()
        {
            log::debug!(
                "game ends after {} scoreless turns",
                self.num_scoreless_turns
            );
            self.finished = true;
            self.apply_final_tile_deduction(false);
        }
    }

    // Everyone loses what they still hold. With credit, the current player
    // also gains what everyone else holds.
    pub fn apply_final_tile_deduction(&mut self, credit_current: bool) {
        let turn = self.turn as usize;
        let mut others = 0;
        for (i, player) in self.players.iter_mut().enumerate() {
            let points = player.rack_points();
            player.score -= points;
            if i != turn {
                others += points;
            }
        }
        if credit_current {
            self.players[turn].score += others;
        }
    }

    // Ties go to the earliest seat.
    pub fn highest_score_player(&self) -> &PlayerState {
        let mut best = &self.players[0];
        for player in self.players[1..].iter() {
            if player.score > best.score {
                best = player;
            }
        }
        best
    }

    pub fn scores(&self) -> Vec<i32> {
        self.players.iter().map(|p| p.score).collect()
    }
}
