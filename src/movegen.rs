// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, game_state, lexicon, matrix, rules, tile};
use std::collections::BTreeSet;

// Letters that may go on each cell of one lane without breaking the
// perpendicular word through that cell. Occupied cells get nothing.
fn gen_cross_sets(
    state: &game_state::GameState,
    lexicon: &lexicon::Lexicon,
    strider: matrix::Strider,
    down: bool,
    cross_sets: &mut Vec<alphabet::LetterSet>,
) {
    let board = &state.board;
    cross_sets.clear();
    for i in 0..strider.len() {
        let pos = strider.position(i);
        if board.tile_at_index(strider.at(i)).is_some() {
            cross_sets.push(alphabet::LetterSet::EMPTY);
            continue;
        }
        let (before, after) = match (
            perpendicular_letters(state, pos, !down, -1),
            perpendicular_letters(state, pos, !down, 1),
        ) {
            (Some(before), Some(after)) => (before, after),
            _ => {
                // a letterless blank cannot be part of a word
                cross_sets.push(alphabet::LetterSet::EMPTY);
                continue;
            }
        };
        cross_sets.push(lexicon.letters_between(&before, &after));
    }
}

// The run of letters next to pos in one direction, in reading order.
fn perpendicular_letters(
    state: &game_state::GameState,
    pos: matrix::Position,
    down: bool,
    delta: i8,
) -> Option<Vec<u8>> {
    let mut letters = Vec::new();
    let mut p = pos.step(down, delta);
    while let Some(t) = state.board.tile_at(p) {
        letters.push(t.letter()?);
        p = p.step(down, delta);
    }
    if delta < 0 {
        letters.reverse();
    }
    Some(letters)
}

struct Env<'a> {
    state: &'a game_state::GameState,
    lexicon: &'a lexicon::Lexicon,
    strider: matrix::Strider,
    down: bool,
    cross_sets: Vec<alphabet::LetterSet>,
    rack_tally: tile::RackTally,
    // Letters of the word being built, at their lane indexes.
    word_buffer: Vec<u8>,
    placed: Vec<(matrix::Position, tile::Placing)>,
    found: BTreeSet<rules::PlaceTiles>,
}

impl Env<'_> {
    #[inline(always)]
    fn board_tile(&self, idx: i8) -> Option<tile::Tile> {
        self.state.board.tile_at_index(self.strider.at(idx))
    }

    #[inline(always)]
    fn word(&self, lo: i8, hi: i8) -> &[u8] {
        &self.word_buffer[lo as usize..hi as usize]
    }

    // Pulls board letters left of lo into the word. None if one has no letter.
    fn fold_left(&mut self, mut lo: i8) -> Option<i8> {
        while lo > 0 {
            match self.board_tile(lo - 1) {
                Some(t) => self.word_buffer[(lo - 1) as usize] = t.letter()?,
                None => break,
            }
            lo -= 1;
        }
        Some(lo)
    }

    fn fold_right(&mut self, mut hi: i8) -> Option<i8> {
        while hi < self.strider.len() {
            match self.board_tile(hi) {
                Some(t) => self.word_buffer[hi as usize] = t.letter()?,
                None => break,
            }
            hi += 1;
        }
        Some(hi)
    }

    // Rack tiles that can play as one of the allowed letters, one entry per
    // distinct tile. A blank yields every allowed letter.
    fn candidates(&self, allowed: alphabet::LetterSet) -> Vec<(usize, tile::Placing)> {
        let mut result = Vec::new();
        for slot in 0..self.rack_tally.slots() {
            match self.rack_tally.slot(slot) {
                (_, 0) => {}
                (tile::Tile::Letter { letter, points }, _) => {
                    if allowed.contains(letter) {
                        result.push((slot, tile::Placing::Letter { letter, points }));
                    }
                }
                (tile::Tile::Blank { .. }, _) => {
                    result.extend(
                        allowed
                            .iter()
                            .map(|letter| (slot, tile::Placing::Blank { letter })),
                    );
                }
            }
        }
        result
    }

    fn take(&mut self, slot: usize, idx: i8, placing: tile::Placing) {
        *self.rack_tally.slot_mut(slot) -= 1;
        self.word_buffer[idx as usize] = placing.letter();
        self.placed.push((self.strider.position(idx), placing));
    }

    fn untake(&mut self, slot: usize) {
        self.placed.pop();
        *self.rack_tally.slot_mut(slot) += 1;
    }

    fn record(&mut self) {
        let place = rules::PlaceTiles(self.placed.iter().copied().collect());
        if self.found.contains(&place) {
            return;
        }
        if place.is_valid(self.state) {
            self.found.insert(place);
        } else {
            log::trace!("rejected candidate {}", place);
        }
    }

    // Records [lo, hi) if it is a finished play, then grows it rightwards.
    fn play_right(&mut self, lo: i8, hi: i8) {
        if !self.placed.is_empty() && (hi - lo == 1 || self.lexicon.contains(self.word(lo, hi))) {
            self.record();
        }
        if hi >= self.strider.len() {
            return;
        }
        let allowed = self
            .lexicon
            .suffixes_after(self.word(lo, hi))
            .intersect(self.cross_sets[hi as usize]);
        if allowed.is_empty() {
            return;
        }
        for (slot, placing) in self.candidates(allowed) {
            self.take(slot, hi, placing);
            if let Some(new_hi) = self.fold_right(hi + 1) {
                if self.lexicon.is_infix(self.word(lo, new_hi)) {
                    self.play_right(lo, new_hi);
                }
            }
            self.untake(slot);
        }
    }

    // Every rightward extension of [lo, hi), then the same after growing it leftwards.
    fn play_left(&mut self, lo: i8, hi: i8) {
        self.play_right(lo, hi);
        if lo == 0 {
            return;
        }
        let allowed = self
            .lexicon
            .prefixes_after(self.word(lo, hi))
            .intersect(self.cross_sets[(lo - 1) as usize]);
        if allowed.is_empty() {
            return;
        }
        for (slot, placing) in self.candidates(allowed) {
            self.take(slot, lo - 1, placing);
            if let Some(new_lo) = self.fold_left(lo - 1) {
                if self.lexicon.is_infix(self.word(new_lo, hi)) {
                    self.play_left(new_lo, hi);
                }
            }
            self.untake(slot);
        }
    }

    // Puts each possible tile on an empty cell and searches outwards from it.
    fn play_through_cell(&mut self, idx: i8) {
        let allowed = self.cross_sets[idx as usize];
        if allowed.is_empty() {
            return;
        }
        for (slot, placing) in self.candidates(allowed) {
            self.take(slot, idx, placing);
            if let (Some(lo), Some(hi)) = (self.fold_left(idx), self.fold_right(idx + 1)) {
                if self.lexicon.is_infix(self.word(lo, hi)) {
                    self.play_left(lo, hi);
                }
            }
            self.untake(slot);
        }
    }

    fn has_perpendicular_neighbor(&self, idx: i8) -> bool {
        let pos = self.strider.position(idx);
        let board = &self.state.board;
        board.tile_at(pos.step(!self.down, -1)).is_some()
            || board.tile_at(pos.step(!self.down, 1)).is_some()
    }

    fn gen_lane(&mut self, board_is_empty: bool) {
        let len = self.strider.len();
        if board_is_empty {
            match self.state.board.starting_position() {
                Some(start) => {
                    for idx in 0..len {
                        if self.strider.position(idx) == start {
                            self.play_through_cell(idx);
                        }
                    }
                }
                None => {
                    for idx in 0..len {
                        self.play_through_cell(idx);
                    }
                }
            }
            return;
        }

        let mut idx = 0;
        while idx < len {
            if self.board_tile(idx).is_some() {
                // anchored on the existing run starting here
                let lo = idx;
                while idx < len && self.board_tile(idx).is_some() {
                    idx += 1;
                }
                if let Some(hi) = self.fold_right(lo) {
                    self.play_left(lo, hi);
                }
            } else {
                // offset anchor: starts a word across this lane
                if self.has_perpendicular_neighbor(idx) {
                    self.play_through_cell(idx);
                }
                idx += 1;
            }
        }
    }
}

// Every valid tile placement for the current player, each once.
pub fn generate_all(state: &game_state::GameState) -> BTreeSet<rules::PlaceTiles> {
    let rack = &state.current_player().rack;
    if state.finished || rack.is_empty() {
        return BTreeSet::new();
    }
    let lexicon = state.config.lexicon();
    let dim = state.board.dim();
    let board_is_empty = state.board.is_empty();
    let mut env = Env {
        state,
        lexicon,
        strider: dim.across(0),
        down: false,
        cross_sets: Vec::with_capacity(std::cmp::max(dim.rows, dim.cols) as usize),
        rack_tally: tile::RackTally::from_tiles(rack),
        word_buffer: vec![0u8; std::cmp::max(dim.rows, dim.cols) as usize],
        placed: Vec::with_capacity(rack.len()),
        found: BTreeSet::new(),
    };
    for down in [false, true] {
        for lane in 0..dim.num_lanes(down) {
            env.strider = dim.lane(down, lane);
            env.down = down;
            gen_cross_sets(state, lexicon, env.strider, down, &mut env.cross_sets);
            env.gen_lane(board_is_empty);
        }
    }
    log::debug!(
        "{} place moves for rack {}",
        env.found.len(),
        tile::fmt_tiles(rack)
    );
    env.found
}

pub fn generate_all_moves(state: &game_state::GameState) -> Vec<rules::Move> {
    generate_all(state)
        .into_iter()
        .map(rules::Move::PlaceTiles)
        .collect()
}
