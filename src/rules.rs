// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, game_state, matrix, play_scorer, tile};
use rand::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// Tiles put on the board in one turn, keyed by where they go.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlaceTiles(pub play_scorer::Placings);

impl PlaceTiles {
    pub fn from_pairs<II: IntoIterator<Item = (matrix::Position, tile::Placing)>>(
        pairs: II,
    ) -> error::Returns<Self> {
        let mut placings = BTreeMap::new();
        for (pos, placing) in pairs {
            if placings.insert(pos, placing).is_some() {
                return_error!(format!("{} is placed twice", pos));
            }
        }
        Ok(Self(placings))
    }

    // Tiles in the board mini-language; lowercase letters are blanks.
    pub fn from_str_fixture(
        tile_string: &str,
        letter_values: &HashMap<u8, i16>,
    ) -> error::Returns<Self> {
        let mut pairs = Vec::new();
        for (pos, t) in crate::board::tiles_from_fixture(tile_string, letter_values)? {
            let Some(placing) = tile::Placing::from_tile(t) else {
                return_error!(format!("blank at {} needs a letter", pos));
            };
            pairs.push((pos, placing));
        }
        Self::from_pairs(pairs)
    }

    #[inline(always)]
    pub fn placings(&self) -> &play_scorer::Placings {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // What leaves the rack. A blank is one blank whatever it plays as.
    pub fn rack_tiles(&self) -> Vec<tile::Tile> {
        self.0.values().map(tile::Placing::rack_tile).collect()
    }

    // Points this would score for the current player, assuming it is valid.
    pub fn score(&self, state: &game_state::GameState) -> i32 {
        play_scorer::score_placings(&state.config, &state.board, &self.0)
    }

    // Cheap structural checks run first since the move generator calls this
    // for every candidate.
    pub fn is_valid(&self, state: &game_state::GameState) -> bool {
        if state.finished || self.0.is_empty() {
            return false;
        }
        let board = &state.board;
        if !self
            .0
            .keys()
            .all(|&pos| board.contains_position(pos) && board.tile_at(pos).is_none())
        {
            return false;
        }
        if !self.is_one_line(state) {
            return false;
        }
        let rack = tile::RackTally::from_tiles(&state.current_player().rack);
        if !rack.contains_all(&tile::RackTally::from_tiles(&self.rack_tiles())) {
            return false;
        }
        if board.is_empty() {
            if let Some(start) = board.starting_position() {
                if !self.0.contains_key(&start) {
                    return false;
                }
            }
        } else if !self.0.keys().any(|&pos| board.has_neighbor(pos)) {
            return false;
        }
        let words = play_scorer::get_words_made(board, &self.0);
        let lexicon = state.config.lexicon();
        !words.is_empty() && words.iter().all(|w| lexicon.contains_str(&w.word()))
    }

    // Every cell from the first to the last placing holds exactly one of a
    // placed tile or a board tile.
    fn is_one_line(&self, state: &game_state::GameState) -> bool {
        // Keys are sorted by x then y.
        let (first, last) = match (self.0.keys().next(), self.0.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return false,
        };
        let down = if first.y == last.y && self.0.keys().all(|p| p.y == first.y) {
            false
        } else if first.x == last.x && self.0.keys().all(|p| p.x == first.x) {
            true
        } else {
            return false;
        };
        let mut pos = first;
        while pos != last {
            pos = pos.step(down, 1);
            if self.0.contains_key(&pos) == state.board.tile_at(pos).is_some() {
                return false;
            }
        }
        true
    }

    pub fn perform(
        &self,
        state: &mut game_state::GameState,
        rng: &mut dyn RngCore,
    ) -> error::Returns<()> {
        let mut rack = state.current_player().rack.clone();
        tile::use_tiles(&mut rack, self.rack_tiles().iter())?;

        let score = self.score(state);
        state.current_player_mut().score += score;
        if score > 0 {
            state.num_scoreless_turns = 0;
        } else {
            state.num_scoreless_turns = state.num_scoreless_turns.saturating_add(1);
        }
        state.end_game_for_scoreless_turns();

        state.current_player_mut().rack = rack;
        for (&pos, placing) in &self.0 {
            state.board.set_tile(pos, placing.board_tile());
        }

        if state.bag.is_empty() && state.current_player().rack.is_empty() {
            if !state.finished {
                log::debug!(
                    "{} played out",
                    state.current_player().player.name_or_number()
                );
                state.finished = true;
                state.apply_final_tile_deduction(true);
            }
        } else {
            state.draw_for_current(rng, self.0.len());
        }

        if !state.finished {
            state.next_turn();
        }
        Ok(())
    }
}

impl fmt::Display for PlaceTiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (pos, placing)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", placing.board_tile().label(), pos)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    PlaceTiles(PlaceTiles),
    ExchangeTiles(Vec<tile::Tile>),
    Pass,
}

impl Move {
    pub fn is_valid(&self, state: &game_state::GameState) -> bool {
        match self {
            Move::PlaceTiles(place) => place.is_valid(state),
            Move::ExchangeTiles(tiles) => {
                !state.finished
                    && state.bag.len() >= state.config.min_tiles_for_turn_in() as usize
                    && tile::RackTally::from_tiles(&state.current_player().rack)
                        .contains_all(&tile::RackTally::from_tiles(tiles))
            }
            Move::Pass => !state.finished,
        }
    }

    pub fn perform(
        &self,
        state: &mut game_state::GameState,
        rng: &mut dyn RngCore,
    ) -> error::Returns<()> {
        match self {
            Move::PlaceTiles(place) => place.perform(state, rng),
            Move::ExchangeTiles(tiles) => {
                let mut rack = state.current_player().rack.clone();
                tile::use_tiles(&mut rack, tiles.iter())?;
                state.num_scoreless_turns = state.num_scoreless_turns.saturating_add(1);
                state.end_game_for_scoreless_turns();
                state.current_player_mut().rack = rack;
                state.draw_for_current(rng, tiles.len());
                state.bag.put_back(rng, tiles);
                if !state.finished {
                    state.next_turn();
                }
                Ok(())
            }
            Move::Pass => {
                state.num_scoreless_turns = state.num_scoreless_turns.saturating_add(1);
                state.end_game_for_scoreless_turns();
                if !state.finished {
                    state.next_turn();
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::PlaceTiles(place) => write!(f, "place {}", place),
            Move::ExchangeTiles(tiles) => write!(f, "exchange {}", tile::fmt_tiles(tiles)),
            Move::Pass => write!(f, "pass"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, bag, board, board_layout, game_config, lexicon};
    use game_state::{GameState, Player};
    use matrix::Position;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    fn values() -> HashMap<u8, i16> {
        alphabet::ENGLISH_ALPHABET.letter_values()
    }

    fn config() -> Arc<game_config::GameConfig> {
        let lexicon =
            lexicon::Lexicon::new(["AA", "AB", "AT", "BA", "TA", "ABA", "KA"]).unwrap();
        Arc::new(game_config::GameConfig::new("test", Arc::new(lexicon), 7, 7, 7, 50, 6).unwrap())
    }

    fn tiles(s: &str) -> Vec<tile::Tile> {
        tile::tiles_from_str(s, &values()).unwrap()
    }

    fn state(board_tiles: &str, racks: &[&str], bag_tiles: &str) -> GameState {
        let board = board::Board::from_strings(None, Some(board_tiles), &values()).unwrap();
        let mut state = GameState::new(
            config(),
            board,
            bag::Bag::new(tiles(bag_tiles)),
            (0..racks.len() as u8).map(Player::new).collect(),
        )
        .unwrap();
        for (player, rack) in state.players.iter_mut().zip(racks) {
            player.rack = tiles(rack);
        }
        state
    }

    fn empty_board_with_start(racks: &[&str]) -> GameState {
        let mut state = state("     \n     \n     \n     \n     ", racks, "");
        let layout = board_layout::BoardLayout::empty(state.board.dim())
            .with_starting_position(Position::new(2, 2))
            .unwrap();
        state.board = board::Board::new(layout);
        state
    }

    fn place(s: &str) -> PlaceTiles {
        PlaceTiles::from_str_fixture(s, &values()).unwrap()
    }

    const MIDDLE_B: &str = "     \n     \n  B  \n     \n     ";

    #[test]
    fn placings_are_keyed_by_position() {
        let a = tile::Placing::Letter {
            letter: b'A',
            points: 1,
        };
        assert!(PlaceTiles::from_pairs([(Position::new(0, 0), a), (Position::new(0, 0), a)]).is_err());
        assert!(PlaceTiles::from_str_fixture("*", &values()).is_err());
        assert_eq!(place(" A\nb").len(), 2);
        assert_eq!(place(" A\nb").rack_tiles().len(), 2);
        assert!(place(" A\nb").rack_tiles().contains(&tile::Tile::BLANK));
    }

    #[test]
    fn line_with_board_tile_in_gap() {
        let s = state(MIDDLE_B, &["AAT", ""], "");
        assert!(place("     \n     \n A A ").is_valid(&s));
        // Gap not covered.
        assert!(!place("     \n     \n A  A").is_valid(&s));
        // Covering a board tile.
        assert!(!place("     \n     \n  A  ").is_valid(&s));
    }

    #[test]
    fn not_in_line() {
        let s = state(MIDDLE_B, &["AAT", ""], "");
        assert!(!place("     \n     \n   A \n  T  ").is_valid(&s));
        assert!(place("     \n  A  \n     ").is_valid(&s));
        assert!(place("     \n  A  \n     \n  A  ").is_valid(&s));
    }

    #[test]
    fn must_touch_existing_tiles() {
        let s = state(MIDDLE_B, &["AAT", ""], "");
        assert!(!place("AA").is_valid(&s));
        assert!(!place("TA").is_valid(&s));
    }

    #[test]
    fn rack_must_hold_tiles() {
        let s = state(MIDDLE_B, &["A*", ""], "");
        assert!(!place("     \n     \n A A ").is_valid(&s));
        assert!(place("     \n     \n A a ").is_valid(&s));
        assert!(place("     \n     \n a   ").is_valid(&s));
    }

    #[test]
    fn words_must_be_in_lexicon() {
        let s = state(MIDDLE_B, &["TTA", ""], "");
        assert!(!place("     \n     \n   T ").is_valid(&s));
        assert!(!place("     \n     \n T   ").is_valid(&s));
        assert!(place("     \n     \n   A ").is_valid(&s));
    }

    #[test]
    fn first_move_covers_start() {
        let s = empty_board_with_start(&["AB", ""]);
        assert!(place("     \n     \n  AB ").is_valid(&s));
        assert!(!place("AB").is_valid(&s));
        // A lone tile makes no word.
        assert!(!place("     \n     \n  A  ").is_valid(&s));
        // Without a starting position anywhere goes.
        let s = state("     \n     ", &["AB", ""], "");
        assert!(place("AB").is_valid(&s));
    }

    #[test]
    fn validity_is_idempotent() {
        let s = state(MIDDLE_B, &["AAT", ""], "");
        let before = s.clone();
        for m in [
            Move::PlaceTiles(place("     \n     \n A A ")),
            Move::PlaceTiles(place("AA")),
            Move::ExchangeTiles(tiles("A")),
            Move::Pass,
        ] {
            let first = m.is_valid(&s);
            assert_eq!(m.is_valid(&s), first);
            assert_eq!(s, before);
        }
    }

    #[test]
    fn placement_scores_and_draws() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["AAT", "K"], "ZZ");
        let m = Move::PlaceTiles(place("     \n     \n A A "));
        m.perform(&mut s, &mut rng).unwrap();
        assert_eq!(s.players[0].score, 5);
        assert_eq!(s.players[0].rack.len(), 3);
        assert!(s.bag.is_empty());
        assert_eq!(s.turn, 1);
        assert_eq!(s.num_scoreless_turns, 0);
        assert!(!s.finished);
        assert_eq!(s.board.letter_at(Position::new(3, 2)), Some(b'A'));
    }

    #[test]
    fn blank_is_written_with_its_letter() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["A*", "K"], "QQ");
        Move::PlaceTiles(place("     \n     \n a   "))
            .perform(&mut s, &mut rng)
            .unwrap();
        assert_eq!(
            s.board.tile_at(Position::new(1, 2)),
            Some(tile::Tile::Blank {
                letter: Some(b'A')
            })
        );
        assert_eq!(s.players[0].score, 3);
        assert_eq!(
            tile::RackTally::from_tiles(&s.players[0].rack),
            tile::RackTally::from_tiles(&tiles("AQ"))
        );
    }

    #[test]
    fn playing_out_ends_the_game() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["A", "KZ", "E"], "");
        Move::PlaceTiles(place("     \n     \n A   "))
            .perform(&mut s, &mut rng)
            .unwrap();
        assert!(s.finished);
        assert_eq!(s.turn, 0);
        assert_eq!(s.scores(), vec![4 + 15 + 1, -15, -1]);
        assert!(!Move::Pass.is_valid(&s));
    }

    #[test]
    fn six_passes_end_the_game() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["KA", "Z"], "");
        for _ in 0..5 {
            Move::Pass.perform(&mut s, &mut rng).unwrap();
        }
        assert!(!s.finished);
        assert_eq!(s.turn, 1);
        Move::Pass.perform(&mut s, &mut rng).unwrap();
        assert!(s.finished);
        assert_eq!(s.scores(), vec![-6, -10]);
        assert_eq!(s.turn, 1);
    }

    #[test]
    fn scoring_resets_scoreless_count() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["AAT", "T"], "");
        Move::Pass.perform(&mut s, &mut rng).unwrap();
        Move::Pass.perform(&mut s, &mut rng).unwrap();
        assert_eq!(s.num_scoreless_turns, 2);
        Move::PlaceTiles(place("     \n     \n   A "))
            .perform(&mut s, &mut rng)
            .unwrap();
        assert_eq!(s.num_scoreless_turns, 0);
    }

    #[test]
    fn exchange_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut s = state(MIDDLE_B, &["AABTTKE", ""], "QQQQZZZ");
        let swapped = tiles("AAK");
        let m = Move::ExchangeTiles(swapped.clone());
        assert!(m.is_valid(&s));
        let total = {
            let mut all = s.bag.0.clone();
            all.extend_from_slice(&s.players[0].rack);
            tile::RackTally::from_tiles(&all)
        };
        m.perform(&mut s, &mut rng).unwrap();
        assert_eq!(s.players[0].rack.len(), 7);
        assert_eq!(s.bag.len(), 7);
        assert!(s.bag.tally().contains_all(&tile::RackTally::from_tiles(&swapped)));
        let mut all = s.bag.0.clone();
        all.extend_from_slice(&s.players[0].rack);
        assert_eq!(tile::RackTally::from_tiles(&all), total);
        assert_eq!(s.num_scoreless_turns, 1);
        assert_eq!(s.turn, 1);
    }

    #[test]
    fn exchange_needs_tiles_and_bag() {
        let s = state(MIDDLE_B, &["AABTTKE", ""], "QQQQZZZ");
        assert!(!Move::ExchangeTiles(tiles("AAA")).is_valid(&s));
        assert!(!Move::ExchangeTiles(tiles("*")).is_valid(&s));
        let s = state(MIDDLE_B, &["AABTTKE", ""], "QQQQZZ");
        assert!(!Move::ExchangeTiles(tiles("A")).is_valid(&s));
    }

    #[test]
    fn bad_tiles_leave_state_alone() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut s = state(MIDDLE_B, &["T", ""], "");
        let before = s.clone();
        assert!(Move::PlaceTiles(place("     \n     \n A   "))
            .perform(&mut s, &mut rng)
            .is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn display() {
        let m = Move::PlaceTiles(place("Ka"));
        assert_eq!(m.to_string(), "place K(0, 0) a(1, 0)");
        assert_eq!(Move::ExchangeTiles(tiles("AB")).to_string(), "exchange AB");
    }
}
