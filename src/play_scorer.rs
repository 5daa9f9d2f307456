// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board, game_config, matrix, tile};
use std::collections::BTreeMap;

pub type Placings = BTreeMap<matrix::Position, tile::Placing>;

// Writes the placings onto a copy of the board. Off-board placings are dropped.
pub fn board_with_placings(board: &board::Board, placings: &Placings) -> board::Board {
    let mut scratch = board.clone();
    for (&pos, placing) in placings {
        if scratch.contains_position(pos) {
            scratch.set_tile(pos, placing.board_tile());
        }
    }
    scratch
}

// Every word of two or more tiles that goes through a placed tile, each
// reported once. Words not touching a placed tile existed before the move.
pub fn get_words_made(board: &board::Board, placings: &Placings) -> Vec<board::WordOnBoard> {
    let scratch = board_with_placings(board, placings);
    words_made_on(&scratch, placings)
}

fn words_made_on(scratch: &board::Board, placings: &Placings) -> Vec<board::WordOnBoard> {
    let mut vertical = Vec::<board::WordOnBoard>::new();
    let mut horizontal = Vec::<board::WordOnBoard>::new();
    for &pos in placings.keys() {
        if !vertical.iter().any(|w| w.contains(pos)) {
            if let Some(word) = scratch.word_through(pos, true) {
                vertical.push(word);
            }
        }
        if !horizontal.iter().any(|w| w.contains(pos)) {
            if let Some(word) = scratch.word_through(pos, false) {
                horizontal.push(word);
            }
        }
    }
    vertical.extend(horizontal);
    vertical
}

// Multipliers only count on cells placed by this move.
pub fn get_points_for_word(
    board: &board::Board,
    word: &board::WordOnBoard,
    placings: &Placings,
) -> i32 {
    let mut word_multiplier = 1;
    let mut word_score = 0;
    for &(pos, tile) in word.cells() {
        let face_value = tile.points() as i32;
        match board.multiplier_at(pos) {
            Some(multiplier) if placings.contains_key(&pos) => {
                word_multiplier *= multiplier.word_multiplier();
                word_score += face_value * multiplier.tile_multiplier();
            }
            _ => word_score += face_value,
        }
    }
    word_score * word_multiplier
}

// Sum of every new word, plus the bingo bonus.
pub fn score_placings(
    config: &game_config::GameConfig,
    board: &board::Board,
    placings: &Placings,
) -> i32 {
    let scratch = board_with_placings(board, placings);
    let words_score = words_made_on(&scratch, placings)
        .iter()
        .map(|word| get_points_for_word(&scratch, word, placings))
        .sum::<i32>();
    words_score + config.num_played_bonus(placings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alphabet, lexicon};
    use matrix::Position;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn values() -> HashMap<u8, i16> {
        alphabet::ENGLISH_ALPHABET.letter_values()
    }

    fn placings(s: &str) -> Placings {
        board::tiles_from_fixture(s, &values())
            .unwrap()
            .into_iter()
            .map(|(pos, t)| (pos, tile::Placing::from_tile(t).unwrap()))
            .collect()
    }

    fn config() -> game_config::GameConfig {
        let lexicon = Arc::new(lexicon::Lexicon::new(["KA"]).unwrap());
        game_config::make_scrabble_game_config(lexicon)
    }

    fn ka_score(multipliers: &str) -> i32 {
        let board = board::Board::from_strings(Some(multipliers), None, &values()).unwrap();
        score_placings(&config(), &board, &placings("KA"))
    }

    #[test]
    fn scoring_table() {
        assert_eq!(ka_score("  "), 6);
        assert_eq!(ka_score("A "), 11);
        assert_eq!(ka_score("B3"), 48);
        assert_eq!(ka_score("B2"), 32);
        assert_eq!(ka_score("32"), 36);
    }

    #[test]
    fn no_placings_make_no_words() {
        let board = board::Board::from_strings(None, Some("KA \n A "), &values()).unwrap();
        assert!(get_words_made(&board, &Placings::new()).is_empty());
    }

    #[test]
    fn existing_tiles_skip_multipliers() {
        let board = board::Board::from_strings(Some("3  "), Some("K  "), &values()).unwrap();
        let placed = placings(" A");
        let words = get_words_made(&board, &placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word(), "KA");
        assert_eq!(score_placings(&config(), &board, &placed), 6);
    }

    #[test]
    fn each_new_word_once() {
        // Placing A under K and beside an existing A makes KA down and AA across.
        let board = board::Board::from_strings(None, Some("K  \n A "), &values()).unwrap();
        let placed = placings("   \nA  ");
        let mut words = get_words_made(&board, &placed)
            .iter()
            .map(board::WordOnBoard::word)
            .collect::<Vec<_>>();
        words.sort();
        assert_eq!(words, vec!["AA", "KA"]);
        let scratch = board_with_placings(&board, &placed);
        assert_eq!(scratch.get_words().len(), 2);
        assert_eq!(scratch.letter_at(Position::new(0, 1)), Some(b'A'));
    }

    #[test]
    fn blanks_score_zero_and_bingo_counts_tiles() {
        let board = board::Board::from_strings(Some("       "), None, &values()).unwrap();
        assert_eq!(score_placings(&config(), &board, &placings("KaKAKAK")), 5 * 4 + 2 + 50);
    }
}
