// Copyright (C) 2020-2024 Andy Kurnia.

use super::{board_layout, error, matrix, tile};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

// A horizontal or vertical run of at least two tiles with no gaps, in reading order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WordOnBoard {
    cells: Vec<(matrix::Position, tile::Tile)>,
}

impl WordOnBoard {
    pub fn new<II: IntoIterator<Item = (matrix::Position, tile::Tile)>>(cells: II) -> Self {
        let mut cells = cells.into_iter().collect::<Vec<_>>();
        cells.sort_unstable_by_key(|&(pos, _)| (pos.x as i16) + (pos.y as i16));
        Self { cells }
    }

    pub fn from_str_fixture(tile_string: &str) -> error::Returns<Self> {
        Ok(Self::new(tiles_from_fixture(tile_string, &HashMap::new())?))
    }

    #[inline(always)]
    pub fn cells(&self) -> &[(matrix::Position, tile::Tile)] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    // Single tiles count as horizontal.
    pub fn direction(&self) -> Direction {
        match self.cells.as_slice() {
            [(p1, _), (p2, _), ..] if p1.x == p2.x => Direction::Vertical,
            _ => Direction::Horizontal,
        }
    }

    pub fn word(&self) -> String {
        self.cells
            .iter()
            .map(|(_, tile)| tile.letter().map_or(crate::alphabet::BLANK_LABEL, |c| c as char))
            .collect()
    }

    pub fn contains(&self, pos: matrix::Position) -> bool {
        self.cells.iter().any(|&(p, _)| p == pos)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    layout: board_layout::BoardLayout,
    tiles: Box<[Option<tile::Tile>]>,
}

impl Board {
    pub fn new(layout: board_layout::BoardLayout) -> Self {
        let area = layout.dim().area();
        Self {
            layout,
            tiles: vec![None; area].into_boxed_slice(),
        }
    }

    // Dimensions come from the multiplier string if there is one.
    pub fn from_strings(
        multiplier_string: Option<&str>,
        tile_string: Option<&str>,
        letter_values: &HashMap<u8, i16>,
    ) -> error::Returns<Self> {
        let layout = match (multiplier_string, tile_string) {
            (Some(m), _) => board_layout::BoardLayout::from_str(m)?,
            (None, Some(t)) => board_layout::BoardLayout::empty(board_layout::dim_from_str(t)?),
            (None, None) => board_layout::BoardLayout::empty(matrix::Dim::default()),
        };
        let mut board = Self::new(layout);
        if let Some(t) = tile_string {
            for (pos, tile) in tiles_from_fixture(t, letter_values)? {
                if !board.contains_position(pos) {
                    return_error!(format!("tile at {} is off the board", pos));
                }
                board.set_tile(pos, tile);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn layout(&self) -> &board_layout::BoardLayout {
        &self.layout
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.layout.dim()
    }

    #[inline(always)]
    pub fn width(&self) -> i8 {
        self.dim().cols
    }

    #[inline(always)]
    pub fn height(&self) -> i8 {
        self.dim().rows
    }

    #[inline(always)]
    pub fn starting_position(&self) -> Option<matrix::Position> {
        self.layout.starting_position()
    }

    #[inline(always)]
    pub fn contains_position(&self, pos: matrix::Position) -> bool {
        self.dim().contains(pos)
    }

    #[inline(always)]
    pub fn tile_at(&self, pos: matrix::Position) -> Option<tile::Tile> {
        if self.contains_position(pos) {
            self.tiles[self.dim().at(pos)]
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn letter_at(&self, pos: matrix::Position) -> Option<u8> {
        self.tile_at(pos).and_then(|t| t.letter())
    }

    #[inline(always)]
    pub fn multiplier_at(&self, pos: matrix::Position) -> Option<board_layout::Multiplier> {
        self.layout.multiplier_at(pos)
    }

    // Indexed through a strider, which is always in bounds.
    #[inline(always)]
    pub fn tile_at_index(&self, idx: usize) -> Option<tile::Tile> {
        self.tiles[idx]
    }

    // Tiles are never removed. Panics off the board.
    pub fn set_tile(&mut self, pos: matrix::Position, tile: tile::Tile) {
        assert!(self.contains_position(pos), "{} is off the board", pos);
        let idx = self.dim().at(pos);
        self.tiles[idx] = Some(tile);
    }

    pub fn all_positions(&self) -> impl Iterator<Item = matrix::Position> {
        self.dim().positions()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.iter().all(Option::is_none)
    }

    pub fn num_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (matrix::Position, tile::Tile)> + '_ {
        self.all_positions()
            .filter_map(|pos| self.tile_at(pos).map(|t| (pos, t)))
    }

    pub fn has_neighbor(&self, pos: matrix::Position) -> bool {
        pos.neighbors().iter().any(|&p| self.tile_at(p).is_some())
    }

    // The maximal run through pos along one axis, if it is at least two long.
    pub fn word_through(&self, pos: matrix::Position, down: bool) -> Option<WordOnBoard> {
        self.tile_at(pos)?;
        let mut start = pos;
        while self.tile_at(start.step(down, -1)).is_some() {
            start = start.step(down, -1);
        }
        let mut cells = Vec::new();
        let mut p = start;
        while let Some(t) = self.tile_at(p) {
            cells.push((p, t));
            p = p.step(down, 1);
        }
        if cells.len() >= 2 {
            Some(WordOnBoard { cells })
        } else {
            None
        }
    }

    // Every maximal run of two or more tiles, rows first then columns.
    pub fn get_words(&self) -> Vec<WordOnBoard> {
        let dim = self.dim();
        let mut result = Vec::new();
        for down in [false, true] {
            for lane in 0..dim.num_lanes(down) {
                let strider = dim.lane(down, lane);
                let mut i = 0;
                while i < strider.len() {
                    // i is a run start: its predecessor is empty.
                    if self.tiles[strider.at(i)].is_none() {
                        i += 1;
                        continue;
                    }
                    let mut cells = Vec::new();
                    while i < strider.len() {
                        match self.tiles[strider.at(i)] {
                            Some(t) => cells.push((strider.position(i), t)),
                            None => break,
                        }
                        i += 1;
                    }
                    if cells.len() >= 2 {
                        result.push(WordOnBoard { cells });
                    }
                }
            }
        }
        result
    }
}

pub fn make_scrabble_board() -> error::Returns<Board> {
    Ok(Board::new(board_layout::make_scrabble_board_layout()?))
}

// Every tile character in a fixture string; anything not a letter or '*' is empty.
pub fn tiles_from_fixture(
    tile_string: &str,
    letter_values: &HashMap<u8, i16>,
) -> error::Returns<Vec<(matrix::Position, tile::Tile)>> {
    board_layout::chars_with_positions(tile_string)
        .filter(|&(_, c)| c.is_ascii_alphabetic() || c == crate::alphabet::BLANK_LABEL)
        .map(|(pos, c)| Ok((pos, tile::Tile::from_label(c, letter_values)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix::Position;

    fn board(tiles: &str) -> Board {
        Board::from_strings(None, Some(tiles), &HashMap::new()).unwrap()
    }

    fn words_of(board: &Board) -> Vec<String> {
        let mut words = board
            .get_words()
            .iter()
            .map(WordOnBoard::word)
            .collect::<Vec<_>>();
        words.sort();
        words
    }

    #[test]
    fn empty_board_has_no_words() {
        assert!(board("   \n   ").get_words().is_empty());
        assert!(board("   \n   ").is_empty());
        assert!(board(" A \n   ").get_words().is_empty());
    }

    #[test]
    fn single_word() {
        let b = board("AA ");
        let words = b.get_words();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word(), "AA");
        assert_eq!(words[0].direction(), Direction::Horizontal);
        assert_eq!(words[0], WordOnBoard::from_str_fixture("AA").unwrap());
    }

    #[test]
    fn crossing_words() {
        let b = board(" B\nAA");
        assert_eq!(words_of(&b), vec!["AA", "BA"]);
        let vertical = b.word_through(Position::new(1, 0), true).unwrap();
        assert_eq!(vertical.direction(), Direction::Vertical);
        assert_eq!(vertical.word(), "BA");
        assert!(b.word_through(Position::new(1, 0), false).is_none());
    }

    #[test]
    fn square_has_four_words() {
        let b = board("AA\nAA");
        assert_eq!(b.get_words().len(), 4);
        assert!(words_of(&b).iter().all(|w| w == "AA"));
    }

    #[test]
    fn blanks_keep_their_letter() {
        let b = board("Qi\n* ");
        assert_eq!(b.letter_at(Position::new(1, 0)), Some(b'I'));
        assert_eq!(b.tile_at(Position::new(1, 0)).unwrap().points(), 0);
        assert_eq!(b.letter_at(Position::new(0, 1)), None);
        assert!(b.tile_at(Position::new(0, 1)).is_some());
        assert_eq!(words_of(&b), vec!["Q*", "QI"]);
    }

    #[test]
    fn lookups_and_bounds() {
        let values = crate::alphabet::ENGLISH_ALPHABET.letter_values();
        let b = Board::from_strings(Some("2 A\n   "), Some("  K"), &values).unwrap();
        assert_eq!(b.width(), 3);
        assert_eq!(b.height(), 2);
        assert_eq!(b.all_positions().count(), 6);
        assert_eq!(
            b.multiplier_at(Position::new(0, 0)),
            Some(board_layout::Multiplier::Word(2))
        );
        assert_eq!(b.tile_at(Position::new(2, 0)).unwrap().points(), 5);
        assert!(!b.contains_position(Position::new(3, 0)));
        assert_eq!(b.tile_at(Position::new(-1, 0)), None);
        assert!(b.has_neighbor(Position::new(2, 1)));
        assert!(!b.has_neighbor(Position::new(0, 1)));
        assert!(Board::from_strings(Some("  "), Some("   A"), &values).is_err());
    }
}
