// Copyright (C) 2020-2024 Andy Kurnia.

use super::{error, matrix};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Multiplier {
    // Multiplies the whole word once.
    Word(i8),
    // Multiplies only the tile on this cell.
    Tile(i8),
}

impl Multiplier {
    #[inline(always)]
    pub fn word_multiplier(&self) -> i32 {
        match *self {
            Multiplier::Word(m) => m as i32,
            Multiplier::Tile(_) => 1,
        }
    }

    #[inline(always)]
    pub fn tile_multiplier(&self) -> i32 {
        match *self {
            Multiplier::Word(_) => 1,
            Multiplier::Tile(m) => m as i32,
        }
    }
}

// Digits are word multipliers, A is a double tile, B a triple tile, and so on.
pub static SCRABBLE_MULTIPLIER_STRING: &str = "\
3  A   3   A  3
 2   B   B   2
  2   A A   2
A  2   A   2  A
    2     2
 B   B   B   B
  A   A A   A
3  A   2   A  3
  A   A A   A
 B   B   B   B
    2     2
A  2   A   2  A
  2   A A   2
 2   B   B   2
3  A   3   A  3";

pub const MAX_DIM: usize = 100;

// Width is the length of the first line, height the number of lines.
pub fn dim_from_str(s: &str) -> error::Returns<matrix::Dim> {
    if s.is_empty() {
        return Ok(matrix::Dim::default());
    }
    let lines = s.split('\n').collect::<Vec<_>>();
    let cols = lines[0].chars().count();
    let rows = lines.len();
    if cols > MAX_DIM || rows > MAX_DIM {
        return_error!(format!(
            "board is {}x{}, at most {}x{} is supported",
            cols, rows, MAX_DIM, MAX_DIM
        ));
    }
    Ok(matrix::Dim {
        rows: rows as i8,
        cols: cols as i8,
    })
}

// Yields every character with its position. Characters past the width are
// reported too so callers can reject them.
pub fn chars_with_positions(s: &str) -> impl Iterator<Item = (matrix::Position, char)> + '_ {
    s.split('\n').enumerate().flat_map(|(y, line)| {
        line.chars()
            .enumerate()
            .map(move |(x, c)| (matrix::Position::new(x as i8, y as i8), c))
    })
}

pub fn multiplier_from_char(c: char) -> error::Returns<Option<Multiplier>> {
    Ok(if let Some(d) = c.to_digit(10) {
        if d < 2 {
            return_error!(format!("invalid word multiplier {:?}", c));
        }
        Some(Multiplier::Word(d as i8))
    } else if c.is_ascii_uppercase() {
        Some(Multiplier::Tile((c as u8 - b'A') as i8 + 2))
    } else if c.is_alphanumeric() {
        return_error!(format!("invalid multiplier {:?}", c));
    } else {
        None
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    dim: matrix::Dim,
    multipliers: Arc<[Option<Multiplier>]>,
    starting_position: Option<matrix::Position>,
}

impl BoardLayout {
    pub fn new(
        dim: matrix::Dim,
        multipliers: Box<[Option<Multiplier>]>,
        starting_position: Option<matrix::Position>,
    ) -> error::Returns<Self> {
        if multipliers.len() != dim.area() {
            return_error!(format!(
                "need {} multiplier cells, found {}",
                dim.area(),
                multipliers.len()
            ));
        }
        if let Some(pos) = starting_position {
            if !dim.contains(pos) {
                return_error!(format!("starting position {} is off the board", pos));
            }
        }
        Ok(Self {
            dim,
            multipliers: multipliers.into(),
            starting_position,
        })
    }

    pub fn empty(dim: matrix::Dim) -> Self {
        Self {
            dim,
            multipliers: vec![None; dim.area()].into(),
            starting_position: None,
        }
    }

    pub fn from_str(s: &str) -> error::Returns<Self> {
        let dim = dim_from_str(s)?;
        let mut multipliers = vec![None; dim.area()];
        for (pos, c) in chars_with_positions(s) {
            let multiplier = multiplier_from_char(c)?;
            if multiplier.is_some() {
                if !dim.contains(pos) {
                    return_error!(format!("multiplier {:?} at {} is off the board", c, pos));
                }
                multipliers[dim.at(pos)] = multiplier;
            }
        }
        Self::new(dim, multipliers.into_boxed_slice(), None)
    }

    pub fn with_starting_position(mut self, pos: matrix::Position) -> error::Returns<Self> {
        if !self.dim.contains(pos) {
            return_error!(format!("starting position {} is off the board", pos));
        }
        self.starting_position = Some(pos);
        Ok(self)
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn starting_position(&self) -> Option<matrix::Position> {
        self.starting_position
    }

    #[inline(always)]
    pub fn multiplier_at(&self, pos: matrix::Position) -> Option<Multiplier> {
        if self.dim.contains(pos) {
            self.multipliers[self.dim.at(pos)]
        } else {
            None
        }
    }
}

pub fn make_scrabble_board_layout() -> error::Returns<BoardLayout> {
    BoardLayout::from_str(SCRABBLE_MULTIPLIER_STRING)?
        .with_starting_position(matrix::Position::new(7, 7))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix::Position;

    #[test]
    fn standard_layout() {
        let layout = make_scrabble_board_layout().unwrap();
        assert_eq!(layout.dim(), matrix::Dim { rows: 15, cols: 15 });
        assert_eq!(layout.starting_position(), Some(Position::new(7, 7)));
        assert_eq!(
            layout.multiplier_at(Position::new(0, 0)),
            Some(Multiplier::Word(3))
        );
        assert_eq!(
            layout.multiplier_at(Position::new(3, 0)),
            Some(Multiplier::Tile(2))
        );
        assert_eq!(
            layout.multiplier_at(Position::new(5, 1)),
            Some(Multiplier::Tile(3))
        );
        assert_eq!(
            layout.multiplier_at(Position::new(7, 7)),
            Some(Multiplier::Word(2))
        );
        assert_eq!(layout.multiplier_at(Position::new(1, 0)), None);
        assert_eq!(layout.multiplier_at(Position::new(15, 0)), None);
        let count = layout
            .dim()
            .positions()
            .filter(|&p| layout.multiplier_at(p).is_some())
            .count();
        assert_eq!(count, 61);
    }

    #[test]
    fn multiplier_values() {
        assert_eq!(Multiplier::Word(3).word_multiplier(), 3);
        assert_eq!(Multiplier::Word(3).tile_multiplier(), 1);
        assert_eq!(Multiplier::Tile(2).tile_multiplier(), 2);
        assert_eq!(multiplier_from_char('C').unwrap(), Some(Multiplier::Tile(4)));
        assert_eq!(multiplier_from_char(' ').unwrap(), None);
        assert!(multiplier_from_char('a').is_err());
    }

    #[test]
    fn word_multipliers_start_at_two() {
        assert_eq!(multiplier_from_char('2').unwrap(), Some(Multiplier::Word(2)));
        assert!(multiplier_from_char('0').is_err());
        assert!(multiplier_from_char('1').is_err());
        assert!(BoardLayout::from_str("2 \n 0").is_err());
    }

    #[test]
    fn bad_layouts_fail_fast() {
        assert!(BoardLayout::from_str("2  \n  3A").is_err());
        assert!(
            BoardLayout::empty(matrix::Dim { rows: 2, cols: 2 })
                .with_starting_position(Position::new(2, 0))
                .is_err()
        );
        assert_eq!(dim_from_str("").unwrap(), matrix::Dim::default());
    }
}
