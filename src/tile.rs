// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, error};
use std::collections::HashMap;

// Tiles are values. Two tiles with the same kind, letter and points are the
// same tile for rack and bag bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Letter { letter: u8, points: i16 },
    // letter is only set once the blank has been played.
    Blank { letter: Option<u8> },
}

impl Tile {
    #[inline(always)]
    pub fn letter(&self) -> Option<u8> {
        match *self {
            Tile::Letter { letter, .. } => Some(letter),
            Tile::Blank { letter } => letter,
        }
    }

    #[inline(always)]
    pub fn points(&self) -> i16 {
        match *self {
            Tile::Letter { points, .. } => points,
            Tile::Blank { .. } => 0,
        }
    }

    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        matches!(self, Tile::Blank { .. })
    }

    pub const BLANK: Tile = Tile::Blank { letter: None };

    // Uppercase for letter tiles, lowercase for played blanks, '*' for unplayed blanks.
    pub fn label(&self) -> char {
        match *self {
            Tile::Letter { letter, .. } => letter as char,
            Tile::Blank { letter: Some(letter) } => letter.to_ascii_lowercase() as char,
            Tile::Blank { letter: None } => alphabet::BLANK_LABEL,
        }
    }

    // Parses one fixture character.
    pub fn from_label(c: char, letter_values: &HashMap<u8, i16>) -> error::Returns<Tile> {
        if c == alphabet::BLANK_LABEL {
            return Ok(Tile::BLANK);
        }
        if !c.is_ascii_alphabetic() {
            return_error!(format!("invalid tile {:?}", c));
        }
        let letter = c.to_ascii_uppercase() as u8;
        if c.is_ascii_uppercase() {
            Ok(Tile::Letter {
                letter,
                points: letter_values.get(&letter).copied().unwrap_or(0),
            })
        } else {
            Ok(Tile::Blank {
                letter: Some(letter),
            })
        }
    }
}

pub fn tiles_from_str(s: &str, letter_values: &HashMap<u8, i16>) -> error::Returns<Vec<Tile>> {
    s.chars()
        .map(|c| Tile::from_label(c, letter_values))
        .collect()
}

pub fn fmt_tiles(tiles: &[Tile]) -> String {
    tiles.iter().map(Tile::label).collect()
}

// A tile being put on the board. The position is the key it is stored under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placing {
    Letter { letter: u8, points: i16 },
    Blank { letter: u8 },
}

impl Placing {
    // None for an unplayed blank, which has no letter to play as.
    pub fn from_tile(tile: Tile) -> Option<Placing> {
        match tile {
            Tile::Letter { letter, points } => Some(Placing::Letter { letter, points }),
            Tile::Blank {
                letter: Some(letter),
            } => Some(Placing::Blank { letter }),
            Tile::Blank { letter: None } => None,
        }
    }

    #[inline(always)]
    pub fn letter(&self) -> u8 {
        match *self {
            Placing::Letter { letter, .. } | Placing::Blank { letter } => letter,
        }
    }

    #[inline(always)]
    pub fn points(&self) -> i16 {
        match *self {
            Placing::Letter { points, .. } => points,
            Placing::Blank { .. } => 0,
        }
    }

    // The tile taken out of the rack.
    #[inline(always)]
    pub fn rack_tile(&self) -> Tile {
        match *self {
            Placing::Letter { letter, points } => Tile::Letter { letter, points },
            Placing::Blank { .. } => Tile::BLANK,
        }
    }

    // The tile left on the board.
    #[inline(always)]
    pub fn board_tile(&self) -> Tile {
        match *self {
            Placing::Letter { letter, points } => Tile::Letter { letter, points },
            Placing::Blank { letter } => Tile::Blank {
                letter: Some(letter),
            },
        }
    }
}

// Multiset of tiles, kept sorted by tile so iteration is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RackTally(Vec<(Tile, u8)>);

impl RackTally {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_tiles<'a, II: IntoIterator<Item = &'a Tile>>(tiles: II) -> Self {
        let mut tally = Self::new();
        for &tile in tiles {
            tally.put(tile);
        }
        tally
    }

    #[inline(always)]
    pub fn count(&self, tile: &Tile) -> u8 {
        match self.0.binary_search_by(|(t, _)| t.cmp(tile)) {
            Ok(i) => self.0[i].1,
            Err(_) => 0,
        }
    }

    pub fn put(&mut self, tile: Tile) {
        match self.0.binary_search_by(|(t, _)| t.cmp(&tile)) {
            Ok(i) => self.0[i].1 += 1,
            Err(i) => self.0.insert(i, (tile, 1)),
        }
    }

    // Returns false (and changes nothing) if the tile is not there.
    pub fn take(&mut self, tile: &Tile) -> bool {
        match self.0.binary_search_by(|(t, _)| t.cmp(tile)) {
            Ok(i) if self.0[i].1 > 0 => {
                self.0[i].1 -= 1;
                true
            }
            _ => false,
        }
    }

    // Multiset containment.
    pub fn contains_all(&self, other: &RackTally) -> bool {
        other
            .0
            .iter()
            .all(|(tile, count)| self.count(tile) >= *count)
    }

    pub fn len(&self) -> usize {
        self.0.iter().map(|&(_, count)| count as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Distinct tiles still available, with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.0.iter().copied().filter(|&(_, count)| count > 0)
    }

    #[inline(always)]
    pub(crate) fn slots(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub(crate) fn slot(&self, i: usize) -> (Tile, u8) {
        self.0[i]
    }

    #[inline(always)]
    pub(crate) fn slot_mut(&mut self, i: usize) -> &mut u8 {
        &mut self.0[i].1
    }
}

// Removes tiles one unit at a time, failing if any is missing.
pub fn use_tiles<'a, II: IntoIterator<Item = &'a Tile>>(
    rack: &mut Vec<Tile>,
    tiles_iter: II,
) -> error::Returns<()> {
    for tile in tiles_iter {
        let pos = rack.iter().rposition(|t| t == tile).ok_or("bad tile")?;
        rack.swap_remove(pos);
    }
    Ok(())
}

pub fn points_of(tiles: &[Tile]) -> i32 {
    tiles.iter().map(|t| t.points() as i32).sum()
}
