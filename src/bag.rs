// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, tile};
use rand::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct Bag(pub Vec<tile::Tile>);

impl Bag {
    pub fn new<II: IntoIterator<Item = tile::Tile>>(tiles: II) -> Bag {
        Bag(tiles.into_iter().collect())
    }

    pub fn from_alphabet(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for &letter in alphabet::ALPHABET {
            for _ in 0..alphabet.freq(letter) {
                bag.push(tile::Tile::Letter {
                    letter,
                    points: alphabet.score(letter),
                });
            }
        }
        for _ in 0..alphabet.num_blanks() {
            bag.push(tile::Tile::BLANK);
        }
        Bag(bag)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    pub fn pop(&mut self) -> Option<tile::Tile> {
        self.0.pop()
    }

    // Shuffles, then moves up to amount tiles into the rack. Returns how many moved.
    pub fn draw_into(
        &mut self,
        rng: &mut dyn RngCore,
        rack: &mut Vec<tile::Tile>,
        amount: usize,
    ) -> usize {
        let amount = std::cmp::min(amount, self.0.len());
        if amount > 0 {
            self.shuffle(rng);
            rack.extend(self.0.drain(self.0.len() - amount..));
        }
        amount
    }

    // Tops the rack up to rack_size.
    pub fn replenish(&mut self, rng: &mut dyn RngCore, rack: &mut Vec<tile::Tile>, rack_size: usize) {
        let missing = rack_size.saturating_sub(rack.len());
        self.draw_into(rng, rack, missing);
    }

    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[tile::Tile]) {
        self.0.extend_from_slice(tiles);
        self.shuffle(rng);
    }

    pub fn tally(&self) -> tile::RackTally {
        tile::RackTally::from_tiles(&self.0)
    }
}

// Draw order is not part of the bag's value.
impl PartialEq for Bag {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.tally() == other.tally()
    }
}

impl Eq for Bag {}

pub fn make_scrabble_tiles() -> Bag {
    Bag::from_alphabet(&alphabet::ENGLISH_ALPHABET)
}
