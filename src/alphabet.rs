// Copyright (C) 2020-2024 Andy Kurnia.

// Letters are plain ASCII bytes b'A'..=b'Z' everywhere in this crate.

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

// The fixture character for a blank that has not been given a letter yet.
pub const BLANK_LABEL: char = '*';

#[inline(always)]
pub fn is_letter(c: u8) -> bool {
    c.is_ascii_uppercase()
}

#[inline(always)]
pub fn letter_index(letter: u8) -> u32 {
    (letter - b'A') as u32
}

// A set of letters, one bit per letter.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(pub u32);

impl LetterSet {
    pub const EMPTY: LetterSet = LetterSet(0);
    pub const ALL: LetterSet = LetterSet((1 << 26) - 1);

    #[inline(always)]
    pub fn contains(&self, letter: u8) -> bool {
        is_letter(letter) && self.0 & (1 << letter_index(letter)) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, letter: u8) {
        self.0 |= 1 << letter_index(letter);
    }

    #[inline(always)]
    pub fn intersect(self, other: LetterSet) -> LetterSet {
        LetterSet(self.0 & other.0)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = u8> {
        ALPHABET.iter().copied().filter(move |&c| self.contains(c))
    }
}

impl std::fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for c in self.iter() {
            write!(f, "{}", c as char)?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = LetterSet::EMPTY;
        for c in iter {
            set.insert(c);
        }
        set
    }
}

pub struct LetterInfo {
    pub label: u8,
    pub freq: u8,
    pub score: i16,
}

pub struct Alphabet<'a> {
    letters: &'a [LetterInfo],
    num_blanks: u8,
}

impl Alphabet<'_> {
    #[inline(always)]
    pub fn score(&self, letter: u8) -> i16 {
        self.info(letter).map_or(0, |x| x.score)
    }

    #[inline(always)]
    pub fn freq(&self, letter: u8) -> u8 {
        self.info(letter).map_or(0, |x| x.freq)
    }

    #[inline(always)]
    pub fn num_blanks(&self) -> u8 {
        self.num_blanks
    }

    pub fn num_tiles(&self) -> u16 {
        self.letters.iter().map(|x| x.freq as u16).sum::<u16>() + self.num_blanks as u16
    }

    #[inline(always)]
    fn info(&self, letter: u8) -> Option<&LetterInfo> {
        if is_letter(letter) {
            self.letters.get(letter_index(letter) as usize)
        } else {
            None
        }
    }

    // letter -> points, as the fixture parsers take it.
    pub fn letter_values(&self) -> std::collections::HashMap<u8, i16> {
        self.letters.iter().map(|x| (x.label, x.score)).collect()
    }
}

macro_rules! letter {
    ($label:expr, $freq:expr, $score:expr) => {
        LetterInfo {
            label: $label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet {
    letters: &[
        letter!(b'A', 9, 1),
        letter!(b'B', 2, 3),
        letter!(b'C', 2, 3),
        letter!(b'D', 4, 2),
        letter!(b'E', 12, 1),
        letter!(b'F', 2, 4),
        letter!(b'G', 3, 2),
        letter!(b'H', 2, 4),
        letter!(b'I', 9, 1),
        letter!(b'J', 1, 8),
        letter!(b'K', 1, 5),
        letter!(b'L', 4, 1),
        letter!(b'M', 2, 3),
        letter!(b'N', 6, 1),
        letter!(b'O', 8, 1),
        letter!(b'P', 2, 3),
        letter!(b'Q', 1, 10),
        letter!(b'R', 6, 1),
        letter!(b'S', 4, 1),
        letter!(b'T', 6, 1),
        letter!(b'U', 4, 1),
        letter!(b'V', 2, 4),
        letter!(b'W', 2, 4),
        letter!(b'X', 1, 8),
        letter!(b'Y', 2, 4),
        letter!(b'Z', 1, 10),
    ],
    num_blanks: 2,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_has_one_hundred_tiles() {
        assert_eq!(ENGLISH_ALPHABET.num_tiles(), 100);
        assert_eq!(ENGLISH_ALPHABET.score(b'Q'), 10);
        assert_eq!(ENGLISH_ALPHABET.freq(b'E'), 12);
        assert_eq!(ENGLISH_ALPHABET.score(b'?'), 0);
    }

    #[test]
    fn letter_set_ops() {
        let set = b"CAB".iter().copied().collect::<LetterSet>();
        assert!(set.contains(b'A'));
        assert!(!set.contains(b'D'));
        assert!(!set.contains(b'a'));
        assert_eq!(set.iter().collect::<Vec<_>>(), b"ABC");
        assert_eq!(LetterSet::ALL.len(), 26);
        assert!(set.intersect(LetterSet::EMPTY).is_empty());
        assert_eq!(format!("{:?}", set), "{ABC}");
    }
}
