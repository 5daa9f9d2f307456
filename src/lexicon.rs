// Copyright (C) 2020-2024 Andy Kurnia.

use super::{alphabet, error};
use std::collections::{HashMap, HashSet};

// Letters seen immediately before and after one substring, across all words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffixBits {
    pub before: alphabet::LetterSet,
    pub after: alphabet::LetterSet,
}

impl AffixBits {
    #[inline(always)]
    fn record(&mut self, before: Option<u8>, after: Option<u8>) {
        if let Some(c) = before {
            self.before.insert(c);
        }
        if let Some(c) = after {
            self.after.insert(c);
        }
    }
}

// Word set plus affix tables over every substring of every word.
// Immutable once built, so it can be shared freely between threads.
pub struct Lexicon {
    words: HashSet<Box<[u8]>>,
    affixes: HashMap<Box<[u8]>, AffixBits>,
}

impl Lexicon {
    pub fn new<II: IntoIterator<Item = S>, S: AsRef<str>>(words: II) -> error::Returns<Self> {
        let mut lexicon = Self {
            words: HashSet::new(),
            affixes: HashMap::new(),
        };
        for word in words {
            let word = word.as_ref().as_bytes();
            if word.is_empty() || !word.iter().all(|&c| alphabet::is_letter(c)) {
                return_error!(format!(
                    "invalid word {:?}, only A-Z is allowed",
                    String::from_utf8_lossy(word)
                ));
            }
            if lexicon.words.insert(word.into()) {
                lexicon.add_substrings(word);
            }
        }
        log::debug!(
            "lexicon: {} words, {} substrings",
            lexicon.words.len(),
            lexicon.affixes.len()
        );
        Ok(lexicon)
    }

    fn add_substrings(&mut self, word: &[u8]) {
        let len = word.len();
        for i in 0..len {
            for j in i + 1..=len {
                let substring = &word[i..j];
                let before = if i > 0 { Some(word[i - 1]) } else { None };
                let after = if j < len { Some(word[j]) } else { None };
                match self.affixes.get_mut(substring) {
                    Some(bits) => bits.record(before, after),
                    None => {
                        let mut bits = AffixBits::default();
                        bits.record(before, after);
                        self.affixes.insert(substring.into(), bits);
                    }
                }
            }
        }
    }

    // One word per line, first column. Lowercase is accepted and uppercased.
    pub fn from_reader<R: std::io::Read>(r: R) -> error::Returns<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(r);
        let mut words = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            match record.get(0) {
                Some(word) if !word.is_empty() => words.push(word.to_ascii_uppercase()),
                _ => {}
            }
        }
        Self::new(words)
    }

    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> error::Returns<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| error::new(format!("cannot open {}: {}", path.display(), e)))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    #[inline(always)]
    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }

    pub fn contains_str(&self, word: &str) -> bool {
        self.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &[u8]> {
        self.words.iter().map(|w| &w[..])
    }

    // Whether s occurs inside some word.
    #[inline(always)]
    pub fn is_infix(&self, s: &[u8]) -> bool {
        s.is_empty() || self.affixes.contains_key(s)
    }

    // Letters c such that c followed by s occurs inside some word.
    #[inline(always)]
    pub fn prefixes_after(&self, s: &[u8]) -> alphabet::LetterSet {
        if s.is_empty() {
            return alphabet::LetterSet::ALL;
        }
        self.affixes
            .get(s)
            .map_or(alphabet::LetterSet::EMPTY, |bits| bits.before)
    }

    // Letters c such that s followed by c occurs inside some word.
    #[inline(always)]
    pub fn suffixes_after(&self, s: &[u8]) -> alphabet::LetterSet {
        if s.is_empty() {
            return alphabet::LetterSet::ALL;
        }
        self.affixes
            .get(s)
            .map_or(alphabet::LetterSet::EMPTY, |bits| bits.after)
    }

    // Letters c such that before + c + after is a word. With nothing on
    // either side any letter fits.
    pub fn letters_between(&self, before: &[u8], after: &[u8]) -> alphabet::LetterSet {
        if before.is_empty() && after.is_empty() {
            return alphabet::LetterSet::ALL;
        }
        let candidates = self
            .suffixes_after(before)
            .intersect(self.prefixes_after(after));
        let mut buf = Vec::with_capacity(before.len() + 1 + after.len());
        candidates
            .iter()
            .filter(|&c| {
                buf.clear();
                buf.extend_from_slice(before);
                buf.push(c);
                buf.extend_from_slice(after);
                self.contains(&buf)
            })
            .collect()
    }
}

impl PartialEq for Lexicon {
    // The affix tables are derived from the words.
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for Lexicon {}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Lexicon({} words)", self.words.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphabet::LetterSet;

    fn set(s: &str) -> LetterSet {
        s.bytes().collect()
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(["CAT", "CATS", "SCAT", "AT"]).unwrap()
    }

    #[test]
    fn membership_is_whole_words() {
        let lex = lexicon();
        assert!(lex.contains_str("CAT"));
        assert!(!lex.contains_str("CA"));
        assert_eq!(lex.len(), 4);
        assert!(lex.is_infix(b"CA"));
        assert!(lex.is_infix(b"ATS"));
        assert!(!lex.is_infix(b"TA"));
    }

    #[test]
    fn affix_queries() {
        let lex = lexicon();
        assert_eq!(lex.prefixes_after(b"AT"), set("C"));
        assert_eq!(lex.prefixes_after(b"CAT"), set("S"));
        assert_eq!(lex.suffixes_after(b"CAT"), set("S"));
        assert_eq!(lex.suffixes_after(b"AT"), set("S"));
        assert_eq!(lex.suffixes_after(b"S"), set("C"));
        assert_eq!(lex.prefixes_after(b"S"), set("T"));
        assert_eq!(lex.suffixes_after(b"CATS"), LetterSet::EMPTY);
        assert_eq!(lex.prefixes_after(b"QQ"), LetterSet::EMPTY);
    }

    #[test]
    fn empty_string_allows_everything() {
        let lex = lexicon();
        assert_eq!(lex.prefixes_after(b""), LetterSet::ALL);
        assert_eq!(lex.suffixes_after(b""), LetterSet::ALL);
        assert_eq!(lex.letters_between(b"", b""), LetterSet::ALL);
    }

    #[test]
    fn letters_between_needs_real_words() {
        let lex = lexicon();
        assert_eq!(lex.letters_between(b"CA", b""), set("T"));
        assert_eq!(lex.letters_between(b"", b"AT"), set("C"));
        assert_eq!(lex.letters_between(b"C", b"TS"), set("A"));
        // SCA is inside SCAT but not a word.
        assert_eq!(lex.letters_between(b"SC", b""), LetterSet::EMPTY);
    }

    #[test]
    fn rejects_bad_words() {
        assert!(Lexicon::new(["CAT", "c-t"]).is_err());
        assert!(Lexicon::new([""]).is_err());
    }

    #[test]
    fn reads_word_lists() {
        let lex = Lexicon::from_reader(&b"cat\n  dog \n\nAT\n"[..]).unwrap();
        assert_eq!(lex.len(), 3);
        assert!(lex.contains_str("DOG"));
        assert_eq!(lex, Lexicon::new(["AT", "DOG", "CAT"]).unwrap());
    }
}
