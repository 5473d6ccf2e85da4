// src/symbol.rs
// Morse symbol alphabet and the tokenized form of a message

use std::collections::BTreeSet;
use std::fmt;

/// One element of a tokenized message. Each symbol has a fixed single-character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MorseSymbol {
    Dit,
    Dah,
    IntraCharacter,
    InterCharacter,
    InterWord,
    Unknown,
}

impl MorseSymbol {
    pub const ALL: [MorseSymbol; 6] = [
        MorseSymbol::Dit,
        MorseSymbol::Dah,
        MorseSymbol::IntraCharacter,
        MorseSymbol::InterCharacter,
        MorseSymbol::InterWord,
        MorseSymbol::Unknown,
    ];

    pub fn as_char(self) -> char {
        match self {
            MorseSymbol::Dit => '.',
            MorseSymbol::Dah => '-',
            MorseSymbol::IntraCharacter => '^',
            MorseSymbol::InterCharacter => '#',
            MorseSymbol::InterWord => '/',
            MorseSymbol::Unknown => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(MorseSymbol::Dit),
            '-' => Some(MorseSymbol::Dah),
            '^' => Some(MorseSymbol::IntraCharacter),
            '#' => Some(MorseSymbol::InterCharacter),
            '/' => Some(MorseSymbol::InterWord),
            'X' => Some(MorseSymbol::Unknown),
            _ => None,
        }
    }

    /// Length of the symbol in dit units.
    pub fn units(self) -> u32 {
        match self {
            MorseSymbol::Dit | MorseSymbol::IntraCharacter => 1,
            MorseSymbol::Dah | MorseSymbol::InterCharacter | MorseSymbol::Unknown => 3,
            MorseSymbol::InterWord => 7,
        }
    }
}

impl fmt::Display for MorseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Encodes a symbol slice in its wire form, e.g. `.^-#`.
pub fn encode(symbols: &[MorseSymbol]) -> String {
    symbols.iter().map(|s| s.as_char()).collect()
}

/// The canonical symbol sequence produced for one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenString {
    symbols: Vec<MorseSymbol>,
    source: String,
    unknown: BTreeSet<char>,
    alphabet: BTreeSet<MorseSymbol>,
}

impl TokenString {
    pub fn new(
        symbols: Vec<MorseSymbol>,
        source: impl Into<String>,
        unknown: BTreeSet<char>,
        alphabet: BTreeSet<MorseSymbol>,
    ) -> Self {
        Self {
            symbols,
            source: source.into(),
            unknown,
            alphabet,
        }
    }

    pub fn symbols(&self) -> &[MorseSymbol] {
        &self.symbols
    }

    /// The trimmed input text, original casing.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Characters (uppercased) that had no entry in the code table.
    pub fn unknown(&self) -> &BTreeSet<char> {
        &self.unknown
    }

    pub fn alphabet(&self) -> &BTreeSet<MorseSymbol> {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True when every symbol belongs to the declared alphabet.
    pub fn is_valid(&self) -> bool {
        self.symbols.iter().all(|s| self.alphabet.contains(s))
    }
}

impl fmt::Display for TokenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_encoding_is_bijective() {
        for symbol in MorseSymbol::ALL {
            assert_eq!(MorseSymbol::from_char(symbol.as_char()), Some(symbol));
        }
        assert_eq!(MorseSymbol::from_char('x'), None);
        assert_eq!(MorseSymbol::from_char(' '), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(MorseSymbol::Dit.units(), 1);
        assert_eq!(MorseSymbol::Dah.units(), 3);
        assert_eq!(MorseSymbol::InterWord.units(), 7);
        assert_eq!(MorseSymbol::Unknown.units(), MorseSymbol::InterCharacter.units());
    }

    #[test]
    fn test_validity_against_alphabet() {
        let full: BTreeSet<_> = MorseSymbol::ALL.into_iter().collect();
        let tokens = TokenString::new(
            vec![MorseSymbol::Dit, MorseSymbol::InterCharacter],
            "E",
            BTreeSet::new(),
            full,
        );
        assert!(tokens.is_valid());
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.to_string(), ".#");

        let narrow: BTreeSet<_> = [MorseSymbol::Dit].into_iter().collect();
        let tokens = TokenString::new(
            vec![MorseSymbol::Dit, MorseSymbol::InterCharacter],
            "E",
            BTreeSet::new(),
            narrow,
        );
        assert!(!tokens.is_valid());
    }
}
