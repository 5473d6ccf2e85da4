// src/codes.rs
// Character to Morse code tables

use crate::error::{Error, Result};
use crate::symbol::{MorseSymbol, encode};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Maps uppercase characters to their Morse codes.
///
/// Keys are uppercased on insertion so lookups are case-insensitive. The table
/// itself does not check that codes are well formed; [`crate::Tokenizer::new`]
/// rejects tables with empty codes or gap symbols other than the word gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: HashMap<char, Vec<MorseSymbol>>,
}

impl CodeTable {
    pub fn empty() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }

    /// Builds a table from `(character, code)` pairs written with `.`, `-` and `/`.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (char, S)>,
        S: AsRef<str>,
    {
        let mut table = Self::empty();
        let mut invalid = Vec::new();
        let mut bad_keys = Vec::new();

        for (key, code) in pairs {
            let code = code.as_ref();
            match parse_code(code) {
                Some(symbols) => {
                    if table.insert(key, symbols).is_err() {
                        bad_keys.push(key);
                    }
                }
                None => invalid.push((key, code.to_string())),
            }
        }

        if !bad_keys.is_empty() {
            return Err(multi_char_keys(&bad_keys));
        }
        if invalid.is_empty() {
            Ok(table)
        } else {
            invalid.sort();
            Err(Error::InvalidCodeTable { entries: invalid })
        }
    }

    /// Parses a JSON object such as `{"A": ".-", " ": "/"}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut pairs = Vec::with_capacity(raw.len());
        let mut bad_keys = Vec::new();

        for (key, code) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => pairs.push((c, code)),
                _ => bad_keys.push(key),
            }
        }

        if !bad_keys.is_empty() {
            return Err(Error::parameter(
                "code table",
                format!("keys must be single characters, got {:?}", bad_keys),
            ));
        }

        Self::from_pairs(pairs)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading code table from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Fails for keys whose uppercase form is more than one character (`ß` -> `SS`).
    pub fn insert(&mut self, key: char, code: Vec<MorseSymbol>) -> Result<()> {
        let upper = uppercase_key(key).ok_or_else(|| multi_char_keys(&[key]))?;
        self.codes.insert(upper, code);
        Ok(())
    }

    pub fn get(&self, key: char) -> Option<&[MorseSymbol]> {
        self.codes.get(&key).map(Vec::as_slice)
    }

    pub fn contains(&self, key: char) -> bool {
        self.codes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &[MorseSymbol])> {
        self.codes.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    /// Entries whose code is empty or contains anything besides dit, dah and word gap.
    pub fn invalid_entries(&self) -> Vec<(char, String)> {
        let mut invalid: Vec<(char, String)> = self
            .iter()
            .filter(|(_, code)| !is_valid_code(code))
            .map(|(key, code)| (key, encode(code)))
            .collect();
        invalid.sort();
        invalid
    }
}

impl Default for CodeTable {
    /// Letters, digits, common punctuation, and space as the word gap.
    fn default() -> Self {
        let mut table = Self::empty();
        for (key, code) in DEFAULT_CODES {
            // The literals below only use `.`, `-` and `/`.
            let symbols = code.chars().filter_map(MorseSymbol::from_char).collect();
            if let Some(upper) = uppercase_key(*key) {
                table.codes.insert(upper, symbols);
            }
        }
        table
    }
}

fn uppercase_key(key: char) -> Option<char> {
    let mut upper = key.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn multi_char_keys(keys: &[char]) -> Error {
    Error::parameter(
        "code table",
        format!("keys must uppercase to a single character, got {:?}", keys),
    )
}

fn parse_code(code: &str) -> Option<Vec<MorseSymbol>> {
    code.chars().map(MorseSymbol::from_char).collect()
}

fn is_valid_code(code: &[MorseSymbol]) -> bool {
    !code.is_empty()
        && code.iter().all(|s| {
            matches!(
                s,
                MorseSymbol::Dit | MorseSymbol::Dah | MorseSymbol::InterWord
            )
        })
}

const DEFAULT_CODES: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
    (' ', "/"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = CodeTable::default();
        assert_eq!(table.len(), DEFAULT_CODES.len());
        assert!(table.invalid_entries().is_empty());
        assert_eq!(table.get('A'), Some(&[MorseSymbol::Dit, MorseSymbol::Dah][..]));
        assert_eq!(table.get(' '), Some(&[MorseSymbol::InterWord][..]));
        assert!(table.get('a').is_none());
    }

    #[test]
    fn test_keys_are_uppercased() {
        let table = CodeTable::from_pairs([('q', "--.-")]).unwrap();
        assert!(table.contains('Q'));
        assert!(!table.contains('q'));
    }

    #[test]
    fn test_keys_with_multi_char_uppercase_rejected() {
        let err = CodeTable::from_json_str(r#"{"S": "...", "ß": "-"}"#).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains('ß'));

        let err = CodeTable::from_pairs([('S', "..."), ('ŉ', "-")]).unwrap_err();
        assert!(err.is_configuration());

        let mut table = CodeTable::from_pairs([('S', "...")]).unwrap();
        assert!(table.insert('ß', vec![MorseSymbol::Dah]).is_err());
        assert_eq!(table.get('S'), Some(&[MorseSymbol::Dit; 3][..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unparseable_glyphs_rejected() {
        let err = CodeTable::from_pairs([('A', ".-"), ('B', "-..*"), ('C', "dah")]).unwrap_err();
        match err {
            Error::InvalidCodeTable { entries } => {
                assert_eq!(entries, vec![('B', "-..*".to_string()), ('C', "dah".to_string())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_entries_detected() {
        let table = CodeTable::from_pairs([('A', ".-"), ('B', ""), ('C', "-^.")]).unwrap();
        assert_eq!(
            table.invalid_entries(),
            vec![('B', String::new()), ('C', "-^.".to_string())]
        );
    }

    #[test]
    fn test_json_table() {
        let table = CodeTable::from_json_str(r#"{"a": ".-", "b": "-...", " ": "/"}"#).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.contains('A'));
        assert!(table.contains(' '));

        let err = CodeTable::from_json_str(r#"{"AB": ".-"}"#).unwrap_err();
        assert!(err.is_configuration());

        assert!(matches!(
            CodeTable::from_json_str("not json"),
            Err(Error::Json(_))
        ));
    }
}
