// src/tokenizer.rs
// Text to Morse symbol conversion and its human-readable projection

use crate::codes::CodeTable;
use crate::error::{Error, Result};
use crate::symbol::{MorseSymbol, TokenString};
use std::collections::BTreeSet;

// --- Normalization Rules ---
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Insert the second symbol right after every occurrence of the first.
    InsertAfter(MorseSymbol, MorseSymbol),
    /// Drop the first symbol wherever the second immediately follows it.
    CollapseInto(MorseSymbol, MorseSymbol),
}

impl Rule {
    fn apply(self, symbols: Vec<MorseSymbol>) -> Vec<MorseSymbol> {
        let mut out = Vec::with_capacity(symbols.len() * 2);
        match self {
            Rule::InsertAfter(target, inserted) => {
                for symbol in symbols {
                    out.push(symbol);
                    if symbol == target {
                        out.push(inserted);
                    }
                }
            }
            Rule::CollapseInto(first, second) => {
                let mut iter = symbols.into_iter().peekable();
                while let Some(symbol) = iter.next() {
                    if symbol == first && iter.peek() == Some(&second) {
                        continue;
                    }
                    out.push(symbol);
                }
            }
        }
        out
    }
}

const RULES: [Rule; 3] = [
    Rule::InsertAfter(MorseSymbol::Dit, MorseSymbol::IntraCharacter),
    Rule::InsertAfter(MorseSymbol::Dah, MorseSymbol::IntraCharacter),
    Rule::CollapseInto(MorseSymbol::IntraCharacter, MorseSymbol::InterCharacter),
];

// --- Tokenizer ---
pub struct Tokenizer {
    table: CodeTable,
}

impl Tokenizer {
    /// Fails if any code is empty or uses symbols other than dit, dah and word gap.
    pub fn new(table: CodeTable) -> Result<Self> {
        let invalid = table.invalid_entries();
        if !invalid.is_empty() {
            log::error!("Invalid morse codes provided: {:?}", invalid);
            return Err(Error::InvalidCodeTable { entries: invalid });
        }

        log::debug!("Tokenizer initialized with {} codes", table.len());
        log::debug!("Tokenizer rules: {:?}", RULES);
        Ok(Self { table })
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn tokenize(&self, text: &str) -> TokenString {
        let source = text.trim();
        let upper = source.to_uppercase();
        let mut symbols = Vec::with_capacity(upper.len() * 5);
        let mut unknown = BTreeSet::new();

        for c in upper.chars() {
            match self.table.get(c) {
                Some(code) => symbols.extend_from_slice(code),
                None => {
                    unknown.insert(c);
                    symbols.push(MorseSymbol::Unknown);
                }
            }
            symbols.push(MorseSymbol::InterCharacter);
        }

        for rule in RULES {
            symbols = rule.apply(symbols);
        }

        let tokens = TokenString::new(symbols, source, unknown, MorseSymbol::ALL.into_iter().collect());
        log::debug!("tokenize({:?}) -> {}", text, tokens);

        if !tokens.unknown().is_empty() {
            log::warn!("Unknown characters found: {:?}", tokens.unknown());
        }

        tokens
    }
}

// --- Purifier ---
/// Renders a token string as readable Morse: dots and dashes, one space between
/// characters, `/` for word gaps. Unknown characters leave no trace.
pub fn purify(tokens: &TokenString) -> String {
    let mut out = String::with_capacity(tokens.len());
    for symbol in tokens.symbols() {
        match symbol {
            MorseSymbol::Dit | MorseSymbol::Dah | MorseSymbol::InterWord => out.push(symbol.as_char()),
            MorseSymbol::InterCharacter => out.push(' '),
            MorseSymbol::IntraCharacter | MorseSymbol::Unknown => {}
        }
    }
    // Every character ends with a gap; drop the one after the last.
    out.truncate(out.trim_end_matches(' ').len());
    out
}
