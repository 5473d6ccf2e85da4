// src/message.rs
// A message bound to its tokens and readable Morse rendering

use crate::error::{Error, Result};
use crate::symbol::TokenString;
use crate::tokenizer::{Tokenizer, purify};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    actual: String,
    tokens: TokenString,
    readable: String,
}

impl Message {
    /// Tokenizes `text` and renders it; whitespace-only input is [`Error::EmptyInput`].
    pub fn from_text(text: &str, tokenizer: &Tokenizer) -> Result<Self> {
        let actual = text.trim();
        if actual.is_empty() {
            return Err(Error::EmptyInput);
        }

        let tokens = tokenizer.tokenize(actual);
        let readable = purify(&tokens);
        Ok(Self {
            actual: actual.to_string(),
            tokens,
            readable,
        })
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn tokens(&self) -> &TokenString {
        &self.tokens
    }

    /// Dots, dashes and spaces, e.g. `... --- ...`.
    pub fn readable(&self) -> &str {
        &self.readable
    }

    pub fn unknown_characters(&self) -> &BTreeSet<char> {
        self.tokens.unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::CodeTable;

    #[test]
    fn test_fields_are_consistent() {
        let tokenizer = Tokenizer::new(CodeTable::default()).unwrap();
        let message = Message::from_text("  sos\n", &tokenizer).unwrap();
        assert_eq!(message.actual(), "sos");
        assert_eq!(message.tokens().source(), "sos");
        assert_eq!(message.readable(), "... --- ...");
        assert!(message.unknown_characters().is_empty());
    }

    #[test]
    fn test_unknown_characters_reported() {
        let tokenizer = Tokenizer::new(CodeTable::default()).unwrap();
        let message = Message::from_text("hi ñ ü", &tokenizer).unwrap();
        assert_eq!(
            message.unknown_characters().iter().copied().collect::<Vec<_>>(),
            vec!['Ñ', 'Ü']
        );
        assert!(!message.readable().contains('X'));
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new(CodeTable::default()).unwrap();
        assert!(matches!(Message::from_text("", &tokenizer), Err(Error::EmptyInput)));
        assert!(matches!(Message::from_text(" \t\n ", &tokenizer), Err(Error::EmptyInput)));
    }
}
