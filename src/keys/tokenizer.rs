//! logos-based shortcut spec tokenizer.
//!
//! A spec such as `cmd+shift+o` lexes into words and symbols joined by
//! [`Token::Plus`]. Whitespace around the separators is skipped.

use logos::Logos;

/// Shortcut token produced by the lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `+` separator between chord parts.
    #[token("+")]
    Plus,

    /// Modifier name, named key, function key or single alphanumeric key.
    #[regex(r"[a-zA-Z0-9]+")]
    Word,

    /// Single punctuation key: `,`, `/`, `=`, `[`, ...
    #[regex(r"[^ \t\n\r\fa-zA-Z0-9+]")]
    Symbol,
}

/// Tokenize a shortcut spec into `(Token, text)` pairs.
///
/// Characters that fail to lex are reported as `Err` with their byte offset.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, usize> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn words_and_separators() {
        assert_eq!(
            kinds("cmd+shift+o"),
            vec![Token::Word, Token::Plus, Token::Word, Token::Plus, Token::Word]
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        let tokens = tokenize(" ctrl + f5 ").unwrap();
        assert_eq!(tokens, vec![(Token::Word, "ctrl"), (Token::Plus, "+"), (Token::Word, "f5")]);
    }

    #[test]
    fn punctuation_is_a_symbol() {
        let tokens = tokenize("cmd+,").unwrap();
        assert_eq!(tokens[2], (Token::Symbol, ","));
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn digits_lex_as_words() {
        assert_eq!(tokenize("alt+1").unwrap()[2], (Token::Word, "1"));
    }
}
