use crate::{
    lang::source_buffer::{SourceBuffer, SourceLocation},
    runtime::data_structures::value::Value,
};
use std::fmt::{self, Debug, Display, Formatter};

/// A token is a single whitespace-delimited unit of an input unit.  It is either an integer literal
/// or a word name.  Control keywords such as `if` and `begin` are words at this level, they are
/// only given meaning by the interpreter.
///
/// The token also holds the location in the original input where it was found.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// An integer literal, already converted.
    Number(SourceLocation, Value),

    /// A word to be looked up in the dictionary, or a control keyword.
    Word(SourceLocation, String),
}

/// A list of tokens found in an input unit.  Compiled words keep their body as one of these.
pub type TokenList = Vec<Token>;

/// Print the token the way it was written.
impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(_, num) => write!(f, "{}", num),
            Token::Word(_, word) => write!(f, "{}", word),
        }
    }
}

/// Include the original location for debugging purposes.
impl Debug for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::Number(location, num) => write!(f, "{}: {} i", location, num),
            Token::Word(location, word) => write!(f, "{}: {}", location, word),
        }
    }
}

impl Token {
    /// Get the token's location in the original source text.
    pub fn location(&self) -> &SourceLocation {
        match self {
            Token::Number(location, _) => location,
            Token::Word(location, _) => location,
        }
    }

    /// The word text, if this token is a word.
    pub fn word(&self) -> Option<&String> {
        match self {
            Token::Word(_, word) => Some(word),
            Token::Number(_, _) => None,
        }
    }

    /// Is this token the given word?
    pub fn is_word_named(&self, name: &str) -> bool {
        matches!(self, Token::Word(_, word) if word == name)
    }
}

/// Check if the given character is considered whitespace.
fn is_whitespace(next: &char) -> bool {
    next.is_whitespace()
}

/// Skip over whitespace in the text.  Stopping only at either the end of the buffer or the next
/// non-whitespace character.
fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Pull text out of the buffer until we hit a whitespace character.  Words can contain any
/// character except whitespace.
fn process_until_whitespace(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            break;
        }

        let _ = buffer.next_char();
        text.push(next);
    }

    (location, text)
}

/// Does it look like we're dealing with an integer literal?  An optional sign, then groups of
/// digits.  A single `_` may separate two groups, so `1_000` is a number but `1_`, `_1` and `1__0`
/// are words.
fn is_number(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);

    digits
        .split('_')
        .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()))
}

/// Attempt to convert the text into an integer literal.  Literals that do not fit a Value are not
/// numbers, they fall back to being words.
fn to_numeric(text: &str) -> Option<Value> {
    text.replace('_', "").parse::<Value>().ok()
}

/// Tokenize an input unit.  The path is only used to tag token locations for error reporting.
pub fn tokenize_from_source(path: &str, source: &str) -> TokenList {
    let mut buffer = SourceBuffer::new(path, source);
    let mut token_list = TokenList::new();

    while let Some(next) = buffer.peek_next() {
        if is_whitespace(&next) {
            skip_whitespace(&mut buffer);
            continue;
        }

        let (location, text) = process_until_whitespace(&mut buffer);

        let next_token = match to_numeric(&text) {
            Some(number) if is_number(&text) => Token::Number(location, number),
            _ => Token::Word(location, text),
        };

        token_list.push(next_token);
    }

    token_list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &TokenList) -> Vec<String> {
        tokens.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn splits_on_any_whitespace() {
        let tokens = tokenize_from_source("<test>", "  1 2\t+\n  dup\r\n.s ");
        assert_eq!(texts(&tokens), vec!["1", "2", "+", "dup", ".s"]);
    }

    #[test]
    fn classifies_numbers_and_words() {
        let tokens = tokenize_from_source(
            "<test>",
            "42 -7 +3 1_000 - + 1+ 2x _1 99999999999999999999 1_ 1__0 -_1 12_34_5",
        );

        assert!(matches!(tokens[0], Token::Number(_, 42)));
        assert!(matches!(tokens[1], Token::Number(_, -7)));
        assert!(matches!(tokens[2], Token::Number(_, 3)));
        assert!(matches!(tokens[3], Token::Number(_, 1000)));
        assert!(tokens[4].is_word_named("-"));
        assert!(tokens[5].is_word_named("+"));
        assert!(tokens[6].is_word_named("1+"));
        assert!(tokens[7].is_word_named("2x"));
        assert!(tokens[8].is_word_named("_1"));
        assert!(matches!(tokens[9], Token::Word(_, _)));
        assert!(tokens[10].is_word_named("1_"));
        assert!(tokens[11].is_word_named("1__0"));
        assert!(tokens[12].is_word_named("-_1"));
        assert!(matches!(tokens[13], Token::Number(_, 12345)));
    }

    #[test]
    fn records_token_locations() {
        let tokens = tokenize_from_source("<test>", "1 2\n  swap");

        assert_eq!(tokens[0].location(), &SourceLocation::new_from_info("<test>", 1, 1));
        assert_eq!(tokens[1].location(), &SourceLocation::new_from_info("<test>", 1, 3));
        assert_eq!(tokens[2].location(), &SourceLocation::new_from_info("<test>", 2, 3));
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize_from_source("<test>", "   \n\t ").is_empty());
    }
}
