use crate::{
    lang::tokenizing::Token,
    runtime::interpreter::BranchResolution,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// The words that steer the interpreter's cursor.  They are never dictionary entries, the
/// interpreter recognizes them by name while walking a token sequence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ControlWord {
    Begin,
    Again,
    Until,
    If,
    Else,
    Then,
}

/// Help text for a control word, shown by `words`.
pub struct KeywordInfo {
    pub word: ControlWord,
    pub description: &'static str,
    pub signature: &'static str,
}

/// Listing order for the control words.
const KEYWORD_ORDER: [&str; 6] = ["begin", "again", "until", "if", "else", "then"];

lazy_static! {
    static ref CONTROL_WORDS: HashMap<&'static str, KeywordInfo> = {
        let mut table = HashMap::new();

        table.insert("begin", KeywordInfo {
            word: ControlWord::Begin,
            description: "Mark the start of a loop.",
            signature: " -- ",
        });
        table.insert("again", KeywordInfo {
            word: ControlWord::Again,
            description: "Jump back to the matching begin, forever.",
            signature: " -- ",
        });
        table.insert("until", KeywordInfo {
            word: ControlWord::Until,
            description: "Jump back to the matching begin while the flag is false.",
            signature: "flag -- ",
        });
        table.insert("if", KeywordInfo {
            word: ControlWord::If,
            description: "Run the following code only if the flag is true.",
            signature: "flag -- ",
        });
        table.insert("else", KeywordInfo {
            word: ControlWord::Else,
            description: "Start the code run when the if flag was false.",
            signature: " -- ",
        });
        table.insert("then", KeywordInfo {
            word: ControlWord::Then,
            description: "End an if block.",
            signature: " -- ",
        });

        table
    };
}

impl ControlWord {
    /// Recognize a control word by its exact name.
    pub fn from_name(name: &str) -> Option<ControlWord> {
        CONTROL_WORDS.get(name).map(|info| info.word)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlWord::Begin => "begin",
            ControlWord::Again => "again",
            ControlWord::Until => "until",
            ControlWord::If => "if",
            ControlWord::Else => "else",
            ControlWord::Then => "then",
        }
    }
}

pub fn is_control_word(name: &str) -> bool {
    CONTROL_WORDS.contains_key(name)
}

/// All control words with their help text, in listing order.
pub fn control_words() -> Vec<(&'static str, &'static KeywordInfo)> {
    KEYWORD_ORDER
        .iter()
        .filter_map(|name| CONTROL_WORDS.get(name).map(|info| (*name, info)))
        .collect()
}

/// Find the first token after `from` that is the given word.
fn find_first(tokens: &[Token], from: usize, name: &str) -> Option<usize> {
    tokens
        .iter()
        .enumerate()
        .skip(from + 1)
        .find(|(_, token)| token.is_word_named(name))
        .map(|(index, _)| index)
}

/// Scan forward from `from` for one of the target words at the same `if` nesting level.
fn find_nested(tokens: &[Token], from: usize, targets: &[ControlWord]) -> Option<usize> {
    let mut depth = 0usize;

    for (index, token) in tokens.iter().enumerate().skip(from + 1) {
        let Some(control) = token.word().and_then(|word| ControlWord::from_name(word)) else {
            continue;
        };

        match control {
            ControlWord::If => depth += 1,
            ControlWord::Then if depth > 0 => depth -= 1,
            _ if depth == 0 && targets.contains(&control) => return Some(index),
            _ => (),
        }
    }

    None
}

/// Where a false `if` at `from` jumps to.  Returns the index of the `else` or `then` token, the
/// cursor continues one past it.
///
/// In first occurrence mode any later `else` wins over a closer `then`, which is what makes nested
/// or consecutive `if` blocks in one body misbehave.
pub fn find_if_target(tokens: &[Token], from: usize, mode: BranchResolution) -> Option<usize> {
    match mode {
        BranchResolution::FirstOccurrence => find_first(tokens, from, ControlWord::Else.name())
            .or_else(|| find_first(tokens, from, ControlWord::Then.name())),

        BranchResolution::Nested => {
            find_nested(tokens, from, &[ControlWord::Else, ControlWord::Then])
        }
    }
}

/// Where an `else` at `from`, reached by finishing the true branch, jumps to.  Returns the index of
/// the `then` token.
pub fn find_else_target(tokens: &[Token], from: usize, mode: BranchResolution) -> Option<usize> {
    match mode {
        BranchResolution::FirstOccurrence => find_first(tokens, from, ControlWord::Then.name()),
        BranchResolution::Nested => find_nested(tokens, from, &[ControlWord::Then]),
    }
}
