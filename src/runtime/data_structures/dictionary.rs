use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::TokenList},
    runtime::interpreter::WordHandler,
};
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    rc::Rc,
};

/// What happens when a word is invoked.
#[derive(Clone)]
pub enum Word {
    /// The word is a native word written in Rust.
    Native(Rc<WordHandler>),

    /// The word was defined by the user.  Invoking it re-enters the interpreter on the captured
    /// body, sharing the caller's stacks.
    Compiled(Rc<TokenList>),
}

impl Word {
    pub fn is_native(&self) -> bool {
        matches!(self, Word::Native(_))
    }
}

/// The information stored in the dictionary for each word.
#[derive(Clone)]
pub struct WordInfo {
    /// Where the word was defined.  Rust source for native words, the input unit for compiled ones.
    pub location: SourceLocation,

    pub name: String,

    /// A simple description of the word, shown by `words`.
    pub description: String,

    /// The stack signature of the word.
    pub signature: String,

    pub word: Word,
}

impl WordInfo {
    pub fn new(location: SourceLocation, name: String, word: Word) -> WordInfo {
        WordInfo {
            location,
            name,
            description: String::new(),
            signature: String::new(),
            word,
        }
    }
}

/// The dictionary of words known by the interpreter.  Words are found by exact name, a new
/// definition replaces any prior one of the same name.  Entries are never removed.
pub struct Dictionary {
    words: HashMap<String, WordInfo>,
}

/// Pretty print the dictionary, sorted by name with the descriptions aligned.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self.words.keys().map(|name| name.len()).max().unwrap_or(0);

        writeln!(formatter, "{} words defined.\n", self.words.len())?;

        for name in self.sorted_names() {
            let word = &self.words[name];
            let kind = if word.word.is_native() { "native  " } else { "compiled" };

            writeln!(
                formatter,
                "{:width$}  {}  --  {}",
                name,
                kind,
                word.description,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    pub fn new() -> Dictionary {
        Dictionary { words: HashMap::new() }
    }

    /// Insert a word, shadowing any previous word with the same name.  Returns true if an existing
    /// word was replaced.
    pub fn insert(&mut self, name: String, info: WordInfo) -> bool {
        self.words.insert(name, info).is_some()
    }

    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.words.get(name)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn sorted_names(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.words.keys().collect();

        names.sort();
        names
    }
}
