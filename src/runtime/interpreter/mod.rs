use crate::{
    lang::{source_buffer::SourceLocation, tokenizing::Token},
    runtime::{
        data_structures::{
            dictionary::{Dictionary, Word, WordInfo},
            stack::Stack,
            value::Value,
        },
        error,
        output::Output,
    },
};
use std::fmt::{self, Display, Formatter};

pub mod control_flow;
pub mod forth_interpreter;

/// A call stack item is a record of an executing compiled word's name and the location it was
/// invoked from.  These items are read-only and the fields are accessed by member functions.
#[derive(Clone, Debug)]
pub struct CallItem {
    location: SourceLocation,
    word: String,
}

impl CallItem {
    pub fn new(word: String, location: SourceLocation) -> CallItem {
        CallItem { location, word }
    }

    pub fn word(&self) -> &String {
        &self.word
    }
}

/// Make sure that this item can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.word)
    }
}

/// Type to represent a call stack.  This is the stack of compiled words currently being executed,
/// used to give the user a trace when something fails deep inside a definition.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = Stack<Value>;

/// The return stack holds loop re-entry positions within the token sequence being executed.
pub type ReturnStack = Stack<usize>;

/// How `if` and `else` find the token they jump to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BranchResolution {
    /// Jump to the first matching `else` or `then` found later in the token sequence, ignoring
    /// any nesting.  Only one level of `if` per word body behaves correctly in this mode.
    #[default]
    FirstOccurrence,

    /// Count nested `if` ... `then` pairs while searching so inner blocks are skipped over.
    Nested,
}

/// How many compiled words may be executing inside each other before the unit is aborted.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Behaviour switches for an interpreter instance.
#[derive(Clone, Debug)]
pub struct InterpreterConfig {
    pub branch_resolution: BranchResolution,

    /// Compiled word calls nest on the host stack, so runaway recursion has to be cut off here.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            branch_resolution: BranchResolution::default(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Trait for managing the interpreter's stacks.  Intended to be called by native words.
pub trait InterpreterStack {
    /// Use to examine the full data stack when required, for example by `.s`.
    fn stack(&self) -> &ValueStack;

    fn return_stack(&self) -> &ReturnStack;

    fn push(&mut self, value: Value);

    /// Pop a value from the data stack.  If the stack is empty a stack underflow error is
    /// returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Read the top of the data stack without removing it.  Fails the same way as pop.
    fn peek(&self) -> error::Result<Value>;

    /// Fail with a stack underflow unless at least `count` values are on the data stack.  Words
    /// call this before touching the stack so a failure never leaves it half consumed.
    fn require_depth(&self, count: usize) -> error::Result<()>;

    /// Empty the data stack.
    fn clear_stack(&mut self);

    /// Record a loop re-entry position.
    fn push_return(&mut self, position: usize);

    fn pop_return(&mut self) -> error::Result<usize>;

    fn peek_return(&self) -> error::Result<usize>;
}

/// Trait for running token sequences through the interpreter.
pub trait CodeManagement {
    /// Run one top-level input unit.  The text is tokenized and then either bound as a new word or
    /// executed.  On failure the data stack is rolled back to where it was before the unit
    /// started, the error is reported to the output, and returned.
    ///
    /// The path parameter is used to represent the source in error reporting.  For example, the
    /// repl uses a path of "\<repl\>".
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>;

    /// Execute a token sequence from its first token, sharing the interpreter's stacks.  The name
    /// identifies the sequence in traces and logs.  Errors are propagated without any rollback,
    /// that is left to the top-level unit.
    fn execute_tokens(&mut self, name: &str, tokens: &[Token]) -> error::Result<()>;
}

/// Definition of a word handler function.  This is the function that is called when a native word
/// is executed.  Can be a lambda, a callable object or a Rust function.
pub type WordHandler = dyn Fn(&mut dyn Interpreter) -> error::Result<()>;

/// Simplify registering a native word with the interpreter.
///
/// Required parameters are, the interpreter instance to register with.  The name of the word to
/// register.  The word function handler to execute for the word.  A simple description of the word.
/// As well as the word's stack signature.
#[macro_export]
macro_rules! add_native_word {
    (
        $interpreter:expr ,
        $name:expr ,
        $function:expr ,
        $description:expr ,
        $signature:expr
    ) => {{
        use std::rc::Rc;
        use $crate::{
            lang::source_buffer::SourceLocation, runtime::data_structures::dictionary::Word,
        };

        // Register the word while recording where in the Rust source it was registered from.
        $interpreter.add_word(
            SourceLocation::new_from_info(file!(), line!() as usize, column!() as usize),
            $name.to_string(),
            Word::Native(Rc::new($function)),
            $description.to_string(),
            $signature.to_string(),
        );
    }};
}

/// Trait for managing and executing words known to the interpreter.
pub trait WordManagement {
    /// If currently set, the location of the token being executed.
    fn current_location(&self) -> &Option<SourceLocation>;

    /// Add a new word to the dictionary, replacing any word of the same name.
    fn add_word(
        &mut self,
        location: SourceLocation,
        name: String,
        word: Word,
        description: String,
        signature: String,
    );

    fn find_word(&self, word: &str) -> Option<&WordInfo>;

    /// The current word dictionary of words known to the interpreter.
    fn dictionary(&self) -> &Dictionary;

    /// Execute a word, native or compiled.  The location is where the word was invoked from.
    fn execute_word(&mut self, location: &SourceLocation, word: &WordInfo) -> error::Result<()>;

    /// Find and execute a word by name.  If the word is not found an undefined word error is
    /// returned.
    fn execute_word_named(&mut self, location: &SourceLocation, word: &str) -> error::Result<()>;

    fn call_stack(&self) -> &CallStack;

    fn call_stack_push(&mut self, name: String, location: SourceLocation);

    fn call_stack_pop(&mut self) -> error::Result<()>;
}

/// Core interpreter trait.
///
/// Brings together stack management, word management and code execution, along with the
/// interpreter's configuration and its output collaborator.
pub trait Interpreter: InterpreterStack + CodeManagement + WordManagement {
    fn config(&self) -> &InterpreterConfig;

    /// Send text to the output collaborator.
    fn emit(&mut self, text: &str) -> error::Result<()>;

    /// Replace the output collaborator.
    fn set_output(&mut self, output: Box<dyn Output>);
}
