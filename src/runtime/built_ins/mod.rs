/// The core words of the language.
pub mod base_words;

/// Words that print values, the stack and the dictionary.
pub mod io_words;

use crate::runtime::{
    built_ins::{base_words::register_base_words, io_words::register_io_words},
    interpreter::Interpreter,
};

/// Register every native word the interpreter starts with.
pub fn register_all_words(interpreter: &mut dyn Interpreter) {
    register_base_words(interpreter);
    register_io_words(interpreter);
}
