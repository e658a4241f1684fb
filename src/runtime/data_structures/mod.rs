/// The Value type and its boolean conventions.
pub mod value;

/// LIFO stack used for both the data stack and the return stack.
pub mod stack;

/// The dictionary module provides the word dictionary used by the interpreter.
pub mod dictionary;
