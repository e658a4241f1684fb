/// Module for tracking where in the original input text a token was found.
pub mod source_buffer;

/// Module for turning a raw input unit into a list of tokens for further processing.
pub mod tokenizing;

/// Module for the word compiler.  Decides whether an input unit is a definition, captures the
/// body of a new word and binds it into the dictionary.  Otherwise the unit is handed to the
/// interpreter for immediate execution.
pub mod compilation;
