use crate::{
    add_native_word,
    runtime::{
        error,
        interpreter::{Interpreter, control_flow::control_words},
    },
};

/// Pop the top value and print it.
///
/// Signature: `value -- `
fn word_print(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.emit(&format!("{}\n", value))
}

/// Print the whole data stack, bottom to top, without changing it.
///
/// Signature: ` -- `
fn word_print_stack(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let text = format!(
        "stack: [{}] ({})\n",
        interpreter.stack(),
        interpreter.stack().len()
    );

    interpreter.emit(&text)
}

/// Print every word in the dictionary followed by the control words.  Neither the stack nor the
/// dictionary is touched.
///
/// Signature: ` -- `
fn word_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let mut text = interpreter.dictionary().to_string();
    let keywords = control_words();
    let width = keywords.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    text.push_str("\nControl words, only meaningful inside a token sequence:\n\n");

    for (name, info) in keywords {
        text.push_str(&format!(
            "{:width$}  ( {} )  --  {}\n",
            name,
            info.signature.trim(),
            info.description,
            width = width
        ));
    }

    interpreter.emit(&text)
}

/// Register the words that print things.
pub fn register_io_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ".",
        word_print,
        "Pop the top value and print it.",
        "value -- "
    );

    add_native_word!(
        interpreter,
        ".s",
        word_print_stack,
        "Print the data stack without changing it.",
        " -- "
    );

    add_native_word!(
        interpreter,
        "words",
        word_words,
        "List every defined word and control word.",
        " -- "
    );
}
