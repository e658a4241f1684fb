use crate::{
    add_native_word,
    runtime::{data_structures::value::ToValue, interpreter::Interpreter},
};

use super::simple_arithmetic_words::math_op;

/// Register the relational words.  Each one consumes two values and pushes 1 for true or 0 for
/// false, comparing the second from the top against the top.
pub fn register_comparison_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        ">",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| (a > b).to_value()),
        "Is the second value greater than the top value?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "<",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| (a < b).to_value()),
        "Is the second value less than the top value?",
        "a b -- flag"
    );

    add_native_word!(
        interpreter,
        "=",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| (a == b).to_value()),
        "Are the top two values equal?",
        "a b -- flag"
    );
}
