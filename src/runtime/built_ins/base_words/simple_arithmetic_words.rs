use crate::{
    add_native_word,
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, script_error},
        interpreter::Interpreter,
    },
};

/// Helper for the two operand words.  For `a b op` the second from the top is the left operand and
/// the top is the right operand.  The depth is checked first so a failing word leaves the stack
/// untouched.
pub(super) fn math_op(
    interpreter: &mut dyn Interpreter,
    iop: fn(Value, Value) -> Value,
) -> error::Result<()> {
    interpreter.require_depth(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(iop(a, b));
    Ok(())
}

/// Truncating division, refusing a zero divisor before anything is popped.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require_depth(2)?;

    if interpreter.peek()? == 0 {
        script_error(interpreter, ErrorKind::DivisionByZero)?;
    }

    math_op(interpreter, |a, b| a.wrapping_div(b))
}

pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) {
    add_native_word!(
        interpreter,
        "+",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| a.wrapping_add(b)),
        "Add the top two values.",
        "a b -- a+b"
    );

    add_native_word!(
        interpreter,
        "-",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| a.wrapping_sub(b)),
        "Subtract the top value from the one below it.",
        "a b -- a-b"
    );

    add_native_word!(
        interpreter,
        "*",
        |interp: &mut dyn Interpreter| math_op(interp, |a, b| a.wrapping_mul(b)),
        "Multiply the top two values.",
        "a b -- a*b"
    );

    add_native_word!(
        interpreter,
        "/",
        word_divide,
        "Divide the second value by the top value, truncating.",
        "a b -- a/b"
    );
}
