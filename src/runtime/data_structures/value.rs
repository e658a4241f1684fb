/// The single data type understood by the interpreter.  A signed integer of the host's native
/// width.  Booleans are encoded as values, zero is false and anything else is true.
pub type Value = i64;

/// The canonical true value pushed by the relational words.
pub const FORTH_TRUE: Value = 1;

/// The only false value.
pub const FORTH_FALSE: Value = 0;

/// Convert an arbitrary data type to a Value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Booleans convert to the canonical true and false values.
impl ToValue for bool {
    fn to_value(&self) -> Value {
        if *self { FORTH_TRUE } else { FORTH_FALSE }
    }
}

/// Interpret a value as a flag.
pub fn is_truthy(value: Value) -> bool {
    value != FORTH_FALSE
}
