use std::{ error::Error,
           fmt::{ self, Debug, Display, Formatter } };
use crate::{ runtime::interpreter::CallStack,
             lang::source_buffer::SourceLocation };

use super::interpreter::Interpreter;



pub type Result<T> = std::result::Result<T, ScriptError>;



/// Which of the interpreter's stacks ran dry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StackName
{
    Data,
    Return,

    /// The stack of compiled words being executed.
    Call
}


/// The kinds of failure an execution unit can run into.  All of them abort the current unit and
/// roll the data stack back, none of them end the session.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind
{
    /// A pop or peek found too few items on a stack.
    StackUnderflow(StackName),

    /// The right operand of `/` was zero.
    DivisionByZero,

    /// The token was neither a number, a control keyword, nor a known word.
    UndefinedWord(String),

    /// A `:` definition was malformed, the text describes how.
    InvalidDefinition(String),

    /// A branch keyword found no target to jump to in the rest of the token sequence.
    UnresolvedBranch { keyword: String, expected: String },

    /// Compiled words nested deeper than the configured limit, usually runaway recursion.
    CallDepthExceeded(usize),

    /// Reading input or writing output failed.
    Io(String)
}


impl Display for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match self
        {
            ErrorKind::StackUnderflow(StackName::Data)   => write!(f, "Stack underflow."),
            ErrorKind::StackUnderflow(StackName::Return) => write!(f, "Return stack underflow."),
            ErrorKind::StackUnderflow(StackName::Call)   => write!(f, "Call stack underflow."),
            ErrorKind::DivisionByZero                    => write!(f, "Division by zero."),
            ErrorKind::UndefinedWord(word)               =>
                write!(f, "The word '{}' is not defined!", word),
            ErrorKind::InvalidDefinition(reason)         =>
                write!(f, "Invalid definition, {}.", reason),
            ErrorKind::UnresolvedBranch { keyword, expected } =>
                write!(f, "No '{}' found to complete '{}'.", expected, keyword),
            ErrorKind::CallDepthExceeded(limit)          =>
                write!(f, "Maximum call depth of {} exceeded.", limit),
            ErrorKind::Io(message)                       => write!(f, "I/O error: {}", message)
        }
    }
}



/// Any error that occurs during the execution of an input unit.
#[derive(Clone)]
pub struct ScriptError
{
    /// The location of the token that failed, if available.
    location: Option<SourceLocation>,

    kind: ErrorKind,

    /// The compiled words that were executing at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
}


/// Pretty print the ScriptError so the user can see where things went wrong.
impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match &self.location
        {
            Some(location) => write!(f, "{}: {}", location, self.kind)?,
            None => write!(f, "{}", self.kind)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    pub fn new(location: Option<SourceLocation>,
               kind: ErrorKind,
               call_stack: Option<CallStack>) -> ScriptError
    {
        ScriptError
            {
                location,
                kind,
                call_stack
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(location: Option<SourceLocation>,
                            kind: ErrorKind,
                            call_stack: Option<CallStack>) -> Result<T>
    {
        Err(ScriptError::new(location, kind, call_stack))
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(None, ErrorKind::Io(error.to_string()), None)
    }
}



/// Create a ScriptError wrapped in a Result::Err using the interpreter's current location and
/// call stack.
pub fn script_error<T>(interpreter: &dyn Interpreter, kind: ErrorKind) -> Result<T>
{
    let location = interpreter.current_location().clone();
    let call_stack = interpreter.call_stack().clone();

    ScriptError::new_as_result(location, kind, Some(call_stack))
}


/// Shorthand for the most common failure, running out of values on the data stack.
pub fn stack_underflow<T>(interpreter: &dyn Interpreter) -> Result<T>
{
    script_error(interpreter, ErrorKind::StackUnderflow(StackName::Data))
}
