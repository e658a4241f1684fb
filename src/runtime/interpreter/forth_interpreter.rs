use tracing::{ debug,
               trace,
               warn };
use crate::{ lang::{ compilation::process_source_from_tokens,
                     source_buffer::SourceLocation,
                     tokenizing::{ tokenize_from_source,
                                   Token } },
             runtime::{ data_structures::{ dictionary::{ Dictionary,
                                                         Word,
                                                         WordInfo },
                                           value::{ is_truthy,
                                                    Value } },
                        error::{ self,
                                 script_error,
                                 stack_underflow,
                                 ErrorKind,
                                 ScriptError,
                                 StackName },
                        interpreter::{ control_flow::{ find_else_target,
                                                       find_if_target,
                                                       ControlWord },
                                       CallItem,
                                       CallStack,
                                       CodeManagement,
                                       Interpreter,
                                       InterpreterConfig,
                                       InterpreterStack,
                                       ReturnStack,
                                       ValueStack,
                                       WordManagement },
                        output::{ ConsoleOutput,
                                  Output } } };



/// The name used for token sequences typed directly rather than run as part of a word.
pub const IMMEDIATE_NAME: &str = "<immediate>";



/// The core interpreter implementation.  Owns the dictionary and both stacks for the whole
/// session, they are shared by every input unit and every compiled word invocation.
pub struct ForthInterpreter
{
    config: InterpreterConfig,

    /// The data stack used by the interpreter.
    stack: ValueStack,

    /// Loop re-entry positions pushed by `begin`.
    return_stack: ReturnStack,


    /// The location of the token currently being executed.
    current_location: Option<SourceLocation>,

    /// The compiled words currently being executed.
    call_stack: CallStack,


    /// The dictionary of words known by the interpreter.
    dictionary: Dictionary,


    /// Where printed text goes.
    output: Box<dyn Output>
}


impl InterpreterStack for ForthInterpreter
{
    fn stack(&self) -> &ValueStack
    {
        &self.stack
    }

    fn return_stack(&self) -> &ReturnStack
    {
        &self.return_stack
    }

    fn push(&mut self, value: Value)
    {
        self.stack.push(value);
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        match self.stack.pop()
        {
            Some(value) => Ok(value),
            None        => stack_underflow(self)
        }
    }

    fn peek(&self) -> error::Result<Value>
    {
        match self.stack.peek()
        {
            Some(value) => Ok(*value),
            None        => stack_underflow(self)
        }
    }

    fn require_depth(&self, count: usize) -> error::Result<()>
    {
        if self.stack.len() < count
        {
            stack_underflow(self)?;
        }

        Ok(())
    }

    fn clear_stack(&mut self)
    {
        self.stack.clear();
    }

    fn push_return(&mut self, position: usize)
    {
        self.return_stack.push(position);
    }

    fn pop_return(&mut self) -> error::Result<usize>
    {
        match self.return_stack.pop()
        {
            Some(position) => Ok(position),
            None           => script_error(self, ErrorKind::StackUnderflow(StackName::Return))
        }
    }

    fn peek_return(&self) -> error::Result<usize>
    {
        match self.return_stack.peek()
        {
            Some(position) => Ok(*position),
            None           => script_error(self, ErrorKind::StackUnderflow(StackName::Return))
        }
    }
}


// Helper methods for the control flow handling.
impl ForthInterpreter
{
    /// Apply a control word found at `cursor` and return where execution continues.
    fn apply_control(&mut self,
                     control: ControlWord,
                     tokens: &[Token],
                     cursor: usize) -> error::Result<usize>
    {
        let mode = self.config.branch_resolution;

        match control
        {
            ControlWord::Begin =>
                {
                    self.push_return(cursor + 1);
                    Ok(cursor + 1)
                },

            // The loop marker stays on the return stack for the next time around.
            ControlWord::Again => self.peek_return(),

            ControlWord::Until =>
                {
                    let flag = self.pop()?;

                    if is_truthy(flag)
                    {
                        let _ = self.pop_return()?;
                        Ok(cursor + 1)
                    }
                    else
                    {
                        self.peek_return()
                    }
                },

            ControlWord::If =>
                {
                    let flag = self.pop()?;

                    if is_truthy(flag)
                    {
                        Ok(cursor + 1)
                    }
                    else
                    {
                        self.branch_past(find_if_target(tokens, cursor, mode), control, "then")
                    }
                },

            // Only reached by falling out of the true branch of an if.
            ControlWord::Else =>
                {
                    self.branch_past(find_else_target(tokens, cursor, mode), control, "then")
                },

            ControlWord::Then => Ok(cursor + 1)
        }
    }

    /// Continue one past the found target, or fail if the search came up empty.
    fn branch_past(&self,
                   target: Option<usize>,
                   control: ControlWord,
                   expected: &str) -> error::Result<usize>
    {
        match target
        {
            Some(index) => Ok(index + 1),
            None =>
                {
                    script_error(self,
                                 ErrorKind::UnresolvedBranch
                                     {
                                         keyword: control.name().to_string(),
                                         expected: expected.to_string()
                                     })
                }
        }
    }
}


impl CodeManagement for ForthInterpreter
{
    fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        let tokens = tokenize_from_source(path, source);

        debug!(path, tokens = tokens.len(), depth = self.stack.len(), "processing input unit");

        // Everything needed to put the interpreter back the way it was if the unit fails.
        let stack_snapshot = self.stack.snapshot();
        let return_depth = self.return_stack.len();

        let result = process_source_from_tokens(tokens, self);

        if let Err(error) = &result
        {
            self.stack.restore(stack_snapshot);
            self.return_stack.truncate(return_depth);
            self.call_stack.clear();

            warn!(%error, depth = self.stack.len(), "input unit aborted, data stack restored");

            // The original error is the one worth returning, even if reporting it fails.
            if let Err(report_error) = self.emit(&format!("Error: {}\n", error))
            {
                warn!(%report_error, "could not report error to the output");
            }
        }

        result
    }

    fn execute_tokens(&mut self, name: &str, tokens: &[Token]) -> error::Result<()>
    {
        let mut cursor = 0;

        while cursor < tokens.len()
        {
            let token = &tokens[cursor];

            self.current_location = Some(token.location().clone());
            trace!(word = name, cursor, token = %token, "dispatch");

            cursor =
                match token
                {
                    Token::Number(_, value) =>
                        {
                            self.push(*value);
                            cursor + 1
                        },

                    Token::Word(location, word) =>
                        {
                            match ControlWord::from_name(word)
                            {
                                Some(control) => self.apply_control(control, tokens, cursor)?,
                                None =>
                                    {
                                        self.execute_word_named(location, word)?;
                                        cursor + 1
                                    }
                            }
                        }
                };
        }

        Ok(())
    }
}


impl WordManagement for ForthInterpreter
{
    fn current_location(&self) -> &Option<SourceLocation>
    {
        &self.current_location
    }

    fn add_word(&mut self,
                location: SourceLocation,
                name: String,
                word: Word,
                description: String,
                signature: String)
    {
        let mut word_info = WordInfo::new(location, name.clone(), word);

        word_info.description = description;
        word_info.signature = signature;

        if self.dictionary.insert(name.clone(), word_info)
        {
            debug!(word = %name, "replaced existing word");
        }
    }

    fn find_word(&self, word: &str) -> Option<&WordInfo>
    {
        self.dictionary.try_get(word)
    }

    fn dictionary(&self) -> &Dictionary
    {
        &self.dictionary
    }

    fn execute_word(&mut self,
                    location: &SourceLocation,
                    word: &WordInfo) -> error::Result<()>
    {
        match &word.word
        {
            Word::Native(handler) => (**handler)(self),

            Word::Compiled(body) =>
                {
                    let limit = self.config.max_call_depth;

                    // The call stack is left out of the error, it would only list the same word
                    // over and over.
                    if self.call_stack.len() >= limit
                    {
                        return ScriptError::new_as_result(Some(location.clone()),
                                                          ErrorKind::CallDepthExceeded(limit),
                                                          None);
                    }

                    self.call_stack_push(word.name.clone(), location.clone());

                    let result = self.execute_tokens(&word.name, body);

                    self.call_stack_pop()?;
                    result
                }
        }
    }

    fn execute_word_named(&mut self,
                          location: &SourceLocation,
                          word: &str) -> error::Result<()>
    {
        // Clone the entry so the dictionary isn't borrowed while the word runs.
        match self.dictionary.try_get(word).cloned()
        {
            Some(word_info) => self.execute_word(location, &word_info),
            None            => script_error(self, ErrorKind::UndefinedWord(word.to_string()))
        }
    }

    fn call_stack(&self) -> &CallStack
    {
        &self.call_stack
    }

    fn call_stack_push(&mut self, name: String, location: SourceLocation)
    {
        self.call_stack.push(CallItem::new(name, location));
    }

    fn call_stack_pop(&mut self) -> error::Result<()>
    {
        if self.call_stack.pop().is_none()
        {
            script_error(self, ErrorKind::StackUnderflow(StackName::Call))?;
        }

        Ok(())
    }
}


impl Interpreter for ForthInterpreter
{
    fn config(&self) -> &InterpreterConfig
    {
        &self.config
    }

    fn emit(&mut self, text: &str) -> error::Result<()>
    {
        self.output.write_text(text)?;
        Ok(())
    }

    fn set_output(&mut self, output: Box<dyn Output>)
    {
        self.output = output;
    }
}


impl ForthInterpreter
{
    /// Create an interpreter with an empty dictionary, printing to the console.  Register the
    /// built in words before use.
    pub fn new() -> ForthInterpreter
    {
        ForthInterpreter::with_config(InterpreterConfig::default())
    }

    pub fn with_config(config: InterpreterConfig) -> ForthInterpreter
    {
        ForthInterpreter
            {
                config,

                stack: ValueStack::with_capacity(20),
                return_stack: ReturnStack::with_capacity(8),

                current_location: None,
                call_stack: CallStack::with_capacity(40),

                dictionary: Dictionary::new(),

                output: Box::new(ConsoleOutput)
            }
    }

    /// Run one line of input from the REPL.  Errors have already been reported to the output by
    /// the time this returns, so they are not passed on.
    pub fn process_line(&mut self, line: &str)
    {
        let _ = self.process_source("<repl>", line);
    }
}


impl Default for ForthInterpreter
{
    fn default() -> Self
    {
        Self::new()
    }
}
