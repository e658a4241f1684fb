use std::rc::Rc;
use tracing::debug;
use crate::{ lang::tokenizing::{ Token,
                                 TokenList },
             runtime::{ data_structures::dictionary::Word,
                        error::{ self,
                                 ErrorKind,
                                 ScriptError },
                        interpreter::{ control_flow::is_control_word,
                                       forth_interpreter::IMMEDIATE_NAME,
                                       Interpreter } } };



/// The word that starts a new definition when it opens an input unit.
pub const DEFINITION_START: &str = ":";

/// The word that ends the body of a definition.
pub const DEFINITION_END: &str = ";";



/// Does this input unit define a new word?  Only the very first token decides.
pub fn is_definition(tokens: &[Token]) -> bool
{
    tokens.first().is_some_and(|token| token.is_word_named(DEFINITION_START))
}


fn invalid_definition<T>(token: &Token, reason: String) -> error::Result<T>
{
    ScriptError::new_as_result(Some(token.location().clone()),
                               ErrorKind::InvalidDefinition(reason),
                               None)
}


/// Bind the definition at the start of `tokens` into the interpreter's dictionary.
///
/// The token after `:` names the word and everything up to the first `;` is captured verbatim as
/// its body.  Nothing in the body is checked here, unknown words and broken control flow only show
/// up when the word is run.  A missing `;` captures the rest of the unit.
///
/// Returns the index of the first token after the definition.
pub fn compile_definition(tokens: &[Token], interpreter: &mut dyn Interpreter)
    -> error::Result<usize>
{
    let Some(start) = tokens.first() else
        {
            return ScriptError::new_as_result(None,
                                              ErrorKind::InvalidDefinition("empty input".to_string()),
                                              None);
        };

    let Some(name_token) = tokens.get(1) else
        {
            return invalid_definition(start, "no name follows ':'".to_string());
        };

    let name =
        match name_token
        {
            Token::Number(_, number) =>
                {
                    return invalid_definition(name_token,
                                              format!("the number {} can not be a word name",
                                                      number));
                },

            Token::Word(_, name) if name == DEFINITION_END =>
                {
                    return invalid_definition(name_token, "no name follows ':'".to_string());
                },

            Token::Word(_, name) if is_control_word(name) =>
                {
                    return invalid_definition(name_token,
                                              format!("'{}' is a control word and can not be \
                                                       redefined",
                                                      name));
                },

            Token::Word(_, name) => name.clone()
        };

    let end = tokens.iter()
                    .skip(2)
                    .position(|token| token.is_word_named(DEFINITION_END))
                    .map(|offset| offset + 2)
                    .unwrap_or(tokens.len());

    let body: TokenList = tokens[2..end].to_vec();
    let description = std::iter::once(DEFINITION_START.to_string())
                          .chain(std::iter::once(name.clone()))
                          .chain(body.iter().map(|token| token.to_string()))
                          .chain(std::iter::once(DEFINITION_END.to_string()))
                          .collect::<Vec<String>>()
                          .join(" ");

    debug!(word = %name, tokens = body.len(), "defining word");

    interpreter.add_word(name_token.location().clone(),
                         name.clone(),
                         Word::Compiled(Rc::new(body)),
                         description,
                         String::new());

    // Skip over the terminator, if there was one.
    Ok((end + 1).min(tokens.len()))
}


/// Handle one tokenized input unit.  A definition is bound first, then any tokens that follow its
/// `;` run in immediate mode.  Anything else runs in immediate mode as a whole.
pub fn process_source_from_tokens(tokens: TokenList, interpreter: &mut dyn Interpreter)
    -> error::Result<()>
{
    if is_definition(&tokens)
    {
        let rest = compile_definition(&tokens, interpreter)?;

        interpreter.execute_tokens(IMMEDIATE_NAME, &tokens[rest..])
    }
    else
    {
        interpreter.execute_tokens(IMMEDIATE_NAME, &tokens)
    }
}
