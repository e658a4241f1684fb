use core::str::Chars;
use std::fmt::{ self,
                Display,
                Formatter };



/// The location in the input text where a token was found.  Used by the error reporting to point
/// the user at the offending token, both in immediate input and inside compiled word bodies.
#[derive(Clone, PartialEq, PartialOrd, Eq, Hash, Debug)]
pub struct SourceLocation
{
    /// Either the path to the file or a description of the source.  For example text entered in
    /// the REPL will have a tag of "\<repl\>".
    path: String,

    /// The 1 based line number in the source text where the token was found.
    line: usize,

    /// The 1 based column number in the source text where the token was found.
    column: usize
}


/// Used for error reporting to show where in the source text an error originated.
impl Display for SourceLocation
{
    fn fmt(&self, formatter: &mut Formatter<'_>) -> Result<(), fmt::Error>
    {
        write!(formatter, "{} ({}, {})", self.path, self.line, self.column)
    }
}


impl SourceLocation
{
    /// Create a new SourceLocation at the start of the given source.
    pub fn new_from_path(path: &str) -> Self
    {
        SourceLocation { path: path.to_owned(), line: 1, column: 1 }
    }

    /// Create a new SourceLocation with all of the needed information.  Native words use this with
    /// `file!()` and `line!()` to record where they were registered.
    pub fn new_from_info(path: &str, line: usize, column: usize) -> Self
    {
        SourceLocation { path: path.to_owned(), line, column }
    }
}



/// A forward only cursor over an input unit.  As characters are consumed the location of the
/// cursor is maintained so the tokenizer can stamp each token with where it started.
///
/// The SourceBuffer only holds a reference to the text, it is not copied.
pub struct SourceBuffer<'a>
{
    chars: Chars<'a>,

    /// The logical location of the cursor in the source text.
    location: SourceLocation,

    /// Peeked but not yet consumed character.
    current: Option<char>
}


impl<'a> SourceBuffer<'a>
{
    pub fn new(path: &str, source: &'a str) -> Self
    {
        SourceBuffer
            {
                chars: source.chars(),
                location: SourceLocation::new_from_path(path),
                current: None
            }
    }

    /// The location the cursor is at in the source text being processed.
    pub fn location(&self) -> &SourceLocation
    {
        &self.location
    }

    /// Take a peek at the next character without consuming it.
    pub fn peek_next(&mut self) -> Option<char>
    {
        match self.current
        {
            Some(_) => self.current,
            None =>
                {
                    let next = self.chars.next();

                    self.current = next;
                    next
                }
        }
    }

    /// Get and consume the next character.
    pub fn next_char(&mut self) -> Option<char>
    {
        let next = match self.current.take()
            {
                Some(current) => Some(current),
                None => self.chars.next()
            };

        if let Some(next_char) = next
        {
            self.increment_location(next_char);
        }

        next
    }

    /// Advance one column for regular characters.  Reset the column to 1 and increment the line
    /// for new line characters.
    fn increment_location(&mut self, next: char)
    {
        if next == '\n'
        {
            self.location.line += 1;
            self.location.column = 1;
        }
        else
        {
            self.location.column += 1;
        }
    }
}
