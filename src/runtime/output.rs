use std::{
    cell::RefCell,
    io::{self, Write, stdout},
    rc::Rc,
};

/// The output collaborator.  Receives everything the interpreter prints: values from `.`, stack
/// dumps, the dictionary listing and error reports.
pub trait Output {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Writes straight to the process's standard output.
#[derive(Default)]
pub struct ConsoleOutput;

impl Output for ConsoleOutput {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = stdout().lock();

        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

/// Collects output in memory.  Clones share the same buffer, so a caller can hand one clone to the
/// interpreter and read the text back through another.
#[derive(Clone, Default)]
pub struct CapturedOutput {
    buffer: Rc<RefCell<String>>,
}

impl CapturedOutput {
    pub fn new() -> CapturedOutput {
        CapturedOutput::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }
}

impl Output for CapturedOutput {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.buffer.borrow_mut().push_str(text);
        Ok(())
    }
}
