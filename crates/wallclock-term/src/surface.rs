use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use wallclock_proto::ports::surface::{SurfaceError, TextSurfacePort};

/// Displays the clock on the current terminal line, replacing the previous
/// value in place.
#[derive(Debug)]
pub struct TerminalSurface {
    stdout: Stdout,
}

impl TerminalSurface {
    pub fn new() -> Result<Self, SurfaceError> {
        let mut stdout = io::stdout();

        queue!(stdout, cursor::Hide).map_err(|err| SurfaceError::io("hide_cursor", err))?;
        stdout
            .flush()
            .map_err(|err| SurfaceError::io("hide_cursor", err))?;

        Ok(Self { stdout })
    }
}

impl TextSurfacePort for TerminalSurface {
    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        queue!(
            self.stdout,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(text)
        )
        .map_err(|err| SurfaceError::io("set_text", err))?;

        self.stdout
            .flush()
            .map_err(|err| SurfaceError::io("set_text", err))
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        // Leave the last rendered value on its own line and restore the cursor.
        let _ = execute!(self.stdout, cursor::Show, Print("\n"));
    }
}
