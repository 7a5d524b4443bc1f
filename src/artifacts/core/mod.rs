//! Terminal output
//!
//! - `render`: human-readable rendering of typed records
//!
//! Long listings go through the `minus` pager when stdout is a terminal.

pub mod render;

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Destination of one command's output
pub enum Output {
    Direct(io::Stdout),
    /// Buffered in the pager until [`Output::finish`]
    Paged(Pager),
}

impl Output {
    /// Page when asked to and stdout is an interactive terminal
    pub fn open(paged: bool) -> Self {
        let stdout = io::stdout();
        if paged && stdout.is_terminal() {
            Output::Paged(Pager::new())
        } else {
            Output::Direct(stdout)
        }
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        self
    }

    /// Show the pager, or flush stdout
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            Output::Direct(mut stdout) => stdout.flush()?,
            Output::Paged(pager) => minus::page_all(pager)?,
        }
        Ok(())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Direct(stdout) => stdout.write(buf),
            Output::Paged(pager) => {
                pager
                    .push_str(String::from_utf8_lossy(buf))
                    .map_err(io::Error::other)?;
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Direct(stdout) => stdout.flush(),
            Output::Paged(_) => Ok(()),
        }
    }
}
