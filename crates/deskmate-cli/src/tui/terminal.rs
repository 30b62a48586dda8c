use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io::{self, Stdout};
use std::panic;

/// Terminal wrapper. Owns raw mode and the alternate screen when it was
/// built with `new`, and gives both back on drop or panic.
pub struct Tui<B: Backend = CrosstermBackend<Stdout>> {
    terminal: Terminal<B>,
    owns_screen: bool,
}

impl Tui {
    /// Switch the real terminal into raw mode on the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        install_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            owns_screen: true,
        })
    }
}

impl<B: Backend> Tui<B> {
    /// Wrap a backend without touching the real terminal
    pub fn with_backend(backend: B) -> Result<Self> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            owns_screen: false,
        })
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Drop for Tui<B> {
    fn drop(&mut self) {
        if !self.owns_screen {
            return;
        }
        if let Err(e) = restore() {
            tracing::error!(error = %e, "failed to restore terminal");
            eprintln!("Failed to restore terminal: {}", e);
        }
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Leave raw mode before the default hook prints, so a panic message is
/// readable and the shell is usable afterwards.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        default_hook(info);
    }));
}
