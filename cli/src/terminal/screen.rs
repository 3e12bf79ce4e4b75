use std::io::{self, IsTerminal};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use geoscan_common::config::Config;

/// Clears the terminal between interactive steps.
///
/// Does nothing when disabled or when stdout is not a terminal.
pub fn clear(cfg: &Config) {
    if cfg.no_clear || !io::stdout().is_terminal() {
        return;
    }
    let _ = execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0));
}
