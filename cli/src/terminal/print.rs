use colored::*;
use geoscan_common::log::PRINT_TARGET;
use tracing::info;

use crate::terminal::colors;

/// Width of banners, section rules and centred lines.
pub const TOTAL_WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

/// Plain text in the default text color. Values that already carry a color keep it.
pub fn plain(value: impl Into<ColoredString>) -> ColoredString {
    let value: ColoredString = value.into();
    match value.fgcolor {
        Some(_) => value,
        None => value.color(colors::TEXT_DEFAULT),
    }
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }
    let title = format!("⟦ GEOSCAN v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&rule(&title.bright_green().bold().to_string(), "═"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let label = format!("⟦ {} ⟧", msg.to_uppercase()).bright_green();
    print(&rule(&label.to_string(), "─"));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string());
}

/// Centres `label` on a line of `fill`, `TOTAL_WIDTH` columns wide.
fn rule(label: &str, fill: &str) -> String {
    let (left, right) = fill_around(console::measure_text_width(label));
    format!(
        "{}{}{}",
        fill.repeat(left).color(colors::SEPARATOR),
        label,
        fill.repeat(right).color(colors::SEPARATOR)
    )
}

/// Columns to the left and right of something `used` columns wide.
fn fill_around(used: usize) -> (usize, usize) {
    let free = TOTAL_WIDTH.saturating_sub(used);
    (free / 2, free - free / 2)
}

/// Dotted key padded so that every colon in a group lines up.
fn dotted_key(key: &str, width: usize) -> String {
    format!("{key}{}", ".".repeat((width + 1).saturating_sub(key.len())))
}

/// Prints `> Key....: value` lines with the colons aligned.
pub fn key_values(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        let dotted = dotted_key(key, width);
        let (name, dots) = dotted.split_at(key.len());
        print_status(format!(
            "{}{}{} {}",
            name.color(colors::PRIMARY),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    print(&format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT)));
}

/// Prints the scan summary as a one-level tree.
pub fn summary_tree(rows: &[(&str, ColoredString)]) {
    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (i, (key, value)) in rows.iter().enumerate() {
        let branch = if i + 1 == rows.len() { "└─" } else { "├─" };
        let dotted = dotted_key(key, width);
        let (name, dots) = dotted.split_at(key.len());
        print(&format!(
            " {} {}{}{} {}",
            branch.color(colors::SEPARATOR),
            name.color(colors::TEXT_DEFAULT),
            dots.color(colors::SEPARATOR),
            ":".color(colors::SEPARATOR),
            value
        ));
    }
}

pub fn centerln(msg: &str) {
    let (left, _) = fill_around(console::measure_text_width(msg));
    print(&format!("{}{}", " ".repeat(left), msg));
}

const NO_OPEN_PORTS: &str = r#"
           ___  ____  _____ _   _   ____   ___  ____ _____ ____
          / _ \|  _ \| ____| \ | | |  _ \ / _ \|  _ \_   _/ ___|
         | | | | |_) |  _| |  \| | | |_) | | | | |_) || | \___ \
         | |_| |  __/| |___| |\  | |  __/| |_| |  _ < | |  ___) |
          \___/|_|   |_____|_| \_| |_|    \___/|_| \_\|_| |____/
                     _   _  ___  _   _ _____
                    | \ | |/ _ \| \ | | ____|
                    |  \| | | | |  \| |  _|
                    | |\  | |_| | |\  | |___
                    |_| \_|\___/|_| \_|_____|
"#;

pub fn no_results() {
    print(&NO_OPEN_PORTS.red().bold().to_string());
}

pub fn end_of_program() {
    fat_separator();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
