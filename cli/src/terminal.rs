pub mod colors;
pub mod logging;
pub mod print;
pub mod prompt;
pub mod screen;
pub mod spinner;
pub mod table;
