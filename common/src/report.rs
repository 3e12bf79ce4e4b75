pub mod grepable;
