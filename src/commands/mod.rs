/// One-shot commands that print to stdout instead of entering the
/// terminal UI.
pub mod news;
pub mod quote;
pub mod weather;
