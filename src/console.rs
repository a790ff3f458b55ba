/// Sessions: line handling, commands and scripts.
///
/// A [`Session`](session::Session) owns the context and turns each input
/// line into the text to print. It is the only place that appends results
/// and binds variables.
pub mod session;
/// Constant sets available to `!load`.
pub mod constants;
/// Help texts for `!help`.
pub mod help;

/// Name shown in the banner.
pub const APPLICATION: &str = "ρhysCalc";

/// The first line printed by the REPL.
#[must_use]
pub fn banner() -> String {
    format!("{APPLICATION} REPL {}", env!("CARGO_PKG_VERSION"))
}
