/// Exact and real magnitudes.
///
/// Defines `Number`, which keeps integers and integer ratios exact through
/// addition, subtraction, multiplication, division and integer powers, and
/// falls back to `f64` as soon as a real is involved.
pub mod number;
/// Formatting of values for display.
///
/// Chooses a unit name and SI prefix by cost minimisation, applies display
/// casts and renders magnitudes in decimal, scientific or fraction form.
pub mod format;

pub mod core;
