/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between big integers,
/// floating-point values and the small machine integers used for exponents,
/// without risking silent truncation. Every helper returns the caller's
/// error when the conversion would lose information.
pub mod num;
/// Unicode superscript helpers.
///
/// Unit powers are written either with a caret (`m^2`) or with superscript
/// digits (`m²`). This module renders integer powers as superscripts and
/// splits a unit term into its name and power text.
pub mod superscript;
