/// The seven SI base dimensions and exponent vectors over them.
///
/// A [`dimension::Dimension`] is the canonical, pre-cancelled form of a
/// unit's numerator and denominator: equal dimensions compare equal no
/// matter how the unit was built.
pub mod dimension;
/// The `Unit` type and its algebra: multiplication, division and rational
/// powers.
pub mod core;
/// SI prefixes, in the priority order used when reading unit names.
pub mod prefix;
/// The process-wide unit catalog.
///
/// Built once on first use from the built-in registrations. Holds the name
/// registry, the interning table keyed by dimension and multiplier, quantity
/// labels and per-unit prefix rules.
pub mod catalog;
/// Reading unit specifications such as `kg m/s^2` or `km⁻¹`.
pub mod parse;
/// Automatic naming of units that have no registered name.
pub mod naming;

pub use self::{
    core::Unit,
    dimension::{BaseDimension, Dimension},
    parse::UnitCast,
};
