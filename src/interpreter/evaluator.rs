/// Core evaluation logic and context management.
///
/// Contains the session context, feature switches, the dispatch over
/// expression variants and the resolution of variables and output
/// references.
pub mod core;

/// Evaluation of operator chains.
///
/// Folds resolved operands of sums and products and keeps the rest
/// symbolic.
pub mod chain;

/// Evaluation of power towers.
pub mod power;

/// Evaluation of negation.
pub mod unary;
