use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use once_cell::sync::Lazy;

use crate::{
    units::{
        catalog::{UnitEntry, catalog},
        core::Unit,
        dimension::{BaseDimension, Dimension},
        prefix::ALL_SYMBOLS,
    },
    util::superscript::superscript_power,
};

static NAME_CACHE: Lazy<Mutex<HashMap<Dimension, UnitName>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// The display name chosen for an SI unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitName {
    /// The name text, e.g. `J` or `m / s`.
    pub text:            String,
    /// Power that a prefix on the name's leading factor is raised to. `km²`
    /// means `(1000 m)²`, so its exponent is 2.
    pub prefix_exponent: i32,
    /// Prefixes that may not be put in front of the name.
    pub disallowed:      &'static [&'static str],
}

impl UnitName {
    fn new(text: impl Into<String>, prefix_exponent: i32, disallowed: &'static [&'static str]) -> Self {
        Self { text: text.into(),
               prefix_exponent,
               disallowed }
    }

    /// Returns `true` if `symbol` may be put in front of the name.
    #[must_use]
    pub fn allows_prefix(&self, symbol: &str) -> bool {
        !self.text.is_empty() && self.prefix_exponent != 0 && !self.disallowed.contains(&symbol)
    }
}

#[derive(Debug)]
struct Candidate {
    name:   UnitName,
    weight: u64,
}

/// Returns the display name of the SI unit of `dimension`.
///
/// A registered name is used when there is one. Otherwise the cheapest of
/// these candidates is chosen, the earliest winning ties:
/// - the base unit form, e.g. `kg m / s`, costing 2 per distinct base unit
///   (multiplied across numerator and denominator);
/// - a nameable unit raised to a power other than 0 or 1, costing twice the
///   unit's weight;
/// - a product of two distinct nameable units, costing the product of their
///   weights;
/// - a quotient of two distinct nameable units, costing the same.
///
/// Results are cached per dimension.
///
/// ## Example
/// ```
/// use physcalc::units::{Unit, naming::name_of};
///
/// let (_, joule) = Unit::parse("kg m^2 / s^2").unwrap();
/// assert_eq!(name_of(joule.dimension()).text, "J");
///
/// let (_, speed) = Unit::parse("km / h").unwrap();
/// assert_eq!(name_of(speed.dimension()).text, "m / s");
/// ```
pub fn name_of(dimension: Dimension) -> UnitName {
    let mut cache = NAME_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(name) = cache.get(&dimension) {
        return name.clone();
    }
    let name = registered_name(dimension).unwrap_or_else(|| synthesize(dimension));
    tracing::trace!(%dimension, name = %name.text, "named unit");
    cache.insert(dimension, name.clone());
    name
}

fn registered_name(dimension: Dimension) -> Option<UnitName> {
    let entry = catalog().entry(&Unit::si(dimension))?;
    entry.name
         .map(|name| UnitName::new(name, 1, entry.disallowed))
}

fn synthesize(dimension: Dimension) -> UnitName {
    if dimension.is_none() {
        return UnitName::new("", 0, ALL_SYMBOLS);
    }

    let mut candidates = vec![baseline(dimension)];
    let nameable: Vec<&UnitEntry> = catalog().nameable().collect();
    let max_power = dimension.max_power();

    for entry in &nameable {
        for power in -max_power..=max_power {
            if power == 0 || power == 1 {
                continue;
            }
            if entry.unit.dimension().powi(power) == Some(dimension) {
                let text = format!("{}{}", label(entry), superscript_power(power));
                candidates.push(Candidate { name:   UnitName::new(text, power, entry.disallowed),
                                            weight: entry.weight.saturating_mul(2), });
            }
        }
    }

    for (i, first) in nameable.iter().enumerate() {
        for second in &nameable[i + 1..] {
            if first.unit.dimension().multiply(second.unit.dimension()) == Some(dimension) {
                candidates.push(compound(first, second, " "));
            }
        }
    }

    for numerator in &nameable {
        for denominator in &nameable {
            if std::ptr::eq(*numerator, *denominator) {
                continue;
            }
            if numerator.unit.dimension().divide(denominator.unit.dimension()) == Some(dimension) {
                candidates.push(compound(numerator, denominator, " / "));
            }
        }
    }

    candidates.into_iter()
              .min_by_key(|candidate| candidate.weight)
              .map(|candidate| candidate.name)
              .unwrap_or_else(|| UnitName::new(dimension.base_name(), 0, ALL_SYMBOLS))
}

fn label(entry: &UnitEntry) -> &'static str {
    entry.name.unwrap_or_default()
}

fn compound(first: &UnitEntry, second: &UnitEntry, separator: &str) -> Candidate {
    Candidate { name:   UnitName::new(format!("{}{separator}{}", label(first), label(second)),
                                      1,
                                      first.disallowed),
                weight: first.weight.saturating_mul(second.weight), }
}

/// The name built from base unit symbols.
///
/// Only a leading factor in the numerator can take a prefix, and never
/// kilograms.
fn baseline(dimension: Dimension) -> Candidate {
    let runs = |sign: i32| {
        dimension.terms()
                 .filter(|&(_, e)| e.signum() == sign)
                 .fold(1_u64, |weight, _| weight.saturating_mul(2))
    };
    let weight = runs(1).saturating_mul(runs(-1));

    let leading = dimension.terms().find(|&(_, e)| e > 0);
    let name = match leading {
        Some((BaseDimension::Mass, e)) => UnitName::new(dimension.base_name(), e, ALL_SYMBOLS),
        Some((_, e)) => UnitName::new(dimension.base_name(), e, &[]),
        None => UnitName::new(dimension.base_name(), 0, ALL_SYMBOLS),
    };
    Candidate { name, weight }
}
