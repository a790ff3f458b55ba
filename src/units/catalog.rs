use std::collections::HashMap;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::{
    interpreter::value::number::Number,
    units::{
        core::{Unit, UnitKey},
        dimension::{BaseDimension, Dimension},
        prefix::ALL_SYMBOLS,
    },
};

/// Weight of derived units. They never take part in name synthesis, so the
/// value only needs to lose against every nameable unit.
const DERIVED_WEIGHT: u64 = 1000;

/// Bans every prefix, for units such as `kg` or `h`.
pub const NO_PREFIXES: &[&str] = ALL_SYMBOLS;

static CATALOG: Lazy<Catalog> =
    Lazy::new(|| builtin().expect("built-in unit registrations must not conflict"));

/// Returns the process-wide unit catalog, building it on first use.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

/// Conflicts detected while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two registrations share a dimension and multiplier.
    #[error("a unit with dimension '{dimension}' and multiplier {multiplier} is already registered")]
    DuplicateKey {
        /// The dimension, rendered from base units.
        dimension:  String,
        /// The multiplier, rendered as a number.
        multiplier: String,
    },
    /// Two registrations share a name.
    #[error("a unit named {name} is already registered")]
    DuplicateName {
        /// The conflicting name.
        name: &'static str,
    },
}

/// A registered unit and everything known about it.
#[derive(Debug, Clone)]
pub struct UnitEntry {
    /// The name used to write and display the unit, if it has one.
    pub name:       Option<&'static str>,
    /// The unit itself.
    pub unit:       Unit,
    /// Cost of using this unit in a synthesized name; lower is preferred.
    pub weight:     u64,
    /// The quantity the unit measures, e.g. `force`.
    pub quantity:   Option<&'static str>,
    /// Derived units are multiples of another unit. They can be written but
    /// are never chosen for display.
    pub derivative: bool,
    /// Prefixes that may not be combined with this unit.
    pub disallowed: &'static [&'static str],
}

impl UnitEntry {
    /// Returns `true` if `symbol` may prefix this unit.
    #[must_use]
    pub fn allows_prefix(&self, symbol: &str) -> bool {
        !self.disallowed.contains(&symbol)
    }
}

/// Registry of known units.
///
/// Non-derived registrations are interned by dimension and multiplier so that
/// any computed unit can find its registered name and quantity. Every named
/// registration is also reachable by name.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<UnitEntry>,
    by_key:  HashMap<UnitKey, usize>,
    by_name: HashMap<&'static str, usize>,
}

impl Catalog {
    /// Registers an SI unit given by numerator and denominator base
    /// dimensions. `disallowed` lists the prefixes it may not take.
    ///
    /// # Errors
    /// Fails if the dimension or the name is already registered.
    pub fn register(&mut self,
                    name: Option<&'static str>,
                    weight: u64,
                    quantity: &'static str,
                    numerator: &[BaseDimension],
                    denominator: &[BaseDimension],
                    disallowed: &'static [&'static str])
                    -> Result<Unit, RegistrationError> {
        let unit = Unit::si(Dimension::from_parts(numerator, denominator));
        let key = unit.key();
        if self.by_key.contains_key(&key) {
            return Err(RegistrationError::DuplicateKey { dimension:  unit.dimension().to_string(),
                                                         multiplier: "1".to_string(), });
        }
        let index = self.push(UnitEntry { name,
                                          unit: unit.clone(),
                                          weight,
                                          quantity: Some(quantity),
                                          derivative: false,
                                          disallowed })?;
        self.by_key.insert(key, index);
        Ok(unit)
    }

    /// Registers `name` as `factor` times `base`.
    ///
    /// Derived units are found by name only; they share their dimension with
    /// the base unit and inherit its quantity.
    ///
    /// # Errors
    /// Fails if the name is already registered.
    pub fn derive(&mut self,
                  name: &'static str,
                  base: &Unit,
                  factor: &Number,
                  disallowed: &'static [&'static str])
                  -> Result<Unit, RegistrationError> {
        let unit = Unit::new(base.dimension(), base.multiplier() * factor);
        let quantity = self.entry(&Unit::si(base.dimension()))
                           .and_then(|entry| entry.quantity);
        self.push(UnitEntry { name: Some(name),
                              unit: unit.clone(),
                              weight: DERIVED_WEIGHT,
                              quantity,
                              derivative: true,
                              disallowed })?;
        Ok(unit)
    }

    fn push(&mut self, entry: UnitEntry) -> Result<usize, RegistrationError> {
        let index = self.entries.len();
        if let Some(name) = entry.name {
            if self.by_name.contains_key(name) {
                return Err(RegistrationError::DuplicateName { name });
            }
            self.by_name.insert(name, index);
        }
        self.entries.push(entry);
        Ok(index)
    }

    /// Finds the registration of exactly this unit, if any.
    #[must_use]
    pub fn entry(&self, unit: &Unit) -> Option<&UnitEntry> {
        self.by_key
            .get(&unit.key())
            .map(|&index| &self.entries[index])
    }

    /// Finds a unit by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&UnitEntry> {
        self.by_name.get(name).map(|&index| &self.entries[index])
    }

    /// Named, non-derived units in registration order. These are the building
    /// blocks of synthesized names.
    pub fn nameable(&self) -> impl Iterator<Item = &UnitEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.name.is_some() && !entry.derivative)
    }

    /// Every registered name in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().filter_map(|entry| entry.name)
    }
}

/// Builds the built-in catalog.
///
/// # Errors
/// Fails if two built-in registrations conflict.
#[allow(clippy::too_many_lines)]
pub fn builtin() -> Result<Catalog, RegistrationError> {
    use BaseDimension::{
        Amount as MOL, Current as A, Length as M, Luminous as CD, Mass as KG, Temperature as K,
        Time as S,
    };

    let mut c = Catalog::default();

    c.register(None, 2, "number", &[], &[], &[])?;

    // SI base units
    c.register(Some("A"), 2, "electric current", &[A], &[], &[])?;
    let kilogram = c.register(Some("kg"), 2, "mass", &[KG], &[], NO_PREFIXES)?;
    let meter = c.register(Some("m"), 2, "distance", &[M], &[], &[])?;
    let second = c.register(Some("s"), 2, "time", &[S], &[], &[])?;
    c.register(Some("K"), 2, "temperature", &[K], &[], &[])?;
    c.register(Some("mol"), 2, "amount of substance", &[MOL], &[], &[])?;
    let candela = c.register(Some("cd"), 2, "luminous intensity", &[CD], &[], &[])?;

    // SI derived units
    let newton = c.register(Some("N"), 3, "force", &[KG, M], &[S, S], &[])?;
    let joule = c.register(Some("J"), 3, "energy", &[KG, M, M], &[S, S], &[])?;
    let pascal = c.register(Some("Pa"), 4, "pressure", &[KG], &[S, S, M], &[])?;
    c.register(Some("W"), 4, "power", &[KG, M, M], &[S, S, S], &[])?;

    c.register(Some("C"), 3, "electric charge", &[A, S], &[], &[])?;
    c.register(Some("V"), 3, "voltage", &[KG, M, M], &[S, S, S, A], &[])?;
    c.register(Some("F"), 4, "capacitance", &[S, S, S, S, A, A], &[KG, M, M], &[])?;
    c.register(Some("Ω"), 4, "resistance", &[KG, M, M], &[S, S, S, A, A], &[])?;
    c.register(Some("S"), 5, "conductance", &[S, S, S, A, A], &[KG, M, M], &[])?;
    c.register(Some("Wb"), 4, "magnetic flux", &[KG, M, M], &[S, S, A], &[])?;
    c.register(Some("T"), 4, "magnetic flux density", &[KG], &[S, S, A], &[])?;
    c.register(Some("H"), 4, "inductance", &[KG, M, M], &[S, S, A, A], &[])?;

    let hertz = c.register(Some("Hz"), 4, "frequency", &[], &[S], &[])?;

    c.register(Some("lux"), 3, "illuminance", &[CD], &[M, M], &[])?;
    c.derive("lm", &candela, &Number::one(), &[])?;

    let gray = c.register(Some("Gy"), 5, "radiation dose", &[M, M], &[S, S], &[])?;
    c.register(Some("kat"), 5, "catalytic activity", &[MOL], &[S], &[])?;

    let becquerel = c.derive("Bq", &hertz, &Number::one(), &[])?;
    c.derive("Sv", &gray, &Number::one(), &[])?;

    // Quantities without a named SI unit
    let area = c.register(None, 3, "area", &[M, M], &[], &[])?;
    let volume = c.register(None, 4, "volume", &[M, M, M], &[], &[])?;
    let speed = c.register(None, 3, "speed", &[M], &[S], &[])?;
    c.register(None, 4, "acceleration", &[M], &[S, S], &[])?;
    c.register(None, 4, "momentum", &[KG, M], &[S], &[])?;

    c.register(None, 5, "angular momentum", &[KG, M, M], &[S], &[])?;
    c.register(None, 5, "moment of inertia", &[KG, M, M], &[], &[])?;

    c.register(None, 4, "electric field strength", &[KG, M], &[S, S, S, A], &[])?;
    c.register(None, 4, "magnetic field strength", &[A], &[M], &[])?;
    c.register(None, 5, "electric charge density", &[A, S], &[M, M, M], &[])?;
    c.register(None, 5, "resistivity", &[KG, M, M, M], &[S, S, S, A, A], &[])?;
    c.register(None, 5, "conductivity", &[S, S, S, A, A], &[KG, M, M, M], &[])?;
    c.register(None, 5, "permittivity", &[S, S, S, S, A, A], &[KG, M, M, M], &[])?;
    c.register(None, 5, "magnetic permeability", &[KG, M], &[S, S, A, A], &[])?;

    c.register(None, 5, "thermal conductivity", &[KG, M], &[S, S, S, K], &[])?;
    c.register(None, 5, "thermal capacity", &[KG, M, M], &[S, S, K], &[])?;
    c.register(None, 5, "specific thermal capacity", &[M, M], &[S, S, K], &[])?;

    c.register(None, 5, "molar thermal capacity", &[KG, M, M], &[S, S, K, MOL], &[])?;
    c.register(None, 5, "molar mass", &[KG], &[MOL], &[])?;
    c.register(None, 5, "concentration", &[MOL], &[M, M, M], &[])?;

    c.register(None, 5, "luminous energy", &[CD, S], &[], &[])?;
    c.register(None, 5, "luminous exposure", &[CD, S], &[M, M], &[])?;
    c.register(None, 5, "luminous efficacy", &[CD, S, S, S], &[KG, M, M], &[])?;

    let exposure = c.register(None, 5, "radioactive exposure", &[A, S], &[KG], &[])?;

    // Multiplied SI units
    c.derive("g", &kilogram, &Number::ratio(1, 1000), &[])?;
    c.derive("erg", &joule, &Number::power_of_ten(-7), &[])?;
    c.derive("l", &volume, &Number::ratio(1, 1000), &[])?;
    c.derive("ha", &area, &Number::from(10_000), NO_PREFIXES)?;

    c.derive("bar", &pascal, &Number::from(100_000), &[])?;
    c.derive("atm", &pascal, &Number::from(101_325), NO_PREFIXES)?;
    c.derive("mmHg", &pascal, &Number::scaled(133_322_387_415, -9), NO_PREFIXES)?;
    c.derive("inHg", &pascal, &Number::scaled(3_386_389, -3), NO_PREFIXES)?;
    c.derive("Torr", &pascal, &Number::ratio(101_325, 760), &[])?;

    let minute = c.derive("min", &second, &Number::from(60), NO_PREFIXES)?;
    let hour = c.derive("h", &minute, &Number::from(60), NO_PREFIXES)?;
    c.derive("d", &hour, &Number::from(24), NO_PREFIXES)?;

    c.derive("kph", &speed, &Number::ratio(1000, 3600), NO_PREFIXES)?;

    let degree_in_radians = Number::from(std::f64::consts::PI / 180.0);
    let degree = c.derive("deg", &Unit::dimensionless(), &degree_in_radians, NO_PREFIXES)?;
    let arc_minute = c.derive("'", &degree, &Number::ratio(1, 60), NO_PREFIXES)?;
    c.derive("\"", &arc_minute, &Number::ratio(1, 60), NO_PREFIXES)?;

    c.derive("cal", &joule, &Number::scaled(4184, -3), &[])?;
    c.derive("eV", &joule, &Number::scaled(1_602_176_634, -28), &[])?;

    c.derive("Ci", &becquerel, &Number::scaled(37, 9), &[])?;
    // 1 rad is 0.01 Gy, as defined in CGS.
    c.derive("rad", &gray, &Number::ratio(1, 100), &[])?;
    c.derive("R", &exposure, &Number::scaled(258, -6), &[])?;

    // US customary units
    let inch = c.derive("in", &meter, &Number::scaled(254, -4), NO_PREFIXES)?;
    let foot = c.derive("ft", &inch, &Number::from(12), NO_PREFIXES)?;
    let yard = c.derive("yd", &foot, &Number::from(3), NO_PREFIXES)?;
    let mile = c.derive("mi", &yard, &Number::from(1760), NO_PREFIXES)?;
    c.derive("NM", &meter, &Number::from(1852), NO_PREFIXES)?;

    c.derive("mph", &speed, &(mile.multiplier() * &Number::ratio(1, 3600)), NO_PREFIXES)?;

    let square_foot = foot.multiplier() * foot.multiplier();
    c.derive("ac", &area, &(&Number::from(43_560) * &square_foot), NO_PREFIXES)?;

    let pound = c.derive("lb", &kilogram, &Number::scaled(45_359_237, -8), NO_PREFIXES)?;
    let standard_gravity = Number::scaled(980_665, -5);
    let pound_force = c.derive("lbf", &newton, &(pound.multiplier() * &standard_gravity), NO_PREFIXES)?;
    c.derive("ftlb", &joule, &(pound_force.multiplier() * foot.multiplier()), NO_PREFIXES)?;
    let square_inch = inch.multiplier() * inch.multiplier();
    let per_square_inch = Number::ratio(25_000_000, 16_129);
    c.derive("psi", &pascal, &(pound_force.multiplier() * &per_square_inch), NO_PREFIXES)?;

    let cubic_inch = &square_inch * inch.multiplier();
    let gallon = c.derive("gal", &volume, &(&Number::from(231) * &cubic_inch), NO_PREFIXES)?;
    c.derive("floz", &gallon, &Number::ratio(1, 128), NO_PREFIXES)?;


    tracing::debug!(units = c.entries.len(), "built unit catalog");
    Ok(c)
}
