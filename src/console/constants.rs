use std::f64::consts::{E, PI};

use crate::{
    interpreter::{parser::core::ParseResult, value::{core::Value, number::Number}},
    units::Unit,
};

/// Names accepted by `!load`, in the order they are listed in help.
pub const SET_NAMES: [&str; 2] = ["chem", "phys"];

type Definition = (&'static str, f64, &'static str);

const MATH: [(&str, f64); 3] = [("e", E), ("pi", PI), ("π", PI)];

const PHYSICS: [Definition; 17] = [("G", 6.674_30e-11, "N m^2/kg^2"),
                                   ("g_n", 9.806_65, "m/s^2"),
                                   ("T_0", 273.15, "K"),
                                   ("p_0", 101_325.0, "Pa"),
                                   ("ε_0", 8.854_187_812_8e-12, "F/m"),
                                   ("μ_0", 1.256_637_062_12e-6, "H/m"),
                                   ("k", 8.987_551_792_3e9, "m/F"),
                                   ("F", 96_485.332_12, "C/mol"),
                                   ("c", 2.997_924_58e8, "m/s"),
                                   ("c_0", 2.997_924_58e8, "m/s"),
                                   ("m_e", 9.109_383_701_5e-31, "kg"),
                                   ("m_p", 1.672_621_923_69e-27, "kg"),
                                   ("m_n", 1.674_927_498_04e-27, "kg"),
                                   ("m_d", 3.343_583_772_4e-27, "kg"),
                                   ("m_α", 6.644_657_335_7e-27, "kg"),
                                   ("h", 6.626_070_15e-34, "J s"),
                                   ("q_e", 1.602_176_634e-19, "C")];

/// Chemistry constants, loaded on top of [`PHYSICS`]. `k` here is the
/// Boltzmann constant rather than Coulomb's.
const CHEMISTRY: [Definition; 5] = [("u", 1.660_539_066_6e-27, "kg"),
                                    ("k", 1.380_649e-23, "J/K"),
                                    ("N_A", 6.022_140_76e23, "1/mol"),
                                    ("R", 8.314_462_618, "Pa m^3/mol K"),
                                    ("R_H", 1.097_373_156_8e7, "1/m")];

fn build(definitions: &[Definition]) -> ParseResult<Vec<(String, Value)>> {
    definitions.iter()
               .map(|&(name, magnitude, spec)| {
                   let (multiplier, unit) = Unit::parse(spec)?;
                   let value = Value::new(&Number::from(magnitude) * &multiplier, &unit);
                   Ok((name.to_string(), value))
               })
               .collect()
}

/// The mathematical constants every session starts with.
#[must_use]
pub fn math() -> Vec<(String, Value)> {
    MATH.iter()
        .map(|&(name, magnitude)| (name.to_string(), Value::from(Number::from(magnitude))))
        .collect()
}

/// A named constant set for `!load`, or `None` if there is no such set.
///
/// Later definitions replace earlier ones, so loading `chem` redefines `k`.
///
/// ## Example
/// ```
/// use physcalc::{console::constants::load, units::Unit};
///
/// let chem = load("chem").unwrap().unwrap();
/// let (_, boltzmann) = chem.iter().rev().find(|(name, _)| name == "k").unwrap();
/// let (_, entropy) = Unit::parse("J/K").unwrap();
/// assert_eq!(boltzmann.unit(), &entropy);
/// assert!(load("astro").is_none());
/// ```
#[must_use]
pub fn load(set: &str) -> Option<ParseResult<Vec<(String, Value)>>> {
    match set {
        "phys" => Some(build(&PHYSICS)),
        "chem" => Some(build(&PHYSICS).and_then(|mut constants| {
                           constants.extend(build(&CHEMISTRY)?);
                           Ok(constants)
                       })),
        _ => None,
    }
}
