use physcalc::{
    interpreter::value::number::Number,
    units::{
        BaseDimension::{Current, Length, Luminous, Mass, Time},
        Dimension, Unit, UnitCast,
        catalog::{Catalog, NO_PREFIXES, RegistrationError, catalog},
        naming::name_of,
        prefix::{PREFIXES, display_prefixes},
    },
};
use pretty_assertions::assert_eq;

fn parse(text: &str) -> (Number, Unit) {
    Unit::parse(text).unwrap_or_else(|e| panic!("cannot parse '{text}': {e}"))
}

fn name(text: &str) -> String {
    let (_, unit) = parse(text);
    name_of(unit.dimension()).text
}

#[test]
fn prefixes_are_tried_in_order() {
    assert_eq!(PREFIXES.len(), 21);
    assert_eq!(PREFIXES[0].symbol, "da");

    let shown: Vec<&str> = display_prefixes().map(|p| p.symbol).collect();
    assert_eq!(shown,
               vec!["", "k", "M", "G", "T", "P", "E", "Z", "Y", "m", "μ", "n", "p", "f", "a", "z",
                    "y"]);
}

#[test]
fn prefixed_names() {
    assert_eq!(parse("dam").0, Number::from(10));
    assert_eq!(parse("mg").0, Number::ratio(1, 1_000_000));
    assert_eq!(parse("us").0, parse("μs").0);
    assert_eq!(parse("kPa").0, Number::from(1000));
    assert_eq!(parse("mmol").0, Number::ratio(1, 1000));
}

#[test]
fn exact_names_win_over_prefixes() {
    // `min` and `cd` also read as a prefix plus a unit.
    assert_eq!(parse("Pa").0, Number::one());
    assert_eq!(parse("min").0, Number::from(60));
    assert_eq!(parse("cd").1, Unit::base(Luminous));
}

#[test]
fn prefix_rules_are_enforced() {
    for text in ["kmin", "mkg", "kmph", "Mft"] {
        let error = Unit::parse(text).unwrap_err();
        assert_eq!(error.to_string(), format!("unknown unit {text}"));
    }
}

#[test]
fn specifications() {
    let (mul, unit) = parse("kg m^2 / s^2");
    assert_eq!(mul, Number::one());
    assert_eq!(unit.dimension(),
               Dimension::from_parts(&[Mass, Length, Length], &[Time, Time]));

    let (mul, unit) = parse("km/h");
    assert_eq!(mul, Number::ratio(5, 18));
    assert_eq!(unit.dimension(), Dimension::from_parts(&[Length], &[Time]));

    assert_eq!(parse("s⁻¹").1.to_string(), "Hz");
    assert_eq!(parse("m²").1, parse("m^2").1);
    assert_eq!(parse("1 / s").1, parse("Hz").1);
    assert_eq!(parse("1").1, Unit::dimensionless());

    assert_eq!(Unit::parse("m^x").unwrap_err().to_string(), "invalid power x");
    assert_eq!(Unit::parse("m s^1.5").unwrap_err().to_string(), "invalid power 1.5");
}

#[test]
fn customary_units_are_exact() {
    assert_eq!(parse("in").0, Number::ratio(254, 10_000));
    assert_eq!(parse("mi").0, Number::ratio(1_609_344, 1000));
    assert_eq!(parse("lb").0, Number::ratio(45_359_237, 100_000_000));
    assert!(!parse("deg").0.is_exact());
}

#[test]
fn dimension_algebra() {
    let speed = Dimension::from_parts(&[Length], &[Time]);
    let time = Dimension::base(Time);
    assert_eq!(speed.multiply(time), Some(Dimension::base(Length)));
    assert_eq!(speed.divide(speed), Some(Dimension::NONE));
    assert!(speed.divide(speed).unwrap().is_none());
    assert_eq!(speed.powi(-2).unwrap().to_string(), "s² / m²");
    assert_eq!(speed.powi(2).unwrap().root(2), Some(speed));
    assert_eq!(speed.root(2), None);
    assert_eq!(Dimension::from_parts(&[Mass, Length, Length], &[Time, Time, Time, Current]).max_power(),
               3);
    assert_eq!(Dimension::from_parts(&[], &[Time]).base_name(), "1 / s");
}

#[test]
fn registered_names() {
    assert_eq!(name("kg m / s^2"), "N");
    assert_eq!(name("kg m^2 / s^2"), "J");
    assert_eq!(name("J / s"), "W");
    assert_eq!(name("A s"), "C");
    assert_eq!(name("1 / s"), "Hz");
}

#[test]
fn synthesized_names() {
    assert_eq!(name("m^2"), "m²");
    assert_eq!(name("km / h"), "m / s");
    assert_eq!(name("V / m"), "V / m");
    assert_eq!(name("kg m / s"), "s N");
    assert_eq!(name("kg / mol"), "kg / mol");
    assert_eq!(name("1"), "");

    let area = name_of(parse("m^2").1.dimension());
    assert_eq!(area.prefix_exponent, 2);
    assert!(area.allows_prefix("k"));

    let molar = name_of(parse("kg / mol").1.dimension());
    assert!(!molar.allows_prefix("k"));
}

#[test]
fn catalog_knows_quantities() {
    assert_eq!(parse("N").1.quantity(), Some("force"));
    assert_eq!(parse("m/s").1.quantity(), Some("speed"));
    assert_eq!(parse("kg m^2").1.quantity(), Some("moment of inertia"));
    assert_eq!(parse("m^4").1.quantity(), None);

    let catalog = catalog();
    let electron_volt = catalog.lookup("eV").unwrap();
    assert!(electron_volt.derivative);
    assert_eq!(electron_volt.quantity, Some("energy"));
    assert!(catalog.lookup("furlong").is_none());
    assert!(catalog.names().any(|n| n == "Ω"));
}

#[test]
fn casts_keep_their_text() {
    let cast = UnitCast::parse("  km / h").unwrap();
    assert_eq!(cast.text, "km / h");
    assert_eq!(cast.multiplier, Number::ratio(5, 18));
    assert_eq!(cast.unit, parse("m/s").1);
}

#[test]
fn conflicting_registrations_fail() {
    let mut catalog = Catalog::default();
    let meter = catalog.register(Some("m"), 2, "distance", &[Length], &[], &[])
                       .unwrap();

    assert_eq!(catalog.register(Some("metre"), 2, "length", &[Length], &[], &[]),
               Err(RegistrationError::DuplicateKey { dimension:  "m".to_string(),
                                                     multiplier: "1".to_string(), }));
    assert_eq!(catalog.register(Some("m"), 2, "time", &[Time], &[], &[]),
               Err(RegistrationError::DuplicateName { name: "m" }));
    assert_eq!(catalog.derive("m", &meter, &Number::from(2), &[]),
               Err(RegistrationError::DuplicateName { name: "m" }));

    let foot = catalog.derive("ft", &meter, &Number::scaled(3048, -4), NO_PREFIXES)
                      .unwrap();
    assert_eq!(foot.multiplier(), &Number::scaled(3048, -4));
    assert!(!catalog.lookup("ft").unwrap().allows_prefix("k"));
    assert!(catalog.lookup("m").unwrap().allows_prefix("k"));
    assert_eq!(catalog.lookup("ft").unwrap().quantity, Some("distance"));
}
