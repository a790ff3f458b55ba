/// Superscript digits in decimal order, followed by the superscript minus.
pub const SUPERSCRIPT_CHARS: [char; 11] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹', '⁻'];

fn to_superscript(c: char) -> Option<char> {
    match c {
        '-' => Some('⁻'),
        '0'..='9' => c.to_digit(10)
                      .and_then(|d| SUPERSCRIPT_CHARS.get(d as usize).copied()),
        _ => None,
    }
}

fn from_superscript(c: char) -> Option<char> {
    if c == '⁻' {
        return Some('-');
    }
    SUPERSCRIPT_CHARS.iter()
                     .take(10)
                     .position(|&s| s == c)
                     .and_then(|d| char::from_digit(u32::try_from(d).ok()?, 10))
}

/// Returns `true` if `c` is a superscript digit or the superscript minus.
#[must_use]
pub fn is_superscript(c: char) -> bool {
    SUPERSCRIPT_CHARS.contains(&c)
}

/// Renders an integer power as superscript text.
///
/// A power of one is rendered as the empty string, since `m¹` is just `m`.
///
/// # Example
/// ```
/// use physcalc::util::superscript::superscript_power;
///
/// assert_eq!(superscript_power(2), "²");
/// assert_eq!(superscript_power(-12), "⁻¹²");
/// assert_eq!(superscript_power(1), "");
/// ```
#[must_use]
pub fn superscript_power(power: i32) -> String {
    if power == 1 {
        return String::new();
    }
    power.to_string().chars().filter_map(to_superscript).collect()
}

/// Splits a unit term such as `m^2`, `s⁻¹` or `kg` into its name and the
/// textual power, converted to plain ASCII digits.
///
/// The power is `None` when the term carries no explicit power.
///
/// # Example
/// ```
/// use physcalc::util::superscript::split_power;
///
/// assert_eq!(split_power("m^2"), ("m", Some("2".to_string())));
/// assert_eq!(split_power("s⁻¹"), ("s", Some("-1".to_string())));
/// assert_eq!(split_power("kg"), ("kg", None));
/// ```
#[must_use]
pub fn split_power(term: &str) -> (&str, Option<String>) {
    if let Some((name, power)) = term.split_once('^') {
        return (name, Some(power.to_string()));
    }
    let name = term.trim_end_matches(is_superscript);
    if name.len() == term.len() {
        return (term, None);
    }
    let power = term[name.len()..].chars()
                                  .filter_map(from_superscript)
                                  .collect();
    (name, Some(power))
}
