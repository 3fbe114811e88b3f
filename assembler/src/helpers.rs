
// Base 10, with an optional sign. Negative values (other than -0) have no
// representation in any operand field, so they come back as None along with
// anything that overflows a u64.
pub fn parse_int(s: &str) -> Option<u64> {
    let (neg, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let val = digits.parse::<u64>().ok()?;
    (!neg || val == 0).then_some(val)
}

// Whether s is written as a base 10 integer, regardless of whether it fits
// anywhere.
pub fn is_int(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
