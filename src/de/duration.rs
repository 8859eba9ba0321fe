//! Durations written as a sequence of decimal numbers, each with an optional
//! fraction and a unit suffix: `300ms`, `1.5h`, `2h45m`.
//!
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0`
//! needs no unit. Durations cannot be negative and must fit in `i64`
//! nanoseconds.

use std::time::Duration;

const MAX_NANOS: u64 = i64::MAX as u64;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

fn unit(name: &str) -> Option<u64> {
    match name {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC Greek small letter mu
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

pub(crate) fn parse(input: &str) -> Option<Duration> {
    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if rest == "0" {
        return Some(Duration::ZERO);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        let (whole, after) = leading_int(rest)?;
        let has_whole = after.len() != rest.len();
        rest = after;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digits_scale, after) = leading_fraction(after_dot);
            has_fraction = after.len() != after_dot.len();
            fraction = digits;
            scale = digits_scale;
            rest = after;
        }
        if !has_whole && !has_fraction {
            return None;
        }

        let end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        let unit = unit(&rest[..end])?;
        rest = &rest[end..];

        let mut value = whole.checked_mul(unit).filter(|v| *v <= MAX_NANOS)?;
        if fraction > 0 {
            value += (fraction as f64 * (unit as f64 / scale)) as u64;
            if value > MAX_NANOS {
                return None;
            }
        }
        total = total.checked_add(value).filter(|t| *t <= MAX_NANOS)?;
    }

    if negative && total != 0 {
        return None;
    }
    Some(Duration::from_nanos(total))
}

/// Splits off the leading decimal digits of `s`. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let digits = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    let mut value: u64 = 0;
    for b in s[..digits].bytes() {
        value = value.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
        if value > MAX_NANOS {
            return None;
        }
    }
    Some((value, &s[digits..]))
}

/// Splits off the leading fraction digits of `s`, returning them as an
/// integer and the power of ten they are scaled by. Digits past the
/// precision of `u64` are consumed and dropped.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let digits = s.bytes().take_while(|b| b.is_ascii_digit()).count();
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for b in s[..digits].bytes() {
        if overflow {
            continue;
        }
        let next = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .filter(|v| *v <= MAX_NANOS);
        match next {
            Some(next) => {
                value = next;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[digits..])
}
