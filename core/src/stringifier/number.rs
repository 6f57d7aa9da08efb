//! General numeric format for floating values.
//!
//! Six significant digits, trailing zeros dropped, switching to exponent
//! notation when the decimal exponent is below -4 or at least the precision.
//! This is the conventional default text form of a double (`%g`), and is
//! locale independent.

use core::fmt::{self, Write};

use crate::{String, format};

/// Significant digits kept by the general format.
pub const PRECISION: usize = 6;

/// Formats `value` in the general numeric format.
///
/// ```
/// use tally_core::stringifier::number::format_general;
///
/// assert_eq!(format_general(7.0), "7");
/// assert_eq!(format_general(0.1), "0.1");
/// assert_eq!(format_general(1234567.0), "1.23457e+06");
/// assert_eq!(format_general(0.00001), "1e-05");
/// ```
pub fn format_general(value: f64) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_general(&mut out, value);
    out
}

/// Writes `value` in the general numeric format.
pub fn write_general<W: Write>(mut out: W, value: f64) -> fmt::Result {
    if value.is_nan() {
        return out.write_str("nan");
    }
    if value.is_infinite() {
        return out.write_str(if value < 0.0 { "-inf" } else { "inf" });
    }
    if value == 0.0 {
        return out.write_str(if value.is_sign_negative() { "-0" } else { "0" });
    }

    // Round to the precision first: the exponent after rounding decides the style.
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

    if exponent < -4 || exponent >= PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(
            out,
            "{}e{}{:02}",
            strip_fraction_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION as i32 - 1 - exponent) as usize;
        let fixed = format!("{value:.decimals$}");
        out.write_str(strip_fraction_zeros(&fixed))
    }
}

fn strip_fraction_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
