//! Unit-scaled duration formatting.

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const SECS_PER_MINUTE: u128 = 60;
const SECS_PER_HOUR: u128 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: u128 = 24 * SECS_PER_HOUR;

/// Formats a signed duration given in nanoseconds.
///
/// Below one second the largest of `ns`, `µs` and `ms` that fits is used, with
/// trailing zero decimals dropped (`500ms`, `1.5ms`). From one second up the
/// output lists the non-zero `d`, `h` and `m` components followed by seconds
/// (`3h12m`, `1d5m`, `1m30.5s`). Zero is `0s`; negative values get a leading `-`.
///
/// ```rust
/// use fieldscan::fmt_duration;
///
/// assert_eq!(fmt_duration(11_520_000_000_000), "3h12m");
/// assert_eq!(fmt_duration(-500_000_000), "-500ms");
/// ```
pub fn fmt_duration(total_nanos: i128) -> String {
    if total_nanos == 0 {
        return "0s".to_string();
    }
    let sign = if total_nanos < 0 { "-" } else { "" };
    let nanos = total_nanos.unsigned_abs();
    let body = if nanos < NANOS_PER_SEC {
        sub_second(nanos)
    } else {
        clock(nanos)
    };
    format!("{sign}{body}")
}

fn sub_second(nanos: u128) -> String {
    if nanos < NANOS_PER_MICRO {
        format!("{nanos}ns")
    } else if nanos < NANOS_PER_MILLI {
        format!("{}µs", decimal(nanos, NANOS_PER_MICRO))
    } else {
        format!("{}ms", decimal(nanos, NANOS_PER_MILLI))
    }
}

fn clock(nanos: u128) -> String {
    let secs = nanos / NANOS_PER_SEC;
    let days = secs / SECS_PER_DAY;
    let hours = secs % SECS_PER_DAY / SECS_PER_HOUR;
    let minutes = secs % SECS_PER_HOUR / SECS_PER_MINUTE;
    let seconds = secs % SECS_PER_MINUTE;
    let fraction = nanos % NANOS_PER_SEC;

    let mut out = String::new();
    for (amount, unit) in [(days, "d"), (hours, "h"), (minutes, "m")] {
        if amount > 0 {
            out.push_str(&amount.to_string());
            out.push_str(unit);
        }
    }
    if seconds > 0 || fraction > 0 {
        out.push_str(&decimal(seconds * NANOS_PER_SEC + fraction, NANOS_PER_SEC));
        out.push('s');
    }
    out
}

/// Writes `value / unit` with the remainder as trimmed decimals.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
