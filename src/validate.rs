//! Syntactic checks for the values being swapped.
//!
//! These checks only decide how a value *looks*. They never resolve anything
//! and never block a run: an unrecognised value produces a warning and the
//! replacement goes ahead as a plain literal.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("static IPv4 pattern")
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    let label = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
    Regex::new(&format!(r"^{label}(?:\.{label})*$")).expect("static hostname pattern")
});

/// What a value passed on the command line appears to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Ipv4,
    Hostname,
    Unknown,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Ipv4 => "IPv4 address",
            ValueKind::Hostname => "hostname",
            ValueKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Returns `true` if `s` is a dotted-quad IPv4 address.
///
/// Each octet must be 1-3 digits, at most 255, and written without leading
/// zeros (`"010"` is rejected because tools disagree on whether it is octal).
pub fn validate_ipv4(s: &str) -> bool {
    let Some(caps) = IPV4.captures(s) else {
        return false;
    };

    caps.iter().skip(1).flatten().all(|octet| {
        let digits = octet.as_str();
        let no_leading_zero = digits.len() == 1 || !digits.starts_with('0');
        no_leading_zero && digits.parse::<u16>().is_ok_and(|n| n <= 255)
    })
}

/// Returns `true` if `s` is a sequence of valid DNS labels separated by dots.
///
/// Labels are 1-63 ASCII letters, digits and hyphens and may not begin or end
/// with a hyphen. Empty labels (`"a..b"`, a trailing dot) are rejected.
pub fn validate_hostname(s: &str) -> bool {
    HOSTNAME.is_match(s)
}

/// Classifies a value, trying IPv4 first and then hostname.
///
/// A dotted string made only of digits that fails the IPv4 check (such as
/// `"192.168.1.256"`) is a mistyped address, not a hostname, so it comes back
/// as [`ValueKind::Unknown`].
pub fn classify(s: &str) -> ValueKind {
    if validate_ipv4(s) {
        return ValueKind::Ipv4;
    }

    let all_numeric = s
        .split('.')
        .all(|label| !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit()));
    if !all_numeric && validate_hostname(s) {
        ValueKind::Hostname
    } else {
        ValueKind::Unknown
    }
}
