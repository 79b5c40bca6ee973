//! TON address surface shapes.
//!
//! Three shapes are recognized locally, without touching the network:
//! the checksum-bearing friendly form ("UQ..."/"EQ..."), the raw
//! `workchain:hash` form, and a generic alphanumeric fallback. The
//! balance endpoints only accept the friendly form, so everything else
//! goes through [`super::TonProvider::resolve_friendly`] first.

/// Minimum length of the base64url body after the UQ/EQ prefix.
const MIN_FRIENDLY_BODY: usize = 40;

/// Minimum length of a generic (unrecognized but plausible) address.
const MIN_GENERIC_LEN: usize = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressForm {
    /// Prefixed, checksum-bearing display form.
    Friendly,
    /// `workchain:hash` without checksum or prefix.
    Raw,
    /// Alphanumeric string of plausible length.
    Generic,
}

/// Classify an address string, or `None` if it matches no known shape.
pub fn classify(address: &str) -> Option<AddressForm> {
    let address = address.trim();
    if is_friendly(address) {
        Some(AddressForm::Friendly)
    } else if is_raw(address) {
        Some(AddressForm::Raw)
    } else if
        address.len() >= MIN_GENERIC_LEN &&
        address.chars().all(|c| c.is_ascii_alphanumeric())
    {
        Some(AddressForm::Generic)
    } else {
        None
    }
}

/// Format-only validation, no network round-trip.
pub fn is_valid_format(address: &str) -> bool {
    classify(address).is_some()
}

/// Whether the address is already in the friendly display form.
pub fn is_friendly(address: &str) -> bool {
    let body = match
        address.strip_prefix("UQ").or_else(|| address.strip_prefix("EQ"))
    {
        Some(body) => body,
        None => {
            return false;
        }
    };

    body.len() >= MIN_FRIENDLY_BODY &&
        body.chars().all(|c| (c.is_ascii_alphanumeric() || c == '_' || c == '-'))
}

fn is_raw(address: &str) -> bool {
    let Some((workchain, hash)) = address.split_once(':') else {
        return false;
    };

    let digits = workchain.strip_prefix('-').unwrap_or(workchain);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// Deterministic display truncation: first `head` characters, an
/// ellipsis, then the last `tail` characters. Short addresses pass
/// through untouched.
pub fn short_address(address: &str, head: usize, tail: usize) -> String {
    if address.len() <= head + tail + 3 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..head], &address[address.len() - tail..])
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "0:018bbd60d72dc1167c40fea718fa08926ed471f6002b03dc57a5f799c93a8ffc";

    #[test]
    fn test_classify_friendly() {
        let addr = format!("UQ{}", "A".repeat(40));
        assert_eq!(classify(&addr), Some(AddressForm::Friendly));
        assert!(is_friendly(&addr));

        let addr = format!("EQ{}", "b-_4".repeat(12));
        assert_eq!(classify(&addr), Some(AddressForm::Friendly));
    }

    #[test]
    fn test_classify_raw() {
        assert_eq!(classify(RAW), Some(AddressForm::Raw));
        assert_eq!(
            classify("-1:018bbd60d72dc1167c40fea718fa08926ed471f6002b03dc57a5f799c93a8ffc"),
            Some(AddressForm::Raw)
        );
        // Hash must be exactly 64 hex characters
        assert_eq!(classify("0:018bbd60"), None);
        assert_eq!(classify(&format!("0:{}", "z".repeat(64))), None);
    }

    #[test]
    fn test_classify_generic() {
        let addr = "a1".repeat(20);
        assert_eq!(classify(&addr), Some(AddressForm::Generic));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(!is_valid_format("abc"));
        assert!(!is_valid_format("UQabc"));
        assert!(!is_valid_format(""));
        // Too short for the generic fallback as well
        assert!(!is_valid_format(&format!("UQ{}", "A".repeat(37))));
        // A 39-character alphanumeric body misses the friendly minimum
        // but still lands in the generic bucket
        assert_eq!(classify(&format!("UQ{}", "A".repeat(39))), Some(AddressForm::Generic));
    }

    #[test]
    fn test_friendly_form_skips_resolution() {
        // The resolver leaves friendly addresses untouched; the check it
        // relies on is purely local.
        let addr = format!("UQ{}", "A".repeat(46));
        assert!(is_friendly(&addr));
        assert!(!is_friendly(RAW));
    }

    #[test]
    fn test_short_address() {
        let addr = format!("UQ{}", "ABCDEF".repeat(8));
        let short = short_address(&addr, 8, 4);
        assert_eq!(short, "UQABCDEF...CDEF");

        // Too short to truncate
        assert_eq!(short_address("UQshort", 8, 4), "UQshort");
    }
}
