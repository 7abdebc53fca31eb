use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Even-length hex with an optional 0x prefix
    static ref HEX_TAG: Regex = Regex::new(r"^(0[xX])?([0-9a-fA-F]{2})*$").unwrap();
}

// Canonical form of a caller-supplied hex string: trimmed, unprefixed, lowercase
pub fn normalize_hex(input: &str) -> String {
    let trimmed = input.trim();
    let unprefixed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    unprefixed.to_ascii_lowercase()
}

// Strict check for callers that want to reject malformed tags up front
pub fn is_valid_hex_tag(input: &str) -> bool {
    HEX_TAG.is_match(input.trim())
}
