//! Short links: a recipe id written as zero-padded lowercase hex.
//!
//! Ids up to `0xffff` encode to exactly [`CODE_WIDTH`] digits; larger ids
//! take more digits and still decode to the same id.

use crate::error::ValidationError;

pub const CODE_WIDTH: usize = 4;

/// Longest accepted code: eight hex digits covers every `u32`.
const MAX_CODE_LEN: usize = 8;

/// Encode a (positive) recipe id.
pub fn encode(recipe_id: i32) -> String {
    format!("{:0width$x}", recipe_id, width = CODE_WIDTH)
}

/// Decode a code back to a recipe id.
///
/// Case-insensitive. Rejects empty input, anything that is not plain hex
/// digits (no signs or `0x` prefix), and values that do not fit a positive
/// `i32`.
pub fn decode(code: &str) -> Result<i32, ValidationError> {
    let malformed = || ValidationError::MalformedShortCode(code.to_string());

    if code.is_empty()
        || code.len() > MAX_CODE_LEN
        || !code.bytes().all(|b| b.is_ascii_hexdigit())
    {
        return Err(malformed());
    }

    let value = u32::from_str_radix(code, 16).map_err(|_| malformed())?;
    i32::try_from(value).map_err(|_| malformed())
}

/// Full shareable URL for a recipe, e.g. `https://foodgram.example/s/00af/`.
pub fn short_url(base_url: &str, recipe_id: i32) -> String {
    format!("{}/s/{}/", base_url.trim_end_matches('/'), encode(recipe_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_fixed_width() {
        assert_eq!(encode(1), "0001");
        assert_eq!(encode(175), "00af");
        assert_eq!(encode(0xffff), "ffff");
    }

    #[test]
    fn test_encode_wider_ids() {
        assert_eq!(encode(0x10000), "10000");
        assert_eq!(decode(&encode(0x10000)), Ok(0x10000));
    }

    #[test]
    fn test_round_trip_within_width() {
        for id in [0, 1, 9, 10, 255, 256, 4096, 0xfffe, 0xffff] {
            assert_eq!(decode(&encode(id)), Ok(id), "id {}", id);
        }
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("00AF"), Ok(175));
    }

    #[test]
    fn test_decode_rejects_non_hex() {
        for code in ["", "zz", "00g1", "+1f", "-1", "0x1f", " 1f", "1f/"] {
            assert_eq!(
                decode(code),
                Err(ValidationError::MalformedShortCode(code.to_string())),
                "code {:?}",
                code
            );
        }
    }

    #[test]
    fn test_decode_rejects_overflow() {
        assert_eq!(decode("7fffffff"), Ok(i32::MAX));
        assert!(decode("80000000").is_err());
        assert!(decode("100000000").is_err());
    }

    #[test]
    fn test_short_url_joins_base() {
        assert_eq!(
            short_url("https://foodgram.example/", 42),
            "https://foodgram.example/s/002a/"
        );
        assert_eq!(
            short_url("http://localhost:3000", 16),
            "http://localhost:3000/s/0010/"
        );
    }
}
