//! Utility functions for PC/SC operations

/// Match an ATR against a pattern with an optional mask
///
/// With a mask only the bits set in the mask are compared.
pub(crate) fn match_atr(atr: &[u8], pattern: &[u8], mask: Option<&[u8]>) -> bool {
    if pattern.len() > atr.len() {
        return false;
    }

    match mask {
        Some(mask) if mask.len() < pattern.len() => false,
        Some(mask) => atr
            .iter()
            .zip(pattern)
            .zip(mask)
            .all(|((a, p), m)| (a & m) == (p & m)),
        None => atr.starts_with(pattern),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_atr() {
        let atr = [0x3B, 0x9F, 0x96, 0x80, 0x1F];
        assert!(match_atr(&atr, &[0x3B, 0x9F], None));
        assert!(!match_atr(&atr, &[0x3B, 0x9E], None));
        assert!(match_atr(&atr, &[0x3B, 0x90], Some(&[0xFF, 0xF0])));
        assert!(!match_atr(&atr, &[0x3B, 0x90], Some(&[0xFF])));
        assert!(!match_atr(&[0x3B], &[0x3B, 0x9F], None));
    }
}
