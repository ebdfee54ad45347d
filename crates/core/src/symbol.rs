use crate::error::{ScenarioError, ScenarioResult};

pub const MAX_SYMBOL_LEN: usize = 20;

/// Normalizes a ticker symbol and rejects anything outside the accepted shape.
///
/// Accepted: after trimming and uppercasing, 1..=20 characters, an optional single leading
/// `^` (index tickers such as `^GSPC`), then ASCII letters, digits, `&`, `.` or `-`, with at
/// least one letter.
pub fn normalize_symbol(raw: &str) -> ScenarioResult<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    let invalid = |reason: &str| {
        ScenarioError::InvalidInput(format!("invalid ticker symbol {raw:?}: {reason}"))
    };

    if symbol.is_empty() {
        return Err(invalid("must be non-empty"));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(invalid("too long"));
    }

    let body = symbol.strip_prefix('^').unwrap_or(&symbol);
    if body.is_empty() {
        return Err(invalid("index marker without a name"));
    }
    if let Some(bad) = body
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '&' | '.' | '-')))
    {
        return Err(invalid(&format!("unexpected character {bad:?}")));
    }
    if !body.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("must contain a letter"));
    }

    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_index_tickers() {
        assert_eq!(normalize_symbol(" reliance ").unwrap(), "RELIANCE");
        assert_eq!(normalize_symbol("^gspc").unwrap(), "^GSPC");
        assert_eq!(normalize_symbol("L&T").unwrap(), "L&T");
        assert_eq!(normalize_symbol("brk.b").unwrap(), "BRK.B");
        assert_eq!(normalize_symbol("NIFTY50").unwrap(), "NIFTY50");
    }

    #[test]
    fn rejects_malformed_tickers() {
        for raw in ["", "   ", "^", "^^GSPC", "AB CD", "1234", "DROP;TABLE", "A/B", "ÄPPLE"] {
            let err = normalize_symbol(raw).unwrap_err();
            assert!(
                matches!(err, ScenarioError::InvalidInput(_)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overlong_tickers() {
        let raw = "A".repeat(MAX_SYMBOL_LEN + 1);
        assert!(normalize_symbol(&raw).is_err());
        assert!(normalize_symbol(&"A".repeat(MAX_SYMBOL_LEN)).is_ok());
    }
}
