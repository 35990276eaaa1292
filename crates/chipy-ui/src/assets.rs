//! Symbol asset keys
//!
//! Maps server symbol ids to texture/atlas keys. The server speaks numeric
//! ids; the frontend's atlas is keyed by name.

use chipy_core::SymbolId;

/// Atlas keys indexed by symbol id. The scatter is last.
pub const SYMBOL_KEYS: [&str; 9] = [
    "seven", "cherry", "lemon", "orange", "plum", "grapes", "watermelon", "bell", "star",
];

/// Key shown when the server sends an id outside the atlas.
pub const UNKNOWN_KEY: &str = "blank";

/// Atlas key for a symbol id.
pub fn symbol_key(id: SymbolId) -> &'static str {
    SYMBOL_KEYS.get(id as usize).copied().unwrap_or(UNKNOWN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(symbol_key(0), "seven");
        assert_eq!(symbol_key(8), "star");
    }

    #[test]
    fn test_out_of_range_id() {
        assert_eq!(symbol_key(99), "blank");
    }
}
