//! Store identifiers

use serde::{Deserialize, Serialize};

/// Retail store. Every catalog query and voucher commit names its store
/// explicitly; there is no ambient "current store" anywhere in the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Store {
    Win,
    Pwint,
    Yangon,
}

impl Store {
    pub const ALL: [Store; 3] = [Store::Win, Store::Pwint, Store::Yangon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Store::Win => "win",
            Store::Pwint => "pwint",
            Store::Yangon => "yangon",
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_serde_roundtrip() {
        for store in Store::ALL {
            let json = serde_json::to_string(&store).unwrap();
            assert_eq!(json, format!("\"{}\"", store.as_str()));
            let back: Store = serde_json::from_str(&json).unwrap();
            assert_eq!(back, store);
        }
    }
}
