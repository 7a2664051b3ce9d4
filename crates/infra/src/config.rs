//! Store file locations.

use std::path::{Path, PathBuf};

pub const STORE_DIR_ENV: &str = "MONEYFLOW_STORE_DIR";
pub const TRANSFERS_ENV: &str = "MONEYFLOW_TRANSFERS_STORE";
pub const DEPOSITS_ENV: &str = "MONEYFLOW_DEPOSITS_STORE";
pub const TRANSACTIONS_ENV: &str = "MONEYFLOW_TRANSACTIONS_STORE";
pub const BALANCES_ENV: &str = "MONEYFLOW_BALANCES_STORE";

pub const DEFAULT_STORE_DIR: &str = "./store";

/// Paths of the four JSON stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub transfers: PathBuf,
    pub deposits: PathBuf,
    /// Read-only input; must exist before balances are computed.
    pub transactions: PathBuf,
    pub balances: PathBuf,
}

impl StoreConfig {
    /// Default file names under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            transfers: dir.join("transfers_store.json"),
            deposits: dir.join("deposits_store.json"),
            transactions: dir.join("transactions.json"),
            balances: dir.join("balances_store.json"),
        }
    }

    /// Read locations from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = lookup(STORE_DIR_ENV).unwrap_or_else(|| {
            tracing::warn!("{STORE_DIR_ENV} not set; using {DEFAULT_STORE_DIR}");
            DEFAULT_STORE_DIR.to_string()
        });

        let defaults = Self::in_dir(dir);
        let pick = |key: &str, default: PathBuf| lookup(key).map(PathBuf::from).unwrap_or(default);

        Self {
            transfers: pick(TRANSFERS_ENV, defaults.transfers),
            deposits: pick(DEPOSITS_ENV, defaults.deposits),
            transactions: pick(TRANSACTIONS_ENV, defaults.transactions),
            balances: pick(BALANCES_ENV, defaults.balances),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_live_under_store_dir() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config, StoreConfig::in_dir(DEFAULT_STORE_DIR));
        assert!(config.transactions.ends_with("transactions.json"));
    }

    #[test]
    fn per_file_overrides_win() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (STORE_DIR_ENV, "/data"),
            (BALANCES_ENV, "/tmp/balances.json"),
        ]);
        let config = StoreConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.transfers, PathBuf::from("/data/transfers_store.json"));
        assert_eq!(config.balances, PathBuf::from("/tmp/balances.json"));
    }
}
