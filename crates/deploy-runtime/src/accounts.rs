//! # Accounts Store
//!
//! JSON file mapping a role name to the account that acts in it:
//!
//! ```json
//! {
//!     "meca_dao": {
//!         "private_key": "0x...",
//!         "account_address": "0x...",
//!         "balance": 1000
//!     }
//! }
//! ```
//!
//! Role names are those of `Role` (legacy `meca_*` names included). Entries
//! for any other name are ignored. Every stored address must be the one its
//! key controls.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::Path;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_types::{format_address, parse_address, Account, AccountError, Role, SecretKey, U256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::ConfigError;

#[derive(Debug, Deserialize, Serialize)]
struct AccountEntry {
    private_key: String,
    account_address: String,
    #[serde(default)]
    balance: Balance,
}

/// Older files store a JSON number, large balances need a string.
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
enum Balance {
    Number(u64),
    Text(String),
}

impl Default for Balance {
    fn default() -> Self {
        Balance::Number(0)
    }
}

impl Balance {
    fn from_u256(value: U256) -> Self {
        if value.bits() <= 64 {
            Balance::Number(value.low_u64())
        } else {
            Balance::Text(value.to_string())
        }
    }

    fn to_u256(&self) -> Result<U256, String> {
        match self {
            Balance::Number(n) => Ok(U256::from(*n)),
            Balance::Text(text) => match text.strip_prefix("0x") {
                Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| e.to_string()),
                None => U256::from_dec_str(text).map_err(|e| e.to_string()),
            },
        }
    }
}

/// The accounts of a run, one per role.
#[derive(Debug, Clone, Default)]
pub struct AccountStore {
    accounts: BTreeMap<Role, Account>,
}

impl AccountStore {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json, &path.display().to_string())
    }

    /// Parse accounts JSON; `origin` names the source in errors.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let malformed = |reason: String| ConfigError::Malformed {
            path: origin.to_string(),
            reason,
        };

        let entries: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| malformed(e.to_string()))?;

        let mut accounts = BTreeMap::new();
        for (name, value) in entries {
            let role: Role = match name.parse() {
                Ok(role) => role,
                Err(_) => {
                    debug!(entry = %name, "Ignoring account entry with unknown role");
                    continue;
                }
            };
            let entry: AccountEntry =
                serde_json::from_value(value).map_err(|e| malformed(format!("{name}: {e}")))?;
            match accounts.entry(role) {
                Entry::Occupied(_) => {
                    return Err(malformed(format!("role {role} is defined more than once")));
                }
                Entry::Vacant(slot) => {
                    slot.insert(load_entry(role, &entry, &malformed)?);
                }
            }
        }
        Ok(Self { accounts })
    }

    /// A fresh random key for every role, each funded with `balance`.
    pub fn generate(balance: U256) -> Self {
        let accounts = Role::ALL
            .into_iter()
            .map(|role| (role, Account::new(random_secret()).with_initial_balance(balance)))
            .collect();
        Self { accounts }
    }

    pub fn get(&self, role: Role) -> Result<&Account, ConfigError> {
        self.accounts.get(&role).ok_or(ConfigError::MissingRole(role))
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.accounts.keys().copied()
    }

    /// Serialize in the file layout, keys included.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let entries: BTreeMap<&str, AccountEntry> = self
            .accounts
            .iter()
            .map(|(role, account)| {
                (
                    role.as_str(),
                    AccountEntry {
                        private_key: account.secret().to_hex(),
                        account_address: format_address(&account.address()),
                        balance: Balance::from_u256(account.initial_balance()),
                    },
                )
            })
            .collect();
        serde_json::to_string_pretty(&entries).map_err(|e| ConfigError::Malformed {
            path: "accounts".to_string(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let unwritable = |e: std::io::Error| ConfigError::Unwritable {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(unwritable)?;
        }
        std::fs::write(path, self.to_json()?).map_err(unwritable)
    }
}

fn load_entry(
    role: Role,
    entry: &AccountEntry,
    malformed: &impl Fn(String) -> ConfigError,
) -> Result<Account, ConfigError> {
    let balance = entry
        .balance
        .to_u256()
        .map_err(|e| malformed(format!("{role}: balance: {e}")))?;
    let configured = parse_address(&entry.account_address)
        .map_err(|e| malformed(format!("{role}: account_address: {e}")))?;

    let account = Account::from_private_key(&entry.private_key)
        .map_err(|source| ConfigError::InvalidAccount { role, source })?
        .with_initial_balance(balance);

    account.verify_address(&configured).map_err(|e| match e {
        AccountError::AddressMismatch {
            configured,
            derived,
        } => ConfigError::AddressMismatch {
            role,
            configured,
            derived,
        },
        source => ConfigError::InvalidAccount { role, source },
    })?;
    Ok(account)
}

fn random_secret() -> SecretKey {
    let mut bytes = Zeroizing::new([0u8; 32]);
    loop {
        OsRng.fill_bytes(bytes.as_mut());
        // Zero or >= curve order; vanishingly rare.
        if let Ok(secret) = SecretKey::from_slice(bytes.as_ref()) {
            return secret;
        }
    }
}
