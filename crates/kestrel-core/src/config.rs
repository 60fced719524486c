use std::collections::HashMap;
use std::fmt;

const USERNAME_PREFIX: &str = "USERNAME_ACCOUNT";
const PASSWORD_PREFIX: &str = "PASSWORD_ACCOUNT";

/// Portal credentials for one account.
///
/// Loaded once at startup and passed down by parameter; never mutated.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub account_number: String,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .field("password", &"********")
            .field("account_number", &self.account_number)
            .finish()
    }
}

/// Discover accounts from the process environment.
///
/// Scans for `USERNAME_ACCOUNT<n>` / `PASSWORD_ACCOUNT<n>` pairs for any
/// suffix `<n>`, in encounter order.
pub fn accounts_from_env() -> Vec<Account> {
    accounts_from_pairs(std::env::vars())
}

/// Pair up username/password variables from an arbitrary key-value source.
///
/// A username variable without a matching password variable is skipped with
/// a warning rather than producing a half-configured account.
pub fn accounts_from_pairs<I>(vars: I) -> Vec<Account>
where
    I: IntoIterator<Item = (String, String)>,
{
    let entries: Vec<(String, String)> = vars.into_iter().collect();
    let passwords: HashMap<&str, &str> = entries
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(PASSWORD_PREFIX)
                .map(|suffix| (suffix, value.as_str()))
        })
        .collect();

    let mut accounts = Vec::new();
    for (key, username) in &entries {
        let Some(account_number) = key.strip_prefix(USERNAME_PREFIX) else {
            continue;
        };
        match passwords.get(account_number) {
            Some(password) => accounts.push(Account {
                username: username.clone(),
                password: (*password).to_string(),
                account_number: account_number.to_string(),
            }),
            None => {
                tracing::warn!(
                    "Ignoring {}{}: no matching {}{} variable",
                    USERNAME_PREFIX,
                    account_number,
                    PASSWORD_PREFIX,
                    account_number
                );
            }
        }
    }

    tracing::debug!("Discovered {} configured account(s)", accounts.len());
    accounts
}
