//! Demo account store: email/password pairs, unique by email.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::store::{
    event_channel, load_list, publish, save_list, KeyValueStorage, Result, StoreError, StoreEvent,
    USERS_KEY,
};

/// A demo account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
}

/// Result of [`AccountStore::signup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    DuplicateEmail,
}

impl SignupOutcome {
    pub fn success(self) -> bool {
        self == SignupOutcome::Created
    }

    pub fn message(self) -> &'static str {
        match self {
            SignupOutcome::Created => "회원가입이 완료되었습니다!",
            SignupOutcome::DuplicateEmail => "이미 가입된 이메일입니다.",
        }
    }
}

/// Result of [`AccountStore::login`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    UnknownAccount,
    WrongPassword,
}

impl LoginOutcome {
    pub fn success(self) -> bool {
        self == LoginOutcome::LoggedIn
    }

    pub fn message(self) -> &'static str {
        match self {
            LoginOutcome::LoggedIn => "로그인 되었습니다!",
            LoginOutcome::UnknownAccount => "가입된 정보가 없습니다.",
            LoginOutcome::WrongPassword => "비밀번호가 일치하지 않습니다.",
        }
    }
}

/// The `{success, message}` shape callers branch on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    pub message: String,
}

impl From<SignupOutcome> for AuthResult {
    fn from(outcome: SignupOutcome) -> Self {
        Self {
            success: outcome.success(),
            message: outcome.message().to_string(),
        }
    }
}

impl From<LoginOutcome> for AuthResult {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            success: outcome.success(),
            message: outcome.message().to_string(),
        }
    }
}

/// Account list persisted under `coffeechat_users`.
#[derive(Debug)]
pub struct AccountStore {
    storage: Arc<dyn KeyValueStorage>,
    accounts: Mutex<Vec<Account>>,
    events: broadcast::Sender<StoreEvent>,
}

impl AccountStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            accounts: Mutex::new(Vec::new()),
            events: event_channel(),
        }
    }

    /// Replace the in-memory list with the stored one.
    pub fn reload(&self) -> Result<()> {
        self.with_accounts(|_| Ok(()))
    }

    /// Register an account. Emails are compared exactly.
    pub fn signup(&self, email: &str, password: &str) -> Result<SignupOutcome> {
        let outcome = self.with_accounts(|accounts| {
            if accounts.iter().any(|a| a.email == email) {
                return Ok(SignupOutcome::DuplicateEmail);
            }
            accounts.push(Account {
                email: email.to_string(),
                password: password.to_string(),
            });
            save_list(self.storage.as_ref(), USERS_KEY, accounts.as_slice())?;
            Ok(SignupOutcome::Created)
        })?;

        if outcome.success() {
            tracing::info!(email = %email, "Demo account created");
            metrics::record_store_mutation("account_signup");
            publish(&self.events, StoreEvent::AccountCreated { email: email.to_string() });
        }
        Ok(outcome)
    }

    /// Check credentials. Never mutates the store.
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        self.with_accounts(|accounts| {
            Ok(match accounts.iter().find(|a| a.email == email) {
                None => LoginOutcome::UnknownAccount,
                Some(a) if a.password != password => LoginOutcome::WrongPassword,
                Some(_) => LoginOutcome::LoggedIn,
            })
        })
    }

    /// Snapshot of every account (debugging).
    pub fn all_accounts(&self) -> Result<Vec<Account>> {
        self.with_accounts(|accounts| Ok(accounts.clone()))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn with_accounts<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Account>) -> Result<T>,
    {
        let mut accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        *accounts = load_list(self.storage.as_ref(), USERS_KEY)?;
        f(&mut *accounts)
    }
}
