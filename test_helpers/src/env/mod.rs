//! Guards for mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant lock and returns an
//! [`EnvVarGuard`] that restores the variable's previous state when dropped.
//! Guards for the same key restore in LIFO order. Hold [`lock`] (or build an
//! [`EnvScope`]) when a test must keep other threads out for longer than a
//! single mutation.
//!
//! ```
//! use fieldflags_test_helpers::env;
//!
//! let _g = env::set_var("FIELDFLAGS_DOC_PORT", "8080");
//! assert_eq!(std::env::var("FIELDFLAGS_DOC_PORT").as_deref(), Ok("8080"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};


static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl EnvVarGuard {
    /// Name of the guarded variable.
    #[must_use]
    pub const fn key(&self) -> &str {
        self.key.as_str()
    }
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        let original = self.original.take();
        // SAFETY: `ENV_MUTEX` is held.
        unsafe { apply(&self.key, original.as_deref()) };
    }
}

/// Holds the environment lock until dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` while this lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        set_var(key, value)
    }

    /// Removes `key` while this lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        remove_var(key)
    }
}

/// Holds the environment lock together with a set of guards.
///
/// The guards are restored before the lock is released.
///
/// ```
/// use fieldflags_test_helpers::env;
///
/// let _scope = env::scope([
///     ("FIELDFLAGS_DOC_HOST", Some("example.org")),
///     ("FIELDFLAGS_DOC_UNSET", None),
/// ]);
/// assert!(std::env::var("FIELDFLAGS_DOC_UNSET").is_err());
/// ```
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse so repeated keys unwind to their first original.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    mutate(key.into(), Some(value.as_ref()))
}

/// Removes an environment variable and returns a guard restoring its prior value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    mutate(key.into(), None)
}

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        _guard: ENV_MUTEX.lock(),
    }
}

/// Applies every `(key, value)` pair under the lock, removing keys whose
/// value is `None`, and keeps the lock until the scope is dropped.
pub fn scope<I, K, V>(vars: I) -> EnvScope
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: AsRef<OsStr>,
{
    let held = lock();
    let guards = vars
        .into_iter()
        .map(|(key, value)| match value {
            Some(text) => held.set_var(key, text),
            None => held.remove_var(key),
        })
        .collect();
    EnvScope {
        guards,
        _lock: held,
    }
}

fn mutate(key: String, value: Option<&OsStr>) -> EnvVarGuard {
    let _guard = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    // SAFETY: `ENV_MUTEX` is held.
    unsafe { apply(&key, value) };
    EnvVarGuard { key, original }
}

/// Sets or removes `key`.
///
/// # Safety
///
/// The caller must hold `ENV_MUTEX`.
unsafe fn apply(key: &str, value: Option<&OsStr>) {
    match value {
        // SAFETY: forwarded from the caller.
        Some(text) => unsafe { env::set_var(key, text) },
        // SAFETY: forwarded from the caller.
        None => unsafe { env::remove_var(key) },
    }
}
