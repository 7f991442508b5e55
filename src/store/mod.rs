/// Persistent storage access.
///
/// Narrow, query-shaped interfaces over the PostgreSQL pool. Uniqueness of
/// usernames, emails, and blacklisted tokens is enforced by constraints in
/// the schema, so concurrent inserts cannot race past a service-level check.

pub mod accounts;
pub mod blacklist;

pub use accounts::Account;
pub use accounts::AccountPublic;
pub use accounts::NewAccount;
