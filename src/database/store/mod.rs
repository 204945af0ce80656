//! Parameterized CRUD primitives, one module per entity table.
//!
//! Every function takes `impl PgExecutor<'_>` so the same primitive runs
//! against the pool directly or inside a service-owned transaction.

pub mod channels;
pub mod direct_messages;
pub mod users;
pub mod workspaces;

/// True when the error is a Postgres unique-constraint violation
/// (SQLSTATE 23505). The constraints are the source of truth for
/// "already exists" races, so services map this onto their Conflict kind.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
