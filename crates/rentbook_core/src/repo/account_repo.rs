//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the unified register-or-login path keyed by phone.
//! - Bootstrap each landlord's home group at first registration.
//! - Provide account lookup and partial profile updates.
//!
//! # Invariants
//! - Registration and the group bootstrap run in one `IMMEDIATE`
//!   transaction; a landlord can never exist without their group row.
//! - Duplicate-phone races are resolved by attempting the insert and
//!   falling back to lookup on a uniqueness violation. This shape is the
//!   only defense against duplicate accounts under concurrent first-time
//!   registration and must not be reordered into check-then-insert.
//! - Stored passwords never leave this module.

use crate::model::user::{Registration, Role, User, UserId};
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const USER_SELECT_SQL: &str = "SELECT
    id,
    phone,
    name,
    profile_pic,
    role,
    landlord_id
FROM users";

/// Repository interface for account identity operations.
pub trait AccountRepository {
    /// Registers a new account or logs into an existing one, keyed by
    /// phone. Returns the account id in both outcomes.
    fn register_or_login(&self, request: &Registration) -> RepoResult<UserId>;
    /// Gets one account by id.
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Gets one account by its phone natural key.
    fn get_user_by_phone(&self, phone: &str) -> RepoResult<Option<User>>;
    /// Partially updates display name and/or profile picture. Absent or
    /// empty fields are left unchanged.
    fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        profile_pic: Option<&str>,
    ) -> RepoResult<()>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn register_or_login(&self, request: &Registration) -> RepoResult<UserId> {
        request.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let landlord_id = match request.role {
            Role::Tenant => {
                let landlord_phone = request
                    .landlord_phone
                    .as_deref()
                    .unwrap_or_default();
                Some(resolve_landlord(&tx, landlord_phone)?)
            }
            Role::Landlord => None,
        };

        let inserted = tx.execute(
            "INSERT INTO users (phone, name, password, role, landlord_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                request.phone.as_str(),
                request.name.as_str(),
                request.password.as_deref(),
                role_to_db(request.role),
                landlord_id,
            ],
        );

        let user_id = match inserted {
            Ok(_) => {
                let user_id = tx.last_insert_rowid();
                if request.role == Role::Landlord {
                    ensure_owner_group(&tx, user_id, request.name.as_str())?;
                }
                info!(
                    "event=account_register module=repo status=ok outcome=new role={} user_id={user_id}",
                    role_to_db(request.role)
                );
                user_id
            }
            Err(err) if is_unique_violation(&err) => {
                // Phone already registered: this call is a login.
                let (user_id, stored_password): (UserId, Option<String>) = tx.query_row(
                    "SELECT id, password FROM users WHERE phone = ?1;",
                    [request.phone.as_str()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )?;

                if request.role == Role::Landlord
                    && stored_password.as_deref() != request.password.as_deref()
                {
                    return Err(RepoError::Authentication {
                        phone: request.phone.clone(),
                    });
                }

                info!(
                    "event=account_register module=repo status=ok outcome=login role={} user_id={user_id}",
                    role_to_db(request.role)
                );
                user_id
            }
            Err(err) => return Err(err.into()),
        };

        tx.commit()?;
        Ok(user_id)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn get_user_by_phone(&self, phone: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE phone = ?1;"))?;
        let mut rows = stmt.query([phone])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }
        Ok(None)
    }

    fn update_profile(
        &self,
        id: UserId,
        name: Option<&str>,
        profile_pic: Option<&str>,
    ) -> RepoResult<()> {
        if !user_exists(self.conn, id)? {
            return Err(RepoError::UserNotFound(id));
        }

        if let Some(name) = name.filter(|value| !value.is_empty()) {
            self.conn.execute(
                "UPDATE users SET name = ?1 WHERE id = ?2;",
                params![name, id],
            )?;
        }
        if let Some(profile_pic) = profile_pic.filter(|value| !value.is_empty()) {
            self.conn.execute(
                "UPDATE users SET profile_pic = ?1 WHERE id = ?2;",
                params![profile_pic, id],
            )?;
        }

        Ok(())
    }
}

/// Resolves a landlord account by phone inside the registration
/// transaction.
fn resolve_landlord(tx: &Transaction<'_>, landlord_phone: &str) -> RepoResult<UserId> {
    let row: Option<(UserId, String)> = tx
        .query_row(
            "SELECT id, role FROM users WHERE phone = ?1;",
            [landlord_phone],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    match row {
        Some((id, role)) if parse_role(&role) == Some(Role::Landlord) => Ok(id),
        _ => Err(RepoError::LandlordNotFound(landlord_phone.to_string())),
    }
}

/// Creates the landlord's home group and owner membership unless a group
/// already exists for this owner.
fn ensure_owner_group(tx: &Transaction<'_>, owner_id: UserId, owner_name: &str) -> RepoResult<()> {
    let existing: Option<i64> = tx
        .query_row(
            "SELECT id FROM groups WHERE owner_id = ?1;",
            [owner_id],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(());
    }

    tx.execute(
        "INSERT INTO groups (name, owner_id) VALUES (?1, ?2);",
        params![format!("Group of {owner_name}"), owner_id],
    )?;
    let group_id = tx.last_insert_rowid();
    tx.execute(
        "INSERT OR IGNORE INTO group_members (group_id, user_id) VALUES (?1, ?2);",
        params![group_id, owner_id],
    )?;

    Ok(())
}

pub(crate) fn user_exists(conn: &Connection, id: UserId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let role_text: String = row.get("role")?;
    let role = parse_role(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role value `{role_text}` in users.role"))
    })?;

    Ok(User {
        id: row.get("id")?,
        phone: row.get("phone")?,
        name: row.get("name")?,
        profile_pic: row.get("profile_pic")?,
        role,
        landlord_id: row.get("landlord_id")?,
    })
}

pub(crate) fn role_to_db(role: Role) -> &'static str {
    match role {
        Role::Landlord => "landlord",
        Role::Tenant => "tenant",
    }
}

pub(crate) fn parse_role(value: &str) -> Option<Role> {
    match value {
        "landlord" => Some(Role::Landlord),
        "tenant" => Some(Role::Tenant),
        _ => None,
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
