use rentbook_core::db::open_db_in_memory;
use rentbook_core::{
    AccountRegistry, GroupRepository, Registration, RegistrationValidationError, RepoError, Role,
    SqliteAccountRepository, SqliteGroupRepository, UserId,
};
use rusqlite::Connection;

#[test]
fn tenant_repeat_registration_returns_same_id_without_duplicates() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    register_landlord(&registry, "555-0001", "Bob", "pw");

    let first = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();
    let second = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(user_count(&conn, "555-0002"), 1);
}

#[test]
fn landlord_login_requires_matching_password() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    let id = register_landlord(&registry, "555-0001", "Bob", "pw-x");

    let err = registry
        .register_or_login(&Registration::landlord("555-0001", "Bob", "pw-y"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Authentication { phone } if phone == "555-0001"));

    let again = registry
        .register_or_login(&Registration::landlord("555-0001", "Bob", "pw-x"))
        .unwrap();
    assert_eq!(again, id);
}

#[test]
fn landlord_registration_without_password_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);

    let mut request = Registration::landlord("555-0001", "Bob", "pw");
    request.password = None;
    let err = registry.register_or_login(&request).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RegistrationValidationError::MissingLandlordPassword)
    ));
    assert_eq!(user_count(&conn, "555-0001"), 0);
}

#[test]
fn tenant_registration_requires_resolvable_landlord() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    register_landlord(&registry, "555-0001", "Bob", "pw");
    registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();

    // Unknown phone.
    let err = registry
        .register_or_login(&Registration::tenant("555-0003", "Cal", "555-9999"))
        .unwrap_err();
    assert!(matches!(err, RepoError::LandlordNotFound(phone) if phone == "555-9999"));

    // Phone resolves, but to a tenant.
    let err = registry
        .register_or_login(&Registration::tenant("555-0003", "Cal", "555-0002"))
        .unwrap_err();
    assert!(matches!(err, RepoError::LandlordNotFound(phone) if phone == "555-0002"));

    assert_eq!(user_count(&conn, "555-0003"), 0);
}

#[test]
fn first_landlord_registration_bootstraps_home_group() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    let groups = SqliteGroupRepository::new(&conn);
    let landlord_id = register_landlord(&registry, "555-0001", "Bob", "pw");

    let group_id = groups.group_for_owner(landlord_id).unwrap().unwrap();

    let members = groups.members(group_id).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, landlord_id);
    assert_eq!(members[0].name, "Bob");

    let listed = groups.list_groups().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Group of Bob");

    // Repeat login must not bootstrap a second group.
    register_landlord(&registry, "555-0001", "Bob", "pw");
    assert_eq!(groups.list_groups().unwrap().len(), 1);
}

#[test]
fn tenant_accounts_link_to_their_landlord() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    let landlord_id = register_landlord(&registry, "555-0001", "Bob", "pw");
    let tenant_id = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();

    let tenant = registry.get_user(tenant_id).unwrap().unwrap();
    assert_eq!(tenant.role, Role::Tenant);
    assert_eq!(tenant.landlord_id, Some(landlord_id));

    let by_phone = registry.get_user_by_phone("555-0002").unwrap().unwrap();
    assert_eq!(by_phone.id, tenant_id);

    assert!(registry.get_user(9999).unwrap().is_none());
    assert!(registry.get_user_by_phone("555-9999").unwrap().is_none());
}

#[test]
fn update_profile_writes_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let registry = registry(&conn);
    let id = register_landlord(&registry, "555-0001", "Bob", "pw");

    registry
        .update_profile(id, Some("Robert"), None)
        .unwrap();
    let user = registry.get_user(id).unwrap().unwrap();
    assert_eq!(user.name, "Robert");
    assert_eq!(user.profile_pic, None);

    registry
        .update_profile(id, None, Some("avatars/bob.png"))
        .unwrap();
    let user = registry.get_user(id).unwrap().unwrap();
    assert_eq!(user.name, "Robert");
    assert_eq!(user.profile_pic.as_deref(), Some("avatars/bob.png"));

    // Empty strings leave fields unchanged.
    registry.update_profile(id, Some(""), Some("")).unwrap();
    let user = registry.get_user(id).unwrap().unwrap();
    assert_eq!(user.name, "Robert");
    assert_eq!(user.profile_pic.as_deref(), Some("avatars/bob.png"));

    let err = registry
        .update_profile(9999, Some("Nobody"), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::UserNotFound(9999)));
}

fn registry(conn: &Connection) -> AccountRegistry<SqliteAccountRepository<'_>> {
    AccountRegistry::new(SqliteAccountRepository::new(conn))
}

fn register_landlord(
    registry: &AccountRegistry<SqliteAccountRepository<'_>>,
    phone: &str,
    name: &str,
    password: &str,
) -> UserId {
    registry
        .register_or_login(&Registration::landlord(phone, name, password))
        .unwrap()
}

fn user_count(conn: &Connection, phone: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM users WHERE phone = ?1;",
        [phone],
        |row| row.get(0),
    )
    .unwrap()
}
