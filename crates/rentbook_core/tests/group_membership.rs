use rentbook_core::db::open_db_in_memory;
use rentbook_core::{
    AccountRegistry, GroupDirectory, LandlordCapability, Registration, RepoError,
    SqliteAccountRepository, SqliteGroupRepository, UserId,
};
use rusqlite::Connection;
use std::collections::HashSet;

#[test]
fn capability_is_issued_only_to_landlords() {
    let conn = open_db_in_memory().unwrap();
    let (landlord_id, tenant_id) = seed_accounts(&conn);
    let accounts = SqliteAccountRepository::new(&conn);

    let auth = LandlordCapability::verify(&accounts, landlord_id).unwrap();
    assert_eq!(auth.landlord_id(), landlord_id);

    let err = LandlordCapability::verify(&accounts, tenant_id).unwrap_err();
    assert!(matches!(err, RepoError::RoleDenied(id) if id == tenant_id));

    let err = LandlordCapability::verify(&accounts, 9999).unwrap_err();
    assert!(matches!(err, RepoError::UserNotFound(9999)));
}

#[test]
fn create_group_is_owned_by_the_verified_landlord() {
    let conn = open_db_in_memory().unwrap();
    let (landlord_id, tenant_id) = seed_accounts(&conn);
    let accounts = SqliteAccountRepository::new(&conn);
    let directory = GroupDirectory::new(SqliteGroupRepository::new(&conn));

    let auth = LandlordCapability::verify(&accounts, landlord_id).unwrap();
    let group_id = directory.create_group(&auth, "Block A").unwrap();

    directory.add_member(&auth, group_id, landlord_id).unwrap();
    directory.add_member(&auth, group_id, tenant_id).unwrap();

    let names: HashSet<String> = directory
        .members(group_id)
        .unwrap()
        .into_iter()
        .map(|member| member.name)
        .collect();
    assert_eq!(names, HashSet::from(["Bob".to_string(), "Ann".to_string()]));
}

#[test]
fn re_adding_a_member_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let (landlord_id, tenant_id) = seed_accounts(&conn);
    let accounts = SqliteAccountRepository::new(&conn);
    let directory = GroupDirectory::new(SqliteGroupRepository::new(&conn));

    let auth = LandlordCapability::verify(&accounts, landlord_id).unwrap();
    let group_id = directory.group_for_owner(landlord_id).unwrap().unwrap();

    directory.add_member(&auth, group_id, tenant_id).unwrap();
    directory.add_member(&auth, group_id, tenant_id).unwrap();
    directory.add_member(&auth, group_id, tenant_id).unwrap();

    // Owner from the bootstrap plus the tenant, exactly once each.
    assert_eq!(directory.members(group_id).unwrap().len(), 2);
}

#[test]
fn listing_covers_bootstrap_and_manual_groups() {
    let conn = open_db_in_memory().unwrap();
    let (landlord_id, tenant_id) = seed_accounts(&conn);
    let accounts = SqliteAccountRepository::new(&conn);
    let directory = GroupDirectory::new(SqliteGroupRepository::new(&conn));

    let auth = LandlordCapability::verify(&accounts, landlord_id).unwrap();
    directory.create_group(&auth, "Block A").unwrap();

    let names: HashSet<String> = directory
        .list_groups()
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(
        names,
        HashSet::from(["Group of Bob".to_string(), "Block A".to_string()])
    );

    assert!(directory.group_for_owner(tenant_id).unwrap().is_none());
}

fn seed_accounts(conn: &Connection) -> (UserId, UserId) {
    let registry = AccountRegistry::new(SqliteAccountRepository::new(conn));
    let landlord_id = registry
        .register_or_login(&Registration::landlord("555-0001", "Bob", "pw"))
        .unwrap();
    let tenant_id = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();
    (landlord_id, tenant_id)
}
