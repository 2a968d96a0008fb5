use rentbook_core::db::open_db_in_memory;
use rentbook_core::{
    AccountRegistry, LandlordCapability, Registration, RepoError, SqliteAccountRepository,
    SqliteStatusRepository, StatusBoard, UserId,
};
use rusqlite::Connection;

#[test]
fn landlord_posts_reach_their_tenants() {
    let conn = open_db_in_memory().unwrap();
    let (bob, ann) = seed_building(&conn);
    let board = board(&conn);

    let auth = LandlordCapability::verify(&SqliteAccountRepository::new(&conn), bob).unwrap();
    board.post(&auth, "No water 2pm-4pm").unwrap();

    let tenant_feed = board.feed_for(ann).unwrap();
    assert_eq!(tenant_feed.len(), 1);
    assert_eq!(tenant_feed[0].text, "No water 2pm-4pm");
    assert_eq!(tenant_feed[0].author_name, "Bob");

    // The landlord reads their own feed; same entries.
    assert_eq!(board.feed_for(bob).unwrap(), tenant_feed);
}

#[test]
fn feed_is_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let (bob, ann) = seed_building(&conn);
    let board = board(&conn);

    let auth = LandlordCapability::verify(&SqliteAccountRepository::new(&conn), bob).unwrap();
    board.post(&auth, "first").unwrap();
    board.post(&auth, "second").unwrap();
    board.post(&auth, "third").unwrap();

    let feed = board.feed_for(ann).unwrap();
    let texts: Vec<&str> = feed.iter().map(|entry| entry.text.as_str()).collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[test]
fn feeds_are_scoped_to_the_viewers_landlord() {
    let conn = open_db_in_memory().unwrap();
    let registry = AccountRegistry::new(SqliteAccountRepository::new(&conn));
    let bob = registry
        .register_or_login(&Registration::landlord("555-0001", "Bob", "pw"))
        .unwrap();
    let dee = registry
        .register_or_login(&Registration::landlord("555-0100", "Dee", "pw"))
        .unwrap();
    let ann = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();
    let cal = registry
        .register_or_login(&Registration::tenant("555-0102", "Cal", "555-0100"))
        .unwrap();

    let accounts = SqliteAccountRepository::new(&conn);
    let board = board(&conn);
    let bob_auth = LandlordCapability::verify(&accounts, bob).unwrap();
    let dee_auth = LandlordCapability::verify(&accounts, dee).unwrap();
    board.post(&bob_auth, "bin day moved to Friday").unwrap();
    board.post(&dee_auth, "elevator maintenance").unwrap();

    let ann_feed = board.feed_for(ann).unwrap();
    assert_eq!(ann_feed.len(), 1);
    assert_eq!(ann_feed[0].text, "bin day moved to Friday");

    let cal_feed = board.feed_for(cal).unwrap();
    assert_eq!(cal_feed.len(), 1);
    assert_eq!(cal_feed[0].author_name, "Dee");
}

#[test]
fn unknown_viewer_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    seed_building(&conn);
    let board = board(&conn);

    let err = board.feed_for(9999).unwrap_err();
    assert!(matches!(err, RepoError::UserNotFound(9999)));
}

#[test]
fn tenants_cannot_obtain_a_posting_capability() {
    let conn = open_db_in_memory().unwrap();
    let (_, ann) = seed_building(&conn);

    let err =
        LandlordCapability::verify(&SqliteAccountRepository::new(&conn), ann).unwrap_err();
    assert!(matches!(err, RepoError::RoleDenied(id) if id == ann));
}

fn board(
    conn: &Connection,
) -> StatusBoard<SqliteStatusRepository<'_>, SqliteAccountRepository<'_>> {
    StatusBoard::new(
        SqliteStatusRepository::new(conn),
        SqliteAccountRepository::new(conn),
    )
}

fn seed_building(conn: &Connection) -> (UserId, UserId) {
    let registry = AccountRegistry::new(SqliteAccountRepository::new(conn));
    let bob = registry
        .register_or_login(&Registration::landlord("555-0001", "Bob", "pw"))
        .unwrap();
    let ann = registry
        .register_or_login(&Registration::tenant("555-0002", "Ann", "555-0001"))
        .unwrap();
    (bob, ann)
}
