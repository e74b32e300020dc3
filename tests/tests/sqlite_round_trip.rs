#![cfg(feature = "sqlite")]

use pretty_assertions::assert_eq;
use tablemap::{params, Db, Entity, Field, Record, Sqlite, Value};
use tests::{init_logging, player, LoggingStore};

fn connect() -> Db {
    init_logging();

    let mut builder = Db::builder();
    builder.register(player()).register(
        Entity::builder("User")
            .field("id", Field::string().ddl("varchar(50)").primary_key())
            .field("email", Field::string().name("email_address").nullable(true))
            .field("admin", Field::boolean())
            .field("avatar", Field::blob()),
    );

    let db = builder.connect("sqlite::memory:").unwrap();
    db.create_tables().unwrap();
    db
}

#[test]
fn crud_round_trip() {
    let db = connect();
    let player = db.entity("Player").unwrap().clone();

    assert!(db.get(&player, 1).unwrap().is_none());
    assert_eq!(db.count_all(&player).unwrap(), 0);

    let mut record = Record::new(&player);
    record.set("id", 1).unwrap().set("name", "a").unwrap();
    record.insert(&db).unwrap();

    let loaded = db.get(&player, 1).unwrap().unwrap();
    assert_eq!(loaded.get("name").unwrap(), &Value::from("a"));
    assert_eq!(loaded.get("score").unwrap(), &Value::F64(0.0));

    record.set("score", 9.5).unwrap();
    record.update(&db).unwrap();

    let found = db.find_by(&player, "where score > ?", params![5.0]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_as::<f64>("score").unwrap(), 9.5);

    record.delete(&db).unwrap();
    assert!(db.get(&player, 1).unwrap().is_none());
    assert_eq!(db.count_all(&player).unwrap(), 0);
}

#[test]
fn renamed_columns_and_kinds_round_trip() {
    let db = connect();
    let user = db.entity("User").unwrap().clone();

    let mut record = Record::from_values(
        &user,
        [
            ("id", Value::from("u-1")),
            ("email", Value::from("a@example.com")),
            ("admin", Value::Bool(true)),
            ("avatar", Value::Bytes(vec![0xca, 0xfe])),
        ],
    )
    .unwrap();
    record.insert(&db).unwrap();

    let mut record = Record::new(&user);
    record.set("id", "u-2").unwrap().set("email", Value::Null).unwrap();
    record.insert(&db).unwrap();

    let loaded = db
        .find_first(&user, "where email_address = ?", params!["a@example.com"])
        .unwrap()
        .unwrap();
    assert_eq!(loaded.get_as::<String>("id").unwrap(), "u-1");
    assert!(loaded.get_as::<bool>("admin").unwrap());
    assert_eq!(loaded.get_as::<Vec<u8>>("avatar").unwrap(), [0xca, 0xfe]);

    let loaded = db.get(&user, "u-2").unwrap().unwrap();
    assert!(loaded.get("email").unwrap().is_null());
    assert_eq!(loaded.get("admin").unwrap(), &Value::Bool(false));

    let all = db.find_all(&user).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn constraint_violations_surface_as_driver_errors() {
    let db = connect();
    let player = db.entity("Player").unwrap().clone();

    let mut record = Record::new(&player);
    record.set("id", 1).unwrap();
    record.insert(&db).unwrap();

    let err = record.insert(&db).unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn statements_reach_the_wrapped_store() {
    init_logging();

    let store = LoggingStore::new(Sqlite::in_memory().unwrap());
    let exec_log = store.exec_log();

    let mut builder = Db::builder();
    builder.table_name_prefix("app_").register(player());
    let db = builder.build(store).unwrap();
    let player = db.entity("Player").unwrap().clone();

    assert_eq!(player.table_name(), "app_player");

    db.create_table(&player).unwrap();
    let mut record = Record::new(&player);
    record.set("id", 5).unwrap();
    record.insert(&db).unwrap();

    assert_eq!(db.count_all(&player).unwrap(), 1);
    assert_eq!(exec_log.len(), 3);
    assert!(exec_log.has_insert());
}

#[test]
fn unsupported_scheme() {
    let err = Db::connect("mysql://localhost/test").unwrap_err();
    assert!(err.is_invalid_connection_url());

    let err = Db::connect("not a url").unwrap_err();
    assert!(err.is_invalid_connection_url());
}
