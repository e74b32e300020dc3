use pretty_assertions::assert_eq;
use tablemap::{params, Record, Row, Value};
use tests::{player, MockDb, StoreOp};

#[test]
fn insert_update_delete_scenario() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    let mut record = Record::from_values(
        &entity,
        [("id", Value::I64(1)), ("name", Value::from("a"))],
    )
    .unwrap();

    record.insert(&mock.db).unwrap();
    assert_eq!(
        mock.log.pop(),
        Some(StoreOp::Insert {
            table: "player".to_string(),
            values: vec![
                ("id".to_string(), Value::I64(1)),
                ("name".to_string(), Value::from("a")),
                ("score".to_string(), Value::F64(0.0)),
            ],
        })
    );

    // The default used for the insert is kept on the record
    assert_eq!(record.get("score").unwrap(), &Value::F64(0.0));

    record.set("score", 9.5).unwrap();
    record.update(&mock.db).unwrap();
    assert_eq!(
        mock.log.pop(),
        Some(StoreOp::Update {
            sql: "update player set name=?, score=? where id=?".to_string(),
            params: vec![Value::from("a"), Value::F64(9.5), Value::I64(1)],
        })
    );

    let deleted = record.delete(&mock.db).unwrap();
    assert_eq!(
        mock.log.pop(),
        Some(StoreOp::Update {
            sql: "delete from player where id=?".to_string(),
            params: vec![Value::I64(1)],
        })
    );

    // The deleted record still holds its values
    assert_eq!(deleted.get("name").unwrap(), &Value::from("a"));
    assert!(mock.log.is_empty());
}

#[test]
fn insert_skips_non_insertable_columns() {
    let mock = MockDb::new([tablemap::Entity::builder("Event")
        .field("id", tablemap::Field::integer().primary_key())
        .field("created", tablemap::Field::float().insertable(false))
        .field("kind", tablemap::Field::string().name("event_kind"))]);
    let entity = mock.entity("Event");

    let mut record = Record::new(&entity);
    record.set("id", 3).unwrap();
    record.insert(&mock.db).unwrap();

    mock.log.with_ops(|ops| {
        assert_eq!(
            ops,
            [StoreOp::Insert {
                table: "event".to_string(),
                values: vec![
                    ("id".to_string(), Value::I64(3)),
                    ("event_kind".to_string(), Value::from("")),
                ],
            }]
        );
    });
    assert!(!record.contains("created"));
}

#[test]
fn update_excludes_primary_key_and_non_updatable_columns() {
    let mut mock = MockDb::new([tablemap::Entity::builder("Account")
        .field("id", tablemap::Field::string().primary_key())
        .field("email", tablemap::Field::string().updatable(false))
        .field("balance", tablemap::Field::integer())]);
    let entity = mock.entity("Account");

    let mut record = Record::from_values(
        &entity,
        [("id", Value::from("acct-1")), ("balance", Value::I64(10))],
    )
    .unwrap();
    record.update(&mock.db).unwrap();

    let op = mock.log.pop().unwrap();
    assert_eq!(op.sql(), Some("update account set balance=? where id=?"));
    assert_eq!(op.params(), [Value::I64(10), Value::from("acct-1")]);
}

#[test]
fn update_fills_unset_columns_from_defaults() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    let mut record = Record::new(&entity);
    record.set("id", 7).unwrap();
    record.update(&mock.db).unwrap();

    let op = mock.log.pop().unwrap();
    assert_eq!(op.params(), [Value::from(""), Value::F64(0.0), Value::I64(7)]);
    assert_eq!(record.get("name").unwrap(), &Value::from(""));
}

#[test]
fn update_and_delete_require_primary_key() {
    let mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    let mut record = Record::new(&entity);
    record.set("name", "a").unwrap();

    let err = record.update(&mock.db).unwrap_err();
    assert!(err.is_attribute_not_set());

    let err = record.delete(&mock.db).unwrap_err();
    assert!(err.is_attribute_not_set());

    assert!(mock.log.is_empty());
}

#[test]
fn get_on_empty_table_is_none() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    let found = mock.db.get(&entity, 42).unwrap();
    assert!(found.is_none());

    assert_eq!(
        mock.log.pop(),
        Some(StoreOp::SelectOne {
            sql: "select * from player where id=?".to_string(),
            params: vec![Value::I64(42)],
        })
    );
}

#[test]
fn get_maps_row_to_record() {
    let mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    mock.responses.push_rows([Row::from_iter([
        ("id", Value::I64(1)),
        ("name", Value::from("a")),
        ("score", Value::F64(9.5)),
    ])]);

    let record = mock.db.get(&entity, 1).unwrap().unwrap();
    assert_eq!(record.get_as::<i64>("id").unwrap(), 1);
    assert_eq!(record.get_as::<String>("name").unwrap(), "a");
    assert_eq!(record.get_as::<f64>("score").unwrap(), 9.5);
}

#[test]
fn find_by_binds_parameters() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    mock.responses.push_rows([
        Row::from_iter([("id", 1), ("score", 6)]),
        Row::from_iter([("id", 2), ("score", 8)]),
    ]);

    let records = mock
        .db
        .find_by(&entity, "where score > ?", params![5.0])
        .unwrap();

    let ids: Vec<i64> = records
        .iter()
        .map(|record| record.get_as("id").unwrap())
        .collect();
    assert_eq!(ids, [1, 2]);

    let op = mock.log.pop().unwrap();
    assert_eq!(op.sql(), Some("select * from player where score > ?"));
    assert_eq!(op.params(), [Value::F64(5.0)]);
}

#[test]
fn find_first_and_find_all() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    assert!(mock
        .db
        .find_first(&entity, "where name = ?", params!["nobody"])
        .unwrap()
        .is_none());

    mock.responses
        .push_rows([Row::from_iter([("id", 2)]), Row::from_iter([("id", 1)])]);
    let all = mock.db.find_all(&entity).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].get("id").unwrap(), &Value::I64(2));

    assert_eq!(
        mock.log.pop().unwrap().sql(),
        Some("select * from player where name = ?")
    );
    assert_eq!(mock.log.pop().unwrap().sql(), Some("select * from player"));
}

#[test]
fn count_all_by_primary_key() {
    let mut mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    mock.responses.push(tests::Response::Int(3));
    assert_eq!(mock.db.count_all(&entity).unwrap(), 3);

    assert_eq!(
        mock.log.pop(),
        Some(StoreOp::SelectInt {
            sql: "select count(id) from player".to_string(),
            params: vec![],
        })
    );
}

#[test]
fn rows_map_columns_back_to_attributes() {
    let mock = MockDb::new([tablemap::Entity::builder("User")
        .field("id", tablemap::Field::integer().primary_key())
        .field("email", tablemap::Field::string().name("email_address"))
        .field("admin", tablemap::Field::boolean())]);
    let entity = mock.entity("User");

    mock.responses.push_rows([Row::from_iter([
        ("id", Value::I64(1)),
        ("email_address", Value::from("a@example.com")),
        ("admin", Value::I64(1)),
        ("legacy", Value::from("dropped")),
    ])]);

    let record = mock.db.get(&entity, 1).unwrap().unwrap();
    assert_eq!(record.get("email").unwrap(), &Value::from("a@example.com"));
    assert_eq!(record.get("admin").unwrap(), &Value::Bool(true));
    assert_eq!(record.iter().count(), 3);
}

#[test]
fn store_errors_propagate_unchanged() {
    let mock = MockDb::new([player()]);
    let entity = mock.entity("Player");

    let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
    mock.responses
        .push(tests::Response::Error(tablemap::Error::driver_operation_failed(io)));

    let err = mock.db.find_all(&entity).unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert_eq!(err.to_string(), "connection reset");
}
