use tablemap::{Db, Entity, Field};
use tests::{player, LoggingStore};

#[test]
fn build_fails_on_invalid_entity() {
    let mut builder = Db::builder();
    builder
        .register(player())
        .register(Entity::builder("Comment").field("body", Field::text()));

    let err = builder.build(LoggingStore::canned()).unwrap_err();
    assert!(err.is_invalid_schema());
    assert_eq!(
        err.to_string(),
        "invalid schema: primary key not defined in entity `Comment`"
    );
}

#[test]
fn build_fails_on_duplicate_entity() {
    let mut builder = Db::builder();
    builder.register(player()).register(player());

    let err = builder.build(LoggingStore::canned()).unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("`Player` is registered more than once"));
}

#[test]
fn unknown_and_unset_attributes() {
    let mock = tests::MockDb::new([player()]);
    let entity = mock.entity("Player");

    let mut record = tablemap::Record::new(&entity);
    assert!(record.get("name").unwrap_err().is_attribute_not_set());
    assert!(record.try_get("name").is_none());

    assert!(record.get("rank").unwrap_err().is_unknown_column());
    assert!(record.set("rank", 1).unwrap_err().is_unknown_column());

    let err = tablemap::Record::from_values(&entity, [("rank", 1)]).unwrap_err();
    assert!(err.is_unknown_column());
    assert_eq!(err.to_string(), "unknown column `rank` on entity `Player`");

    record.set("name", "a").unwrap();
    assert!(record.contains("name"));
    assert!(record.get_as::<i64>("name").unwrap_err().is_type_conversion());
}

#[test]
fn entity_lookup() {
    let mock = tests::MockDb::new([player()]);

    assert!(mock.db.entity("Player").is_some());
    assert!(mock.db.entity("player").is_none());
    assert_eq!(mock.db.entities().len(), 1);
}
