use tablemap::{Entity, Field, Record};
use tests::{ExecLog, LoggingStore};

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// Records, for each hook call, how many store calls had been made.
#[derive(Default, Clone)]
struct Calls {
    log: Arc<Mutex<Vec<(&'static str, usize)>>>,
}

impl Calls {
    fn hook(&self, name: &'static str, exec_log: ExecLog) -> impl Fn() + Send + Sync + 'static {
        let log = self.log.clone();
        move || log.lock().unwrap().push((name, exec_log.len()))
    }

    fn take(&self) -> Vec<(&'static str, usize)> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

#[test]
fn hooks_fire_once_before_their_statement() {
    tests::init_logging();

    let store = LoggingStore::canned();
    let exec_log = store.exec_log();
    let calls = Calls::default();

    let mut builder = tablemap::Db::builder();
    builder.register(
        Entity::builder("Player")
            .field("id", Field::integer().primary_key())
            .field("name", Field::string())
            .pre_insert(calls.hook("insert", exec_log.clone()))
            .pre_update(calls.hook("update", exec_log.clone()))
            .pre_delete(calls.hook("delete", exec_log.clone())),
    );
    let db = builder.build(store).unwrap();
    let entity = db.entity("Player").unwrap().clone();

    let mut record = Record::new(&entity);
    record.set("id", 1).unwrap();

    record.insert(&db).unwrap();
    assert_eq!(calls.take(), [("insert", 0)]);

    record.update(&db).unwrap();
    assert_eq!(calls.take(), [("update", 1)]);

    record.delete(&db).unwrap();
    assert_eq!(calls.take(), [("delete", 2)]);

    assert_eq!(exec_log.len(), 3);
}

#[test]
fn absent_hooks_are_skipped() {
    let mock = tests::MockDb::new([tests::player()]);
    let entity = mock.entity("Player");

    let mut record = Record::new(&entity);
    record.set("id", 1).unwrap();
    record.insert(&mock.db).unwrap();

    assert!(mock.log.has_insert());
}

#[test]
fn update_without_updatable_columns_fires_no_hook() {
    let store = LoggingStore::canned();
    let exec_log = store.exec_log();
    let fired = Arc::new(AtomicUsize::new(0));

    let mut builder = tablemap::Db::builder();
    builder.register(
        Entity::builder("Tag")
            .field("id", Field::integer().primary_key())
            .pre_update({
                let fired = fired.clone();
                move || {
                    fired.fetch_add(1, Ordering::SeqCst);
                }
            }),
    );
    let db = builder.build(store).unwrap();
    let entity = db.entity("Tag").unwrap().clone();

    let mut record = Record::new(&entity);
    record.set("id", 1).unwrap();

    let err = record.update(&db).unwrap_err();
    assert!(err.to_string().contains("no updatable attributes"));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(!exec_log.has_update());
}
