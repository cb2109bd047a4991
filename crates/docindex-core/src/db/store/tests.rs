use super::*;
use crate::{db::query::Filter, value::Value};

fn email(value: &str) -> Vec<Property> {
    vec![Property::new("email", value)]
}

#[test]
fn committed_writes_are_visible_to_later_transactions() {
    let store = MemoryStore::default();
    let key = Key::name("user", "a");

    let mut tx = store.begin();
    tx.put(&key, email("a@example.com")).expect("put");
    assert_eq!(tx.get(&key).expect("read own write"), email("a@example.com"));
    assert!(!store.contains(&key));
    tx.commit().expect("commit");

    let mut tx = store.begin();
    assert_eq!(tx.get(&key).expect("get"), email("a@example.com"));
    assert_eq!(store.len(), 1);
}

#[test]
fn get_miss_is_not_found() {
    let store = MemoryStore::default();
    let mut tx = store.begin();

    let err = tx.get(&Key::id("user", 9)).expect_err("miss");
    assert!(err.is_not_found());
}

#[test]
fn insert_onto_occupied_key_fails_whole_batch() {
    let store = MemoryStore::default();
    let taken = Key::name("user", "a");
    store
        .run_in_transaction(|tx| tx.put(&taken, email("a@example.com")))
        .expect("seed");

    let mut tx = store.begin();
    let fresh = Key::name("user", "b");
    let err = tx
        .mutate(vec![
            Mutation::insert(fresh.clone(), email("b@example.com")),
            Mutation::insert(taken, email("c@example.com")),
        ])
        .expect_err("occupied");

    assert!(err.is_already_exists());
    assert_eq!(tx.pending_len(), 0);
    assert!(tx.get(&fresh).expect_err("not applied").is_not_found());
}

#[test]
fn update_requires_existing_row_and_delete_of_vacant_key_succeeds() {
    let store = MemoryStore::default();
    let mut tx = store.begin();
    let key = Key::id("user", 1);

    let err = tx
        .mutate(vec![Mutation::update(key.clone(), email("x"))])
        .expect_err("vacant");
    assert!(err.is_not_found());

    tx.delete(&key).expect("delete vacant");
}

#[test]
fn incomplete_keys_are_allocated_on_write() {
    let store = MemoryStore::new(StoreConfig::default().with_first_id(100));
    let mut tx = store.begin();

    let keys = tx
        .mutate(vec![
            Mutation::insert(Key::incomplete("user"), email("a")),
            Mutation::insert(Key::incomplete("user"), email("b")),
        ])
        .expect("insert");

    assert_eq!(keys, vec![Key::id("user", 100), Key::id("user", 101)]);
}

#[test]
fn allocate_ids_rejects_complete_keys() {
    let store = MemoryStore::default();

    let keys = store
        .allocate_ids(&[Key::incomplete("user").with_namespace("ns")])
        .expect("allocate");
    assert_eq!(keys, vec![Key::id("user", 1).with_namespace("ns")]);

    assert!(store.allocate_ids(&[Key::id("user", 1)]).is_err());
}

#[test]
fn run_keys_filters_and_windows_over_merged_view() {
    let store = MemoryStore::default();
    store
        .run_in_transaction(|tx| {
            for id in 1..=4 {
                tx.put(&Key::id("user", id), email("same"))?;
            }
            tx.put(&Key::id("user", 5), email("other"))
        })
        .expect("seed");

    let mut tx = store.begin();
    tx.delete(&Key::id("user", 1)).expect("delete");

    let query = Query::new("user").filter(Filter::eq("email", "same")).keys_only();
    let keys: Vec<Key> = tx
        .run_keys(&query)
        .expect("run")
        .collect::<Result<_, _>>()
        .expect("keys");
    assert_eq!(keys, vec![Key::id("user", 2), Key::id("user", 3), Key::id("user", 4)]);

    let keys: Vec<Key> = tx
        .run_keys(&query.offset(1).limit(1))
        .expect("run")
        .collect::<Result<_, _>>()
        .expect("keys");
    assert_eq!(keys, vec![Key::id("user", 3)]);
}

#[test]
fn concurrent_writers_to_one_key_abort_the_second_commit() {
    let store = MemoryStore::default();
    let key = Key::name("index_entry", "42");

    let mut first = store.begin();
    let mut second = store.begin();

    first
        .mutate(vec![Mutation::insert(key.clone(), vec![Property::new("hash", 42_u64)])])
        .expect("first insert");
    second
        .mutate(vec![Mutation::insert(key.clone(), vec![Property::new("hash", 42_u64)])])
        .expect("second insert");

    first.commit().expect("first commit");
    let err = second.commit().expect_err("second commit");
    assert!(err.is_aborted());

    assert_eq!(
        store.get(&key).expect("get"),
        Some(vec![Property::new("hash", Value::Uint(42))])
    );
}

#[test]
fn run_in_transaction_retries_after_abort() {
    let store = MemoryStore::default();
    let key = Key::name("counter", "c");
    store
        .run_in_transaction(|tx| tx.put(&key, vec![Property::new("n", 0_i64)]))
        .expect("seed");

    let mut runs = 0;
    store
        .run_in_transaction(|tx| {
            runs += 1;
            let n = tx.get(&key)?[0].value.as_int().unwrap_or_default();

            // interleave a competing commit on the first attempt only
            if runs == 1 {
                store.run_in_transaction(|other| other.put(&key, vec![Property::new("n", 10_i64)]))?;
            }

            tx.put(&key, vec![Property::new("n", n + 1)])
        })
        .expect("retry");

    assert_eq!(runs, 2);
    assert_eq!(
        store.get(&key).expect("get"),
        Some(vec![Property::new("n", 11_i64)])
    );
}

#[test]
fn load_entity_maps_miss_to_none() {
    let store = MemoryStore::default();
    let key = Key::name("user", "a");
    store
        .run_in_transaction(|tx| tx.put(&key, email("a")))
        .expect("seed");

    let mut tx = store.begin();
    let hit: Option<crate::db::property::PropertyList> =
        load_entity(&mut tx, &key).expect("load");
    assert_eq!(hit.expect("row").get("email"), Some(&Value::from("a")));

    let miss: Option<crate::db::property::PropertyList> =
        load_entity(&mut tx, &Key::name("user", "b")).expect("load");
    assert!(miss.is_none());
}

#[test]
fn config_deserializes_with_defaults() {
    let bytes = serde_cbor::to_vec(&std::collections::BTreeMap::from([("first_id", 7_i64)]))
        .expect("encode");
    let config: StoreConfig = serde_cbor::from_slice(&bytes).expect("decode");

    assert_eq!(config.first_id, 7);
    assert_eq!(config.max_attempts, StoreConfig::DEFAULT_MAX_ATTEMPTS);
}

#[test]
fn row_appearing_under_an_empty_query_aborts_the_later_commit() {
    let store = MemoryStore::default();
    let query = Query::new("account").filter(Filter::eq("handle", "h")).keys_only();

    let mut first = store.begin();
    let mut second = store.begin();

    for (tx, id) in [(&mut first, 1), (&mut second, 2)] {
        assert_eq!(tx.run_keys(&query).expect("run").count(), 0);
        tx.put(&Key::id("account", id), vec![Property::new("handle", "h")])
            .expect("put");
    }

    first.commit().expect("first commit");
    let err = second.commit().expect_err("second commit");
    assert!(err.is_aborted());
    assert_eq!(store.keys_of("account"), vec![Key::id("account", 1)]);
}

#[test]
fn unrelated_commit_does_not_abort_a_query() {
    let store = MemoryStore::default();
    let query = Query::new("account").filter(Filter::eq("handle", "h")).keys_only();

    let mut tx = store.begin();
    assert_eq!(tx.run_keys(&query).expect("run").count(), 0);
    tx.put(&Key::id("account", 1), vec![Property::new("handle", "h")])
        .expect("put");

    store
        .run_in_transaction(|other| {
            other.put(&Key::id("account", 2), vec![Property::new("handle", "g")])?;
            other.put(&Key::id("user", 2), vec![Property::new("handle", "h")])
        })
        .expect("unrelated");

    tx.commit().expect("commit");
    assert_eq!(store.len(), 3);
}

#[test]
fn raw_row_decodes_what_it_encoded() {
    let properties = vec![Property::new("email", "a"), Property::new("n", 3_i64)];
    let row = RawRow::encode(&properties).expect("encode");

    assert!(!row.is_empty());
    assert_eq!(row.len(), row.as_bytes().len());
    assert_eq!(row.decode().expect("decode"), properties);
}

#[test]
fn raw_row_rejects_oversized_payloads() {
    let blob = vec![0_u8; super::row::MAX_ROW_BYTES + 1];
    let err = RawRow::encode(&[Property::new("blob", blob)]).expect_err("too large");

    assert_eq!(err.class, crate::error::ErrorClass::Unsupported);
}
