//! End-to-end coverage using the person example record, which carries
//! three indexes: id, last-name-first, and first-name-first.

use spur_core::Db;
use spur_testkit::{Person, IDX_PERSON_FIRST, IDX_PERSON_ID, IDX_PERSON_LAST};

fn seed(db: &Db) {
    let mut pending = vec![
        Person::named("Jones", "W", "Robert"),
        Person::named("Smith", "J", "Carol"),
        Person::named("Aaronson", "B", "Zoe"),
    ];
    pending.reverse();
    let mut rec = Person::default();
    db.add(&mut rec, |rec| match pending.pop() {
        Some(person) => {
            *rec = person;
            true
        }
        None => false,
    })
    .unwrap();
}

fn first_names(db: &Db, index: u8) -> Vec<String> {
    let mut rec = Person::default();
    let mut names = Vec::new();
    db.get(&mut rec, index, |rec| {
        names.push(rec.first.clone());
        true
    })
    .unwrap();
    names
}

#[test]
fn add_assigns_ids_in_insertion_order() {
    let db = Db::create_in_memory().unwrap();
    seed(&db);

    let mut rec = Person::default();
    let mut ids = Vec::new();
    db.get(&mut rec, IDX_PERSON_ID, |rec| {
        ids.push(rec.id);
        true
    })
    .unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn each_index_orders_independently() {
    let db = Db::create_in_memory().unwrap();
    seed(&db);

    assert_eq!(first_names(&db, IDX_PERSON_ID), vec!["Robert", "Carol", "Zoe"]);
    assert_eq!(first_names(&db, IDX_PERSON_LAST), vec!["Zoe", "Robert", "Carol"]);
    assert_eq!(first_names(&db, IDX_PERSON_FIRST), vec!["Carol", "Robert", "Zoe"]);
}

#[test]
fn partial_key_lookup_on_secondary_index() {
    let db = Db::create_in_memory().unwrap();
    seed(&db);

    // Only the leading field of the index key is populated.
    let mut probe = Person::named("", "", "Robert");
    db.get_one(&mut probe, IDX_PERSON_FIRST).unwrap();
    assert_eq!(probe.last, "Jones");
    assert_eq!(probe.id, 1);
}

#[test]
fn rename_moves_the_index_entry() {
    let db = Db::create_in_memory().unwrap();
    seed(&db);

    let mut person = Person::named("", "", "Robert");
    db.get_one(&mut person, IDX_PERSON_FIRST).unwrap();
    person.first = "Bob".to_string();
    db.put_one(&mut person).unwrap();

    assert_eq!(first_names(&db, IDX_PERSON_FIRST), vec!["Bob", "Carol", "Zoe"]);
    // The other indexes keep exactly one entry per person too.
    assert_eq!(first_names(&db, IDX_PERSON_ID).len(), 3);
    assert_eq!(first_names(&db, IDX_PERSON_LAST), vec!["Zoe", "Bob", "Carol"]);
}
