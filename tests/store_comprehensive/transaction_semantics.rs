//! Transaction laws exercised through the public `Store` API.

use tallydb::{Error, Store};

#[test]
fn test_rollback_depth_d_restores_pre_begin_state() {
    let store = Store::new();
    store.set("a", "1");
    store.set("b", "2");

    for depth in 1..=5 {
        for _ in 0..depth {
            store.begin();
            store.set("a", "99");
            store.unset("b");
            store.set("c", "3");
        }
        for _ in 0..depth {
            store.rollback().unwrap();
        }

        assert_eq!(store.get("a").as_deref(), Some("1"), "depth {depth}");
        assert_eq!(store.get("b").as_deref(), Some("2"), "depth {depth}");
        assert_eq!(store.get("c"), None, "depth {depth}");
        assert_eq!(store.num_equal_to("1"), 1);
        assert_eq!(store.num_equal_to("99"), 0);
        assert_eq!(store.depth(), 0);
    }
}

#[test]
fn test_commit_then_rollback_law() {
    let store = Store::new();

    store.begin();
    store.set("x", "1");
    store.begin();
    store.set("y", "2");
    store.commit().unwrap();

    assert_eq!(store.rollback(), Err(Error::NoTransaction));
    assert_eq!(store.get("x").as_deref(), Some("1"));
    assert_eq!(store.get("y").as_deref(), Some("2"));
}

#[test]
fn test_unset_is_idempotent_inside_transaction() {
    let store = Store::new();
    store.set("x", "10");

    store.begin();
    store.unset("x");
    store.unset("x");
    assert_eq!(store.get("x"), None);

    store.rollback().unwrap();
    assert_eq!(store.get("x").as_deref(), Some("10"));
    assert_eq!(store.num_equal_to("10"), 1);
}

#[test]
fn test_interleaved_names_across_frames() {
    let store = Store::new();
    store.set("a", "1");

    store.begin();
    store.set("b", "1");

    store.begin();
    store.set("a", "2");
    store.set("b", "2");
    assert_eq!(store.num_equal_to("1"), 0);
    assert_eq!(store.num_equal_to("2"), 2);

    store.rollback().unwrap();
    // Inner frame undone: a back to "1", b back to the outer frame's "1".
    assert_eq!(store.get("a").as_deref(), Some("1"));
    assert_eq!(store.get("b").as_deref(), Some("1"));
    assert_eq!(store.num_equal_to("1"), 2);

    store.rollback().unwrap();
    assert_eq!(store.get("a").as_deref(), Some("1"));
    assert_eq!(store.get("b"), None);
    assert_eq!(store.num_equal_to("1"), 1);
}

#[test]
fn test_store_stays_usable_after_errors() {
    let store = Store::new();

    assert_eq!(store.rollback(), Err(Error::NoTransaction));
    assert_eq!(store.commit(), Err(Error::NoTransaction));

    store.set("x", "10");
    assert_eq!(store.get("x").as_deref(), Some("10"));

    store.begin();
    store.commit().unwrap();
    assert_eq!(store.commit(), Err(Error::NoTransaction));
    assert_eq!(store.get("x").as_deref(), Some("10"));
}
