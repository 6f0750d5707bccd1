//! Command-surface scenarios, line in, line out.

use tallydb::LineOutcome;

use crate::test_utils::{new_session, prints, silent};

#[test]
fn test_counts_follow_bindings() {
    let session = new_session();

    silent(&session, "SET x 10");
    prints(&session, "GET x", "10");

    silent(&session, "SET y 10");
    prints(&session, "NUMEQUALTO 10", "2");

    silent(&session, "UNSET x");
    prints(&session, "NUMEQUALTO 10", "1");
}

#[test]
fn test_rollback_restores_previous_value() {
    let session = new_session();

    silent(&session, "SET x 10");
    silent(&session, "BEGIN");
    silent(&session, "SET x 20");
    prints(&session, "GET x", "20");

    silent(&session, "ROLLBACK");
    prints(&session, "GET x", "10");
}

#[test]
fn test_commit_makes_all_nesting_permanent() {
    let session = new_session();

    silent(&session, "SET x 10");
    silent(&session, "BEGIN");
    silent(&session, "SET x 20");
    silent(&session, "BEGIN");
    silent(&session, "SET x 30");

    silent(&session, "COMMIT");
    prints(&session, "GET x", "30");
    prints(&session, "ROLLBACK", "NO TRANSACTION");
}

#[test]
fn test_fresh_session_has_no_transaction() {
    let session = new_session();
    prints(&session, "ROLLBACK", "NO TRANSACTION");
    prints(&session, "COMMIT", "NO TRANSACTION");
}

#[test]
fn test_get_unbound_prints_null() {
    let session = new_session();
    prints(&session, "GET nothing", "NULL");
    silent(&session, "UNSET nothing");
    prints(&session, "GET nothing", "NULL");
}

#[test]
fn test_invalid_lines_do_not_stop_the_session() {
    let session = new_session();

    prints(&session, "SET solo", "Invalid command");
    prints(&session, "WIBBLE", "Invalid command");
    prints(&session, "GET a b c", "Invalid command");

    silent(&session, "SET a 1");
    prints(&session, "GET a", "1");
}

#[test]
fn test_verbs_are_case_insensitive() {
    let session = new_session();

    silent(&session, "set x 10");
    prints(&session, "get x", "10");
    prints(&session, "numequalto 10", "1");
    silent(&session, "Unset x");
    prints(&session, "GET x", "NULL");
}

#[test]
fn test_end_terminates() {
    let session = new_session();
    silent(&session, "SET x 10");
    assert_eq!(session.eval_line("END"), LineOutcome::Terminate);
}

#[test]
fn test_rollback_of_unset_restores_binding_and_count() {
    let session = new_session();

    silent(&session, "SET a 10");
    silent(&session, "BEGIN");
    prints(&session, "NUMEQUALTO 10", "1");
    silent(&session, "BEGIN");
    silent(&session, "UNSET a");
    prints(&session, "NUMEQUALTO 10", "0");

    silent(&session, "ROLLBACK");
    prints(&session, "NUMEQUALTO 10", "1");
    silent(&session, "COMMIT");
    prints(&session, "GET a", "10");
}
