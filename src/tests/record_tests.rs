// src/tests/record_tests.rs

#![allow(non_snake_case)]

use crate::data::record::{Record, MONTH_ORDINAL, RE_DATE};

use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_Record_new_all_fields_unset() {
    let record = Record::new();
    assert_eq!(record.from(), None);
    assert_eq!(record.date(), None);
    assert_eq!(record.subject(), None);
    assert_eq!(record.folder(), None);
    assert_eq!(record.size(), None);
    assert_eq!(record.source(), None);
    assert!(!record.is_complete());
    assert_eq!(record.dt_canonical(), None);
}

#[test]
fn test_Record_accessor_pairs() {
    let mut record = Record::new();
    record.set_from("god@heaven.af.mil");
    record.set_date("Fri Feb  8 20:37:24 2002");
    record.set_subject("let there be light");
    record.set_folder("/var/mail/lkml");
    record.set_size(2345);
    record.set_source("/var/log/procmail.log");
    assert_eq!(record.from(), Some("god@heaven.af.mil"));
    assert_eq!(record.date(), Some("Fri Feb  8 20:37:24 2002"));
    assert_eq!(record.subject(), Some("let there be light"));
    assert_eq!(record.folder(), Some("/var/mail/lkml"));
    assert_eq!(record.size(), Some(2345));
    assert_eq!(record.source(), Some("/var/log/procmail.log"));
}

#[test]
fn test_Record_complete_only_once_folder_set() {
    let mut record = Record::new();
    record.set_from("a@b");
    record.set_date("Fri Feb  8 20:37:24 2002");
    record.set_subject("subject");
    record.set_size(1);
    assert!(!record.is_complete());
    record.set_folder("inbox");
    assert!(record.is_complete());
}

#[test]
fn test_Record_set_performs_no_validation() {
    let mut record = Record::new();
    record.set_date("certainly not a date");
    assert_eq!(record.date(), Some("certainly not a date"));
    // only the derivation fails, closed
    assert_eq!(record.dt_canonical(), None);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("Fri Feb  8 20:37:24 2002", Some("20020208203724"); "space padded day")]
#[test_case("Fri Feb 08 20:37:24 2002", Some("20020208203724"); "zero padded day")]
#[test_case("Mon Jan 1 00:00:00 2024", Some("20240101000000"); "single digit day january")]
#[test_case("Wed Dec 31 23:59:59 1999", Some("19991231235959"); "december 31")]
#[test_case("Thu Sep 14 07:05:00 2023", Some("20230914070500"); "september")]
#[test_case("Sun Jul  4 12:00:00 MET DST 1976", Some("19760704120000"); "timezone tokens before year")]
#[test_case("Tue Nov  5 18:30:01 +0100 2019", Some("20191105183001"); "numeric offset before year")]
#[test_case("Fri Xxx  8 20:37:24 2002", None; "unknown month")]
#[test_case("Xyz Feb  8 20:37:24 2002", None; "unknown weekday")]
#[test_case("Fri Feb  8 20:37:24", None; "missing year")]
#[test_case("Feb  8 20:37:24 2002", None; "missing weekday")]
#[test_case("", None; "empty date")]
fn test_dt_canonical(
    date: &str,
    expect: Option<&str>,
) {
    let mut record = Record::new();
    record.set_date(date);
    assert_eq!(record.dt_canonical().as_deref(), expect, "date {:?}", date);
}

#[test]
fn test_dt_canonical_idempotent() {
    let mut record = Record::new();
    record.set_date("Fri Feb  8 20:37:24 2002");
    let first = record.dt_canonical();
    let second = record.dt_canonical();
    assert!(first.is_some());
    assert_eq!(first, second);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_MONTH_ORDINAL_is_zero_based_and_closed() {
    assert_eq!(MONTH_ORDINAL.len(), 12);
    assert_eq!(MONTH_ORDINAL.get("Jan"), Some(&0));
    assert_eq!(MONTH_ORDINAL.get("May"), Some(&4));
    assert_eq!(MONTH_ORDINAL.get("Dec"), Some(&11));
    assert_eq!(MONTH_ORDINAL.get("jan"), None);
    assert_eq!(MONTH_ORDINAL.get("January"), None);
}

#[test]
fn test_RE_DATE_named_captures() {
    let captures = RE_DATE
        .captures("Fri Feb  8 20:37:24 2002")
        .unwrap();
    assert_eq!(&captures["weekday"], "Fri");
    assert_eq!(&captures["month"], "Feb");
    assert_eq!(&captures["day"], "8");
    assert_eq!(&captures["hour"], "20");
    assert_eq!(&captures["minute"], "37");
    assert_eq!(&captures["second"], "24");
    assert_eq!(&captures["year"], "2002");
}
