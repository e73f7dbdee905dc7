use std::io::Cursor;

use imap_search::{
    read_search_request, Address, Envelope, Error, Mailbox, SearchFilter, SearchParser,
};

/// Two messages with different recipients: to1, to2 for the first
/// one, to1, to3 for the second one.
fn mailbox() -> Mailbox {
    fn recipients(indexes: &[u8]) -> Vec<Address> {
        indexes
            .iter()
            .map(|i| Address::new_nameless(format!("to{i}@localhost")))
            .collect()
    }

    let mut mailbox = Mailbox::new();
    mailbox.store(Envelope::new("test0Search", recipients(&[1, 2])));
    mailbox.store(Envelope::new("test0Search test1Search", recipients(&[1, 3])));
    mailbox
}

#[test_log::test]
fn simple_subject_search() {
    let mailbox = mailbox();

    assert_eq!(mailbox.search_request("SUBJECT test0Search ALL").unwrap(), vec![1, 2]);
    assert_eq!(mailbox.search_request("SUBJECT TeSt0Search").unwrap(), vec![1, 2]);
}

#[test_log::test]
fn partial_subject_search() {
    let mailbox = mailbox();

    assert_eq!(mailbox.search_request("SUBJECT 1S").unwrap(), vec![2]);
    assert_eq!(mailbox.search_request("SUBJECT test").unwrap(), vec![1, 2]);
}

#[test_log::test]
fn exact_subject_search() {
    let mailbox = mailbox();

    assert_eq!(
        mailbox
            .search_request("SUBJECT \"test0Search test1Search\"")
            .unwrap(),
        vec![2]
    );
}

#[test_log::test]
fn not_existing_subject_search() {
    let mailbox = mailbox();
    assert!(mailbox.search_request("SUBJECT \"not found\"").unwrap().is_empty());
}

#[test_log::test]
fn and_search() {
    let mailbox = mailbox();

    assert_eq!(
        mailbox
            .search_request("SUBJECT \"test0Search\" SUBJECT \"test1Search\"")
            .unwrap(),
        vec![2]
    );
    assert_eq!(
        mailbox
            .search_request("(SUBJECT \"test1Search\") AND (SUBJECT \"test0Search\")")
            .unwrap(),
        vec![2]
    );
}

#[test_log::test]
fn or_search() {
    let mailbox = mailbox();

    assert_eq!(
        mailbox
            .search_request("OR SUBJECT test0Search SUBJECT String2")
            .unwrap(),
        vec![1, 2]
    );
    assert_eq!(
        mailbox
            .search_request("(SUBJECT \"test1Search\") OR (SUBJECT \"nothing\")")
            .unwrap(),
        vec![2]
    );
}

#[test_log::test]
fn or_with_and_search() {
    let mailbox = mailbox();

    assert_eq!(
        mailbox
            .search_request("OR (SUBJECT test0Search SUBJECT test1search) SUBJECT something")
            .unwrap(),
        vec![2]
    );
}

#[test_log::test]
fn not_search() {
    let mailbox = mailbox();

    assert_eq!(mailbox.search_request("NOT (SUBJECT \"1S\")").unwrap(), vec![1]);
    assert!(mailbox.search_request("NOT SUBJECT test").unwrap().is_empty());
}

#[test_log::test]
fn to_search() {
    let mailbox = mailbox();

    assert_eq!(mailbox.search_request("TO to2@localhost").unwrap(), vec![1]);
    assert_eq!(mailbox.search_request("TO to3@localhost").unwrap(), vec![2]);
    assert_eq!(mailbox.search_request("TO to1@localhost").unwrap(), vec![1, 2]);
    assert_eq!(
        mailbox
            .search_request("SUBJECT test0Search TO to3@localhost")
            .unwrap(),
        vec![2]
    );
}

#[test_log::test]
fn unsupported_search_does_not_fail() {
    let mailbox = mailbox();
    let criteria = SearchParser::default()
        .parse("SENTDATE 01-Jan-2020 SUBJECT test1Search")
        .unwrap();

    assert_eq!(criteria.filter, SearchFilter::Subject("test1Search".into()));
    assert_eq!(criteria.ignored, vec!["SENTDATE", "01-Jan-2020"]);
    assert_eq!(mailbox.search(&criteria.filter), vec![2]);
}

#[test_log::test]
fn search_read_from_request_stream() {
    let mailbox = mailbox();
    let mut stream = Cursor::new("OR TO to2@localhost SUBJECT 1S\r\n");

    let request = read_search_request(&mut stream).unwrap();
    assert_eq!(mailbox.search_request(request).unwrap(), vec![1, 2]);
}

#[test_log::test]
fn errors_fail_the_command() {
    let mailbox = mailbox();

    assert!(matches!(
        mailbox.search_request(""),
        Err(Error::NoSearchCriteriaError)
    ));
    assert!(matches!(
        mailbox.search_request("TO not-an-address"),
        Err(Error::ParseAddressError(..))
    ));
    assert!(mailbox.search_request("AND").unwrap_err().is_structural());
}
