use super::*;
use crate::document_symbols::extract;

fn names(results: &[SymbolInformation]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_empty_query_returns_nothing() {
    let symbols = extract("<?php\nfunction getUser() {}\n");
    let docs = vec![("file:///a.php", symbols.as_slice())];

    assert!(search(docs, "").is_empty());
}

#[test]
fn test_fuzzy_match_across_documents() {
    let a = extract("<?php\nfunction getUser() {}\n");
    let b = extract("<?php\nclass UserRepo {}\n");
    let docs = vec![
        ("file:///a.php", a.as_slice()),
        ("file:///b.php", b.as_slice()),
    ];

    let results = search(docs, "user");
    assert_eq!(results.len(), 2);
    assert!(names(&results).contains(&"getUser"));
    assert!(names(&results).contains(&"UserRepo"));
}

#[test]
fn test_prefix_match_ranks_first() {
    let a = extract("<?php\nfunction getUser() {}\nfunction grantExtraTime() {}\n");
    let docs = vec![("file:///a.php", a.as_slice())];

    let results = search(docs, "get");
    assert_eq!(names(&results), vec!["getUser", "grantExtraTime"]);
}

#[test]
fn test_non_matching_symbols_excluded() {
    let a = extract("<?php\nfunction getUser() {}\nfunction saveOrder() {}\n");
    let docs = vec![("file:///a.php", a.as_slice())];

    let results = search(docs, "user");
    assert_eq!(names(&results), vec!["getUser"]);
}

#[test]
fn test_only_top_level_symbols_searched() {
    let a = extract("<?php\nclass Account {\n    public function getBalance() {}\n}\n");
    let docs = vec![("file:///a.php", a.as_slice())];

    // `getBalance` is nested under the class and is not offered.
    assert!(search(docs.clone(), "getBalance").is_empty());
    assert_eq!(names(&search(docs, "Account")), vec!["Account"]);
}

#[test]
fn test_result_carries_uri_and_kind() {
    let a = extract("<?php\nfunction getUser() {}\n");
    let docs = vec![("file:///src/a.php", a.as_slice())];

    let results = search(docs, "getUser");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].location.uri, "file:///src/a.php");
    assert_eq!(results[0].kind, SymbolKind::Function);
}
