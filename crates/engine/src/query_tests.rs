use super::*;

fn lits(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn literals_in_order_accepts_ordered_occurrences() {
    assert!(literals_appear_in_order("chocolate almond", &lits(&["chocolate", "mon"])));
    assert!(literals_appear_in_order("alpha beta gamma", &lits(&["alpha", "gamma"])));
    assert!(literals_appear_in_order("abc", &lits(&["abc"])));
}

#[test]
fn literals_in_order_rejects_reversed_occurrences() {
    assert!(!literals_appear_in_order("gamma beta alpha", &lits(&["alpha", "gamma"])));
    assert!(!literals_appear_in_order("almond chocolate", &lits(&["chocolate", "mon"])));
}

#[test]
fn literals_in_order_rejects_missing_literal() {
    assert!(!literals_appear_in_order("chocolate", &lits(&["chocolate", "mon"])));
    assert!(!literals_appear_in_order("", &lits(&["a"])));
}

#[test]
fn literals_in_order_advances_one_byte_per_match() {
    // The next search starts one byte past the previous match start, so a
    // repeated literal may overlap its prior occurrence.
    assert!(literals_appear_in_order("aaa", &lits(&["aa", "aa"])));
    assert!(!literals_appear_in_order("aa", &lits(&["aa", "aa"])));
    // Equal literals must still occur at distinct start positions.
    assert!(literals_appear_in_order("abc abc", &lits(&["abc", "abc"])));
    assert!(!literals_appear_in_order("abc", &lits(&["abc", "abc"])));
}

#[test]
fn literals_in_order_empty_list_is_vacuous() {
    assert!(literals_appear_in_order("anything", &[]));
    assert!(literals_appear_in_order("", &[]));
}
