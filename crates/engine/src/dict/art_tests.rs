use super::*;

use crate::posting::PostingList;

fn tri(s: &str) -> Trigram {
    let b = s.as_bytes();
    assert_eq!(b.len(), 3);
    Trigram::new(b[0], b[1], b[2])
}

fn tuple(key: Trigram, rids: &[i32]) -> EntryTuple {
    EntryTuple::inline(key, PostingList::from_sorted(rids.to_vec()))
}

fn leaf_tuple(s: &str) -> EntryTuple {
    tuple(tri(s), &[1])
}

/// All distinct trigrams over the given alphabet, in byte order.
fn keys_over(alphabet: &[u8]) -> Vec<Trigram> {
    let mut out = Vec::new();
    for &a in alphabet {
        for &b in alphabet {
            for &c in alphabet {
                out.push(Trigram::new(a, b, c));
            }
        }
    }
    out
}

#[test]
fn insert_then_search_single_key() {
    let mut art = Art::new();
    art.insert_tuple(leaf_tuple("cat"));
    assert_eq!(art.len(), 1);
    assert!(art.search(b"cat").is_some());
    assert!(art.search(b"car").is_none());
}

#[test]
fn leaf_split_produces_path_compressed_node4() {
    let mut art = Art::new();
    art.insert_tuple(leaf_tuple("cat"));
    art.insert_tuple(leaf_tuple("car"));
    art.insert_tuple(leaf_tuple("cab"));
    assert_eq!(art.len(), 3);

    // Root must be a Node4 holding the common prefix "ca" with leaf
    // children under 'b', 'r', 't', in sorted order.
    match art.root.as_deref() {
        Some(ArtNode::Node4(node)) => {
            assert_eq!(node.prefix, b"ca".to_vec());
            assert_eq!(node.len, 3);
            assert_eq!(&node.keys[..3], b"brt");
            for child in node.children[..3].iter() {
                assert!(matches!(child.as_deref(), Some(ArtNode::Leaf(_))));
            }
        }
        other => panic!("expected Node4 root, got {other:?}"),
    }

    for key in [b"cat", b"car", b"cab"] {
        assert!(art.search(key).is_some());
    }
    // Prefix matches but the branch byte is absent.
    assert!(art.search(b"cas").is_none());
    // Prefix mismatch bails before any descent.
    assert!(art.search(b"dog").is_none());
}

#[test]
fn prefix_mismatch_splits_compressed_node() {
    let mut art = Art::new();
    art.insert_tuple(leaf_tuple("cat"));
    art.insert_tuple(leaf_tuple("car"));
    // "cx." diverges inside the "ca" prefix at offset 1.
    art.insert_tuple(leaf_tuple("cxy"));
    assert_eq!(art.len(), 3);

    match art.root.as_deref() {
        Some(ArtNode::Node4(node)) => {
            assert_eq!(node.prefix, b"c".to_vec());
            assert_eq!(node.len, 2);
            assert_eq!(&node.keys[..2], b"ax");
        }
        other => panic!("expected split Node4 root, got {other:?}"),
    }

    for key in [b"cat", b"car", b"cxy"] {
        assert!(art.search(key).is_some(), "missing {key:?}");
    }
    assert!(art.search(b"cay").is_none());
    assert!(art.search(b"cxz").is_none());
}

#[test]
fn duplicate_insert_overwrites_leaf_tuple() {
    let mut art = Art::new();
    art.insert_tuple(tuple(tri("cat"), &[1]));
    art.insert_tuple(tuple(tri("cat"), &[1, 2, 5]));

    assert_eq!(art.len(), 1);
    let found = art.search(b"cat").expect("cat present");
    assert_eq!(found.count(), 3);
    assert_eq!(found.rids().as_ref(), &[1, 2, 5]);
}

#[test]
fn growth_preserves_all_children() {
    let mut art = Art::new();
    let mut keys = Vec::new();
    for b in 0..64u8 {
        let key = Trigram::new(b'a' + (b % 26), b'0' + (b % 10), b);
        keys.push(key);
        art.insert_tuple(tuple(key, &[b as i32 + 1]));
    }

    assert_eq!(art.len(), keys.len());
    for (i, key) in keys.iter().enumerate() {
        let found = art.search(&key.bytes()).unwrap_or_else(|| panic!("missing {key}"));
        assert_eq!(found.rids().as_ref(), &[i as i32 + 1][..]);
    }
}

#[test]
fn root_width_tracks_distinct_first_bytes() {
    let mut art = Art::new();
    for b in 0..5u8 {
        art.insert_tuple(tuple(Trigram::new(b, b'x', b'y'), &[1]));
    }
    assert!(matches!(art.root.as_deref(), Some(ArtNode::Node16(_))));

    for b in 5..17u8 {
        art.insert_tuple(tuple(Trigram::new(b, b'x', b'y'), &[1]));
    }
    assert!(matches!(art.root.as_deref(), Some(ArtNode::Node48(_))));

    for b in 17..49u8 {
        art.insert_tuple(tuple(Trigram::new(b, b'x', b'y'), &[1]));
    }
    assert!(matches!(art.root.as_deref(), Some(ArtNode::Node256(_))));

    for b in 0..49u8 {
        assert!(art.search(&[b, b'x', b'y']).is_some(), "missing byte {b}");
    }
    assert!(art.search(&[49, b'x', b'y']).is_none());
}

#[test]
fn node48_slot_map_is_consistent() {
    let mut art = Art::new();
    for b in 0..20u8 {
        // Spread the bytes so slot order differs from byte order.
        let byte = b.wrapping_mul(11);
        art.insert_tuple(tuple(Trigram::new(byte, b'q', b'q'), &[1]));
    }

    match art.root.as_deref() {
        Some(ArtNode::Node48(node)) => {
            let mut seen = 0;
            for byte in 0..256usize {
                let slot = node.index[byte];
                if slot == EMPTY_SLOT {
                    continue;
                }
                assert!((slot as usize) < node.len, "slot out of range");
                assert!(node.children[slot as usize].is_some());
                seen += 1;
            }
            assert_eq!(seen, node.len);
        }
        other => panic!("expected Node48 root, got {other:?}"),
    }
}

#[test]
fn bulk_load_agrees_with_search() {
    let keys = keys_over(b"abcdxyz");
    let tuples: Vec<EntryTuple> = keys.iter().map(|&k| tuple(k, &[k.packed()])).collect();
    let art = Art::bulk_load(tuples);

    assert_eq!(art.len(), keys.len());
    for key in &keys {
        let found = art.search(&key.bytes()).unwrap_or_else(|| panic!("missing {key}"));
        assert_eq!(found.key(), *key);
    }
    assert!(art.search(b"abe").is_none());
    assert!(art.search(b"zzz").is_none());
}

#[test]
fn bulk_load_has_no_prefixes_and_sane_widths() {
    // Seven distinct first bytes: the root must be a Node16 with no
    // compressed prefix.
    let keys = keys_over(b"abcdxyz");
    let tuples: Vec<EntryTuple> = keys.iter().map(|&k| tuple(k, &[1])).collect();
    let art = Art::bulk_load(tuples);

    match art.root.as_deref() {
        Some(ArtNode::Node16(node)) => {
            assert!(node.prefix.is_empty());
            assert_eq!(node.len, 7);
        }
        other => panic!("expected Node16 root, got {other:?}"),
    }
}

#[test]
fn bulk_load_single_tuple_is_a_leaf() {
    let art = Art::bulk_load(vec![leaf_tuple("abc")]);
    assert!(matches!(art.root.as_deref(), Some(ArtNode::Leaf(_))));
    assert!(art.search(b"abc").is_some());
}

#[test]
fn bulk_load_empty_is_empty() {
    let art = Art::bulk_load(Vec::new());
    assert!(art.is_empty());
    assert!(art.search(b"abc").is_none());
}

#[test]
fn incremental_insert_matches_bulk_load() {
    let keys = keys_over(b"lmnop");
    let bulk = Art::bulk_load(keys.iter().map(|&k| tuple(k, &[2])).collect());

    let mut incremental = Art::new();
    // Insert in a scrambled but deterministic order.
    let n = keys.len();
    for i in 0..n {
        let key = keys[(i * 37) % n];
        incremental.insert_tuple(tuple(key, &[2]));
    }

    assert_eq!(bulk.len(), incremental.len());
    for key in &keys {
        assert!(bulk.search(&key.bytes()).is_some());
        assert!(incremental.search(&key.bytes()).is_some());
    }
}

#[test]
fn lookup_goes_through_the_dict_trait() {
    let art = Art::bulk_load(vec![leaf_tuple("moo")]);
    let dict: &dyn TrigramDict = &art;
    assert!(dict.lookup(tri("moo")).is_some());
    assert!(dict.lookup(tri("mon")).is_none());
}

#[test]
fn for_each_visits_keys_in_byte_order() {
    let keys = keys_over(b"adgkz");
    let art = Art::bulk_load(keys.iter().map(|&k| tuple(k, &[1])).collect());

    let mut visited = Vec::new();
    art.for_each(&mut |key, _| visited.push(key.bytes()));
    let expected: Vec<[u8; 3]> = keys.iter().map(|k| k.bytes()).collect();
    assert_eq!(visited, expected);
}

#[test]
fn for_each_is_sorted_even_when_slot_order_is_not() {
    // Node48 stores children in arrival order; iteration must still follow
    // byte order via the index map.
    let mut art = Art::new();
    let mut bytes: Vec<u8> = (0..20u8).map(|b| b.wrapping_mul(13)).collect();
    for &b in &bytes {
        art.insert_tuple(tuple(Trigram::new(b, b'z', b'z'), &[1]));
    }

    let mut visited = Vec::new();
    art.for_each(&mut |key, _| visited.push(key.bytes()[0]));
    bytes.sort_unstable();
    assert_eq!(visited, bytes);
}

#[test]
fn dump_renders_structure() {
    let mut art = Art::new();
    art.insert_tuple(leaf_tuple("cat"));
    art.insert_tuple(leaf_tuple("car"));

    let mut out = Vec::new();
    art.dump(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Art (2 keys)"));
    assert!(text.contains("prefix=\"ca\""));
    assert!(text.contains("Leaf \"cat\""));
    assert!(text.contains("Leaf \"car\""));
}
