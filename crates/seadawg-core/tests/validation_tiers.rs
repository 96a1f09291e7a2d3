//! # Validation Tier Tests (T0-T4)
//!
//! If ANY tier fails, the index is INVALID.
//!
//! ## Tiers
//! - T0: Data Model
//! - T1: Construction & Exact Lookup
//! - T2: Deletion & Recompaction
//! - T3: Prefix & Substring Traversal
//! - T4: Map Collaborator

use seadawg_core::{SeaDawg, SeaDawgConfig, SeaDawgError, SeaDawgMap, Sink};

/// Mixed word list with shared prefixes, repeats and spaces.
const WORDS: [&str; 17] = [
    "cocoa",
    "abbabc",
    "cola",
    "coca cola",
    "key",
    "fob",
    "baby",
    "GG",
    "Good Game",
    "Dawg",
    "aye aye captain",
    "Matey",
    "Ohhhhhhhhhhhhhh",
    "arrrrrrrrrr ye scurvy dawg",
    "walk da plank",
    "who lives in a pipeapple under da sea?",
    "black beard, a fearsome pirate",
];

fn verified<P>() -> SeaDawg<char, P> {
    SeaDawg::with_config(SeaDawgConfig {
        verify_invariants: true,
        ..SeaDawgConfig::default()
    })
    .expect("config")
}

fn index_words(words: &[&str]) -> SeaDawg<char, String> {
    let mut dawg = verified();
    for word in words {
        dawg.add_str(word, Sink::new((*word).to_string()))
            .expect("add");
    }
    dawg
}

fn sorted(mut texts: Vec<String>) -> Vec<String> {
    texts.sort();
    texts
}

// =============================================================================
// TIER T0: DATA MODEL
// =============================================================================

mod t0_data_model {
    use super::*;

    /// T0.1: A new index holds only root and source.
    #[test]
    fn new_index_is_empty() {
        let dawg: SeaDawg<char> = SeaDawg::new();
        assert!(dawg.is_empty());
        assert_eq!(dawg.len(), 0);
        let metrics = dawg.metrics();
        assert_eq!(metrics.node_count, 2);
        assert_eq!(metrics.edge_count, 0);
        let source = dawg.graph().node(dawg.graph().source()).expect("source");
        assert_eq!(source.length(), 0);
        let root = dawg.graph().node(dawg.graph().root()).expect("root");
        assert_eq!(root.length(), -1);
    }

    /// T0.2: Oversized texts are rejected before touching the graph.
    #[test]
    fn oversized_text_rejected() {
        let mut dawg: SeaDawg<char> = SeaDawg::with_config(SeaDawgConfig {
            max_text_length: 8,
            ..SeaDawgConfig::default()
        })
        .expect("config");
        let result = dawg.add_str("far too long", Sink::marker());
        assert!(matches!(result, Err(SeaDawgError::TextTooLong { len: 12, max: 8 })));
        assert_eq!(dawg.metrics().edge_count, 0);
    }

    /// T0.3: Marker sinks carry no payload.
    #[test]
    fn marker_sink_has_no_payload() {
        let mut dawg: SeaDawg<char, u8> = verified();
        dawg.add_str("flag", Sink::marker()).expect("add");
        let sink = dawg.find_exact_str("flag").expect("find").expect("present");
        assert!(sink.payload().is_none());
        assert_eq!(sink.length(), 5);
    }
}

// =============================================================================
// TIER T1: CONSTRUCTION & EXACT LOOKUP
// =============================================================================

mod t1_construction {
    use super::*;

    /// T1.1: Every added word is found with its payload.
    #[test]
    fn every_word_round_trips() {
        let dawg = index_words(&WORDS);
        assert_eq!(dawg.len(), WORDS.len());
        for word in WORDS {
            let sink = dawg.find_exact_str(word).expect("find").expect(word);
            assert_eq!(sink.payload().map(String::as_str), Some(word));
        }
    }

    /// T1.2: Prefixes, suffixes and factors of words are not members.
    #[test]
    fn factors_are_not_members() {
        let dawg = index_words(&WORDS);
        for probe in ["coc", "ocoa", "a", "aye", "cola ", "Goo", "dawg", "plan", "ea?"] {
            assert!(
                dawg.find_exact_str(probe).expect("find").is_none(),
                "{probe:?} should not be a member"
            );
        }
    }

    /// T1.3: A word that is a suffix of an earlier word is still distinct.
    #[test]
    fn suffix_word_is_found() {
        let dawg = index_words(&["coca cola", "cola", "a"]);
        for word in ["coca cola", "cola", "a"] {
            let sink = dawg.find_exact_str(word).expect("find").expect(word);
            assert_eq!(sink.payload().map(String::as_str), Some(word));
        }
        assert!(dawg.find_exact_str("ola").expect("find").is_none());
    }

    /// T1.4: Insertion order does not change membership.
    #[test]
    fn insertion_order_irrelevant() {
        let mut reversed: Vec<&str> = WORDS.to_vec();
        reversed.reverse();
        let forward = index_words(&WORDS);
        let backward = index_words(&reversed);
        for word in WORDS {
            assert!(forward.find_exact_str(word).expect("find").is_some());
            assert!(backward.find_exact_str(word).expect("find").is_some());
        }
        assert_eq!(forward.metrics().text_count, backward.metrics().text_count);
    }

    /// T1.5: Re-adding a word keeps one sink and swaps the payload.
    #[test]
    fn duplicate_add_keeps_single_sink() {
        let mut dawg = index_words(&["cocoa"]);
        let before = dawg.metrics();
        dawg.add_str("cocoa", Sink::new("GG".to_string())).expect("add");
        assert_eq!(dawg.metrics(), before);
        let sink = dawg.find_exact_str("cocoa").expect("find").expect("present");
        assert_eq!(sink.payload().map(String::as_str), Some("GG"));
    }
}

// =============================================================================
// TIER T2: DELETION & RECOMPACTION
// =============================================================================

mod t2_deletion {
    use super::*;

    /// T2.1: Deleting one word leaves the others intact.
    #[test]
    fn delete_keeps_neighbours() {
        let mut dawg = index_words(&["cocoa", "cola"]);
        assert!(dawg.delete_str("cocoa").expect("delete"));
        assert!(dawg.find_exact_str("cocoa").expect("find").is_none());
        assert!(dawg.find_exact_str("cola").expect("find").is_some());
        assert_eq!(dawg.len(), 1);
    }

    /// T2.2: Deleting an absent word is a negative result, not an error.
    #[test]
    fn delete_absent_is_false() {
        let mut dawg = index_words(&["cocoa"]);
        assert!(!dawg.delete_str("coc").expect("delete"));
        assert!(!dawg.delete_str("cocoas").expect("delete"));
        assert_eq!(dawg.len(), 1);
    }

    /// T2.3: Deleting every word returns the graph to root and source.
    #[test]
    fn delete_all_empties_graph() {
        let mut dawg = index_words(&WORDS);
        for word in WORDS {
            assert!(dawg.delete_str(word).expect("delete"), "{word}");
        }
        assert!(dawg.is_empty());
        let metrics = dawg.metrics();
        assert_eq!(metrics.node_count, 2);
        assert_eq!(metrics.edge_count, 0);
        let source = dawg.graph().node(dawg.graph().source()).expect("source");
        assert_eq!(source.out_degree(), 0);
    }

    /// T2.4: Deleted words can be added back.
    #[test]
    fn readd_after_delete() {
        let mut dawg = index_words(&WORDS);
        for word in WORDS.iter().step_by(2) {
            assert!(dawg.delete_str(word).expect("delete"));
        }
        for (i, word) in WORDS.iter().enumerate() {
            let found = dawg.find_exact_str(word).expect("find").is_some();
            assert_eq!(found, i % 2 == 1, "{word}");
        }
        for word in WORDS.iter().step_by(2) {
            dawg.add_str(word, Sink::new(format!("again {word}")))
                .expect("add");
        }
        for word in WORDS {
            assert!(dawg.find_exact_str(word).expect("find").is_some(), "{word}");
        }
        let sink = dawg.find_exact_str("cocoa").expect("find").expect("present");
        assert_eq!(sink.payload().map(String::as_str), Some("again cocoa"));
    }

    /// T2.5: A factor that stops branching after a delete still accepts
    /// new right extensions.
    #[test]
    fn extend_after_recompaction() {
        let mut dawg = index_words(&["azc", "bzd", "azd"]);
        assert!(dawg.delete_str("bzd").expect("delete"));
        dawg.add_str("zq", Sink::new("zq".to_string())).expect("add");
        for word in ["azc", "azd", "zq"] {
            assert!(dawg.find_exact_str(word).expect("find").is_some(), "{word}");
        }
        assert!(dawg.find_exact_str("bzd").expect("find").is_none());
        assert!(dawg.find_exact_str("z").expect("find").is_none());
    }

    /// T2.6: `remove` hands back the released payload.
    #[test]
    fn remove_returns_payload() {
        let mut dawg = index_words(&["cocoa", "cola"]);
        let released = dawg
            .remove(&"cola".chars().collect::<Vec<_>>())
            .expect("remove")
            .expect("present");
        assert_eq!(released.into_payload().as_deref(), Some("cola"));
    }
}

// =============================================================================
// TIER T3: TRAVERSAL
// =============================================================================

mod t3_traversal {
    use super::*;

    fn prefix(dawg: &SeaDawg<char, String>, query: &str) -> Vec<String> {
        dawg.find_with_prefix_str(query)
            .expect("prefix")
            .iter()
            .map(|hit| hit.text_string())
            .collect()
    }

    fn substring(dawg: &SeaDawg<char, String>, query: &str) -> Vec<String> {
        dawg.find_with_substring_str(query)
            .expect("substring")
            .iter()
            .map(|hit| hit.text_string())
            .collect()
    }

    /// T3.1: Prefix search over the mixed list.
    #[test]
    fn prefix_counts() {
        let dawg = index_words(&WORDS);
        assert_eq!(
            prefix(&dawg, "w"),
            vec!["walk da plank", "who lives in a pipeapple under da sea?"]
        );
        assert_eq!(prefix(&dawg, "c"), vec!["coca cola", "cocoa", "cola"]);
        assert_eq!(prefix(&dawg, "G"), vec!["GG", "Good Game"]);
        assert!(prefix(&dawg, "z").is_empty());
    }

    /// T3.2: The empty prefix enumerates everything in order.
    #[test]
    fn empty_prefix_lists_all_sorted() {
        let dawg = index_words(&WORDS);
        let mut expected: Vec<String> = WORDS.iter().map(ToString::to_string).collect();
        expected.sort();
        assert_eq!(prefix(&dawg, ""), expected);
    }

    /// T3.3: A word that is a prefix of another is reported first.
    #[test]
    fn shorter_word_first() {
        let dawg = index_words(&["cola", "col", "colander"]);
        assert_eq!(prefix(&dawg, "col"), vec!["col", "cola", "colander"]);
    }

    /// T3.4: Substring search reports each containing word once.
    #[test]
    fn substring_matches() {
        let dawg = index_words(&WORDS);
        assert_eq!(
            sorted(substring(&dawg, "co")),
            vec!["coca cola", "cocoa", "cola"]
        );
        assert_eq!(
            sorted(substring(&dawg, "da")),
            vec![
                "arrrrrrrrrr ye scurvy dawg",
                "walk da plank",
                "who lives in a pipeapple under da sea?"
            ]
        );
        assert_eq!(
            sorted(substring(&dawg, "aye")),
            vec!["aye aye captain"]
        );
        assert_eq!(
            sorted(substring(&dawg, "awg")),
            vec!["Dawg", "arrrrrrrrrr ye scurvy dawg"]
        );
        assert!(substring(&dawg, "xyz").is_empty());
    }

    /// T3.5: Substring results follow deletions.
    #[test]
    fn substring_after_delete() {
        let mut dawg = index_words(&["cocoa", "cola", "coca cola"]);
        assert!(dawg.delete_str("cola").expect("delete"));
        assert_eq!(sorted(substring(&dawg, "ola")), vec!["coca cola"]);
        assert_eq!(prefix(&dawg, "co"), vec!["coca cola", "cocoa"]);
    }

    /// T3.6: Repeated factors do not produce repeated results.
    #[test]
    fn repeated_factor_reported_once() {
        let dawg = index_words(&["Ohhhhhhhhhhhhhh", "hh"]);
        assert_eq!(
            sorted(substring(&dawg, "h")),
            vec!["Ohhhhhhhhhhhhhh", "hh"]
        );
    }
}

// =============================================================================
// TIER T4: MAP COLLABORATOR
// =============================================================================

mod t4_map {
    use super::*;

    /// T4.1: The map stores and overwrites values by key.
    #[test]
    fn map_round_trip() {
        let mut map = SeaDawgMap::new();
        for (i, word) in WORDS.iter().enumerate() {
            map.set(word, i).expect("set");
        }
        assert_eq!(map.len(), WORDS.len());
        for (i, word) in WORDS.iter().enumerate() {
            assert_eq!(map.get(word).expect("get"), Some(&i));
        }
        map.set("cocoa", 100).expect("set");
        assert_eq!(map.get("cocoa").expect("get"), Some(&100));
        assert_eq!(map.len(), WORDS.len());
    }

    /// T4.2: Unbacked operations report `Unsupported`.
    #[test]
    fn map_unsupported() {
        let mut map: SeaDawgMap<u8> = SeaDawgMap::new();
        assert!(matches!(
            map.remove("a"),
            Err(SeaDawgError::Unsupported("SeaDawgMap::remove"))
        ));
        assert!(matches!(
            map.keys(),
            Err(SeaDawgError::Unsupported("SeaDawgMap::keys"))
        ));
    }
}
