//! Canonical serialization of translation trees.

use ttn_tree::TranslationNode;

/// Serialize a tree to its canonical JSON form.
///
/// Pretty-printed with two-space indent, keys in sorted order (the tree's
/// own `BTreeMap` order), trailing newline. Identical trees always produce
/// byte-identical output, so saved documents diff cleanly and
/// `serialize(deserialize(serialize(t)))` is a fixed point.
///
/// The round trip through [`crate::deserialize`] holds for branch-rooted
/// trees, which is what every translation document is. A bare leaf root
/// serializes to a lone JSON string, and that is not a valid document
/// (`deserialize` rejects it as [`crate::CodecError::RootNotObject`]).
pub fn serialize(tree: &TranslationNode) -> String {
    // A string/map-only value never fails to serialize.
    let mut out = serde_json::to_string_pretty(tree).unwrap_or_default();
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::de::deserialize;

    fn sample_tree() -> TranslationNode {
        let mut status = BTreeMap::new();
        status.insert("confirmed".to_string(), TranslationNode::leaf("מאושר"));
        let mut admin = BTreeMap::new();
        admin.insert("status".to_string(), TranslationNode::Branch(status));
        let mut root = BTreeMap::new();
        root.insert("adminBookings".to_string(), TranslationNode::Branch(admin));
        root.insert("notifications".to_string(), TranslationNode::leaf("התראות"));
        TranslationNode::Branch(root)
    }

    #[test]
    fn output_is_pretty_sorted_and_newline_terminated() {
        let text = serialize(&sample_tree());
        assert_eq!(
            text,
            "{\n  \"adminBookings\": {\n    \"status\": {\n      \"confirmed\": \"מאושר\"\n    }\n  },\n  \"notifications\": \"התראות\"\n}\n"
        );
    }

    #[test]
    fn identical_trees_produce_identical_bytes() {
        assert_eq!(serialize(&sample_tree()), serialize(&sample_tree()));
    }

    #[test]
    fn round_trips_through_deserialize() {
        let tree = sample_tree();
        assert_eq!(deserialize(&serialize(&tree)).unwrap(), tree);
    }

    #[test]
    fn canonical_form_is_a_fixed_point() {
        // A flat document canonicalizes once; after that, re-encoding is stable.
        let canonical = serialize(&deserialize(r#"{"a.b": "x", "a.c": "y"}"#).unwrap());
        let again = serialize(&deserialize(&canonical).unwrap());
        assert_eq!(canonical, again);
    }

    #[test]
    fn empty_tree_serializes_to_empty_object() {
        assert_eq!(serialize(&TranslationNode::branch()), "{}\n");
    }

    #[test]
    fn leaf_root_serializes_to_bare_string_which_is_not_a_document() {
        let text = serialize(&TranslationNode::leaf("שלום"));
        assert_eq!(text, "\"שלום\"\n");
        assert!(matches!(
            deserialize(&text),
            Err(crate::CodecError::RootNotObject)
        ));
    }

    fn arb_node() -> impl Strategy<Value = TranslationNode> {
        let leaf = "[a-zא-ת ]{0,12}".prop_map(TranslationNode::leaf);
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9_]{0,8}", inner, 1..6)
                .prop_map(TranslationNode::Branch)
        })
    }

    fn arb_tree() -> impl Strategy<Value = TranslationNode> {
        prop::collection::btree_map("[a-zA-Z][a-zA-Z0-9_]{0,8}", arb_node(), 0..6)
            .prop_map(TranslationNode::Branch)
    }

    proptest! {
        #[test]
        fn round_trip_holds_for_arbitrary_trees(tree in arb_tree()) {
            let parsed = deserialize(&serialize(&tree)).unwrap();
            prop_assert_eq!(parsed, tree);
        }

        #[test]
        fn serialization_is_stable(tree in arb_tree()) {
            prop_assert_eq!(serialize(&tree), serialize(&tree));
        }
    }
}
