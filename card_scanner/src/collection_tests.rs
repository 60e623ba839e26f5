//! Tests for collection merging and editing.

use super::*;

fn bolt() -> CardRecord {
    CardRecord::new("Lightning Bolt", "Magic 2010", "m10", Some("33452".to_string()))
}

fn card(name: &str, set_code: &str) -> CardRecord {
    CardRecord::new(name, "Test Set", set_code, None)
}

#[test]
fn test_first_add_creates_entry_with_defaults() {
    let mut collection = Collection::new();
    let entry = collection.add(bolt());

    assert_eq!(collection.len(), 1);
    assert_eq!(entry.quantity, 1);
    assert_eq!(entry.condition, CardCondition::NearMint);
    assert!(!entry.is_foil);
    assert_eq!(entry.external_id.as_deref(), Some("33452"));
    assert_eq!(collection.entries()[0].id, entry.id);
}

#[test]
fn test_same_tuple_twice_increments() {
    let mut collection = Collection::new();
    let first = collection.add(bolt());
    let second = collection.add(bolt());

    assert_eq!(collection.len(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.quantity, 2);
    assert_eq!(collection.entries()[0].quantity, 2);
}

#[test]
fn test_new_entries_are_prepended() {
    let mut collection = Collection::new();
    collection.add(card("Opt", "xln"));
    collection.add(card("Ponder", "m12"));
    collection.add(card("Brainstorm", "ice"));

    let names: Vec<&str> = collection.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Brainstorm", "Ponder", "Opt"]);
}

#[test]
fn test_increment_keeps_position() {
    let mut collection = Collection::new();
    collection.add(card("Opt", "xln"));
    collection.add(card("Ponder", "m12"));
    collection.add(card("Opt", "xln"));

    assert_eq!(collection.entries()[1].name, "Opt");
    assert_eq!(collection.entries()[1].quantity, 2);
}

#[test]
fn test_condition_foil_and_set_distinguish_entries() {
    let mut collection = Collection::new();
    collection.add_or_increment(bolt(), CardCondition::NearMint, false);
    collection.add_or_increment(bolt(), CardCondition::NearMint, true);
    collection.add_or_increment(bolt(), CardCondition::Damaged, false);
    collection.add(card("Lightning Bolt", "lea"));

    assert_eq!(collection.len(), 4);
    assert_eq!(collection.total_quantity(), 4);
}

#[test]
fn test_set_name_and_sku_do_not_affect_matching() {
    let mut collection = Collection::new();
    collection.add(bolt());
    collection.add(CardRecord::new("Lightning Bolt", "Other Name", "m10", None));

    assert_eq!(collection.len(), 1);
    assert_eq!(collection.entries()[0].quantity, 2);
}

#[test]
fn test_update_into_existing_tuple_merges_entries() {
    let mut collection = Collection::new();
    let near_mint = collection.add(bolt());
    let played = collection.add_or_increment(bolt(), CardCondition::LightlyPlayed, false);
    collection.add(card("Opt", "xln"));

    assert!(collection.update_card(played.id, CardCondition::NearMint, false, 2));

    let same_tuple = collection
        .entries()
        .iter()
        .filter(|e| e.matches(&bolt(), CardCondition::NearMint, false))
        .count();
    assert_eq!(same_tuple, 1);
    assert_eq!(collection.len(), 2);
    assert!(collection.get(played.id).is_none());
    assert_eq!(collection.get(near_mint.id).unwrap().quantity, 3);

    // Later scans keep incrementing the surviving entry
    let bumped = collection.add(bolt());
    assert_eq!(bumped.id, near_mint.id);
    assert_eq!(bumped.quantity, 4);
}

#[test]
fn test_update_merges_into_entry_listed_before_the_edited_one() {
    let mut collection = Collection::new();
    let foil = collection.add_or_increment(bolt(), CardCondition::NearMint, true);
    let plain = collection.add(bolt());
    // Newest first: plain sits before foil
    assert_eq!(collection.entries()[0].id, plain.id);

    assert!(collection.update_card(foil.id, CardCondition::NearMint, false, 1));
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.entries()[0].id, plain.id);
    assert_eq!(collection.entries()[0].quantity, 2);
}

#[test]
fn test_update_keeping_own_tuple_does_not_merge() {
    let mut collection = Collection::new();
    let entry = collection.add(bolt());
    collection.add_or_increment(bolt(), CardCondition::LightlyPlayed, false);

    assert!(collection.update_card(entry.id, CardCondition::NearMint, false, 5));
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.get(entry.id).unwrap().quantity, 5);
}

#[test]
fn test_update_card_overwrites_fields() {
    let mut collection = Collection::new();
    let entry = collection.add(bolt());

    assert!(collection.update_card(entry.id, CardCondition::HeavilyPlayed, true, 7));

    let updated = collection.get(entry.id).unwrap();
    assert_eq!(updated.condition, CardCondition::HeavilyPlayed);
    assert!(updated.is_foil);
    assert_eq!(updated.quantity, 7);
    assert_eq!(updated.created_at, entry.created_at);
}

#[test]
fn test_update_unknown_id_is_noop() {
    let mut collection = Collection::new();
    collection.add(bolt());

    assert!(!collection.update_card(Uuid::new_v4(), CardCondition::Damaged, true, 3));
    assert_eq!(collection.entries()[0].quantity, 1);
    assert_eq!(collection.entries()[0].condition, CardCondition::NearMint);
}

#[test]
fn test_update_does_not_clamp_upper_bound() {
    let mut collection = Collection::new();
    let entry = collection.add(bolt());

    collection.update_card(entry.id, CardCondition::NearMint, false, 250);
    assert_eq!(collection.get(entry.id).unwrap().quantity, 250);
    assert!(!QUANTITY_RANGE.contains(&250));
}

#[test]
fn test_update_to_zero_removes_entry() {
    let mut collection = Collection::new();
    let entry = collection.add(bolt());
    collection.add(card("Opt", "xln"));

    assert!(collection.update_card(entry.id, CardCondition::NearMint, false, 0));
    assert_eq!(collection.len(), 1);
    assert!(collection.get(entry.id).is_none());
}

#[test]
fn test_delete_multiple_uses_original_positions() {
    let mut collection = Collection::new();
    for name in ["e", "d", "c", "b", "a"] {
        collection.add(card(name, "tst"));
    }
    // List is now a, b, c, d, e
    let removed = collection.delete_at(&[1, 3]);

    assert_eq!(removed, 2);
    let names: Vec<&str> = collection.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c", "e"]);
}

#[test]
fn test_delete_ignores_duplicates_and_out_of_range() {
    let mut collection = Collection::new();
    for name in ["c", "b", "a"] {
        collection.add(card(name, "tst"));
    }

    let removed = collection.delete_at(&[2, 2, 0, 10]);

    assert_eq!(removed, 2);
    assert_eq!(collection.entries()[0].name, "b");
}

#[test]
fn test_delete_empty_indices() {
    let mut collection = Collection::new();
    collection.add(bolt());

    assert_eq!(collection.delete_at(&[]), 0);
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_clear() {
    let mut collection = Collection::new();
    collection.add(bolt());
    collection.add(card("Opt", "xln"));

    collection.clear();
    assert!(collection.is_empty());
    assert_eq!(collection.total_quantity(), 0);
}

#[test]
fn test_entry_serializes_condition_code() {
    let mut collection = Collection::new();
    let entry = collection.add_or_increment(bolt(), CardCondition::LightlyPlayed, true);

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["condition"], "LP");
    assert_eq!(json["is_foil"], true);
    assert_eq!(json["quantity"], 1);
}
