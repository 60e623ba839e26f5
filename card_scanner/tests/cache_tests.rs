use card_scanner::{CardRecord, LookupCache};
use std::time::Instant;

fn record(i: usize) -> CardRecord {
    CardRecord::new(format!("Card {i}"), "Bulk", "blk", Some(i.to_string()))
}

#[test]
fn test_default_cache_stays_bounded_under_many_inserts() {
    let mut cache = LookupCache::default();

    let start = Instant::now();
    for i in 0..10_000 {
        cache.put(&format!("Card {i}"), record(i));
    }
    let duration = start.elapsed();

    println!("10,000 inserts into a 500-entry cache took {:?}", duration);
    assert_eq!(cache.len(), 500);
    assert_eq!(cache.keys_in_order().count(), 500);

    // Exactly the 500 most recent insertions survive
    assert!(cache.get("card 9499").is_none());
    assert!(cache.get("card 9500").is_some());
    assert!(cache.get("CARD 9999").is_some());
}

#[test]
fn test_repeated_reinsert_does_not_drift() {
    let mut cache = LookupCache::new(3);
    cache.put("a", record(0));
    cache.put("b", record(1));

    for _ in 0..100 {
        cache.put("b", record(1));
    }
    cache.put("c", record(2));
    cache.put("d", record(3));

    // "a" was the oldest distinct insertion; "b" was refreshed and survives
    assert!(cache.get("a").is_none());
    assert!(cache.get("b").is_some());
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys_in_order().collect::<Vec<_>>(), vec!["b", "c", "d"]);
}
