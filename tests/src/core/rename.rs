use rand::rngs::StdRng;
use rand::SeedableRng;
use shroud_core::symbols::{self, RESERVED_KEYWORDS, STD_CLASSES};
use shroud_core::RenameTable;

#[test]
fn test_protected_symbols_refused() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut table = RenameTable::new();

    for word in RESERVED_KEYWORDS.iter().chain(STD_CLASSES) {
        assert!(table.assign(word, &mut rng).is_none(), "{word} was assigned");
    }
    assert!(table.assign("x", &mut rng).is_none());
    assert!(table.is_empty());
}

#[test]
fn test_assignment_is_permanent() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut table = RenameTable::new();

    let first = table.assign("counter", &mut rng).map(str::to_string);
    for _ in 0..10 {
        table.assign("other", &mut rng);
        assert_eq!(table.get("counter").map(str::to_string), first);
    }
    assert_eq!(table.assign("counter", &mut rng).map(str::to_string), first);
    assert_eq!(table.len(), 2);
}

#[test]
fn test_mapping_serializes_as_object() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut table = RenameTable::new();
    table.assign("alpha", &mut rng);
    table.assign("String", &mut rng);

    let json = serde_json::to_value(&table).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(object["alpha"], table.get("alpha").unwrap());
    assert!(!symbols::is_protected(object["alpha"].as_str().unwrap()));
}
