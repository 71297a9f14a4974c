use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use shroud_core::names::generate_name;
use shroud_core::RenameTable;

proptest! {
    #[test]
    fn prop_generated_names_have_identifier_shape(seed in any::<u64>()) {
        let shape = Regex::new(r"^[A-Za-z][A-Za-z0-9]{7,14}$").unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..16 {
            let name = generate_name(&mut rng);
            prop_assert!(shape.is_match(&name), "{}", name);
        }
    }

    #[test]
    fn prop_table_never_reissues_a_name(seed in any::<u64>(), count in 1usize..200) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table = RenameTable::new();
        for i in 0..count {
            table.assign(&format!("ident{i}"), &mut rng);
        }
        let mut issued: Vec<&str> = table.iter().map(|(_, name)| name).collect();
        issued.sort_unstable();
        issued.dedup();
        prop_assert_eq!(issued.len(), count);
    }
}
