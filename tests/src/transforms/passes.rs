use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use shroud_core::{cipher, RenameTable, SourceUnit};
use shroud_transform::control_flow::ControlFlowFlattening;
use shroud_transform::dead_code::DeadCodeInjection;
use shroud_transform::identifier_rename::IdentifierRename;
use shroud_transform::string_encryption::StringEncryption;
use shroud_transform::templates::{DEAD_CODE_SNIPPETS, DECRYPTOR_STUB};
use shroud_transform::{PassConfig, Transform};

fn run_pass(pass: &dyn Transform, code: &str, seed: u64) -> (String, shroud_core::UnitStats) {
    crate::init_tracing();
    let mut table = RenameTable::new();
    let mut unit = SourceUnit::new(code, &mut table);
    let mut rng = StdRng::seed_from_u64(seed);
    pass.apply(&mut unit, &mut rng).unwrap();
    let stats = unit.stats.clone();
    (unit.into_code(), stats)
}

#[test]
fn test_hello_literal_with_key_k() {
    let pass = StringEncryption::new("k").unwrap();
    let (out, stats) = run_pass(&pass, "String greeting = \"hello\";\n", 1);

    assert!(!out.contains("\"hello\""));
    assert!(out.starts_with(DECRYPTOR_STUB));
    assert_eq!(stats.literals_encrypted, 1);

    let decl = Regex::new(
        r#"private static final String _str_0 = StringDecryptor\.decrypt\("([^"]+)", "k"\);"#,
    )
    .unwrap();
    let all: Vec<_> = decl.captures_iter(&out).collect();
    assert_eq!(all.len(), 1);
    assert_eq!(cipher::decrypt(&all[0][1], "k").as_deref(), Some("hello"));
    assert!(out.find("class StringDecryptor") < out.find("_str_0 ="));
}

#[test]
fn test_declaration_count_matches_literals() {
    let pass = StringEncryption::new("key").unwrap();
    let code = "a(\"one\");\nb(\"two\", \"three\");\nc(\"\");\n";
    let encrypted = pass.encrypt_literals(code);

    assert_eq!(encrypted.declarations.len(), 4);
    assert_eq!(
        encrypted.code.matches("private static final String _str_").count(),
        encrypted.declarations.len()
    );
    for decl in &encrypted.declarations {
        let content = &decl.literal[1..decl.literal.len() - 1];
        assert_eq!(cipher::decrypt(&decl.envelope, "key").as_deref(), Some(content));
    }
}

#[test]
fn test_if_else_flattened_to_switch() {
    let pass = ControlFlowFlattening::new().unwrap();
    let (out, stats) = run_pass(&pass, "if (x > 0) { y = 1; } else { y = 2; }", 3);

    assert_eq!(stats.branches_flattened, 1);
    let shape = Regex::new(
        r"(?s)^int (_sw\d+) = \(x > 0\) \? 1 : 0;\nswitch \((_sw\d+)\) \{\n    case 1:\n.*y = 1;.*default:\n.*y = 2;.*\}$",
    )
    .unwrap();
    let caps = shape.captures(&out).unwrap();
    assert_eq!(&caps[1], &caps[2]);
    assert!(out.find("case 1:") < out.find("default:"));
}

#[test]
fn test_counter_renamed_at_every_site() {
    let pass = IdentifierRename::new().unwrap();
    let code = "int counter = 0;\ncounter = counter + 1;\n";
    let mut table = RenameTable::new();
    let mut unit = SourceUnit::new(code, &mut table);
    let mut rng = StdRng::seed_from_u64(5);
    pass.apply(&mut unit, &mut rng).unwrap();
    let out = unit.into_code();

    let name = table.get("counter").unwrap();
    assert_ne!(name, "counter");
    assert_eq!(out, format!("int {name} = 0;\n{name} = {name} + 1;\n"));
}

#[test]
fn test_five_openings_get_three_snippets() {
    let code = "class A {\n    void a() {\n    }\n    void b() {\n    }\n    void c() {\n    }\n    void d() {\n    }\n}\n";
    assert_eq!(code.matches("{\n").count(), 5);

    for seed in 0..20 {
        let pass = DeadCodeInjection::new(&PassConfig::default()).unwrap();
        let (out, stats) = run_pass(&pass, code, seed);
        assert_eq!(stats.dead_code_insertions, 3);

        // every insertion sits right after one of the first three openings
        let mut parts: Vec<String> = out.split("{\n").map(str::to_string).collect();
        assert_eq!(parts.len(), 6);
        for part in &mut parts[1..4] {
            let snippet = DEAD_CODE_SNIPPETS
                .iter()
                .find(|s| part.starts_with(**s))
                .unwrap_or_else(|| panic!("no snippet at start of {part:?}"));
            part.replace_range(..snippet.len(), "");
        }
        for part in &parts[4..] {
            assert!(DEAD_CODE_SNIPPETS.iter().all(|s| !part.starts_with(*s)));
        }
        assert_eq!(parts.join("{\n"), code);
    }
}
