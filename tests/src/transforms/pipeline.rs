use shroud_core::options::{ENCRYPTION_KEY, KEY};
use shroud_core::{symbols, OptionSet};
use shroud_transform::obfuscator::{KeySource, ObfuscationConfig, Obfuscator};
use shroud_transform::templates::ANTI_DEBUG_STUB;
use shroud_transform::PassConfig;

const PROGRAM: &str = r#"public class Inventory {
    private int count;
    public void add(String item) {
        if (item != null) { count = count + 1; } else { log("skip"); }
    }
    public Class<?> loader() throws Exception {
        return Class.forName("com.acme.Plugin");
    }
}
"#;

#[test]
fn test_foo_renamed_identically_across_calls() {
    crate::init_tracing();
    let mut obfuscator = Obfuscator::default();
    obfuscator.process_default("int foo = 1;\n").unwrap();
    let name = obfuscator.rename_table().get("foo").unwrap().to_string();

    let second = obfuscator
        .process("void run() {\n    foo = foo + 1;\n}\n", &OptionSet::new())
        .unwrap();
    assert_eq!(obfuscator.rename_table().get("foo"), Some(name.as_str()));
    assert!(second.contains(&format!("{name} = {name} + 1")));
}

#[test]
fn test_table_never_holds_protected_names() {
    let mut obfuscator = Obfuscator::default();
    for _ in 0..5 {
        obfuscator.process_default(PROGRAM).unwrap();
    }
    for (original, renamed) in obfuscator.rename_table().iter() {
        assert!(!symbols::is_reserved(original), "{original}");
        assert!(!symbols::is_std_class(original), "{original}");
        assert!(!symbols::is_protected(renamed), "{renamed}");
    }
}

#[test]
fn test_full_pipeline_report() {
    let mut obfuscator = Obfuscator::new(OptionSet::new().with(ENCRYPTION_KEY, "configured-key"));
    let result = obfuscator
        .process_with_report(PROGRAM, &OptionSet::new().with(KEY, "call-key"))
        .unwrap();

    let names: Vec<&str> = result.metadata.passes.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "StringEncryption",
            "TypeRename",
            "ReflectionObfuscation",
            "IdentifierRename",
            "ControlFlowFlattening",
            "DeadCodeInjection",
            "AntiDebug",
        ]
    );
    assert_eq!(result.metadata.key_source, KeySource::Call);
    assert!(result.obfuscated_code.starts_with(ANTI_DEBUG_STUB));
    assert!(!result.obfuscated_code.contains("\"skip\""));
    assert!(!result.obfuscated_code.contains("Inventory"));
    assert_eq!(result.stats.literals_encrypted, 2);
    assert_eq!(result.stats.types_renamed, 2);
    assert_eq!(result.stats.branches_flattened, 1);
    // no `main` in this unit
    assert!(!result.stats.entry_point_hooked);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["metadata"]["key_source"], "call");
    assert_eq!(json["metadata"]["integrity_hash"].as_str().map(str::len), Some(64));
}

#[test]
fn test_reflection_literal_already_encrypted_by_string_pass() {
    let mut obfuscator = Obfuscator::default();
    let result = obfuscator
        .process_with_report(PROGRAM, &OptionSet::new())
        .unwrap();
    // the literal pass runs first, so `Class.forName` no longer sees a literal
    assert_eq!(result.stats.reflection_calls, 0);
    assert!(!result.obfuscated_code.contains("com.acme.Plugin"));
}

#[test]
fn test_reflection_only_pipeline_uses_configured_key() {
    let config = ObfuscationConfig {
        options: OptionSet::new().with(ENCRYPTION_KEY, "configured-key"),
        passes: PassConfig {
            encrypt_strings: false,
            rename_types: false,
            rename_identifiers: false,
            flatten_control_flow: false,
            inject_dead_code: false,
            anti_debug: false,
            ..PassConfig::default()
        },
    };
    let mut obfuscator = Obfuscator::from_config(config);
    let result = obfuscator
        .process_with_report(PROGRAM, &OptionSet::new().with(KEY, "call-key"))
        .unwrap();

    assert_eq!(result.stats.reflection_calls, 1);
    assert!(result
        .obfuscated_code
        .contains(r#"", "configured-key"))"#));
    assert!(!result.obfuscated_code.contains("call-key"));
}
