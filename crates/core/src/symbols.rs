//! Classification of source tokens into renameable and protected symbols.

/// Java reserved words and literals; never renamed.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

/// Standard library types that must keep their names.
pub const STD_CLASSES: &[&str] = &[
    "String",
    "Object",
    "Class",
    "System",
    "Math",
    "Integer",
    "Double",
    "Float",
    "Long",
    "Boolean",
    "Character",
    "Byte",
    "Short",
    "ArrayList",
    "HashMap",
    "HashSet",
    "LinkedList",
    "TreeMap",
    "TreeSet",
    "Vector",
    "Hashtable",
    "StringBuilder",
    "StringBuffer",
    "Exception",
    "RuntimeException",
    "IOException",
    "FileInputStream",
    "FileOutputStream",
    "BufferedReader",
    "BufferedWriter",
    "PrintWriter",
    "Scanner",
];

pub fn is_reserved(token: &str) -> bool {
    RESERVED_KEYWORDS.contains(&token)
}

pub fn is_std_class(token: &str) -> bool {
    STD_CLASSES.contains(&token)
}

/// Returns true if `token` must never be renamed: a reserved word, a standard
/// library type, or a single character.
pub fn is_protected(token: &str) -> bool {
    is_reserved(token) || is_std_class(token) || token.chars().count() <= 1
}
