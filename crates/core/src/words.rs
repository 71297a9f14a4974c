use regex::{Captures, Regex};
use std::borrow::Cow;

/// Matches Java-style identifiers bounded by word boundaries.
pub const WORD_PATTERN: &str = r"\b[A-Za-z_][A-Za-z0-9_]*\b";

/// Tokenizer for identifier-like words, used for collecting rename candidates and
/// for whole-word substitution.
#[derive(Debug, Clone)]
pub struct WordScanner {
    pattern: Regex,
}

impl WordScanner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(WORD_PATTERN)?,
        })
    }

    /// All word tokens of `text`, in order of appearance.
    pub fn words<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Replaces every whole word for which `lookup` returns a name.
    ///
    /// Substitution is a single left-to-right pass, so inserted names are never
    /// themselves looked up again.
    pub fn replace<'t, 'm, F>(&self, text: &'t str, lookup: F) -> Cow<'t, str>
    where
        F: Fn(&str) -> Option<&'m str>,
    {
        self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let word = &caps[0];
            match lookup(word) {
                Some(name) => name.to_string(),
                None => word.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_words() {
        let scanner = WordScanner::new().unwrap();
        assert_eq!(
            scanner.words("int _str_0 = a.b(x1, 2y);"),
            vec!["int", "_str_0", "a", "b", "x1"]
        );
    }

    #[test]
    fn test_replace_whole_words_only() {
        let scanner = WordScanner::new().unwrap();
        let map = HashMap::from([("foo".to_string(), "bar".to_string())]);
        let out = scanner.replace("foo food foo.x myfoo foo", |w| {
            map.get(w).map(String::as_str)
        });
        assert_eq!(out, "bar food bar.x myfoo bar");
    }

    #[test]
    fn test_replace_is_single_pass() {
        let scanner = WordScanner::new().unwrap();
        let map = HashMap::from([
            ("a1".to_string(), "b1".to_string()),
            ("b1".to_string(), "c1".to_string()),
        ]);
        let out = scanner.replace("a1 b1", |w| map.get(w).map(String::as_str));
        assert_eq!(out, "b1 c1");
    }
}
