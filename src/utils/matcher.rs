use regex::{Regex, RegexBuilder};

/// Compile a node-name pattern.
///
/// Patterns are always case-insensitive; an explicit `(?i)` prefix is
/// accepted and redundant.
pub fn compile_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Join two alternation patterns with `|`, skipping empty sides
pub fn join_patterns(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{}|{}", left, right),
    }
}
