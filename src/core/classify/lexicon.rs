//! core::classify::lexicon
//!
//! Fixed phrase and token tables consulted by the classification rules.
//!
//! Iteration order matters: explanations report the first matches in the
//! order listed here, so new entries go at the end of their group.
//! All entries are lowercase; tasks are lowercased once before matching.

/// High-context phrase groups, in match-reporting order.
pub const HIGH_CONTEXT_GROUPS: &[(&str, &[&str])] = &[
    ("scope", SCOPE),
    ("analysis depth", ANALYSIS_DEPTH),
    ("agent breadth", AGENT_BREADTH),
    ("context size", CONTEXT_SIZE),
    ("multi-file", MULTI_FILE),
    ("architecture", ARCHITECTURE),
    ("migration", MIGRATION),
    ("documentation", DOCUMENTATION),
];

const SCOPE: &[&str] = &[
    "entire codebase",
    "complete codebase",
    "whole codebase",
    "full codebase",
    "entire project",
    "complete project",
    "whole project",
    "full project",
    "entire repository",
    "complete repository",
    "whole repository",
    "full repository",
];

const ANALYSIS_DEPTH: &[&str] = &[
    "complete analysis",
    "comprehensive analysis",
    "full analysis",
    "thorough analysis",
    "detailed analysis",
    "in-depth analysis",
    "comprehensive review",
    "complete review",
    "full review",
    "thorough review",
];

const AGENT_BREADTH: &[&str] = &[
    "all agents",
    "multiple agents",
    "various agents",
    "different agents",
];

const CONTEXT_SIZE: &[&str] = &[
    "maximum context",
    "max context",
    "full context",
    "large context",
    "high context",
    "1m tokens",
    "1 million tokens",
    "maximum tokens",
    "max tokens",
];

const MULTI_FILE: &[&str] = &[
    "across all files",
    "all files",
    "every file",
    "multiple files",
    "many files",
    "various files",
    "different files",
];

const ARCHITECTURE: &[&str] = &[
    "system architecture",
    "overall architecture",
    "complete architecture",
    "system design",
    "overall design",
    "system overview",
    "project overview",
    "complete overview",
];

const MIGRATION: &[&str] = &[
    "migrate entire",
    "migrate complete",
    "migrate all",
    "refactor entire",
    "refactor complete",
    "refactor all",
    "restructure entire",
    "restructure complete",
];

const DOCUMENTATION: &[&str] = &[
    "complete documentation",
    "full documentation",
    "comprehensive documentation",
    "document entire",
    "document complete",
    "document all",
];

/// Phrases that mark a narrow, local task.
///
/// Matched as plain substrings, so `just` also fires inside `adjust`.
pub const LOW_CONTEXT_PHRASES: &[&str] = &[
    "fix this",
    "fix bug",
    "debug this",
    "help with this",
    "explain this",
    "what does this",
    "how does this",
    "single function",
    "one function",
    "this method",
    "this class",
    "small change",
    "quick fix",
    "simple",
    "just",
    "only",
];

/// Conventional directory prefixes counted by the directory-density rule.
pub const DIRECTORY_PREFIXES: &[&str] = &[
    "src/",
    "lib/",
    "components/",
    "pages/",
    "utils/",
    "services/",
    "models/",
    "controllers/",
    "views/",
];

/// System-level words counted by the complexity-density rule.
pub const COMPLEXITY_WORDS: &[&str] = &[
    "architecture",
    "structure",
    "organization",
    "relationships",
    "dependencies",
    "integration",
    "workflow",
    "pipeline",
    "framework",
    "system",
];

/// All high-context phrases flattened in reporting order.
pub fn high_context_phrases() -> impl Iterator<Item = &'static str> {
    HIGH_CONTEXT_GROUPS
        .iter()
        .flat_map(|(_, phrases)| phrases.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn all_tables() -> Vec<&'static str> {
        high_context_phrases()
            .chain(LOW_CONTEXT_PHRASES.iter().copied())
            .chain(DIRECTORY_PREFIXES.iter().copied())
            .chain(COMPLEXITY_WORDS.iter().copied())
            .collect()
    }

    #[test]
    fn tables_are_lowercase() {
        for entry in all_tables() {
            assert_eq!(entry, entry.to_lowercase(), "entry '{}' must be lowercase", entry);
        }
    }

    #[test]
    fn high_context_phrases_unique() {
        let phrases: Vec<_> = high_context_phrases().collect();
        let unique: HashSet<_> = phrases.iter().collect();
        assert_eq!(phrases.len(), unique.len());
    }

    #[test]
    fn flattening_preserves_group_order() {
        let phrases: Vec<_> = high_context_phrases().collect();
        assert_eq!(phrases.first(), Some(&"entire codebase"));
        assert_eq!(phrases.last(), Some(&"document all"));
        assert_eq!(phrases.len(), 64);
    }

    #[test]
    fn groups_are_nonempty() {
        for (name, phrases) in HIGH_CONTEXT_GROUPS {
            assert!(!phrases.is_empty(), "group '{}' is empty", name);
        }
    }
}
