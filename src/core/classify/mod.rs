//! core::classify
//!
//! Decides whether a free-text task needs the high-context remote path.
//!
//! # Rules
//!
//! Classification walks [`RULES`] in order and stops at the first rule that
//! fires:
//!
//! 1. Empty task → local
//! 2. High-context phrase → remote
//! 3. File-scope pattern (`**/*`, `*.rs`, "all rust files") → remote
//! 4. Low-context phrase → local
//! 5. Five words or fewer → local
//! 6. More than 3 distinct file extensions → remote
//! 7. More than 2 distinct directory prefixes → remote
//! 8. Two or more complexity words → remote
//! 9. Otherwise → local
//!
//! Explicit phrases dominate the density heuristics, and the fallback is the
//! cheap path. Stage 2 and 3 run before stage 4, so a task that mentions both
//! "entire codebase" and "just" goes remote.
//!
//! # Invariants
//!
//! - Classification is pure and total: every `&str` yields a [`Route`].
//! - [`explain`] renders the same [`Classification`] that [`classify`]
//!   returns, so the explanation can never disagree with the decision.
//!
//! # Example
//!
//! ```
//! use claude_auto::core::classify::{classify, explain, evaluate, RuleId};
//! use claude_auto::core::types::Route;
//!
//! assert_eq!(classify("Review the ENTIRE codebase"), Route::Remote);
//! assert_eq!(classify("fix this function"), Route::Local);
//!
//! let c = evaluate("please fix this function");
//! assert_eq!(c.rule, RuleId::LowContextPhrase);
//! assert_eq!(explain("please fix this function"), "Simple task keywords: fix this");
//! ```

pub mod lexicon;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::Route;

use lexicon::{COMPLEXITY_WORDS, DIRECTORY_PREFIXES, LOW_CONTEXT_PHRASES};

/// Tasks with this many words or fewer are treated as narrow.
pub const SHORT_TASK_MAX_WORDS: usize = 5;

/// More distinct file extensions than this suggests a multi-file task.
pub const EXTENSION_THRESHOLD: usize = 3;

/// More distinct directory prefixes than this suggests a multi-module task.
pub const DIRECTORY_THRESHOLD: usize = 2;

/// This many distinct complexity words suggests a system-level task.
pub const COMPLEXITY_THRESHOLD: usize = 2;

/// How many high-context matches an explanation lists.
const HIGH_CONTEXT_REPORT_LIMIT: usize = 3;

/// How many low-context matches an explanation lists.
const LOW_CONTEXT_REPORT_LIMIT: usize = 2;

static FILE_SCOPE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("**/*", r"\*\*/\*"),
        ("*.ext", r"\*\.\w+"),
        ("all <kind> files", r"(?i)all\s+\w+\s+files"),
        ("every <kind> file", r"(?i)every\s+\w+\s+file"),
    ]
    .into_iter()
    .map(|(label, pattern)| {
        (
            label,
            Regex::new(pattern).expect("file scope pattern is a valid regex"),
        )
    })
    .collect()
});

// ASCII word boundary to match the ASCII class: `.jsé` counts as `.js`.
static FILE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.[A-Za-z0-9_]{2,4}(?-u:\b)")
        .expect("file extension pattern is a valid regex")
});

/// Identifies the rule that produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleId {
    InputValidity,
    HighContextPhrase,
    FileScopePattern,
    LowContextPhrase,
    WordCountFloor,
    FileExtensionDensity,
    DirectoryDensity,
    ComplexityDensity,
    Default,
}

impl RuleId {
    /// Stable kebab-case name, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::InputValidity => "input-validity",
            RuleId::HighContextPhrase => "high-context-phrase",
            RuleId::FileScopePattern => "file-scope-pattern",
            RuleId::LowContextPhrase => "low-context-phrase",
            RuleId::WordCountFloor => "word-count-floor",
            RuleId::FileExtensionDensity => "file-extension-density",
            RuleId::DirectoryDensity => "directory-density",
            RuleId::ComplexityDensity => "complexity-density",
            RuleId::Default => "default",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The evidence a rule found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    /// Task was empty or whitespace only.
    EmptyTask,
    /// High-context phrases, in lexicon order.
    HighContextPhrases(Vec<&'static str>),
    /// Label of the first file-scope pattern that matched.
    FileScopePattern(&'static str),
    /// Low-context phrases, in lexicon order.
    LowContextPhrases(Vec<&'static str>),
    /// Task was short enough to be assumed narrow.
    ShortTask { words: usize },
    /// Distinct file extensions referenced by the task.
    FileExtensions(Vec<String>),
    /// Distinct directory prefixes referenced by the task.
    DirectoryReferences(Vec<&'static str>),
    /// Distinct complexity words in the task.
    ComplexityKeywords(Vec<&'static str>),
    /// No rule fired.
    NoStrongSignal,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::EmptyTask => write!(f, "No task provided"),
            Reason::HighContextPhrases(found) => write!(
                f,
                "Detected high-context keywords: {}",
                first_n(found, HIGH_CONTEXT_REPORT_LIMIT)
            ),
            Reason::FileScopePattern(label) => {
                write!(f, "File scope pattern detected ({})", label)
            }
            Reason::LowContextPhrases(found) => write!(
                f,
                "Simple task keywords: {}",
                first_n(found, LOW_CONTEXT_REPORT_LIMIT)
            ),
            Reason::ShortTask { words } => {
                write!(f, "Short task ({} words) appears simple/focused", words)
            }
            Reason::FileExtensions(found) => {
                write!(f, "Multiple file references detected ({})", found.len())
            }
            Reason::DirectoryReferences(found) => write!(
                f,
                "Multiple directory references detected: {}",
                found.join(", ")
            ),
            Reason::ComplexityKeywords(found) => write!(
                f,
                "Task complexity indicates need for high context ({})",
                found.join(", ")
            ),
            Reason::NoStrongSignal => write!(f, "Task appears to be simple/focused"),
        }
    }
}

fn first_n<T: AsRef<str>>(items: &[T], n: usize) -> String {
    let parts: Vec<&str> = items.iter().take(n).map(|item| item.as_ref()).collect();
    parts.join(", ")
}

/// Outcome of classifying one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Where the task should run, before cost controls.
    pub route: Route,
    /// The rule that decided.
    pub rule: RuleId,
    /// What the rule found.
    pub reason: Reason,
}

impl Classification {
    /// Human-readable reason for the decision.
    pub fn explanation(&self) -> String {
        self.reason.to_string()
    }
}

/// A task prepared for matching: the original text plus a lowercased copy.
#[derive(Debug)]
pub struct TaskText<'a> {
    original: &'a str,
    lower: String,
}

impl<'a> TaskText<'a> {
    pub fn new(original: &'a str) -> Self {
        Self {
            original,
            lower: original.to_lowercase(),
        }
    }

    fn contains_any(&self, table: &'static [&'static str]) -> Vec<&'static str> {
        table
            .iter()
            .copied()
            .filter(|entry| self.lower.contains(entry))
            .collect()
    }

    fn word_count(&self) -> usize {
        self.original.split_whitespace().count()
    }
}

/// One entry in the ordered rule table.
pub struct Rule {
    pub id: RuleId,
    /// Route returned when the rule fires.
    pub route: Route,
    check: fn(&TaskText<'_>) -> Option<Reason>,
}

impl Rule {
    /// Evaluate this rule alone against a task.
    pub fn check(&self, task: &TaskText<'_>) -> Option<Reason> {
        (self.check)(task)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("route", &self.route)
            .finish()
    }
}

/// Classification rules in precedence order. The last rule always fires.
pub const RULES: &[Rule] = &[
    Rule {
        id: RuleId::InputValidity,
        route: Route::Local,
        check: check_empty,
    },
    Rule {
        id: RuleId::HighContextPhrase,
        route: Route::Remote,
        check: check_high_context,
    },
    Rule {
        id: RuleId::FileScopePattern,
        route: Route::Remote,
        check: check_file_scope,
    },
    Rule {
        id: RuleId::LowContextPhrase,
        route: Route::Local,
        check: check_low_context,
    },
    Rule {
        id: RuleId::WordCountFloor,
        route: Route::Local,
        check: check_short,
    },
    Rule {
        id: RuleId::FileExtensionDensity,
        route: Route::Remote,
        check: check_extensions,
    },
    Rule {
        id: RuleId::DirectoryDensity,
        route: Route::Remote,
        check: check_directories,
    },
    Rule {
        id: RuleId::ComplexityDensity,
        route: Route::Remote,
        check: check_complexity,
    },
    Rule {
        id: RuleId::Default,
        route: Route::Local,
        check: check_default,
    },
];

fn check_empty(task: &TaskText<'_>) -> Option<Reason> {
    task.original.trim().is_empty().then_some(Reason::EmptyTask)
}

fn check_high_context(task: &TaskText<'_>) -> Option<Reason> {
    let found: Vec<_> = lexicon::high_context_phrases()
        .filter(|phrase| task.lower.contains(phrase))
        .collect();
    (!found.is_empty()).then_some(Reason::HighContextPhrases(found))
}

fn check_file_scope(task: &TaskText<'_>) -> Option<Reason> {
    FILE_SCOPE_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(task.original))
        .map(|(label, _)| Reason::FileScopePattern(*label))
}

fn check_low_context(task: &TaskText<'_>) -> Option<Reason> {
    let found = task.contains_any(LOW_CONTEXT_PHRASES);
    (!found.is_empty()).then_some(Reason::LowContextPhrases(found))
}

fn check_short(task: &TaskText<'_>) -> Option<Reason> {
    let words = task.word_count();
    (words <= SHORT_TASK_MAX_WORDS).then_some(Reason::ShortTask { words })
}

fn check_extensions(task: &TaskText<'_>) -> Option<Reason> {
    let distinct: BTreeSet<&str> = FILE_EXTENSION
        .find_iter(task.original)
        .map(|m| m.as_str())
        .collect();
    (distinct.len() > EXTENSION_THRESHOLD).then(|| {
        Reason::FileExtensions(distinct.into_iter().map(str::to_string).collect())
    })
}

fn check_directories(task: &TaskText<'_>) -> Option<Reason> {
    let found = task.contains_any(DIRECTORY_PREFIXES);
    (found.len() > DIRECTORY_THRESHOLD).then_some(Reason::DirectoryReferences(found))
}

fn check_complexity(task: &TaskText<'_>) -> Option<Reason> {
    let found = task.contains_any(COMPLEXITY_WORDS);
    (found.len() >= COMPLEXITY_THRESHOLD).then_some(Reason::ComplexityKeywords(found))
}

fn check_default(_task: &TaskText<'_>) -> Option<Reason> {
    Some(Reason::NoStrongSignal)
}

/// Run the rule table and return the full classification trace.
pub fn evaluate(task: &str) -> Classification {
    let text = TaskText::new(task);
    RULES
        .iter()
        .find_map(|rule| {
            rule.check(&text).map(|reason| Classification {
                route: rule.route,
                rule: rule.id,
                reason,
            })
        })
        .unwrap_or(Classification {
            route: Route::Local,
            rule: RuleId::Default,
            reason: Reason::NoStrongSignal,
        })
}

/// Classify a task into remote or local.
pub fn classify(task: &str) -> Route {
    evaluate(task).route
}

/// Explain why a task classifies the way it does.
pub fn explain(task: &str) -> String {
    evaluate(task).explanation()
}
