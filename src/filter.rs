//! Term sanitization and whole-word include/exclude filtering.

use regex::Regex;

/// Whether a term is a meaningful search phrase at all.
///
/// Rejects spreadsheet formula-error artifacts (`#NAME?`, `#REF!`), purely
/// numeric or scientific-notation noise (`12345`, `9.78E+12`, `-3.2`),
/// near-empty fragments, and anything without a single ASCII letter.
#[must_use]
pub fn sanitize_term(term: &str) -> bool {
    let term = term.trim();
    if term.chars().count() < 2 || term.starts_with('#') {
        return false;
    }
    let numeric_noise = term
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if numeric_noise {
        return false;
    }
    term.chars().any(|c| c.is_ascii_alphabetic())
}

/// Compiled include/exclude phrase filter with whole-word semantics:
/// `trump` matches "trump pillow" but not "trumpet".
#[derive(Debug, Default)]
pub struct TermFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl TermFilter {
    /// Parse comma- and/or whitespace-separated phrase lists into compiled
    /// word-boundary matchers. `None` or all-blank input compiles to an
    /// empty list.
    #[must_use]
    pub fn parse(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include: compile_phrases(include),
            exclude: compile_phrases(exclude),
        }
    }

    /// Whether `term` survives the filter. Exclude is evaluated first and
    /// short-circuits; with no include phrases every remaining term passes,
    /// otherwise at least one include phrase must match.
    #[must_use]
    pub fn passes(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if self.exclude.iter().any(|phrase| phrase.is_match(&term)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|phrase| phrase.is_match(&term))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

fn compile_phrases(raw: Option<&str>) -> Vec<Regex> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .filter_map(|phrase| {
            let pattern = format!(r"\b{}\b", regex::escape(&phrase.to_lowercase()));
            Regex::new(&pattern).ok()
        })
        .collect()
}
