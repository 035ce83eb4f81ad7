//! Case-rule provider: the comparison primitives used by matching.
//!
//! Every comparison the engines perform goes through a [`CaseRule`] so the
//! sensitive/insensitive choice is made exactly once at startup. Insensitive
//! comparison folds each `char` with its full Unicode lowercase mapping.
//! Offsets and lengths are counted in `char`s, never bytes.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseRule {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseRule {
    pub fn from_insensitive_flag(insensitive: bool) -> Self {
        if insensitive {
            CaseRule::Insensitive
        } else {
            CaseRule::Sensitive
        }
    }

    #[inline]
    pub fn chars_eq(self, a: char, b: char) -> bool {
        match self {
            CaseRule::Sensitive => a == b,
            CaseRule::Insensitive => a == b || a.to_lowercase().eq(b.to_lowercase()),
        }
    }

    /// Full-string equality under this rule.
    pub fn eq(self, a: &str, b: &str) -> bool {
        match self {
            CaseRule::Sensitive => a == b,
            CaseRule::Insensitive => {
                let mut lhs = a.chars();
                let mut rhs = b.chars();
                loop {
                    match (lhs.next(), rhs.next()) {
                        (None, None) => return true,
                        (Some(x), Some(y)) if self.chars_eq(x, y) => {}
                        _ => return false,
                    }
                }
            }
        }
    }

    /// `text` begins with `prefix` under this rule.
    pub fn starts_with(self, text: &str, prefix: &str) -> bool {
        let mut chars = text.chars();
        prefix
            .chars()
            .all(|p| chars.next().is_some_and(|t| self.chars_eq(t, p)))
    }

    /// Bounded compare: the two strings agree on their first `min(len(a), len(b))`
    /// chars, i.e. one is a prefix of the other.
    pub fn eq_within_shorter(self, a: &str, b: &str) -> bool {
        a.chars().zip(b.chars()).all(|(x, y)| self.chars_eq(x, y))
    }

    /// Substring search. Returns the byte offset of the first occurrence.
    pub fn find(self, haystack: &str, needle: &str) -> Option<usize> {
        match self {
            CaseRule::Sensitive => haystack.find(needle),
            CaseRule::Insensitive => {
                if needle.is_empty() {
                    return Some(0);
                }
                haystack
                    .char_indices()
                    .map(|(idx, _)| idx)
                    .find(|&idx| self.starts_with(&haystack[idx..], needle))
            }
        }
    }

    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        self.find(haystack, needle).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_rules() {
        let r = CaseRule::Sensitive;
        assert!(r.eq("foo", "foo"));
        assert!(!r.eq("foo", "Foo"));
        assert!(r.starts_with("foobar", "foo"));
        assert!(!r.starts_with("fo", "foo"));
        assert!(r.contains("barfoo", "foo"));
        assert!(!r.contains("barFoo", "foo"));
    }

    #[test]
    fn insensitive_rules() {
        let r = CaseRule::Insensitive;
        assert!(r.eq("FOO", "foo"));
        assert!(!r.eq("FOO", "fooo"));
        assert!(r.starts_with("FooBar", "foob"));
        assert_eq!(r.find("xxBARfoo", "bar"), Some(2));
        assert!(r.contains("ÄPFEL", "äpf"));
    }

    #[test]
    fn bounded_compare_uses_shorter_length() {
        let r = CaseRule::Sensitive;
        assert!(r.eq_within_shorter("fire", "firefox"));
        assert!(r.eq_within_shorter("firefox", "fire"));
        assert!(!r.eq_within_shorter("fira", "firefox"));
        // Empty side compares equal to anything.
        assert!(r.eq_within_shorter("", "anything"));
        assert!(CaseRule::Insensitive.eq_within_shorter("FIRE", "firefox"));
    }

    #[test]
    fn empty_needle_is_found_at_zero() {
        assert_eq!(CaseRule::Sensitive.find("abc", ""), Some(0));
        assert_eq!(CaseRule::Insensitive.find("abc", ""), Some(0));
        assert_eq!(CaseRule::Insensitive.find("", ""), Some(0));
    }
}
