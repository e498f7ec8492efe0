//! Splits a command line into whitespace-separated tokens.
//!
//! Fields are separated by runs of space characters. There is no quoting or
//! escaping: `echo "a b"` yields the tokens `echo`, `"a`, `b"`.

/// Maximum number of arguments a command can receive.
pub const MAX_PARAMS: usize = 32;

/// Capacity of a token list: the command name plus its arguments.
pub const MAX_TOKENS: usize = MAX_PARAMS + 1;

/// Fixed-capacity list of slices borrowed from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens<'a> {
    items: [&'a str; MAX_TOKENS],
    len: usize,
    truncated: bool,
}

impl<'a> Tokens<'a> {
    /// Number of tokens kept.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a line that was empty or held only spaces.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if the line held more than [`MAX_TOKENS`] tokens and the rest
    /// were dropped.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.items[..self.len]
    }

    /// The command name, if any.
    pub fn name(&self) -> Option<&'a str> {
        self.as_slice().first().copied()
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[&'a str] {
        self.as_slice().get(1..).unwrap_or(&[])
    }
}

/// Split `line` on runs of spaces.
pub fn split(line: &str) -> Tokens<'_> {
    let mut tokens = Tokens { items: [""; MAX_TOKENS], len: 0, truncated: false };

    for word in line.split(' ').filter(|w| !w.is_empty()) {
        if tokens.len == MAX_TOKENS {
            tokens.truncated = true;
            break;
        }
        tokens.items[tokens.len] = word;
        tokens.len += 1;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_lines() {
        for line in ["", " ", "     "] {
            let tokens = split(line);
            assert!(tokens.is_empty(), "{line:?}");
            assert_eq!(tokens.name(), None);
            assert!(tokens.args().is_empty());
        }
    }

    #[test]
    fn test_runs_of_spaces() {
        let tokens = split("  glVertex   1  2 3 ");
        assert_eq!(tokens.as_slice(), ["glVertex", "1", "2", "3"]);
        assert_eq!(tokens.name(), Some("glVertex"));
        assert_eq!(tokens.args(), ["1", "2", "3"]);
    }

    #[test]
    fn test_no_quoting() {
        let tokens = split("echo \"a b\"");
        assert_eq!(tokens.as_slice(), ["echo", "\"a", "b\""]);
    }

    #[test]
    fn test_tabs_are_not_separators() {
        let tokens = split("echo\ta");
        assert_eq!(tokens.as_slice(), ["echo\ta"]);
    }

    #[test]
    fn test_overflow_is_truncated() {
        let line = std::iter::once("echo".to_string())
            .chain((0..MAX_TOKENS + 5).map(|i| i.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = split(&line);
        assert_eq!(tokens.len(), MAX_TOKENS);
        assert!(tokens.truncated());
        assert_eq!(tokens.args().len(), MAX_PARAMS);
    }

    #[test]
    fn test_exactly_full_is_not_truncated() {
        let line = vec!["x"; MAX_TOKENS].join(" ");
        let tokens = split(&line);
        assert_eq!(tokens.len(), MAX_TOKENS);
        assert!(!tokens.truncated());
    }
}
