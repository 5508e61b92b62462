//! Token stack for raw command-line arguments.
//!
//! [`Args`] stores tokens reversed so the next token to process is always at
//! the end of the vector. The stack is move-only: it is created once per run
//! and handed down the command tree, so no token can be seen twice.

use tracing::trace;

/// Remaining raw arguments of a run, in command-line order.
///
/// # Examples
///
/// ```
/// use cmdtree_core::Args;
///
/// let mut args = Args::new(["greet", "--name", "bob"]);
/// assert_eq!(args.peek(), Some("greet"));
/// assert_eq!(args.pop().as_deref(), Some("greet"));
/// assert_eq!(args.len(), 2);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    /// Creates a stack from tokens given in command-line order.
    pub fn new<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: Vec<String> = arguments.into_iter().map(Into::into).collect();
        tokens.reverse();
        Self { tokens }
    }

    /// Returns the next token without removing it.
    pub fn peek(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Removes and returns the next token.
    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Puts a token back so it becomes the next one returned.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true when the next token is a flag marker (starts with `-`).
    pub fn next_is_flag(&self) -> bool {
        self.peek().is_some_and(|token| token.starts_with('-'))
    }

    /// Pops the next token as a flag marker, splitting `--name=value`.
    ///
    /// Only tokens starting with `-` are split, at the first `=`. The value
    /// part is pushed back verbatim (quotes included) so it is consumed next.
    /// A token such as `'a=b'` is returned untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdtree_core::Args;
    ///
    /// let mut args = Args::new(["--name=bob", "next"]);
    /// assert_eq!(args.pop_flag().as_deref(), Some("--name"));
    /// assert_eq!(args.pop().as_deref(), Some("bob"));
    /// assert_eq!(args.pop().as_deref(), Some("next"));
    /// ```
    pub fn pop_flag(&mut self) -> Option<String> {
        let token = self.tokens.pop()?;
        if !token.starts_with('-') {
            return Some(token);
        }
        match token.split_once('=') {
            Some((marker, value)) => {
                trace!(marker, value, "splitting flag token");
                self.tokens.push(value.to_string());
                Some(marker.to_string())
            }
            None => Some(token),
        }
    }

    /// Drains every remaining token, returned in command-line order.
    pub fn drain(&mut self) -> Vec<String> {
        let mut rest = std::mem::take(&mut self.tokens);
        rest.reverse();
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_command_line() {
        let mut args = Args::new(["a", "b", "c"]);
        assert_eq!(args.pop().as_deref(), Some("a"));
        assert_eq!(args.pop().as_deref(), Some("b"));
        assert_eq!(args.pop().as_deref(), Some("c"));
        assert!(args.pop().is_none());
        assert!(args.is_empty());
    }

    #[test]
    fn test_peek_on_empty_is_none() {
        let args = Args::new(Vec::<String>::new());
        assert!(args.peek().is_none());
        assert!(!args.next_is_flag());
    }

    #[test]
    fn test_pop_flag_plain() {
        let mut args = Args::new(["-name"]);
        assert_eq!(args.pop_flag().as_deref(), Some("-name"));
        assert_eq!(args.len(), 0);
    }

    #[test]
    fn test_pop_flag_split() {
        let mut args = Args::new(["-name=bob"]);
        assert_eq!(args.pop_flag().as_deref(), Some("-name"));
        assert_eq!(args.len(), 1);
        assert_eq!(args.peek(), Some("bob"));
    }

    #[test]
    fn test_pop_flag_leaves_quoted_pair() {
        let mut args = Args::new(["'a=b'"]);
        assert_eq!(args.pop_flag().as_deref(), Some("'a=b'"));
        assert_eq!(args.len(), 0);
    }

    #[test]
    fn test_pop_flag_keeps_quoted_value() {
        let mut args = Args::new(["-name='bob dylan'"]);
        assert_eq!(args.pop_flag().as_deref(), Some("-name"));
        assert_eq!(args.pop().as_deref(), Some("'bob dylan'"));
    }

    #[test]
    fn test_pop_flag_splits_on_first_equals_only() {
        let mut args = Args::new(["--filter=a=b"]);
        assert_eq!(args.pop_flag().as_deref(), Some("--filter"));
        assert_eq!(args.pop().as_deref(), Some("a=b"));
    }

    #[test]
    fn test_drain_returns_command_line_order() {
        let mut args = Args::new(["x", "y", "z"]);
        args.pop();
        assert_eq!(args.drain(), vec!["y", "z"]);
        assert!(args.is_empty());
    }
}
