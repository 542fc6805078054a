//! Shell-like tokenizer for input lines.
//!
//! Handles:
//! - Whitespace-separated words
//! - Single and double quoted segments (`'a b'`, `"a b"`)
//! - Backslash escapes for the active quote character, whitespace and backslash
//! - Adjacent fragments joining into one word (`a"b c"` is `ab c`)
//!
//! A backslash in front of any other character is kept as-is, so paths such
//! as `C:\tmp` survive unquoted.

use std::borrow::Cow;
use std::ops::Range;

use crate::error::TokenizeError;

/// One word of an input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The word with quotes and escapes removed.
    pub text: String,
    /// Whether any part of the word was quoted.
    ///
    /// Quoted words are never treated as options by the text strategy.
    pub quoted: bool,
    /// Byte range of the word in the original line.
    pub span: Range<usize>,
}

impl Token {
    /// Returns `true` if this token is an unquoted word starting with `prefix`.
    pub fn is_bare_prefixed(&self, prefix: &str) -> bool {
        !self.quoted && self.text.starts_with(prefix)
    }
}

#[derive(Default)]
struct WordBuffer {
    text: String,
    start: Option<usize>,
    quoted: bool,
}

impl WordBuffer {
    fn begin(&mut self, pos: usize) {
        self.start.get_or_insert(pos);
    }

    fn push(&mut self, pos: usize, ch: char) {
        self.begin(pos);
        self.text.push(ch);
    }

    fn finish(&mut self, end: usize, tokens: &mut Vec<Token>) {
        if let Some(start) = self.start.take() {
            tokens.push(Token {
                text: std::mem::take(&mut self.text),
                quoted: std::mem::take(&mut self.quoted),
                span: start..end,
            });
        }
    }
}

/// Splits `line` into tokens.
///
/// Whitespace-only input yields an empty vector. A quote left open fails with
/// [`TokenizeError::UnterminatedQuote`].
pub fn tokenize(line: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut word = WordBuffer::default();
    let mut quote: Option<(char, usize)> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match quote {
            Some((active, _)) if ch == active => quote = None,
            Some((active, _)) if ch == '\\' => match chars.peek() {
                Some(&(_, next)) if next == active || next == '\\' => {
                    word.push(pos, next);
                    chars.next();
                }
                _ => word.push(pos, ch),
            },
            Some(_) => word.push(pos, ch),
            None if ch == '"' || ch == '\'' => {
                word.begin(pos);
                word.quoted = true;
                quote = Some((ch, pos));
            }
            None if ch.is_whitespace() => word.finish(pos, &mut tokens),
            None if ch == '\\' => match chars.peek() {
                Some(&(_, next)) if next.is_whitespace() || matches!(next, '\\' | '"' | '\'') => {
                    word.push(pos, next);
                    chars.next();
                }
                _ => word.push(pos, ch),
            },
            None => word.push(pos, ch),
        }
    }

    if let Some((quote, position)) = quote {
        return Err(TokenizeError::UnterminatedQuote { quote, position });
    }

    word.finish(line.len(), &mut tokens);
    Ok(tokens)
}

/// Splits `line` into plain words, dropping token metadata.
pub fn tokenize_words(line: &str) -> Result<Vec<String>, TokenizeError> {
    Ok(tokenize(line)?.into_iter().map(|t| t.text).collect())
}

/// Renders `word` so that [`tokenize`] reads it back as exactly one token
/// with the same text.
///
/// Words without whitespace, quotes or backslashes are returned unchanged;
/// everything else is wrapped in double quotes with `"` and `\` escaped.
pub fn quote(word: &str) -> Cow<'_, str> {
    let needs_quoting = word.is_empty()
        || word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '\\'));

    if !needs_quoting {
        return Cow::Borrowed(word);
    }

    let mut out = String::with_capacity(word.len() + 2);
    out.push('"');
    for ch in word.chars() {
        if matches!(ch, '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    Cow::Owned(out)
}

/// Joins words into their canonical line form, quoting where needed.
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| quote(w.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        tokenize_words(line).unwrap()
    }

    #[test]
    fn test_tokenize_simple() {
        assert_eq!(words("build --release now"), vec!["build", "--release", "now"]);
    }

    #[test]
    fn test_tokenize_quoted() {
        assert_eq!(words(r#"echo "hello world" test"#), vec!["echo", "hello world", "test"]);
        assert_eq!(words("echo 'hello world' test"), vec!["echo", "hello world", "test"]);
    }

    #[test]
    fn test_tokenize_mixed_quotes() {
        assert_eq!(
            words(r#"cmd "double's quote" 'single"s quote'"#),
            vec!["cmd", "double's quote", r#"single"s quote"#]
        );
    }

    #[test]
    fn test_tokenize_escaped_active_quote() {
        assert_eq!(words(r#"say "a \"b\" c""#), vec!["say", r#"a "b" c"#]);
        assert_eq!(words(r"say 'it\'s'"), vec!["say", "it's"]);
    }

    #[test]
    fn test_tokenize_escaped_whitespace() {
        assert_eq!(words(r"open hello\ world"), vec!["open", "hello world"]);
    }

    #[test]
    fn test_tokenize_keeps_unknown_escapes() {
        assert_eq!(words(r"cd C:\tmp"), vec!["cd", r"C:\tmp"]);
        assert_eq!(words(r#"say "a\nb""#), vec!["say", r"a\nb"]);
        assert_eq!(words("trailing \\"), vec!["trailing", "\\"]);
    }

    #[test]
    fn test_tokenize_adjacent_fragments_join() {
        assert_eq!(words(r#"set key="a b"c"#), vec!["set", "key=a bc"]);
    }

    #[test]
    fn test_tokenize_empty_quotes_yield_empty_token() {
        let tokens = tokenize(r#"set name """#).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "");
        assert!(tokens[2].quoted);
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("  \t  ").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        let err = tokenize(r#"run "foo"#).unwrap_err();
        assert_eq!(
            err,
            TokenizeError::UnterminatedQuote {
                quote: '"',
                position: 4
            }
        );

        let err = tokenize("run 'foo").unwrap_err();
        assert!(matches!(err, TokenizeError::UnterminatedQuote { quote: '\'', .. }));
    }

    #[test]
    fn test_tokenize_spans_and_quoted_marker() {
        let tokens = tokenize("run  'a b' --x").unwrap();
        assert_eq!(tokens[0].span, 0..3);
        assert_eq!(tokens[1].span, 5..10);
        assert!(tokens[1].quoted);
        assert_eq!(tokens[2].span, 11..14);
        assert!(tokens[2].is_bare_prefixed("--"));
    }

    #[test]
    fn test_quoted_dashes_are_not_bare() {
        let tokens = tokenize(r#"echo "--literal""#).unwrap();
        assert_eq!(tokens[1].text, "--literal");
        assert!(!tokens[1].is_bare_prefixed("--"));
    }

    #[test]
    fn test_quote_leaves_plain_words_alone() {
        assert!(matches!(quote("plain"), Cow::Borrowed("plain")));
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote(r#"a "b""#), r#""a \"b\"""#);
    }

    #[test]
    fn test_retokenizing_canonical_form_is_stable() {
        let inputs = [
            r#"say "she said \"hi\"" 'it\'s' plain"#,
            r#"path "C:\\dir with space\\" 'x y'"#,
            r#"mix a"b c"d '' "\\\"" tail\ word"#,
        ];

        for input in inputs {
            let first = tokenize_words(input).unwrap();
            let canonical = join(&first);
            let second = tokenize_words(&canonical).unwrap();
            assert_eq!(first, second, "canonical form: {canonical}");
            assert_eq!(join(&second), canonical);
        }
    }
}
