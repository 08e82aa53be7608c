//! Quote- and bracket-aware helpers for slicing Python expressions.
//!
//! Nothing here understands Python grammar. The scanner only knows enough
//! to avoid splitting inside `[...]`, `{...}`, `(...)` or a string literal,
//! which is all the structural passes need.

/// Bracket depths and quote state at a position in a string
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ScanState {
    square: i32,
    curly: i32,
    round: i32,
    quote: Option<char>,
}

impl ScanState {
    /// Advance the state over `c`. A quote toggles only when it is not
    /// escaped by the previous character and, when closing, matches the
    /// quote that opened the literal.
    fn update(&mut self, prev: Option<char>, c: char) {
        if (c == '\'' || c == '"') && prev != Some('\\') {
            match self.quote {
                None => self.quote = Some(c),
                Some(q) if q == c => self.quote = None,
                Some(_) => {}
            }
        }

        if self.quote.is_some() {
            return;
        }

        match c {
            '[' => self.square += 1,
            ']' => self.square -= 1,
            '{' => self.curly += 1,
            '}' => self.curly -= 1,
            '(' => self.round += 1,
            ')' => self.round -= 1,
            _ => {}
        }
    }

    fn in_quote(&self) -> bool {
        self.quote.is_some()
    }

    fn is_top_level(&self) -> bool {
        !self.in_quote() && self.square == 0 && self.curly == 0 && self.round == 0
    }

    fn depth_of(&self, open: char) -> i32 {
        match open {
            '[' => self.square,
            '{' => self.curly,
            '(' => self.round,
            _ => 0,
        }
    }
}

/// Walk `s`, yielding each byte offset and character together with the
/// scan state after that character has been consumed.
fn scan(s: &str) -> impl Iterator<Item = (usize, char, ScanState)> + '_ {
    let mut state = ScanState::default();
    let mut prev = None;
    s.char_indices().map(move |(i, c)| {
        state.update(prev, c);
        prev = Some(c);
        (i, c, state)
    })
}

/// Byte offset of the first top-level occurrence of `target`
pub fn index_of_top_level(s: &str, target: char) -> Option<usize> {
    scan(s)
        .find(|(_, c, state)| *c == target && state.is_top_level())
        .map(|(i, _, _)| i)
}

/// Byte offsets of every top-level occurrence of `target`
pub fn top_level_indices(s: &str, target: char) -> Vec<usize> {
    scan(s)
        .filter(|(_, c, state)| *c == target && state.is_top_level())
        .map(|(i, _, _)| i)
        .collect()
}

/// Split `s` at top-level occurrences of `delimiter`.
///
/// Blank input yields no segments; a trailing delimiter does not produce
/// an empty final segment.
pub fn split_top_level(s: &str, delimiter: char) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut start = 0;
    for i in top_level_indices(s, delimiter) {
        parts.push(&s[start..i]);
        start = i + delimiter.len_utf8();
    }
    if start < s.len() {
        parts.push(&s[start..]);
    }
    parts
}

pub fn split_top_level_commas(s: &str) -> Vec<&str> {
    split_top_level(s, ',')
}

/// Byte offset of the first occurrence of `pattern` that starts at top level
pub fn find_top_level_str(s: &str, pattern: &str) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    let mut before = ScanState::default();
    let mut prev = None;
    for (i, c) in s.char_indices() {
        if before.is_top_level() && s[i..].starts_with(pattern) {
            return Some(i);
        }
        before.update(prev, c);
        prev = Some(c);
    }
    None
}

/// Byte offset of `keyword` as a whole word outside any string literal
pub fn find_keyword(s: &str, keyword: &str) -> Option<usize> {
    let mut before = ScanState::default();
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        if !before.in_quote()
            && s[i..].starts_with(keyword)
            && !prev.is_some_and(is_identifier_char)
            && !s[i + keyword.len()..]
                .chars()
                .next()
                .is_some_and(is_identifier_char)
        {
            return Some(i);
        }
        before.update(prev, c);
        prev = Some(c);
    }
    None
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Cut an end-of-line comment, ignoring `#` inside string literals
pub fn strip_comment(line: &str) -> &str {
    let mut state = ScanState::default();
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '#' && !state.in_quote() {
            return &line[..i];
        }
        state.update(prev, c);
        prev = Some(c);
    }
    line
}

/// Whether byte offset `pos` of `line` falls inside a string literal
pub fn in_string_literal(line: &str, pos: usize) -> bool {
    scan(line)
        .take_while(|(i, _, _)| *i < pos)
        .last()
        .map(|(_, _, state)| state.in_quote())
        .unwrap_or(false)
}

/// `source` with every end-of-line comment removed, line structure kept
pub fn strip_comments(source: &str) -> String {
    source.lines().map(strip_comment).collect::<Vec<_>>().join("\n")
}

/// Net depth change of the `open` bracket kind across `s`, outside literals
pub fn balance_delta(s: &str, open: char) -> i32 {
    scan(s).last().map(|(_, _, state)| state.depth_of(open)).unwrap_or(0)
}

/// Byte offset of the bracket closing the one `s` starts with, skipping
/// brackets inside string literals
pub fn matching_close(s: &str) -> Option<usize> {
    let open = s.chars().next()?;
    if !matches!(open, '[' | '{' | '(') {
        return None;
    }
    scan(s)
        .find(|(_, _, state)| !state.in_quote() && state.depth_of(open) == 0)
        .map(|(i, _, _)| i)
}

/// Substring from the bracket at `start` through its matching closer.
///
/// Counting is not quote-aware: a literal containing `close` ends the
/// block early. Without a matching closer the rest of `s` is returned.
pub fn extract_balanced(s: &str, start: usize, open: char, close: char) -> &str {
    let Some(tail) = s.get(start..) else {
        return "";
    };
    let mut balance = 0;
    for (i, c) in tail.char_indices() {
        if c == open {
            balance += 1;
        } else if c == close {
            balance -= 1;
        }
        if balance == 0 {
            return &tail[..i + c.len_utf8()];
        }
    }
    tail
}

/// Trim `s` and drop one surrounding `open`/`close` pair if present
pub fn strip_outer(s: &str, open: char, close: char) -> &str {
    let t = s.trim();
    if t.len() >= 2 && t.starts_with(open) && t.ends_with(close) {
        t[open.len_utf8()..t.len() - close.len_utf8()].trim()
    } else {
        t
    }
}

/// Drop one pair of matching single or double quotes
pub fn strip_quotes(s: &str) -> &str {
    let t = s.trim();
    if t.len() >= 2
        && ((t.starts_with('"') && t.ends_with('"')) || (t.starts_with('\'') && t.ends_with('\'')))
    {
        &t[1..t.len() - 1]
    } else {
        t
    }
}
