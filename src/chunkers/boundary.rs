//! Safe split point detection for brace-structured source code.
//!
//! A single left-to-right pass classifies every character as code, string
//! or comment with a small state machine and tracks brace nesting in code.
//! Offsets where cutting cannot break an open block, string or comment are
//! recorded as split candidates:
//!
//! - after the line holding a `}` that brings the nesting back to zero,
//! - after a line starting with `#endif` or `#endregion`,
//! - the start and the end of the content.

use std::collections::BTreeSet;

/// Lexical state of the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Code,
    DoubleQuoted,
    SingleQuoted,
    LineComment,
    BlockComment,
}

/// Structural tokens reported by the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    OpenBrace,
    CloseBrace,
}

/// Outcome of one transition: the next state, how many characters were
/// consumed and the token they formed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub next: ScanState,
    pub consumed: usize,
    pub token: Option<Token>,
}

impl Step {
    fn to(next: ScanState, consumed: usize) -> Self {
        Self {
            next,
            consumed,
            token: None,
        }
    }

    fn token(token: Token) -> Self {
        Self {
            next: ScanState::Code,
            consumed: 1,
            token: Some(token),
        }
    }
}

/// Transition function of the scanner.
///
/// `lookahead` is the character after `current`, used for two-character
/// delimiters. A backslash inside a string consumes the escaped character
/// as well, so `consumed` can point past the end of the input; callers clamp.
pub fn transition(state: ScanState, current: char, lookahead: Option<char>) -> Step {
    use ScanState::*;

    match state {
        Code => match (current, lookahead) {
            ('"', _) => Step::to(DoubleQuoted, 1),
            ('\'', _) => Step::to(SingleQuoted, 1),
            ('/', Some('/')) => Step::to(LineComment, 2),
            ('/', Some('*')) => Step::to(BlockComment, 2),
            ('{', _) => Step::token(Token::OpenBrace),
            ('}', _) => Step::token(Token::CloseBrace),
            _ => Step::to(Code, 1),
        },
        DoubleQuoted | SingleQuoted => {
            let quote = if state == DoubleQuoted { '"' } else { '\'' };
            match current {
                '\\' => Step::to(state, 2),
                c if c == quote => Step::to(Code, 1),
                _ => Step::to(state, 1),
            }
        }
        LineComment => match current {
            '\n' => Step::to(Code, 1),
            _ => Step::to(LineComment, 1),
        },
        BlockComment => match (current, lookahead) {
            ('*', Some('/')) => Step::to(Code, 2),
            _ => Step::to(BlockComment, 1),
        },
    }
}

/// Signed brace nesting counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BraceDepth(i64);

impl BraceDepth {
    pub fn open(&mut self) {
        self.0 += 1;
    }

    /// Decrement the counter. Returns true on a zero-crossing, i.e. when the
    /// counter went from a positive value to exactly zero. A stray `}` that
    /// drives the counter negative is not a crossing.
    pub fn close(&mut self) -> bool {
        let was_open = self.0 > 0;
        self.0 -= 1;
        was_open && self.0 == 0
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

const REGION_END_DIRECTIVES: [&str; 2] = ["#endif", "#endregion"];

/// Safe split offsets of `content`, in characters, sorted and deduplicated.
///
/// Always contains `0` and the character length of `content`.
pub fn find_safe_split_positions(content: &str) -> Vec<usize> {
    let chars: Vec<char> = content.chars().collect();
    scan(&chars)
}

pub(crate) fn scan(chars: &[char]) -> Vec<usize> {
    let len = chars.len();
    let mut positions = BTreeSet::from([0, len]);
    let mut state = ScanState::Code;
    let mut depth = BraceDepth::default();
    // Only whitespace seen since the last newline (or the start of input).
    let mut line_blank = true;
    let mut i = 0;

    while i < len {
        let current = chars[i];

        if state == ScanState::Code && current == '#' && line_blank && starts_region_end(&chars[i..]) {
            positions.insert(end_of_line(chars, i));
        }

        let step = transition(state, current, chars.get(i + 1).copied());
        match step.token {
            Some(Token::OpenBrace) => depth.open(),
            Some(Token::CloseBrace) => {
                if depth.close() {
                    positions.insert(end_of_line(chars, i));
                }
            }
            None => {}
        }

        let next = (i + step.consumed).min(len);
        for &c in &chars[i..next] {
            if c == '\n' {
                line_blank = true;
            } else if !c.is_whitespace() {
                line_blank = false;
            }
        }

        state = step.next;
        i = next;
    }

    positions.into_iter().collect()
}

/// Offset just past the newline ending the line that contains `at`, or the
/// end of input when that line is the last one.
fn end_of_line(chars: &[char], at: usize) -> usize {
    chars[at..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(chars.len(), |p| at + p + 1)
}

fn starts_region_end(rest: &[char]) -> bool {
    REGION_END_DIRECTIVES.iter().any(|directive| {
        let n = directive.chars().count();
        rest.len() >= n
            && rest.iter().zip(directive.chars()).all(|(&a, b)| a == b)
            && rest.get(n).map_or(true, |c| !(c.is_alphanumeric() || *c == '_'))
    })
}
