// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! JSONPath expression parser
//!
//! Grammar (Goessner-style, as accepted by the common `jsonpath` tools):
//!
//! ```text
//! path      := '$' segment*
//! segment   := '.' name | '.*' | '..' name | '..*' | '..' bracket | bracket
//! bracket   := '[' item (',' item)* ']' | '[' '?' filter ']'
//! item      := '*' | string | int | slice
//! slice     := int? ':' int? (':' int?)?
//! filter    := '(' or ')' | or
//! or        := and ('||' and)*
//! and       := unary ('&&' unary)*
//! unary     := '!' unary | '(' or ')' | operand (cmp operand)?
//! operand   := '@' segment* | '$' segment* | literal
//! ```

use serde_json::Value;

use crate::SelectorError;

/// A compiled path: the root followed by segments
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Path {
    pub(crate) segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Select from the children of each node
    Child(Vec<Selector>),
    /// Select from the children of each node and all of its descendants
    Descendant(Vec<Selector>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Selector {
    Name(String),
    Wildcard,
    Index(i64),
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    Filter(Filter),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Filter {
    Or(Box<Filter>, Box<Filter>),
    And(Box<Filter>, Box<Filter>),
    Not(Box<Filter>),
    Exists(Operand),
    Compare(Operand, CmpOp, Operand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    /// Path relative to the node under test (`@`)
    Current(Vec<Segment>),
    /// Path from the document root (`$`)
    Root(Vec<Segment>),
    Literal(Value),
}

/// Parse a full JSONPath expression
pub(crate) fn parse(expression: &str) -> Result<Path, SelectorError> {
    let mut parser = Parser::new(expression);
    parser.skip_ws();
    if !parser.eat('$') {
        return Err(parser.error("expression must start with `$`"));
    }
    let segments = parser.segments()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(Path { segments })
}

/// Deepest filter nesting accepted, matching serde_json's recursion limit
const MAX_FILTER_DEPTH: usize = 128;

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), SelectorError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`", c)))
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> SelectorError {
        SelectorError::parse(self.pos, message)
    }

    fn segments(&mut self) -> Result<Vec<Segment>, SelectorError> {
        let mut segments = Vec::new();
        loop {
            match self.peek() {
                Some('.') => {
                    self.bump();
                    if self.eat('.') {
                        let selectors = match self.peek() {
                            Some('[') => self.bracket()?,
                            Some('*') => {
                                self.bump();
                                vec![Selector::Wildcard]
                            }
                            _ => vec![Selector::Name(self.member_name()?)],
                        };
                        segments.push(Segment::Descendant(selectors));
                    } else if self.eat('*') {
                        segments.push(Segment::Child(vec![Selector::Wildcard]));
                    } else {
                        segments.push(Segment::Child(vec![Selector::Name(self.member_name()?)]));
                    }
                }
                Some('[') => segments.push(Segment::Child(self.bracket()?)),
                _ => break,
            }
        }
        Ok(segments)
    }

    fn member_name(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '$')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected member name"));
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn bracket(&mut self) -> Result<Vec<Selector>, SelectorError> {
        self.expect('[')?;
        self.skip_ws();

        if self.eat('?') {
            self.skip_ws();
            let filter = self.or_expr()?;
            self.skip_ws();
            self.expect(']')?;
            return Ok(vec![Selector::Filter(filter)]);
        }

        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            let selector = match self.peek() {
                Some('*') => {
                    self.bump();
                    Selector::Wildcard
                }
                Some(q @ ('\'' | '"')) => Selector::Name(self.string_literal(q)?),
                Some(c) if c == '-' || c == ':' || c.is_ascii_digit() => self.index_or_slice()?,
                _ => return Err(self.error("expected selector")),
            };
            selectors.push(selector);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect(']')?;
            break;
        }
        Ok(selectors)
    }

    fn index_or_slice(&mut self) -> Result<Selector, SelectorError> {
        let start = self.optional_int()?;
        self.skip_ws();
        if !self.eat(':') {
            return match start {
                Some(i) => Ok(Selector::Index(i)),
                None => Err(self.error("expected index")),
            };
        }
        self.skip_ws();
        let end = self.optional_int()?;
        self.skip_ws();
        let step = if self.eat(':') {
            self.skip_ws();
            self.optional_int()?
        } else {
            None
        };
        Ok(Selector::Slice { start, end, step })
    }

    fn optional_int(&mut self) -> Result<Option<i64>, SelectorError> {
        let start = self.pos;
        self.eat('-');
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        let lexeme = &self.src[start..self.pos];
        if lexeme.is_empty() {
            return Ok(None);
        }
        lexeme
            .parse::<i64>()
            .map(Some)
            .map_err(|_| SelectorError::parse(start, format!("invalid integer `{}`", lexeme)))
    }

    fn string_literal(&mut self, quote: char) -> Result<String, SelectorError> {
        let start = self.pos;
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::parse(start, "unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('b') => '\u{8}',
                        Some('f') => '\u{c}',
                        Some('u') => self.unicode_escape()?,
                        Some(c @ ('\\' | '/' | '\'' | '"')) => c,
                        _ => return Err(self.error("invalid escape sequence")),
                    };
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, SelectorError> {
        let start = self.pos;
        let hex = self
            .rest()
            .get(..4)
            .ok_or_else(|| self.error("truncated unicode escape"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| SelectorError::parse(start, "invalid unicode escape"))?;
        self.pos += 4;
        char::from_u32(code).ok_or_else(|| SelectorError::parse(start, "invalid unicode escape"))
    }

    fn or_expr(&mut self) -> Result<Filter, SelectorError> {
        let mut left = self.and_expr()?;
        loop {
            self.skip_ws();
            if !self.eat_str("||") {
                return Ok(left);
            }
            let right = self.and_expr()?;
            left = Filter::Or(Box::new(left), Box::new(right));
        }
    }

    fn and_expr(&mut self) -> Result<Filter, SelectorError> {
        let mut left = self.unary()?;
        loop {
            self.skip_ws();
            if !self.eat_str("&&") {
                return Ok(left);
            }
            let right = self.unary()?;
            left = Filter::And(Box::new(left), Box::new(right));
        }
    }

    fn unary(&mut self) -> Result<Filter, SelectorError> {
        // Every nested filter, negation or group passes through here.
        if self.depth >= MAX_FILTER_DEPTH {
            return Err(self.error(format!(
                "filter nesting exceeds {} levels",
                MAX_FILTER_DEPTH
            )));
        }
        self.depth += 1;
        let filter = self.filter_term();
        self.depth -= 1;
        filter
    }

    fn filter_term(&mut self) -> Result<Filter, SelectorError> {
        self.skip_ws();
        if self.eat('!') {
            return Ok(Filter::Not(Box::new(self.unary()?)));
        }
        if self.eat('(') {
            let inner = self.or_expr()?;
            self.skip_ws();
            self.expect(')')?;
            return Ok(inner);
        }

        let left = self.operand()?;
        self.skip_ws();
        let Some(op) = self.cmp_op() else {
            return match left {
                Operand::Literal(_) => Err(self.error("expected comparison operator")),
                path => Ok(Filter::Exists(path)),
            };
        };
        self.skip_ws();
        let right = self.operand()?;
        Ok(Filter::Compare(left, op, right))
    }

    fn cmp_op(&mut self) -> Option<CmpOp> {
        // Two-character operators first so `<=` is not read as `<`.
        let ops = [
            ("==", CmpOp::Eq),
            ("!=", CmpOp::Ne),
            ("<=", CmpOp::Le),
            (">=", CmpOp::Ge),
            ("<", CmpOp::Lt),
            (">", CmpOp::Gt),
        ];
        ops.into_iter()
            .find(|(text, _)| self.eat_str(text))
            .map(|(_, op)| op)
    }

    fn operand(&mut self) -> Result<Operand, SelectorError> {
        match self.peek() {
            Some('@') => {
                self.bump();
                Ok(Operand::Current(self.segments()?))
            }
            Some('$') => {
                self.bump();
                Ok(Operand::Root(self.segments()?))
            }
            Some(q @ ('\'' | '"')) => Ok(Operand::Literal(Value::String(self.string_literal(q)?))),
            Some(c) if c == '-' || c.is_ascii_digit() => self.number_literal(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword_literal(),
            _ => Err(self.error("expected operand")),
        }
    }

    fn number_literal(&mut self) -> Result<Operand, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
        {
            self.bump();
        }
        let lexeme = &self.src[start..self.pos];
        match serde_json::from_str::<Value>(lexeme) {
            Ok(v @ Value::Number(_)) => Ok(Operand::Literal(v)),
            _ => Err(SelectorError::parse(
                start,
                format!("invalid number `{}`", lexeme),
            )),
        }
    }

    fn keyword_literal(&mut self) -> Result<Operand, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "true" => Ok(Operand::Literal(Value::Bool(true))),
            "false" => Ok(Operand::Literal(Value::Bool(false))),
            "null" => Ok(Operand::Literal(Value::Null)),
            other => Err(SelectorError::parse(
                start,
                format!("unknown literal `{}`", other),
            )),
        }
    }
}
