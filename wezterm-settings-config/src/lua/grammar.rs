//! Statement scanner for the closed subset of Lua the modules are written in.
//!
//! Only assignments whose target looks like `config.a.b`, `M.a` or a bare
//! dotted identifier are collected. The right-hand side is parsed when it is
//! a string, boolean, number, `nil` or a flat table. Anything else becomes
//! [`Value::Opaque`] so the extractor can tell "known key, unusable value"
//! apart from "unknown key".

use regex::Regex;
use std::sync::LazyLock;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?P<target>(?:config\.|M\.)?[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*=(?P<value>(?:[^=].*)?)$",
    )
    .expect("assignment regex is a compile-time constant and must be valid")
});

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?")
        .expect("number regex is a compile-time constant and must be valid")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*")
        .expect("identifier regex is a compile-time constant and must be valid")
});

/// A scalar literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Bool(bool),
    /// Kept as written so float fields parse straight from the source text
    Number(String),
    Nil,
}

impl Scalar {
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Str(_) => "string",
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Nil => "nil",
        }
    }
}

/// The right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    /// `{ "a", "b" }`; also `{}`
    List(Vec<String>),
    /// `{ key = scalar, ... }`
    Fields(Vec<(String, Scalar)>),
    /// Outside the grammar: calls, expressions, nested tables...
    Opaque,
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.kind(),
            Value::List(_) => "list",
            Value::Fields(_) => "table",
            Value::Opaque => "expression",
        }
    }
}

/// One assignment as it appears in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Target with any `config.` / `M.` prefix removed
    pub key: String,
    pub value: Value,
    /// Right-hand side text, trimmed
    pub raw: String,
    /// 1-based line of the target
    pub line: usize,
}

/// Collect every assignment in `text`, in source order.
///
/// Tables may span several lines; the statement then consumes lines until
/// its braces balance.
pub fn statements(text: &str) -> Vec<Statement> {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let line_no = i + 1;
        i += 1;

        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let Some(caps) = ASSIGNMENT.captures(line) else {
            continue;
        };
        let target = &caps["target"];
        let mut rhs = caps["value"].to_string();
        while brace_depth(&rhs) > 0 && i < lines.len() {
            rhs.push('\n');
            rhs.push_str(lines[i]);
            i += 1;
        }

        let key = target
            .strip_prefix("config.")
            .or_else(|| target.strip_prefix("M."))
            .unwrap_or(target)
            .to_string();
        out.push(Statement {
            key,
            value: parse_value(&rhs),
            raw: rhs.trim().to_string(),
            line: line_no,
        });
    }
    out
}

/// Net count of `{` over `}` outside strings and comments.
fn brace_depth(text: &str) -> i32 {
    let mut depth = 0;
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => match c {
                '\\' => {
                    chars.next();
                }
                _ if c == q => quote = None,
                '\n' => quote = None,
                _ => {}
            },
            None => match c {
                '"' | '\'' => quote = Some(c),
                '{' => depth += 1,
                '}' => depth -= 1,
                '-' if chars.peek() == Some(&'-') => {
                    // Comment runs to end of line
                    for c in chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                _ => {}
            },
        }
    }
    depth
}

/// Parse a complete right-hand side. Trailing `,` and comments are allowed.
pub fn parse_value(text: &str) -> Value {
    let mut cursor = Cursor::new(text);
    cursor.skip_trivia();
    let value = if cursor.eat('{') {
        cursor.table()
    } else {
        cursor.scalar().map(Value::Scalar)
    };
    let Some(value) = value else {
        return Value::Opaque;
    };
    cursor.skip_trivia();
    cursor.eat(',');
    cursor.skip_trivia();
    if cursor.at_end() { value } else { Value::Opaque }
}

/// One `name = value` field of a table constructor, value left unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    pub name: String,
    /// Value source text, trimmed
    pub raw: String,
    /// Newlines between the start of the table and the field name
    pub line_offset: usize,
}

/// Split a `{ name = value, ... }` constructor into its fields.
///
/// Values may be anything with balanced brackets, including nested tables
/// and calls. Returns `None` when `text` is not such a constructor (a call,
/// a list, positional entries...). `{}` yields no entries.
pub fn table_entries(text: &str) -> Option<Vec<TableEntry>> {
    let mut cursor = Cursor::new(text);
    cursor.skip_trivia();
    if !cursor.eat('{') {
        return None;
    }
    let mut entries = Vec::new();
    loop {
        cursor.skip_trivia();
        if cursor.eat('}') {
            break;
        }
        let line_offset = text[..text.len() - cursor.rest.len()].matches('\n').count();
        let name = cursor.word()?;
        cursor.skip_trivia();
        if !cursor.eat('=') || cursor.peek() == Some('=') {
            return None;
        }
        cursor.skip_trivia();
        let raw = cursor.raw_value()?;
        entries.push(TableEntry {
            name: name.to_string(),
            raw: raw.to_string(),
            line_offset,
        });
        cursor.skip_trivia();
        if !cursor.eat(',') && !cursor.eat(';') {
            cursor.skip_trivia();
            if cursor.eat('}') {
                break;
            }
            return None;
        }
    }
    cursor.skip_trivia();
    cursor.eat(',');
    cursor.skip_trivia();
    cursor.at_end().then_some(entries)
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if let Some(rest) = self.rest.strip_prefix(c) {
            self.rest = rest;
            true
        } else {
            false
        }
    }

    /// Skip whitespace, newlines and `--` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.rest = self.rest.trim_start();
            let rest = self.rest;
            if rest.starts_with("--") {
                self.rest = rest.find('\n').map_or("", |n| &rest[n..]);
            } else {
                break;
            }
        }
    }

    fn word(&mut self) -> Option<&'a str> {
        let rest = self.rest;
        let m = WORD.find(rest)?;
        self.rest = &rest[m.end()..];
        Some(&rest[..m.end()])
    }

    fn scalar(&mut self) -> Option<Scalar> {
        match self.peek()? {
            '"' | '\'' => self.string().map(Scalar::Str),
            '-' | '0'..='9' => {
                let rest = self.rest;
                let m = NUMBER.find(rest)?;
                let raw = &rest[..m.end()];
                self.rest = &rest[m.end()..];
                // `1.5e3`, `0x10`, `1..2` and friends are not ours
                if self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
                {
                    return None;
                }
                Some(Scalar::Number(raw.to_string()))
            }
            _ => {
                let saved = self.rest;
                let scalar = match self.word()? {
                    "true" => Some(Scalar::Bool(true)),
                    "false" => Some(Scalar::Bool(false)),
                    "nil" => Some(Scalar::Nil),
                    _ => None,
                };
                if scalar.is_none() {
                    self.rest = saved;
                }
                scalar
            }
        }
    }

    /// A quoted string with Lua escapes decoded.
    fn string(&mut self) -> Option<String> {
        let rest = self.rest;
        let quote = self.peek()?;
        let mut bytes = Vec::new();
        let mut iter = rest.char_indices().skip(1).peekable();
        while let Some((pos, c)) = iter.next() {
            match c {
                _ if c == quote => {
                    self.rest = &rest[pos + c.len_utf8()..];
                    return String::from_utf8(bytes).ok();
                }
                '\n' => return None,
                '\\' => {
                    let (_, esc) = iter.next()?;
                    match esc {
                        'n' => bytes.push(b'\n'),
                        'r' => bytes.push(b'\r'),
                        't' => bytes.push(b'\t'),
                        '\\' | '"' | '\'' => bytes.push(esc as u8),
                        '0'..='9' => {
                            let mut code = esc.to_digit(10)?;
                            for _ in 0..2 {
                                match iter.peek() {
                                    Some((_, d)) if d.is_ascii_digit() => {
                                        code = code * 10 + d.to_digit(10)?;
                                        iter.next();
                                    }
                                    _ => break,
                                }
                            }
                            bytes.push(u8::try_from(code).ok()?);
                        }
                        _ => return None,
                    }
                }
                _ => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
        None
    }

    /// Source of one field value, up to the `,` `;` or `}` closing it at
    /// bracket depth zero.
    fn raw_value(&mut self) -> Option<&'a str> {
        let rest = self.rest;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;
        let mut iter = rest.char_indices().peekable();
        let mut end = None;
        while let Some((pos, c)) = iter.next() {
            match quote {
                Some(q) => match c {
                    '\\' => {
                        iter.next();
                    }
                    '\n' => return None,
                    _ if c == q => quote = None,
                    _ => {}
                },
                None => match c {
                    '"' | '\'' => quote = Some(c),
                    '{' | '(' | '[' => depth += 1,
                    '}' | ')' | ']' if depth > 0 => depth -= 1,
                    ',' | ';' | '}' if depth == 0 => {
                        end = Some(pos);
                        break;
                    }
                    ')' | ']' => return None,
                    '-' if iter.peek().is_some_and(|&(_, next)| next == '-') => {
                        // Comment runs to end of line
                        for (_, c) in iter.by_ref() {
                            if c == '\n' {
                                break;
                            }
                        }
                    }
                    _ => {}
                },
            }
        }
        let end = end?;
        let value = rest[..end].trim();
        if value.is_empty() {
            return None;
        }
        self.rest = &rest[end..];
        Some(value)
    }

    /// Body of a table; the opening brace is already consumed.
    fn table(&mut self) -> Option<Value> {
        let mut list = Vec::new();
        let mut fields = Vec::new();
        loop {
            self.skip_trivia();
            if self.eat('}') {
                break;
            }
            match self.peek()? {
                '"' | '\'' => {
                    if !fields.is_empty() {
                        return None;
                    }
                    list.push(self.string()?);
                }
                _ => {
                    if !list.is_empty() {
                        return None;
                    }
                    let name = self.word()?;
                    self.skip_trivia();
                    if !self.eat('=') || self.peek() == Some('=') {
                        return None;
                    }
                    self.skip_trivia();
                    fields.push((name.to_string(), self.scalar()?));
                }
            }
            self.skip_trivia();
            if !self.eat(',') && !self.eat(';') {
                self.skip_trivia();
                if self.eat('}') {
                    break;
                }
                return None;
            }
        }
        if fields.is_empty() {
            Some(Value::List(list))
        } else {
            Some(Value::Fields(fields))
        }
    }
}

/// Quote a string for Lua, escaping backslashes, quotes and control characters.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
