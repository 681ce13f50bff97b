//! Single-pass PHP lexer
//!
//! Produces just enough token structure to find declarations: names,
//! qualified names, strings and comments (so their contents are never
//! mistaken for code) and a handful of punctuation kinds. It never builds a
//! syntax tree.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Text outside `<?php ... ?>`
    InlineHtml,
    OpenTag,
    CloseTag,
    Whitespace,
    Comment,
    DocComment,
    Variable,
    /// Identifier or keyword
    Name,
    /// `A\B`, `\A\B` or `namespace\A`
    QualifiedName,
    StringLiteral,
    Number,
    /// `#[`
    AttributeStart,
    DoubleColon,
    /// `->`
    Arrow,
    Semicolon,
    OpenBrace,
    CloseBrace,
    Symbol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based line of the first character
    pub line: usize,
}

impl Token<'_> {
    /// Whitespace, comments and inline HTML carry no declarations
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment | TokenKind::InlineHtml
        )
    }

    /// Case-insensitive keyword comparison for `Name` tokens
    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Name && self.text.eq_ignore_ascii_case(keyword)
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    in_php: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            in_php: false,
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn emit(&mut self, kind: TokenKind, end: usize) -> Token<'a> {
        let text = &self.src[self.pos..end];
        let token = Token {
            kind,
            text,
            line: self.line,
        };
        self.line += text.bytes().filter(|b| *b == b'\n').count();
        self.pos = end;
        token
    }

    fn lex_html(&mut self) -> Token<'a> {
        match find_open_tag(self.rest()) {
            Some((0, len)) => {
                self.in_php = true;
                self.emit(TokenKind::OpenTag, self.pos + len)
            }
            Some((offset, _)) => self.emit(TokenKind::InlineHtml, self.pos + offset),
            None => self.emit(TokenKind::InlineHtml, self.src.len()),
        }
    }

    fn lex_php(&mut self) -> Token<'a> {
        let start = self.pos;
        let bytes = self.bytes();
        let first = bytes[start];

        match first {
            b if b.is_ascii_whitespace() => {
                let end = scan_while(bytes, start, |b| b.is_ascii_whitespace());
                self.emit(TokenKind::Whitespace, end)
            }
            b'?' if self.peek(1) == Some(b'>') => {
                self.in_php = false;
                self.emit(TokenKind::CloseTag, start + 2)
            }
            b'#' if self.peek(1) == Some(b'[') => self.emit(TokenKind::AttributeStart, start + 2),
            b'#' => {
                let end = self.line_comment_end(start + 1);
                self.emit(TokenKind::Comment, end)
            }
            b'/' if self.peek(1) == Some(b'/') => {
                let end = self.line_comment_end(start + 2);
                self.emit(TokenKind::Comment, end)
            }
            b'/' if self.peek(1) == Some(b'*') => {
                let kind = if self.rest().starts_with("/**") && !self.rest().starts_with("/**/") {
                    TokenKind::DocComment
                } else {
                    TokenKind::Comment
                };
                let end = self.src[start + 2..]
                    .find("*/")
                    .map(|i| start + 2 + i + 2)
                    .unwrap_or(self.src.len());
                self.emit(kind, end)
            }
            b'$' if self.peek(1).is_some_and(is_ident_start) => {
                let end = scan_while(bytes, start + 1, is_ident_byte);
                self.emit(TokenKind::Variable, end)
            }
            b'\'' => {
                let end = quoted_end(bytes, start, b'\'');
                self.emit(TokenKind::StringLiteral, end)
            }
            b'"' | b'`' => {
                let end = quoted_end(bytes, start, first);
                self.emit(TokenKind::StringLiteral, end)
            }
            b'<' if self.rest().starts_with("<<<") => {
                let end = heredoc_end(self.src, start).unwrap_or(start + 3);
                let kind = if end > start + 3 {
                    TokenKind::StringLiteral
                } else {
                    TokenKind::Symbol
                };
                self.emit(kind, end)
            }
            b'\\' if self.peek(1).is_some_and(is_ident_start) => {
                let end = name_end(bytes, start + 1);
                self.emit(TokenKind::QualifiedName, end)
            }
            b if is_ident_start(b) => {
                let end = name_end(bytes, start);
                let kind = if self.src[start..end].contains('\\') {
                    TokenKind::QualifiedName
                } else {
                    TokenKind::Name
                };
                self.emit(kind, end)
            }
            b if b.is_ascii_digit() => {
                let end = scan_while(bytes, start, |b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
                self.emit(TokenKind::Number, end)
            }
            b':' if self.peek(1) == Some(b':') => self.emit(TokenKind::DoubleColon, start + 2),
            b'-' if self.peek(1) == Some(b'>') => self.emit(TokenKind::Arrow, start + 2),
            b';' => self.emit(TokenKind::Semicolon, start + 1),
            b'{' => self.emit(TokenKind::OpenBrace, start + 1),
            b'}' => self.emit(TokenKind::CloseBrace, start + 1),
            _ => self.emit(TokenKind::Symbol, start + 1),
        }
    }

    /// Line comments stop at a newline or at a closing tag
    fn line_comment_end(&self, from: usize) -> usize {
        let rest = &self.src[from..];
        let newline = rest.find('\n');
        let close = rest.find("?>");
        let offset = match (newline, close) {
            (Some(n), Some(c)) => n.min(c),
            (Some(n), None) => n,
            (None, Some(c)) => c,
            (None, None) => rest.len(),
        };
        from + offset
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.src.len() {
            return None;
        }
        if self.in_php {
            Some(self.lex_php())
        } else {
            Some(self.lex_html())
        }
    }
}

/// Offset and length of the next `<?php` or `<?=` tag
fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(i) = text[from..].find("<?") {
        let at = from + i;
        let after = &bytes[at + 2..];
        if after.len() >= 3 && after[..3].eq_ignore_ascii_case(b"php") {
            let boundary = after.get(3).map_or(true, |b| b.is_ascii_whitespace());
            if boundary {
                return Some((at, 5));
            }
        }
        if after.first() == Some(&b'=') {
            return Some((at, 3));
        }
        from = at + 2;
    }
    None
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn scan_while(bytes: &[u8], from: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut end = from;
    while end < bytes.len() && pred(bytes[end]) {
        end += 1;
    }
    end
}

/// Identifier segments joined by `\`
fn name_end(bytes: &[u8], from: usize) -> usize {
    let mut end = scan_while(bytes, from, is_ident_byte);
    while end + 1 < bytes.len() && bytes[end] == b'\\' && is_ident_start(bytes[end + 1]) {
        end = scan_while(bytes, end + 1, is_ident_byte);
    }
    end
}

/// End of a quoted string starting at `from`; unterminated strings run to EOF
fn quoted_end(bytes: &[u8], from: usize, quote: u8) -> usize {
    let mut i = from + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// End of a heredoc/nowdoc body, `None` when `<<<` is not followed by a label
fn heredoc_end(src: &str, from: usize) -> Option<usize> {
    let header_start = from + 3;
    let header_line_end = src[header_start..]
        .find('\n')
        .map(|i| header_start + i)?;
    let header = src[header_start..header_line_end].trim();
    let label = header.trim_matches(|c| c == '\'' || c == '"');
    if label.is_empty() || !label.bytes().all(is_ident_byte) || !is_ident_start(label.as_bytes()[0]) {
        return None;
    }

    let mut line_start = header_line_end + 1;
    while line_start <= src.len() {
        let line_end = src[line_start..]
            .find('\n')
            .map(|i| line_start + i)
            .unwrap_or(src.len());
        let line = &src[line_start..line_end];
        let indent = line.len() - line.trim_start().len();
        let body = &line[indent..];
        if let Some(after) = body.strip_prefix(label) {
            if !after.bytes().next().is_some_and(is_ident_byte) {
                return Some(line_start + indent + label.len());
            }
        }
        if line_end == src.len() {
            break;
        }
        line_start = line_end + 1;
    }
    Some(src.len())
}
