//! Tolerant SQL tokenizer over [`sqlparser`]'s SQLite tokenizer.
//!
//! Comments are dropped and string literals become opaque [`TokenKind::Str`]
//! tokens, so later keyword and identifier scans never see their contents.
//! Anything that cannot be classified with certainty (unterminated literals
//! or comments, executable or nested comments) is a [`LexError`]; callers
//! treat that as unsafe.

use std::{iter::Peekable, ops::Range, str::CharIndices};

pub use sqlparser::keywords::Keyword;
use sqlparser::{
  dialect::SQLiteDialect,
  tokenizer::{Location, Token as SqlToken, Tokenizer, TokenizerError, Whitespace},
};
use thiserror::Error;

// ─── Tokens ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// Unquoted word; [`Keyword::NoKeyword`] for plain identifiers.
  Word(Keyword),
  /// `"ident"`, `` `ident` `` or `[ident]`; the span covers the inner text.
  QuotedIdent,
  /// String or blob literal.
  Str,
  Number,
  /// Statement terminator `;`.
  Terminator,
  /// `(`, `)`, `,`, `.` and any character the tokenizer passes through.
  Punct(char),
  /// Comparison, arithmetic and other multi-character operators.
  Operator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub text: &'a str,
  /// Byte range of `text` within the source.
  pub span: Range<usize>,
}

impl Token<'_> {
  /// Case-insensitive test against the word as written; only ever true for
  /// unquoted words.
  pub fn is_word(&self, word: &str) -> bool {
    matches!(self.kind, TokenKind::Word(_)) && self.text.eq_ignore_ascii_case(word)
  }

  /// The SQL keyword this token spells, if any.
  pub fn keyword(&self) -> Option<Keyword> {
    match self.kind {
      TokenKind::Word(Keyword::NoKeyword) => None,
      TokenKind::Word(k) => Some(k),
      _ => None,
    }
  }

  pub fn is_keyword(&self, keyword: Keyword) -> bool { self.keyword() == Some(keyword) }

  pub fn is_punct(&self, c: char) -> bool { self.kind == TokenKind::Punct(c) }

  /// Whether the token is something a column reference could be.
  pub fn is_identifier(&self) -> bool {
    matches!(self.kind, TokenKind::Word(_) | TokenKind::QuotedIdent)
  }
}

#[derive(Debug, Error)]
pub enum LexError {
  #[error(transparent)]
  Tokenizer(#[from] TokenizerError),
  #[error("executable comment at byte {0}")]
  ExecutableComment(usize),
  /// SQLite does not nest block comments, so an inner `/*` would end the
  /// comment earlier than the tokenizer thinks.
  #[error("nested block comment at byte {0}")]
  NestedComment(usize),
}

// ─── Tokenizer ───────────────────────────────────────────────────────────────

/// Split `src` into tokens, discarding whitespace and comments.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
  let dialect = SQLiteDialect {};
  let raw = Tokenizer::new(&dialect, src).tokenize_with_location()?;

  // Every token, whitespace included, starts where the previous one ends.
  let mut cursor = Cursor::new(src);
  let starts: Vec<usize> = raw.iter().map(|t| cursor.seek(t.span.start)).collect();

  let mut tokens = Vec::with_capacity(raw.len());
  for (i, t) in raw.iter().enumerate() {
    let start = starts[i];
    let end = starts.get(i + 1).copied().unwrap_or(src.len());

    let kind = match &t.token {
      SqlToken::Whitespace(Whitespace::MultiLineComment(c)) if c.starts_with('!') => {
        return Err(LexError::ExecutableComment(start));
      }
      SqlToken::Whitespace(Whitespace::MultiLineComment(c)) if c.contains("/*") => {
        return Err(LexError::NestedComment(start));
      }
      SqlToken::Whitespace(_) | SqlToken::EOF => continue,
      SqlToken::Word(w) if w.quote_style.is_some() => TokenKind::QuotedIdent,
      SqlToken::Word(w) => TokenKind::Word(w.keyword),
      SqlToken::SingleQuotedString(_)
      | SqlToken::NationalStringLiteral(_)
      | SqlToken::HexStringLiteral(_) => TokenKind::Str,
      SqlToken::Number(..) => TokenKind::Number,
      SqlToken::SemiColon => TokenKind::Terminator,
      SqlToken::LParen => TokenKind::Punct('('),
      SqlToken::RParen => TokenKind::Punct(')'),
      SqlToken::Comma => TokenKind::Punct(','),
      SqlToken::Period => TokenKind::Punct('.'),
      SqlToken::Char(c) => TokenKind::Punct(*c),
      _ => TokenKind::Operator,
    };

    let span = match kind {
      TokenKind::QuotedIdent if end >= start + 2 => start + 1..end - 1,
      _ => start..end,
    };
    tokens.push(Token { kind, text: &src[span.clone()], span });
  }

  Ok(tokens)
}

/// Walks `src` the way the tokenizer counts positions (1-based lines and
/// columns, one column per `char`) to turn a [`Location`] into a byte offset.
struct Cursor<'a> {
  chars:  Peekable<CharIndices<'a>>,
  len:    usize,
  line:   u64,
  column: u64,
}

impl<'a> Cursor<'a> {
  fn new(src: &'a str) -> Self {
    Self { chars: src.char_indices().peekable(), len: src.len(), line: 1, column: 1 }
  }

  /// Locations must be requested in increasing order.
  fn seek(&mut self, to: Location) -> usize {
    while (self.line, self.column) < (to.line, to.column) {
      let Some((_, c)) = self.chars.next() else { break };
      if c == '\n' {
        self.line += 1;
        self.column = 1;
      } else {
        self.column += 1;
      }
    }
    self.chars.peek().map_or(self.len, |&(i, _)| i)
  }
}
