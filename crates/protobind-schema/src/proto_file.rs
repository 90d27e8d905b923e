//! `.proto` file descriptors
//!
//! [`ProtoFileInfo`] is a shallow reader: it records the package and the
//! qualified names of every message, enum and service declared in a file,
//! and skips everything else (fields, options, reserved ranges, extensions).
//! Nested messages and enums are listed in declaration pre-order.

use crate::error::{SchemaError, SchemaResult};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::paths::strip_source_roots;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read-only view of a schema file's declarations.
///
/// Entity slices are in declaration order.
pub trait SchemaFile {
    /// Dotted package name, empty when the file declares none
    fn package_name(&self) -> &str;

    /// All messages, including nested ones
    fn messages(&self) -> &[SchemaEntity];

    /// All enums, including those nested in messages
    fn enums(&self) -> &[SchemaEntity];

    /// Top-level services
    fn services(&self) -> &[SchemaEntity];
}

/// A named schema declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntity {
    fqname: String,
}

impl SchemaEntity {
    /// Create an entity from its fully-qualified dotted name
    pub fn new(fqname: impl Into<String>) -> Self {
        Self {
            fqname: fqname.into(),
        }
    }

    /// Fully-qualified dotted name (`pkg.Outer.Inner`)
    pub fn fqname(&self) -> &str {
        &self.fqname
    }
}

/// Declarations read from one `.proto` file
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProtoFileInfo {
    name: String,
    package: String,
    messages: Vec<SchemaEntity>,
    enums: Vec<SchemaEntity>,
    services: Vec<SchemaEntity>,
}

impl ProtoFileInfo {
    /// Create an empty descriptor for `name` in `package`
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Self::default()
        }
    }

    /// Add a message by its name relative to the package
    pub fn with_message(mut self, name: &str) -> Self {
        let fqname = self.qualify(name);
        self.messages.push(SchemaEntity::new(fqname));
        self
    }

    /// Add an enum by its name relative to the package
    pub fn with_enum(mut self, name: &str) -> Self {
        let fqname = self.qualify(name);
        self.enums.push(SchemaEntity::new(fqname));
        self
    }

    /// Add a service by its name relative to the package
    pub fn with_service(mut self, name: &str) -> Self {
        let fqname = self.qualify(name);
        self.services.push(SchemaEntity::new(fqname));
        self
    }

    /// Read and parse the file at `path`.
    ///
    /// The recorded file name is `path` with the first matching root in
    /// `strip_roots` removed.
    pub fn open(path: impl AsRef<Path>, strip_roots: &[&str]) -> SchemaResult<Self> {
        let path = path.as_ref();
        let shown = path.to_string_lossy();
        let text = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: shown.to_string(),
            source,
        })?;
        let name = strip_source_roots(&shown, strip_roots);
        tracing::debug!(path = %shown, name = %name, "reading schema file");
        Self::parse(name, &text)
    }

    /// Parse `.proto` source text recorded under `name`
    pub fn parse(name: impl Into<String>, text: &str) -> SchemaResult<Self> {
        let name = name.into();
        let tokens = tokenize(&name, text)?;
        let mut parser = Parser {
            file: &name,
            tokens,
            pos: 0,
            package: None,
            messages: Vec::new(),
            enums: Vec::new(),
            services: Vec::new(),
        };
        parser.parse_file()?;

        let mut info = Self::new(name.clone(), parser.package.unwrap_or_default());
        info.messages = parser.messages.iter().map(|m| info.entity(m)).collect();
        info.enums = parser.enums.iter().map(|e| info.entity(e)).collect();
        info.services = parser.services.iter().map(|s| info.entity(s)).collect();
        Ok(info)
    }

    /// Schema file name after root stripping
    pub fn name(&self) -> &str {
        &self.name
    }

    fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }

    fn entity(&self, name: &str) -> SchemaEntity {
        SchemaEntity::new(self.qualify(name))
    }
}

impl SchemaFile for ProtoFileInfo {
    fn package_name(&self) -> &str {
        &self.package
    }

    fn messages(&self) -> &[SchemaEntity] {
        &self.messages
    }

    fn enums(&self) -> &[SchemaEntity] {
        &self.enums
    }

    fn services(&self) -> &[SchemaEntity] {
        &self.services
    }
}

/// Recursive-descent reader over the token stream.
///
/// Entity names are collected relative to the package because `package`
/// may legally follow other declarations.
struct Parser<'a> {
    file: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    package: Option<String>,
    messages: Vec<String>,
    enums: Vec<String>,
    services: Vec<String>,
}

impl Parser<'_> {
    fn parse_file(&mut self) -> SchemaResult<()> {
        while let Some(token) = self.next() {
            match token.kind {
                TokenKind::Punct(';') => {}
                TokenKind::Word(ref w) => match w.as_str() {
                    "syntax" | "edition" | "import" | "option" | "extend" => {
                        self.skip_statement(token.line)?
                    }
                    "package" => self.parse_package(token.line)?,
                    "message" => self.parse_message("")?,
                    "enum" => {
                        let name = self.expect_name("enum")?;
                        self.skip_block()?;
                        self.enums.push(name);
                    }
                    "service" => {
                        let name = self.expect_name("service")?;
                        self.skip_block()?;
                        self.services.push(name);
                    }
                    other => {
                        return Err(SchemaError::UnsupportedEntity {
                            file: self.file.to_string(),
                            line: token.line,
                            keyword: other.to_string(),
                        });
                    }
                },
                _ => {
                    return Err(SchemaError::syntax(
                        self.file,
                        token.line,
                        format!("unexpected {}", describe(&token.kind)),
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_package(&mut self, line: usize) -> SchemaResult<()> {
        if self.package.is_some() {
            return Err(SchemaError::syntax(self.file, line, "duplicate package"));
        }
        let name = self.expect_name("package")?;
        self.expect_punct(';')?;
        self.package = Some(name);
        Ok(())
    }

    fn parse_message(&mut self, scope: &str) -> SchemaResult<()> {
        let name = self.expect_name("message")?;
        let qualified = if scope.is_empty() {
            name
        } else {
            format!("{scope}.{name}")
        };
        self.messages.push(qualified.clone());
        self.expect_punct('{')?;

        loop {
            let token = self.next().ok_or_else(|| self.eof_error("'}'"))?;
            match token.kind {
                TokenKind::Punct('}') => return Ok(()),
                TokenKind::Punct(';') => {}
                TokenKind::Word(ref w) if w == "message" => self.parse_message(&qualified)?,
                TokenKind::Word(ref w) if w == "enum" => {
                    let name = self.expect_name("enum")?;
                    self.skip_block()?;
                    self.enums.push(format!("{qualified}.{name}"));
                }
                TokenKind::Word(ref w) if w == "oneof" => {
                    self.expect_name("oneof")?;
                    self.skip_block()?;
                }
                // Fields, options, reserved ranges, extensions, groups.
                _ => self.skip_statement(token.line)?,
            }
        }
    }

    /// Skip to the end of the current statement: a `;` at nesting depth
    /// zero, or the `}` that closes a block opened by the statement.
    fn skip_statement(&mut self, line: usize) -> SchemaResult<()> {
        let mut depth = 0usize;
        loop {
            let token = self
                .next()
                .ok_or_else(|| SchemaError::syntax(self.file, line, "unterminated statement"))?;
            match token.kind {
                TokenKind::Punct(';') if depth == 0 => return Ok(()),
                TokenKind::Punct('{' | '(' | '[') => depth += 1,
                TokenKind::Punct('}' | ')' | ']') => {
                    if depth == 0 {
                        return Err(SchemaError::syntax(
                            self.file,
                            token.line,
                            format!("unexpected {}", describe(&token.kind)),
                        ));
                    }
                    depth -= 1;
                    if depth == 0 && token.is_punct('}') {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip a `{ ... }` block including its braces
    fn skip_block(&mut self) -> SchemaResult<()> {
        self.expect_punct('{')?;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.next().ok_or_else(|| self.eof_error("'}'"))?;
            if token.is_punct('{') {
                depth += 1;
            } else if token.is_punct('}') {
                depth -= 1;
            }
        }
        Ok(())
    }

    fn expect_name(&mut self, what: &str) -> SchemaResult<String> {
        let line = self.current_line();
        match self.next() {
            Some(token) => match token.word() {
                Some(word) if !word.starts_with(|c: char| c.is_ascii_digit()) => {
                    Ok(word.to_string())
                }
                _ => Err(SchemaError::syntax(
                    self.file,
                    token.line,
                    format!("expected {what} name, found {}", describe(&token.kind)),
                )),
            },
            None => Err(SchemaError::syntax(
                self.file,
                line,
                format!("expected {what} name, found end of file"),
            )),
        }
    }

    fn expect_punct(&mut self, c: char) -> SchemaResult<()> {
        match self.next() {
            Some(token) if token.is_punct(c) => Ok(()),
            Some(token) => Err(SchemaError::syntax(
                self.file,
                token.line,
                format!("expected '{c}', found {}", describe(&token.kind)),
            )),
            None => Err(self.eof_error(&format!("'{c}'"))),
        }
    }

    fn eof_error(&self, expected: &str) -> SchemaError {
        SchemaError::syntax(
            self.file,
            self.current_line(),
            format!("expected {expected}, found end of file"),
        )
    }

    fn current_line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Word(w) => format!("`{w}`"),
        TokenKind::Str(s) => format!("string \"{s}\""),
        TokenKind::Punct(c) => format!("'{c}'"),
    }
}
