use anyhow::{Context, Result};
use glob::Pattern;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use swc_common::comments::SingleThreadedComments;
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_ast::{BinExpr, CallExpr, Expr, ModuleDecl, Stmt};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use crate::binder::{bind, CallSite, MessageFields};
use crate::catalog::Catalog;
use crate::comments::{CommentCollector, DEFAULT_COMMENT_MARKER};
use crate::config::Config;
use crate::error::ExtractError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::logging;
use crate::matcher::callee_name;
use crate::message::{default_identifiers, ExtractedMessage, IdentifierSpec, MessageEntry, SourceReference};

/// Settings for extracting one source text.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Domain for calls whose function has no domain parameter
    pub default_domain: String,
    /// Recorded in references; also picks the parser syntax by extension
    pub filename: Option<String>,
    /// Recognized translation functions
    pub identifiers: IdentifierSpec,
    /// Attach marker comments preceding each call's statement
    pub attach_comment: bool,
    /// Prefix a line comment must start with to be attached
    pub comment_marker: String,
    /// Record line/column of each call
    pub locations: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_domain: "messages".to_string(),
            filename: None,
            identifiers: default_identifiers(),
            attach_comment: true,
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            locations: true,
        }
    }
}

impl ExtractOptions {
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Error encountered while reading input files
#[derive(Debug, Clone)]
pub struct ExtractionError {
    pub file_path: String,
    pub message: String,
}

/// Result of extraction from multiple files
#[derive(Debug)]
pub struct ExtractionResult {
    pub catalog: Catalog,
    pub files_processed: usize,
    pub errors: Vec<ExtractionError>,
}

/// Visitor that walks the AST and collects translation calls, outer calls first
struct CallVisitor<'a> {
    options: &'a ExtractOptions,
    source_map: Lrc<SourceMap>,
    comments: CommentCollector<'a>,
    /// Start of each statement enclosing the current node, innermost last
    statement_starts: Vec<BytePos>,
    messages: Vec<ExtractedMessage>,
    error: Option<ExtractError>,
}

impl<'a> CallVisitor<'a> {
    fn new(
        options: &'a ExtractOptions,
        source_map: Lrc<SourceMap>,
        comments: &'a SingleThreadedComments,
    ) -> Self {
        Self {
            options,
            source_map,
            comments: CommentCollector::new(
                comments,
                &options.comment_marker,
                options.attach_comment,
            ),
            statement_starts: Vec::new(),
            messages: Vec::new(),
            error: None,
        }
    }

    fn display_filename(&self) -> &str {
        self.options.filename.as_deref().unwrap_or("<unknown>")
    }

    fn reference(&self, span: Span) -> SourceReference {
        let filename = self.options.filename.clone();
        if !self.options.locations {
            return SourceReference::file_only(filename);
        }

        let start = self.source_map.lookup_char_pos(span.lo);
        let end = self.source_map.lookup_char_pos(span.hi);
        SourceReference {
            filename,
            first_line: Some(start.line),
            first_column: Some(start.col_display),
            last_line: Some(end.line),
            last_column: Some(end.col_display),
        }
    }

    fn extract_call(&mut self, call: &CallExpr) {
        let options = self.options;
        let Some(name) = callee_name(&call.callee) else {
            return;
        };
        let Some(roles) = options.identifiers.get(name.as_ref()) else {
            return;
        };

        let line = self.source_map.lookup_char_pos(call.span.lo).line;
        let location = format!("{}:{}", self.display_filename(), line);
        let site = CallSite {
            function: &name,
            location: &location,
        };

        match bind(roles, &call.args, site) {
            Ok(Some(fields)) => self.push_message(call, fields),
            Ok(None) => {
                logging::debug(&format!(
                    "{}: skipped {}() without a literal msgid",
                    location, name
                ));
            }
            Err(err) => self.error = Some(err),
        }
    }

    fn push_message(&mut self, call: &CallExpr, fields: MessageFields) {
        let statement_start = self
            .statement_starts
            .last()
            .copied()
            .unwrap_or(call.span.lo);

        let entry = MessageEntry {
            msgid: fields.msgid,
            msgctxt: fields.msgctxt,
            msgid_plural: fields.msgid_plural,
            references: vec![self.reference(call.span)],
            extracted_comments: self.comments.collect(statement_start),
        };

        let domain = fields
            .domain
            .unwrap_or_else(|| self.options.default_domain.clone());
        self.messages.push(ExtractedMessage { domain, entry });
    }
}

impl Visit for CallVisitor<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        self.statement_starts.push(stmt.span().lo);
        stmt.visit_children_with(self);
        self.statement_starts.pop();
    }

    fn visit_module_decl(&mut self, decl: &ModuleDecl) {
        self.statement_starts.push(decl.span().lo);
        decl.visit_children_with(self);
        self.statement_starts.pop();
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if self.error.is_some() {
            return;
        }

        self.extract_call(call);

        // Continue into arguments: f(gettext("x"))
        call.visit_children_with(self);
    }

    /// Operand chains like `"a" + "b" + ...` are walked with an explicit stack.
    fn visit_bin_expr(&mut self, bin: &BinExpr) {
        let mut pending: Vec<&Expr> = vec![&*bin.right, &*bin.left];

        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Bin(inner) => {
                    pending.push(&inner.right);
                    pending.push(&inner.left);
                }
                Expr::Paren(paren) => pending.push(&paren.expr),
                _ => expr.visit_with(self),
            }
        }
    }
}

fn syntax_for(filename: Option<&str>) -> Syntax {
    let extension = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str());

    match extension {
        Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax {
            decorators: true,
            ..Default::default()
        }),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            decorators: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

/// Extract the translation messages of one source text, in document order.
///
/// Source that does not parse yields no messages; the parse error is logged.
pub fn extract_messages(
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<ExtractedMessage>, ExtractError> {
    let cm: Lrc<SourceMap> = Default::default();

    let file_name = match &options.filename {
        Some(name) => FileName::Real(PathBuf::from(name)),
        None => FileName::Anon,
    };
    let fm = cm.new_source_file(file_name.into(), source.to_string());

    let comments = SingleThreadedComments::default();
    let lexer = Lexer::new(
        syntax_for(options.filename.as_deref()),
        Default::default(),
        StringInput::from(&*fm),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);
    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(e) => {
            let loc = cm.lookup_char_pos(e.span().lo);
            logging::warn(&format!(
                "Parse error in {}:{}:{}: {:?}",
                options.filename.as_deref().unwrap_or("<unknown>"),
                loc.line,
                loc.col_display + 1,
                e.kind()
            ));
            return Ok(Vec::new());
        }
    };

    let mut visitor = CallVisitor::new(options, cm.clone(), &comments);
    program.visit_with(&mut visitor);

    match visitor.error {
        Some(err) => Err(err),
        None => Ok(visitor.messages),
    }
}

/// Extract one source text into a fresh catalog.
///
/// A malformed translation call fails the whole text; no partial catalog is returned.
pub fn extract(source: &str, options: &ExtractOptions) -> Result<Catalog, ExtractError> {
    let messages = extract_messages(source, options)?;
    Ok(Catalog::from_messages(
        options.default_domain.clone(),
        messages,
    ))
}

/// Result type for a single file extraction
enum FileExtractionResult {
    Success(Catalog),
    ReadError(ExtractionError),
    Malformed(ExtractError),
}

fn extract_file<F: FileSystem>(path: &Path, config: &Config, fs: &F) -> FileExtractionResult {
    let file_path = path.display().to_string();
    let source = match fs
        .read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", file_path))
    {
        Ok(source) => source,
        Err(e) => {
            return FileExtractionResult::ReadError(ExtractionError {
                file_path,
                message: format!("{:#}", e),
            })
        }
    };

    let options = config.extract_options(Some(file_path));
    match extract(&source, &options) {
        Ok(catalog) => FileExtractionResult::Success(catalog),
        Err(err) => FileExtractionResult::Malformed(err),
    }
}

/// Extract `paths` in parallel and merge the results in path order.
///
/// Unreadable files are collected as errors; a malformed translation call in any
/// file fails the whole run.
pub fn extract_files_with_fs<F: FileSystem>(
    paths: &[PathBuf],
    config: &Config,
    fs: &F,
) -> Result<ExtractionResult> {
    let results: Vec<FileExtractionResult> = paths
        .par_iter()
        .map(|path| extract_file(path, config, fs))
        .collect();

    let mut catalog = Catalog::new(config.default_domain.clone());
    let mut errors = Vec::new();
    let mut files_processed = 0;

    for result in results {
        match result {
            FileExtractionResult::Success(file_catalog) => {
                files_processed += 1;
                catalog.merge(file_catalog);
            }
            FileExtractionResult::ReadError(err) => errors.push(err),
            FileExtractionResult::Malformed(err) => return Err(err.into()),
        }
    }

    Ok(ExtractionResult {
        catalog,
        files_processed,
        errors,
    })
}

/// Expand glob patterns into a sorted, de-duplicated file list.
///
/// Entries glob cannot read are returned as errors; an invalid pattern fails.
pub fn collect_files<F: FileSystem>(
    patterns: &[String],
    ignore_patterns: &[String],
    fs: &F,
) -> Result<(Vec<PathBuf>, Vec<ExtractionError>)> {
    let ignore_matchers = compile_ignore_patterns(ignore_patterns)?;
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for pattern in patterns {
        let matches =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;

        for entry in matches {
            match entry {
                Ok(path) => {
                    if fs.is_file(&path) && !matches_ignore_path(&path, &ignore_matchers) {
                        files.push(path);
                    }
                }
                Err(e) => errors.push(ExtractionError {
                    file_path: pattern.clone(),
                    message: format!("Glob error: {}", e),
                }),
            }
        }
    }

    files.sort();
    files.dedup();
    Ok((files, errors))
}

/// Extract every file matched by the configured input globs.
pub fn extract_from_glob(config: &Config) -> Result<ExtractionResult> {
    let fs = RealFileSystem;
    let (files, glob_errors) = collect_files(&config.input, &config.ignore, &fs)?;
    logging::debug(&format!("Matched {} file(s)", files.len()));

    let mut result = extract_files_with_fs(&files, config, &fs)?;
    result.errors.extend(glob_errors);
    Ok(result)
}

fn matches_ignore_path(path: &Path, patterns: &[Pattern]) -> bool {
    patterns.iter().any(|pattern| pattern.matches_path(path))
}

fn compile_ignore_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        let matcher = Pattern::new(pattern)
            .with_context(|| format!("Invalid ignore glob pattern: {}", pattern))?;
        compiled.push(matcher);
    }
    Ok(compiled)
}
