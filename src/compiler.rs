//! Compiler driver: splits a script into logical lines and feeds them to the
//! statement dispatcher.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use miette::SourceSpan;

use crate::callstack::{self, CallStack};
use crate::defaults;
use crate::document::Document;
use crate::errors::{CompileError, SourceContext, Warning, WarningKind};
use crate::log::{debug, warn};
use crate::resolve::{FsLoader, ScriptLoader};
use crate::state::GraphState;
use crate::statements;
use crate::types::RandomSeed;

/// Settings for a top-level compilation.
#[derive(Clone)]
pub struct Options {
    name: String,
    seed: Option<RandomSeed>,
    loader: Option<Rc<dyn ScriptLoader>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            name: defaults::ROOT_NAME.to_string(),
            seed: None,
            loader: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("name", &self.name)
            .field("seed", &self.seed)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the root frame in traces (a file name, or `<root>`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Use a fixed random seed instead of generating one.
    pub fn seed(mut self, seed: impl Into<RandomSeed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Where file-backed includes are read from. Defaults to the current
    /// directory.
    pub fn loader(mut self, loader: impl ScriptLoader + 'static) -> Self {
        self.loader = Some(Rc::new(loader));
        self
    }
}

/// One statement after comment stripping and continuation joining.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line
    pub number: usize,
    /// Byte range of the first physical line in the source
    pub span: (usize, usize),
    pub text: String,
}

/// A script compiler and the graph it has built so far.
///
/// `parse` may be called several times; each call appends to the same graph.
pub struct Compiler {
    state: GraphState,
    stack: CallStack,
    loader: Rc<dyn ScriptLoader>,
    /// Directory of this script, relative to the loader's root
    dir: PathBuf,
    warnings: Vec<Warning>,
    source: SourceContext,
    span: SourceSpan,
}

impl fmt::Debug for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("state", &self.state)
            .field("stack", &self.stack)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let seed = options.seed.unwrap_or_else(RandomSeed::generate);
        let loader = options
            .loader
            .unwrap_or_else(|| Rc::new(FsLoader::new(".")));
        Self {
            state: GraphState::new(seed),
            source: SourceContext::new(&options.name, ""),
            stack: CallStack::root(options.name),
            loader,
            dir: PathBuf::new(),
            warnings: Vec::new(),
            span: SourceSpan::from(0..0),
        }
    }

    /// Compiler for the script `name` found at `path`: same seed and loader,
    /// fresh graph, and a copy of this call stack with the script pushed. Its
    /// own includes resolve next to `path`.
    pub(crate) fn child(&self, name: &str, path: &Path) -> Self {
        Self {
            state: GraphState::new(self.state.seed().clone()),
            stack: self.stack.child_at(name, path),
            loader: Rc::clone(&self.loader),
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            warnings: Vec::new(),
            source: SourceContext::new(name, ""),
            span: SourceSpan::from(0..0),
        }
    }

    /// Compile `source`, appending to the graph.
    pub fn parse(&mut self, source: &str) -> Result<(), CompileError> {
        self.source = SourceContext::new(&self.source.name, source);
        for line in logical_lines(source) {
            self.stack.set_line(line.number);
            self.span = SourceSpan::from(line.span.0..line.span.0 + line.span.1);
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }
            statements::dispatch(self, text)?;
        }
        Ok(())
    }

    pub fn document(&self) -> Document {
        self.state.to_document()
    }

    /// Notation of every expression entry, in entry order.
    pub fn notations(&self) -> Vec<String> {
        self.state.notations()
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.stack
    }

    pub(crate) fn state_mut(&mut self) -> &mut GraphState {
        &mut self.state
    }

    pub(crate) fn loader(&self) -> &dyn ScriptLoader {
        self.loader.as_ref()
    }

    /// Where `include name` points from this script, relative to the
    /// loader's root.
    pub(crate) fn module_path(&self, name: &str) -> PathBuf {
        callstack::normalize(&self.dir.join(name))
    }

    /// Record a warning against the current line.
    pub(crate) fn warn(&mut self, kind: WarningKind) {
        let warning = Warning {
            kind,
            trace: self.stack.clone(),
        };
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Keep the warnings of a finished child compilation.
    pub(crate) fn adopt_warnings(&mut self, child: Compiler) {
        debug!(count = child.warnings.len(), "adopting child warnings");
        self.warnings.extend(child.warnings);
    }

    /// The fatal error for including `name` while it is already on the stack.
    pub(crate) fn circular_include(&self, name: &str, path: &Path) -> CompileError {
        CompileError::CircularInclude {
            name: name.to_string(),
            trace: self.stack.child_at(name, path),
            src: self.source.named_source(),
            span: self.span,
        }
    }
}

/// Split a script into logical lines.
///
/// Comments are dropped first, then a `\` at the end of a line joins it with
/// the next one. A line that is wholly a comment never continues and adds
/// nothing to a line it would be joined to. Blank lines are kept so numbering
/// stays exact.
pub fn logical_lines(source: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut pending: Option<LogicalLine> = None;
    let mut offset = 0;

    for (index, raw) in source.split('\n').enumerate() {
        let physical = raw.strip_suffix('\r').unwrap_or(raw);
        let is_comment = physical.trim_start().starts_with('#');
        let (content, continues) = if is_comment {
            (physical, false)
        } else {
            let content = strip_trailing_comment(physical);
            match content.trim_end().strip_suffix('\\') {
                Some(head) => (head, true),
                None => (content, false),
            }
        };

        match pending.as_mut() {
            Some(line) if !is_comment => line.text.push_str(content.trim_start()),
            Some(_) => {}
            None => {
                pending = Some(LogicalLine {
                    number: index + 1,
                    span: (offset, physical.len()),
                    text: content.to_string(),
                })
            }
        }
        if !continues {
            lines.extend(pending.take());
        }
        offset += raw.len() + 1;
    }
    lines.extend(pending);
    lines
}

/// Drop a `#` comment that follows whitespace. `#` glued to text (as in
/// `color #ff0000`) is not a comment, and note lines are kept whole.
fn strip_trailing_comment(line: &str) -> &str {
    if line.trim_start().starts_with('"') {
        return line;
    }
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'#' || i == 0 || !bytes[i - 1].is_ascii_whitespace() {
            continue;
        }
        if bytes.get(i + 1).is_none_or(u8::is_ascii_whitespace) {
            return &line[..i];
        }
    }
    line
}
