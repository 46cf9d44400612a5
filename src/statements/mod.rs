//! Statement handlers
//!
//! Each statement type is its own handler that knows how to:
//! - Recognize the lines it is responsible for
//! - Apply itself to the compiler's graph state
//!
//! Handlers are tried in registry order. A line no handler claims is an
//! expression.

mod basic;
mod folder;
mod include;
mod modifiers;
mod settings;
mod slider;

use enum_dispatch::enum_dispatch;

use crate::compiler::Compiler;
use crate::errors::CompileError;
use crate::log::debug;

pub use basic::{CommentStatement, ExpressionStatement, NoteStatement};
pub use folder::{EndFolderStatement, FolderStatement};
pub use include::IncludeStatement;
pub use modifiers::{DraggableStatement, HiddenStatement, LabelOptionsStatement, LabelStatement};
pub use settings::{BoundsStatement, ColorStatement};
pub use slider::SliderStatement;

/// Common behavior for all statements
#[enum_dispatch]
pub trait Statement {
    /// Whether this handler is responsible for `line` (already trimmed and
    /// non-empty).
    fn claims(&self, line: &str) -> bool;

    /// Apply the statement. Recoverable problems become warnings on the
    /// compiler; only fatal ones are returned.
    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError>;
}

/// A statement enum wrapping all handler types
#[enum_dispatch(Statement)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementEnum {
    Comment(CommentStatement),
    Note(NoteStatement),
    Color(ColorStatement),
    Bounds(BoundsStatement),
    Slider(SliderStatement),
    Draggable(DraggableStatement),
    Hidden(HiddenStatement),
    Label(LabelStatement),
    LabelOptions(LabelOptionsStatement),
    Folder(FolderStatement),
    EndFolder(EndFolderStatement),
    Include(IncludeStatement),
    Expression(ExpressionStatement),
}

/// Handlers in the order they are tried.
const REGISTRY: [StatementEnum; 12] = [
    StatementEnum::Comment(CommentStatement),
    StatementEnum::Note(NoteStatement),
    StatementEnum::Color(ColorStatement),
    StatementEnum::Bounds(BoundsStatement),
    StatementEnum::Slider(SliderStatement),
    StatementEnum::Draggable(DraggableStatement),
    StatementEnum::Hidden(HiddenStatement),
    StatementEnum::Label(LabelStatement),
    StatementEnum::LabelOptions(LabelOptionsStatement),
    StatementEnum::Folder(FolderStatement),
    StatementEnum::EndFolder(EndFolderStatement),
    StatementEnum::Include(IncludeStatement),
];

/// The handler responsible for `line`.
pub fn classify(line: &str) -> StatementEnum {
    REGISTRY
        .iter()
        .find(|handler| handler.claims(line))
        .copied()
        .unwrap_or(StatementEnum::Expression(ExpressionStatement))
}

/// Compile one logical line.
pub fn dispatch(compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
    let handler = classify(line);
    debug!(line, ?handler, "dispatch");
    handler.apply(compiler, line)
}

/// The arguments after `keyword` when it is the first word of `line`.
fn keyword_args<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}
