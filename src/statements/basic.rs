//! Comments, notes and plain expressions.

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::conditional;
use crate::errors::CompileError;
use crate::notation;

/// `# ...`: ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStatement;

impl Statement for CommentStatement {
    fn claims(&self, line: &str) -> bool {
        line.starts_with('#')
    }

    fn apply(&self, _compiler: &mut Compiler, _line: &str) -> Result<(), CompileError> {
        Ok(())
    }
}

/// `" text`: a text note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteStatement;

impl Statement for NoteStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "\"").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let text = keyword_args(line, "\"").unwrap_or_default();
        compiler.state_mut().add_note(text.to_string());
        Ok(())
    }
}

/// Anything else: conditionals are expanded, then the line is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionStatement;

impl Statement for ExpressionStatement {
    fn claims(&self, _line: &str) -> bool {
        true
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let latex = notation::format(&conditional::expand(line));
        compiler.state_mut().add_expression(latex);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::document::Entry;
    use crate::tests::compile_ok;

    #[test]
    fn comments_add_nothing() {
        let c = compile_ok("# heading\n#tight\ny = x # trailing");
        assert_eq!(c.notations(), vec!["y=x"]);
        assert!(c.warnings().is_empty());
    }

    #[test]
    fn notes_keep_their_text() {
        let c = compile_ok("\" Hello # not a comment\ny = 1");
        match &c.state().entries()[0] {
            Entry::Note(note) => assert_eq!(note.text, "Hello # not a comment"),
            other => panic!("expected a note, got {other:?}"),
        }
        assert_eq!(c.state().entries()[1].id(), "3");
    }

    #[test]
    fn expressions_are_expanded_and_formatted() {
        let c = compile_ok("f(x) = if(x > 0) then sqrt(x) else 0");
        assert_eq!(
            c.notations(),
            vec![r"f\left(x\right)=\left\{x>0:\sqrt{x},0\right\}"]
        );
    }
}
