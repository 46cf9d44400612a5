//! `folder TITLE`, `folder-closed TITLE` and `endfolder`.

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::errors::{CompileError, WarningKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderStatement;

impl FolderStatement {
    /// Title and whether the folder starts collapsed.
    fn split(line: &str) -> Option<(&str, bool)> {
        if let Some(title) = keyword_args(line, "folder-closed") {
            Some((title, true))
        } else {
            keyword_args(line, "folder").map(|title| (title, false))
        }
    }
}

impl Statement for FolderStatement {
    fn claims(&self, line: &str) -> bool {
        Self::split(line).is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let Some((title, collapsed)) = Self::split(line) else {
            return Ok(());
        };
        if title.is_empty() {
            compiler.warn(WarningKind::MissingFolderTitle);
            return Ok(());
        }
        compiler
            .state_mut()
            .begin_folder(title.to_string(), collapsed);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndFolderStatement;

impl Statement for EndFolderStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "endfolder").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, _line: &str) -> Result<(), CompileError> {
        compiler.state_mut().end_folder();
        Ok(())
    }
}
