//! dscript: a compiler from DesmosScript to graphing-calculator state.
//!
//! A script is read line by line. Each line is either a statement (`color`,
//! `slider`, `folder`, `include`, ...) that changes the graph being built, or
//! an expression that is rewritten into calculator notation and added to it.
//!
//! ```
//! let document = dscript::compile("color #2d70b3\ny = if(x > 0) then x else -x").unwrap();
//! assert_eq!(
//!     document.notation_listing(),
//!     r"y=\left\{x>0:x,-x\right\}"
//! );
//! ```
//!
//! Problems a line can recover from are collected as [`Warning`]s on the
//! [`Compiler`]; only a circular include (or an unreadable root script) stops
//! compilation.

pub mod callstack;
pub mod compiler;
pub mod conditional;
pub mod defaults;
pub mod document;
pub mod errors;
pub mod log;
pub mod notation;
pub mod resolve;
pub mod state;
pub mod statements;
pub mod stdlib;
pub mod types;

use std::path::Path;

pub use callstack::CallStack;
pub use compiler::{Compiler, Options};
pub use document::Document;
pub use errors::{CompileError, Warning, WarningKind};
pub use resolve::{FsLoader, MemoryLoader, ScriptLoader};

/// Compile a script with no file context. Includes are read relative to the
/// current directory; warnings are discarded.
pub fn compile(source: &str) -> Result<Document, CompileError> {
    let mut compiler = Compiler::new();
    compiler.parse(source)?;
    Ok(compiler.document())
}

/// Compile the script at `path`. Includes are read relative to its directory.
///
/// The compiler is returned so its warnings can be reported alongside the
/// document.
pub fn compile_file(path: impl AsRef<Path>) -> Result<Compiler, CompileError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| defaults::ROOT_NAME.to_string());
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut compiler = Compiler::with_options(Options::new().name(name).loader(FsLoader::new(dir)));
    compiler.parse(&source)?;
    log::info!(
        path = %path.display(),
        entries = compiler.state().entries().len(),
        warnings = compiler.warnings().len(),
        "compiled script"
    );
    Ok(compiler)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Compile with a fixed seed and no file access, panicking on fatal errors.
    pub(crate) fn compile_ok(source: &str) -> Compiler {
        let mut compiler =
            Compiler::with_options(Options::new().seed("test").loader(MemoryLoader::new()));
        compiler.parse(source).unwrap();
        compiler
    }

    #[test]
    fn repeated_parse_appends() {
        let mut compiler = compile_ok("a = 1\ncolor #ff0000");
        compiler.parse("b = 2").unwrap();
        let entries = compiler.state().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].id(), "3");
        assert_eq!(
            entries[1].as_expression().unwrap().color.to_string(),
            "#ff0000"
        );
    }

    #[test]
    fn blank_input_gives_an_empty_document() {
        let document = compile("\n   \n").unwrap();
        assert!(document.entries().is_empty());
        assert_eq!(document.notation_listing(), "");
    }

    #[test]
    fn unreadable_root_script_is_fatal() {
        let err = compile_file("/definitely/not/here.dscript").unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
    }
}
