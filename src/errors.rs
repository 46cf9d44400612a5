//! Error and warning types with rich diagnostics using miette.
//!
//! Compilation has two tiers. A [`Warning`] is recorded and compilation goes
//! on with the next line; a [`CompileError`] aborts the whole compilation,
//! including every compiler above the one that raised it.

use std::fmt;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::callstack::CallStack;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<root>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Fatal errors
// ============================================================================

#[derive(Error, Diagnostic, Debug)]
pub enum CompileError {
    #[error("circular include of `{name}`\n{trace}")]
    #[diagnostic(
        code(dscript::include::circular),
        help("a script cannot include itself, directly or through other scripts")
    )]
    CircularInclude {
        name: String,
        trace: CallStack,
        #[source_code]
        src: NamedSource<String>,
        #[label("`{name}` is already being compiled")]
        span: SourceSpan,
    },

    #[error("failed to read script `{path}`")]
    #[diagnostic(code(dscript::io::read))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Warnings
// ============================================================================

/// What went wrong in a statement that compilation recovered from.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum WarningKind {
    #[error("invalid color statement `{statement}`")]
    #[diagnostic(
        code(dscript::warn::color),
        severity(Warning),
        help("colors are written `#rrggbb` with lowercase hex digits")
    )]
    InvalidColor { statement: String },

    #[error("invalid bounds statement `{statement}`")]
    #[diagnostic(
        code(dscript::warn::bounds),
        severity(Warning),
        help("bounds are written `xbounds MIN,MAX`")
    )]
    InvalidBounds { statement: String },

    #[error("`{statement}` must follow an expression")]
    #[diagnostic(code(dscript::warn::no_expression), severity(Warning))]
    NoExpression { statement: &'static str },

    #[error("slider statement should be in the form `slider MIN to MAX`")]
    #[diagnostic(code(dscript::warn::slider), severity(Warning))]
    SliderSyntax,

    #[error("invalid slider speed `{arg}`")]
    #[diagnostic(
        code(dscript::warn::slider_speed),
        severity(Warning),
        help("speeds are written `@2x` or `@0.5x`")
    )]
    SliderSpeed { arg: String },

    #[error("expected a step after `step` in slider statement")]
    #[diagnostic(code(dscript::warn::slider_step), severity(Warning))]
    MissingStep,

    #[error("ignoring unrecognized slider argument `{arg}`")]
    #[diagnostic(code(dscript::warn::slider_arg), severity(Warning))]
    UnknownSliderArg { arg: String },

    #[error("invalid drag mode `{mode}`")]
    #[diagnostic(
        code(dscript::warn::drag_mode),
        severity(Warning),
        help("drag modes are X, Y, XY and NONE")
    )]
    InvalidDragMode { mode: String },

    #[error("expected label text in `label` statement")]
    #[diagnostic(code(dscript::warn::label), severity(Warning))]
    MissingLabel,

    #[error("ignoring unrecognized label option `{option}`")]
    #[diagnostic(
        code(dscript::warn::label_option),
        severity(Warning),
        help("label options are left, right, above and below")
    )]
    UnknownLabelOption { option: String },

    #[error("expected folder title in `folder` statement, ignoring")]
    #[diagnostic(code(dscript::warn::folder), severity(Warning))]
    MissingFolderTitle,

    #[error("expected a module name in `include` statement")]
    #[diagnostic(code(dscript::warn::include), severity(Warning))]
    MissingIncludeName,

    #[error("unterminated quote in `{statement}`")]
    #[diagnostic(code(dscript::warn::quote), severity(Warning))]
    UnterminatedQuote { statement: String },

    #[error("could not resolve include `{name}`")]
    #[diagnostic(
        code(dscript::warn::unresolved_include),
        severity(Warning),
        help("includes name a standard library module or a script next to this one")
    )]
    UnresolvedInclude { name: String },
}

/// A recovered problem, with the call stack at the point it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub kind: WarningKind,
    pub trace: CallStack,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "warning: {}\n{}", self.kind, self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_display_includes_trace() {
        let mut trace = CallStack::root("<root>");
        trace.set_line(4);
        let warning = Warning {
            kind: WarningKind::UnresolvedInclude {
                name: "nope".into(),
            },
            trace,
        };
        assert_eq!(
            warning.to_string(),
            "warning: could not resolve include `nope`\nfile <root> line 4"
        );
    }

    #[test]
    fn warnings_carry_codes() {
        let kind = WarningKind::MissingStep;
        let code = kind.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("dscript::warn::slider_step"));
        assert_eq!(kind.severity(), Some(miette::Severity::Warning));
    }
}
