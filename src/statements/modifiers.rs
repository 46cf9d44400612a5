//! Statements that modify the preceding expression.

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::document::Expression;
use crate::errors::{CompileError, WarningKind};
use crate::types::{DRAG_MODES, LabelOrientation};

/// Run `modify` on the last entry, or warn that `statement` has nothing to
/// modify.
fn modify_last(
    compiler: &mut Compiler,
    statement: &'static str,
    modify: impl FnOnce(&mut Expression),
) {
    match compiler.state_mut().last_expression_mut() {
        Some(expr) => modify(expr),
        None => compiler.warn(WarningKind::NoExpression { statement }),
    }
}

/// `draggable MODE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraggableStatement;

impl Statement for DraggableStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "draggable").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let mode = keyword_args(line, "draggable").unwrap_or_default();
        if !DRAG_MODES.contains(&mode) {
            compiler.warn(WarningKind::InvalidDragMode {
                mode: mode.to_string(),
            });
        }
        // The mode is stored even when it was warned about.
        modify_last(compiler, "draggable", |expr| {
            expr.drag_mode = Some(mode.to_string());
        });
        Ok(())
    }
}

/// `hidden`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HiddenStatement;

impl Statement for HiddenStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "hidden").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, _line: &str) -> Result<(), CompileError> {
        modify_last(compiler, "hidden", |expr| expr.hidden = Some(true));
        Ok(())
    }
}

/// `label TEXT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStatement;

impl Statement for LabelStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "label").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let text = keyword_args(line, "label").unwrap_or_default();
        if text.is_empty() {
            compiler.warn(WarningKind::MissingLabel);
            return Ok(());
        }
        modify_last(compiler, "label", |expr| {
            expr.show_label = Some(true);
            expr.label = Some(text.to_string());
        });
        Ok(())
    }
}

/// `labelopts OPTION...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOptionsStatement;

impl Statement for LabelOptionsStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "labelopts").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let mut orientation = None;
        for option in keyword_args(line, "labelopts")
            .unwrap_or_default()
            .split_whitespace()
        {
            match option.parse::<LabelOrientation>() {
                Ok(parsed) => orientation = Some(parsed),
                Err(()) => compiler.warn(WarningKind::UnknownLabelOption {
                    option: option.to_string(),
                }),
            }
        }
        modify_last(compiler, "labelopts", |expr| {
            if orientation.is_some() {
                expr.label_orientation = orientation;
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::compile_ok;

    fn first_expression(source: &str) -> (Expression, Vec<WarningKind>) {
        let c = compile_ok(source);
        let expr = c.state().entries()[0].as_expression().unwrap().clone();
        let kinds = c.warnings().iter().map(|w| w.kind.clone()).collect();
        (expr, kinds)
    }

    #[test]
    fn draggable_modes() {
        let (expr, warnings) = first_expression("P = (1, 2)\ndraggable XY");
        assert_eq!(expr.drag_mode.as_deref(), Some("XY"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn invalid_drag_mode_is_warned_about_and_stored() {
        let (expr, warnings) = first_expression("P = (1, 2)\ndraggable sideways");
        assert_eq!(expr.drag_mode.as_deref(), Some("sideways"));
        assert_eq!(
            warnings,
            vec![WarningKind::InvalidDragMode {
                mode: "sideways".into()
            }]
        );
    }

    #[test]
    fn hidden_and_labels() {
        let (expr, warnings) =
            first_expression("P = (0, 0)\nhidden\nlabel Origin point\nlabelopts above");
        assert_eq!(expr.hidden, Some(true));
        assert_eq!(expr.show_label, Some(true));
        assert_eq!(expr.label.as_deref(), Some("Origin point"));
        assert_eq!(expr.label_orientation, Some(LabelOrientation::Above));
        assert!(warnings.is_empty());
    }

    #[test]
    fn label_without_text_warns() {
        let (expr, warnings) = first_expression("P = (0, 0)\nlabel");
        assert_eq!(expr.label, None);
        assert_eq!(expr.show_label, None);
        assert_eq!(warnings, vec![WarningKind::MissingLabel]);
    }

    #[test]
    fn unknown_label_options_are_skipped() {
        let (expr, warnings) = first_expression("P = (0, 0)\nlabelopts diagonal left");
        assert_eq!(expr.label_orientation, Some(LabelOrientation::Left));
        assert_eq!(
            warnings,
            vec![WarningKind::UnknownLabelOption {
                option: "diagonal".into()
            }]
        );
    }

    #[test]
    fn modifiers_need_an_expression() {
        let c = compile_ok("folder F\nhidden\nlabel x\nlabelopts left\ndraggable X");
        let statements: Vec<_> = c
            .warnings()
            .iter()
            .map(|w| match w.kind {
                WarningKind::NoExpression { statement } => statement,
                _ => panic!("unexpected warning {w}"),
            })
            .collect();
        assert_eq!(statements, vec!["hidden", "label", "labelopts", "draggable"]);
    }
}
