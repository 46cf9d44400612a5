//! Statements that change graph-wide settings.

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::errors::{CompileError, WarningKind};
use crate::types::{Axis, Color};

/// `color #rrggbb`: color for the expressions that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStatement;

impl Statement for ColorStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "color").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let arg = keyword_args(line, "color").unwrap_or_default();
        match Color::parse(arg) {
            Ok(color) => compiler.state_mut().color = color,
            Err(_) => compiler.warn(WarningKind::InvalidColor {
                statement: line.to_string(),
            }),
        }
        Ok(())
    }
}

/// `xbounds MIN,MAX` and `ybounds MIN,MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsStatement;

impl BoundsStatement {
    fn split(line: &str) -> Option<(Axis, &str)> {
        if let Some(args) = keyword_args(line, "xbounds") {
            Some((Axis::X, args))
        } else {
            keyword_args(line, "ybounds").map(|args| (Axis::Y, args))
        }
    }
}

impl Statement for BoundsStatement {
    fn claims(&self, line: &str) -> bool {
        Self::split(line).is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let Some((axis, args)) = Self::split(line) else {
            return Ok(());
        };
        match parse_range(args) {
            Some((min, max)) => compiler.state_mut().viewport.set_axis(axis, min, max),
            None => compiler.warn(WarningKind::InvalidBounds {
                statement: line.to_string(),
            }),
        }
        Ok(())
    }
}

/// `MIN,MAX` as two finite numbers.
fn parse_range(args: &str) -> Option<(f64, f64)> {
    let (min, max) = args.split_once(',')?;
    let min: f64 = min.trim().parse().ok()?;
    let max: f64 = max.trim().parse().ok()?;
    (min.is_finite() && max.is_finite()).then_some((min, max))
}
