//! `slider MIN to MAX [step S] [@Nx] [fwd|once|back_and_forth] [playing]`

use super::{Statement, keyword_args};
use crate::compiler::Compiler;
use crate::defaults;
use crate::document::{Entry, Slider};
use crate::errors::{CompileError, WarningKind};
use crate::notation;
use crate::types::LoopKeyword;

/// Attaches slider settings to the preceding expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderStatement;

impl Statement for SliderStatement {
    fn claims(&self, line: &str) -> bool {
        keyword_args(line, "slider").is_some()
    }

    fn apply(&self, compiler: &mut Compiler, line: &str) -> Result<(), CompileError> {
        let follows_expression = compiler
            .state()
            .last_entry()
            .and_then(Entry::as_expression)
            .is_some();
        if !follows_expression {
            compiler.warn(WarningKind::NoExpression { statement: "slider" });
            return Ok(());
        }

        let args: Vec<&str> = keyword_args(line, "slider")
            .unwrap_or_default()
            .split_whitespace()
            .collect();
        let [min, "to", max, options @ ..] = args.as_slice() else {
            compiler.warn(WarningKind::SliderSyntax);
            return Ok(());
        };

        let mut slider = Slider::new(notation::format(min), notation::format(max));
        let mut warnings = Vec::new();
        let mut options = options.iter();
        while let Some(&option) = options.next() {
            if let Some(speed) = option.strip_prefix('@').and_then(|s| s.strip_suffix('x')) {
                match speed.parse::<f64>() {
                    Ok(speed) if speed.is_finite() && speed > 0.0 => {
                        slider.animation_period = Some(defaults::ANIMATION_PERIOD_MS / speed);
                    }
                    _ => warnings.push(WarningKind::SliderSpeed {
                        arg: option.to_string(),
                    }),
                }
            } else if option == "step" {
                match options.next() {
                    Some(step) => slider.step = Some(notation::format(step)),
                    None => warnings.push(WarningKind::MissingStep),
                }
            } else if option == "playing" {
                slider.is_playing = Some(true);
            } else if let Some(keyword) = LoopKeyword::parse(option) {
                slider.loop_mode = match keyword {
                    LoopKeyword::Default => None,
                    LoopKeyword::Mode(mode) => Some(mode),
                };
            } else {
                warnings.push(WarningKind::UnknownSliderArg {
                    arg: option.to_string(),
                });
            }
        }

        if let Some(expr) = compiler.state_mut().last_expression_mut() {
            expr.slider = Some(slider);
        }
        for kind in warnings {
            compiler.warn(kind);
        }
        Ok(())
    }
}
