//! The compiled document handed to the calculator.
//!
//! Field names follow the calculator's own state format, so these types
//! serialize straight into something it can load.

use serde::{Deserialize, Serialize};

use crate::types::{Color, LabelOrientation, LoopMode, RandomSeed, Viewport};

/// A complete compiled graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub version: u32,
    pub graph: Graph,
    pub random_seed: RandomSeed,
    pub expressions: ExpressionList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    pub list: Vec<Entry>,
}

impl Document {
    /// Compact JSON, the form the calculator stores.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.expressions.list
    }

    /// Notation of every expression entry, in entry order.
    pub fn notations(&self) -> impl Iterator<Item = &str> {
        self.entries().iter().filter_map(Entry::notation)
    }

    /// The companion plain-text artifact: one notation per line.
    pub fn notation_listing(&self) -> String {
        self.notations().collect::<Vec<_>>().join("\n")
    }
}

/// One item of the expression list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Expression(Expression),
    #[serde(rename = "text")]
    Note(Note),
    Folder(Folder),
}

impl Entry {
    pub fn id(&self) -> &str {
        match self {
            Entry::Expression(e) => &e.id,
            Entry::Note(n) => &n.id,
            Entry::Folder(f) => &f.id,
        }
    }

    pub fn folder_id(&self) -> Option<&str> {
        match self {
            Entry::Expression(e) => e.folder_id.as_deref(),
            Entry::Note(n) => n.folder_id.as_deref(),
            Entry::Folder(_) => None,
        }
    }

    pub fn notation(&self) -> Option<&str> {
        match self {
            Entry::Expression(e) => Some(&e.latex),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Entry::Expression(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_expression_mut(&mut self) -> Option<&mut Expression> {
        match self {
            Entry::Expression(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub color: Color,
    pub latex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slider: Option<Slider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_label: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_orientation: Option<LabelOrientation>,
}

impl Expression {
    pub fn new(id: String, folder_id: Option<String>, color: Color, latex: String) -> Self {
        Self {
            id,
            folder_id,
            color,
            latex,
            slider: None,
            drag_mode: None,
            hidden: None,
            show_label: None,
            label: None,
            label_orientation: None,
        }
    }
}

/// A text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// Slider settings attached to an expression.
///
/// Bounds are always hard: the calculator will not let a drag leave them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slider {
    pub hard_min: bool,
    pub hard_max: bool,
    pub min: String,
    pub max: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_mode: Option<LoopMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_period: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_playing: Option<bool>,
}

impl Slider {
    pub fn new(min: String, max: String) -> Self {
        Self {
            hard_min: true,
            hard_max: true,
            min,
            max,
            step: None,
            loop_mode: None,
            animation_period: None,
            is_playing: None,
        }
    }
}
