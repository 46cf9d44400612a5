//! Graph state - the accumulating expression list and the settings that
//! apply to entries as they are added.

use crate::defaults;
use crate::document::{Document, Entry, Expression, ExpressionList, Folder, Graph, Note};
use crate::types::{Color, RandomSeed, Viewport};

#[derive(Debug, Clone)]
pub struct GraphState {
    entries: Vec<Entry>,
    /// Id the next entry receives
    next_id: u64,
    /// Color given to new expressions
    pub color: Color,
    /// Id of the open folder, if any
    folder: Option<String>,
    pub viewport: Viewport,
    seed: RandomSeed,
}

impl GraphState {
    pub fn new(seed: RandomSeed) -> Self {
        Self {
            entries: Vec::new(),
            next_id: defaults::FIRST_ENTRY_ID,
            color: defaults::COLOR,
            folder: None,
            viewport: defaults::VIEWPORT,
            seed,
        }
    }

    pub fn seed(&self) -> &RandomSeed {
        &self.seed
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn open_folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    /// Append an entry built from its freshly assigned id.
    ///
    /// This is the only place ids are handed out.
    fn push(&mut self, build: impl FnOnce(String) -> Entry) -> &mut Entry {
        let id = self.next_id.to_string();
        self.next_id += 1;
        self.entries.push(build(id));
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Add an expression with the current color, inside the open folder.
    pub fn add_expression(&mut self, latex: String) -> &str {
        let folder_id = self.folder.clone();
        let color = self.color;
        self.push(|id| Entry::Expression(Expression::new(id, folder_id, color, latex)))
            .id()
    }

    /// Add a text note inside the open folder.
    pub fn add_note(&mut self, text: String) -> &str {
        let folder_id = self.folder.clone();
        self.push(|id| Entry::Note(Note { id, folder_id, text }))
            .id()
    }

    /// Add a folder and make it the open one. Folders do not nest: an
    /// already open folder is simply replaced.
    pub fn begin_folder(&mut self, title: String, collapsed: bool) -> &str {
        let collapsed = collapsed.then_some(true);
        let id = self
            .push(|id| Entry::Folder(Folder { id, title, collapsed }))
            .id()
            .to_string();
        self.folder.insert(id).as_str()
    }

    /// Close the open folder. Does nothing when none is open.
    pub fn end_folder(&mut self) {
        self.folder = None;
    }

    pub fn last_entry(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// The most recent entry, if it is an expression.
    pub fn last_expression_mut(&mut self) -> Option<&mut Expression> {
        self.entries.last_mut().and_then(Entry::as_expression_mut)
    }

    /// Notation of every expression entry, in entry order.
    pub fn notations(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(Entry::notation)
            .map(str::to_string)
            .collect()
    }

    pub fn to_document(&self) -> Document {
        Document {
            version: defaults::FORMAT_VERSION,
            graph: Graph {
                viewport: self.viewport,
            },
            random_seed: self.seed.clone(),
            expressions: ExpressionList {
                list: self.entries.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GraphState {
        GraphState::new(RandomSeed::from("seed"))
    }

    #[test]
    fn ids_start_at_two_and_increase() {
        let mut state = state();
        assert_eq!(state.add_expression("a".into()), "2");
        assert_eq!(state.add_note("hi".into()), "3");
        assert_eq!(state.begin_folder("f".into(), false), "4");
        assert_eq!(state.add_expression("b".into()), "5");
    }

    #[test]
    fn entries_pick_up_color_and_folder() {
        let mut state = state();
        state.color = Color::rgb(1, 2, 3);
        let folder = state.begin_folder("Group".into(), true).to_string();
        state.add_expression("y=x".into());
        state.end_folder();
        state.add_note("outside".into());

        let entries = state.entries();
        assert_eq!(
            entries[0],
            Entry::Folder(Folder {
                id: folder.clone(),
                title: "Group".into(),
                collapsed: Some(true),
            })
        );
        let expr = entries[1].as_expression().unwrap();
        assert_eq!(expr.color, Color::rgb(1, 2, 3));
        assert_eq!(expr.folder_id.as_deref(), Some(folder.as_str()));
        assert_eq!(entries[2].folder_id(), None);
    }

    #[test]
    fn second_folder_replaces_the_first() {
        let mut state = state();
        state.begin_folder("one".into(), false);
        let second = state.begin_folder("two".into(), false).to_string();
        state.add_expression("x".into());
        assert_eq!(state.entries()[2].folder_id(), Some(second.as_str()));
    }

    #[test]
    fn last_expression_skips_other_entries() {
        let mut state = state();
        assert!(state.last_expression_mut().is_none());
        state.add_expression("x".into());
        assert!(state.last_expression_mut().is_some());
        state.add_note("n".into());
        assert!(state.last_expression_mut().is_none());
    }

    #[test]
    fn document_lists_notations_in_order() {
        let mut state = state();
        state.add_expression("a".into());
        state.add_note("n".into());
        state.add_expression("b".into());
        assert_eq!(state.notations(), vec!["a", "b"]);
        let doc = state.to_document();
        assert_eq!(doc.version, 7);
        assert_eq!(doc.random_seed.as_str(), "seed");
        assert_eq!(doc.entries().len(), 3);
    }
}
