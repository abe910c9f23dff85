use uuid::Uuid;

use crate::note::Note;

/// Ordered clipboard history, newest first.
///
/// Holds at most one note per distinct `content`. Every method that changes
/// the sequence reports whether it did, so the caller knows when to schedule
/// a save.
#[derive(Debug, Default, Clone)]
pub struct History {
    notes: Vec<Note>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted notes, keeping their stored order
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Prepend `note` unless a note with identical content already exists
    pub fn insert(&mut self, note: Note) -> bool {
        if self.contains_content(&note.content) {
            return false;
        }
        self.notes.insert(0, note);
        true
    }

    pub fn contains_content(&self, content: &str) -> bool {
        self.notes.iter().any(|n| n.content == content)
    }

    /// Remove the note with `id`; unknown ids are ignored
    pub fn delete(&mut self, id: Uuid) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Replace the title of the note with `id`.
    /// Returns false if the note is missing or already has this title.
    pub fn rename(&mut self, id: Uuid, title: &str) -> bool {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) if note.title != title => {
                note.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes whose title or content contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|n| n.matches_lowercase(&needle))
            .collect()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
