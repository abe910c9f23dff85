use std::time::Duration;

use uuid::Uuid;

use crate::clipboard_utils::ClipboardSource;
use crate::debounce::{Debouncer, SaveTicket};
use crate::error::{Error, Result};
use crate::history::History;
use crate::note::Note;
use crate::poller::ClipboardPoller;
use crate::store::{self, NoteRepository};

/// Owns the clipboard history and keeps its durable copy up to date.
///
/// Every mutation restarts the debounce; the owner of the event loop asks
/// `take_scheduled_save` for a ticket after each update, sleeps for
/// `debounce_window`, and hands the ticket back to `save_if_due`.
pub struct HistoryManager<R: NoteRepository> {
    history: History,
    repository: R,
    debouncer: Debouncer,
    poller: ClipboardPoller,
}

impl<R: NoteRepository> HistoryManager<R> {
    /// Load the stored history; an unreadable store starts empty
    pub fn load(repository: R, debounce: Duration) -> Self {
        let notes = store::load_or_empty(&repository);
        Self {
            history: History::from_notes(notes),
            repository,
            debouncer: Debouncer::new(debounce),
            poller: ClipboardPoller::new(),
        }
    }

    /// Ignore whatever is on the clipboard right now
    pub fn prime_clipboard(&mut self, source: &mut impl ClipboardSource) {
        self.poller = ClipboardPoller::primed(source);
    }

    pub fn notes(&self) -> &[Note] {
        self.history.as_slice()
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.history.get(id)
    }

    pub fn search(&self, query: &str) -> Vec<&Note> {
        self.history.search(query)
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Insert unless a note with the same content exists
    pub fn insert(&mut self, note: Note) -> bool {
        let inserted = self.history.insert(note);
        if inserted {
            self.changed();
        }
        inserted
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        match self.history.delete(id) {
            Some(_) => {
                self.changed();
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.history.clear();
        self.changed();
    }

    pub fn rename(&mut self, id: Uuid, title: &str) -> bool {
        let renamed = self.history.rename(id, title);
        if renamed {
            self.changed();
        }
        renamed
    }

    /// One poll tick: insert the clipboard text as a new note if it changed.
    /// Returns the id of the inserted note.
    pub fn poll_clipboard(&mut self, source: &mut impl ClipboardSource) -> Option<Uuid> {
        let content = self.poller.poll(source)?;
        let note = Note::new(content);
        let id = note.id;
        if self.insert(note) {
            tracing::debug!(%id, "captured clipboard text");
            Some(id)
        } else {
            tracing::debug!("clipboard text already in history");
            None
        }
    }

    /// Put a note's content back on the clipboard. History is unchanged;
    /// the next poll sees the write and the dedup rule drops it.
    pub fn copy_to_clipboard(&self, id: Uuid, sink: &mut impl ClipboardSource) -> Result<()> {
        let note = self
            .history
            .get(id)
            .ok_or_else(|| Error::Clipboard(format!("no note with id {}", id)))?;
        sink.write_text(&note.content)
    }

    pub fn debounce_window(&self) -> Duration {
        self.debouncer.window()
    }

    /// Ticket for the latest mutation, if no timer was armed for it yet
    pub fn take_scheduled_save(&mut self) -> Option<SaveTicket> {
        self.debouncer.take_unarmed()
    }

    /// Debounce timer elapsed. Writes only if no newer mutation replaced
    /// `ticket`; returns whether a write was attempted.
    pub fn save_if_due(&mut self, ticket: SaveTicket) -> bool {
        if !self.debouncer.fire(ticket) {
            return false;
        }
        self.write();
        true
    }

    /// Write a pending save immediately
    pub fn flush(&mut self) {
        if self.debouncer.settle() {
            self.write();
        }
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn changed(&mut self) {
        self.debouncer.trigger();
    }

    fn write(&self) {
        let notes = self.history.as_slice();
        match self.repository.save(notes) {
            Ok(()) => tracing::info!(count = notes.len(), "saved clipboard history"),
            Err(e) => tracing::warn!("failed to save clipboard history: {}", e),
        }
    }
}
