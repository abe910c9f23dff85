use std::time::Duration;

use iced::keyboard::{self, key::Named, Key};
use iced::widget::{button, column, container, row, scrollable, text, text_input, Column};
use iced::{event, time, window, Element, Event, Font, Length, Size, Subscription, Task};
use uuid::Uuid;

use crate::clipboard_utils::SystemClipboard;
use crate::debounce::SaveTicket;
use crate::manager::HistoryManager;
use crate::note::Note;
use crate::settings::Settings;
use crate::store::JsonFileRepository;

/// Lines of content shown under each title in the list
const PREVIEW_LINES: usize = 2;
/// Characters per preview line before it is cut with an ellipsis
const PREVIEW_LINE_CHARS: usize = 80;

/// The main application state
pub struct PasteNotes {
    manager: HistoryManager<JsonFileRepository>,
    clipboard: SystemClipboard,
    poll_interval: Duration,
    search: String,
    selected: Option<Uuid>,
    status_message: Option<String>,
}

/// Messages for the application
#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    SaveDue(SaveTicket),
    SearchChanged(String),
    Select(Uuid),
    TitleEdited(Uuid, String),
    Copy(Uuid),
    Delete(Uuid),
    DeleteSelected,
    ClearAll,
    CloseRequested(window::Id),
}

impl PasteNotes {
    fn boot(settings: &Settings) -> (Self, Task<Message>) {
        let repository = JsonFileRepository::new(&settings.data_file);
        let mut manager = HistoryManager::load(repository, settings.debounce);
        let mut clipboard = SystemClipboard::new();
        manager.prime_clipboard(&mut clipboard);

        (
            Self::with_manager(manager, clipboard, settings.poll_interval),
            Task::none(),
        )
    }

    fn with_manager(
        manager: HistoryManager<JsonFileRepository>,
        clipboard: SystemClipboard,
        poll_interval: Duration,
    ) -> Self {
        Self {
            manager,
            clipboard,
            poll_interval,
            search: String::new(),
            selected: None,
            status_message: None,
        }
    }

    fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.manager.get(id))
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.manager.poll_clipboard(&mut self.clipboard);
                Task::none()
            }
            Message::SaveDue(ticket) => {
                self.manager.save_if_due(ticket);
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.search = query;
                Task::none()
            }
            Message::Select(id) => {
                self.selected = Some(id);
                self.status_message = None;
                Task::none()
            }
            Message::TitleEdited(id, title) => {
                self.manager.rename(id, &title);
                Task::none()
            }
            Message::Copy(id) => {
                self.status_message = Some(
                    match self.manager.copy_to_clipboard(id, &mut self.clipboard) {
                        Ok(()) => "Copied!".to_string(),
                        Err(e) => {
                            tracing::warn!("copy back failed: {}", e);
                            format!("Copy failed: {}", e)
                        }
                    },
                );
                Task::none()
            }
            Message::Delete(id) => {
                self.delete(id);
                Task::none()
            }
            Message::DeleteSelected => {
                if let Some(id) = self.selected {
                    self.delete(id);
                }
                Task::none()
            }
            Message::ClearAll => {
                self.manager.clear_all();
                self.selected = None;
                self.status_message = None;
                Task::none()
            }
            Message::CloseRequested(id) => {
                tracing::info!(?id, "window closing, flushing history");
                self.manager.flush();
                iced::exit()
            }
        }
    }

    fn delete(&mut self, id: Uuid) {
        self.manager.delete(id);
        if self.selected == Some(id) {
            self.selected = None;
            self.status_message = None;
        }
    }
}

fn update(state: &mut PasteNotes, message: Message) -> Task<Message> {
    let task = state.handle(message);

    // Arm one timer per burst of mutations; older timers find their ticket
    // replaced and do nothing
    match state.manager.take_scheduled_save() {
        Some(ticket) => {
            let delay = state.manager.debounce_window();
            let save = Task::perform(
                async move { tokio::time::sleep(delay).await },
                move |_| Message::SaveDue(ticket),
            );
            Task::batch([task, save])
        }
        None => task,
    }
}

fn view(state: &PasteNotes) -> Element<'_, Message> {
    let content = row![list_pane(state), detail_pane(state)]
        .spacing(1)
        .height(Length::Fill);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn list_pane(state: &PasteNotes) -> Element<'_, Message> {
    let mut header = row![container(text("Clipboard History").size(16)).width(Length::Fill)]
        .align_y(iced::Alignment::Center)
        .padding([6, 10]);
    if !state.manager.is_empty() {
        header = header.push(
            button(text("Clear All").size(13))
                .style(button::danger)
                .padding([4, 10])
                .on_press(Message::ClearAll),
        );
    }

    let search = text_input("Search clips...", &state.search)
        .on_input(Message::SearchChanged)
        .padding(8);

    let notes = state.manager.search(&state.search);
    let list: Element<'_, Message> = if notes.is_empty() {
        let hint = if state.manager.is_empty() {
            "Nothing copied yet"
        } else {
            "No matching clips"
        };
        container(text(hint).size(13))
            .center_x(Length::Fill)
            .padding(20)
            .into()
    } else {
        let rows = notes
            .into_iter()
            .map(|note| note_row(note, state.selected == Some(note.id)));
        scrollable(Column::with_children(rows).spacing(4).padding([0, 6]))
            .height(Length::Fill)
            .into()
    };

    container(column![header, search, list].spacing(8).padding(8))
        .width(Length::FillPortion(2))
        .height(Length::Fill)
        .into()
}

fn note_row(note: &Note, selected: bool) -> Element<'_, Message> {
    let style: fn(&iced::Theme, button::Status) -> button::Style = if selected {
        button::primary
    } else {
        button::text
    };

    let body = column![
        text(note.title.as_str()).size(15),
        text(preview(&note.content)).size(13).font(Font::MONOSPACE),
        text(note.display_date()).size(11),
    ]
    .spacing(4);

    button(body)
        .width(Length::Fill)
        .padding(8)
        .style(style)
        .on_press(Message::Select(note.id))
        .into()
}

fn detail_pane(state: &PasteNotes) -> Element<'_, Message> {
    let Some(note) = state.selected_note() else {
        let empty = column![
            text("No note selected").size(20),
            text("Copy something to get started!").size(13),
        ]
        .spacing(8)
        .align_x(iced::Alignment::Center);

        return container(empty)
            .width(Length::FillPortion(3))
            .height(Length::Fill)
            .center_x(Length::FillPortion(3))
            .center_y(Length::Fill)
            .into();
    };

    let id = note.id;
    let title = text_input("Title", &note.title)
        .on_input(move |title| Message::TitleEdited(id, title))
        .size(20)
        .padding(8);

    let body = scrollable(
        container(text(note.content.as_str()).font(Font::MONOSPACE))
            .width(Length::Fill)
            .padding(12),
    )
    .height(Length::Fill);

    let status = text(state.status_message.as_deref().unwrap_or("")).size(12);

    let actions = row![
        button(text("Copy").size(14))
            .padding([8, 16])
            .on_press(Message::Copy(id)),
        button(text("Delete").size(14))
            .style(button::danger)
            .padding([8, 16])
            .on_press(Message::Delete(id)),
        status,
    ]
    .spacing(10)
    .align_y(iced::Alignment::Center);

    container(column![title, body, actions].spacing(12).padding(16))
        .width(Length::FillPortion(3))
        .height(Length::Fill)
        .into()
}

/// First lines of `content`, each cut to a readable width
fn preview(content: &str) -> String {
    content
        .lines()
        .take(PREVIEW_LINES)
        .map(|line| {
            if line.chars().count() > PREVIEW_LINE_CHARS {
                let cut: String = line.chars().take(PREVIEW_LINE_CHARS - 3).collect();
                format!("{}...", cut)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn handle_event(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    // Keys a text field consumed (editing a title, typing a search) are
    // not deletions
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed {
            key: Key::Named(Named::Delete | Named::Backspace),
            ..
        }) => Some(Message::DeleteSelected),
        _ => None,
    }
}

fn subscription(state: &PasteNotes) -> Subscription<Message> {
    Subscription::batch([
        time::every(state.poll_interval).map(|_| Message::Tick),
        event::listen_with(handle_event),
        window::close_requests().map(Message::CloseRequested),
    ])
}

/// Run the GUI application
pub fn run_gui(settings: Settings) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(900.0, 600.0),
        min_size: Some(Size::new(850.0, 550.0)),
        exit_on_close_request: false,
        ..window::Settings::default()
    };

    iced::application(move || PasteNotes::boot(&settings), update, view)
        .title("PasteNotes")
        .subscription(subscription)
        .window(window_settings)
        .run()
}
