use codeview_core::{SelectionRange, ViewPosition};
use codeview_diagnostics::build_message;

use super::{App, Control, HostMessage};
use crate::command::HELP;

impl App {
    pub fn update(&mut self, message: HostMessage) -> Control {
        match message {
            HostMessage::ShowMessageEntry => {
                self.session.open_message_entry();
                self.status_message = "Enter a message to display in the code view".to_string();
            }

            HostMessage::EntryCategoryChanged(category) => {
                self.edit_entry(|draft| draft.category = category);
            }

            HostMessage::EntrySummaryChanged(summary) => {
                self.edit_entry(|draft| draft.summary = summary);
            }

            HostMessage::EntryLineChanged(line) => {
                self.edit_entry(|draft| draft.line = line);
            }

            HostMessage::EntryColumnChanged(column) => {
                self.edit_entry(|draft| draft.column = column);
            }

            HostMessage::EntryDescriptionChanged(description) => {
                self.edit_entry(|draft| draft.description = description);
            }

            HostMessage::SubmitMessage => match self.session.submit_message_entry() {
                Some(message) => {
                    self.status_message = format!("Added {}", message);
                }
                None => {
                    self.status_message = "No message entry open (use `add`)".to_string();
                }
            },

            HostMessage::CancelMessageEntry => {
                if self.session.cancel_message_entry() {
                    self.status_message = "Message entry cancelled".to_string();
                }
            }

            HostMessage::AddMessage(draft) => {
                let message = build_message(&draft);
                self.status_message = if self.session.add_message(message.clone()) {
                    format!("Added {}", message)
                } else {
                    format!("Already present: {}", message)
                };
            }

            HostMessage::RemoveMessage(index) => {
                let target = index
                    .checked_sub(1)
                    .and_then(|i| self.session.messages().sorted().get(i).map(|m| (*m).clone()));
                match target {
                    Some(message) => {
                        self.session.remove_message(&message);
                        self.status_message = format!("Removed {}", message);
                    }
                    None => {
                        self.status_message = format!("No message #{}", index);
                    }
                }
            }

            HostMessage::ListMessages => {
                self.status_message = self.message_listing();
            }

            HostMessage::Goto(location) => {
                let offset = self.session.document().offset_of(location);
                let position = ViewPosition {
                    selections: vec![SelectionRange::cursor(offset)],
                    vertical_scroll: self.session.position().vertical_scroll,
                };
                self.set_position(position);
            }

            HostMessage::Select(from, to) => {
                let document = self.session.document();
                let range = SelectionRange::new(document.offset_of(from), document.offset_of(to));
                let position = ViewPosition {
                    selections: vec![range],
                    vertical_scroll: self.session.position().vertical_scroll,
                };
                self.set_position(position);
            }

            HostMessage::Scroll(offset) => {
                let position = self.session.position().clone().with_scroll(offset);
                self.set_position(position);
            }

            HostMessage::LanguageSelected(language) => {
                self.session.set_language(language);
                self.status_message = format!("Language: {}", language);
            }

            HostMessage::ThemeSelected(theme) => {
                self.session.set_theme(theme);
                self.status_message = format!(
                    "Theme: {} ({})",
                    theme,
                    self.session.editor_theme(self.appearance).name
                );
            }

            HostMessage::ToggleMinimap => {
                let on = self.session.toggle_minimap();
                self.status_message = format!("Minimap {}", on_off(on));
            }

            HostMessage::ToggleWrapText => {
                let on = self.session.toggle_wrap_text();
                self.status_message = format!("Wrap text {}", on_off(on));
            }

            HostMessage::Save => {
                self.status_message = match self.session.save_document() {
                    Ok(()) => format!("Saved {}", self.session.document().name()),
                    Err(e) => format!("Save failed: {}", e),
                };
            }

            HostMessage::Help => {
                self.status_message = HELP.to_string();
            }

            HostMessage::Quit => {
                self.status_message = "Bye".to_string();
                return Control::Quit;
            }
        }

        Control::Continue
    }

    fn edit_entry(&mut self, edit: impl FnOnce(&mut codeview_diagnostics::MessageDraft)) {
        if !self.session.edit_message_entry(edit) {
            self.status_message = "No message entry open (use `add`)".to_string();
        }
    }

    fn set_position(&mut self, position: ViewPosition) {
        if self.session.set_position(position, &mut self.storage) {
            let primary = self.session.position().primary();
            let location = self.session.document().location_of(primary.start);
            self.status_message = if primary.is_empty() {
                format!("Cursor at {}", location)
            } else {
                format!("Selected {} chars from {}", primary.len(), location)
            };
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
