use std::fmt::Write;

use super::App;

impl App {
    /// Renders the model as text.
    pub fn view(&self) -> String {
        let session = &self.session;
        let document = session.document();
        let theme = session.editor_theme(self.appearance);
        let layout = session.layout();
        let position = session.position();
        let primary = position.primary();
        let counts = session.messages().counts();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "── {} ── {} ── {} ── minimap {} ── wrap {}",
            self.title(),
            session.language(),
            theme.name,
            if layout.show_minimap { "on" } else { "off" },
            if layout.wrap_text { "on" } else { "off" },
        );
        let _ = writeln!(
            out,
            "cursor {} ({} selected), scroll {:.1} | {} lines",
            document.location_of(primary.start),
            primary.len(),
            position.vertical_scroll,
            document.line_count(),
        );
        let _ = writeln!(
            out,
            "messages: {} ({} error, {} warning, {} info, {} live)",
            counts.total(),
            counts.errors,
            counts.warnings,
            counts.informational,
            counts.live,
        );

        if let Some(draft) = session.message_entry() {
            let _ = writeln!(
                out,
                "[entry] category={} summary={:?} line={:?} column={:?} detail={:?}",
                draft.category, draft.summary, draft.line, draft.column, draft.description,
            );
        }

        out.push_str(&self.status_message);
        out
    }

    /// Lists messages in location order, numbered from 1.
    pub fn message_listing(&self) -> String {
        let messages = self.session.messages().sorted();
        if messages.is_empty() {
            return "No messages".to_string();
        }

        let theme = self.session.editor_theme(self.appearance);
        let mut out = String::new();
        for (i, message) in messages.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(
                out,
                "{:>3}. {} [{}]",
                i + 1,
                message,
                theme.message_color(message.entity.category()).to_hex(),
            );
            if !message.entity.description().is_empty() {
                let _ = write!(out, "\n     {}", message.entity.description());
            }
        }
        out
    }
}
