//! Property tests for diagnostic set semantics.

use codeview_diagnostics::{
    Category, DiagnosticSet, LocatedMessage, Message, MessageDraft, TextLocation, build_message,
};
use proptest::prelude::*;

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn located_message() -> impl Strategy<Value = LocatedMessage> {
    (1usize..200, 1usize..120, category(), 0usize..8, "[a-z ]{0,12}", "[a-z]{0,6}").prop_map(
        |(line, column, category, length, summary, description)| {
            LocatedMessage::new(
                TextLocation::new(line, column).unwrap(),
                Message::new(category, length, summary).with_description(description),
            )
        },
    )
}

proptest! {
    #[test]
    fn insert_twice_keeps_cardinality(messages in prop::collection::vec(located_message(), 0..40)) {
        let mut set = DiagnosticSet::new();
        for m in &messages {
            set.insert_located(m.clone());
        }
        let len = set.len();

        for m in &messages {
            prop_assert!(!set.insert_located(m.clone()));
        }
        prop_assert_eq!(set.len(), len);
    }

    #[test]
    fn no_two_entries_are_equal(messages in prop::collection::vec(located_message(), 0..40)) {
        let set: DiagnosticSet = messages.iter().cloned().collect();
        let entries: Vec<_> = set.all().collect();

        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
        for m in &messages {
            prop_assert!(set.contains(m));
        }
    }

    #[test]
    fn insert_then_remove_restores(messages in prop::collection::vec(located_message(), 0..20), extra in located_message()) {
        let mut set: DiagnosticSet = messages.into_iter().collect();
        let before = set.clone();

        if set.insert_located(extra.clone()) {
            prop_assert!(set.remove_located(&extra));
        }
        prop_assert_eq!(set, before);
    }

    #[test]
    fn entry_form_never_rejects(line in ".{0,6}", column in ".{0,6}", summary in ".{0,10}") {
        let draft = MessageDraft { line, column, summary, ..MessageDraft::default() };
        let built = build_message(&draft);

        prop_assert!(built.location.line() >= 1);
        prop_assert!(built.location.column() >= 1);
        prop_assert!(!built.entity.summary().trim().is_empty());
    }
}

#[test]
fn unexpected_token_scenario() {
    let location = TextLocation::new(3, 5).unwrap();
    let message = Message::new(Category::Error, 1, "Unexpected token");
    let mut set = DiagnosticSet::new();

    set.insert(location, message.clone());
    let all: Vec<_> = set.all().cloned().collect();
    assert_eq!(all, vec![LocatedMessage::new(location, message.clone())]);

    set.insert(location, message);
    assert_eq!(set.all().count(), 1);
}

#[test]
fn form_submission_defaults() {
    let draft = MessageDraft {
        summary: String::new(),
        line: "abc".into(),
        column: "".into(),
        ..MessageDraft::default()
    };
    let mut set = DiagnosticSet::new();
    set.insert_located(build_message(&draft));

    let stored = set.all().next().unwrap();
    assert_eq!(stored.entity.summary(), "Summary");
    assert_eq!(stored.location, TextLocation::new(1, 1).unwrap());
    assert_eq!(stored.entity.category(), Category::Error);
}
