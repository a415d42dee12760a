//! Stored sessions flowing into exports and print views.

use chat_archiver::capture::{AdapterRegistry, CaptureController, CaptureOutcome};
use chat_archiver::export::{self, ExportFormat, PortableSession};
use chat_archiver::print::{PrintRenderer, PrintView};
use chat_archiver::transport::StoreBus;
use chat_archiver::ChatSession;

use crate::helpers::{fixture_page, temp_store};

fn captured(fixture: &str) -> (tempfile::TempDir, chat_archiver::ChatStore, ChatSession) {
    let (dir, store) = temp_store();
    let bus = StoreBus::new(store.clone());
    let registry = AdapterRegistry::new();
    let page = fixture_page(fixture);

    let mut controller = CaptureController::new(&registry, &page, &bus);
    let CaptureOutcome::Saved { id, .. } = controller.run(&page).unwrap() else {
        panic!("fixture {} should capture", fixture);
    };
    let session = store.get(&id).unwrap().unwrap();
    (dir, store, session)
}

#[test]
fn json_export_round_trips_without_html() {
    let (_dir, _store, session) = captured("chatgpt.html");
    let json = export::render(&session, ExportFormat::Json).unwrap();

    let parsed: PortableSession = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.id, session.id);
    assert_eq!(parsed.messages.len(), session.messages.len());
    assert!(!json.contains("\"html\""));
}

#[test]
fn markdown_export_lists_every_message() {
    let (_dir, _store, session) = captured("deepseek.html");
    let md = export::render(&session, ExportFormat::Md).unwrap();

    assert!(md.starts_with(&format!("# {}\n\n**Source:** DeepSeek\n", session.title)));
    assert_eq!(md.matches("### ").count(), 2);
    assert!(md.contains("### 🧑 **User**\n\nWhat is 6 times 7?\n\n"));
    assert!(md.contains("### 🤖 **Assistant**\n\n6 times 7 is 42.\n\n"));
    assert_eq!(
        export::file_name(&session, ExportFormat::Md),
        format!("ChatExport_DeepSeek_{}.md", session.id)
    );
}

#[test]
fn print_view_keeps_native_math() {
    let (_dir, store, session) = captured("chatgpt.html");
    let view = PrintRenderer::default().view(&store, Some(&session.id)).unwrap();

    let PrintView::Document { html, file_name } = view else {
        panic!("expected a printable document");
    };
    assert!(html.contains("<title>Quadratic formula - PDF Export</title>"));
    assert!(html.contains("<math"));
    assert!(!html.contains("katex-html"));
    assert_eq!(file_name, format!("Quadratic-formula_{}.html", session.id));
}

#[test]
fn print_after_delete_is_not_found() {
    let (_dir, store, session) = captured("gemini.html");
    store.delete(&session.id).unwrap();

    let view = PrintRenderer::default().view(&store, Some(&session.id)).unwrap();
    assert_eq!(view, PrintView::NotFound);
}
