//! Adapter selection and extraction against saved-page fixtures.

use chat_archiver::capture::{AdapterRegistry, CaptureController, CaptureOutcome};
use chat_archiver::transport::StoreBus;
use chat_archiver::Role;

use crate::helpers::{fixture_page, temp_store};

// ============================================================================
// Adapter Selection
// ============================================================================

#[test]
fn each_site_fixture_selects_its_adapter() {
    let registry = AdapterRegistry::new();

    let cases = [
        ("chatgpt.html", "ChatGPT"),
        ("gemini.html", "Google Gemini"),
        ("deepseek.html", "DeepSeek"),
    ];
    for (fixture, expected) in cases {
        let page = fixture_page(fixture);
        let adapter = registry.select(&page).expect("adapter should match");
        assert_eq!(adapter.name(), expected, "wrong adapter for {}", fixture);
    }
}

#[test]
fn unrelated_page_selects_nothing() {
    let registry = AdapterRegistry::new();
    assert!(registry.select(&fixture_page("unsupported.html")).is_none());
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn chatgpt_keeps_order_and_skips_other_roles() {
    let page = fixture_page("chatgpt.html");
    let registry = AdapterRegistry::new();
    let messages = registry.select(&page).unwrap().extract(&page);

    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
    assert_eq!(messages[0].text, "How do I solve x^2 - 5x + 6 = 0?");
    assert_eq!(messages[2].text, "Thanks!");
    assert!(messages.iter().all(|m| !m.text.contains("system prompt")));
}

#[test]
fn chatgpt_formula_becomes_native_mathml() {
    let page = fixture_page("chatgpt.html");
    let registry = AdapterRegistry::new();
    let messages = registry.select(&page).unwrap().extract(&page);
    let answer = &messages[1];

    assert!(answer.text.contains("Use the quadratic formula x=2 or factor it."));
    assert!(answer.text.contains("(x - 2)(x - 3) = 0"));

    let html = answer.html.as_deref().unwrap();
    assert_eq!(html.matches("<math").count(), 1);
    assert!(!html.contains("katex-html"));
    assert!(!html.contains("katex-mathml"));
    assert!(!html.contains("<button"));
    assert!(html.contains("<pre><code>(x - 2)(x - 3) = 0</code></pre>"));
}

#[test]
fn gemini_reads_custom_elements() {
    let page = fixture_page("gemini.html");
    let registry = AdapterRegistry::new();
    let adapter = registry.select(&page).unwrap();
    let messages = adapter.extract(&page);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].text, "Name three prime numbers.");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].text, "2\n3\n5");
    assert_eq!(adapter.clean_title(page.title()), "Gemini Chat");
}

#[test]
fn deepseek_drops_nested_duplicates() {
    let page = fixture_page("deepseek.html");
    let registry = AdapterRegistry::new();
    let messages = registry.select(&page).unwrap().extract(&page);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].text, "What is 6 times 7?");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].text, "6 times 7 is 42.");
    assert!(!messages[1].html.as_deref().unwrap().contains("ds-icon"));
}

// ============================================================================
// Controller
// ============================================================================

#[test]
fn capture_persists_session_through_bus() {
    let (_dir, store) = temp_store();
    let bus = StoreBus::new(store.clone());
    let registry = AdapterRegistry::new();
    let page = fixture_page("chatgpt.html");

    let mut controller = CaptureController::new(&registry, &page, &bus);
    let outcome = controller.run(&page).unwrap();

    let CaptureOutcome::Saved { id, messages } = outcome else {
        panic!("expected a saved outcome, got {:?}", outcome);
    };
    assert_eq!(messages, 3);

    let session = store.get(&id).unwrap().expect("session stored");
    assert_eq!(session.website, "ChatGPT");
    assert_eq!(session.title, "Quadratic formula");
    assert_eq!(session.url, "https://chatgpt.com/c/6650f1a2-quadratic");
    assert_eq!(session.count_by_role(Role::User), 2);
}

#[test]
fn empty_chat_page_is_nothing_to_save() {
    let (_dir, store) = temp_store();
    let bus = StoreBus::new(store.clone());
    let registry = AdapterRegistry::new();
    let page = fixture_page("empty.html");

    let mut controller = CaptureController::new(&registry, &page, &bus);
    assert_eq!(controller.run(&page).unwrap(), CaptureOutcome::NothingToSave);
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn repeated_captures_accumulate() {
    let (_dir, store) = temp_store();
    let bus = StoreBus::new(store.clone());
    let registry = AdapterRegistry::new();
    let page = fixture_page("gemini.html");

    let mut controller = CaptureController::new(&registry, &page, &bus);
    controller.run(&page).unwrap();
    controller.run(&page).unwrap();

    let chats = store.list().unwrap();
    assert_eq!(chats.len(), 2);
    assert_ne!(chats[0].id, chats[1].id);
}
