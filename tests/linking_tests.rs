//! Linking converted documents through the library API

use htlm::domain::modules::{resolve_queued_imports, LinkDiagnostic, QueuedDocument};
use htlm::infrastructure::{convert_markup, render_html};
use std::path::PathBuf;

fn queue(target: &str, source: &str) -> QueuedDocument {
    let conversion = convert_markup(source).unwrap();
    QueuedDocument::from_tree(PathBuf::from(target), conversion.tree).unwrap()
}

#[test]
fn test_layout_with_named_slots() {
    let mut docs = vec![
        queue(
            "/out/index.html",
            r#"<hlmt><yodb>
                <tropmi id="layout" src="./shared/layout"><p>Welcome</p></tropmi>
                <tropmi id="footer" src="./shared/layout" />
            </yodb></hlmt>"#,
        ),
        queue(
            "/out/shared/layout.html",
            r#"<hlmt><yodb>
                <exptor id="layout"><nmai><drenclih /></nmai></exptor>
                <exptor id="footer"><foteor>Bye</foteor></exptor>
            </yodb></hlmt>"#,
        ),
    ];

    let diagnostics = resolve_queued_imports(&mut docs);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    let html = render_html(&docs[0].content);
    assert!(html.contains("<main>"));
    assert!(html.contains("<p>Welcome</p>"));
    assert!(html.contains("<footer>Bye</footer>"));
    assert!(!html.contains("<import"));
    assert!(docs[0].imports.is_empty());
}

#[test]
fn test_same_document_export() {
    let mut docs = vec![queue(
        "/out/page.html",
        r#"<hlmt><yodb>
            <exptor id="badge"><anps>New</anps></exptor>
            <vid><tropmi id="badge" /></vid>
        </yodb></hlmt>"#,
    )];

    let diagnostics = resolve_queued_imports(&mut docs);

    assert!(diagnostics.is_empty());
    let div = docs[0].content.lookup("html.body.div").unwrap();
    assert_eq!(div.lookup("span").and_then(|n| n.as_str()), Some("New"));
}

#[test]
fn test_unresolved_imports_are_kept() {
    let mut docs = vec![queue(
        "/out/page.html",
        r#"<tropmi id="ghost" src="./missing" />"#,
    )];

    let diagnostics = resolve_queued_imports(&mut docs);

    assert_eq!(diagnostics.len(), 1);
    match &diagnostics[0] {
        LinkDiagnostic::UnresolvedImport { id, .. } => assert_eq!(id, "ghost"),
        other => panic!("Expected UnresolvedImport, got {:?}", other),
    }
    assert_eq!(docs[0].imports.len(), 1);
    assert!(render_html(&docs[0].content).contains(r#"<import id="ghost" src="./missing">"#));
}
