use super::*;
use crate::core::PreviewWindow;
use crate::kernel::preview::{TokenSpan, TokenTable};
use serde_json::json;

#[test]
fn requests_parse_from_tagged_json() {
    let search: Request = serde_json::from_value(json!({"type": "search", "text": "foo"})).unwrap();
    assert_eq!(
        search,
        Request::Search {
            text: "foo".into()
        }
    );

    let preview: Request = serde_json::from_value(json!({
        "type": "getPreview",
        "data": {"filePath": "/w/a.ts", "line": 3, "searchTerm": "foo"}
    }))
    .unwrap();
    assert_eq!(
        preview,
        Request::GetPreview {
            data: PreviewRequest {
                file_path: "/w/a.ts".into(),
                line: 3,
                search_term: "foo".into(),
                window_hint: None,
            }
        }
    );

    let toggle: Request = serde_json::from_value(json!({"type": "toggleTheme"})).unwrap();
    assert_eq!(toggle, Request::ToggleTheme);
}

#[test]
fn open_file_accepts_string_or_number_line() {
    let numeric: Request =
        serde_json::from_value(json!({"type": "openFile", "filePath": "/w/a.ts", "line": 7}))
            .unwrap();
    let textual: Request =
        serde_json::from_value(json!({"type": "openFile", "filePath": "/w/a.ts", "line": "7"}))
            .unwrap();

    for request in [numeric, textual] {
        match request {
            Request::OpenFile { file_path, line } => {
                assert_eq!(file_path, PathBuf::from("/w/a.ts"));
                assert_eq!(line.get(), Some(7));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    assert_eq!(LineNumber::Text("x".into()).get(), None);
}

#[test]
fn unknown_request_type_is_rejected() {
    assert!(serde_json::from_value::<Request>(json!({"type": "explode"})).is_err());
}

#[test]
fn responses_serialize_in_wire_shape() {
    let results = Response::Results {
        data: vec![SearchMatch {
            label: "a.ts:3".into(),
            description: "const foo = 1;".into(),
            file_path: "/w/a.ts".into(),
            line: 3,
        }],
    };
    assert_eq!(
        serde_json::to_value(&results).unwrap(),
        json!({
            "type": "results",
            "data": [{
                "label": "a.ts:3",
                "description": "const foo = 1;",
                "filePath": "/w/a.ts",
                "line": 3
            }]
        })
    );

    assert_eq!(
        serde_json::to_value(Response::ThemeChanged).unwrap(),
        json!({"type": "themeChanged"})
    );
    assert_eq!(
        serde_json::to_value(Response::Error { data: "boom".into() }).unwrap(),
        json!({"type": "error", "data": "boom"})
    );
}

#[test]
fn preview_content_flattens_table() {
    let content = PreviewContent {
        table: TokenTable::stitch(
            2,
            PreviewWindow::new(0, 1),
            vec![vec![TokenSpan::new("x", "#ffffff")]],
        ),
        line: 1,
        search_term: "xyz".into(),
        file_path: "/w/a.txt".into(),
    };
    let value = serde_json::to_value(Response::PreviewContent {
        data: content.clone(),
    })
    .unwrap();

    assert_eq!(value["type"], "previewContent");
    assert_eq!(value["data"]["tokenLines"].as_array().unwrap().len(), 2);
    assert_eq!(value["data"]["window"], json!({"start": 0, "end": 1}));
    assert_eq!(value["data"]["line"], 1);
    assert_eq!(value["data"]["searchTerm"], "xyz");

    let back: Response = serde_json::from_value(value).unwrap();
    assert_eq!(back, Response::PreviewContent { data: content });
}
