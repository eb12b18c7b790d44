use nulltrace_bridge::{
    dispatch, escape_opt, is_envelope, narrow_message, is_save_connection_message, join_fragments, markup,
    render_attributes, render_document, render_if, ActionMessage, AttrValue, AuthMethod,
    CommandGuard, Dispatch, DocumentConfig, Fragment, GuardError, OpenLinkMessage,
    SaveConnectionMessage, SubmitFormMessage, SurfaceHandler, SurfaceMessage,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::PathBuf;

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push(filename);
    path
}

fn load_fixture(filename: &str) -> Value {
    let content = fs::read_to_string(get_fixture_path(filename)).unwrap();
    serde_json::from_str(&content).unwrap()
}

// Markup composition

#[test]
fn test_script_injection_is_neutralized() {
    let payloads = [
        "<script>alert(1)</script>",
        "<SCRIPT src=x>",
        "\"><script>alert(1)</script>",
        "'><script>",
    ];
    for p in payloads {
        let f = markup!("<div title=\"{}\">{}</div>", p, p);
        assert!(
            !f.as_str().to_lowercase().contains("<script"),
            "payload leaked: {}",
            f
        );
    }
}

#[test]
fn test_nested_composition_escapes_once() {
    let cell = markup!("<td>{}</td>", "Tom & Jerry");
    let row = markup!("<tr>{}</tr>", cell);
    let table = markup!("<table>{}</table>", row);
    assert_eq!(
        table.as_str(),
        "<table><tr><td>Tom &amp; Jerry</td></tr></table>"
    );
    assert!(!table.as_str().contains("&amp;amp;"));
}

#[test]
fn test_list_rendering_from_mapped_items() {
    let mails = vec![
        ("boss@corp.null", "Re: <urgent>"),
        ("mom@home.null", "dinner?"),
    ];
    let list = markup!(
        "<ul>{}</ul>",
        mails
            .iter()
            .map(|(from, subject)| markup!("<li data-from=\"{}\">{}</li>", *from, *subject))
            .collect::<Vec<_>>()
    );
    assert_eq!(
        list.as_str(),
        "<ul><li data-from=\"boss@corp.null\">Re: &lt;urgent&gt;</li><li data-from=\"mom@home.null\">dinner?</li></ul>"
    );
}

#[test]
fn test_absent_and_empty_helpers() {
    assert_eq!(escape_opt(None), "");
    assert_eq!(join_fragments(Vec::new()), Fragment::empty());
    let unread: Option<u32> = None;
    let badge = markup!("<span>{}</span>", unread);
    assert_eq!(badge.as_str(), "<span></span>");
    assert_eq!(render_if(unread.is_some(), badge), Fragment::empty());
}

#[test]
fn test_render_attributes_example() {
    let attrs: Vec<(&str, AttrValue)> = vec![
        ("a", false.into()),
        ("b", AttrValue::Absent),
        ("c", Option::<String>::None.into()),
        ("d", true.into()),
        ("e", "x\"y".into()),
    ];
    assert_eq!(render_attributes(attrs).as_str(), "d e=\"x&quot;y\"");
}

#[test]
fn test_full_document_from_yaml_config() {
    let yaml = fs::read_to_string(get_fixture_path("document.yaml")).unwrap();
    let config = DocumentConfig::from_yaml(&yaml).unwrap();
    let body = markup!(
        "<button {}>{}</button>",
        render_attributes(vec![("data-action", "open_inbox")]),
        "Open <inbox>"
    );
    let html = render_document(&config, body);
    assert!(html.as_str().contains("<html lang=\"en-GB\">"));
    assert!(html.as_str().contains("<title>Inbox &lt;3</title>"));
    assert!(html
        .as_str()
        .contains("<button data-action=\"open_inbox\">Open &lt;inbox&gt;</button>"));
    assert!(html.as_str().contains("background:#09090b"));
}

// Message guards

#[test]
fn test_valid_save_fixture() {
    let v = load_fixture("valid-save.json");
    assert!(is_envelope(&v));
    assert!(is_save_connection_message(&v));
    let msg = SaveConnectionMessage::narrow(&v).unwrap();
    assert_eq!(msg.name, "relay-02");
    assert_eq!(msg.host, "172.16.4.9");
    assert_eq!(msg.port, 2222);
    assert_eq!(msg.auth_method, AuthMethod::Password);
    assert_eq!(msg.username.as_deref(), Some("ghost"));
    assert_eq!(msg.remember, Some(true));
}

#[test]
fn test_invalid_auth_case_fixture() {
    let v = load_fixture("invalid-auth-case.json");
    assert!(is_envelope(&v));
    assert!(!is_save_connection_message(&v));
    assert!(matches!(
        SaveConnectionMessage::narrow(&v),
        Err(GuardError::InvalidPayload { .. })
    ));
}

#[test]
fn test_save_guard_round_trip() {
    let v = load_fixture("valid-save.json");

    let mut lowercase_variant = v.clone();
    lowercase_variant["data"]["authMethod"] = json!("publickey");
    assert!(!is_save_connection_message(&lowercase_variant));

    let mut extra = v.clone();
    extra["data"]["theme"] = json!("dark");
    extra["nonce"] = json!("abc");
    assert!(is_save_connection_message(&extra));

    for field in ["name", "host", "port", "authMethod"] {
        let mut missing = v.clone();
        missing["data"].as_object_mut().unwrap().remove(field);
        assert!(
            !is_save_connection_message(&missing),
            "removing {} should reject",
            field
        );
    }
}

#[test]
fn test_envelope_fuzz_values() {
    // JSON cannot hold a cycle; the closest shape is an object that wraps a
    // valid-looking message many levels deep under its own `command` key.
    let mut nested = json!({"command": "ready"});
    for _ in 0..64 {
        let mut obj = Map::new();
        obj.insert("command".to_string(), nested);
        nested = Value::Object(obj);
    }

    for v in [json!(42), json!("string"), json!(null), json!([]), nested] {
        assert!(!is_envelope(&v));
        assert!(SurfaceMessage::from_value(&v).is_err());
    }
}

#[test]
fn test_session_batch_all_accepted() {
    let batch = load_fixture("session-batch.json");
    let commands: Vec<&str> = batch
        .as_array()
        .unwrap()
        .iter()
        .map(|v| SurfaceMessage::from_value(v).unwrap().command())
        .collect();
    assert_eq!(
        commands,
        vec!["ready", "action", "submitForm", "openLink", "log", "cancel"]
    );
}

#[test]
fn test_hostile_batch_all_rejected() {
    let batch = load_fixture("hostile-batch.json");
    for v in batch.as_array().unwrap() {
        assert!(
            SurfaceMessage::from_value(v).is_err(),
            "should reject {}",
            v
        );
    }
}

#[test]
fn test_enum_literals_reject_object_form() {
    let mut save = load_fixture("valid-save.json");
    save["data"]["authMethod"] = json!({"password": null});
    let open = json!({"command": "openLink", "data": {"url": "https://bank.null", "target": {"external": null}}});
    let log = json!({"command": "log", "data": {"level": {"warn": null}, "message": "m"}});

    for v in [save, open, log] {
        assert!(
            matches!(narrow_message(&v), Err(GuardError::InvalidPayload { .. })),
            "should reject {}",
            v
        );
    }
}

// Dispatch

#[derive(Default)]
struct Host {
    saved: Vec<SaveConnectionMessage>,
    actions: Vec<String>,
    forms: Vec<String>,
    links: Vec<String>,
}

impl SurfaceHandler for Host {
    fn on_save_connection(&mut self, message: SaveConnectionMessage) {
        self.saved.push(message);
    }

    fn on_action(&mut self, message: ActionMessage) {
        self.actions.push(message.action);
    }

    fn on_submit_form(&mut self, message: SubmitFormMessage) {
        self.forms.push(message.form_id);
    }

    fn on_open_link(&mut self, message: OpenLinkMessage) {
        self.links.push(message.url);
    }
}

#[test]
fn test_dispatch_session() {
    let mut host = Host::default();
    let batch = load_fixture("session-batch.json");
    for v in batch.as_array().unwrap() {
        assert!(matches!(dispatch(v, &mut host), Dispatch::Handled(_)));
    }
    dispatch(&load_fixture("valid-save.json"), &mut host);

    assert_eq!(host.actions, vec!["open_inbox"]);
    assert_eq!(host.forms, vec!["login"]);
    assert_eq!(host.links, vec!["https://bank.null/login"]);
    assert_eq!(host.saved.len(), 1);
}

#[test]
fn test_dispatch_hostile_runs_nothing() {
    let mut host = Host::default();
    let batch = load_fixture("hostile-batch.json");
    let outcomes: Vec<Dispatch> = batch
        .as_array()
        .unwrap()
        .iter()
        .map(|v| dispatch(v, &mut host))
        .collect();

    assert!(outcomes.contains(&Dispatch::Unknown("eval".to_string())));
    assert!(outcomes
        .iter()
        .all(|o| !matches!(o, Dispatch::Handled(_))));
    assert!(host.saved.is_empty());
    assert!(host.actions.is_empty());
}
