//! Storage-facing migration of persisted widget arrays.

use serde_json::{Value, json};
use widget_config::{APP_VERSION_RC_1, MigrationRegistry, WidgetConfigDocument, migrate_widget_configs};

fn legacy_align() -> Value {
    json!({
        "label": "tab.alignTitle",
        "key": "align",
        "default": "start",
        "value": "end",
        "comType": "select",
        "options": {
            "translateItemLabel": true,
            "items": [
                { "label": "tab.alignment.start", "value": "start" },
                { "label": "tab.alignment.center", "value": "center" },
                { "label": "tab.alignment.end", "value": "end" }
            ]
        }
    })
}

fn tab_widget(name: &str, props: Value) -> Value {
    json!({
        "name": name,
        "originalType": "tab",
        "rect": { "x": 0, "y": 0, "width": 400, "height": 300 },
        "customConfig": { "props": props }
    })
}

fn row_keys(rows: &Value) -> Vec<&str> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r["key"].as_str().unwrap())
        .collect()
}

#[test]
fn non_array_input_yields_empty_output() {
    for input in [json!(""), json!(null), json!(true), json!({ "name": "w1", "originalType": "tab" })] {
        assert_eq!(migrate_widget_configs(&input).documents, Vec::<Value>::new());
    }
}

#[test]
fn other_widget_types_pass_through() {
    let input = json!([
        { "name": "w1", "originalType": "linkedChart" },
        { "name": "w2", "originalType": "group", "customConfig": { "props": [legacy_align()] } }
    ]);
    assert_eq!(Value::Array(migrate_widget_configs(&input).documents), input);
}

#[test]
fn tab_without_props_passes_through() {
    let input = json!([
        { "name": "w1", "originalType": "tab" },
        { "name": "w2", "originalType": "tab", "customConfig": {} }
    ]);
    assert_eq!(Value::Array(migrate_widget_configs(&input).documents), input);
}

#[test]
fn empty_tab_group_passes_through() {
    let input = json!([tab_widget(
        "w1",
        json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [] }])
    )]);
    assert_eq!(Value::Array(migrate_widget_configs(&input).documents), input);
}

#[test]
fn legacy_tab_group_is_restyled() {
    let nested = json!({ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [] });
    let already = tab_widget(
        "w2",
        json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align(), nested] }]),
    );
    let input = json!([
        tab_widget(
            "w1",
            json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align()] }])
        ),
        already.clone()
    ]);

    let output = migrate_widget_configs(&input).documents;
    assert_eq!(output.len(), 2);

    let first = &output[0];
    assert_eq!(first["version"], json!(APP_VERSION_RC_1));
    assert_eq!(first["rect"], input[0]["rect"]);
    let rows = &first["customConfig"]["props"][0]["rows"];
    assert_eq!(
        row_keys(rows),
        vec![
            "style", "position", "align", "fontFamily", "fontSize", "color", "background",
            "dimensions", "margins", "borderColor", "borderStyle", "borderWidth"
        ]
    );

    let align = &rows[2];
    assert_eq!(align["value"], json!("end"));
    assert_eq!(align["default"], json!("start"));
    assert_eq!(
        align["options"]["items"],
        json!([
            { "label": "viz.common.enum.alignment.start", "value": "start" },
            { "label": "viz.common.enum.alignment.center", "value": "center" },
            { "label": "viz.common.enum.alignment.end", "value": "end" }
        ])
    );
    assert_eq!(align["watcher"], json!({ "deps": ["style"] }));

    for key in ["dimensions", "margins", "borderColor", "borderStyle", "borderWidth"] {
        let node = rows.as_array().unwrap().iter().find(|r| r["key"] == key).unwrap();
        assert_eq!(node["watcher"], json!({ "deps": ["style"] }), "{key}");
    }

    // nested tabGroup marks the document as already migrated
    assert_eq!(output[1], already);
}

#[test]
fn restyle_keeps_explicit_nulls_and_empty_labels() {
    let cleared = json!({ "key": "note", "label": "", "comType": "input", "default": "hi", "value": null });
    let input = json!([tab_widget(
        "w1",
        json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align(), cleared.clone()] }])
    )]);

    let output = migrate_widget_configs(&input).documents;
    let rows = output[0]["customConfig"]["props"][0]["rows"].as_array().unwrap();
    let note = rows.iter().find(|r| r["key"] == "note").unwrap();
    assert_eq!(note, &cleared);
}

#[test]
fn missing_tab_group_gets_current_group() {
    let input = json!([tab_widget(
        "w1",
        json!([{ "label": "tab.tabTitle", "key": "tabTitle", "comType": "group", "rows": [] }])
    )]);

    let output = migrate_widget_configs(&input).documents;
    let props = output[0]["customConfig"]["props"].as_array().unwrap();
    assert_eq!(output[0]["version"], json!(APP_VERSION_RC_1));
    assert_eq!(props.len(), 2);
    assert_eq!(props[1], input[0]["customConfig"]["props"][0]);

    let group = &props[0];
    assert_eq!(group["key"], json!("tabGroup"));
    assert_eq!(
        row_keys(&group["rows"]),
        vec![
            "style", "align", "position", "fontFamily", "fontSize", "color", "background",
            "dimensions", "margins", "borderColor", "borderStyle", "borderWidth"
        ]
    );
    assert_eq!(
        group["rows"][0],
        json!({
            "key": "style",
            "label": "tab.style",
            "comType": "select",
            "default": "tab",
            "value": "tab",
            "options": {
                "translateItemLabel": true,
                "items": [
                    { "label": "tab.tab", "value": "tab" },
                    { "label": "tab.dropdown", "value": "dropdown" }
                ]
            }
        })
    );
    assert_eq!(group["rows"][1]["value"], json!("start"));
    assert_eq!(
        group["rows"][8]["rows"][0]["options"],
        json!({ "layout": "horizontal", "flatten": true, "mode": "inner" })
    );
}

#[test]
fn migration_is_idempotent() {
    let input = json!([
        tab_widget(
            "w1",
            json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align()] }])
        ),
        tab_widget("w2", json!([{ "label": "tab.tabTitle", "key": "tabTitle", "comType": "group", "rows": [] }])),
        { "name": "w3", "originalType": "richText" }
    ]);

    let once = Value::Array(migrate_widget_configs(&input).documents);
    let twice = Value::Array(migrate_widget_configs(&once).documents);
    assert_eq!(once, twice);
}

#[test]
fn stamped_documents_skip_released_rules() {
    let mut widget = tab_widget(
        "w1",
        json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align()] }]),
    );
    widget["version"] = json!(APP_VERSION_RC_1);
    let input = json!([widget]);

    assert_eq!(Value::Array(migrate_widget_configs(&input).documents), input);
}

#[test]
fn typed_batch_reports_no_failures_for_shipped_rules() {
    let docs: Vec<WidgetConfigDocument> = serde_json::from_value(json!([
        tab_widget(
            "w1",
            json!([{ "label": "tab.tabGroup", "key": "tabGroup", "comType": "group", "rows": [legacy_align()] }])
        ),
        { "name": "w2", "originalType": "jumpBtn" }
    ]))
    .unwrap();

    let report = MigrationRegistry::standard().migrate(docs);
    assert!(report.failures.is_empty());
    assert_eq!(report.documents[0].version.as_deref(), Some(APP_VERSION_RC_1));
    assert_eq!(report.documents[1].version, None);
}
