use bomview_lib::TreeModel;
use bomview_lib::column::ColumnSpec;
use bomview_lib::config::TreeConfig;
use bomview_lib::edit::CellEditor;
use bomview_lib::edit::EditorKind;
use bomview_lib::model::CellValue;
use bomview_lib::model::ProductId;
use bomview_lib::repository::CompositionRepository;
use bomview_lib::repository::InMemoryRepository;
use bomview_lib::resolve::ProductAttributeResolver;

const FIXTURE: &str = r#"{
    "products": [
        {"id": 1, "name": "Frame", "deno": "FR.100", "kind": "assembly",
         "documents": [
            {"deno": "RC-1", "class_name": "TD", "sign": "RC", "covers": [2, 3]},
            {"deno": "DWG-1", "class_name": "KD", "date": "2024-03-05"}
         ]},
        {"id": 2, "name": "Arm", "deno": "AR.200", "kind": "part",
         "documents": [{"deno": "MK-2", "class_name": "TD", "sign": "MK"}]},
        {"id": 3, "name": "Bolt", "deno": "BT.300"}
    ],
    "edges": [
        {"parent": 1, "product": 2, "quantity": "2", "unit": "pcs"},
        {"parent": 2, "product": 3, "quantity": "4", "unit": "pcs"}
    ],
    "documents": [
        {"deno": "MK-2", "class_name": "TD", "sign": "MK"},
        {"deno": "MK-3", "class_name": "TD", "sign": "MK3"},
        {"deno": "RC-1", "class_name": "TD", "sign": "RC"}
    ],
    "catalogs": {"kinds": ["assembly", "part", "purchased"]}
}"#;

fn model() -> TreeModel<InMemoryRepository, ProductAttributeResolver> {
    let repo = InMemoryRepository::from_json(FIXTURE).unwrap();
    let mut model = TreeModel::new(repo, ProductAttributeResolver::default(), ProductId(1), TreeConfig::default())
        .unwrap();
    model.rebuild().unwrap();
    model
}

#[test]
fn test_add_column_twice_only_toggles() {
    let mut model = model();
    let spec = ColumnSpec::product_field("Kind", "kind");
    let index = model.add_column(spec.clone());

    let column = model.columns().column(index).unwrap();
    assert!(column.is_visible());
    assert_eq!(column.cell_count(), 2);
    let before: Vec<_> = model.arena().iter().map(|n| column.display(n.id())).collect();

    assert_eq!(model.add_column(spec), index);
    let column = model.columns().column(index).unwrap();
    assert!(!column.is_visible());
    let after: Vec<_> = model.arena().iter().map(|n| column.display(n.id())).collect();
    assert_eq!(before, after);
}

#[test]
fn test_aggregated_document_lines() {
    let mut model = model();
    model.add_column(ColumnSpec::document("TD", "TD").with_setting("aggregate", true));

    assert_eq!(model.node_at("").unwrap().display("TD"), "RC");
    assert_eq!(model.node_at("1.").unwrap().display("TD"), "Part of RC-1\nMK");
    assert_eq!(model.node_at("1.1.").unwrap().display("TD"), "Part of RC-1");
}

#[test]
fn test_plain_document_column() {
    let mut model = model();
    model.add_column(ColumnSpec::document("TD", "TD"));
    assert_eq!(model.node_at("1.").unwrap().display("TD"), "MK");
    assert_eq!(model.node_at("1.1.").unwrap().display("TD"), "");
}

#[test]
fn test_dates_normalized() {
    let mut model = model();
    model.add_column(ColumnSpec::document("KD date", "KD").with_setting("field", "date"));

    let root = model.node_at("").unwrap();
    let value = root.value("KD date").unwrap();
    assert!(matches!(value, CellValue::DateTime(_)));
    assert_eq!(root.display("KD date"), "2024-03-05 00:00");
}

#[test]
fn test_invalid_spec_leaves_cells_empty() {
    let mut model = model();
    let index = model.add_column(ColumnSpec::new("Broken").with_setting("source", "nowhere"));
    assert_eq!(model.columns().column(index).unwrap().cell_count(), 0);
    assert_eq!(model.node_at("1.").unwrap().display("Name"), "Arm");
}

#[test]
fn test_redraw_column_replaces_spec() {
    let mut model = model();
    model.add_column(ColumnSpec::document("Docs", "TD"));
    model
        .redraw_column(&ColumnSpec::document("Docs", "TD").with_setting("field", "deno"))
        .unwrap();
    assert_eq!(model.node_at("1.").unwrap().display("Docs"), "MK-2");

    model.rebuild().unwrap();
    assert_eq!(model.node_at("1.").unwrap().display("Docs"), "MK-2");
    assert!(model.redraw_column(&ColumnSpec::new("Missing")).is_err());
}

#[test]
fn test_checklist_edit_updates_documents() {
    let mut model = model();
    let spec = ColumnSpec::document("TD", "TD")
        .with_setting("field", "deno")
        .with_editor(EditorKind::MultiSelectChecklist);
    model.add_column(spec);
    let arm = model.node_at("1.").unwrap().id();

    let mut session = model.begin_edit(arm, "TD").unwrap();
    assert_eq!(session.kind(), EditorKind::MultiSelectChecklist);
    session.toggle("MK-3");
    let commit = session.commit();
    assert_eq!(commit.values, vec!["MK-2", "MK-3"]);

    model.commit_edit(arm, "TD", &commit).unwrap();
    assert_eq!(model.node_at("1.").unwrap().display("TD"), "MK-2\nMK-3");
}

#[test]
fn test_edit_visible_on_shared_product() {
    let mut model = model();
    model.add_column(
        ColumnSpec::product_field("Kind", "kind")
            .with_setting("catalog", "kinds")
            .with_editor(EditorKind::SingleSelect),
    );
    let bolt = model.node_at("1.1.").unwrap().id();

    let mut session = model.begin_edit(bolt, "Kind").unwrap();
    assert!(session.select("purchased"));
    model.commit_edit(bolt, "Kind", &session.commit()).unwrap();

    assert_eq!(model.node_at("1.1.").unwrap().display("Kind"), "purchased");
    let stored = model.repository().find_by_deno("BT.300").unwrap();
    assert_eq!(stored.with(|p| p.kind.clone()).as_deref(), Some("purchased"));
}
