//! Unit tests for diagram rendering through the public pipeline.

use chrono::{DateTime, TimeZone, Utc};
use schema_puml::catalog::{
    CatalogSnapshot, CatalogSource, ColumnRow, ForeignKeyRow, IndexRow, SchemaScope, TableRow,
};
use schema_puml::config::RenderOptions;
use schema_puml::model::Column;
use schema_puml::pipeline::{build_model, generate_from_snapshot};
use schema_puml::render::{format_data_type, render, render_named, DiagramError, DiagramStyle};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
}

fn column(table: (&str, &str), name: &str, data_type: &str, ordinal: i32) -> ColumnRow {
    ColumnRow {
        schema: table.0.to_string(),
        table: table.1.to_string(),
        name: name.to_string(),
        data_type: data_type.to_string(),
        ordinal_position: ordinal,
        ..Default::default()
    }
}

fn fk(name: &str, from: (&str, &str, &str), to: (&str, &str, &str)) -> ForeignKeyRow {
    ForeignKeyRow {
        constraint_name: name.to_string(),
        source_schema: from.0.to_string(),
        source_table: from.1.to_string(),
        source_column: from.2.to_string(),
        target_schema: to.0.to_string(),
        target_table: to.1.to_string(),
        target_column: to.2.to_string(),
    }
}

/// Customer/Order catalog: Order.CustomerId references Customer.Id
fn shop() -> CatalogSnapshot {
    let mut customer_id = column(("dbo", "Customer"), "Id", "int", 1);
    customer_id.is_primary_key = true;
    customer_id.is_identity = true;
    let mut customer_name = column(("dbo", "Customer"), "Name", "nvarchar", 2);
    customer_name.max_length = Some(100);

    let mut order_id = column(("dbo", "Order"), "Id", "int", 1);
    order_id.is_primary_key = true;
    let mut order_customer = column(("dbo", "Order"), "CustomerId", "int", 2);
    order_customer.nullable = true;
    order_customer.is_foreign_key = true;
    let mut order_total = column(("dbo", "Order"), "Total", "decimal", 3);
    order_total.numeric_precision = Some(10);
    order_total.numeric_scale = Some(2);

    CatalogSnapshot {
        database: "Shop".to_string(),
        tables: vec![TableRow::new("dbo", "Order"), TableRow::new("dbo", "Customer")],
        columns: vec![
            order_total,
            customer_name,
            order_customer,
            customer_id,
            order_id,
        ],
        indexes: vec![IndexRow {
            schema: "dbo".to_string(),
            table: "Order".to_string(),
            name: "IX_Order_CustomerId".to_string(),
            type_label: "NONCLUSTERED".to_string(),
            is_unique: false,
            is_primary_key: false,
            columns: vec!["CustomerId".to_string()],
        }],
        foreign_keys: vec![fk(
            "FK_Order_Customer",
            ("dbo", "Order", "CustomerId"),
            ("dbo", "Customer", "Id"),
        )],
    }
}

fn entity_text(snapshot: CatalogSnapshot, options: &RenderOptions) -> String {
    let scoped = snapshot
        .load(&SchemaScope::from_options(options))
        .unwrap();
    generate_from_snapshot(
        scoped,
        options,
        DiagramStyle::EntityRelationship,
        fixed_time(),
    )
    .text
}

#[test]
fn test_customer_order_entity_diagram() {
    let text = entity_text(shop(), &RenderOptions::default());

    assert!(text.starts_with("@startuml\n' Generated on 2024-03-01 12:30:00 UTC\n' Database: Shop\n\n"));
    assert!(text.contains("entity \"Customer\" {\n  * Id : INT <<IDENTITY>>\n  --\n  Name : NVARCHAR(100) <<NOT NULL>>\n}\n"));
    assert!(text.contains("  CustomerId : INT\n"));
    assert!(text.contains("  Total : DECIMAL(10,2) <<NOT NULL>>\n"));
    assert!(text.contains("' Relationships\nCustomer ||--o{ Order : Id\n"));
    assert!(text.ends_with("\n@enduml\n"));

    // Customer sorts before Order regardless of catalog order
    let customer = text.find("entity \"Customer\"").unwrap();
    let order = text.find("entity \"Order\"").unwrap();
    assert!(customer < order);
}

#[test]
fn test_rendering_is_deterministic() {
    let options = RenderOptions::default();
    assert_eq!(entity_text(shop(), &options), entity_text(shop(), &options));
}

#[test]
fn test_indexes_listed_when_enabled() {
    let options = RenderOptions {
        include_indexes: true,
        ..Default::default()
    };
    let text = entity_text(shop(), &options);
    assert!(text.contains("  --\n  ' Indexes:\n  ' INDEX: CustomerId\n}\n"));

    let text = entity_text(shop(), &RenderOptions::default());
    assert!(!text.contains("' Indexes:"));
}

#[test]
fn test_non_default_schema_is_qualified() {
    let mut snapshot = shop();
    for t in &mut snapshot.tables {
        t.schema = "sales".to_string();
    }
    for c in &mut snapshot.columns {
        c.schema = "sales".to_string();
    }
    for f in &mut snapshot.foreign_keys {
        f.source_schema = "sales".to_string();
        f.target_schema = "sales".to_string();
    }
    snapshot.indexes.clear();

    let text = entity_text(snapshot, &RenderOptions::default());
    assert!(text.contains("entity \"sales.Customer\" {"));
    assert!(text.contains("sales.Customer ||--o{ sales.Order : Id"));
}

#[test]
fn test_relationships_section_can_be_disabled() {
    let options = RenderOptions {
        include_relationships: false,
        ..Default::default()
    };
    let text = entity_text(shop(), &options);
    assert!(!text.contains("' Relationships"));
    assert!(!text.contains("||--"));
}

#[test]
fn test_max_tables_drops_dangling_edges() {
    let options = RenderOptions {
        max_tables: 1,
        ..Default::default()
    };
    let scoped = shop().load(&SchemaScope::from_options(&options)).unwrap();
    let model = build_model(scoped, &options, fixed_time());

    assert_eq!(model.schema.table_count(), 1);
    assert_eq!(model.schema.tables[0].name, "Customer");
    assert!(model.relationships.is_empty());
}

#[test]
fn test_class_diagram() {
    let options = RenderOptions::default();
    let scoped = shop().load(&SchemaScope::from_options(&options)).unwrap();
    let generated = generate_from_snapshot(scoped, &options, DiagramStyle::ClassDiagram, fixed_time());

    assert!(generated.text.contains("class Order {\n  +Id : INT\n  -CustomerId : INT\n  -Total : DECIMAL(10,2)\n}\n"));
    assert!(generated.text.contains("Order --> Customer\n"));
    assert!(!generated.text.contains("skinparam"));
    assert!(generated.text.ends_with("@enduml\n"));
    assert_eq!(generated.stats.tables, 2);
    assert_eq!(generated.stats.columns, 5);
    assert_eq!(generated.stats.relationships, 1);
}

#[test]
fn test_theme_and_directives_in_header() {
    let options = RenderOptions {
        theme: Some("cerulean".to_string()),
        custom_directives: vec!["left to right direction".to_string()],
        ..Default::default()
    };
    let text = entity_text(shop(), &options);
    assert!(text.contains("' Database: Shop\n\n!theme cerulean\n\nleft to right direction\n\nskinparam linetype ortho\n"));
}

#[test]
fn test_unknown_style_is_rejected() {
    let options = RenderOptions::default();
    let scoped = shop().load(&SchemaScope::from_options(&options)).unwrap();
    let model = build_model(scoped, &options, fixed_time());

    let err = render_named(&model.schema, &model.relationships, &options, "mermaid").unwrap_err();
    assert_eq!(err, DiagramError::UnknownStyle("mermaid".to_string()));
    assert_eq!(
        err.to_string(),
        "Unknown diagram type: mermaid. Valid options: entity, class"
    );

    let by_name = render_named(&model.schema, &model.relationships, &options, "CLASS").unwrap();
    let direct = render(
        &model.schema,
        &model.relationships,
        &options,
        DiagramStyle::ClassDiagram,
    );
    assert_eq!(by_name, direct);
}

#[test]
fn test_data_type_examples() {
    let mut col = Column {
        name: "Body".to_string(),
        data_type: "varchar".to_string(),
        max_length: Some(-1),
        ..Default::default()
    };
    assert_eq!(format_data_type(&col), "VARCHAR(MAX)");

    col.data_type = "decimal".to_string();
    col.max_length = None;
    col.precision = Some(10);
    col.scale = Some(2);
    assert_eq!(format_data_type(&col), "DECIMAL(10,2)");

    col.data_type = "datetime2".to_string();
    assert_eq!(format_data_type(&col), "DATETIME2");
}
