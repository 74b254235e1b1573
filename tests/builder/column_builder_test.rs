#[cfg(test)]
mod tests {
    use serde_json::json;

    use trellis::builder::columns;
    use trellis::graph::fixture::GraphFixture;
    use trellis::graph::ontology::attr;
    use trellis::graph::{Entity, GraphAccessor, SnapshotGraph};
    use trellis::module::Table;

    async fn entity(graph: &SnapshotGraph, guid: &str) -> Entity {
        graph.entity_by_guid(guid).await.unwrap()
    }

    async fn build(graph: &SnapshotGraph, table_guid: &str) -> Option<Table> {
        columns::build_table(graph, &entity(graph, table_guid).await, 4)
            .await
            .unwrap()
    }

    /// One table under SALES, returning (fixture, table guid).
    fn sales_table() -> (GraphFixture, String) {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        let schema = fixture.schema(&database, "SALES");
        let schema_type = fixture.schema_type(&schema);
        let table = fixture.table(&schema_type, "ORDERS");
        (fixture, table)
    }

    #[tokio::test]
    async fn test_items_sorted_by_position() {
        let (mut fixture, table) = sales_table();
        fixture.column(&table, "status", 2, "VARCHAR");
        fixture.column(&table, "order_id", 0, "INTEGER");
        fixture.column(&table, "customer_id", 1, "INTEGER");
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        let names: Vec<_> = built.items.iter().map(|item| item.column.name.as_str()).collect();
        assert_eq!(names, vec!["order_id", "customer_id", "status"]);
        let positions: Vec<_> = built.items.iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_wvarchar_remaps_to_nvarchar_with_length() {
        let (mut fixture, table) = sales_table();
        let name = fixture.bare_column(&table, "customer_name", 0);
        fixture.type_info(&name, "WVARCHAR", "WVARCHAR", Some("10"));
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items[0].column.datatype, "NVARCHAR(10)");
        assert_eq!(built.items[0].column.vendor_type, "WVARCHAR");
    }

    #[tokio::test]
    async fn test_other_odbc_types_pass_through() {
        let (mut fixture, table) = sales_table();
        let status = fixture.bare_column(&table, "status", 0);
        fixture.type_info(&status, "VARCHAR", "VARCHAR", Some("5"));
        let amount = fixture.bare_column(&table, "amount", 1);
        fixture.type_info(&amount, "DECIMAL", "DECIMAL", None);
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items[0].column.datatype, "VARCHAR(5)");
        assert_eq!(built.items[1].column.datatype, "DECIMAL");
    }

    #[tokio::test]
    async fn test_vendor_type_falls_back_to_odbc_type() {
        let (mut fixture, table) = sales_table();
        let column = fixture.bare_column(&table, "order_id", 0);
        let info = fixture.type_info(&column, "", "INTEGER", None);
        // Strip the vendor type attribute entirely.
        fixture.set_attr(&info, attr::TYPE, json!(null));
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items[0].column.vendor_type, "INTEGER");
        assert_eq!(built.items[0].column.datatype, "INTEGER");
    }

    #[tokio::test]
    async fn test_column_without_type_info_is_dropped() {
        let (mut fixture, table) = sales_table();
        fixture.bare_column(&table, "untyped", 0);
        fixture.column(&table, "order_id", 1, "INTEGER");
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items.len(), 1);
        assert_eq!(built.items[0].column.name, "order_id");
    }

    #[tokio::test]
    async fn test_table_with_no_resolvable_column_is_dropped() {
        let (mut fixture, table) = sales_table();
        fixture.bare_column(&table, "untyped", 0);
        let graph = fixture.build();

        assert!(build(&graph, &table).await.is_none());
    }

    #[tokio::test]
    async fn test_nullability_and_position_defaults() {
        let (mut fixture, table) = sales_table();
        let nullable = fixture.column(&table, "comment", 1, "VARCHAR");
        fixture.set_attr(&nullable, attr::IS_NULLABLE, json!(true));
        // No position, no nullability attribute: zero values.
        let bare = fixture.bare_column(&table, "order_id", 0);
        fixture.set_attr(&bare, attr::POSITION, json!(null));
        fixture.type_info(&bare, "INTEGER", "INTEGER", None);
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items[0].column.name, "order_id");
        assert_eq!(built.items[0].position, 0);
        assert!(!built.items[0].column.nullable);
        assert!(built.items[1].column.nullable);
    }

    #[tokio::test]
    async fn test_primary_key_tag_and_references_carried_on_items() {
        let (mut fixture, table) = sales_table();
        let order_id = fixture.column(&table, "order_id", 0, "INTEGER");
        fixture.primary_key(&order_id, "PK_ORDERS");
        let customer_id = fixture.column(&table, "customer_id", 1, "INTEGER");
        let parent = fixture.column(&table, "parent_ref", 2, "INTEGER");
        fixture.foreign_key(&parent, &customer_id);
        let graph = fixture.build();

        let built = build(&graph, &table).await.unwrap();
        assert_eq!(built.items[0].pk_name.as_deref(), Some("PK_ORDERS"));
        assert!(built.items[0].referenced_column_guids.is_none());
        assert_eq!(
            built.items[1].referenced_column_guids.as_deref(),
            Some(&[parent.clone()][..])
        );
        // The referenced (parent) side carries no reference of its own.
        assert!(built.items[2].referenced_column_guids.is_none());
    }

    #[tokio::test]
    async fn test_unnamed_table_is_dropped() {
        let mut fixture = GraphFixture::new();
        let table = fixture.entity("table");
        fixture.column(&table, "order_id", 0, "INTEGER");
        let graph = fixture.build();

        assert!(build(&graph, &table).await.is_none());
    }
}
