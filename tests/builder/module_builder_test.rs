#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use trellis::builder::{BuildError, FanoutLimits, ModuleBuilder, ModuleRequest};
    use trellis::graph::fixture::GraphFixture;
    use trellis::module::MODULE_IDENTIFIER;

    struct SalesGuids {
        database: String,
        schema: String,
        schema_type: String,
    }

    /// The SALES scenario: ORDERS(order_id PK, customer_id → CUSTOMERS.customer_id,
    /// status), CUSTOMERS(customer_id), catalog PROD.
    fn sales_graph() -> (GraphFixture, SalesGuids) {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        let schema = fixture.schema(&database, "SALES");
        fixture.catalog("PROD", &schema);
        let schema_type = fixture.schema_type(&schema);

        let customers = fixture.table(&schema_type, "CUSTOMERS");
        let customer_id = fixture.column(&customers, "customer_id", 0, "INTEGER");

        let orders = fixture.table(&schema_type, "ORDERS");
        let order_id = fixture.column(&orders, "order_id", 0, "INTEGER");
        fixture.primary_key(&order_id, "PK_ORDERS");
        let order_customer = fixture.column(&orders, "customer_id", 1, "INTEGER");
        fixture.foreign_key(&customer_id, &order_customer);
        let status = fixture.bare_column(&orders, "status", 2);
        fixture.type_info(&status, "VARCHAR", "VARCHAR", Some("20"));

        (
            fixture,
            SalesGuids {
                database,
                schema,
                schema_type,
            },
        )
    }

    fn builder(fixture: GraphFixture) -> ModuleBuilder {
        ModuleBuilder::new(Arc::new(fixture.build()))
    }

    #[tokio::test]
    async fn test_sales_module_end_to_end() {
        let (fixture, guids) = sales_graph();
        let module = builder(fixture)
            .build(&ModuleRequest::new(&guids.database, "PROD", "SALES"))
            .await
            .unwrap();

        assert_eq!(module.identifier, MODULE_IDENTIFIER);
        assert_eq!(module.data_sources.len(), 1);
        let source = &module.data_sources[0];
        assert_eq!(source.catalog, "PROD");
        assert_eq!(source.schema, "SALES");
        assert_eq!(source.name, "PROD.SALES");
        assert_eq!(source.source_guid, guids.schema);

        // Tables sorted by name.
        let names: Vec<_> = source.tables.iter().map(|table| table.name.as_str()).collect();
        assert_eq!(names, vec!["CUSTOMERS", "ORDERS"]);

        let orders = &source.tables[1];
        let columns: Vec<_> = orders
            .items
            .iter()
            .map(|item| item.column.name.as_str())
            .collect();
        assert_eq!(columns, vec!["order_id", "customer_id", "status"]);
        assert_eq!(orders.items[2].column.datatype, "VARCHAR(20)");

        let primary_key = orders.primary_key.as_ref().unwrap();
        assert_eq!(primary_key.name, "PK_ORDERS");
        assert_eq!(primary_key.keyed_columns, vec!["order_id"]);

        assert_eq!(orders.foreign_keys.len(), 1);
        let key = &orders.foreign_keys[0];
        assert_eq!(key.name, "FK_ORDERS_CUSTOMERS_customer_id");
        assert_eq!(key.columns.len(), 1);
        let column = &key.columns[0];
        assert_eq!(column.column_name, "customer_id");
        assert_eq!(column.pk_column, "customer_id");
        assert_eq!(column.pk_table, "CUSTOMERS");
        assert_eq!(column.pk_schema.as_deref(), Some("SALES"));
        assert_eq!(column.pk_catalog.as_deref(), Some("PROD"));

        // CUSTOMERS has neither key.
        let customers = &source.tables[0];
        assert!(customers.primary_key.is_none());
        assert!(customers.foreign_keys.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_schema_fails_without_partial_module() {
        let (fixture, guids) = sales_graph();
        let err = builder(fixture)
            .build(&ModuleRequest::new(&guids.database, "PROD", "UNKNOWN"))
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::SchemaNotFound { name, .. } if name == "UNKNOWN"));
    }

    #[tokio::test]
    async fn test_empty_database_guid_is_invalid_reference() {
        let (fixture, _) = sales_graph();
        let err = builder(fixture)
            .build(&ModuleRequest::new("", "PROD", "SALES"))
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidReference { guid } if guid.is_empty()));
    }

    #[tokio::test]
    async fn test_table_filter_restricts_output() {
        let (fixture, guids) = sales_graph();
        let request = ModuleRequest::new(&guids.database, "PROD", "SALES")
            .with_table_filter(|name| name != "ORDERS");
        let module = builder(fixture).build(&request).await.unwrap();

        let names: Vec<_> = module.data_sources[0]
            .tables
            .iter()
            .map(|table| table.name.as_str())
            .collect();
        assert_eq!(names, vec!["CUSTOMERS"]);
    }

    #[tokio::test]
    async fn test_table_whose_only_column_lacks_a_type_is_absent() {
        let (mut fixture, guids) = sales_graph();
        let audit = fixture.table(&guids.schema_type, "AUDIT_LOG");
        fixture.bare_column(&audit, "untyped", 0);

        let module = builder(fixture)
            .build(&ModuleRequest::new(&guids.database, "PROD", "SALES"))
            .await
            .unwrap();
        let names: Vec<_> = module.data_sources[0]
            .tables
            .iter()
            .map(|table| table.name.as_str())
            .collect();
        assert_eq!(names, vec!["CUSTOMERS", "ORDERS"]);
    }

    #[tokio::test]
    async fn test_custom_limits_do_not_change_output() {
        let (fixture, guids) = sales_graph();
        let module = builder(fixture)
            .with_limits(FanoutLimits {
                tables: 1,
                columns: 1,
            })
            .build(&ModuleRequest::new(&guids.database, "PROD", "SALES"))
            .await
            .unwrap();
        let names: Vec<_> = module.data_sources[0]
            .tables
            .iter()
            .map(|table| table.name.as_str())
            .collect();
        assert_eq!(names, vec!["CUSTOMERS", "ORDERS"]);
    }

    #[tokio::test]
    async fn test_list_schemas() {
        let (mut fixture, guids) = sales_graph();
        fixture.schema(&guids.database, "HR");
        let schemas = builder(fixture).list_schemas(&guids.database).await.unwrap();
        assert_eq!(schemas, vec!["SALES", "HR"]);
    }

    #[tokio::test]
    async fn test_module_serializes_with_wire_field_names() {
        let (fixture, guids) = sales_graph();
        let module = builder(fixture)
            .build(&ModuleRequest::new(&guids.database, "PROD", "SALES"))
            .await
            .unwrap();

        let value = serde_json::to_value(&module).unwrap();
        assert_eq!(value["identifier"], "physicalmodule");
        assert_eq!(value["dataSources"][0]["sourceGuid"], guids.schema.as_str());
        let orders = &value["dataSources"][0]["tables"][1];
        assert_eq!(orders["primaryKey"]["keyedColumns"][0], "order_id");
        assert_eq!(
            orders["foreignKeys"][0]["columns"][0]["pkTable"],
            "CUSTOMERS"
        );
        assert_eq!(orders["items"][1]["column"]["vendorType"], "INTEGER");
    }
}
