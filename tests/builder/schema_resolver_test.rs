#[cfg(test)]
mod tests {
    use trellis::builder::schema;
    use trellis::builder::BuildError;
    use trellis::graph::fixture::GraphFixture;
    use trellis::graph::ontology::rel;
    use trellis::graph::GraphError;

    #[tokio::test]
    async fn test_resolves_schema_by_exact_name() {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        fixture.schema(&database, "HR");
        let sales = fixture.schema(&database, "SALES");
        let graph = fixture.build();

        let resolved = schema::resolve(&graph, &database, "SALES").await.unwrap();
        assert_eq!(resolved.guid, sales);
        assert_eq!(resolved.display_name(), Some("SALES"));
    }

    #[tokio::test]
    async fn test_name_match_is_case_sensitive() {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        fixture.schema(&database, "SALES");
        let graph = fixture.build();

        let err = schema::resolve(&graph, &database, "sales").await.unwrap_err();
        assert!(matches!(err, BuildError::SchemaNotFound { name, .. } if name == "sales"));
    }

    #[tokio::test]
    async fn test_unknown_name_fails_with_schema_not_found() {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        fixture.schema(&database, "SALES");
        fixture.schema(&database, "HR");
        let graph = fixture.build();

        let err = schema::resolve(&graph, &database, "UNKNOWN").await.unwrap_err();
        match err {
            BuildError::SchemaNotFound { name, source } => {
                assert_eq!(name, "UNKNOWN");
                assert!(source.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_database_wraps_not_found_cause() {
        let graph = GraphFixture::new().build();

        let err = schema::resolve(&graph, "missing-db", "SALES").await.unwrap_err();
        match err {
            BuildError::SchemaNotFound { name, source } => {
                assert_eq!(name, "SALES");
                assert!(matches!(source, Some(GraphError::NotFound(_))));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unresolvable_candidate_is_skipped() {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        // First candidate dangles; the match sits behind it.
        fixture.relate(rel::DB_CONTAINS_SCHEMA, &database, "gone-guid");
        let sales = fixture.schema(&database, "SALES");
        let graph = fixture.build();

        let resolved = schema::resolve(&graph, &database, "SALES").await.unwrap();
        assert_eq!(resolved.guid, sales);
    }

    #[tokio::test]
    async fn test_candidates_lists_all_schemas() {
        let mut fixture = GraphFixture::new();
        let database = fixture.database("northwind");
        fixture.schema(&database, "SALES");
        fixture.schema(&database, "HR");
        let graph = fixture.build();

        let candidates = schema::candidates(&graph, &database).await.unwrap();
        let names: Vec<_> = candidates
            .iter()
            .filter_map(|schema| schema.display_name())
            .collect();
        assert_eq!(names, vec!["SALES", "HR"]);
    }
}
