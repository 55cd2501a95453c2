//! End-to-end compilation of documented filter examples.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rustack_filter_core::{
        FilterConfig, FilterError, build_scan_input, compile_filter_expression, simplify_items,
    };
    use rustack_filter_model::filter::parse_filter_tree;
    use rustack_filter_model::{Item, JoinOperator, ScanParams, TypedValue};
    use serde_json::json;

    fn s(v: &str) -> TypedValue {
        TypedValue::S(v.to_owned())
    }

    #[test]
    fn test_should_compile_explicit_and_shorthand_equality_identically() {
        let explicit = parse_filter_tree(
            r#"[{"Location": {"comparison_operator": "eq", "value": {"S": "datacenter"}}}]"#,
        )
        .unwrap();
        let shorthand = parse_filter_tree(r#"[{"Location": "datacenter"}]"#).unwrap();

        let a = compile_filter_expression(&explicit, JoinOperator::And).unwrap();
        let b = compile_filter_expression(&shorthand, JoinOperator::And).unwrap();
        assert_eq!(a, b);

        let compiled = a.unwrap();
        assert_eq!(compiled.condition_expression, "#n0 = :v0");
        assert_eq!(compiled.attribute_value_placeholders[":v0"], s("datacenter"));
    }

    #[test]
    fn test_should_compile_complex_search_criteria() {
        let tree = parse_filter_tree(
            r#"[
                {"OR": [
                    {"ProjectGroup": {"comparison_operator": "is_in", "value": ["Phoenix", "Pegasus"]}},
                    {"Location": "Houston"}
                ]},
                {"AND": [
                    {"OR": [
                        {"LaunchGroup": "green"},
                        {"Level": ["Manager", "Director"]}
                    ]}
                ]}
            ]"#,
        )
        .unwrap();

        let compiled = compile_filter_expression(&tree, JoinOperator::And)
            .unwrap()
            .unwrap();
        assert_eq!(
            compiled.condition_expression,
            "((#n0 IN (:v0, :v1) OR #n1 = :v2) AND (#n2 = :v3 OR #n3 IN (:v4, :v5)))"
        );
        let names: BTreeSet<&str> = compiled
            .attribute_name_placeholders
            .values()
            .map(String::as_str)
            .collect();
        assert_eq!(
            names,
            BTreeSet::from(["ProjectGroup", "Location", "LaunchGroup", "Level"])
        );
        assert_eq!(compiled.attribute_value_placeholders[":v5"], s("Director"));
    }

    #[test]
    fn test_should_serialize_compiled_expression_for_the_wire() {
        let tree = parse_filter_tree(r#"[{"Tags": {"comparison_operator": "contains", "value": "prod"}}]"#)
            .unwrap();
        let compiled = compile_filter_expression(&tree, JoinOperator::And)
            .unwrap()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&compiled).unwrap(),
            json!({
                "condition_expression": "contains(#n0, :v0)",
                "attribute_name_placeholders": {"#n0": "Tags"},
                "attribute_value_placeholders": {":v0": {"S": "prod"}}
            })
        );
    }

    #[test]
    fn test_should_build_scan_request_with_configured_join() {
        let params: ScanParams = serde_json::from_value(json!({
            "table_name": "Students",
            "projection_expression": "Name, GradePercentage",
            "filter_expression": [
                {"GradePercentage": {"comparison_operator": "lt", "value": 20}},
                {"GradePercentage": {"comparison_operator": "gt", "value": 80}}
            ]
        }))
        .unwrap();
        let config = FilterConfig {
            default_join: JoinOperator::Or,
            ..FilterConfig::default()
        };

        let input = build_scan_input(&params, config.default_join).unwrap();
        let request = serde_json::to_value(&input).unwrap();
        assert_eq!(
            request,
            json!({
                "TableName": "Students",
                "FilterExpression": "(#n0 < :v0 OR #n0 > :v1)",
                "ProjectionExpression": "Name, GradePercentage",
                "ExpressionAttributeNames": {"#n0": "GradePercentage"},
                "ExpressionAttributeValues": {":v0": {"N": "20"}, ":v1": {"N": "80"}}
            })
        );
    }

    #[test]
    fn test_should_fail_whole_compilation_on_one_bad_entry() {
        let tree = parse_filter_tree(
            r#"[{"a": 1}, {"OR": [{"b": 2}, {"c": {"comparison_operator": "between_badly", "value": 3}}]}]"#,
        )
        .unwrap();
        let err = compile_filter_expression(&tree, JoinOperator::And).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Comparison \"between_badly\" on attribute \"c\" is not a valid comparison_operator"
        );
        assert!(matches!(err, FilterError::InvalidComparisonOperator { .. }));
    }

    #[test]
    fn test_should_compile_concurrently_without_interference() {
        let tree = parse_filter_tree(
            r#"[{"OR": [{"Level": ["Manager", "Director"]}, {"Age": {"comparison_operator": "between", "value": [30, 40]}}]}]"#,
        )
        .unwrap();
        let expected = compile_filter_expression(&tree, JoinOperator::And).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| compile_filter_expression(&tree, JoinOperator::And).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_should_simplify_scan_records() {
        let items: Vec<Item> = serde_json::from_value(json!([
            {
                "AttributeA": {"S": "ValueA"},
                "AttributeList": {"L": [{"S": "ListItem1"}, {"S": "ListItem2"}]}
            },
            {"Location": {"S": "datacenter"}}
        ]))
        .unwrap();

        let simplified = simplify_items(&items);
        assert_eq!(
            serde_json::to_value(&simplified).unwrap(),
            json!([
                {"AttributeA": "ValueA", "AttributeList": ["ListItem1", "ListItem2"]},
                {"Location": "datacenter"}
            ])
        );
    }
}
