//! End-to-end compile tests for the four operation kinds.

use pretty_assertions::assert_eq;

use crate::ast::{ConditionSet, FieldSpec, JoinKind, JoinSpec, Value};
use crate::builder::QueryBuilder;

#[test]
fn test_bare_select() {
    let mut query = QueryBuilder::select("t");
    assert_eq!(query.build().unwrap(), "SELECT * FROM t");
}

#[test]
fn test_select_columns() {
    let mut query = QueryBuilder::select("users");
    query
        .fields(FieldSpec::new().column("id").column("email"))
        .unwrap();
    assert_eq!(query.build().unwrap(), "SELECT `id`,`email` FROM users");
}

#[test]
fn test_select_aliased_column() {
    let mut query = QueryBuilder::select("orders");
    query
        .fields(FieldSpec::new().aliased("total", "amount"))
        .unwrap();
    assert_eq!(
        query.build().unwrap(),
        "SELECT `amount` AS `total` FROM orders"
    );
}

#[test]
fn test_select_raw_expression_bypasses_quoting() {
    let mut query = QueryBuilder::select("orders");
    query.fields(FieldSpec::new().raw("COUNT(*)")).unwrap();
    assert_eq!(query.build().unwrap(), "SELECT COUNT(*) FROM orders");
}

#[test]
fn test_select_star_expands_over_joins() {
    let mut query = QueryBuilder::select("users");
    query
        .join(
            "profiles",
            JoinSpec::on(ConditionSet::new().field("profiles.user_id", "users.id")),
        )
        .unwrap();
    query.fields(FieldSpec::star()).unwrap();
    assert_eq!(
        query.build().unwrap(),
        "SELECT `users`.*,`profiles`.* FROM users \
         LEFT JOIN `profiles` ON `profiles`.`user_id` = `users`.`id`"
    );
}

#[test]
fn test_select_table_columns_with_alias() {
    let mut query = QueryBuilder::select("users");
    query
        .join(
            "p",
            JoinSpec::on(ConditionSet::new().field("p.user_id", "users.id")).table("profiles"),
        )
        .unwrap();
    query
        .fields(FieldSpec::new().table_columns(
            "p",
            vec![(Some("uid".to_string()), "user_id".to_string()), (None, "bio".to_string())],
        ))
        .unwrap();
    assert_eq!(
        query.build().unwrap(),
        "SELECT `p`.`user_id` AS `uid`,`p`.`bio` FROM users \
         LEFT JOIN `profiles` p ON `p`.`user_id` = `users`.`id`"
    );
}

#[test]
fn test_inner_join_kind() {
    let mut query = QueryBuilder::select("users");
    query
        .join(
            "sessions",
            JoinSpec::on(ConditionSet::new().field("sessions.user_id", "users.id"))
                .kind(JoinKind::Inner),
        )
        .unwrap();
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM users INNER JOIN `sessions` ON `sessions`.`user_id` = `users`.`id`"
    );
}

#[test]
fn test_where_qualifies_with_primary_table() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("id", 5));
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`id` = :cnd_id"
    );
    assert_eq!(query.params(), vec![("cnd_id".to_string(), Value::Int(5))]);
}

#[test]
fn test_explicit_leaf_table_overrides_default() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("other.id", 5));
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `other`.`id` = :cnd_other_id"
    );
}

#[test]
fn test_nested_group_defaults_to_or() {
    let mut query = QueryBuilder::select("t");
    query.conditions(
        ConditionSet::new()
            .field("A", 1)
            .group("sub", ConditionSet::new().field("B", 2).field("C", 3)),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`A` = :cnd_A AND (`B` = :cnd_B OR `C` = :cnd_C)"
    );
    assert_eq!(
        query.params(),
        vec![
            ("cnd_A".to_string(), Value::Int(1)),
            ("cnd_B".to_string(), Value::Int(2)),
            ("cnd_C".to_string(), Value::Int(3)),
        ]
    );
}

#[test]
fn test_table_keyed_group_qualifies_children() {
    let mut query = QueryBuilder::select("users");
    query
        .join(
            "profiles",
            JoinSpec::on(ConditionSet::new().field("profiles.user_id", "users.id")),
        )
        .unwrap();
    query.conditions(
        ConditionSet::new().group("profiles", ConditionSet::new().field("public", true)),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM users \
         LEFT JOIN `profiles` ON `profiles`.`user_id` = `users`.`id` \
         WHERE (`profiles`.`public` = :cnd_public)"
    );
}

#[test]
fn test_forced_field_for_positional_children() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().group(
        "status",
        ConditionSet::new().push("active").or().push("pending"),
    ));
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE (`status` = :cnd_status0 OR `status` = :cnd_status2)"
    );
    assert_eq!(
        query.params(),
        vec![
            ("cnd_status0".to_string(), Value::from("active")),
            ("cnd_status2".to_string(), Value::from("pending")),
        ]
    );
}

#[test]
fn test_explicit_connector_is_sticky() {
    let mut query = QueryBuilder::select("t");
    query.conditions(
        ConditionSet::new()
            .field("a", 1)
            .or()
            .field("b", 2)
            .field("c", 3),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`a` = :cnd_a OR `t`.`b` = :cnd_b OR `t`.`c` = :cnd_c"
    );
}

#[test]
fn test_or_not_connector() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("a", 1).or_not().field("b", 2));
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`a` = :cnd_a OR NOT `t`.`b` = :cnd_b"
    );
}

#[test]
fn test_falsy_leaves_are_dropped() {
    let mut query = QueryBuilder::select("t");
    query.conditions(
        ConditionSet::new()
            .field("a", 0)
            .field("b", "")
            .field("c", 2),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`c` = :cnd_c"
    );
}

#[test]
fn test_all_falsy_conditions_drop_the_where() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("a", false));
    assert_eq!(query.build().unwrap(), "SELECT * FROM t");
}

#[test]
fn test_binding_values_are_sanitized() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("name", "  o'brien "));
    query.build().unwrap();
    assert_eq!(
        query.params(),
        vec![("cnd_name".to_string(), Value::from(r"o\'brien"))]
    );
}

#[test]
fn test_colliding_binding_names_get_suffixed() {
    let mut query = QueryBuilder::select("t");
    query.conditions(
        ConditionSet::new()
            .field("id", 1)
            .group("sub", ConditionSet::new().field("id", 2)),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`id` = :cnd_id AND (`id` = :cnd_id_2)"
    );
}

#[test]
fn test_operator_keys() {
    let mut query = QueryBuilder::select("t");
    query.conditions(
        ConditionSet::new()
            .field("age >", 30)
            .field("name LIKE", "%bob%"),
    );
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t WHERE `t`.`age` > :cnd_age AND `t`.`name` LIKE :cnd_name"
    );
}

#[test]
fn test_order_by() {
    let mut query = QueryBuilder::select("t");
    query.order("Desc", &["field"]);
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t ORDER BY `field` DESC"
    );
}

#[test]
fn test_order_by_multiple_directions() {
    let mut query = QueryBuilder::select("t");
    query.order("DESC", &["created", "id"]).order("asc", &["name"]);
    assert_eq!(
        query.build().unwrap(),
        "SELECT * FROM t ORDER BY `created` DESC, `id` DESC, `name` ASC"
    );
}

#[test]
fn test_limit_forms() {
    let mut query = QueryBuilder::select("t");
    query.limit(&[10]);
    assert_eq!(query.build().unwrap(), "SELECT * FROM t LIMIT 10");

    let mut query = QueryBuilder::select("t");
    query.limit(&[10, 5]);
    assert_eq!(query.build().unwrap(), "SELECT * FROM t LIMIT 10, 5");

    // a zero count is treated as absent
    let mut query = QueryBuilder::select("t");
    query.limit(&[10, 0]);
    assert_eq!(query.build().unwrap(), "SELECT * FROM t LIMIT 10");
}

#[test]
fn test_limit_without_offset_is_a_config_error() {
    let mut query = QueryBuilder::select("t");
    query.limit(&[]);
    let err = query.build().unwrap_err();
    assert!(err.to_string().contains("limit"));
}

#[test]
fn test_insert() {
    let mut query = QueryBuilder::insert("t");
    query
        .fields(FieldSpec::new().column("a").column("b"))
        .unwrap();
    query.values([("a", 1), ("b", 2)]).unwrap();
    assert_eq!(
        query.build().unwrap(),
        "INSERT INTO t (`a`,`b`) VALUES (:a, :b)"
    );
    assert_eq!(
        query.params(),
        vec![
            ("a".to_string(), Value::Int(1)),
            ("b".to_string(), Value::Int(2)),
        ]
    );
}

#[test]
fn test_update() {
    let mut query = QueryBuilder::update("users");
    query.values([("name", "bob")]).unwrap();
    query.conditions(ConditionSet::new().field("id", 7));
    assert_eq!(
        query.build().unwrap(),
        "UPDATE users SET `name` = :name WHERE `users`.`id` = :cnd_id"
    );
    assert_eq!(
        query.params(),
        vec![
            ("name".to_string(), Value::from("bob")),
            ("cnd_id".to_string(), Value::Int(7)),
        ]
    );
}

#[test]
fn test_delete_with_conditions() {
    let mut query = QueryBuilder::delete("t");
    query.conditions(ConditionSet::new().field("id", 5));
    assert_eq!(
        query.build().unwrap(),
        "DELETE FROM t WHERE `t`.`id` = :cnd_id"
    );
    assert_eq!(query.params(), vec![("cnd_id".to_string(), Value::Int(5))]);
}

#[test]
fn test_delete_without_conditions_is_refused() {
    let mut query = QueryBuilder::delete("t");
    let err = query.build().unwrap_err();
    assert!(err.to_string().contains("delete"));
}

#[test]
fn test_delete_with_only_falsy_conditions_is_refused() {
    let mut query = QueryBuilder::delete("t");
    query.conditions(ConditionSet::new().field("id", 0));
    assert!(query.build().is_err());
}

#[test]
fn test_debug_bundle() {
    let mut query = QueryBuilder::select("t");
    query.conditions(ConditionSet::new().field("id", 5));
    query.build().unwrap();
    let bundle = query.debug();
    assert_eq!(bundle.sql.as_deref(), Some("SELECT * FROM t WHERE `t`.`id` = :cnd_id"));
    assert_eq!(bundle.params, query.params());
    assert!(bundle.to_json().contains("cnd_id"));
}
