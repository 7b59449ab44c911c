use mortar_core::{
    schema::{
        IndexSpec, LiveColumn, LiveIndex, PrimaryKey, Property, PropertyIndex, TableInfo,
        UuidVersion,
    },
    stmt::Value,
    Model,
};
use mortar_sql::{
    plan_alterations, plan_table,
    stmt::{CreateTable, PrimaryKeyDef},
    Serializer, Statement, TablePlan,
};
use pretty_assertions::assert_eq;

/// What the server reports right after `CREATE TABLE` for `model`.
fn live(model: &Model) -> TableInfo {
    let create = CreateTable::new(model);

    let mut columns = vec![LiveColumn::new(
        "id",
        PrimaryKeyDef(model.primary_key).column_type().to_lowercase(),
        false,
    )];
    columns.extend(
        create
            .columns
            .iter()
            .map(|column| LiveColumn::new(&column.name, column.ty.base.to_lowercase(), !column.not_null)),
    );

    let mut indexes = vec![LiveIndex::new("PRIMARY", 1, "id")];
    for index in &create.indexes {
        for (i, column) in index.columns.iter().enumerate() {
            indexes.push(LiveIndex::new(&index.name, i as u32 + 1, column).with_kind(index.kind));
        }
    }

    TableInfo { columns, indexes }
}

fn plan(model: &Model, info: &TableInfo) -> Vec<String> {
    plan_alterations(model, &info.columns, &info.indexes)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn ab() -> Model {
    Model::new("Model")
        .property(Property::string("a"))
        .property(Property::string("b"))
}

// ---------------------------------------------------------------------------
// No-ops
// ---------------------------------------------------------------------------

#[test]
fn matching_table_needs_nothing() {
    let model = ab()
        .property(Property::number("n").data_type("bigint").unsigned().not_null().indexed())
        .property(Property::json("meta"))
        .index(IndexSpec::new("ixAB", ["a", "b"]).unique());

    assert_eq!(plan(&model, &live(&model)), Vec::<String>::new());
    assert!(plan_table(&model, &live(&model)).is_empty());
}

#[test]
fn servers_without_display_widths() {
    let model = ab().property(Property::number("n").unsigned());

    let mut info = live(&model);
    info.columns[0].ty = "int".into();
    info.columns[3].ty = "int unsigned".into();

    assert_eq!(plan(&model, &info), Vec::<String>::new());
}

#[test]
fn charset_is_not_compared() {
    let model = Model::new("Model").property(Property::string("a").charset("latin1"));
    let mut info = live(&model);
    info.columns[1].ty = "varchar(255)".into();

    assert_eq!(plan(&model, &info), Vec::<String>::new());
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[test]
fn removed_property_drops_column() {
    let before = ab();
    let info = live(&before);

    let mut after = before.clone();
    after.properties.shift_remove("b");

    assert_eq!(plan(&after, &info), ["DROP COLUMN `b`"]);
}

#[test]
fn added_property_adds_column() {
    let info = live(&ab());
    let after = ab().property(Property::number("c").not_null());

    assert_eq!(plan(&after, &info), ["ADD COLUMN `c` INT(11) NOT NULL"]);
}

#[test]
fn unsigned_to_signed() {
    let before = Model::new("Model").property(Property::number("a").data_type("bigint").unsigned());
    let info = live(&before);
    let after = Model::new("Model").property(Property::number("a").data_type("bigint"));

    assert_eq!(plan(&after, &info), ["CHANGE COLUMN `a` `a` bigint(20) NULL"]);
}

#[test]
fn disallowing_null() {
    let info = live(&ab());
    let after = Model::new("Model")
        .property(Property::string("a").not_null())
        .property(Property::string("b"));

    assert_eq!(plan(&after, &info), ["CHANGE COLUMN `a` `a` VARCHAR(255) NOT NULL"]);
}

#[test]
fn unset_nullability_defaults_to_null() {
    let before = Model::new("Model").property(Property::string("a").not_null());
    let info = live(&before);

    let after = Model::new("Model").property(Property::string("a"));

    assert_eq!(plan(&after, &info), ["CHANGE COLUMN `a` `a` VARCHAR(255) NULL"]);
}

#[test]
fn longer_varchar() {
    let info = live(&ab());
    let after = Model::new("Model")
        .property(Property::string("a").length(512))
        .property(Property::string("b"));

    assert_eq!(plan(&after, &info), ["CHANGE COLUMN `a` `a` VARCHAR(512) NULL"]);
}

// ---------------------------------------------------------------------------
// Primary key strategy
// ---------------------------------------------------------------------------

#[test]
fn auto_increment_to_uuid() {
    let info = live(&ab());
    let after = ab().primary_key(PrimaryKey::Uuid(UuidVersion::V4));

    assert_eq!(plan(&after, &info), ["CHANGE COLUMN `id` `id` CHAR(36) NOT NULL"]);
}

#[test]
fn uuid_to_auto_increment() {
    let info = live(&ab().primary_key(PrimaryKey::Uuid(UuidVersion::V1)));

    assert_eq!(
        plan(&ab(), &info),
        ["CHANGE COLUMN `id` `id` INT(11) NOT NULL AUTO_INCREMENT"]
    );
}

// ---------------------------------------------------------------------------
// Indexes
// ---------------------------------------------------------------------------

#[test]
fn reordered_index_is_rebuilt() {
    let before = ab().index(IndexSpec::new("ixAB", ["b", "a"]));
    let info = live(&before);
    let after = ab().index(IndexSpec::new("ixAB", ["a", "b"]));

    assert_eq!(
        plan(&after, &info),
        ["DROP INDEX `ixAB`", "ADD INDEX `ixAB` (`a`, `b`)"]
    );
}

#[test]
fn index_with_extra_live_column_is_rebuilt() {
    let before = ab().index(IndexSpec::new("ixAB", ["a", "b"]));
    let info = live(&before);
    let after = ab().index(IndexSpec::new("ixAB", ["a"]));

    assert_eq!(
        plan(&after, &info),
        ["DROP INDEX `ixAB`", "ADD INDEX `ixAB` (`a`)"]
    );
}

#[test]
fn live_rows_are_ordered_by_sequence() {
    let model = ab().index(IndexSpec::new("ixAB", ["a", "b"]));
    let mut info = live(&model);
    info.indexes.reverse();

    assert_eq!(plan(&model, &info), Vec::<String>::new());
}

#[test]
fn disabled_property_index_is_dropped() {
    let before = ab().property(Property::string("c").indexed());
    let info = live(&before);
    let after = ab().property(Property::string("c"));

    assert_eq!(plan(&after, &info), ["DROP INDEX `c`"]);
}

#[test]
fn undeclared_index_is_dropped_and_primary_kept() {
    let mut info = live(&ab());
    info.indexes.push(LiveIndex::new("ixLegacy", 1, "a"));

    assert_eq!(plan(&ab(), &info), ["DROP INDEX `ixLegacy`"]);
}

#[test]
fn index_goes_with_its_dropped_column() {
    let before = ab().property(Property::string("c").indexed());
    let info = live(&before);

    assert_eq!(plan(&ab(), &info), ["DROP COLUMN `c`"]);
}

#[test]
fn index_keeping_a_column_is_dropped_explicitly() {
    let before = ab()
        .property(Property::string("c"))
        .index(IndexSpec::new("ixAC", ["a", "c"]));
    let info = live(&before);

    assert_eq!(plan(&ab(), &info), ["DROP COLUMN `c`", "DROP INDEX `ixAC`"]);
}

#[test]
fn index_kind_change_recreates_index() {
    let before = ab().property(Property::string("c").indexed());
    let info = live(&before);
    let after = ab().property(Property::string("c").index(PropertyIndex::unique()));

    assert_eq!(
        plan(&after, &info),
        ["DROP INDEX `c`", "ADD UNIQUE INDEX `c` (`c`)"]
    );
}

#[test]
fn named_index_losing_uniqueness_is_recreated() {
    let before = ab().index(IndexSpec::new("ixAB", ["a", "b"]).unique());
    let info = live(&before);
    let after = ab().index(IndexSpec::new("ixAB", ["a", "b"]));

    assert_eq!(
        plan(&after, &info),
        ["DROP INDEX `ixAB`", "ADD INDEX `ixAB` (`a`, `b`)"]
    );
}

#[test]
fn index_on_json_property_is_dropped() {
    let model = ab().property(Property::json("meta").indexed());
    let mut info = live(&model);
    info.indexes.push(LiveIndex::new("meta", 1, "meta"));

    assert_eq!(plan(&model, &info), ["DROP INDEX `meta`"]);
}

#[test]
fn new_single_column_indexes() {
    let info = live(&ab());
    let after = Model::new("Model")
        .property(Property::string("a").index(PropertyIndex::unique()))
        .property(Property::string("b").indexed());

    assert_eq!(
        plan(&after, &info),
        ["ADD UNIQUE INDEX `a` (`a`)", "ADD INDEX `b` (`b`)"]
    );
}

#[test]
fn new_multi_column_index_from_column_list() {
    let info = live(&ab());
    let after = ab().index(IndexSpec::from_column_list("ixBA", "b, a"));

    assert_eq!(plan(&after, &info), ["ADD INDEX `ixBA` (`b`, `a`)"]);
}

// ---------------------------------------------------------------------------
// Phase order
// ---------------------------------------------------------------------------

#[test]
fn phases_run_in_order() {
    let before = Model::new("Model")
        .property(Property::string("a"))
        .property(Property::string("gone").indexed())
        .index(IndexSpec::new("ixOld", ["a"]));
    let info = live(&before);

    let after = Model::new("Model")
        .primary_key(PrimaryKey::Uuid(UuidVersion::V4))
        .property(Property::string("a").not_null().indexed())
        .property(Property::string("fresh"))
        .index(IndexSpec::new("ixNew", ["a", "fresh"]));

    assert_eq!(
        plan(&after, &info),
        [
            "CHANGE COLUMN `id` `id` CHAR(36) NOT NULL",
            "ADD COLUMN `fresh` VARCHAR(255) NULL",
            "CHANGE COLUMN `a` `a` VARCHAR(255) NOT NULL",
            "DROP COLUMN `gone`",
            "DROP INDEX `ixOld`",
            "ADD INDEX `a` (`a`)",
            "ADD INDEX `ixNew` (`a`, `fresh`)",
        ]
    );
}

// ---------------------------------------------------------------------------
// Whole table plans
// ---------------------------------------------------------------------------

#[test]
fn missing_table_is_created() {
    let plan = plan_table(&ab(), &TableInfo::missing());
    assert_eq!(plan, TablePlan::Create(CreateTable::new(&ab())));
}

#[test]
fn alter_statement_joins_operations() {
    let info = live(&ab());
    let after = Model::new("Model").property(Property::string("a"));

    let stmt = plan_table(&after, &info).into_statement("Model").unwrap();
    let mut params = Vec::<Value>::new();

    assert_eq!(
        Serializer::mysql().serialize(&stmt, &mut params),
        "ALTER TABLE `Model` DROP COLUMN `b`"
    );

    let after = Model::new("Model").property(Property::string("c"));
    let stmt = plan_table(&after, &info).into_statement("Model").unwrap();
    assert!(matches!(stmt, Statement::AlterTable(_)));
    assert_eq!(
        Serializer::mysql().serialize(&stmt, &mut params),
        "ALTER TABLE `Model` ADD COLUMN `c` VARCHAR(255) NULL,\nDROP COLUMN `a`,\nDROP COLUMN `b`"
    );
}

#[test]
fn up_to_date_table_has_no_statement() {
    assert!(plan_table(&ab(), &live(&ab())).into_statement("Model").is_none());
}
