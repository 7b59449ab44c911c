mod support;

use mortar::{
    filter::Op,
    schema::{PrimaryKey, UuidVersion},
    Config, Db, Filter, Model, Property, Query, Record, Registry, UpdateSpec, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use support::{row, FakeChannel};

fn registry() -> Registry {
    let mut registry = Registry::new();

    registry
        .register(
            Model::new("Post")
                .table("posts")
                .property(Property::string("title"))
                .property(Property::number("order"))
                .property(Property::boolean("published"))
                .property(Property::json("meta")),
        )
        .unwrap();

    registry
        .register(
            Model::new("Token")
                .primary_key(PrimaryKey::Uuid(UuidVersion::V4))
                .property(Property::string("owner")),
        )
        .unwrap();

    registry
}

fn db() -> (Db, Arc<FakeChannel>) {
    let channel = Arc::new(FakeChannel::default());
    let db = Db::new(registry(), channel.clone(), Config::new().database("blog"));
    (db, channel)
}

fn record<const N: usize>(fields: [(&str, Value); N]) -> Record {
    row(fields)
}

// ---------------------------------------------------------------------------
// create / update_or_create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_the_server_id() {
    let (db, channel) = db();
    channel.last_insert_id(42);

    let id = db
        .create(
            "Post",
            record([
                ("title", Value::from("hello")),
                ("published", Value::Bool(true)),
                ("meta", Value::Json(json!({"tags": ["a"]}))),
            ]),
        )
        .await
        .unwrap();

    assert_eq!(id, Value::U64(42));
    assert_eq!(
        channel.statements(),
        ["INSERT INTO `posts` (`title`, `published`, `meta`) VALUES (?, ?, ?)"]
    );
    assert_eq!(
        channel.params()[0],
        [
            Value::from("hello"),
            Value::I64(1),
            Value::from(r#"{"tags":["a"]}"#)
        ]
    );
}

#[tokio::test]
async fn create_drops_null_auto_increment_id() {
    let (db, channel) = db();
    channel.last_insert_id(7);

    db.create(
        "Post",
        record([("id", Value::Null), ("title", Value::from("x"))]),
    )
    .await
    .unwrap();

    assert_eq!(
        channel.statements(),
        ["INSERT INTO `posts` (`title`) VALUES (?)"]
    );
}

#[tokio::test]
async fn create_generates_uuid() {
    let (db, channel) = db();

    let id = db
        .create("Token", record([("owner", Value::from("ann"))]))
        .await
        .unwrap();

    let id = id.as_str().unwrap().to_string();
    assert_eq!(id.len(), 36);
    assert_eq!(
        channel.statements(),
        ["INSERT INTO `Token` (`owner`, `id`) VALUES (?, ?)"]
    );
    assert_eq!(channel.params()[0][1], Value::String(id));
}

#[tokio::test]
async fn create_keeps_given_id() {
    let (db, _) = db();

    let id = db
        .create(
            "Token",
            record([("id", Value::from("fixed")), ("owner", Value::from("ann"))]),
        )
        .await
        .unwrap();

    assert_eq!(id, Value::from("fixed"));
}

#[tokio::test]
async fn create_rejects_unknown_fields() {
    let (db, channel) = db();

    let err = db
        .create("Post", record([("titel", Value::from("x"))]))
        .await
        .unwrap_err();

    assert!(err.is_unknown_field());
    assert!(channel.statements().is_empty());
}

#[tokio::test]
async fn create_rejects_objects_for_scalar_properties() {
    let (db, _) = db();

    let err = db
        .create("Post", record([("title", Value::Json(json!({"a": 1})))]))
        .await
        .unwrap_err();

    assert!(err.is_invalid_value());
}

#[tokio::test]
async fn update_or_create_upserts() {
    let (db, channel) = db();

    db.update_or_create(
        "Post",
        record([("id", Value::I64(3)), ("title", Value::from("x"))]),
    )
    .await
    .unwrap();

    assert_eq!(
        channel.statements(),
        ["INSERT INTO `posts` (`id`, `title`) VALUES (?, ?) ON DUPLICATE KEY UPDATE `title` = ?"]
    );
}

// ---------------------------------------------------------------------------
// save / update_attributes / update
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_updates_by_id() {
    let (db, channel) = db();

    db.save(
        "Post",
        record([("id", Value::I64(3)), ("title", Value::from("x"))]),
    )
    .await
    .unwrap();

    assert_eq!(
        channel.statements(),
        ["UPDATE `posts` SET `title` = ? WHERE `id` = ?"]
    );
    assert_eq!(channel.params()[0], [Value::from("x"), Value::I64(3)]);
}

#[tokio::test]
async fn save_requires_id() {
    let (db, _) = db();

    let err = db
        .save("Post", record([("title", Value::from("x"))]))
        .await
        .unwrap_err();

    assert!(err.is_missing_argument());
}

#[tokio::test]
async fn update_attributes() {
    let (db, channel) = db();

    db.update_attributes("Post", Value::I64(9), record([("order", Value::I64(2))]))
        .await
        .unwrap();

    assert_eq!(
        channel.statements(),
        ["UPDATE `posts` SET `order` = ? WHERE `id` = ?"]
    );
}

#[tokio::test]
async fn update_with_filter() {
    let (db, channel) = db();
    channel.affected_rows(4);

    let filter = Filter::from_json(&json!({"order": {"gt": 2}})).unwrap();
    let affected = db
        .update(
            "Post",
            UpdateSpec::new(filter, record([("published", Value::Bool(false))])),
        )
        .await
        .unwrap();

    assert_eq!(affected, 4);
    assert_eq!(
        channel.statements(),
        ["UPDATE `posts` SET `published` = ? WHERE `order` > ?"]
    );
    assert_eq!(channel.params()[0], [Value::I64(0), Value::I64(2)]);
}

#[tokio::test]
async fn update_requires_filter_and_values() {
    let (db, _) = db();

    let err = db
        .update(
            "Post",
            UpdateSpec {
                filter: None,
                update: Some(record([("title", Value::from("x"))])),
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_missing_argument());

    let err = db
        .update(
            "Post",
            UpdateSpec {
                filter: Some(Filter::new()),
                update: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_missing_argument());
}

#[tokio::test]
async fn update_all_runs_every_spec() {
    let (db, channel) = db();
    channel.affected_rows(1);

    let specs = vec![
        UpdateSpec::new(
            Filter::new().eq("order", 1),
            record([("title", Value::from("a"))]),
        ),
        UpdateSpec::new(
            Filter::new().eq("order", 2),
            record([("title", Value::from("b"))]),
        ),
    ];

    assert_eq!(db.update_all("Post", specs).await.unwrap(), [1, 1]);
    assert_eq!(channel.statements().len(), 2);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_casts_rows_back() {
    let (db, channel) = db();
    channel.push_rows(vec![row([
        ("id", Value::I64(1)),
        ("title", Value::from("hello")),
        ("order", Value::from("3")),
        ("published", Value::I64(1)),
        ("meta", Value::from(r#"{"a":1}"#)),
    ])]);

    let post = db.find("Post", Value::I64(1)).await.unwrap().unwrap();

    assert_eq!(
        channel.statements(),
        ["SELECT * FROM `posts` WHERE `id` = ? LIMIT 1"]
    );
    assert_eq!(post["order"], Value::I64(3));
    assert_eq!(post["published"], Value::Bool(true));
    assert_eq!(post["meta"], Value::Json(json!({"a": 1})));
}

#[tokio::test]
async fn find_nothing() {
    let (db, _) = db();
    assert_eq!(db.find("Post", Value::I64(1)).await.unwrap(), None);
}

#[tokio::test]
async fn find_requires_id() {
    let (db, _) = db();

    let err = db.find("Post", Value::Null).await.unwrap_err();
    assert!(err.is_missing_argument());
}

#[tokio::test]
async fn exists() {
    let (db, channel) = db();
    channel.push_rows(vec![row([("found", Value::from("1"))])]);

    assert!(db.exists("Post", Value::I64(1)).await.unwrap());
    assert!(!db.exists("Post", Value::I64(2)).await.unwrap());
    assert_eq!(
        channel.statements()[0],
        "SELECT 1 as found FROM `posts` WHERE `id` = ? LIMIT 1"
    );
}

#[tokio::test]
async fn all_with_query() {
    let (db, channel) = db();

    let query = Query::from_json(&json!({
        "fields": ["id", "title"],
        "where": {"order": {"inq": [4, 6]}},
        "order": "order DESC",
        "limit": 10,
        "offset": 5,
    }))
    .unwrap();

    db.all("Post", &query).await.unwrap();

    assert_eq!(
        channel.statements(),
        ["SELECT `id`, `title` FROM `posts` WHERE `order` IN (?, ?) ORDER BY `order` DESC LIMIT 5, 10"]
    );
    assert_eq!(channel.params()[0], [Value::I64(4), Value::I64(6)]);
}

#[tokio::test]
async fn all_checks_fields() {
    let (db, channel) = db();

    let query = Query::new().fields(["nope"]);
    assert!(db.all("Post", &query).await.unwrap_err().is_unknown_field());

    let query = Query::new().order("nope DESC").unwrap();
    assert!(db.all("Post", &query).await.unwrap_err().is_unknown_field());

    assert!(channel.statements().is_empty());
}

#[tokio::test]
async fn all_without_arguments() {
    let (db, channel) = db();

    db.all("Post", &Query::new()).await.unwrap();
    assert_eq!(channel.statements(), ["SELECT * FROM `posts`"]);
}

#[tokio::test]
async fn count_reads_text_counts() {
    let (db, channel) = db();
    channel.push_rows(vec![row([("cnt", Value::from("12"))])]);
    channel.push_rows(vec![row([("cnt", Value::I64(2))])]);

    assert_eq!(db.count("Post", None).await.unwrap(), 12);

    let filter = Filter::new().op("order", Op::Between(Value::I64(1), Value::I64(5)));
    assert_eq!(db.count("Post", Some(&filter)).await.unwrap(), 2);

    assert_eq!(
        channel.statements(),
        [
            "SELECT count(*) as cnt FROM `posts`",
            "SELECT count(*) as cnt FROM `posts` WHERE `order` BETWEEN ? AND ?",
        ]
    );
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn destroy() {
    let (db, channel) = db();
    channel.affected_rows(1);

    assert!(db.destroy("Post", Value::I64(1)).await.unwrap());
    assert_eq!(
        channel.statements(),
        ["DELETE FROM `posts` WHERE `id` = ?"]
    );
}

#[tokio::test]
async fn destroy_all() {
    let (db, channel) = db();
    channel.affected_rows(3);

    assert_eq!(db.destroy_all("Post", None).await.unwrap(), 3);

    let filter = Filter::new().is_null("title");
    db.destroy_all("Post", Some(&filter)).await.unwrap();

    assert_eq!(
        channel.statements(),
        [
            "DELETE FROM `posts`",
            "DELETE FROM `posts` WHERE `title` IS NULL"
        ]
    );
}

#[tokio::test]
async fn unknown_model() {
    let (db, _) = db();

    let err = db.count("Comment", None).await.unwrap_err();
    assert!(err.is_unknown_model());
}
