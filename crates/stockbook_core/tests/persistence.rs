use rusqlite::Connection;
use serde_json::Value;
use stockbook_core::{
    App, AppError, ArticleForm, CategoryFilter, CategoryForm, InventoryForm, StorageError,
};
use std::path::Path;
use uuid::Uuid;

#[test]
fn fresh_open_seeds_and_persists_all_three_stores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        let app = App::open(&path).unwrap();
        assert_eq!(app.inventories().len(), 1);
        assert_eq!(app.categories().len(), 5);
        assert!(app.articles().is_empty());
    }

    let conn = Connection::open(&path).unwrap();
    let mut keys: Vec<String> = conn
        .prepare("SELECT store_key FROM store_state ORDER BY store_key;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    keys.sort();
    assert_eq!(keys, vec!["articles", "categories", "inventories"]);

    let categories = payload(&path, "categories");
    assert_eq!(categories["categories"].as_array().unwrap().len(), 5);
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    let article_id;
    {
        let mut app = App::open(&path).unwrap();
        app.create_category(&CategoryForm {
            name: "Electronics".to_string(),
            ..CategoryForm::default()
        })
        .unwrap();
        article_id = app
            .create_article(&ArticleForm {
                name: "USB cable".to_string(),
                quantity: Some(12),
                min_quantity: Some(3),
                category: Some("Electronics".to_string()),
                ..ArticleForm::default()
            })
            .unwrap();
    }

    let app = App::open(&path).unwrap();
    assert!(app.categories().find_by_name("Electronics").is_some());

    let article = app.articles().get(article_id).unwrap();
    assert_eq!(article.name, "USB cable");
    assert_eq!(article.quantity, 12);
    assert_eq!(article.min_quantity, 3);
    assert_eq!(article.category, "Electronics");
}

#[test]
fn active_pointer_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    let second;
    {
        let mut app = App::open(&path).unwrap();
        second = app
            .create_inventory(&InventoryForm {
                name: "Workshop".to_string(),
                description: String::new(),
            })
            .unwrap();
        app.set_active_inventory(second).unwrap();
    }

    let app = App::open(&path).unwrap();
    assert_eq!(app.inventories().active_id(), second);
    assert_eq!(app.articles().active_inventory(), second);
}

#[test]
fn session_filters_reset_on_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        let mut app = App::open(&path).unwrap();
        app.create_article(&ArticleForm {
            name: "Bolts".to_string(),
            quantity: Some(1),
            min_quantity: Some(1),
            ..ArticleForm::default()
        })
        .unwrap();
        app.set_search_term("bolts");
        app.set_category_filter(CategoryFilter::Named("Uncategorized".to_string()));
    }

    let articles = payload(&path, "articles");
    assert!(articles.get("search_term").is_none());
    assert!(articles.get("category_filter").is_none());

    let app = App::open(&path).unwrap();
    assert_eq!(app.articles().search_term(), "");
    assert_eq!(app.articles().category_filter(), &CategoryFilter::All);
    assert_eq!(app.articles().filtered().len(), 1);
}

#[test]
fn article_payload_shape_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        let mut app = App::open(&path).unwrap();
        app.create_article(&ArticleForm {
            name: "Bolts".to_string(),
            quantity: Some(2),
            min_quantity: Some(1),
            ..ArticleForm::default()
        })
        .unwrap();
    }

    let root = payload(&path, "articles");
    let object = root.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert!(object.contains_key("articles"));
    assert!(object.contains_key("active_inventory"));

    let article = &root["articles"][0];
    for key in [
        "id",
        "name",
        "quantity",
        "min_quantity",
        "category",
        "inventory_id",
        "created_at",
        "updated_at",
    ] {
        assert!(article.get(key).is_some(), "missing article key `{key}`");
    }
}

#[test]
fn unknown_payload_fields_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        App::open(&path).unwrap();
    }

    let mut categories = payload(&path, "categories");
    categories["legacy_field"] = Value::from("kept by an older build");
    categories["categories"][0]["sort_hint"] = Value::from(7);
    write_payload(&path, "categories", &categories);

    let app = App::open(&path).unwrap();
    assert_eq!(app.categories().len(), 5);
}

#[test]
fn corrupt_payload_surfaces_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        App::open(&path).unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "UPDATE store_state SET payload = 'not json at all' WHERE store_key = 'articles';",
        [],
    )
    .unwrap();
    drop(conn);

    let err = App::open(&path).unwrap_err();
    assert!(matches!(
        err,
        AppError::Storage(StorageError::Decode {
            store_key: "articles",
            ..
        })
    ));
}

#[test]
fn article_mirror_is_reconciled_with_the_authoritative_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        let mut app = App::open(&path).unwrap();
        app.create_article(&ArticleForm {
            name: "Bolts".to_string(),
            quantity: Some(1),
            min_quantity: Some(1),
            ..ArticleForm::default()
        })
        .unwrap();
    }

    let mut articles = payload(&path, "articles");
    articles["active_inventory"] = Value::from(Uuid::new_v4().to_string());
    write_payload(&path, "articles", &articles);

    let authoritative;
    {
        let app = App::open(&path).unwrap();
        authoritative = app.inventories().active_id();
        assert_eq!(app.articles().active_inventory(), authoritative);
    }

    // The healed mirror is written back, not just held in memory.
    let reloaded = payload(&path, "articles");
    assert_eq!(
        reloaded["active_inventory"].as_str().unwrap(),
        authoritative.to_string()
    );
}

#[test]
fn quantity_changes_persist_without_an_explicit_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    let id;
    {
        let mut app = App::open(&path).unwrap();
        id = app
            .create_article(&ArticleForm {
                name: "Bolts".to_string(),
                quantity: Some(5),
                min_quantity: Some(1),
                ..ArticleForm::default()
            })
            .unwrap();
        app.increment_quantity(id, 3).unwrap();
        app.decrement_quantity(id, 1).unwrap();
    }

    let app = App::open(&path).unwrap();
    assert_eq!(app.articles().get(id).unwrap().quantity, 7);
}

#[test]
fn an_emptied_category_catalog_stays_empty_on_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stockbook.db");

    {
        let mut app = App::open(&path).unwrap();
        let ids: Vec<_> = app.categories().categories().iter().map(|c| c.id).collect();
        for id in ids {
            app.delete_category(id).unwrap();
        }
        assert!(app.categories().is_empty());
    }

    // A present-but-empty row is a legitimate state, not a seeding trigger.
    let app = App::open(&path).unwrap();
    assert!(app.categories().is_empty());
}

fn payload(path: &Path, store_key: &str) -> Value {
    let conn = Connection::open(path).unwrap();
    let text: String = conn
        .query_row(
            "SELECT payload FROM store_state WHERE store_key = ?1;",
            [store_key],
            |row| row.get(0),
        )
        .unwrap();
    serde_json::from_str(&text).unwrap()
}

fn write_payload(path: &Path, store_key: &str, value: &Value) {
    let conn = Connection::open(path).unwrap();
    conn.execute(
        "UPDATE store_state SET payload = ?2 WHERE store_key = ?1;",
        rusqlite::params![store_key, value.to_string()],
    )
    .unwrap();
}
