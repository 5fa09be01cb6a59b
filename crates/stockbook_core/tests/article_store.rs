use stockbook_core::{ArticlePatch, ArticleStore, CategoryFilter, NewArticle, StockLevel};
use uuid::Uuid;

#[test]
fn add_fills_store_defaults() {
    let inventory = Uuid::new_v4();
    let mut store = ArticleStore::new(inventory);

    let id = store.add(NewArticle::named("Bolts"));
    let article = store.get(id).unwrap();

    assert_eq!(article.name, "Bolts");
    assert_eq!(article.quantity, 0);
    assert_eq!(article.min_quantity, 1);
    assert_eq!(article.category, "Uncategorized");
    assert_eq!(article.inventory_id, inventory);
    assert!(article.created_at > 0);
    assert_eq!(article.created_at, article.updated_at);
}

#[test]
fn add_keeps_explicit_fields() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let other_inventory = Uuid::new_v4();

    let id = store.add(NewArticle {
        name: "Hammer".to_string(),
        quantity: Some(4),
        min_quantity: Some(2),
        category: Some("Tools".to_string()),
        inventory_id: Some(other_inventory),
    });
    let article = store.get(id).unwrap();

    assert_eq!(article.quantity, 4);
    assert_eq!(article.min_quantity, 2);
    assert_eq!(article.category, "Tools");
    assert_eq!(article.inventory_id, other_inventory);
}

#[test]
fn explicit_zero_threshold_survives_add() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle {
        name: "Glue".to_string(),
        min_quantity: Some(0),
        ..NewArticle::default()
    });
    assert_eq!(store.get(id).unwrap().min_quantity, 0);
}

#[test]
fn update_merges_patch_and_touches_timestamp() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle {
        name: "Screws".to_string(),
        quantity: Some(10),
        ..NewArticle::default()
    });
    let created_at = store.get(id).unwrap().created_at;

    let changed = store.update(
        id,
        ArticlePatch {
            name: Some("Wood screws".to_string()),
            category: Some("Supplies".to_string()),
            ..ArticlePatch::default()
        },
    );
    assert!(changed);

    let article = store.get(id).unwrap();
    assert_eq!(article.name, "Wood screws");
    assert_eq!(article.category, "Supplies");
    assert_eq!(article.quantity, 10);
    assert_eq!(article.created_at, created_at);
    assert!(article.updated_at >= created_at);
}

#[test]
fn update_unknown_id_is_a_silent_no_op() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.add(NewArticle::named("Bolts"));

    let changed = store.update(Uuid::new_v4(), ArticlePatch::quantity(99));
    assert!(!changed);
    assert_eq!(store.articles()[0].quantity, 0);
}

#[test]
fn remove_reports_whether_something_was_dropped() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle::named("Bolts"));

    assert!(store.remove(id));
    assert!(!store.remove(id));
    assert!(store.is_empty());
}

#[test]
fn remove_by_inventory_only_touches_that_inventory() {
    let kept = Uuid::new_v4();
    let dropped = Uuid::new_v4();
    let mut store = ArticleStore::new(kept);

    store.add(NewArticle::named("Keep me"));
    store.add(NewArticle {
        name: "Drop me".to_string(),
        inventory_id: Some(dropped),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "Drop me too".to_string(),
        inventory_id: Some(dropped),
        ..NewArticle::default()
    });

    assert_eq!(store.remove_by_inventory(dropped), 2);
    assert_eq!(store.len(), 1);
    assert_eq!(store.articles()[0].name, "Keep me");
    assert_eq!(store.remove_by_inventory(dropped), 0);
}

#[test]
fn decrement_clamps_at_zero() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle {
        name: "Bolts".to_string(),
        quantity: Some(2),
        ..NewArticle::default()
    });

    assert!(store.decrement_quantity(id, 5));
    assert_eq!(store.get(id).unwrap().quantity, 0);

    assert!(store.decrement_quantity(id, 1));
    assert_eq!(store.get(id).unwrap().quantity, 0);
}

#[test]
fn increment_saturates_at_max() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle {
        name: "Bolts".to_string(),
        quantity: Some(u32::MAX - 1),
        ..NewArticle::default()
    });

    assert!(store.increment_quantity(id, 10));
    assert_eq!(store.get(id).unwrap().quantity, u32::MAX);
}

#[test]
fn quantity_ops_on_unknown_ids_change_nothing() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.add(NewArticle::named("Bolts"));

    assert!(!store.increment_quantity(Uuid::new_v4(), 1));
    assert!(!store.decrement_quantity(Uuid::new_v4(), 1));
    assert!(!store.set_quantity(Uuid::new_v4(), 7));
    assert_eq!(store.articles()[0].quantity, 0);
}

#[test]
fn filtered_view_ands_search_category_and_inventory() {
    let active = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut store = ArticleStore::new(active);

    store.add(NewArticle {
        name: "Steel bolts".to_string(),
        category: Some("Hardware".to_string()),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "Steel plates".to_string(),
        category: Some("Raw materials".to_string()),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "Steel bolts elsewhere".to_string(),
        category: Some("Hardware".to_string()),
        inventory_id: Some(other),
        ..NewArticle::default()
    });

    store.set_search_term("steel");
    store.set_category_filter(CategoryFilter::Named("Hardware".to_string()));

    let visible: Vec<&str> = store
        .filtered()
        .iter()
        .map(|article| article.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Steel bolts"]);
}

#[test]
fn search_is_case_insensitive_on_both_sides() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.add(NewArticle::named("USB Cable"));

    store.set_search_term("usb");
    assert_eq!(store.filtered().len(), 1);

    store.set_search_term("CABLE");
    assert_eq!(store.filtered().len(), 1);

    store.set_search_term("hdmi");
    assert!(store.filtered().is_empty());
}

#[test]
fn empty_search_term_matches_everything() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.add(NewArticle::named("Bolts"));
    store.add(NewArticle::named("Nuts"));

    store.set_search_term("bolt");
    assert_eq!(store.filtered().len(), 1);

    store.set_search_term("");
    assert_eq!(store.filtered().len(), 2);
}

#[test]
fn filtered_view_stays_fresh_across_mutations() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.set_search_term("bolt");

    let id = store.add(NewArticle::named("Bolts"));
    assert_eq!(store.filtered().len(), 1);

    store.update(
        id,
        ArticlePatch {
            name: Some("Nuts".to_string()),
            ..ArticlePatch::default()
        },
    );
    assert!(store.filtered().is_empty());

    store.update(
        id,
        ArticlePatch {
            name: Some("Carriage bolts".to_string()),
            ..ArticlePatch::default()
        },
    );
    assert_eq!(store.filtered().len(), 1);

    store.remove(id);
    assert!(store.filtered().is_empty());
}

#[test]
fn filtered_equals_a_fresh_manual_filter() {
    let active = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut store = ArticleStore::new(active);
    for (name, category, inventory) in [
        ("Steel bolts", "Hardware", None),
        ("Brass bolts", "Hardware", None),
        ("Steel sheet", "Raw materials", None),
        ("Steel bolts spare", "Hardware", Some(other)),
    ] {
        store.add(NewArticle {
            name: name.to_string(),
            category: Some(category.to_string()),
            inventory_id: inventory,
            ..NewArticle::default()
        });
    }
    store.set_search_term("Steel");
    store.set_category_filter(CategoryFilter::Named("Hardware".to_string()));

    let manual: Vec<_> = store
        .articles()
        .iter()
        .filter(|article| {
            article.name.to_lowercase().contains("steel")
                && article.category == "Hardware"
                && article.inventory_id == active
        })
        .cloned()
        .collect();
    assert_eq!(store.filtered(), manual.as_slice());
}

#[test]
fn switching_active_inventory_refilters() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let mut store = ArticleStore::new(first);

    store.add(NewArticle::named("In first"));
    store.add(NewArticle {
        name: "In second".to_string(),
        inventory_id: Some(second),
        ..NewArticle::default()
    });

    assert_eq!(store.filtered()[0].name, "In first");

    store.set_active_inventory(second);
    assert_eq!(store.filtered()[0].name, "In second");
}

#[test]
fn low_stock_is_scoped_to_the_active_inventory() {
    let active = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut store = ArticleStore::new(active);

    store.add(NewArticle {
        name: "At threshold".to_string(),
        quantity: Some(5),
        min_quantity: Some(5),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "Healthy".to_string(),
        quantity: Some(9),
        min_quantity: Some(5),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "Low but elsewhere".to_string(),
        quantity: Some(0),
        min_quantity: Some(5),
        inventory_id: Some(other),
        ..NewArticle::default()
    });

    let low: Vec<&str> = store
        .low_stock()
        .iter()
        .map(|article| article.name.as_str())
        .collect();
    assert_eq!(low, vec!["At threshold"]);
}

#[test]
fn low_stock_ignores_the_session_filters() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    store.add(NewArticle {
        name: "Empty bin".to_string(),
        quantity: Some(0),
        min_quantity: Some(3),
        ..NewArticle::default()
    });

    store.set_search_term("no such article");
    assert!(store.filtered().is_empty());
    assert_eq!(store.low_stock().len(), 1);
}

#[test]
fn an_article_added_below_its_threshold_alerts_at_once() {
    let inventory = Uuid::new_v4();
    let mut store = ArticleStore::new(inventory);

    // The store accepts any quantity pair; only forms reject min > quantity.
    let id = store.add(NewArticle {
        name: "bolt".to_string(),
        quantity: Some(3),
        min_quantity: Some(5),
        ..NewArticle::default()
    });

    assert_eq!(store.get(id).unwrap().inventory_id, inventory);
    let low: Vec<_> = store.low_stock().iter().map(|article| article.id).collect();
    assert_eq!(low, vec![id]);
}

#[test]
fn used_category_names_dedupe_in_first_use_order() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    for category in ["Tools", "Supplies", "Tools", "Hardware"] {
        store.add(NewArticle {
            name: format!("{category} item"),
            category: Some(category.to_string()),
            ..NewArticle::default()
        });
    }

    assert_eq!(
        store.used_category_names(),
        vec!["Tools", "Supplies", "Hardware"]
    );
}

#[test]
fn counts_span_all_inventories() {
    let active = Uuid::new_v4();
    let other = Uuid::new_v4();
    let mut store = ArticleStore::new(active);

    store.add(NewArticle {
        name: "Here".to_string(),
        category: Some("Tools".to_string()),
        ..NewArticle::default()
    });
    store.add(NewArticle {
        name: "There".to_string(),
        category: Some("Tools".to_string()),
        inventory_id: Some(other),
        ..NewArticle::default()
    });

    assert_eq!(store.count_in_category("Tools"), 2);
    assert_eq!(store.count_in_inventory(active), 1);
    assert_eq!(store.count_in_inventory(other), 1);
    assert_eq!(store.count_in_inventory(Uuid::new_v4()), 0);
}

#[test]
fn stock_level_tracks_quantity_bands() {
    let mut store = ArticleStore::new(Uuid::new_v4());
    let id = store.add(NewArticle {
        name: "Bolts".to_string(),
        quantity: Some(3),
        ..NewArticle::default()
    });

    assert_eq!(store.get(id).unwrap().stock_level(), StockLevel::Critical);
    store.set_quantity(id, 8);
    assert_eq!(store.get(id).unwrap().stock_level(), StockLevel::Low);
    store.set_quantity(id, 30);
    assert_eq!(store.get(id).unwrap().stock_level(), StockLevel::Normal);
    store.set_quantity(id, 80);
    assert_eq!(store.get(id).unwrap().stock_level(), StockLevel::High);
}
