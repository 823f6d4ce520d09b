use std::path::Path;
use std::sync::Arc;

use alpha_pagination::{
    AlphaPagination, AlphabetProvider, CacheBackend, FileCache, ItemContent, MemoryCache,
    NumericMode, PaginationError, PaginationOptions, Position, Services, SqliteDatabase,
};
use alpha_pagination_protocol::{
    CapturedQuery, HandlerConfig, HandlerRef, HandlerType, QueryArgument, StaticViewRegistry,
    Value, ViewState, AREA_PLUGIN_ID,
};
use pretty_assertions::assert_eq;

fn glossary_db() -> SqliteDatabase {
    let db = SqliteDatabase::open_in_memory().expect("sqlite");
    db.execute_batch(
        "CREATE TABLE node (nid INTEGER PRIMARY KEY, type TEXT, title TEXT);
         INSERT INTO node VALUES
            (1, 'page', 'apple'),
            (2, 'page', 'Avocado'),
            (3, 'page', 'mango'),
            (4, 'page', '3 musketeers'),
            (5, 'article', 'zebra');",
    )
    .expect("fixtures");
    db
}

fn area_ref() -> HandlerRef {
    HandlerRef {
        view_id: "glossary".to_string(),
        display_id: "page".to_string(),
        handler_type: HandlerType::Header,
        field_id: "alpha_pagination".to_string(),
        langcode: "en".to_string(),
    }
}

fn glossary_view(options: PaginationOptions, args: &[&str]) -> ViewState {
    ViewState {
        view_id: "glossary".to_string(),
        display_id: "page".to_string(),
        base_table: "node".to_string(),
        base_field: "nid".to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        path: Some("glossary".to_string()),
        current_path: "glossary".to_string(),
        build_info: Some(
            CapturedQuery::new(
                "SELECT node.nid AS nid\nFROM node node\nWHERE node.type = :type\nLIMIT 2",
            )
            .with_argument(":type", QueryArgument::Single(Value::from("page"))),
        ),
        handlers: vec![HandlerConfig {
            id: "alpha_pagination".to_string(),
            handler_type: HandlerType::Header,
            plugin: AREA_PLUGIN_ID.to_string(),
            options,
        }],
        ..Default::default()
    }
}

fn services(db: &SqliteDatabase, cache: Arc<MemoryCache>) -> Services<'_> {
    let backend: Arc<dyn CacheBackend> = cache;
    Services {
        alphabets: Arc::new(AlphabetProvider::new(backend.clone())),
        cache: backend,
        db,
    }
}

fn numeric_options() -> PaginationOptions {
    PaginationOptions {
        numbers: NumericMode::Individual,
        numeric_divider: false,
        numeric_hide_empty: false,
        all_display: false,
        ..Default::default()
    }
}

fn enabled(pagination: &AlphaPagination<'_>) -> Vec<String> {
    pagination
        .characters()
        .unwrap()
        .iter()
        .filter(|c| c.has_results())
        .map(|c| c.value().to_string())
        .collect()
}

#[test]
fn empty_entries_are_dropped_without_toggle() {
    let db = glossary_db();
    let options = PaginationOptions {
        toggle_empty: false,
        ..numeric_options()
    };
    let pagination = AlphaPagination::new(
        glossary_view(options, &[]),
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );

    let values: Vec<&str> = pagination.characters().unwrap().values().collect();
    assert_eq!(values, vec!["3", "A", "M"]);
    assert_eq!(enabled(&pagination), vec!["3", "A", "M"]);
}

#[test]
fn every_entry_shows_with_toggle() {
    let db = glossary_db();
    let pagination = AlphaPagination::new(
        glossary_view(numeric_options(), &[]),
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );

    let characters = pagination.characters().unwrap();
    assert_eq!(characters.len(), 36);
    let values: Vec<&str> = characters.values().collect();
    assert_eq!(&values[..11], &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "A"]);
    assert_eq!(values[35], "Z");
    assert_eq!(enabled(&pagination), vec!["3", "A", "M"]);
    assert!(characters.active().is_none());
}

#[test]
fn cache_hit_matches_cache_miss() {
    let db = glossary_db();
    let cache = Arc::new(MemoryCache::default());
    let options = numeric_options();

    let first = AlphaPagination::new(
        glossary_view(options.clone(), &[]),
        area_ref(),
        services(&db, cache.clone()),
    );
    let built = first.characters().unwrap().clone();

    // A second request is served from the cache, not the database.
    db.execute_batch("DELETE FROM node").unwrap();
    let mut second = AlphaPagination::new(
        glossary_view(options, &[]),
        area_ref(),
        services(&db, cache.clone()),
    );
    assert_eq!(first.cid().unwrap(), second.cid().unwrap());
    assert_eq!(second.characters().unwrap(), &built);

    second.invalidate().unwrap();
    assert!(enabled(&second).is_empty());
    assert_eq!(second.characters().unwrap().len(), 36);
}

#[test]
fn cache_id_tracks_options_and_query() {
    let db = glossary_db();
    let cache = Arc::new(MemoryCache::default());
    let base = AlphaPagination::new(
        glossary_view(PaginationOptions::default(), &[]),
        area_ref(),
        services(&db, cache.clone()),
    );
    let relabeled = AlphaPagination::new(
        glossary_view(
            PaginationOptions {
                all_label: "Everything".to_string(),
                ..Default::default()
            },
            &[],
        ),
        area_ref(),
        services(&db, cache.clone()),
    );
    let mut other_query = glossary_view(PaginationOptions::default(), &[]);
    other_query.build_info = Some(CapturedQuery::new("SELECT nid FROM node"));
    let requeried = AlphaPagination::new(other_query, area_ref(), services(&db, cache.clone()));

    let cid = base.cid().unwrap();
    assert!(cid.starts_with("alpha_pagination:"));
    assert_ne!(cid, relabeled.cid().unwrap());
    assert_ne!(cid, requeried.cid().unwrap());

    // Only the row limit differs, so both pages share one entry.
    let mut next_page = glossary_view(PaginationOptions::default(), &[]);
    if let Some(query) = next_page.build_info.as_mut() {
        query.sql = query.sql.replace("LIMIT 2", "LIMIT 2 OFFSET 2");
    }
    let paged = AlphaPagination::new(next_page, area_ref(), services(&db, cache));
    assert_eq!(cid, paged.cid().unwrap());
}

#[test]
fn last_argument_selects_the_active_character() {
    let db = glossary_db();
    let cache = Arc::new(MemoryCache::default());

    let selected = AlphaPagination::new(
        glossary_view(PaginationOptions::default(), &["page", "M"]),
        area_ref(),
        services(&db, cache.clone()),
    );
    let active = selected.characters().unwrap().active().unwrap();
    assert_eq!(active.value(), "M");

    // Same cache entry, different request: "all" is the fallback.
    let unselected = AlphaPagination::new(
        glossary_view(PaginationOptions::default(), &["Q!"]),
        area_ref(),
        services(&db, cache),
    );
    assert_eq!(selected.cid().unwrap(), unselected.cid().unwrap());
    let active = unselected.characters().unwrap().active().unwrap();
    assert_eq!(active.value(), "all");
    assert!(active.is_all());
}

#[test]
fn single_label_mode_resolves_digits_to_the_sentinel() {
    let db = glossary_db();
    let options = PaginationOptions {
        numbers: NumericMode::SingleLabel,
        numeric_value: "num".to_string(),
        numeric_label: "#".to_string(),
        numeric_position: Position::After,
        ..Default::default()
    };
    let pagination = AlphaPagination::new(
        glossary_view(options, &[]),
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );

    assert_eq!(pagination.label("7").unwrap(), "#");
    assert_eq!(pagination.label("Z").unwrap(), "Z");
    assert_eq!(pagination.label("not-a-character").unwrap(), "not-a-character");
    assert_eq!(pagination.value("7").unwrap(), "num");
    assert_eq!(pagination.value("A").unwrap(), "A");
    assert!(pagination.is_numeric("num").unwrap());
    assert!(!pagination.is_numeric("A").unwrap());

    let values: Vec<&str> = pagination.characters().unwrap().values().collect();
    assert_eq!(values[25], "Z");
    assert_eq!(values[26], "num");
    assert_eq!(values[27], "all");
    assert!(pagination.characters().unwrap().get("num").unwrap().has_results());
}

#[test]
fn renders_links_and_inactive_entries() {
    let db = glossary_db();
    let mut view = glossary_view(PaginationOptions::default(), &["A"]);
    view.query_parameters
        .insert("sort".to_string(), "asc".to_string());
    let pagination = AlphaPagination::new(
        view,
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );

    assert_eq!(pagination.url().unwrap(), "glossary");
    let list = pagination.render().unwrap();
    assert!(list.wrapper.has_class("alpha-pagination"));
    assert!(list.list.has_class("alpha-pagination-list"));
    assert_eq!(list.items.len(), 27);

    let a = &list.items[0];
    assert!(a.wrapper.has_class("active"));
    assert_eq!(a.content, ItemContent::Inactive { label: "A".to_string() });

    let b = &list.items[1];
    assert!(b.wrapper.has_class("inactive"));
    assert!(!b.is_link());

    match &list.items[12].content {
        ItemContent::Link(link) => {
            assert_eq!(link.label, "M");
            assert_eq!(link.path, "glossary/M");
            assert_eq!(link.href, "/glossary/M?sort=asc");
            assert!(!link.external);
        }
        other => panic!("expected a link, got {other:?}"),
    }

    let all = &list.items[26];
    assert!(all.wrapper.has_class("all"));
    assert!(all.is_link());

    let html = list.to_html();
    assert!(html.starts_with("<div class=\"alpha-pagination\"><ul class=\"alpha-pagination-list\">"));
    assert!(html.contains("<li class=\"active\"><span>A</span></li>"));
    assert!(html.contains("<a href=\"/glossary/M?sort=asc\">M</a>"));
}

#[test]
fn link_options_shape_the_links() {
    let db = glossary_db();
    let options = PaginationOptions {
        link_path: "#[alpha_pagination:value]".to_string(),
        link_class: "letter jump".to_string(),
        link_attributes: "title|Jump to [alpha_pagination:value],class|ignored".to_string(),
        ..Default::default()
    };
    let pagination = AlphaPagination::new(
        glossary_view(options, &[]),
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );

    let list = pagination.render().unwrap();
    let link = match &list.items[0].content {
        ItemContent::Link(link) => link.clone(),
        other => panic!("expected a link, got {other:?}"),
    };
    assert_eq!(link.href, "#A");
    assert!(link.external);
    assert_eq!(link.attributes.classes, vec!["letter", "jump"]);
    assert_eq!(
        link.attributes.others.get("title").map(String::as_str),
        Some("Jump to A")
    );
    assert!(!link.attributes.others.contains_key("class"));

    let heading = pagination.group("<a href=\"/node/3\">mango</a>").unwrap().unwrap();
    assert_eq!(heading.value, "M");
    assert_eq!(heading.label, "M");
    assert_eq!(heading.anchor.as_deref(), Some("M"));
    assert_eq!(heading.to_html(), "<a name=\"M\"></a>M");
}

#[test]
fn group_field_takes_options_from_the_area() {
    let db = glossary_db();
    let mut view = glossary_view(PaginationOptions::default(), &[]);
    view.handlers.push(HandlerConfig {
        id: "alpha_group".to_string(),
        handler_type: HandlerType::Field,
        plugin: "alpha_pagination_group".to_string(),
        options: PaginationOptions {
            all_label: "ignored".to_string(),
            ..Default::default()
        },
    });
    let field = HandlerRef {
        handler_type: HandlerType::Field,
        field_id: "alpha_group".to_string(),
        ..area_ref()
    };
    let pagination = AlphaPagination::new(
        view,
        field,
        services(&db, Arc::new(MemoryCache::default())),
    );

    assert_eq!(pagination.options().all_label, "All");
    let heading = pagination.group("apple").unwrap().unwrap();
    assert_eq!(heading.value, "A");
    assert!(heading.anchor.is_none());
    assert!(pagination.validate().unwrap().is_empty());
}

#[test]
fn resolves_handlers_through_the_registry() {
    let db = glossary_db();
    let mut registry = StaticViewRegistry::new();
    registry.insert(glossary_view(PaginationOptions::default(), &[]));

    let pagination = AlphaPagination::resolve(
        area_ref(),
        &registry,
        services(&db, Arc::new(MemoryCache::default())),
    )
    .unwrap();
    assert_eq!(pagination.view().base_table, "node");
    assert_eq!(pagination.ui_name(), "Alpha Pagination");

    let missing = HandlerRef {
        display_id: "block".to_string(),
        ..area_ref()
    };
    let err = AlphaPagination::resolve(
        missing,
        &registry,
        services(&db, Arc::new(MemoryCache::default())),
    )
    .err()
    .unwrap();
    assert!(matches!(err, PaginationError::ViewNotFound(_)));
}

#[test]
fn validation_reports_colliding_values() {
    let db = glossary_db();
    let options = PaginationOptions {
        all_value: "A".to_string(),
        ..Default::default()
    };
    let pagination = AlphaPagination::new(
        glossary_view(options, &[]),
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );
    let messages = pagination.validate().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("\"A\""));
}

#[test]
fn database_errors_propagate() {
    let db = glossary_db();
    let mut view = glossary_view(PaginationOptions::default(), &[]);
    view.build_info = Some(CapturedQuery::new("SELECT nid FROM missing_table"));
    let pagination = AlphaPagination::new(
        view,
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );
    assert!(matches!(
        pagination.characters(),
        Err(PaginationError::QueryError(_))
    ));
}

#[test]
fn missing_query_renders_a_disabled_index() {
    let db = glossary_db();
    let mut view = glossary_view(PaginationOptions::default(), &[]);
    view.build_info = None;
    let pagination = AlphaPagination::new(
        view,
        area_ref(),
        services(&db, Arc::new(MemoryCache::default())),
    );
    assert!(enabled(&pagination).is_empty());
    assert_eq!(pagination.characters().unwrap().len(), 27);
}

fn file_services<'a>(dir: &Path, db: &'a SqliteDatabase) -> Services<'a> {
    let backend: Arc<dyn CacheBackend> = Arc::new(FileCache::new(dir));
    Services {
        alphabets: Arc::new(AlphabetProvider::new(backend.clone())),
        cache: backend,
        db,
    }
}

#[test]
fn file_cache_serves_later_processes() {
    let temp = tempfile::tempdir().unwrap();
    let db = glossary_db();

    let first = AlphaPagination::new(
        glossary_view(numeric_options(), &[]),
        area_ref(),
        file_services(temp.path(), &db),
    );
    assert_eq!(enabled(&first), vec!["3", "A", "M"]);

    let empty = SqliteDatabase::open_in_memory().unwrap();
    let second = AlphaPagination::new(
        glossary_view(numeric_options(), &[]),
        area_ref(),
        file_services(temp.path(), &empty),
    );
    assert_eq!(enabled(&second), vec!["3", "A", "M"]);
}
