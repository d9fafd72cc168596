//! End-to-end behaviour of the model: filtering the built-in catalog,
//! resolving the user location and moving the map.

use foodmap_core::config::{FALLBACK_LOCATION, FOCUS_ZOOM, INITIAL_ZOOM};
use foodmap_core::location::{LocationSource, NoLocation};
use foodmap_core::{
    load_catalog, Catalog, CatalogError, Category, CategoryFilter, Coordinate, Error,
    LocateControl, LocateState, MapController, Query, RestaurantRecord, Session, Viewport,
};

fn titles(catalog: &Catalog, query: &Query) -> Vec<String> {
    query
        .apply(catalog)
        .into_iter()
        .filter_map(|i| catalog.get(i))
        .map(|r| r.title.clone())
        .collect()
}

fn all_queries() -> Vec<Query> {
    let mut out = Vec::new();
    for &category in CategoryFilter::OPTIONS {
        for search in ["", "veg", "BIRYANI", "restaurant", "hotel", "zzz", "a"] {
            out.push(Query::new(category, search));
        }
    }
    out
}

#[test]
fn non_veg_filter_yields_two() {
    let catalog = Catalog::builtin();
    let query = Query::new(CategoryFilter::Only(Category::NonVeg), "");
    assert_eq!(
        titles(&catalog, &query),
        ["PK Biryani", "Hotel Tambda-Pandhara"]
    );
}

#[test]
fn search_krishna_across_all() {
    let catalog = Catalog::builtin();
    let query = Query::new(CategoryFilter::All, "Krishna");
    assert_eq!(titles(&catalog, &query), ["Krishna Pure Veg"]);
}

#[test]
fn uppercase_search_matches() {
    let catalog = Catalog::builtin();
    let query = Query::new(CategoryFilter::All, "BIRYANI");
    assert_eq!(titles(&catalog, &query), ["PK Biryani"]);
}

fn matching(catalog: &Catalog, query: &Query) -> Vec<RestaurantRecord> {
    query
        .apply(catalog)
        .into_iter()
        .filter_map(|i| catalog.get(i).cloned())
        .collect()
}

#[test]
fn all_with_empty_search_is_identity() {
    let catalog = Catalog::builtin();
    assert_eq!(matching(&catalog, &Query::default()), catalog.records());
}

#[test]
fn filtering_is_idempotent() {
    let catalog = Catalog::builtin();
    for query in all_queries() {
        let once = matching(&catalog, &query);
        let twice = matching(&Catalog::new(once.clone()), &query);
        assert_eq!(once, twice, "{:?}", query);
    }
}

#[test]
fn category_must_match_unless_all() {
    let catalog = Catalog::builtin();
    for query in all_queries() {
        for record in matching(&catalog, &query) {
            if let CategoryFilter::Only(category) = query.category {
                assert_eq!(record.category, category, "{:?}", query);
            }
        }
    }
}

#[test]
fn veg_search_restaurant_excludes_non_veg() {
    // "Non-vegetarian restaurant" contains "veg", so only the category keeps
    // the non-veg places out.
    let catalog = Catalog::builtin();
    let query = Query::new(CategoryFilter::Only(Category::Veg), "veg");
    assert_eq!(titles(&catalog, &query), ["Shree Ganesh", "Krishna Pure Veg"]);
}

#[test]
fn no_capability_resolves_to_fallback_and_stops_loading() {
    let mut session = Session::new();
    assert!(session.is_loading());

    let position = session.resolve_initial(NoLocation.locate(), FALLBACK_LOCATION);

    assert_eq!(position, Coordinate::new(51.505, -0.09));
    assert!(!session.is_loading());
    assert_eq!(
        session.initial_viewport(INITIAL_ZOOM),
        Some(Viewport::new(FALLBACK_LOCATION, 13.0))
    );
}

#[test]
fn sidebar_click_centers_map_on_record() {
    let catalog = Catalog::builtin();
    let mut session = Session::new();
    let mut controller = MapController::new(FOCUS_ZOOM);

    // Nothing to do before any selection.
    assert_eq!(controller.observe(session.focus()), None);

    let record = catalog.get(2).unwrap();
    session.focus_on(record.position);

    let viewport = controller.observe(session.focus()).unwrap();
    assert_eq!(viewport.center, record.position);
    assert_eq!(viewport.zoom, 16.0);

    // The next frame sees the same focus and does nothing.
    assert_eq!(controller.observe(session.focus()), None);
}

#[test]
fn locate_while_locating_settles_on_either_outcome() {
    let mut control = LocateControl::new();
    let mut session = Session::new();
    session.resolve_initial(NoLocation.locate(), FALLBACK_LOCATION);

    control.press();
    control.press();
    assert_eq!(control.state(), LocateState::Locating);

    control.failed();
    assert_eq!(control.state(), LocateState::Idle);

    let here = Coordinate::new(18.52, 73.85);
    if let foodmap_core::LocateOutcome::Recenter { user_location, .. } =
        control.found(here, FOCUS_ZOOM)
    {
        session.set_user_location(user_location);
    }
    assert_eq!(control.state(), LocateState::Idle);
    assert_eq!(session.user_location(), Some(here));
}

#[test]
fn load_catalog_defaults_to_builtin() {
    let catalog = load_catalog(None).unwrap();
    assert_eq!(catalog.records(), Catalog::builtin().records());
}

#[test]
fn load_catalog_reports_missing_file() {
    let path = std::env::temp_dir().join("foodmap-no-such-catalog.json");
    assert!(matches!(
        load_catalog(Some(path.as_path())),
        Err(Error::Catalog(CatalogError::Io(_)))
    ));
}

#[test]
fn load_catalog_reads_json_file() {
    let path = std::env::temp_dir().join(format!("foodmap-catalog-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"position":[18.52,73.85],"title":"Vaishali","description":"South Indian cafe","category":"veg"}]"#,
    )
    .unwrap();

    let catalog = load_catalog(Some(path.as_path())).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.records()[0].title, "Vaishali");
    assert_eq!(catalog.records()[0].category, Category::Veg);
}
