//! End-to-end tests for multiplexing several consumers onto one root
//! location, asserting the exact encoded form of the reserved query
//! parameter.

use std::rc::Rc;

use histmux_browser::HistoryService;
use histmux_shared::{
    ConsumerPathsTransformer, DiagnosticsSink, InMemoryRootHistory, LogDiagnostics, RootHistory,
    RootLocationOptions, RootLocationTransformer,
};
use proptest::prelude::*;

fn service(
    initial_root_path: &str,
    options: RootLocationOptions,
) -> (HistoryService, Rc<InMemoryRootHistory>, Rc<ConsumerPathsTransformer>) {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let root = Rc::new(InMemoryRootHistory::new(initial_root_path));
    let transformer = Rc::new(ConsumerPathsTransformer::new(options));

    let service = HistoryService::with_collaborators(
        Rc::clone(&root) as Rc<dyn RootHistory>,
        Rc::clone(&transformer) as Rc<dyn RootLocationTransformer>,
        Rc::new(LogDiagnostics) as Rc<dyn DiagnosticsSink>,
    );

    (service, root, transformer)
}

#[test]
fn joins_all_consumer_paths_into_the_reserved_query_param() {
    let options = RootLocationOptions::new("---").with_primary_consumer_id("pri");
    let (service, root, _) = service("/", options);
    let _primary = service.create_browser_history("pri").unwrap();
    let history_a = service.create_browser_history("a").unwrap();
    let history_b = service.create_browser_history("b").unwrap();

    history_a.push("/foo");
    history_b.push("/bar?baz=1");

    let root_location = root.location();
    assert_eq!(root_location.pathname, "/");
    assert_eq!(
        root_location.search,
        "?---=%7B%22a%22%3A%22%2Ffoo%22%2C%22b%22%3A%22%2Fbar%3Fbaz%3D1%22%7D"
    );
    assert_eq!(root.len(), 3);
}

#[test]
fn destroying_a_consumer_removes_only_its_own_path() {
    let (service, root, _) = service("/", RootLocationOptions::new("---"));
    let history_a = service.create_browser_history("a").unwrap();
    let history_b = service.create_browser_history("b").unwrap();
    history_a.push("/foo");
    history_b.push("/bar?baz=1");

    history_a.destroy();

    let root_location = root.location();
    assert_eq!(
        root_location.search,
        "?---=%7B%22b%22%3A%22%2Fbar%3Fbaz%3D1%22%7D"
    );
    // Erasure replaces; the shared stack keeps its length.
    assert_eq!(root.len(), 3);
    assert_eq!(history_b.location().path(), "/bar?baz=1");
}

#[test]
fn the_primary_consumer_occupies_the_root_pathname_directly() {
    let options = RootLocationOptions::new("---").with_primary_consumer_id("main");
    let (service, root, _) = service("/", options);
    let main = service.create_browser_history("main").unwrap();
    let history1 = service.create_browser_history("test:1").unwrap();

    history1.push("/foo");
    main.push("/baz?qux=3");

    let root_location = root.location();
    assert_eq!(root_location.pathname, "/baz");
    assert_eq!(
        root_location.search,
        "?qux=3&---=%7B%22test%3A1%22%3A%22%2Ffoo%22%7D"
    );
}

#[test]
fn unrelated_root_query_params_survive_consumer_navigation() {
    let (service, root, _) = service("/app?other=1", RootLocationOptions::new("---"));
    let history = service.create_browser_history("test:1").unwrap();

    history.push("/foo");

    assert_eq!(
        root.location().search,
        "?other=1&---=%7B%22test%3A1%22%3A%22%2Ffoo%22%7D"
    );
}

proptest! {
    #[test]
    fn consumer_paths_never_interfere(
        path1 in "/[a-z]{1,8}",
        path2 in "/[a-z]{1,8}(\\?[a-z]=[0-9])?",
    ) {
        let (service, root, transformer) = service("/", RootLocationOptions::new("---"));
        let history1 = service.create_browser_history("test:1").unwrap();
        let history2 = service.create_browser_history("test:2").unwrap();

        history1.push(path1.as_str());
        history2.push(path2.as_str());

        let root_location = root.location();
        prop_assert_eq!(
            transformer.consumer_path_from_root_location(
                &root_location,
                history1.consumer_id(),
            ),
            Some(path1)
        );
        prop_assert_eq!(
            transformer.consumer_path_from_root_location(
                &root_location,
                history2.consumer_id(),
            ),
            Some(path2)
        );
    }
}
