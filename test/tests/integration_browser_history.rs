//! Integration tests for the browser-flavor history adapters, driven
//! through a canned transformer so the root-location layout stays out of
//! the picture.

use std::rc::Rc;

use histmux_browser::HistoryService;
use histmux_shared::{
    Action, ConsumerId, Diagnostic, DiagnosticsSink, InMemoryRootHistory, Location, RegistryError,
    RootHistory, RootLocationTransformer,
};
use histmux_test::{CollectingDiagnostics, ListenerSpy, RecordingTransformer};

struct Setup {
    service: HistoryService,
    root: Rc<InMemoryRootHistory>,
    transformer: Rc<RecordingTransformer>,
    diagnostics: CollectingDiagnostics,
}

fn setup() -> Setup {
    setup_with(RecordingTransformer::new())
}

fn setup_with(transformer: RecordingTransformer) -> Setup {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();

    let root = Rc::new(InMemoryRootHistory::new("/app"));
    let transformer = Rc::new(transformer);
    let diagnostics = CollectingDiagnostics::new();

    let service = HistoryService::with_collaborators(
        Rc::clone(&root) as Rc<dyn RootHistory>,
        Rc::clone(&transformer) as Rc<dyn RootLocationTransformer>,
        Rc::new(diagnostics.clone()) as Rc<dyn DiagnosticsSink>,
    );

    Setup {
        service,
        root,
        transformer,
        diagnostics,
    }
}

#[test]
fn exposes_the_current_root_location() {
    let setup = setup();

    assert_eq!(setup.service.root_location().path(), "/app");
}

#[test]
fn starts_with_a_single_default_entry() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history.action(), Action::Pop);
    assert_eq!(history.location().pathname, "/");
    assert_eq!(history.location().search, "");
    assert_eq!(history.location().hash, "");
}

#[test]
fn seeds_the_initial_entry_from_the_root_location() {
    let setup = setup_with(RecordingTransformer::with_consumer_path(|_, consumer_id| {
        (consumer_id == &ConsumerId::from("test:1")).then(|| "/foo?bar=1#baz".to_owned())
    }));

    let history = setup.service.create_browser_history("test:1").unwrap();

    assert_eq!(history.location().pathname, "/foo");
    assert_eq!(history.location().search, "?bar=1");
    assert_eq!(history.location().hash, "#baz");
}

#[test]
fn push_commits_the_transformed_location_to_the_root_history() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();

    history.push("/foo");

    let calls = setup.transformer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].consumer_location.as_ref().map(Location::path),
        Some("/foo".to_owned())
    );
    assert_eq!(calls[0].root_location.path(), "/app");
    assert_eq!(calls[0].consumer_id, ConsumerId::from("test:1"));

    assert_eq!(setup.root.location().path(), "/rootpath");
    assert_eq!(setup.root.len(), 2);

    assert_eq!(history.len(), 2);
    assert_eq!(history.action(), Action::Push);
    assert_eq!(history.location().path(), "/foo");
}

#[test]
fn replace_swaps_the_current_entry_without_growing_either_history() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();

    history.replace("/foo");

    assert_eq!(history.len(), 1);
    assert_eq!(history.action(), Action::Replace);
    assert_eq!(history.location().path(), "/foo");
    assert_eq!(setup.root.len(), 1);
    assert_eq!(setup.root.location().path(), "/rootpath");
}

#[test]
fn stepping_verbs_warn_and_change_nothing() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    history.push("/foo");

    history.go(-1);
    history.go_back();
    history.go_forward();

    let id = ConsumerId::from("test:1");
    assert_eq!(
        setup.diagnostics.diagnostics(),
        vec![
            Diagnostic::UnsupportedOperation {
                consumer_id: id.clone(),
                operation: "history.go()",
            },
            Diagnostic::UnsupportedOperation {
                consumer_id: id.clone(),
                operation: "history.goBack()",
            },
            Diagnostic::UnsupportedOperation {
                consumer_id: id,
                operation: "history.goForward()",
            },
        ]
    );
    assert_eq!(history.location().path(), "/foo");
    assert_eq!(history.len(), 2);
}

#[test]
fn listen_reports_this_consumers_transitions() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    let spy = ListenerSpy::new();
    let _unregister = history.listen(spy.listener());

    history.push("/foo");
    history.replace("/bar");

    assert_eq!(
        spy.paths(),
        vec![
            ("/foo".to_owned(), Action::Push),
            ("/bar".to_owned(), Action::Replace),
        ]
    );
}

#[test]
fn unregistered_listeners_stay_silent() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    let spy = ListenerSpy::new();
    let unregister = history.listen(spy.listener());

    unregister.call();
    history.push("/foo");

    assert!(spy.is_empty());
}

#[test]
fn a_vetoed_transition_leaves_root_and_consumer_untouched() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    let _unblock = history.block(|_, _| false);

    history.push("/foo");

    assert_eq!(history.len(), 1);
    assert_eq!(history.location().path(), "/");
    assert_eq!(setup.root.len(), 1);
    assert_eq!(setup.root.location().path(), "/app");
    assert!(setup.transformer.calls().is_empty());
}

#[test]
fn unblocking_restores_transitions() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    let unblock = history.block(|_, _| false);

    unblock.call();
    history.push("/foo");

    assert_eq!(history.len(), 2);
}

#[test]
fn each_consumer_gets_at_most_one_live_history() {
    let setup = setup();
    let _history = setup.service.create_browser_history("test:1").unwrap();

    assert_eq!(
        setup
            .service
            .create_browser_history("test:1")
            .map(|_| ())
            .unwrap_err(),
        RegistryError::AlreadyBound(ConsumerId::from("test:1"))
    );
}

#[test]
fn destroy_erases_the_consumer_from_the_root_location() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    history.push("/foo");
    let root_len = setup.root.len();

    history.destroy();

    let calls = setup.transformer.calls();
    let last = calls.last().unwrap();
    assert_eq!(last.consumer_location, None);
    assert_eq!(last.consumer_id, ConsumerId::from("test:1"));

    // Erasure is a replace; the root stack must not grow.
    assert_eq!(setup.root.len(), root_len);
}

#[test]
fn destroy_unregisters_listeners_and_frees_the_consumer_id() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();
    let spy = ListenerSpy::new();
    let _unregister = history.listen(spy.listener());

    history.destroy();
    setup.root.push(Location::from_path("/elsewhere"));

    assert!(spy.is_empty());
    assert!(setup.service.create_browser_history("test:1").is_ok());
}

#[test]
fn consumer_state_survives_push_untouched() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();

    history.push(Location::from_path("/foo").with_state(serde_json::json!({"scroll": 42})));

    assert_eq!(history.location().state, serde_json::json!({"scroll": 42}));
    // The root key never leaks into consumer-visible state.
    assert_eq!(history.location().key, None);
}

#[test]
fn create_href_renders_the_transformed_root_location() {
    let setup = setup();
    let history = setup.service.create_browser_history("test:1").unwrap();

    assert_eq!(history.create_href(&Location::from_path("/foo")), "/rootpath");
}
