
use scripted::{scripted, scripted_failing_execute, scripted_failing_init};
use switchyard_core::{ActionRole, ComponentIndex, Error, GlobalAction};
use switchyard_mux::{ActionMux, MuxConfig, MuxError};

fn mux() -> ActionMux {
    ActionMux::new(MuxConfig::default()).unwrap()
}

// ============================================================================
// Structural / configuration errors
// ============================================================================

#[test]
fn invalid_config_is_rejected() {
    let config = MuxConfig {
        event_channel_capacity: 0,
        ..MuxConfig::default()
    };
    match ActionMux::new(config) {
        Err(MuxError::Config(msg)) => assert!(msg.contains("capacity")),
        other => panic!("expected Config error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn duplicate_component_index_aborts_setup() {
    let mut mux = mux();
    let (first, _) = scripted("a");
    let (second, _) = scripted("b");
    mux.add_component(ComponentIndex(0), "A", true, first).unwrap();

    let err = mux
        .add_component(ComponentIndex(0), "B", true, second)
        .unwrap_err();
    assert!(matches!(
        err,
        MuxError::Core(Error::DuplicateIndex(ComponentIndex(0)))
    ));
}

#[tokio::test]
async fn skipped_component_index_aborts_setup() {
    let mut mux = mux();
    let (first, _) = scripted("a");
    let (late, _) = scripted("b");
    mux.add_component(ComponentIndex(0), "A", true, first).unwrap();

    let err = mux
        .add_component(ComponentIndex(5), "B", true, late)
        .unwrap_err();
    match err {
        MuxError::Core(Error::IndexOutOfOrder { index, expected }) => {
            assert_eq!(index, ComponentIndex(5));
            assert_eq!(expected, ComponentIndex(1));
        }
        other => panic!("expected IndexOutOfOrder, got {other:?}"),
    }
}

#[tokio::test]
async fn mapping_against_unknown_component_fails() {
    let mut mux = mux();
    let err = mux
        .map_action(ComponentIndex(3), "press", ActionRole::Input)
        .unwrap_err();
    assert!(matches!(
        err,
        MuxError::Core(Error::UnknownComponent(ComponentIndex(3)))
    ));

    let err = mux.add_file(ComponentIndex(3), "x.conf").unwrap_err();
    assert!(matches!(
        err,
        MuxError::Core(Error::UnknownComponent(ComponentIndex(3)))
    ));
}

// ============================================================================
// Runtime errors
// ============================================================================

#[tokio::test]
async fn executing_an_unmapped_action_is_reported() {
    let mut mux = mux();
    let (a0, _) = scripted("a");
    mux.add_component(ComponentIndex(0), "A", true, a0).unwrap();

    let err = mux.execute(GlobalAction(99)).await.unwrap_err();
    assert!(matches!(
        err,
        MuxError::Core(Error::UnmappedAction(GlobalAction(99)))
    ));
}

#[tokio::test]
async fn adapter_failure_during_observe_aborts_the_scan() {
    let mut mux = mux();
    let (broken, broken_handle) = scripted("broken");
    let (healthy, healthy_handle) = scripted("healthy");
    mux.add_component(ComponentIndex(0), "broken", true, broken).unwrap();
    mux.add_component(ComponentIndex(1), "healthy", true, healthy).unwrap();
    mux.map_action(ComponentIndex(0), "beep", ActionRole::Output)
        .unwrap();
    mux.map_action(ComponentIndex(1), "boop", ActionRole::Output)
        .unwrap();

    broken_handle.queue_error("transport reset");
    healthy_handle.queue_action(1);

    let err = mux.observe(false).await.unwrap_err();
    assert_eq!(err.failed_component(), Some(ComponentIndex(0)));
    assert!(err.to_string().contains("transport reset"));
    // the scan stopped at the failure instead of continuing past it
    assert_eq!(healthy_handle.polls(), 0);
}

#[tokio::test]
async fn adapter_failure_during_execute_names_the_component() {
    let mut mux = mux();
    let (good, _) = scripted("good");
    let (bad, _) = scripted_failing_execute("bad");
    mux.add_component(ComponentIndex(0), "good", true, good).unwrap();
    mux.add_component(ComponentIndex(1), "bad", true, bad).unwrap();
    let only_there = mux
        .map_action(ComponentIndex(1), "poke", ActionRole::Input)
        .unwrap();

    let err = mux.execute(only_there).await.unwrap_err();
    assert_eq!(err.failed_component(), Some(ComponentIndex(1)));
}

#[tokio::test]
async fn init_failure_aborts_with_the_component_index() {
    let mut mux = mux();
    let (healthy, _) = scripted("healthy");
    let (refusing, _) = scripted_failing_init("refusing");
    mux.add_component(ComponentIndex(0), "healthy", true, healthy).unwrap();
    mux.add_component(ComponentIndex(1), "refusing", true, refusing).unwrap();

    let err = mux.init().await.unwrap_err();
    assert_eq!(err.failed_component(), Some(ComponentIndex(1)));
}

#[test]
fn unknown_action_name_lookup_fails() {
    let mux = mux();
    assert!(matches!(
        mux.mapper().name_of(GlobalAction(12)),
        Err(Error::UnknownAction(GlobalAction(12)))
    ));
}
