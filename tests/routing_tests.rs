
use scripted::scripted;
use switchyard_core::{ActionRole, ComponentIndex, LocalAction};
use switchyard_mux::{ActionMux, MuxConfig};

fn mux() -> ActionMux {
    ActionMux::new(MuxConfig::default()).unwrap()
}

// ============================================================================
// Execution routing
// ============================================================================

#[tokio::test]
async fn shared_action_resolves_to_one_deterministic_target() {
    let mut mux = mux();
    let (a0, h0) = scripted("ui-proc");
    let (a1, h1) = scripted("backend-proc");
    mux.add_component(ComponentIndex(0), "ui", true, a0).unwrap();
    mux.add_component(ComponentIndex(1), "backend", true, a1).unwrap();

    // index 0 exposes "press"; index 1 exposes "press" and "release"
    let press = mux
        .map_action(ComponentIndex(0), "press", ActionRole::Input)
        .unwrap();
    let press_again = mux
        .map_action(ComponentIndex(1), "press", ActionRole::Input)
        .unwrap();
    let release = mux
        .map_action(ComponentIndex(1), "release", ActionRole::Input)
        .unwrap();

    // identical names collapse to one global action
    assert_eq!(press, press_again);
    assert_ne!(press, release);

    // repeated execution keeps picking the lowest component index
    for _ in 0..3 {
        mux.execute(press).await.unwrap();
    }
    assert_eq!(h0.executed(), vec![LocalAction(1); 3]);
    assert!(h1.executed().is_empty());

    // "release" only exists in component 1, with its own local numbering
    mux.execute(release).await.unwrap();
    assert_eq!(h1.executed(), vec![LocalAction(2)]);
}

#[tokio::test]
async fn renamed_local_action_routes_under_the_global_name() {
    let mut mux = mux();
    let (a0, h0) = scripted("hw");
    let (a1, _h1) = scripted("sim");
    mux.add_component(ComponentIndex(0), "hw", true, a0).unwrap();
    mux.add_component(ComponentIndex(1), "sim", true, a1).unwrap();

    // the hardware adapter calls it "hw_press", the model says "press"
    let press = mux
        .map_action_as(ComponentIndex(0), "hw_press", "press", ActionRole::Input)
        .unwrap();
    assert_eq!(
        mux.map_action(ComponentIndex(1), "press", ActionRole::Input)
            .unwrap(),
        press
    );
    assert_eq!(mux.mapper().name_of(press).unwrap(), "press");

    mux.execute(press).await.unwrap();
    assert_eq!(h0.executed(), vec![LocalAction(1)]);
}

// ============================================================================
// Registration surface
// ============================================================================

#[tokio::test]
async fn result_actions_feed_the_shared_registry() {
    let mut mux = mux();
    let (a0, _h0) = scripted("ui-proc");
    mux.add_component(ComponentIndex(0), "ui", true, a0).unwrap();

    let verdict = mux.add_result_action("verdict_pass");
    assert_eq!(mux.add_result_action("verdict_pass"), verdict);
    assert_eq!(mux.result_actions(), &[verdict]);

    // a later mapping of the same name reuses the registered number
    let mapped = mux
        .map_action(ComponentIndex(0), "verdict_pass", ActionRole::Output)
        .unwrap();
    assert_eq!(mapped, verdict);
}

#[tokio::test]
async fn spec_files_show_up_in_the_dump() {
    let mut mux = mux();
    let (a0, _h0) = scripted("ui-proc");
    mux.add_component(ComponentIndex(0), "ui", false, a0).unwrap();
    mux.add_file(ComponentIndex(0), "adapters/ui.conf").unwrap();
    mux.map_action(ComponentIndex(0), "press", ActionRole::Input)
        .unwrap();

    let dump = mux.stringify();
    assert!(dump.contains("component 0: ui"));
    assert!(dump.contains("spec adapters/ui.conf"));
    assert!(dump.contains("local 1 press -> global 1 press in"));
    assert!(dump.contains("adapter 0: ui-proc"));
    assert_eq!(dump, mux.stringify());
}

#[tokio::test]
async fn init_runs_every_adapter_once() {
    let mut mux = mux();
    let (a0, _) = scripted("ui-proc");
    let (a1, _) = scripted("backend-proc");
    mux.add_component(ComponentIndex(0), "ui", true, a0).unwrap();
    mux.add_component(ComponentIndex(1), "backend", true, a1).unwrap();

    mux.init().await.unwrap();
}

#[tokio::test]
async fn down_reaches_the_underlying_adapter() {
    let mut mux = mux();
    let (a0, _h0) = scripted("ui-proc");
    mux.add_component(ComponentIndex(0), "ui", true, a0).unwrap();

    assert_eq!(mux.down(ComponentIndex(0)).map(|a| a.name()), Some("ui-proc"));
    assert!(mux.down(ComponentIndex(7)).is_none());
    assert!(mux.down_mut(ComponentIndex(0)).is_some());
}
