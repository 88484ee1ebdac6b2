//! End-to-end spy behavior through a full pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use dispatch_spy::testing::Recorder;
use dispatch_spy::{Action, Interceptor, Pipeline, Spy, SpyConfig, SpyValue};
use serde_json::json;

#[test]
fn plain_actions_pass_through_untouched() {
    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    pipeline.dispatch(Action::new("Connect").with_payload(json!({ "host": "localhost" })));

    let actions = recorder.actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, "Connect");
    assert_eq!(actions[0].payload, json!({ "host": "localhost" }));
    assert!(actions[0].spy.is_none());
}

// The default log branch is terminal: with no reaction set, the spy logs the
// line and does not forward. A reaction is the opt-in for continuing the
// chain from inside the spy.
#[test]
fn default_log_branch_does_not_forward() {
    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    pipeline.dispatch(
        Action::new("SOME_ACTION_TYPE")
            .with_payload(json!("test"))
            .with_spy(SpyConfig::new().log(true)),
    );

    assert!(recorder.is_empty());
}

#[test]
fn journal_captures_exactly_one_default_line() {
    let spy = Spy::with_default_journal();
    let recorder = Recorder::new();

    // Drive the spy directly so the journal stays accessible.
    let mut next = recorder.terminal();
    let mut dispatch = |_a: Action| {};

    spy.intercept(
        Action::new("SOME_ACTION_TYPE")
            .with_payload(json!("test"))
            .with_spy(SpyConfig::new().log(true)),
        &mut next,
        &mut dispatch,
    );

    let lines = spy.journal().unwrap().lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[ACTION : SOME_ACTION_TYPE] "));
}

#[test]
fn reaction_forwards_and_the_chain_completes() {
    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    pipeline.dispatch(
        Action::new("Connect").with_spy(
            SpyConfig::new()
                .log(true)
                .on_log(|action, next, _dispatch| next(action)),
        ),
    );

    let actions = recorder.actions();
    assert_eq!(actions.len(), 1);
    // The terminal sees the flagged copy.
    assert!(matches!(
        actions[0].spy.as_ref().unwrap().skip,
        SpyValue::Bool(true)
    ));
}

#[test]
fn redispatching_reaction_triggers_the_side_effect_once() {
    let invocations = Rc::new(RefCell::new(0usize));
    let counter = invocations.clone();

    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    // The reaction re-enters the pipeline from the top. The second pass
    // carries the guard, so the spy forwards without reacting again.
    pipeline.dispatch(
        Action::new("Connect").with_spy(SpyConfig::new().log(true).on_log(
            move |action, _next, dispatch| {
                *counter.borrow_mut() += 1;
                dispatch(action);
            },
        )),
    );

    assert_eq!(*invocations.borrow(), 1);
    let actions = recorder.actions();
    assert_eq!(actions.len(), 1);
    assert!(matches!(
        actions[0].spy.as_ref().unwrap().skip,
        SpyValue::Bool(true)
    ));
}

#[test]
fn invalid_field_without_handler_degrades_to_defaults() {
    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    let mut config = SpyConfig::new();
    config.log = SpyValue::from("yes");
    pipeline.dispatch(Action::new("Connect").with_spy(config));

    // log fell back to false: no side effect, no forwarding.
    assert!(recorder.is_empty());
}

#[test]
fn invalid_field_with_handler_owns_the_dispatch() {
    let seen = Rc::new(RefCell::new(Vec::<(String, String)>::new()));
    let sink = seen.clone();

    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    let mut config = SpyConfig::new().on_invalid_input(move |field, action, next, _dispatch| {
        sink.borrow_mut()
            .push((field.to_string(), action.kind.clone()));
        // The handler decides the action still counts.
        next(action.clone());
    });
    config.skip = SpyValue::from("later");
    pipeline.dispatch(Action::new("Connect").with_spy(config));

    assert_eq!(
        *seen.borrow(),
        vec![("skip".to_string(), "Connect".to_string())]
    );
    assert_eq!(recorder.kinds(), vec!["Connect".to_string()]);
}

#[test]
fn pre_flagged_actions_are_forwarded_without_side_effects() {
    let recorder = Recorder::new();
    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());

    pipeline.dispatch(Action::new("Connect").with_spy(SpyConfig::new().log(true).skip(true)));

    assert_eq!(recorder.kinds(), vec!["Connect".to_string()]);
}

#[test]
fn spy_composes_with_other_interceptors() {
    use dispatch_spy::{Dispatch, Next};

    let recorder = Recorder::new();
    let stamp = |mut action: Action, next: Next<'_>, _dispatch: Dispatch<'_>| {
        action.payload = json!("stamped");
        next(action);
    };

    let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new()).with(stamp);

    pipeline.dispatch(Action::new("Connect"));

    let actions = recorder.actions();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].payload, json!("stamped"));
}
