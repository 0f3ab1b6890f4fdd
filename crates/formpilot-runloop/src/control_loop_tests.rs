use std::time::Duration;

use async_trait::async_trait;
use formpilot_dom::ActivationHandler;
use formpilot_protocols::StoreError;
use formpilot_store::MemoryProfileStore;

use super::*;

// =========================================================================
// Fixtures
// =========================================================================

fn profile() -> Profile {
    let mut profile = Profile::placeholder();
    profile.basics.first_name = "Ada".into();
    profile.basics.last_name = "Lovelace".into();
    profile.basics.email = "ada@example.com".into();
    profile
}

fn document(html: &str) -> Document {
    Document::from_html(html).unwrap()
}

fn control_with(html: &str, store: Arc<dyn ProfileStore>, config: Config) -> Arc<ControlLoop> {
    let page = Arc::new(Page::new(document(html)));
    Arc::new(ControlLoop::new(page, store, &config))
}

fn control(html: &str) -> Arc<ControlLoop> {
    control_with(
        html,
        Arc::new(MemoryProfileStore::with_profile(profile())),
        Config::default(),
    )
}

fn value_of(control: &ControlLoop, id: &str) -> String {
    control.page().read(|doc| {
        let node = doc.get_element_by_id(doc.root(), id).unwrap();
        doc.element(node).unwrap().state.value.clone()
    })
}

fn messages(control: &ControlLoop) -> Vec<String> {
    control.board().messages()
}

/// Navigates to `target` when the `#next` control is activated.
struct NextPage(&'static str);

impl ActivationHandler for NextPage {
    fn on_activate(&self, doc: &mut Document, node: NodeId) -> Option<Document> {
        (doc.attr(node, "id") == Some("next")).then(|| document(self.0))
    }
}

struct FailingStore;

#[async_trait]
impl ProfileStore for FailingStore {
    async fn get_profile(&self) -> Result<Profile, StoreError> {
        Err(StoreError::StorageError("offline".into()))
    }

    async fn save_profile(&self, _profile: Profile) -> Result<(), StoreError> {
        Err(StoreError::StorageError("offline".into()))
    }

    async fn get_settings(&self) -> Result<AppSettings, StoreError> {
        Err(StoreError::StorageError("offline".into()))
    }

    async fn save_settings(&self, _settings: AppSettings) -> Result<(), StoreError> {
        Err(StoreError::StorageError("offline".into()))
    }
}

struct PanickingStore;

#[async_trait]
impl ProfileStore for PanickingStore {
    async fn get_profile(&self) -> Result<Profile, StoreError> {
        panic!("store exploded");
    }

    async fn save_profile(&self, _profile: Profile) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get_settings(&self) -> Result<AppSettings, StoreError> {
        Ok(AppSettings::default())
    }

    async fn save_settings(&self, _settings: AppSettings) -> Result<(), StoreError> {
        Ok(())
    }
}

const NAME_FORM: &str = r#"
    <label for="first">First Name</label><input id="first">
    <label for="email">Email</label><input id="email" type="email">"#;

// =========================================================================
// Start / stop
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_start_and_already_running() {
    let control = control(NAME_FORM);
    assert_eq!(control.status(), AgentStatus::Idle);
    control.start().unwrap();
    assert_eq!(control.status(), AgentStatus::Observing);
    assert!(matches!(
        control.start(),
        Err(RunLoopError::AlreadyRunning(AgentStatus::Observing))
    ));
    assert_eq!(
        messages(&control),
        vec![START_MESSAGE, "State changed to: [OBSERVING]"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_terminal_until_restart() {
    let control = control(NAME_FORM);
    control.start().unwrap();
    let token = control.cancellation();
    assert!(control.stop());
    assert_eq!(control.status(), AgentStatus::Stopped);
    assert!(token.is_cancelled());
    assert!(!control.stop());
    assert!(!control.tick().await);
    assert!(messages(&control).contains(&"Agent manually stopped.".to_string()));

    control.start().unwrap();
    assert!(!control.cancellation().is_cancelled());
    assert_eq!(
        messages(&control),
        vec![START_MESSAGE, "State changed to: [OBSERVING]"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_idle_loop_does_not_tick() {
    let control = control(NAME_FORM);
    assert!(!control.tick().await);
    assert_eq!(control.ticks(), 0);
}

// =========================================================================
// Fill and navigate
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_fills_then_succeeds() {
    let control = control(NAME_FORM);
    control.start().unwrap();

    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Observing);
    assert_eq!(value_of(&control, "first"), "Ada");
    assert_eq!(value_of(&control, "email"), "ada@example.com");

    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Succeeded);
    assert_eq!(
        messages(&control),
        vec![
            START_MESSAGE,
            "State changed to: [OBSERVING]",
            "State changed to: [PLANNING]",
            "State changed to: [EXECUTING]",
            "Filled 'First Name' with 'Ada'",
            "Filled 'Email' with 'ada@example.com'",
            "State changed to: [OBSERVING]",
            "No fields left to fill and no way forward.",
            "State changed to: [SUCCEEDED]",
        ]
    );
    assert!(!control.tick().await);
}

#[tokio::test(start_paused = true)]
async fn test_fill_waits_for_settling() {
    let control = control(NAME_FORM);
    control.start().unwrap();
    let started = tokio::time::Instant::now();
    control.tick().await;
    // Two fills at 100 ms each, then 500 ms before observing again.
    assert!(started.elapsed() >= Duration::from_millis(700));
}

#[tokio::test(start_paused = true)]
async fn test_navigates_to_next_page() {
    let control = control(r#"<button id="next">Next</button>"#);
    control.page().on_activate(Arc::new(NextPage("<p>Thanks</p>")));
    control.start().unwrap();

    let started = tokio::time::Instant::now();
    assert!(control.tick().await);
    assert!(started.elapsed() >= Duration::from_millis(3500));
    assert_eq!(control.status(), AgentStatus::Observing);
    let log = messages(&control);
    assert!(log.contains(&"Found navigation button: [Next]".to_string()));
    assert!(log.contains(&"State changed to: [NAVIGATING]".to_string()));
    assert!(log.contains(&"Clicked Next. Waiting for page load...".to_string()));

    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn test_click_failure_recovers_then_stops() {
    let control = control(r#"<button id="next">Continue</button>"#);
    control.start().unwrap();

    // Disable the control while the click is settling.
    let page = Arc::clone(control.page());
    let blocker = tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        page.write(|doc| {
            let next = doc.get_element_by_id(doc.root(), "next").unwrap();
            doc.set_attr(next, "disabled", "").unwrap();
        });
    });

    assert!(control.tick().await);
    blocker.await.unwrap();
    assert_eq!(control.status(), AgentStatus::Stopped);
    assert!(control.cancellation().is_cancelled());
    let log = messages(&control);
    let tail: Vec<&str> = log.iter().rev().take(3).rev().map(String::as_str).collect();
    assert_eq!(
        tail,
        vec![
            "State changed to: [RECOVERING]",
            "Failed to click button (blocked or hidden)",
            "State changed to: [STOPPED]",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_unmatched_choice_is_not_progress() {
    let html = r#"
        <label for="country">Country</label>
        <select id="country">
          <option value="">Choose</option>
          <option value="ca">Canada</option>
        </select>"#;
    let control = control(html);
    control.start().unwrap();
    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Succeeded);
    assert!(messages(&control).contains(&"State changed to: [EXECUTING]".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_custom_proceed_classifier() {
    struct Nothing;
    impl ProceedClassifier for Nothing {
        fn is_proceed(&self, _doc: &Document, _node: NodeId) -> bool {
            false
        }
    }

    let page = Arc::new(Page::new(document(r#"<button id="next">Next</button>"#)));
    let control = Arc::new(
        ControlLoop::new(
            page,
            Arc::new(MemoryProfileStore::with_profile(profile())),
            &Config::default(),
        )
        .with_proceed_classifier(Arc::new(Nothing)),
    );
    control.start().unwrap();
    control.tick().await;
    assert_eq!(control.status(), AgentStatus::Succeeded);
}

// =========================================================================
// Faults and budgets
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_store_failure_is_no_profile() {
    let control = control_with(NAME_FORM, Arc::new(FailingStore), Config::default());
    control.start().unwrap();
    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Succeeded);
    assert_eq!(value_of(&control, "first"), "");
    assert!(
        messages(&control).contains(&"Profile unavailable: Storage error: offline".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_panic_in_tick_forces_stop() {
    let control = control_with(NAME_FORM, Arc::new(PanickingStore), Config::default());
    control.start().unwrap();
    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Stopped);
    let log = messages(&control);
    assert!(log.contains(&"Error: store exploded".to_string()));
    assert_eq!(log.last().map(String::as_str), Some("State changed to: [STOPPED]"));
}

#[tokio::test(start_paused = true)]
async fn test_tick_budget() {
    let html = r#"<button id="next">Next</button>"#;
    let mut config = Config::default();
    config.agent.max_ticks = 1;
    let control = control_with(
        html,
        Arc::new(MemoryProfileStore::with_profile(profile())),
        config,
    );
    control.page().on_activate(Arc::new(NextPage(r#"<button id="next">Next</button>"#)));
    control.start().unwrap();

    assert!(control.tick().await);
    assert_eq!(control.status(), AgentStatus::Observing);
    assert!(!control.tick().await);
    assert_eq!(control.status(), AgentStatus::Stopped);
    assert!(messages(&control).contains(&"Tick budget of 1 exhausted. Stopping.".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_tick_dropped_while_busy() {
    let control = control(NAME_FORM);
    control.start().unwrap();
    let guard = control.latch.try_acquire();
    assert!(guard.is_some());
    assert!(!control.tick().await);
    assert_eq!(control.ticks(), 0);
    assert_eq!(value_of(&control, "first"), "");
    drop(guard);
    assert!(control.tick().await);
}

// =========================================================================
// Run
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_spawn_runs_to_completion() {
    let control = control(NAME_FORM);
    let handle = control.spawn().unwrap();
    handle.await.unwrap();
    assert_eq!(control.status(), AgentStatus::Succeeded);
    assert_eq!(control.ticks(), 2);
    assert!(control.cancellation().is_cancelled());
    assert_eq!(control.observer().latest().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_run() {
    // Never succeeds: every click lands on the same page again.
    let html = r#"<button id="next">Next</button>"#;
    let control = control(html);
    control.page().on_activate(Arc::new(NextPage(html)));
    let handle = control.spawn().unwrap();

    sleep(Duration::from_secs(10)).await;
    assert!(control.status().is_active());
    control.stop();
    handle.await.unwrap();
    assert_eq!(control.status(), AgentStatus::Stopped);
}
