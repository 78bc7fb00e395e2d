use std::cell::RefCell;
use std::rc::Rc;

use bountygo_core::autofill::{
  AutoFillController,
  AutoFillOutcome,
  AutoFillView,
  FillPlan,
  ImagePlan,
  MetadataSource
};
use bountygo_core::config::UiConfig;
use bountygo_core::fetch::FetchPhase;
use bountygo_core::{
  Error,
  Result
};
use bountygo_shared::FetchedMetadata;
use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::{
  LocalPool,
  block_on
};
use futures::task::LocalSpawnExt;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
enum Event {
  Loading(bool),
  Fetch(String),
  Alert(String),
  Apply(FillPlan)
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakeView {
  url: String,
  log: Log
}

impl AutoFillView for FakeView {
  fn url_value(&self) -> String {
    self.url.clone()
  }

  fn set_loading(&self, loading: bool) {
    self
      .log
      .borrow_mut()
      .push(Event::Loading(loading));
  }

  fn alert(&self, message: &str) {
    self
      .log
      .borrow_mut()
      .push(Event::Alert(message.to_string()));
  }

  fn apply(&self, plan: &FillPlan) {
    self
      .log
      .borrow_mut()
      .push(Event::Apply(plan.clone()));
  }
}

enum Reply {
  Body(serde_json::Value),
  Status(u16),
  Transport
}

struct FakeSource {
  reply: Reply,
  log:   Log
}

impl MetadataSource for FakeSource {
  async fn fetch(
    &self,
    url: &str
  ) -> Result<FetchedMetadata> {
    self
      .log
      .borrow_mut()
      .push(Event::Fetch(url.to_string()));
    match &self.reply {
      | Reply::Body(body) => {
        serde_json::from_value(body.clone())
          .map_err(|e| {
            Error::Decode(e.to_string())
          })
      }
      | Reply::Status(code) => {
        Err(Error::Status(*code))
      }
      | Reply::Transport => Err(
        Error::Transport(
          "connection reset".to_string()
        )
      )
    }
  }
}

fn controller(
  url: &str,
  reply: Reply
) -> (
  AutoFillController<FakeView, FakeSource>,
  Log
) {
  let log: Log =
    Rc::new(RefCell::new(vec![]));
  let view = FakeView {
    url: url.to_string(),
    log: Rc::clone(&log)
  };
  let source = FakeSource {
    reply,
    log: Rc::clone(&log)
  };
  (
    AutoFillController::new(
      view,
      source,
      &UiConfig::default()
    ),
    log
  )
}

#[test]
fn successful_lookup_fills_form_inside_loading_window()
 {
  let (controller, log) = controller(
    "  https://shop.example/item  ",
    Reply::Body(json!({
      "title": "Foo",
      "description": "Bar",
      "image": "http://x/y.png"
    }))
  );

  let outcome =
    block_on(controller.activate());

  assert_eq!(outcome, AutoFillOutcome::Filled);
  assert_eq!(controller.phase(), FetchPhase::Idle);
  assert_eq!(
    *log.borrow(),
    vec![
      Event::Loading(true),
      Event::Fetch(
        "https://shop.example/item"
          .to_string()
      ),
      Event::Apply(FillPlan {
        name:        "Foo".to_string(),
        description: "Bar".to_string(),
        image:       ImagePlan::Show(
          "http://x/y.png".to_string()
        )
      }),
      Event::Loading(false),
    ]
  );
}

#[test]
fn missing_image_resets_to_placeholder() {
  let (controller, log) = controller(
    "https://shop.example/item",
    Reply::Body(json!({ "title": "Foo" }))
  );

  block_on(controller.activate());

  let applied = log
    .borrow()
    .iter()
    .find_map(|event| match event {
      | Event::Apply(plan) => {
        Some(plan.clone())
      }
      | _ => None
    })
    .expect("plan applied");
  assert_eq!(
    applied.image,
    ImagePlan::Reset {
      placeholder: "/static/Bountygo.png"
        .to_string()
    }
  );
}

#[test]
fn blank_url_prompts_without_fetching() {
  let (controller, log) = controller(
    "   ",
    Reply::Transport
  );

  let outcome =
    block_on(controller.activate());

  assert_eq!(
    outcome,
    AutoFillOutcome::MissingUrl
  );
  assert_eq!(
    *log.borrow(),
    vec![Event::Alert(
      "Please paste the URL.".to_string()
    )]
  );
}

#[test]
fn error_or_missing_title_asks_for_manual_fill()
 {
  for body in [
    json!({ "title": "Foo", "error": "blocked" }),
    json!({ "description": "Bar" }),
  ] {
    let (controller, log) = controller(
      "https://shop.example/item",
      Reply::Body(body)
    );

    let outcome =
      block_on(controller.activate());

    assert_eq!(
      outcome,
      AutoFillOutcome::FillManually
    );
    let log = log.borrow();
    assert!(
      !log.iter().any(|event| matches!(
        event,
        Event::Apply(_)
      ))
    );
    assert!(log.contains(&Event::Alert(
      "Could not retrieve data. Please \
       fill manually."
        .to_string()
    )));
    assert_eq!(
      log.last(),
      Some(&Event::Loading(false))
    );
  }
}

#[test]
fn failures_alert_and_clear_loading() {
  for reply in [
    Reply::Status(502),
    Reply::Transport,
    Reply::Body(json!("not an object")),
  ] {
    let (controller, log) = controller(
      "https://shop.example/item",
      reply
    );

    let outcome =
      block_on(controller.activate());

    assert_eq!(
      outcome,
      AutoFillOutcome::Failed
    );
    assert_eq!(
      controller.phase(),
      FetchPhase::Idle
    );
    let log = log.borrow();
    assert_eq!(
      log.first(),
      Some(&Event::Loading(true))
    );
    assert_eq!(
      log.last(),
      Some(&Event::Loading(false))
    );
    assert!(log.contains(&Event::Alert(
      "Failed to retrieve data."
        .to_string()
    )));
  }
}

struct GatedSource {
  reply: RefCell<
    Option<
      oneshot::Receiver<FetchedMetadata>
    >
  >
}

impl MetadataSource for GatedSource {
  async fn fetch(
    &self,
    _url: &str
  ) -> Result<FetchedMetadata> {
    let receiver = self
      .reply
      .borrow_mut()
      .take()
      .ok_or_else(|| {
        Error::Transport(
          "fetched twice".to_string()
        )
      })?;
    receiver.await.map_err(|_| {
      Error::Transport(
        "request cancelled".to_string()
      )
    })
  }
}

fn gated_controller() -> (
  Rc<AutoFillController<FakeView, GatedSource>>,
  oneshot::Sender<FetchedMetadata>,
  Log
) {
  let (sender, receiver) =
    oneshot::channel();
  let log: Log =
    Rc::new(RefCell::new(vec![]));
  let controller = AutoFillController::new(
    FakeView {
      url: "https://shop.example/item"
        .to_string(),
      log: Rc::clone(&log)
    },
    GatedSource {
      reply: RefCell::new(Some(receiver))
    },
    &UiConfig::default()
  );
  (Rc::new(controller), sender, log)
}

#[test]
fn activation_while_loading_is_busy() {
  let (controller, sender, log) =
    gated_controller();
  let mut pool = LocalPool::new();
  let spawner = pool.spawner();

  let first = Rc::clone(&controller);
  spawner
    .spawn_local(async move {
      assert_eq!(
        first.activate().await,
        AutoFillOutcome::Filled
      );
    })
    .expect("spawn first activation");
  pool.run_until_stalled();
  assert_eq!(
    controller.phase(),
    FetchPhase::Loading
  );

  let second = block_on(controller.activate());
  assert_eq!(second, AutoFillOutcome::Busy);

  sender
    .send(
      serde_json::from_value(
        json!({ "title": "Foo" })
      )
      .expect("metadata should decode")
    )
    .expect("first activation waiting");
  pool.run();

  assert_eq!(
    controller.phase(),
    FetchPhase::Idle
  );
  let loading_events = log
    .borrow()
    .iter()
    .filter(|event| {
      matches!(event, Event::Loading(_))
    })
    .cloned()
    .collect::<Vec<_>>();
  assert_eq!(
    loading_events,
    vec![
      Event::Loading(true),
      Event::Loading(false)
    ]
  );
}

#[test]
fn dropped_activation_still_clears_loading()
{
  let (controller, _sender, log) =
    gated_controller();

  assert!(
    controller
      .activate()
      .now_or_never()
      .is_none()
  );

  assert_eq!(
    controller.phase(),
    FetchPhase::Idle
  );
  assert_eq!(
    *log.borrow(),
    vec![
      Event::Loading(true),
      Event::Loading(false)
    ]
  );
}
