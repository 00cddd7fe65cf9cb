//! Month/year navigation bound to the
//! server-rendered anchors of each page.

use std::cell::RefCell;
use std::rc::Rc;

use finboard_core::hooks::{
  ReloadHook,
  ReloadHooks
};
use finboard_core::{
  BalancePanel,
  CommitQueue,
  InitStrategy,
  NavCommand,
  Period,
  TemporalNav,
  UiConfig,
  current_period
};
use finboard_shared::ViewingDateDto;
use js_sys::{
  Function,
  Reflect
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::HtmlButtonElement;
use yew::AppHandle;

use crate::api;
use crate::components::{
  ProjectedBalancePanel,
  ProjectedBalancePanelProps
};
use crate::config::ui_timezone;
use crate::dom::{
  self,
  ui_debug
};

pub const MONTH_DISPLAY_ID: &str =
  "temporalMonthDisplay";
pub const ALERT_ID: &str =
  "temporalAlert";
pub const BALANCE_SECTION_ID: &str =
  "projectedBalanceSection";
pub const APPLY_BUTTON_ID: &str =
  "temporalApplyBtn";
pub const APPLIED_HINT_ID: &str =
  "temporalAppliedHint";
pub const APPLIED_DISPLAY_ID: &str =
  "temporalAppliedDisplay";

pub struct TemporalNavWidget {
  config:       &'static UiConfig,
  state:        RefCell<TemporalNav>,
  hooks:        RefCell<ReloadHooks>,
  commit_queue: RefCell<CommitQueue>,
  balance_app:  RefCell<
    Option<
      AppHandle<ProjectedBalancePanel>
    >
  >
}

impl TemporalNavWidget {
  /// Builds the widget when the page
  /// carries the display anchor and has
  /// not opted out, then loads the
  /// viewing date in the background.
  pub fn mount(
    config: &'static UiConfig
  ) -> Option<Rc<Self>> {
    if config.skips_page(
      &dom::body_classes(),
      &dom::current_path()
    ) {
      tracing::info!(
        "temporal navigation disabled \
         on this page"
      );
      return None;
    }
    if dom::element_by_id(
      MONTH_DISPLAY_ID
    )
    .is_none()
    {
      tracing::info!(
        "temporal navigation anchors \
         not found"
      );
      return None;
    }

    let today =
      current_period(&ui_timezone());
    let widget = Rc::new(Self {
      config,
      state: RefCell::new(
        TemporalNav::new(
          config.temporal_nav.mode,
          today
        )
      ),
      hooks: RefCell::new(
        ReloadHooks::new()
      ),
      commit_queue: RefCell::new(
        CommitQueue::new()
      ),
      balance_app: RefCell::new(None)
    });

    for name in
      &config.temporal_nav.legacy_reload_hooks
    {
      widget.register_reload_hook(
        name.clone(),
        legacy_global_hook(name.clone())
      );
    }

    widget.initialize();
    Some(widget)
  }

  pub fn applied(&self) -> Period {
    self.state.borrow().applied()
  }

  pub fn pending(&self) -> Period {
    self.state.borrow().pending()
  }

  pub fn register_reload_hook(
    &self,
    name: String,
    hook: ReloadHook
  ) {
    self
      .hooks
      .borrow_mut()
      .register(name, hook);
  }

  pub fn unregister_reload_hook(
    &self,
    name: &str
  ) -> bool {
    self.hooks.borrow_mut().unregister(name)
  }

  pub fn prev_month(self: &Rc<Self>) {
    let command =
      self.state.borrow_mut().prev_month();
    self.dispatch(command);
  }

  pub fn next_month(self: &Rc<Self>) {
    let command =
      self.state.borrow_mut().next_month();
    self.dispatch(command);
  }

  pub fn apply_viewing_date(
    self: &Rc<Self>
  ) {
    let command =
      self.state.borrow_mut().apply();
    self.dispatch(command);
  }

  pub fn clear_viewing_date(
    self: &Rc<Self>
  ) {
    let command =
      self.state.borrow_mut().go_to_today();
    self.dispatch(command);
  }

  /// Ignores anything that is not an
  /// integral month in 1-12 with a
  /// non-zero year.
  pub fn set_pending_viewing_date(
    self: &Rc<Self>,
    month: f64,
    year: f64
  ) {
    let command = self
      .state
      .borrow_mut()
      .set_pending(month, year);
    if let Some(command) = command {
      self.dispatch(command);
    }
  }

  /// Pushes the current state into the
  /// DOM anchors.
  pub fn update_temporal_nav(
    self: &Rc<Self>
  ) {
    let (view, generation) = {
      let state = self.state.borrow();
      (state.view(), state.generation())
    };

    if let Some(display) =
      dom::element_by_id(MONTH_DISPLAY_ID)
    {
      dom::set_text(
        &display,
        &view.display_label
      );
    }
    if let Some(applied) =
      dom::element_by_id(
        APPLIED_DISPLAY_ID
      )
    {
      dom::set_text(
        &applied,
        &view.applied_label
      );
    }
    if let Some(button) =
      dom::element_by_id(APPLY_BUTTON_ID)
    {
      match button
        .dyn_ref::<HtmlButtonElement>()
      {
        | Some(button) => {
          button.set_disabled(
            view.apply_disabled
          );
        }
        | None => {
          let _ = if view.apply_disabled {
            button.set_attribute(
              "disabled", ""
            )
          } else {
            button
              .remove_attribute("disabled")
          };
        }
      }
    }
    if let Some(hint) =
      dom::element_by_id(APPLIED_HINT_ID)
    {
      dom::set_visible(
        &hint,
        view.show_applied_hint
      );
    }
    if let Some(alert) =
      dom::element_by_id(ALERT_ID)
    {
      dom::set_visible(
        &alert,
        view.show_not_current_alert
      );
    }

    match view.balance {
      | BalancePanel::Hidden => {
        self.hide_balance();
      }
      | BalancePanel::Load(period) => {
        self.load_balance(
          period, generation
        );
      }
    }
  }

  fn dispatch(
    self: &Rc<Self>,
    command: NavCommand
  ) {
    ui_debug(
      "temporal_nav.command",
      &format!("{command:?}")
    );
    self.update_temporal_nav();
    if command.commits() {
      self.commit(command);
    }
  }

  fn initialize(self: &Rc<Self>) {
    let widget = Rc::clone(self);
    let started =
      self.state.borrow().generation();
    let strategy =
      self.config.temporal_nav.init;

    wasm_bindgen_futures::spawn_local(
      async move {
        let result = match strategy {
          | InitStrategy::Reset => {
            api::reset_viewing_date(
              widget.config
            )
            .await
          }
          | InitStrategy::Restore => {
            api::get_viewing_date(
              widget.config
            )
            .await
          }
        };

        match result {
          | Ok(dto) => {
            widget.seed_from(&dto, started);
          }
          | Err(error) => {
            tracing::error!(
              %error,
              ?strategy,
              "failed to load viewing date"
            );
          }
        }
        widget.update_temporal_nav();
      }
    );
  }

  fn seed_from(
    &self,
    dto: &ViewingDateDto,
    started: u64
  ) {
    let mut state =
      self.state.borrow_mut();
    if !state.is_current_generation(started)
    {
      tracing::debug!(
        "navigation moved before the \
         viewing date arrived; keeping \
         local state"
      );
      return;
    }

    if let (Some(month), Some(year)) =
      (dto.current_month, dto.current_year)
      && let Some(current) =
        Period::new(month, year)
    {
      state.set_current(current);
    }
    match Period::new(
      dto.viewing_month,
      dto.viewing_year
    ) {
      | Some(applied) => {
        state.seed(applied);
        tracing::info!(
          %applied,
          "viewing date loaded"
        );
      }
      | None => {
        tracing::warn!(
          month = dto.viewing_month,
          year = dto.viewing_year,
          "server sent an invalid viewing date"
        );
      }
    }
  }

  fn commit(
    self: &Rc<Self>,
    command: NavCommand
  ) {
    let start = self
      .commit_queue
      .borrow_mut()
      .push(command);
    if !start {
      tracing::debug!(
        ?command,
        "queued behind the commit in flight"
      );
      return;
    }

    let widget = Rc::clone(self);
    wasm_bindgen_futures::spawn_local(
      async move {
        loop {
          let next = widget
            .commit_queue
            .borrow_mut()
            .pop();
          let Some(command) = next else {
            break;
          };
          widget.persist(command).await;
        }
      }
    );
  }

  async fn persist(
    &self,
    command: NavCommand
  ) {
    let result = match command {
      | NavCommand::Persist(period) => {
        api::set_viewing_date(
          self.config,
          period
        )
        .await
        .map(|_| ())
      }
      | NavCommand::Reset(_) => {
        api::reset_viewing_date(self.config)
          .await
          .map(|_| ())
      }
      | NavCommand::Render => Ok(())
    };

    if let Err(error) = result {
      tracing::error!(
        %error,
        ?command,
        "failed to store viewing date"
      );
      return;
    }
    if !self.commit_queue.borrow().is_settled()
    {
      tracing::debug!(
        ?command,
        "superseded by a newer commit; \
         skipping reload"
      );
      return;
    }
    self.reload_page_data();
  }

  fn reload_page_data(&self) {
    // Released before firing so a loader
    // may register further hooks.
    let hooks = self.hooks.borrow().clone();
    let fired = hooks.fire();
    tracing::debug!(
      fired,
      "page data reloaded"
    );
  }

  fn load_balance(
    self: &Rc<Self>,
    period: Period,
    generation: u64
  ) {
    if dom::element_by_id(
      BALANCE_SECTION_ID
    )
    .is_none()
    {
      return;
    }

    let widget = Rc::clone(self);
    wasm_bindgen_futures::spawn_local(
      async move {
        let result =
          api::projected_balance(
            widget.config,
            period
          )
          .await;
        if !widget
          .state
          .borrow()
          .is_current_generation(generation)
        {
          tracing::debug!(
            %period,
            "dropping stale projected \
             balance"
          );
          return;
        }

        match result {
          | Ok(balance) => {
            widget.show_balance(
              period, balance
            );
          }
          | Err(error) => {
            tracing::error!(
              %error,
              %period,
              "failed to load projected \
               balance"
            );
            widget.hide_balance();
          }
        }
      }
    );
  }

  fn show_balance(
    &self,
    period: Period,
    balance: finboard_shared::ProjectedBalanceDto
  ) {
    let Some(section) = dom::element_by_id(
      BALANCE_SECTION_ID
    ) else {
      return;
    };

    if let Some(app) =
      self.balance_app.borrow_mut().take()
    {
      app.destroy();
    }
    section.set_inner_html("");

    let app = yew::Renderer::<
      ProjectedBalancePanel
    >::with_root_and_props(
      section.clone(),
      ProjectedBalancePanelProps {
        period,
        balance
      }
    )
    .render();
    *self.balance_app.borrow_mut() =
      Some(app);
    dom::set_visible(&section, true);
  }

  fn hide_balance(&self) {
    if let Some(app) =
      self.balance_app.borrow_mut().take()
    {
      app.destroy();
    }
    if let Some(section) =
      dom::element_by_id(
        BALANCE_SECTION_ID
      )
    {
      dom::set_visible(&section, false);
    }
  }
}

/// Calls `window[name]()` if the page
/// defines such a function when the hook
/// fires.
fn legacy_global_hook(
  name: String
) -> ReloadHook {
  Rc::new(move || {
    let Some(window) = dom::window() else {
      return;
    };
    let Ok(value) = Reflect::get(
      &window,
      &JsValue::from_str(&name)
    ) else {
      return;
    };
    let Some(loader) =
      value.dyn_ref::<Function>()
    else {
      return;
    };
    if let Err(error) =
      loader.call0(&JsValue::NULL)
    {
      tracing::error!(
        hook = %name,
        ?error,
        "page loader threw"
      );
    }
  })
}
