//! `window.utils` and the navigation
//! globals for page scripts.

use std::rc::Rc;

use finboard_core::ApiError;
use finboard_core::format::{
  self,
  INVALID_DATE
};
use js_sys::{
  Date,
  Function,
  Object,
  Promise,
  Reflect
};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use wasm_bindgen_futures::future_to_promise;

use crate::components::ToastKind;
use crate::config::ui_timezone;
use crate::dom::{
  self,
  js_text
};
use crate::temporal_nav::TemporalNavWidget;
use crate::utils::{
  self,
  debounce::debounce_js,
  fetch::{
    FetchOptions,
    report_failure
  },
  forms,
  submit::prevent_double_submit_js
};

fn set_property(
  target: &JsValue,
  name: &str,
  value: &JsValue
) {
  if let Err(error) = Reflect::set(
    target,
    &JsValue::from_str(name),
    value
  ) {
    tracing::error!(
      name,
      ?error,
      "failed to export global"
    );
  }
}

fn js_number(value: &JsValue) -> f64 {
  value.as_f64().unwrap_or_else(|| {
    js_text(value)
      .trim()
      .parse()
      .unwrap_or(f64::NAN)
  })
}

fn optional_text(
  value: &JsValue
) -> Option<String> {
  if value.is_undefined()
    || value.is_null()
  {
    None
  } else {
    Some(js_text(value))
  }
}

/// Strings pass through; `Date`
/// instances go through their ISO form.
fn date_input(
  value: &JsValue
) -> Option<String> {
  if let Some(text) = value.as_string() {
    return Some(text);
  }
  let date = value.dyn_ref::<Date>()?;
  if date.get_time().is_nan() {
    return None;
  }
  date.to_iso_string().as_string()
}

fn to_js<T: Serialize>(
  value: &T
) -> JsValue {
  let serializer =
    serde_wasm_bindgen::Serializer::json_compatible();
  value.serialize(&serializer).unwrap_or_else(
    |error| {
      tracing::error!(
        %error,
        "failed to convert value for javascript"
      );
      JsValue::UNDEFINED
    }
  )
}

pub fn install_utils() {
  let Some(window) = dom::window() else {
    return;
  };
  let utils = Object::new();

  set_property(
    &utils,
    "formatCurrency",
    &Closure::<dyn Fn(JsValue) -> String>::new(
      |value: JsValue| {
        format::format_currency(js_number(
          &value
        ))
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "formatNumber",
    &Closure::<dyn Fn(JsValue) -> String>::new(
      |value: JsValue| {
        format::format_number(js_number(
          &value
        ))
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "formatDate",
    &Closure::<dyn Fn(JsValue) -> String>::new(
      |value: JsValue| {
        date_input(&value)
          .and_then(|raw| {
            format::format_date(
              &raw,
              &ui_timezone()
            )
          })
          .unwrap_or_else(|| {
            INVALID_DATE.to_string()
          })
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "formatDateTime",
    &Closure::<dyn Fn(JsValue) -> String>::new(
      |value: JsValue| {
        date_input(&value)
          .and_then(|raw| {
            format::format_date_time(
              &raw,
              &ui_timezone()
            )
          })
          .unwrap_or_else(|| {
            INVALID_DATE.to_string()
          })
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "showToast",
    &Closure::<dyn Fn(JsValue, JsValue)>::new(
      |message: JsValue, kind: JsValue| {
        let kind = kind
          .as_string()
          .map(|key| ToastKind::from_key(&key))
          .unwrap_or(ToastKind::Info);
        utils::show_toast(
          &js_text(&message),
          kind
        );
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "validateForm",
    &Closure::<dyn Fn(JsValue) -> bool>::new(
      |form_id: JsValue| {
        forms::validate_form(&js_text(
          &form_id
        ))
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "showLoading",
    &Closure::<dyn Fn(JsValue)>::new(
      |message: JsValue| {
        utils::show_loading(
          optional_text(&message)
            .as_deref()
        );
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "hideLoading",
    &Closure::<dyn Fn()>::new(
      utils::hide_loading
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "confirmAction",
    &Closure::<dyn Fn(JsValue) -> bool>::new(
      |message: JsValue| {
        utils::confirm_action(
          optional_text(&message)
            .as_deref()
        )
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "getTodayDate",
    &Closure::<dyn Fn() -> String>::new(
      forms::today_date
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "getDaysDifference",
    &Closure::<dyn Fn(JsValue, JsValue) -> f64>::new(
      |from: JsValue, to: JsValue| {
        let (Some(from), Some(to)) =
          (date_input(&from), date_input(&to))
        else {
          return f64::NAN;
        };
        format::days_difference(
          &from,
          &to,
          &ui_timezone()
        )
        .map_or(f64::NAN, |days| days as f64)
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "debounce",
    &Closure::<dyn Fn(JsValue, JsValue) -> JsValue>::new(
      |func: JsValue, wait: JsValue| {
        match func.dyn_into::<Function>() {
          | Ok(func) => {
            debounce_js(
              func,
              wait.as_f64().unwrap_or(0.0)
            )
          }
          | Err(_) => {
            tracing::warn!(
              "debounce called without a function"
            );
            JsValue::UNDEFINED
          }
        }
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "copyToClipboard",
    &Closure::<dyn Fn(JsValue)>::new(
      |text: JsValue| {
        utils::copy_to_clipboard(js_text(
          &text
        ));
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "fetchWithErrorHandling",
    &Closure::<dyn Fn(JsValue, JsValue) -> Promise>::new(
      |url: JsValue, options: JsValue| {
        fetch_promise(js_text(&url), options)
      }
    )
    .into_js_value()
  );
  set_property(
    &utils,
    "preventDoubleSubmit",
    &Closure::<dyn Fn(JsValue) -> bool>::new(
      |callback: JsValue| {
        match callback.dyn_into::<Function>()
        {
          | Ok(callback) => {
            prevent_double_submit_js(
              callback
            )
          }
          | Err(_) => {
            tracing::warn!(
              "preventDoubleSubmit called \
               without a function"
            );
            false
          }
        }
      }
    )
    .into_js_value()
  );

  set_property(&window, "utils", &utils);
  tracing::debug!("window.utils installed");
}

/// Resolves with the decoded JSON body,
/// rejects with an `Error` carrying the
/// user-facing message.
fn fetch_promise(
  url: String,
  options: JsValue
) -> Promise {
  future_to_promise(async move {
    let options = if options.is_undefined()
      || options.is_null()
    {
      FetchOptions::default()
    } else {
      match serde_wasm_bindgen::from_value::<
        FetchOptions
      >(options)
      {
        | Ok(options) => options,
        | Err(error) => {
          let error = ApiError::Decode(
            format!(
              "invalid fetch options: {error}"
            )
          );
          report_failure(&url, &error);
          return Err(rejection(&error));
        }
      }
    };

    utils::fetch_with_error_handling::<
      serde_json::Value
    >(&url, &options)
    .await
    .map(|body| to_js(&body))
    .map_err(|error| rejection(&error))
  })
}

fn rejection(error: &ApiError) -> JsValue {
  js_sys::Error::new(&error.user_message())
    .into()
}

/// Navigation globals backed by the
/// mounted widget.
pub fn install_temporal_nav(
  widget: &Rc<TemporalNavWidget>
) {
  let Some(window) = dom::window() else {
    return;
  };

  let nav = Rc::clone(widget);
  set_property(
    &window,
    "getAppliedViewingDate",
    &Closure::<dyn Fn() -> JsValue>::new(
      move || to_js(&nav.applied())
    )
    .into_js_value()
  );

  let nav = Rc::clone(widget);
  set_property(
    &window,
    "getPendingViewingDate",
    &Closure::<dyn Fn() -> JsValue>::new(
      move || to_js(&nav.pending())
    )
    .into_js_value()
  );

  let nav = Rc::clone(widget);
  set_property(
    &window,
    "setPendingViewingDate",
    &Closure::<dyn Fn(JsValue, JsValue)>::new(
      move |month: JsValue, year: JsValue| {
        match (month.as_f64(), year.as_f64()) {
          | (Some(month), Some(year)) => {
            nav.set_pending_viewing_date(
              month, year
            );
          }
          | _ => {
            tracing::warn!(
              "setPendingViewingDate expects \
               numbers"
            );
          }
        }
      }
    )
    .into_js_value()
  );

  let actions: [(
    &str,
    fn(&Rc<TemporalNavWidget>)
  ); 6] = [
    ("prevMonth", TemporalNavWidget::prev_month),
    ("nextMonth", TemporalNavWidget::next_month),
    (
      "applyViewingDate",
      TemporalNavWidget::apply_viewing_date
    ),
    (
      "clearViewingDate",
      TemporalNavWidget::clear_viewing_date
    ),
    (
      "goToToday",
      TemporalNavWidget::clear_viewing_date
    ),
    (
      "updateTemporalNav",
      TemporalNavWidget::update_temporal_nav
    )
  ];
  for (name, action) in actions {
    let nav = Rc::clone(widget);
    set_property(
      &window,
      name,
      &Closure::<dyn Fn()>::new(move || {
        action(&nav)
      })
      .into_js_value()
    );
  }

  let nav = Rc::clone(widget);
  set_property(
    &window,
    "registerReloadHook",
    &Closure::<dyn Fn(JsValue, JsValue)>::new(
      move |name: JsValue, hook: JsValue| {
        let name = js_text(&name);
        let Ok(hook) =
          hook.dyn_into::<Function>()
        else {
          tracing::warn!(
            hook = %name,
            "registerReloadHook expects a \
             function"
          );
          return;
        };
        let label = name.clone();
        nav.register_reload_hook(
          name,
          Rc::new(move || {
            if let Err(error) =
              hook.call0(&JsValue::NULL)
            {
              tracing::error!(
                hook = %label,
                ?error,
                "reload hook threw"
              );
            }
          })
        );
      }
    )
    .into_js_value()
  );

  let nav = Rc::clone(widget);
  set_property(
    &window,
    "unregisterReloadHook",
    &Closure::<dyn Fn(JsValue) -> bool>::new(
      move |name: JsValue| {
        nav.unregister_reload_hook(&js_text(
          &name
        ))
      }
    )
    .into_js_value()
  );

  tracing::debug!(
    "temporal navigation globals installed"
  );
}
