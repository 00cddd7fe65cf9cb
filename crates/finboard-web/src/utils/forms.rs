use finboard_core::format::today_iso;
use finboard_core::today_in;
use gloo::events::{
  EventListener,
  EventListenerOptions
};
use js_sys::{
  Function,
  Reflect
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  HtmlElement,
  HtmlFormElement,
  HtmlInputElement,
  KeyboardEvent
};

use super::show_toast;
use crate::components::ToastKind;
use crate::config::ui_timezone;
use crate::dom;

pub const REQUIRED_FIELDS_MESSAGE: &str =
  "Por favor, preencha todos os campos \
   obrigatórios";
const VALIDATED_CLASS: &str =
  "was-validated";

/// Today as `YYYY-MM-DD` on the
/// configured wall clock.
pub fn today_date() -> String {
  today_iso(today_in(&ui_timezone()))
}

/// Checks the form's constraints. A
/// missing form is invalid.
pub fn validate_form(
  form_id: &str
) -> bool {
  let Some(form) =
    dom::element_by_id(form_id).and_then(
      |element| {
        element
          .dyn_into::<HtmlFormElement>()
          .ok()
      }
    )
  else {
    tracing::debug!(
      form_id,
      "validate_form: form not found"
    );
    return false;
  };

  if form.check_validity() {
    return true;
  }
  let _ =
    form.class_list().add_1(VALIDATED_CLASS);
  show_toast(
    REQUIRED_FIELDS_MESSAGE,
    ToastKind::Warning
  );
  false
}

/// Page start-up wiring shared by every
/// screen.
pub fn wire_page() {
  set_default_dates();
  stagger_card_animations();
  close_modals_on_escape();
  guard_form_submissions();
  highlight_active_nav();
}

/// CSS delay for the `index`-th card,
/// a tenth of a second apart.
pub fn card_animation_delay(
  index: usize
) -> String {
  format!("{}.{}s", index / 10, index % 10)
}

fn stagger_card_animations() {
  for (index, card) in dom::query_all(".card")
    .into_iter()
    .filter_map(|element| {
      element.dyn_into::<HtmlElement>().ok()
    })
    .enumerate()
  {
    let _ = card.style().set_property(
      "animation-delay",
      &card_animation_delay(index)
    );
  }
}

fn close_modals_on_escape() {
  let Some(document) = dom::document() else {
    return;
  };
  EventListener::new(
    &document,
    "keydown",
    |event| {
      let is_escape = event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|key| key.key() == "Escape");
      if !is_escape {
        return;
      }
      for modal in dom::query_all(".modal.show")
      {
        if let Err(error) = hide_modal(&modal)
        {
          tracing::warn!(
            ?error,
            "failed closing modal"
          );
        }
      }
    }
  )
  .forget();
}

/// `bootstrap.Modal.getInstance(modal)?.hide()`;
/// pages without Bootstrap are left alone.
fn hide_modal(
  modal: &web_sys::Element
) -> Result<(), JsValue> {
  let Some(window) = dom::window() else {
    return Ok(());
  };
  let bootstrap = Reflect::get(
    &window,
    &JsValue::from_str("bootstrap")
  )?;
  if bootstrap.is_undefined() {
    return Ok(());
  }
  let modal_class = Reflect::get(
    &bootstrap,
    &JsValue::from_str("Modal")
  )?;
  if modal_class.is_undefined() {
    return Ok(());
  }
  let Ok(get_instance) = Reflect::get(
    &modal_class,
    &JsValue::from_str("getInstance")
  )?
  .dyn_into::<Function>() else {
    return Ok(());
  };
  let instance =
    get_instance.call1(&modal_class, modal)?;
  if instance.is_undefined()
    || instance.is_null()
  {
    return Ok(());
  }
  let hide = Reflect::get(
    &instance,
    &JsValue::from_str("hide")
  )?
  .dyn_into::<Function>()?;
  hide.call0(&instance)?;
  Ok(())
}

fn set_default_dates() {
  let today = today_date();
  let mut filled = 0_usize;
  for input in
    dom::query_all("input[type=\"date\"]")
      .into_iter()
      .filter_map(|element| {
        element
          .dyn_into::<HtmlInputElement>()
          .ok()
      })
  {
    if input.value().is_empty()
      && !input
        .has_attribute("data-no-default")
    {
      input.set_value(&today);
      filled += 1;
    }
  }
  tracing::debug!(
    filled,
    %today,
    "applied default dates"
  );
}

fn guard_form_submissions() {
  for form in dom::query_all("form")
    .into_iter()
    .filter_map(|element| {
      element
        .dyn_into::<HtmlFormElement>()
        .ok()
    })
  {
    let target = form.clone();
    EventListener::new_with_options(
      &form,
      "submit",
      EventListenerOptions::enable_prevent_default(),
      move |event| {
        if !target.check_validity() {
          event.prevent_default();
          event.stop_propagation();
        }
        let _ = target
          .class_list()
          .add_1(VALIDATED_CLASS);
      }
    )
    .forget();
  }
}

fn highlight_active_nav() {
  let path = dom::current_path();
  for link in
    dom::query_all(".navbar-nav .nav-link")
  {
    if link.get_attribute("href").as_deref()
      == Some(path.as_str())
    {
      let _ =
        link.class_list().add_1("active");
    }
  }
}
