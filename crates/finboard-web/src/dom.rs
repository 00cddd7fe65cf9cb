use gloo::console::log;
use gloo::events::EventListener;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  Element,
  HtmlElement,
  Window
};

pub fn window() -> Option<Window> {
  web_sys::window()
}

pub fn document() -> Option<Document> {
  window().and_then(|window| {
    window.document()
  })
}

pub fn element_by_id(
  id: &str
) -> Option<Element> {
  document().and_then(|document| {
    document.get_element_by_id(id)
  })
}

pub fn body() -> Option<HtmlElement> {
  document()
    .and_then(|document| document.body())
}

pub fn set_text(
  element: &Element,
  text: &str
) {
  element.set_text_content(Some(text));
}

/// `display: block` / `display: none`.
pub fn set_visible(
  element: &Element,
  visible: bool
) {
  let Some(html) =
    element.dyn_ref::<HtmlElement>()
  else {
    return;
  };
  let display =
    if visible { "block" } else { "none" };
  if let Err(error) = html
    .style()
    .set_property("display", display)
  {
    tracing::warn!(
      ?error,
      id = %element.id(),
      "failed toggling element visibility"
    );
  }
}

pub fn body_classes() -> Vec<String> {
  let Some(body) = body() else {
    return vec![];
  };
  let list = body.class_list();
  (0..list.length())
    .filter_map(|idx| list.item(idx))
    .collect()
}

pub fn current_path() -> String {
  window()
    .and_then(|window| {
      window.location().pathname().ok()
    })
    .unwrap_or_default()
}

/// Elements matching `selector`, in
/// document order.
pub fn query_all(
  selector: &str
) -> Vec<Element> {
  let Some(document) = document() else {
    return vec![];
  };
  match document
    .query_selector_all(selector)
  {
    | Ok(nodes) => {
      (0..nodes.length())
        .filter_map(|idx| nodes.item(idx))
        .filter_map(|node| {
          node.dyn_into::<Element>().ok()
        })
        .collect()
    }
    | Err(error) => {
      tracing::warn!(
        ?error,
        selector,
        "query_selector_all failed"
      );
      vec![]
    }
  }
}

/// Runs `init` once the document has
/// been parsed.
pub fn on_ready(
  init: impl FnOnce() + 'static
) {
  let Some(document) = document() else {
    return;
  };
  if document.ready_state() != "loading"
  {
    init();
    return;
  }
  EventListener::once(
    &document,
    "DOMContentLoaded",
    move |_| init()
  )
  .forget();
}

/// Best-effort text for values coming
/// from JavaScript callers.
pub fn js_text(value: &JsValue) -> String {
  if let Some(text) = value.as_string() {
    return text;
  }
  if value.is_undefined()
    || value.is_null()
  {
    return String::new();
  }
  value
    .unchecked_ref::<js_sys::Object>()
    .to_string()
    .into()
}

pub fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
