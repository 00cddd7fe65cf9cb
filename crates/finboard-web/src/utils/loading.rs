use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::AppHandle;

use crate::components::{
  LoadingOverlay,
  LoadingOverlayProps
};
use crate::dom;

pub const LOADING_SPINNER_ID: &str =
  "loadingSpinner";
pub const DEFAULT_LOADING_MESSAGE: &str =
  "Carregando...";

thread_local! {
  static OVERLAY: RefCell<Option<AppHandle<LoadingOverlay>>> =
    const { RefCell::new(None) };
}

/// Covers the page with a spinner. A
/// second call while it is shown does
/// nothing.
pub fn show_loading(
  message: Option<&str>
) {
  let Some(document) = dom::document()
  else {
    return;
  };
  if document
    .get_element_by_id(LOADING_SPINNER_ID)
    .is_some()
  {
    return;
  }
  let Some(body) = document.body() else {
    return;
  };

  let host = match document
    .create_element("div")
    .map(|element| {
      element.unchecked_into::<HtmlElement>()
    })
  {
    | Ok(host) => host,
    | Err(error) => {
      tracing::error!(
        ?error,
        "failed creating loading overlay"
      );
      return;
    }
  };
  host.set_id(LOADING_SPINNER_ID);
  host.set_class_name(
    "position-fixed top-0 start-0 \
     w-100 h-100 d-flex \
     align-items-center \
     justify-content-center"
  );
  let style = host.style();
  let _ = style.set_property(
    "background-color",
    "rgba(0, 0, 0, 0.5)"
  );
  let _ =
    style.set_property("z-index", "9998");

  if let Err(error) =
    body.append_child(&host)
  {
    tracing::error!(
      ?error,
      "failed attaching loading overlay"
    );
    return;
  }

  let message = message
    .filter(|text| !text.is_empty())
    .unwrap_or(DEFAULT_LOADING_MESSAGE)
    .to_string();
  let app = yew::Renderer::<LoadingOverlay>::with_root_and_props(
    host.into(),
    LoadingOverlayProps { message }
  )
  .render();
  OVERLAY.set(Some(app));
}

/// Removes the overlay if present.
pub fn hide_loading() {
  if let Some(app) = OVERLAY.take() {
    app.destroy();
  }
  if let Some(host) =
    dom::element_by_id(LOADING_SPINNER_ID)
  {
    host.remove();
  }
}
