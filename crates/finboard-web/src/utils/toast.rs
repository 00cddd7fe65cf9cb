use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use web_sys::{
  Document,
  Element
};
use yew::{
  AppHandle,
  Callback,
  MouseEvent
};

use crate::components::{
  ToastKind,
  ToastView,
  ToastViewProps
};
use crate::config::ui_config;
use crate::dom;

const TOAST_CONTAINER_ID: &str =
  "toastContainer";

/// Appends a dismissible toast that
/// removes itself after the configured
/// delay.
pub fn show_toast(
  message: &str,
  kind: ToastKind
) {
  let Some(document) = dom::document()
  else {
    return;
  };
  let Some(container) =
    toast_container(&document)
  else {
    tracing::warn!(
      message,
      "no toast container available"
    );
    return;
  };
  let slot = match document
    .create_element("div")
  {
    | Ok(slot) => slot,
    | Err(error) => {
      tracing::error!(
        ?error,
        "failed creating toast element"
      );
      return;
    }
  };
  slot.set_id(&format!(
    "toast-{}",
    uuid::Uuid::new_v4()
  ));
  if let Err(error) =
    container.append_child(&slot)
  {
    tracing::error!(
      ?error,
      "failed attaching toast"
    );
    return;
  }

  let live: Rc<
    RefCell<Option<AppHandle<ToastView>>>
  > = Rc::new(RefCell::new(None));
  let dismiss = {
    let live = live.clone();
    let slot = slot.clone();
    Rc::new(Dismissal::new(move || {
      if let Some(app) =
        live.borrow_mut().take()
      {
        app.destroy();
      }
      slot.remove();
    }))
  };

  let on_dismiss = {
    let dismiss = dismiss.clone();
    Callback::from(
      move |_: MouseEvent| {
        // leave the click handler before
        // tearing the component down
        let dismiss = dismiss.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            dismiss.dismiss();
          }
        );
      }
    )
  };

  let app = yew::Renderer::<ToastView>::with_root_and_props(
    slot,
    ToastViewProps {
      message: message.to_string(),
      kind,
      on_dismiss
    }
  )
  .render();
  *live.borrow_mut() = Some(app);

  Timeout::new(
    ui_config().toast.delay_ms,
    move || {
      dismiss.dismiss();
    }
  )
  .forget();
}

/// Teardown shared by the close button
/// and the timer; only the first caller
/// runs it.
struct Dismissal {
  teardown: RefCell<Option<Box<dyn FnOnce()>>>
}

impl Dismissal {
  fn new(
    teardown: impl FnOnce() + 'static
  ) -> Self {
    Self {
      teardown: RefCell::new(Some(
        Box::new(teardown)
      ))
    }
  }

  fn dismiss(&self) -> bool {
    let teardown =
      self.teardown.borrow_mut().take();
    match teardown {
      | Some(teardown) => {
        teardown();
        true
      }
      | None => false
    }
  }
}

/// Reuses `existing`, otherwise builds a
/// new one.
fn find_or_create<T>(
  existing: Option<T>,
  create: impl FnOnce() -> Option<T>
) -> Option<T> {
  match existing {
    | Some(found) => Some(found),
    | None => create()
  }
}

fn toast_container(
  document: &Document
) -> Option<Element> {
  find_or_create(
    document.get_element_by_id(
      TOAST_CONTAINER_ID
    ),
    || create_container(document)
  )
}

fn create_container(
  document: &Document
) -> Option<Element> {
  let container = document
    .create_element("div")
    .ok()?;
  container.set_id(TOAST_CONTAINER_ID);
  container.set_class_name(
    "toast-container position-fixed \
     bottom-0 end-0 p-3"
  );
  if let Err(error) = container
    .set_attribute("style", "z-index: 9999")
  {
    tracing::warn!(
      ?error,
      "failed styling toast container"
    );
  }
  document
    .body()?
    .append_child(&container)
    .ok()?;
  tracing::debug!(
    "created toast container"
  );
  Some(container)
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;

  #[test]
  fn close_click_and_timer_tear_down_once()
  {
    let removed = Rc::new(Cell::new(0));
    let dismissal = {
      let removed = Rc::clone(&removed);
      Dismissal::new(move || {
        removed.set(removed.get() + 1)
      })
    };

    assert!(dismissal.dismiss());
    assert!(!dismissal.dismiss());
    assert_eq!(removed.get(), 1);
  }

  #[test]
  fn container_is_created_only_when_missing()
  {
    let created = Cell::new(0);
    let create = || {
      created.set(created.get() + 1);
      Some("new container")
    };

    assert_eq!(
      find_or_create(
        Some("existing container"),
        create
      ),
      Some("existing container")
    );
    assert_eq!(created.get(), 0);

    assert_eq!(
      find_or_create(None, create),
      Some("new container")
    );
    assert_eq!(created.get(), 1);
  }
}
