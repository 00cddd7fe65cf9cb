use std::future::Future;

use finboard_core::submit::SubmitGuard;
use js_sys::{
  Function,
  Promise
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use super::show_toast;
use crate::components::ToastKind;

pub const BUSY_MESSAGE: &str =
  "Aguarde, processando...";

thread_local! {
  static SUBMIT_GUARD: SubmitGuard =
    SubmitGuard::new();
}

/// Runs `callback` unless a previous
/// submission is still in flight. The
/// lock is held until the returned
/// future settles. Returns whether the
/// callback ran.
pub fn prevent_double_submit<F, Fut>(
  callback: F
) -> bool
where
  F: FnOnce() -> Fut,
  Fut: Future<Output = ()> + 'static
{
  let Some(permit) = SUBMIT_GUARD
    .with(SubmitGuard::try_acquire)
  else {
    show_toast(
      BUSY_MESSAGE,
      ToastKind::Warning
    );
    return false;
  };

  wasm_bindgen_futures::spawn_local(
    permit.hold(callback())
  );
  true
}

/// JavaScript flavour: `callback` may
/// return a value or a promise; either
/// outcome of the promise releases the
/// lock.
pub fn prevent_double_submit_js(
  callback: Function
) -> bool {
  prevent_double_submit(move || {
    let returned =
      callback.call0(&JsValue::NULL);
    async move {
      let settled = match returned {
        | Ok(value) => {
          JsFuture::from(
            Promise::resolve(&value)
          )
          .await
          .map(|_| ())
        }
        | Err(error) => Err(error)
      };
      if let Err(error) = settled {
        tracing::error!(
          ?error,
          "guarded submission failed"
        );
      }
    }
  })
}
