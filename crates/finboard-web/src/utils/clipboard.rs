use js_sys::{
  Function,
  Promise,
  Reflect
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use wasm_bindgen_futures::JsFuture;

use super::show_toast;
use crate::components::ToastKind;
use crate::dom;

pub const COPIED_MESSAGE: &str =
  "Copiado para a área de transferência!";
pub const COPY_FAILED_MESSAGE: &str =
  "Erro ao copiar";

pub fn copy_to_clipboard(text: String) {
  wasm_bindgen_futures::spawn_local(
    async move {
      match write_text(&text).await {
        | Ok(()) => {
          show_toast(
            COPIED_MESSAGE,
            ToastKind::Success
          );
        }
        | Err(error) => {
          tracing::error!(
            ?error,
            "copy to clipboard failed"
          );
          show_toast(
            COPY_FAILED_MESSAGE,
            ToastKind::Error
          );
        }
      }
    }
  );
}

async fn write_text(
  text: &str
) -> Result<(), JsValue> {
  let window = dom::window().ok_or_else(
    || JsValue::from_str("no window")
  )?;
  let clipboard = Reflect::get(
    &window.navigator(),
    &JsValue::from_str("clipboard")
  )?;
  if clipboard.is_undefined()
    || clipboard.is_null()
  {
    return Err(JsValue::from_str(
      "clipboard api unavailable"
    ));
  }

  let write_text = Reflect::get(
    &clipboard,
    &JsValue::from_str("writeText")
  )?
  .dyn_into::<Function>()?;
  let promise = write_text
    .call1(
      &clipboard,
      &JsValue::from_str(text)
    )?
    .dyn_into::<Promise>()?;
  JsFuture::from(promise).await?;
  Ok(())
}
