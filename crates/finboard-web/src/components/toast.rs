use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum ToastKind {
  Success,
  Error,
  Warning,
  Info
}

impl ToastKind {
  /// Unknown kinds render as `info`.
  pub fn from_key(raw: &str) -> Self {
    match raw.trim() {
      | "success" => Self::Success,
      | "error" => Self::Error,
      | "warning" => Self::Warning,
      | _ => Self::Info
    }
  }

  pub fn bg_class(self) -> &'static str {
    match self {
      | Self::Success => "bg-success",
      | Self::Error => "bg-danger",
      | Self::Warning => "bg-warning",
      | Self::Info => "bg-info"
    }
  }
}

#[derive(Properties, PartialEq)]
pub struct ToastViewProps {
  pub message:    String,
  pub kind:       ToastKind,
  pub on_dismiss: Callback<MouseEvent>
}

#[function_component(ToastView)]
pub fn toast_view(
  props: &ToastViewProps
) -> Html {
  html! {
      <div
          class={classes!("toast", "show", "align-items-center", "text-white", props.kind.bg_class(), "border-0")}
          role="alert"
          aria-live="assertive"
          aria-atomic="true"
      >
          <div class="d-flex">
              <div class="toast-body">{ props.message.clone() }</div>
              <button
                  type="button"
                  class="btn-close btn-close-white me-2 m-auto"
                  aria-label="Close"
                  onclick={props.on_dismiss.clone()}
              ></button>
          </div>
      </div>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_kinds_map_to_bootstrap_backgrounds()
  {
    assert_eq!(
      ToastKind::from_key("success")
        .bg_class(),
      "bg-success"
    );
    assert_eq!(
      ToastKind::from_key("error")
        .bg_class(),
      "bg-danger"
    );
    assert_eq!(
      ToastKind::from_key(" warning ")
        .bg_class(),
      "bg-warning"
    );
  }

  #[test]
  fn unknown_kind_falls_back_to_info() {
    assert_eq!(
      ToastKind::from_key("danger"),
      ToastKind::Info
    );
    assert_eq!(
      ToastKind::from_key(""),
      ToastKind::Info
    );
  }
}
