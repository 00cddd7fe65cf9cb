use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct LoadingOverlayProps {
  pub message: String
}

#[function_component(LoadingOverlay)]
pub fn loading_overlay(
  props: &LoadingOverlayProps
) -> Html {
  html! {
      <div class="text-center">
          <div class="spinner-border text-light" role="status">
              <span class="visually-hidden">{ "Carregando..." }</span>
          </div>
          <p class="text-white mt-2">{ props.message.clone() }</p>
      </div>
  }
}
