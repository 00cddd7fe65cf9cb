mod api;
mod components;
mod config;
mod dom;
mod exports;
mod temporal_nav;
mod utils;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let config = config::ui_config();
  tracing::info!(
    version = config.version,
    timezone = %config.timezone,
    "starting finboard frontend"
  );

  exports::install_utils();

  dom::on_ready(move || {
    utils::forms::wire_page();

    match temporal_nav::TemporalNavWidget::mount(
      config
    ) {
      | Some(widget) => {
        // first render happens once the
        // viewing date has been seeded
        exports::install_temporal_nav(
          &widget
        );
      }
      | None => {
        tracing::debug!(
          "page has no temporal navigation"
        );
      }
    }
  });
}
