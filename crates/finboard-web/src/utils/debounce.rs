use finboard_core::debounce::{
  Debouncer,
  Scheduler
};
use gloo::timers::callback::Timeout;
use js_sys::{
  Array,
  Function
};
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

/// `setTimeout`-backed timers; dropping
/// the [`Timeout`] clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
  type Handle = Timeout;

  fn schedule(
    &self,
    wait_ms: u32,
    task: Box<dyn FnOnce()>
  ) -> Timeout {
    Timeout::new(wait_ms, task)
  }
}

pub fn debounce<A: 'static>(
  wait_ms: u32,
  func: impl Fn(A) + 'static
) -> impl Fn(A) {
  let debouncer = Debouncer::new(
    GlooScheduler,
    wait_ms,
    func
  );
  move |args| debouncer.call(args)
}

/// Drops trailing arguments the caller
/// never passed, so `func` sees the
/// original arity.
fn trim_missing<T>(
  mut args: Vec<T>,
  is_missing: impl Fn(&T) -> bool
) -> Vec<T> {
  while args.last().is_some_and(&is_missing)
  {
    args.pop();
  }
  args
}

/// JavaScript flavour: wraps `func` and
/// returns a function forwarding up to
/// three arguments of the last call.
pub fn debounce_js(
  func: Function,
  wait: f64
) -> JsValue {
  let wait_ms = if wait.is_finite()
    && wait > 0.0
  {
    wait.min(f64::from(u32::MAX)) as u32
  } else {
    0
  };

  let debounced = debounce(
    wait_ms,
    move |args: Array| {
      if let Err(error) =
        func.apply(&JsValue::NULL, &args)
      {
        tracing::error!(
          ?error,
          "debounced callback threw"
        );
      }
    }
  );

  Closure::<
    dyn Fn(JsValue, JsValue, JsValue)
  >::new(
    move |a: JsValue,
          b: JsValue,
          c: JsValue| {
      let args = trim_missing(
        vec![a, b, c],
        JsValue::is_undefined
      );
      debounced(
        args.into_iter().collect::<Array>()
      );
    }
  )
  .into_js_value()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_trailing_missing_arguments_are_dropped()
  {
    assert_eq!(
      trim_missing(
        vec![Some(1), None, Some(3)],
        Option::is_none
      ),
      vec![Some(1), None, Some(3)]
    );
    assert_eq!(
      trim_missing(
        vec![Some("query"), None, None],
        Option::is_none
      ),
      vec![Some("query")]
    );
    assert!(
      trim_missing(
        vec![None::<u8>, None, None],
        Option::is_none
      )
      .is_empty()
    );
  }
}
