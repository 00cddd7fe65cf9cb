use std::collections::BTreeMap;

use finboard_core::{
  ApiError,
  ApiResult
};
use gloo::net::http::{
  Request,
  RequestBuilder
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{
  hide_loading,
  show_loading,
  show_toast
};
use crate::api::send_json;
use crate::components::ToastKind;

/// Subset of `fetch` init options the
/// pages pass along.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
  pub method:  Option<String>,
  pub headers: BTreeMap<String, String>,
  pub body:    Option<String>
}

/// Fetch behind the loading overlay.
/// Failures are logged, shown as an
/// error toast, and returned.
pub async fn fetch_with_error_handling<
  R
>(
  url: &str,
  options: &FetchOptions
) -> ApiResult<R>
where
  R: DeserializeOwned
{
  show_loading(None);
  let result = match build_request(
    url, options
  ) {
    | Ok(request) => {
      send_json::<R>(request).await
    }
    | Err(error) => Err(error)
  };
  hide_loading();

  if let Err(error) = &result {
    report_failure(url, error);
  }
  result
}

/// Logs `error` and shows it as an error
/// toast.
pub fn report_failure(
  url: &str,
  error: &ApiError
) {
  tracing::error!(
    url,
    %error,
    status = ?error.status(),
    "request failed"
  );
  show_toast(
    &error.user_message(),
    ToastKind::Error
  );
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Patch,
  Delete
}

impl HttpMethod {
  /// Case-insensitive; a missing method
  /// is `GET`, an unsupported one `None`.
  pub fn parse(
    raw: Option<&str>
  ) -> Option<Self> {
    let method = raw
      .map(str::trim)
      .filter(|method| !method.is_empty())
      .unwrap_or("GET")
      .to_ascii_uppercase();
    match method.as_str() {
      | "GET" => Some(Self::Get),
      | "POST" => Some(Self::Post),
      | "PUT" => Some(Self::Put),
      | "PATCH" => Some(Self::Patch),
      | "DELETE" => Some(Self::Delete),
      | _ => None
    }
  }

  fn builder(
    self,
    url: &str
  ) -> RequestBuilder {
    match self {
      | Self::Get => Request::get(url),
      | Self::Post => Request::post(url),
      | Self::Put => Request::put(url),
      | Self::Patch => Request::patch(url),
      | Self::Delete => Request::delete(url)
    }
  }
}

fn build_request(
  url: &str,
  options: &FetchOptions
) -> ApiResult<Request> {
  let method =
    HttpMethod::parse(options.method.as_deref())
      .unwrap_or_else(|| {
        tracing::warn!(
          method = ?options.method,
          "unsupported method; sending GET"
        );
        HttpMethod::Get
      });

  let mut builder = method.builder(url);
  for (name, value) in &options.headers {
    builder = builder.header(name, value);
  }

  let request = match &options.body {
    | Some(body) => {
      builder.body(body.clone())
    }
    | None => builder.build()
  };
  request.map_err(|e| {
    ApiError::Network(e.to_string())
  })
}
