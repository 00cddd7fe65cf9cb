use finboard_core::{
  ApiError,
  ApiResult,
  Period,
  UiConfig
};
use finboard_shared::{
  ProjectedBalanceDto,
  SetViewingDateAck,
  SetViewingDateArgs,
  ViewingDateDto
};
use gloo::net::http::{
  Request,
  Response
};
use serde::{
  Serialize,
  de::DeserializeOwned
};

fn network_error(
  error: gloo::net::Error
) -> ApiError {
  ApiError::Network(error.to_string())
}

/// Sends `request` and decodes a JSON
/// body; non-2xx statuses become
/// [`ApiError::Status`].
pub async fn send_json<R>(
  request: Request
) -> ApiResult<R>
where
  R: DeserializeOwned
{
  let response = request
    .send()
    .await
    .map_err(network_error)?;
  let response =
    ensure_success(response).await?;

  response.json::<R>().await.map_err(
    |e| ApiError::Decode(format!("decode error: {e}"))
  )
}

async fn ensure_success(
  response: Response
) -> ApiResult<Response> {
  if response.ok() {
    return Ok(response);
  }

  let status = response.status();
  let body = match response.text().await
  {
    | Ok(body) => body,
    | Err(error) => {
      tracing::debug!(
        status,
        %error,
        "failed reading error body"
      );
      String::new()
    }
  };
  Err(ApiError::from_response(
    status, &body
  ))
}

pub async fn get_json<R>(
  url: &str
) -> ApiResult<R>
where
  R: DeserializeOwned
{
  let request = Request::get(url)
    .build()
    .map_err(network_error)?;
  send_json(request).await
}

pub async fn post_json<R, A>(
  url: &str,
  payload: &A
) -> ApiResult<R>
where
  R: DeserializeOwned,
  A: Serialize + ?Sized
{
  let request = Request::post(url)
    .json(payload)
    .map_err(|e| {
      ApiError::Decode(format!(
        "failed to encode args: {e}"
      ))
    })?;
  send_json(request).await
}

pub async fn post_empty<R>(
  url: &str
) -> ApiResult<R>
where
  R: DeserializeOwned
{
  let request = Request::post(url)
    .build()
    .map_err(network_error)?;
  send_json(request).await
}

pub async fn get_viewing_date(
  config: &UiConfig
) -> ApiResult<ViewingDateDto> {
  get_json(
    &config.api_url("get-viewing-date")
  )
  .await
}

pub async fn set_viewing_date(
  config: &UiConfig,
  period: Period
) -> ApiResult<SetViewingDateAck> {
  post_json(
    &config.api_url("set-viewing-date"),
    &SetViewingDateArgs {
      month: period.month(),
      year:  period.year()
    }
  )
  .await
}

pub async fn reset_viewing_date(
  config: &UiConfig
) -> ApiResult<ViewingDateDto> {
  post_empty(
    &config
      .api_url("reset-viewing-date")
  )
  .await
}

pub async fn projected_balance(
  config: &UiConfig,
  period: Period
) -> ApiResult<ProjectedBalanceDto> {
  let url = format!(
    "{}?month={}&year={}",
    config.api_url("projected-balance"),
    period.month(),
    period.year()
  );
  get_json(&url).await
}
