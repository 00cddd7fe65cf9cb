use finboard_core::Period;
use finboard_core::format::format_currency;
use finboard_shared::ProjectedBalanceDto;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ProjectedBalancePanelProps {
  pub period:  Period,
  pub balance: ProjectedBalanceDto
}

/// Forecast for a month away from today:
/// what is left after paying everything
/// due up to the previous month.
#[function_component(ProjectedBalancePanel)]
pub fn projected_balance_panel(
  props: &ProjectedBalancePanelProps
) -> Html {
  let positive =
    props.balance.is_positive();
  let due_until =
    props.period.prev().month_name();
  let (tone, arrow) = if positive {
    ("text-success", "fa-arrow-up")
  } else {
    ("text-danger", "fa-arrow-down")
  };

  html! {
      <div class="alert alert-info shadow-sm">
          <h6 class="alert-heading">
              <i class="fas fa-calculator"></i>
              { format!(" Situação Financeira Projetada - {}", props.period.label()) }
          </h6>
          <hr />
          <div class="row">
              <div class="col-md-4">
                  <strong>{ "💵 Saldo Atual:" }</strong>
                  <h4 class="text-primary">{ format_currency(props.balance.current_balance) }</h4>
              </div>
              <div class="col-md-4">
                  <strong>{ format!("💸 A Pagar (até {due_until}):") }</strong>
                  <h4 class="text-danger">{ format_currency(props.balance.total_to_pay) }</h4>
              </div>
              <div class="col-md-4">
                  <strong>{ "📈 Saldo Projetado:" }</strong>
                  <h4 class={tone}>
                      { format_currency(props.balance.projected_balance) }
                      { " " }
                      <i class={classes!("fas", arrow)}></i>
                  </h4>
              </div>
          </div>
          <hr />
          <small class="text-muted">
              <i class="fas fa-info-circle"></i>
              { " " }
              <strong>{ format!("Este é o saldo que você terá se pagar todas as faturas e boletos até {due_until}.") }</strong>
          </small>
      </div>
  }
}
