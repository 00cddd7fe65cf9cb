mod loading_overlay;
mod projected_balance;
mod toast;

pub use loading_overlay::{
  LoadingOverlay,
  LoadingOverlayProps
};
pub use projected_balance::{
  ProjectedBalancePanel,
  ProjectedBalancePanelProps
};
pub use toast::{
  ToastKind,
  ToastView,
  ToastViewProps
};
