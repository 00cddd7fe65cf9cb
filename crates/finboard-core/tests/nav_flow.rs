use finboard_core::error::ApiError;
use finboard_core::hooks::ReloadHooks;
use finboard_core::nav::{BalancePanel, NavCommand, NavMode, TemporalNav};
use finboard_core::period::Period;
use finboard_core::UiConfig;
use finboard_shared::{SetViewingDateArgs, ViewingDateDto};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn browse_apply_and_reset_round_trip() {
    let today = Period::new(10, 2026).expect("valid period");
    let config = UiConfig::default();
    let mut nav = TemporalNav::new(config.temporal_nav.mode, today);

    // restore strategy: server remembered a past month
    let stored = ViewingDateDto {
        viewing_month: 1,
        viewing_year: 2026,
        current_month: Some(10),
        current_year: Some(2026),
    };
    nav.seed(Period::new(stored.viewing_month, stored.viewing_year).expect("valid stored period"));
    assert_eq!(nav.view().balance, BalancePanel::Load(Period::new(1, 2026).expect("valid")));

    let reloads = Rc::new(Cell::new(0));
    let mut hooks = ReloadHooks::new();
    let counter = Rc::clone(&reloads);
    hooks.register("loadInvoices", Rc::new(move || counter.set(counter.get() + 1)));

    assert_eq!(nav.prev_month(), NavCommand::Render);
    assert_eq!(nav.view().display_label, "Dezembro/2025");
    assert_eq!(nav.view().balance, BalancePanel::Hidden);

    let started = nav.generation();
    let NavCommand::Persist(period) = nav.apply() else {
        panic!("apply must persist");
    };
    let body = SetViewingDateArgs {
        month: period.month(),
        year: period.year(),
    };
    assert_eq!(body, SetViewingDateArgs { month: 12, year: 2025 });

    // any later step makes results fetched for the older state stale
    nav.next_month();
    assert!(!nav.is_current_generation(started));

    let command = nav.go_to_today();
    assert!(command.commits());
    let generation = nav.generation();
    if nav.is_current_generation(generation) {
        hooks.fire();
    }
    assert_eq!(reloads.get(), 1);
    assert!(!nav.view().show_not_current_alert);
}

#[test]
fn immediate_mode_never_shows_pending_state() {
    let config = UiConfig::from_toml_str("[temporal_nav]\nmode = \"immediate\"\n").expect("config");
    let mut nav = TemporalNav::new(config.temporal_nav.mode, Period::new(1, 2026).expect("valid"));
    assert_eq!(config.temporal_nav.mode, NavMode::Immediate);

    for _ in 0..3 {
        let command = nav.prev_month();
        assert!(command.commits());
        let view = nav.view();
        assert!(view.apply_disabled);
        assert!(!view.show_applied_hint);
        assert_eq!(view.display_label, view.applied_label);
    }
    assert_eq!(nav.applied(), Period::new(10, 2025).expect("valid"));
}

#[test]
fn failed_fetch_message_is_user_facing() {
    let err = ApiError::from_response(422, r#"{"message": "Mês inválido"}"#);
    assert_eq!(err.user_message(), "Mês inválido");
}
