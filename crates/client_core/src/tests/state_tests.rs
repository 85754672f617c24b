use super::*;

#[test]
fn cursor_tracks_call_count_modulo_length() {
    let mut cycle = MessageCycle::default();
    let len = cycle.len();
    for calls in 1..=(3 * len + 2) {
        cycle.advance();
        assert_eq!(cycle.cursor(), calls % len);
    }
}

#[test]
fn full_cycle_returns_to_initial_message() {
    let mut cycle = MessageCycle::default();
    let initial = cycle.current().to_string();
    let len = cycle.len();

    for _ in 0..len - 1 {
        assert_ne!(cycle.advance(), initial);
    }
    assert_eq!(cycle.advance(), initial);
}

#[test]
fn cycling_does_not_depend_on_duplicate_entries() {
    let mut cycle = MessageCycle::new(["same", "same", "other"]).expect("non-empty");
    assert_eq!(cycle.advance(), "same");
    assert_eq!(cycle.cursor(), 1);
    assert_eq!(cycle.advance(), "other");
    assert_eq!(cycle.advance(), "same");
    assert_eq!(cycle.cursor(), 0);
}

#[test]
fn single_entry_cycle_stays_put() {
    let mut cycle = MessageCycle::new(["only"]).expect("non-empty");
    assert!(!cycle.is_empty());
    assert_eq!(cycle.len(), 1);
    assert_eq!(cycle.advance(), "only");
    assert_eq!(cycle.cursor(), 0);
}

#[test]
fn empty_cycle_is_rejected() {
    assert!(MessageCycle::new(Vec::<String>::new()).is_none());
}

#[test]
fn increment_then_decrement_is_identity() {
    for start in [0, 1, -1, 41, -500, i64::MAX, i64::MIN] {
        let mut counter = Counter::new(start);
        counter.increment();
        counter.decrement();
        assert_eq!(counter.value(), start);
    }
}

#[test]
fn reset_always_returns_to_zero() {
    for start in [0, 7, -7, i64::MAX, i64::MIN] {
        let mut counter = Counter::new(start);
        counter.reset();
        assert_eq!(counter.value(), 0);
    }
}

#[test]
fn fresh_state_is_idle_and_unknown() {
    let state = ClientState::default();
    assert_eq!(state.status, ConnectionStatus::Unknown);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.api_response.is_none());
    assert_eq!(state.counter.value(), 0);
    assert_eq!(state.messages.current(), DEFAULT_MESSAGES[0]);
    assert!(state.user_name.is_empty());
}
