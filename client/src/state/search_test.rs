use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn short_inputs_hide_and_clear() {
    let mut state = SearchState::default();
    if let QueryPlan::Fetch { generation, .. } = state.on_input("ab", 2) {
        state.accept(generation, strings(&["abc"]));
    }
    assert!(state.visible);

    for value in ["", "a"] {
        assert_eq!(state.on_input(value, 2), QueryPlan::Clear);
        assert!(!state.visible);
        assert!(state.results.is_empty());
    }
}

#[test]
fn length_counts_characters_not_bytes() {
    let mut state = SearchState::default();
    assert_eq!(state.on_input("é", 2), QueryPlan::Clear);
    assert!(matches!(state.on_input("éa", 2), QueryPlan::Fetch { .. }));
}

#[test]
fn two_results_render_visible_list() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation, query } = state.on_input("ab", 2) else {
        panic!("expected fetch");
    };
    assert_eq!(query, "ab");
    assert!(state.accept(generation, strings(&["abc", "abd"])));
    assert_eq!(state.results, strings(&["abc", "abd"]));
    assert!(state.visible);
}

#[test]
fn empty_response_hides_list() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation, .. } = state.on_input("zz", 2) else {
        panic!("expected fetch");
    };
    assert!(state.accept(generation, Vec::new()));
    assert!(!state.visible);
}

#[test]
fn stale_response_is_dropped() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation: old, .. } = state.on_input("ab", 2) else {
        panic!("expected fetch");
    };
    let QueryPlan::Fetch { generation: new, .. } = state.on_input("abc", 2) else {
        panic!("expected fetch");
    };

    assert!(state.accept(new, strings(&["abcd"])));
    assert!(!state.accept(old, strings(&["abx", "aby"])));
    assert_eq!(state.results, strings(&["abcd"]));
}

#[test]
fn response_after_clearing_does_not_reopen_list() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation, .. } = state.on_input("ab", 2) else {
        panic!("expected fetch");
    };
    state.on_input("a", 2);
    assert!(!state.accept(generation, strings(&["abc"])));
    assert!(!state.visible);
}

#[test]
fn select_returns_value_and_hides() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation, .. } = state.on_input("ab", 2) else {
        panic!("expected fetch");
    };
    state.accept(generation, strings(&["abc", "abd"]));
    assert_eq!(state.select(1).as_deref(), Some("abd"));
    assert!(!state.visible);
    assert_eq!(state.select(9), None);
}

#[test]
fn dismiss_hides_but_keeps_results() {
    let mut state = SearchState::default();
    let QueryPlan::Fetch { generation, .. } = state.on_input("ab", 2) else {
        panic!("expected fetch");
    };
    state.accept(generation, strings(&["abc"]));
    state.dismiss();
    assert!(!state.visible);
    assert_eq!(state.results.len(), 1);
}
