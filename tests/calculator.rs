//! End-to-end behavior of the expression store driven through `handle`.

use rpncalc::app::{handle, handle_event, AppState, CalculatorState, Effect, Event};
use rpncalc::domain::token::tokens;
use rpncalc::Button;

fn keys(input: &str) -> Vec<Button> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '*' => Button::Multiply,
            '/' => Button::Divide,
            'C' => Button::Clear,
            '<' => Button::Backspace,
            other => {
                let mut buf = [0; 4];
                Button::from_symbol(other.encode_utf8(&mut buf)).expect("known key")
            }
        })
        .collect()
}

fn run(input: &str) -> AppState {
    let mut state = AppState::default();
    for button in keys(input) {
        handle(&mut state, button);
    }
    state
}

fn display(state: &AppState) -> String {
    state.snapshot().display_text()
}

#[test]
fn equals_is_idempotent() {
    let mut state = run("2+3=");
    let first = state.snapshot();
    assert_eq!(first.display_text(), "5");
    assert_eq!(first.state, CalculatorState::CalculatedResult);

    let second = handle(&mut state, Button::Equals);
    assert_eq!(second, first);
}

#[test]
fn digits_strip_leading_zeros() {
    assert_eq!(display(&run("005")), "5");
    assert_eq!(display(&run("1007")), "1007");
    assert_eq!(display(&run("2+005")), "2+5");
}

#[test]
fn operator_precedence() {
    assert_eq!(display(&run("2+3*4=")), "14");
    assert_eq!(display(&run("(2+3)*4=")), "20");
    assert_eq!(display(&run("8-2-1=")), "5");
    assert_eq!(display(&run("8/4/2=")), "1");
}

#[test]
fn division_by_zero_locks_until_clear() {
    let mut state = run("5/0=");
    assert_eq!(state.expression, tokens(&["Undefined"]));
    assert!(state.result.is_nan());

    for button in [Button::Digit(7), Button::OpenParen, Button::Decimal, Button::Add, Button::Equals] {
        handle(&mut state, button);
        assert_eq!(state.expression, tokens(&["Undefined"]));
    }

    let snapshot = handle(&mut state, Button::Clear);
    assert_eq!(snapshot.expression, tokens(&["0"]));
    assert_eq!(snapshot.state, CalculatorState::Initial);
    assert!(!snapshot.allow_backspace);
}

#[test]
fn backspace_leaves_error_state() {
    let mut state = run("5/0=");
    let snapshot = handle(&mut state, Button::Backspace);
    assert_eq!(snapshot.expression, tokens(&["0"]));

    handle(&mut state, Button::Digit(4));
    assert_eq!(display(&state), "4");
}

#[test]
fn negative_entry() {
    assert_eq!(display(&run("-5=")), "-5");
    assert_eq!(display(&run("3*-2=")), "-6");
    assert_eq!(display(&run("(-4)*2=")), "-8");
}

#[test]
fn negative_fraction_after_operator() {
    assert_eq!(display(&run("3*-.5")), "3×-0.5");
    assert_eq!(display(&run("3*-.5=")), "-1.5");
    assert_eq!(display(&run("(-.25)*4=")), "-1");
}

#[test]
fn dangling_minus_is_cancelled() {
    assert_eq!(display(&run("3*-+")), "3×");
    assert_eq!(display(&run("3*-++")), "3+");
}

#[test]
fn implicit_multiplication() {
    assert_eq!(display(&run("5(")), "5×(");
    assert_eq!(display(&run("5(3=")), "15");
    assert_eq!(display(&run("(2)3=")), "6");
    assert_eq!(display(&run("(2)(3)=")), "6");
}

#[test]
fn backspace_bottoms_out_at_initial() {
    let mut state = run("12+(3.");
    assert_eq!(display(&state), "12+(3.");

    for _ in 0..12 {
        let snapshot = handle(&mut state, Button::Backspace);
        assert!(!snapshot.expression.is_empty());
    }
    assert_eq!(state.expression, tokens(&["0"]));
    assert!(!state.allow_backspace());
}

#[test]
fn auto_close_on_equals() {
    assert_eq!(display(&run("(2+3=")), "5");
    assert_eq!(display(&run("((2+3)*2=")), "10");
}

#[test]
fn dangling_operator_is_dropped_on_equals() {
    assert_eq!(display(&run("2+3*=")), "5");
}

#[test]
fn single_operand_equals_is_noop() {
    let mut state = run("7");
    let before = state.snapshot();
    let after = handle(&mut state, Button::Equals);
    assert_eq!(after, before);
    assert_eq!(after.state, CalculatorState::EnteringElement);
}

#[test]
fn malformed_expression_becomes_undefined() {
    let mut state = AppState::default();
    state.expression = tokens(&["2", "+", "-", "3"]);
    state.state = CalculatorState::EnteringElement;

    let snapshot = handle(&mut state, Button::Equals);
    assert_eq!(snapshot.expression, tokens(&["Undefined"]));
    assert_eq!(snapshot.state, CalculatorState::CalculatedResult);
}

#[test]
fn scientific_threshold() {
    assert_eq!(display(&run("120000*100000=")), "1.2e+10");
    assert_eq!(display(&run("1/2000=")), "0.0005");
    assert_eq!(display(&run("1/3=")), "0.33333333");
}

#[test]
fn backspace_through_scientific_result() {
    let mut state = run("1/100000=");
    assert_eq!(display(&state), "1e-05");

    for button in keys("<<") {
        handle(&mut state, button);
    }
    assert_eq!(display(&state), "1");
    assert!(state.expression.iter().all(|t| t.is_number()));

    for button in keys("1+2=") {
        handle(&mut state, button);
    }
    assert_eq!(display(&state), "13");
}

#[test]
fn decimals() {
    assert_eq!(display(&run(".5+.25=")), "0.75");
    assert_eq!(display(&run("1.5.")), "1.5");
    assert_eq!(display(&run("3.=")), "3");
}

#[test]
fn result_starts_fresh_or_continues() {
    assert_eq!(display(&run("2+3=7")), "7");
    assert_eq!(display(&run("2+3=+1=")), "6");
    assert_eq!(display(&run("2+3=.")), "0.");
    assert_eq!(display(&run("2+3=(")), "(");
}

#[test]
fn delete_key_label_follows_state() {
    let mut state = AppState::default();
    assert!(!state.snapshot().allow_backspace);
    assert!(handle(&mut state, Button::Digit(9)).allow_backspace);
    assert!(handle(&mut state, Button::Add).allow_backspace);
    handle(&mut state, Button::Digit(1));
    assert!(!handle(&mut state, Button::Equals).allow_backspace);
}

#[test]
fn close_paren_rules() {
    assert_eq!(display(&run(")")), "0");
    assert_eq!(display(&run("(")), "(");
    assert_eq!(display(&run("()")), "(");
    assert_eq!(display(&run("(2+)")), "(2+");
    assert_eq!(display(&run("(2))")), "(2)");
}

#[test]
fn every_change_is_published_once() {
    let mut state = AppState::default();
    for button in keys("12+(3*4)=") {
        let before = state.snapshot();
        let (changed, effects) = handle_event(&mut state, &Event::Button(button)).unwrap();
        let published = effects
            .iter()
            .filter(|e| matches!(e, Effect::ExpressionChanged(_)))
            .count();

        assert_eq!(changed, before != state.snapshot());
        assert_eq!(published, usize::from(changed));
    }
    assert_eq!(display(&state), "24");
}

#[test]
fn voice_transcript_drives_keys() {
    let mut state = AppState::default();
    for partial in ["six", "six times", "six times seven", "six times seven equals"] {
        handle_event(&mut state, &Event::Voice(partial.to_string())).unwrap();
    }
    assert_eq!(display(&state), "42");
}
