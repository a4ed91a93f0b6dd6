//! The variable store, condition evaluation and text substitution.

use std::collections::HashMap;

use crate::consts::{
    ASSIGNMENT_MARKER, CLAUSE_SEPARATOR, COMPARISON_MARKER, DIVERSION_MARKER, SUBSTITUTION_CLOSE,
    SUBSTITUTION_OPEN,
};

/// Mapping from variable name to string value.
///
/// Variables persist across conversations within one playthrough. Lookups
/// of unset names fail safely: a comparison against an unset variable is
/// simply not a match.
pub type VariableSet = HashMap<String, String>;

/// Evaluate a condition/assignment expression against the variable store.
///
/// The expression splits on `|` into clauses, evaluated in order:
///
/// *   `name==value>target` — if the variable matches the value, evaluation
///     stops and returns the diversion target.
/// *   `name=value` — assigns the value and moves on to the next clause.
///
/// A comparison without a `>` target never matches, and comparisons against
/// unset variables never match; neither raises an error.
///
/// # Examples
/// ```
/// # use parley::{evaluate, VariableSet};
/// let mut variables = VariableSet::new();
/// variables.insert("day".to_string(), "3".to_string());
///
/// assert_eq!(evaluate("day==3>ending_good", &mut variables).unwrap(), "ending_good");
/// assert!(evaluate("day==4>ending_bad", &mut variables).is_none());
///
/// assert!(evaluate("score=10", &mut variables).is_none());
/// assert_eq!(variables.get("score").unwrap(), "10");
/// ```
pub fn evaluate(expression: &str, variables: &mut VariableSet) -> Option<String> {
    for clause in expression.split(CLAUSE_SEPARATOR) {
        if let Some((name, remainder)) = clause.split_once(COMPARISON_MARKER) {
            if let Some((value, target)) = remainder.split_once(DIVERSION_MARKER) {
                if variables.get(name).map(|current| current.as_str()) == Some(value) {
                    return Some(target.to_string());
                }
            }
        } else if let Some((name, value)) = clause.split_once(ASSIGNMENT_MARKER) {
            variables.insert(name.to_string(), value.to_string());
        }
    }

    None
}

/// Check a plain `name==value` probe against the variable store.
///
/// Used by host-side skip logic to gate content on earlier choices. Unset
/// variables and expressions without a `==` are simply not a match.
pub fn check(expression: &str, variables: &VariableSet) -> bool {
    match expression.split_once(COMPARISON_MARKER) {
        Some((name, value)) => {
            variables.get(name).map(|current| current.as_str()) == Some(value)
        }
        None => false,
    }
}

/// Replace every `<$name>` span with the value of the named variable.
///
/// Spans naming unset variables are left verbatim.
///
/// # Examples
/// ```
/// # use parley::{substitute, VariableSet};
/// let mut variables = VariableSet::new();
/// variables.insert("name".to_string(), "Miriam".to_string());
///
/// assert_eq!(substitute("Hello <$name>!", &variables), "Hello Miriam!");
/// assert_eq!(substitute("Hello <$stranger>!", &variables), "Hello <$stranger>!");
/// ```
pub fn substitute(text: &str, variables: &VariableSet) -> String {
    if !text.contains(SUBSTITUTION_OPEN) {
        return text.to_string();
    }

    let mut result = text.to_string();

    for (name, value) in variables {
        let span = format!("{}{}{}", SUBSTITUTION_OPEN, name, SUBSTITUTION_CLOSE);
        result = result.replace(&span, value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_variables(pairs: &[(&str, &str)]) -> VariableSet {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn matching_comparison_yields_its_diversion_target() {
        let mut variables = mock_variables(&[("day", "3")]);

        assert_eq!(
            evaluate("day==3>ending_good", &mut variables).unwrap(),
            "ending_good"
        );
    }

    #[test]
    fn non_matching_comparison_yields_nothing() {
        let mut variables = mock_variables(&[("day", "3")]);

        assert!(evaluate("day==4>ending_bad", &mut variables).is_none());
    }

    #[test]
    fn comparisons_against_unset_variables_never_match() {
        let mut variables = VariableSet::new();

        assert!(evaluate("day==3>ending_good", &mut variables).is_none());
    }

    #[test]
    fn assignment_mutates_the_store_and_yields_nothing() {
        let mut variables = VariableSet::new();

        assert!(evaluate("score=10", &mut variables).is_none());
        assert_eq!(variables.get("score").unwrap(), "10");
    }

    #[test]
    fn clauses_evaluate_in_order_until_a_comparison_matches() {
        let mut variables = mock_variables(&[("met_sal", "1")]);

        let target = evaluate("met_bo=1|met_sal==1>sal_return|met_sal=1", &mut variables);

        assert_eq!(target.unwrap(), "sal_return");
        assert_eq!(variables.get("met_bo").unwrap(), "1");
        // The clause after the matching comparison never ran
        assert_eq!(variables.get("met_sal").unwrap(), "1");
    }

    #[test]
    fn comparison_without_diversion_target_is_a_safe_no_match() {
        let mut variables = mock_variables(&[("day", "3")]);

        assert!(evaluate("day==3", &mut variables).is_none());
        // The malformed clause must not be misread as an assignment
        assert_eq!(variables.get("day").unwrap(), "3");
    }

    #[test]
    fn assignments_may_set_empty_values() {
        let mut variables = VariableSet::new();

        evaluate("flag=", &mut variables);

        assert_eq!(variables.get("flag").unwrap(), "");
    }

    #[test]
    fn check_probes_the_store_without_mutating_it() {
        let variables = mock_variables(&[("day", "3")]);

        assert!(check("day==3", &variables));
        assert!(!check("day==4", &variables));
        assert!(!check("night==3", &variables));
        assert!(!check("day", &variables));
    }

    #[test]
    fn substitution_replaces_every_occurrence() {
        let variables = mock_variables(&[("name", "Miriam")]);

        assert_eq!(
            substitute("<$name>? <$name>!", &variables),
            "Miriam? Miriam!"
        );
    }

    #[test]
    fn unset_substitution_spans_are_left_verbatim() {
        let variables = VariableSet::new();

        assert_eq!(substitute("Hello <$name>!", &variables), "Hello <$name>!");
    }

    #[test]
    fn text_without_spans_is_returned_unchanged() {
        let variables = mock_variables(&[("name", "Miriam")]);

        assert_eq!(substitute("Hello!", &variables), "Hello!");
    }
}
