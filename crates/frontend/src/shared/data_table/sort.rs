use contracts::shared::Record;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Per-table sort state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Same column flips the direction; another column starts ascending.
    pub fn toggle(&mut self, accessor: &str) {
        if self.column.as_deref() == Some(accessor) {
            self.direction = self.direction.flip();
        } else {
            self.column = Some(accessor.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn direction_of(&self, accessor: &str) -> Option<SortDirection> {
        (self.column.as_deref() == Some(accessor)).then_some(self.direction)
    }

    /// Value of the `aria-sort` attribute for a header cell.
    pub fn aria_sort(&self, accessor: &str) -> &'static str {
        match self.direction_of(accessor) {
            Some(SortDirection::Ascending) => "ascending",
            Some(SortDirection::Descending) => "descending",
            None => "none",
        }
    }
}

/// Missing fields and JSON `null` are "absent" and end up last.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn sort_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(target_arch = "wasm32")]
fn locale_compare(a: &str, b: &str) -> Ordering {
    js_sys::JsString::from(a)
        .locale_compare(b, &js_sys::Array::new())
        .cmp(&0)
}

#[cfg(not(target_arch = "wasm32"))]
fn locale_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Ascending comparison of two present values.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => {
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        _ => locale_compare(&sort_text(a), &sort_text(b)),
    }
}

/// Sorted copy of `records`. The input is left untouched; ties keep their order.
pub fn sort_records(records: &[Record], state: &SortState) -> Vec<Record> {
    let mut sorted = records.to_vec();
    let Some(column) = state.column.as_deref() else {
        return sorted;
    };

    sorted.sort_by(|a, b| {
        match (present(a.get(column)), present(b.get(column))) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = compare_values(x, y);
                match state.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| Record::from_value(v).unwrap())
            .collect()
    }

    fn names(records: &[Record]) -> Vec<Option<String>> {
        records
            .iter()
            .map(|r| r.get_str("name").map(String::from))
            .collect()
    }

    #[test]
    fn test_toggle_cycle() {
        let mut state = SortState::default();
        assert_eq!(state.column, None);

        state.toggle("name");
        assert_eq!(state.direction_of("name"), Some(SortDirection::Ascending));
        state.toggle("name");
        assert_eq!(state.direction_of("name"), Some(SortDirection::Descending));
        state.toggle("name");
        assert_eq!(state.direction_of("name"), Some(SortDirection::Ascending));

        state.toggle("name");
        state.toggle("created_at");
        assert_eq!(state.column.as_deref(), Some("created_at"));
        assert_eq!(state.direction, SortDirection::Ascending);
        assert_eq!(state.aria_sort("name"), "none");
        assert_eq!(state.aria_sort("created_at"), "ascending");
    }

    #[test]
    fn test_unsorted_keeps_order() {
        let data = rows(vec![json!({"name": "b"}), json!({"name": "a"})]);
        assert_eq!(sort_records(&data, &SortState::default()), data);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let data = rows(vec![json!({"name": "b"}), json!({"name": "a"})]);
        let before = data.clone();
        let mut state = SortState::default();
        state.toggle("name");
        let sorted = sort_records(&data, &state);
        assert_eq!(data, before);
        assert_eq!(names(&sorted), vec![Some("a".into()), Some("b".into())]);
    }

    #[test]
    fn test_absent_values_last_both_directions() {
        let data = rows(vec![
            json!({"name": null, "n": 1}),
            json!({"name": "beta"}),
            json!({"n": 2}),
            json!({"name": "Alpha"}),
        ]);
        let mut state = SortState::default();
        state.toggle("name");

        let asc = sort_records(&data, &state);
        assert_eq!(
            names(&asc),
            vec![Some("Alpha".into()), Some("beta".into()), None, None]
        );

        state.toggle("name");
        let desc = sort_records(&data, &state);
        assert_eq!(
            names(&desc),
            vec![Some("beta".into()), Some("Alpha".into()), None, None]
        );
        // ties among absent values keep input order
        assert_eq!(desc[2].get_i64("n"), Some(1));
        assert_eq!(desc[3].get_i64("n"), Some(2));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        let data = rows(vec![json!({"n": 10}), json!({"n": 9}), json!({"n": 100})]);
        let mut state = SortState::default();
        state.toggle("n");
        let sorted = sort_records(&data, &state);
        let values: Vec<i64> = sorted.iter().filter_map(|r| r.get_i64("n")).collect();
        assert_eq!(values, vec![9, 10, 100]);
    }

    #[test]
    fn test_numeric_strings_compare_as_text() {
        assert_eq!(compare_values(&json!("10"), &json!("9")), Ordering::Less);
        assert_eq!(compare_values(&json!(10), &json!(9)), Ordering::Greater);
    }
}
