//! Display projections
//!
//! Turns the raw stored value behind a row into the text a screen shows next
//! to the row title. Projections never fail: an unset or unparseable value
//! falls back to the row's missing text or an empty string.

use crate::model::{Time, TimePeriod};
use crate::row::{Row, RowSpec, SelectionValues};
use crate::store::PreferenceStore;

/// Formats a time for display, without seconds. In 12-hour form, midnight is
/// `12:00 AM` and noon is `12:00 PM`.
pub fn format_time(time: Time, use_24_hour: bool) -> String {
    if use_24_hour {
        return format!("{}:{:02}", time.hour, time.minute);
    }
    let (hour, suffix) = match time.hour {
        0 => (12, "AM"),
        h if h < 12 => (h, "AM"),
        12 => (12, "PM"),
        h => (h - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, time.minute, suffix)
}

pub fn format_period(period: TimePeriod, use_24_hour: bool) -> String {
    format!(
        "{}-{}",
        format_time(period.start, use_24_hour),
        format_time(period.end, use_24_hour)
    )
}

/// Display text for a row given the current store contents.
pub fn display_text(row: &Row, store: &dyn PreferenceStore) -> String {
    match &row.spec {
        RowSpec::Text { .. } => store.get_string(&row.key).unwrap_or_default(),
        RowSpec::Number {
            default_value,
            unit,
            ..
        } => {
            let value = store.get_int(&row.key).unwrap_or(*default_value);
            match unit {
                Some(unit) => format!("{value} {unit}"),
                None => value.to_string(),
            }
        }
        RowSpec::SingleSelection { labels, values, .. } => {
            selected_label(labels, values, store, &row.key).unwrap_or_default()
        }
        RowSpec::MultiSelection { labels, values } => {
            let stored = store.get_string(&row.key).unwrap_or_default();
            let parts: Vec<&str> = if stored.is_empty() {
                Vec::new()
            } else {
                stored.split(',').collect()
            };
            let chosen: Vec<&str> = (0..values.len())
                .filter(|i| {
                    let text = match values {
                        SelectionValues::Int(v) => v[*i].to_string(),
                        SelectionValues::Str(v) => v[*i].clone(),
                    };
                    parts.contains(&text.as_str())
                })
                .filter_map(|i| labels.get(i).map(String::as_str))
                .collect();
            chosen.join(", ")
        }
        RowSpec::Time {
            use_24_hour,
            missing_text,
            ..
        } => match stored_parsed::<Time>(store, &row.key) {
            Some(time) => format_time(time, *use_24_hour),
            None => missing_text.clone().unwrap_or_default(),
        },
        RowSpec::TimePeriod {
            use_24_hour,
            missing_text,
            ..
        } => match stored_parsed::<TimePeriod>(store, &row.key) {
            Some(period) => format_period(period, *use_24_hour),
            None => missing_text.clone().unwrap_or_default(),
        },
        RowSpec::Toggle => {
            if store.get_bool(&row.key).unwrap_or(false) {
                "on".to_string()
            } else {
                "off".to_string()
            }
        }
    }
}

fn stored_parsed<T: std::str::FromStr>(store: &dyn PreferenceStore, key: &str) -> Option<T> {
    store.get_string(key)?.parse().ok()
}

fn selected_label(
    labels: &[String],
    values: &SelectionValues,
    store: &dyn PreferenceStore,
    key: &str,
) -> Option<String> {
    let index = match values {
        SelectionValues::Int(v) => {
            let stored = store.get_int(key)?;
            v.iter().position(|x| *x == stored)?
        }
        SelectionValues::Str(v) => {
            let stored = store.get_string(key)?;
            v.iter().position(|x| *x == stored)?
        }
    };
    labels.get(index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::SelectionMode;
    use crate::store::MemoryStore;

    #[test]
    fn twenty_four_hour_time_drops_seconds() {
        assert_eq!(format_time(Time::new(9, 5, 30), true), "9:05");
        assert_eq!(format_time(Time::new(0, 0, 0), true), "0:00");
    }

    #[test]
    fn twelve_hour_time_handles_midnight_and_noon() {
        assert_eq!(format_time(Time::new(0, 30, 0), false), "12:30 AM");
        assert_eq!(format_time(Time::new(12, 0, 0), false), "12:00 PM");
        assert_eq!(format_time(Time::new(15, 45, 0), false), "3:45 PM");
        assert_eq!(format_time(Time::new(11, 59, 0), false), "11:59 AM");
    }

    fn row(key: &str, spec: RowSpec) -> Row {
        Row {
            id: 0,
            key: key.to_string(),
            title: "Row".to_string(),
            spec,
        }
    }

    #[test]
    fn number_display_appends_the_unit() {
        let mut store = MemoryStore::new();
        store.set_int("vol", 30);
        let mut spec = RowSpec::number(0);
        if let RowSpec::Number { unit, .. } = &mut spec {
            *unit = Some("%".to_string());
        }
        assert_eq!(display_text(&row("vol", spec), &store), "30 %");
    }

    #[test]
    fn single_selection_shows_the_label_for_the_stored_value() {
        let mut store = MemoryStore::new();
        store.set_int("level", 20);
        let spec = RowSpec::SingleSelection {
            labels: vec!["Low".to_string(), "High".to_string()],
            values: SelectionValues::Int(vec![10, 20]),
            mode: SelectionMode::OkCancel,
        };
        assert_eq!(display_text(&row("level", spec), &store), "High");
    }

    #[test]
    fn multi_selection_joins_chosen_labels() {
        let mut store = MemoryStore::new();
        store.set_string("days", "mon,wed");
        let spec = RowSpec::MultiSelection {
            labels: vec!["Mon".to_string(), "Tue".to_string(), "Wed".to_string()],
            values: SelectionValues::Str(vec![
                "mon".to_string(),
                "tue".to_string(),
                "wed".to_string(),
            ]),
        };
        assert_eq!(display_text(&row("days", spec), &store), "Mon, Wed");
    }

    #[test]
    fn multi_selection_with_fewer_labels_than_values_never_panics() {
        let mut store = MemoryStore::new();
        store.set_string("days", "b");
        let spec = RowSpec::MultiSelection {
            labels: vec!["A".to_string()],
            values: SelectionValues::Str(vec!["a".to_string(), "b".to_string()]),
        };
        assert_eq!(display_text(&row("days", spec), &store), "");
    }

    #[test]
    fn unparseable_time_falls_back_to_missing_text() {
        let mut store = MemoryStore::new();
        store.set_string("alarm", "whenever");
        let mut spec = RowSpec::time(Time::new(7, 0, 0), true);
        if let RowSpec::Time { missing_text, .. } = &mut spec {
            *missing_text = Some("not set".to_string());
        }
        assert_eq!(display_text(&row("alarm", spec), &store), "not set");
    }

    #[test]
    fn stored_period_is_formatted() {
        let mut store = MemoryStore::new();
        store.set_string("quiet", "22:00:00-6:30:00");
        let spec = RowSpec::time_period(TimePeriod::default(), true);
        assert_eq!(display_text(&row("quiet", spec), &store), "22:00-6:30");
    }

    #[test]
    fn toggle_reads_unset_as_off() {
        let store = MemoryStore::new();
        assert_eq!(display_text(&row("flag", RowSpec::Toggle), &store), "off");
    }
}
