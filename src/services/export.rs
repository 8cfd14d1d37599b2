use crate::db::{Store, StoreError, Vital};

const CSV_HEADER: &str = "Date,Systolic,Diastolic,Glucose,Notes";

/// CSV export of a user's reading history.
pub struct ExportService {
    store: Store,
}

impl ExportService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Render the full history as CSV bytes, newest first. Null numeric
    /// fields become empty strings, never a "None"/"null" literal.
    pub async fn csv_for_user(&self, user_id: i32) -> Result<Vec<u8>, StoreError> {
        let vitals = self.store.list_vitals(user_id).await?;
        Ok(render_csv(&vitals).into_bytes())
    }
}

fn render_csv(vitals: &[Vital]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for vital in vitals {
        let systolic = vital
            .pressure_systolic
            .map(|v| v.to_string())
            .unwrap_or_default();
        let diastolic = vital
            .pressure_diastolic
            .map(|v| v.to_string())
            .unwrap_or_default();
        let glucose = vital.glucose.map(|v| v.to_string()).unwrap_or_default();
        let notes = vital.notes.as_deref().unwrap_or_default();

        out.push_str(&escape_field(&vital.date));
        out.push(',');
        out.push_str(&systolic);
        out.push(',');
        out.push_str(&diastolic);
        out.push(',');
        out.push_str(&glucose);
        out.push(',');
        out.push_str(&escape_field(notes));
        out.push('\n');
    }

    out
}

/// Quote a field when it contains a separator, quote, or newline.
fn escape_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vital(date: &str, sys: Option<i32>, dia: Option<i32>, glu: Option<f64>, notes: Option<&str>) -> Vital {
        Vital {
            id: 1,
            user_id: 1,
            date: date.to_string(),
            pressure_systolic: sys,
            pressure_diastolic: dia,
            glucose: glu,
            notes: notes.map(str::to_string),
            created_at: String::new(),
        }
    }

    #[test]
    fn test_nulls_render_as_empty_strings() {
        let rows = vec![
            vital("2026-02-01", Some(120), Some(80), None, Some("after lunch")),
            vital("2026-01-31", None, None, Some(95.5), None),
        ];

        let csv = render_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Date,Systolic,Diastolic,Glucose,Notes");
        assert_eq!(lines[1], "2026-02-01,120,80,,after lunch");
        assert_eq!(lines[2], "2026-01-31,,,95.5,");
        assert!(!csv.contains("None"));
        assert!(!csv.contains("null"));
    }

    #[test]
    fn test_notes_with_separators_are_quoted() {
        let rows = vec![vital(
            "2026-02-01",
            Some(118),
            Some(76),
            None,
            Some("dizzy, slept badly \"again\""),
        )];

        let csv = render_csv(&rows);
        assert!(csv.contains("\"dizzy, slept badly \"\"again\"\"\""));
    }

    #[test]
    fn test_empty_history_is_header_only() {
        assert_eq!(render_csv(&[]), "Date,Systolic,Diastolic,Glucose,Notes\n");
    }
}
