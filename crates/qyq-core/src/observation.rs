use chrono::{DateTime, Local};
use serde::Serialize;

use crate::outcome::Counts;

/// Capture timestamp format: sortable, fixed width, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S:%6f";

/// The distribution behind one line, stamped with the moment it was taken in.
#[derive(Clone, Debug, Serialize)]
pub struct Observation {
    captured_at: DateTime<Local>,
    counts: Counts,
}

impl Observation {
    /// Stamp `counts` with the current local time.
    pub fn now(counts: Counts) -> Self {
        Self::at(Local::now(), counts)
    }

    pub fn at(captured_at: DateTime<Local>, counts: Counts) -> Self {
        Self {
            captured_at,
            counts,
        }
    }

    pub fn captured_at(&self) -> DateTime<Local> {
        self.captured_at
    }

    /// Capture time in record format.
    pub fn timestamp(&self) -> String {
        self.captured_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// The eight counts in canonical key order.
    pub fn row(&self) -> [u64; 8] {
        self.counts.to_row()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_has_microsecond_width() {
        let at = Local
            .with_ymd_and_hms(2019, 3, 7, 9, 5, 2)
            .single()
            .unwrap()
            + chrono::Duration::microseconds(42);
        let obs = Observation::at(at, Counts::new());
        assert_eq!(obs.timestamp(), "2019-03-07_09:05:02:000042");
    }

    #[test]
    fn row_fills_missing_keys() {
        let obs = Observation::now(Counts::from_raw([("100", 7)]).unwrap());
        assert_eq!(obs.row(), [0, 0, 0, 0, 7, 0, 0, 0]);
    }
}
