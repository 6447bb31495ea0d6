use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};

/// "Now" captured once per pass: local calendar date and HH:MM wall-clock time
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNow {
    pub date: NaiveDate,
    pub time: String,
}

impl LocalNow {
    pub fn capture() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self {
            date: datetime.date(),
            time: format_hhmm(datetime.hour(), datetime.minute()),
        }
    }

    /// Value for the date display field
    pub fn date_field(&self) -> String {
        format_iso_date(self.date)
    }
}

/// Zero-padded 24h time, e.g. "09:05"
pub fn format_hhmm(hours: u32, minutes: u32) -> String {
    format!("{:02}:{:02}", hours, minutes)
}

/// YYYY-MM-DD
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_hhmm_pads() {
        assert_eq!(format_hhmm(9, 5), "09:05");
        assert_eq!(format_hhmm(23, 59), "23:59");
        assert_eq!(format_hhmm(0, 0), "00:00");
    }

    #[wasm_bindgen_test]
    fn test_from_datetime() {
        let datetime = NaiveDate::from_ymd_opt(2025, 3, 4)
            .unwrap()
            .and_hms_opt(7, 3, 59)
            .unwrap();
        let now = LocalNow::from_datetime(datetime);
        assert_eq!(now.date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(now.time, "07:03");
        assert_eq!(now.date_field(), "2025-03-04");
    }
}
