use chrono::{DateTime, Datelike, Local, NaiveDate};

/// This is the standard way of converting a date to a string in tallybook.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Timestamps are shown to the second, the offset is dropped for readability.
pub fn format_timestamp(moment: &DateTime<Local>) -> String {
    moment.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Returns `(year, month)` of a date. Month is 1 based.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{format_date, format_timestamp, year_month};

    #[test]
    fn test_format_date_pads_components() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(format_date(date), "2024-03-07");
        assert_eq!(year_month(date), (2024, 3));
    }

    #[test]
    fn test_format_timestamp() {
        let moment = Local.with_ymd_and_hms(2024, 8, 15, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(&moment), "2024-08-15 09:05:00");
    }
}
