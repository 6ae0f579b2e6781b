/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a `YYYY-MM-DD` calendar date into UTC midnight epoch millis.
///
/// Purchase dates arrive from forms as plain dates; they are stored as
/// millis so FIFO ordering is an integer comparison.
pub fn date_to_millis(date: &str) -> Option<i64> {
    let day = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some(day.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_millis() {
        assert_eq!(date_to_millis("1970-01-02"), Some(86_400_000));
        assert!(date_to_millis("2024-01-01") < date_to_millis("2024-02-01"));
        assert_eq!(date_to_millis("01/02/2024"), None);
    }
}
