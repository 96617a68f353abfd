use chrono::{DateTime, Datelike, Local, TimeZone};

pub const HOMEPAGE: &str = "Homepage Endpoint";

pub async fn homepage() -> &'static str {
    HOMEPAGE
}

pub async fn time_page() -> String {
    today_line(&Local::now())
}

/// `Today is: <day> <year> <Month>`
pub fn today_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("Today is: {} {} {}", now.day(), now.year(), now.format("%B"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn today_line_format() {
        let t = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(today_line(&t), "Today is: 7 2024 March");
    }

    #[tokio::test]
    async fn homepage_text() {
        assert_eq!(homepage().await, "Homepage Endpoint");
    }
}
