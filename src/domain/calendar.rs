//! 日历计算
//!
//! 从问题中提取日期，并计算星期、公休日、周末等事实。
//! 公休日表是按年份参数化的静态表：农历节日（설날、추석）固定在公历日期上，
//! 并非真实的农历换算。

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use regex::Regex;

use crate::errors::{FaqError, Result};

/// 星期标签，周一到周日
pub const WEEKDAY_LABELS: [&str; 7] = ["월", "화", "수", "목", "금", "토", "일"];

/// 韩国标准时间偏移（UTC+9，无夏令时）
const KST_OFFSET_SECS: i32 = 9 * 3600;

/// 固定公休日 (月, 日)
const FIXED_HOLIDAYS: [(u32, u32); 8] = [
    (1, 1),
    (3, 1),
    (5, 5),
    (6, 6),
    (8, 15),
    (10, 3),
    (10, 9),
    (12, 25),
];

/// 설날，固定公历日期
const SEOLLAL: [(u32, u32); 3] = [(2, 9), (2, 10), (2, 11)];

/// 추석，固定公历日期
const CHUSEOK: [(u32, u32); 3] = [(9, 16), (9, 17), (9, 18)];

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})").expect("valid ISO date pattern")
});

static KOREAN_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2})월\s*(\d{1,2})일").expect("valid Korean date pattern")
});

/// 韩国标准时区
pub fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+9 is a valid offset")
}

/// 当前韩国时间
pub fn kst_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&kst())
}

/// 格式化为 `YYYY-MM-DD HH:MM:SS`
pub fn format_datetime(now: &DateTime<FixedOffset>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 格式化为 `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 从问题文本中提取日期，返回 `YYYY-MM-DD`
///
/// 依次尝试：
/// 1. `2025-10-03` / `2025/10/03` / `2025.10.03`
/// 2. `10월 3일`（年份取 `current_year`）
///
/// 只做格式归一化，不校验日期是否存在。数字可以是半角或全角（`１０월 ３일`）。
pub fn extract_date(text: &str, current_year: i32) -> Option<String> {
    if let Some(caps) = ISO_DATE.captures(text) {
        let year = parse_digits(&caps[1])?;
        let month = parse_digits(&caps[2])?;
        let day = parse_digits(&caps[3])?;
        return Some(format!("{:04}-{:02}-{:02}", year, month, day));
    }

    if let Some(caps) = KOREAN_DATE.captures(text) {
        let month = parse_digits(&caps[1])?;
        let day = parse_digits(&caps[2])?;
        return Some(format!("{:04}-{:02}-{:02}", current_year, month, day));
    }

    None
}

// 全角数字先折叠成半角；其他脚本的数字不认
fn parse_digits(digits: &str) -> Option<u32> {
    digits.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '０'..='９' => c as u32 - '０' as u32,
            _ => c.to_digit(10)?,
        };
        Some(acc * 10 + digit)
    })
}

/// 严格解析 `YYYY-MM-DD`
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| FaqError::InvalidDate(format!("{}: {}", date_str, e)))
}

/// 指定年份的公休日列表
pub fn korean_holidays(year: i32) -> Vec<NaiveDate> {
    FIXED_HOLIDAYS
        .iter()
        .chain(SEOLLAL.iter())
        .chain(CHUSEOK.iter())
        .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(year, month, day))
        .collect()
}

pub fn is_holiday(date: NaiveDate) -> bool {
    korean_holidays(date.year()).contains(&date)
}

/// 星期标签（월 ~ 일）
pub fn weekday_label(date: NaiveDate) -> &'static str {
    WEEKDAY_LABELS[date.weekday().num_days_from_monday() as usize]
}

/// 토요일 / 일요일
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

/// 渲染到提示词中的 yes/no
pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// 某一天的日历事实
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFacts {
    pub date: NaiveDate,
    pub weekday: &'static str,
    pub is_holiday: bool,
    pub is_weekend: bool,
}

impl DateFacts {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: weekday_label(date),
            is_holiday: is_holiday(date),
            is_weekend: is_weekend(date),
        }
    }

    /// 从 `YYYY-MM-DD` 计算，日期不存在时返回 `InvalidDate`
    pub fn parse(date_str: &str) -> Result<Self> {
        parse_date(date_str).map(Self::for_date)
    }

    pub fn date_string(&self) -> String {
        format_date(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_iso_dates() {
        assert_eq!(extract_date("2025-10-03 수업 있나요?", 2030), Some("2025-10-03".into()));
        assert_eq!(extract_date("2025/10/03", 2030), Some("2025-10-03".into()));
        assert_eq!(extract_date("2025.1.5 예약", 2030), Some("2025-01-05".into()));
    }

    #[test]
    fn test_extract_korean_date_uses_current_year() {
        assert_eq!(extract_date("10월 3일은 수업이 있나요?", 2026), Some("2026-10-03".into()));
        assert_eq!(extract_date("12월25일", 2024), Some("2024-12-25".into()));
    }

    #[test]
    fn test_extract_full_width_digits() {
        assert_eq!(extract_date("１０월 ３일은 수업이 있나요?", 2026), Some("2026-10-03".into()));
        assert_eq!(extract_date("２０２５-１０-０３", 2026), Some("2025-10-03".into()));
        assert_eq!(extract_date("２０２５/1/５", 2026), Some("2025-01-05".into()));
    }

    #[test]
    fn test_iso_takes_precedence_over_korean() {
        let text = "10월 3일 말고 2025-11-20 은요?";
        assert_eq!(extract_date(text, 2026), Some("2025-11-20".into()));
    }

    #[test]
    fn test_extract_none() {
        assert_eq!(extract_date("환불 규정이 궁금해요", 2026), None);
        assert_eq!(extract_date("", 2026), None);
    }

    #[test]
    fn test_extract_does_not_validate() {
        assert_eq!(extract_date("13월 40일", 2026), Some("2026-13-40".into()));
        assert!(matches!(
            DateFacts::parse("2026-13-40"),
            Err(FaqError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_weekday_labels() {
        // 2025-10-03 是星期五
        assert_eq!(weekday_label(ymd(2025, 10, 3)), "금");
        assert_eq!(weekday_label(ymd(2024, 1, 1)), "월");
        assert_eq!(weekday_label(ymd(2000, 2, 29)), "화");
    }

    #[test]
    fn test_weekend_matches_last_two_labels() {
        let mut day = ymd(2025, 1, 1);
        for _ in 0..400 {
            let label = weekday_label(day);
            assert!(WEEKDAY_LABELS.contains(&label));
            assert_eq!(is_weekend(day), label == "토" || label == "일");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_holiday_table() {
        let holidays = korean_holidays(2025);
        assert_eq!(holidays.len(), 14);
        assert!(is_holiday(ymd(2025, 10, 3)));
        assert!(is_holiday(ymd(2031, 2, 10)));
        assert!(is_holiday(ymd(2019, 9, 17)));
        assert!(!is_holiday(ymd(2025, 10, 4)));
        assert!(!is_holiday(ymd(2025, 9, 15)));
    }

    #[test]
    fn test_date_facts_bundle() {
        let facts = DateFacts::parse("2025-10-04").unwrap();
        assert_eq!(facts.weekday, "토");
        assert!(facts.is_weekend);
        assert!(!facts.is_holiday);
        assert_eq!(facts.date_string(), "2025-10-04");
    }

    #[test]
    fn test_kst_formatting() {
        let utc = DateTime::parse_from_rfc3339("2025-12-31T20:30:05Z").unwrap();
        let local = utc.with_timezone(&kst());
        assert_eq!(format_datetime(&local), "2026-01-01 05:30:05");
        assert_eq!(yes_no(true), "yes");
        assert_eq!(yes_no(false), "no");
    }
}
