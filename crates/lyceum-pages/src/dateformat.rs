//! Date formatting for article timestamps.
//!
//! Django-style format codes, trimmed to what the site renders:
//!
//! - Y: 4-digit year (e.g., 2025)
//! - y: 2-digit year (e.g., 25)
//! - m: Month with leading zero (01-12)
//! - n: Month without leading zero (1-12)
//! - F: Full month name (e.g., January)
//! - M: Abbreviated month name (e.g., Jan)
//! - d: Day with leading zero (01-31)
//! - j: Day without leading zero (1-31)
//!
//! A backslash escapes the next character.

use chrono::{DateTime, Datelike, Utc};

/// Format a datetime using the format codes above.
///
/// # Examples
///
/// ```ignore
/// let dt = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 45).unwrap();
/// assert_eq!(format(&dt, "Y-m-d"), "2025-01-15");
/// assert_eq!(format(&dt, "F j, Y"), "January 15, 2025");
/// ```
pub fn format(dt: &DateTime<Utc>, format_str: &str) -> String {
	let mut result = String::new();
	let mut chars = format_str.chars();

	while let Some(c) = chars.next() {
		if c == '\\' {
			if let Some(next) = chars.next() {
				result.push(next);
			}
			continue;
		}

		match c {
			'Y' => result.push_str(&format!("{:04}", dt.year())),
			'y' => result.push_str(&format!("{:02}", dt.year() % 100)),
			'm' => result.push_str(&format!("{:02}", dt.month())),
			'n' => result.push_str(&dt.month().to_string()),
			'F' => result.push_str(month_name(dt.month())),
			'M' => result.push_str(month_abbr(dt.month())),
			'd' => result.push_str(&format!("{:02}", dt.day())),
			'j' => result.push_str(&dt.day().to_string()),
			other => result.push(other),
		}
	}

	result
}

fn month_name(month: u32) -> &'static str {
	match month {
		1 => "January",
		2 => "February",
		3 => "March",
		4 => "April",
		5 => "May",
		6 => "June",
		7 => "July",
		8 => "August",
		9 => "September",
		10 => "October",
		11 => "November",
		12 => "December",
		_ => "",
	}
}

fn month_abbr(month: u32) -> &'static str {
	match month {
		1 => "Jan",
		2 => "Feb",
		3 => "Mar",
		4 => "Apr",
		5 => "May",
		6 => "Jun",
		7 => "Jul",
		8 => "Aug",
		9 => "Sep",
		10 => "Oct",
		11 => "Nov",
		12 => "Dec",
		_ => "",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;

	#[rstest]
	#[case("Y-m-d", "2025-01-05")]
	#[case("F j, Y", "January 5, 2025")]
	#[case("M d", "Jan 05")]
	#[case("n/j/y", "1/5/25")]
	#[case("\\Year Y", "Year 2025")]
	fn formats_dates(#[case] pattern: &str, #[case] expected: &str) {
		let dt = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
		assert_eq!(format(&dt, pattern), expected);
	}
}
