//! Small HTML helpers shared by the page tree.

/// Escape text for safe inclusion in HTML content or attribute values.
pub(crate) fn html_escape(input: &str) -> String {
	let mut escaped = String::with_capacity(input.len());
	for c in input.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			other => escaped.push(other),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("plain", "plain")]
	#[case("<script>", "&lt;script&gt;")]
	#[case("a & b", "a &amp; b")]
	#[case("\"quoted\"", "&quot;quoted&quot;")]
	#[case("it's", "it&#39;s")]
	fn escapes_html_metacharacters(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(html_escape(input), expected);
	}
}
