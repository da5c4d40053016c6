//! Utility functions and helpers

/// Format a run of digits with thousands separators
///
/// A leading minus sign is kept in front of the grouped digits.
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    let grouped: String = result.chars().rev().collect();
    format!("{}{}", sign, grouped)
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1200), "1,200");
        assert_eq!(format_number(9258), "9,258");
        assert_eq!(format_number(45_200_000u64), "45,200,000");
    }

    #[test]
    fn test_format_number_keeps_sign() {
        assert_eq!(format_number(-1234567), "-1,234,567");
        assert_eq!(format_number(-12), "-12");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Zelle from Jane Doe"), "Zelle from Jane Doe");
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("A & B \"C\""), "A &amp; B &quot;C&quot;");
    }
}
