use serde_json::Value;

/// Format a KLAY listing price for display
/// Examples: "120 KLAY", "0.55 KLAY", "-" when unknown
pub fn format_klay(price: Option<&Value>) -> String {
    let amount = match price {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match amount {
        Some(a) if a.fract() == 0.0 => format!("{a:.0} KLAY"),
        Some(a) => {
            let s = format!("{a:.4}");
            let s = s.trim_end_matches('0').trim_end_matches('.');
            format!("{s} KLAY")
        }
        None => "-".to_string(),
    }
}

/// Shorten a hex address for narrow layouts (e.g., "0x22D2…8cAf")
pub fn short_address(addr: &str) -> String {
    let chars: Vec<char> = addr.chars().collect();
    if chars.len() <= 12 {
        return addr.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Truncate to at most `max` chars, appending "…" when cut
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
