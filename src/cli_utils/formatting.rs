use colored::Colorize;

/// Format a single record as key-value pairs
pub fn format_record(data: Vec<(&str, String)>) {
    let max_key_len = data.iter().map(|(k, _)| k.len()).max().unwrap_or(20);

    for (key, value) in data {
        let padded_key = format!("{:width$}", key, width = max_key_len);
        println!("  {}: {}", padded_key.bright_cyan(), value);
    }
}

/// Format a header
pub fn print_header(text: &str) {
    println!();
    println!("{}", text.bold().bright_cyan());
    println!("{}", "=".repeat(text.len()));
    println!();
}

/// Format datetime
pub fn format_datetime(dt: &chrono::NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an amount with 2 decimal places
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Spent share of the budget, `None` without a positive budget
pub fn format_usage(spent: f64, budget: f64) -> Option<String> {
    if budget <= 0.0 {
        return None;
    }

    let percent = spent / budget * 100.0;
    let text = format!("{:.1}%", percent);
    let colored = if percent >= 100.0 {
        text.red()
    } else if percent >= 80.0 {
        text.yellow()
    } else {
        text.green()
    };

    Some(colored.to_string())
}
