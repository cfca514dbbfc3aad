//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time.

/// Validate a maximum dependency depth (a positive integer).
pub fn validate_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid depth '{s}': expected a positive integer"))?;
    if depth < 1 {
        return Err("Depth must be at least 1".to_string());
    }
    Ok(depth)
}

/// Validate a package name.
///
/// Names are case-sensitive and used verbatim, so only emptiness and
/// embedded whitespace are rejected.
pub fn validate_package_name(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Package name cannot be empty".to_string());
    }
    if s.chars().any(char::is_whitespace) {
        return Err(format!("Package name '{s}' cannot contain whitespace"));
    }
    Ok(s.to_string())
}
