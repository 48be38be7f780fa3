//! Local form validation. Everything here runs before any network call;
//! a failed check re-prompts without losing entered values.

/// Minimum length the backend accepts for passwords.
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn account_name(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Account name must not be empty.".to_string());
    }
    Ok(())
}

/// Validate a hand-entered password. Blank is not an error here; forms
/// treat blank as "generate" (create) or "keep" (edit).
pub fn password(value: &str) -> Result<(), String> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters."
        ));
    }
    Ok(())
}

pub fn group_name(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Group name must not be empty.".to_string());
    }
    Ok(())
}

/// Parse the ordering position field: blank defaults to 0, anything else
/// must be a whole number.
pub fn position(value: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| "Position must be a whole number.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_account_is_rejected() {
        assert!(account_name("").is_err());
        assert!(account_name("   ").is_err());
        assert!(account_name("reader").is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(password("seven77").is_err());
        assert!(password("eight888").is_ok());
    }

    #[test]
    fn blank_group_name_is_rejected() {
        assert!(group_name("").is_err());
        assert!(group_name("Team A").is_ok());
    }

    #[test]
    fn blank_position_defaults_to_zero() {
        assert_eq!(position(""), Ok(0));
        assert_eq!(position("  "), Ok(0));
    }

    #[test]
    fn numeric_position_parses() {
        assert_eq!(position("3"), Ok(3));
        assert_eq!(position(" -1 "), Ok(-1));
    }

    #[test]
    fn non_numeric_position_is_rejected() {
        assert!(position("first").is_err());
        assert!(position("1.5").is_err());
    }
}
