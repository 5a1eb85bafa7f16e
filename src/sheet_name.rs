use unicode_normalization::UnicodeNormalization as _;

/// Longest worksheet name Excel accepts, in UTF-16 code units.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const INVALID_CHARS: [char; 7] = ['/', '\\', '?', '*', '[', ']', ':'];

/// Excel compares sheet names case-insensitively across Unicode, not ASCII.
///
/// Both names are NFKC-normalized and uppercased before comparing.
pub fn sheet_name_eq_case_insensitive(a: &str, b: &str) -> bool {
    a.nfkc()
        .flat_map(|c| c.to_uppercase())
        .eq(b.nfkc().flat_map(|c| c.to_uppercase()))
}

/// Checks that `name` can be added next to `existing` worksheets.
pub fn validate_sheet_name<S: AsRef<str>>(name: &str, existing: &[S]) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("sheet name cannot be blank".to_string());
    }
    let units = name.encode_utf16().count();
    if units > MAX_SHEET_NAME_LEN {
        return Err(format!(
            "sheet name cannot exceed {MAX_SHEET_NAME_LEN} characters (got {units})"
        ));
    }
    if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
        return Err(format!("sheet name contains invalid character '{c}'"));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err("sheet name cannot begin or end with an apostrophe".to_string());
    }
    if let Some(clash) = existing
        .iter()
        .map(AsRef::as_ref)
        .find(|other| sheet_name_eq_case_insensitive(name, other))
    {
        return Err(format!("sheet name conflicts with existing worksheet '{clash}'"));
    }
    Ok(())
}
