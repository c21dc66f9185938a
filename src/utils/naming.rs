/// Turn an internal identifier into its display form: word separators become
/// spaces, then every word is title cased.
///
/// # Examples
/// ```
/// use solar_dashboard::utils::display_name;
///
/// assert_eq!(display_name("sierra_leone"), "Sierra Leone");
/// ```
pub fn display_name(id: &str) -> String {
    title_case(&id.replace('_', " "))
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }

    out
}

/// Normalise user input for matching against ids and display names.
pub fn normalize_key(text: &str) -> String {
    text.trim().to_lowercase().replace([' ', '-'], "_")
}
