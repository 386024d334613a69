/// Derive a URL-safe identifier from a display name.
///
/// Lowercases alphanumeric runs and joins them with single dashes. Used when
/// an admin leaves the identifier blank and it has to be filled from the name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("Main  Navigation"), "main-navigation");
        assert_eq!(slugify("Top / Footer"), "top-footer");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  Spring Sale!  "), "spring-sale");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
