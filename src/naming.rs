//! Remote repository naming convention
use deunicode::deunicode;

/// Separator between the company and the project slugs
const NAME_SEPARATOR: char = '_';

/// Separator used inside a slug
const SLUG_SEPARATOR: char = '-';

/// Characters dropped without leaving a separator behind
const QUOTES: [char; 2] = ['\'', '"'];

/// Transliterate `text` to ASCII, lower-case it and collapse every run of
/// non-alphanumeric characters into a single hyphen, trimming hyphens at
/// both ends. Quotes are removed so `Joe's` gives `joes`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;
    for c in ascii.chars().filter(|c| !QUOTES.contains(c)) {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// Build the remote repository name for a project of a company
pub fn create_repo_name(company_name: &str, project_name: &str) -> String {
    format!(
        "{}{}{}",
        slugify(company_name),
        NAME_SEPARATOR,
        slugify(project_name)
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn repo_name_from_plain_words() {
        assert_eq!(create_repo_name("company", "project"), "company_project");
    }

    #[test]
    fn repo_name_is_lower_case() {
        assert_eq!(create_repo_name("Company", "Project"), "company_project");
    }

    #[test]
    fn repo_name_replaces_whitespace() {
        assert_eq!(
            create_repo_name("Green Company", "My Project"),
            "green-company_my-project"
        );
    }

    #[test]
    fn repo_name_from_empty_strings() {
        assert_eq!(create_repo_name("", ""), "_");
    }

    #[test]
    fn repo_name_is_deterministic() {
        let first = create_repo_name("ACME Corp.", "web/site v2");
        let second = create_repo_name("ACME Corp.", "web/site v2");
        assert_eq!(first, second);
        assert_eq!(first, "acme-corp_web-site-v2");
    }

    #[test]
    fn slug_collapses_and_trims_separators() {
        assert_eq!(slugify("  --Hello,   World!!  "), "hello-world");
        assert_eq!(slugify("a__b"), "a-b");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn slug_transliterates_accents() {
        assert_eq!(slugify("Café Noir"), "cafe-noir");
        assert_eq!(slugify("naïve"), "naive");
        assert_eq!(create_repo_name("Société Générale", "Éclair"), "societe-generale_eclair");
    }

    #[test]
    fn slug_removes_apostrophes() {
        assert_eq!(slugify("Joe's Pizza"), "joes-pizza");
        assert_eq!(slugify("\"quoted\" name"), "quoted-name");
    }
}
