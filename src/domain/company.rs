use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyRecord {
    pub name: String,
    pub url: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CompanyLine {
    Blank,
    Record(CompanyRecord),
    Malformed(String),
}

impl fmt::Display for CompanyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// Parses one `Name (URL)` line of the company list.
pub fn parse_company_line(line: &str) -> CompanyLine {
    let line = line.trim();
    if line.is_empty() {
        return CompanyLine::Blank;
    }

    if !line.contains('(') || !line.contains(')') {
        return CompanyLine::Malformed(line.to_string());
    }

    match line.split_once('(') {
        Some((name_part, url_part)) => {
            let name = name_part.trim();
            let url = url_part.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());

            match name.is_empty() || url.is_empty() {
                true => CompanyLine::Malformed(line.to_string()),
                false => CompanyLine::Record(CompanyRecord {
                    name: name.to_string(),
                    url: url.to_string(),
                }),
            }
        }
        None => CompanyLine::Malformed(line.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_company_line, CompanyLine, CompanyRecord};

    fn record(name: &str, url: &str) -> CompanyLine {
        CompanyLine::Record(CompanyRecord {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    #[test]
    fn parse_company_line_valid() {
        assert_eq!(
            parse_company_line("Acme Robotics (https://acme.example/)"),
            record("Acme Robotics", "https://acme.example/")
        );
        assert_eq!(
            parse_company_line("  Initech(https://initech.example)  \n"),
            record("Initech", "https://initech.example")
        );
        assert_eq!(
            parse_company_line("Globex ( https://globex.example/about ) "),
            record("Globex", "https://globex.example/about")
        );
    }

    #[test]
    fn parse_company_line_blank() {
        assert_eq!(parse_company_line(""), CompanyLine::Blank);
        assert_eq!(parse_company_line("   \t"), CompanyLine::Blank);
    }

    #[test]
    fn parse_company_line_malformed() {
        assert_eq!(
            parse_company_line("Acme https://acme.example"),
            CompanyLine::Malformed("Acme https://acme.example".to_string())
        );
        assert!(matches!(
            parse_company_line("Acme (https://acme.example"),
            CompanyLine::Malformed(_)
        ));
        assert!(matches!(
            parse_company_line("(https://acme.example)"),
            CompanyLine::Malformed(_)
        ));
        assert!(matches!(parse_company_line("Acme ()"), CompanyLine::Malformed(_)));
    }
}
