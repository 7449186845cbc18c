use std::path::Path;

use anyhow::Context;

use crate::domain::company::{parse_company_line, CompanyLine, CompanyRecord};

/// Reads the `Name (URL)` company list, skipping lines that don't parse.
pub fn read_companies(path: impl AsRef<Path>) -> anyhow::Result<Vec<CompanyRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read company list {}", path.display()))?;

    Ok(parse_companies(&content))
}

pub fn parse_companies(content: &str) -> Vec<CompanyRecord> {
    content
        .lines()
        .filter_map(|line| match parse_company_line(line) {
            CompanyLine::Record(record) => Some(record),
            CompanyLine::Blank => None,
            CompanyLine::Malformed(line) => {
                log::warn!("Could not parse line: {}", line);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{parse_companies, read_companies};

    #[test]
    fn parse_companies_skips_blank_and_malformed() {
        let content = "Acme Robotics (https://acme.example/)\n\n  \nNo url here\nInitech (https://initech.example)\n";
        let companies = parse_companies(content);

        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].name, "Acme Robotics");
        assert_eq!(companies[0].url, "https://acme.example/");
        assert_eq!(companies[1].name, "Initech");
    }

    #[test]
    fn read_companies_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Globex (https://globex.example)").unwrap();

        let companies = read_companies(file.path()).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].url, "https://globex.example");
    }

    #[test]
    fn read_companies_missing_file() {
        assert!(read_companies("/definitely/not/here/companies.txt").is_err());
    }
}
