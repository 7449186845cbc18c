use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;

use crate::domain::founder::OutputMapping;

pub fn write_founders(path: impl AsRef<Path>, output: &OutputMapping) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, output)
        .with_context(|| format!("Failed to write founders to {}", path.display()))?;
    writer.flush()?;

    log::info!("Wrote founders for {} companies to {}", output.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::domain::founder::OutputMapping;

    use super::write_founders;

    #[test]
    fn write_founders_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("founders_output.json");

        let mut output = OutputMapping::new();
        output.insert("Acme Robotics".to_string(), vec!["Jane Q. Public".to_string()]);
        output.insert("Initech".to_string(), vec![]);

        write_founders(&path, &output).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"Acme Robotics": ["Jane Q. Public"], "Initech": []})
        );
    }
}
