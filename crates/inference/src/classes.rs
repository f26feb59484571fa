use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Class names of the deployed waste-classification model, in training order.
pub const WASTE_CLASS_NAMES: [&str; 6] = ["battery", "glass", "metal", "paper", "plastic", "trash"];

/// Ordered label table indexed by the model's class id.
///
/// The table must match the class space the loaded model was trained with;
/// lookups past the end are treated as a data-integrity fault by callers,
/// never wrapped.
#[derive(Debug, Clone)]
pub struct ClassNameTable {
    names: Vec<String>,
}

impl ClassNameTable {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Table for the deployed 6-class waste model.
    pub fn waste_default() -> Self {
        Self {
            names: WASTE_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a newline-delimited labels file. Blank lines are skipped,
    /// surrounding whitespace is trimmed.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut names = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                names.push(trimmed.to_string());
            }
        }

        Ok(Self { names })
    }

    pub fn get(&self, class_id: u32) -> Option<&str> {
        self.names.get(class_id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_table_matches_deployed_model() {
        let table = ClassNameTable::waste_default();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get(0), Some("battery"));
        assert_eq!(table.get(5), Some("trash"));
    }

    #[test]
    fn test_out_of_range_lookup_is_none() {
        let table = ClassNameTable::waste_default();
        assert_eq!(table.get(6), None);
        assert_eq!(table.get(99), None);
    }

    #[test]
    fn test_from_file_skips_blank_lines() {
        let dir = std::env::temp_dir();
        let path = dir.join("class_names_test.txt");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "bottle").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  can  ").unwrap();
        drop(file);

        let table = ClassNameTable::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), Some("bottle"));
        assert_eq!(table.get(1), Some("can"));
    }
}
