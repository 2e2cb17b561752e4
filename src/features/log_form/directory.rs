use crate::core::config::{default_roster, DirectoryConfig};
use crate::shared::constants::DEFAULT_DIRECTORY_SIZE;

/// Ordered list of employees the add-crew control can offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDirectory {
    names: Vec<String>,
}

impl EmployeeDirectory {
    /// Build from any list; blank names and repeats are dropped, first occurrence wins
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            let name = name.trim();
            if !name.is_empty() && !unique.iter().any(|n| n == name) {
                unique.push(name.to_string());
            }
        }
        Self { names: unique }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        Self::new(config.employees.iter().cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[allow(dead_code)]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

impl Default for EmployeeDirectory {
    fn default() -> Self {
        Self::new(default_roster(DEFAULT_DIRECTORY_SIZE))
    }
}
