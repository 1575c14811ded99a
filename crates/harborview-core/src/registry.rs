use crate::error::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Raw per-service descriptor as it arrives from the external
/// configuration source. Every field is optional; a missing field is
/// equivalent to an empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub ports: Vec<String>,
    #[serde(default)]
    pub volumes: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<String>,
}

/// Normalized service record. `name` is unique across the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceRecord {
    pub name: String,
    pub ports: Vec<String>,
    pub volumes: Vec<String>,
    pub depends_on: Vec<String>,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, descriptor: ServiceDescriptor) -> Self {
        Self {
            name: name.into(),
            ports: descriptor.ports,
            volumes: descriptor.volumes,
            depends_on: descriptor.depends_on,
        }
    }
}

/// Insertion-ordered service registry.
///
/// Downstream edge emission and row/column assignment depend on registry
/// iteration order, so records are kept in a `Vec` in the order they were
/// inserted; the name map only accelerates lookups.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ServiceRecord>", into = "Vec<ServiceRecord>")]
pub struct Registry {
    records: Vec<ServiceRecord>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and append one service. Rejects duplicate names.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: ServiceDescriptor,
    ) -> Result<(), RegistryError> {
        let record = ServiceRecord::new(name, descriptor);
        if self.index.contains_key(&record.name) {
            return Err(RegistryError::DuplicateService(record.name));
        }
        self.index.insert(record.name.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub fn from_mapping<I, S>(mapping: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (S, ServiceDescriptor)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, descriptor) in mapping {
            registry.insert(name, descriptor)?;
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ServiceRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Insertion-order position of a service, if present.
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceRecord> {
        self.records.iter()
    }
}

impl TryFrom<Vec<ServiceRecord>> for Registry {
    type Error = RegistryError;

    fn try_from(records: Vec<ServiceRecord>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for record in records {
            if registry.index.contains_key(&record.name) {
                return Err(RegistryError::DuplicateService(record.name));
            }
            registry.index.insert(record.name.clone(), registry.records.len());
            registry.records.push(record);
        }
        Ok(registry)
    }
}

impl From<Registry> for Vec<ServiceRecord> {
    fn from(registry: Registry) -> Self {
        registry.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let descriptor: ServiceDescriptor =
            serde_json::from_str(r#"{"ports": ["8080:80"]}"#).unwrap();
        assert_eq!(descriptor.ports, vec!["8080:80"]);
        assert!(descriptor.volumes.is_empty());
        assert!(descriptor.depends_on.is_empty());
    }

    #[test]
    fn test_registry_preserves_insertion_order() {
        let mut registry = Registry::new();
        for name in ["web", "db", "cache"] {
            registry.insert(name, ServiceDescriptor::default()).unwrap();
        }
        let names: Vec<_> = registry.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["web", "db", "cache"]);
        assert_eq!(registry.ordinal("db"), Some(1));
    }

    #[test]
    fn test_duplicate_service_rejected() {
        let mut registry = Registry::new();
        registry.insert("web", ServiceDescriptor::default()).unwrap();
        let err = registry
            .insert("web", ServiceDescriptor::default())
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateService("web".to_string()));
    }

    #[test]
    fn test_registry_round_trips_through_serde() {
        let mut registry = Registry::new();
        registry
            .insert(
                "web",
                ServiceDescriptor {
                    depends_on: vec!["db".to_string()],
                    ..Default::default()
                },
            )
            .unwrap();
        registry.insert("db", ServiceDescriptor::default()).unwrap();

        let json = serde_json::to_string(&registry).unwrap();
        let back: Registry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back.ordinal("web"), Some(0));
        assert_eq!(back.get("web").unwrap().depends_on, vec!["db"]);
    }
}
