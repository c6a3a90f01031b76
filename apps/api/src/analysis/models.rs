use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Placeholder for any field the extractors could not resolve.
/// Kept as a string so the output key set is the same for every resume.
pub const NOT_FOUND: &str = "Not Found";

pub fn or_not_found(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_FOUND.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

impl ContactInfo {
    pub fn has_email_and_phone(&self) -> bool {
        self.email.is_some() && self.phone.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub education: String,
    pub institution: String,
    pub cgpa: String,
    pub year: String,
}

impl Default for EducationEntry {
    fn default() -> Self {
        Self {
            education: NOT_FOUND.to_string(),
            institution: NOT_FOUND.to_string(),
            cgpa: NOT_FOUND.to_string(),
            year: NOT_FOUND.to_string(),
        }
    }
}

/// Insertion-ordered string-keyed map, serialized as a JSON object.
///
/// Role tables and keyword density are ordered contracts; a `HashMap` or
/// `BTreeMap` would reorder them on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Heuristic scores computed from the normalized text and matched skills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub ats_score: f64,
    pub predicted_role: String,
    pub job_fit: OrderedMap<String>,
    pub keyword_density: OrderedMap<usize>,
}

/// The assembled result of one analysis run.
///
/// Field order is the wire order. Every optional value is already
/// materialized as [`NOT_FOUND`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub portfolio: String,
    pub professional_summary: String,
    pub education: Vec<EducationEntry>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub projects: Vec<String>,
    pub internships: Vec<String>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub word_count: usize,
    pub predicted_role: String,
    pub job_fit: OrderedMap<String>,
    pub ats_score: f64,
    pub keyword_density: OrderedMap<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_map_serializes_in_insertion_order() {
        let mut map = OrderedMap::new();
        map.insert("zeta", 1usize);
        map.insert("alpha", 2);
        map.insert("mid", 3);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":3}"#);
    }

    #[test]
    fn test_ordered_map_insert_replaces_existing_key_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1usize);
        map.insert("b", 2);
        map.insert("a", 9);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&9));
    }

    #[test]
    fn test_default_education_entry_is_all_not_found() {
        let entry = EducationEntry::default();
        assert_eq!(entry.education, NOT_FOUND);
        assert_eq!(entry.institution, NOT_FOUND);
        assert_eq!(entry.cgpa, NOT_FOUND);
        assert_eq!(entry.year, NOT_FOUND);
    }

    #[test]
    fn test_or_not_found() {
        assert_eq!(or_not_found(None), NOT_FOUND);
        assert_eq!(or_not_found(Some("x".to_string())), "x");
    }
}
