use serde::{Deserialize, Serialize};

/// The structured extraction result stored per portfolio, serialized as an
/// opaque JSON blob in the `resume_data` column.
///
/// The heuristic parser only ever fills `name`, `email` and `phone`; the
/// summary and the four lists exist for manual entry through the edit form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_sparse_blob() {
        // Rows written before a field existed must still load.
        let data: ResumeData =
            serde_json::from_str(r#"{"name":"Ada Lovelace","email":"ada@example.com"}"#).unwrap();
        assert_eq!(data.name, "Ada Lovelace");
        assert_eq!(data.phone, "");
        assert!(data.experience.is_empty());
    }
}
