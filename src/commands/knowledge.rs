//! Knowledge-base IPC commands — static content for the description panel
//! and the Prevention/Medicine/Diet toggles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::knowledge::{DiseaseCode, DiseaseInfoView};

/// Code + full name pair for selector-style listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseListEntry {
    pub code: DiseaseCode,
    pub full_name: String,
}

/// All seven classes in fixed enumeration order.
#[tauri::command]
pub fn list_diseases() -> Vec<DiseaseListEntry> {
    DiseaseCode::ALL
        .iter()
        .map(|&code| DiseaseListEntry {
            code,
            full_name: crate::knowledge::lookup(code).full_name.to_string(),
        })
        .collect()
}

/// Full knowledge-base entry for one class.
#[tauri::command]
pub fn get_disease_info(code: String) -> Result<DiseaseInfoView, String> {
    let code = DiseaseCode::from_str(&code).map_err(|e| e.to_string())?;
    Ok(DiseaseInfoView::for_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_covers_all_codes_in_order() {
        let entries = list_diseases();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0].code, DiseaseCode::Akiec);
        assert_eq!(entries[6].code, DiseaseCode::Mel);
        assert_eq!(entries[6].full_name, "Melanoma");
    }

    #[test]
    fn info_lookup_by_code_string() {
        let info = get_disease_info("bcc".to_string()).unwrap();
        assert_eq!(info.full_name, "Basal Cell Carcinoma");
        assert!(!info.prevention.is_empty());
    }

    #[test]
    fn info_lookup_rejects_unknown_code() {
        let err = get_disease_info("xyz".to_string()).unwrap_err();
        assert!(err.contains("xyz"));
    }
}
