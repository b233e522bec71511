use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "DermaScan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed filename of the generated report artifact.
pub const REPORT_FILENAME: &str = "Skin_Disease_Report.pdf";

/// Default base URL of the prediction service.
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Base URL of the prediction service.
/// Overridable via `DERMASCAN_API_URL` for self-hosted deployments.
pub fn prediction_service_url() -> String {
    std::env::var("DERMASCAN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "info,dermascan_lib=debug".to_string()
}

/// Get the application data directory
/// ~/DermaScan/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("DermaScan")
}

/// Get the directory generated reports are written to
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("DermaScan"));
    }

    #[test]
    fn exports_dir_under_app_data() {
        let exports = exports_dir();
        let app = app_data_dir();
        assert!(exports.starts_with(app));
        assert!(exports.ends_with("exports"));
    }

    #[test]
    fn app_name_is_dermascan() {
        assert_eq!(APP_NAME, "DermaScan");
    }

    #[test]
    fn report_filename_is_fixed_literal() {
        assert_eq!(REPORT_FILENAME, "Skin_Disease_Report.pdf");
    }

    #[test]
    fn default_filter_mentions_crate() {
        assert!(default_log_filter().contains("dermascan"));
    }
}
