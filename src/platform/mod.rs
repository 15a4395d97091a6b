//! Platform abstraction layer
//!
//! Device compatibility checks run once at startup, before the menu is shown.

/// Minimum supported Android API level (8.0 Oreo)
pub const MIN_ANDROID_API: u32 = 26;
/// Human-readable name of the minimum Android version
pub const MIN_ANDROID_VERSION_NAME: &str = "8.0";
/// API level below which the system WebView is considered outdated
pub const MIN_WEBVIEW_API: u32 = 24;
/// Where incompatible Android devices are sent to update
pub const ANDROID_UPDATE_URL: &str = "market://details?id=com.google.android.gms";

/// Host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android { api_level: u32 },
    Ios,
    Web,
    Desktop,
}

impl Platform {
    /// Platform of the running binary (Android API level unknown here)
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_arch = "wasm32") {
            Platform::Web
        } else {
            Platform::Desktop
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Platform::Android { .. } | Platform::Ios)
    }
}

/// Outcome of a compatibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub is_compatible: bool,
    pub message: Option<String>,
    pub store_url: Option<&'static str>,
}

impl Compatibility {
    fn ok() -> Self {
        Self {
            is_compatible: true,
            message: None,
            store_url: None,
        }
    }
}

/// Check whether the game can run on `platform`
pub fn check_compatibility(platform: Platform) -> Compatibility {
    match platform {
        Platform::Android { api_level } if api_level < MIN_ANDROID_API => {
            let current = android_version_name(api_level);
            log::warn!("Incompatible device: Android {}", current);
            Compatibility {
                is_compatible: false,
                message: Some(format!(
                    "Your device runs Android {}. This game requires Android {} or newer.",
                    current, MIN_ANDROID_VERSION_NAME
                )),
                store_url: Some(ANDROID_UPDATE_URL),
            }
        }
        _ => Compatibility::ok(),
    }
}

/// Non-fatal warnings about device features
pub fn check_features(platform: Platform) -> Vec<String> {
    let mut warnings = Vec::new();

    let webview_ok = matches!(platform, Platform::Android { api_level } if api_level >= MIN_WEBVIEW_API);
    if !webview_ok {
        warnings.push("Some features may not work because of an outdated WebView".to_string());
    }
    if matches!(platform, Platform::Android { .. }) {
        warnings.push("2+ GB of RAM is recommended for best performance".to_string());
    }

    warnings
}

/// Marketing name for an Android API level
pub fn android_version_name(api_level: u32) -> String {
    let name = match api_level {
        21 => "5.0 (Lollipop)",
        22 => "5.1 (Lollipop)",
        23 => "6.0 (Marshmallow)",
        24 => "7.0 (Nougat)",
        25 => "7.1 (Nougat)",
        26 => "8.0 (Oreo)",
        27 => "8.1 (Oreo)",
        28 => "9.0 (Pie)",
        29 => "10.0",
        30 => "11.0",
        31 => "12.0",
        32 => "12L",
        33 => "13.0",
        34 => "14.0",
        35 => "15.0",
        36 => "16.0",
        _ => return format!("API {}", api_level),
    };
    name.to_string()
}
