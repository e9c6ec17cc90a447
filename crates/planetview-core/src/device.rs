//! Device classification and input family selection

/// User-agent fragments that identify a mobile browser
const MOBILE_MARKERS: &[&str] = &["mobi", "android"];

/// Device class, decided once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Mobile,
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Classify from the browser's user-agent string (case-insensitive
    /// match against "Mobi" or "Android")
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if MOBILE_MARKERS.iter().any(|marker| ua.contains(marker)) {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    pub fn from_is_mobile(is_mobile: bool) -> Self {
        if is_mobile {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }

    /// Input family wired for this device class
    pub fn input_family(self) -> InputFamily {
        match self {
            DeviceClass::Mobile => InputFamily::Touch,
            DeviceClass::Desktop => InputFamily::Mouse,
        }
    }
}

/// Which pointer events drive rotation. Exactly one family is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFamily {
    Mouse,
    Touch,
}
