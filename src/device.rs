//! Touch-capability detection.
//!
//! Detection runs once at startup and picks the [`InputMode`]. It is an
//! ordered list of probes; each probe either answers or defers to the next
//! one. A host that answers nothing is treated as pointer-capable.
//!
//! | Order | Probe | Looks at |
//! |-------|-------|----------|
//! | 1 | [`DeviceProbe::CapabilityProperty`] | touch point count / explicit override |
//! | 2 | [`DeviceProbe::MediaQuery`] | coarse-pointer media match |
//! | 3 | [`DeviceProbe::LegacyOrientation`] | orientation property presence |
//! | 4 | [`DeviceProbe::UserAgent`] | user-agent / OS string |

use crate::input::InputMode;

/// Substrings that mark a mobile user agent or OS identifier.
const MOBILE_AGENT_PATTERNS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "ios",
    "blackberry",
    "iemobile",
    "opera mini",
    "mobile",
];

/// What the host reports about itself.
///
/// Every field is optional: `None` means the host has no such API, which
/// makes the corresponding probe defer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Number of simultaneous touch points supported.
    pub max_touch_points: Option<u32>,
    /// Result of a coarse-pointer media query.
    pub coarse_pointer: Option<bool>,
    /// Whether a legacy orientation property exists.
    pub has_orientation: Option<bool>,
    /// User-agent or OS identification string.
    pub user_agent: Option<String>,
}

impl HostCapabilities {
    /// Capabilities of the native host this binary runs on.
    ///
    /// `touch_override` comes from configuration and, when set, answers the
    /// first probe directly. Otherwise only the target OS name is known.
    pub fn native(touch_override: Option<bool>) -> Self {
        Self {
            max_touch_points: touch_override.map(|touch| if touch { 1 } else { 0 }),
            coarse_pointer: None,
            has_orientation: None,
            user_agent: Some(std::env::consts::OS.to_string()),
        }
    }
}

/// A single detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceProbe {
    CapabilityProperty,
    MediaQuery,
    LegacyOrientation,
    UserAgent,
}

impl DeviceProbe {
    /// Default probe order, most reliable first.
    pub const DEFAULT_ORDER: [DeviceProbe; 4] = [
        DeviceProbe::CapabilityProperty,
        DeviceProbe::MediaQuery,
        DeviceProbe::LegacyOrientation,
        DeviceProbe::UserAgent,
    ];

    /// Returns `Some(is_touch)` when this probe can decide, `None` to defer.
    pub fn probe(&self, host: &HostCapabilities) -> Option<bool> {
        match self {
            DeviceProbe::CapabilityProperty => host.max_touch_points.map(|n| n > 0),
            // A fine pointer doesn't rule out a touch screen on hybrids, so
            // only a positive match is definitive.
            DeviceProbe::MediaQuery => host.coarse_pointer.filter(|&coarse| coarse),
            DeviceProbe::LegacyOrientation => host.has_orientation.filter(|&has| has),
            DeviceProbe::UserAgent => host.user_agent.as_deref().map(|agent| {
                let agent = agent.to_ascii_lowercase();
                MOBILE_AGENT_PATTERNS.iter().any(|p| agent.contains(p))
            }),
        }
    }
}

/// Ordered list of probes evaluated until one answers.
#[derive(Debug, Clone)]
pub struct DeviceDetector {
    probes: Vec<DeviceProbe>,
}

impl DeviceDetector {
    /// Detector with the default probe order.
    pub fn new() -> Self {
        Self {
            probes: DeviceProbe::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Detector with a custom probe order.
    pub fn with_probes(probes: Vec<DeviceProbe>) -> Self {
        Self { probes }
    }

    /// Whether the host is touch-capable.
    pub fn is_touch(&self, host: &HostCapabilities) -> bool {
        self.probes
            .iter()
            .find_map(|probe| {
                let answer = probe.probe(host);
                if let Some(touch) = answer {
                    tracing::debug!(?probe, touch, "device probe answered");
                }
                answer
            })
            .unwrap_or(false)
    }

    /// The input mode to activate for this host.
    pub fn input_mode(&self, host: &HostCapabilities) -> InputMode {
        if self.is_touch(host) {
            InputMode::Touch
        } else {
            InputMode::Pointer
        }
    }
}

impl Default for DeviceDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_host_is_pointer() {
        let detector = DeviceDetector::new();
        assert_eq!(
            detector.input_mode(&HostCapabilities::default()),
            InputMode::Pointer
        );
    }

    #[test]
    fn test_capability_property_wins_over_user_agent() {
        let host = HostCapabilities {
            max_touch_points: Some(0),
            user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".into()),
            ..Default::default()
        };
        assert!(!DeviceDetector::new().is_touch(&host));
    }

    #[test]
    fn test_falls_through_to_media_query() {
        let host = HostCapabilities {
            coarse_pointer: Some(true),
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".into()),
            ..Default::default()
        };
        assert!(DeviceDetector::new().is_touch(&host));
    }

    #[test]
    fn test_fine_pointer_defers_to_later_probes() {
        let host = HostCapabilities {
            coarse_pointer: Some(false),
            has_orientation: Some(true),
            ..Default::default()
        };
        assert!(DeviceDetector::new().is_touch(&host));
    }

    #[test]
    fn test_user_agent_match() {
        let android = HostCapabilities {
            user_agent: Some("Mozilla/5.0 (Linux; Android 14; Pixel 8)".into()),
            ..Default::default()
        };
        let desktop = HostCapabilities {
            user_agent: Some("macos".into()),
            ..Default::default()
        };
        let detector = DeviceDetector::new();
        assert!(detector.is_touch(&android));
        assert!(!detector.is_touch(&desktop));
    }

    #[test]
    fn test_native_override() {
        let detector = DeviceDetector::new();
        assert_eq!(
            detector.input_mode(&HostCapabilities::native(Some(true))),
            InputMode::Touch
        );
        assert_eq!(
            detector.input_mode(&HostCapabilities::native(Some(false))),
            InputMode::Pointer
        );
    }

    #[test]
    fn test_custom_probe_order() {
        let host = HostCapabilities {
            max_touch_points: Some(0),
            user_agent: Some("android".into()),
            ..Default::default()
        };
        let detector = DeviceDetector::with_probes(vec![DeviceProbe::UserAgent]);
        assert!(detector.is_touch(&host));
    }
}
