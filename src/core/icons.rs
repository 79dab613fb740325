//! Platform icons for credential cards.

/// Known platforms with a dedicated icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformIcon {
    Google,
    Facebook,
    Twitter,
    Instagram,
    LinkedIn,
    GitHub,
    Microsoft,
    Apple,
    Amazon,
    Netflix,
    Spotify,
    YouTube,
    WhatsApp,
    Telegram,
    Discord,
    Generic,
}

const KNOWN: &[(PlatformIcon, &[&str])] = &[
    (PlatformIcon::Google, &["google", "gmail"]),
    (PlatformIcon::Facebook, &["facebook", "meta"]),
    (PlatformIcon::Twitter, &["twitter", "x.com"]),
    (PlatformIcon::Instagram, &["instagram"]),
    (PlatformIcon::LinkedIn, &["linkedin"]),
    (PlatformIcon::GitHub, &["github"]),
    (PlatformIcon::Microsoft, &["microsoft", "outlook"]),
    (PlatformIcon::Apple, &["apple", "icloud"]),
    (PlatformIcon::Amazon, &["amazon"]),
    (PlatformIcon::Netflix, &["netflix"]),
    (PlatformIcon::Spotify, &["spotify"]),
    (PlatformIcon::YouTube, &["youtube"]),
    (PlatformIcon::WhatsApp, &["whatsapp"]),
    (PlatformIcon::Telegram, &["telegram"]),
    (PlatformIcon::Discord, &["discord"]),
];

impl PlatformIcon {
    /// First known platform whose key occurs in the platform name, else `Generic`.
    pub fn for_platform(platform: &str) -> Self {
        let name = platform.to_lowercase();
        KNOWN
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| name.contains(k)))
            .map(|(icon, _)| *icon)
            .unwrap_or(PlatformIcon::Generic)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            PlatformIcon::Google => "🌐",
            PlatformIcon::Facebook => "📘",
            PlatformIcon::Twitter => "🐦",
            PlatformIcon::Instagram => "📷",
            PlatformIcon::LinkedIn => "💼",
            PlatformIcon::GitHub => "🐙",
            PlatformIcon::Microsoft => "🪟",
            PlatformIcon::Apple => "🍎",
            PlatformIcon::Amazon => "📦",
            PlatformIcon::Netflix => "🎬",
            PlatformIcon::Spotify => "🎵",
            PlatformIcon::YouTube => "▶️",
            PlatformIcon::WhatsApp => "💬",
            PlatformIcon::Telegram => "✈️",
            PlatformIcon::Discord => "🎮",
            PlatformIcon::Generic => "🔐",
        }
    }
}
