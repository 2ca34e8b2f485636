//! Regional presentation presets

/// Presentation defaults for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPreset {
    pub locale: &'static str,
    pub currency: &'static str,
    /// Accent colour for the sales template; `None` leaves the style untouched
    pub accent: Option<&'static str>,
}

/// Used for any region missing from the table
pub const DEFAULT_PRESET: RegionPreset = RegionPreset {
    locale: "en",
    currency: "USD",
    accent: None,
};

const PRESETS: &[(&str, RegionPreset)] = &[
    (
        "PERU",
        RegionPreset { locale: "es", currency: "PEN", accent: Some("#DC2626") },
    ),
    (
        "MEXICO",
        RegionPreset { locale: "es", currency: "MXN", accent: Some("#16A34A") },
    ),
    (
        "SPAIN",
        RegionPreset { locale: "es", currency: "EUR", accent: Some("#EAB308") },
    ),
    (
        "PORTUGAL",
        RegionPreset { locale: "pt", currency: "EUR", accent: None },
    ),
    (
        "BRAZIL",
        RegionPreset { locale: "pt-BR", currency: "BRL", accent: None },
    ),
];

const ALIASES: &[(&str, &str)] = &[("ESPAÑA", "SPAIN"), ("BRASIL", "BRAZIL")];

/// Canonical upper-case region code, resolving aliases
pub fn canonical_region(region: &str) -> String {
    let code = region.trim().to_uppercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map(|(_, target)| target.to_string())
        .unwrap_or(code)
}

/// Preset for a region, case-insensitive; `None` when the region is unknown
pub fn lookup(region: &str) -> Option<RegionPreset> {
    let code = canonical_region(region);
    PRESETS
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, preset)| *preset)
}

/// Preset for a region, falling back to [`DEFAULT_PRESET`]
pub fn preset_for(region: &str) -> RegionPreset {
    lookup(region).unwrap_or(DEFAULT_PRESET)
}
