//! CMake generator classification

/// Generator name substrings that identify multi-configuration backends
pub const MULTI_CONFIG_MARKERS: &[&str] = &["visual studio", "xcode", "multi-config"];

/// Default generator for the host platform
pub fn default_generator() -> &'static str {
    if cfg!(target_os = "windows") {
        "Visual Studio 17 2022"
    } else {
        "Unix Makefiles"
    }
}

/// Whether one build tree holds several configurations selected at build time
pub fn is_multi_config(generator: &str) -> bool {
    let generator = generator.to_lowercase();
    MULTI_CONFIG_MARKERS
        .iter()
        .any(|marker| generator.contains(marker))
}

/// Whether the generator takes an explicit `-A <arch>` platform flag
pub fn accepts_arch_flag(generator: &str) -> bool {
    generator.to_lowercase().contains("visual studio")
}
