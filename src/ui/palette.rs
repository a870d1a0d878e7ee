// src/ui/palette.rs
use eframe::egui::Color32;

use crate::config::ThemeMode;
use crate::state::RegionState;

const fn hex(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Fill and stroke for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStyle {
    pub fill: Color32,
    pub stroke: Color32,
}

pub fn region_style(state: RegionState, theme: ThemeMode) -> RegionStyle {
    let (fill, stroke) = match (theme, state) {
        (ThemeMode::Dark, RegionState::Selected) => (0x065f46, 0x064e3b),
        (ThemeMode::Dark, RegionState::Hovered) => (0x047857, 0x064e3b),
        (ThemeMode::Dark, RegionState::Idle) => (0x10b981, 0x064e3b),
        (ThemeMode::Dark, RegionState::NoData) => (0x6b7280, 0x4b5563),
        (ThemeMode::Light, RegionState::Selected) => (0x059669, 0x047857),
        (ThemeMode::Light, RegionState::Hovered) => (0x10b981, 0x047857),
        (ThemeMode::Light, RegionState::Idle) => (0x34d399, 0x047857),
        (ThemeMode::Light, RegionState::NoData) => (0xd1d5db, 0x9ca3af),
    };
    RegionStyle {
        fill: hex(fill),
        stroke: hex(stroke),
    }
}

// Stat tile accents: total, unicorns, women-led.
pub fn tile_colors(theme: ThemeMode) -> [Color32; 3] {
    match theme {
        ThemeMode::Dark => [hex(0x10b981), hex(0xa78bfa), hex(0x60a5fa)],
        ThemeMode::Light => [hex(0x059669), hex(0x8b5cf6), hex(0x3b82f6)],
    }
}

pub const GROWTH: Color32 = hex(0xf97316);
pub const CITIES: Color32 = hex(0x10b981);
pub const FUNDING: [Color32; 5] = [hex(0x3b82f6), hex(0x60a5fa), hex(0x93c5fd), hex(0x2563eb), hex(0x1d4ed8)];
pub const SECTORS: [Color32; 5] = [hex(0x8b5cf6), hex(0xa78bfa), hex(0xc4b5fd), hex(0x7c3aed), hex(0x6d28d9)];
pub const STAGES: [Color32; 4] = [hex(0x3b82f6), hex(0x60a5fa), hex(0x93c5fd), hex(0x2563eb)];
pub const CAREER: [Color32; 3] = [hex(0x10b981), hex(0x059669), hex(0x047857)];

/// Cycles through `colors` for charts with more entries than colors.
pub fn cycled(colors: &[Color32], index: usize) -> Color32 {
    colors.get(index % colors.len().max(1)).copied().unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_conversion() {
        assert_eq!(hex(0x10b981), Color32::from_rgb(0x10, 0xb9, 0x81));
    }

    #[test]
    fn test_states_are_distinct_per_theme() {
        for theme in [ThemeMode::Dark, ThemeMode::Light] {
            let fills: Vec<Color32> = [
                RegionState::NoData,
                RegionState::Idle,
                RegionState::Hovered,
                RegionState::Selected,
            ]
            .iter()
            .map(|state| region_style(*state, theme).fill)
            .collect();
            for (i, a) in fills.iter().enumerate() {
                assert!(fills[i + 1..].iter().all(|b| a != b));
            }
        }
    }

    #[test]
    fn test_theme_changes_tones() {
        assert_eq!(region_style(RegionState::Selected, ThemeMode::Dark).fill, hex(0x065f46));
        assert_eq!(region_style(RegionState::NoData, ThemeMode::Light).fill, hex(0xd1d5db));
        assert_ne!(
            region_style(RegionState::Idle, ThemeMode::Dark),
            region_style(RegionState::Idle, ThemeMode::Light)
        );
    }

    #[test]
    fn test_cycled_wraps() {
        assert_eq!(cycled(&STAGES, 5), STAGES[1]);
        assert_eq!(cycled(&[], 3), Color32::GRAY);
    }
}
