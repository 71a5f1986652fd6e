//! Conversions between settings values and options screen controls

use super::ids::OptionsCheckbox;
use crate::settings::{GameplayFlags, Resolution};

/// Resolutions the options screen can offer, smallest first
pub const RESOLUTIONS: [Resolution; 7] = [
    Resolution::new(640, 360),
    Resolution::new(960, 540),
    Resolution::new(1280, 720),
    Resolution::new(1600, 900),
    Resolution::new(1920, 1080),
    Resolution::new(2560, 1440),
    Resolution::new(3840, 2160),
];

/// Resolutions that fit the display, never empty
pub fn available_resolutions(max: Resolution) -> Vec<Resolution> {
    let fitting: Vec<Resolution> = RESOLUTIONS.iter().copied().filter(|r| r.fits_in(max)).collect();
    if fitting.is_empty() {
        vec![RESOLUTIONS[0]]
    } else {
        fitting
    }
}

/// Index of `current` in `list`, or the closest smaller entry
pub fn resolution_index(list: &[Resolution], current: Resolution) -> Option<usize> {
    list.iter()
        .position(|&r| r == current)
        .or_else(|| list.iter().rposition(|r| r.fits_in(current)))
        .or(if list.is_empty() { None } else { Some(0) })
}

/// Notice shown when the chosen resolution needs a restart
pub fn restart_notice(chosen: Resolution, running: Resolution) -> &'static str {
    if chosen == running {
        ""
    } else {
        "Restart the game to apply the new resolution"
    }
}

/// 0.0..=1.0 to a 0..=100 slider position
pub fn to_percent(value: f32) -> i32 {
    (value.clamp(0.0, 1.0) * 100.0).round() as i32
}

pub fn from_percent(percent: i32) -> f32 {
    percent.clamp(0, 100) as f32 / 100.0
}

pub fn volume_label(name: &str, percent: i32) -> String {
    format!("{} Volume: {}", name, percent)
}

pub fn dead_zone_label(percent: i32) -> String {
    format!("Dead Zone: {}%", percent)
}

pub fn gameplay_flag(flags: &GameplayFlags, checkbox: OptionsCheckbox) -> bool {
    match checkbox {
        OptionsCheckbox::FlashOnBrainDamage => flags.flash_on_brain_damage,
        OptionsCheckbox::BlipOnRevealUnseen => flags.blip_on_reveal_unseen,
        OptionsCheckbox::ShowForeignItems => flags.show_foreign_items,
        OptionsCheckbox::ShowToolTips => flags.show_tooltips,
        OptionsCheckbox::PreciseCollisions => flags.precise_collisions,
    }
}

pub fn gameplay_flag_mut(flags: &mut GameplayFlags, checkbox: OptionsCheckbox) -> &mut bool {
    match checkbox {
        OptionsCheckbox::FlashOnBrainDamage => &mut flags.flash_on_brain_damage,
        OptionsCheckbox::BlipOnRevealUnseen => &mut flags.blip_on_reveal_unseen,
        OptionsCheckbox::ShowForeignItems => &mut flags.show_foreign_items,
        OptionsCheckbox::ShowToolTips => &mut flags.show_tooltips,
        OptionsCheckbox::PreciseCollisions => &mut flags.precise_collisions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolutions_capped_by_display() {
        let list = available_resolutions(Resolution::new(1920, 1080));
        assert_eq!(list.len(), 5);
        assert_eq!(list.last(), Some(&Resolution::new(1920, 1080)));
    }

    #[test]
    fn test_tiny_display_still_gets_one_resolution() {
        assert_eq!(available_resolutions(Resolution::new(320, 240)), vec![RESOLUTIONS[0]]);
    }

    #[test]
    fn test_resolution_index_falls_back_to_smaller() {
        let list = available_resolutions(Resolution::new(1920, 1080));
        assert_eq!(resolution_index(&list, Resolution::new(1280, 720)), Some(2));
        assert_eq!(resolution_index(&list, Resolution::new(1366, 768)), Some(2));
        assert_eq!(resolution_index(&list, Resolution::new(100, 100)), Some(0));
    }

    #[test]
    fn test_percent_conversions() {
        assert_eq!(to_percent(0.6), 60);
        assert_eq!(to_percent(3.0), 100);
        assert_eq!(from_percent(25), 0.25);
        assert_eq!(volume_label("Music", 60), "Music Volume: 60");
    }

    #[test]
    fn test_restart_notice_only_on_change() {
        let running = Resolution::new(1280, 720);
        assert!(restart_notice(running, running).is_empty());
        assert!(!restart_notice(Resolution::new(640, 360), running).is_empty());
    }

    #[test]
    fn test_gameplay_flag_access() {
        let mut flags = GameplayFlags::default();
        *gameplay_flag_mut(&mut flags, OptionsCheckbox::ShowToolTips) = false;
        assert!(!flags.show_tooltips);
        assert!(!gameplay_flag(&flags, OptionsCheckbox::ShowToolTips));
        assert!(gameplay_flag(&flags, OptionsCheckbox::PreciseCollisions));
    }
}
