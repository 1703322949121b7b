//! Per-core option tables
//!
//! Each core gets one function mapping launcher option keys to that core's
//! RetroArch option keys with a default. Only options the shim manages are
//! touched; everything else in the core-options file is left alone.

use retroshim_config::{CfgFile, LauncherOptions};

/// Apply the option table for a core. Unknown cores are left untouched.
pub fn apply(core: &str, options: &LauncherOptions, cfg: &mut CfgFile) {
    match core {
        "snes9x" => snes9x(options, cfg),
        "genesis_plus_gx" => genesis_plus_gx(options, cfg),
        "mgba" => mgba(options, cfg),
        "fceumm" => fceumm(options, cfg),
        "nestopia" => nestopia(options, cfg),
        "pcsx_rearmed" => pcsx_rearmed(options, cfg),
        "mupen64plus_next" => mupen64plus_next(options, cfg),
        "flycast" => flycast(options, cfg),
        "mame" => mame(options, cfg),
        other => tracing::debug!("No option table for core '{other}'"),
    }
}

fn snes9x(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set("snes9x_region", options.get_or("region", "auto"));
    cfg.set(
        "snes9x_overclock_superfx",
        options.get_or("superfx_overclock", "100%"),
    );
    cfg.set(
        "snes9x_up_down_allowed",
        toggle(options, "updown_allowed", "enabled", "disabled"),
    );
    cfg.set(
        "snes9x_hires_blend",
        options.get_or("hires_blend", "disabled"),
    );
    cfg.set("snes9x_aspect", options.get_or("snes_aspect", "4:3"));
}

fn genesis_plus_gx(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set(
        "genesis_plus_gx_region_detect",
        options.get_or("region", "auto"),
    );
    cfg.set(
        "genesis_plus_gx_render",
        options.get_or("render", "single field"),
    );
    cfg.set(
        "genesis_plus_gx_blargg_ntsc_filter",
        options.get_or("ntsc_filter", "disabled"),
    );
    cfg.set(
        "genesis_plus_gx_lock_on",
        options.get_or("lock_on", "disabled"),
    );
    cfg.set(
        "genesis_plus_gx_no_sprite_limit",
        toggle(options, "no_sprite_limit", "enabled", "disabled"),
    );
}

fn mgba(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set("mgba_gb_model", options.get_or("gb_model", "Autodetect"));
    cfg.set(
        "mgba_skip_bios",
        toggle(options, "skip_bios", "ON", "OFF"),
    );
    cfg.set(
        "mgba_sgb_borders",
        toggle(options, "sgb_borders", "ON", "OFF"),
    );
    cfg.set(
        "mgba_solar_sensor_level",
        options.get_or("solar_level", "0"),
    );
    cfg.set("mgba_frameskip", options.get_or("frameskip", "0"));
}

fn fceumm(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set("fceumm_region", options.get_or("region", "Auto"));
    cfg.set("fceumm_palette", options.get_or("palette", "default"));
    cfg.set("fceumm_ntsc_filter", options.get_or("ntsc_filter", "None"));
    cfg.set(
        "fceumm_nospritelimit",
        toggle(options, "no_sprite_limit", "enabled", "disabled"),
    );
    cfg.set(
        "fceumm_overscan_v",
        toggle(options, "crop_overscan", "enabled", "disabled"),
    );
}

fn nestopia(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set(
        "nestopia_nospritelimit",
        toggle(options, "no_sprite_limit", "enabled", "disabled"),
    );
    cfg.set(
        "nestopia_palette",
        options.get_or("palette", "cxa2025as"),
    );
    cfg.set("nestopia_overclock", options.get_or("overclock", "1x"));
    cfg.set(
        "nestopia_fds_auto_insert",
        toggle(options, "fds_auto_insert", "enabled", "disabled"),
    );
}

fn pcsx_rearmed(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set("pcsx_rearmed_region", options.get_or("region", "auto"));
    cfg.set(
        "pcsx_rearmed_neon_enhancement_enable",
        toggle(options, "neon_enhancement", "enabled", "disabled"),
    );
    cfg.set(
        "pcsx_rearmed_drc",
        toggle_default_on(options, "dynarec", "enabled", "disabled"),
    );
    cfg.set(
        "pcsx_rearmed_memcard2",
        toggle(options, "second_memcard", "enabled", "disabled"),
    );
    cfg.set(
        "pcsx_rearmed_show_bios_bootlogo",
        toggle(options, "bios_logo", "enabled", "disabled"),
    );
}

fn mupen64plus_next(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set(
        "mupen64plus-43screensize",
        options.get_or("n64_resolution", "640x480"),
    );
    cfg.set(
        "mupen64plus-cpucore",
        options.get_or("cpu_core", "dynamic_recompiler"),
    );
    cfg.set(
        "mupen64plus-rdp-plugin",
        options.get_or("rdp_plugin", "gliden64"),
    );
    cfg.set(
        "mupen64plus-EnableFBEmulation",
        toggle_default_on(options, "fb_emulation", "True", "False"),
    );
    cfg.set(
        "mupen64plus-BilinearMode",
        options.get_or("bilinear_mode", "standard"),
    );
}

fn flycast(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set(
        "flycast_internal_resolution",
        options.get_or("dc_resolution", "640x480"),
    );
    cfg.set(
        "flycast_widescreen_hack",
        toggle(options, "widescreen_hack", "enabled", "disabled"),
    );
    cfg.set(
        "flycast_anisotropic_filtering",
        options.get_or("anisotropic", "4"),
    );
    cfg.set(
        "flycast_enable_dsp",
        toggle_default_on(options, "dsp", "enabled", "disabled"),
    );
    cfg.set("flycast_language", options.get_or("dc_language", "Default"));
}

fn mame(options: &LauncherOptions, cfg: &mut CfgFile) {
    cfg.set(
        "mame_read_config",
        toggle(options, "read_config", "enabled", "disabled"),
    );
    cfg.set(
        "mame_alternate_renderer",
        toggle(options, "alternate_renderer", "enabled", "disabled"),
    );
    cfg.set("mame_altres", options.get_or("mame_resolution", "640x480"));
    cfg.set(
        "mame_cheats_enable",
        toggle(options, "cheats", "enabled", "disabled"),
    );
    cfg.set(
        "mame_mouse_enable",
        toggle(options, "mouse", "enabled", "disabled"),
    );
}

/// Option off unless enabled.
fn toggle<'a>(
    options: &LauncherOptions,
    key: &str,
    on: &'a str,
    off: &'a str,
) -> &'a str {
    if options.is_enabled(key) { on } else { off }
}

/// Option on unless explicitly disabled.
fn toggle_default_on<'a>(
    options: &LauncherOptions,
    key: &str,
    on: &'a str,
    off: &'a str,
) -> &'a str {
    match options.get(key) {
        Some(_) if !options.is_enabled(key) => off,
        _ => on,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snes9x_defaults() {
        let mut cfg = CfgFile::new();
        apply("snes9x", &LauncherOptions::new(), &mut cfg);
        assert_eq!(cfg.get("snes9x_region"), Some("auto"));
        assert_eq!(cfg.get("snes9x_up_down_allowed"), Some("disabled"));
        assert_eq!(cfg.get("snes9x_overclock_superfx"), Some("100%"));
    }

    #[test]
    fn test_option_overrides_default() {
        let mut cfg = CfgFile::new();
        let options = LauncherOptions::from_pairs([("region", "ntsc"), ("updown_allowed", "1")]);
        apply("snes9x", &options, &mut cfg);
        assert_eq!(cfg.get("snes9x_region"), Some("ntsc"));
        assert_eq!(cfg.get("snes9x_up_down_allowed"), Some("enabled"));
    }

    #[test]
    fn test_default_on_toggle() {
        let mut cfg = CfgFile::new();
        apply("pcsx_rearmed", &LauncherOptions::new(), &mut cfg);
        assert_eq!(cfg.get("pcsx_rearmed_drc"), Some("enabled"));

        let mut cfg = CfgFile::new();
        let options = LauncherOptions::from_pairs([("dynarec", "0")]);
        apply("pcsx_rearmed", &options, &mut cfg);
        assert_eq!(cfg.get("pcsx_rearmed_drc"), Some("disabled"));
    }

    #[test]
    fn test_unknown_core_is_noop() {
        let mut cfg = CfgFile::new();
        apply("some_future_core", &LauncherOptions::new(), &mut cfg);
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_existing_unrelated_keys_survive() {
        let mut cfg = CfgFile::parse("gambatte_gb_colorization = \"auto\"\n");
        apply("mgba", &LauncherOptions::new(), &mut cfg);
        assert_eq!(cfg.get("gambatte_gb_colorization"), Some("auto"));
        assert_eq!(cfg.get("mgba_gb_model"), Some("Autodetect"));
    }
}
