//! RetroArch / libretro generator
//!
//! Writes display and behavior overrides into retroarch.cfg, per-core
//! options into the shared core-options file, and a per-game input remap
//! when the front-end asked for one, then builds the `-L core rom`
//! command line.

mod core_options;
mod remap;

use std::path::PathBuf;

use retroshim_config::{CfgFile, check_bios};

use crate::{Generator, GeneratorError, LaunchContext, LaunchSpec};

pub struct RetroArchGenerator;

impl Generator for RetroArchGenerator {
    fn name(&self) -> &'static str {
        "libretro"
    }

    fn generate(&self, ctx: &LaunchContext) -> Result<LaunchSpec, GeneratorError> {
        if !ctx.rom_path.exists() {
            return Err(GeneratorError::RomNotFound(ctx.rom_path.clone()));
        }

        let core = ctx
            .core()
            .ok_or_else(|| GeneratorError::CoreNotFound(ctx.system.short_name().to_string()))?;
        let core_path = self.resolve_core(ctx, core)?;

        check_bios(&ctx.system, &ctx.settings.bios_dir)?;

        let config_path = ctx.settings.retroarch_config_dir.join("retroarch.cfg");
        if let Err(e) = self.write_main_config(ctx, &config_path) {
            tracing::warn!("Skipping retroarch.cfg update: {e}");
        }

        let core_options_path = ctx
            .settings
            .retroarch_config_dir
            .join("retroarch-core-options.cfg");
        if let Err(e) = self.write_core_options(ctx, core, &core_options_path) {
            tracing::warn!("Skipping core options update: {e}");
        }

        let mut append_config = None;
        match remap::write_remap(ctx, core) {
            Ok(path) => append_config = path,
            Err(e) => tracing::warn!("Skipping input remap: {e}"),
        }

        let mut spec = LaunchSpec::new(&ctx.settings.retroarch_path);
        spec.arg("-L").arg(core_path.display().to_string());
        spec.arg("--config").arg(config_path.display().to_string());
        if let Some(remap_path) = append_config {
            spec.arg("--appendconfig")
                .arg(remap_path.display().to_string());
        }
        if ctx.options.is_enabled("verbose") {
            spec.arg("-v");
        }
        spec.arg(ctx.rom_path.display().to_string());

        tracing::info!("Launching {} with core {core}", ctx.rom_name());
        Ok(spec)
    }
}

impl RetroArchGenerator {
    /// Find the core library, accepting both naming schemes.
    fn resolve_core(&self, ctx: &LaunchContext, core: &str) -> Result<PathBuf, GeneratorError> {
        let primary = ctx.settings.cores_dir.join(format!("{core}_libretro.so"));
        if primary.exists() {
            return Ok(primary);
        }
        let alternate = ctx.settings.cores_dir.join(format!("libretro-{core}.so"));
        if alternate.exists() {
            return Ok(alternate);
        }
        Err(GeneratorError::CoreNotFound(core.to_string()))
    }

    fn write_main_config(
        &self,
        ctx: &LaunchContext,
        path: &std::path::Path,
    ) -> Result<(), GeneratorError> {
        let mut cfg = CfgFile::load(path)?;
        let options = &ctx.options;

        let fullscreen = !options.get("video_mode").is_some_and(|m| m == "windowed");
        cfg.set("video_fullscreen", bool_str(fullscreen));

        if let Some(driver) = options.get("video_driver") {
            cfg.set("video_driver", driver);
        }
        if let Some(ratio) = options.get_int("ratio") {
            cfg.set("aspect_ratio_index", ratio.to_string());
        }
        cfg.set("video_vsync", bool_str(!options.is_enabled("vsync_off")));
        cfg.set("video_smooth", bool_str(options.is_enabled("smooth")));
        cfg.set("rewind_enable", bool_str(options.is_enabled("rewind")));
        cfg.set("fps_show", bool_str(options.is_enabled("showfps")));
        cfg.set(
            "savestate_auto_save",
            bool_str(options.is_enabled("autosave")),
        );
        cfg.set(
            "savestate_auto_load",
            bool_str(options.is_enabled("autosave")),
        );
        if let Some(shader) = options.get("shader") {
            cfg.set("video_shader_enable", "true");
            cfg.set("video_shader", shader);
        } else {
            cfg.set("video_shader_enable", "false");
        }
        cfg.set(
            "savefile_directory",
            ctx.settings.saves_dir.display().to_string(),
        );
        cfg.set(
            "system_directory",
            ctx.settings.bios_dir.display().to_string(),
        );

        cfg.save(path)?;
        Ok(())
    }

    fn write_core_options(
        &self,
        ctx: &LaunchContext,
        core: &str,
        path: &std::path::Path,
    ) -> Result<(), GeneratorError> {
        let mut cfg = CfgFile::load(path)?;
        core_options::apply(core, &ctx.options, &mut cfg);
        cfg.save(path)?;
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
