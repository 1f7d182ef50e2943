//! `inspect` and `set-mode` implementations.

use std::path::{Path, PathBuf};

use thiserror::Error;

use matmode_core::ModeResolver;
use matmode_core::config::{self, ConfigError, ShaderProfile};
use matmode_core::material::{
    BlendFactor, EditorFields, MaterialBatch, MaterialError, RenderQueue, RenderStateSnapshot,
    RenderingMode, ShadingMaterial, SmoothnessSource,
};

/// Errors reported by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("mode change rejected: {0}")]
    Material(#[from] MaterialError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Picks the profile file if given, the standard profile otherwise.
pub fn resolve_profile(path: Option<&Path>) -> Result<ShaderProfile, CliError> {
    match path {
        Some(path) => {
            let profile = config::load_profile(path)?;
            log::info!("Using shader profile \"{}\"", profile.name);
            Ok(profile)
        }
        None => Ok(ShaderProfile::standard()),
    }
}

/// Describes the decoded state of one material file.
pub fn inspect(profile: ShaderProfile, path: &Path) -> Result<String, CliError> {
    let material = config::load_material(path)?;
    let resolver = ModeResolver::new(profile);
    Ok(describe(&resolver, &material))
}

fn describe(resolver: &ModeResolver, material: &ShadingMaterial) -> String {
    let mode = resolver.decode(material);
    let state = RenderStateSnapshot::read(material);
    let fields = resolver.resolve_visibility(material);

    let queue = match RenderQueue::from_value(state.queue) {
        Some(queue) => format!("{} ({queue:?})", state.queue),
        None => state.queue.to_string(),
    };
    let blend = |value: Option<i32>| match value.and_then(BlendFactor::from_value) {
        Some(factor) => format!("{factor:?}"),
        None => "unset".to_owned(),
    };
    let visible: Vec<&str> = [
        (EditorFields::ALPHA_CUTOFF, "alpha cutoff"),
        (EditorFields::SEMITRANSPARENT_SHADOWS, "semitransparent shadows"),
        (EditorFields::NORMAL_SCALE, "normal scale"),
        (EditorFields::OCCLUSION_STRENGTH, "occlusion strength"),
        (EditorFields::SMOOTHNESS_SOURCE, "smoothness source"),
    ]
    .into_iter()
    .filter(|(field, _)| fields.contains(*field))
    .map(|(_, name)| name)
    .collect();

    let render_type = if state.render_type.is_empty() {
        "(none)"
    } else {
        state.render_type.as_str()
    };
    let z_write = match state.z_write {
        Some(0) => "off",
        Some(_) => "on",
        None => "unset",
    };
    format!(
        "material:          {name}\n\
         rendering mode:    {mode}\n\
         smoothness source: {smoothness}\n\
         queue:             {queue}\n\
         RenderType:        {render_type}\n\
         blend:             {src} / {dst}\n\
         z write:           {z_write}\n\
         optional fields:   {visible}\n",
        name = material.name,
        smoothness = SmoothnessSource::decode(material).label(),
        src = blend(state.src_blend),
        dst = blend(state.dst_blend),
        visible = visible.join(", "),
    )
}

/// Switches every file to `mode` in one transaction.
///
/// Nothing is written unless every material loaded and accepted the change.
pub fn set_mode(
    profile: ShaderProfile,
    mode: RenderingMode,
    paths: &[PathBuf],
) -> Result<usize, CliError> {
    let members = paths
        .iter()
        .map(|path| config::load_material(path))
        .collect::<Result<Vec<_>, _>>()?;
    let mut batch = MaterialBatch::new(members);

    let resolver = ModeResolver::new(profile);
    resolver.apply(mode, &mut batch)?;

    let files = paths
        .iter()
        .zip(batch.members())
        .map(|(path, material)| Ok((path.clone(), config::material_to_toml(material)?)))
        .collect::<Result<Vec<_>, CliError>>()?;
    write_all(&files)?;
    Ok(batch.len())
}

/// Writes every file or none.
///
/// Each text first goes to a hidden sibling file; the originals are only
/// replaced once all of those writes succeeded.
fn write_all(files: &[(PathBuf, String)]) -> Result<(), CliError> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for (path, text) in files {
        let temp = staging_path(path);
        if let Err(source) = std::fs::write(&temp, text) {
            for (temp, _) in &staged {
                if let Err(e) = std::fs::remove_file(temp) {
                    log::warn!("failed to remove {}: {e}", temp.display());
                }
            }
            return Err(CliError::Write {
                path: path.clone(),
                source,
            });
        }
        staged.push((temp, path.as_path()));
    }

    for (temp, path) in &staged {
        std::fs::rename(temp, path).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {}", path.display());
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.matmode-tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use matmode_core::material::ShadingResource;
    use matmode_core::material::keywords::RENDERING_FADE;

    /// Scratch directory unique to one test.
    fn scratch(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("matmode-cli-{}-{test}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_material(dir: &Path, material: &ShadingMaterial) -> PathBuf {
        let path = dir.join(format!("{}.toml", material.name));
        std::fs::write(&path, config::material_to_toml(material).unwrap()).unwrap();
        path
    }

    #[test]
    fn inspect_reports_decoded_mode() {
        let dir = scratch("inspect");
        let material = ShaderProfile::standard()
            .new_material("glass")
            .with_keyword(RENDERING_FADE);
        let path = write_material(&dir, &material);

        let report = inspect(ShaderProfile::standard(), &path).unwrap();
        assert!(report.contains("rendering mode:    Fade"));
        assert!(report.contains("alpha cutoff"));
        assert!(report.contains("semitransparent shadows"));
        assert!(report.contains("2000 (Geometry)"));
    }

    #[test]
    fn set_mode_rewrites_all_files() {
        let dir = scratch("set-mode");
        let profile = ShaderProfile::standard();
        let paths = vec![
            write_material(&dir, &profile.new_material("a")),
            write_material(&dir, &profile.new_material("b")),
        ];

        let count = set_mode(profile, RenderingMode::Transparent, &paths).unwrap();
        assert_eq!(count, 2);
        for path in &paths {
            let material = config::load_material(path).unwrap();
            assert_eq!(material.render_queue(), 3000);
        }
    }

    #[test]
    fn rejected_batch_writes_nothing() {
        let dir = scratch("rejected");
        let profile = ShaderProfile::standard();
        let mut locked = profile.new_material("locked");
        locked.read_only = true;
        let paths = vec![
            write_material(&dir, &profile.new_material("free")),
            write_material(&dir, &locked),
        ];
        let before: Vec<String> = paths
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();

        let err = set_mode(profile, RenderingMode::Cutout, &paths).unwrap_err();
        assert!(matches!(
            err,
            CliError::Material(MaterialError::ResourceUnavailable(_))
        ));
        for (path, text) in paths.iter().zip(&before) {
            assert_eq!(&std::fs::read_to_string(path).unwrap(), text);
        }
    }

    #[test]
    fn failed_write_leaves_every_file_untouched() {
        let dir = scratch("partial-write");
        let first = dir.join("first.toml");
        std::fs::write(&first, "original").unwrap();
        let blocker = dir.join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let files = vec![
            (first.clone(), "rewritten".to_owned()),
            (blocker.join("second.toml"), "rewritten".to_owned()),
        ];
        let err = write_all(&files).unwrap_err();
        assert!(matches!(err, CliError::Write { .. }));
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "original");
        assert!(!staging_path(&first).exists());
    }

    #[test]
    fn write_all_replaces_files_and_cleans_up() {
        let dir = scratch("write-all");
        let files: Vec<_> = ["a.toml", "b.toml"]
            .iter()
            .map(|name| (dir.join(name), format!("contents of {name}")))
            .collect();
        write_all(&files).unwrap();
        for (path, text) in &files {
            assert_eq!(&std::fs::read_to_string(path).unwrap(), text);
            assert!(!staging_path(path).exists());
        }
    }

    #[test]
    fn unsupported_mode_for_profile_is_rejected() {
        let dir = scratch("unsupported");
        let profile = ShaderProfile::cutout_only();
        let paths = vec![write_material(&dir, &profile.new_material("leaf"))];
        let err = set_mode(profile, RenderingMode::Fade, &paths).unwrap_err();
        assert!(matches!(
            err,
            CliError::Material(MaterialError::UnsupportedMode { .. })
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = inspect(
            ShaderProfile::standard(),
            Path::new("/nonexistent/material.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Io { .. })));
    }
}
