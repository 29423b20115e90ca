//! Mod folder listing and the rename/delete operations behind each action

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::ModError;
use super::naming;

/// Files on disk that share one mod identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModEntry {
    pub name: String,
    pub files: Vec<String>,
}

impl ModEntry {
    /// A mod counts as disabled as soon as one of its files is
    pub fn is_disabled(&self) -> bool {
        self.files.iter().any(|f| naming::is_disabled(f))
    }

    /// Label shown in the mod list
    pub fn label(&self) -> String {
        if self.is_disabled() {
            format!("{} (Disabled)", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Snapshot of the mods found in a folder, ordered by name
#[derive(Debug, Clone, Default)]
pub struct ModList {
    entries: Vec<ModEntry>,
}

impl ModList {
    /// Group file names by mod identifier, ignoring untracked names
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut groups: HashMap<String, Vec<String>> = HashMap::new();
        for name in names {
            let name = name.into();
            if !naming::is_tracked(&name) {
                continue;
            }
            groups
                .entry(naming::mod_identifier(&name))
                .or_default()
                .push(name);
        }

        let mut entries: Vec<ModEntry> = groups
            .into_iter()
            .map(|(name, mut files)| {
                files.sort();
                ModEntry { name, files }
            })
            .collect();
        entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ModEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn disabled_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_disabled()).count()
    }

    pub fn enabled_count(&self) -> usize {
        self.len() - self.disabled_count()
    }
}

fn ensure_folder(folder: &Path) -> Result<(), ModError> {
    if folder.is_dir() {
        Ok(())
    } else {
        Err(ModError::FolderMissing(folder.to_path_buf()))
    }
}

/// Read the mod folder (not recursive) and group its mod files
pub fn scan(folder: &Path) -> Result<ModList, ModError> {
    ensure_folder(folder)?;
    tracing::debug!("Reading mods from folder: {}", folder.display());

    let entries = fs::read_dir(folder).map_err(|e| ModError::io(folder, e))?;
    let mut names = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!("Skipping file with non UTF-8 name: {:?}", raw),
        }
    }

    let list = ModList::from_file_names(names);
    tracing::info!(
        "Found {} mods in {} ({} disabled)",
        list.len(),
        folder.display(),
        list.disabled_count()
    );
    Ok(list)
}

fn rename_in(folder: &Path, from: &str, to: &str) -> Result<(), ModError> {
    let source = folder.join(from);
    let target = folder.join(to);
    if target.exists() {
        return Err(ModError::TargetExists(target));
    }
    fs::rename(&source, &target).map_err(|e| ModError::io(&source, e))?;
    tracing::debug!("Renamed {} -> {}", from, to);
    Ok(())
}

/// Strip the disabled marker from every file of the mod
pub fn enable(folder: &Path, entry: &ModEntry) -> Result<usize, ModError> {
    ensure_folder(folder)?;
    let mut renamed = 0;
    for file in entry.files.iter().filter(|f| naming::is_disabled(f)) {
        rename_in(folder, file, &naming::enabled_name(file))?;
        renamed += 1;
    }
    tracing::info!("Enabled mod {} ({} files renamed)", entry.name, renamed);
    Ok(renamed)
}

/// Add the disabled marker to every file of the mod that lacks it
pub fn disable(folder: &Path, entry: &ModEntry) -> Result<usize, ModError> {
    ensure_folder(folder)?;
    let mut renamed = 0;
    for file in entry.files.iter().filter(|f| !naming::is_disabled(f)) {
        rename_in(folder, file, &naming::disabled_name(file))?;
        renamed += 1;
    }
    tracing::info!("Disabled mod {} ({} files renamed)", entry.name, renamed);
    Ok(renamed)
}

/// Remove every file of the mod still present in the folder
pub fn delete(folder: &Path, entry: &ModEntry) -> Result<usize, ModError> {
    ensure_folder(folder)?;
    let mut removed = 0;
    for file in &entry.files {
        let path = folder.join(file);
        if !path.exists() {
            continue;
        }
        fs::remove_file(&path).map_err(|e| ModError::io(&path, e))?;
        removed += 1;
    }
    tracing::info!("Deleted mod {} ({} files removed)", entry.name, removed);
    Ok(removed)
}
