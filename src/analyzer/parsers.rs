//! Format-specific lockfile parsers.
//!
//! Each parser returns the libraries it finds, or an error message that the
//! caller wraps with the path and format name.

use super::Library;
use serde_json::Value;
use std::collections::HashSet;

pub(super) type ParseResult = std::result::Result<Vec<Library>, String>;

/// npm `package-lock.json`. v2 and v3 list every install under `packages`,
/// v1 nests `dependencies` recursively.
pub(super) fn package_lock(content: &str) -> ParseResult {
    let json: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut libraries = Vec::new();

    if let Some(packages) = json.get("packages").and_then(|v| v.as_object()) {
        for (key, entry) in packages {
            // "" is the root project
            let Some(idx) = key.rfind("node_modules/") else {
                continue;
            };
            if entry.get("link").and_then(|v| v.as_bool()) == Some(true) {
                continue;
            }
            let name = entry
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or(&key[idx + "node_modules/".len()..]);
            if let Some(version) = entry.get("version").and_then(|v| v.as_str()) {
                libraries.push(Library::new(name, version));
            }
        }
        return Ok(libraries);
    }

    if let Some(deps) = json.get("dependencies") {
        collect_npm_v1(deps, &mut libraries);
    }
    Ok(libraries)
}

fn collect_npm_v1(deps: &Value, out: &mut Vec<Library>) {
    let Some(deps) = deps.as_object() else {
        return;
    };
    for (name, entry) in deps {
        if let Some(version) = entry.get("version").and_then(|v| v.as_str()) {
            out.push(Library::new(name, version));
        }
        if let Some(nested) = entry.get("dependencies") {
            collect_npm_v1(nested, out);
        }
    }
}

/// `yarn.lock`, classic and berry.
pub(super) fn yarn_lock(content: &str) -> ParseResult {
    let mut libraries = Vec::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        if !line.starts_with(' ') {
            current = line
                .strip_suffix(':')
                .and_then(|header| header.split(',').next())
                .map(|spec| spec.trim().trim_matches('"'))
                .filter(|spec| *spec != "__metadata")
                .and_then(yarn_package_name)
                .map(str::to_string);
            continue;
        }

        let trimmed = line.trim();
        let Some(version) = trimmed
            .strip_prefix("version ")
            .or_else(|| trimmed.strip_prefix("version: "))
        else {
            continue;
        };
        if let Some(name) = current.take() {
            libraries.push(Library::new(name, version.trim().trim_matches('"')));
        }
    }
    Ok(libraries)
}

/// `lodash@^4.17.21` -> `lodash`, `@babel/core@npm:^7.0.0` -> `@babel/core`.
fn yarn_package_name(spec: &str) -> Option<&str> {
    let idx = spec.get(1..)?.find('@')? + 1;
    Some(&spec[..idx])
}

/// `[[package]]` tables with `name` and `version`, as written by Cargo,
/// Poetry and uv.
pub(super) fn toml_packages(content: &str) -> ParseResult {
    let toml: toml::Value = toml::from_str(content).map_err(|e| e.to_string())?;

    let libraries = toml
        .get("package")
        .and_then(|v| v.as_array())
        .map(|packages| {
            packages
                .iter()
                .filter_map(|pkg| {
                    let name = pkg.get("name")?.as_str()?;
                    let version = pkg.get("version")?.as_str()?;
                    Some(Library::new(name, version))
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(libraries)
}

/// `composer.lock`: `packages` and `packages-dev` arrays.
pub(super) fn composer_lock(content: &str) -> ParseResult {
    let json: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut libraries = Vec::new();

    for section in ["packages", "packages-dev"] {
        let Some(packages) = json.get(section).and_then(|v| v.as_array()) else {
            continue;
        };
        for pkg in packages {
            if let (Some(name), Some(version)) = (
                pkg.get("name").and_then(|v| v.as_str()),
                pkg.get("version").and_then(|v| v.as_str()),
            ) {
                libraries.push(Library::new(name, version));
            }
        }
    }
    Ok(libraries)
}

/// `Pipfile.lock`: `default` and `develop` maps with `==` pinned versions.
pub(super) fn pipfile_lock(content: &str) -> ParseResult {
    let json: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut libraries = Vec::new();

    for section in ["default", "develop"] {
        let Some(deps) = json.get(section).and_then(|v| v.as_object()) else {
            continue;
        };
        for (name, entry) in deps {
            if let Some(version) = entry.get("version").and_then(|v| v.as_str()) {
                libraries.push(Library::new(name, version.trim_start_matches("==")));
            }
        }
    }
    Ok(libraries)
}

/// `Gemfile.lock`: direct entries of the `specs:` block in the `GEM` section.
pub(super) fn gemfile_lock(content: &str) -> ParseResult {
    let mut libraries = Vec::new();
    let mut in_gem = false;
    let mut in_specs = false;

    for line in content.lines() {
        if !line.starts_with(' ') {
            in_gem = line.trim() == "GEM";
            in_specs = false;
            continue;
        }
        if !in_gem {
            continue;
        }
        if line.trim() == "specs:" {
            in_specs = true;
            continue;
        }
        // Four spaces is a gem, six is one of its requirements.
        if !in_specs || !line.starts_with("    ") || line.starts_with("     ") {
            continue;
        }
        let Some((name, rest)) = line.trim().split_once(" (") else {
            continue;
        };
        if let Some(version) = rest.strip_suffix(')') {
            libraries.push(Library::new(name, version));
        }
    }
    Ok(libraries)
}

/// `go.sum`: `module version hash`, with `/go.mod` lines folded into the module entry.
pub(super) fn go_sum(content: &str) -> ParseResult {
    let mut seen = HashSet::new();
    let mut libraries = Vec::new();

    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let (Some(module), Some(version)) = (fields.next(), fields.next()) else {
            continue;
        };
        let version = version.trim_end_matches("/go.mod");
        if seen.insert((module, version)) {
            libraries.push(Library::new(module, version));
        }
    }
    Ok(libraries)
}

/// `requirements.txt`: only exact `==` pins are reported.
pub(super) fn requirements_txt(content: &str) -> ParseResult {
    let mut libraries = Vec::new();

    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('-') {
            continue;
        }
        let line = line.split(';').next().unwrap_or(line);
        let Some((name, version)) = line.split_once("==") else {
            continue;
        };
        let name = name.split('[').next().unwrap_or(name).trim();
        let version = version.split(',').next().unwrap_or(version).trim();
        if !name.is_empty() && !version.is_empty() {
            libraries.push(Library::new(name, version));
        }
    }
    Ok(libraries)
}

/// `pnpm-lock.yaml`: keys of the `packages` map.
///
/// Key spellings differ by lockfile version: `/name/1.0.0` (v5),
/// `/name@1.0.0(peer@2.0.0)` (v6), `name@1.0.0` (v9).
pub(super) fn pnpm_lock(content: &str) -> ParseResult {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;

    let libraries = yaml
        .get("packages")
        .and_then(|v| v.as_mapping())
        .map(|packages| {
            packages
                .keys()
                .filter_map(|k| k.as_str())
                .filter_map(pnpm_package)
                .collect()
        })
        .unwrap_or_default();
    Ok(libraries)
}

fn pnpm_package(key: &str) -> Option<Library> {
    let key = key.strip_prefix('/').unwrap_or(key);
    // Unscoped names contain neither `@` nor `/`, so the first one after the
    // scope separates name and version in every spelling.
    let scope_len = if key.starts_with('@') {
        key.find('/')? + 1
    } else {
        0
    };
    let sep = scope_len + key[scope_len..].find(['@', '/'])?;
    let version = key[sep + 1..].split(['(', '_']).next().unwrap_or_default();
    if version.is_empty() {
        return None;
    }
    Some(Library::new(&key[..sep], version))
}
