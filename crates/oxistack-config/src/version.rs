//! Version-argument translation for the HTTP-adapter layer.

/// Version constraints consumed by the HTTP-adapter layer.
///
/// Exactly one of three shapes is produced by [`version_args`]: a pinned
/// version, an open range capped at `latest`, or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionArgs {
    /// Exact version to use.
    pub version: Option<String>,
    /// Lower bound for version negotiation.
    pub min_version: Option<String>,
    /// Upper bound for version negotiation.
    pub max_version: Option<String>,
}

impl VersionArgs {
    /// Negotiate up to the latest available version.
    #[must_use]
    pub fn latest() -> Self {
        Self {
            max_version: Some("latest".to_owned()),
            ..Self::default()
        }
    }

    /// Pin an exact version.
    pub fn pinned(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Translate a requested version plus the configured API version into
/// adapter version arguments.
///
/// - requested `"latest"` negotiates to latest regardless of config;
/// - no request falls back to the configured version when present;
/// - no request and no configured version negotiates to latest;
/// - any other explicit request is pinned unchanged.
#[must_use]
pub fn version_args(requested: Option<&str>, configured: Option<&str>) -> VersionArgs {
    match requested {
        Some("latest") => VersionArgs::latest(),
        Some(version) => VersionArgs::pinned(version),
        None => configured.map_or_else(VersionArgs::latest, VersionArgs::pinned),
    }
}

/// Candidate catalog service types for volume endpoint probing, highest
/// version first.
///
/// When no volume API version is configured, the catalog may carry the
/// service under any of its historical per-major-version type strings.
/// Probing runs from `trunc(max_version)` (default 3) down to
/// `trunc(min_version) + 1` (default 2); major version 1 maps to the
/// literal `volume`, N > 1 to `volumevN`.
#[must_use]
pub fn volume_candidates(min_version: Option<f64>, max_version: Option<f64>) -> Vec<String> {
    #[allow(clippy::cast_possible_truncation)]
    let min_major = min_version.unwrap_or(1.0).trunc() as i64;
    #[allow(clippy::cast_possible_truncation)]
    let max_major = max_version.unwrap_or(3.0).trunc() as i64;

    (min_major + 1..=max_major)
        .rev()
        .map(|major| {
            if major == 1 {
                "volume".to_owned()
            } else {
                format!("volumev{major}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_negotiate_latest_when_requested() {
        let args = version_args(Some("latest"), Some("2.1"));
        assert_eq!(args, VersionArgs::latest());
        assert_eq!(args.max_version.as_deref(), Some("latest"));
        assert!(args.version.is_none());
        assert!(args.min_version.is_none());
    }

    #[test]
    fn test_should_fall_back_to_configured_version() {
        let args = version_args(None, Some("2.1"));
        assert_eq!(args, VersionArgs::pinned("2.1"));
    }

    #[test]
    fn test_should_negotiate_latest_without_any_version() {
        assert_eq!(version_args(None, None), VersionArgs::latest());
    }

    #[test]
    fn test_should_pin_explicit_version_unchanged() {
        let args = version_args(Some("3.14"), Some("2.1"));
        assert_eq!(args, VersionArgs::pinned("3.14"));
    }

    #[test]
    fn test_should_probe_volume_candidates_descending() {
        assert_eq!(volume_candidates(None, None), vec!["volumev3", "volumev2"]);
    }

    #[test]
    fn test_should_map_major_version_one_to_bare_volume() {
        assert_eq!(
            volume_candidates(Some(0.0), Some(2.0)),
            vec!["volumev2", "volume"]
        );
    }

    #[test]
    fn test_should_truncate_fractional_bounds() {
        assert_eq!(
            volume_candidates(Some(1.5), Some(3.7)),
            vec!["volumev3", "volumev2"]
        );
    }
}
