//! Reading scenario files from disk
//!
//! `.yaml` / `.yml` files go through serde; anything else is read as the
//! plain `G N K` + `m x y vx vy` token format.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};

use crate::configuration::config::{BodyConfig, ParametersConfig, ScenarioConfig};
use crate::error::{Result, SimError};

fn config_error(path: &Path, field: impl Into<String>, reason: impl Into<String>) -> SimError {
    SimError::Config {
        path: path.to_path_buf(),
        field: field.into(),
        reason: reason.into(),
    }
}

/// Load a scenario, picking the format from the file extension
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let cfg = if is_yaml {
        let file = File::open(path).map_err(|source| SimError::Io { path: path.to_path_buf(), source })?;
        let cfg: ScenarioConfig = serde_yaml::from_reader(BufReader::new(file))
            .map_err(|source| SimError::Yaml { path: path.to_path_buf(), source })?;
        check_vectors(path, &cfg)?;
        cfg
    } else {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| SimError::Io { path: path.to_path_buf(), source })?;
        parse_text(path, &contents)?
    };

    info!(
        "loaded {}: {} bodies, {} steps, G = {}",
        path.display(),
        cfg.bodies.len(),
        cfg.parameters.steps,
        cfg.parameters.G
    );
    Ok(cfg)
}

/// Every YAML body vector must be 2D
fn check_vectors(path: &Path, cfg: &ScenarioConfig) -> Result<()> {
    for (i, b) in cfg.bodies.iter().enumerate() {
        for (name, v) in [("x", &b.x), ("v", &b.v)] {
            if v.len() != 2 {
                return Err(config_error(
                    path,
                    format!("body {} {}", i + 1, name),
                    format!("expected 2 components, found {}", v.len()),
                ));
            }
        }
    }
    Ok(())
}

/// Whitespace token reader that names the field it failed on
struct Tokens<'a, 'p> {
    path: &'p Path,
    inner: std::str::SplitWhitespace<'a>,
}

impl Tokens<'_, '_> {
    fn next<T: FromStr>(&mut self, field: &str) -> Result<T>
    where
        T::Err: std::fmt::Display,
    {
        let token = self
            .inner
            .next()
            .ok_or_else(|| config_error(self.path, field, "missing value"))?;
        token
            .parse()
            .map_err(|e: T::Err| config_error(self.path, field, format!("cannot parse {token:?}: {e}")))
    }
}

/// Parse the plain token format; `path` is only used in error messages
pub fn parse_text(path: &Path, contents: &str) -> Result<ScenarioConfig> {
    let mut tokens = Tokens { path, inner: contents.split_whitespace() };

    let g: f64 = tokens.next("gravitational constant")?;
    let n: usize = tokens.next("body count")?;
    let steps: usize = tokens.next("step count")?;

    // n is untrusted until the records are actually there
    let mut bodies = Vec::new();
    for i in 1..=n {
        let m = tokens.next(&format!("body {i} mass"))?;
        let x = tokens.next(&format!("body {i} x"))?;
        let y = tokens.next(&format!("body {i} y"))?;
        let vx = tokens.next(&format!("body {i} vx"))?;
        let vy = tokens.next(&format!("body {i} vy"))?;
        bodies.push(BodyConfig { m, x: vec![x, y], v: vec![vx, vy] });
    }

    let extra = tokens.inner.count();
    if extra > 0 {
        warn!("{}: ignoring {} trailing tokens after {} bodies", path.display(), extra, n);
    }

    Ok(ScenarioConfig {
        parameters: ParametersConfig { G: g, steps, dt: None, eps: None },
        bodies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("scenario.txt")
    }

    fn field_of(err: SimError) -> String {
        match err {
            SimError::Config { field, .. } => field,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn parses_header_and_records() {
        let cfg = parse_text(path(), "6.67e-11 2 10\n5.0 0 0 0 0\n1.0  1.5 -2\n 0.25 0.5\n").unwrap();
        assert_eq!(cfg.parameters.G, 6.67e-11);
        assert_eq!(cfg.parameters.steps, 10);
        assert_eq!(cfg.parameters.dt, None);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[1], BodyConfig { m: 1.0, x: vec![1.5, -2.0], v: vec![0.25, 0.5] });
    }

    #[test]
    fn empty_file_reports_first_field() {
        assert_eq!(field_of(parse_text(path(), "").unwrap_err()), "gravitational constant");
    }

    #[test]
    fn truncated_record_names_missing_field() {
        let err = parse_text(path(), "1.0 2 1\n1 0 0 0 0\n1 1 0 0").unwrap_err();
        assert_eq!(field_of(err), "body 2 vy");
    }

    #[test]
    fn huge_body_count_fails_on_first_missing_record() {
        let err = parse_text(path(), "1.0 100000000000000000 1\n1 0 0 0 0\n").unwrap_err();
        assert_eq!(field_of(err), "body 2 mass");
    }

    #[test]
    fn negative_body_count_is_a_config_error() {
        let err = parse_text(path(), "1.0 -2 1").unwrap_err();
        assert_eq!(field_of(err), "body count");
    }

    #[test]
    fn garbage_number_is_a_config_error() {
        let err = parse_text(path(), "1.0 1 1\n1 zero 0 0 0").unwrap_err();
        assert_eq!(field_of(err), "body 1 x");
        assert!(err_message_mentions_path(parse_text(path(), "x").unwrap_err()));
    }

    fn err_message_mentions_path(err: SimError) -> bool {
        err.to_string().contains("scenario.txt")
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let cfg = parse_text(path(), "1.0 1 3\n2 0 0 0 0\nleftover 7").unwrap();
        assert_eq!(cfg.bodies.len(), 1);
    }

    #[test]
    fn yaml_vectors_must_be_two_dimensional() {
        let cfg: ScenarioConfig = serde_yaml::from_str(
            "parameters: { G: 1.0, steps: 1 }\nbodies:\n  - { m: 1.0, x: [0.0, 0.0, 1.0], v: [0.0, 0.0] }\n",
        )
        .unwrap();
        assert_eq!(field_of(check_vectors(Path::new("s.yaml"), &cfg).unwrap_err()), "body 1 x");
    }

    #[test]
    fn yaml_optional_step_settings() {
        let cfg: ScenarioConfig = serde_yaml::from_str(
            "parameters:\n  G: 2.0\n  steps: 3\n  dt: 0.01\nbodies: []\n",
        )
        .unwrap();
        assert_eq!(cfg.parameters.dt, Some(0.01));
        assert_eq!(cfg.parameters.eps, None);
        assert!(cfg.bodies.is_empty());
    }
}
