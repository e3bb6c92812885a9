use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::engine::billing::Tariffs;
use crate::engine::date::parse_calendar_date;
use crate::engine::plan::RoomFilter;
use crate::engine::policy::EstimatorPolicy;
use crate::engine::window::{ShiftTable, ShiftWindowCalculator};
use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "TURNERO_HOME";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything a run needs besides its input rows.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub tariffs: Tariffs,
    pub room_filter: RoomFilter,
    pub estimator: EstimatorPolicy,
    pub calculator: ShiftWindowCalculator,
}

#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: EngineConfig,
    /// File the config was read from; `None` means built-in defaults.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn source_display(&self) -> Option<String> {
        self.source.as_ref().map(|path| path.display().to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tariffs: TariffsFile,
    rooms: RoomFilter,
    estimator: EstimatorPolicy,
    shifts: ShiftTable,
    holidays: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TariffsFile {
    hourly: Option<i64>,
    rx: Option<i64>,
    tac: Option<i64>,
    tac_double: Option<i64>,
    tac_triple: Option<i64>,
}

impl TariffsFile {
    fn resolve(&self) -> Tariffs {
        let defaults = Tariffs::default();
        let tac = self.tac.unwrap_or(defaults.tac);
        Tariffs {
            hourly: self.hourly.unwrap_or(defaults.hourly),
            rx: self.rx.unwrap_or(defaults.rx),
            tac,
            tac_double: self.tac_double.unwrap_or(tac * 2),
            tac_triple: self.tac_triple.unwrap_or(tac * 3),
        }
    }
}

/// Loads config from `explicit`, else from the resolved home directory.
///
/// A missing home config falls back to defaults; a missing explicit file is
/// an error.
pub fn load_config(
    explicit: Option<&Path>,
    home_override: Option<&Path>,
) -> ClientResult<LoadedConfig> {
    if let Some(path) = explicit {
        return read_config_file(path);
    }

    let Some(home) = resolve_config_home(home_override) else {
        debug!("no home directory resolved; using built-in config");
        return Ok(LoadedConfig::default());
    };
    let path = home.join(CONFIG_FILE_NAME);
    match read_config_file(&path) {
        Err(_) if !path.exists() => {
            debug!(path = %path.display(), "config file absent; using built-in config");
            Ok(LoadedConfig::default())
        }
        other => other,
    }
}

pub fn resolve_config_home(home_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = home_override {
        return Some(path.to_path_buf());
    }
    if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
        return Some(PathBuf::from(override_path));
    }
    home::home_dir().map(|home_path| home_path.join(".turnero"))
}

fn read_config_file(path: &Path) -> ClientResult<LoadedConfig> {
    let body = fs::read_to_string(path).map_err(|error| {
        let detail = if error.kind() == ErrorKind::NotFound {
            "file not found".to_string()
        } else {
            error.to_string()
        };
        ClientError::config_invalid(path, &detail)
    })?;
    let config =
        parse_config(&body).map_err(|detail| ClientError::config_invalid(path, &detail))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
    })
}

fn parse_config(body: &str) -> Result<EngineConfig, String> {
    let file = toml::from_str::<ConfigFile>(body).map_err(|error| error.message().to_string())?;

    let tariffs = file.tariffs.resolve();
    if [
        tariffs.hourly,
        tariffs.rx,
        tariffs.tac,
        tariffs.tac_double,
        tariffs.tac_triple,
    ]
    .iter()
    .any(|value| *value < 0)
    {
        return Err("tariffs must not be negative".to_string());
    }

    if let Some(profile) = file.shifts.first_invalid() {
        return Err(format!(
            "shift hours for `{}` must be between 0 and 23",
            profile.as_str()
        ));
    }

    let estimator = file.estimator;
    if estimator.threshold_ratio <= 0.0 || estimator.threshold_floor < 0.0 {
        return Err("estimator thresholds must be positive".to_string());
    }
    if estimator.min_candidates > estimator.max_candidates {
        return Err("estimator `min_candidates` exceeds `max_candidates`".to_string());
    }

    let mut holidays = BTreeSet::new();
    for raw in &file.holidays {
        let Some(date) = parse_calendar_date(raw) else {
            return Err(format!("holiday `{raw}` is not a calendar date"));
        };
        holidays.insert(date);
    }

    Ok(EngineConfig {
        tariffs,
        room_filter: file.rooms,
        estimator,
        calculator: ShiftWindowCalculator::new(file.shifts, holidays),
    })
}
