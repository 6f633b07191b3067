use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

//value averaging parameters, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    //amount deployed in the first period
    pub initial_balance: f64,

    //growth applied to the target balance every period (0.01 = 1%)
    pub periodic_growth_rate: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig {
            initial_balance: 10000.0,
            periodic_growth_rate: 0.01,
        }
    }
}

//one instrument in a batch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub label: String,
    pub data_path: PathBuf,

    //overrides the shared benchmark for this instrument
    #[serde(default)]
    pub benchmark_path: Option<PathBuf>,
}

//complete batch configuration, loaded from json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfiguration {
    #[serde(default)]
    pub strategy: StrategyConfig,

    //benchmark used by every instrument without its own
    #[serde(default)]
    pub benchmark_path: Option<PathBuf>,

    //csv column holding the price (defaults to the second column)
    #[serde(default)]
    pub price_column: Option<String>,

    pub instruments: Vec<InstrumentConfig>,

    //directory for ledger csv and chart json outputs
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl Default for BatchConfiguration {
    fn default() -> Self {
        BatchConfiguration {
            strategy: StrategyConfig::default(),
            benchmark_path: None,
            price_column: Some("Open".to_string()),
            instruments: vec![
                InstrumentConfig {
                    label: "SPUU".to_string(),
                    data_path: PathBuf::from("data/SPUU.csv"),
                    benchmark_path: Some(PathBuf::from("data/IVVSPUU.csv")),
                },
                InstrumentConfig {
                    label: "SPXL".to_string(),
                    data_path: PathBuf::from("data/SPXL.csv"),
                    benchmark_path: Some(PathBuf::from("data/IVVSPXL.csv")),
                },
            ],
            output_dir: Some(PathBuf::from("output")),
        }
    }
}

impl BatchConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read configuration {:?}", path))?;
        let config: BatchConfiguration = serde_json::from_str(&contents)
            .context(format!("Failed to parse configuration {:?}", path))?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).context(format!("Failed to write configuration {:?}", path))?;
        Ok(())
    }

    //resolves the benchmark for an instrument, its own first, then the shared one
    pub fn benchmark_for<'a>(&'a self, instrument: &'a InstrumentConfig) -> anyhow::Result<&'a Path> {
        instrument
            .benchmark_path
            .as_deref()
            .or(self.benchmark_path.as_deref())
            .ok_or_else(|| anyhow!("No benchmark configured for instrument {}", instrument.label))
    }
}
