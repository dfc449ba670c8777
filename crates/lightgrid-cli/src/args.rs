use lightgrid_engine::MatchConfig;

/// Command-line flags, all in `--key=value` form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<String>,
    pub rounds: Option<u32>,
    pub seed: Option<u64>,
    pub tick_rate: Option<f32>,
    pub json: bool,
    pub live: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    Unknown(String),
    InvalidValue { flag: &'static str, value: String },
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(arg) => write!(f, "unknown argument {arg:?}"),
            Self::InvalidValue { flag, value } => {
                write!(f, "invalid value {value:?} for --{flag}")
            },
        }
    }
}

impl std::error::Error for ArgError {}

fn parse_value<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, ArgError> {
    value.parse().map_err(|_| ArgError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

impl CliArgs {
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgError> {
        let mut parsed = Self::default();
        for arg in args {
            if let Some(v) = arg.strip_prefix("--config=") {
                parsed.config_path = Some(v.to_string());
            } else if let Some(v) = arg.strip_prefix("--rounds=") {
                parsed.rounds = Some(parse_value("rounds", v)?);
            } else if let Some(v) = arg.strip_prefix("--seed=") {
                parsed.seed = Some(parse_value("seed", v)?);
            } else if let Some(v) = arg.strip_prefix("--tick-rate=") {
                parsed.tick_rate = Some(parse_value("tick-rate", v)?);
            } else if arg == "--json" {
                parsed.json = true;
            } else if arg == "--live" {
                parsed.live = true;
            } else {
                return Err(ArgError::Unknown(arg));
            }
        }
        Ok(parsed)
    }

    /// Load the config file named by `--config`, or the default lookup chain.
    pub fn load_config(&self) -> MatchConfig {
        let mut config = match &self.config_path {
            Some(path) => MatchConfig::from_file(path).unwrap_or_else(|| {
                tracing::warn!(path = %path, "Config file unusable, using defaults");
                MatchConfig::default()
            }),
            None => MatchConfig::load(),
        };
        self.apply(&mut config);
        config
    }

    /// Flags override whatever the config file said.
    pub fn apply(&self, config: &mut MatchConfig) {
        if let Some(rounds) = self.rounds {
            config.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate = rate;
        }
    }
}
