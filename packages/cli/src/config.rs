use bonus_algo::CalculationParams;

#[derive(Debug, Clone)]
pub struct Config {
    pub upside_exponent: f64,
    pub downside_exponent: f64,
    pub budget_override: f64,
    pub log_level: String,
    /// Directory for rolling log files; `None` keeps logging on stderr only
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let params = CalculationParams::default();
        Self {
            upside_exponent: params.upside_exponent,
            downside_exponent: params.downside_exponent,
            budget_override: params.budget_override,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, fallback: f64| {
            lookup(key)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };

        let file_logs_enabled = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            upside_exponent: number("BONUS_UPSIDE_EXPONENT", defaults.upside_exponent),
            downside_exponent: number("BONUS_DOWNSIDE_EXPONENT", defaults.downside_exponent),
            budget_override: number("BONUS_BUDGET_OVERRIDE", defaults.budget_override),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: file_logs_enabled
                .then(|| lookup("LOG_DIR").unwrap_or_else(|| "./logs".to_string())),
        }
    }

    /// Command-line values win over the environment.
    pub fn with_overrides(
        mut self,
        upside_exponent: Option<f64>,
        downside_exponent: Option<f64>,
        budget_override: Option<f64>,
    ) -> Self {
        if let Some(value) = upside_exponent {
            self.upside_exponent = value;
        }
        if let Some(value) = downside_exponent {
            self.downside_exponent = value;
        }
        if let Some(value) = budget_override {
            self.budget_override = value;
        }
        self
    }

    pub fn params(&self) -> CalculationParams {
        CalculationParams::new(self.upside_exponent, self.downside_exponent)
            .with_budget_override(self.budget_override)
    }
}
