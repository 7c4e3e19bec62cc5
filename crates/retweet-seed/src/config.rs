//! Seed SQL settings loaded via OrthoConfig.
//!
//! Settings come from `RETWEET_SEED_*` environment variables or a config
//! file. Command-line flags in [`crate::seed_sql_cli`] take precedence over
//! anything set here.

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::error::GenerationError;
use crate::generator::GeneratorOptions;
use crate::gift_codes::{DEFAULT_GIFT_CODE_AMOUNT, DEFAULT_GIFT_CODE_COUNT, GiftCodeCount};

const DEFAULT_INPUT_PATH: &str = ".csv/goroman_retweet_users.csv";
const DEFAULT_OUTPUT_PATH: &str = "prisma/seed.sql";

/// Configuration values for a generation run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RETWEET_SEED")]
pub struct SeedSqlSettings {
    /// Path of the retweet CSV to read.
    pub input_path: Option<Utf8PathBuf>,
    /// Path of the SQL file to write.
    pub output_path: Option<Utf8PathBuf>,
    /// Number of gift codes to generate.
    #[ortho_config(default = 100)]
    pub gift_code_count: u32,
    /// Amount carried by each gift code.
    #[ortho_config(default = 1000)]
    pub gift_code_amount: u32,
}

impl Default for SeedSqlSettings {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            gift_code_count: u32::from(DEFAULT_GIFT_CODE_COUNT),
            gift_code_amount: DEFAULT_GIFT_CODE_AMOUNT,
        }
    }
}

impl SeedSqlSettings {
    /// Return the configured input path, falling back to the default.
    #[must_use]
    pub fn input_path(&self) -> &Utf8Path {
        self.input_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_INPUT_PATH))
    }

    /// Return the configured output path, falling back to the default.
    #[must_use]
    pub fn output_path(&self) -> &Utf8Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Utf8Path::new(DEFAULT_OUTPUT_PATH))
    }

    /// Build generator options, validating the gift-code count.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::GiftCodeCountOutOfRange`] when the
    /// configured count is outside `1..=999`.
    pub fn generator_options(&self) -> Result<GeneratorOptions, GenerationError> {
        Ok(GeneratorOptions {
            gift_code_count: GiftCodeCount::new(self.gift_code_count)?,
            gift_code_amount: self.gift_code_amount,
        })
    }
}
