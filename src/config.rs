// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::KvStore;

pub const SETTINGS_KEY: &str = "settings";
pub const DEFAULT_WORKING_DAYS_IN_MONTH: u32 = 25;
pub const DEFAULT_PERIOD_INCOME_TARGET: i64 = 5000;
pub const DEFAULT_CURRENCY: &str = "RUB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Fixed divisor for spreading monthly payments over days; not calendar-derived.
    pub working_days_in_month: u32,
    /// Average daily income that counts as 100% progress in period reports.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub period_income_target: Decimal,
    /// Display label only.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            working_days_in_month: DEFAULT_WORKING_DAYS_IN_MONTH,
            period_income_target: Decimal::from(DEFAULT_PERIOD_INCOME_TARGET),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.working_days_in_month == 0 {
            return Err(Error::InvalidSetting(
                "working days in month must be at least 1".into(),
            ));
        }
        if self.period_income_target <= Decimal::ZERO {
            return Err(Error::InvalidSetting(
                "period income target must be positive".into(),
            ));
        }
        if self.currency.trim().is_empty() {
            return Err(Error::InvalidSetting("currency label must not be empty".into()));
        }
        Ok(())
    }

    /// Reads settings, falling back to defaults when absent, unreadable or out of range.
    pub fn load(store: &dyn KvStore) -> Result<Self> {
        let Some(raw) = store.get(SETTINGS_KEY)? else {
            return Ok(Settings::default());
        };
        match serde_json::from_str::<Settings>(&raw) {
            Ok(s) if s.validate().is_ok() => Ok(s),
            Ok(_) => {
                tracing::warn!("stored settings out of range, using defaults");
                Ok(Settings::default())
            }
            Err(e) => {
                tracing::warn!(error = %e, "malformed settings, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, store: &mut dyn KvStore) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string(self)?;
        if store.get(SETTINGS_KEY)?.as_deref() != Some(json.as_str()) {
            store.set(SETTINGS_KEY, &json)?;
            tracing::info!("settings saved");
        }
        Ok(())
    }
}
