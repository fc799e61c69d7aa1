//! Persistence of the last-used simulator inputs.
//!
//! The calculators never touch storage. A caller that wants to remember form
//! values between sessions wraps any [`KeyValueStore`] in an [`InputStore`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::types::{ActiveTab, RefinanceInput, SimulatorInput};

pub const PREPAYMENT_INPUT_KEY: &str = "loan-simulator:prepayment-input";
pub const REFINANCE_INPUT_KEY: &str = "loan-simulator:refinance-input";
pub const ACTIVE_TAB_KEY: &str = "loan-simulator:active-tab";

/// failures of the storage backend or of encoding a record
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend error: {message}")]
    Backend { message: String },

    #[error("failed to encode record for {key}: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend { message: message.into() }
    }
}

/// string key/value storage, e.g. browser local storage or a file
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// in-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed access to the saved inputs.
///
/// Loading never fails on bad data: a missing or undecodable record yields the
/// default preset. Backend errors are still returned.
#[derive(Debug, Clone, Default)]
pub struct InputStore<S> {
    store: S,
}

impl<S: KeyValueStore> InputStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load_prepayment_input(&self) -> Result<SimulatorInput, StoreError> {
        self.load(PREPAYMENT_INPUT_KEY)
    }

    pub fn save_prepayment_input(&mut self, input: &SimulatorInput) -> Result<(), StoreError> {
        self.save(PREPAYMENT_INPUT_KEY, input)
    }

    pub fn load_refinance_input(&self) -> Result<RefinanceInput, StoreError> {
        self.load(REFINANCE_INPUT_KEY)
    }

    pub fn save_refinance_input(&mut self, input: &RefinanceInput) -> Result<(), StoreError> {
        self.save(REFINANCE_INPUT_KEY, input)
    }

    pub fn load_active_tab(&self) -> Result<ActiveTab, StoreError> {
        self.load(ACTIVE_TAB_KEY)
    }

    pub fn save_active_tab(&mut self, tab: ActiveTab) -> Result<(), StoreError> {
        self.save(ACTIVE_TAB_KEY, &tab)
    }

    /// forget every saved record
    pub fn clear(&mut self) -> Result<(), StoreError> {
        for key in [PREPAYMENT_INPUT_KEY, REFINANCE_INPUT_KEY, ACTIVE_TAB_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &'static str) -> Result<T, StoreError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(key, %error, "discarding unreadable saved input, using defaults");
                Ok(T::default())
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &'static str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
        self.store.set(key, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RepaymentMethod, TaxType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// backend that refuses every call
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::backend("quota exceeded"))
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(StoreError::backend("quota exceeded"))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::backend("quota exceeded"))
        }
    }

    #[test]
    fn test_missing_records_load_defaults() {
        let store = InputStore::new(MemoryStore::new());

        assert_eq!(store.load_prepayment_input().unwrap(), SimulatorInput::default());
        assert_eq!(store.load_refinance_input().unwrap(), RefinanceInput::default());
        assert_eq!(store.load_active_tab().unwrap(), ActiveTab::Prepayment);
    }

    #[test]
    fn test_saved_inputs_are_restored() {
        let mut store = InputStore::new(MemoryStore::new());

        let prepayment = SimulatorInput {
            loan_balance: Decimal::from(25_000_000),
            repayment_method: RepaymentMethod::EqualPrincipal,
            tax_type: TaxType::TaxReduced,
            ..SimulatorInput::default()
        };
        let refinance = RefinanceInput { new_rate: dec!(2.9), ..RefinanceInput::default() };

        store.save_prepayment_input(&prepayment).unwrap();
        store.save_refinance_input(&refinance).unwrap();
        store.save_active_tab(ActiveTab::Refinance).unwrap();

        assert_eq!(store.load_prepayment_input().unwrap(), prepayment);
        assert_eq!(store.load_refinance_input().unwrap(), refinance);
        assert_eq!(store.load_active_tab().unwrap(), ActiveTab::Refinance);
        assert_eq!(store.inner().len(), 3);
    }

    #[test]
    fn test_records_use_camel_case_json() {
        let mut store = InputStore::new(MemoryStore::new());
        store.save_prepayment_input(&SimulatorInput::default()).unwrap();

        let raw = store.inner().get(PREPAYMENT_INPUT_KEY).unwrap().unwrap();
        assert!(raw.contains("\"loanBalance\""));
        assert!(raw.contains("\"repaymentMethod\":\"equalPrincipalAndInterest\""));
    }

    #[test]
    fn test_reads_record_with_numbers_and_no_interest_type() {
        let mut backend = MemoryStore::new();
        backend
            .set(
                PREPAYMENT_INPUT_KEY,
                r#"{"loanBalance":30000000,"loanRate":5.1,"remainingMonths":60,
                    "repaymentMethod":"bulletRepayment","prepaymentFeeRate":1.2,
                    "extraFunds":5000000,"savingsRate":3.0,"taxType":"taxFree"}"#
                    .to_string(),
            )
            .unwrap();
        let store = InputStore::new(backend);

        let input = store.load_prepayment_input().unwrap();
        assert_eq!(input.loan_balance, Decimal::from(30_000_000));
        assert_eq!(input.loan_rate, dec!(5.1));
        assert_eq!(input.repayment_method, RepaymentMethod::BulletRepayment);
        assert_eq!(input.interest_type, crate::types::InterestType::MonthlyCompound);
    }

    #[test]
    fn test_corrupt_records_fall_back_to_defaults() {
        let mut backend = MemoryStore::new();
        backend.set(PREPAYMENT_INPUT_KEY, "{not json".to_string()).unwrap();
        backend.set(REFINANCE_INPUT_KEY, r#"{"currentBalance":"x"}"#.to_string()).unwrap();
        backend.set(ACTIVE_TAB_KEY, "\"settings\"".to_string()).unwrap();
        let store = InputStore::new(backend);

        assert_eq!(store.load_prepayment_input().unwrap(), SimulatorInput::default());
        assert_eq!(store.load_refinance_input().unwrap(), RefinanceInput::default());
        assert_eq!(store.load_active_tab().unwrap(), ActiveTab::Prepayment);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = InputStore::new(MemoryStore::new());
        store.save_active_tab(ActiveTab::Refinance).unwrap();
        store.save_refinance_input(&RefinanceInput::default()).unwrap();

        store.clear().unwrap();
        assert!(store.into_inner().is_empty());
    }

    #[test]
    fn test_backend_errors_propagate() {
        let mut store = InputStore::new(BrokenStore);

        assert!(matches!(store.load_active_tab(), Err(StoreError::Backend { .. })));
        let err = store.save_active_tab(ActiveTab::Refinance).unwrap_err();
        assert_eq!(err.to_string(), "storage backend error: quota exceeded");
    }
}
