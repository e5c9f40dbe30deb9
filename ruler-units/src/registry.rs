//! Unit registry - scale factors relative to meters

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use ruler_core::Number;
use crate::{LengthUnit, UnitError};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// One row of the unit table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDef {
    pub unit: LengthUnit,
    pub label: &'static str,
    pub symbol: &'static str,
    /// Meters per one of this unit
    pub factor: Number,
}

/// Registry of the supported length units
pub struct UnitRegistry {
    defs: Vec<UnitDef>,
    aliases: HashMap<String, LengthUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::with_units(&LengthUnit::ALL)
    }

    /// Registry holding only `units`, in the given order
    pub fn with_units(units: &[LengthUnit]) -> Self {
        let mut registry = UnitRegistry {
            defs: Vec::with_capacity(units.len()),
            aliases: HashMap::new(),
        };
        for &unit in units {
            registry.register(unit);
        }
        registry
    }

    fn register(&mut self, unit: LengthUnit) {
        let (num, den) = unit.factor_ratio();
        self.defs.push(UnitDef {
            unit,
            label: unit.label(),
            symbol: unit.symbol(),
            factor: Number::from_ratio(num, den),
        });

        self.alias(unit.symbol(), unit);
        self.alias(unit.label(), unit);
        for alias in unit.aliases() {
            self.alias(alias, unit);
        }
    }

    fn alias(&mut self, alias: &str, unit: LengthUnit) {
        self.aliases.insert(alias.to_lowercase(), unit);
    }

    /// Resolve a symbol, label or alias (case-insensitive)
    pub fn get(&self, text: &str) -> Option<LengthUnit> {
        self.aliases.get(&text.trim().to_lowercase()).copied()
    }

    /// Table row for a unit
    pub fn def(&self, unit: LengthUnit) -> Result<&UnitDef, UnitError> {
        self.defs
            .iter()
            .find(|d| d.unit == unit)
            .ok_or(UnitError::Configuration { unit })
    }

    /// Meters per one `unit`
    pub fn factor_of(&self, unit: LengthUnit) -> Result<&Number, UnitError> {
        self.def(unit).map(|d| &d.factor)
    }

    pub fn label_of(&self, unit: LengthUnit) -> &'static str {
        unit.label()
    }

    pub fn symbol_of(&self, unit: LengthUnit) -> &'static str {
        unit.symbol()
    }

    /// Registered units in table order
    pub fn units(&self) -> impl Iterator<Item = LengthUnit> + '_ {
        self.defs.iter().map(|d| d.unit)
    }

    pub fn defs(&self) -> &[UnitDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(unit: LengthUnit) -> Number {
        UNITS.factor_of(unit).unwrap().clone()
    }

    #[test]
    fn test_factor_table() {
        assert_eq!(factor(LengthUnit::Centimeters), Number::from_str("0.01").unwrap());
        assert_eq!(factor(LengthUnit::Meters), Number::from_i64(1));
        assert_eq!(factor(LengthUnit::Millimeters), Number::from_str("0.001").unwrap());
        assert_eq!(factor(LengthUnit::Feet), Number::from_str("0.3048").unwrap());
    }

    #[test]
    fn test_units_in_table_order() {
        let units: Vec<LengthUnit> = UNITS.units().collect();
        assert_eq!(units, LengthUnit::ALL);
        assert_eq!(UNITS.len(), 4);
    }

    #[test]
    fn test_labels() {
        assert_eq!(UNITS.label_of(LengthUnit::Centimeters), "Centimeters");
        assert_eq!(UNITS.label_of(LengthUnit::Feet), "Feet");
        assert_eq!(UNITS.symbol_of(LengthUnit::Millimeters), "mm");
    }

    #[test]
    fn test_alias_lookup() {
        assert_eq!(UNITS.get("ft"), Some(LengthUnit::Feet));
        assert_eq!(UNITS.get("feet"), Some(LengthUnit::Feet));
        assert_eq!(UNITS.get("Foot"), Some(LengthUnit::Feet));
        assert_eq!(UNITS.get(" CM "), Some(LengthUnit::Centimeters));
        assert_eq!(UNITS.get("metre"), Some(LengthUnit::Meters));
        assert_eq!(UNITS.get("Millimeters"), Some(LengthUnit::Millimeters));
    }

    #[test]
    fn test_unknown_alias() {
        assert_eq!(UNITS.get("yard"), None);
        assert_eq!(UNITS.get(""), None);
    }

    #[test]
    fn test_missing_unit_is_configuration_error() {
        let registry = UnitRegistry::with_units(&[LengthUnit::Meters]);
        assert_eq!(
            registry.factor_of(LengthUnit::Feet),
            Err(UnitError::Configuration { unit: LengthUnit::Feet })
        );
        assert_eq!(registry.get("ft"), None);
    }
}
