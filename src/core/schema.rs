use crate::core::validate::{self, Validator};
use crate::errors::{AppError, AppResult};
use std::collections::{BTreeMap, HashSet};

/// One editable attribute: wire key plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    pub label: String,
}

impl FieldDescriptor {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}

/// Ordered field list plus the validator map that goes with it.
#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
    validators: BTreeMap<String, Vec<Validator>>,
}

impl FormSchema {
    /// Every field is required. A field keyed `email` must look like an
    /// address and a field keyed `number` must be a 6-15 char plate.
    pub fn new(fields: Vec<FieldDescriptor>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        let mut validators = BTreeMap::new();

        for f in &fields {
            if !seen.insert(f.key.as_str()) {
                return Err(AppError::DuplicateField(f.key.clone()));
            }
            let mut list = vec![Validator::Required];
            match f.key.as_str() {
                "email" => list.push(Validator::Email),
                "number" => list.push(Validator::truck_number()),
                _ => {}
            }
            validators.insert(f.key.clone(), list);
        }

        Ok(Self { fields, validators })
    }

    /// Shorthand for `(key, label)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> AppResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|(k, l)| FieldDescriptor::new(k, l))
                .collect(),
        )
    }

    /// Adds a validator to an existing field.
    pub fn with_validator(mut self, key: &str, validator: Validator) -> AppResult<Self> {
        let list = self
            .validators
            .get_mut(key)
            .ok_or_else(|| AppError::UnknownField(key.to_string()))?;
        list.push(validator);
        Ok(self)
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Error message for a single field, `None` when valid.
    pub fn validate_field(&self, key: &str, value: &str) -> Option<String> {
        let label = self.field(key).map_or(key, |f| f.label.as_str());
        let validators = self.validators.get(key).map_or(&[][..], Vec::as_slice);
        validate::run(validators, label, value)
    }

    /// Errors for every failing field, keyed by field key.
    pub fn validate_all<'a, F>(&self, value_of: F) -> BTreeMap<String, String>
    where
        F: Fn(&str) -> &'a str,
    {
        self.fields
            .iter()
            .filter_map(|f| {
                self.validate_field(&f.key, value_of(&f.key))
                    .map(|msg| (f.key.clone(), msg))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = FormSchema::from_pairs(&[("name", "Name"), ("name", "Other")]).unwrap_err();
        assert!(matches!(err, AppError::DuplicateField(k) if k == "name"));
    }

    #[test]
    fn keys_keep_declaration_order() {
        let s = FormSchema::from_pairs(&[("b", "B"), ("a", "A"), ("c", "C")]).unwrap();
        assert_eq!(s.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn email_and_number_keys_get_their_validators() {
        let s = FormSchema::from_pairs(&[("email", "Email"), ("number", "Truck Number")]).unwrap();
        assert!(s.validate_field("email", "a@b").is_some());
        assert!(s.validate_field("email", "a@b.co").is_none());
        assert!(s.validate_field("number", "X").is_some());
    }

    #[test]
    fn required_message_uses_label() {
        let s = FormSchema::from_pairs(&[("loadType", "Load Type")]).unwrap();
        assert_eq!(
            s.validate_field("loadType", " ").as_deref(),
            Some("Load Type is required")
        );
    }

    #[test]
    fn validate_all_reports_each_failing_field() {
        let s = FormSchema::from_pairs(&[("name", "Name"), ("state", "State")]).unwrap();
        let errors = s.validate_all(|k| if k == "name" { "Pune" } else { "" });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["state"], "State is required");
    }

    #[test]
    fn extra_validator_on_unknown_field_fails() {
        let s = FormSchema::from_pairs(&[("name", "Name")]).unwrap();
        assert!(s.with_validator("mobile", Validator::mobile()).is_err());
    }
}
