use std::fmt;
use std::str::FromStr;

/// A named check applied to the textual value of a form field.
///
/// Rules other than [`Rule::Required`] are skipped when the field is empty, so an
/// optional field only has to be well formed once filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinChars(usize),
    MaxChars(usize),
    Integer { min: i64, max: i64 },
    /// 8 to 15 digits, spaces allowed, optional leading `+`.
    Phone,
    /// ISO 8601 calendar date, `YYYY-MM-DD`.
    Date,
    Email,
}

impl Rule {
    pub fn check(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Self::Required => !value.is_empty(),
            Self::MinChars(n) => value.chars().count() >= *n,
            Self::MaxChars(n) => value.chars().count() <= *n,
            Self::Integer { min, max } => value
                .parse::<i64>()
                .map(|v| (*min..=*max).contains(&v))
                .unwrap_or(false),
            Self::Phone => is_phone_number(value),
            Self::Date => chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            Self::Email => email_address::EmailAddress::from_str(value).is_ok(),
        }
    }
}

fn is_phone_number(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value).replace(' ', "");
    (8..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// Read access to the fields of a form by name.
pub trait Values {
    /// `None` stands for an unset selection or a missing attachment.
    fn value(&self, field: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub rules: &'static [Rule],
    /// Format advice shown to the user, never blocking.
    pub hints: &'static [Rule],
}

impl Field {
    pub const fn new(name: &'static str, label: &'static str, rules: &'static [Rule]) -> Self {
        Self {
            name,
            label,
            rules,
            hints: &[],
        }
    }

    pub const fn required(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, &[Rule::Required])
    }

    /// Required field whose format is only advised through [`Field::advise`].
    pub const fn hinted(
        name: &'static str,
        label: &'static str,
        hints: &'static [Rule],
    ) -> Self {
        Self {
            name,
            label,
            rules: &[Rule::Required],
            hints,
        }
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    pub fn check<V: Values + ?Sized>(&self, values: &V) -> Option<Violation> {
        let value = values.value(self.name).unwrap_or_default();
        if value.trim().is_empty() && !self.is_required() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(|rule| Violation {
                field: self.name,
                label: self.label,
                rule: *rule,
            })
    }

    /// First hint a filled value does not follow.
    pub fn advise<V: Values + ?Sized>(&self, values: &V) -> Option<Violation> {
        let value = values.value(self.name).unwrap_or_default();
        if value.trim().is_empty() {
            return None;
        }
        self.hints
            .iter()
            .find(|rule| !rule.check(value))
            .map(|rule| Violation {
                field: self.name,
                label: self.label,
                rule: *rule,
            })
    }
}

/// Returns the first failed rule of every field, in field order.
pub fn check_all<V: Values + ?Sized>(fields: &[Field], values: &V) -> Vec<Violation> {
    fields.iter().filter_map(|f| f.check(values)).collect()
}

pub fn advise_all<V: Values + ?Sized>(fields: &[Field], values: &V) -> Vec<Violation> {
    fields.iter().filter_map(|f| f.advise(values)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub label: &'static str,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Rule::Required => write!(f, "{} est requis", self.label),
            Rule::MinChars(n) => {
                write!(f, "{} doit contenir au moins {} caractères", self.label, n)
            }
            Rule::MaxChars(n) => {
                write!(f, "{} doit contenir au plus {} caractères", self.label, n)
            }
            Rule::Integer { min, max } => {
                write!(f, "{} doit être un nombre entre {} et {}", self.label, min, max)
            }
            Rule::Phone => write!(f, "{} n'est pas un numéro de téléphone valide", self.label),
            Rule::Date => write!(f, "{} doit être une date au format AAAA-MM-JJ", self.label),
            Rule::Email => write!(f, "{} n'est pas une adresse e-mail valide", self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    impl Values for HashMap<&'static str, &'static str> {
        fn value(&self, field: &str) -> Option<&str> {
            self.get(field).copied()
        }
    }

    #[test]
    fn rules() {
        assert!(!Rule::Required.check("  "));
        assert!(Rule::Required.check("a"));
        assert!(Rule::MinChars(20).check(&"é".repeat(20)));
        assert!(!Rule::MinChars(20).check(&"a".repeat(19)));
        assert!(Rule::MaxChars(3).check("abc"));
        assert!(!Rule::MaxChars(3).check("abcd"));
        assert!(Rule::Integer { min: 1, max: 60 }.check("5"));
        assert!(!Rule::Integer { min: 1, max: 60 }.check("61"));
        assert!(!Rule::Integer { min: 1, max: 60 }.check("five"));
        assert!(Rule::Phone.check("+225 07 00 00 00 00"));
        assert!(Rule::Phone.check("0700000000"));
        assert!(!Rule::Phone.check("07-00"));
        assert!(!Rule::Phone.check("+225 XX XX"));
        assert!(Rule::Date.check("2025-03-01"));
        assert!(!Rule::Date.check("2025-02-30"));
        assert!(!Rule::Date.check("01/03/2025"));
        assert!(Rule::Email.check("jean@fractalis.ci"));
        assert!(!Rule::Email.check("jean"));
    }

    #[test]
    fn optional_fields_skip_rules_when_empty() {
        const FIELDS: &[Field] = &[
            Field::required("nom", "Nom"),
            Field::new("email", "Email", &[Rule::Email]),
            Field::new("telephone", "Téléphone", &[Rule::Required, Rule::Phone]),
        ];
        let mut values = HashMap::new();
        let violations = check_all(FIELDS, &values);
        assert_eq!(
            violations.iter().map(|v| v.field).collect::<Vec<_>>(),
            vec!["nom", "telephone"]
        );
        assert_eq!(violations[0].to_string(), "Nom est requis");

        values.insert("nom", "KOUADIO");
        values.insert("telephone", "12");
        values.insert("email", "bad");
        let violations = check_all(FIELDS, &values);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule, Rule::Email);
        assert_eq!(violations[1].rule, Rule::Phone);

        values.insert("telephone", "0700000000");
        values.insert("email", "");
        assert!(check_all(FIELDS, &values).is_empty());
    }

    #[test]
    fn hints_never_block() {
        const FIELDS: &[Field] = &[Field::hinted(
            "puissance",
            "Puissance",
            &[Rule::Integer { min: 1, max: 100 }],
        )];
        let mut values = HashMap::new();
        assert_eq!(check_all(FIELDS, &values)[0].rule, Rule::Required);
        assert!(advise_all(FIELDS, &values).is_empty());

        values.insert("puissance", "1.6L");
        assert!(check_all(FIELDS, &values).is_empty());
        assert_eq!(
            advise_all(FIELDS, &values)[0].rule,
            Rule::Integer { min: 1, max: 100 }
        );

        values.insert("puissance", "9");
        assert!(advise_all(FIELDS, &values).is_empty());
    }
}
