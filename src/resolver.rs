//! Identifier resolution module for pidbm
//!
//! Every user-supplied token that designates a row goes through this
//! module exactly once. A token is either a numeric identifier (the whole
//! token parses as an integer, C-style base prefixes accepted) or a name
//! fragment (matched case-insensitively as a substring). Numeric-parse
//! success always takes precedence, and the classification never changes
//! once made.
//!
//! On top of classification this module resolves foreign-key references:
//! given a token and a target view it produces the row id, or `None` when
//! nothing matches. Absence is not an error here; callers decide whether
//! to fail, skip or re-prompt.

use crate::db::Database;
use crate::error::PidbmResult;
use crate::query::{CompareOp, Predicate, Statement};

/// Classification outcome for one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The whole token parsed as an integer, match on the id column
    Id(i64),
    /// Free text, match on the name column
    Name(String),
}

/// Classify a token as an id or a name pattern
pub fn classify(token: &str) -> Token {
    match parse_integer(token) {
        Some(id) => Token::Id(id),
        None => Token::Name(token.to_string()),
    }
}

/// Parse an entire token as an integer
///
/// Accepts decimal, `0x`/`0X` hexadecimal and leading-zero octal, with an
/// optional sign. Any leftover character makes the parse fail, which in
/// turn forces name classification.
pub fn parse_integer(token: &str) -> Option<i64> {
    let (negative, rest) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    if rest.is_empty() {
        return None;
    }

    let value = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if rest.len() > 1 && rest.starts_with('0') {
        i64::from_str_radix(&rest[1..], 8).ok()?
    } else {
        rest.parse::<i64>().ok()?
    };

    Some(if negative { -value } else { value })
}

/// One match condition derived from a token
///
/// `column` is `id` or `name`, possibly carrying a qualifier seeded by the
/// caller; `like` selects substring matching for name fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereCondition {
    pub column: String,
    pub value: String,
    pub like: bool,
}

impl WhereCondition {
    /// Append this condition to a predicate
    ///
    /// Name fragments become `%token%` substring patterns; SQLite's LIKE
    /// is case-insensitive, which gives the required case folding.
    pub fn apply_to(&self, predicate: &mut Predicate) {
        if self.like {
            predicate.push(
                self.column.clone(),
                CompareOp::Like,
                format!("%{}%", self.value),
            );
        } else {
            predicate.push(self.column.clone(), CompareOp::Eq, self.value.clone());
        }
    }

    /// Rewrite the match column, keeping operator and value
    ///
    /// Composite views substitute the bare `id`/`name` column with the
    /// qualified one that survives the join (`pin.id`, `pin_name.name`).
    pub fn map_column(mut self, f: impl FnOnce(&str) -> String) -> Self {
        self.column = f(&self.column);
        self
    }
}

/// Derive the match condition for a token
///
/// `preset` seeds the column: `None` leaves the classified `id`/`name`
/// choice as is, a trailing-dot qualifier (`"soc."`) prefixes it, and any
/// other value pins the column outright (the `revision`/`tag` listings
/// match a fixed column whatever the token looks like). Ids are
/// canonicalized to decimal so `0xa03111` compares equal to the stored
/// value.
pub fn where_condition(token: &str, preset: Option<&str>) -> WhereCondition {
    let (column, value, like) = match classify(token) {
        Token::Id(id) => ("id", id.to_string(), false),
        Token::Name(name) => ("name", name, true),
    };

    let column = match preset {
        None => column.to_string(),
        Some(prefix) if prefix.ends_with('.') => format!("{prefix}{column}"),
        Some(fixed) => fixed.to_string(),
    };

    WhereCondition { column, value, like }
}

/// Resolve a foreign-key reference to a row id
///
/// Classifies the token, then looks the id up in the target view. Name
/// tokens are matched exactly, lower-cased on both sides when
/// `case_insensitive` is set, so a reference like `soc h3` cannot latch
/// onto the wrong row by substring. Returns `None` when nothing matches.
pub fn resolve(
    db: &Database,
    view: &str,
    token: &str,
    case_insensitive: bool,
) -> PidbmResult<Option<i64>> {
    let mut predicate = Predicate::new();

    match classify(token) {
        Token::Id(id) => predicate.push("id", CompareOp::Eq, id.to_string()),
        Token::Name(name) => {
            if case_insensitive {
                predicate.push("lower(name)", CompareOp::Eq, name.to_lowercase());
            } else {
                predicate.push("name", CompareOp::Eq, name);
            }
        }
    }

    let stmt = Statement::Select {
        what: vec!["id".to_string()],
        from: view.to_string(),
        predicate,
        order_by: None,
        group_by: None,
    };
    db.query_first_id(&stmt.sql(), &stmt.params())
}

/// Look a name up in a single table, exact match
pub fn name_exists(
    db: &Database,
    table: &str,
    name: &str,
    case_insensitive: bool,
) -> PidbmResult<Option<i64>> {
    let mut predicate = Predicate::new();
    if case_insensitive {
        predicate.push("lower(name)", CompareOp::Eq, name.to_lowercase());
    } else {
        predicate.push("name", CompareOp::Eq, name.to_string());
    }

    let stmt = Statement::Select {
        what: vec!["id".to_string()],
        from: table.to_string(),
        predicate,
        order_by: None,
        group_by: None,
    };
    db.query_first_id(&stmt.sql(), &stmt.params())
}

/// Whether a row with this id exists in a table
pub fn id_exists(db: &Database, table: &str, id: i64) -> PidbmResult<bool> {
    let mut predicate = Predicate::new();
    predicate.push("id", CompareOp::Eq, id.to_string());

    let stmt = Statement::Select {
        what: vec!["id".to_string()],
        from: table.to_string(),
        predicate,
        order_by: None,
        group_by: None,
    };
    Ok(db.query_first_id(&stmt.sql(), &stmt.params())?.is_some())
}

/// Resolve a pin by id or by its input-mode name
///
/// Pin names are only unique per mode; a bare name refers to the `input`
/// mode entry, which every pin map command uses as the lookup key.
pub fn find_pin(db: &Database, token: &str) -> PidbmResult<Option<i64>> {
    match classify(token) {
        Token::Id(id) => Ok(if id_exists(db, "pin", id)? { Some(id) } else { None }),
        Token::Name(name) => {
            let mut predicate = Predicate::new();
            predicate.push("lower(pin_name.name)", CompareOp::Eq, name.to_lowercase());
            predicate.push("pin_has_name.pin_mode_id", CompareOp::Eq, "0");

            let stmt = Statement::Select {
                what: vec!["pin.id".to_string()],
                from: "pin \
                       INNER JOIN pin_has_name ON pin.id=pin_has_name.pin_id \
                       INNER JOIN pin_name ON pin_name.id=pin_has_name.pin_name_id"
                    .to_string(),
                predicate,
                order_by: None,
                group_by: None,
            };
            db.query_first_id(&stmt.sql(), &stmt.params())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_integers_classify_as_ids() {
        assert_eq!(classify("42"), Token::Id(42));
        assert_eq!(classify("0xa03111"), Token::Id(0xa03111));
        assert_eq!(classify("0X1F"), Token::Id(31));
        assert_eq!(classify("017"), Token::Id(15));
        assert_eq!(classify("-3"), Token::Id(-3));
        assert_eq!(classify("0"), Token::Id(0));
    }

    #[test]
    fn leftover_characters_force_name_classification() {
        assert_eq!(classify("42x"), Token::Name("42x".to_string()));
        assert_eq!(classify("h3"), Token::Name("h3".to_string()));
        assert_eq!(classify("3.3v"), Token::Name("3.3v".to_string()));
        assert_eq!(classify(""), Token::Name(String::new()));
        assert_eq!(classify("0x"), Token::Name("0x".to_string()));
    }

    #[test]
    fn id_condition_matches_id_column_exactly() {
        let cond = where_condition("0x10", None);
        assert_eq!(cond.column, "id");
        assert_eq!(cond.value, "16");
        assert!(!cond.like);
    }

    #[test]
    fn name_condition_matches_name_column_with_like() {
        let cond = where_condition("orange", None);
        assert_eq!(cond.column, "name");
        assert_eq!(cond.value, "orange");
        assert!(cond.like);

        let mut predicate = Predicate::new();
        cond.apply_to(&mut predicate);
        assert_eq!(predicate.render(), "name LIKE ?");
        assert_eq!(predicate.values(), ["%orange%"]);
    }

    #[test]
    fn qualifier_preset_prefixes_the_classified_column() {
        let cond = where_condition("h5", Some("soc."));
        assert_eq!(cond.column, "soc.name");

        let cond = where_condition("3", Some("soc."));
        assert_eq!(cond.column, "soc.id");
    }

    #[test]
    fn fixed_preset_pins_the_column() {
        let cond = where_condition("0xa03111", Some("revision"));
        assert_eq!(cond.column, "revision");
        assert_eq!(cond.value, "10498321");
        assert!(!cond.like);

        let cond = where_condition("rev1", Some("tag"));
        assert_eq!(cond.column, "tag");
        assert!(cond.like);
    }
}
