//! Field normalizer: one raw tabular row in, one canonical [`Employee`] out.
//!
//! Normalization never fails. Headers that do not resolve are ignored, cells
//! that cannot be coerced leave their field unset, and the required fields
//! are filled with defaults afterwards.

use std::str::FromStr;

use rand::{Rng, distributions::Alphanumeric, thread_rng};
use tracing::trace;
use uuid::Uuid;

use crate::aliases::{Field, resolve_header};
use crate::cell::{CellValue, RawRow};
use crate::dates::coerce_date;
use crate::employee::{ChildOrientation, Employee, Shift, VacationDays};

const SHORT_ID_LEN: usize = 9;

/// Strategy for ids synthesized when a row has none.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum IdGenerator {
    /// Nine lowercase alphanumerics. Collisions are possible but unlikely.
    #[default]
    Short,
    Uuid,
}

impl IdGenerator {
    pub fn generate(self) -> String {
        match self {
            IdGenerator::Short => thread_rng()
                .sample_iter(&Alphanumeric)
                .take(SHORT_ID_LEN)
                .map(|b| char::from(b).to_ascii_lowercase())
                .collect(),
            IdGenerator::Uuid => Uuid::new_v4().simple().to_string(),
        }
    }
}

impl FromStr for IdGenerator {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(IdGenerator::Short),
            "uuid" => Ok(IdGenerator::Uuid),
            other => Err(format!("unknown id strategy `{other}`")),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Normalizer {
    ids: IdGenerator,
}

impl Normalizer {
    pub fn new(ids: IdGenerator) -> Self {
        Self { ids }
    }

    pub fn normalize_rows<'a, I>(&self, rows: I) -> Vec<Employee>
    where
        I: IntoIterator<Item = &'a RawRow>,
    {
        rows.into_iter().map(|row| self.normalize_row(row)).collect()
    }

    pub fn normalize_row(&self, row: &RawRow) -> Employee {
        let mut draft = Draft::default();
        for (header, value) in row.iter() {
            let Some(field) = resolve_header(header) else {
                trace!(header, "ignoring unrecognized column");
                continue;
            };
            if value.is_blank() {
                continue;
            }
            draft.apply(field, value);
        }
        draft.finish(self.ids)
    }
}

/// Normalize one row with the default id strategy.
pub fn normalize_row(row: &RawRow) -> Employee {
    Normalizer::default().normalize_row(row)
}

#[derive(Default)]
struct Draft {
    id: Option<String>,
    name: Option<String>,
    role: Option<String>,
    parent_id: Option<String>,
    department: Option<String>,
    shift: Option<Shift>,
    is_active: Option<bool>,
    birth_date: Option<chrono::NaiveDate>,
    vacation_start: Option<chrono::NaiveDate>,
    vacation_days: Option<VacationDays>,
    child_orientation: Option<ChildOrientation>,
    photo_url: Option<String>,
    description: Option<String>,
}

impl Draft {
    /// Later columns overwrite earlier ones only when they coerce successfully.
    fn apply(&mut self, field: Field, value: &CellValue) {
        fn set<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        match field {
            Field::Id => set(&mut self.id, Some(value.as_text())),
            Field::Name => set(&mut self.name, Some(value.as_text())),
            Field::Role => set(&mut self.role, Some(value.as_text())),
            Field::ParentId => set(&mut self.parent_id, Some(value.as_text())),
            Field::PhotoUrl => set(&mut self.photo_url, Some(value.as_text())),
            Field::Description => set(&mut self.description, Some(value.as_text())),
            Field::Department => set(&mut self.department, coerce_department(value)),
            Field::Shift => set(&mut self.shift, Shift::from_token(&value.as_text())),
            Field::IsActive => set(&mut self.is_active, Some(coerce_active(value))),
            Field::BirthDate => set(&mut self.birth_date, coerce_date(value)),
            Field::VacationStart => set(&mut self.vacation_start, coerce_date(value)),
            Field::VacationDays => set(&mut self.vacation_days, coerce_vacation_days(value)),
            Field::ChildOrientation => set(
                &mut self.child_orientation,
                ChildOrientation::from_token(&value.as_text()),
            ),
        }
    }

    fn finish(self, ids: IdGenerator) -> Employee {
        Employee {
            id: self.id.unwrap_or_else(|| ids.generate()),
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            parent_id: self.parent_id,
            department: self.department,
            shift: self.shift,
            is_active: self.is_active.unwrap_or(true),
            birth_date: self.birth_date,
            vacation_start: self.vacation_start,
            vacation_days: self.vacation_days,
            child_orientation: self.child_orientation,
            photo_url: self.photo_url,
            description: self.description,
        }
    }
}

fn coerce_active(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(b) => *b,
        other => matches!(
            other.as_text().trim().to_lowercase().as_str(),
            "sim" | "true" | "1"
        ),
    }
}

fn coerce_department(value: &CellValue) -> Option<String> {
    let text = value.as_text();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Leading integer of the cell, accepted only when it is an allowed allowance.
fn coerce_vacation_days(value: &CellValue) -> Option<VacationDays> {
    let days = match value {
        CellValue::Number(n) if n.is_finite() => n.trunc() as i64,
        CellValue::Text(text) => leading_integer(text)?,
        _ => return None,
    };
    u32::try_from(days).ok().and_then(VacationDays::from_days)
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.strip_prefix(['-', '+']) {
        Some(rest) => (if trimmed.starts_with('-') { -1 } else { 1 }, rest),
        None => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(cells: Vec<(&str, CellValue)>) -> RawRow {
        RawRow::from(cells)
    }

    #[test]
    fn superior_header_does_not_overwrite_id() {
        let emp = normalize_row(&row(vec![
            ("ID", "101".into()),
            ("ID do Superior", "100".into()),
        ]));
        assert_eq!(emp.id, "101");
        assert_eq!(emp.parent_id.as_deref(), Some("100"));
    }

    #[test]
    fn lone_superior_column_sets_parent() {
        let emp = normalize_row(&row(vec![("Superior", "101".into())]));
        assert_eq!(emp.parent_id.as_deref(), Some("101"));
    }

    #[test]
    fn empty_row_gets_defaults() {
        let emp = normalize_row(&RawRow::new());
        assert!(emp.is_active);
        assert!(!emp.id.is_empty());
        assert_eq!(emp.name, "");
        assert_eq!(emp.role, "");
        assert_eq!(emp.parent_id, None);
    }

    #[test]
    fn uuid_strategy_synthesizes_uuid_ids() {
        let emp = Normalizer::new(IdGenerator::Uuid).normalize_row(&RawRow::new());
        assert_eq!(emp.id.len(), 32);
        assert!(Uuid::parse_str(&emp.id).is_ok());
    }

    #[test]
    fn short_ids_are_lowercase_alphanumeric() {
        let id = IdGenerator::Short.generate();
        assert_eq!(id.len(), SHORT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn id_strategy_parses_from_config_text() {
        assert_eq!("UUID".parse::<IdGenerator>(), Ok(IdGenerator::Uuid));
        assert_eq!(" short ".parse::<IdGenerator>(), Ok(IdGenerator::Short));
        assert!("random".parse::<IdGenerator>().is_err());
    }

    #[test]
    fn numeric_ids_render_as_integers() {
        let emp = normalize_row(&row(vec![
            ("id", CellValue::Number(7.0)),
            ("superior", CellValue::Number(3.0)),
        ]));
        assert_eq!(emp.id, "7");
        assert_eq!(emp.parent_id.as_deref(), Some("3"));
    }

    #[test]
    fn active_flag_coercion() {
        let cases: Vec<(CellValue, bool)> = vec![
            ("Sim".into(), true),
            ("TRUE".into(), true),
            ("1".into(), true),
            (CellValue::Number(1.0), true),
            (CellValue::Bool(false), false),
            ("não".into(), false),
            ("0".into(), false),
        ];
        for (value, expected) in cases {
            let emp = normalize_row(&row(vec![("Status (Ativo)", value.clone())]));
            assert_eq!(emp.is_active, expected, "value {value:?}");
        }
    }

    #[test]
    fn vacation_days_accept_only_allowed_values() {
        let pick = |value: CellValue| {
            normalize_row(&row(vec![("Dias de Férias", value)])).vacation_days
        };
        assert_eq!(pick("15".into()), Some(VacationDays::Fifteen));
        assert_eq!(pick("20 dias".into()), Some(VacationDays::Twenty));
        assert_eq!(pick(CellValue::Number(30.0)), Some(VacationDays::Thirty));
        assert_eq!(pick("12".into()), None);
        assert_eq!(pick("-10".into()), None);
        assert_eq!(pick("dez".into()), None);
    }

    #[test]
    fn shift_tokens_are_localized() {
        let pick = |value: &str| normalize_row(&row(vec![("Turno", value.into())])).shift;
        assert_eq!(pick("Manhã"), Some(Shift::Morning));
        assert_eq!(pick("tarde"), Some(Shift::Afternoon));
        assert_eq!(pick("NOITE"), Some(Shift::Night));
        assert_eq!(pick("Flexível"), Some(Shift::Flexible));
        assert_eq!(pick("night"), Some(Shift::Night));
        assert_eq!(pick("madrugada"), None);
    }

    #[test]
    fn orientation_and_department_rules() {
        let emp = normalize_row(&row(vec![
            ("Layout dos Subordinados", "VERTICAL".into()),
            ("Departamento", "   ".into()),
        ]));
        assert_eq!(emp.child_orientation, Some(ChildOrientation::Vertical));
        assert_eq!(emp.department, None);

        let emp = normalize_row(&row(vec![("Layout dos Subordinados", "diagonal".into())]));
        assert_eq!(emp.child_orientation, None);
    }

    #[test]
    fn dates_are_coerced_or_left_unset() {
        let emp = normalize_row(&row(vec![
            ("Data de Nascimento", CellValue::Number(32874.0)),
            ("Início das Férias", "not a date".into()),
        ]));
        assert_eq!(emp.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(emp.vacation_start, None);
    }

    #[test]
    fn failed_coercion_keeps_earlier_value() {
        let emp = normalize_row(&row(vec![
            ("Turno", "noite".into()),
            ("Shift", "sometimes".into()),
        ]));
        assert_eq!(emp.shift, Some(Shift::Night));
    }

    #[test]
    fn later_duplicate_header_wins() {
        let emp = normalize_row(&row(vec![("Nome", "Ana".into()), ("Name", "Bia".into())]));
        assert_eq!(emp.name, "Bia");
    }

    #[test]
    fn blank_cells_count_as_missing() {
        let emp = normalize_row(&row(vec![("ID", "  ".into()), ("Superior", "".into())]));
        assert!(!emp.id.trim().is_empty());
        assert_eq!(emp.parent_id, None);
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let emp = normalize_row(&row(vec![
            ("Telefone", "555-0100".into()),
            ("Nome Completo", "Ana Souza".into()),
        ]));
        assert_eq!(emp.name, "Ana Souza");
    }
}
