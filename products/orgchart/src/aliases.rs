//! Header alias table for spreadsheet/CSV imports.
//!
//! Resolution is exact-match first, then the longest alias contained in the
//! header. The two phases keep short aliases such as `id` from capturing
//! longer headers such as `id do superior`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// Canonical employee field a header can resolve to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    Name,
    Role,
    ParentId,
    Department,
    Shift,
    IsActive,
    BirthDate,
    VacationStart,
    VacationDays,
    ChildOrientation,
    PhotoUrl,
    Description,
}

const ALIASES: &[(&str, Field)] = &[
    ("id", Field::Id),
    ("código", Field::Id),
    ("codigo", Field::Id),
    ("matrícula", Field::Id),
    ("matricula", Field::Id),
    ("employee id", Field::Id),
    ("name", Field::Name),
    ("nome", Field::Name),
    ("nome completo", Field::Name),
    ("full name", Field::Name),
    ("colaborador", Field::Name),
    ("role", Field::Role),
    ("cargo", Field::Role),
    ("função", Field::Role),
    ("funcao", Field::Role),
    ("title", Field::Role),
    ("job title", Field::Role),
    ("position", Field::Role),
    ("parentid", Field::ParentId),
    ("parent id", Field::ParentId),
    ("parent_id", Field::ParentId),
    ("id do superior", Field::ParentId),
    ("superior", Field::ParentId),
    ("id do gestor", Field::ParentId),
    ("gestor", Field::ParentId),
    ("manager id", Field::ParentId),
    ("manager", Field::ParentId),
    ("reports to", Field::ParentId),
    ("department", Field::Department),
    ("departamento", Field::Department),
    ("setor", Field::Department),
    ("área", Field::Department),
    ("shift", Field::Shift),
    ("turno", Field::Shift),
    ("isactive", Field::IsActive),
    ("active", Field::IsActive),
    ("ativo", Field::IsActive),
    ("status (ativo)", Field::IsActive),
    ("status", Field::IsActive),
    ("birthdate", Field::BirthDate),
    ("birth date", Field::BirthDate),
    ("data de nascimento", Field::BirthDate),
    ("nascimento", Field::BirthDate),
    ("vacationstart", Field::VacationStart),
    ("vacation start", Field::VacationStart),
    ("início das férias", Field::VacationStart),
    ("inicio das ferias", Field::VacationStart),
    ("vacationdays", Field::VacationDays),
    ("vacation days", Field::VacationDays),
    ("dias de férias", Field::VacationDays),
    ("dias de ferias", Field::VacationDays),
    ("childorientation", Field::ChildOrientation),
    ("child orientation", Field::ChildOrientation),
    ("layout dos subordinados", Field::ChildOrientation),
    ("layout", Field::ChildOrientation),
    ("photourl", Field::PhotoUrl),
    ("photo url", Field::PhotoUrl),
    ("url da foto", Field::PhotoUrl),
    ("foto", Field::PhotoUrl),
    ("description", Field::Description),
    ("descrição", Field::Description),
    ("descricao", Field::Description),
];

static EXACT: Lazy<HashMap<&'static str, Field>> =
    Lazy::new(|| ALIASES.iter().copied().collect());

/// Aliases ordered longest first, ties broken alphabetically.
static BY_LENGTH: Lazy<Vec<(&'static str, Field)>> = Lazy::new(|| {
    let mut sorted = ALIASES.to_vec();
    sorted.sort_by(|(a, _), (b, _)| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    sorted
});

pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Map a raw column header onto the field it names, if any.
pub fn resolve_header(header: &str) -> Option<Field> {
    let normalized = normalize_header(header);
    if normalized.is_empty() {
        return None;
    }
    if let Some(field) = EXACT.get(normalized.as_str()) {
        return Some(*field);
    }
    BY_LENGTH
        .iter()
        .find(|(alias, _)| normalized.contains(*alias))
        .map(|(_, field)| *field)
}
