use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical employee record, independent of the spreadsheet dialect it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacation_days: Option<VacationDays>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_orientation: Option<ChildOrientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active: true,
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// A record takes part in tree construction only with a non-empty id and name.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty()
    }

    /// Last day of the vacation window, inclusive.
    pub fn vacation_end(&self) -> Option<NaiveDate> {
        let start = self.vacation_start?;
        let days = self.vacation_days?.days();
        start.checked_add_days(Days::new(u64::from(days - 1)))
    }

    pub fn is_on_vacation(&self, today: NaiveDate) -> bool {
        match (self.vacation_start, self.vacation_end()) {
            (Some(start), Some(end)) => start <= today && today <= end,
            _ => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
    Flexible,
}

impl Shift {
    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
            Shift::Flexible => "flexible",
        }
    }

    /// Accepts canonical English tokens and their Portuguese spellings, case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "morning" | "manhã" | "manha" => Some(Shift::Morning),
            "afternoon" | "tarde" => Some(Shift::Afternoon),
            "night" | "noite" => Some(Shift::Night),
            "flexible" | "flexível" | "flexivel" => Some(Shift::Flexible),
            _ => None,
        }
    }
}

/// Vacation allowances the HR policy permits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum VacationDays {
    Ten,
    Fifteen,
    Twenty,
    Thirty,
}

impl VacationDays {
    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            10 => Some(VacationDays::Ten),
            15 => Some(VacationDays::Fifteen),
            20 => Some(VacationDays::Twenty),
            30 => Some(VacationDays::Thirty),
            _ => None,
        }
    }

    pub fn days(self) -> u32 {
        match self {
            VacationDays::Ten => 10,
            VacationDays::Fifteen => 15,
            VacationDays::Twenty => 20,
            VacationDays::Thirty => 30,
        }
    }
}

impl TryFrom<u32> for VacationDays {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        VacationDays::from_days(value)
            .ok_or_else(|| format!("unsupported vacation allowance: {value}"))
    }
}

impl From<VacationDays> for u32 {
    fn from(value: VacationDays) -> Self {
        value.days()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildOrientation {
    Horizontal,
    Vertical,
}

impl ChildOrientation {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "horizontal" => Some(ChildOrientation::Horizontal),
            "vertical" => Some(ChildOrientation::Vertical),
            _ => None,
        }
    }
}

/// An employee placed in the chart, owning its direct reports.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNode {
    #[serde(flatten)]
    pub employee: Employee,
    pub children: Vec<ChartNode>,
    pub total_subordinates: usize,
}

impl ChartNode {
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            children: Vec::new(),
            total_subordinates: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.employee.id
    }

    /// Depth-first pre-order traversal of this subtree, starting with `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a ChartNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ChartNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Number of nodes across every tree of the forest.
pub fn forest_len(forest: &[ChartNode]) -> usize {
    forest.iter().map(|root| root.total_subordinates + 1).sum()
}
