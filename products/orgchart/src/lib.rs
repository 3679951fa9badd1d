//! Org chart vertical slice.
//!
//! Raw spreadsheet rows flow through [`normalize`] into canonical
//! [`Employee`] records, which [`hierarchy`] assembles into a forest of
//! [`ChartNode`] trees. Everything here is pure and synchronous.

pub mod aliases;
pub mod cell;
pub mod dates;
pub mod departments;
pub mod employee;
pub mod hierarchy;
pub mod normalize;
pub mod search;

pub use aliases::{Field, resolve_header};
pub use cell::{CellValue, RawRow};
pub use departments::{DEFAULT_DEPARTMENT_LABEL, DepartmentGroup, group_by_department};
pub use employee::{ChartNode, ChildOrientation, Employee, Shift, VacationDays, forest_len};
pub use hierarchy::{BuildReport, HierarchyBuilder, build_forest, superior_candidates};
pub use normalize::{IdGenerator, Normalizer, normalize_row};
pub use search::filter_forest;
