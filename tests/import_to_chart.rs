use anyhow::Result;
use orgchart::{
    ChildOrientation, HierarchyBuilder, Normalizer, Shift, VacationDays, build_forest,
    superior_candidates,
};
use orgchart_tests::{TEMPLATE_EXPORT, employee, preorder_ids};
use platform_tabular::read_csv;

fn assert_iso_date(value: &serde_json::Value, expected: &str) {
    assert_eq!(value.as_str(), Some(expected));
}

#[test]
fn template_export_round_trips_into_a_chart() -> Result<()> {
    let rows = read_csv(TEMPLATE_EXPORT)?;
    let employees = Normalizer::default().normalize_rows(&rows);
    assert_eq!(employees.len(), 5);

    let helena = &employees[0];
    assert_eq!(helena.shift, Some(Shift::Morning));
    assert_eq!(helena.description.as_deref(), Some("Fundadora, CEO"));
    assert_eq!(helena.child_orientation, Some(ChildOrientation::Horizontal));
    assert_eq!(helena.parent_id, None);

    let rafael = &employees[1];
    assert_eq!(rafael.vacation_days, Some(VacationDays::Thirty));
    assert_eq!(rafael.shift, Some(Shift::Flexible));

    let lucas = &employees[2];
    assert!(!lucas.is_active);
    assert_eq!(lucas.vacation_days, None);

    let paula = &employees[3];
    assert!(paula.is_active);
    assert_eq!(paula.department, None);

    let (forest, report) = HierarchyBuilder::new().build(&employees);
    assert_eq!(report.dropped_invalid, 1);
    assert_eq!(preorder_ids(&forest), ["100", "101", "102", "103"]);
    assert_eq!(forest[0].total_subordinates, 3);
    assert_eq!(forest[0].children[0].total_subordinates, 1);

    let json = serde_json::to_value(&forest)?;
    assert_iso_date(&json[0]["birthDate"], "1975-03-02");
    assert_iso_date(&json[0]["children"][0]["birthDate"], "1982-05-17");
    assert_iso_date(&json[0]["children"][0]["vacationStart"], "2024-07-01");
    Ok(())
}

#[test]
fn rebuilding_is_idempotent() -> Result<()> {
    let rows = read_csv(TEMPLATE_EXPORT)?;
    let employees = Normalizer::default().normalize_rows(&rows);
    assert_eq!(build_forest(&employees), build_forest(&employees));
    Ok(())
}

#[test]
fn edits_flow_back_as_records() {
    let mut records = vec![
        employee("ceo", None),
        employee("cto", Some("ceo")),
        employee("dev", Some("cto")),
    ];
    let allowed: Vec<String> = superior_candidates(&records, "ceo")
        .into_iter()
        .map(|e| e.id.clone())
        .collect();
    assert!(allowed.is_empty());

    // Reassigning the CEO under the dev would loop; the builder cuts the edge.
    records[0].parent_id = Some("dev".into());
    let forest = build_forest(&records);
    assert_eq!(preorder_ids(&forest), ["dev", "ceo", "cto"]);
    assert_eq!(forest.len(), 1);
}
