use rc_zone::input::ProjectInput;
use schemars::schema_for;

#[test]
fn test_generate_json_schema() {
    let schema = schema_for!(ProjectInput);
    let json = serde_json::to_value(&schema).unwrap();

    assert_eq!(json["title"], "ProjectInput");
    assert!(json["properties"]["Zones"].is_object());
    assert!(json["definitions"]["MassClass"].is_object());
}
